use logos::Logos;

use crate::error::ParseError;

/// Classifies a token for the tagger, the priority table, and the evaluator.
///
/// The lexer produces every kind except [`TokenKind::Prefix`], which is
/// assigned exclusively by the prefix tagger when an `infix` token appears in
/// an operand position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A numeric literal such as `42`, `3.14`, or `2.1e-10`.
    Number,
    /// An opening bracket or opening keyword: `(`, `[`, `{`, `let`, `for`,
    /// `if`, `begin`.
    Open,
    /// A keyword that continues an open construct: `then`, `elif`, `else`,
    /// `in`, `do`, `when`.
    Middle,
    /// A closing bracket or the `end` keyword: `)`, `]`, `}`, `end`.
    Close,
    /// A separator or operator: `,`, `;`, a newline, a maximal run of symbol
    /// characters, or one of `and`, `or`, `not`.
    Infix,
    /// An `infix` token reclassified by the tagger because it sits where an
    /// operand was expected.
    Prefix,
    /// An identifier: a maximal alphanumeric/underscore run.
    Word,
    /// A double-quoted string literal with backslash escapes.
    Str,
}

impl TokenKind {
    /// The lowercase name of the kind, as used in priority-table keys
    /// (`type:<kind>`, `<kind>:<text>`) and in leaf dispatch.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Open => "open",
            Self::Middle => "middle",
            Self::Close => "close",
            Self::Infix => "infix",
            Self::Prefix => "prefix",
            Self::Word => "word",
            Self::Str => "string",
        }
    }
}

/// A lexical token: a minimal but meaningful unit of source text.
///
/// Tokens are immutable after lexing, except that the tagger may rewrite
/// `kind` from [`TokenKind::Infix`] to [`TokenKind::Prefix`].
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The classification of the token.
    pub kind:  TokenKind,
    /// The exact matched lexeme.
    pub text:  String,
    /// Byte offset of the first character in the source.
    pub start: usize,
    /// Byte offset one past the last character in the source.
    pub end:   usize,
}

/// The raw token rules, in declaration order.
///
/// Declaration order matters: keyword rules must come before the `Word` rule
/// so that `let` is an opener while `lettuce` stays a word (ties on length go
/// to the keyword, longer matches go to the word).
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
enum RawToken {
    /// Numeric literals such as `42`, `3.14`, or `2.1e-10`.
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    Number,
    /// Opening brackets and opening keywords.
    #[token("(")]
    #[token("[")]
    #[token("{")]
    #[token("let")]
    #[token("for")]
    #[token("if")]
    #[token("begin")]
    Open,
    /// Keywords that continue an open construct.
    #[token("then")]
    #[token("elif")]
    #[token("else")]
    #[token("in")]
    #[token("do")]
    #[token("when")]
    Middle,
    /// Closing brackets and the `end` keyword.
    #[token(")")]
    #[token("]")]
    #[token("}")]
    #[token("end")]
    Close,
    /// Separators, maximal symbol runs, and the word-like operators.
    #[token(",")]
    #[token(";")]
    #[token("\n")]
    #[regex(r"[!@$%^&*|/?.:~+=<>-]+")]
    #[token("and")]
    #[token("or")]
    #[token("not")]
    Infix,
    /// Identifiers.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word,
    /// `"double-quoted"` strings with backslash escapes.
    #[regex(r#""(\\.|[^"\\])*""#)]
    Str,
    /// `# Comments.`
    #[regex(r"#[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// Spaces, tabs and feeds. Newlines are tokens, not whitespace.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Whitespace,
}

impl RawToken {
    const fn kind(self) -> TokenKind {
        match self {
            Self::Number => TokenKind::Number,
            Self::Open => TokenKind::Open,
            Self::Middle => TokenKind::Middle,
            Self::Close => TokenKind::Close,
            Self::Infix => TokenKind::Infix,
            Self::Word => TokenKind::Word,
            Self::Str => TokenKind::Str,
            // Skipped by the lexer callbacks; never surfaces.
            Self::Comment | Self::Whitespace => unreachable!(),
        }
    }
}

/// Tokenizes source text into the Teacup token sequence.
///
/// Comments and blank space are discarded; newlines survive as `infix`
/// tokens because they act as statement separators. Byte spans are preserved
/// for error reporting.
///
/// # Parameters
/// - `source`: The source text to tokenize.
///
/// # Returns
/// The ordered token sequence.
///
/// # Errors
/// Returns [`ParseError::UnreadableCharacter`] if the input contains a
/// character no rule can consume.
///
/// # Example
/// ```
/// use teacup::interpreter::lexer::{TokenKind, tokenize};
///
/// let tokens = tokenize("1 + 2").unwrap();
///
/// assert_eq!(tokens.len(), 3);
/// assert_eq!(tokens[1].kind, TokenKind::Infix);
/// assert_eq!(tokens[1].text, "+");
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(raw) = lexer.next() {
        let span = lexer.span();
        match raw {
            Ok(raw) => tokens.push(Token { kind:  raw.kind(),
                                           text:  lexer.slice().to_string(),
                                           start: span.start,
                                           end:   span.end, }),
            Err(()) => {
                return Err(ParseError::UnreadableCharacter { slice: lexer.slice().to_string(),
                                                             at:    span.start, });
            },
        }
    }

    Ok(tokens)
}
