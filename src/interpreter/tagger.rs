use crate::interpreter::lexer::{Token, TokenKind};

/// Reclassifies `infix` tokens that sit in operand position as `prefix`.
///
/// A single left-to-right pass over the token sequence. An `infix` token is
/// rewritten to `prefix` when the previous token kind is `infix` or `open`,
/// or when the token starts the stream. This distinguishes unary `-a` from
/// binary `a - b` before parsing, without any grammar ambiguity.
///
/// The pass is idempotent: a `prefix` token never triggers reclassification
/// of its successor, so re-tagging an already tagged stream changes nothing.
///
/// # Parameters
/// - `tokens`: The token sequence, rewritten in place.
///
/// # Example
/// ```
/// use teacup::interpreter::{
///     lexer::{TokenKind, tokenize},
///     tagger::tag_prefixes,
/// };
///
/// let mut tokens = tokenize("-3 + 4").unwrap();
/// tag_prefixes(&mut tokens);
///
/// assert_eq!(tokens[0].kind, TokenKind::Prefix);
/// assert_eq!(tokens[2].kind, TokenKind::Infix);
/// ```
pub fn tag_prefixes(tokens: &mut [Token]) {
    let mut prev: Option<TokenKind> = None;

    for token in tokens.iter_mut() {
        if token.kind == TokenKind::Infix
           && matches!(prev, None | Some(TokenKind::Infix | TokenKind::Open))
        {
            token.kind = TokenKind::Prefix;
        }
        prev = Some(token.kind);
    }
}
