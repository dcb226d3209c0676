#[derive(Debug)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// The lexer found input that no token rule can consume.
    UnreadableCharacter {
        /// The text that could not be classified.
        slice: String,
        /// Byte offset in the source where the error occurred.
        at:    usize,
    },
    /// A token has no priority entry under any lookup key.
    UnknownOperator {
        /// The text of the offending token.
        text: String,
        /// Byte offset in the source where the error occurred.
        at:   usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnreadableCharacter { slice, at } => {
                write!(f, "Error at offset {at}: no token rule matches '{slice}'.")
            },

            Self::UnknownOperator { text, at } => {
                write!(f, "Error at offset {at}: unknown operator '{text}'.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
