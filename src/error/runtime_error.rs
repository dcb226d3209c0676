#[derive(Debug)]
/// Represents all errors that can occur during evaluation.
pub enum RuntimeError {
    /// No handler matched the node's signature.
    UnknownNodeType {
        /// The signature that failed to dispatch.
        signature: String,
        /// Byte offset in the source where the error occurred.
        at:        usize,
    },
    /// A binding position holds something other than a name-like token.
    InvalidBindingTarget {
        /// Byte offset in the source where the error occurred.
        at: usize,
    },
    /// Tried to use a name not present in the environment chain.
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// Byte offset in the source where the error occurred.
        at:   usize,
    },
    /// Tried to access a field that the receiver does not carry.
    UnknownField {
        /// The name of the field.
        name: String,
        /// Byte offset in the source where the error occurred.
        at:   usize,
    },
    /// Tried to call a value that is not a function.
    NotCallable {
        /// Byte offset in the source where the error occurred.
        at: usize,
    },
    /// The wrong number of arguments was supplied to a function.
    ArgumentCountMismatch {
        /// The number of parameters the function declares.
        expected: usize,
        /// The number of arguments actually supplied.
        found:    usize,
        /// Byte offset in the source where the error occurred.
        at:       usize,
    },
    /// A boolean value was expected, but not found.
    ExpectedBoolean {
        /// Byte offset in the source where the error occurred.
        at: usize,
    },
    /// A numeric value was expected, but not found.
    ExpectedNumber {
        /// Byte offset in the source where the error occurred.
        at: usize,
    },
    /// A list value was expected, but not found.
    ExpectedList {
        /// Byte offset in the source where the error occurred.
        at: usize,
    },
    /// A string value was expected, but not found.
    ExpectedString {
        /// Byte offset in the source where the error occurred.
        at: usize,
    },
    /// A value had an unexpected or incompatible type.
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// Byte offset in the source where the error occurred.
        at:      usize,
    },
    /// An index was not a non-negative integer in range for `usize`.
    ExpectedInteger {
        /// Byte offset in the source where the error occurred.
        at: usize,
    },
    /// Tried to access a list element outside the allowed bounds.
    IndexOutOfBounds {
        /// The length of the list.
        len:   usize,
        /// The index that was actually requested.
        found: usize,
        /// Byte offset in the source where the error occurred.
        at:    usize,
    },
    /// Attempted division by zero.
    DivisionByZero {
        /// Byte offset in the source where the error occurred.
        at: usize,
    },
    /// An assertion failed during execution.
    AssertionFailed {
        /// Byte offset in the source where the error occurred.
        at: usize,
    },
    /// A numeric literal could not be read as a number.
    MalformedNumber {
        /// The text of the literal.
        text: String,
        /// Byte offset in the source where the error occurred.
        at:   usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownNodeType { signature, at } => {
                write!(f, "Error at offset {at}: no handler matches '{signature}'.")
            },
            Self::InvalidBindingTarget { at } => {
                write!(f, "Error at offset {at}: invalid binding target.")
            },
            Self::UnknownVariable { name, at } => {
                write!(f, "Error at offset {at}: unknown variable '{name}'.")
            },
            Self::UnknownField { name, at } => {
                write!(f, "Error at offset {at}: unknown field '{name}'.")
            },
            Self::NotCallable { at } => {
                write!(f, "Error at offset {at}: value is not callable.")
            },
            Self::ArgumentCountMismatch { expected, found, at } => write!(f,
                                                                          "Error at offset {at}: expected {expected} arguments, found {found}."),
            Self::ExpectedBoolean { at } => write!(f, "Error at offset {at}: expected boolean."),
            Self::ExpectedNumber { at } => write!(f, "Error at offset {at}: expected number."),
            Self::ExpectedList { at } => write!(f, "Error at offset {at}: expected list."),
            Self::ExpectedString { at } => write!(f, "Error at offset {at}: expected string."),
            Self::TypeError { details, at } => {
                write!(f, "Error at offset {at}: type error: {details}.")
            },
            Self::ExpectedInteger { at } => {
                write!(f, "Error at offset {at}: expected a non-negative integer index.")
            },
            Self::IndexOutOfBounds { len, found, at } => write!(f,
                                                                "Error at offset {at}: index {found} is out of bounds for a list of length {len}."),
            Self::DivisionByZero { at } => write!(f, "Error at offset {at}: division by zero."),
            Self::AssertionFailed { at } => write!(f, "Error at offset {at}: assertion failed."),
            Self::MalformedNumber { text, at } => {
                write!(f, "Error at offset {at}: malformed number literal '{text}'.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
