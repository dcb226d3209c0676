/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code. Parse errors include unreadable input and operators without a
/// priority entry; both abort the pipeline immediately.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation. Runtime
/// errors include unresolved names, nodes no handler recognises, type
/// mismatches, invalid binding targets, and failed assertions.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
