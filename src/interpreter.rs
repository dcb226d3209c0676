/// The environment module implements the chain of lexical scopes.
///
/// Environments map names to values and delegate unresolved lookups to
/// their parent frame. They are created on `let`, on closure invocation,
/// and on each comprehension iteration, and live as long as some closure
/// captures them.
///
/// # Responsibilities
/// - Name resolution along the parent chain.
/// - Shadowing: definitions write only the innermost frame.
pub mod env;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator dispatches every node through a handler table keyed on
/// node signatures, evaluates expressions, manages environments, and
/// produces results. It is the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Dispatches nodes to handlers by signature, latest registration first.
/// - Implements the standard handlers: names, literals, operator calls,
///   grouping, lists, field access, conditionals, bindings, lambdas, and
///   comprehensions.
/// - Hosts the builtin table and the function-call machinery.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads raw source text and produces a stream of tokens, each
/// carrying a kind, its exact text, and its byte span. This is the first
/// stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into classified tokens.
/// - Discards comments and blank space while keeping newlines as tokens.
/// - Reports unreadable input.
pub mod lexer;
/// The parser module builds the abstract syntax tree from tokens.
///
/// The parser reshapes the flat token sequence into nested nodes driven by
/// a single priority comparison; there is no grammar beyond the priority
/// table. Its output is one root node of the uniform shape the evaluator
/// dispatches on.
///
/// # Responsibilities
/// - Maintains the stack of partial nodes (handles).
/// - Resolves operator priorities with the keyed fallback lookup.
/// - Collapses trivial handles so leaves stay bare tokens.
pub mod parser;
/// The tagger module distinguishes unary from binary operators.
///
/// A single pass between lexer and parser that reclassifies `infix` tokens
/// in operand position as `prefix`, so the parser never needs to know
/// about unary operators.
pub mod tagger;
/// The value module defines the runtime data types for evaluation.
///
/// Declares all value types used during execution: numbers, booleans,
/// strings, lists, host objects, and functions, along with conversion
/// helpers, equality, and display formatting.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported variants.
/// - Defines the `Function` sum, including the lazy capability.
/// - Provides checked conversions used by builtins and handlers.
pub mod value;
