/// `let` bindings.
///
/// Implements the `let ... in ... end` handler: sequential value bindings
/// and recursive function bindings installed into a fresh frame.
pub mod binding;
/// The native function table.
///
/// Defines every builtin installed into the root environment: arithmetic,
/// comparisons, the lazy logical connectives, ranges, and the output
/// builtins.
pub mod builtin;
/// Calls and lambdas.
///
/// Implements call normalisation: the generic operator rule, application
/// nodes, lambda construction, and the thunking of arguments to lazy
/// callees.
pub mod call;
/// Lists, indexing, and field access.
pub mod collection;
/// Control flow.
///
/// Implements the conditional cascade, sequence nodes, grouping, and the
/// `for` comprehensions.
pub mod control;
/// The dispatch core.
///
/// Declares the evaluation context, the handler table with its key forms,
/// signature dispatch, and the function-call machinery.
pub mod core;
/// Leaf handlers.
///
/// Evaluates bare tokens: name resolution for words and operators, literal
/// parsing for numbers and strings.
pub mod leaf;
/// Small helpers shared by the handlers.
pub mod utils;
