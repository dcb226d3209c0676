//! # teacup
//!
//! teacup is a small expression-oriented language written in Rust.
//! Source text runs through a four-stage pipeline: a lexer, a prefix
//! tagger, a parser driven entirely by operator priority pairs, and a
//! pattern-dispatched tree-walking evaluator. The same machinery doubles
//! as a compact language-building toolkit: priorities, handlers, and root
//! bindings are plain values on the evaluation context and can be extended
//! or overridden by the embedder.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::interpreter::{evaluator::core::Context, value::core::Value};

/// Defines the structure of parsed code.
///
/// This module declares the node types that represent the syntactic
/// structure of source code as a tree. Every node is either a bare token
/// or an operator-interleaved sequence of operand slots; the node's
/// signature string is the evaluator's dispatch key. The tree is built
/// bottom-up by the parser and is immutable afterwards.
///
/// # Responsibilities
/// - Defines the leaf/branch node sum and the branch invariants.
/// - Derives signatures and source spans for every branch.
/// - Collapses trivial handles into bare tokens.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing,
/// parsing, or evaluating code. It standardizes error reporting and
/// carries detailed information about failures, including byte offsets
/// into the source for debugging and user feedback.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches source offsets and detailed messages for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, tagging, parsing, evaluation, value
/// representations, environments, and error handling to provide a complete
/// runtime for source code evaluation. It exposes the public API for
/// interpreting and extending the language.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, tagger, parser, evaluator.
/// - Provides entry points for evaluating user code.
/// - Manages the flow of data and errors between stages.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// This module provides reusable conversion routines used throughout the
/// evaluator, such as checked conversions between `f64` and `usize`.
///
/// # Responsibilities
/// - Safely convert numeric indices without silent data loss.
pub mod util;

/// Evaluates a program against the default Teacup definition.
///
/// A fresh [`Context`] is created for the call, so successive invocations
/// do not observe each other. Embedders that want persistent bindings or
/// custom handlers should create and keep their own context instead.
///
/// # Errors
/// Returns an error if lexing, parsing, or evaluation fails.
///
/// # Examples
/// ```
/// use teacup::{evaluate, interpreter::value::core::Value};
///
/// let result = evaluate("1 + 2 * 3").unwrap();
/// assert_eq!(result, Some(Value::Number(7.0)));
///
/// // Empty input has no value at all.
/// assert_eq!(evaluate("").unwrap(), None);
///
/// // An unknown variable is an error.
/// assert!(evaluate("x + 1").is_err());
/// ```
pub fn evaluate(source: &str) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    Context::new().evaluate(source)
}

/// Runs a program and optionally prints its final value.
///
/// This is the CLI entry point: it evaluates the source with a fresh
/// default context and, when `auto_print` is set and the program produced
/// a value, writes that value to stdout.
///
/// # Errors
/// Returns an error if parsing or evaluation fails.
///
/// # Examples
/// ```
/// use teacup::get_result;
///
/// // Simple expression: the result is calculated and no error occurs.
/// let res = get_result("let x = 2 in x + 2 end", false);
/// assert!(res.is_ok());
///
/// // Example with an intentional error (unknown variable).
/// let res = get_result("y + 1", false);
/// assert!(res.is_err());
/// ```
pub fn get_result(source: &str, auto_print: bool) -> Result<(), Box<dyn std::error::Error>> {
    let result = evaluate(source)?;

    if auto_print && let Some(value) = result {
        println!("{value}");
    }

    Ok(())
}
