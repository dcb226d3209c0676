use std::{collections::HashMap, rc::Rc};

use ordered_float::OrderedFloat;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::function::Function},
};

/// Represents a runtime value in the interpreter.
///
/// This enum models all first-class values that can appear in expressions,
/// bindings, function arguments, and results. Compound values are reference
/// counted: cloning a `Value` never copies a list or an object.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absent value, produced by an `if` cascade whose conditions all
    /// fail and which carries no `else` branch. Not denotable in source.
    Null,
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// A boolean value (`true` or `false`).
    /// Produced by comparison operators and the logical builtins, and
    /// required as the condition of `if`, `when`, `and`, and `or`.
    Bool(bool),
    /// A string value.
    Str(Rc<str>),
    /// A list of `Value` elements.
    List(Rc<Vec<Self>>),
    /// A host object: a named bag of values installed by the embedder.
    /// Fields are reached with `.`; callable fields are bound to the object
    /// when accessed.
    Object(Rc<HashMap<String, Self>>),
    /// A callable value.
    Function(Rc<Function>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Number(a), Self::Number(b)) => OrderedFloat(*a) == OrderedFloat(*b),
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b),
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(Rc::from(v))
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::List(Rc::new(v))
    }
}

impl From<Rc<Function>> for Value {
    fn from(v: Rc<Function>) -> Self {
        Self::Function(v)
    }
}

impl Value {
    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// # Parameters
    /// - `at`: Byte offset in the source for error reporting.
    ///
    /// # Returns
    /// - `Ok(f64)`: If the value is a number.
    /// - `Err(RuntimeError::ExpectedNumber)`: Otherwise.
    pub const fn as_number(&self, at: usize) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            _ => Err(RuntimeError::ExpectedNumber { at }),
        }
    }

    /// Converts the value to `bool`, or returns an error if not boolean.
    ///
    /// Used for the conditions of `if`, `when`, and the logical builtins.
    /// There is no implicit truthiness: only `Bool` converts.
    ///
    /// # Parameters
    /// - `at`: Byte offset in the source for error reporting.
    ///
    /// # Returns
    /// - `Ok(bool)`: The boolean value.
    /// - `Err(RuntimeError::ExpectedBoolean)`: If not boolean.
    pub const fn as_bool(&self, at: usize) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(RuntimeError::ExpectedBoolean { at }),
        }
    }

    /// Borrows the value as a list, or returns an error if it is not one.
    ///
    /// # Parameters
    /// - `at`: Byte offset in the source for error reporting.
    pub fn as_list(&self, at: usize) -> EvalResult<&Rc<Vec<Self>>> {
        match self {
            Self::List(items) => Ok(items),
            _ => Err(RuntimeError::ExpectedList { at }),
        }
    }

    /// Borrows the value as a string, or returns an error if it is not one.
    ///
    /// # Parameters
    /// - `at`: Byte offset in the source for error reporting.
    pub fn as_str(&self, at: usize) -> EvalResult<&str> {
        match self {
            Self::Str(s) => Ok(s),
            _ => Err(RuntimeError::ExpectedString { at }),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            },
            Self::Object(_) => write!(f, "<object>"),
            Self::Function(function) => write!(f, "<{}>", function.describe()),
        }
    }
}
