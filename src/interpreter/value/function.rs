use std::rc::Rc;

use crate::{
    ast::Node,
    interpreter::{
        env::Environment,
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// Type alias for native function handlers.
///
/// A native receives the evaluation context, a slice of argument values, and
/// the byte offset of the call site for error reporting.
pub type NativeFn = fn(&Context, &[Value], usize) -> EvalResult<Value>;

/// A callable runtime value.
///
/// Laziness is a capability of the function itself, not a property of any
/// particular call: a [`Function::Lazy`] callee receives each argument as a
/// zero-argument thunk closing over the call-site environment, which is what
/// lets `and` and `or` short-circuit.
pub enum Function {
    /// A native function whose arguments are evaluated before the call.
    Strict {
        /// The name the function is installed under, for display.
        name:  &'static str,
        /// The exact number of arguments the function accepts.
        arity: usize,
        /// The native implementation.
        func:  NativeFn,
    },
    /// A native function whose arguments arrive as zero-argument thunks.
    Lazy {
        /// The name the function is installed under, for display.
        name:  &'static str,
        /// The exact number of thunks the function accepts.
        arity: usize,
        /// The native implementation.
        func:  NativeFn,
    },
    /// A function written in Teacup: a lambda or a `let` function binding.
    /// Calling it evaluates `body` in a fresh child of `env` with the
    /// parameters bound.
    Closure {
        /// Parameter names, already carrying the `prefix:` key prefix where
        /// the parameter was a prefix token.
        params: Vec<String>,
        /// The body expression.
        body:   Node,
        /// The defining environment, captured at creation.
        env:    Rc<Environment>,
    },
    /// A callable field bound to the object it was read from. Invoking it
    /// passes the receiver as the first argument.
    Bound {
        /// The object the field was accessed on.
        receiver: Value,
        /// The underlying callable field.
        method:   Rc<Function>,
    },
}

impl Function {
    /// Whether calls to this function receive thunks instead of values.
    #[must_use]
    pub fn is_lazy(&self) -> bool {
        match self {
            Self::Lazy { .. } => true,
            Self::Bound { method, .. } => method.is_lazy(),
            Self::Strict { .. } | Self::Closure { .. } => false,
        }
    }

    /// A short human-readable description, used by `Display` for values.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Strict { name, .. } | Self::Lazy { name, .. } => format!("builtin {name}"),
            Self::Closure { params, .. } => format!("function/{}", params.len()),
            Self::Bound { method, .. } => format!("bound {}", method.describe()),
        }
    }
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>", self.describe())
    }
}
