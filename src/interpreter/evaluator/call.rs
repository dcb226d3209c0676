use std::rc::Rc;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        env::Environment,
        evaluator::{
            core::{Context, EvalResult},
            utils::{binder_name, comma_split, malformed, unwrap_parens},
        },
        lexer::{Token, TokenKind},
        value::{core::Value, function::Function},
    },
};

/// The characters that form symbol-run operators.
const OPERATOR_SYMBOLS: &str = "!@$%^&*|/?.:~+=<>-";

/// Accepts the signatures the generic operator rule serves: `E OP E` and
/// `_ OP E`, where `OP` is a symbol run or one of the word operators.
///
/// Separators (`,`, `;`, newline) are not symbol runs, so sequence nodes
/// never fall through to this rule.
#[must_use]
pub fn operator_signature(signature: &str) -> bool {
    let parts: Vec<&str> = signature.split(' ').collect();

    parts.len() == 3
    && matches!(parts[0], "E" | "_")
    && parts[2] == "E"
    && is_operator_text(parts[1])
}

fn is_operator_text(text: &str) -> bool {
    matches!(text, "and" | "or" | "not")
    || (!text.is_empty() && text.chars().all(|c| OPERATOR_SYMBOLS.contains(c)))
}

/// Evaluates an operator node as a call.
///
/// This is call normalisation for the operator form: the operator token is
/// the callee, resolved in the environment exactly like a leaf (`prefix`
/// tokens under their `prefix:` key), and the filled operand slots are the
/// arguments. `a + b` is therefore the same call as `+(a, b)` would be, and
/// redefining `+` in an inner scope changes what the operator means there.
///
/// # Errors
/// Returns [`RuntimeError::UnknownVariable`] for operators without a
/// binding, plus anything the called function raises.
pub fn operator(context: &Context, node: &Node, env: &Rc<Environment>, args: &[&Node])
                -> EvalResult<Value> {
    let Node::Branch(branch) = node else {
        return Err(malformed(node));
    };
    let Some(op) = branch.ops.first() else {
        return Err(malformed(node));
    };

    let callee = resolve_operator(op, env)?;
    invoke(context, &callee, args, env, op.start)
}

/// Evaluates a call node `E ( E ) _`: callee expression plus a
/// comma-separated argument list.
///
/// # Errors
/// Returns [`RuntimeError::NotCallable`] when the callee expression does
/// not produce a function.
pub fn apply(context: &Context, node: &Node, env: &Rc<Environment>, args: &[&Node])
             -> EvalResult<Value> {
    let [callee_node, arguments] = args else {
        return Err(malformed(node));
    };

    let callee = context.eval(callee_node, env)?;
    let arg_nodes = comma_split(arguments);
    invoke(context, &callee, &arg_nodes, env, node.start())
}

/// Evaluates a zero-argument call node `E ( _ ) _`.
///
/// # Errors
/// Returns [`RuntimeError::NotCallable`] when the callee expression does
/// not produce a function.
pub fn apply_empty(context: &Context, node: &Node, env: &Rc<Environment>, args: &[&Node])
                   -> EvalResult<Value> {
    let [callee_node] = args else {
        return Err(malformed(node));
    };

    let callee = context.eval(callee_node, env)?;
    invoke(context, &callee, &[], env, node.start())
}

/// Evaluates a lambda node `E -> E` into a closure value.
///
/// The left operand is the parameter list: unparenthesized, split on
/// commas, every element a name-like token. The closure captures the
/// current environment; nothing is evaluated until the call.
///
/// # Errors
/// Returns [`RuntimeError::InvalidBindingTarget`] for non-name parameters.
pub fn lambda(_context: &Context, node: &Node, env: &Rc<Environment>, args: &[&Node])
              -> EvalResult<Value> {
    let [params_node, body] = args else {
        return Err(malformed(node));
    };

    let params = comma_split(unwrap_parens(params_node)).iter()
                                                        .map(|param| binder_name(param))
                                                        .collect::<EvalResult<Vec<_>>>()?;

    Ok(Value::Function(Rc::new(Function::Closure { params,
                                                   body: Node::clone(body),
                                                   env: Rc::clone(env) })))
}

/// Resolves an operator token to its environment binding.
fn resolve_operator(op: &Token, env: &Rc<Environment>) -> EvalResult<Value> {
    let name = match op.kind {
        TokenKind::Prefix => format!("prefix:{}", op.text),
        _ => op.text.clone(),
    };

    env.get(&name)
       .ok_or_else(|| RuntimeError::UnknownVariable { name,
                                                      at: op.start })
}

/// Calls a callee with argument nodes, honouring its laziness.
///
/// Strict callees receive the arguments evaluated left to right. Lazy
/// callees receive each argument as a zero-parameter closure over the
/// call-site environment, deferring evaluation until the callee forces the
/// thunk; `and` and `or` owe their short-circuit behaviour to exactly this.
pub(crate) fn invoke(context: &Context, callee: &Value, arg_nodes: &[&Node],
                     env: &Rc<Environment>, at: usize)
                     -> EvalResult<Value> {
    let lazy = matches!(callee, Value::Function(function) if function.is_lazy());

    let args = if lazy {
        arg_nodes.iter().map(|node| thunk(node, env)).collect()
    } else {
        arg_nodes.iter()
                 .map(|node| context.eval(node, env))
                 .collect::<EvalResult<Vec<_>>>()?
    };

    context.call(callee, args, at)
}

/// Wraps an argument node as a zero-parameter closure over `env`.
fn thunk(node: &Node, env: &Rc<Environment>) -> Value {
    Value::Function(Rc::new(Function::Closure { params: Vec::new(),
                                                body:   node.clone(),
                                                env:    Rc::clone(env), }))
}
