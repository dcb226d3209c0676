use std::rc::Rc;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        env::Environment,
        evaluator::{
            core::{Context, EvalResult},
            utils::{comma_split, malformed},
        },
        lexer::TokenKind,
        value::{core::Value, function::Function},
    },
    util::num::{f64_to_usize_checked, usize_to_f64},
};

/// Evaluates a list literal `_ [ E ] _`.
///
/// The bracket contents split on commas; each element is evaluated in
/// order.
pub fn list_literal(context: &Context, node: &Node, env: &Rc<Environment>, args: &[&Node])
                    -> EvalResult<Value> {
    let [contents] = args else {
        return Err(malformed(node));
    };

    let items = comma_split(contents).iter()
                                     .map(|element| context.eval(element, env))
                                     .collect::<EvalResult<Vec<_>>>()?;

    Ok(Value::List(Rc::new(items)))
}

/// Evaluates the empty list literal `_ [ _ ] _`.
pub fn empty_list(_context: &Context, _node: &Node, _env: &Rc<Environment>, _args: &[&Node])
                  -> EvalResult<Value> {
    Ok(Value::List(Rc::new(Vec::new())))
}

/// Evaluates an indexing node `E [ E ] _`.
///
/// Indexing iterates over the comma-separated indices, so `x[i, j]` means
/// `x[i][j]`. Every step requires the current value to be a list and the
/// index to be a non-negative integer within bounds.
///
/// # Errors
/// - [`RuntimeError::ExpectedList`] when indexing a non-list.
/// - [`RuntimeError::ExpectedInteger`] for fractional or negative indices.
/// - [`RuntimeError::IndexOutOfBounds`] past the end of the list.
pub fn index(context: &Context, node: &Node, env: &Rc<Environment>, args: &[&Node])
             -> EvalResult<Value> {
    let [receiver, indices] = args else {
        return Err(malformed(node));
    };

    let mut value = context.eval(receiver, env)?;
    for index_node in comma_split(indices) {
        let at = index_node.start();

        let position = context.eval(index_node, env)?.as_number(at)?;
        let position = f64_to_usize_checked(position, RuntimeError::ExpectedInteger { at })?;

        let items = value.as_list(at)?;
        let item = items.get(position)
                        .cloned()
                        .ok_or(RuntimeError::IndexOutOfBounds { len:   items.len(),
                                                                found: position,
                                                                at })?;
        value = item;
    }

    Ok(value)
}

/// Evaluates a field access node `E . E`.
///
/// When the right operand is a bare `word` it is taken as the literal field
/// name and never evaluated. Anything else on the right is evaluated and
/// must yield a string naming the field, so `x.("len" + "gth")` reaches the
/// same field as `x.length`.
///
/// A callable field comes back bound to its receiver: `obj.m(y)` calls `m`
/// with `obj` as its first argument.
///
/// # Errors
/// Returns [`RuntimeError::UnknownField`] when the receiver carries no such
/// field.
pub fn field(context: &Context, node: &Node, env: &Rc<Environment>, args: &[&Node])
             -> EvalResult<Value> {
    let [receiver_node, name_node] = args else {
        return Err(malformed(node));
    };

    let receiver = context.eval(receiver_node, env)?;
    let name = match *name_node {
        Node::Leaf(token) if token.kind == TokenKind::Word => token.text.clone(),
        other => {
            let at = other.start();
            context.eval(other, env)?.as_str(at)?.to_string()
        },
    };

    get_field(&receiver, &name, node.start())
}

/// Looks up a field on a receiver value.
///
/// Host objects expose their entries; lists and strings expose `length`.
fn get_field(receiver: &Value, name: &str, at: usize) -> EvalResult<Value> {
    match receiver {
        Value::Object(fields) => {
            let value = fields.get(name)
                              .cloned()
                              .ok_or_else(|| RuntimeError::UnknownField { name: name.to_string(),
                                                                          at })?;
            Ok(bind(receiver, value))
        },
        Value::List(items) if name == "length" => Ok(Value::Number(usize_to_f64(items.len()))),
        Value::Str(text) if name == "length" => {
            Ok(Value::Number(usize_to_f64(text.chars().count())))
        },
        _ => Err(RuntimeError::UnknownField { name: name.to_string(),
                                              at }),
    }
}

/// Binds a callable field to the object it was read from; other values pass
/// through untouched.
fn bind(receiver: &Value, value: Value) -> Value {
    match value {
        Value::Function(method) => {
            Value::Function(Rc::new(Function::Bound { receiver: receiver.clone(),
                                                      method }))
        },
        other => other,
    }
}
