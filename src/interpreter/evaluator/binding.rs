use std::rc::Rc;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        env::Environment,
        evaluator::{
            core::{Context, EvalResult},
            utils::{binder_name, comma_split, filled_slot, malformed},
        },
        value::{core::Value, function::Function},
    },
};

/// Evaluates a `let ... in ... end` node.
///
/// The comma-separated bindings install sequentially into one fresh frame,
/// so later bindings see earlier ones, and the body evaluates in that
/// frame. Two binding forms exist:
///
/// - `name = expr` evaluates `expr` immediately in the new frame.
/// - `f(params) = expr` builds a closure over the new frame without
///   evaluating `expr`. Because `f` is installed into the very frame the
///   closure captures, the body can call `f` recursively.
///
/// # Errors
/// Returns [`RuntimeError::InvalidBindingTarget`] when a binding is not of
/// either form or a target is not name-like.
pub fn let_in(context: &Context, node: &Node, env: &Rc<Environment>, args: &[&Node])
              -> EvalResult<Value> {
    let [bindings, body] = args else {
        return Err(malformed(node));
    };

    let frame = Environment::child(env);
    for binding in comma_split(bindings) {
        install(context, binding, &frame)?;
    }

    context.eval(body, &frame)
}

/// Installs one `target = expr` binding into `frame`.
fn install(context: &Context, binding: &Node, frame: &Rc<Environment>) -> EvalResult<()> {
    let Node::Branch(branch) = binding else {
        return Err(RuntimeError::InvalidBindingTarget { at: binding.start() });
    };
    if branch.ops.len() != 1 || branch.ops[0].text != "=" {
        return Err(RuntimeError::InvalidBindingTarget { at: branch.start });
    }

    let target = filled_slot(branch, 0)?;
    let expr = filled_slot(branch, 1)?;

    match target {
        Node::Leaf(_) => {
            let name = binder_name(target)?;
            let value = context.eval(expr, frame)?;
            frame.define(name, value);
        },
        Node::Branch(call) if matches!(call.signature.as_str(), "E ( E ) _" | "E ( _ ) _") => {
            let name = binder_name(filled_slot(call, 0)?)?;
            let params = if call.signature == "E ( E ) _" {
                comma_split(filled_slot(call, 1)?).iter()
                                                  .map(|param| binder_name(param))
                                                  .collect::<EvalResult<Vec<_>>>()?
            } else {
                Vec::new()
            };

            frame.define(name,
                         Value::Function(Rc::new(Function::Closure { params,
                                                                     body: expr.clone(),
                                                                     env: Rc::clone(frame) })));
        },
        Node::Branch(other) => return Err(RuntimeError::InvalidBindingTarget { at: other.start }),
    }

    Ok(())
}
