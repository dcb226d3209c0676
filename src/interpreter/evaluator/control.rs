use std::rc::Rc;

use crate::{
    ast::Node,
    interpreter::{
        env::Environment,
        evaluator::{
            core::{Context, EvalResult},
            utils::{binder_name, filled_slot, malformed},
        },
        value::core::Value,
    },
};

/// Accepts every signature whose operators are all separators: `,`, `;`,
/// or a newline. Such nodes are statement sequences.
#[must_use]
pub fn sequence_signature(signature: &str) -> bool {
    let parts: Vec<&str> = signature.split(' ').collect();

    parts.len() >= 3
    && parts.len() % 2 == 1
    && parts.iter()
            .skip(1)
            .step_by(2)
            .all(|op| matches!(*op, "," | ";" | "\n"))
}

/// Evaluates the elements of a sequence in order and returns the last.
///
/// Empty slots (as left by a trailing separator) are skipped. A sequence
/// with no elements at all yields `null`.
pub fn sequence(context: &Context, _node: &Node, env: &Rc<Environment>, args: &[&Node])
                -> EvalResult<Value> {
    let mut last = Value::Null;
    for arg in args {
        last = context.eval(arg, env)?;
    }
    Ok(last)
}

/// Evaluates a grouping node: `_ ( E ) _` or `_ begin E end _`.
///
/// Grouping has no semantics of its own; the inner expression is evaluated
/// unchanged.
pub fn grouping(context: &Context, node: &Node, env: &Rc<Environment>, args: &[&Node])
                -> EvalResult<Value> {
    let [inner] = args else {
        return Err(malformed(node));
    };
    context.eval(inner, env)
}

/// Accepts the conditional cascade:
/// `_ if E then E (elif E then E)* (else E)? end _`.
#[must_use]
pub fn conditional_signature(signature: &str) -> bool {
    let parts: Vec<&str> = signature.split(' ').collect();
    let n = parts.len();

    if n < 7
       || parts[0] != "_"
       || parts[1] != "if"
       || parts[2] != "E"
       || parts[3] != "then"
       || parts[4] != "E"
       || parts[n - 2] != "end"
       || parts[n - 1] != "_"
    {
        return false;
    }

    let mut i = 5;
    while parts.get(i) == Some(&"elif") {
        if parts.get(i + 1) != Some(&"E")
           || parts.get(i + 2) != Some(&"then")
           || parts.get(i + 3) != Some(&"E")
        {
            return false;
        }
        i += 4;
    }
    if parts.get(i) == Some(&"else") {
        if parts.get(i + 1) != Some(&"E") {
            return false;
        }
        i += 2;
    }

    i == n - 2
}

/// Evaluates a conditional cascade.
///
/// Conditions are evaluated in order until one is `true`; its branch is the
/// result and nothing after it is touched. With no `else` and no true
/// condition the cascade yields `null`. Conditions must be booleans.
///
/// # Errors
/// Returns [`crate::error::RuntimeError::ExpectedBoolean`] for non-boolean
/// conditions.
pub fn conditional(context: &Context, node: &Node, env: &Rc<Environment>, _args: &[&Node])
                   -> EvalResult<Value> {
    let Node::Branch(branch) = node else {
        return Err(malformed(node));
    };

    let mut i = 0;
    while i < branch.ops.len() {
        match branch.ops[i].text.as_str() {
            "if" | "elif" => {
                let condition = filled_slot(branch, i + 1)?;
                if context.eval(condition, env)?.as_bool(condition.start())? {
                    return context.eval(filled_slot(branch, i + 2)?, env);
                }
                i += 2;
            },
            "else" => return context.eval(filled_slot(branch, i + 1)?, env),
            _ => break,
        }
    }

    Ok(Value::Null)
}

/// Evaluates a `for` comprehension, with or without a `when` filter.
///
/// The iterable must be a list. Every iteration binds the loop variable in
/// a fresh child frame, so closures created in the body capture that
/// iteration's element. With a filter, elements whose condition is `false`
/// are skipped. The results form a new list.
///
/// # Errors
/// Returns [`crate::error::RuntimeError::ExpectedList`] for non-list
/// iterables and [`crate::error::RuntimeError::ExpectedBoolean`] for
/// non-boolean filter results.
pub fn comprehension(context: &Context, node: &Node, env: &Rc<Environment>, args: &[&Node])
                     -> EvalResult<Value> {
    let (var, iterable, condition, body) = match args {
        [var, iterable, body] => (var, iterable, None, body),
        [var, iterable, condition, body] => (var, iterable, Some(condition), body),
        _ => return Err(malformed(node)),
    };

    let name = binder_name(var)?;
    let items = Rc::clone(context.eval(iterable, env)?.as_list(iterable.start())?);

    let mut collected = Vec::new();
    for item in items.iter() {
        let frame = Environment::child(env);
        frame.define(name.clone(), item.clone());

        if let Some(condition) = condition
           && !context.eval(condition, &frame)?.as_bool(condition.start())?
        {
            continue;
        }

        collected.push(context.eval(body, &frame)?);
    }

    Ok(Value::List(Rc::new(collected)))
}
