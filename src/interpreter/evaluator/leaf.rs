use std::rc::Rc;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        env::Environment,
        evaluator::{
            core::{Context, EvalResult},
            utils::malformed,
        },
        value::core::Value,
    },
};

/// Resolves a bare `word` or `infix` token as a name in the environment.
///
/// Operator tokens resolve exactly like words, which is what makes the
/// builtins ordinary bindings: `+` standing alone evaluates to the addition
/// function.
///
/// # Errors
/// Returns [`RuntimeError::UnknownVariable`] if the name is unbound.
pub fn word(_context: &Context, node: &Node, env: &Rc<Environment>, _args: &[&Node])
            -> EvalResult<Value> {
    let Node::Leaf(token) = node else {
        return Err(malformed(node));
    };

    env.get(&token.text)
       .ok_or_else(|| RuntimeError::UnknownVariable { name: token.text.clone(),
                                                      at:   token.start, })
}

/// Resolves a bare `prefix` token under its `prefix:` key.
///
/// # Errors
/// Returns [`RuntimeError::UnknownVariable`] if the name is unbound.
pub fn prefix(_context: &Context, node: &Node, env: &Rc<Environment>, _args: &[&Node])
              -> EvalResult<Value> {
    let Node::Leaf(token) = node else {
        return Err(malformed(node));
    };

    let name = format!("prefix:{}", token.text);
    env.get(&name)
       .ok_or_else(|| RuntimeError::UnknownVariable { name,
                                                      at: token.start })
}

/// Parses a `number` token into a double.
///
/// # Errors
/// Returns [`RuntimeError::MalformedNumber`] if the literal does not read
/// as an `f64`; the lexer rules make this unreachable for lexed input.
pub fn number(_context: &Context, node: &Node, _env: &Rc<Environment>, _args: &[&Node])
              -> EvalResult<Value> {
    let Node::Leaf(token) = node else {
        return Err(malformed(node));
    };

    token.text
         .parse::<f64>()
         .map(Value::Number)
         .map_err(|_| RuntimeError::MalformedNumber { text: token.text.clone(),
                                                      at:   token.start, })
}

/// Evaluates a `string` token by stripping its surrounding quotes.
///
/// Backslash escapes are accepted by the lexer but carried through
/// verbatim; only the delimiters are removed.
pub fn string(_context: &Context, node: &Node, _env: &Rc<Environment>, _args: &[&Node])
              -> EvalResult<Value> {
    let Node::Leaf(token) = node else {
        return Err(malformed(node));
    };

    let inner = token.text
                     .strip_prefix('"')
                     .and_then(|text| text.strip_suffix('"'))
                     .unwrap_or(&token.text);

    Ok(Value::Str(Rc::from(inner)))
}
