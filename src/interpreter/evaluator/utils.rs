use crate::{
    ast::{Branch, Node},
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        lexer::TokenKind,
    },
};

/// The dispatch key of a node: the kind name for a leaf, the signature for
/// a branch.
#[must_use]
pub fn node_signature(node: &Node) -> &str {
    match node {
        Node::Leaf(token) => token.kind.name(),
        Node::Branch(branch) => branch.signature.as_str(),
    }
}

/// The error raised when a handler receives a node whose shape it does not
/// actually understand. Dispatch normally prevents this; it guards the
/// handlers against being registered under foreign keys.
#[must_use]
pub fn malformed(node: &Node) -> RuntimeError {
    RuntimeError::UnknownNodeType { signature: node_signature(node).to_string(),
                                    at:        node.start(), }
}

/// Verifies that a call supplies exactly the declared number of arguments.
///
/// # Errors
/// Returns [`RuntimeError::ArgumentCountMismatch`] on any difference.
pub const fn check_arity(expected: usize, found: usize, at: usize) -> EvalResult<()> {
    if expected == found {
        Ok(())
    } else {
        Err(RuntimeError::ArgumentCountMismatch { expected, found, at })
    }
}

/// Splits a node on top-level commas.
///
/// A branch whose operators are all `,` contributes its filled slots in
/// order; any other node is a single-element split. Argument lists, list
/// literals, index chains, bindings, and parameter lists all share this
/// shape.
#[must_use]
pub fn comma_split(node: &Node) -> Vec<&Node> {
    if let Node::Branch(branch) = node
       && branch.ops.iter().all(|op| op.text == ",")
    {
        return branch.args().collect();
    }
    vec![node]
}

/// Strips one surrounding pair of parentheses, if present.
///
/// Used on lambda parameter lists so that `(a, b) -> ...` and
/// `a -> ...` take the same path.
#[must_use]
pub fn unwrap_parens(node: &Node) -> &Node {
    if let Node::Branch(branch) = node
       && branch.signature == "_ ( E ) _"
       && let Some(Some(inner)) = branch.slots.get(1)
    {
        return inner;
    }
    node
}

/// Resolves a binding target to the environment key it binds.
///
/// Only name-like tokens may bind: words and infix operators bind their
/// text, prefix operators bind under the `prefix:` key. Everything else is
/// an invalid binding target.
///
/// # Errors
/// Returns [`RuntimeError::InvalidBindingTarget`] for non-name nodes.
pub fn binder_name(node: &Node) -> EvalResult<String> {
    match node {
        Node::Leaf(token) => match token.kind {
            TokenKind::Word | TokenKind::Infix => Ok(token.text.clone()),
            TokenKind::Prefix => Ok(format!("prefix:{}", token.text)),
            _ => Err(RuntimeError::InvalidBindingTarget { at: token.start }),
        },
        Node::Branch(branch) => Err(RuntimeError::InvalidBindingTarget { at: branch.start }),
    }
}

/// Fetches a slot that the matched signature guarantees to be filled.
///
/// # Errors
/// Returns [`RuntimeError::UnknownNodeType`] if the slot is missing after
/// all, which indicates a handler registered under a key it cannot serve.
pub fn filled_slot<'a>(branch: &'a Branch, index: usize) -> EvalResult<&'a Node> {
    branch.slots
          .get(index)
          .and_then(Option::as_ref)
          .ok_or_else(|| RuntimeError::UnknownNodeType { signature: branch.signature.clone(),
                                                         at:        branch.start, })
}
