use std::rc::Rc;

use crate::interpreter::lexer::Token;

/// An abstract syntax tree node.
///
/// Every node is either a bare leaf token or a branch: an ordered sequence
/// of operand slots interleaved with operator tokens. The branch shape is
/// uniform across the whole language; what a branch *means* is decided by
/// the evaluator, keyed on the branch's [`signature`](Branch::signature).
///
/// Branches are reference counted so that closures can share their body
/// cheaply.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A single token standing alone: a number, string, word, or operator
    /// used as a value.
    Leaf(Token),
    /// An operator-interleaved sequence of operands.
    Branch(Rc<Branch>),
}

impl Node {
    /// Builds a node from the parts of a completed handle.
    ///
    /// A handle of the trivial form `[NONE, token, NONE]` collapses into the
    /// bare token, so the evaluator sees raw tokens for atomic leaves.
    /// Anything else becomes a [`Branch`].
    ///
    /// `slots` must hold exactly one more element than `ops`.
    #[must_use]
    pub fn from_parts(slots: Vec<Option<Self>>, mut ops: Vec<Token>) -> Self {
        if ops.len() == 1 && slots.iter().all(Option::is_none) {
            return Self::Leaf(ops.remove(0));
        }
        Self::Branch(Rc::new(Branch::new(slots, ops)))
    }

    /// Byte offset where the node begins in the source.
    #[must_use]
    pub fn start(&self) -> usize {
        match self {
            Self::Leaf(token) => token.start,
            Self::Branch(branch) => branch.start,
        }
    }

    /// Byte offset one past where the node ends in the source.
    #[must_use]
    pub fn end(&self) -> usize {
        match self {
            Self::Leaf(token) => token.end,
            Self::Branch(branch) => branch.end,
        }
    }
}

/// An operator-interleaved sequence: `operand (op operand)*`.
///
/// The sequence always begins and ends with an operand slot, so `slots`
/// holds exactly `ops.len() + 1` entries. An empty slot (`None`) marks a
/// position where no operand appeared, as in the leading slot of
/// `_ ( E ) _`.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    /// The operand slots in order; `None` is the empty slot.
    pub slots:     Vec<Option<Node>>,
    /// The operator tokens in order.
    pub ops:       Vec<Token>,
    /// The canonical string form of the node's shape, used as the
    /// evaluator's dispatch key.
    pub signature: String,
    /// Byte offset where the branch begins in the source.
    pub start:     usize,
    /// Byte offset one past where the branch ends in the source.
    pub end:       usize,
}

impl Branch {
    /// Assembles a branch and caches its signature and span.
    ///
    /// The span covers all components that are actually present: it starts
    /// at the first operand if the leading slot is filled, otherwise at the
    /// first operator, and symmetrically for the end.
    ///
    /// `ops` must be non-empty and `slots` one element longer than `ops`.
    #[must_use]
    pub fn new(slots: Vec<Option<Node>>, ops: Vec<Token>) -> Self {
        let signature = signature_of(&slots, &ops);

        let start = match slots.first() {
            Some(Some(node)) => node.start(),
            _ => ops.first().map_or(0, |op| op.start),
        };
        let end = match slots.last() {
            Some(Some(node)) => node.end(),
            _ => ops.last().map_or(0, |op| op.end),
        };

        Self { slots,
               ops,
               signature,
               start,
               end }
    }

    /// The filled operand slots, in order.
    ///
    /// These are the values handed to a matching handler as its arguments.
    pub fn args(&self) -> impl Iterator<Item = &Node> {
        self.slots.iter().flatten()
    }
}

/// Derives the signature string for a slot/operator sequence.
///
/// Each operand slot becomes `_` when empty and `E` when filled; operator
/// tokens contribute their exact text. Components are joined with single
/// spaces, e.g. `E + E` or `_ if E then E else E end _`.
fn signature_of(slots: &[Option<Node>], ops: &[Token]) -> String {
    let mut parts = Vec::with_capacity(slots.len() + ops.len());

    for (i, slot) in slots.iter().enumerate() {
        parts.push(if slot.is_some() { "E" } else { "_" });
        if let Some(op) = ops.get(i) {
            parts.push(op.text.as_str());
        }
    }

    parts.join(" ")
}
