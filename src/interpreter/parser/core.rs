use std::iter::Peekable;

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::priority::{Priority, PriorityTable},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// A partial node under construction.
///
/// A handle is an alternating `[operand, op, operand, op, ...]` sequence
/// that is still waiting for its final operand. `slots` and `ops` therefore
/// have equal length until the handle closes, at which point the pending
/// middle operand is appended and the handle becomes a [`Node`].
struct Handle {
    slots: Vec<Option<Node>>,
    ops:   Vec<Token>,
}

impl Handle {
    /// The bottom-of-stack handle. It holds no operator, so it ranks below
    /// every incoming token and the first token always opens on top of it.
    const fn root() -> Self {
        Self { slots: Vec::new(),
               ops:   Vec::new(), }
    }

    /// Starts a fresh handle claiming `middle` as its first operand.
    fn open(middle: Option<Node>, op: Token) -> Self {
        Self { slots: vec![middle],
               ops:   vec![op], }
    }

    /// Appends the pending operand and another operator of equal strength,
    /// keeping the handle flat. This is how `( E )` and
    /// `if E then E else E end` stay single nodes.
    fn extend(&mut self, middle: Option<Node>, op: Token) {
        self.slots.push(middle);
        self.ops.push(op);
    }

    /// Appends the final operand and finalizes the handle into a node.
    fn close(mut self, middle: Option<Node>) -> Node {
        self.slots.push(middle);
        Node::from_parts(self.slots, self.ops)
    }
}

/// The outcome of one priority comparison.
enum Order {
    /// Input exhausted and no handle open: parsing is finished.
    Done,
    /// The incoming operator pulls harder; it claims the middle operand and
    /// starts an inner handle.
    Open,
    /// Both sides bind equally; the current handle absorbs the operand and
    /// the operator.
    Extend,
    /// The held operator grips harder; the current handle takes the operand
    /// and finalizes.
    Close,
}

/// Compares the operator holding the current handle against the next
/// operator from the input.
///
/// An absent side ranks below everything: with no held operator the parser
/// can only open, and with no remaining input it can only close.
fn order(left: Option<Priority>, right: Option<Priority>) -> Order {
    match (left, right) {
        (None, None) => Order::Done,
        (None, Some(_)) => Order::Open,
        (Some(_), None) => Order::Close,
        (Some(left), Some(right)) => match left.left.cmp(&right.right) {
            std::cmp::Ordering::Less => Order::Open,
            std::cmp::Ordering::Equal => Order::Extend,
            std::cmp::Ordering::Greater => Order::Close,
        },
    }
}

/// Parses a tagged token sequence into a single node.
///
/// The parser keeps a stack of open handles and walks the input once. At
/// every step it compares the operator most recently bound into the current
/// handle with the next operator from the input, and the comparison alone
/// decides whether to open an inner handle, extend the current one, or
/// close it. Atoms take part in the same mechanism: a word or number is an
/// operator so strong that it immediately opens and immediately closes,
/// producing the trivial handle that collapses back into the bare token.
///
/// # Parameters
/// - `tokens`: The tagged token sequence.
/// - `table`: Priorities to drive the comparisons.
///
/// # Returns
/// The root node, or `None` for empty input.
///
/// # Errors
/// Returns [`ParseError::UnknownOperator`] if any token has no priority
/// entry.
///
/// # Example
/// ```
/// use teacup::interpreter::{
///     lexer::tokenize,
///     parser::{core::parse, priority::PriorityTable},
///     tagger::tag_prefixes,
/// };
///
/// let mut tokens = tokenize("1 + 2 * 3").unwrap();
/// tag_prefixes(&mut tokens);
///
/// let table = PriorityTable::teacup();
/// let root = parse(&tokens, &table).unwrap().unwrap();
///
/// // Multiplication binds tighter, so the root is the addition.
/// assert_eq!(root.start(), 0);
/// ```
pub fn parse(tokens: &[Token], table: &PriorityTable) -> ParseResult<Option<Node>> {
    let mut input = tokens.iter().peekable();
    let mut stack: Vec<Handle> = Vec::new();
    let mut current = Handle::root();
    let mut middle: Option<Node> = None;

    loop {
        let left = current.ops.last().map(|op| table.lookup(op)).transpose()?;
        let right = input.peek().map(|op| table.lookup(op)).transpose()?;

        match order(left, right) {
            Order::Done => return Ok(middle),
            Order::Open => {
                let op = advance(&mut input);
                stack.push(std::mem::replace(&mut current, Handle::open(middle.take(), op)));
            },
            Order::Extend => {
                let op = advance(&mut input);
                current.extend(middle.take(), op);
            },
            Order::Close => {
                let node = std::mem::replace(&mut current, Handle::root()).close(middle.take());

                // A closing handle holds an operator, so it was opened over
                // some outer handle that is still on the stack.
                match stack.pop() {
                    Some(outer) => current = outer,
                    None => unreachable!(),
                }
                middle = Some(node);
            },
        }
    }
}

/// Takes the next token from the input.
///
/// Only called after `order` saw a priority for it, so the token exists.
fn advance<'a, I>(input: &mut Peekable<I>) -> Token
    where I: Iterator<Item = &'a Token>
{
    match input.next() {
        Some(token) => token.clone(),
        None => unreachable!(),
    }
}
