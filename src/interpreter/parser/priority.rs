use std::collections::HashMap;

use crate::{
    error::ParseError,
    interpreter::lexer::Token,
};

/// How tightly an operator binds on each of its sides.
///
/// During parsing, two operators compete for the operand between them: the
/// operator already holding the current handle grips with its `left`
/// strength, and the incoming operator pulls with its `right` strength.
/// A stronger grip closes the handle, a stronger pull opens a new one, and
/// equal strength extends the handle in place, which is how `( E )` and
/// `if E then E end` become single flat nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Priority {
    /// Binding strength exerted while holding a handle.
    pub left:  u32,
    /// Binding strength exerted when arriving from the input.
    pub right: u32,
}

/// The strength used by the tight side of prefix-like operators: stronger
/// than every ordinary operator, weaker than atoms and closers.
const TIGHT: u32 = 10_004;
/// The strength with which atoms hold and pull; nothing outbinds an atom.
const ATOM: u32 = 20_005;

/// A left-associative pair: holds its right operand against an equal
/// incoming operator.
const fn lassoc(n: u32) -> Priority {
    Priority { left: n, right: n - 1 }
}

/// A right-associative pair: yields its right operand to an equal incoming
/// operator.
const fn rassoc(n: u32) -> Priority {
    Priority { left: n, right: n + 1 }
}

/// A non-associative pair: equal operators extend the same handle, which
/// yields flat n-ary nodes for separators and chains.
const fn xassoc(n: u32) -> Priority {
    Priority { left: n, right: n }
}

/// A prefix pair: pulls whatever follows into a fresh handle, closes at
/// level `n`.
const fn prefix(n: u32) -> Priority {
    Priority { left: n, right: TIGHT }
}

/// The keyed priority table with its fallback lookup.
///
/// A token's priority is resolved under three keys in order:
/// `"<kind>:<text>"`, then `"<text>"`, then `"type:<kind>"`. A token that
/// matches none of them is a syntax error; there is no default priority.
#[derive(Debug, Clone)]
pub struct PriorityTable {
    entries: HashMap<String, Priority>,
}

impl PriorityTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self { entries: HashMap::new() }
    }

    /// Inserts or replaces the entry under `key`.
    pub fn set(&mut self, key: impl Into<String>, priority: Priority) {
        self.entries.insert(key.into(), priority);
    }

    /// Resolves the priority pair for a token.
    ///
    /// # Errors
    /// Returns [`ParseError::UnknownOperator`] when no fallback key matches.
    pub fn lookup(&self, token: &Token) -> Result<Priority, ParseError> {
        let kind = token.kind.name();

        self.entries
            .get(&format!("{kind}:{}", token.text))
            .or_else(|| self.entries.get(&token.text))
            .or_else(|| self.entries.get(&format!("type:{kind}")))
            .copied()
            .ok_or_else(|| ParseError::UnknownOperator { text: token.text.clone(),
                                                         at:   token.start, })
    }

    /// The definitional Teacup priority instance.
    ///
    /// Openers pull hard and hold loosely, so everything after `(` nests
    /// inside it until a middle or closer arrives at the shared bracket
    /// level. Closers hold hardest of all, so a finished bracket node acts
    /// like an atom. Statement separators sit near the bottom, arithmetic in
    /// the middle, field access near the top.
    #[must_use]
    pub fn teacup() -> Self {
        let mut table = Self::new();

        table.set("type:open", Priority { left: 5, right: TIGHT });
        table.set("type:middle", xassoc(5));
        table.set("type:close", Priority { left: TIGHT + 1, right: 5 });

        table.set("\n", xassoc(15));
        table.set(";", xassoc(15));
        table.set(",", xassoc(25));

        table.set("=", rassoc(35));
        table.set("->", rassoc(35));

        table.set("not", prefix(105));
        table.set("or", lassoc(115));
        table.set("and", lassoc(125));

        for comparison in ["<", "<=", ">", ">=", "=="] {
            table.set(comparison, xassoc(205));
        }

        table.set("..", xassoc(305));

        table.set("+", lassoc(505));
        table.set("-", lassoc(505));

        table.set("prefix:-", prefix(605));
        table.set("*", lassoc(605));
        table.set("/", lassoc(605));
        table.set("%", lassoc(605));

        table.set("^", rassoc(705));

        table.set("type:infix", xassoc(905));
        table.set("type:prefix", prefix(905));

        // Field access: pulled above everything but atoms, held above
        // everything full stop.
        table.set(".", Priority { left: 15_005, right: 1_004 });

        table.set("type:word", xassoc(ATOM));
        table.set("type:number", xassoc(ATOM));
        table.set("type:string", xassoc(ATOM));

        table
    }
}

impl Default for PriorityTable {
    fn default() -> Self {
        Self::new()
    }
}
