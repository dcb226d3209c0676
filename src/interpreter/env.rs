use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::interpreter::value::core::Value;

/// A single frame in the chain of lexical scopes.
///
/// An environment maps names to values and delegates unresolved lookups to
/// its parent frame. Mutation writes only to the innermost layer, so outer
/// bindings are shadowed rather than overwritten. New frames are created on
/// `let`, on every closure invocation, and on each comprehension iteration;
/// a frame lives exactly as long as some closure or evaluation references
/// it.
pub struct Environment {
    values: RefCell<HashMap<String, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates an empty root frame with no parent.
    #[must_use]
    pub fn root() -> Rc<Self> {
        Rc::new(Self { values: RefCell::new(HashMap::new()),
                       parent: None, })
    }

    /// Creates an empty frame whose lookups fall back to `parent`.
    #[must_use]
    pub fn child(parent: &Rc<Self>) -> Rc<Self> {
        Rc::new(Self { values: RefCell::new(HashMap::new()),
                       parent: Some(Rc::clone(parent)), })
    }

    /// Installs a binding in this frame, shadowing any outer binding of the
    /// same name.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.values.borrow_mut().insert(name.into(), value);
    }

    /// Resolves a name, walking parent frames until a binding is found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.values.borrow().get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.get(name))
    }
}
