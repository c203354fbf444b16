//! # Variables
//!
//! A `Variable` is a cheaply clonable handle with a value slot. The solver never owns
//! variables; it records their identity while constraints referencing them are live and pushes
//! computed values back through `set_value` when asked to.
use std::cell::Cell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Source of unique variable ids.
static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

#[derive(Debug)]
struct VariableData {
    id: usize,
    name: Option<String>,
    value: Cell<f64>,
}

/// A real-valued variable to be solved for.
///
/// Clones share the underlying slot: equality, ordering into maps and the value seen by
/// `value()` all follow the handle's identity, not its current value. The id generator is global,
/// so variables from different solvers never collide.
#[derive(Clone, Debug)]
pub struct Variable(Rc<VariableData>);

impl Variable {
    /// Create a new anonymous variable with value zero.
    pub fn new() -> Self {
        Self(Rc::new(VariableData {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            name: None,
            value: Cell::new(0f64),
        }))
    }

    /// Create a new named variable with value zero.
    ///
    /// The name only shows up in `Display` output; identity is by id regardless.
    pub fn named(name: impl Into<String>) -> Self {
        Self(Rc::new(VariableData {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            name: Some(name.into()),
            value: Cell::new(0f64),
        }))
    }

    /// The value most recently pushed into this variable.
    pub fn value(&self) -> f64 {
        self.0.value.get()
    }

    /// Overwrite the value slot.
    pub fn set_value(&self, value: f64) {
        self.0.value.set(value);
    }
}

impl Default for Variable {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}
impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.0.name {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "v{}", self.0.id),
        }
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use crate::data::linear_program::variable::Variable;

    #[test]
    fn clones_share_identity_and_value() {
        let x = Variable::named("x");
        let also_x = x.clone();
        let y = Variable::new();

        assert_eq!(x, also_x);
        assert_ne!(x, y);

        x.set_value(3.5f64);
        assert_eq!(also_x.value(), 3.5f64);
        assert_eq!(y.value(), 0f64);
    }

    #[test]
    fn usable_as_map_key() {
        let x = Variable::new();
        let mut map = HashMap::new();
        map.insert(x.clone(), 1);
        map.insert(x.clone(), 2);

        assert_eq!(map.len(), 1);
        assert_eq!(map[&x], 2);
    }
}
