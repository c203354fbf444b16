//! # Constraints
//!
//! A constraint relates a linear expression to zero with a strength attached. Constraints are
//! immutable once built; the solver only ever reads them.
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::data::linear_program::elements::ConstraintType;
use crate::data::linear_program::expression::Expression;
use crate::data::linear_program::strength;

#[derive(Debug)]
struct ConstraintData {
    expression: Expression,
    constraint_type: ConstraintType,
    strength: f64,
}

/// A relation `expression (<= | == | >=) 0` with a strength.
///
/// The handle is cheap to clone and identity-keyed: two constraints are the same constraint only
/// when one is a clone of the other, no matter how their expressions compare. Adding a
/// structurally identical constraint twice is thus possible, while adding the same handle twice
/// is rejected as a duplicate.
#[derive(Clone, Debug)]
pub struct Constraint(Rc<ConstraintData>);

impl Constraint {
    /// Create a new constraint.
    ///
    /// # Arguments
    ///
    /// * `expression`: Anything convertible into an `Expression` (a variable, a term, a sum).
    /// * `constraint_type`: The relation imposed between the expression and zero.
    /// * `strength`: Clipped into `[0, REQUIRED]`.
    pub fn new(
        expression: impl Into<Expression>,
        constraint_type: ConstraintType,
        strength: f64,
    ) -> Self {
        Self(Rc::new(ConstraintData {
            expression: expression.into(),
            constraint_type,
            strength: strength::clip(strength),
        }))
    }

    pub fn expression(&self) -> &Expression {
        &self.0.expression
    }

    pub fn constraint_type(&self) -> ConstraintType {
        self.0.constraint_type
    }

    pub fn strength(&self) -> f64 {
        self.0.strength
    }
}

impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
impl Eq for Constraint {}

impl Hash for Constraint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.0) as usize).hash(state);
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} 0 [{}]",
            self.0.expression, self.0.constraint_type, self.0.strength,
        )
    }
}
