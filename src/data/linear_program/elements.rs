//! # Building blocks to describe constraint systems.
use std::fmt;

/// The relation a constraint imposes between its expression and zero.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ConstraintType {
    Equal,
    Greater,
    Less,
}

impl fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConstraintType::Equal => write!(f, "=="),
            ConstraintType::Greater => write!(f, ">="),
            ConstraintType::Less => write!(f, "<="),
        }
    }
}
