//! # Error reporting for incremental solving
//!
//! One enum per fallible public operation, describing every way that operation can be refused.
//! All of them are conditions in user input except `Internal`, which reports that a solver
//! invariant was violated and indicates a defect in the solver rather than in the constraint
//! system.
use std::error::Error;
use std::fmt;

/// A solver invariant was violated.
#[derive(Debug, Eq, PartialEq)]
pub struct Internal {
    description: &'static str,
}

impl Internal {
    pub(crate) fn new(description: &'static str) -> Self {
        Self { description }
    }
}

impl fmt::Display for Internal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "internal solver error: {}", self.description)
    }
}

impl Error for Internal {}

/// Why a constraint could not be added.
#[derive(Debug, Eq, PartialEq)]
pub enum AddConstraint {
    /// The exact constraint handle was added before and not removed since.
    Duplicate,
    /// The constraint is required yet conflicts with the required constraints already present.
    Unsatisfiable,
    Internal(Internal),
}

impl fmt::Display for AddConstraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AddConstraint::Duplicate => write!(f, "the constraint was already added to the solver"),
            AddConstraint::Unsatisfiable => write!(f, "the required constraint can not be satisfied"),
            AddConstraint::Internal(error) => error.fmt(f),
        }
    }
}

impl Error for AddConstraint {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AddConstraint::Internal(error) => Some(error),
            _ => None,
        }
    }
}

/// Why a constraint could not be removed.
#[derive(Debug, Eq, PartialEq)]
pub enum RemoveConstraint {
    /// The constraint handle is not currently in the solver.
    Unknown,
    Internal(Internal),
}

impl fmt::Display for RemoveConstraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RemoveConstraint::Unknown => write!(f, "the constraint is not known to the solver"),
            RemoveConstraint::Internal(error) => error.fmt(f),
        }
    }
}

impl Error for RemoveConstraint {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RemoveConstraint::Internal(error) => Some(error),
            _ => None,
        }
    }
}

/// Why a variable could not be registered for editing.
#[derive(Debug, Eq, PartialEq)]
pub enum AddEditVariable {
    /// The variable is already registered.
    Duplicate,
    /// Edits must be able to be violated; the required strength is not allowed.
    BadRequiredStrength,
}

impl fmt::Display for AddEditVariable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AddEditVariable::Duplicate => write!(f, "the variable is already registered for editing"),
            AddEditVariable::BadRequiredStrength => {
                write!(f, "an edit variable can not have the required strength")
            },
        }
    }
}

impl Error for AddEditVariable {}

/// Why a variable could not be unregistered from editing.
#[derive(Debug, Eq, PartialEq)]
pub enum RemoveEditVariable {
    /// The variable is not registered.
    Unknown,
    Internal(Internal),
}

impl fmt::Display for RemoveEditVariable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RemoveEditVariable::Unknown => write!(f, "the variable is not registered for editing"),
            RemoveEditVariable::Internal(error) => error.fmt(f),
        }
    }
}

impl Error for RemoveEditVariable {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RemoveEditVariable::Internal(error) => Some(error),
            _ => None,
        }
    }
}

/// Why a value could not be suggested.
#[derive(Debug, Eq, PartialEq)]
pub enum SuggestValue {
    /// The variable is not registered for editing.
    Unknown,
    Internal(Internal),
}

impl fmt::Display for SuggestValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SuggestValue::Unknown => write!(f, "the variable is not registered for editing"),
            SuggestValue::Internal(error) => error.fmt(f),
        }
    }
}

impl Error for SuggestValue {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SuggestValue::Internal(error) => Some(error),
            _ => None,
        }
    }
}
