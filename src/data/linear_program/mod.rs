//! # Describing constraint systems
//!
//! Everything callers use to state a problem: variables, the expression algebra over them,
//! constraint relations and the strength scale. The solver in `crate::algorithm` consumes these
//! and never constructs them itself.
pub mod constraint;
pub mod elements;
pub mod expression;
pub mod strength;
pub mod variable;
