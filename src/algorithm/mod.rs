//! # Algorithms
//!
//! The solving machinery. There is a single algorithm family here: the incremental simplex
//! method, split into the solver driving it and the tableau it operates on.
pub mod incremental;
