//! # Data structures
//!
//! Separated into the problem description callers build (`linear_program`) and the symbolic
//! tableau primitives the solver computes with (`linear_algebra`).
pub(crate) mod linear_algebra;
pub mod linear_program;
