//! # An incremental linear constraint solver.
//!
//! Systems of weighted linear equality and inequality constraints over real-valued variables are
//! solved using an incremental variant of the Simplex Method as described in the paper Solving
//! Linear Arithmetic Constraints for User Interface Applications by Greg J. Badros and Alan
//! Borning.
//!
//! Required constraints hold exactly in the computed solution; the violation of the remaining
//! constraints is minimised by strength. Constraints and interactively edited variables can be
//! added, removed and re-valued in any order, and the solver updates the solution it already has
//! instead of solving the system from scratch.
pub mod algorithm;
pub mod data;

#[cfg(test)]
mod tests;
