//! # Tableau primitives
//!
//! The symbolic building blocks of the solver: symbols labelling tableau columns and rows as
//! linear combinations of symbols.
pub mod row;
pub mod symbol;

/// Tolerance within which a value is treated as zero.
///
/// This is the only numerical tolerance in the crate. It governs whether a coefficient is dropped
/// from a row on insertion, whether the artificial objective was driven to zero and whether an
/// all-dummy row is redundant. Feasibility and optimality tests compare against zero exactly.
pub const EPSILON: f64 = 1e-8;

/// Whether `value` lies within `EPSILON` of zero.
pub fn near_zero(value: f64) -> bool {
    value.abs() < EPSILON
}
