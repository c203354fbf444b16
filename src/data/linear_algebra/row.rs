//! # Tableau rows
//!
//! A row is a constant plus a linear combination of symbols. Every tableau manipulation the
//! solver performs reduces to a handful of arithmetic primitives on rows; all of them maintain
//! the invariant that no cell holds a coefficient within `EPSILON` of zero.
use std::collections::btree_map::Iter;
use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;

use crate::data::linear_algebra::near_zero;
use crate::data::linear_algebra::symbol::{Symbol, SymbolType};

/// A linear combination of symbols plus a constant.
///
/// When stored in the basis under a symbol `s`, a row represents the equality
/// `s = constant + Σ coefficient * symbol` over its cells; free-standing (during construction),
/// it represents `0 = constant + Σ coefficient * symbol`.
///
/// Cells are kept in a `BTreeMap` keyed by symbol, so iteration is deterministic and "the first
/// cell" is well defined (lowest symbol id first).
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    constant: f64,
    cells: BTreeMap<Symbol, f64>,
}

impl Row {
    /// Create a row holding only a constant.
    pub fn new(constant: f64) -> Self {
        Self {
            constant,
            cells: BTreeMap::new(),
        }
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn iter(&self) -> Iter<Symbol, f64> {
        self.cells.iter()
    }

    /// Shift the constant term.
    ///
    /// # Return value
    ///
    /// The new constant, such that callers can test feasibility without a second lookup.
    pub fn shift_constant(&mut self, delta: f64) -> f64 {
        self.constant += delta;
        self.constant
    }

    /// Add `coefficient` to the cell for `symbol`.
    ///
    /// The cell is created when absent and removed when the sum lands within `EPSILON` of zero.
    pub fn insert_symbol(&mut self, symbol: Symbol, coefficient: f64) {
        let total = self.cells.get(&symbol).copied().unwrap_or(0f64) + coefficient;
        if near_zero(total) {
            self.cells.remove(&symbol);
        } else {
            self.cells.insert(symbol, total);
        }
    }

    /// Add a multiple of another row to this row.
    ///
    /// # Arguments
    ///
    /// * `other`: Row to add, cell by cell.
    /// * `multiplier`: Factor all of `other`'s cells and its constant are scaled with.
    pub fn insert_row(&mut self, other: &Row, multiplier: f64) {
        self.constant += other.constant * multiplier;
        for (&symbol, &coefficient) in &other.cells {
            self.insert_symbol(symbol, coefficient * multiplier);
        }
    }

    pub fn remove_symbol(&mut self, symbol: Symbol) {
        self.cells.remove(&symbol);
    }

    /// Negate the constant and every coefficient.
    pub fn reverse_sign(&mut self) {
        self.constant = -self.constant;
        for coefficient in self.cells.values_mut() {
            *coefficient = -*coefficient;
        }
    }

    /// Rewrite the row such that it expresses `symbol` in the remaining cells.
    ///
    /// Given `0 = constant + a * symbol + Σ rest`, removing `symbol` and scaling by `-1 / a`
    /// leaves `symbol = constant + Σ rest`, the form a basis row keyed by `symbol` must have.
    ///
    /// # Arguments
    ///
    /// * `symbol`: Must be present in the row with a coefficient that is not zero.
    pub fn solve_for_symbol(&mut self, symbol: Symbol) {
        debug_assert_ne!(self.coefficient_for(symbol), 0f64);

        let coefficient = self.coefficient_for(symbol);
        self.cells.remove(&symbol);
        let scale = -1f64 / coefficient;
        self.constant *= scale;
        for value in self.cells.values_mut() {
            *value *= scale;
        }
    }

    /// Rewrite a basis row keyed by `lhs` such that it expresses `rhs` instead.
    ///
    /// Used when pivoting: the row `lhs = constant + Σ cells` first becomes the free-standing
    /// `0 = constant - lhs + Σ cells`, which is then solved for `rhs`.
    pub fn solve_for_symbols(&mut self, lhs: Symbol, rhs: Symbol) {
        self.insert_symbol(lhs, -1f64);
        self.solve_for_symbol(rhs);
    }

    /// The coefficient of `symbol`, or zero when the row has no cell for it.
    pub fn coefficient_for(&self, symbol: Symbol) -> f64 {
        self.cells.get(&symbol).copied().unwrap_or(0f64)
    }

    /// Replace every occurrence of `symbol` by the given row.
    ///
    /// When the row holds `a * symbol`, the cell is removed and `a * other` is added in its
    /// place. Rows without a cell for `symbol` are left untouched.
    pub fn substitute(&mut self, symbol: Symbol, other: &Row) {
        if let Some(coefficient) = self.cells.remove(&symbol) {
            self.insert_row(other, coefficient);
        }
    }

    /// Whether the row has no cells left.
    pub fn is_constant(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether all cells hold dummy symbols.
    ///
    /// Holds vacuously for a constant row.
    pub fn all_dummies(&self) -> bool {
        self.cells.keys().all(|symbol| symbol.symbol_type() == SymbolType::Dummy)
    }

    /// The first slack or error symbol in the row, if any.
    ///
    /// Used when an artificial variable must be pivoted out of the basis at zero level.
    pub fn any_pivotable_symbol(&self) -> Option<Symbol> {
        self.cells.keys().find(|symbol| symbol.is_pivotable()).copied()
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} + {}",
            self.constant,
            self.cells
                .iter()
                .map(|(symbol, coefficient)| format!("{} {}", coefficient, symbol))
                .join(" + "),
        )
    }
}

#[cfg(test)]
mod test {
    use crate::data::linear_algebra::row::Row;
    use crate::data::linear_algebra::symbol::{Symbol, SymbolType};

    fn external(id: usize) -> Symbol {
        Symbol::new(id, SymbolType::External)
    }

    #[test]
    fn insert_symbol_accumulates() {
        let mut row = Row::new(1f64);
        let x = external(1);

        row.insert_symbol(x, 2f64);
        assert_eq!(row.coefficient_for(x), 2f64);

        row.insert_symbol(x, 3f64);
        assert_eq!(row.coefficient_for(x), 5f64);
    }

    #[test]
    fn insert_symbol_drops_near_zero() {
        let mut row = Row::new(0f64);
        let x = external(1);

        row.insert_symbol(x, 2f64);
        row.insert_symbol(x, -2f64 + 1e-10);
        assert_eq!(row.coefficient_for(x), 0f64);
        assert!(row.is_constant());
    }

    #[test]
    fn insert_row_scales() {
        let x = external(1);
        let y = external(2);

        let mut other = Row::new(3f64);
        other.insert_symbol(x, 1f64);
        other.insert_symbol(y, -2f64);

        let mut row = Row::new(1f64);
        row.insert_symbol(x, 1f64);
        row.insert_row(&other, 2f64);

        assert_eq!(row.constant(), 7f64);
        assert_eq!(row.coefficient_for(x), 3f64);
        assert_eq!(row.coefficient_for(y), -4f64);
    }

    #[test]
    fn reverse_sign() {
        let x = external(1);
        let mut row = Row::new(-5f64);
        row.insert_symbol(x, 2f64);

        row.reverse_sign();
        assert_eq!(row.constant(), 5f64);
        assert_eq!(row.coefficient_for(x), -2f64);
    }

    #[test]
    fn solve_for_symbol() {
        // 0 = 10 - 2x + y, solved for x: x = 5 + y / 2
        let x = external(1);
        let y = external(2);
        let mut row = Row::new(10f64);
        row.insert_symbol(x, -2f64);
        row.insert_symbol(y, 1f64);

        row.solve_for_symbol(x);
        assert_eq!(row.constant(), 5f64);
        assert_eq!(row.coefficient_for(x), 0f64);
        assert_eq!(row.coefficient_for(y), 0.5f64);
    }

    #[test]
    fn solve_for_symbols() {
        // s = 4 + 2x, pivoted to express x: x = -2 + s / 2
        let s = Symbol::new(1, SymbolType::Slack);
        let x = external(2);
        let mut row = Row::new(4f64);
        row.insert_symbol(x, 2f64);

        row.solve_for_symbols(s, x);
        assert_eq!(row.constant(), -2f64);
        assert_eq!(row.coefficient_for(s), 0.5f64);
        assert_eq!(row.coefficient_for(x), 0f64);
    }

    #[test]
    fn substitute() {
        // 0 = 1 + 3x + y with x = 2 - y becomes 0 = 7 - 2y
        let x = external(1);
        let y = external(2);
        let mut row = Row::new(1f64);
        row.insert_symbol(x, 3f64);
        row.insert_symbol(y, 1f64);

        let mut basic = Row::new(2f64);
        basic.insert_symbol(y, -1f64);

        row.substitute(x, &basic);
        assert_eq!(row.constant(), 7f64);
        assert_eq!(row.coefficient_for(x), 0f64);
        assert_eq!(row.coefficient_for(y), -2f64);

        // Substituting an absent symbol changes nothing.
        let copy = row.clone();
        row.substitute(x, &basic);
        assert_eq!(row, copy);
    }

    #[test]
    fn all_dummies() {
        let mut row = Row::new(0f64);
        assert!(row.all_dummies());

        row.insert_symbol(Symbol::new(1, SymbolType::Dummy), 1f64);
        assert!(row.all_dummies());

        row.insert_symbol(external(2), 1f64);
        assert!(!row.all_dummies());
    }

    #[test]
    fn any_pivotable_symbol() {
        let mut row = Row::new(0f64);
        assert_eq!(row.any_pivotable_symbol(), None);

        row.insert_symbol(external(1), 1f64);
        row.insert_symbol(Symbol::new(3, SymbolType::Error), 1f64);
        row.insert_symbol(Symbol::new(2, SymbolType::Slack), 1f64);

        // The slack has the lower id of the two pivotable cells.
        assert_eq!(row.any_pivotable_symbol(), Some(Symbol::new(2, SymbolType::Slack)));
    }
}
