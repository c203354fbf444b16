//! # The tableau
//!
//! The solver's working state: the basis mapping symbols to the rows expressing them, the
//! objective row, the transient artificial objective of the feasibility phase, the worklist of
//! rows awaiting dual pivoting and the symbol id counter. All elementary operations which can be
//! performed upon that state live here; deciding *which* operations to perform is the
//! responsibility of the solver in the parent module.
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet, VecDeque};

use crate::algorithm::incremental::error::Internal;
use crate::data::linear_algebra::row::Row;
use crate::data::linear_algebra::symbol::{Symbol, SymbolType};
use crate::data::linear_algebra::EPSILON;

/// The pair of symbols a constraint introduced into the tableau.
///
/// The marker is used to find the constraint again on removal. For an inequality the marker is
/// its slack and `other` its error (or invalid when required); for a non-required equality the
/// markers are the two errors; for a required equality the marker is a dummy and `other` is
/// invalid.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Tag {
    pub marker: Symbol,
    pub other: Symbol,
}

/// Which objective row an optimisation pass minimises.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum CostRow {
    /// The weighted sum of all error variables of non-required constraints.
    Actual,
    /// The transient objective used to test whether a row can be made feasible at all.
    Artificial,
}

/// A queue with unique values.
///
/// Rows found infeasible are not repaired immediately but queued for the next dual optimisation
/// pass. A basis symbol can be found infeasible several times before that pass runs; queueing it
/// once suffices, since the pass re-checks the row it finds under the symbol anyway.
#[derive(Debug, Default)]
struct InfeasibleQueue {
    queue: VecDeque<Symbol>,
    members: HashSet<Symbol>,
}

impl InfeasibleQueue {
    fn insert(&mut self, symbol: Symbol) {
        if self.members.insert(symbol) {
            self.queue.push_back(symbol);
        }
    }

    fn pop(&mut self) -> Option<Symbol> {
        let chosen_value = self.queue.pop_front();
        if let Some(symbol) = chosen_value {
            self.members.remove(&symbol);
        }
        chosen_value
    }
}

/// State of the modified simplex method.
///
/// The basis maps each basic symbol to the row expressing it in parametric symbols; parametric
/// symbols all take value zero, so a basic symbol's value is its row's constant. Keys are never
/// among their own row's cells and no symbol is basic in two rows.
#[derive(Debug)]
pub(crate) struct Tableau {
    /// The basis. A `BTreeMap` keyed on symbol id, such that iteration order is deterministic.
    rows: BTreeMap<Symbol, Row>,
    objective: Row,
    /// Present only while a row is being installed through the artificial-variable phase.
    artificial: Option<Row>,
    infeasible: InfeasibleQueue,
    /// Ids dealt out so far; every symbol the solver creates comes from this counter.
    next_symbol_id: usize,
}

impl Tableau {
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            objective: Row::new(0f64),
            artificial: None,
            infeasible: InfeasibleQueue::default(),
            next_symbol_id: 1,
        }
    }

    /// Mint a fresh symbol with a strictly larger id than any minted before.
    pub fn new_symbol(&mut self, symbol_type: SymbolType) -> Symbol {
        let symbol = Symbol::new(self.next_symbol_id, symbol_type);
        self.next_symbol_id += 1;
        symbol
    }

    pub fn row(&self, symbol: Symbol) -> Option<&Row> {
        self.rows.get(&symbol)
    }

    /// Install a solved row into the basis under its subject.
    pub fn insert_basic(&mut self, subject: Symbol, row: Row) {
        debug_assert!(!self.rows.contains_key(&subject));
        debug_assert_eq!(row.coefficient_for(subject), 0f64);

        self.rows.insert(subject, row);
    }

    pub fn remove_basic(&mut self, symbol: Symbol) -> Option<Row> {
        self.rows.remove(&symbol)
    }

    /// Add `weight` to the objective coefficient of an error symbol.
    pub fn add_objective_weight(&mut self, symbol: Symbol, weight: f64) {
        debug_assert_eq!(symbol.symbol_type(), SymbolType::Error);

        self.objective.insert_symbol(symbol, weight);
    }

    /// Subtract an error symbol's weighted contribution from the objective.
    ///
    /// When the symbol is basic its row stands in for it; this must happen before the symbol is
    /// pivoted anywhere, or substitutions into the objective will have mixed the weight into
    /// other coefficients where it can no longer be located.
    pub fn remove_objective_effects(&mut self, symbol: Symbol, strength: f64) {
        if let Some(row) = self.rows.get(&symbol) {
            self.objective.insert_row(row, -strength);
        } else {
            self.objective.insert_symbol(symbol, -strength);
        }
    }

    /// Replace every occurrence of a parametric symbol by the row that now expresses it.
    ///
    /// All basic rows, the objective and, when present, the artificial objective are updated.
    /// Rows keyed by a restricted symbol whose constant turns negative are queued for the next
    /// dual optimisation pass.
    pub fn substitute(&mut self, symbol: Symbol, row: &Row) {
        for (&basic, basic_row) in self.rows.iter_mut() {
            basic_row.substitute(symbol, row);
            if basic.symbol_type() != SymbolType::External && basic_row.constant() < 0f64 {
                self.infeasible.insert(basic);
            }
        }
        self.objective.substitute(symbol, row);
        if let Some(artificial) = self.artificial.as_mut() {
            artificial.substitute(symbol, row);
        }
    }

    /// Begin the artificial-variable phase with a copy of the row under test.
    pub fn set_artificial(&mut self, row: Row) {
        debug_assert!(self.artificial.is_none());

        self.artificial = Some(row);
    }

    /// End the artificial-variable phase, yielding the optimised artificial objective.
    pub fn take_artificial(&mut self) -> Option<Row> {
        self.artificial.take()
    }

    /// Strip a symbol out of every row and the objective.
    ///
    /// Used to retire an artificial variable once the feasibility test is decided.
    pub fn remove_symbol(&mut self, symbol: Symbol) {
        for row in self.rows.values_mut() {
            row.remove_symbol(symbol);
        }
        self.objective.remove_symbol(symbol);
    }

    /// Minimise the selected cost row by primal simplex pivots.
    ///
    /// Repeatedly brings the first improving symbol into the basis until no cost coefficient is
    /// negative. Leaves feasibility intact.
    pub fn optimise(&mut self, cost_row: CostRow) -> Result<(), Internal> {
        debug_assert!(cost_row == CostRow::Actual || self.artificial.is_some());

        loop {
            debug_assert!(is_feasible(self));

            let entering = match self.entering_symbol(cost_row) {
                Some(symbol) => symbol,
                None => return Ok(()),
            };
            let (leaving, mut row) = self
                .leaving_row(entering)
                .ok_or_else(|| Internal::new("the objective is unbounded"))?;
            row.solve_for_symbols(leaving, entering);
            self.substitute(entering, &row);
            self.rows.insert(entering, row);
        }
    }

    /// The first symbol that is not a dummy and has a negative coefficient in the cost row.
    ///
    /// A pivot on such a symbol lowers the cost; dummies are skipped because they must keep
    /// value zero and may never enter the basis through optimisation.
    fn entering_symbol(&self, cost_row: CostRow) -> Option<Symbol> {
        let objective = match cost_row {
            CostRow::Actual => &self.objective,
            CostRow::Artificial => self.artificial.as_ref()?,
        };

        objective
            .iter()
            .find(|&(symbol, &coefficient)| {
                symbol.symbol_type() != SymbolType::Dummy && coefficient < 0f64
            })
            .map(|(&symbol, _)| symbol)
    }

    /// Detach the row on which to pivot for the given entering symbol.
    ///
    /// Among rows keyed by a restricted symbol with a negative coefficient on the entering
    /// symbol, the one with the minimum ratio of `-constant / coefficient` leaves the basis: any
    /// larger step would push that row's constant below zero. Ties fall to the row encountered
    /// first. `None` means the objective is unbounded below, which the solver's own objectives
    /// never are.
    fn leaving_row(&mut self, entering: Symbol) -> Option<(Symbol, Row)> {
        let mut min_ratio = f64::INFINITY;
        let mut found = None;
        for (&symbol, row) in &self.rows {
            if symbol.symbol_type() == SymbolType::External {
                continue;
            }
            let coefficient = row.coefficient_for(entering);
            if coefficient < 0f64 {
                let ratio = -row.constant() / coefficient;
                if ratio < min_ratio {
                    min_ratio = ratio;
                    found = Some(symbol);
                }
            }
        }

        found.and_then(|symbol| self.rows.remove(&symbol).map(|row| (symbol, row)))
    }

    /// Detach the row to pivot out for a marker that is not itself basic.
    ///
    /// Candidates, in order of preference:
    ///
    /// 1. restricted rows with a negative coefficient for the marker, minimising
    ///    `-constant / coefficient`;
    /// 2. restricted rows with a positive coefficient, minimising `constant / coefficient`;
    /// 3. the last external row containing the marker at all.
    ///
    /// The first two keep the basis feasible; the third is a last resort which can only occur
    /// when the constraint exclusively touches external rows. `None` indicates corruption, since
    /// a live constraint's marker must appear somewhere in the tableau.
    pub fn marker_leaving_row(&mut self, marker: Symbol) -> Option<(Symbol, Row)> {
        let mut first_ratio = f64::INFINITY;
        let mut second_ratio = f64::INFINITY;
        let mut first = None;
        let mut second = None;
        let mut third = None;
        for (&symbol, row) in &self.rows {
            let coefficient = row.coefficient_for(marker);
            if coefficient == 0f64 {
                continue;
            }
            if symbol.symbol_type() == SymbolType::External {
                third = Some(symbol);
            } else if coefficient < 0f64 {
                let ratio = -row.constant() / coefficient;
                if ratio < first_ratio {
                    first_ratio = ratio;
                    first = Some(symbol);
                }
            } else {
                let ratio = row.constant() / coefficient;
                if ratio < second_ratio {
                    second_ratio = ratio;
                    second = Some(symbol);
                }
            }
        }

        first
            .or(second)
            .or(third)
            .and_then(|symbol| self.rows.remove(&symbol).map(|row| (symbol, row)))
    }

    /// Work a suggested-value delta into the tableau.
    ///
    /// When the constraint's marker or other symbol is basic the delta lands directly on that
    /// row's constant. Otherwise the marker is parametric and the delta spreads over every row
    /// holding a coefficient for it. Restricted rows whose constant turns negative are queued;
    /// the caller runs the dual pass afterwards.
    pub fn apply_delta(&mut self, tag: Tag, delta: f64) {
        if let Some(row) = self.rows.get_mut(&tag.marker) {
            if row.shift_constant(-delta) < 0f64 {
                self.infeasible.insert(tag.marker);
            }
            return;
        }
        if let Some(row) = self.rows.get_mut(&tag.other) {
            if row.shift_constant(delta) < 0f64 {
                self.infeasible.insert(tag.other);
            }
            return;
        }
        for (&symbol, row) in self.rows.iter_mut() {
            let coefficient = row.coefficient_for(tag.marker);
            if coefficient == 0f64 {
                continue;
            }
            if row.shift_constant(delta * coefficient) < 0f64
                && symbol.symbol_type() != SymbolType::External
            {
                self.infeasible.insert(symbol);
            }
        }
    }

    /// Restore feasibility of the queued rows while keeping the objective optimal.
    ///
    /// Performs iterations of the dual simplex method: each still-infeasible queued row leaves
    /// the basis in favour of the symbol with the cheapest objective-per-unit ratio. Entries
    /// whose row was already repaired (or pivoted away entirely) by an earlier iteration are
    /// skipped.
    pub fn dual_optimise(&mut self) -> Result<(), Internal> {
        while let Some(leaving) = self.infeasible.pop() {
            let mut row = match self.rows.entry(leaving) {
                Entry::Occupied(entry) if entry.get().constant() < 0f64 => entry.remove(),
                _ => continue,
            };
            let entering = self
                .dual_entering_symbol(&row)
                .ok_or_else(|| Internal::new("dual optimise failed"))?;
            row.solve_for_symbols(leaving, entering);
            self.substitute(entering, &row);
            self.rows.insert(entering, row);
        }
        Ok(())
    }

    /// The entering symbol for a dual pivot on the given infeasible row.
    ///
    /// Among cells with a positive coefficient and a non-dummy symbol, the one minimising the
    /// ratio of objective coefficient to cell coefficient is chosen: it restores feasibility at
    /// the least increase in cost.
    fn dual_entering_symbol(&self, row: &Row) -> Option<Symbol> {
        let mut min_ratio = f64::INFINITY;
        let mut entering = None;
        for (&symbol, &coefficient) in row.iter() {
            if coefficient > 0f64 && symbol.symbol_type() != SymbolType::Dummy {
                let ratio = self.objective.coefficient_for(symbol) / coefficient;
                if ratio < min_ratio {
                    min_ratio = ratio;
                    entering = Some(symbol);
                }
            }
        }
        entering
    }
}

impl Default for Tableau {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether every row keyed by a restricted symbol has a non-negative constant.
///
/// Rows keyed by external symbols are exempt: user variables may take any value.
pub(crate) fn is_feasible(tableau: &Tableau) -> bool {
    tableau
        .rows
        .iter()
        .filter(|(symbol, _)| symbol.symbol_type() != SymbolType::External)
        .all(|(_, row)| row.constant() >= -EPSILON)
}

/// Whether no pivot can improve the objective: every non-dummy objective coefficient is
/// non-negative.
pub(crate) fn is_optimal(tableau: &Tableau) -> bool {
    tableau
        .objective
        .iter()
        .filter(|(symbol, _)| symbol.symbol_type() != SymbolType::Dummy)
        .all(|(_, &coefficient)| coefficient >= -EPSILON)
}

/// Whether the basis is well formed: no row contains its own key.
///
/// Uniqueness of basic symbols is implied by the basis being a map.
pub(crate) fn is_well_formed(tableau: &Tableau) -> bool {
    tableau
        .rows
        .iter()
        .all(|(&symbol, row)| row.coefficient_for(symbol) == 0f64)
}
