//! # Incremental constraint solving
//!
//! This module contains all logic specific to the incremental simplex method, implemented as
//! described in the paper Solving Linear Arithmetic Constraints for User Interface Applications
//! by Greg J. Badros and Alan Borning.
//!
//! The solver keeps its tableau simultaneously optimal and feasible across every mutation.
//! Adding or removing a constraint splices a row in or out and re-optimises the objective with
//! primal simplex pivots; suggesting a value for an edit variable perturbs row constants and
//! restores feasibility with dual pivots. Reading a variable's value is then a plain lookup.
use std::collections::HashMap;

use crate::algorithm::incremental::error::Internal;
use crate::algorithm::incremental::tableau::{
    is_feasible, is_optimal, is_well_formed, CostRow, Tableau, Tag,
};
use crate::data::linear_algebra::near_zero;
use crate::data::linear_algebra::row::Row;
use crate::data::linear_algebra::symbol::{Symbol, SymbolType};
use crate::data::linear_program::constraint::Constraint;
use crate::data::linear_program::elements::ConstraintType;
use crate::data::linear_program::expression::Term;
use crate::data::linear_program::strength;
use crate::data::linear_program::variable::Variable;

pub mod error;
pub(crate) mod tableau;


/// State of a variable registered for interactive editing.
#[derive(Debug)]
struct EditInfo {
    /// Tag of the synthesised constraint below.
    tag: Tag,
    /// The equality `v == 0` at the edit strength, added by the solver itself.
    constraint: Constraint,
    /// The last suggested value.
    constant: f64,
}

/// An incremental solver for systems of weighted linear constraints.
///
/// Constraints and edit variables may be added, removed and re-valued in any order; after every
/// mutation the solution is kept current, such that `update_variables` only copies values out.
/// All required constraints hold exactly in that solution and the strength-weighted violation of
/// the remaining constraints is minimal.
#[derive(Debug, Default)]
pub struct Solver {
    /// Tags of the constraints currently in the system, keyed by constraint identity.
    constraints: HashMap<Constraint, Tag>,
    /// The external symbol standing in for each user variable, minted on first appearance.
    variables: HashMap<Variable, Symbol>,
    edits: HashMap<Variable, EditInfo>,
    tableau: Tableau,
}

impl Solver {
    /// Create a solver without any constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a constraint to the system.
    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<(), error::AddConstraint> {
        self.add_constraint_internal(constraint).map(|_| ())
    }

    /// Add several constraints, stopping at the first failure.
    pub fn add_constraints(
        &mut self,
        constraints: impl IntoIterator<Item = Constraint>,
    ) -> Result<(), error::AddConstraint> {
        for constraint in constraints {
            self.add_constraint(constraint)?;
        }
        Ok(())
    }

    fn add_constraint_internal(
        &mut self,
        constraint: Constraint,
    ) -> Result<Tag, error::AddConstraint> {
        if self.constraints.contains_key(&constraint) {
            return Err(error::AddConstraint::Duplicate);
        }

        // When the add fails below, external symbols minted here for variables first seen in
        // this constraint stay behind in the variable map. They are plain parametric references
        // that read as zero and get reused on the next add.
        let (mut row, tag) = self.create_row(&constraint);

        let mut subject = choose_subject(&row, &tag);
        if subject.is_none() && row.all_dummies() {
            if !near_zero(row.constant()) {
                return Err(error::AddConstraint::Unsatisfiable);
            }
            // The constraint is redundant with the rows already present; its dummy marker
            // enters the basis so that removal can find it again.
            subject = Some(tag.marker);
        }

        match subject {
            Some(subject) => {
                row.solve_for_symbol(subject);
                self.tableau.substitute(subject, &row);
                self.tableau.insert_basic(subject, row);
            },
            None => {
                if !self
                    .add_with_artificial_variable(row)
                    .map_err(error::AddConstraint::Internal)?
                {
                    return Err(error::AddConstraint::Unsatisfiable);
                }
            },
        }

        self.constraints.insert(constraint, tag);

        self.tableau
            .optimise(CostRow::Actual)
            .map_err(error::AddConstraint::Internal)?;

        debug_assert!(is_feasible(&self.tableau));
        debug_assert!(is_optimal(&self.tableau));
        debug_assert!(is_well_formed(&self.tableau));
        Ok(tag)
    }

    /// Remove a constraint from the system.
    ///
    /// The values of all variables return to what they would have been had the constraint never
    /// been added.
    pub fn remove_constraint(
        &mut self,
        constraint: &Constraint,
    ) -> Result<(), error::RemoveConstraint> {
        let tag = self
            .constraints
            .remove(constraint)
            .ok_or(error::RemoveConstraint::Unknown)?;

        // The error weights must leave the objective before any pivoting; substitutions into
        // the objective would otherwise fold them into coefficients of unrelated constraints.
        self.remove_constraint_effects(constraint, tag);

        if self.tableau.remove_basic(tag.marker).is_none() {
            // The marker is parametric; pivot it into the basis and drop it from there.
            let (leaving, mut row) = self
                .tableau
                .marker_leaving_row(tag.marker)
                .ok_or_else(|| {
                    error::RemoveConstraint::Internal(Internal::new("failed to find leaving row"))
                })?;
            row.solve_for_symbols(leaving, tag.marker);
            self.tableau.substitute(tag.marker, &row);
        }

        self.tableau
            .optimise(CostRow::Actual)
            .map_err(error::RemoveConstraint::Internal)?;

        debug_assert!(is_feasible(&self.tableau));
        debug_assert!(is_optimal(&self.tableau));
        debug_assert!(is_well_formed(&self.tableau));
        Ok(())
    }

    /// Whether the constraint is currently in the system.
    pub fn has_constraint(&self, constraint: &Constraint) -> bool {
        self.constraints.contains_key(constraint)
    }

    /// Register a variable for interactive editing at the given strength.
    ///
    /// Suggested values pull the variable towards them with that strength; the strength must
    /// therefore lie below required.
    pub fn add_edit_variable(
        &mut self,
        variable: Variable,
        strength: f64,
    ) -> Result<(), error::AddEditVariable> {
        if self.edits.contains_key(&variable) {
            return Err(error::AddEditVariable::Duplicate);
        }
        let strength = strength::clip(strength);
        if strength == strength::REQUIRED {
            return Err(error::AddEditVariable::BadRequiredStrength);
        }

        let constraint = Constraint::new(
            Term::new(variable.clone(), 1f64),
            ConstraintType::Equal,
            strength,
        );
        let tag = match self.add_constraint_internal(constraint.clone()) {
            Ok(tag) => tag,
            // A fresh non-required equality is satisfiable by its own error variables.
            Err(_) => unreachable!("adding an edit constraint can not fail"),
        };
        self.edits.insert(
            variable,
            EditInfo {
                tag,
                constraint,
                constant: 0f64,
            },
        );
        Ok(())
    }

    /// Unregister a variable from editing.
    pub fn remove_edit_variable(
        &mut self,
        variable: &Variable,
    ) -> Result<(), error::RemoveEditVariable> {
        let info = self
            .edits
            .remove(variable)
            .ok_or(error::RemoveEditVariable::Unknown)?;

        self.remove_constraint(&info.constraint).map_err(|error| {
            match error {
                error::RemoveConstraint::Unknown => error::RemoveEditVariable::Internal(
                    Internal::new("edit constraint was not in the system"),
                ),
                error::RemoveConstraint::Internal(internal) => {
                    error::RemoveEditVariable::Internal(internal)
                },
            }
        })
    }

    /// Whether the variable is registered for editing.
    pub fn has_edit_variable(&self, variable: &Variable) -> bool {
        self.edits.contains_key(variable)
    }

    /// Suggest a value for an edit variable.
    ///
    /// The tableau absorbs the difference with the previous suggestion and feasibility is
    /// restored by dual pivots, leaving the objective optimal.
    pub fn suggest_value(
        &mut self,
        variable: &Variable,
        value: f64,
    ) -> Result<(), error::SuggestValue> {
        let (tag, delta) = {
            let info = self
                .edits
                .get_mut(variable)
                .ok_or(error::SuggestValue::Unknown)?;
            let delta = value - info.constant;
            info.constant = value;
            (info.tag, delta)
        };

        self.tableau.apply_delta(tag, delta);
        self.tableau
            .dual_optimise()
            .map_err(error::SuggestValue::Internal)?;

        debug_assert!(is_feasible(&self.tableau));
        debug_assert!(is_optimal(&self.tableau));
        debug_assert!(is_well_formed(&self.tableau));
        Ok(())
    }

    /// Push the computed value of every known variable into its value slot.
    ///
    /// A variable whose symbol is basic takes its row's constant; a parametric symbol means the
    /// variable is free at zero.
    pub fn update_variables(&self) {
        for (variable, &symbol) in &self.variables {
            match self.tableau.row(symbol) {
                Some(row) => variable.set_value(row.constant()),
                None => variable.set_value(0f64),
            }
        }
    }

    /// Forget all constraints and edit variables, returning to the empty starting state.
    pub fn reset(&mut self) {
        self.constraints.clear();
        self.variables.clear();
        self.edits.clear();
        self.tableau = Tableau::new();
    }

    /// Turn a constraint into a tableau row and the auxiliary symbols tracking it.
    ///
    /// The expression's terms land in the row with basic variables substituted on the fly, such
    /// that the row is expressed in parametric symbols only. The operator and strength then
    /// determine the auxiliaries: inequalities get a slack, anything below required strength
    /// gets error variables weighted into the objective and required equalities get a dummy
    /// marker. The row is normalised to a non-negative constant.
    fn create_row(&mut self, constraint: &Constraint) -> (Row, Tag) {
        let expression = constraint.expression();
        let mut row = Row::new(expression.constant());
        for term in expression.terms() {
            if near_zero(term.coefficient()) {
                continue;
            }
            let symbol = self.external_symbol(term.variable());
            match self.tableau.row(symbol) {
                Some(basic) => row.insert_row(basic, term.coefficient()),
                None => row.insert_symbol(symbol, term.coefficient()),
            }
        }

        let strength = constraint.strength();
        let tag = match constraint.constraint_type() {
            ConstraintType::Less | ConstraintType::Greater => {
                let sign = match constraint.constraint_type() {
                    ConstraintType::Less => 1f64,
                    _ => -1f64,
                };
                let slack = self.tableau.new_symbol(SymbolType::Slack);
                row.insert_symbol(slack, sign);
                if strength < strength::REQUIRED {
                    let error = self.tableau.new_symbol(SymbolType::Error);
                    row.insert_symbol(error, -sign);
                    self.tableau.add_objective_weight(error, strength);
                    Tag { marker: slack, other: error }
                } else {
                    Tag { marker: slack, other: Symbol::invalid() }
                }
            },
            ConstraintType::Equal => {
                if strength < strength::REQUIRED {
                    let plus = self.tableau.new_symbol(SymbolType::Error);
                    let minus = self.tableau.new_symbol(SymbolType::Error);
                    // expression = plus - minus
                    row.insert_symbol(plus, -1f64);
                    row.insert_symbol(minus, 1f64);
                    self.tableau.add_objective_weight(plus, strength);
                    self.tableau.add_objective_weight(minus, strength);
                    Tag { marker: plus, other: minus }
                } else {
                    let dummy = self.tableau.new_symbol(SymbolType::Dummy);
                    row.insert_symbol(dummy, 1f64);
                    Tag { marker: dummy, other: Symbol::invalid() }
                }
            },
        };

        if row.constant() < 0f64 {
            row.reverse_sign();
        }

        (row, tag)
    }

    /// The external symbol for a variable, minted on first appearance.
    fn external_symbol(&mut self, variable: &Variable) -> Symbol {
        match self.variables.get(variable) {
            Some(&symbol) => symbol,
            None => {
                let symbol = self.tableau.new_symbol(SymbolType::External);
                self.variables.insert(variable.clone(), symbol);
                symbol
            },
        }
    }

    /// Install a row that offers no subject by testing it with an artificial variable.
    ///
    /// A copy of the row enters the basis under a fresh slack and a second copy becomes the
    /// artificial objective. When primal optimisation drives that objective to zero the row is
    /// compatible with the basis and the artificial variable can be retired; a non-zero optimum
    /// proves the constraint unsatisfiable.
    ///
    /// # Return value
    ///
    /// Whether the row could be made feasible.
    fn add_with_artificial_variable(&mut self, row: Row) -> Result<bool, Internal> {
        let artificial = self.tableau.new_symbol(SymbolType::Slack);
        self.tableau.insert_basic(artificial, row.clone());
        self.tableau.set_artificial(row);

        self.tableau.optimise(CostRow::Artificial)?;
        let success = self
            .tableau
            .take_artificial()
            .map_or(false, |objective| near_zero(objective.constant()));

        // When the artificial variable is still basic its row must leave the basis with it. It
        // appears nowhere else in that case, so a constant or abandoned row simply vanishes; a
        // feasible one first pivots a real symbol into its place.
        if let Some(mut row) = self.tableau.remove_basic(artificial) {
            if row.is_constant() || !success {
                return Ok(success);
            }
            let entering = match row.any_pivotable_symbol() {
                Some(symbol) => symbol,
                None => return Ok(false),
            };
            row.solve_for_symbols(artificial, entering);
            self.tableau.substitute(entering, &row);
            self.tableau.insert_basic(entering, row);
        }

        self.tableau.remove_symbol(artificial);
        Ok(success)
    }

    /// Take a removed constraint's error weights back out of the objective.
    fn remove_constraint_effects(&mut self, constraint: &Constraint, tag: Tag) {
        if tag.marker.symbol_type() == SymbolType::Error {
            self.tableau
                .remove_objective_effects(tag.marker, constraint.strength());
        }
        if tag.other.symbol_type() == SymbolType::Error {
            self.tableau
                .remove_objective_effects(tag.other, constraint.strength());
        }
    }
}

/// Select the symbol to solve the new row for.
///
/// In order of preference: the first external symbol in the row (user variables are
/// unrestricted, so any coefficient works), then the constraint's own marker or other auxiliary
/// provided it is a slack or error with a negative coefficient, such that solving keeps the
/// constant non-negative. `None` means the row can only be installed through the
/// artificial-variable phase.
fn choose_subject(row: &Row, tag: &Tag) -> Option<Symbol> {
    for (&symbol, _) in row.iter() {
        if symbol.symbol_type() == SymbolType::External {
            return Some(symbol);
        }
    }
    [tag.marker, tag.other]
        .into_iter()
        .find(|&candidate| candidate.is_pivotable() && row.coefficient_for(candidate) < 0f64)
}
