//! Static constraint systems: added once, then read out.
use assert_approx_eq::assert_approx_eq;

use crate::algorithm::incremental::error;
use crate::algorithm::incremental::Solver;
use crate::data::linear_program::constraint::Constraint;
use crate::data::linear_program::elements::ConstraintType;
use crate::data::linear_program::strength;
use crate::data::linear_program::variable::Variable;

#[test]
fn simple_equality() {
    let mut solver = Solver::new();
    let x = Variable::named("x");

    solver
        .add_constraint(Constraint::new(&x - 20f64, ConstraintType::Equal, strength::REQUIRED))
        .unwrap();
    solver.update_variables();

    assert_approx_eq!(x.value(), 20f64);
}

#[test]
fn inequalities_between_variables() {
    let mut solver = Solver::new();
    let x = Variable::named("x");
    let y = Variable::named("y");

    solver
        .add_constraints([
            Constraint::new(&x - 5f64, ConstraintType::Greater, strength::REQUIRED),
            Constraint::new(&y - 10f64, ConstraintType::Equal, strength::REQUIRED),
            Constraint::new(&x - &y, ConstraintType::Less, strength::REQUIRED),
        ])
        .unwrap();
    solver.update_variables();

    assert_approx_eq!(x.value(), 5f64);
    assert_approx_eq!(y.value(), 10f64);
}

#[test]
fn stronger_preference_wins() {
    let mut solver = Solver::new();
    let x = Variable::named("x");

    solver
        .add_constraints([
            Constraint::new(&x - 40f64, ConstraintType::Equal, strength::STRONG),
            Constraint::new(&x - 10f64, ConstraintType::Equal, strength::WEAK),
        ])
        .unwrap();
    solver.update_variables();

    assert_approx_eq!(x.value(), 40f64);
}

#[test]
fn strengths_compose_across_variables() {
    let mut solver = Solver::new();
    let x = Variable::named("x");
    let y = Variable::named("y");

    solver
        .add_constraints([
            Constraint::new(&x + &y - 100f64, ConstraintType::Equal, strength::REQUIRED),
            Constraint::new(&x - 30f64, ConstraintType::Equal, strength::MEDIUM),
            Constraint::new(&y - 60f64, ConstraintType::Equal, strength::WEAK),
        ])
        .unwrap();
    solver.update_variables();

    // The medium preference on `x` is honoured exactly; `y` absorbs the slack.
    assert_approx_eq!(x.value(), 30f64);
    assert_approx_eq!(y.value(), 70f64);
}

#[test]
fn conflicting_required_constraints() {
    let mut solver = Solver::new();
    let x = Variable::named("x");

    solver
        .add_constraint(Constraint::new(&x - 1f64, ConstraintType::Equal, strength::REQUIRED))
        .unwrap();
    assert_eq!(
        solver.add_constraint(Constraint::new(&x - 2f64, ConstraintType::Equal, strength::REQUIRED)),
        Err(error::AddConstraint::Unsatisfiable),
    );

    solver.update_variables();
    assert_approx_eq!(x.value(), 1f64);
}

#[test]
fn scaled_and_repeated_terms() {
    let mut solver = Solver::new();
    let x = Variable::named("x");
    let y = Variable::named("y");

    solver
        .add_constraints([
            // 2x + y - 30 == 0, with y's coefficient split over two terms.
            Constraint::new(
                2f64 * &x + 0.5f64 * &y + 0.5f64 * &y - 30f64,
                ConstraintType::Equal,
                strength::REQUIRED,
            ),
            Constraint::new(&y - 10f64, ConstraintType::Equal, strength::REQUIRED),
        ])
        .unwrap();
    solver.update_variables();

    assert_approx_eq!(x.value(), 10f64);
    assert_approx_eq!(y.value(), 10f64);
}

#[test]
fn update_variables_is_idempotent() {
    let mut solver = Solver::new();
    let x = Variable::named("x");
    let y = Variable::named("y");

    solver
        .add_constraints([
            Constraint::new(&x + &y - 100f64, ConstraintType::Equal, strength::REQUIRED),
            Constraint::new(&x - 42f64, ConstraintType::Equal, strength::STRONG),
        ])
        .unwrap();

    solver.update_variables();
    let first = (x.value(), y.value());
    solver.update_variables();
    solver.update_variables();

    assert_eq!((x.value(), y.value()), first);
}
