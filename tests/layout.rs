//! A small layout session, written as an external user of the crate would.
//!
//! Two panes share a window horizontally: a required sum constraint ties the pane widths to the
//! window width, a medium preference keeps the split even and required minimum widths keep both
//! panes usable. The window width itself is driven interactively through an edit variable.
use assert_approx_eq::assert_approx_eq;

use relic::algorithm::incremental::Solver;
use relic::data::linear_program::constraint::Constraint;
use relic::data::linear_program::elements::ConstraintType;
use relic::data::linear_program::strength;
use relic::data::linear_program::variable::Variable;

#[test]
fn two_pane_layout() {
    let mut solver = Solver::new();
    let window = Variable::named("window");
    let left_pane = Variable::named("left_pane");
    let right_pane = Variable::named("right_pane");

    // Two margins and a gutter of 10 each.
    solver
        .add_constraints([
            Constraint::new(
                &left_pane + &right_pane + 30f64 - &window,
                ConstraintType::Equal,
                strength::REQUIRED,
            ),
            Constraint::new(
                &left_pane - &right_pane,
                ConstraintType::Equal,
                strength::MEDIUM,
            ),
            Constraint::new(&left_pane - 50f64, ConstraintType::Greater, strength::REQUIRED),
            Constraint::new(&right_pane - 50f64, ConstraintType::Greater, strength::REQUIRED),
        ])
        .unwrap();
    solver.add_edit_variable(window.clone(), strength::STRONG).unwrap();

    // A comfortable window: both panes get an even share.
    solver.suggest_value(&window, 430f64).unwrap();
    solver.update_variables();
    assert_approx_eq!(window.value(), 430f64);
    assert_approx_eq!(left_pane.value(), 200f64);
    assert_approx_eq!(right_pane.value(), 200f64);

    // Dragging below the minimum: the required minimum widths cap how far the window follows.
    solver.suggest_value(&window, 110f64).unwrap();
    solver.update_variables();
    assert_approx_eq!(window.value(), 130f64);
    assert_approx_eq!(left_pane.value(), 50f64);
    assert_approx_eq!(right_pane.value(), 50f64);

    // And back out again.
    solver.suggest_value(&window, 430f64).unwrap();
    solver.update_variables();
    assert_approx_eq!(window.value(), 430f64);
    assert_approx_eq!(left_pane.value(), 200f64);
    assert_approx_eq!(right_pane.value(), 200f64);
}

#[test]
fn constraints_can_be_swapped_out_mid_session() {
    let mut solver = Solver::new();
    let width = Variable::named("width");
    let height = Variable::named("height");

    let square = Constraint::new(&width - &height, ConstraintType::Equal, strength::STRONG);
    solver
        .add_constraints([
            Constraint::new(&width - 640f64, ConstraintType::Equal, strength::REQUIRED),
            square.clone(),
        ])
        .unwrap();
    solver.update_variables();
    assert_approx_eq!(height.value(), 640f64);

    // Replace the aspect preference without rebuilding the solver.
    solver.remove_constraint(&square).unwrap();
    solver
        .add_constraint(Constraint::new(
            2f64 * &height - &width,
            ConstraintType::Equal,
            strength::STRONG,
        ))
        .unwrap();
    solver.update_variables();
    assert_approx_eq!(width.value(), 640f64);
    assert_approx_eq!(height.value(), 320f64);
}
