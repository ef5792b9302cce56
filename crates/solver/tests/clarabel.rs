use approx::{assert_abs_diff_eq, assert_relative_eq};
use planrs_core::model::{LinearExpr, Model, VarId};
use planrs_core::solution::Status;
use planrs_solver::{ClarabelBackend, SolveBackend, SolveOptions};

/// Five products with minimum production levels competing for five station
/// capacities; the known optimum raises b to 125 and leaves the rest at
/// their lower bounds.
fn workshop_model() -> (Model, Vec<VarId>) {
    let mut model = Model::new();
    let vars: Vec<VarId> = [("a", 150.0), ("b", 100.0), ("c", 200.0), ("d", 400.0), ("e", 350.0)]
        .iter()
        .map(|(name, lower)| model.add_variable(name, *lower).unwrap())
        .collect();
    let station = |coefficients: [f64; 5]| {
        coefficients
            .iter()
            .zip(&vars)
            .fold(LinearExpr::new(), |expr, (coefficient, var)| {
                expr.term(*var, *coefficient)
            })
    };
    model.add_constraint("cabling", station([0.5, 1.5, 1.5, 1.0, 0.5]), 1500.0);
    model.add_constraint("painting", station([1.0, 0.5, 1.0, 0.5, 1.5]), 2850.0);
    model.add_constraint("drilling", station([3.0, 1.0, 2.0, 3.0, 0.5]), 2350.0);
    model.add_constraint("assembly", station([2.0, 4.0, 1.0, 2.0, 1.5]), 2600.0);
    model.add_constraint("testing", station([0.5, 1.0, 0.5, 0.5, 2.0]), 1200.0);
    model.maximize(station([90.0, 120.0, 150.0, 110.0, 130.0]));
    (model, vars)
}

#[test]
fn solves_workshop_plan() {
    let (model, vars) = workshop_model();
    let solution = ClarabelBackend::new()
        .solve(&model, &SolveOptions::default())
        .expect("solve");

    assert_eq!(solution.status, Status::Optimal);
    assert_relative_eq!(solution.objective_value, 148_000.0, max_relative = 1e-6);
    let expected = [150.0, 125.0, 200.0, 400.0, 350.0];
    for (var, want) in vars.iter().zip(expected) {
        assert_abs_diff_eq!(solution.value(*var).unwrap(), want, epsilon = 1e-3);
    }
    assert!(solution.iterations > 0);
}

#[test]
fn optimum_respects_constraints_and_bounds() {
    let (model, _) = workshop_model();
    let solution = ClarabelBackend::new()
        .solve(&model, &SolveOptions::default())
        .expect("solve");
    assert_eq!(solution.status, Status::Optimal);

    for constraint in model.constraints() {
        let activity = constraint.expr.value_at(&solution.values);
        assert!(
            activity <= constraint.rhs + 1e-6,
            "{} violated: {activity} > {}",
            constraint.name,
            constraint.rhs
        );
    }
    for (value, lower) in solution.values.iter().zip(model.lower_bounds()) {
        assert!(*value >= lower - 1e-6);
    }
}

#[test]
fn loose_tolerance_still_finds_the_plan() {
    let (model, vars) = workshop_model();
    let solution = ClarabelBackend::new()
        .solve(&model, &SolveOptions::with_tolerance(1e-6))
        .expect("solve");

    assert_eq!(solution.status, Status::Optimal);
    assert_relative_eq!(solution.objective_value, 148_000.0, max_relative = 1e-4);
    assert_abs_diff_eq!(solution.value(vars[1]).unwrap(), 125.0, epsilon = 1e-1);
}

#[test]
fn reports_infeasible_without_values() {
    let mut model = Model::new();
    let a = model.add_variable("a", 150.0).unwrap();
    model.add_constraint("cap", LinearExpr::new().term(a, 1.0), 100.0);
    model.maximize(LinearExpr::new().term(a, 1.0));

    let solution = ClarabelBackend::new()
        .solve(&model, &SolveOptions::default())
        .expect("solve");
    assert_eq!(solution.status, Status::Infeasible);
    assert!(solution.values.is_empty());
}

#[test]
fn minimizes_onto_the_lower_bound() {
    let mut model = Model::new();
    let x = model.add_variable_bounded("x", 2.0, 10.0).unwrap();
    model.minimize(LinearExpr::new().term(x, 1.0));

    let solution = ClarabelBackend::new()
        .solve(&model, &SolveOptions::default())
        .expect("solve");
    assert_eq!(solution.status, Status::Optimal);
    assert_abs_diff_eq!(solution.objective_value, 2.0, epsilon = 1e-5);
    assert_abs_diff_eq!(solution.value(x).unwrap(), 2.0, epsilon = 1e-5);
}

#[test]
fn rejects_invalid_models() {
    let model = Model::new();
    let result = ClarabelBackend::new().solve(&model, &SolveOptions::default());
    assert!(result.is_err());
}
