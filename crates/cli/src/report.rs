use planrs_core::model::Model;
use planrs_core::solution::Solution;
use std::fmt::Write;

/// Renders the text report for a solve. Pure function of its inputs; the
/// caller decides where the text goes.
pub fn render(model: &Model, solution: &Solution) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Number of variables = {}", model.num_variables());
    let _ = writeln!(out, "Number of constraints = {}", model.num_constraints());
    if solution.status.is_optimal() {
        let _ = writeln!(out, "Solution:");
        let _ = writeln!(out, "Objective value = {:.6}", solution.objective_value);
        for ((name, _), value) in model.variables().zip(&solution.values) {
            let _ = writeln!(out, "{name} = {value:.6}");
        }
    } else {
        let _ = writeln!(out, "The problem does not have an optimal solution.");
        let _ = writeln!(out, "Status: {:?}", solution.status);
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Problem solved in {:.6} milliseconds",
        solution.stats.solve_time.as_secs_f64() * 1e3
    );
    let _ = writeln!(out, "Problem solved in {} iterations", solution.iterations);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use planrs_core::model::LinearExpr;
    use planrs_core::solution::{Solution, Status};
    use planrs_core::stats::SolveStats;
    use std::time::Duration;

    fn toy_model() -> Model {
        let mut model = Model::new();
        let x = model.add_variable("x", 0.0).unwrap();
        let y = model.add_variable("y", 0.0).unwrap();
        model.add_constraint("cap", LinearExpr::new().term(x, 1.0).term(y, 1.0), 4.0);
        model.maximize(LinearExpr::new().term(x, 1.0).term(y, 2.0));
        model
    }

    fn stats_ms(ms: u64) -> SolveStats {
        SolveStats::new(Duration::ZERO, Duration::from_millis(ms))
    }

    #[test]
    fn renders_optimal_report() {
        let model = toy_model();
        let solution = Solution {
            status: Status::Optimal,
            objective_value: 8.0,
            values: vec![0.0, 4.0],
            iterations: 7,
            stats: stats_ms(2),
        };
        let report = render(&model, &solution);
        assert!(report.contains("Number of variables = 2"));
        assert!(report.contains("Number of constraints = 1"));
        assert!(report.contains("Objective value = 8.000000"));
        assert!(report.contains("y = 4.000000"));
        assert!(report.contains("Problem solved in 7 iterations"));
    }

    #[test]
    fn renders_infeasible_report() {
        let model = toy_model();
        let solution = Solution::not_optimal(Status::Infeasible, 4, stats_ms(1));
        let report = render(&model, &solution);
        assert!(report.contains("The problem does not have an optimal solution."));
        assert!(!report.contains("Objective value"));
        assert!(report.contains("Problem solved in 1.000000 milliseconds"));
        assert!(report.contains("Problem solved in 4 iterations"));
    }
}
