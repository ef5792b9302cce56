//! Clarabel backend.
//!
//! Translates a [`Model`] into Clarabel's conic form `min qᵀx` subject to
//! `Ax + s = b`, `s ∈ NonNegative`, and maps the solver's outcome back onto
//! the workspace's [`Solution`] type. Variable bounds become extra
//! nonnegative-cone rows beneath the constraint block; maximization negates
//! the cost vector.

use clarabel::algebra::CscMatrix;
use clarabel::solver::{
    DefaultSettingsBuilder, DefaultSolver, IPSolver, SolverStatus, SupportedConeT,
};
use planrs_core::math::{Scalar, Timer};
use planrs_core::model::{Model, Sense};
use planrs_core::solution::{Solution, Status};
use planrs_core::stats::SolveStats;
use std::time::Duration;

use crate::{SolveBackend, SolveOptions, SolverError};

#[derive(Debug, Clone, Copy, Default)]
pub struct ClarabelBackend;

impl ClarabelBackend {
    pub fn new() -> Self {
        Self
    }
}

impl SolveBackend for ClarabelBackend {
    fn solve(&self, model: &Model, options: &SolveOptions) -> Result<Solution, SolverError> {
        model.validate()?;

        let mut setup = Timer::start();
        let stuffed = stuff(model);
        let settings = DefaultSettingsBuilder::default()
            .verbose(options.verbose)
            .max_iter(options.max_iterations)
            .time_limit(
                options
                    .max_time
                    .map(|limit| limit.as_secs_f64())
                    .unwrap_or(f64::INFINITY),
            )
            .tol_gap_abs(options.tolerance)
            .tol_gap_rel(options.tolerance)
            .build()
            .map_err(|err| SolverError::Configuration(err.to_string()))?;

        let quadratic = CscMatrix::new(
            stuffed.ncols,
            stuffed.ncols,
            vec![0; stuffed.ncols + 1],
            Vec::new(),
            Vec::new(),
        );
        let constraints = CscMatrix::new(
            stuffed.nrows,
            stuffed.ncols,
            stuffed.colptr,
            stuffed.rowval,
            stuffed.nzval,
        );
        let cones = if stuffed.nrows > 0 {
            vec![SupportedConeT::NonnegativeConeT(stuffed.nrows)]
        } else {
            Vec::new()
        };
        let mut solver = DefaultSolver::new(
            &quadratic,
            &stuffed.cost,
            &constraints,
            &stuffed.rhs,
            &cones,
            settings,
        );
        setup.stop();

        solver.solve();

        let status = map_status(solver.solution.status);
        let iterations = solver.info.iterations;
        let stats = SolveStats::new(
            setup.elapsed(),
            Duration::from_secs_f64(solver.solution.solve_time),
        );
        tracing::debug!(?status, iterations, "backend finished");

        if status.is_optimal() {
            let values = solver.solution.x.clone();
            // Recompute in model terms rather than undoing the cost negation.
            let objective_value = model
                .objective()
                .map(|objective| objective.expr.value_at(&values))
                .unwrap_or(Scalar::NAN);
            Ok(Solution {
                status,
                objective_value,
                values,
                iterations,
                stats,
            })
        } else {
            Ok(Solution::not_optimal(status, iterations, stats))
        }
    }
}

struct StuffedLp {
    nrows: usize,
    ncols: usize,
    colptr: Vec<usize>,
    rowval: Vec<usize>,
    nzval: Vec<Scalar>,
    rhs: Vec<Scalar>,
    cost: Vec<Scalar>,
}

/// Lays out the nonnegative-cone rows: the model's `expr <= rhs` constraints
/// first, then `-x <= -lower` for each finite lower bound, then `x <= upper`
/// for each finite upper bound.
fn stuff(model: &Model) -> StuffedLp {
    let ncols = model.num_variables();
    let lowers = model.lower_bounds();
    let uppers = model.upper_bounds();
    let bound_rows = lowers.iter().filter(|lo| lo.is_finite()).count()
        + uppers.iter().filter(|up| up.is_finite()).count();
    let nrows = model.num_constraints() + bound_rows;

    let mut dense = vec![0.0 as Scalar; ncols * nrows];
    let mut rhs = vec![0.0 as Scalar; nrows];
    for (row, constraint) in model.constraints().iter().enumerate() {
        for (var, coefficient) in &constraint.expr.terms {
            dense[var.0 * nrows + row] += *coefficient;
        }
        rhs[row] = constraint.rhs;
    }
    let mut row = model.num_constraints();
    for (col, lower) in lowers.iter().enumerate() {
        if lower.is_finite() {
            dense[col * nrows + row] = -1.0;
            rhs[row] = -lower;
            row += 1;
        }
    }
    for (col, upper) in uppers.iter().enumerate() {
        if upper.is_finite() {
            dense[col * nrows + row] = 1.0;
            rhs[row] = *upper;
            row += 1;
        }
    }

    let mut colptr = Vec::with_capacity(ncols + 1);
    let mut rowval = Vec::new();
    let mut nzval = Vec::new();
    colptr.push(0);
    for col in 0..ncols {
        for row in 0..nrows {
            let value = dense[col * nrows + row];
            if value != 0.0 {
                rowval.push(row);
                nzval.push(value);
            }
        }
        colptr.push(rowval.len());
    }

    let mut cost = vec![0.0 as Scalar; ncols];
    if let Some(objective) = model.objective() {
        let sign = match objective.sense {
            Sense::Maximize => -1.0,
            Sense::Minimize => 1.0,
        };
        for (var, coefficient) in &objective.expr.terms {
            cost[var.0] += sign * coefficient;
        }
    }

    tracing::debug!(nrows, ncols, nnz = nzval.len(), "stuffed model");
    StuffedLp {
        nrows,
        ncols,
        colptr,
        rowval,
        nzval,
        rhs,
        cost,
    }
}

fn map_status(status: SolverStatus) -> Status {
    match status {
        SolverStatus::Solved => Status::Optimal,
        SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => Status::Infeasible,
        SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => Status::Unbounded,
        SolverStatus::MaxIterations | SolverStatus::MaxTime => Status::MaxIterations,
        SolverStatus::NumericalError | SolverStatus::InsufficientProgress => {
            Status::NumericalFailure
        }
        _ => Status::Unknown,
    }
}
