use crate::math::Scalar;
use crate::model::VarId;
use crate::stats::SolveStats;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Status {
    Optimal,
    Infeasible,
    Unbounded,
    MaxIterations,
    NumericalFailure,
    Unknown,
}

impl Status {
    pub fn is_optimal(self) -> bool {
        self == Status::Optimal
    }
}

/// Outcome of a solve: status, objective, per-variable values in the model's
/// variable order, and backend statistics.
///
/// `values` is empty unless the status is [`Status::Optimal`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    pub status: Status,
    pub objective_value: Scalar,
    pub values: Vec<Scalar>,
    pub iterations: u32,
    pub stats: SolveStats,
}

impl Solution {
    pub fn not_optimal(status: Status, iterations: u32, stats: SolveStats) -> Self {
        Self {
            status,
            objective_value: Scalar::NAN,
            values: Vec::new(),
            iterations,
            stats,
        }
    }

    pub fn value(&self, var: VarId) -> Option<Scalar> {
        self.values.get(var.0).copied()
    }
}
