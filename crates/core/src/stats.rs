use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing reported by the backend for a single solve.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolveStats {
    /// Time spent translating the model into the backend's problem form.
    pub setup_time: Duration,
    /// Wall-clock time the backend spent solving.
    pub solve_time: Duration,
}

impl SolveStats {
    pub fn new(setup_time: Duration, solve_time: Duration) -> Self {
        Self {
            setup_time,
            solve_time,
        }
    }

    pub fn total(&self) -> Duration {
        self.setup_time + self.solve_time
    }
}
