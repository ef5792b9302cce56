#![forbid(unsafe_code)]

pub mod backend;

use planrs_core::math::Scalar;
use planrs_core::model::{Model, ModelError};
use planrs_core::solution::Solution;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub use crate::backend::ClarabelBackend;

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("model validation failed: {0}")]
    InvalidModel(#[from] ModelError),
    #[error("backend configuration failed: {0}")]
    Configuration(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveOptions {
    pub tolerance: Scalar,
    pub max_iterations: u32,
    pub max_time: Option<Duration>,
    pub verbose: bool,
}

impl SolveOptions {
    pub fn with_tolerance(tolerance: Scalar) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-8,
            max_iterations: 200,
            max_time: None,
            verbose: false,
        }
    }
}

/// The solving capability consumed by the rest of the workspace. Backends
/// validate the model, translate it, and return a typed [`Solution`]; they
/// never implement the optimization algorithm themselves.
pub trait SolveBackend {
    fn solve(&self, model: &Model, options: &SolveOptions) -> Result<Solution, SolverError>;
}

/// Solves with the default backend and options.
pub fn solve(model: &Model) -> Result<Solution, SolverError> {
    ClarabelBackend::new().solve(model, &SolveOptions::default())
}
