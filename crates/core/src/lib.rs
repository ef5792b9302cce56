#![forbid(unsafe_code)]

pub mod math;
pub mod model;
pub mod solution;
pub mod stats;

pub use math::*;
pub use model::*;
pub use solution::*;
pub use stats::*;
