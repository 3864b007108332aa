pub mod classify;
pub mod orchestrator;
pub mod ranges;
pub mod report;
pub mod sort;
pub mod units;

pub use classify::*;
pub use orchestrator::*;
pub use ranges::*;
pub use report::*;
pub use sort::*;
pub use units::*;

use thiserror::Error;

/// Failures inside the analysis pipeline. The first two are per-reading and
/// are absorbed into `unknown` findings; `InvalidReport` is per-request and
/// aborts it.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Test name '{0}' matches no catalog alias")]
    UnrecognizedTest(String),

    #[error("Unit '{unit}' is not registered for test '{test_id}'")]
    UnknownUnit { test_id: String, unit: String },

    #[error("Report has no findings and no narrative summary")]
    InvalidReport,
}
