pub mod engine;
pub mod executor;
pub mod planner;
pub mod preflight;
pub mod report;

pub use engine::StepEngine;
pub use executor::{PipelineExecutor, RunSummary};
pub use planner::PipelinePlan;
pub use preflight::preflight;
pub use report::FailureReport;
