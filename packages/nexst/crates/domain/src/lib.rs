pub mod catalog;
pub mod config;
pub mod entities;
pub mod error;
pub mod patch;
pub mod ports;
pub mod templates;

pub use config::{Profile, ScaffoldConfig, ScaffoldOptions, ServiceConfig};
pub use entities::invocation::Invocation;
pub use entities::step::{
    GeneratorStep, InstallStep, PatchStep, PipelineStep, StepKind, StepOutcome, WriteStep,
};
pub use error::{ScaffoldError, ValidationError};
pub use patch::{PatchResult, PatchRule, SourcePatcher};
pub use ports::observer::{SilentObserver, StepEvent, StepObserver};
pub use ports::process_runner::{ExecutionError, ExitKind, ProcessRunner, RunOptions};
pub use ports::tool_locator::ToolLocator;
