pub mod invocation;
pub mod step;
