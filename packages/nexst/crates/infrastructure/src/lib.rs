pub mod adapters;
pub mod system;

pub use adapters::process::SystemProcessRunner;
pub use system::toolchain::PathToolLocator;
