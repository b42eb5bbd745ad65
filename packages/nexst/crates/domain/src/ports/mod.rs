pub mod observer;
pub mod process_runner;
pub mod tool_locator;
