pub mod error;
pub mod observer;
