pub mod prompt;
pub mod spinner;

pub use spinner::Spinner;
