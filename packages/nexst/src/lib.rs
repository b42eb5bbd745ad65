//! Scaffolding core: configuration and patching rules (`domain`), host
//! adapters (`infrastructure`) and the step pipeline (`application`).

pub use application;
pub use domain;
pub use infrastructure;
