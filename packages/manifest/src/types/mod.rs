pub mod contract;
pub mod env;
pub mod package;
pub mod package_manager;
pub mod validation;

pub use contract::{ProjectContract, ServiceDescriptor, API_SERVICE, WEB_SERVICE};
pub use env::{EnvLine, EnvTemplate};
pub use package::RootPackage;
pub use package_manager::{PackageManager, UnknownPackageManager};
pub use validation::{ContractValidator, ValidationIssue, ValidationLevel, ValidationResult};
