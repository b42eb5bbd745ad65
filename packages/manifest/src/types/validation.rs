use crate::ProjectContract;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Component, Path};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationLevel {
    Error,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub level: ValidationLevel,
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            valid: true,
            issues: Vec::new(),
        }
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.issues.push(ValidationIssue {
            level: ValidationLevel::Error,
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            level: ValidationLevel::Warning,
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|i| i.level == ValidationLevel::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.issues
            .iter()
            .any(|i| i.level == ValidationLevel::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.level == ValidationLevel::Error)
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Checks the structural invariants of a [`ProjectContract`]:
/// service ports are pairwise distinct, and service paths are unique and stay
/// inside the project root.
pub struct ContractValidator;

impl ContractValidator {
    pub fn validate(contract: &ProjectContract) -> ValidationResult {
        let mut result = ValidationResult::new();

        Self::validate_required_fields(contract, &mut result);
        Self::validate_ports(contract, &mut result);
        Self::validate_paths(contract, &mut result);
        Self::validate_health_routes(contract, &mut result);

        result
    }

    fn validate_required_fields(contract: &ProjectContract, result: &mut ValidationResult) {
        if contract.name.trim().is_empty() {
            result.add_error("name", "Project name must not be empty");
        }

        if contract.apps.is_empty() {
            result.add_error("apps", "At least one service is required");
        }
    }

    fn validate_ports(contract: &ProjectContract, result: &mut ValidationResult) {
        let mut seen: HashMap<u16, &str> = HashMap::new();

        for (name, service) in &contract.apps {
            if service.port == 0 {
                result.add_error(
                    format!("apps.{}.port", name),
                    format!("Service '{}' has no port assigned", name),
                );
                continue;
            }

            if let Some(other) = seen.insert(service.port, name) {
                result.add_error(
                    format!("apps.{}.port", name),
                    format!(
                        "Port {} is used by both '{}' and '{}'",
                        service.port, other, name
                    ),
                );
            }
        }
    }

    fn validate_paths(contract: &ProjectContract, result: &mut ValidationResult) {
        let mut seen: HashMap<&str, &str> = HashMap::new();

        for (name, service) in &contract.apps {
            let field = format!("apps.{}.path", name);

            if !is_inside_root(&service.path) {
                result.add_error(
                    field.clone(),
                    format!(
                        "Path '{}' of service '{}' must be a relative path inside the project root",
                        service.path, name
                    ),
                );
            }

            if let Some(other) = seen.insert(service.path.as_str(), name) {
                result.add_error(
                    field,
                    format!(
                        "Path '{}' is shared by services '{}' and '{}'",
                        service.path, other, name
                    ),
                );
            }
        }
    }

    fn validate_health_routes(contract: &ProjectContract, result: &mut ValidationResult) {
        for (name, service) in &contract.apps {
            if !service.health.starts_with('/') {
                result.add_warning(
                    format!("apps.{}.health", name),
                    format!(
                        "RECOMMENDED: Health route '{}' should start with '/'",
                        service.health
                    ),
                );
            }
        }
    }
}

fn is_inside_root(path: &str) -> bool {
    if path.trim().is_empty() {
        return false;
    }

    let components: Vec<Component<'_>> = Path::new(path).components().collect();

    components
        .iter()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        && components.iter().any(|c| matches!(c, Component::Normal(_)))
}
