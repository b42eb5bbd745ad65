use crate::error::ValidationError;
use nexst_manifest::{
    ContractValidator, PackageManager, ProjectContract, ServiceDescriptor, API_SERVICE,
    WEB_SERVICE,
};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const FRONTEND_DIR: &str = "frontend";
pub const BACKEND_DIR: &str = "backend";
pub const DEFAULT_WEB_PORT: u16 = 3000;
pub const DEFAULT_API_PORT: u16 = 4000;
pub const IMPORT_ALIAS: &str = "@/*";
pub const NODE_VERSION: &str = "20";

/// Layout variant of the generated frontend.
///
/// `Src` places sources under `src/` and lets the operator turn the import
/// alias off. `Flat` keeps the generator's root layout and always uses the alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    #[default]
    Src,
    Flat,
}

impl Profile {
    pub fn src_dir(&self) -> bool {
        matches!(self, Profile::Src)
    }

    pub fn alias_configurable(&self) -> bool {
        matches!(self, Profile::Src)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Src => f.write_str("src"),
            Profile::Flat => f.write_str("flat"),
        }
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "src" => Ok(Profile::Src),
            "flat" => Ok(Profile::Flat),
            other => Err(format!("unknown profile '{}' (expected src or flat)", other)),
        }
    }
}

/// Raw inputs as collected from the command line, before validation.
#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
    pub project_name: Option<String>,
    pub package_manager: PackageManager,
    pub profile: Profile,
    pub import_alias: bool,
    pub interactive: bool,
    pub output_visible: bool,
    pub web_port: u16,
    pub api_port: u16,
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self {
            project_name: None,
            package_manager: PackageManager::default(),
            profile: Profile::default(),
            import_alias: true,
            interactive: true,
            output_visible: false,
            web_port: DEFAULT_WEB_PORT,
            api_port: DEFAULT_API_PORT,
        }
    }
}

/// One generated service as seen by the planner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub name: &'static str,
    pub dir: &'static str,
    pub port: u16,
    pub health: &'static str,
}

impl ServiceConfig {
    pub fn descriptor(&self) -> ServiceDescriptor {
        ServiceDescriptor::new(self.dir, self.port, self.health)
    }
}

/// Configuration resolved once before planning. Every step is built from this
/// record and nothing re-reads ambient state while the pipeline runs.
#[derive(Debug, Clone)]
pub struct ScaffoldConfig {
    pub project_name: String,
    pub root: PathBuf,
    pub package_manager: PackageManager,
    pub profile: Profile,
    pub src_dir: bool,
    pub import_alias: Option<String>,
    pub interactive: bool,
    pub output_visible: bool,
    pub web: ServiceConfig,
    pub api: ServiceConfig,
    pub runtime_version: String,
}

impl ScaffoldConfig {
    /// Validates the raw options and anchors the project under `cwd`.
    ///
    /// Only checks that need no filesystem or process access happen here; the
    /// existence of the target and of the package manager are pre-flight checks.
    pub fn resolve(options: ScaffoldOptions, cwd: &Path) -> Result<Self, ValidationError> {
        let project_name = validate_project_name(options.project_name.as_deref())?;

        for port in [options.web_port, options.api_port] {
            if port == 0 {
                return Err(ValidationError::InvalidPort(port));
            }
        }
        if options.web_port == options.api_port {
            return Err(ValidationError::PortConflict(options.web_port));
        }

        if !options.import_alias && !options.profile.alias_configurable() {
            return Err(ValidationError::AliasNotConfigurable {
                profile: options.profile,
            });
        }

        let import_alias = if options.import_alias {
            Some(IMPORT_ALIAS.to_string())
        } else {
            None
        };

        let config = Self {
            root: cwd.join(&project_name),
            project_name,
            package_manager: options.package_manager,
            profile: options.profile,
            src_dir: options.profile.src_dir(),
            import_alias,
            interactive: options.interactive,
            output_visible: options.output_visible,
            web: ServiceConfig {
                name: WEB_SERVICE,
                dir: FRONTEND_DIR,
                port: options.web_port,
                health: "/",
            },
            api: ServiceConfig {
                name: API_SERVICE,
                dir: BACKEND_DIR,
                port: options.api_port,
                health: "/health",
            },
            runtime_version: NODE_VERSION.to_string(),
        };

        let report = ContractValidator::validate(&config.contract());
        if report.has_errors() {
            let messages: Vec<String> = report.errors().map(|i| i.message.clone()).collect();
            return Err(ValidationError::InvalidContract(messages.join("; ")));
        }

        Ok(config)
    }

    pub fn web_dir(&self) -> PathBuf {
        self.root.join(self.web.dir)
    }

    pub fn api_dir(&self) -> PathBuf {
        self.root.join(self.api.dir)
    }

    pub fn contract(&self) -> ProjectContract {
        ProjectContract::new(
            &self.project_name,
            self.package_manager,
            &self.runtime_version,
        )
        .with_service(self.web.name, self.web.descriptor())
        .with_service(self.api.name, self.api.descriptor())
    }
}

fn validate_project_name(name: Option<&str>) -> Result<String, ValidationError> {
    let name = match name.map(str::trim) {
        Some(name) if !name.is_empty() => name,
        _ => return Err(ValidationError::MissingProjectName),
    };

    let invalid = |reason: &'static str| ValidationError::InvalidProjectName {
        name: name.to_string(),
        reason,
    };

    if name == "." || name == ".." {
        return Err(invalid("it must name a new directory"));
    }
    if name.contains(['/', '\\']) {
        return Err(invalid("it must not contain path separators"));
    }
    if name.chars().any(char::is_control) {
        return Err(invalid("it must not contain control characters"));
    }

    Ok(name.to_string())
}
