use crate::{PackageManager, ServiceDescriptor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root `package.json` that runs both services from the workspace root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RootPackage {
    pub name: String,

    pub private: bool,

    pub scripts: BTreeMap<String, String>,

    pub dev_dependencies: BTreeMap<String, String>,
}

impl RootPackage {
    /// Builds the root manifest for a web + api pair.
    ///
    /// Every script goes through [`PackageManager::run_in`], so a single manifest
    /// never mixes pnpm and npm invocation forms.
    pub fn new(
        name: impl Into<String>,
        package_manager: PackageManager,
        web: &ServiceDescriptor,
        api: &ServiceDescriptor,
    ) -> Self {
        let run = |service: &ServiceDescriptor, script: &str| {
            package_manager.run_in(&service.path, script)
        };

        let mut scripts = BTreeMap::new();
        scripts.insert(
            "dev".to_string(),
            format!(
                "concurrently \"{}\" \"{}\"",
                run(web, "dev"),
                run(api, "start:dev")
            ),
        );
        scripts.insert("dev:web".to_string(), run(web, "dev"));
        scripts.insert("dev:api".to_string(), run(api, "start:dev"));
        scripts.insert(
            "build".to_string(),
            format!("{} && {}", run(web, "build"), run(api, "build")),
        );
        scripts.insert("build:web".to_string(), run(web, "build"));
        scripts.insert("build:api".to_string(), run(api, "build"));
        scripts.insert(
            "start:web".to_string(),
            format!("{} -- -p {}", run(web, "start"), web.port),
        );
        scripts.insert("start:api".to_string(), run(api, "start:prod"));

        let mut dev_dependencies = BTreeMap::new();
        dev_dependencies.insert("concurrently".to_string(), "latest".to_string());

        Self {
            name: name.into(),
            private: true,
            scripts,
            dev_dependencies,
        }
    }
}
