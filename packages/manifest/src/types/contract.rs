use crate::PackageManager;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key of the web (NextJS) service in [`ProjectContract::apps`].
pub const WEB_SERVICE: &str = "web";

/// Key of the api (NestJS) service in [`ProjectContract::apps`].
pub const API_SERVICE: &str = "api";

/// The durable record describing the generated workspace (`nexst.json`).
///
/// This is the only artifact produced purely by nexst rather than by a delegated
/// generator. Services are keyed by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContract {
    pub name: String,

    pub apps: BTreeMap<String, ServiceDescriptor>,

    pub package_manager: PackageManager,

    /// Major Node.js version the services target.
    pub node: String,
}

/// One generated sub-application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceDescriptor {
    /// Directory relative to the project root.
    pub path: String,

    pub port: u16,

    /// Health-check route.
    pub health: String,
}

impl ServiceDescriptor {
    pub fn new(path: impl Into<String>, port: u16, health: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            port,
            health: health.into(),
        }
    }
}

impl ProjectContract {
    pub fn new(
        name: impl Into<String>,
        package_manager: PackageManager,
        node: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            apps: BTreeMap::new(),
            package_manager,
            node: node.into(),
        }
    }

    pub fn with_service(mut self, name: impl Into<String>, service: ServiceDescriptor) -> Self {
        self.apps.insert(name.into(), service);
        self
    }

    pub fn web(&self) -> Option<&ServiceDescriptor> {
        self.apps.get(WEB_SERVICE)
    }

    pub fn api(&self) -> Option<&ServiceDescriptor> {
        self.apps.get(API_SERVICE)
    }
}
