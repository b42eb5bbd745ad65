use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The JavaScript package manager a scaffold is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Pnpm,
    Npm,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported package manager '{0}' (expected pnpm or npm)")]
pub struct UnknownPackageManager(pub String);

impl PackageManager {
    /// Executable looked up on PATH.
    pub fn binary(&self) -> &'static str {
        match self {
            PackageManager::Pnpm => "pnpm",
            PackageManager::Npm => "npm",
        }
    }

    /// Flag passed to `create-next-app` so it installs with this manager.
    pub fn generator_flag(&self) -> &'static str {
        match self {
            PackageManager::Pnpm => "--use-pnpm",
            PackageManager::Npm => "--use-npm",
        }
    }

    /// A script invocation scoped to a sub-directory of the workspace.
    ///
    /// pnpm uses `pnpm -C <dir> <script>`, npm uses `npm --prefix <dir> run <script>`.
    pub fn run_in(&self, dir: &str, script: &str) -> String {
        match self {
            PackageManager::Pnpm => format!("pnpm -C {} {}", dir, script),
            PackageManager::Npm => format!("npm --prefix {} run {}", dir, script),
        }
    }

    /// The command an operator types at the workspace root to start both services.
    pub fn dev_command(&self) -> &'static str {
        match self {
            PackageManager::Pnpm => "pnpm dev",
            PackageManager::Npm => "npm run dev",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}

impl FromStr for PackageManager {
    type Err = UnknownPackageManager;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pnpm" => Ok(PackageManager::Pnpm),
            "npm" => Ok(PackageManager::Npm),
            other => Err(UnknownPackageManager(other.to_string())),
        }
    }
}
