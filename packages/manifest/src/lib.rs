pub mod types;
pub use types::*;

/// File name of the project contract written at the workspace root.
pub const CONTRACT_FILE: &str = "nexst.json";

/// File name of the root package manifest.
pub const PACKAGE_FILE: &str = "package.json";

/// Renders a record the way the generated files expect it: two-space JSON with a
/// trailing newline.
pub fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}
