//! Persistence of the last successful build.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use erlpkg_core::BuildReport;
use serde::{Deserialize, Serialize};

/// What `erlpkg-build.json` holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRecord {
    #[serde(flatten)]
    pub report: BuildReport,
    /// `cmake --version` at build time, when it could be determined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmake_version: Option<String>,
}

impl BuildRecord {
    pub const fn new(report: BuildReport, cmake_version: Option<String>) -> Self {
        Self {
            report,
            cmake_version,
        }
    }

    /// Save the record as pretty JSON, creating parent folders as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create build folder")?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize build record")?;
        fs::write(path, json).context("Failed to write build record")?;
        Ok(())
    }

    /// Load a record written by [`BuildRecord::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).context("Failed to read build record")?;
        let record = serde_json::from_str(&json).context("Failed to parse build record")?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use erlpkg_core::{BuildInvocation, Os, Settings, resolve_options};
    use tempfile::tempdir;

    fn sample_report() -> BuildReport {
        let settings = Settings::for_os(Os::Macos);
        let options = resolve_options(&settings, &[]).into_inner();
        BuildReport {
            reference: "erl/0.1".to_string(),
            invocation: BuildInvocation::from_options(&options),
            settings,
            options,
            finished_at: "2024-05-01T12:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn test_build_record_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("build").join("Release").join("erlpkg-build.json");

        let record = BuildRecord::new(sample_report(), Some("3.28.1".to_string()));
        record.save(&path).unwrap();

        let loaded = BuildRecord::load(&path).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_build_record_is_flat_json() {
        let record = BuildRecord::new(sample_report(), None);
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["reference"], "erl/0.1");
        assert_eq!(value["invocation"]["ENABLE_EXAMPLES"], true);
        assert!(value.get("cmake_version").is_none());
    }

    #[test]
    fn test_load_missing_record_fails() {
        let dir = tempdir().unwrap();
        assert!(BuildRecord::load(&dir.path().join("missing.json")).is_err());
    }
}
