//! JSON build profiles.
//!
//! A profile bundles settings, option values, and conf entries so a build can
//! be reproduced without repeating command-line flags:
//!
//! ```json
//! {
//!   "settings": { "os": "Linux", "build_type": "Debug" },
//!   "options": { "shared": "True" },
//!   "conf": { "tools.build:skip_test": "False" }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::conf::Conf;
use crate::options::{OptionError, OptionOverride};
use crate::settings::{Settings, SettingsError};

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Failed to read profile {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse profile {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub settings: BTreeMap<String, String>,
    pub options: BTreeMap<String, String>,
    pub conf: BTreeMap<String, String>,
}

impl Profile {
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let json = fs::read_to_string(path).map_err(|source| ProfileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ProfileError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Layer the profile's settings over `base`.
    pub fn apply_settings(&self, base: Settings) -> Result<Settings, SettingsError> {
        // compiler must be set before compiler.version
        let mut pairs: Vec<(&str, &str)> = self
            .settings
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        pairs.sort_by_key(|(key, _)| *key == "compiler.version");
        base.with_settings(pairs)
    }

    pub fn option_overrides(&self) -> Result<Vec<OptionOverride>, OptionError> {
        self.options
            .iter()
            .map(|(name, value)| OptionOverride::parse(name, value))
            .collect()
    }

    pub fn conf(&self) -> Conf {
        let mut conf = Conf::new();
        for (key, value) in &self.conf {
            conf.set(key.clone(), value.clone());
        }
        conf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::RecipeOption;
    use crate::settings::{BuildType, CompilerKind, Os};

    const PROFILE: &str = r#"{
        "settings": { "compiler.version": "13", "compiler": "gcc", "build_type": "Debug" },
        "options": { "shared": "True", "coverage": "off" },
        "conf": { "tools.build:skip_test": "True" }
    }"#;

    #[test]
    fn test_load_profile_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("linux-debug.json");
        fs::write(&path, PROFILE).unwrap();

        let profile = Profile::load(&path).unwrap();
        let settings = profile.apply_settings(Settings::for_os(Os::Linux)).unwrap();
        assert_eq!(settings.build_type, BuildType::Debug);
        assert_eq!(settings.compiler.kind, CompilerKind::Gcc);
        assert_eq!(settings.compiler.version.as_deref(), Some("13"));

        let overrides = profile.option_overrides().unwrap();
        assert!(overrides.contains(&OptionOverride::new(RecipeOption::Shared, true)));
        assert!(overrides.contains(&OptionOverride::new(RecipeOption::Coverage, false)));

        assert!(profile.conf().skip_test().unwrap());
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let profile: Profile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile, Profile::default());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = Profile::load(Path::new("/nonexistent/erlpkg.json")).unwrap_err();
        assert!(matches!(err, ProfileError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/erlpkg.json"));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ settings: ").unwrap();
        assert!(matches!(
            Profile::load(&path),
            Err(ProfileError::Parse { .. })
        ));
    }
}
