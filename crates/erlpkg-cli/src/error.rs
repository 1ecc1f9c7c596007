//! CLI-specific error types and mappings.
//!
//! Maps [`CoreError`] and adapter failures to exit codes and user-facing
//! messages.

use erlpkg_core::{
    BuildSystemError, ConfError, CoreError, OptionError, ProfileError, PublishError,
    SettingsError,
};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid setting, option, or argument value.
    #[error("Invalid arguments: {0}")]
    Usage(String),

    /// Input file contents could not be understood.
    #[error("Invalid data: {0}")]
    Data(String),

    /// The native build or packaging failed.
    #[error("{0}")]
    Software(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h:
    /// - 2: invalid arguments
    /// - 65: `EX_DATAERR`
    /// - 70: `EX_SOFTWARE`
    /// - 74: `EX_IOERR`
    /// - 78: `EX_CONFIG`
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => 2,
            Self::Data(_) => 65,
            Self::Software(_) => 70,
            Self::Io(_) => 74,
            Self::Config(_) => 78,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Options(e) => e.into(),
            CoreError::Settings(e) => e.into(),
            CoreError::Conf(e) => e.into(),
            CoreError::Profile(e) => e.into(),
            CoreError::BuildSystem(e) => e.into(),
            CoreError::Publish(e) => e.into(),
        }
    }
}

impl From<OptionError> for CliError {
    fn from(err: OptionError) -> Self {
        Self::Usage(err.to_string())
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::UnsupportedHost(_) => Self::Config(err.to_string()),
            _ => Self::Usage(err.to_string()),
        }
    }
}

impl From<ConfError> for CliError {
    fn from(err: ConfError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<ProfileError> for CliError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::Read { .. } => Self::Io(err.to_string()),
            ProfileError::Parse { .. } => Self::Data(err.to_string()),
        }
    }
}

impl From<BuildSystemError> for CliError {
    fn from(err: BuildSystemError) -> Self {
        match err {
            BuildSystemError::ToolNotFound(_) => Self::Config(err.to_string()),
            BuildSystemError::Io(_) => Self::Io(err.to_string()),
            _ => Self::Software(err.to_string()),
        }
    }
}

impl From<PublishError> for CliError {
    fn from(err: PublishError) -> Self {
        Self::Software(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Software(format!("Failed to render JSON: {err}"))
    }
}

/// Runtime helpers report filesystem failures through anyhow.
impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        Self::Io(format!("{err:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_invalid_option_is_usage_error() {
        let err: CliError = OptionError::UnknownOption("lto".to_string()).into();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_build_failure_is_software_error() {
        let err: CliError = CoreError::from(BuildSystemError::BuildFailed {
            code: Some(2),
            message: "reflect.hpp:12: error".to_string(),
        })
        .into();
        assert_eq!(err.exit_code(), 70);
        assert!(err.to_string().contains("reflect.hpp:12"));
    }

    #[test]
    fn test_missing_cmake_is_config_error() {
        let err: CliError = BuildSystemError::ToolNotFound("cmake".to_string()).into();
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn test_profile_errors_split_io_and_data() {
        let read: CliError = ProfileError::Read {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        }
        .into();
        assert_eq!(read.exit_code(), 74);

        let parse: CliError = ProfileError::Parse {
            path: PathBuf::from("broken.json"),
            source: serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        }
        .into();
        assert_eq!(parse.exit_code(), 65);
    }

    #[test]
    fn test_missing_artifact_is_software_error() {
        let err: CliError = PublishError::MissingArtifact {
            library: "erl".to_string(),
            searched: vec!["liberl.a".to_string()],
        }
        .into();
        assert_eq!(err.exit_code(), 70);
    }

    #[test]
    fn test_bad_conf_value_is_config_error() {
        let err: CliError = ConfError::InvalidBool {
            key: "tools.build:skip_test".to_string(),
            value: "maybe".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), 78);
    }
}
