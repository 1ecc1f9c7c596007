//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the recipe core expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No process or filesystem details in any signature
//! - Failures from the external system are reported, never retried

pub mod artifact_locator;
pub mod build_system;

use thiserror::Error;

pub use artifact_locator::ArtifactLocator;
pub use build_system::BuildSystemPort;

/// Errors reported by the native build system.
///
/// These are propagated to the caller unmodified.
#[derive(Debug, Error)]
pub enum BuildSystemError {
    /// The build tool could not be located.
    #[error("Build tool not found: {0}")]
    ToolNotFound(String),

    /// The configure step exited unsuccessfully.
    #[error("Configure failed (exit code: {code:?}): {message}")]
    ConfigureFailed { code: Option<i32>, message: String },

    /// Compilation exited unsuccessfully.
    #[error("Build failed (exit code: {code:?}): {message}")]
    BuildFailed { code: Option<i32>, message: String },

    /// The install step exited unsuccessfully.
    #[error("Install failed (exit code: {code:?}): {message}")]
    InstallFailed { code: Option<i32>, message: String },

    /// A step was invoked before its prerequisite.
    #[error("Build system not ready: {0}")]
    NotConfigured(String),

    /// IO operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while publishing package metadata.
#[derive(Debug, Error)]
pub enum PublishError {
    /// No library artifact exists to publish.
    #[error(
        "No '{library}' library found in the package folder (looked for: {}). Build and package before publishing.",
        .searched.join(", ")
    )]
    MissingArtifact {
        library: String,
        searched: Vec<String>,
    },
}

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (CLI exit codes).
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Options(#[from] crate::options::OptionError),

    #[error(transparent)]
    Settings(#[from] crate::settings::SettingsError),

    #[error(transparent)]
    Conf(#[from] crate::conf::ConfError),

    #[error(transparent)]
    Profile(#[from] crate::profile::ProfileError),

    #[error(transparent)]
    BuildSystem(#[from] BuildSystemError),

    #[error(transparent)]
    Publish(#[from] PublishError),
}
