//! Artifact discovery port.
//!
//! Publishing requires a library artifact to exist. The locator answers that
//! question without the core touching the filesystem.

use std::path::PathBuf;

/// Finds built library files in the package folder.
pub trait ArtifactLocator: Send + Sync {
    /// Return the paths of every file whose name is in `file_names`.
    ///
    /// An empty result means nothing publishable was found.
    fn find_libraries(&self, file_names: &[String]) -> Vec<PathBuf>;
}
