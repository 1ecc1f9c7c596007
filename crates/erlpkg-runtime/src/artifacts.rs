//! Filesystem implementation of [`ArtifactLocator`].

use std::path::PathBuf;

use erlpkg_core::{ArtifactLocator, Layout};
use tracing::debug;

/// Looks for library files directly inside a fixed list of folders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsArtifactLocator {
    search_folders: Vec<PathBuf>,
}

impl FsArtifactLocator {
    pub const fn new(search_folders: Vec<PathBuf>) -> Self {
        Self { search_folders }
    }

    /// Search `<package>/lib` then `<package>/bin`.
    pub fn for_layout(layout: &Layout) -> Self {
        Self::new(vec![layout.package_lib_folder(), layout.package_bin_folder()])
    }
}

impl ArtifactLocator for FsArtifactLocator {
    fn find_libraries(&self, file_names: &[String]) -> Vec<PathBuf> {
        let found: Vec<PathBuf> = self
            .search_folders
            .iter()
            .flat_map(|folder| file_names.iter().map(move |name| folder.join(name)))
            .filter(|path| path.is_file())
            .collect();
        debug!(folders = ?self.search_folders, ?found, "Searched for library files");
        found
    }
}
