//! Writes generated build files into the generators folder.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use erlpkg_core::{Layout, Toolchain};
use tracing::info;

/// Write the CMake toolchain file and return its path.
///
/// The generators folder is created if missing; an existing toolchain is
/// overwritten.
pub fn write_toolchain(layout: &Layout, toolchain: &Toolchain) -> Result<PathBuf> {
    fs::create_dir_all(&layout.generators_folder).with_context(|| {
        format!(
            "Failed to create generators folder {}",
            layout.generators_folder.display()
        )
    })?;

    let path = layout.toolchain_path();
    fs::write(&path, toolchain.render())
        .with_context(|| format!("Failed to write toolchain {}", path.display()))?;

    info!(path = %path.display(), "Generated CMake toolchain");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use erlpkg_core::{Os, Recipe, RecipeOption, Settings, resolve_options};
    use tempfile::tempdir;

    #[test]
    fn test_write_toolchain_creates_generators_folder() {
        let dir = tempdir().unwrap();
        let settings = Settings::for_os(Os::Linux);
        let layout = Layout::cmake(dir.path(), &settings);
        let options = resolve_options(&settings, &[]);
        let toolchain = Toolchain::generate(&Recipe::ERL, &settings, &options);

        let path = write_toolchain(&layout, &toolchain).unwrap();

        assert_eq!(path, layout.toolchain_path());
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("CMAKE_POSITION_INDEPENDENT_CODE"));
        assert!(contents.contains("set(BUILD_SHARED_LIBS \"OFF\""));
    }

    #[test]
    fn test_write_toolchain_omits_removed_fpic() {
        let dir = tempdir().unwrap();
        let settings = Settings::for_os(Os::Windows);
        let layout = Layout::cmake(dir.path(), &settings);
        let options = resolve_options(&settings, &[]);
        assert!(!options.contains(RecipeOption::Fpic));
        let toolchain = Toolchain::generate(&Recipe::ERL, &settings, &options);

        let path = write_toolchain(&layout, &toolchain).unwrap();

        let contents = fs::read_to_string(path).unwrap();
        assert!(!contents.contains("CMAKE_POSITION_INDEPENDENT_CODE"));
    }
}
