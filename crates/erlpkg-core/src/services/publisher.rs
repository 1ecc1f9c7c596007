//! Package step and consumer-facing package metadata.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ports::{ArtifactLocator, BuildSystemError, BuildSystemPort, PublishError};
use crate::recipe::Recipe;
use crate::settings::{CompilerKind, Os, Settings};

/// What downstream consumers link against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    pub name: String,
    pub version: String,
    pub package_type: String,
    /// Library names passed to the linker.
    pub libs: Vec<String>,
    pub settings: Settings,
    /// Library files found in the package folder.
    pub artifacts: Vec<PathBuf>,
}

/// Candidate file names for a library built with the given settings.
///
/// MSVC names follow the platform; GNU-like toolchains on Windows (MinGW)
/// keep the `lib` prefix and add the `.dll.a` import library.
pub fn library_file_names(settings: &Settings, lib: &str) -> Vec<String> {
    let os = settings.os;
    if settings.compiler.kind == CompilerKind::Msvc {
        return vec![format!("{lib}.lib"), format!("{lib}.dll")];
    }
    if os == Os::Windows {
        return vec![
            format!("lib{lib}.a"),
            format!("lib{lib}.dll.a"),
            format!("lib{lib}.dll"),
        ];
    }
    let shared = if os.is_apple() { "dylib" } else { "so" };
    vec![format!("lib{lib}.a"), format!("lib{lib}.{shared}")]
}

pub struct PackagePublisher {
    recipe: Recipe,
    build_system: Arc<dyn BuildSystemPort>,
    locator: Arc<dyn ArtifactLocator>,
}

impl PackagePublisher {
    pub fn new(
        recipe: Recipe,
        build_system: Arc<dyn BuildSystemPort>,
        locator: Arc<dyn ArtifactLocator>,
    ) -> Self {
        Self {
            recipe,
            build_system,
            locator,
        }
    }

    /// Install the build outputs into the package folder.
    pub fn package(&self) -> Result<(), BuildSystemError> {
        info!(reference = %self.recipe.reference(), "Packaging");
        self.build_system.install()
    }

    /// Describe the package for consumers.
    ///
    /// Fails with [`PublishError::MissingArtifact`] when no library file is
    /// present, which happens when the build was skipped and no earlier run
    /// produced one.
    pub fn publish(&self, settings: &Settings) -> Result<PackageDescriptor, PublishError> {
        let searched = library_file_names(settings, self.recipe.name);
        let artifacts = self.locator.find_libraries(&searched);
        if artifacts.is_empty() {
            return Err(PublishError::MissingArtifact {
                library: self.recipe.name.to_string(),
                searched,
            });
        }
        debug!(?artifacts, "Found library artifacts");

        Ok(PackageDescriptor {
            name: self.recipe.name.to_string(),
            version: self.recipe.version.to_string(),
            package_type: self.recipe.package_type.to_string(),
            libs: vec![self.recipe.name.to_string()],
            settings: settings.clone(),
            artifacts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::settings::Compiler;

    #[test]
    fn test_library_file_names_per_platform() {
        assert_eq!(
            library_file_names(&Settings::for_os(Os::Windows), "erl"),
            vec!["erl.lib".to_string(), "erl.dll".to_string()]
        );
        assert_eq!(
            library_file_names(&Settings::for_os(Os::Linux), "erl"),
            vec!["liberl.a".to_string(), "liberl.so".to_string()]
        );
        assert_eq!(
            library_file_names(&Settings::for_os(Os::Macos), "erl"),
            vec!["liberl.a".to_string(), "liberl.dylib".to_string()]
        );
    }

    #[test]
    fn test_library_file_names_for_mingw() {
        let mut settings = Settings::for_os(Os::Windows);
        settings.compiler = Compiler::new(CompilerKind::Gcc);
        assert_eq!(
            library_file_names(&settings, "erl"),
            vec![
                "liberl.a".to_string(),
                "liberl.dll.a".to_string(),
                "liberl.dll".to_string()
            ]
        );

        settings.compiler = Compiler::new(CompilerKind::Clang);
        assert_eq!(library_file_names(&settings, "erl")[0], "liberl.a");
    }
}
