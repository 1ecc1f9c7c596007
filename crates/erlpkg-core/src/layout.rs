//! Folder layout for a CMake-driven package build.

use std::path::PathBuf;

use serde::Serialize;

use crate::settings::{CompilerKind, Settings};
use crate::toolchain::TOOLCHAIN_FILE_NAME;

/// File name of the build record written after a successful build.
pub const BUILD_RECORD_FILE_NAME: &str = "erlpkg-build.json";

/// Source, build, generators, and package folders.
///
/// Single-configuration generators get one build folder per build type
/// (`build/Release`); multi-configuration generators (MSVC) share `build/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub source_folder: PathBuf,
    pub build_folder: PathBuf,
    pub generators_folder: PathBuf,
    pub package_folder: PathBuf,
}

impl Layout {
    pub fn cmake(source_folder: impl Into<PathBuf>, settings: &Settings) -> Self {
        let source_folder = source_folder.into();
        let build_root = source_folder.join("build");
        let build_folder = if settings.compiler.kind == CompilerKind::Msvc {
            build_root
        } else {
            build_root.join(settings.build_type.as_str())
        };
        let generators_folder = build_folder.join("generators");
        let package_folder = source_folder.join("package");

        Self {
            source_folder,
            build_folder,
            generators_folder,
            package_folder,
        }
    }

    #[must_use]
    pub fn with_package_folder(mut self, package_folder: impl Into<PathBuf>) -> Self {
        self.package_folder = package_folder.into();
        self
    }

    pub fn toolchain_path(&self) -> PathBuf {
        self.generators_folder.join(TOOLCHAIN_FILE_NAME)
    }

    pub fn build_record_path(&self) -> PathBuf {
        self.build_folder.join(BUILD_RECORD_FILE_NAME)
    }

    pub fn package_lib_folder(&self) -> PathBuf {
        self.package_folder.join("lib")
    }

    pub fn package_bin_folder(&self) -> PathBuf {
        self.package_folder.join("bin")
    }
}
