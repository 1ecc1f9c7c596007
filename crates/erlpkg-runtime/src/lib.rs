//! Process and OS-level adapters for the erl package recipe.
//!
//! Implements the ports declared in `erlpkg-core`: [`CmakeBuildSystem`] drives
//! the native CMake build and [`FsArtifactLocator`] inspects the package folder.
//! Host detection, toolchain writing, and build record persistence live here
//! too since they touch the filesystem or spawn processes.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod artifacts;
pub mod cmake;
pub mod detect;
pub mod generators;
pub mod record;
pub mod system;

pub use artifacts::FsArtifactLocator;
pub use cmake::CmakeBuildSystem;
pub use detect::{classify_compiler, detect_host_settings};
pub use generators::write_toolchain;
pub use record::BuildRecord;

#[cfg(test)]
use tempfile as _;
