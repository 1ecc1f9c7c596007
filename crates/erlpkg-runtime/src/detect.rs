//! Host settings detection.
//!
//! Operating system and architecture come from the compile target. The
//! compiler comes from `CC` when set, otherwise from `cc --version`. The
//! build type is always `Release`; profiles and flags override any of these.

use std::path::Path;

use erlpkg_core::{Arch, BuildType, Compiler, CompilerKind, Os, Settings, SettingsError};
use tracing::debug;

use crate::system::{compiler_version_output, extract_version_number, major_version};

/// Settings describing the machine erlpkg is running on.
pub fn detect_host_settings() -> Result<Settings, SettingsError> {
    let os = Os::host()
        .ok_or_else(|| SettingsError::UnsupportedHost(std::env::consts::OS.to_string()))?;
    let arch = Arch::host()
        .ok_or_else(|| SettingsError::UnsupportedHost(std::env::consts::ARCH.to_string()))?;

    let compiler = detect_compiler(os);
    debug!(%os, %arch, %compiler, "Detected host settings");

    Ok(Settings::new(os, compiler, BuildType::Release, arch))
}

fn detect_compiler(os: Os) -> Compiler {
    let fallback = Compiler::default_for(os);

    let candidate = std::env::var("CC").ok().filter(|cc| !cc.trim().is_empty());
    let program = candidate.as_deref().unwrap_or(match os {
        Os::Windows => "cl",
        _ => "cc",
    });

    // cl.exe has no --version; trust the platform default
    if os == Os::Windows && is_msvc_driver(program) {
        return fallback;
    }

    let Some(banner) = compiler_version_output(program) else {
        debug!(program, "Compiler version query failed, using platform default");
        return fallback;
    };

    let kind = classify_compiler(&banner).unwrap_or(fallback.kind);
    let compiler = Compiler::new(kind);
    match extract_version_number(&banner)
        .as_deref()
        .and_then(major_version)
    {
        Some(major) => compiler.with_version(major),
        None => compiler,
    }
}

fn is_msvc_driver(program: &str) -> bool {
    Path::new(program)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.eq_ignore_ascii_case("cl"))
}

/// Compiler family named by a `--version` banner.
pub fn classify_compiler(banner: &str) -> Option<CompilerKind> {
    let lower = banner.to_ascii_lowercase();
    if lower.contains("apple clang") || lower.contains("apple llvm") {
        Some(CompilerKind::AppleClang)
    } else if lower.contains("clang") {
        Some(CompilerKind::Clang)
    } else if lower.contains("gcc") || lower.contains("g++") || lower.contains("free software foundation") {
        Some(CompilerKind::Gcc)
    } else if lower.contains("microsoft") {
        Some(CompilerKind::Msvc)
    } else {
        None
    }
}
