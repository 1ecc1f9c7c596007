//! Settings domain types and validation.
//!
//! Settings are platform facts supplied by the invoking environment: operating
//! system family, compiler identity, build type, and target architecture.
//! They drive the platform rules but are never mutated by the recipe.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The setting names this recipe reads.
pub const SETTING_NAMES: [&str; 4] = ["os", "compiler", "build_type", "arch"];

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("Unknown setting '{0}' (expected one of: os, compiler, compiler.version, build_type, arch)")]
    UnknownSetting(String),

    #[error("Invalid value '{value}' for setting '{setting}'")]
    InvalidValue { setting: String, value: String },

    #[error("Malformed setting '{0}', expected key=value")]
    Malformed(String),

    #[error("Host platform is not supported: {0}")]
    UnsupportedHost(String),
}

impl SettingsError {
    fn invalid(setting: &str, value: &str) -> Self {
        Self::InvalidValue {
            setting: setting.to_string(),
            value: value.to_string(),
        }
    }
}

/// Operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Os {
    Linux,
    Macos,
    Windows,
    #[serde(rename = "FreeBSD")]
    FreeBsd,
}

impl Os {
    /// The operating system this binary was compiled for, if supported.
    pub const fn host() -> Option<Self> {
        if cfg!(target_os = "windows") {
            Some(Self::Windows)
        } else if cfg!(target_os = "macos") {
            Some(Self::Macos)
        } else if cfg!(target_os = "linux") {
            Some(Self::Linux)
        } else if cfg!(target_os = "freebsd") {
            Some(Self::FreeBsd)
        } else {
            None
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "Linux",
            Self::Macos => "Macos",
            Self::Windows => "Windows",
            Self::FreeBsd => "FreeBSD",
        }
    }

    /// Apple platforms use their own library naming conventions.
    pub const fn is_apple(self) -> bool {
        matches!(self, Self::Macos)
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Os {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linux" => Ok(Self::Linux),
            "macos" | "darwin" => Ok(Self::Macos),
            "windows" => Ok(Self::Windows),
            "freebsd" => Ok(Self::FreeBsd),
            _ => Err(SettingsError::invalid("os", s)),
        }
    }
}

/// Target architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arch {
    X86,
    X86_64,
    Armv7,
    Armv8,
}

impl Arch {
    /// The architecture this binary was compiled for, if supported.
    pub const fn host() -> Option<Self> {
        if cfg!(target_arch = "x86_64") {
            Some(Self::X86_64)
        } else if cfg!(target_arch = "x86") {
            Some(Self::X86)
        } else if cfg!(target_arch = "aarch64") {
            Some(Self::Armv8)
        } else if cfg!(target_arch = "arm") {
            Some(Self::Armv7)
        } else {
            None
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::X86 => "x86",
            Self::X86_64 => "x86_64",
            Self::Armv7 => "armv7",
            Self::Armv8 => "armv8",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x86" | "i386" | "i686" => Ok(Self::X86),
            "x86_64" | "amd64" => Ok(Self::X86_64),
            "armv7" | "arm" => Ok(Self::Armv7),
            "armv8" | "aarch64" | "arm64" => Ok(Self::Armv8),
            _ => Err(SettingsError::invalid("arch", s)),
        }
    }
}

/// Build type, following the CMake configuration names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BuildType {
    Debug,
    #[default]
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl BuildType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Release => "Release",
            Self::RelWithDebInfo => "RelWithDebInfo",
            Self::MinSizeRel => "MinSizeRel",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildType {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            "relwithdebinfo" => Ok(Self::RelWithDebInfo),
            "minsizerel" => Ok(Self::MinSizeRel),
            _ => Err(SettingsError::invalid("build_type", s)),
        }
    }
}

/// Compiler family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompilerKind {
    Gcc,
    Clang,
    AppleClang,
    Msvc,
}

impl CompilerKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gcc => "gcc",
            Self::Clang => "clang",
            Self::AppleClang => "apple-clang",
            Self::Msvc => "msvc",
        }
    }

    /// Whether the compiler accepts GCC-style `-m32`/`-m64` flags.
    pub const fn is_gnu_like(self) -> bool {
        matches!(self, Self::Gcc | Self::Clang | Self::AppleClang)
    }
}

impl fmt::Display for CompilerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompilerKind {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gcc" | "gnu" => Ok(Self::Gcc),
            "clang" => Ok(Self::Clang),
            "apple-clang" | "appleclang" => Ok(Self::AppleClang),
            "msvc" | "visual studio" => Ok(Self::Msvc),
            _ => Err(SettingsError::invalid("compiler", s)),
        }
    }
}

/// Compiler identity: family plus an optional version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Compiler {
    pub kind: CompilerKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Compiler {
    pub const fn new(kind: CompilerKind) -> Self {
        Self {
            kind,
            version: None,
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// The conventional compiler for an operating system.
    pub const fn default_for(os: Os) -> Self {
        match os {
            Os::Windows => Self::new(CompilerKind::Msvc),
            Os::Macos => Self::new(CompilerKind::AppleClang),
            Os::FreeBsd => Self::new(CompilerKind::Clang),
            Os::Linux => Self::new(CompilerKind::Gcc),
        }
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{} {version}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Read-only platform context for one recipe evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub os: Os,
    pub compiler: Compiler,
    pub build_type: BuildType,
    pub arch: Arch,
}

impl Settings {
    pub const fn new(os: Os, compiler: Compiler, build_type: BuildType, arch: Arch) -> Self {
        Self {
            os,
            compiler,
            build_type,
            arch,
        }
    }

    /// Settings for an operating system with conventional defaults for the rest.
    pub const fn for_os(os: Os) -> Self {
        Self::new(os, Compiler::default_for(os), BuildType::Release, Arch::X86_64)
    }

    /// Return a copy with one setting replaced.
    ///
    /// Accepts `os`, `arch`, `build_type`, `compiler` and `compiler.version`.
    /// Changing `os` does not change the compiler.
    pub fn with_setting(mut self, key: &str, value: &str) -> Result<Self, SettingsError> {
        let value = value.trim();
        match key.trim() {
            "os" => self.os = value.parse()?,
            "arch" => self.arch = value.parse()?,
            "build_type" => self.build_type = value.parse()?,
            "compiler" => {
                self.compiler = Compiler {
                    kind: value.parse()?,
                    version: None,
                };
            }
            "compiler.version" => {
                if value.is_empty() {
                    return Err(SettingsError::invalid("compiler.version", value));
                }
                self.compiler.version = Some(value.to_string());
            }
            other => return Err(SettingsError::UnknownSetting(other.to_string())),
        }
        Ok(self)
    }

    /// Apply a sequence of `(key, value)` pairs in order.
    pub fn with_settings<'a, I>(self, pairs: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        pairs
            .into_iter()
            .try_fold(self, |settings, (key, value)| settings.with_setting(key, value))
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "os={} compiler={} build_type={} arch={}",
            self.os, self.compiler, self.build_type, self.arch
        )
    }
}
