//! Static recipe metadata.

use serde::Serialize;

use crate::settings::SETTING_NAMES;

/// Descriptive metadata of the packaged library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recipe {
    pub name: &'static str,
    pub version: &'static str,
    pub package_type: &'static str,
    pub license: &'static str,
    pub author: &'static str,
    pub description: &'static str,
    pub topics: &'static [&'static str],
    /// Files shipped with the recipe so the library can be rebuilt from source.
    pub exports_sources: &'static [&'static str],
    pub settings: &'static [&'static str],
}

impl Recipe {
    pub const ERL: Self = Self {
        name: "erl",
        version: "0.1",
        package_type: "library",
        license: "MIT",
        author: "Tsche che@pydong.org",
        description: "Experimental reflective utility library.",
        topics: &[],
        exports_sources: &["CMakeLists.txt", "include/*"],
        settings: &SETTING_NAMES,
    };

    /// `name/version` reference.
    pub fn reference(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }
}

impl Default for Recipe {
    fn default() -> Self {
        Self::ERL
    }
}
