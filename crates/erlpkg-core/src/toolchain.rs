//! CMake toolchain generation.
//!
//! The toolchain carries the settings- and option-derived cache variables that
//! are not part of the [`BuildInvocation`](crate::invocation::BuildInvocation):
//! build type, library kind, position independence, and architecture flags.

use std::fmt::Write as _;

use serde::Serialize;

use crate::options::{OptionSet, RecipeOption};
use crate::recipe::Recipe;
use crate::settings::{Arch, BuildType, Compiler, Settings};

/// File name of the generated toolchain inside the generators folder.
pub const TOOLCHAIN_FILE_NAME: &str = "erlpkg_toolchain.cmake";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toolchain {
    pub reference: String,
    pub build_type: BuildType,
    pub shared: bool,
    /// `None` when the option was removed by a platform rule.
    pub position_independent_code: Option<bool>,
    pub compiler: Compiler,
    pub arch: Arch,
}

impl Toolchain {
    pub fn generate(recipe: &Recipe, settings: &Settings, options: &OptionSet) -> Self {
        Self {
            reference: recipe.reference(),
            build_type: settings.build_type,
            shared: options.is_enabled(RecipeOption::Shared),
            position_independent_code: options.get(RecipeOption::Fpic),
            compiler: settings.compiler.clone(),
            arch: settings.arch,
        }
    }

    /// Cache variables in the order they are written.
    pub fn cache_variables(&self) -> Vec<(&'static str, String)> {
        let mut vars = vec![
            ("CMAKE_BUILD_TYPE", self.build_type.as_str().to_string()),
            ("BUILD_SHARED_LIBS", cmake_bool(self.shared).to_string()),
        ];
        if let Some(pic) = self.position_independent_code {
            vars.push(("CMAKE_POSITION_INDEPENDENT_CODE", cmake_bool(pic).to_string()));
        }
        vars
    }

    fn arch_flag(&self) -> Option<&'static str> {
        if !self.compiler.kind.is_gnu_like() {
            return None;
        }
        match self.arch {
            Arch::X86 => Some("-m32"),
            Arch::X86_64 => Some("-m64"),
            Arch::Armv7 | Arch::Armv8 => None,
        }
    }

    /// Render the toolchain file contents.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# Toolchain for {} generated by erlpkg", self.reference);
        let _ = writeln!(out, "# compiler: {}, arch: {}", self.compiler, self.arch);
        out.push('\n');

        for (name, value) in self.cache_variables() {
            let kind = if name == "CMAKE_BUILD_TYPE" {
                "STRING"
            } else {
                "BOOL"
            };
            let _ = writeln!(out, "set({name} \"{value}\" CACHE {kind} \"\" FORCE)");
        }

        if let Some(flag) = self.arch_flag() {
            out.push('\n');
            let _ = writeln!(out, "string(APPEND CMAKE_C_FLAGS_INIT \" {flag}\")");
            let _ = writeln!(out, "string(APPEND CMAKE_CXX_FLAGS_INIT \" {flag}\")");
            let _ = writeln!(out, "string(APPEND CMAKE_SHARED_LINKER_FLAGS_INIT \" {flag}\")");
        }

        out
    }
}

/// CMake spelling of a boolean.
pub const fn cmake_bool(value: bool) -> &'static str {
    if value { "ON" } else { "OFF" }
}
