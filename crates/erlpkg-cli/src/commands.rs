//! Subcommands and the arguments they share.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Show recipe metadata and option defaults
    Inspect {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve the option set for the given settings
    Options(RecipeArgs),

    /// List the recipe's dependencies
    Requirements {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate, build, package, and publish
    Build(RecipeArgs),

    /// Package and publish an existing build
    Package(RecipeArgs),
}

/// Inputs to one recipe evaluation.
#[derive(Args, Debug, Clone)]
pub struct RecipeArgs {
    /// JSON profile with `settings`, `options`, and `conf` sections
    #[arg(long, env = "ERLPKG_PROFILE")]
    pub profile: Option<PathBuf>,

    /// Setting override (e.g. `os=Windows`, `compiler.version=13`)
    #[arg(short = 's', long = "settings", value_name = "KEY=VALUE")]
    pub settings: Vec<String>,

    /// Option override (e.g. `shared=True`)
    #[arg(short = 'o', long = "options", value_name = "NAME=VALUE")]
    pub options: Vec<String>,

    /// Tool configuration (e.g. `tools.build:skip_test=true`)
    #[arg(short = 'c', long = "conf", value_name = "KEY=VALUE")]
    pub conf: Vec<String>,

    /// Folder containing the library's CMakeLists.txt
    #[arg(long, default_value = ".")]
    pub source_folder: PathBuf,

    /// Install prefix for the package step [default: <source>/package]
    #[arg(long)]
    pub package_folder: Option<PathBuf>,

    /// CMake executable to use instead of the one on the PATH
    #[arg(long, value_name = "PATH")]
    pub cmake: Option<PathBuf>,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}
