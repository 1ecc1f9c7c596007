//! Core domain types and port definitions for the erl package recipe.
//!
//! The crate resolves recipe options against platform settings, declares the
//! package's dependencies, and orchestrates one external native build through
//! the [`ports::BuildSystemPort`] trait. It performs no process or filesystem
//! work of its own beyond reading profile files.
#![deny(unused_crate_dependencies)]

pub mod conf;
pub mod dependencies;
pub mod invocation;
pub mod layout;
pub mod options;
pub mod ports;
pub mod profile;
pub mod recipe;
pub mod rules;
pub mod services;
pub mod settings;
pub mod toolchain;

// Re-export commonly used types for convenience
pub use conf::{Conf, ConfError, SKIP_TEST};
pub use dependencies::{Dependency, DependencyKind, declare_dependencies, dependencies_of_kind};
pub use invocation::{BuildInvocation, COVERAGE_VARIABLE, EXAMPLES_VARIABLE};
pub use layout::{BUILD_RECORD_FILE_NAME, Layout};
pub use options::{
    OptionError, OptionOverride, OptionSet, RecipeOption, ResolvedOptions, declare_defaults,
    parse_bool, split_assignment,
};
pub use ports::{
    ArtifactLocator, BuildSystemError, BuildSystemPort, CoreError, PublishError,
};
pub use profile::{Profile, ProfileError};
pub use recipe::Recipe;
pub use rules::{
    Condition, RECIPE_RULES, Removal, Rule, RuleEngine, RuleStage, apply_configure_rules,
    apply_declaration_rules, resolve_options,
};
pub use services::{
    BuildOrchestrator, BuildOutcome, BuildReport, PackageDescriptor, PackagePublisher,
    library_file_names,
};
pub use settings::{Arch, BuildType, Compiler, CompilerKind, Os, Settings, SettingsError};
pub use toolchain::{TOOLCHAIN_FILE_NAME, Toolchain, cmake_bool};

// Used only by the integration tests under tests/
#[cfg(test)]
use mockall as _;
