//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Host settings (via erlpkg-runtime), layered with the profile and `-s` flags
//! - Option overrides from the profile and `-o` flags, resolved by erlpkg-core
//! - Conf from the profile, `ERLPKG_SKIP_TEST`, and `-c` flags
//! - The CMake build system and artifact locator (via erlpkg-runtime)
//!
//! Command handlers receive the composed [`CliContext`].

use std::path::PathBuf;
use std::sync::Arc;

use erlpkg_core::{
    ArtifactLocator, BuildSystemPort, Conf, ConfError, CoreError, Layout, OptionOverride, Profile,
    Recipe, ResolvedOptions, SKIP_TEST, Settings, SettingsError, resolve_options,
    split_assignment,
};
use erlpkg_runtime::{CmakeBuildSystem, FsArtifactLocator, detect_host_settings};
use tracing::debug;

use crate::commands::RecipeArgs;

/// Environment variable that sets the skip policy.
pub const SKIP_TEST_ENV: &str = "ERLPKG_SKIP_TEST";

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub source_folder: PathBuf,
    pub package_folder: Option<PathBuf>,
    pub profile: Option<PathBuf>,
    /// `key=value` setting overrides, applied after the profile.
    pub settings: Vec<String>,
    /// `name=value` option overrides, applied after the profile.
    pub options: Vec<String>,
    /// `section:key=value` conf entries, applied last.
    pub conf: Vec<String>,
    /// Value of [`SKIP_TEST_ENV`], if set.
    pub skip_test_env: Option<String>,
    /// Explicit `cmake` executable; `None` searches the `PATH`.
    pub cmake_program: Option<PathBuf>,
}

impl CliConfig {
    /// Config from command-line arguments and the process environment.
    pub fn from_args(args: &RecipeArgs) -> Self {
        Self {
            source_folder: args.source_folder.clone(),
            package_folder: args.package_folder.clone(),
            profile: args.profile.clone(),
            settings: args.settings.clone(),
            options: args.options.clone(),
            conf: args.conf.clone(),
            skip_test_env: std::env::var(SKIP_TEST_ENV).ok(),
            cmake_program: args.cmake.clone(),
        }
    }
}

/// Fully composed context for one recipe evaluation.
pub struct CliContext {
    pub recipe: Recipe,
    pub settings: Settings,
    pub options: ResolvedOptions,
    pub conf: Conf,
    pub layout: Layout,
    pub cmake_program: Option<PathBuf>,
}

impl CliContext {
    /// Whether `tools.build:skip_test` is active.
    pub fn skip_test(&self) -> Result<bool, ConfError> {
        self.conf.skip_test()
    }

    /// The CMake adapter for this layout. Without an explicit program this
    /// fails if `cmake` is not on the `PATH`.
    pub fn build_system(&self) -> Result<Arc<dyn BuildSystemPort>, CoreError> {
        let layout = self.layout.clone();
        let settings = self.settings.clone();
        let cmake = match &self.cmake_program {
            Some(program) => CmakeBuildSystem::with_program(program, layout, settings),
            None => CmakeBuildSystem::locate(layout, settings)?,
        };
        Ok(Arc::new(cmake))
    }

    pub fn artifact_locator(&self) -> Arc<dyn ArtifactLocator> {
        Arc::new(FsArtifactLocator::for_layout(&self.layout))
    }
}

/// Compose the context, starting from the detected host settings.
pub fn bootstrap(config: CliConfig) -> Result<CliContext, CoreError> {
    let host = detect_host_settings()?;
    bootstrap_with_host(config, host)
}

/// Compose the context on top of explicit base settings.
pub fn bootstrap_with_host(config: CliConfig, host: Settings) -> Result<CliContext, CoreError> {
    let profile = match &config.profile {
        Some(path) => Profile::load(path)?,
        None => Profile::default(),
    };

    let settings = apply_setting_flags(profile.apply_settings(host)?, &config.settings)?;
    debug!(%settings, "Resolved settings");

    let mut overrides = profile.option_overrides()?;
    for flag in &config.options {
        overrides.push(flag.parse::<OptionOverride>()?);
    }
    let options = resolve_options(&settings, &overrides);

    let mut conf = profile.conf();
    if let Some(value) = &config.skip_test_env {
        conf.set(SKIP_TEST, value.clone());
    }
    for entry in &config.conf {
        conf.set_entry(entry)?;
    }

    let mut layout = Layout::cmake(&config.source_folder, &settings);
    if let Some(package_folder) = &config.package_folder {
        layout = layout.with_package_folder(package_folder);
    }

    Ok(CliContext {
        recipe: Recipe::ERL,
        settings,
        options,
        conf,
        layout,
        cmake_program: config.cmake_program,
    })
}

fn apply_setting_flags(base: Settings, flags: &[String]) -> Result<Settings, SettingsError> {
    let mut pairs = Vec::with_capacity(flags.len());
    for flag in flags {
        let pair = split_assignment(flag).ok_or_else(|| SettingsError::Malformed(flag.clone()))?;
        pairs.push(pair);
    }
    // compiler must be set before compiler.version
    pairs.sort_by_key(|(key, _)| *key == "compiler.version");
    base.with_settings(pairs)
}
