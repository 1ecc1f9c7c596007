//! Option model: the recognized recipe options, their domains, and defaults.
//!
//! Every option is boolean-valued. The option set is seeded from
//! [`declare_defaults`], then narrowed by the platform rules in
//! [`crate::rules`] and finally frozen as [`ResolvedOptions`].

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::rules::Removal;

/// Errors raised while parsing option names, values, or overrides.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("Unknown option '{0}' (expected one of: shared, fPIC, coverage, examples)")]
    UnknownOption(String),

    #[error("Invalid value '{value}' for option '{option}': expected True or False")]
    InvalidValue { option: String, value: String },

    #[error("Malformed option '{0}', expected name=value")]
    Malformed(String),
}

/// A user-overridable recipe option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RecipeOption {
    /// Build a shared library instead of a static one.
    #[serde(rename = "shared")]
    Shared,
    /// Compile with position-independent code.
    #[serde(rename = "fPIC")]
    Fpic,
    /// Enable coverage instrumentation.
    #[serde(rename = "coverage")]
    Coverage,
    /// Compile the bundled examples.
    #[serde(rename = "examples")]
    Examples,
}

impl RecipeOption {
    pub const ALL: [Self; 4] = [Self::Shared, Self::Fpic, Self::Coverage, Self::Examples];

    /// Canonical option key as used in profiles and on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shared => "shared",
            Self::Fpic => "fPIC",
            Self::Coverage => "coverage",
            Self::Examples => "examples",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Shared => "Build erl as a shared library",
            Self::Fpic => "Compile with position-independent code",
            Self::Coverage => "Instrument the build for coverage reports",
            Self::Examples => "Compile the example programs",
        }
    }

    /// Value fixed at declaration time.
    pub const fn default_value(self) -> bool {
        match self {
            Self::Shared | Self::Coverage => false,
            Self::Fpic | Self::Examples => true,
        }
    }
}

impl fmt::Display for RecipeOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecipeOption {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "shared" => Ok(Self::Shared),
            "fPIC" | "fpic" | "position_independent_code" => Ok(Self::Fpic),
            "coverage" | "coverage_instrumentation" => Ok(Self::Coverage),
            "examples" | "build_examples" => Ok(Self::Examples),
            other => Err(OptionError::UnknownOption(other.to_string())),
        }
    }
}

/// Parse a boolean the way recipe files spell them (`True`, `off`, `1`, ...).
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Some(true),
        "false" | "0" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Split `key=value` into its trimmed halves.
pub fn split_assignment(input: &str) -> Option<(&str, &str)> {
    let (key, value) = input.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

/// A caller-supplied `name=value` option assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionOverride {
    pub option: RecipeOption,
    pub value: bool,
}

impl OptionOverride {
    pub const fn new(option: RecipeOption, value: bool) -> Self {
        Self { option, value }
    }

    /// Parse an option name and a value separately.
    pub fn parse(name: &str, value: &str) -> Result<Self, OptionError> {
        let option: RecipeOption = name.parse()?;
        let value = parse_bool(value).ok_or_else(|| OptionError::InvalidValue {
            option: option.as_str().to_string(),
            value: value.to_string(),
        })?;
        Ok(Self { option, value })
    }
}

impl FromStr for OptionOverride {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) =
            split_assignment(s).ok_or_else(|| OptionError::Malformed(s.to_string()))?;
        Self::parse(name, value)
    }
}

/// Mutable mapping from option to current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet {
    values: BTreeMap<RecipeOption, bool>,
}

impl OptionSet {
    /// An empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, option: RecipeOption) -> Option<bool> {
        self.values.get(&option).copied()
    }

    pub fn contains(&self, option: RecipeOption) -> bool {
        self.values.contains_key(&option)
    }

    /// Current value, or the declared default when the option was removed.
    pub fn value_or_default(&self, option: RecipeOption) -> bool {
        self.get(option).unwrap_or_else(|| option.default_value())
    }

    /// True only when the option is present and set.
    pub fn is_enabled(&self, option: RecipeOption) -> bool {
        self.get(option).unwrap_or(false)
    }

    /// Insert or replace an option value.
    pub fn set(&mut self, option: RecipeOption, value: bool) {
        self.values.insert(option, value);
    }

    /// Remove an option if present. Removing an absent option is a no-op.
    pub fn remove(&mut self, option: RecipeOption) -> Option<bool> {
        self.values.remove(&option)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RecipeOption, bool)> + '_ {
        self.values.iter().map(|(option, value)| (*option, *value))
    }

    /// Apply caller overrides to the options still present.
    ///
    /// Overrides naming an option that a rule already removed are ignored and
    /// returned so the caller can report them.
    pub fn apply_overrides(&mut self, overrides: &[OptionOverride]) -> Vec<RecipeOption> {
        let mut ignored = Vec::new();
        for entry in overrides {
            if let Some(slot) = self.values.get_mut(&entry.option) {
                *slot = entry.value;
            } else {
                warn!(
                    option = entry.option.as_str(),
                    "Ignoring override for option removed on this platform"
                );
                if !ignored.contains(&entry.option) {
                    ignored.push(entry.option);
                }
            }
        }
        ignored
    }
}

impl FromIterator<(RecipeOption, bool)> for OptionSet {
    fn from_iter<T: IntoIterator<Item = (RecipeOption, bool)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for OptionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (option, value) in self.iter() {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{option}={}", if value { "True" } else { "False" })?;
            first = false;
        }
        Ok(())
    }
}

/// Produce the option set with every option at its declared default.
pub fn declare_defaults() -> OptionSet {
    RecipeOption::ALL
        .into_iter()
        .map(|option| (option, option.default_value()))
        .collect()
}

/// The option set after both rule passes. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedOptions {
    options: OptionSet,
    removals: Vec<Removal>,
    ignored_overrides: Vec<RecipeOption>,
}

impl ResolvedOptions {
    pub(crate) const fn new(
        options: OptionSet,
        removals: Vec<Removal>,
        ignored_overrides: Vec<RecipeOption>,
    ) -> Self {
        Self {
            options,
            removals,
            ignored_overrides,
        }
    }

    pub const fn options(&self) -> &OptionSet {
        &self.options
    }

    /// Options removed by the platform rules, in the order they fired.
    pub fn removals(&self) -> &[Removal] {
        &self.removals
    }

    /// Overrides dropped because their option had been removed.
    pub fn ignored_overrides(&self) -> &[RecipeOption] {
        &self.ignored_overrides
    }

    pub fn into_inner(self) -> OptionSet {
        self.options
    }
}

impl Deref for ResolvedOptions {
    type Target = OptionSet;

    fn deref(&self) -> &Self::Target {
        &self.options
    }
}
