//! Platform rule engine.
//!
//! Rules are data: each one names the lifecycle stage it runs in, a condition
//! over the settings and current options, and the option it removes when the
//! condition holds. Removal never fails and never adds options, so the passes
//! are idempotent and the order of rules within a pass does not matter.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::options::{OptionOverride, OptionSet, RecipeOption, ResolvedOptions, declare_defaults};
use crate::settings::{Os, Settings};

/// Lifecycle event a rule is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleStage {
    /// Runs when options are declared, before caller overrides.
    Declaration,
    /// Runs right before the build is configured.
    Configure,
}

impl fmt::Display for RuleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declaration => f.write_str("declaration"),
            Self::Configure => f.write_str("configure"),
        }
    }
}

/// Predicate a rule checks before removing its option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// The target operating system matches.
    OsIs(Os),
    /// The option is present and set to true.
    OptionEnabled(RecipeOption),
}

impl Condition {
    pub fn holds(&self, settings: &Settings, options: &OptionSet) -> bool {
        match *self {
            Self::OsIs(os) => settings.os == os,
            Self::OptionEnabled(option) => options.is_enabled(option),
        }
    }
}

/// A predicate-to-removal transformation over the option set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub name: &'static str,
    pub stage: RuleStage,
    pub condition: Condition,
    pub removes: RecipeOption,
}

/// Record of an option removed by a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Removal {
    pub option: RecipeOption,
    pub rule: &'static str,
    pub stage: RuleStage,
}

impl Rule {
    /// Remove the rule's option if the condition holds and the option is present.
    pub fn apply(&self, settings: &Settings, options: &mut OptionSet) -> Option<Removal> {
        if !self.condition.holds(settings, options) {
            return None;
        }
        options.remove(self.removes)?;
        debug!(
            rule = self.name,
            option = self.removes.as_str(),
            "Removed option"
        );
        Some(Removal {
            option: self.removes,
            rule: self.name,
            stage: self.stage,
        })
    }
}

/// The rules shipped with the erl recipe.
pub const RECIPE_RULES: [Rule; 2] = [
    // Windows' linking model has no notion of position-independent code.
    Rule {
        name: "no-fpic-on-windows",
        stage: RuleStage::Declaration,
        condition: Condition::OsIs(Os::Windows),
        removes: RecipeOption::Fpic,
    },
    // Shared libraries are always position independent.
    Rule {
        name: "shared-implies-fpic",
        stage: RuleStage::Configure,
        condition: Condition::OptionEnabled(RecipeOption::Shared),
        removes: RecipeOption::Fpic,
    },
];

/// Ordered list of rules applied per stage.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: Vec<Rule>,
}

impl RuleEngine {
    pub const fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Engine loaded with [`RECIPE_RULES`].
    pub fn recipe() -> Self {
        Self::new(RECIPE_RULES.to_vec())
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Run every rule of `stage` against the option set.
    pub fn apply(
        &self,
        stage: RuleStage,
        settings: &Settings,
        options: &mut OptionSet,
    ) -> Vec<Removal> {
        self.rules
            .iter()
            .filter(|rule| rule.stage == stage)
            .filter_map(|rule| rule.apply(settings, options))
            .collect()
    }

    /// Seed defaults, run the declaration pass, apply overrides, then run the
    /// configure pass.
    pub fn resolve(&self, settings: &Settings, overrides: &[OptionOverride]) -> ResolvedOptions {
        let mut options = declare_defaults();
        let mut removals = self.apply(RuleStage::Declaration, settings, &mut options);
        let ignored = options.apply_overrides(overrides);
        removals.extend(self.apply(RuleStage::Configure, settings, &mut options));

        debug!(%settings, options = %options, "Resolved options");
        ResolvedOptions::new(options, removals, ignored)
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::recipe()
    }
}

/// Declaration-time pass with the recipe rules.
pub fn apply_declaration_rules(settings: &Settings, options: &mut OptionSet) -> Vec<Removal> {
    RuleEngine::recipe().apply(RuleStage::Declaration, settings, options)
}

/// Configure-time pass with the recipe rules.
pub fn apply_configure_rules(settings: &Settings, options: &mut OptionSet) -> Vec<Removal> {
    RuleEngine::recipe().apply(RuleStage::Configure, settings, options)
}

/// Full option resolution with the recipe rules.
pub fn resolve_options(settings: &Settings, overrides: &[OptionOverride]) -> ResolvedOptions {
    RuleEngine::recipe().resolve(settings, overrides)
}
