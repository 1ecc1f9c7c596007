//! Variables forwarded to the native build system's configure step.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::options::{OptionSet, RecipeOption};

/// Cache variable toggling coverage flags in the library's CMake project.
pub const COVERAGE_VARIABLE: &str = "ENABLE_COVERAGE";

/// Cache variable toggling example compilation.
pub const EXAMPLES_VARIABLE: &str = "ENABLE_EXAMPLES";

/// Variable map handed to `configure`.
///
/// Always holds exactly the coverage and examples toggles, copied verbatim
/// from the resolved options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildInvocation {
    variables: BTreeMap<String, bool>,
}

impl BuildInvocation {
    pub fn from_options(options: &OptionSet) -> Self {
        let variables = [
            (COVERAGE_VARIABLE, RecipeOption::Coverage),
            (EXAMPLES_VARIABLE, RecipeOption::Examples),
        ]
        .into_iter()
        .map(|(name, option)| (name.to_string(), options.value_or_default(option)))
        .collect();

        Self { variables }
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.variables.get(name).copied()
    }

    pub fn coverage(&self) -> bool {
        self.get(COVERAGE_VARIABLE).unwrap_or(false)
    }

    pub fn examples(&self) -> bool {
        self.get(EXAMPLES_VARIABLE).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.variables
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::declare_defaults;

    #[test]
    fn test_defaults_forward_two_variables() {
        let invocation = BuildInvocation::from_options(&declare_defaults());
        assert_eq!(invocation.len(), 2);
        assert!(!invocation.coverage());
        assert!(invocation.examples());
    }

    #[test]
    fn test_values_are_copied_verbatim() {
        let mut options = declare_defaults();
        options.set(RecipeOption::Coverage, true);
        options.set(RecipeOption::Examples, false);

        let invocation = BuildInvocation::from_options(&options);
        assert_eq!(invocation.get(COVERAGE_VARIABLE), Some(true));
        assert_eq!(invocation.get(EXAMPLES_VARIABLE), Some(false));
        assert_eq!(invocation.get("BUILD_SHARED_LIBS"), None);
    }

    #[test]
    fn test_shared_and_fpic_are_not_forwarded() {
        let mut options = declare_defaults();
        options.set(RecipeOption::Shared, true);

        let invocation = BuildInvocation::from_options(&options);
        let names: Vec<&str> = invocation
            .iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec![COVERAGE_VARIABLE, EXAMPLES_VARIABLE]);
    }
}
