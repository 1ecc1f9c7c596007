//! Dependency declarations for the erl package.
//!
//! The dependency list is fixed: it does not depend on options or settings.
//! Fetching and resolving the references is the dependency manager's job.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a dependency is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// Linked into the library and propagated to consumers.
    BuildRequirement,
    /// Only needed to build and run the test suite.
    TestRequirement,
}

impl DependencyKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BuildRequirement => "requires",
            Self::TestRequirement => "test_requires",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    pub version: String,
    pub kind: DependencyKind,
}

impl Dependency {
    pub fn new(name: impl Into<String>, version: impl Into<String>, kind: DependencyKind) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            kind,
        }
    }

    /// `name/version` reference understood by the dependency manager.
    pub fn reference(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }

    pub const fn is_test_only(&self) -> bool {
        matches!(self.kind, DependencyKind::TestRequirement)
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}

/// Declare the package's dependencies, build requirements first.
pub fn declare_dependencies() -> Vec<Dependency> {
    vec![
        Dependency::new("rsl", "0.1", DependencyKind::BuildRequirement),
        Dependency::new("gtest", "1.14.0", DependencyKind::TestRequirement),
    ]
}

/// Dependencies of one kind, in declaration order.
pub fn dependencies_of_kind(kind: DependencyKind) -> Vec<Dependency> {
    declare_dependencies()
        .into_iter()
        .filter(|dep| dep.kind == kind)
        .collect()
}
