//! Tool configuration (`conf`) values.
//!
//! Conf entries are namespaced `section:key` strings supplied by profiles, the
//! command line, or the environment. The recipe reads only the skip policy.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::options::{parse_bool, split_assignment};

/// When true, configure and build are skipped; packaging is still allowed.
pub const SKIP_TEST: &str = "tools.build:skip_test";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfError {
    #[error("Malformed conf entry '{0}', expected section:key=value")]
    Malformed(String),

    #[error("Conf '{key}' expects a boolean, got '{value}'")]
    InvalidBool { key: String, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conf {
    values: BTreeMap<String, String>,
}

impl Conf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Parse and store one `section:key=value` entry.
    pub fn set_entry(&mut self, entry: &str) -> Result<(), ConfError> {
        let (key, value) =
            split_assignment(entry).ok_or_else(|| ConfError::Malformed(entry.to_string()))?;
        if !key.contains(':') {
            return Err(ConfError::Malformed(entry.to_string()));
        }
        self.set(key, value);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn get_bool(&self, key: &str, default: bool) -> Result<bool, ConfError> {
        match self.get(key) {
            None => Ok(default),
            Some(value) => parse_bool(value).ok_or_else(|| ConfError::InvalidBool {
                key: key.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// The skip policy (`tools.build:skip_test`, default false).
    pub fn skip_test(&self) -> Result<bool, ConfError> {
        self.get_bool(SKIP_TEST, false)
    }

    /// Entries from `other` take precedence.
    pub fn merge(&mut self, other: &Self) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
