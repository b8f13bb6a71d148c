//! Rule sets: field name to opaque rule specification

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Mapping from field name to a rule specification.
///
/// The rule type is opaque to the orchestrator; its shape belongs to the
/// [`RuleEngine`](crate::RuleEngine) that evaluates it. Only the keys matter
/// here, since they decide which input fields reach the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet<R = Value> {
    rules: BTreeMap<String, R>,
}

impl<R> RuleSet<R> {
    /// Create a new empty rule set
    pub fn new() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Add a rule for a field, replacing any earlier rule for it
    pub fn field(mut self, field: impl Into<String>, rule: impl Into<R>) -> Self {
        self.insert(field, rule);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, rule: impl Into<R>) -> Option<R> {
        self.rules.insert(field.into(), rule.into())
    }

    pub fn get(&self, field: &str) -> Option<&R> {
        self.rules.get(field)
    }

    /// Check whether a field has a rule
    pub fn contains(&self, field: &str) -> bool {
        self.rules.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// All field names that have a rule
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &R)> {
        self.rules.iter().map(|(field, rule)| (field.as_str(), rule))
    }
}

impl<R: DeserializeOwned> RuleSet<R> {
    /// Parse a rule set from a JSON object
    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Parse a rule set from a YAML mapping
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Load a rule set from a `.json`, `.yaml` or `.yml` file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let rules = match extension.as_deref() {
            Some("json") => Self::from_json_str(&std::fs::read_to_string(path)?)?,
            Some("yaml") | Some("yml") => Self::from_yaml_str(&std::fs::read_to_string(path)?)?,
            _ => {
                return Err(Error::UnsupportedFormat {
                    path: path.display().to_string(),
                })
            }
        };

        tracing::debug!(path = %path.display(), fields = rules.len(), "Loaded rule set");
        Ok(rules)
    }
}

impl<R> Default for RuleSet<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> From<BTreeMap<String, R>> for RuleSet<R> {
    fn from(rules: BTreeMap<String, R>) -> Self {
        Self { rules }
    }
}

impl<R> From<HashMap<String, R>> for RuleSet<R> {
    fn from(rules: HashMap<String, R>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }
}

impl<K, R> FromIterator<(K, R)> for RuleSet<R>
where
    K: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, R)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().map(|(k, r)| (k.into(), r)).collect(),
        }
    }
}
