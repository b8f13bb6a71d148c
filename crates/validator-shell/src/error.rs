//! Error types: configuration failures and per-field validation messages

use std::collections::BTreeMap;
use std::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for validator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the validator itself.
///
/// Invalid input data is never reported here; it comes back as
/// [`ValidationResult::Failed`](crate::ValidationResult::Failed). These
/// variants signal a misconfigured validator or a caller bug.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{validator} has invalid rules")]
    InvalidRules { validator: String },

    #[error("{validator} does not have any rules")]
    EmptyRules { validator: String },

    #[error("{name} is not a valid validation error")]
    ErrorDoesNotExist { name: String },

    #[error("Failed to serialize validation data: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("Unsupported rule file format: {path}")]
    UnsupportedFormat { path: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    pub fn invalid_rules(validator: impl Into<String>) -> Self {
        Self::InvalidRules {
            validator: validator.into(),
        }
    }

    pub fn empty_rules(validator: impl Into<String>) -> Self {
        Self::EmptyRules {
            validator: validator.into(),
        }
    }

    /// Error for a lookup of a field that has no stored message
    pub fn error_does_not_exist(name: impl Into<String>) -> Self {
        Self::ErrorDoesNotExist { name: name.into() }
    }

    /// Whether this error comes from the rule set rather than a lookup or I/O
    pub fn is_rules_error(&self) -> bool {
        matches!(self, Self::InvalidRules { .. } | Self::EmptyRules { .. })
    }
}

/// Field name to error message mapping carried by a failed validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub const fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    /// Record a message for a field, replacing any earlier one
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    /// Builder-style variant of [`add_error`](Self::add_error)
    pub fn with_error(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.add_error(field, message);
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields with an error
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// Merge another collection into this one; messages from `other` win on conflict
    pub fn merge(&mut self, other: FieldErrors) {
        self.errors.extend(other.errors);
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.errors
    }

    /// Convert to a JSON-serializable format for API responses
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": "validation_failed",
                "message": "Validation failed",
                "fields": self.errors
            }
        })
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            write!(f, "No validation errors")
        } else {
            write!(f, "Validation failed for {} field(s):", self.errors.len())?;
            for (field, message) in &self.errors {
                write!(f, "\n  {}: {}", field, message)?;
            }
            Ok(())
        }
    }
}

impl From<BTreeMap<String, String>> for FieldErrors {
    fn from(errors: BTreeMap<String, String>) -> Self {
        Self { errors }
    }
}

impl<K, V> FromIterator<(K, V)> for FieldErrors
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            errors: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
