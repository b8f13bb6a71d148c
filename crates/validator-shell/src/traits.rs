//! Extension points: the rule engine hook and the object-safe validator facade

use crate::error::Result;
use crate::result::ValidationResult;
use crate::rules::RuleSet;
use serde_json::Value;
use std::collections::HashMap;

/// Input data for one validation call, keyed by field name
pub type FieldData = HashMap<String, Value>;

/// The check hook a host framework implements.
///
/// The orchestrator has already checked the rule set and filtered the input
/// when `check_data` runs, so `data` only holds fields that have a rule.
/// Invalid data must be reported as [`ValidationResult::Failed`], never by
/// panicking.
pub trait RuleEngine {
    /// Rule specification understood by this engine
    type Rule;

    /// Run the framework's rules against the filtered data
    fn check_data(&self, rules: &RuleSet<Self::Rule>, data: &FieldData) -> ValidationResult;

    /// Name used in diagnostics and rule-set errors
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Object-safe validation entry point.
///
/// Lets a host keep validators for different engines behind
/// `Box<dyn ValidateData>`.
pub trait ValidateData {
    fn validator_name(&self) -> &str;

    /// Validate `data`, yielding a passed result with no data on success
    fn validate(&self, data: &FieldData) -> Result<ValidationResult>;

    /// Validate `data` and, on success, keep what `callback` returns for the filtered data
    fn validate_with_fn(
        &self,
        data: &FieldData,
        callback: &dyn Fn(&FieldData) -> Value,
    ) -> Result<ValidationResult>;
}

impl<T: ValidateData + ?Sized> ValidateData for Box<T> {
    fn validator_name(&self) -> &str {
        (**self).validator_name()
    }

    fn validate(&self, data: &FieldData) -> Result<ValidationResult> {
        (**self).validate(data)
    }

    fn validate_with_fn(
        &self,
        data: &FieldData,
        callback: &dyn Fn(&FieldData) -> Value,
    ) -> Result<ValidationResult> {
        (**self).validate_with_fn(data, callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldErrors;

    struct EmailEngine;

    impl RuleEngine for EmailEngine {
        type Rule = String;

        fn check_data(&self, _rules: &RuleSet<String>, data: &FieldData) -> ValidationResult {
            match data.get("email").and_then(Value::as_str) {
                Some(email) if email.contains('@') => ValidationResult::passed(),
                _ => ValidationResult::failed(
                    FieldErrors::new().with_error("email", "invalid format"),
                ),
            }
        }
    }

    #[test]
    fn test_default_engine_name_is_type_name() {
        assert!(EmailEngine.name().ends_with("EmailEngine"));
    }

    #[test]
    fn test_engine_check_data() {
        let rules = RuleSet::new().field("email", "email");

        let mut data = FieldData::new();
        data.insert("email".to_string(), Value::String("invalid-email".to_string()));

        let result = EmailEngine.check_data(&rules, &data);
        assert!(!result.passes());
        assert_eq!(result.error("email").unwrap(), "invalid format");

        data.insert("email".to_string(), Value::String("bob@example.com".to_string()));
        assert!(EmailEngine.check_data(&rules, &data).passes());
    }
}
