//! Closure-backed rule engine

use crate::result::ValidationResult;
use crate::rules::RuleSet;
use crate::traits::{FieldData, RuleEngine};
use serde_json::Value;
use std::sync::Arc;

/// Shared check function used by [`FnEngine`]
pub type CheckFn<R> = Arc<dyn Fn(&RuleSet<R>, &FieldData) -> ValidationResult + Send + Sync>;

/// Rule engine built from a closure, for hosts that don't need a dedicated type
pub struct FnEngine<R = Value> {
    name: String,
    check: CheckFn<R>,
}

impl<R> FnEngine<R> {
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&RuleSet<R>, &FieldData) -> ValidationResult + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }
}

impl<R> Clone for FnEngine<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            check: Arc::clone(&self.check),
        }
    }
}

impl<R> std::fmt::Debug for FnEngine<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnEngine").field("name", &self.name).finish()
    }
}

impl<R> RuleEngine for FnEngine<R> {
    type Rule = R;

    fn check_data(&self, rules: &RuleSet<R>, data: &FieldData) -> ValidationResult {
        (self.check)(rules, data)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldErrors;

    fn required_engine() -> FnEngine<String> {
        FnEngine::new("RequiredEngine", |rules: &RuleSet<String>, data: &FieldData| {
            let errors: FieldErrors = rules
                .iter()
                .filter(|(_, rule)| rule.as_str() == "required")
                .filter(|(field, _)| data.get(*field).map_or(true, Value::is_null))
                .map(|(field, _)| (field, format!("{} is required", field)))
                .collect();

            if errors.is_empty() {
                ValidationResult::passed()
            } else {
                ValidationResult::failed(errors)
            }
        })
    }

    #[test]
    fn test_fn_engine_uses_given_name() {
        let engine = required_engine();
        assert_eq!(engine.name(), "RequiredEngine");
        assert_eq!(format!("{:?}", engine), r#"FnEngine { name: "RequiredEngine" }"#);
    }

    #[test]
    fn test_fn_engine_delegates_to_closure() {
        let rules = RuleSet::new().field("name", "required");
        let engine = required_engine();

        let result = engine.check_data(&rules, &FieldData::new());
        assert_eq!(result.error("name").unwrap(), "name is required");

        let mut data = FieldData::new();
        data.insert("name".to_string(), Value::from("Bob"));
        assert!(engine.check_data(&rules, &data).passes());
    }

    #[test]
    fn test_fn_engine_clones_share_closure() {
        let engine = required_engine();
        let cloned = engine.clone();
        assert_eq!(Arc::strong_count(&engine.check), 2);
        assert_eq!(cloned.name(), engine.name());
    }
}
