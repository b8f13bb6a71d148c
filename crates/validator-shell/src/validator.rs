//! The validation orchestrator

use crate::error::{Error, Result};
use crate::result::ValidationResult;
use crate::rules::RuleSet;
use crate::traits::{FieldData, RuleEngine, ValidateData};
use serde::Serialize;
use serde_json::Value;

/// Owns a rule set and runs validation calls through a [`RuleEngine`].
///
/// Each call checks the rule set, drops input fields without a rule, hands
/// the rest to the engine and wraps the outcome. The rule set is fixed at
/// construction; [`rules`](Self::rules) builds a new validator instead of
/// mutating this one.
pub struct Validator<E: RuleEngine> {
    engine: E,
    rules: Option<RuleSet<E::Rule>>,
}

impl<E: RuleEngine> Validator<E> {
    pub fn new(engine: E, rules: RuleSet<E::Rule>) -> Self {
        Self {
            engine,
            rules: Some(rules),
        }
    }

    /// A validator with no rule set; every call fails with [`Error::InvalidRules`]
    pub fn without_rules(engine: E) -> Self {
        Self { engine, rules: None }
    }

    pub fn with_optional_rules(engine: E, rules: Option<RuleSet<E::Rule>>) -> Self {
        Self { engine, rules }
    }

    /// New validator for the same engine loaded with `rules`
    pub fn rules(&self, rules: RuleSet<E::Rule>) -> Self
    where
        E: Clone,
    {
        Self::new(self.engine.clone(), rules)
    }

    pub fn rule_set(&self) -> Option<&RuleSet<E::Rule>> {
        self.rules.as_ref()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn name(&self) -> &str {
        self.engine.name()
    }

    /// Ensure the rule set is present and non-empty
    pub fn check_rules(&self) -> Result<&RuleSet<E::Rule>> {
        let Some(rules) = self.rules.as_ref() else {
            tracing::warn!(validator = self.name(), "Validator has no rule set");
            return Err(Error::invalid_rules(self.name()));
        };

        if rules.is_empty() {
            tracing::warn!(validator = self.name(), "Validator has an empty rule set");
            return Err(Error::empty_rules(self.name()));
        }

        Ok(rules)
    }

    /// Validate `data`; a passed result carries no data
    pub fn validate(&self, data: &FieldData) -> Result<ValidationResult> {
        self.run(data, None::<fn(&FieldData) -> Value>)
    }

    /// Validate `data` and, on success, carry the callback's output for the filtered data.
    ///
    /// The callback output replaces whatever data the engine's own passed
    /// result held. It is not called when validation fails.
    pub fn validate_with<F, T>(&self, data: &FieldData, callback: F) -> Result<ValidationResult>
    where
        F: FnOnce(&FieldData) -> T,
        T: Serialize,
    {
        self.run(data, Some(callback))
    }

    fn run<F, T>(&self, data: &FieldData, callback: Option<F>) -> Result<ValidationResult>
    where
        F: FnOnce(&FieldData) -> T,
        T: Serialize,
    {
        let rules = self.check_rules()?;
        let filtered = filter_data_without_rules(data, rules);

        tracing::debug!(
            validator = self.name(),
            received = data.len(),
            checked = filtered.len(),
            "Validating data"
        );
        if filtered.len() < data.len() {
            let mut dropped: Vec<&str> = data
                .keys()
                .filter(|field| !rules.contains(field))
                .map(String::as_str)
                .collect();
            dropped.sort_unstable();
            tracing::debug!(validator = self.name(), ?dropped, "Dropped fields without rules");
        }

        match self.engine.check_data(rules, &filtered) {
            failed @ ValidationResult::Failed { .. } => {
                tracing::debug!(
                    validator = self.name(),
                    failed_fields = failed.errors().len(),
                    "Validation failed"
                );
                Ok(failed)
            }
            ValidationResult::Passed { .. } => {
                tracing::debug!(validator = self.name(), "Validation passed");
                match callback {
                    Some(callback) => {
                        let output = serde_json::to_value(callback(&filtered))
                            .map_err(Error::Serialization)?;
                        Ok(ValidationResult::passed_with(output))
                    }
                    None => Ok(ValidationResult::passed()),
                }
            }
        }
    }
}

/// Keep only the fields of `data` that have a rule in `rules`
pub fn filter_data_without_rules<R>(data: &FieldData, rules: &RuleSet<R>) -> FieldData {
    data.iter()
        .filter(|(field, _)| rules.contains(field))
        .map(|(field, value)| (field.clone(), value.clone()))
        .collect()
}

impl<E> Clone for Validator<E>
where
    E: RuleEngine + Clone,
    E::Rule: Clone,
{
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            rules: self.rules.clone(),
        }
    }
}

impl<E: RuleEngine> std::fmt::Debug for Validator<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("engine", &self.name())
            .field(
                "fields",
                &self.rules.as_ref().map(|rules| rules.fields().collect::<Vec<_>>()),
            )
            .finish()
    }
}

impl<E: RuleEngine> ValidateData for Validator<E> {
    fn validator_name(&self) -> &str {
        self.name()
    }

    fn validate(&self, data: &FieldData) -> Result<ValidationResult> {
        Validator::validate(self, data)
    }

    fn validate_with_fn(
        &self,
        data: &FieldData,
        callback: &dyn Fn(&FieldData) -> Value,
    ) -> Result<ValidationResult> {
        self.run(data, Some(|filtered: &FieldData| callback(filtered)))
    }
}
