//! # validator-shell
//!
//! Framework-agnostic validation orchestration. A [`Validator`] owns a rule
//! set, filters incoming data down to the fields those rules cover, hands the
//! result to a host-supplied [`RuleEngine`] and returns a [`ValidationResult`].
//!
//! The crate ships no rule syntax and no rule evaluation; those belong to the
//! engine. Invalid input comes back as [`ValidationResult::Failed`], while a
//! misconfigured validator is reported through [`Error`].

pub mod engine;
pub mod error;
pub mod result;
pub mod rules;
pub mod traits;
pub mod validator;

// Re-exports for easy access
pub use engine::{CheckFn, FnEngine};
pub use error::{Error, FieldErrors, Result};
pub use result::ValidationResult;
pub use rules::RuleSet;
pub use traits::{FieldData, RuleEngine, ValidateData};
pub use validator::{filter_data_without_rules, Validator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_imports() {
        let _errors = FieldErrors::new();
        let _rules: RuleSet = RuleSet::new();
        let _result = ValidationResult::passed();
    }
}
