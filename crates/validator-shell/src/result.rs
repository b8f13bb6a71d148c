//! Validation outcome: passed with data, or failed with field errors

use crate::error::{Error, FieldErrors, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

static EMPTY_DATA: Lazy<Value> = Lazy::new(|| Value::Object(Map::new()));
static NO_ERRORS: FieldErrors = FieldErrors::new();

/// Outcome of a single validation call.
///
/// Bad input is a `Failed` value, not an [`Error`]. A `Passed` result never
/// exposes null data: falsy payloads read, compare and serialize as an empty
/// mapping, however the value was built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ResultRepr", into = "ResultRepr")]
pub enum ValidationResult {
    Passed { data: Value },
    Failed { errors: FieldErrors },
}

/// Wire form of [`ValidationResult`]
#[derive(Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum ResultRepr {
    Passed { data: Value },
    Failed { errors: FieldErrors },
}

impl From<ResultRepr> for ValidationResult {
    fn from(repr: ResultRepr) -> Self {
        match repr {
            ResultRepr::Passed { data } => Self::passed_with(data),
            ResultRepr::Failed { errors } => Self::Failed { errors },
        }
    }
}

impl From<ValidationResult> for ResultRepr {
    fn from(result: ValidationResult) -> Self {
        match result {
            ValidationResult::Failed { errors } => Self::Failed { errors },
            passed => Self::Passed {
                data: passed.into_data(),
            },
        }
    }
}

impl PartialEq for ValidationResult {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Passed { .. }, Self::Passed { .. }) => self.data() == other.data(),
            (Self::Failed { errors: a }, Self::Failed { errors: b }) => a == b,
            _ => false,
        }
    }
}

impl ValidationResult {
    /// A passed result with no data
    pub fn passed() -> Self {
        Self::Passed {
            data: EMPTY_DATA.clone(),
        }
    }

    /// A passed result carrying `data`; falsy values become an empty mapping
    pub fn passed_with(data: impl Into<Value>) -> Self {
        let data = data.into();
        if is_falsy(&data) {
            Self::passed()
        } else {
            Self::Passed { data }
        }
    }

    /// A failed result; `errors` should name at least one field.
    ///
    /// An empty collection is still treated as a failure by the validator, so
    /// engines must not use it to signal success.
    pub fn failed(errors: impl Into<FieldErrors>) -> Self {
        let errors = errors.into();
        debug_assert!(!errors.is_empty(), "failed validation without field errors");
        Self::Failed { errors }
    }

    pub fn passes(&self) -> bool {
        match self {
            Self::Passed { .. } => true,
            Self::Failed { .. } => false,
        }
    }

    pub fn fails(&self) -> bool {
        !self.passes()
    }

    /// Every field error; empty for a passed result
    pub fn errors(&self) -> &FieldErrors {
        match self {
            Self::Passed { .. } => &NO_ERRORS,
            Self::Failed { errors } => errors,
        }
    }

    /// Data produced on success; an empty mapping otherwise
    pub fn data(&self) -> &Value {
        match self {
            Self::Passed { data } if !is_falsy(data) => data,
            _ => &EMPTY_DATA,
        }
    }

    /// Message stored for `name`.
    ///
    /// Fails with [`Error::ErrorDoesNotExist`] when the field has no error,
    /// which is always the case for a passed result.
    pub fn error(&self, name: &str) -> Result<&str> {
        match self {
            Self::Failed { errors } => errors
                .get(name)
                .ok_or_else(|| Error::error_does_not_exist(name)),
            Self::Passed { .. } => Err(Error::error_does_not_exist(name)),
        }
    }

    pub fn into_data(self) -> Value {
        match self {
            Self::Passed { data } if !is_falsy(&data) => data,
            _ => EMPTY_DATA.clone(),
        }
    }

    pub fn into_errors(self) -> FieldErrors {
        match self {
            Self::Passed { .. } => FieldErrors::new(),
            Self::Failed { errors } => errors,
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::passed()
    }
}

/// Falsy payloads: null, false, zero, `""`, `"0"`, and empty collections
pub(crate) fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(arr) => arr.is_empty(),
        Value::Object(obj) => obj.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_passed_defaults_to_empty_mapping() {
        assert_eq!(ValidationResult::passed().data(), &json!({}));
        assert_eq!(ValidationResult::passed_with(Value::Null).data(), &json!({}));
        assert_eq!(ValidationResult::passed_with(json!({})).data(), &json!({}));
        assert_eq!(ValidationResult::default().data(), &json!({}));
    }

    #[test]
    fn test_passed_normalizes_other_falsy_values() {
        for falsy in [json!(false), json!(0), json!(0.0), json!(""), json!("0"), json!([])] {
            assert_eq!(ValidationResult::passed_with(falsy).data(), &json!({}));
        }
    }

    #[test]
    fn test_passed_keeps_truthy_data_as_is() {
        assert_eq!(ValidationResult::passed_with(60).data(), &json!(60));
        assert_eq!(ValidationResult::passed_with("ok").data(), &json!("ok"));
        assert_eq!(
            ValidationResult::passed_with(json!({ "id": 7 })).data(),
            &json!({ "id": 7 })
        );
    }

    #[test]
    fn test_passed_has_no_errors() {
        let result = ValidationResult::passed_with(json!({ "id": 7 }));
        assert!(result.passes());
        assert!(!result.fails());
        assert!(result.errors().is_empty());

        for name in ["id", "email", ""] {
            assert!(matches!(
                result.error(name),
                Err(Error::ErrorDoesNotExist { name: n }) if n == name
            ));
        }
    }

    #[test]
    fn test_failed_exposes_errors() {
        let errors = FieldErrors::new().with_error("email", "invalid format");
        let result = ValidationResult::failed(errors);

        assert!(!result.passes());
        assert_eq!(
            result.errors(),
            &FieldErrors::new().with_error("email", "invalid format")
        );
        assert_eq!(result.error("email").unwrap(), "invalid format");
        assert_eq!(result.data(), &json!({}));

        let err = result.error("missing_field").unwrap_err();
        assert!(matches!(err, Error::ErrorDoesNotExist { .. }));
        assert!(err.to_string().contains("missing_field"));
    }

    #[test]
    fn test_direct_variant_construction_still_hides_null_data() {
        let result = ValidationResult::Passed { data: Value::Null };
        assert_eq!(result.data(), &json!({}));
        assert_eq!(result.into_data(), json!({}));
    }

    #[test]
    fn test_deserialized_falsy_data_is_normalized() {
        for falsy in [Value::Null, json!(0), json!(false), json!("")] {
            let result: ValidationResult =
                serde_json::from_value(json!({ "status": "passed", "data": falsy })).unwrap();

            assert_eq!(result, ValidationResult::passed());
            assert_eq!(
                serde_json::to_value(&result).unwrap(),
                json!({ "status": "passed", "data": {} })
            );
        }
    }

    #[test]
    fn test_direct_null_data_serializes_and_compares_as_empty() {
        let result = ValidationResult::Passed { data: Value::Null };

        assert_eq!(result, ValidationResult::passed());
        assert_eq!(ValidationResult::Passed { data: json!(0) }, ValidationResult::passed_with(0));
        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            r#"{"status":"passed","data":{}}"#
        );
    }

    #[test]
    fn test_passed_and_failed_never_compare_equal() {
        let failed = ValidationResult::failed(FieldErrors::new().with_error("age", "required"));
        assert_ne!(failed, ValidationResult::passed());
    }

    #[test]
    fn test_into_errors() {
        let errors = FieldErrors::new().with_error("age", "required");
        assert_eq!(ValidationResult::failed(errors.clone()).into_errors(), errors);
        assert!(ValidationResult::passed_with(5).into_errors().is_empty());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "failed validation without field errors")]
    fn test_failed_requires_at_least_one_error() {
        let _ = ValidationResult::failed(FieldErrors::new());
    }

    #[test]
    fn test_result_serialization_is_tagged() {
        let failed = ValidationResult::failed(FieldErrors::new().with_error("age", "required"));
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({ "status": "failed", "errors": { "age": "required" } })
        );

        let passed: ValidationResult =
            serde_json::from_value(json!({ "status": "passed", "data": 60 })).unwrap();
        assert_eq!(passed, ValidationResult::passed_with(60));
    }
}
