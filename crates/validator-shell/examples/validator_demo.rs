//! Walkthrough of the validator shell with a small string-rule engine

use serde_json::{json, Value};
use validator_shell::{
    FieldData, FieldErrors, FnEngine, RuleEngine, RuleSet, ValidateData, ValidationResult,
    Validator,
};

/// Toy engine understanding `required`, `integer` and `email` rules
#[derive(Debug, Clone)]
struct SimpleRules;

impl RuleEngine for SimpleRules {
    type Rule = String;

    fn check_data(&self, rules: &RuleSet<String>, data: &FieldData) -> ValidationResult {
        let mut errors = FieldErrors::new();

        for (field, rule) in rules.iter() {
            let value = data.get(field).cloned().unwrap_or(Value::Null);
            let ok = match rule.as_str() {
                "required" => !value.is_null(),
                "integer" => value.is_i64(),
                "email" => value.as_str().map_or(false, |s| s.contains('@')),
                _ => true,
            };
            if !ok {
                errors.add_error(field, format!("{} failed the {} rule", field, rule));
            }
        }

        if errors.is_empty() {
            ValidationResult::passed()
        } else {
            ValidationResult::failed(errors)
        }
    }

    fn name(&self) -> &str {
        "SimpleRules"
    }
}

fn data(value: Value) -> Result<FieldData, serde_json::Error> {
    serde_json::from_value(value)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("validator_shell=debug")
        .init();

    println!("🦀 validator-shell Demo");
    println!("========================\n");

    demo_filtering()?;
    demo_callbacks()?;
    demo_failures()?;
    demo_misconfiguration()?;
    demo_rule_files()?;

    println!("✅ All validator demos completed successfully!");
    Ok(())
}

fn demo_filtering() -> Result<(), Box<dyn std::error::Error>> {
    println!("📝 Demo 1: Input Filtering");
    println!("--------------------------");

    let validator = Validator::new(SimpleRules, RuleSet::new().field("age", "integer"));
    let result = validator.validate_with(&data(json!({ "age": 30, "name": "Bob" }))?, |filtered| {
        filtered.clone()
    })?;

    println!("  Fields reaching the engine: {}", result.data());
    println!();
    Ok(())
}

fn demo_callbacks() -> Result<(), Box<dyn std::error::Error>> {
    println!("📝 Demo 2: Success Callbacks");
    println!("----------------------------");

    let validator = Validator::new(SimpleRules, RuleSet::new().field("age", "integer"));
    let input = data(json!({ "age": 30 }))?;

    let plain = validator.validate(&input)?;
    println!("  Without callback: passes={} data={}", plain.passes(), plain.data());

    let doubled = validator.validate_with(&input, |filtered| {
        filtered["age"].as_i64().map(|age| age * 2)
    })?;
    println!("  With callback:    passes={} data={}", doubled.passes(), doubled.data());
    println!();
    Ok(())
}

fn demo_failures() -> Result<(), Box<dyn std::error::Error>> {
    println!("📝 Demo 3: Failed Validation");
    println!("----------------------------");

    let signup = Validator::new(
        SimpleRules,
        RuleSet::new().field("email", "email").field("name", "required"),
    );
    let result = signup.validate(&data(json!({ "email": "not-an-email" }))?)?;

    match &result {
        ValidationResult::Passed { .. } => println!("  ❌ Invalid signup should fail"),
        ValidationResult::Failed { errors } => {
            for (field, message) in errors.iter() {
                println!("  ✅ {}: {}", field, message);
            }
        }
    }

    match result.error("password") {
        Ok(message) => println!("  ❌ Unexpected error for password: {}", message),
        Err(err) => println!("  ✅ Lookup of a field without errors: {}", err),
    }

    println!("  API payload: {}", result.errors().to_json());
    println!();
    Ok(())
}

fn demo_misconfiguration() -> Result<(), Box<dyn std::error::Error>> {
    println!("📝 Demo 4: Misconfigured Validators");
    println!("-----------------------------------");

    let validators: Vec<Box<dyn ValidateData>> = vec![
        Box::new(Validator::without_rules(SimpleRules)),
        Box::new(Validator::new(SimpleRules, RuleSet::new())),
        Box::new(Validator::new(
            FnEngine::new("AcceptAll", |_: &RuleSet, _: &FieldData| ValidationResult::passed()),
            RuleSet::new().field("anything", json!(null)),
        )),
    ];

    for validator in &validators {
        match validator.validate(&FieldData::new()) {
            Ok(result) => {
                println!("  ✅ {} passes={}", validator.validator_name(), result.passes())
            }
            Err(err) => println!("  ⚠️  {}", err),
        }
    }
    println!();
    Ok(())
}

fn demo_rule_files() -> Result<(), Box<dyn std::error::Error>> {
    println!("📝 Demo 5: Rules From Configuration");
    println!("-----------------------------------");

    let rules: RuleSet<String> = RuleSet::from_yaml_str("age: integer\nemail: email\n")?;
    let base = Validator::new(SimpleRules, RuleSet::new().field("age", "integer"));
    let loaded = base.rules(rules);

    println!("  Loaded validator: {:?}", loaded);
    let result = loaded.validate(&data(json!({ "age": 41, "email": "ada@example.com" }))?)?;
    println!("  Result: {}", serde_json::to_string(&result)?);
    println!();
    Ok(())
}
