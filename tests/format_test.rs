//! Integration tests for message templates and `anyOf` combining.

use confcheck::{combine_disjunction, DialectConfig, FormatterChain, Keyword, RawValidationError};
use proptest::prelude::*;
use serde_json::json;

fn typescript_chain() -> FormatterChain {
    DialectConfig::typescript().chain().clone()
}

fn babel_chain() -> FormatterChain {
    DialectConfig::babel().chain().clone()
}

#[test]
fn test_additional_properties_scenario() {
    let error: RawValidationError = serde_json::from_value(json!({
        "dataPath": "/compilerOptions",
        "keyword": "additionalProperties",
        "message": "should NOT have additional properties",
        "params": { "additionalProperty": "invalidProperty" }
    }))
    .unwrap();

    assert_eq!(
        typescript_chain().format(&error),
        "'compilerOptions' should NOT have additional properties. Additional property found 'invalidProperty'."
    );
}

#[test]
fn test_enum_from_validator_json() {
    let error: RawValidationError = serde_json::from_value(json!({
        "dataPath": ".presets[0]",
        "keyword": "enum",
        "message": "should be equal to one of the allowed values",
        "params": { "allowedValues": ["env", "react", "flow"] },
        "data": "preact"
    }))
    .unwrap();

    assert_eq!(
        babel_chain().format(&error),
        "'presets[0]' should be equal to one of the allowed values 'env, react, flow'. Value found 'preact'"
    );
}

#[test]
fn test_type_only_in_babel() {
    let error = RawValidationError::new(".comments", Keyword::Type, r#"should be "boolean""#);

    assert_eq!(babel_chain().format(&error), "'comments' should be 'boolean'.");
    assert_eq!(typescript_chain().format(&error), r#"should be "boolean""#);
}

#[test]
fn test_pattern_only_in_typescript() {
    let error = RawValidationError::new(
        "/compilerOptions/target",
        Keyword::Pattern,
        r#"should match pattern "^([Ee][Ss]([356]|next))$""#,
    )
    .with_data("es4");

    assert_eq!(
        typescript_chain().format(&error),
        "'compilerOptions/target' should match pattern '^([Ee][Ss]([356]|next))$'. Value found 'es4'"
    );
    assert_eq!(babel_chain().format(&error), error.message);
}

#[test]
fn test_any_of_scenario() {
    let enum_error = RawValidationError::new(
        "/compilerOptions/target",
        Keyword::Enum,
        "should be equal to one of the allowed values",
    )
    .with_allowed_values(["es3", "es5", "es2015"])
    .with_data("es4");
    let pattern_error = RawValidationError::new(
        "/compilerOptions/target",
        Keyword::Pattern,
        r#"should match pattern "^([Ee][Ss]([356]|next))$""#,
    )
    .with_data("es4");
    let any_of_error = RawValidationError::new(
        "/compilerOptions/target",
        Keyword::AnyOf,
        "should match some schema in anyOf",
    );

    let chain = typescript_chain();
    let errors = vec![enum_error.clone(), pattern_error.clone(), any_of_error];

    assert_eq!(
        combine_disjunction(&chain, &errors, 2),
        format!(
            "{} or {}",
            chain.format(&enum_error),
            chain.format(&pattern_error)
        )
    );
}

fn keyword_strategy() -> impl Strategy<Value = Keyword> {
    prop_oneof![
        Just(Keyword::AdditionalProperties),
        Just(Keyword::Enum),
        Just(Keyword::Type),
        Just(Keyword::Pattern),
        Just(Keyword::AnyOf),
        "[a-z]{1,12}".prop_map(|name| Keyword::from_name(&name)),
    ]
}

fn error_strategy() -> impl Strategy<Value = RawValidationError> {
    (
        "(/[a-zA-Z]{1,8}){0,3}",
        keyword_strategy(),
        "[a-zA-Z \"]{0,40}",
        prop::option::of("[a-zA-Z]{1,10}"),
        prop::collection::vec("[a-z0-9]{1,6}", 0..4),
        "[a-z0-9]{0,8}",
    )
        .prop_map(|(path, keyword, message, property, allowed, data)| {
            let error = RawValidationError::new(path, keyword.clone(), message).with_data(data);
            match (keyword, property) {
                (Keyword::AdditionalProperties, Some(name)) => {
                    error.with_additional_property(name)
                }
                (Keyword::Enum, _) if !allowed.is_empty() => error.with_allowed_values(allowed),
                _ => error,
            }
        })
}

proptest! {
    /// Formatting the same record twice yields identical text.
    #[test]
    fn format_is_idempotent(error in error_strategy()) {
        let chain = typescript_chain();
        prop_assert_eq!(chain.format(&error), chain.format(&error));
    }

    /// Keywords without a template come back as the validator's message.
    #[test]
    fn unhandled_keyword_is_identity(name in "[a-z]{1,12}", message in ".{0,40}") {
        let keyword = Keyword::from_name(&name);
        prop_assume!(!typescript_chain().handles(&keyword));

        let error = RawValidationError::new("/x", keyword, message.clone());
        prop_assert_eq!(typescript_chain().format(&error), message);
    }

    /// Enum text keeps the validator's value order.
    #[test]
    fn enum_preserves_allowed_order(values in prop::collection::vec("[a-z]{1,6}", 1..6)) {
        let error = RawValidationError::new("/target", Keyword::Enum, "should be one of")
            .with_allowed_values(values.clone())
            .with_data("x");

        prop_assert_eq!(
            babel_chain().format(&error),
            format!("'target' should be one of '{}'. Value found 'x'", values.join(", "))
        );
    }
}
