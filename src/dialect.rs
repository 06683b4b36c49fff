//! Dialect configuration.
//!
//! A dialect is one configuration-file format. Dialects share the diagnostics
//! pipeline and differ only in the event prefix they listen on, the template
//! table they format with, and whether `anyOf` failures are combined.

use serde::Deserialize;
use serde_json::Value;

use crate::event::{EventKind, EventName};
use crate::format::{FormatterChain, Template};

/// Event prefix of the babel-style config dialect.
pub const BABEL_PREFIX: &str = "babel-config";

/// Event prefix of the typescript-style config dialect.
pub const TYPESCRIPT_PREFIX: &str = "typescript-config";

/// Everything that distinguishes one dialect from another.
///
/// # Example
///
/// ```rust
/// use confcheck::{DialectConfig, Template};
///
/// let dialect = DialectConfig::new("jsconfig")
///     .with_template(Template::AdditionalProperties)
///     .with_template(Template::Type)
///     .with_disjunction(true);
///
/// assert_eq!(dialect.event_name(confcheck::EventKind::Json).to_string(), "jsconfig::error::json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialectConfig {
    event_prefix: String,
    chain: FormatterChain,
    supports_disjunction: bool,
}

impl DialectConfig {
    /// Creates a dialect with an empty template table and no `anyOf` combining.
    pub fn new(event_prefix: impl Into<String>) -> Self {
        Self {
            event_prefix: event_prefix.into(),
            chain: FormatterChain::default(),
            supports_disjunction: false,
        }
    }

    /// The babel-style config dialect: formats `additionalProperties`, `enum`
    /// and `type`.
    pub fn babel() -> Self {
        Self::new(BABEL_PREFIX).with_templates(vec![
            Template::AdditionalProperties,
            Template::Enum,
            Template::Type,
        ])
    }

    /// The typescript-style config dialect: formats `additionalProperties`,
    /// `enum` and `pattern`, and combines `anyOf` failures.
    pub fn typescript() -> Self {
        Self::new(TYPESCRIPT_PREFIX)
            .with_templates(vec![
                Template::AdditionalProperties,
                Template::Enum,
                Template::Pattern,
            ])
            .with_disjunction(true)
    }

    /// Replaces the template table.
    pub fn with_templates(mut self, templates: Vec<Template>) -> Self {
        self.chain = FormatterChain::new(templates);
        self
    }

    /// Appends one template to the end of the table.
    pub fn with_template(mut self, template: Template) -> Self {
        let mut templates = self.chain.templates().to_vec();
        templates.push(template);
        self.chain = FormatterChain::new(templates);
        self
    }

    /// Enables or disables `anyOf` combining.
    pub fn with_disjunction(mut self, enabled: bool) -> Self {
        self.supports_disjunction = enabled;
        self
    }

    /// Returns the event prefix.
    pub fn event_prefix(&self) -> &str {
        &self.event_prefix
    }

    /// Returns the template table.
    pub fn chain(&self) -> &FormatterChain {
        &self.chain
    }

    /// Returns whether `anyOf` failures are combined from their siblings.
    pub fn supports_disjunction(&self) -> bool {
        self.supports_disjunction
    }

    /// Returns the name of this dialect's event of `kind`.
    pub fn event_name(&self, kind: EventKind) -> EventName {
        EventName::new(self.event_prefix.clone(), kind)
    }
}

/// User options of a dialect rule.
///
/// Rules are always on and take no options: only `null` or an empty object
/// is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleOptions {}

impl RuleOptions {
    /// Parses rule options from host configuration.
    ///
    /// # Errors
    ///
    /// Returns the serde error if `value` carries any option.
    pub fn parse(value: &Value) -> Result<Self, serde_json::Error> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Keyword;
    use serde_json::json;

    #[test]
    fn test_babel_preset() {
        let babel = DialectConfig::babel();
        assert_eq!(babel.event_prefix(), "babel-config");
        assert!(babel.chain().handles(&Keyword::Type));
        assert!(!babel.chain().handles(&Keyword::Pattern));
        assert!(!babel.supports_disjunction());
    }

    #[test]
    fn test_typescript_preset() {
        let typescript = DialectConfig::typescript();
        assert_eq!(typescript.event_prefix(), "typescript-config");
        assert!(typescript.chain().handles(&Keyword::Pattern));
        assert!(!typescript.chain().handles(&Keyword::Type));
        assert!(typescript.supports_disjunction());
    }

    #[test]
    fn test_event_names() {
        let babel = DialectConfig::babel();
        assert_eq!(
            babel.event_name(EventKind::Json).to_string(),
            "babel-config::error::json"
        );
        assert_eq!(
            babel.event_name(EventKind::Schema).to_string(),
            "babel-config::error::schema"
        );
    }

    #[test]
    fn test_with_template_appends() {
        let dialect = DialectConfig::new("x")
            .with_template(Template::Enum)
            .with_template(Template::Type);
        assert_eq!(dialect.chain().templates(), &[Template::Enum, Template::Type]);
    }

    #[test]
    fn test_rule_options_accept_empty() {
        assert_eq!(RuleOptions::parse(&Value::Null).unwrap(), RuleOptions {});
        assert_eq!(RuleOptions::parse(&json!({})).unwrap(), RuleOptions {});
    }

    #[test]
    fn test_rule_options_reject_keys() {
        assert!(RuleOptions::parse(&json!({ "severity": "warning" })).is_err());
        assert!(RuleOptions::parse(&json!("on")).is_err());
    }
}
