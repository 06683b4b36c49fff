//! Engine configuration.
//!
//! Hosts hand the engine a small JSON document:
//!
//! ```json
//! { "channelCapacity": 64, "rules": { "babel-config": {}, "typescript-config": null } }
//! ```
//!
//! Every listed rule must accept its options (see [`RuleOptions`]); listing a
//! rule does not enable or disable anything, since dialect rules are always on.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::dialect::RuleOptions;

/// Default capacity of the inbound event channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Configuration of a [`DiagnosticsEngine`](crate::DiagnosticsEngine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Capacity of the bounded event channel.
    pub channel_capacity: usize,
    /// Validated options per dialect prefix, in document order.
    pub rules: IndexMap<String, RuleOptions>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            rules: IndexMap::new(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawEngineConfig {
    #[serde(default = "default_capacity")]
    channel_capacity: usize,
    #[serde(default)]
    rules: IndexMap<String, Value>,
}

fn default_capacity() -> usize {
    DEFAULT_CHANNEL_CAPACITY
}

/// Errors that can occur while loading engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON or has unexpected fields.
    #[error("invalid engine configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A rule was given options it does not accept.
    #[error("rule '{rule}' accepts no options: {source}")]
    RuleOptions {
        /// The dialect prefix of the rule.
        rule: String,
        /// Why the options were refused.
        #[source]
        source: serde_json::Error,
    },

    /// The event channel needs room for at least one event.
    #[error("channel capacity must be at least 1")]
    ZeroCapacity,
}

impl EngineConfig {
    /// Parses configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the text is malformed, a rule carries
    /// options, or the channel capacity is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use confcheck::EngineConfig;
    ///
    /// let config = EngineConfig::from_json_str(r#"{ "rules": { "babel-config": {} } }"#).unwrap();
    /// assert_eq!(config.channel_capacity, 64);
    /// assert!(config.rules.contains_key("babel-config"));
    ///
    /// assert!(EngineConfig::from_json_str(r#"{ "rules": { "babel-config": { "level": 1 } } }"#).is_err());
    /// ```
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Parses configuration from an already-decoded JSON value.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let raw: RawEngineConfig = serde_json::from_value(value)?;

        if raw.channel_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        let mut rules = IndexMap::with_capacity(raw.rules.len());
        for (rule, options) in raw.rules {
            match RuleOptions::parse(&options) {
                Ok(parsed) => {
                    rules.insert(rule, parsed);
                }
                Err(source) => return Err(ConfigError::RuleOptions { rule, source }),
            }
        }

        Ok(Self {
            channel_capacity: raw.channel_capacity,
            rules,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::from_value(json!({})).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_rules_keep_document_order() {
        let config = EngineConfig::from_value(json!({
            "channelCapacity": 8,
            "rules": { "typescript-config": null, "babel-config": {} }
        }))
        .unwrap();

        assert_eq!(config.channel_capacity, 8);
        let names: Vec<_> = config.rules.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["typescript-config", "babel-config"]);
    }

    #[test]
    fn test_rule_options_rejected() {
        let error = EngineConfig::from_value(json!({
            "rules": { "babel-config": { "severity": "off" } }
        }))
        .unwrap_err();

        match error {
            ConfigError::RuleOptions { rule, .. } => assert_eq!(rule, "babel-config"),
            other => panic!("expected rule options error, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let error = EngineConfig::from_value(json!({ "channelCapacity": 0 })).unwrap_err();
        assert!(matches!(error, ConfigError::ZeroCapacity));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            EngineConfig::from_json_str(r#"{ "workers": 4 }"#),
            Err(ConfigError::Parse(_))
        ));
    }
}
