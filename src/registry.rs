//! Rule registry for routing named events to dialect rules.
//!
//! This module provides the [`RuleRegistry`] type that stores dialect rules by
//! event prefix and dispatches the parser's named events to the rule that
//! subscribes to them.

use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

use crate::engine::EngineError;
use crate::event::{DialectEvent, EventName, NamedEvent};
use crate::rule::DialectRule;

/// Type alias for the rule storage map.
type RuleMap = Arc<RwLock<IndexMap<String, DialectRule>>>;

/// A thread-safe registry of dialect rules keyed by event prefix.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>`:
/// - Dispatch from many tasks takes read access only
/// - Registration is serialized (write access)
///
/// Clones share the same rules.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use confcheck::{CollectingSink, DialectConfig, DialectRule, RuleRegistry};
///
/// let sink = Arc::new(CollectingSink::new());
/// let registry = RuleRegistry::new();
///
/// registry.register(DialectRule::new(DialectConfig::babel(), sink.clone())).unwrap();
/// registry.register(DialectRule::new(DialectConfig::typescript(), sink.clone())).unwrap();
///
/// // Duplicate prefixes are refused
/// assert!(registry.register(DialectRule::new(DialectConfig::babel(), sink)).is_err());
/// assert_eq!(registry.prefixes(), vec!["babel-config", "typescript-config"]);
/// ```
#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: RuleMap,
}

impl RuleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule under its dialect's event prefix.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicatePrefix` if a rule already listens on
    /// the same prefix.
    pub fn register(&self, rule: DialectRule) -> Result<(), RegistryError> {
        let prefix = rule.event_prefix().to_string();
        let mut rules = self.rules.write();

        if rules.contains_key(&prefix) {
            return Err(RegistryError::DuplicatePrefix(prefix));
        }

        debug!(dialect = %prefix, "registered dialect rule");
        rules.insert(prefix, rule);
        Ok(())
    }

    /// Retrieves the rule for an event prefix.
    pub fn get(&self, prefix: &str) -> Option<DialectRule> {
        self.rules.read().get(prefix).cloned()
    }

    /// Returns the registered prefixes in registration order.
    pub fn prefixes(&self) -> Vec<String> {
        self.rules.read().keys().cloned().collect()
    }

    /// Returns the number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.read().len()
    }

    /// Returns true if no rule is registered.
    pub fn is_empty(&self) -> bool {
        self.rules.read().is_empty()
    }

    /// Routes a named event to its rule.
    ///
    /// Returns `Ok(None)` when no rule listens on the event's prefix, otherwise
    /// the number of diagnostics the rule reported.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Event` if the name or payload is malformed and
    /// `EngineError::Report` if the sink rejected diagnostics.
    pub async fn dispatch(&self, event: NamedEvent) -> Result<Option<usize>, EngineError> {
        let name = EventName::parse(&event.name)?;

        // The lock guard must not be held across the await below.
        let Some(rule) = self.get(name.prefix()) else {
            debug!(event = %event.name, "no rule registered for event");
            return Ok(None);
        };

        let event = DialectEvent::decode(&name, event.payload)?;
        let reported = rule.handle(event).await?;
        Ok(Some(reported))
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("prefixes", &self.prefixes())
            .finish()
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a rule for a prefix that already has one.
    #[error("a rule for '{0}' is already registered")]
    DuplicatePrefix(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::DialectConfig;
    use crate::sink::CollectingSink;
    use serde_json::json;

    fn registry() -> (RuleRegistry, Arc<CollectingSink>) {
        let sink = Arc::new(CollectingSink::new());
        let registry = RuleRegistry::new();
        registry
            .register(DialectRule::new(DialectConfig::babel(), sink.clone()))
            .unwrap();
        (registry, sink)
    }

    #[test]
    fn test_duplicate_prefix() {
        let (registry, sink) = registry();
        let error = registry
            .register(DialectRule::new(DialectConfig::babel(), sink))
            .unwrap_err();
        assert_eq!(error, RegistryError::DuplicatePrefix("babel-config".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_clones_share_rules() {
        let (registry, sink) = registry();
        let clone = registry.clone();
        clone
            .register(DialectRule::new(DialectConfig::typescript(), sink))
            .unwrap();
        assert!(registry.get("typescript-config").is_some());
    }

    #[tokio::test]
    async fn test_dispatch_to_rule() {
        let (registry, sink) = registry();

        let reported = registry
            .dispatch(NamedEvent::new(
                "babel-config::error::json",
                json!({ "error": { "message": "Unexpected token }" }, "resource": ".babelrc" }),
            ))
            .await
            .unwrap();

        assert_eq!(reported, Some(1));
        assert_eq!(sink.diagnostics()[0].text, "Unexpected token }");
    }

    #[tokio::test]
    async fn test_dispatch_unregistered_prefix_ignored() {
        let (registry, sink) = registry();

        let reported = registry
            .dispatch(NamedEvent::new(
                "typescript-config::error::json",
                json!({ "error": { "message": "x" }, "resource": "tsconfig.json" }),
            ))
            .await
            .unwrap();

        assert_eq!(reported, None);
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_malformed_name() {
        let (registry, _) = registry();
        let result = registry
            .dispatch(NamedEvent::new("babel-config::loaded", json!({})))
            .await;
        assert!(matches!(result, Err(EngineError::Event(_))));
    }
}
