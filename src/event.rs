//! Inbound events from the parsing collaborator.
//!
//! The parser announces its outcome per resource with a named event,
//! `<prefix>::error::json` when the document is not well-formed JSON and
//! `<prefix>::error::schema` when it parsed but failed schema validation.
//! [`NamedEvent`] is that raw pair of name and JSON payload; [`DialectEvent`]
//! is its typed form.

use std::fmt::{self, Display};
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{EventError, RawValidationError};

/// Which of the two events a name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The document is not well-formed JSON.
    Json,
    /// The document failed schema validation.
    Schema,
}

impl EventKind {
    /// Returns the event-name suffix for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Json => "json",
            EventKind::Schema => "schema",
        }
    }
}

impl Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed event name: the dialect prefix and the event kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventName {
    prefix: String,
    kind: EventKind,
}

fn event_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<prefix>.+)::error::(?P<kind>json|schema)$")
            .expect("event name pattern is valid")
    })
}

impl EventName {
    /// Builds the name of `kind` for the dialect `prefix`.
    pub fn new(prefix: impl Into<String>, kind: EventKind) -> Self {
        Self {
            prefix: prefix.into(),
            kind,
        }
    }

    /// Parses `<prefix>::error::<json|schema>`.
    ///
    /// # Errors
    ///
    /// Returns `EventError::UnknownEvent` if the name has any other shape.
    ///
    /// # Example
    ///
    /// ```rust
    /// use confcheck::{EventKind, EventName};
    ///
    /// let name = EventName::parse("typescript-config::error::schema").unwrap();
    /// assert_eq!(name.prefix(), "typescript-config");
    /// assert_eq!(name.kind(), EventKind::Schema);
    ///
    /// assert!(EventName::parse("typescript-config::parse").is_err());
    /// ```
    pub fn parse(name: &str) -> Result<Self, EventError> {
        let captures = event_name_pattern()
            .captures(name)
            .ok_or_else(|| EventError::UnknownEvent(name.to_string()))?;

        let kind = match &captures["kind"] {
            "json" => EventKind::Json,
            _ => EventKind::Schema,
        };

        Ok(Self::new(&captures["prefix"], kind))
    }

    /// Returns the dialect prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the event kind.
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

impl Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::error::{}", self.prefix, self.kind)
    }
}

/// An event as the collaborator emits it: a name and an untyped payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedEvent {
    /// The event name, `<prefix>::error::<json|schema>`.
    pub name: String,
    /// The event payload.
    pub payload: Value,
}

impl NamedEvent {
    /// Creates a named event.
    pub fn new(name: impl Into<String>, payload: Value) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

/// A typed inbound event for one resource.
#[derive(Debug, Clone, PartialEq)]
pub enum DialectEvent {
    /// The resource is not well-formed JSON. `message` is the parser's text.
    JsonError {
        /// The resource that failed to parse.
        resource: String,
        /// The parser's error message, reported verbatim.
        message: String,
    },
    /// The resource parsed but violated its schema.
    SchemaError {
        /// The resource that failed validation.
        resource: String,
        /// Every validator error for the resource, in validator order.
        errors: Vec<RawValidationError>,
    },
}

#[derive(Deserialize)]
struct ParserError {
    message: String,
}

#[derive(Deserialize)]
struct JsonPayload {
    error: ParserError,
    resource: String,
}

#[derive(Deserialize)]
struct SchemaPayload {
    #[serde(default)]
    errors: Vec<RawValidationError>,
    resource: String,
}

impl DialectEvent {
    /// Decodes the payload of an event of the given kind.
    ///
    /// # Errors
    ///
    /// Returns `EventError::Payload` if the payload does not have the shape of
    /// `kind`.
    pub fn decode(name: &EventName, payload: Value) -> Result<Self, EventError> {
        let payload_error = |source| EventError::Payload {
            event: name.to_string(),
            source,
        };

        match name.kind() {
            EventKind::Json => {
                let payload: JsonPayload =
                    serde_json::from_value(payload).map_err(payload_error)?;
                Ok(DialectEvent::JsonError {
                    resource: payload.resource,
                    message: payload.error.message,
                })
            }
            EventKind::Schema => {
                let payload: SchemaPayload =
                    serde_json::from_value(payload).map_err(payload_error)?;
                Ok(DialectEvent::SchemaError {
                    resource: payload.resource,
                    errors: payload.errors,
                })
            }
        }
    }

    /// Returns the resource the event is about.
    pub fn resource(&self) -> &str {
        match self {
            DialectEvent::JsonError { resource, .. } => resource,
            DialectEvent::SchemaError { resource, .. } => resource,
        }
    }

    /// Returns the event kind.
    pub fn kind(&self) -> EventKind {
        match self {
            DialectEvent::JsonError { .. } => EventKind::Json,
            DialectEvent::SchemaError { .. } => EventKind::Schema,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Keyword;
    use serde_json::json;

    #[test]
    fn test_parse_event_names() {
        let json = EventName::parse("babel-config::error::json").unwrap();
        assert_eq!(json.prefix(), "babel-config");
        assert_eq!(json.kind(), EventKind::Json);
        assert_eq!(json.to_string(), "babel-config::error::json");
    }

    #[test]
    fn test_prefix_may_contain_separators() {
        let name = EventName::parse("a::b::error::schema").unwrap();
        assert_eq!(name.prefix(), "a::b");
    }

    #[test]
    fn test_unknown_event_names() {
        for bad in [
            "babel-config::error::yaml",
            "::error::json",
            "babel-config::json",
            "",
        ] {
            assert!(
                matches!(EventName::parse(bad), Err(EventError::UnknownEvent(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_decode_json_event() {
        let name = EventName::new("babel-config", EventKind::Json);
        let event = DialectEvent::decode(
            &name,
            json!({
                "error": { "message": "Unexpected token ' in JSON at position 148" },
                "resource": "https://example.com/.babelrc"
            }),
        )
        .unwrap();

        assert_eq!(
            event,
            DialectEvent::JsonError {
                resource: "https://example.com/.babelrc".to_string(),
                message: "Unexpected token ' in JSON at position 148".to_string(),
            }
        );
        assert_eq!(event.kind(), EventKind::Json);
    }

    #[test]
    fn test_decode_schema_event() {
        let name = EventName::new("typescript-config", EventKind::Schema);
        let event = DialectEvent::decode(
            &name,
            json!({
                "errors": [{
                    "dataPath": "/compilerOptions",
                    "keyword": "additionalProperties",
                    "message": "should NOT have additional properties",
                    "params": { "additionalProperty": "invalidProperty" }
                }],
                "resource": "tsconfig.json"
            }),
        )
        .unwrap();

        assert_eq!(event.resource(), "tsconfig.json");
        match event {
            DialectEvent::SchemaError { errors, .. } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].keyword, Keyword::AdditionalProperties);
            }
            other => panic!("expected schema event, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_wrong_shape() {
        let name = EventName::new("babel-config", EventKind::Json);
        let result = DialectEvent::decode(&name, json!({ "resource": "r" }));

        match result {
            Err(EventError::Payload { event, .. }) => {
                assert_eq!(event, "babel-config::error::json")
            }
            other => panic!("expected payload error, got {other:?}"),
        }
    }
}
