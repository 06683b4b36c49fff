//! Validator error records.
//!
//! This module provides [`RawValidationError`], the record an external JSON-Schema
//! validator emits for each failed rule, together with the closed [`Keyword`]
//! set and the per-keyword [`KeywordParams`].

use std::fmt::{self, Display};

use serde::Deserialize;
use serde_json::Value;

use crate::error::EventError;
use crate::path::DataPath;

/// The schema rule that failed.
///
/// Keywords the formatter templates know about get their own variant; every
/// other rule name is kept in [`Keyword::Other`] so the validator's default
/// text can still be reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// An object carried a property the schema does not declare.
    AdditionalProperties,
    /// A value was not one of the allowed values.
    Enum,
    /// A value had the wrong JSON type.
    Type,
    /// A string did not match a regular expression.
    Pattern,
    /// None of several alternative sub-schemas matched.
    AnyOf,
    /// Any other rule name, kept verbatim.
    Other(String),
}

impl Keyword {
    /// Parses a keyword from the name the validator uses.
    pub fn from_name(name: &str) -> Self {
        match name {
            "additionalProperties" => Keyword::AdditionalProperties,
            "enum" => Keyword::Enum,
            "type" => Keyword::Type,
            "pattern" => Keyword::Pattern,
            "anyOf" => Keyword::AnyOf,
            other => Keyword::Other(other.to_string()),
        }
    }

    /// Returns the keyword name as the validator spells it.
    pub fn as_str(&self) -> &str {
        match self {
            Keyword::AdditionalProperties => "additionalProperties",
            Keyword::Enum => "enum",
            Keyword::Type => "type",
            Keyword::Pattern => "pattern",
            Keyword::AnyOf => "anyOf",
            Keyword::Other(name) => name,
        }
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured parameters attached to an error, by keyword.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KeywordParams {
    /// `additionalProperties`: the unexpected property name.
    AdditionalProperty(String),
    /// `enum`: the allowed values, in the order the validator listed them.
    AllowedValues(Vec<String>),
    /// No structured data beyond `message` and `data`.
    #[default]
    None,
}

/// A single failure record produced by the schema validator.
///
/// Records are immutable once built. The builder methods exist for hosts that
/// construct records directly instead of decoding the validator's JSON.
///
/// # Example
///
/// ```rust
/// use confcheck::{Keyword, RawValidationError};
///
/// let error = RawValidationError::new(
///     "/compilerOptions",
///     Keyword::AdditionalProperties,
///     "should NOT have additional properties",
/// )
/// .with_additional_property("invalidProperty");
///
/// assert_eq!(error.data_path.property(), "compilerOptions");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "WireError")]
pub struct RawValidationError {
    /// Where in the document the rule failed.
    pub data_path: DataPath,
    /// The rule that failed.
    pub keyword: Keyword,
    /// The validator's own description of the failure.
    pub message: String,
    /// Per-keyword structured data.
    pub params: KeywordParams,
    /// The offending value.
    pub data: Value,
}

impl RawValidationError {
    /// Creates a record without params or data.
    pub fn new(
        data_path: impl Into<DataPath>,
        keyword: Keyword,
        message: impl Into<String>,
    ) -> Self {
        Self {
            data_path: data_path.into(),
            keyword,
            message: message.into(),
            params: KeywordParams::None,
            data: Value::Null,
        }
    }

    /// Sets the `additionalProperty` param.
    pub fn with_additional_property(mut self, property: impl Into<String>) -> Self {
        self.params = KeywordParams::AdditionalProperty(property.into());
        self
    }

    /// Sets the `allowedValues` param.
    pub fn with_allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = KeywordParams::AllowedValues(values.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the offending value.
    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.data = data.into();
        self
    }

    /// Renders the offending value for display.
    ///
    /// Strings are shown bare; anything else is shown as compact JSON.
    pub fn data_text(&self) -> String {
        value_text(&self.data)
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The record as the validator serializes it.
#[derive(Deserialize)]
struct WireError {
    #[serde(rename = "dataPath", alias = "instancePath", default)]
    data_path: String,
    keyword: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    params: Value,
    #[serde(default)]
    data: Value,
}

impl TryFrom<WireError> for RawValidationError {
    type Error = EventError;

    fn try_from(wire: WireError) -> Result<Self, Self::Error> {
        let keyword = Keyword::from_name(&wire.keyword);
        let params = decode_params(&keyword, &wire.params)?;

        Ok(Self {
            data_path: DataPath::new(wire.data_path),
            keyword,
            message: wire.message,
            params,
            data: wire.data,
        })
    }
}

/// Missing params decode to [`KeywordParams::None`]; params of the wrong shape
/// are rejected.
fn decode_params(keyword: &Keyword, params: &Value) -> Result<KeywordParams, EventError> {
    let invalid = |expected| EventError::InvalidParams {
        keyword: keyword.to_string(),
        expected,
    };

    match keyword {
        Keyword::AdditionalProperties => match params.get("additionalProperty") {
            None => Ok(KeywordParams::None),
            Some(Value::String(name)) => Ok(KeywordParams::AdditionalProperty(name.clone())),
            Some(_) => Err(invalid("a string `additionalProperty`")),
        },
        Keyword::Enum => match params.get("allowedValues") {
            None => Ok(KeywordParams::None),
            Some(Value::Array(values)) => Ok(KeywordParams::AllowedValues(
                values.iter().map(value_text).collect(),
            )),
            Some(_) => Err(invalid("an array `allowedValues`")),
        },
        _ => Ok(KeywordParams::None),
    }
}
