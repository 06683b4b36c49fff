//! Per-keyword message templates.
//!
//! A [`FormatterChain`] is an ordered table of [`Template`]s. Formatting an
//! error walks the table in declared order and returns the first rendering
//! whose keyword matches; with no match the validator's own message is used
//! unchanged.

use crate::error::{Keyword, KeywordParams, RawValidationError};

/// A message template for one keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    /// `'<property>' <message>. Additional property found '<name>'.`
    AdditionalProperties,
    /// `'<property>' <message> '<allowed, ...>'. Value found '<data>'`
    Enum,
    /// `'<property>' <message>.` with double quotes turned into single quotes.
    Type,
    /// Like [`Template::Type`], followed by ` Value found '<data>'`.
    Pattern,
}

impl Template {
    /// Returns the keyword this template handles.
    pub fn keyword(&self) -> Keyword {
        match self {
            Template::AdditionalProperties => Keyword::AdditionalProperties,
            Template::Enum => Keyword::Enum,
            Template::Type => Keyword::Type,
            Template::Pattern => Keyword::Pattern,
        }
    }

    /// Renders the error, or returns `None` when the template does not apply.
    ///
    /// A template applies when the keyword matches and the params it needs are
    /// present.
    pub fn render(&self, error: &RawValidationError) -> Option<String> {
        if error.keyword != self.keyword() {
            return None;
        }

        let property = error.data_path.property();
        match (self, &error.params) {
            (Template::AdditionalProperties, KeywordParams::AdditionalProperty(name)) => {
                Some(format!(
                    "'{}' {}. Additional property found '{}'.",
                    property, error.message, name
                ))
            }
            (Template::Enum, KeywordParams::AllowedValues(values)) => Some(format!(
                "'{}' {} '{}'. Value found '{}'",
                property,
                error.message,
                values.join(", "),
                error.data_text()
            )),
            (Template::Type, _) => Some(format!(
                "'{}' {}.",
                property,
                single_quoted(&error.message)
            )),
            (Template::Pattern, _) => Some(format!(
                "'{}' {}. Value found '{}'",
                property,
                single_quoted(&error.message),
                error.data_text()
            )),
            _ => None,
        }
    }
}

fn single_quoted(message: &str) -> String {
    message.replace('"', "'")
}

/// An ordered table of templates.
///
/// # Example
///
/// ```rust
/// use confcheck::{FormatterChain, Keyword, RawValidationError, Template};
///
/// let chain = FormatterChain::new(vec![Template::AdditionalProperties, Template::Type]);
///
/// let error = RawValidationError::new(
///     "/compilerOptions",
///     Keyword::AdditionalProperties,
///     "should NOT have additional properties",
/// )
/// .with_additional_property("invalidProperty");
///
/// assert_eq!(
///     chain.format(&error),
///     "'compilerOptions' should NOT have additional properties. Additional property found 'invalidProperty'."
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormatterChain {
    templates: Vec<Template>,
}

impl FormatterChain {
    /// Creates a chain trying `templates` in the given order.
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    /// Returns the templates in declared order.
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Returns true if some template in the chain handles `keyword`.
    pub fn handles(&self, keyword: &Keyword) -> bool {
        self.templates.iter().any(|t| &t.keyword() == keyword)
    }

    /// Formats one error.
    ///
    /// Never fails: an error no template renders falls back to its `message`.
    pub fn format(&self, error: &RawValidationError) -> String {
        self.templates
            .iter()
            .find_map(|template| template.render(error))
            .unwrap_or_else(|| error.message.clone())
    }
}
