//! Emitting diagnostics.
//!
//! The [`Reporter`] turns one resource's outcome into calls on a
//! [`ReportSink`]: a single diagnostic for a parse failure, or one diagnostic
//! per validator error for a schema failure.
//!
//! # Ordering
//!
//! Schema errors are grouped by location. Text for all groups is rendered in
//! parallel, then each group is emitted as its own future and the futures are
//! joined. Within a group the diagnostics are emitted strictly in validator
//! order; across groups the completion order is unspecified.

use futures_util::future::join_all;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::dialect::DialectConfig;
use crate::error::{RawValidationError, ReportError, ReportErrors};
use crate::format::render;
use crate::group::group_errors;
use crate::sink::ReportSink;
use crate::ReportResult;

/// A position in a source document.
///
/// The validator exposes no source positions, so diagnostics produced by the
/// engine never carry one; sinks still accept it for hosts that do.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
}

/// A diagnostic reported against a whole resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    /// The resource the diagnostic belongs to.
    pub resource: String,
    /// Always `None` for diagnostics produced by the engine.
    pub location: Option<Location>,
    /// The human-readable text.
    pub text: String,
}

/// A document that is not well-formed JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    /// The resource that failed to parse.
    pub resource: String,
    /// The parser's message, reported verbatim.
    pub text: String,
}

impl ParseFailure {
    /// Creates a parse failure.
    pub fn new(resource: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            text: text.into(),
        }
    }
}

/// Drives a sink for one dialect.
pub struct Reporter<'a> {
    dialect: &'a DialectConfig,
    sink: &'a dyn ReportSink,
}

impl<'a> Reporter<'a> {
    /// Creates a reporter formatting with `dialect` and emitting into `sink`.
    pub fn new(dialect: &'a DialectConfig, sink: &'a dyn ReportSink) -> Self {
        Self { dialect, sink }
    }

    /// Emits exactly one diagnostic carrying the parser's text.
    ///
    /// Returns the number of diagnostics emitted.
    ///
    /// # Errors
    ///
    /// Returns the sink's rejection.
    pub async fn report_parse_failure(&self, failure: &ParseFailure) -> ReportResult<usize> {
        self.sink
            .report(&failure.resource, None, &failure.text)
            .await
            .map_err(|error| {
                warn!(error = %error, "sink rejected parse failure");
                ReportErrors::single(error)
            })?;
        Ok(1)
    }

    /// Emits one diagnostic per error, group by group.
    ///
    /// Completes only after every group has finished emitting. Returns the
    /// number of diagnostics emitted.
    ///
    /// # Errors
    ///
    /// A group stops at its first rejected diagnostic; other groups carry on.
    /// Every rejection is returned together.
    pub async fn report_schema_errors(
        &self,
        resource: &str,
        errors: &[RawValidationError],
    ) -> ReportResult<usize> {
        let messages = self.render_groups(errors);
        debug!(groups = messages.len(), errors = errors.len(), "emitting schema errors");

        let emissions = messages
            .iter()
            .map(|texts| self.emit_group(resource, texts));
        let results = join_all(emissions).await;

        let mut emitted = 0;
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(count) => emitted += count,
                Err(error) => {
                    warn!(error = %error, "sink rejected schema diagnostic");
                    failures.push(error);
                }
            }
        }

        match ReportErrors::from_vec(failures) {
            Some(errors) => Err(errors),
            None => Ok(emitted),
        }
    }

    /// Renders every group's messages, one `Vec` per group in group order.
    pub fn render_groups(&self, errors: &[RawValidationError]) -> Vec<Vec<String>> {
        let chain = self.dialect.chain();
        let disjunction = self.dialect.supports_disjunction();

        group_errors(errors)
            .par_iter()
            .map(|group| {
                group
                    .entries()
                    .map(|(position, _)| render(chain, errors, position, disjunction))
                    .collect::<Vec<String>>()
            })
            .collect()
    }

    async fn emit_group(&self, resource: &str, texts: &[String]) -> Result<usize, ReportError> {
        for text in texts {
            self.sink.report(resource, None, text).await?;
        }
        Ok(texts.len())
    }
}
