//! The per-dialect rule.
//!
//! A [`DialectRule`] pairs a [`DialectConfig`] with the host's sink and turns
//! each inbound [`DialectEvent`] into diagnostics. It has no options and is
//! always active: an invalid configuration file is always worth reporting.
//! Rules are driven by [`crate::DiagnosticsEngine`] through a
//! [`crate::RuleRegistry`], or called directly with [`DialectRule::handle`].

use std::sync::Arc;

use tracing::{debug, info_span, Instrument};

use crate::dialect::DialectConfig;
use crate::error::ReportErrors;
use crate::event::{DialectEvent, EventKind, EventName};
use crate::reporter::{ParseFailure, Reporter};
use crate::sink::ReportSink;
use crate::ReportResult;

/// One dialect's diagnostics rule.
///
/// Cloning is cheap; clones share the dialect and the sink.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use confcheck::{CollectingSink, DialectConfig, DialectEvent, DialectRule};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let sink = Arc::new(CollectingSink::new());
/// let rule = DialectRule::new(DialectConfig::babel(), sink.clone());
///
/// let reported = rule
///     .handle(DialectEvent::JsonError {
///         resource: ".babelrc".to_string(),
///         message: "Unexpected end of JSON input".to_string(),
///     })
///     .await
///     .unwrap();
///
/// assert_eq!(reported, 1);
/// assert_eq!(sink.diagnostics()[0].text, "Unexpected end of JSON input");
/// # });
/// ```
#[derive(Clone)]
pub struct DialectRule {
    dialect: Arc<DialectConfig>,
    sink: Arc<dyn ReportSink>,
}

impl DialectRule {
    /// Creates a rule for `dialect` reporting into `sink`.
    pub fn new(dialect: DialectConfig, sink: Arc<dyn ReportSink>) -> Self {
        Self {
            dialect: Arc::new(dialect),
            sink,
        }
    }

    /// Returns the dialect this rule handles.
    pub fn dialect(&self) -> &DialectConfig {
        &self.dialect
    }

    /// Returns the event prefix this rule listens on.
    pub fn event_prefix(&self) -> &str {
        self.dialect.event_prefix()
    }

    /// Returns the names of the two events this rule consumes.
    pub fn subscriptions(&self) -> [EventName; 2] {
        [
            self.dialect.event_name(EventKind::Json),
            self.dialect.event_name(EventKind::Schema),
        ]
    }

    /// Handles one event and returns the number of diagnostics reported.
    ///
    /// A parse failure yields exactly one diagnostic with the parser's text; a
    /// schema failure yields one diagnostic per validator error. The run is
    /// traced in a span carrying the dialect and the resource.
    ///
    /// # Errors
    ///
    /// Returns every rejection the sink produced during this run.
    pub async fn handle(&self, event: DialectEvent) -> ReportResult<usize> {
        let span = info_span!(
            "handle_event",
            dialect = %self.dialect.event_prefix(),
            resource = %event.resource(),
            kind = %event.kind()
        );

        async move {
            let reporter = Reporter::new(&self.dialect, self.sink.as_ref());
            let reported = match event {
                DialectEvent::JsonError { resource, message } => {
                    debug!("reporting parse failure");
                    reporter
                        .report_parse_failure(&ParseFailure::new(resource, message))
                        .await?
                }
                DialectEvent::SchemaError { resource, errors } => {
                    debug!(errors = errors.len(), "reporting schema errors");
                    reporter.report_schema_errors(&resource, &errors).await?
                }
            };
            debug!(reported, "event handled");
            Ok::<_, ReportErrors>(reported)
        }
        .instrument(span)
        .await
    }
}

impl std::fmt::Debug for DialectRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialectRule")
            .field("dialect", &self.dialect)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Keyword, RawValidationError};
    use crate::sink::CollectingSink;

    fn rule(dialect: DialectConfig) -> (DialectRule, Arc<CollectingSink>) {
        let sink = Arc::new(CollectingSink::new());
        (DialectRule::new(dialect, sink.clone()), sink)
    }

    #[test]
    fn test_subscriptions() {
        let (rule, _) = rule(DialectConfig::typescript());
        let names: Vec<_> = rule.subscriptions().iter().map(ToString::to_string).collect();
        assert_eq!(
            names,
            vec![
                "typescript-config::error::json",
                "typescript-config::error::schema"
            ]
        );
    }

    #[tokio::test]
    async fn test_schema_event_reports_each_error() {
        let (rule, sink) = rule(DialectConfig::typescript());

        let reported = rule
            .handle(DialectEvent::SchemaError {
                resource: "tsconfig.json".to_string(),
                errors: vec![
                    RawValidationError::new(
                        "/compilerOptions",
                        Keyword::AdditionalProperties,
                        "should NOT have additional properties",
                    )
                    .with_additional_property("invalidProperty"),
                    RawValidationError::new("/files", Keyword::Type, "should be array"),
                ],
            })
            .await
            .unwrap();

        assert_eq!(reported, 2);
        let diagnostics = sink.for_resource("tsconfig.json");
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.iter().all(|d| d.location.is_none()));
    }
}
