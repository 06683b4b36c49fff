//! # Confcheck
//!
//! Turns the raw error records of a JSON-Schema validator into readable,
//! deterministic diagnostics for configuration files.
//!
//! ## Overview
//!
//! Configuration dialects (a babel-style config, a typescript-style config)
//! share one pipeline. For each resource, the parser either failed (the
//! document is not JSON) or the validator produced a list of errors. A parse
//! failure is reported verbatim. Validator errors are grouped by location,
//! rendered through the dialect's template table, and reported one diagnostic
//! per error.
//!
//! ## Core Types
//!
//! - [`RawValidationError`]: one validator failure record
//! - [`group_errors`]: stable grouping by data path
//! - [`FormatterChain`]: per-keyword templates with a default-text fallback
//! - [`combine_disjunction`]: `anyOf` rendering from sibling errors
//! - [`Reporter`]: emission into a [`ReportSink`]
//! - [`DialectRule`]: the per-dialect adapter driven by [`DialectEvent`]s
//! - [`DiagnosticsEngine`]: channel-fed event loop over a [`RuleRegistry`]
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use confcheck::{CollectingSink, DialectConfig, DialectEvent, DialectRule, Keyword, RawValidationError};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let sink = Arc::new(CollectingSink::new());
//! let rule = DialectRule::new(DialectConfig::typescript(), sink.clone());
//!
//! rule.handle(DialectEvent::SchemaError {
//!     resource: "tsconfig.json".to_string(),
//!     errors: vec![RawValidationError::new(
//!         "/compilerOptions",
//!         Keyword::AdditionalProperties,
//!         "should NOT have additional properties",
//!     )
//!     .with_additional_property("invalidProperty")],
//! })
//! .await
//! .unwrap();
//!
//! assert_eq!(
//!     sink.diagnostics()[0].text,
//!     "'compilerOptions' should NOT have additional properties. Additional property found 'invalidProperty'."
//! );
//! # });
//! ```

pub mod config;
pub mod dialect;
pub mod engine;
pub mod error;
pub mod event;
pub mod format;
pub mod group;
pub mod logging;
pub mod path;
pub mod registry;
pub mod reporter;
pub mod rule;
pub mod sink;

pub use config::{ConfigError, EngineConfig};
pub use dialect::{DialectConfig, RuleOptions, BABEL_PREFIX, TYPESCRIPT_PREFIX};
pub use engine::{DiagnosticsEngine, EngineError, EngineProgress, EngineSummary};
pub use error::{EventError, Keyword, KeywordParams, RawValidationError, ReportError, ReportErrors};
pub use event::{DialectEvent, EventKind, EventName, NamedEvent};
pub use format::{combine_disjunction, FormatterChain, Template};
pub use group::{group_errors, ErrorGroup};
pub use path::DataPath;
pub use registry::{RegistryError, RuleRegistry};
pub use reporter::{DiagnosticMessage, Location, ParseFailure, Reporter};
pub use rule::DialectRule;
pub use sink::{ChannelSink, CollectingSink, ReportSink};

/// Result of handling one event: diagnostics reported, or every sink rejection.
pub type ReportResult<T> = Result<T, ReportErrors>;
