//! The event loop.
//!
//! [`DiagnosticsEngine`] is the message-passing boundary between the parsing
//! collaborator and the dialect rules: the collaborator pushes [`NamedEvent`]s
//! into a bounded channel, the engine routes each one through the
//! [`RuleRegistry`] on its own task, and diagnostics leave through the rules'
//! sinks.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::{EventError, ReportErrors};
use crate::event::NamedEvent;
use crate::registry::RuleRegistry;

/// Anything that can fail while handling one event.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The event could not be decoded.
    #[error(transparent)]
    Event(#[from] EventError),

    /// The sink rejected diagnostics.
    #[error(transparent)]
    Report(#[from] ReportErrors),
}

/// Totals of one engine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineSummary {
    /// Events a rule handled successfully.
    pub handled: usize,
    /// Events no rule listens on.
    pub ignored: usize,
    /// Events that failed to decode or whose diagnostics were rejected.
    pub failed: usize,
    /// Diagnostics reported across all handled events.
    pub reported: usize,
}

/// A snapshot of a run in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineProgress {
    /// Totals of the events that have finished so far.
    pub summary: EngineSummary,
    /// Events received whose tasks have not finished yet.
    pub in_flight: usize,
}

type TaskOutcome = (String, Result<Option<usize>, EngineError>);

/// Routes inbound events to dialect rules.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use confcheck::{
///     CollectingSink, DiagnosticsEngine, DialectConfig, DialectRule, EngineConfig, NamedEvent,
///     RuleRegistry,
/// };
/// use serde_json::json;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let sink = Arc::new(CollectingSink::new());
/// let registry = RuleRegistry::new();
/// registry.register(DialectRule::new(DialectConfig::typescript(), sink.clone())).unwrap();
///
/// let engine = DiagnosticsEngine::new(registry, EngineConfig::default());
/// let (tx, rx) = engine.channel();
///
/// tx.send(NamedEvent::new(
///     "typescript-config::error::json",
///     json!({ "error": { "message": "Unexpected end of JSON input" }, "resource": "tsconfig.json" }),
/// ))
/// .await
/// .unwrap();
/// drop(tx);
///
/// let summary = engine.run(rx).await;
/// assert_eq!(summary.handled, 1);
/// assert_eq!(sink.len(), 1);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct DiagnosticsEngine {
    registry: RuleRegistry,
    config: EngineConfig,
    progress: Arc<Mutex<EngineProgress>>,
}

impl DiagnosticsEngine {
    /// Creates an engine over `registry`.
    ///
    /// Rules named in `config` but absent from the registry are logged.
    pub fn new(registry: RuleRegistry, config: EngineConfig) -> Self {
        for rule in config.rules.keys() {
            if registry.get(rule).is_none() {
                warn!(dialect = %rule, "configured rule is not registered");
            }
        }
        Self {
            registry,
            config,
            progress: Arc::default(),
        }
    }

    /// Returns the registry.
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Creates the bounded channel the collaborator pushes events into.
    pub fn channel(&self) -> (mpsc::Sender<NamedEvent>, mpsc::Receiver<NamedEvent>) {
        mpsc::channel(self.config.channel_capacity)
    }

    /// Returns the progress of the current or most recent run.
    ///
    /// Clones of the engine share it.
    pub fn progress(&self) -> EngineProgress {
        *self.progress.lock()
    }

    /// Consumes events until every sender is dropped.
    ///
    /// Each event is dispatched on its own task; a failure in one run never
    /// affects another. Finished tasks are reaped and counted while the
    /// channel is still open. Returns after every task has finished.
    pub async fn run(&self, mut events: mpsc::Receiver<NamedEvent>) -> EngineSummary {
        let mut tasks: JoinSet<TaskOutcome> = JoinSet::new();
        let mut summary = EngineSummary::default();
        let mut open = true;
        self.publish(summary, 0);

        loop {
            tokio::select! {
                event = events.recv(), if open => match event {
                    Some(event) => {
                        debug!(event = %event.name, "received event");
                        let registry = self.registry.clone();
                        tasks.spawn(async move {
                            let name = event.name.clone();
                            (name, registry.dispatch(event).await)
                        });
                    }
                    None => open = false,
                },
                Some(joined) = tasks.join_next() => record(&mut summary, joined),
                else => break,
            }
            self.publish(summary, tasks.len());
        }

        info!(
            handled = summary.handled,
            ignored = summary.ignored,
            failed = summary.failed,
            reported = summary.reported,
            "event channel closed"
        );
        summary
    }

    fn publish(&self, summary: EngineSummary, in_flight: usize) {
        *self.progress.lock() = EngineProgress { summary, in_flight };
    }
}

fn record(summary: &mut EngineSummary, joined: Result<TaskOutcome, JoinError>) {
    match joined {
        Ok((_, Ok(Some(reported)))) => {
            summary.handled += 1;
            summary.reported += reported;
        }
        Ok((_, Ok(None))) => summary.ignored += 1,
        Ok((name, Err(e))) => {
            warn!(event = %name, error = %e, "event handling failed");
            summary.failed += 1;
        }
        Err(e) => {
            warn!(error = %e, "event task panicked");
            summary.failed += 1;
        }
    }
}
