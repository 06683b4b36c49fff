//! Reporting sinks.
//!
//! The host owns where diagnostics go. The engine only needs [`ReportSink`],
//! an async `report` call per diagnostic. Two implementations ship with the
//! crate: [`ChannelSink`] forwards into a tokio channel and
//! [`CollectingSink`] keeps diagnostics in memory.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::error::ReportError;
use crate::reporter::{DiagnosticMessage, Location};

/// The host's reporting sink.
///
/// Implementations decide their own concurrency discipline; the engine may
/// call `report` from several groups at once.
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Reports one diagnostic against `resource`.
    ///
    /// # Errors
    ///
    /// Returns a `ReportError` if the sink refuses the diagnostic.
    async fn report(
        &self,
        resource: &str,
        location: Option<&Location>,
        message: &str,
    ) -> Result<(), ReportError>;
}

#[async_trait]
impl<S: ReportSink + ?Sized> ReportSink for Arc<S> {
    async fn report(
        &self,
        resource: &str,
        location: Option<&Location>,
        message: &str,
    ) -> Result<(), ReportError> {
        (**self).report(resource, location, message).await
    }
}

/// Forwards diagnostics into an unbounded channel.
///
/// # Example
///
/// ```rust
/// use confcheck::{ChannelSink, ReportSink};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let (sink, mut diagnostics) = ChannelSink::new();
/// sink.report("tsconfig.json", None, "bad").await.unwrap();
///
/// let diagnostic = diagnostics.recv().await.unwrap();
/// assert_eq!(diagnostic.text, "bad");
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<DiagnosticMessage>,
}

impl ChannelSink {
    /// Creates a sink and the receiver its diagnostics arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<DiagnosticMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Wraps an existing sender.
    pub fn from_sender(tx: mpsc::UnboundedSender<DiagnosticMessage>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl ReportSink for ChannelSink {
    async fn report(
        &self,
        resource: &str,
        location: Option<&Location>,
        message: &str,
    ) -> Result<(), ReportError> {
        let diagnostic = DiagnosticMessage {
            resource: resource.to_string(),
            location: location.cloned(),
            text: message.to_string(),
        };
        self.tx.send(diagnostic).map_err(|_| ReportError::Closed)
    }
}

/// Keeps every reported diagnostic in memory, in acceptance order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<DiagnosticMessage>>,
}

impl CollectingSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the diagnostics accepted so far.
    pub fn diagnostics(&self) -> Vec<DiagnosticMessage> {
        self.diagnostics.lock().clone()
    }

    /// Returns the accepted diagnostics for one resource.
    pub fn for_resource(&self, resource: &str) -> Vec<DiagnosticMessage> {
        self.diagnostics
            .lock()
            .iter()
            .filter(|d| d.resource == resource)
            .cloned()
            .collect()
    }

    /// Removes and returns everything accepted so far.
    pub fn take(&self) -> Vec<DiagnosticMessage> {
        std::mem::take(&mut *self.diagnostics.lock())
    }

    /// Returns the number of accepted diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.lock().len()
    }

    /// Returns true if nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.lock().is_empty()
    }
}

#[async_trait]
impl ReportSink for CollectingSink {
    async fn report(
        &self,
        resource: &str,
        location: Option<&Location>,
        message: &str,
    ) -> Result<(), ReportError> {
        self.diagnostics.lock().push(DiagnosticMessage {
            resource: resource.to_string(),
            location: location.cloned(),
            text: message.to_string(),
        });
        Ok(())
    }
}
