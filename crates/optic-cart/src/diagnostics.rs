//! Diagnostic reporting for recovered failures
//!
//! The cart never raises persistence or hydration failures to its caller.
//! It reports them to a [`DiagnosticSink`] and carries on.

use parking_lot::Mutex;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

/// Kinds of recovered failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticEvent {
    /// Writing the durable slot failed; in-memory state stays authoritative
    PersistFailed,
    /// Reading or decoding the durable slot failed; cart started empty
    HydrateFailed,
    /// A persisted entry was invalid and skipped
    EntryDropped,
    /// A mutation was asked to key an item by an empty id
    IdentifyFailed,
}

impl DiagnosticEvent {
    /// Stable name for logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PersistFailed => "persist_failed",
            Self::HydrateFailed => "hydrate_failed",
            Self::EntryDropped => "entry_dropped",
            Self::IdentifyFailed => "identify_failed",
        }
    }
}

impl Display for DiagnosticEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receiver of diagnostic reports
pub trait DiagnosticSink {
    /// Record one event with a human-readable detail
    fn report(&self, event: DiagnosticEvent, detail: &str);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Arc<S> {
    fn report(&self, event: DiagnosticEvent, detail: &str) {
        (**self).report(event, detail);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Box<S> {
    fn report(&self, event: DiagnosticEvent, detail: &str) {
        (**self).report(event, detail);
    }
}

/// Sink forwarding to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, event: DiagnosticEvent, detail: &str) {
        match event {
            DiagnosticEvent::PersistFailed => {
                tracing::error!(event = %event, detail, "failed to save cart");
            }
            DiagnosticEvent::HydrateFailed => {
                tracing::warn!(event = %event, detail, "failed to load cart; starting empty");
            }
            DiagnosticEvent::EntryDropped => {
                tracing::warn!(event = %event, detail, "skipped invalid cart entry");
            }
            DiagnosticEvent::IdentifyFailed => {
                tracing::error!(event = %event, detail, "could not identify product");
            }
        }
    }
}

/// One captured report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// What went wrong
    pub event: DiagnosticEvent,
    /// Free-form description, usually the underlying error
    pub detail: String,
}

/// Sink that keeps every report in memory
///
/// Clones share the same buffer, so a test can hand one clone to the store
/// and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    reports: Arc<Mutex<Vec<Report>>>,
}

impl RecordingSink {
    /// Create empty sink
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of reports so far
    #[must_use]
    pub fn reports(&self) -> Vec<Report> {
        self.reports.lock().clone()
    }

    /// Count reports of one kind
    #[must_use]
    pub fn count(&self, event: DiagnosticEvent) -> usize {
        self.reports.lock().iter().filter(|r| r.event == event).count()
    }

    /// True when nothing was reported
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reports.lock().is_empty()
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, event: DiagnosticEvent, detail: &str) {
        self.reports.lock().push(Report {
            event,
            detail: detail.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_shares_buffer_across_clones() {
        let sink = RecordingSink::new();
        let handle = sink.clone();

        sink.report(DiagnosticEvent::PersistFailed, "quota");
        sink.report(DiagnosticEvent::EntryDropped, "a");

        assert_eq!(handle.reports().len(), 2);
        assert_eq!(handle.count(DiagnosticEvent::PersistFailed), 1);
        assert_eq!(handle.reports()[0].detail, "quota");
    }

    #[test]
    fn tracing_sink_does_not_panic_without_subscriber() {
        TracingSink.report(DiagnosticEvent::HydrateFailed, "bad json");
    }

    #[test]
    fn event_names() {
        assert_eq!(DiagnosticEvent::PersistFailed.to_string(), "persist_failed");
        assert_eq!(DiagnosticEvent::HydrateFailed.as_str(), "hydrate_failed");
    }
}
