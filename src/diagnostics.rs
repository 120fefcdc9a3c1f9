// Injected warning sink for degraded-path events.
//
// The resolver and snapshot builder report recoverable failures here rather
// than logging directly, so tests can assert on what was emitted.

use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub component: &'static str,
    pub message: String,
}

pub trait Diagnostics: Send + Sync {
    fn warn(&self, component: &'static str, message: String);
}

/// Forwards every event to `tracing::warn!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, component: &'static str, message: String) {
        tracing::warn!(component, "{}", message);
    }
}

/// Keeps events in memory.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    events: Mutex<Vec<Diagnostic>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Diagnostic> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// True when any recorded event from `component` contains `needle`.
    pub fn contains(&self, component: &str, needle: &str) -> bool {
        self.events()
            .iter()
            .any(|d| d.component == component && d.message.contains(needle))
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn warn(&self, component: &'static str, message: String) {
        let event = Diagnostic { component, message };
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
