//! Message sink for human-readable status and error events
//!
//! The library never prints. Every outcome of a [`Mirror`](crate::Mirror)
//! entry point is handed to an injected [`Reporter`]; failures are also
//! returned as `Err` values.

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

/// Severity of a reported message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Receiver of status and error events.
pub trait Reporter {
    /// Accept one human-readable event.
    fn report(&self, text: &str, severity: Severity, title: &str);
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn report(&self, text: &str, severity: Severity, title: &str) {
        (**self).report(text, severity, title)
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn report(&self, text: &str, severity: Severity, title: &str) {
        (**self).report(text, severity, title)
    }
}

/// Forwards every event to `tracing` at the matching level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, text: &str, severity: Severity, title: &str) {
        match severity {
            Severity::Info => tracing::info!("{}: {}", title, text),
            Severity::Warning => tracing::warn!("{}: {}", title, text),
            Severity::Error => tracing::error!("{}: {}", title, text),
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _text: &str, _severity: Severity, _title: &str) {}
}

/// One event captured by a [`MemoryReporter`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub severity: Severity,
    pub title: String,
}

/// Collects events in memory, in the order they were reported.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    messages: Mutex<Vec<Message>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every message reported so far
    pub fn messages(&self) -> Vec<Message> {
        self.lock().clone()
    }

    /// Whether any message was reported at [`Severity::Error`]
    pub fn has_errors(&self) -> bool {
        self.lock().iter().any(|m| m.severity == Severity::Error)
    }

    /// Remove and return every message reported so far
    pub fn drain(&self) -> Vec<Message> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Message>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, text: &str, severity: Severity, title: &str) {
        self.lock().push(Message {
            text: text.to_string(),
            severity,
            title: title.to_string(),
        });
    }
}
