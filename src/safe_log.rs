//! PHI-safe in-memory log buffer.
//!
//! Every message is redacted before it is stored, so nothing read back from
//! the buffer can contain a value the redactor recognises. One `SafeLogger`
//! is constructed by the caller and passed by reference to whatever needs to
//! log; it lives as long as its owner.

use std::fmt::Display;
use std::sync::Mutex;

use crate::pipeline::redaction::redact;

/// Initial buffer capacity.
const LOG_BUFFER_CAPACITY: usize = 64;

/// Sink for free-text log messages.
pub trait LogSink: Send + Sync {
    /// Store one message (after redaction).
    fn record(&self, message: &str);

    /// Take all stored messages in insertion order, leaving the sink empty.
    fn drain(&self) -> Vec<String>;
}

/// Redacting buffer behind a mutex. A poisoned lock drops writes and reads
/// back empty rather than panicking.
#[derive(Debug)]
pub struct SafeLogger {
    buffer: Mutex<Vec<String>>,
}

impl SafeLogger {
    pub fn new() -> Self {
        Self {
            buffer: Mutex::new(Vec::with_capacity(LOG_BUFFER_CAPACITY)),
        }
    }

    /// Record any displayable message.
    pub fn info(&self, message: impl Display) {
        self.record(&message.to_string());
    }

    /// All buffered entries joined by newlines. Does not clear the buffer.
    pub fn dump(&self) -> String {
        self.buffer
            .lock()
            .map(|buf| buf.join("\n"))
            .unwrap_or_default()
    }

    /// Buffered entries without clearing.
    pub fn entries(&self) -> Vec<String> {
        self.buffer
            .lock()
            .map(|buf| buf.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.buffer.lock().map(|buf| buf.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SafeLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for SafeLogger {
    fn record(&self, message: &str) {
        let scrubbed = redact(message);
        if let Ok(mut buf) = self.buffer.lock() {
            buf.push(scrubbed);
            tracing::trace!(entries = buf.len(), "Safe log entry recorded");
        }
    }

    fn drain(&self) -> Vec<String> {
        self.buffer
            .lock()
            .map(|mut buf| buf.drain(..).collect())
            .unwrap_or_default()
    }
}
