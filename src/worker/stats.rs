//! Counters for messages handled by the worker

use crate::error::ErrorKind;

/// Per-run counters, logged when the worker stops
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerStats {
    /// Messages handed to the processor
    pub received: u64,
    pub completed: u64,
    pub malformed: u64,
    pub invalid: u64,
    /// Transform or publish failures
    pub failed: u64,
}

impl WorkerStats {
    pub fn record_discard(&mut self, kind: ErrorKind) {
        match kind {
            ErrorKind::MalformedMessage => self.malformed += 1,
            ErrorKind::InvalidRequest => self.invalid += 1,
            _ => self.failed += 1,
        }
    }

    pub fn discarded(&self) -> u64 {
        self.malformed + self.invalid + self.failed
    }
}
