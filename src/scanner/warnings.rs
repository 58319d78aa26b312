//! Non-fatal warning log

use crate::market::Venue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A recoverable problem surfaced to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    /// When the warning was raised
    pub at: DateTime<Utc>,
    /// Venue involved, if any
    pub venue: Option<Venue>,
    /// Human-readable message
    pub message: String,
}

/// Bounded warning history, newest first
#[derive(Debug, Clone)]
pub struct WarningLog {
    entries: VecDeque<Warning>,
    capacity: usize,
}

impl WarningLog {
    /// Create a log that keeps at most `capacity` warnings
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Record a warning, dropping the oldest when full
    pub fn push(&mut self, venue: Option<Venue>, message: impl Into<String>) -> &Warning {
        self.entries.push_front(Warning {
            at: Utc::now(),
            venue,
            message: message.into(),
        });
        self.entries.truncate(self.capacity);
        &self.entries[0]
    }

    /// Warnings, newest first
    pub fn iter(&self) -> impl Iterator<Item = &Warning> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Owned copy, newest first
    pub fn snapshot(&self) -> Vec<Warning> {
        self.entries.iter().cloned().collect()
    }
}
