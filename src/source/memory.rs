//! In-memory session store.
//!
//! Holds records in a `Vec`. Useful for tests, benchmarks and for callers
//! that already decoded a session through some other reader.

use std::collections::BTreeMap;

use super::{Record, Records, SessionStore};
use crate::error::Result;

/// A session kept entirely in memory, in insertion order.
///
/// # Example
///
/// ```
/// use stampwatch::{MemorySession, Record, SessionStore};
///
/// let mut session = MemorySession::new("replay");
/// session.push(Record::stamped("/gps/imu", 0.00, 0.00));
/// session.push(Record::stamped("/gps/imu", 0.01, 0.01));
///
/// assert_eq!(session.records("/gps/imu").unwrap().count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    records: Vec<Record>,
    description: String,
}

impl MemorySession {
    /// Create an empty session.
    pub fn new(source_description: &str) -> Self {
        Self {
            records: Vec::new(),
            description: format!("memory: {}", source_description),
        }
    }

    /// Build a single-channel session from (capture, generation) pairs.
    pub fn from_pairs(channel: &str, pairs: &[(f64, f64)]) -> Self {
        let mut session = Self::new(channel);
        for &(capture, generation) in pairs {
            session.push(Record::stamped(channel, capture, generation));
        }
        session
    }

    /// Append a record.
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Number of stored records across all channels.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the session holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Extend<Record> for MemorySession {
    fn extend<T: IntoIterator<Item = Record>>(&mut self, iter: T) {
        self.records.extend(iter);
    }
}

impl SessionStore for MemorySession {
    fn description(&self) -> &str {
        &self.description
    }

    fn channel_counts(&self) -> Result<BTreeMap<String, usize>> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.channel.clone()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    fn records<'a>(&'a self, channel: &'a str) -> Result<Records<'a>> {
        Ok(Box::new(
            self.records
                .iter()
                .filter(move |r| r.channel == channel)
                .cloned()
                .map(Ok),
        ))
    }
}
