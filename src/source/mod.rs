//! Session store abstraction for reading recorded message streams.
//!
//! This module provides a trait-based abstraction over recorded sessions
//! so the analysis code never depends on a particular container format.
//! A store only has to list the channels it holds and replay one
//! channel's records in the order they were stored.

mod file;
mod memory;
mod record;

pub use file::{FileSession, SESSION_EXTENSION};
pub use memory::MemorySession;
pub use record::Record;

use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::error::Result;

/// Boxed iterator over one channel's records, in storage order.
pub type Records<'a> = Box<dyn Iterator<Item = Result<Record>> + 'a>;

/// Trait for reading records from a recorded session.
///
/// Every call to [`records`](SessionStore::records) starts again from the
/// beginning of the session. There is no shared cursor, so channels can be
/// analyzed in any order and independently of one another.
///
/// # Example
///
/// ```
/// use stampwatch::{MemorySession, SessionStore};
///
/// let session = MemorySession::from_pairs("/gps/fix", &[(0.0, 0.0), (1.0, 0.9)]);
/// assert_eq!(session.channels().unwrap(), vec!["/gps/fix".to_string()]);
/// assert_eq!(session.records("/gps/fix").unwrap().count(), 2);
/// ```
pub trait SessionStore: Debug {
    /// Returns a human-readable description of the session.
    fn description(&self) -> &str;

    /// Count records per channel across the whole session.
    fn channel_counts(&self) -> Result<BTreeMap<String, usize>>;

    /// Iterate the records of one channel in storage order.
    ///
    /// Items are yielded lazily; an `Err` item means the underlying store
    /// could not produce the next record.
    fn records<'a>(&'a self, channel: &'a str) -> Result<Records<'a>>;

    /// Distinct channel names in the session, sorted.
    fn channels(&self) -> Result<Vec<String>> {
        Ok(self.channel_counts()?.into_keys().collect())
    }
}
