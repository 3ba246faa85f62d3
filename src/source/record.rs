//! Shared record type for recorded sessions.
//!
//! This matches the line format written by session recorders: one JSON
//! object per line holding the channel name, the recorder's capture
//! timestamp and the message payload as the producer sent it.

use serde::{Deserialize, Serialize};
use stampwatch_types::Stamp;

/// A single stored message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Channel (topic) the message was published on.
    pub channel: String,

    /// When the recorder stored the message.
    pub capture_time: Stamp,

    /// The message itself. The generation timestamp lives somewhere inside,
    /// usually at `header.stamp`.
    pub payload: serde_json::Value,
}

impl Record {
    /// Create a new record.
    pub fn new(
        channel: impl Into<String>,
        capture_time: impl Into<Stamp>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            channel: channel.into(),
            capture_time: capture_time.into(),
            payload,
        }
    }

    /// Create a record whose payload carries only a standard header stamp.
    pub fn stamped(channel: impl Into<String>, capture_time: f64, generation_time: f64) -> Self {
        Self::new(
            channel,
            capture_time,
            serde_json::json!({ "header": { "stamp": generation_time } }),
        )
    }
}

/// Minimal view of a record used when only the channel matters.
#[derive(Debug, Deserialize)]
pub(crate) struct ChannelOnly {
    pub channel: String,
}
