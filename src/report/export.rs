//! JSON export of a whole batch run.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use stampwatch_types::ChannelSummary;

use crate::analysis::Outcome;
use crate::error::Result;

/// How one channel's analysis ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChannelStatus {
    /// Statistics were computed.
    Complete { summary: ChannelSummary },
    /// Fewer than the minimum number of samples.
    Insufficient { samples: usize },
    /// Extraction or output failed for this channel.
    Failed { error: String },
}

impl From<&Outcome> for ChannelStatus {
    fn from(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Complete(analysis) => ChannelStatus::Complete {
                summary: analysis.summary,
            },
            Outcome::InsufficientData(samples) => ChannelStatus::Insufficient { samples: *samples },
        }
    }
}

/// Result for a single channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelResult {
    pub channel: String,
    pub expected_rate: Option<f64>,
    #[serde(flatten)]
    pub status: ChannelStatus,
}

/// Everything a batch run produced, in channel order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BatchReport {
    pub session: String,
    pub channels: Vec<ChannelResult>,
}

impl BatchReport {
    /// Create an empty report for a session.
    pub fn new(session: impl Into<String>) -> Self {
        Self {
            session: session.into(),
            channels: Vec::new(),
        }
    }

    /// Number of channels with computed statistics.
    pub fn complete(&self) -> usize {
        self.count(|s| matches!(s, ChannelStatus::Complete { .. }))
    }

    /// Number of channels with too few samples.
    pub fn insufficient(&self) -> usize {
        self.count(|s| matches!(s, ChannelStatus::Insufficient { .. }))
    }

    /// Number of channels that failed.
    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, ChannelStatus::Failed { .. }))
    }

    /// Look up a channel's result.
    pub fn get(&self, channel: &str) -> Option<&ChannelResult> {
        self.channels.iter().find(|r| r.channel == channel)
    }

    fn count(&self, pred: impl Fn(&ChannelStatus) -> bool) -> usize {
        self.channels.iter().filter(|r| pred(&r.status)).count()
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &self.to_json())?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    /// The report as a JSON value, with batch totals alongside the channels.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "session": self.session,
            "totals": {
                "channels": self.channels.len(),
                "complete": self.complete(),
                "insufficient": self.insufficient(),
                "failed": self.failed(),
            },
            "channels": self.channels,
        })
    }
}
