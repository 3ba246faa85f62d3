//! Per-channel report output.
//!
//! Formats analysis outcomes as the plain-text block printed for each
//! channel, and optionally persists the raw interval columns.
//!
//! ## Submodules
//!
//! - [`csv`]: Interval CSV side files ([`CsvTarget`])
//! - [`export`]: Whole-batch JSON export ([`BatchReport`])

pub mod csv;
pub mod export;

pub use self::csv::CsvTarget;
pub use export::{BatchReport, ChannelResult, ChannelStatus};

use std::io::Write;
use std::path::PathBuf;

use stampwatch_types::{ChannelSummary, Stats};

use crate::analysis::Outcome;
use crate::error::Result;

/// Column header line of the summary table.
const COLUMN_HEADER: &str =
    "                                             mean,                  max,               stdev";

const RECORDING_LABEL: &str = "       Bag Recording interval:               ";
const PUBLISH_LABEL: &str = "       Message publish interval:             ";
const DELTA_LABEL: &str = "       Bag Rec - Message Pub Delta:          ";

/// Write the report for one channel, and its CSV file if requested.
///
/// Insufficient channels get a single notice line and never a CSV file.
/// The CSV file is written before the console block, so a channel whose
/// CSV write fails leaves nothing in `out`. Returns the CSV path when one
/// was written.
pub fn emit<W: Write>(
    out: &mut W,
    channel: &str,
    expected_rate: Option<f64>,
    outcome: &Outcome,
    csv: Option<&CsvTarget>,
) -> Result<Option<PathBuf>> {
    match outcome {
        Outcome::InsufficientData(samples) => {
            writeln!(out, "{}", render_insufficient(channel, *samples))?;
            Ok(None)
        }
        Outcome::Complete(analysis) => {
            let written = match csv {
                Some(target) => Some(target.write(channel, &analysis.samples)?),
                None => None,
            };
            write!(out, "{}", render_summary(channel, expected_rate, &analysis.summary))?;
            Ok(written)
        }
    }
}

/// One-line notice for a channel with too few samples.
pub fn render_insufficient(channel: &str, samples: usize) -> String {
    format!("Topic: {}: Insufficient data: {} samples", channel, samples)
}

/// Multi-line summary block, newline-terminated.
pub fn render_summary(channel: &str, expected_rate: Option<f64>, summary: &ChannelSummary) -> String {
    format!(
        "topic: '{}', exp interval= {}. samples= {}:\n{}\n{}\n{}\n{}\n",
        channel,
        format_rate(expected_rate),
        summary.samples,
        COLUMN_HEADER,
        render_row(RECORDING_LABEL, &summary.recording),
        render_row(PUBLISH_LABEL, &summary.publish),
        render_row(DELTA_LABEL, &summary.delta),
    )
}

// Shortest round-trip form: NaN prints as `NaN` and 1e-5 as `1e-5`, not
// the printf-style `nan` / `1e-05` that older report files may contain.
fn render_row(label: &str, stats: &Stats) -> String {
    format!("{}{:?}, {:?}, {:?}", label, stats.mean, stats.max, stats.stdev)
}

fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(rate) => format!("{:?}", rate),
        None => "None".to_string(),
    }
}
