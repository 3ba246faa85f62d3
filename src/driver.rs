//! Batch driver: analyze every channel in a table against one session.
//!
//! Each channel runs extract -> analyze -> emit on its own. A channel that
//! fails (missing timestamp field, malformed record, write error) is logged
//! and recorded in the [`BatchReport`], and the next channel runs anyway.

use std::io::Write;

use tracing::{info, warn};

use crate::analysis::{extract_pairs, try_analyze, Outcome, DEFAULT_GENERATION_FIELD};
use crate::config::ChannelTable;
use crate::error::Result;
use crate::report::{self, BatchReport, ChannelResult, ChannelStatus, CsvTarget};
use crate::source::SessionStore;

/// Options shared by every channel of a batch.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Dotted payload path of the generation timestamp.
    pub generation_field: String,
    /// Where to write interval CSV files; `None` disables them.
    pub csv: Option<CsvTarget>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            generation_field: DEFAULT_GENERATION_FIELD.to_string(),
            csv: None,
        }
    }
}

/// Run the analysis for every channel in `table`, writing reports to `out`.
///
/// Channels are processed in table order, each block followed by a blank
/// line. Channels that fail are left out of `out` and show up as
/// [`ChannelStatus::Failed`] in the returned report.
///
/// # Example
///
/// ```
/// use stampwatch::{run_batch, BatchOptions, ChannelTable, MemorySession};
///
/// let session = MemorySession::from_pairs("/gps/fix", &[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
/// let table = ChannelTable::novatel_oem7().select(&["/gps/fix"]);
///
/// let mut out = Vec::new();
/// let report = run_batch(&session, &table, &BatchOptions::default(), &mut out);
/// assert_eq!(report.complete(), 1);
/// ```
pub fn run_batch<S, W>(
    session: &S,
    table: &ChannelTable,
    options: &BatchOptions,
    out: &mut W,
) -> BatchReport
where
    S: SessionStore + ?Sized,
    W: Write,
{
    let mut report = BatchReport::new(session.description());

    for (channel, expected_rate) in table.iter() {
        let status = match run_channel(session, channel, expected_rate, options, out) {
            Ok(outcome) => ChannelStatus::from(&outcome),
            Err(e) => {
                warn!(channel, error = %e, "Channel analysis failed");
                ChannelStatus::Failed {
                    error: e.to_string(),
                }
            }
        };

        if let Err(e) = writeln!(out) {
            warn!(channel, error = %e, "Failed to write report separator");
        }

        report.channels.push(ChannelResult {
            channel: channel.to_string(),
            expected_rate,
            status,
        });
    }

    report
}

fn run_channel<S, W>(
    session: &S,
    channel: &str,
    expected_rate: Option<f64>,
    options: &BatchOptions,
    out: &mut W,
) -> Result<Outcome>
where
    S: SessionStore + ?Sized,
    W: Write,
{
    let pairs = extract_pairs(session, channel, &options.generation_field)?;
    let outcome = try_analyze(pairs)?;

    match &outcome {
        Outcome::Complete(analysis) => {
            let summary = &analysis.summary;
            info!(
                channel,
                samples = summary.samples,
                intervals = summary.intervals(),
                "Analyzed channel"
            );
            if !summary.is_finite() {
                warn!(channel, "Statistics contain NaN or infinite values");
            }
        }
        Outcome::InsufficientData(n) => info!(channel, samples = n, "Insufficient data"),
    }

    report::emit(out, channel, expected_rate, &outcome, options.csv.as_ref())?;
    Ok(outcome)
}
