//! CSV side files with raw per-sample intervals.
//!
//! One file per channel, two columns (recording interval, publish
//! interval), one row per interval sample. Values use `%.18e` style
//! scientific notation so the same input always produces the same bytes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::analysis::IntervalSamples;
use crate::error::Result;

/// Where interval CSV files go and how they are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTarget {
    dir: PathBuf,
    session: String,
}

impl CsvTarget {
    /// Create a target writing into `dir` for the named session.
    pub fn new(dir: impl Into<PathBuf>, session: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            session: session.into(),
        }
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path for a channel: `<dir>/<session>.<channel>.csv` with path
    /// separators in the channel name replaced by `_`.
    pub fn path_for(&self, channel: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}.csv", self.session, sanitize_channel(channel)))
    }

    /// Write a channel's interval rows and return the file path.
    pub fn write(&self, channel: &str, samples: &IntervalSamples) -> Result<PathBuf> {
        let path = self.path_for(channel);
        let mut writer = BufWriter::new(File::create(&path)?);
        write_rows(&mut writer, samples)?;
        writer.flush()?;
        debug!(path = %path.display(), rows = samples.recording.len(), "Wrote interval CSV");
        Ok(path)
    }
}

/// Replace path separators so a channel name is usable in a file name.
pub fn sanitize_channel(channel: &str) -> String {
    channel.replace(['/', '\\'], "_")
}

/// Write `recording,publish` rows.
pub fn write_rows<W: Write>(out: &mut W, samples: &IntervalSamples) -> std::io::Result<()> {
    for (recording, publish) in samples.interval_rows() {
        writeln!(out, "{},{}", format_sci(recording), format_sci(publish))?;
    }
    Ok(())
}

/// Format like C's `%.18e`: 18 fractional digits, signed two-digit exponent.
pub fn format_sci(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let formatted = format!("{:.18e}", value);
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };
    match exponent.parse::<i32>() {
        Ok(exp) => {
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.unsigned_abs())
        }
        Err(_) => formatted,
    }
}
