//! Settings and the channel table.
//!
//! Settings are layered with the `config` crate: built-in defaults, then an
//! optional TOML file, then `STAMPWATCH_*` environment variables. Command
//! line flags are applied on top by the binary.
//!
//! ```toml
//! session_dir = "/data/sessions"
//! output_dir = "reports"
//! csv = true
//! generation_field = "header.stamp"
//!
//! [[channels]]
//! name = "/novatel/oem7/bestpos"
//! rate = 0.1
//!
//! [[channels]]
//! name = "/gps/imu"
//! rate = 0.01
//! ```

use std::collections::btree_map::{self, BTreeMap};
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::analysis::DEFAULT_GENERATION_FIELD;
use crate::error::{Error, Result};

/// Environment variable prefix for settings overrides.
pub const ENV_PREFIX: &str = "STAMPWATCH";

/// Session directory under the user's home, used when none is configured.
pub const DEFAULT_SESSION_SUBDIR: &str = ".ros";

/// Channels published by the NovAtel OEM7 driver and the expected value
/// shown next to each, as configured by its standard init commands.
const NOVATEL_OEM7_CHANNELS: &[(&str, f64)] = &[
    ("/novatel/oem7/bestpos", 0.1),
    ("/novatel/oem7/bestvel", 0.1),
    ("/novatel/oem7/bestutm", 1.0),
    ("/novatel/oem7/bestgnsspos", 1.0),
    ("/novatel/oem7/ppppos", 1.0),
    ("/novatel/oem7/terrastarinfo", 1.0),
    ("/novatel/oem7/terrastarstatus", 1.0),
    ("/novatel/oem7/time", 1.0),
    ("/novatel/oem7/corrimu", 0.01),
    ("/novatel/oem7/inspva", 0.02),
    ("/novatel/oem7/inspvax", 1.0),
    ("/novatel/oem7/insstdev", 1.0),
    // Same rate as inspva
    ("/gps/gps", 0.02),
    ("/gps/fix", 0.02),
    // Same as corrimu
    ("/gps/imu", 0.01),
];

/// One configured channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelEntry {
    pub name: String,
    pub rate: f64,
}

/// Channel name to expected rate.
///
/// The rate is only displayed, never enforced. A `None` rate marks a
/// channel that is analyzed without a configured expectation (for example
/// when every channel in a session is selected). Iteration is sorted by
/// channel name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChannelTable {
    entries: BTreeMap<String, Option<f64>>,
}

impl ChannelTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in NovAtel OEM7 driver table.
    pub fn novatel_oem7() -> Self {
        Self {
            entries: NOVATEL_OEM7_CHANNELS
                .iter()
                .map(|&(name, rate)| (name.to_string(), Some(rate)))
                .collect(),
        }
    }

    /// Build a table from configured entries.
    ///
    /// Duplicate names and non-finite rates are configuration errors.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = ChannelEntry>,
    {
        let mut table = Self::new();
        for entry in entries {
            table.insert(entry.name, entry.rate)?;
        }
        Ok(table)
    }

    /// Add a channel with an expected rate.
    pub fn insert(&mut self, name: impl Into<String>, rate: f64) -> Result<()> {
        let name = name.into();
        if !rate.is_finite() {
            return Err(Error::Config(format!(
                "channel {name}: rate must be a finite number"
            )));
        }
        match self.entries.entry(name) {
            btree_map::Entry::Occupied(e) => Err(Error::Config(format!(
                "channel {} configured more than once",
                e.key()
            ))),
            btree_map::Entry::Vacant(e) => {
                e.insert(Some(rate));
                Ok(())
            }
        }
    }

    /// Table for the given channels, taking rates from `self` where known.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Self {
        Self {
            entries: names
                .iter()
                .map(|name| {
                    let name = name.as_ref();
                    (name.to_string(), self.rate(name))
                })
                .collect(),
        }
    }

    /// Configured rate for a channel, if any.
    pub fn rate(&self, channel: &str) -> Option<f64> {
        self.entries.get(channel).copied().flatten()
    }

    /// Check whether a channel is in the table.
    pub fn contains(&self, channel: &str) -> bool {
        self.entries.contains_key(channel)
    }

    /// Iterate (channel, rate) in channel-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.entries.iter().map(|(name, rate)| (name.as_str(), *rate))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolved settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Directory holding `<name>.bag.jsonl` sessions.
    #[serde(default)]
    pub session_dir: Option<PathBuf>,

    /// Directory CSV files are written to.
    pub output_dir: PathBuf,

    /// Whether to write interval CSV files.
    pub csv: bool,

    /// Dotted payload path of the generation timestamp.
    pub generation_field: String,

    /// Channel table; the built-in table is used when absent.
    #[serde(default)]
    pub channels: Option<Vec<ChannelEntry>>,
}

impl Settings {
    /// Load settings from defaults, an optional file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("output_dir", ".")?
            .set_default("csv", false)?
            .set_default("generation_field", DEFAULT_GENERATION_FIELD)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Configured session directory, or `~/.ros`.
    pub fn session_dir(&self) -> PathBuf {
        self.session_dir.clone().unwrap_or_else(default_session_dir)
    }

    /// The channel table: configured entries, or the built-in table.
    pub fn channel_table(&self) -> Result<ChannelTable> {
        match &self.channels {
            Some(entries) => ChannelTable::from_entries(entries.iter().cloned()),
            None => Ok(ChannelTable::novatel_oem7()),
        }
    }
}

/// `~/.ros`, or `.ros` relative to the working directory without a home.
pub fn default_session_dir() -> PathBuf {
    dirs_next::home_dir()
        .unwrap_or_default()
        .join(DEFAULT_SESSION_SUBDIR)
}
