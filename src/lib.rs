//! # stampwatch
//!
//! Offline timing analysis for recorded sensor-driver sessions.
//!
//! For every channel of interest this crate pairs each message's capture
//! time (when the recorder stored it) with its generation time (the stamp
//! the driver put in the payload), and reports how regularly both clocks
//! tick and how far apart they are. The numbers are used to check that a
//! driver publishes at its configured rate, with acceptable jitter and
//! acceptable latency between generation and capture.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          driver                               │
//! │  ChannelTable ──▶ for each channel:                           │
//! │                                                               │
//! │  ┌─────────┐    ┌──────────┐    ┌──────────┐    ┌─────────┐  │
//! │  │ source  │───▶│ extract  │───▶│ analysis │───▶│ report  │  │
//! │  │(session)│    │ (pairs)  │    │ (stats)  │    │(console,│  │
//! │  └─────────┘    └──────────┘    └──────────┘    │ CSV)    │  │
//! │       ▲                                          └─────────┘  │
//! │  FileSession | MemorySession                                  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: Session store abstraction ([`SessionStore`] trait) with an
//!   NDJSON file reader and an in-memory store
//! - **[`analysis`]**: Timestamp pair extraction and the interval statistics engine
//! - **[`report`]**: Console report blocks, interval CSV files and JSON export
//! - **[`driver`]**: Runs the pipeline once per configured channel
//! - **[`config`]**: Layered settings and the channel -> expected rate table
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Analyze ~/.ros/run1.bag.jsonl against the built-in channel table
//! stampwatch run1
//!
//! # Also write interval CSV files into ./reports
//! stampwatch run1 --csv --output-dir reports
//!
//! # Every channel in the session, exported as JSON
//! stampwatch ./run1.bag.jsonl --all --export run1.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use stampwatch::{run_batch, BatchOptions, ChannelTable, MemorySession, Record};
//!
//! let mut session = MemorySession::new("example");
//! for i in 0..10 {
//!     let t = i as f64 * 0.02;
//!     session.push(Record::stamped("/gps/fix", t + 0.001, t));
//! }
//!
//! let table = ChannelTable::novatel_oem7().select(&["/gps/fix"]);
//! let mut out = Vec::new();
//! let report = run_batch(&session, &table, &BatchOptions::default(), &mut out);
//!
//! assert_eq!(report.complete(), 1);
//! assert!(String::from_utf8(out).unwrap().starts_with("topic: '/gps/fix'"));
//! ```

pub mod analysis;
pub mod config;
pub mod driver;
pub mod error;
pub mod report;
pub mod source;

// Re-export main types for convenience
pub use analysis::{
    analyze, extract_pairs, try_analyze, ChannelAnalysis, IntervalSamples, Outcome,
    DEFAULT_GENERATION_FIELD,
};
pub use config::{ChannelEntry, ChannelTable, Settings};
pub use driver::{run_batch, BatchOptions};
pub use error::{Error, Result};
pub use report::{BatchReport, ChannelResult, ChannelStatus, CsvTarget};
pub use source::{FileSession, MemorySession, Record, SessionStore, SESSION_EXTENSION};
pub use stampwatch_types::{ChannelSummary, Stamp, Stats, TimestampPair, MIN_SAMPLES};
