//! # stampwatch-types
//!
//! Core types for timing analysis of recorded message streams. This crate
//! defines the shared vocabulary between session readers, the interval
//! statistics engine and anything that consumes its exported reports.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: Core types work without any serialization framework
//! - **Optional serialization**: Enable the `serde` feature for JSON and friends
//! - **Clock agnostic**: Timestamps are plain seconds; both ROS 1 (`secs`/`nsecs`)
//!   and ROS 2 (`sec`/`nanosec`) stamp layouts deserialize into [`Stamp`]
//!
//! ## Features
//!
//! - `std` (default): Standard library support
//! - `serde`: Serialization via serde
//!
//! ## Example
//!
//! ```rust
//! use stampwatch_types::{Stamp, TimestampPair};
//!
//! let capture = Stamp::from_parts(12, 500_000_000);
//! let generation = Stamp::Seconds(12.25);
//!
//! let pair = TimestampPair::new(capture.as_secs_f64(), generation.as_secs_f64());
//! assert!((pair.delta() - 0.25).abs() < 1e-9);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

mod pair;
mod stamp;
mod summary;

pub use pair::*;
pub use stamp::*;
pub use summary::*;

/// Minimum number of timestamp pairs needed before intervals are computed.
///
/// Channels with fewer samples are reported as insufficient rather than
/// producing statistics over one or zero intervals.
pub const MIN_SAMPLES: usize = 3;
