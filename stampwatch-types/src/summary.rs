//! Summary statistics for a single channel.

/// Descriptive statistics over one column of samples.
///
/// `stdev` is the population standard deviation (divisor N). Non-finite
/// inputs are not filtered, so a single NaN sample makes every field NaN.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    /// Arithmetic mean.
    pub mean: f64,

    /// Largest sample.
    pub max: f64,

    /// Population standard deviation.
    pub stdev: f64,
}

impl Stats {
    /// Create stats from precomputed values.
    pub const fn new(mean: f64, max: f64, stdev: f64) -> Self {
        Self { mean, max, stdev }
    }

    /// Check whether every field is a finite number.
    pub fn is_finite(&self) -> bool {
        self.mean.is_finite() && self.max.is_finite() && self.stdev.is_finite()
    }
}

/// Interval and latency statistics for one channel of a recorded session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelSummary {
    /// Number of timestamp pairs the statistics were computed from.
    pub samples: usize,

    /// Interval between successive recorder (capture) timestamps.
    pub recording: Stats,

    /// Interval between successive producer (generation) timestamps.
    pub publish: Stats,

    /// Capture time minus generation time, per message.
    pub delta: Stats,
}

impl ChannelSummary {
    /// Number of interval samples (one fewer than timestamp pairs).
    pub fn intervals(&self) -> usize {
        self.samples.saturating_sub(1)
    }

    /// Check whether all three statistics are finite.
    ///
    /// A `false` here means the session carried NaN or infinite stamps
    /// for this channel.
    pub fn is_finite(&self) -> bool {
        self.recording.is_finite() && self.publish.is_finite() && self.delta.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intervals_is_samples_minus_one() {
        let summary = ChannelSummary {
            samples: 5,
            ..Default::default()
        };
        assert_eq!(summary.intervals(), 4);
        assert_eq!(ChannelSummary::default().intervals(), 0);
    }

    #[test]
    fn nan_is_not_finite() {
        let mut summary = ChannelSummary {
            samples: 3,
            ..Default::default()
        };
        assert!(summary.is_finite());

        summary.publish = Stats::new(f64::NAN, 1.0, 0.0);
        assert!(!summary.is_finite());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialize_summary() {
        let summary = ChannelSummary {
            samples: 3,
            recording: Stats::new(2.5, 3.0, 0.5),
            publish: Stats::new(1.0, 1.0, 0.0),
            delta: Stats::new(1.5, 3.0, 1.25),
        };
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["samples"], 3);
        assert_eq!(json["recording"]["mean"], 2.5);
        assert_eq!(json["publish"]["stdev"], 0.0);

        let back: ChannelSummary = serde_json::from_value(json).unwrap();
        assert_eq!(back, summary);
    }
}
