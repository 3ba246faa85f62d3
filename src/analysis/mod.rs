//! Interval statistics over a channel's timestamp pairs.
//!
//! This module turns the (capture, generation) pairs of one channel into
//! interval and latency statistics.
//!
//! ## Submodules
//!
//! - [`extract`]: Lazy extraction of timestamp pairs from a [`SessionStore`](crate::SessionStore)
//! - [`stats`]: Mean / max / population stdev and successive differences
//!
//! ## Data Flow
//!
//! ```text
//! SessionStore::records(channel)
//!        │
//!        ▼
//! extract_pairs()  ──▶  TimestampPair (capture, generation)
//!        │
//!        ▼
//! analyze()
//!        │
//!        ├──▶ IntervalSamples (recording, publish, delta columns)
//!        │
//!        └──▶ ChannelSummary (mean / max / stdev of each column)
//! ```

pub mod extract;
pub mod stats;

pub use extract::{extract_pairs, DEFAULT_GENERATION_FIELD};

use stampwatch_types::{ChannelSummary, TimestampPair, MIN_SAMPLES};

use crate::error::Result;

/// Raw per-sample columns derived from a channel's timestamp pairs.
///
/// For N pairs, `recording` and `publish` hold N-1 successive differences
/// of the capture and generation columns respectively, and `delta` holds
/// N capture-minus-generation values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IntervalSamples {
    /// Capture-to-capture intervals.
    pub recording: Vec<f64>,
    /// Generation-to-generation intervals.
    pub publish: Vec<f64>,
    /// Capture time minus generation time, per pair.
    pub delta: Vec<f64>,
}

impl IntervalSamples {
    /// Build the interval columns from aligned pairs.
    pub fn from_pairs(pairs: &[TimestampPair]) -> Self {
        let capture: Vec<f64> = pairs.iter().map(|p| p.capture).collect();
        let generation: Vec<f64> = pairs.iter().map(|p| p.generation).collect();

        Self {
            recording: stats::successive_differences(&capture),
            publish: stats::successive_differences(&generation),
            delta: pairs.iter().map(TimestampPair::delta).collect(),
        }
    }

    /// Iterate (recording, publish) interval rows.
    pub fn interval_rows(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.recording.iter().copied().zip(self.publish.iter().copied())
    }
}

/// Full result for a channel with enough samples.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelAnalysis {
    pub summary: ChannelSummary,
    pub samples: IntervalSamples,
}

/// What analyzing one channel produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// At least [`MIN_SAMPLES`] pairs were available.
    Complete(ChannelAnalysis),
    /// Too few pairs to compute intervals; carries the pair count.
    InsufficientData(usize),
}

impl Outcome {
    /// Number of timestamp pairs the channel had.
    pub fn sample_count(&self) -> usize {
        match self {
            Outcome::Complete(analysis) => analysis.summary.samples,
            Outcome::InsufficientData(count) => *count,
        }
    }

    /// The summary, if the channel had enough data.
    pub fn summary(&self) -> Option<&ChannelSummary> {
        match self {
            Outcome::Complete(analysis) => Some(&analysis.summary),
            Outcome::InsufficientData(_) => None,
        }
    }
}

/// Compute interval and delta statistics for a channel.
///
/// Consumes the whole sequence. Fewer than [`MIN_SAMPLES`] pairs gives
/// [`Outcome::InsufficientData`] without touching the statistics code.
///
/// # Example
///
/// ```
/// use stampwatch::{analyze, Outcome};
/// use stampwatch_types::TimestampPair;
///
/// let pairs = [(0.0, 0.0), (2.0, 1.0), (5.0, 2.0)].map(TimestampPair::from);
/// let Outcome::Complete(result) = analyze(pairs) else { panic!() };
///
/// assert_eq!(result.samples.recording, vec![2.0, 3.0]);
/// assert_eq!(result.summary.recording.mean, 2.5);
/// assert_eq!(result.summary.delta.max, 3.0);
/// ```
pub fn analyze<I>(pairs: I) -> Outcome
where
    I: IntoIterator<Item = TimestampPair>,
{
    let pairs: Vec<TimestampPair> = pairs.into_iter().collect();
    if pairs.len() < MIN_SAMPLES {
        return Outcome::InsufficientData(pairs.len());
    }

    let samples = IntervalSamples::from_pairs(&pairs);
    let summary = ChannelSummary {
        samples: pairs.len(),
        recording: stats::describe(&samples.recording),
        publish: stats::describe(&samples.publish),
        delta: stats::describe(&samples.delta),
    };

    Outcome::Complete(ChannelAnalysis { summary, samples })
}

/// Like [`analyze`], but stops at the first extraction error.
pub fn try_analyze<I>(pairs: I) -> Result<Outcome>
where
    I: IntoIterator<Item = Result<TimestampPair>>,
{
    let pairs = pairs.into_iter().collect::<Result<Vec<_>>>()?;
    Ok(analyze(pairs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn pairs(capture: &[f64], generation: &[f64]) -> Vec<TimestampPair> {
        capture
            .iter()
            .zip(generation)
            .map(|(&c, &g)| TimestampPair::new(c, g))
            .collect()
    }

    fn complete(outcome: Outcome) -> ChannelAnalysis {
        match outcome {
            Outcome::Complete(analysis) => analysis,
            other => panic!("expected complete analysis, got {:?}", other),
        }
    }

    #[test]
    fn test_synchronised_clocks() {
        let t = [0.0, 1.0, 2.0, 3.0, 4.0];
        let result = complete(analyze(pairs(&t, &t)));

        assert_eq!(result.samples.recording, vec![1.0; 4]);
        assert_eq!(result.samples.publish, vec![1.0; 4]);
        assert_eq!(result.samples.delta, vec![0.0; 5]);

        let s = result.summary;
        assert_eq!(s.samples, 5);
        for interval in [s.recording, s.publish] {
            assert_eq!(interval.mean, 1.0);
            assert_eq!(interval.max, 1.0);
            assert_eq!(interval.stdev, 0.0);
        }
        assert_eq!(s.delta.mean, 0.0);
        assert_eq!(s.delta.max, 0.0);
        assert_eq!(s.delta.stdev, 0.0);
    }

    #[test]
    fn test_uneven_capture() {
        let result = complete(analyze(pairs(&[0.0, 2.0, 5.0], &[0.0, 1.0, 2.0])));

        assert_eq!(result.samples.recording, vec![2.0, 3.0]);
        assert_eq!(result.samples.publish, vec![1.0, 1.0]);
        assert_eq!(result.samples.delta, vec![0.0, 1.0, 3.0]);

        let s = result.summary;
        assert!((s.recording.mean - 2.5).abs() < EPS);
        assert_eq!(s.recording.max, 3.0);
        assert!((s.recording.stdev - 0.5).abs() < EPS);
        assert!((s.publish.mean - 1.0).abs() < EPS);
        assert_eq!(s.publish.stdev, 0.0);
        assert!((s.delta.mean - 4.0 / 3.0).abs() < EPS);
        assert_eq!(s.delta.max, 3.0);
    }

    #[test]
    fn test_insufficient_data() {
        for n in 0..MIN_SAMPLES {
            let t: Vec<f64> = (0..n).map(|i| i as f64).collect();
            assert_eq!(analyze(pairs(&t, &t)), Outcome::InsufficientData(n));
        }
        assert_eq!(Outcome::InsufficientData(2).sample_count(), 2);
        assert!(Outcome::InsufficientData(2).summary().is_none());
    }

    #[test]
    fn test_intervals_are_per_column() {
        // Generation runs backwards while capture advances: the publish
        // interval must be negative, not derived from the delta column.
        let result = complete(analyze(pairs(&[0.0, 1.0, 2.0], &[10.0, 9.0, 8.0])));
        assert_eq!(result.samples.recording, vec![1.0, 1.0]);
        assert_eq!(result.samples.publish, vec![-1.0, -1.0]);
        assert_eq!(result.summary.publish.max, -1.0);
        assert_eq!(result.samples.delta, vec![-10.0, -8.0, -6.0]);
    }

    #[test]
    fn test_duplicate_generation_tolerated() {
        let result = complete(analyze(pairs(&[0.0, 1.0, 2.0, 3.0], &[0.0, 0.0, 2.0, 2.0])));
        assert_eq!(result.samples.publish, vec![0.0, 2.0, 0.0]);
        assert_eq!(result.summary.publish.max, 2.0);
    }

    #[test]
    fn test_nan_poisons_channel() {
        let result = complete(analyze(pairs(&[0.0, f64::NAN, 2.0], &[0.0, 1.0, 2.0])));
        assert!(result.summary.recording.mean.is_nan());
        assert!(result.summary.delta.max.is_nan());
        assert!(result.summary.publish.is_finite());
        assert!(!result.summary.is_finite());
    }

    #[test]
    fn test_try_analyze_propagates_error() {
        let items: Vec<Result<TimestampPair>> = vec![
            Ok(TimestampPair::new(0.0, 0.0)),
            Err(Error::FieldMissing {
                channel: "/t".into(),
                field: "header.stamp".into(),
            }),
            Ok(TimestampPair::new(1.0, 1.0)),
        ];
        assert!(matches!(try_analyze(items), Err(Error::FieldMissing { .. })));

        let ok: Vec<Result<TimestampPair>> = vec![Ok(TimestampPair::new(0.0, 0.0))];
        assert_eq!(try_analyze(ok).unwrap(), Outcome::InsufficientData(1));
    }

    #[test]
    fn test_interval_rows() {
        let result = complete(analyze(pairs(&[0.0, 2.0, 5.0], &[0.0, 1.0, 2.0])));
        let rows: Vec<(f64, f64)> = result.samples.interval_rows().collect();
        assert_eq!(rows, vec![(2.0, 1.0), (3.0, 1.0)]);
    }

    proptest! {
        #[test]
        fn prop_sample_counts(
            raw in prop::collection::vec((-1.0e6f64..1.0e6, -1.0e6f64..1.0e6), 3..200)
        ) {
            let n = raw.len();
            let result = complete(analyze(raw.into_iter().map(TimestampPair::from)));
            prop_assert_eq!(result.summary.samples, n);
            prop_assert_eq!(result.samples.delta.len(), n);
            prop_assert_eq!(result.samples.recording.len(), n - 1);
            prop_assert_eq!(result.samples.publish.len(), n - 1);
        }

        #[test]
        fn prop_mean_matches_column(
            capture in prop::collection::vec(0.0f64..1.0e3, 3..100)
        ) {
            let generation: Vec<f64> = capture.iter().map(|c| c * 0.5).collect();
            let result = complete(analyze(pairs(&capture, &generation)));
            let d = &result.samples.delta;
            let expected = d.iter().sum::<f64>() / d.len() as f64;
            prop_assert!((result.summary.delta.mean - expected).abs() < 1e-9);
        }

        #[test]
        fn prop_increasing_capture_gives_positive_intervals(
            steps in prop::collection::vec(1.0e-3f64..10.0, 2..100)
        ) {
            let mut t = 0.0;
            let mut capture = vec![t];
            for step in &steps {
                t += step;
                capture.push(t);
            }
            let result = complete(analyze(pairs(&capture, &capture)));
            prop_assert!(result.samples.recording.iter().all(|&i| i > 0.0));
            prop_assert!(result.summary.recording.mean > 0.0);
        }

        #[test]
        fn prop_constant_rate(
            period in 1.0e-3f64..10.0,
            n in 3usize..500,
            offset in 0.0f64..1.0e3
        ) {
            let capture: Vec<f64> = (0..n).map(|i| offset + i as f64 * period).collect();
            let result = complete(analyze(pairs(&capture, &capture)));
            let tol = 1e-9 * (1.0 + offset + n as f64 * period);
            let r = result.summary.recording;
            prop_assert!((r.mean - period).abs() < tol);
            prop_assert!((r.max - period).abs() < tol);
            prop_assert!(r.stdev < tol);
        }
    }
}
