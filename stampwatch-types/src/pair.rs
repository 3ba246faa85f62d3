//! Capture/generation timestamp pairs.

/// The two clocks observed for one recorded message.
///
/// `capture` is assigned by the recorder when the message entered the
/// session; `generation` is the stamp the producer embedded in the payload.
/// Within one channel `capture` is non-decreasing. Nothing is assumed about
/// the ordering of `generation`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimestampPair {
    /// Recorder clock, in seconds.
    pub capture: f64,

    /// Producer clock, in seconds.
    pub generation: f64,
}

impl TimestampPair {
    /// Create a new pair.
    pub const fn new(capture: f64, generation: f64) -> Self {
        Self {
            capture,
            generation,
        }
    }

    /// Capture time minus generation time.
    ///
    /// Positive when the recorder saw the message after the producer
    /// stamped it. The sign is only meaningful when both clocks are
    /// synchronised.
    pub fn delta(&self) -> f64 {
        self.capture - self.generation
    }
}

impl From<(f64, f64)> for TimestampPair {
    fn from((capture, generation): (f64, f64)) -> Self {
        Self::new(capture, generation)
    }
}
