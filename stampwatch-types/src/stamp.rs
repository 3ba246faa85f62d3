//! Timestamp representation for serialization.
//!
//! Recorders write timestamps either as floating-point seconds or as a
//! split seconds/nanoseconds pair. Both forms are accepted and normalised
//! to `f64` seconds before any arithmetic happens.

/// Nanoseconds per second.
const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// A timestamp as it appears in a recorded session.
///
/// With the `serde` feature this deserializes from either a bare number
/// (`12.5`) or an object (`{"secs": 12, "nsecs": 500000000}`). The ROS 2
/// field names `sec` / `nanosec` are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Stamp {
    /// Seconds since an arbitrary epoch.
    Seconds(f64),

    /// Whole seconds plus a nanosecond remainder.
    Parts {
        /// Whole seconds.
        #[cfg_attr(feature = "serde", serde(alias = "sec"))]
        secs: u32,
        /// Nanoseconds past `secs`.
        #[cfg_attr(feature = "serde", serde(alias = "nanosec"))]
        nsecs: u32,
    },
}

impl Stamp {
    /// Create a stamp from whole seconds and nanoseconds.
    pub const fn from_parts(secs: u32, nsecs: u32) -> Self {
        Stamp::Parts { secs, nsecs }
    }

    /// Get the value in seconds.
    pub fn as_secs_f64(&self) -> f64 {
        match *self {
            Stamp::Seconds(s) => s,
            Stamp::Parts { secs, nsecs } => f64::from(secs) + f64::from(nsecs) / NANOS_PER_SEC,
        }
    }
}

impl From<f64> for Stamp {
    fn from(secs: f64) -> Self {
        Stamp::Seconds(secs)
    }
}

impl Default for Stamp {
    fn default() -> Self {
        Stamp::Seconds(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_passthrough() {
        assert_eq!(Stamp::Seconds(3.25).as_secs_f64(), 3.25);
    }

    #[test]
    fn parts_to_seconds() {
        let s = Stamp::from_parts(12, 500_000_000);
        assert!((s.as_secs_f64() - 12.5).abs() < 1e-12);
    }

    #[test]
    fn default_is_zero() {
        assert_eq!(Stamp::default().as_secs_f64(), 0.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_float() {
        let s: Stamp = serde_json::from_str("1.5").unwrap();
        assert_eq!(s, Stamp::Seconds(1.5));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_integer_as_seconds() {
        let s: Stamp = serde_json::from_str("7").unwrap();
        assert_eq!(s.as_secs_f64(), 7.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_ros1_parts() {
        let s: Stamp = serde_json::from_str(r#"{"secs": 2, "nsecs": 250000000}"#).unwrap();
        assert_eq!(s, Stamp::from_parts(2, 250_000_000));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_ros2_parts() {
        let s: Stamp = serde_json::from_str(r#"{"sec": 2, "nanosec": 750000000}"#).unwrap();
        assert!((s.as_secs_f64() - 2.75).abs() < 1e-12);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn reject_non_timestamp() {
        assert!(serde_json::from_str::<Stamp>(r#""yesterday""#).is_err());
        assert!(serde_json::from_str::<Stamp>(r#"{"secs": 2}"#).is_err());
    }
}
