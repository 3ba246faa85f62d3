//! Timestamp pair extraction from a session channel.

use serde::Deserialize;
use serde_json::Value;
use stampwatch_types::{Stamp, TimestampPair};

use crate::error::{Error, Result};
use crate::source::SessionStore;

/// Payload field holding the producer's timestamp in standard headers.
pub const DEFAULT_GENERATION_FIELD: &str = "header.stamp";

/// Lazily yield (capture, generation) pairs for one channel.
///
/// Pairs come out in storage order. The iterator is single-pass; call
/// again to rescan the session. Each item fails with
/// [`Error::FieldMissing`] if the payload has no timestamp at `field`
/// (a dotted path such as `header.stamp`).
///
/// # Example
///
/// ```
/// use stampwatch::{extract_pairs, MemorySession, DEFAULT_GENERATION_FIELD};
///
/// let session = MemorySession::from_pairs("/gps/fix", &[(1.0, 0.8), (2.0, 1.8)]);
/// let pairs: Vec<_> = extract_pairs(&session, "/gps/fix", DEFAULT_GENERATION_FIELD)
///     .unwrap()
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(pairs.len(), 2);
/// assert_eq!(pairs[1].generation, 1.8);
/// ```
pub fn extract_pairs<'a, S>(
    session: &'a S,
    channel: &'a str,
    field: &'a str,
) -> Result<impl Iterator<Item = Result<TimestampPair>> + 'a>
where
    S: SessionStore + ?Sized,
{
    let records = session.records(channel)?;
    Ok(records.map(move |record| {
        let record = record?;
        let generation =
            generation_stamp(&record.payload, field).ok_or_else(|| Error::FieldMissing {
                channel: channel.to_string(),
                field: field.to_string(),
            })?;
        Ok(TimestampPair::new(
            record.capture_time.as_secs_f64(),
            generation.as_secs_f64(),
        ))
    }))
}

/// Follow a dotted path into the payload and read a timestamp there.
fn generation_stamp(payload: &Value, field: &str) -> Option<Stamp> {
    let value = field
        .split('.')
        .filter(|segment| !segment.is_empty())
        .try_fold(payload, |value, segment| value.get(segment))?;
    Stamp::deserialize(value).ok()
}
