//! Feed timestamp handling.
//!
//! The 511 feeds supply departure times as fixed-width strings of the form
//! `YYYY-MM-DDTHH:MM` followed by four trailing characters (seconds residue
//! and zone marker) that carry no information the board needs. The prefix is
//! minute-precise and expressed in UTC.

use chrono::{DateTime, Local, NaiveDateTime, Utc};

/// Byte length of the `YYYY-MM-DDTHH:MM` prefix.
const PREFIX_LEN: usize = 16;

/// Number of trailing characters after the prefix, discarded before parsing.
const SUFFIX_CHARS: usize = 4;

/// Error returned when a feed timestamp cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed feed timestamp {raw:?}: {reason}")]
pub struct MalformedTimestamp {
    raw: String,
    reason: &'static str,
}

impl MalformedTimestamp {
    fn new(raw: &str, reason: &'static str) -> Self {
        Self {
            raw: raw.to_string(),
            reason,
        }
    }
}

/// Parse a feed timestamp into an absolute instant.
///
/// The four trailing characters are discarded; the remaining prefix must be
/// exactly `YYYY-MM-DDTHH:MM` and is read as UTC with zero seconds.
///
/// # Examples
///
/// ```
/// use caltrain_board::domain::parse_feed_timestamp;
/// use chrono::{TimeZone, Utc};
///
/// let instant = parse_feed_timestamp("2024-03-01T08:15:00Z").unwrap();
/// assert_eq!(instant, Utc.with_ymd_and_hms(2024, 3, 1, 8, 15, 0).unwrap());
///
/// // Missing the 'T' separator
/// assert!(parse_feed_timestamp("2024-03-01 08:15:00Z").is_err());
/// ```
pub fn parse_feed_timestamp(raw: &str) -> Result<DateTime<Utc>, MalformedTimestamp> {
    let prefix = raw
        .get(..PREFIX_LEN)
        .ok_or_else(|| MalformedTimestamp::new(raw, "too short"))?;

    if raw[PREFIX_LEN..].chars().count() != SUFFIX_CHARS {
        return Err(MalformedTimestamp::new(
            raw,
            "expected exactly 4 trailing characters",
        ));
    }

    let parsed = NaiveDateTime::parse_from_str(prefix, "%Y-%m-%dT%H:%M")
        .map_err(|_| MalformedTimestamp::new(raw, "expected YYYY-MM-DDTHH:MM prefix"))?;

    Ok(parsed.and_utc())
}

/// Convert an absolute instant to the viewer's local wall-clock time.
///
/// The offset is computed from a single clock reading as "local now minus
/// UTC now" and applied to the instant. Known limitation: this uses *today's*
/// UTC offset even for a timestamp on a different calendar date, so a
/// timestamp on the other side of a DST transition shifts by the wrong
/// offset. The program deliberately carries no timezone database, and
/// departure boards only show times a few hours out, so this stays.
pub fn to_local(instant: DateTime<Utc>) -> NaiveDateTime {
    let now = Utc::now();
    let offset = now.with_timezone(&Local).naive_local() - now.naive_utc();
    instant.naive_utc() + offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn parse_valid_timestamp() {
        let instant = parse_feed_timestamp("2024-03-01T08:15xxxx").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 3, 1, 8, 15, 0).unwrap());
    }

    #[test]
    fn suffix_content_is_ignored() {
        let a = parse_feed_timestamp("2024-03-01T08:15:00Z").unwrap();
        let b = parse_feed_timestamp("2024-03-01T08:15abcd").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn seconds_are_zero() {
        // The ":59Z" tail is discarded, not parsed as seconds
        let instant = parse_feed_timestamp("2024-03-01T08:15:59Z").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 3, 1, 8, 15, 0).unwrap());
    }

    #[test]
    fn reject_missing_separator() {
        assert!(parse_feed_timestamp("2024-03-01 08:15:00Z").is_err());
    }

    #[test]
    fn reject_wrong_width() {
        assert!(parse_feed_timestamp("").is_err());
        assert!(parse_feed_timestamp("2024-03-01T08:15").is_err());
        assert!(parse_feed_timestamp("2024-03-01T08:15:00").is_err());
        assert!(parse_feed_timestamp("2024-03-01T08:15:00+00:00").is_err());
    }

    #[test]
    fn reject_non_digit_fields() {
        assert!(parse_feed_timestamp("2024-03-01T0a:15:00Z").is_err());
        assert!(parse_feed_timestamp("XXXX-03-01T08:15:00Z").is_err());
    }

    #[test]
    fn reject_out_of_range_fields() {
        assert!(parse_feed_timestamp("2024-13-01T08:15:00Z").is_err());
        assert!(parse_feed_timestamp("2024-03-01T25:15:00Z").is_err());
        assert!(parse_feed_timestamp("2024-03-01T08:61:00Z").is_err());
    }

    #[test]
    fn multibyte_suffix_does_not_panic() {
        // Four non-ASCII trailing characters still count as four
        assert!(parse_feed_timestamp("2024-03-01T08:15éééé").is_ok());
        // A multibyte character straddling the prefix boundary is malformed
        assert!(parse_feed_timestamp("2024-03-01T08:1éxxxx").is_err());
    }

    #[test]
    fn error_display_names_the_input() {
        let err = parse_feed_timestamp("bogus").unwrap_err();
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn to_local_preserves_durations() {
        let a = parse_feed_timestamp("2024-03-01T08:15:00Z").unwrap();
        let b = parse_feed_timestamp("2024-03-01T09:45:00Z").unwrap();
        assert_eq!(to_local(b) - to_local(a), Duration::minutes(90));
    }

    #[test]
    fn to_local_applies_current_offset() {
        let now = Utc::now();
        let expected_offset = now.with_timezone(&Local).naive_local() - now.naive_utc();
        // Allow for the clock ticking between the two offset computations
        let diff = (to_local(now) - now.naive_utc()) - expected_offset;
        assert!(diff.num_seconds().abs() < 2);
    }
}
