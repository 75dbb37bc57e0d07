//! Execution-timestamp parsing.
//!
//! Broker exports persist timestamps without a UTC offset, which is
//! ambiguous between UTC and the venue's wall clock. The convention here:
//! **naive timestamps are venue-local time** (default New York), converted
//! to UTC at ingestion. Daily/weekly bucketing converts back to the same
//! zone, so date boundaries line up with the venue's trading day.
//! Timestamps that do carry an offset are honored as written.
//!
//! Parse failures are hard errors — a defaulted timestamp would silently
//! break FIFO ordering, so the caller must be told.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Venue zone assumed for naive timestamps when no override is configured.
pub const DEFAULT_VENUE: Tz = chrono_tz::America::New_York;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors from [`parse_execution_time`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    /// Empty or whitespace-only input.
    Empty,
    /// No supported format matched.
    Unrecognized(String),
    /// The wall-clock time does not exist in the venue zone (DST spring
    /// forward) and no valid instant could be resolved.
    NonexistentLocal(String),
}

impl fmt::Display for TimeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeParseError::Empty => write!(f, "timestamp is empty"),
            TimeParseError::Unrecognized(raw) => {
                write!(f, "unrecognized timestamp format: '{raw}'")
            }
            TimeParseError::NonexistentLocal(raw) => {
                write!(f, "timestamp '{raw}' does not exist in the venue time zone")
            }
        }
    }
}

impl std::error::Error for TimeParseError {}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Naive datetime formats accepted from broker exports, tried in order.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    // Flex-statement style: 20250303;150102
    "%Y%m%d;%H%M%S",
];

/// Bare-date formats; resolved to venue midnight.
const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];

/// Parse an execution timestamp into UTC.
///
/// Accepted inputs:
/// - RFC 3339 with an explicit offset (the offset wins over `venue`);
/// - `YYYY-MM-DD HH:MM[:SS]` and `YYYYMMDD;HHMMSS`, read as `venue` wall
///   clock;
/// - bare `YYYY-MM-DD` / `YYYYMMDD`, read as venue midnight.
///
/// DST-ambiguous wall-clock times resolve to the earliest valid instant.
pub fn parse_execution_time(raw: &str, venue: Tz) -> Result<DateTime<Utc>, TimeParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(TimeParseError::Empty);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return local_to_utc(naive, venue, raw);
        }
    }

    for fmt in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            let naive = date
                .and_hms_opt(0, 0, 0)
                .ok_or_else(|| TimeParseError::Unrecognized(raw.to_string()))?;
            return local_to_utc(naive, venue, raw);
        }
    }

    Err(TimeParseError::Unrecognized(raw.to_string()))
}

fn local_to_utc(naive: NaiveDateTime, venue: Tz, raw: &str) -> Result<DateTime<Utc>, TimeParseError> {
    venue
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| TimeParseError::NonexistentLocal(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn naive_datetime_is_venue_local() {
        // 15:30 New York in March (EDT, UTC-4) => 19:30 UTC.
        let dt = parse_execution_time("2025-03-14 15:30:00", DEFAULT_VENUE).unwrap();
        assert_eq!(dt.hour(), 19);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn flex_format_parses() {
        let dt = parse_execution_time("20250114;093000", DEFAULT_VENUE).unwrap();
        // January: EST, UTC-5.
        assert_eq!(dt.hour(), 14);
    }

    #[test]
    fn explicit_offset_wins_over_venue() {
        let dt = parse_execution_time("2025-03-14T15:30:00+00:00", DEFAULT_VENUE).unwrap();
        assert_eq!(dt.hour(), 15);
    }

    #[test]
    fn bare_date_is_venue_midnight() {
        let dt = parse_execution_time("2025-01-14", DEFAULT_VENUE).unwrap();
        assert_eq!(dt.hour(), 5); // 00:00 EST = 05:00 UTC
    }

    #[test]
    fn empty_and_garbage_are_errors() {
        assert_eq!(
            parse_execution_time("   ", DEFAULT_VENUE),
            Err(TimeParseError::Empty)
        );
        assert!(matches!(
            parse_execution_time("not-a-time", DEFAULT_VENUE),
            Err(TimeParseError::Unrecognized(_))
        ));
    }

    #[test]
    fn dst_ambiguous_takes_earliest() {
        // 2025-11-02 01:30 happens twice in New York; earliest = EDT (UTC-4).
        let dt = parse_execution_time("2025-11-02 01:30:00", DEFAULT_VENUE).unwrap();
        assert_eq!(dt.hour(), 5);
    }
}
