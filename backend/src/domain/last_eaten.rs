//! The last-eaten rule.
//!
//! A dish's `lastEaten` only moves forward, and never past the end of today.
//! Anything else is reported back as skipped with the dates that were
//! compared, so the client can see why nothing changed.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

use super::errors::DomainError;

/// Outcome of checking a proposed last-eaten date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastEatenDecision {
    /// Proposed date is after the end of today
    Future,
    /// Stored date is the same or newer
    NotMoreRecent { current: DateTime<Utc> },
    /// Proposed date should replace `previous`
    Update { previous: Option<DateTime<Utc>> },
}

/// Future dates are rejected before anything is read from storage.
pub fn is_future(proposed: DateTime<Utc>, end_of_today: DateTime<Utc>) -> bool {
    proposed > end_of_today
}

/// Full decision for a proposed date against the stored one.
pub fn decide(
    proposed: DateTime<Utc>,
    current: Option<DateTime<Utc>>,
    end_of_today: DateTime<Utc>,
) -> LastEatenDecision {
    if is_future(proposed, end_of_today) {
        return LastEatenDecision::Future;
    }

    match current {
        Some(current) if proposed <= current => LastEatenDecision::NotMoreRecent { current },
        previous => LastEatenDecision::Update { previous },
    }
}

/// Parse the `lastEaten` value sent by the client.
///
/// Accepts RFC 3339 date-times, naive date-times (server local time) and
/// plain dates (UTC midnight).
pub fn parse_last_eaten(input: &str) -> Result<DateTime<Utc>, DomainError> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or_else(|| DomainError::Malformed(format!("Invalid local time: {}", input)));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN)));
    }

    Err(DomainError::Malformed(format!("Invalid date: {}", input)))
}
