// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar-date handling for the duty roster.
//!
//! Assignments are keyed by calendar day. Time-of-day and timezone offsets
//! are normalized away before anything reaches this module: callers pass
//! dates already resolved to the local calendar day, as `YYYY-MM-DD` strings
//! or `time::Date` values.

use crate::error::DomainError;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Iso8601;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// Maximum number of calendar days (inclusive) a single availability or
/// batch-assignment request may cover.
pub const MAX_RANGE_DAYS: i64 = 30;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parses a `YYYY-MM-DD` string into a calendar date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is malformed.
pub fn parse_service_date(s: &str) -> Result<Date, DomainError> {
    Date::parse(s, DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: s.to_string(),
        error: e.to_string(),
    })
}

/// Formats a calendar date as `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if formatting fails (which only
/// happens for dates outside the representable range).
pub fn format_service_date(date: Date) -> Result<String, DomainError> {
    date.format(DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: date.to_string(),
        error: e.to_string(),
    })
}

/// Parses an ISO 8601 timestamp string.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is malformed.
pub fn parse_timestamp(s: &str) -> Result<OffsetDateTime, DomainError> {
    OffsetDateTime::parse(s, &Iso8601::DEFAULT).map_err(|e| DomainError::DateParseError {
        date_string: s.to_string(),
        error: e.to_string(),
    })
}

/// Formats an instant as an ISO 8601 timestamp string.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if formatting fails.
pub fn format_timestamp(instant: OffsetDateTime) -> Result<String, DomainError> {
    instant
        .format(&Iso8601::DEFAULT)
        .map_err(|e| DomainError::DateParseError {
            date_string: instant.to_string(),
            error: e.to_string(),
        })
}

/// Expands an inclusive date range into its constituent calendar days,
/// ascending.
///
/// A range request is the UI-level notion of "assign for these dates"; the
/// availability predicate is then evaluated independently for every day in
/// the returned set.
///
/// # Errors
///
/// Returns `DomainError::InvalidRange` if the end date precedes the start
/// date or the inclusive span exceeds [`MAX_RANGE_DAYS`].
pub fn generate_date_range(start: Date, end: Date) -> Result<Vec<Date>, DomainError> {
    if end < start {
        return Err(DomainError::InvalidRange {
            start,
            end,
            reason: String::from("end date precedes start date"),
        });
    }

    let span_days: i64 = (end - start).whole_days() + 1;
    if span_days > MAX_RANGE_DAYS {
        return Err(DomainError::InvalidRange {
            start,
            end,
            reason: format!("span of {span_days} days exceeds the {MAX_RANGE_DAYS}-day limit"),
        });
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mut dates: Vec<Date> = Vec::with_capacity(span_days as usize);
    let mut current: Date = start;
    while current <= end {
        dates.push(current);
        current = current
            .next_day()
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: String::from("advancing to the next calendar day"),
            })?;
    }

    Ok(dates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_parse_and_format_round_trip() {
        let parsed = parse_service_date("2024-06-01").unwrap();
        assert_eq!(parsed, date!(2024 - 06 - 01));
        assert_eq!(format_service_date(parsed).unwrap(), "2024-06-01");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_service_date("06/01/2024").is_err());
        assert!(parse_service_date("2024-13-01").is_err());
        assert!(parse_service_date("").is_err());
    }

    #[test]
    fn test_range_exceeding_limit_is_rejected() {
        // 46 days inclusive
        let result = generate_date_range(date!(2024 - 01 - 01), date!(2024 - 02 - 15));
        assert!(matches!(result, Err(DomainError::InvalidRange { .. })));
    }

    #[test]
    fn test_range_end_before_start_is_rejected() {
        let result = generate_date_range(date!(2024 - 01 - 10), date!(2024 - 01 - 05));
        assert!(matches!(result, Err(DomainError::InvalidRange { .. })));
    }

    #[test]
    fn test_thirty_day_range_is_accepted() {
        let dates = generate_date_range(date!(2024 - 01 - 01), date!(2024 - 01 - 30)).unwrap();
        assert_eq!(dates.len(), 30);
        assert_eq!(dates[0], date!(2024 - 01 - 01));
        assert_eq!(dates[29], date!(2024 - 01 - 30));
        assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_single_day_range() {
        let dates = generate_date_range(date!(2024 - 06 - 01), date!(2024 - 06 - 01)).unwrap();
        assert_eq!(dates, vec![date!(2024 - 06 - 01)]);
    }

    #[test]
    fn test_range_crosses_month_boundary() {
        let dates = generate_date_range(date!(2024 - 01 - 25), date!(2024 - 02 - 05)).unwrap();
        assert_eq!(dates.len(), 12);
        assert_eq!(dates[7], date!(2024 - 02 - 01));
    }
}
