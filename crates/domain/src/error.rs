// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Shift string is not one of the three recognized shifts.
    InvalidShift(String),
    /// A status string is not valid for the named entity.
    InvalidStatus {
        /// The entity whose status failed to parse (e.g., "driver").
        entity: &'static str,
        /// The rejected status value.
        value: String,
    },
    /// A requested date range is not usable for availability evaluation.
    InvalidRange {
        /// The requested start date.
        start: Date,
        /// The requested end date.
        end: Date,
        /// Why the range was rejected.
        reason: String,
    },
    /// A date string could not be parsed.
    DateParseError {
        /// The string that failed to parse.
        date_string: String,
        /// The underlying parse error.
        error: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidShift(value) => write!(f, "Invalid shift: {value}"),
            Self::InvalidStatus { entity, value } => {
                write!(f, "Invalid {entity} status: {value}")
            }
            Self::InvalidRange { start, end, reason } => {
                write!(f, "Invalid date range {start} to {end}: {reason}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
