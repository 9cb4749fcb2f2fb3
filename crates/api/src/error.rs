// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the service boundary.
//!
//! Every variant maps to a stable `kind()` string that clients can branch
//! on; human-readable detail lives in the message. Store-level failures are
//! translated here so nothing above this layer matches on persistence
//! internals.

use tracing::error;

use medfleet_domain::DomainError;
use medfleet_persistence::PersistenceError;

/// Service-level errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A request field failed validation.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// An assignment already claims the ambulance for this date and shift.
    SlotTaken {
        duty_date: String,
        shift: String,
        ambulance_id: i64,
    },
    /// The referenced driver is not available for dispatch or rostering.
    DriverUnavailable { driver_id: i64, message: String },
    /// The referenced ambulance is not available for dispatch or rostering.
    AmbulanceUnavailable { ambulance_id: i64, message: String },
    /// A date range was reversed or longer than the roster horizon.
    InvalidRange { message: String },
    /// A requested resource was not found.
    NotFound {
        /// The type of resource that was not found.
        resource: String,
        message: String,
    },
    /// A time-limited credential (verification code) has lapsed.
    Expired { message: String },
    /// A submitted value did not match the expected one.
    Mismatch { message: String },
    /// A uniqueness rule was violated.
    Conflict { message: String },
    /// Authentication failed or the session is not valid.
    Unauthorized { message: String },
    /// An unexpected internal failure; detail is logged, not returned.
    Internal { message: String },
}

impl ApiError {
    /// Returns the machine-checkable kind string for this error.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "validation_error",
            Self::SlotTaken { .. } => "slot_taken",
            Self::DriverUnavailable { .. } => "driver_unavailable",
            Self::AmbulanceUnavailable { .. } => "ambulance_unavailable",
            Self::InvalidRange { .. } => "invalid_range",
            Self::NotFound { .. } => "not_found",
            Self::Expired { .. } => "expired",
            Self::Mismatch { .. } => "mismatch",
            Self::Conflict { .. } => "conflict",
            Self::Unauthorized { .. } => "unauthorized",
            Self::Internal { .. } => "internal",
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::SlotTaken {
                duty_date,
                shift,
                ambulance_id,
            } => write!(
                f,
                "Ambulance {ambulance_id} is already assigned for {duty_date} {shift}"
            ),
            Self::DriverUnavailable { message, .. }
            | Self::AmbulanceUnavailable { message, .. }
            | Self::InvalidRange { message }
            | Self::Expired { message }
            | Self::Mismatch { message }
            | Self::Conflict { message }
            | Self::Unauthorized { message }
            | Self::Internal { message } => write!(f, "{message}"),
            Self::NotFound { resource, message } => {
                write!(f, "{resource} not found: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::SlotTaken {
                duty_date,
                shift,
                ambulance_id,
            } => Self::SlotTaken {
                duty_date,
                shift,
                ambulance_id,
            },
            PersistenceError::DriverSlotTaken {
                duty_date,
                shift,
                driver_id,
            } => Self::DriverUnavailable {
                driver_id,
                message: format!("Driver {driver_id} is already assigned for {duty_date} {shift}"),
            },
            PersistenceError::DriverUnavailable(driver_id) => Self::DriverUnavailable {
                driver_id,
                message: format!("Driver {driver_id} is not available"),
            },
            PersistenceError::AmbulanceUnavailable(ambulance_id) => Self::AmbulanceUnavailable {
                ambulance_id,
                message: format!("Ambulance {ambulance_id} is not available"),
            },
            PersistenceError::NotFound(message) => Self::NotFound {
                resource: String::from("Record"),
                message,
            },
            PersistenceError::Conflict(message) => Self::Conflict { message },
            PersistenceError::OtpExpired(phone) => Self::Expired {
                message: format!("Verification code for {phone} has expired"),
            },
            PersistenceError::OtpMismatch(phone) => Self::Mismatch {
                message: format!("Verification code for {phone} does not match"),
            },
            PersistenceError::InvalidCredentials => Self::Unauthorized {
                message: String::from("Invalid email or password"),
            },
            PersistenceError::SessionNotFound(_) | PersistenceError::SessionExpired(_) => {
                Self::Unauthorized {
                    message: String::from("Session is not valid"),
                }
            }
            other => {
                error!(error = %other, "Unexpected persistence failure");
                Self::Internal {
                    message: String::from("Internal storage error"),
                }
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidRange { .. } => Self::InvalidRange {
                message: err.to_string(),
            },
            DomainError::InvalidShift(_)
            | DomainError::InvalidStatus { .. }
            | DomainError::DateParseError { .. } => Self::InvalidInput {
                field: String::from("value"),
                message: err.to_string(),
            },
            DomainError::DateArithmeticOverflow { .. } => {
                error!(error = %err, "Date arithmetic failure");
                Self::Internal {
                    message: String::from("Internal date error"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_strings_are_stable() {
        let cases: Vec<(ApiError, &str)> = vec![
            (
                ApiError::InvalidInput {
                    field: String::from("shift"),
                    message: String::new(),
                },
                "validation_error",
            ),
            (
                ApiError::SlotTaken {
                    duty_date: String::from("2026-03-15"),
                    shift: String::from("morning"),
                    ambulance_id: 1,
                },
                "slot_taken",
            ),
            (
                ApiError::Unauthorized {
                    message: String::new(),
                },
                "unauthorized",
            ),
            (
                ApiError::Internal {
                    message: String::new(),
                },
                "internal",
            ),
        ];
        for (err, kind) in cases {
            assert_eq!(err.kind(), kind);
        }
    }

    #[test]
    fn test_unique_violation_translates_to_conflict() {
        let err: ApiError = PersistenceError::Conflict(String::from(
            "UNIQUE constraint failed: drivers.phone",
        ))
        .into();
        assert_eq!(err.kind(), "conflict");
    }

    #[test]
    fn test_database_error_is_opaque_internal() {
        let err: ApiError =
            PersistenceError::DatabaseError(String::from("disk I/O error")).into();
        assert_eq!(err.kind(), "internal");
        assert!(!err.to_string().contains("disk I/O"));
    }
}
