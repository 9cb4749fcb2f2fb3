// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Schema initialization failed.
    InitializationError(String),
    /// A store-level uniqueness constraint was violated.
    Conflict(String),
    /// The requested record was not found.
    NotFound(String),
    /// A stored value could not be mapped back to a domain type.
    InvalidRecord(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// An assignment already claims the ambulance for this date and shift.
    SlotTaken {
        /// The calendar day of the slot.
        duty_date: String,
        /// The shift of the slot.
        shift: String,
        /// The ambulance already rostered.
        ambulance_id: i64,
    },
    /// An assignment already claims the driver for this date and shift.
    ///
    /// Only raised under the strict conflict policy.
    DriverSlotTaken {
        /// The calendar day of the slot.
        duty_date: String,
        /// The shift of the slot.
        shift: String,
        /// The driver already rostered.
        driver_id: i64,
    },
    /// The referenced driver's status is not `available`.
    DriverUnavailable(i64),
    /// The referenced ambulance's status is not `available`.
    AmbulanceUnavailable(i64),
    /// The verification code for this phone has lapsed.
    OtpExpired(String),
    /// The submitted verification code does not match the issued one.
    OtpMismatch(String),
    /// The email or password presented at login was wrong.
    InvalidCredentials,
    /// The requested session was not found.
    SessionNotFound(String),
    /// Session has expired.
    SessionExpired(String),
    /// A general error occurred.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::InitializationError(msg) => write!(f, "Initialization failed: {msg}"),
            Self::Conflict(msg) => write!(f, "Uniqueness conflict: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::InvalidRecord(msg) => write!(f, "Invalid stored record: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::SlotTaken {
                duty_date,
                shift,
                ambulance_id,
            } => write!(
                f,
                "Assignment already exists for {duty_date} {shift} and ambulance {ambulance_id}"
            ),
            Self::DriverSlotTaken {
                duty_date,
                shift,
                driver_id,
            } => write!(
                f,
                "Assignment already exists for {duty_date} {shift} and driver {driver_id}"
            ),
            Self::DriverUnavailable(id) => write!(f, "Driver {id} is not available"),
            Self::AmbulanceUnavailable(id) => write!(f, "Ambulance {id} is not available"),
            Self::OtpExpired(phone) => {
                write!(f, "Verification code for {phone} has expired")
            }
            Self::OtpMismatch(phone) => {
                write!(f, "Verification code for {phone} does not match")
            }
            Self::InvalidCredentials => write!(f, "Invalid email or password"),
            Self::SessionNotFound(msg) => write!(f, "Session not found: {msg}"),
            Self::SessionExpired(msg) => write!(f, "Session expired: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound(String::from("Record not found")),
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                info,
            ) => Self::Conflict(info.message().to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<bcrypt::BcryptError> for PersistenceError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::Other(format!("Password hashing failed: {err}"))
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<medfleet_domain::DomainError> for PersistenceError {
    fn from(err: medfleet_domain::DomainError) -> Self {
        Self::InvalidRecord(err.to_string())
    }
}
