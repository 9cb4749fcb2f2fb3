// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking event log types.
//!
//! Every booking lifecycle transition appends exactly one event. Events are
//! immutable once written and are deleted only when their owning booking is
//! deleted. The status machine itself is permissive; this log is the
//! authoritative, ordered transition history.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use medfleet_domain::BookingStatus;
use serde::{Deserialize, Serialize};

/// The payload of a booking event, keyed by event type.
///
/// Each lifecycle transition carries its own fixed field set rather than an
/// open dictionary, so the stored shape is checked at compile time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventPayload {
    /// A booking was created through the public endpoint or by an admin.
    ///
    /// Carries a snapshot of the patient and address fields as submitted, so
    /// the creation record survives later edits.
    BookingCreated {
        patient_name: String,
        phone: String,
        from_address: String,
        to_address: String,
    },
    /// An admin edited the booking's patient/address/schedule fields.
    BookingUpdated {
        /// Email of the admin who performed the edit.
        updated_by: String,
    },
    /// An admin overwrote the booking's status.
    StatusChanged {
        old_status: BookingStatus,
        new_status: BookingStatus,
        /// Email of the admin who performed the change.
        changed_by: String,
    },
    /// An admin bound the booking to a driver and vehicle.
    ///
    /// The vehicle number and driver name are snapshotted here so the audit
    /// record stays meaningful even after the referenced entities are edited
    /// or deleted.
    AmbulanceAssigned {
        ambulance_id: i64,
        driver_id: i64,
        vehicle_no: String,
        driver_name: String,
        /// Email of the admin who performed the assignment.
        assigned_by: String,
    },
}

impl EventPayload {
    /// Returns the type tag this payload is stored under.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::BookingCreated { .. } => "BookingCreated",
            Self::BookingUpdated { .. } => "BookingUpdated",
            Self::StatusChanged { .. } => "StatusChanged",
            Self::AmbulanceAssigned { .. } => "AmbulanceAssigned",
        }
    }

    /// Serializes the payload for storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes a stored payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored JSON does not match any known payload
    /// shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// An immutable booking event as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingEvent {
    /// The event's identifier; ordering by id is insertion order.
    pub event_id: i64,
    /// The booking this event belongs to.
    pub booking_id: i64,
    /// The typed payload.
    pub payload: EventPayload,
    /// When the event was appended (ISO 8601).
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_tags() {
        let created = EventPayload::BookingCreated {
            patient_name: String::from("A"),
            phone: String::from("+91-9000000001"),
            from_address: String::from("X"),
            to_address: String::from("Y"),
        };
        assert_eq!(created.event_type(), "BookingCreated");

        let assigned = EventPayload::AmbulanceAssigned {
            ambulance_id: 1,
            driver_id: 2,
            vehicle_no: String::from("KA-01-1234"),
            driver_name: String::from("D"),
            assigned_by: String::from("ops@example.com"),
        };
        assert_eq!(assigned.event_type(), "AmbulanceAssigned");
    }

    #[test]
    fn test_payload_json_round_trip() {
        let payload = EventPayload::StatusChanged {
            old_status: BookingStatus::Pending,
            new_status: BookingStatus::Confirmed,
            changed_by: String::from("ops@example.com"),
        };
        let json = payload.to_json().unwrap();
        assert!(json.contains("\"StatusChanged\""));
        assert_eq!(EventPayload::from_json(&json).unwrap(), payload);
    }

    #[test]
    fn test_unknown_payload_shape_is_rejected() {
        let json = r#"{"type":"SomethingElse","foo":1}"#;
        assert!(EventPayload::from_json(json).is_err());
    }
}
