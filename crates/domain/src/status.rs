// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Closed status enumerations for every persisted entity, plus the single
//! booking status transition function.
//!
//! Every status that the original system stored as a free-form string is a
//! closed enum here. Persistence and API serialization go through `as_str`
//! and `FromStr` so an unrecognized value is rejected at the boundary.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the three fixed 8-hour duty windows in a day.
///
/// The derived ordering (morning < afternoon < night) is the sort order used
/// by assignment listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shift {
    /// 06:00-14:00
    Morning,
    /// 14:00-22:00
    Afternoon,
    /// 22:00-06:00
    Night,
}

impl Shift {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Night => "night",
        }
    }
}

impl FromStr for Shift {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "night" => Ok(Self::Night),
            _ => Err(DomainError::InvalidShift(s.to_string())),
        }
    }
}

/// Duty readiness of a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    /// Eligible for assignments and booking dispatch.
    Available,
    /// Currently occupied; not eligible.
    Busy,
    /// Off shift entirely.
    Offline,
}

impl DriverStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Busy => "busy",
            Self::Offline => "offline",
        }
    }

    /// Returns true if the driver may be given new work.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

impl FromStr for DriverStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "busy" => Ok(Self::Busy),
            "offline" => Ok(Self::Offline),
            _ => Err(DomainError::InvalidStatus {
                entity: "driver",
                value: s.to_string(),
            }),
        }
    }
}

/// Operational state of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbulanceStatus {
    /// Parked and ready for dispatch.
    Available,
    /// Out on a ride.
    InUse,
    /// In the workshop.
    Maintenance,
    /// Decommissioned or otherwise unusable.
    OutOfService,
    /// Rostered onto a shift.
    OnDuty,
}

impl AmbulanceStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::InUse => "in_use",
            Self::Maintenance => "maintenance",
            Self::OutOfService => "out_of_service",
            Self::OnDuty => "on_duty",
        }
    }

    /// Returns true if the vehicle may be given new work.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

impl FromStr for AmbulanceStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "in_use" => Ok(Self::InUse),
            "maintenance" => Ok(Self::Maintenance),
            "out_of_service" => Ok(Self::OutOfService),
            "on_duty" => Ok(Self::OnDuty),
            _ => Err(DomainError::InvalidStatus {
                entity: "ambulance",
                value: s.to_string(),
            }),
        }
    }
}

/// Lifecycle state of a roster assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    /// Created and pending; the default on insert.
    Scheduled,
    /// Shift worked to completion.
    Completed,
    /// Withdrawn before or during the shift.
    Cancelled,
}

impl AssignmentStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for AssignmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus {
                entity: "assignment",
                value: s.to_string(),
            }),
        }
    }
}

/// Lifecycle state of a patient transport booking.
///
/// The nominal forward path is pending -> confirmed -> assigned ->
/// `in_progress` -> completed, with cancelled reachable from any non-terminal
/// state. `active` is a parallel branch meaning "currently en route" and is
/// what the live-monitoring view selects on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
    Active,
}

impl BookingStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Active => "active",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "assigned" => Ok(Self::Assigned),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "active" => Ok(Self::Active),
            _ => Err(DomainError::InvalidStatus {
                entity: "booking",
                value: s.to_string(),
            }),
        }
    }
}

/// Computes the booking status that results from an admin status change.
///
/// Transition order is deliberately not validated: the admin UI is trusted to
/// offer only sensible next actions, and the requested status is accepted
/// as-is. Every caller must still append a `StatusChanged` entry to the
/// booking's event log, which is the authoritative transition history.
///
/// All status writes funnel through this function so a stricter transition
/// table can be substituted in one place without touching callers.
#[must_use]
pub const fn apply_status_change(current: BookingStatus, requested: BookingStatus) -> BookingStatus {
    let _ = current;
    requested
}

/// Approval state of an operational expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseStatus {
    Pending,
    Approved,
    Rejected,
}

impl ExpenseStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for ExpenseStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidStatus {
                entity: "expense",
                value: s.to_string(),
            }),
        }
    }
}
