// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod session_tests;

use time::macros::datetime;
use time::{Date, Month, OffsetDateTime};

use medfleet_domain::{AmbulanceStatus, DriverStatus};

use crate::data_models::{NewAmbulance, NewBooking, NewDriver, NewExpense};
use crate::{Persistence, PersistenceError};

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-10 09:00:00 UTC)
}

pub fn test_date() -> Date {
    Date::from_calendar_date(2026, Month::March, 15).expect("Valid test date")
}

pub fn test_driver(name: &str, phone: &str) -> NewDriver {
    NewDriver {
        name: name.to_string(),
        phone: phone.to_string(),
        email: None,
        license_no: Some(String::from("DL-2026-0042")),
        address: None,
        national_id: None,
        status: DriverStatus::Available.as_str().to_string(),
        created_at: String::from("2026-03-10T09:00:00Z"),
        updated_at: String::from("2026-03-10T09:00:00Z"),
    }
}

pub fn test_ambulance(vehicle_no: &str) -> NewAmbulance {
    NewAmbulance {
        model_name: String::from("Force Traveller"),
        vehicle_type: String::from("BLS"),
        vehicle_no: vehicle_no.to_string(),
        equipment_details: None,
        status: AmbulanceStatus::Available.as_str().to_string(),
        created_at: String::from("2026-03-10T09:00:00Z"),
        updated_at: String::from("2026-03-10T09:00:00Z"),
    }
}

pub fn test_booking(phone: &str) -> NewBooking {
    NewBooking {
        patient_name: String::from("Asha Rao"),
        phone: phone.to_string(),
        phone_verified: 1,
        from_address: String::from("12 Hill Road"),
        from_latitude: Some(12.97),
        from_longitude: Some(77.59),
        to_address: String::from("City Hospital"),
        to_latitude: None,
        to_longitude: None,
        from_date: String::from("2026-03-15"),
        to_date: None,
        pickup_time: String::from("10:30"),
        notes: None,
        status: String::from("pending"),
        created_at: String::from("2026-03-10T09:00:00Z"),
        updated_at: String::from("2026-03-10T09:00:00Z"),
    }
}

pub fn test_expense(title: &str, created_by: i64) -> NewExpense {
    NewExpense {
        title: title.to_string(),
        description: None,
        category: String::from("fuel"),
        amount: 1500.0,
        currency: String::from("INR"),
        expense_date: String::from("2026-03-10"),
        vendor: None,
        receipt_url: None,
        status: String::from("pending"),
        created_by,
        created_at: String::from("2026-03-10T09:00:00Z"),
    }
}

/// Creates an in-memory store with one available driver and one available
/// ambulance, returning their IDs.
pub fn setup_fleet() -> Result<(Persistence, i64, i64), PersistenceError> {
    let mut persistence = Persistence::new_in_memory()?;
    let driver = persistence.create_driver(&test_driver("Ravi Kumar", "+91-9000000001"))?;
    let ambulance = persistence.create_ambulance(&test_ambulance("KA-01-AB-1234"))?;
    Ok((persistence, driver.driver_id, ambulance.ambulance_id))
}
