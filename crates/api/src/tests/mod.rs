// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for the service-layer tests.

use time::OffsetDateTime;
use time::macros::datetime;

use medfleet_domain::{Ambulance, Driver};
use medfleet_persistence::Persistence;

use crate::request_response::{
    CreateAmbulanceRequest, CreateBookingRequest, CreateDriverRequest, SendOtpRequest,
    VerifyOtpRequest,
};
use crate::{fleet, otp};

mod assignment_service_tests;
mod auth_service_tests;
mod booking_service_tests;
mod expense_service_tests;
mod monitoring_service_tests;
mod otp_service_tests;

pub(crate) fn test_now() -> OffsetDateTime {
    datetime!(2026-03-10 09:00:00 UTC)
}

pub(crate) fn store() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory store")
}

pub(crate) fn add_driver(persistence: &mut Persistence, name: &str, phone: &str) -> Driver {
    fleet::create_driver(
        persistence,
        &CreateDriverRequest {
            name: name.to_string(),
            phone: phone.to_string(),
            email: None,
            license_no: None,
            address: None,
            national_id: None,
            status: None,
        },
    )
    .expect("Failed to create driver")
}

pub(crate) fn add_ambulance(persistence: &mut Persistence, vehicle_no: &str) -> Ambulance {
    fleet::create_ambulance(
        persistence,
        &CreateAmbulanceRequest {
            model_name: String::from("Force Traveller"),
            vehicle_type: String::from("BLS"),
            vehicle_no: vehicle_no.to_string(),
            equipment_details: None,
            status: None,
        },
    )
    .expect("Failed to create ambulance")
}

/// Runs the full send-and-confirm flow so `phone` counts as verified at
/// `now`.
pub(crate) fn verify_phone(persistence: &mut Persistence, phone: &str, now: OffsetDateTime) {
    let sent = otp::send_code_at(
        persistence,
        &SendOtpRequest {
            phone: phone.to_string(),
        },
        now,
    )
    .expect("Failed to issue code");

    otp::verify_code_at(
        persistence,
        &VerifyOtpRequest {
            phone: phone.to_string(),
            code: sent.code,
        },
        now,
    )
    .expect("Failed to confirm code");
}

pub(crate) fn booking_request(phone: &str) -> CreateBookingRequest {
    CreateBookingRequest {
        patient_name: String::from("Asha Nair"),
        phone: phone.to_string(),
        from_address: String::from("12 MG Road, Kochi"),
        from_latitude: Some(9.9816),
        from_longitude: Some(76.2999),
        to_address: String::from("General Hospital, Ernakulam"),
        to_latitude: Some(9.9658),
        to_longitude: Some(76.2421),
        from_date: String::from("2026-03-15"),
        to_date: None,
        pickup_time: String::from("10:30"),
        notes: None,
    }
}
