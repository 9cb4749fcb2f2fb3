// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Driver and ambulance roster management.

use time::OffsetDateTime;

use medfleet_domain::{Ambulance, Driver};
use medfleet_persistence::{
    AmbulanceChanges, DriverChanges, NewAmbulance, NewDriver, Persistence,
};

use crate::convert::{
    parse_ambulance_status, parse_driver_status, require_non_empty, stamp,
};
use crate::error::ApiError;
use crate::request_response::{
    CreateAmbulanceRequest, CreateDriverRequest, UpdateAmbulanceRequest, UpdateDriverRequest,
};

/// Registers a driver, defaulting the status to `available`.
///
/// # Errors
///
/// Returns `conflict` if the phone number is already registered and
/// `validation_error` for missing fields or an unrecognized status.
pub fn create_driver(
    persistence: &mut Persistence,
    request: &CreateDriverRequest,
) -> Result<Driver, ApiError> {
    require_non_empty("name", &request.name)?;
    require_non_empty("phone", &request.phone)?;

    let status = match request.status.as_deref() {
        Some(s) => parse_driver_status(s)?,
        None => medfleet_domain::DriverStatus::Available,
    };

    let created_at = stamp(OffsetDateTime::now_utc())?;
    Ok(persistence.create_driver(&NewDriver {
        name: request.name.clone(),
        phone: request.phone.clone(),
        email: request.email.clone(),
        license_no: request.license_no.clone(),
        address: request.address.clone(),
        national_id: request.national_id.clone(),
        status: status.as_str().to_string(),
        created_at: created_at.clone(),
        updated_at: created_at,
    })?)
}

/// Applies a partial update to a driver.
///
/// # Errors
///
/// Returns `not_found` for an unknown driver, `conflict` if a phone change
/// collides, and `validation_error` for an empty edit or bad status.
pub fn update_driver(
    persistence: &mut Persistence,
    driver_id: i64,
    request: &UpdateDriverRequest,
) -> Result<Driver, ApiError> {
    let status = request
        .status
        .as_deref()
        .map(parse_driver_status)
        .transpose()?;

    let changes = DriverChanges {
        name: request.name.clone(),
        phone: request.phone.clone(),
        email: request.email.clone(),
        license_no: request.license_no.clone(),
        address: request.address.clone(),
        national_id: request.national_id.clone(),
        status: status.map(|s| s.as_str().to_string()),
        updated_at: Some(stamp(OffsetDateTime::now_utc())?),
    };

    Ok(persistence.update_driver(driver_id, &changes)?)
}

/// Deletes a driver.
///
/// # Errors
///
/// Returns `not_found` if the driver does not exist.
pub fn delete_driver(persistence: &mut Persistence, driver_id: i64) -> Result<(), ApiError> {
    persistence.delete_driver(driver_id)?;
    Ok(())
}

/// Fetches a driver by ID.
///
/// # Errors
///
/// Returns `not_found` if the driver does not exist.
pub fn get_driver(persistence: &mut Persistence, driver_id: i64) -> Result<Driver, ApiError> {
    Ok(persistence.get_driver(driver_id)?)
}

/// Looks up a driver by phone number.
///
/// # Errors
///
/// Returns `not_found` if no driver carries this phone.
pub fn get_driver_by_phone(
    persistence: &mut Persistence,
    phone: &str,
) -> Result<Driver, ApiError> {
    persistence
        .get_driver_by_phone(phone)?
        .ok_or_else(|| ApiError::NotFound {
            resource: String::from("driver"),
            message: format!("No driver registered with phone {phone}"),
        })
}

/// Lists drivers ordered by name, optionally filtered by status.
///
/// # Errors
///
/// Returns `validation_error` for an unrecognized status filter.
pub fn list_drivers(
    persistence: &mut Persistence,
    status: Option<&str>,
) -> Result<Vec<Driver>, ApiError> {
    let status = status.map(parse_driver_status).transpose()?;
    Ok(persistence.list_drivers(status)?)
}

/// Registers an ambulance, defaulting the status to `available`.
///
/// # Errors
///
/// Returns `conflict` if the vehicle number is already registered and
/// `validation_error` for missing fields or an unrecognized status.
pub fn create_ambulance(
    persistence: &mut Persistence,
    request: &CreateAmbulanceRequest,
) -> Result<Ambulance, ApiError> {
    require_non_empty("model_name", &request.model_name)?;
    require_non_empty("vehicle_type", &request.vehicle_type)?;
    require_non_empty("vehicle_no", &request.vehicle_no)?;

    let status = match request.status.as_deref() {
        Some(s) => parse_ambulance_status(s)?,
        None => medfleet_domain::AmbulanceStatus::Available,
    };

    let created_at = stamp(OffsetDateTime::now_utc())?;
    Ok(persistence.create_ambulance(&NewAmbulance {
        model_name: request.model_name.clone(),
        vehicle_type: request.vehicle_type.clone(),
        vehicle_no: request.vehicle_no.clone(),
        equipment_details: request.equipment_details.clone(),
        status: status.as_str().to_string(),
        created_at: created_at.clone(),
        updated_at: created_at,
    })?)
}

/// Applies a partial update to an ambulance.
///
/// # Errors
///
/// Returns `not_found` for an unknown ambulance, `conflict` if a vehicle
/// number change collides, and `validation_error` for a bad status.
pub fn update_ambulance(
    persistence: &mut Persistence,
    ambulance_id: i64,
    request: &UpdateAmbulanceRequest,
) -> Result<Ambulance, ApiError> {
    let status = request
        .status
        .as_deref()
        .map(parse_ambulance_status)
        .transpose()?;

    let changes = AmbulanceChanges {
        model_name: request.model_name.clone(),
        vehicle_type: request.vehicle_type.clone(),
        vehicle_no: request.vehicle_no.clone(),
        equipment_details: request.equipment_details.clone(),
        status: status.map(|s| s.as_str().to_string()),
        updated_at: Some(stamp(OffsetDateTime::now_utc())?),
    };

    Ok(persistence.update_ambulance(ambulance_id, &changes)?)
}

/// Deletes an ambulance.
///
/// # Errors
///
/// Returns `not_found` if the ambulance does not exist.
pub fn delete_ambulance(
    persistence: &mut Persistence,
    ambulance_id: i64,
) -> Result<(), ApiError> {
    persistence.delete_ambulance(ambulance_id)?;
    Ok(())
}

/// Fetches an ambulance by ID.
///
/// # Errors
///
/// Returns `not_found` if the ambulance does not exist.
pub fn get_ambulance(
    persistence: &mut Persistence,
    ambulance_id: i64,
) -> Result<Ambulance, ApiError> {
    Ok(persistence.get_ambulance(ambulance_id)?)
}

/// Lists ambulances ordered by vehicle number, optionally filtered by
/// status.
///
/// # Errors
///
/// Returns `validation_error` for an unrecognized status filter.
pub fn list_ambulances(
    persistence: &mut Persistence,
    status: Option<&str>,
) -> Result<Vec<Ambulance>, ApiError> {
    let status = status.map(parse_ambulance_status).transpose()?;
    Ok(persistence.list_ambulances(status)?)
}
