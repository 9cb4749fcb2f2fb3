// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the service boundary.
//!
//! Dates and shifts arrive as strings and are parsed at this layer; domain
//! entities are embedded directly in responses where their shape already
//! matches the wire contract.

use serde::{Deserialize, Serialize};

use medfleet_audit::BookingEvent;
use medfleet_domain::{Ambulance, Assignment, Booking, Driver};

/// Machine-checkable error shape for batch results and HTTP bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminInfo {
    pub admin_id: i64,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
    pub admin: AdminInfo,
}

// ============================================================================
// Drivers & ambulances
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDriverRequest {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub license_no: Option<String>,
    pub address: Option<String>,
    pub national_id: Option<String>,
    /// Defaults to `available` when omitted.
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDriverRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub license_no: Option<String>,
    pub address: Option<String>,
    pub national_id: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAmbulanceRequest {
    pub model_name: String,
    pub vehicle_type: String,
    pub vehicle_no: String,
    pub equipment_details: Option<String>,
    /// Defaults to `available` when omitted.
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAmbulanceRequest {
    pub model_name: Option<String>,
    pub vehicle_type: Option<String>,
    pub vehicle_no: Option<String>,
    pub equipment_details: Option<String>,
    pub status: Option<String>,
}

/// The driver fields embedded in assignment and booking views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverSummary {
    pub driver_id: i64,
    pub name: String,
    pub phone: String,
    pub status: String,
}

impl From<&Driver> for DriverSummary {
    fn from(driver: &Driver) -> Self {
        Self {
            driver_id: driver.driver_id,
            name: driver.name.clone(),
            phone: driver.phone.clone(),
            status: driver.status.as_str().to_string(),
        }
    }
}

/// The ambulance fields embedded in assignment and booking views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmbulanceSummary {
    pub ambulance_id: i64,
    pub vehicle_no: String,
    pub model_name: String,
    pub vehicle_type: String,
    pub status: String,
}

impl From<&Ambulance> for AmbulanceSummary {
    fn from(ambulance: &Ambulance) -> Self {
        Self {
            ambulance_id: ambulance.ambulance_id,
            vehicle_no: ambulance.vehicle_no.clone(),
            model_name: ambulance.model_name.clone(),
            vehicle_type: ambulance.vehicle_type.clone(),
            status: ambulance.status.as_str().to_string(),
        }
    }
}

// ============================================================================
// Assignments
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignmentRequest {
    /// Calendar day, `YYYY-MM-DD`.
    pub duty_date: String,
    /// One of `morning`, `afternoon`, `night`.
    pub shift: String,
    pub driver_id: i64,
    pub ambulance_id: i64,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchCreateAssignmentsRequest {
    pub assignments: Vec<CreateAssignmentRequest>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAssignmentRequest {
    pub driver_id: Option<i64>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// An assignment with its driver and vehicle embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentView {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub driver: DriverSummary,
    pub ambulance: AmbulanceSummary,
}

/// The outcome of one entry in a batch creation.
///
/// Entries are applied independently; exactly one of `assignment` and
/// `error` is set.
#[derive(Debug, Clone, Serialize)]
pub struct BatchAssignmentOutcome {
    pub index: usize,
    pub assignment: Option<AssignmentView>,
    pub error: Option<ErrorBody>,
}

// ============================================================================
// Bookings
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookingRequest {
    pub patient_name: String,
    pub phone: String,
    pub from_address: String,
    pub from_latitude: Option<f64>,
    pub from_longitude: Option<f64>,
    pub to_address: String,
    pub to_latitude: Option<f64>,
    pub to_longitude: Option<f64>,
    /// Calendar day, `YYYY-MM-DD`.
    pub from_date: String,
    /// Present only for return trips.
    pub to_date: Option<String>,
    pub pickup_time: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBookingRequest {
    pub patient_name: Option<String>,
    pub phone: Option<String>,
    pub from_address: Option<String>,
    pub from_latitude: Option<f64>,
    pub from_longitude: Option<f64>,
    pub to_address: Option<String>,
    pub to_latitude: Option<f64>,
    pub to_longitude: Option<f64>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub pickup_time: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangeBookingStatusRequest {
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignBookingRequest {
    pub ambulance_id: i64,
    pub driver_id: i64,
}

/// A booking with its event history and assigned entities embedded.
#[derive(Debug, Clone, Serialize)]
pub struct BookingView {
    #[serde(flatten)]
    pub booking: Booking,
    /// Newest first.
    pub events: Vec<BookingEvent>,
    pub driver: Option<DriverSummary>,
    pub ambulance: Option<AmbulanceSummary>,
}

// ============================================================================
// Phone verification
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct SendOtpRequest {
    pub phone: String,
}

/// The issued code is returned to the caller; delivering it over SMS is an
/// external collaborator's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOtpResponse {
    pub phone: String,
    pub code: String,
    pub expires_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyOtpRequest {
    pub phone: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    pub phone: String,
    pub verified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpStatusResponse {
    pub phone: String,
    /// True only while the twenty-four-hour verification window is open.
    pub verified: bool,
}

// ============================================================================
// Monitoring
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RecordLocationRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub speed: Option<f64>,
    pub heading: Option<f64>,
    pub accuracy: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusOverviewResponse {
    pub total_ambulances: usize,
    pub available_ambulances: usize,
    pub on_duty_ambulances: usize,
    pub active_rides: usize,
    /// Share of the fleet currently on duty, 0-100.
    pub utilization_percent: f64,
}

// ============================================================================
// Expenses
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateExpenseRequest {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub amount: f64,
    /// Defaults to `INR` when omitted.
    pub currency: Option<String>,
    /// Calendar day, `YYYY-MM-DD`.
    pub expense_date: String,
    pub vendor: Option<String>,
    pub receipt_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateExpenseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub expense_date: Option<String>,
    pub vendor: Option<String>,
    pub receipt_url: Option<String>,
    /// One of `pending`, `approved`, `rejected`. A move to `approved` or
    /// `rejected` stamps the acting admin as the decider.
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpenseListFilter {
    pub status: Option<String>,
    pub category: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpenseSummaryResponse {
    pub total_amount: f64,
    pub pending_amount: f64,
    pub approved_amount: f64,
    pub total_count: usize,
    pub pending_count: usize,
    pub approved_count: usize,
    pub by_category: Vec<CategoryTotal>,
}

// ============================================================================
// Dashboard
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStatsResponse {
    pub total_drivers: i64,
    pub available_drivers: i64,
    pub total_ambulances: i64,
    pub available_ambulances: i64,
    pub total_bookings: i64,
    pub pending_bookings: i64,
    pub active_bookings: i64,
    pub todays_assignments: i64,
    pub pending_expenses: i64,
}
