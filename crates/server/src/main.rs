// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use medfleet_api::{
    ApiError, AuthenticatedAdmin, AuthenticationService, ConflictPolicy, admin, assignments,
    bookings, expenses, fleet, monitoring, otp,
    request_response::{
        AdminInfo, AssignBookingRequest, AssignmentView,
        BatchAssignmentOutcome, BatchCreateAssignmentsRequest, BookingView,
        ChangeBookingStatusRequest, CreateAmbulanceRequest, CreateAssignmentRequest,
        CreateBookingRequest, CreateDriverRequest, CreateExpenseRequest,
        DashboardStatsResponse, ErrorBody, ExpenseListFilter, ExpenseSummaryResponse,
        LoginRequest, LoginResponse, OtpStatusResponse, RecordLocationRequest, SendOtpRequest,
        SendOtpResponse, StatusOverviewResponse, UpdateAmbulanceRequest, UpdateAssignmentRequest,
        UpdateBookingRequest, UpdateDriverRequest, UpdateExpenseRequest, VerifyOtpRequest,
        VerifyOtpResponse,
    },
};
use medfleet_domain::{Ambulance, Driver, Expense, LocationSample};
use medfleet_persistence::Persistence;

/// MedFleet Server - dispatch operations backend for an ambulance fleet
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Email for the bootstrap admin, created only when no admin exists yet
    #[arg(long, requires = "seed_admin_password")]
    seed_admin_email: Option<String>,

    /// Password for the bootstrap admin
    #[arg(long, requires = "seed_admin_email")]
    seed_admin_password: Option<String>,

    /// Also reject driver double-booking when writing roster assignments
    #[arg(long, default_value_t = false)]
    strict_driver_conflicts: bool,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The entity store wrapped in a Mutex for safe concurrent access.
    persistence: Arc<Mutex<Persistence>>,
    /// Which conflict axes roster writes enforce.
    conflict_policy: ConflictPolicy,
}

/// HTTP error wrapper that implements `IntoResponse`.
///
/// The body carries the stable error kind so clients can branch without
/// parsing messages.
struct HttpError {
    status: StatusCode,
    body: ErrorBody,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::InvalidInput { .. }
            | ApiError::InvalidRange { .. }
            | ApiError::Mismatch { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::SlotTaken { .. } | ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::DriverUnavailable { .. }
            | ApiError::AmbulanceUnavailable { .. }
            | ApiError::Expired { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            body: ErrorBody {
                kind: err.kind().to_string(),
                message: err.to_string(),
            },
        }
    }
}

/// Pulls the bearer token out of the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Result<&str, HttpError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| {
            HttpError::from(ApiError::Unauthorized {
                message: String::from("Missing bearer token"),
            })
        })
}

/// Resolves the request's bearer token to an admin, touching the session.
async fn require_admin(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<AuthenticatedAdmin, HttpError> {
    let token: &str = bearer_token(headers)?;
    let mut persistence = state.persistence.lock().await;
    Ok(AuthenticationService::authenticate(&mut persistence, token)?)
}

// ============================================================================
// Auth handlers
// ============================================================================

async fn handle_login(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!(email = %req.email, "Handling login request");

    let mut persistence = state.persistence.lock().await;
    let (token, expires_at, identity) =
        AuthenticationService::login(&mut persistence, &req.email, &req.password)?;

    Ok(Json(LoginResponse {
        token,
        expires_at,
        admin: AdminInfo {
            admin_id: identity.admin_id,
            email: identity.email,
            role: identity.role,
        },
    }))
}

async fn handle_logout(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, HttpError> {
    let token: &str = bearer_token(&headers)?;
    let mut persistence = state.persistence.lock().await;
    AuthenticationService::logout(&mut persistence, token)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_me(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<AdminInfo>, HttpError> {
    let identity: AuthenticatedAdmin = require_admin(&state, &headers).await?;
    Ok(Json(AdminInfo {
        admin_id: identity.admin_id,
        email: identity.email,
        role: identity.role,
    }))
}

// ============================================================================
// Phone verification handlers (public; booking callers have no session)
// ============================================================================

async fn handle_send_otp(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<SendOtpRequest>,
) -> Result<Json<SendOtpResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(otp::send_code(&mut persistence, &req)?))
}

async fn handle_verify_otp(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<VerifyOtpRequest>,
) -> Result<Json<VerifyOtpResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(otp::verify_code(&mut persistence, &req)?))
}

async fn handle_otp_status(
    AxumState(state): AxumState<AppState>,
    Path(phone): Path<String>,
) -> Result<Json<OtpStatusResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(otp::check_status(&mut persistence, &phone)?))
}

// ============================================================================
// Driver handlers
// ============================================================================

/// Optional status filter shared by the driver, ambulance, and booking
/// listings.
#[derive(Debug, Deserialize)]
struct StatusQuery {
    status: Option<String>,
}

async fn handle_create_driver(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateDriverRequest>,
) -> Result<(StatusCode, Json<Driver>), HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    let driver: Driver = fleet::create_driver(&mut persistence, &req)?;
    Ok((StatusCode::CREATED, Json(driver)))
}

async fn handle_list_drivers(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<Driver>>, HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(fleet::list_drivers(
        &mut persistence,
        query.status.as_deref(),
    )?))
}

async fn handle_get_driver(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Path(driver_id): Path<i64>,
) -> Result<Json<Driver>, HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(fleet::get_driver(&mut persistence, driver_id)?))
}

async fn handle_get_driver_by_phone(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Path(phone): Path<String>,
) -> Result<Json<Driver>, HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(fleet::get_driver_by_phone(&mut persistence, &phone)?))
}

async fn handle_update_driver(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Path(driver_id): Path<i64>,
    Json(req): Json<UpdateDriverRequest>,
) -> Result<Json<Driver>, HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(fleet::update_driver(&mut persistence, driver_id, &req)?))
}

async fn handle_delete_driver(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Path(driver_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    fleet::delete_driver(&mut persistence, driver_id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Ambulance handlers
// ============================================================================

async fn handle_create_ambulance(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateAmbulanceRequest>,
) -> Result<(StatusCode, Json<Ambulance>), HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    let ambulance: Ambulance = fleet::create_ambulance(&mut persistence, &req)?;
    Ok((StatusCode::CREATED, Json(ambulance)))
}

async fn handle_list_ambulances(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<Ambulance>>, HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(fleet::list_ambulances(
        &mut persistence,
        query.status.as_deref(),
    )?))
}

async fn handle_get_ambulance(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Path(ambulance_id): Path<i64>,
) -> Result<Json<Ambulance>, HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(fleet::get_ambulance(&mut persistence, ambulance_id)?))
}

async fn handle_update_ambulance(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Path(ambulance_id): Path<i64>,
    Json(req): Json<UpdateAmbulanceRequest>,
) -> Result<Json<Ambulance>, HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(fleet::update_ambulance(
        &mut persistence,
        ambulance_id,
        &req,
    )?))
}

async fn handle_delete_ambulance(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Path(ambulance_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    fleet::delete_ambulance(&mut persistence, ambulance_id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Assignment handlers
// ============================================================================

#[derive(Debug, Deserialize)]
struct AssignmentListQuery {
    start_date: Option<String>,
    end_date: Option<String>,
    ambulance_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct AvailabilityQuery {
    date: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    shift: String,
}

async fn handle_create_assignment(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateAssignmentRequest>,
) -> Result<(StatusCode, Json<AssignmentView>), HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    let view: AssignmentView =
        assignments::create_assignment(&mut persistence, &req, state.conflict_policy)?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn handle_create_assignments_batch(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<BatchCreateAssignmentsRequest>,
) -> Result<Json<Vec<BatchAssignmentOutcome>>, HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(assignments::create_assignments_batch(
        &mut persistence,
        &req,
        state.conflict_policy,
    )))
}

async fn handle_list_assignments(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Query(query): Query<AssignmentListQuery>,
) -> Result<Json<Vec<AssignmentView>>, HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(assignments::list_assignments(
        &mut persistence,
        query.start_date.as_deref(),
        query.end_date.as_deref(),
        query.ambulance_id,
    )?))
}

async fn handle_list_assignments_for_date(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Path(date): Path<String>,
) -> Result<Json<Vec<AssignmentView>>, HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(assignments::list_assignments_for_date(
        &mut persistence,
        &date,
    )?))
}

async fn handle_get_assignment(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Path(assignment_id): Path<i64>,
) -> Result<Json<AssignmentView>, HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(assignments::get_assignment(
        &mut persistence,
        assignment_id,
    )?))
}

async fn handle_update_assignment(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Path(assignment_id): Path<i64>,
    Json(req): Json<UpdateAssignmentRequest>,
) -> Result<Json<AssignmentView>, HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(assignments::update_assignment(
        &mut persistence,
        assignment_id,
        &req,
        state.conflict_policy,
    )?))
}

async fn handle_delete_assignment(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Path(assignment_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    assignments::delete_assignment(&mut persistence, assignment_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_available_drivers(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Vec<Driver>>, HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;

    if let Some(date) = query.date.as_deref() {
        return Ok(Json(assignments::available_drivers(
            &mut persistence,
            date,
            &query.shift,
        )?));
    }
    match (query.start_date.as_deref(), query.end_date.as_deref()) {
        (Some(start), Some(end)) => Ok(Json(assignments::available_drivers_for_range(
            &mut persistence,
            start,
            end,
            &query.shift,
        )?)),
        _ => Err(HttpError::from(ApiError::InvalidInput {
            field: String::from("date"),
            message: String::from("provide either date or start_date and end_date"),
        })),
    }
}

async fn handle_available_ambulances(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Vec<Ambulance>>, HttpError> {
    require_admin(&state, &headers).await?;
    let date: String = query.date.ok_or_else(|| {
        HttpError::from(ApiError::InvalidInput {
            field: String::from("date"),
            message: String::from("date is required"),
        })
    })?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(assignments::available_ambulances(
        &mut persistence,
        &date,
        &query.shift,
    )?))
}

// ============================================================================
// Booking handlers
// ============================================================================

async fn handle_create_booking(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingView>), HttpError> {
    info!(phone = %req.phone, "Handling booking request");
    let mut persistence = state.persistence.lock().await;
    let view: BookingView = bookings::create_booking(&mut persistence, &req)?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn handle_list_bookings(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<BookingView>>, HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bookings::list_bookings(
        &mut persistence,
        query.status.as_deref(),
    )?))
}

async fn handle_get_booking(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Path(booking_id): Path<i64>,
) -> Result<Json<BookingView>, HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bookings::get_booking(&mut persistence, booking_id)?))
}

async fn handle_update_booking(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Path(booking_id): Path<i64>,
    Json(req): Json<UpdateBookingRequest>,
) -> Result<Json<BookingView>, HttpError> {
    let identity: AuthenticatedAdmin = require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bookings::update_booking(
        &mut persistence,
        booking_id,
        &req,
        &identity.email,
    )?))
}

async fn handle_change_booking_status(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Path(booking_id): Path<i64>,
    Json(req): Json<ChangeBookingStatusRequest>,
) -> Result<Json<BookingView>, HttpError> {
    let identity: AuthenticatedAdmin = require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bookings::change_booking_status(
        &mut persistence,
        booking_id,
        &req,
        &identity.email,
    )?))
}

async fn handle_assign_booking(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Path(booking_id): Path<i64>,
    Json(req): Json<AssignBookingRequest>,
) -> Result<Json<BookingView>, HttpError> {
    let identity: AuthenticatedAdmin = require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bookings::assign_booking(
        &mut persistence,
        booking_id,
        &req,
        &identity.email,
    )?))
}

async fn handle_delete_booking(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Path(booking_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    bookings::delete_booking(&mut persistence, booking_id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Monitoring handlers
// ============================================================================

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    limit: Option<i64>,
}

async fn handle_record_location(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Path(ambulance_id): Path<i64>,
    Json(req): Json<RecordLocationRequest>,
) -> Result<Json<LocationSample>, HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    let (_ambulance, sample) = monitoring::record_location(&mut persistence, ambulance_id, &req)?;
    Ok(Json(sample))
}

async fn handle_location_history(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Path(ambulance_id): Path<i64>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<LocationSample>>, HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(monitoring::location_history(
        &mut persistence,
        ambulance_id,
        query.limit,
    )?))
}

async fn handle_located_ambulances(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Ambulance>>, HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(monitoring::located_ambulances(&mut persistence)?))
}

async fn handle_active_rides(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<BookingView>>, HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(monitoring::active_rides(&mut persistence)?))
}

async fn handle_status_overview(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<StatusOverviewResponse>, HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(monitoring::status_overview(&mut persistence)?))
}

// ============================================================================
// Expense handlers
// ============================================================================

async fn handle_create_expense(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<Expense>), HttpError> {
    let identity: AuthenticatedAdmin = require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    let expense: Expense = expenses::create_expense(&mut persistence, &req, identity.admin_id)?;
    Ok((StatusCode::CREATED, Json(expense)))
}

async fn handle_list_expenses(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Query(filter): Query<ExpenseListFilter>,
) -> Result<Json<Vec<Expense>>, HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(expenses::list_expenses(&mut persistence, &filter)?))
}

async fn handle_expense_summary(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Query(filter): Query<ExpenseListFilter>,
) -> Result<Json<ExpenseSummaryResponse>, HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(expenses::expense_summary(&mut persistence, &filter)?))
}

async fn handle_get_expense(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Path(expense_id): Path<i64>,
) -> Result<Json<Expense>, HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(expenses::get_expense(&mut persistence, expense_id)?))
}

async fn handle_update_expense(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Path(expense_id): Path<i64>,
    Json(req): Json<UpdateExpenseRequest>,
) -> Result<Json<Expense>, HttpError> {
    let identity: AuthenticatedAdmin = require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(expenses::update_expense(
        &mut persistence,
        expense_id,
        &req,
        identity.admin_id,
    )?))
}

async fn handle_delete_expense(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Path(expense_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    expenses::delete_expense(&mut persistence, expense_id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Dashboard
// ============================================================================

async fn handle_dashboard_stats(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<DashboardStatsResponse>, HttpError> {
    require_admin(&state, &headers).await?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(admin::dashboard_stats(&mut persistence)?))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/auth/login", post(handle_login))
        .route("/auth/logout", post(handle_logout))
        .route("/auth/me", get(handle_me))
        .route("/otp/send", post(handle_send_otp))
        .route("/otp/verify", post(handle_verify_otp))
        .route("/otp/status/{phone}", get(handle_otp_status))
        .route("/drivers", post(handle_create_driver))
        .route("/drivers", get(handle_list_drivers))
        .route("/drivers/by-phone/{phone}", get(handle_get_driver_by_phone))
        .route("/drivers/{driver_id}", get(handle_get_driver))
        .route("/drivers/{driver_id}", put(handle_update_driver))
        .route("/drivers/{driver_id}", delete(handle_delete_driver))
        .route("/ambulances", post(handle_create_ambulance))
        .route("/ambulances", get(handle_list_ambulances))
        .route("/ambulances/{ambulance_id}", get(handle_get_ambulance))
        .route("/ambulances/{ambulance_id}", put(handle_update_ambulance))
        .route(
            "/ambulances/{ambulance_id}",
            delete(handle_delete_ambulance),
        )
        .route(
            "/ambulances/{ambulance_id}/location",
            post(handle_record_location),
        )
        .route(
            "/ambulances/{ambulance_id}/location/history",
            get(handle_location_history),
        )
        .route("/assignments", post(handle_create_assignment))
        .route("/assignments", get(handle_list_assignments))
        .route("/assignments/batch", post(handle_create_assignments_batch))
        .route(
            "/assignments/date/{date}",
            get(handle_list_assignments_for_date),
        )
        .route(
            "/assignments/{assignment_id}",
            get(handle_get_assignment),
        )
        .route(
            "/assignments/{assignment_id}",
            put(handle_update_assignment),
        )
        .route(
            "/assignments/{assignment_id}",
            delete(handle_delete_assignment),
        )
        .route("/availability/drivers", get(handle_available_drivers))
        .route(
            "/availability/ambulances",
            get(handle_available_ambulances),
        )
        .route("/bookings", post(handle_create_booking))
        .route("/bookings", get(handle_list_bookings))
        .route("/bookings/{booking_id}", get(handle_get_booking))
        .route("/bookings/{booking_id}", put(handle_update_booking))
        .route("/bookings/{booking_id}", delete(handle_delete_booking))
        .route(
            "/bookings/{booking_id}/status",
            post(handle_change_booking_status),
        )
        .route(
            "/bookings/{booking_id}/assign",
            post(handle_assign_booking),
        )
        .route("/monitoring/ambulances", get(handle_located_ambulances))
        .route("/monitoring/active-rides", get(handle_active_rides))
        .route("/monitoring/overview", get(handle_status_overview))
        .route("/expenses", post(handle_create_expense))
        .route("/expenses", get(handle_list_expenses))
        .route("/expenses/summary", get(handle_expense_summary))
        .route("/expenses/{expense_id}", get(handle_get_expense))
        .route("/expenses/{expense_id}", put(handle_update_expense))
        .route("/expenses/{expense_id}", delete(handle_delete_expense))
        .route("/dashboard/stats", get(handle_dashboard_stats))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing MedFleet Server");

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if let (Some(email), Some(password)) = (&args.seed_admin_email, &args.seed_admin_password) {
        if admin::seed_admin_if_empty(&mut persistence, email, password)? {
            info!(email = %email, "Seeded bootstrap admin");
        } else {
            info!("Admin accounts already exist; skipping bootstrap admin");
        }
    }

    let conflict_policy: ConflictPolicy = if args.strict_driver_conflicts {
        ConflictPolicy::Strict
    } else {
        ConflictPolicy::AmbulanceOnly
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        conflict_policy,
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
