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
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::Date;
use time::macros::format_description;
use tokio::sync::Mutex;
use tracing::info;

use rota_api::{
    ApiError, AssignReleaseRequest, AssignShiftRequest, ClaimReleaseRequest, ClaimReleaseResponse,
    ConflictReport, CreateEmployeeRequest, CreateShiftRequest, CreateTimeOffRequest,
    DecisionRequest, EmployeeResponse, HoursExportRequest, HoursReport, LoginRequest,
    LoginResponse, ReleaseResponse, ReleaseShiftRequest, ShiftFilter, ShiftResponse, ShopResponse,
    TemplateRequest, TemplateResponse, TimeOffResponse, UpdateEmployeeRequest, UpdateShiftRequest,
    WhoAmIResponse,
};
use rota_persistence::Persistence;

mod session;

use session::{BearerToken, SessionUser};

/// Rota Server - HTTP server for the Rota scheduling system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// The persistence layer sits behind a Mutex; every mutation already
/// runs in its own immediate transaction underneath, the lock only
/// serializes access to the single connection.
#[derive(Clone)]
pub struct AppState {
    /// The persistence layer.
    pub persistence: Arc<Mutex<Persistence>>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
pub struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl HttpError {
    fn missing_credentials() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: String::from("Missing or malformed Authorization header"),
        }
    }

    fn bad_request(message: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } | ApiError::InvalidState { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::ScheduleConflict { .. }
            | ApiError::TimeOffConflict { .. }
            | ApiError::DuplicateRelease { .. }
            | ApiError::DuplicateTimeOff { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

const QUERY_DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

fn parse_query_date(value: &str) -> Result<Date, HttpError> {
    Date::parse(value, QUERY_DATE_FORMAT)
        .map_err(|e| HttpError::bad_request(format!("'{value}' is not a valid date: {e}")))
}

// ---------------------------------------------------------------------------
// Auth endpoints
// ---------------------------------------------------------------------------

async fn handle_login(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    let persistence = state.persistence.lock().await;
    let response: LoginResponse = rota_api::login(&persistence, &req)?;
    Ok(Json(response))
}

async fn handle_logout(
    AxumState(state): AxumState<AppState>,
    BearerToken(token): BearerToken,
) -> Result<StatusCode, HttpError> {
    let persistence = state.persistence.lock().await;
    rota_api::logout(&persistence, &token)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_whoami(SessionUser(user): SessionUser) -> Json<WhoAmIResponse> {
    Json(rota_api::whoami(&user))
}

// ---------------------------------------------------------------------------
// Shift endpoints
// ---------------------------------------------------------------------------

async fn handle_list_shifts(
    AxumState(state): AxumState<AppState>,
    SessionUser(_user): SessionUser,
    Query(filter): Query<ShiftFilter>,
) -> Result<Json<Vec<ShiftResponse>>, HttpError> {
    let persistence = state.persistence.lock().await;
    let shifts: Vec<ShiftResponse> = rota_api::list_shifts(&persistence, &filter)?;
    Ok(Json(shifts))
}

async fn handle_create_shift(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Json(req): Json<CreateShiftRequest>,
) -> Result<Json<ShiftResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let shift: ShiftResponse = rota_api::create_shift(&mut persistence, &user, &req)?;
    Ok(Json(shift))
}

async fn handle_update_shift(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(shift_id): Path<i64>,
    Json(req): Json<UpdateShiftRequest>,
) -> Result<Json<ShiftResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let shift: ShiftResponse = rota_api::update_shift(&mut persistence, &user, shift_id, &req)?;
    Ok(Json(shift))
}

async fn handle_cancel_shift(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(shift_id): Path<i64>,
) -> Result<Json<ShiftResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let shift: ShiftResponse = rota_api::cancel_shift(&mut persistence, &user, shift_id)?;
    Ok(Json(shift))
}

async fn handle_assign_shift(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(shift_id): Path<i64>,
    Json(req): Json<AssignShiftRequest>,
) -> Result<Json<ShiftResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let shift: ShiftResponse = rota_api::assign_shift(&mut persistence, &user, shift_id, &req)?;
    Ok(Json(shift))
}

async fn handle_generate_template(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Json(req): Json<TemplateRequest>,
) -> Result<Json<TemplateResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response: TemplateResponse =
        rota_api::generate_template_shifts(&mut persistence, &user, &req)?;
    Ok(Json(response))
}

// ---------------------------------------------------------------------------
// Release endpoints
// ---------------------------------------------------------------------------

/// Query parameters for listing releases.
#[derive(Debug, Deserialize)]
struct StatusQuery {
    /// Restrict to one workflow status.
    status: Option<String>,
}

async fn handle_list_releases(
    AxumState(state): AxumState<AppState>,
    SessionUser(_user): SessionUser,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<ReleaseResponse>>, HttpError> {
    let persistence = state.persistence.lock().await;
    let releases: Vec<ReleaseResponse> =
        rota_api::list_releases(&persistence, query.status.as_deref())?;
    Ok(Json(releases))
}

async fn handle_release_shift(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Json(req): Json<ReleaseShiftRequest>,
) -> Result<Json<ReleaseResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let release: ReleaseResponse = rota_api::release_shift(&mut persistence, &user, &req)?;
    Ok(Json(release))
}

async fn handle_claim_release(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(request_id): Path<i64>,
    Json(req): Json<ClaimReleaseRequest>,
) -> Result<Json<ClaimReleaseResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response: ClaimReleaseResponse =
        rota_api::claim_release(&mut persistence, &user, request_id, &req)?;
    Ok(Json(response))
}

async fn handle_approve_release(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(request_id): Path<i64>,
    Json(req): Json<DecisionRequest>,
) -> Result<Json<ReleaseResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let release: ReleaseResponse =
        rota_api::approve_release(&mut persistence, &user, request_id, &req)?;
    Ok(Json(release))
}

async fn handle_reject_release(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(request_id): Path<i64>,
    Json(req): Json<DecisionRequest>,
) -> Result<Json<ReleaseResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let release: ReleaseResponse =
        rota_api::reject_release(&mut persistence, &user, request_id, &req)?;
    Ok(Json(release))
}

async fn handle_cancel_release(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(request_id): Path<i64>,
) -> Result<Json<ReleaseResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let release: ReleaseResponse = rota_api::cancel_release(&mut persistence, &user, request_id)?;
    Ok(Json(release))
}

async fn handle_assign_release(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(request_id): Path<i64>,
    Json(req): Json<AssignReleaseRequest>,
) -> Result<Json<ReleaseResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let release: ReleaseResponse =
        rota_api::assign_release(&mut persistence, &user, request_id, &req)?;
    Ok(Json(release))
}

// ---------------------------------------------------------------------------
// Time-off endpoints
// ---------------------------------------------------------------------------

/// Query parameters for listing time-off requests.
#[derive(Debug, Deserialize)]
struct TimeOffQuery {
    /// Restrict to one employee.
    employee_id: Option<i64>,
    /// Restrict to one approval status.
    status: Option<String>,
}

async fn handle_list_time_off(
    AxumState(state): AxumState<AppState>,
    SessionUser(_user): SessionUser,
    Query(query): Query<TimeOffQuery>,
) -> Result<Json<Vec<TimeOffResponse>>, HttpError> {
    let persistence = state.persistence.lock().await;
    let requests: Vec<TimeOffResponse> =
        rota_api::list_time_off(&persistence, query.employee_id, query.status.as_deref())?;
    Ok(Json(requests))
}

async fn handle_create_time_off(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Json(req): Json<CreateTimeOffRequest>,
) -> Result<Json<TimeOffResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let request: TimeOffResponse = rota_api::create_time_off(&mut persistence, &user, &req)?;
    Ok(Json(request))
}

async fn handle_approve_time_off(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(time_off_id): Path<i64>,
) -> Result<Json<TimeOffResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let request: TimeOffResponse =
        rota_api::approve_time_off(&mut persistence, &user, time_off_id)?;
    Ok(Json(request))
}

async fn handle_reject_time_off(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(time_off_id): Path<i64>,
) -> Result<Json<TimeOffResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let request: TimeOffResponse =
        rota_api::reject_time_off(&mut persistence, &user, time_off_id)?;
    Ok(Json(request))
}

async fn handle_cancel_time_off(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(time_off_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    let mut persistence = state.persistence.lock().await;
    rota_api::cancel_time_off(&mut persistence, &user, time_off_id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Employee and shop endpoints
// ---------------------------------------------------------------------------

/// Query parameters for listings of soft-deletable records.
#[derive(Debug, Deserialize)]
struct ListQuery {
    /// Include inactive records.
    #[serde(default)]
    include_inactive: bool,
}

async fn handle_list_employees(
    AxumState(state): AxumState<AppState>,
    SessionUser(_user): SessionUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<EmployeeResponse>>, HttpError> {
    let persistence = state.persistence.lock().await;
    let employees: Vec<EmployeeResponse> =
        rota_api::list_employees(&persistence, query.include_inactive)?;
    Ok(Json(employees))
}

async fn handle_create_employee(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Json(req): Json<CreateEmployeeRequest>,
) -> Result<Json<EmployeeResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let employee: EmployeeResponse = rota_api::create_employee(&mut persistence, &user, &req)?;
    Ok(Json(employee))
}

async fn handle_update_employee(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(employee_id): Path<i64>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> Result<Json<EmployeeResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let employee: EmployeeResponse =
        rota_api::update_employee(&mut persistence, &user, employee_id, &req)?;
    Ok(Json(employee))
}

async fn handle_deactivate_employee(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(employee_id): Path<i64>,
) -> Result<Json<EmployeeResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let employee: EmployeeResponse =
        rota_api::deactivate_employee(&mut persistence, &user, employee_id)?;
    Ok(Json(employee))
}

async fn handle_list_shops(
    AxumState(state): AxumState<AppState>,
    SessionUser(_user): SessionUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ShopResponse>>, HttpError> {
    let persistence = state.persistence.lock().await;
    let shops: Vec<ShopResponse> = rota_api::list_shops(&persistence, query.include_inactive)?;
    Ok(Json(shops))
}

// ---------------------------------------------------------------------------
// Conflicts and export
// ---------------------------------------------------------------------------

/// Query parameters for the conflict scan.
#[derive(Debug, Deserialize)]
struct ConflictQuery {
    /// First day of the window, `YYYY-MM-DD`. Defaults to today.
    from: Option<String>,
}

async fn handle_list_conflicts(
    AxumState(state): AxumState<AppState>,
    SessionUser(_user): SessionUser,
    Query(query): Query<ConflictQuery>,
) -> Result<Json<ConflictReport>, HttpError> {
    let from: Date = match query.from.as_deref() {
        Some(value) => parse_query_date(value)?,
        None => time::OffsetDateTime::now_utc().date(),
    };

    let persistence = state.persistence.lock().await;
    let report: ConflictReport = rota_api::list_conflicts(&persistence, from)?;
    Ok(Json(report))
}

async fn handle_export_hours(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Query(query): Query<HoursExportRequest>,
) -> Result<Json<HoursReport>, HttpError> {
    let persistence = state.persistence.lock().await;
    let report: HoursReport = rota_api::export_hours(&persistence, &user, &query)?;
    Ok(Json(report))
}

async fn handle_export_hours_csv(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Query(query): Query<HoursExportRequest>,
) -> Result<Response, HttpError> {
    let persistence = state.persistence.lock().await;
    let report: HoursReport = rota_api::export_hours(&persistence, &user, &query)?;
    drop(persistence);
    let bytes: Vec<u8> = rota_api::hours_report_to_csv(&report)?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/csv")],
        bytes,
    )
        .into_response())
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/login", post(handle_login))
        .route("/logout", post(handle_logout))
        .route("/whoami", get(handle_whoami))
        .route("/shifts", get(handle_list_shifts))
        .route("/shifts", post(handle_create_shift))
        .route("/shifts/template", post(handle_generate_template))
        .route("/shifts/{shift_id}", patch(handle_update_shift))
        .route("/shifts/{shift_id}/cancel", post(handle_cancel_shift))
        .route("/shifts/{shift_id}/assign", post(handle_assign_shift))
        .route("/releases", get(handle_list_releases))
        .route("/releases", post(handle_release_shift))
        .route("/releases/{request_id}/claim", post(handle_claim_release))
        .route(
            "/releases/{request_id}/approve",
            post(handle_approve_release),
        )
        .route("/releases/{request_id}/reject", post(handle_reject_release))
        .route("/releases/{request_id}/cancel", post(handle_cancel_release))
        .route("/releases/{request_id}/assign", post(handle_assign_release))
        .route("/time_off", get(handle_list_time_off))
        .route("/time_off", post(handle_create_time_off))
        .route(
            "/time_off/{time_off_id}/approve",
            post(handle_approve_time_off),
        )
        .route(
            "/time_off/{time_off_id}/reject",
            post(handle_reject_time_off),
        )
        .route("/time_off/{time_off_id}", delete(handle_cancel_time_off))
        .route("/employees", get(handle_list_employees))
        .route("/employees", post(handle_create_employee))
        .route("/employees/{employee_id}", patch(handle_update_employee))
        .route(
            "/employees/{employee_id}",
            delete(handle_deactivate_employee),
        )
        .route("/shops", get(handle_list_shops))
        .route("/conflicts", get(handle_list_conflicts))
        .route("/export/hours", get(handle_export_hours))
        .route("/export/hours.csv", get(handle_export_hours_csv))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Rota Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
