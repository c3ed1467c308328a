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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};
use vacation_api::{
    ApiError, CreateEmployeeRequest, DeleteEmployeeResponse, DeleteRangesRequest,
    EmployeeResponse, HolidaysResponse, ListEmployeesResponse, SaveRangesRequest,
    UpdateEmployeeRequest, VacationRangesResponse, create_employee, delete_employee,
    delete_vacation_ranges, get_employee, list_employees, list_holidays, save_vacation_ranges,
    update_employee,
};
use vacation_domain::{EmployeeId, HolidaySet, PositionRateTable, today};
use vacation_persistence::Persistence;

/// Vacation Planner Server - HTTP server for vacation accrual and booking
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// JSON array of ISO dates replacing the public holiday table at start-up
    #[arg(long)]
    holidays: Option<PathBuf>,

    /// JSON object mapping position titles to additional days per year
    #[arg(long)]
    position_rates: Option<PathBuf>,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer, one connection behind a lock.
    persistence: Arc<Mutex<Persistence>>,
    /// Default additional days per position title. Read-only.
    rates: Arc<PositionRateTable>,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
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
        let status: StatusCode = match err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for GET `/employees` endpoint.
///
/// Lists every employee with simple-mode accrual.
async fn handle_list_employees(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListEmployeesResponse>, HttpError> {
    info!("Handling list_employees request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ListEmployeesResponse =
        list_employees(&mut persistence, &app_state.rates, today())?;

    Ok(Json(response))
}

/// Handler for GET `/employees/{id}` endpoint.
///
/// Returns one employee with exact-mode accrual.
async fn handle_get_employee(
    AxumState(app_state): AxumState<AppState>,
    Path(employee_id): Path<i64>,
) -> Result<Json<EmployeeResponse>, HttpError> {
    info!(employee_id, "Handling get_employee request");

    let mut persistence = app_state.persistence.lock().await;
    let response: EmployeeResponse = get_employee(
        &mut persistence,
        &app_state.rates,
        today(),
        EmployeeId::new(employee_id),
    )?;

    Ok(Json(response))
}

/// Handler for POST `/employees` endpoint.
async fn handle_create_employee(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<EmployeeResponse>), HttpError> {
    info!(display_name = %req.display_name, "Handling create_employee request");

    let mut persistence = app_state.persistence.lock().await;
    let response: EmployeeResponse =
        create_employee(&mut persistence, &app_state.rates, today(), &req)?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for PUT `/employees/{id}` endpoint.
async fn handle_update_employee(
    AxumState(app_state): AxumState<AppState>,
    Path(employee_id): Path<i64>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> Result<Json<EmployeeResponse>, HttpError> {
    info!(employee_id, "Handling update_employee request");

    let mut persistence = app_state.persistence.lock().await;
    let response: EmployeeResponse = update_employee(
        &mut persistence,
        &app_state.rates,
        today(),
        EmployeeId::new(employee_id),
        &req,
    )?;

    Ok(Json(response))
}

/// Handler for DELETE `/employees/{id}` endpoint.
async fn handle_delete_employee(
    AxumState(app_state): AxumState<AppState>,
    Path(employee_id): Path<i64>,
) -> Result<Json<DeleteEmployeeResponse>, HttpError> {
    info!(employee_id, "Handling delete_employee request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteEmployeeResponse =
        delete_employee(&mut persistence, EmployeeId::new(employee_id))?;

    Ok(Json(response))
}

/// Handler for POST `/vacations/save` endpoint.
async fn handle_save_vacations(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SaveRangesRequest>,
) -> Result<Json<VacationRangesResponse>, HttpError> {
    info!(
        employee_id = %req.employee_id,
        year = req.year,
        ranges = req.ranges.len(),
        "Handling save_vacations request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: VacationRangesResponse = save_vacation_ranges(&mut persistence, &req)?;

    Ok(Json(response))
}

/// Handler for POST `/vacations/delete` endpoint.
async fn handle_delete_vacations(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<DeleteRangesRequest>,
) -> Result<Json<VacationRangesResponse>, HttpError> {
    info!(
        employee_id = %req.employee_id,
        year = req.year,
        ranges = req.ranges.len(),
        "Handling delete_vacations request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: VacationRangesResponse = delete_vacation_ranges(&mut persistence, &req)?;

    Ok(Json(response))
}

/// Handler for GET `/public-holidays` endpoint.
async fn handle_list_holidays(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<HolidaysResponse>, HttpError> {
    info!("Handling list_holidays request");

    let mut persistence = app_state.persistence.lock().await;
    let response: HolidaysResponse = list_holidays(&mut persistence)?;

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/employees",
            get(handle_list_employees).post(handle_create_employee),
        )
        .route(
            "/employees/{id}",
            get(handle_get_employee)
                .put(handle_update_employee)
                .delete(handle_delete_employee),
        )
        .route("/vacations/save", post(handle_save_vacations))
        .route("/vacations/delete", post(handle_delete_vacations))
        .route("/public-holidays", get(handle_list_holidays))
        .with_state(app_state)
}

/// Reads a JSON array of ISO dates.
fn load_holidays(path: &std::path::Path) -> Result<HolidaySet, Box<dyn std::error::Error>> {
    let contents: String = std::fs::read_to_string(path)?;
    let dates: Vec<String> = serde_json::from_str(&contents)?;
    Ok(HolidaySet::from_iso_strings(dates)?)
}

/// Reads a JSON object mapping titles to additional days per year.
fn load_position_rates(
    path: &std::path::Path,
) -> Result<PositionRateTable, Box<dyn std::error::Error>> {
    let contents: String = std::fs::read_to_string(path)?;
    let rates: HashMap<String, f64> = serde_json::from_str(&contents)?;
    Ok(PositionRateTable::new(rates))
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

    info!("Initializing Vacation Planner Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path.display());
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if let Some(path) = &args.holidays {
        let holidays: HolidaySet = load_holidays(path)?;
        let stored: usize = persistence.replace_holidays(&holidays)?;
        info!(count = stored, path = %path.display(), "Loaded public holidays");
    }

    let rates: PositionRateTable = match &args.position_rates {
        Some(path) => {
            let rates: PositionRateTable = load_position_rates(path)?;
            info!(count = rates.len(), path = %path.display(), "Loaded position rates");
            rates
        }
        None => PositionRateTable::standard(),
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        rates: Arc::new(rates),
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
