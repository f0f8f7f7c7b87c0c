//! HTTP request handlers for the PaySphere API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{EmployeeUpdate, PayslipInput};

use super::request::{CreateEmployeeRequest, PayrollQuery};
use super::response::{
    ApiError, ApiErrorResponse, EmployeeResponse, PayrollResponse, PayslipResponse,
};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees", post(create_employee).get(list_employees))
        .route(
            "/employees/:id",
            get(read_employee)
                .patch(update_employee)
                .delete(delete_employee),
        )
        .route(
            "/employees/:id/payslip",
            post(create_payslip).get(read_payslip),
        )
        .route("/payroll", get(payroll_report))
        .with_state(state)
}

/// Turns a body extraction failure into a `400` response.
fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

/// Logs an engine error and converts it to a response.
fn engine_error(correlation_id: Uuid, error: EngineError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        error = %error,
        "Request failed"
    );
    error.into()
}

/// Handler for `POST /employees`.
async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<CreateEmployeeRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<EmployeeResponse>)> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing create employee request");

    let Json(request) = payload.map_err(|r| json_rejection(correlation_id, r))?;
    let manual_id = request
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty());

    let mut engine = state.engine().await;
    let created = match manual_id {
        Some(id) => engine.create_employee_with_id(id, &request.employee),
        None => engine.create_employee(&request.employee),
    };
    let id = created.map_err(|e| engine_error(correlation_id, e))?;

    let employee = engine
        .read_employee(&id.to_string())
        .map_err(|e| engine_error(correlation_id, e))?;
    info!(correlation_id = %correlation_id, employee_id = %id, "Employee created");
    Ok((StatusCode::CREATED, Json(employee.into())))
}

/// Handler for `GET /employees`.
async fn list_employees(State(state): State<AppState>) -> Json<Vec<EmployeeResponse>> {
    let engine = state.engine().await;
    Json(engine.list_employees().map(EmployeeResponse::from).collect())
}

/// Handler for `GET /employees/:id`.
async fn read_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<EmployeeResponse>> {
    let engine = state.engine().await;
    let employee = engine.read_employee(&id)?;
    Ok(Json(employee.into()))
}

/// Handler for `PATCH /employees/:id`.
async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<EmployeeUpdate>, JsonRejection>,
) -> ApiResult<Json<EmployeeResponse>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %id, "Processing update request");

    let Json(update) = payload.map_err(|r| json_rejection(correlation_id, r))?;
    let mut engine = state.engine().await;
    let employee = engine
        .update_employee(&id, &update)
        .map_err(|e| engine_error(correlation_id, e))?;
    Ok(Json(employee.into()))
}

/// Handler for `DELETE /employees/:id`.
async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let correlation_id = Uuid::new_v4();
    let mut engine = state.engine().await;
    engine
        .delete_employee(&id)
        .map_err(|e| engine_error(correlation_id, e))?;
    info!(correlation_id = %correlation_id, employee_id = %id, "Employee deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for `POST /employees/:id/payslip`.
///
/// Computes a payslip and replaces the employee's current one.
async fn create_payslip(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PayslipInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PayslipResponse>)> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %id, "Processing payslip request");

    let Json(input) = payload.map_err(|r| json_rejection(correlation_id, r))?;
    let mut engine = state.engine().await;
    let currency_symbol = engine.config().company().currency_symbol.clone();
    let payslip = engine
        .create_payslip(&id, &input)
        .map_err(|e| engine_error(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %payslip.employee_id,
        net_pay = %payslip.net_pay,
        "Payslip created"
    );
    Ok((
        StatusCode::CREATED,
        Json(PayslipResponse::new(payslip, &currency_symbol)),
    ))
}

/// Handler for `GET /employees/:id/payslip`.
async fn read_payslip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PayslipResponse>> {
    let engine = state.engine().await;
    let payslip = engine
        .read_payslip(&id)?
        .ok_or_else(|| ApiErrorResponse::not_found(ApiError::payslip_not_found(&id)))?;
    Ok(Json(PayslipResponse::new(
        payslip,
        &engine.config().company().currency_symbol,
    )))
}

/// Handler for `GET /payroll`.
async fn payroll_report(
    State(state): State<AppState>,
    Query(query): Query<PayrollQuery>,
) -> ApiResult<Json<PayrollResponse>> {
    let payroll_date = query.payroll_date()?;
    let engine = state.engine().await;
    let company = engine.config().company();
    let report = engine.payroll_report(payroll_date)?;
    info!(headcount = report.totals.headcount, "Payroll report generated");
    Ok(Json(PayrollResponse::new(
        report,
        &company.name,
        &company.currency_symbol,
    )))
}
