//! Integration tests for the PaySphere HTTP API.
//!
//! This test suite covers:
//! - Employee creation with allocated and supplied identifiers
//! - Reading, listing, updating and deleting employees
//! - Payslip computation and the rounded summary
//! - Payroll reporting
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use paysphere::api::{AppState, create_router};
use paysphere::config::ConfigLoader;
use paysphere::engine::PayrollEngine;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/paysphere").expect("Failed to load config");
    let (config, _) = config.into_parts();
    AppState::new(PayrollEngine::new(config))
}

fn create_seeded_state() -> AppState {
    let config = ConfigLoader::load("./config/paysphere").expect("Failed to load config");
    let (config, roster) = config.into_parts();
    let mut engine = PayrollEngine::new(config);
    engine.seed_roster(&roster);
    AppState::new(engine)
}

/// Seeds the predefined employees without their payslips.
fn create_roster_state() -> AppState {
    let config = ConfigLoader::load("./config/paysphere").expect("Failed to load config");
    let (config, mut roster) = config.into_parts();
    for entry in &mut roster {
        entry.payslip = None;
    }
    let mut engine = PayrollEngine::new(config);
    engine.seed_roster(&roster);
    AppState::new(engine)
}

fn normalize_decimal(s: &str) -> String {
    Decimal::from_str(s).unwrap().normalize().to_string()
}

fn assert_decimal(value: &Value, expected: &str) {
    let actual = value
        .as_str()
        .unwrap_or_else(|| panic!("Expected decimal string, got {}", value));
    assert_eq!(
        normalize_decimal(actual),
        normalize_decimal(expected),
        "Expected {}, got {}",
        expected,
        actual
    );
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

fn employee_body(department_code: &str, classification_code: &str) -> Value {
    json!({
        "department_code": department_code,
        "classification_code": classification_code,
        "name": "Kit Mayson",
        "job_title": "Programmer",
        "email": "kit.mayson@example.com",
        "phone": "9123456788",
        "department": "Information Technology",
        "manager_name": "Jane Doe",
        "hire_date": "2021-03-10",
        "birth_date": "1992-07-30"
    })
}

async fn create_employee(router: &Router, department_code: &str, classification_code: &str) -> String {
    let (status, body) = send(
        router,
        "POST",
        "/employees",
        Some(employee_body(department_code, classification_code)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "body: {}", body);
    body["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Employee endpoints
// =============================================================================

#[tokio::test]
async fn test_create_employee_allocates_identifier() {
    let router = create_router(create_test_state());

    let (status, body) = send(&router, "POST", "/employees", Some(employee_body("IT", "F"))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], "IT-F-0001");
    assert_eq!(body["classification"], "full_time");
    assert_eq!(body["name"], "Kit Mayson");

    let second = create_employee(&router, "FIN", "C").await;
    assert_eq!(second, "FIN-C-0002");
}

#[tokio::test]
async fn test_create_employee_with_supplied_identifier() {
    let router = create_router(create_test_state());
    let mut body = employee_body("", "");
    body["id"] = json!("ENG-C-0010");

    let (status, created) = send(&router, "POST", "/employees", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], "ENG-C-0010");

    let next = create_employee(&router, "HR", "I").await;
    assert_eq!(next, "HR-I-0011");
}

#[tokio::test]
async fn test_duplicate_identifier_conflicts() {
    let router = create_router(create_seeded_state());
    let mut body = employee_body("", "");
    body["id"] = json!("MKT-I-0003");

    let (status, error) = send(&router, "POST", "/employees", Some(body)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "DUPLICATE_IDENTIFIER");
}

#[tokio::test]
async fn test_create_employee_validation_error() {
    let router = create_router(create_test_state());
    let mut body = employee_body("IT", "F");
    body["email"] = json!("not-an-email");

    let (status, error) = send(&router, "POST", "/employees", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert_eq!(error["details"], "email");

    let (_, list) = send(&router, "GET", "/employees", None).await;
    assert_eq!(list.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_create_employee_missing_field() {
    let router = create_router(create_test_state());
    let mut body = employee_body("IT", "F");
    body.as_object_mut().unwrap().remove("name");

    let (status, error) = send(&router, "POST", "/employees", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(error["message"].as_str().unwrap().contains("missing field"));
}

#[tokio::test]
async fn test_malformed_json() {
    let router = create_router(create_test_state());

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/employees")
                .header("Content-Type", "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_list_employees_in_creation_order() {
    let router = create_router(create_seeded_state());

    let (status, list) = send(&router, "GET", "/employees", None).await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids.len(), 10);
    assert_eq!(ids[0], "HR-F-0001");
    assert_eq!(ids[9], "ENG-C-0010");
}

#[tokio::test]
async fn test_read_employee_ignores_case() {
    let router = create_router(create_seeded_state());

    let (status, body) = send(&router, "GET", "/employees/it-p-0004", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "IT-P-0004");
    assert_eq!(body["classification"], "part_time");
}

#[tokio::test]
async fn test_read_unknown_employee() {
    let router = create_router(create_test_state());

    let (status, error) = send(&router, "GET", "/employees/HR-F-0042", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "EMPLOYEE_NOT_FOUND");

    let (status, _) = send(&router, "GET", "/employees/garbage", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_blank_name_keeps_value() {
    let router = create_router(create_test_state());
    let id = create_employee(&router, "IT", "F").await;

    let (status, body) = send(
        &router,
        "PATCH",
        &format!("/employees/{}", id),
        Some(json!({ "name": "", "job_title": "Lead Programmer" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Kit Mayson");
    assert_eq!(body["job_title"], "Lead Programmer");
}

#[tokio::test]
async fn test_update_invalid_email_changes_nothing() {
    let router = create_router(create_test_state());
    let id = create_employee(&router, "IT", "F").await;

    let (status, error) = send(
        &router,
        "PATCH",
        &format!("/employees/{}", id),
        Some(json!({ "name": "Kit Brooks", "email": "not-an-email" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["details"], "email");

    let (_, body) = send(&router, "GET", &format!("/employees/{}", id), None).await;
    assert_eq!(body["name"], "Kit Mayson");
    assert_eq!(body["email"], "kit.mayson@example.com");
}

#[tokio::test]
async fn test_delete_twice() {
    let router = create_router(create_test_state());
    let id = create_employee(&router, "IT", "F").await;
    let uri = format!("/employees/{}", id);

    let (status, _) = send(&router, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, error) = send(&router, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "EMPLOYEE_NOT_FOUND");

    let (status, _) = send(&router, "GET", &format!("{}/payslip", uri), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Payslip endpoints
// =============================================================================

#[tokio::test]
async fn test_full_time_it_payslip() {
    let router = create_router(create_test_state());
    let id = create_employee(&router, "IT", "F").await;

    let (status, body) = send(
        &router,
        "POST",
        &format!("/employees/{}/payslip", id),
        Some(json!({
            "hours_worked": "250",
            "overtime_hours": "8",
            "salary_advance": "0",
            "incentives": "1500",
            "bonus": "2000"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "body: {}", body);
    assert_eq!(body["currency_symbol"], "₱");

    let payslip = &body["payslip"];
    assert_decimal(&payslip["hourly_rate"], "117");
    assert_decimal(&payslip["basic_pay"], "29250");
    assert_decimal(&payslip["overtime_pay"], "1404");
    assert_decimal(&payslip["total_earnings"], "34154");
    assert_decimal(&payslip["net_pay"], "31594.625");

    let summary = &body["summary"];
    assert_eq!(summary["social_security"], "1316.25");
    assert_eq!(summary["health_insurance"], "658.13");
    assert_eq!(summary["housing_fund"], "585.00");
    assert_eq!(summary["total_deductions"], "2559.38");
    assert_eq!(summary["net_pay"], "31594.62");
}

#[tokio::test]
async fn test_payslip_defaults_optional_amounts() {
    let router = create_router(create_test_state());
    let id = create_employee(&router, "MKT", "I").await;

    let (status, body) = send(
        &router,
        "POST",
        &format!("/employees/{}/payslip", id),
        Some(json!({ "hours_worked": "10", "overtime_hours": "3" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_decimal(&body["payslip"]["overtime_pay"], "0");
    assert_decimal(&body["payslip"]["input"]["bonus"], "0");
}

#[tokio::test]
async fn test_negative_payslip_input_keeps_previous() {
    let router = create_router(create_test_state());
    let id = create_employee(&router, "IT", "P").await;
    let uri = format!("/employees/{}/payslip", id);

    let (status, _) = send(
        &router,
        "POST",
        &uri,
        Some(json!({ "hours_worked": "10", "overtime_hours": "0" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, error) = send(
        &router,
        "POST",
        &uri,
        Some(json!({ "hours_worked": "10", "overtime_hours": "0", "bonus": "-1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_INPUT");
    assert_eq!(error["details"], "bonus");

    let (status, body) = send(&router, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_decimal(&body["payslip"]["input"]["bonus"], "0");
    assert_decimal(&body["payslip"]["basic_pay"], "585");
}

#[tokio::test]
async fn test_oversized_payslip_input() {
    let router = create_router(create_test_state());
    let id = create_employee(&router, "IT", "F").await;

    let (status, error) = send(
        &router,
        "POST",
        &format!("/employees/{}/payslip", id),
        Some(json!({
            "hours_worked": "79228162514264337593543950335",
            "overtime_hours": "0"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "AMOUNT_OUT_OF_RANGE");
    assert_eq!(error["details"], "basic_pay");

    let (status, _) = send(&router, "GET", &format!("/employees/{}/payslip", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_seeded_roster_has_payslips() {
    let router = create_router(create_seeded_state());

    let (status, payslip) = send(&router, "GET", "/employees/HR-F-0001/payslip", None).await;
    assert_eq!(status, StatusCode::OK, "body: {}", payslip);

    let (status, report) = send(&router, "GET", "/payroll", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["totals"]["headcount"], 10);
    assert_eq!(report["rows"][0]["employee_id"], "HR-F-0001");
    assert_eq!(report["rows"][9]["employee_id"], "ENG-C-0010");
}

#[tokio::test]
async fn test_read_payslip_before_creation() {
    let router = create_router(create_roster_state());

    let (status, error) = send(&router, "GET", "/employees/HR-F-0001/payslip", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "PAYSLIP_NOT_FOUND");
}

// =============================================================================
// Payroll endpoint
// =============================================================================

#[tokio::test]
async fn test_payroll_report() {
    let router = create_router(create_roster_state());

    for (id, hours) in [("HR-F-0001", "160"), ("IT-P-0004", "80")] {
        let (status, _) = send(
            &router,
            "POST",
            &format!("/employees/{}/payslip", id),
            Some(json!({ "hours_worked": hours, "overtime_hours": "0" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, report) = send(&router, "GET", "/payroll?date=2026-10-31", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["company"], "PaySphere");
    assert_eq!(report["payroll_date"], "2026-10-31");
    assert_eq!(report["rows"].as_array().unwrap().len(), 2);
    assert_eq!(report["rows"][0]["employee_id"], "HR-F-0001");
    assert_eq!(report["totals"]["headcount"], 2);
    // 160 x 67.13 + 80 x 58.50
    assert_decimal(&report["precise_totals"]["basic_pay"], "15420.8");
    assert_eq!(report["totals"]["basic_pay"], "15420.80");
}

#[tokio::test]
async fn test_payroll_report_empty() {
    let router = create_router(create_test_state());

    let (status, report) = send(&router, "GET", "/payroll", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["payroll_date"], Value::Null);
    assert_eq!(report["totals"]["headcount"], 0);
    assert_decimal(&report["totals"]["net_pay"], "0");
}

#[tokio::test]
async fn test_payroll_report_bad_date() {
    let router = create_router(create_test_state());

    let (status, error) = send(&router, "GET", "/payroll?date=31-10-2026", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["details"], "date");
}
