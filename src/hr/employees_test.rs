use std::sync::Arc;

use reqwest::Method;

use super::*;
use crate::config::Variant;
use crate::hr::types::{EmployeeStatus, Gender};
use crate::mock_backend::{CountingStore, MockBackend, Route, employee_json};
use crate::store::MemoryStore;

#[tokio::test]
async fn list_sends_page_first_then_set_filters() {
    let backend = MockBackend::start(vec![Route::json(
        Method::GET,
        "/employees",
        200,
        serde_json::json!({
            "employees": [employee_json(1, "Grace", "Hopper"), employee_json(2, "Alan", "Turing")],
            "pagination": { "page": 2, "limit": 2, "total": 5 }
        }),
    )])
    .await;
    let client = backend.client(Variant::Hr, Arc::new(MemoryStore::new()));
    let filter = EmployeeFilter {
        page: 2,
        limit: 2,
        department: Some(2),
        status: Some(EmployeeStatus::Active),
        search: None,
    };

    let page = client.hr().employees().list(&filter).await.unwrap();

    assert_eq!(backend.last().query.as_deref(), Some("page=2&limit=2&department=2&status=Active"));
    assert_eq!(page.items[1].last_name, "Turing");
    assert_eq!(page.pagination.total_pages(), 3);
    assert!(page.pagination.has_next());
}

#[tokio::test]
async fn create_posts_snake_case_body() {
    let backend = MockBackend::start(vec![Route::json(
        Method::POST,
        "/employees",
        201,
        employee_json(12, "Katherine", "Johnson"),
    )])
    .await;
    let client = backend.client(Variant::Hr, Arc::new(MemoryStore::new()));
    let request = CreateEmployeeRequest {
        first_name: "Katherine".into(),
        last_name: "Johnson".into(),
        email: "katherine@example.com".into(),
        phone: "555-0100".into(),
        date_of_birth: None,
        gender: Some(Gender::Female),
        address: String::new(),
        position: "Analyst".into(),
        department_id: 2,
        hire_date: "2024-01-15T00:00:00Z".into(),
        salary: 72_000.0,
        manager_id: Some(1),
        emergency_contact: String::new(),
        emergency_contact_phone: String::new(),
    };

    let employee = client.hr().employees().create(&request).await.unwrap();

    assert_eq!(employee.id, 12);
    let body = backend.last().body;
    assert_eq!(body["first_name"], "Katherine");
    assert_eq!(body["department_id"], 2);
    assert_eq!(body["gender"], "Female");
    assert_eq!(body["manager_id"], 1);
    assert!(body.get("date_of_birth").is_none());
}

#[tokio::test]
async fn duplicate_email_leaves_session_alone() {
    let backend = MockBackend::start(vec![Route::json(
        Method::PUT,
        "/employees/3",
        409,
        serde_json::json!({ "error": "Employee with this email already exists" }),
    )])
    .await;
    let store = Arc::new(CountingStore::with_token("auth_token", "t1"));
    let client = backend.client(Variant::Hr, store.clone());
    let request = UpdateEmployeeRequest { email: Some("taken@example.com".into()), ..UpdateEmployeeRequest::default() };

    let err = client
        .hr()
        .employees()
        .update(3, &request)
        .await
        .unwrap_err();

    assert_eq!(err.body(), Some(&serde_json::json!({ "error": "Employee with this email already exists" })));
    assert_eq!(store.writes(), 0);
    assert_eq!(store.removals("auth_token"), 0);
}

#[tokio::test]
async fn delete_returns_acknowledgement() {
    let backend = MockBackend::start(vec![Route::json(
        Method::DELETE,
        "/employees/3",
        200,
        serde_json::json!({ "message": "Employee deleted successfully" }),
    )])
    .await;
    let client = backend.client(Variant::Hr, Arc::new(MemoryStore::new()));

    let ack = client.hr().employees().delete(3).await.unwrap();

    assert_eq!(ack.message, "Employee deleted successfully");
}

#[tokio::test]
async fn missing_employee_is_not_found() {
    let backend = MockBackend::start(vec![Route::json(
        Method::GET,
        "/employees/99",
        404,
        serde_json::json!({ "error": "Employee not found" }),
    )])
    .await;
    let client = backend.client(Variant::Hr, Arc::new(MemoryStore::new()));

    let err = client.hr().employees().get(99).await.unwrap_err();

    assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
    assert_eq!(err.to_string(), "server returned HTTP 404: Employee not found");
}
