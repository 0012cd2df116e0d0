use std::sync::Arc;

use reqwest::Method;

use super::*;
use crate::config::Variant;
use crate::hr::types::ApprovalDecision;
use crate::mock_backend::{MockBackend, Route, employee_json};
use crate::store::MemoryStore;

fn leave_json(id: u64, kind: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "employee": employee_json(4, "Grace", "Hopper"),
        "type": kind,
        "start_date": "2024-07-01T00:00:00Z",
        "end_date": "2024-07-05T00:00:00Z",
        "days": 5,
        "reason": "Holiday",
        "status": status,
        "comments": "",
        "created_at": "2024-06-01T00:00:00Z",
        "updated_at": "2024-06-01T00:00:00Z"
    })
}

#[tokio::test]
async fn list_filters_by_type_and_dates() {
    let backend = MockBackend::start(vec![Route::json(
        Method::GET,
        "/leaves",
        200,
        serde_json::json!({
            "leaves": [leave_json(1, "Annual", "Pending")],
            "pagination": { "page": 1, "limit": 10, "total": 1 }
        }),
    )])
    .await;
    let client = backend.client(Variant::Hr, Arc::new(MemoryStore::new()));
    let filter = LeaveFilter {
        employee: Some(4),
        leave_type: Some(LeaveType::Annual),
        start_date: Some("2024-07-01".into()),
        end_date: Some("2024-07-31".into()),
        ..LeaveFilter::default()
    };

    let page = client.hr().leaves().list(&filter).await.unwrap();

    assert_eq!(
        backend.last().query.as_deref(),
        Some("page=1&limit=10&employee=4&type=Annual&start_date=2024-07-01&end_date=2024-07-31")
    );
    assert_eq!(page.items[0].days, 5);
    assert_eq!(page.pagination.total_pages(), 1);
    assert!(!page.pagination.has_next());
}

#[tokio::test]
async fn create_sends_type_field() {
    let backend = MockBackend::start(vec![Route::json(Method::POST, "/leaves", 201, leave_json(7, "Sick", "Pending"))]).await;
    let client = backend.client(Variant::Hr, Arc::new(MemoryStore::new()));
    let request = CreateLeaveRequest {
        employee_id: 4,
        leave_type: LeaveType::Sick,
        start_date: "2024-07-01T00:00:00Z".into(),
        end_date: "2024-07-05T00:00:00Z".into(),
        reason: "Flu".into(),
        attachment_url: None,
    };

    let leave = client.hr().leaves().create(&request).await.unwrap();

    assert!(leave.is_pending());
    assert_eq!(backend.last().body["type"], "Sick");
    assert_eq!(backend.last().body["employee_id"], 4);
}

#[tokio::test]
async fn overlap_is_conflict() {
    let backend = MockBackend::start(vec![Route::json(
        Method::POST,
        "/leaves",
        409,
        serde_json::json!({ "error": "Employee has overlapping leave during this period" }),
    )])
    .await;
    let client = backend.client(Variant::Hr, Arc::new(MemoryStore::new()));
    let request = CreateLeaveRequest {
        employee_id: 4,
        leave_type: LeaveType::Annual,
        start_date: "2024-07-02T00:00:00Z".into(),
        end_date: "2024-07-03T00:00:00Z".into(),
        reason: "Again".into(),
        attachment_url: None,
    };

    let err = client.hr().leaves().create(&request).await.unwrap_err();

    assert_eq!(err.status(), Some(reqwest::StatusCode::CONFLICT));
}

#[tokio::test]
async fn approve_posts_decision() {
    let backend = MockBackend::start(vec![Route::json(
        Method::POST,
        "/leaves/7/approve",
        200,
        serde_json::json!({ "message": "Leave Approved successfully" }),
    )])
    .await;
    let client = backend.client(Variant::Hr, Arc::new(MemoryStore::new()));

    let ack = client
        .hr()
        .leaves()
        .approve(7, &LeaveApproval::new(ApprovalDecision::Approved, "Enjoy"))
        .await
        .unwrap();

    assert_eq!(ack.message, "Leave Approved successfully");
    assert_eq!(backend.last().body, serde_json::json!({ "status": "Approved", "comments": "Enjoy" }));
}

#[tokio::test]
async fn update_and_delete_hit_id_paths() {
    let backend = MockBackend::start(vec![
        Route::json(Method::PUT, "/leaves/7", 200, leave_json(7, "Personal", "Pending")),
        Route::json(Method::DELETE, "/leaves/7", 200, serde_json::json!({ "message": "Leave deleted successfully" })),
    ])
    .await;
    let client = backend.client(Variant::Hr, Arc::new(MemoryStore::new()));
    let leaves = client.hr().leaves();

    let request = UpdateLeaveRequest { leave_type: Some(LeaveType::Personal), ..UpdateLeaveRequest::default() };
    let leave = leaves.update(7, &request).await.unwrap();
    assert_eq!(leave.leave_type, LeaveType::Personal);
    assert_eq!(backend.last().body, serde_json::json!({ "type": "Personal" }));

    leaves.delete(7).await.unwrap();
    assert_eq!(backend.last().path, "/leaves/7");
}

#[tokio::test]
async fn listings_decode() {
    let backend = MockBackend::start(vec![
        Route::json(
            Method::GET,
            "/leaves/types",
            200,
            serde_json::json!({ "leave_types": ["Annual", "Sick", "Unpaid"] }),
        ),
        Route::json(
            Method::GET,
            "/leaves/statuses",
            200,
            serde_json::json!({ "leave_statuses": ["Pending", "Approved", "Rejected", "Cancelled"] }),
        ),
    ])
    .await;
    let client = backend.client(Variant::Hr, Arc::new(MemoryStore::new()));

    let types = client.hr().leaves().types().await.unwrap();
    assert_eq!(types, vec![LeaveType::Annual, LeaveType::Sick, LeaveType::Unpaid]);

    let statuses = client.hr().leaves().statuses().await.unwrap();
    assert_eq!(statuses.len(), 4);
    assert_eq!(statuses[3], LeaveStatus::Cancelled);
}
