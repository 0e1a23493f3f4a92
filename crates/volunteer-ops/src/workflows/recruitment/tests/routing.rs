use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::workflows::recruitment::board_router;
use crate::workflows::recruitment::domain::Stage;

fn router() -> axum::Router {
    let service = build_service(seeded_board(), Arc::new(RecordingPersistence::default()));
    board_router(Arc::new(service))
}

fn json_request(method: &str, uri: &str, payload: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn board_endpoint_lists_lanes_in_pipeline_order() {
    let response = router()
        .oneshot(
            Request::builder()
                .uri("/api/v1/recruitment/board")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["total"], 4);
    let lanes = body["lanes"].as_array().expect("lanes array");
    assert_eq!(lanes.len(), Stage::ordered().len());
    assert_eq!(lanes[0]["stage_label"], "Application Received");
    assert_eq!(lanes[2]["count"], 3);
}

#[tokio::test]
async fn move_endpoint_applies_and_reports_the_new_position() {
    let response = router()
        .oneshot(json_request(
            "POST",
            "/api/v1/recruitment/board/move",
            json!({
                "candidate_id": "cand-c",
                "from_stage": "HR Interview Scheduled",
                "to_stage": "HR Interview Completed",
                "target_index": 0,
            }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["to_stage"], "hr_interview_completed");
    assert_eq!(body["to_index"], 0);
    assert_eq!(body["persisted"], true);
    assert_eq!(body["candidate"]["status_label"], "HR Interview Completed");
}

#[tokio::test]
async fn unrecognized_stage_names_are_invalid_transition_targets() {
    let response = router()
        .oneshot(json_request(
            "POST",
            "/api/v1/recruitment/board/move",
            json!({
                "candidate_id": "cand-c",
                "from_stage": "HR Interview Scheduled",
                "to_stage": "Shortlisted",
                "target_index": 0,
            }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("not a recognized pipeline stage"));
}

#[tokio::test]
async fn stale_source_stage_maps_to_conflict() {
    let response = router()
        .oneshot(json_request(
            "POST",
            "/api/v1/recruitment/board/move",
            json!({
                "candidate_id": "cand-c",
                "from_stage": "Application Received",
                "to_stage": "HR Interview Completed",
                "target_index": 0,
            }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("refetch"));
}

#[tokio::test]
async fn mutations_without_a_session_are_unauthorized() {
    let response = router()
        .oneshot(json_request(
            "PATCH",
            "/api/v1/recruitment/candidates/cand-a",
            json!({ "notes": "updated" }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_session_roles_fail_closed() {
    let request = Request::builder()
        .method("PATCH")
        .uri("/api/v1/recruitment/candidates/cand-a")
        .header("content-type", "application/json")
        .header("x-user-id", "mystery")
        .header("x-user-role", "superuser")
        .body(Body::from(json!({ "notes": "updated" }).to_string()))
        .expect("request builds");

    let response = router().oneshot(request).await.expect("router responds");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("unrecognized role"));
}

#[tokio::test]
async fn hr_can_update_notes_through_the_endpoint() {
    let request = Request::builder()
        .method("PATCH")
        .uri("/api/v1/recruitment/candidates/cand-a")
        .header("content-type", "application/json")
        .header("x-user-id", "hr-1")
        .header("x-user-role", "hr")
        .body(Body::from(
            json!({ "notes": "strong references" }).to_string(),
        ))
        .expect("request builds");

    let response = router().oneshot(request).await.expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["id"], "cand-a");
}

#[tokio::test]
async fn volunteer_updates_are_denied_with_a_message() {
    let request = Request::builder()
        .method("PATCH")
        .uri("/api/v1/recruitment/candidates/cand-a")
        .header("content-type", "application/json")
        .header("x-user-id", "vol-1")
        .header("x-user-role", "volunteer")
        .body(Body::from(json!({ "notes": "hello" }).to_string()))
        .expect("request builds");

    let response = router().oneshot(request).await.expect("router responds");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("not permitted"));
}
