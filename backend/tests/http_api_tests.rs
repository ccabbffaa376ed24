//! HTTP API tests driving the axum router directly.
#![cfg(feature = "http-server")]

mod support;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use timetable_engine::db::repositories::LocalRepository;
use timetable_engine::http::{create_router, AppState};

fn seeded_repo() -> LocalRepository {
    LocalRepository::from_dataset_file(support::sample_dataset_path()).unwrap()
}

async fn send(repo: &LocalRepository, method: &str, uri: &str) -> (StatusCode, Value) {
    let app = create_router(AppState::new(Arc::new(repo.clone())));
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_health_reports_repository_status() {
    let repo = seeded_repo();

    let (status, body) = send(&repo, "GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");

    repo.set_healthy(false);
    let (_, body) = send(&repo, "GET", "/health").await;
    assert_eq!(body["database"], "disconnected");
}

#[tokio::test]
async fn test_generate_returns_schedule_and_conflicts() {
    let repo = seeded_repo();

    let (status, body) = send(&repo, "POST", "/v1/schedule/generate").await;

    assert_eq!(status, StatusCode::OK);
    let schedule = body["schedule"].as_array().unwrap();
    assert!(!schedule.is_empty());
    let first = &schedule[0];
    for field in [
        "id",
        "module_id",
        "lecturer_id",
        "room_id",
        "timeslot_id",
        "day",
        "start_time",
        "end_time",
        "run_id",
        "created_at",
    ] {
        assert!(first.get(field).is_some(), "missing {}", field);
    }
    assert_eq!(first["start_time"].as_str().unwrap().len(), 5);

    let conflicts = body["conflicts"].as_array().unwrap();
    assert!(conflicts.iter().all(|c| matches!(
        c["type"].as_str(),
        Some("lecturer_unavailable" | "room_over_capacity" | "lecturer_overlap")
    )));
}

#[tokio::test]
async fn test_runs_listing_and_lookup() {
    let repo = seeded_repo();
    let (_, generated) = send(&repo, "POST", "/v1/schedule/generate").await;
    let run_id = generated["schedule"][0]["run_id"].as_str().unwrap().to_string();

    let (status, runs) = send(&repo, "GET", "/v1/schedule/runs").await;
    assert_eq!(status, StatusCode::OK);
    let runs = runs.as_array().unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0]["run_id"], run_id.as_str());

    let (status, entries) = send(&repo, "GET", &format!("/v1/schedule/runs/{}", run_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entries, generated["schedule"]);
}

#[tokio::test]
async fn test_run_lookup_filters() {
    let repo = seeded_repo();
    let (_, generated) = send(&repo, "POST", "/v1/schedule/generate").await;
    let run_id = generated["schedule"][0]["run_id"].as_str().unwrap().to_string();

    let (status, entries) = send(
        &repo,
        "GET",
        &format!("/v1/schedule/runs/{}?day=monday&room_id=1", run_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    for entry in entries.as_array().unwrap() {
        assert_eq!(entry["day"], "Monday");
        assert_eq!(entry["room_id"], 1);
    }

    let (status, body) = send(
        &repo,
        "GET",
        &format!("/v1/schedule/runs/{}?day=someday", run_id),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_unknown_run_is_empty_list() {
    let repo = seeded_repo();

    let (status, body) = send(&repo, "GET", "/v1/schedule/runs/does-not-exist").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Array(vec![]));
}

#[tokio::test]
async fn test_generation_failure_is_generic_500() {
    let repo = seeded_repo();
    let (_, kept) = send(&repo, "POST", "/v1/schedule/generate").await;

    repo.set_reject_commits(true);
    let (status, body) = send(&repo, "POST", "/v1/schedule/generate").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "GENERATION_FAILED");
    assert!(body.get("details").is_none());

    let (_, runs) = send(&repo, "GET", "/v1/schedule/runs").await;
    assert_eq!(runs[0]["run_id"], kept["schedule"][0]["run_id"]);
}

#[tokio::test]
async fn test_unhealthy_repository_on_run_listing() {
    let repo = seeded_repo();
    repo.set_healthy(false);

    let (status, body) = send(&repo, "GET", "/v1/schedule/runs").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "REPOSITORY_UNAVAILABLE");
}
