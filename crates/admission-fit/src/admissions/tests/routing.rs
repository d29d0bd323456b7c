use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use super::common::*;
use crate::admissions::admission_router;

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn simulation_route_returns_result() {
    let router = admission_router_with_service(build_service());

    let response = router
        .oneshot(json_post(
            &format!("/api/v1/students/{STUDENT}/simulations/{OPEN_SCHOOL}"),
            json!({ "hypothetical_activities": 5 }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["baseline"]["tier"], "CHALLENGE");
    assert_eq!(payload["simulated"]["tier"], "FIT");
    assert_eq!(payload["level_changed"], true);
    assert_eq!(payload["change_factors"][0]["category"], "activities");
}

#[tokio::test]
async fn simulation_route_returns_not_found_for_unknown_school() {
    let router = admission_router_with_service(build_service());

    let response = router
        .oneshot(json_post(
            &format!("/api/v1/students/{STUDENT}/simulations/nowhere-high"),
            json!({}),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "school not found: nowhere-high");
}

#[tokio::test]
async fn reader_outage_maps_to_service_unavailable() {
    let router = admission_router(Arc::new(unavailable_service()));

    let response = router
        .oneshot(
            Request::get(format!(
                "/api/v1/students/{STUDENT}/scenarios/{OPEN_SCHOOL}"
            ))
            .body(Body::empty())
            .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn scenarios_route_lists_four_scenarios() {
    let router = admission_router_with_service(build_service());

    let response = router
        .oneshot(
            Request::get(format!(
                "/api/v1/students/{STUDENT}/scenarios/{OPEN_SCHOOL}"
            ))
            .body(Body::empty())
            .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let scenarios = payload["scenarios"].as_array().expect("scenario list");
    assert_eq!(scenarios.len(), 4);
    assert_eq!(scenarios[0]["scenario"], "grade_improvement");
    assert_eq!(scenarios[3]["scenario"], "combined");
}

#[tokio::test]
async fn plan_route_accepts_tier_and_date_query() {
    let router = admission_router_with_service(build_service());

    let response = router
        .oneshot(
            Request::get(format!(
                "/api/v1/students/{STUDENT}/improvement-plan/{OPEN_SCHOOL}?target_tier=challenge&today=2025-09-01"
            ))
            .body(Body::empty())
            .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["target_tier"], "CHALLENGE");
    assert_eq!(payload["target_score"], 55.0);
    assert_eq!(payload["gap"], 10.0);
    assert_eq!(payload["estimated_weeks"], 6);
    assert_eq!(payload["projected_completion"], "2025-10-13");
}

#[tokio::test]
async fn batch_route_covers_target_list() {
    let router = admission_router_with_service(build_service());

    let response = router
        .oneshot(json_post(
            &format!("/api/v1/students/{STUDENT}/simulations"),
            json!({ "hypothetical_volunteer_hours": 28.0 }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let entries = payload.as_array().expect("batch list");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["school_id"], OPEN_SCHOOL);
    assert_eq!(entries[0]["result"]["score_delta"], 5.0);
}
