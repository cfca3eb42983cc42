//! HTTP facade tests driven through the router with `oneshot`

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use release_portal_api::{app, AppState};
use release_portal_application::events::NoOpEventPublisher;
use release_portal_application::TracingApprovalNotifier;
use release_portal_domain::ids::SequentialIdGenerator;
use release_portal_domain::signoff::NotificationSettings;
use release_portal_persistence::InMemoryHierarchyStore;

fn test_app() -> Router {
    let state = AppState::with_parts(
        Arc::new(InMemoryHierarchyStore::new()),
        Arc::new(SequentialIdGenerator::new()),
        Arc::new(TracingApprovalNotifier::new()),
        Arc::new(NoOpEventPublisher),
        NotificationSettings::default(),
    );
    app(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send_raw(app, method, uri, body.map(|b| b.to_string())).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or(Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<String>) -> (StatusCode, Vec<u8>,
) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(text) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(text)
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

/// Release `spring-launch-1` / team `payments-2` / component
/// `payments-2-billing-api-3` / story `US-pay-by-card-4`
async fn seed(app: &Router) {
    let (status, _) = send(
        app,
        Method::POST,
        "/api/releases",
        Some(json!({"name": "Spring Launch", "version": "1.0", "releaseDate": "2026-04-01"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        app,
        Method::POST,
        "/api/releases/spring-launch-1/teams",
        Some(json!({
            "name": "Payments",
            "teamDl": "payments@corp.test",
            "productOwner": "Ada Lovelace"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        app,
        Method::POST,
        "/api/releases/spring-launch-1/teams/payments-2/components",
        Some(json!({"name": "Billing API", "version": "3.2"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        app,
        Method::POST,
        "/api/releases/spring-launch-1/teams/payments-2/user-stories",
        Some(json!({"description": "Pay by card", "componentIds": ["payments-2-billing-api-3"]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_create_and_get_release_tree() {
    let app = test_app();
    seed(&app).await;

    let (status, body) = send(&app, Method::GET, "/api/releases/spring-launch-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "In Progress");
    assert_eq!(body["overallAppOwnerSignedOff"], "Pending");
    assert_eq!(body["releaseDate"], "2026-04-01");

    let team = &body["teams"][0];
    assert_eq!(team["id"], "payments-2");
    assert_eq!(team["components"][0]["sonarQube"], "Pending");
    assert_eq!(team["userStories"][0]["id"], "US-pay-by-card-4");
    assert_eq!(team["userStories"][0]["componentIds"], json!(["payments-2-billing-api-3"]));

    let (_, releases) = send(&app, Method::GET, "/api/releases", None).await;
    assert_eq!(releases.as_array().unwrap().len(), 1);
    let (_, teams) = send(&app, Method::GET, "/api/teams", None).await;
    assert_eq!(teams.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_release_reports_unresolved_teams() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/releases",
        Some(json!({
            "name": "Autumn",
            "version": "2",
            "releaseDate": "2026-10-01",
            "teamIds": ["ghost"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["unresolvedTeamIds"], json!(["ghost"]));
    assert_eq!(body["release"]["teams"], json!([]));
}

#[tokio::test]
async fn test_bad_input_is_400() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/releases",
        Some(json!({"name": "Spring", "version": "1", "releaseDate": "April first"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "validation_error");

    let (status, body) =
        send_raw(&app, Method::POST, "/api/releases", Some("{not json".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"]["type"], "bad_request");
}

#[tokio::test]
async fn test_unknown_ids_are_404() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/api/releases/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["type"], "not_found");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/releases/nope/teams",
        Some(json!({"name": "Orphans"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_scan_status_validation() {
    let app = test_app();
    seed(&app).await;
    let uri = concat!(
        "/api/releases/spring-launch-1/teams/payments-2",
        "/components/payments-2-billing-api-3/scan"
    );

    let passed = json!({"scanType": "nexusIq", "status": "Passed"});
    let (status, body) = send(&app, Method::PUT, uri, Some(passed)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["previous"], "Pending");
    assert_eq!(body["current"], "Passed");

    let unknown = json!({"scanType": "nexusIq", "status": "Green"});
    let (status, body) = send(&app, Method::PUT, uri, Some(unknown)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "invalid_status");

    let bad_scan = json!({"scanType": "fortify", "status": "Passed"});
    let (status, _) = send(&app, Method::PUT, uri, Some(bad_scan)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, component) = send(
        &app,
        Method::GET,
        "/api/releases/spring-launch-1/teams/payments-2/components/payments-2-billing-api-3",
        None,
    )
    .await;
    assert_eq!(component["nexusIq"], "Passed");
    assert_eq!(component["checkmarx"], "Pending");
}

#[tokio::test]
async fn test_sign_off_flow_and_notify() {
    let app = test_app();
    seed(&app).await;
    let team = "/api/releases/spring-launch-1/teams/payments-2";

    let qa = json!({"qaSignedOff": "Completed"});
    let (status, _) = send(&app, Method::PUT, &format!("{team}/qa-signoff"), Some(qa)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("{team}/appowner-signoff"),
        Some(json!({"appOwnerSignedOff": "Completed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, summary) =
        send(&app, Method::GET, "/api/releases/spring-launch-1/signoff-summary", None).await;
    assert_eq!(summary["allTeamsApproved"], true);
    assert_eq!(summary["qaSignedOff"], 1);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/releases/spring-launch-1/overall-signoff",
        Some(json!({"overallAppOwnerSignedOff": "Completed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, report) =
        send(&app, Method::POST, "/api/releases/spring-launch-1/notify", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["delivered"], true);
    assert_eq!(
        report["recipients"],
        json!(["ada.lovelace@example.com", "payments@corp.test", "release.manager@example.com"])
    );
}

#[tokio::test]
async fn test_release_status_and_metrics() {
    let app = test_app();
    seed(&app).await;

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/releases/spring-launch-1/status",
        Some(json!({"status": "Blocked"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, metrics) = send(&app, Method::GET, "/api/metrics/releases", None).await;
    assert_eq!(metrics["total"], 1);
    assert_eq!(metrics["blocked"], 1);
    assert_eq!(metrics["inProgress"], 0);
}

#[tokio::test]
async fn test_delete_component_detaches_story() {
    let app = test_app();
    seed(&app).await;

    let (status, body) = send(
        &app,
        Method::DELETE,
        "/api/releases/spring-launch-1/teams/payments-2/components/payments-2-billing-api-3",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["detached"], json!([["US-pay-by-card-4", "payments-2-billing-api-3"]]));

    let (_, story) = send(
        &app,
        Method::GET,
        "/api/releases/spring-launch-1/teams/payments-2/user-stories/US-pay-by-card-4",
        None,
    )
    .await;
    assert_eq!(story["componentIds"], json!([]));
}

#[tokio::test]
async fn test_delete_child_through_wrong_team_is_404() {
    let app = test_app();
    seed(&app).await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/releases/spring-launch-1/teams",
        Some(json!({"name": "Search"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        Method::DELETE,
        "/api/releases/spring-launch-1/teams/search-5/user-stories/US-pay-by-card-4",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/releases/spring-launch-1/teams/payments-2/user-stories/US-pay-by-card-4",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_release_cascades() {
    let app = test_app();
    seed(&app).await;

    let (status, body) = send(&app, Method::DELETE, "/api/releases/spring-launch-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["teams"], json!(["payments-2"]));
    assert_eq!(body["userStories"], json!(["US-pay-by-card-4"]));

    let (_, teams) = send(&app, Method::GET, "/api/teams", None).await;
    assert_eq!(teams, json!([]));
}

#[tokio::test]
async fn test_report_csv_download() {
    let app = test_app();
    seed(&app).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/releases/spring-launch-1/report.csv")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"release-status-spring-launch.csv\""
    );

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.starts_with("Category,Team,Item,Version/ID,Detail,Status\n"));
    assert!(text.contains(
        "User Story,Payments,Pay by card,US-pay-by-card-4,Components,Billing API"
    ));
}
