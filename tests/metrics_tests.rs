//! Prometheus exposition through `/api/metrics`. Kept in its own test binary
//! because it installs the process-wide recorder.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use betpool::config::Config;
use betpool::db::NewMatch;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::json;
use tower::ServiceExt;

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Option<String>, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, cookie, String::from_utf8_lossy(&bytes).into_owned())
}

fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: &serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn test_metrics_endpoint_exposes_request_and_bet_counters() {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install recorder");

    let db_path =
        std::env::temp_dir().join(format!("betpool-metrics-test-{}.db", uuid::Uuid::new_v4()));
    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.server.static_path = String::new();
    config.server.secure_cookies = false;
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;

    let state = betpool::api::create_app_state_from_config(config, Some(handle))
        .await
        .expect("Failed to create app state");
    let app = betpool::api::router(state.clone())
        .await
        .expect("Failed to build router");

    let fixtures = &state.shared.fixture_service;
    let home = fixtures.create_team("Portugal", "POR").await.unwrap();
    let away = fixtures.create_team("Ghana", "GHA").await.unwrap();
    let stage = fixtures.create_match_type("GS", "Group stage").await.unwrap();
    let match_id = fixtures
        .create_match(NewMatch {
            kickoff: Utc::now() + Duration::days(1),
            home_team_id: home.id,
            away_team_id: away.id,
            match_type_id: stage.id,
        })
        .await
        .unwrap()
        .id;

    let (status, cookie, _) = call(
        &app,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            &json!({ "name": "Alice", "email": "alice@example.com", "password": "correct horse" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let cookie = cookie.expect("register should start a session");

    let (status, _, body) = call(
        &app,
        Request::builder()
            .uri("/api/metrics")
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("bets_placed_total"), "{body}");

    let (status, _, _) = call(
        &app,
        json_request(
            "PUT",
            &format!("/api/matches/{match_id}/bet"),
            Some(&cookie),
            &json!({ "goals_home": 3, "goals_away": 0 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _, body) = call(
        &app,
        Request::builder()
            .uri("/api/metrics")
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("bets_placed_total 1"), "{body}");
    assert!(body.contains("http_requests_total"), "{body}");
    assert!(body.contains("path=\"/api/auth/register\""), "{body}");
}
