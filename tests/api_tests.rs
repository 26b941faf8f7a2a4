use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use betpool::api::AppState;
use betpool::config::Config;
use betpool::db::NewMatch;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

async fn spawn_app() -> (Arc<AppState>, Router) {
    let db_path =
        std::env::temp_dir().join(format!("betpool-api-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.server.static_path = String::new();
    config.server.secure_cookies = false;
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;

    let state = betpool::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    let router = betpool::api::router(state.clone())
        .await
        .expect("Failed to build router");
    (state, router)
}

/// Creates two teams, a match type and one match kicking off at `kickoff`.
async fn seed_match(state: &AppState, kickoff: chrono::DateTime<Utc>) -> i32 {
    let fixtures = &state.shared.fixture_service;
    let home = fixtures.create_team("Germany", "ger").await.unwrap();
    let away = fixtures.create_team("Scotland", "SCO").await.unwrap();
    let stage = fixtures.create_match_type("GS", "Group stage").await.unwrap();

    fixtures
        .create_match(NewMatch {
            kickoff,
            home_team_id: home.id,
            away_team_id: away.id,
            match_type_id: stage.id,
        })
        .await
        .unwrap()
        .id
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Option<String>, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, set_cookie, json)
}

async fn register(app: &Router, name: &str, email: &str) -> String {
    let (status, cookie, body) = send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "name": name, "email": email, "password": "correct horse" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    cookie.expect("register should start a session")
}

#[tokio::test]
async fn test_health_is_public() {
    let (_state, app) = spawn_app().await;

    let (status, _, body) = send(&app, "GET", "/api/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["database"], true);
}

#[tokio::test]
async fn test_protected_routes_require_session() {
    let (_state, app) = spawn_app().await;

    for uri in ["/api/matches", "/api/bets", "/api/leaderboard", "/api/auth/me"] {
        let (status, _, body) = send(&app, "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["success"], false);
    }
}

#[tokio::test]
async fn test_register_login_logout() {
    let (_state, app) = spawn_app().await;

    let cookie = register(&app, "Alice", "Alice@Example.com").await;

    let (status, _, body) = send(&app, "GET", "/api/auth/me", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Alice");
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert_eq!(body["data"]["email_confirmed"], false);

    let (status, _, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "alice@example.com", "password": "wrong password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, login_cookie, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "alice@example.com", "password": "correct horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let login_cookie = login_cookie.expect("login should set a cookie");

    let (status, _, _) = send(&app, "POST", "/api/auth/logout", Some(&login_cookie), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = send(&app, "GET", "/api/auth/me", Some(&login_cookie), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_rejects_duplicates_and_bad_input() {
    let (_state, app) = spawn_app().await;

    register(&app, "Alice", "alice@example.com").await;

    let (status, _, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "name": "Other Alice", "email": "ALICE@example.com", "password": "long enough" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "name": "Bo", "email": "bo@example.com", "password": "long enough" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "name": "Carl", "email": "not-an-email", "password": "long enough" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "name": "Dora", "email": "dora@example.com", "password": "short" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_confirm_email_token_is_single_use() {
    let (state, app) = spawn_app().await;

    register(&app, "Alice", "alice@example.com").await;
    let user = state
        .store()
        .get_user_by_email("alice@example.com")
        .await
        .unwrap()
        .unwrap();
    let token = state
        .store()
        .get_confirm_token(user.id)
        .await
        .unwrap()
        .expect("token issued at registration");

    let uri = format!("/api/auth/confirm/{token}");
    let (status, _, body) = send(&app, "POST", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email_confirmed"], true);

    let (status, _, _) = send(&app, "POST", &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_profile_name() {
    let (_state, app) = spawn_app().await;
    let cookie = register(&app, "Alice", "alice@example.com").await;

    let (status, _, body) = send(
        &app,
        "PUT",
        "/api/auth/me",
        Some(&cookie),
        Some(json!({ "name": "Alice Cooper" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Alice Cooper");

    let (status, _, _) = send(
        &app,
        "PUT",
        "/api/auth/me",
        Some(&cookie),
        Some(json!({ "name": "Al" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_place_bet_then_update() {
    let (state, app) = spawn_app().await;
    let match_id = seed_match(&state, Utc::now() + Duration::days(2)).await;
    let cookie = register(&app, "Alice", "alice@example.com").await;
    let uri = format!("/api/matches/{match_id}/bet");

    let (status, _, body) = send(
        &app,
        "PUT",
        &uri,
        Some(&cookie),
        Some(json!({ "goals_home": 2, "goals_away": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let bet_id = body["data"]["id"].clone();

    let (status, _, body) = send(
        &app,
        "PUT",
        &uri,
        Some(&cookie),
        Some(json!({ "goals_home": 0, "goals_away": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], bet_id);
    assert_eq!(body["data"]["goals_home"], 0);

    let (status, _, body) = send(&app, "GET", "/api/bets", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _, body) = send(&app, "GET", "/api/matches", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    let card = &body["data"][0];
    assert_eq!(card["bet"]["goals_home"], 0);
    assert_eq!(card["home_team"]["code"], "GER");
    assert_eq!(card["expired"], false);
    assert_eq!(card["result"], Value::Null);
    assert_eq!(card["tier"], "miss");
    assert_eq!(card["score_class"], "score-0");
}

#[tokio::test]
async fn test_bet_validation_and_unknown_match() {
    let (state, app) = spawn_app().await;
    let match_id = seed_match(&state, Utc::now() + Duration::days(2)).await;
    let cookie = register(&app, "Alice", "alice@example.com").await;

    let (status, _, _) = send(
        &app,
        "PUT",
        &format!("/api/matches/{match_id}/bet"),
        Some(&cookie),
        Some(json!({ "goals_home": 21, "goals_away": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = send(
        &app,
        "PUT",
        &format!("/api/matches/{match_id}/bet"),
        Some(&cookie),
        Some(json!({ "goals_home": -1, "goals_away": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = send(
        &app,
        "PUT",
        &format!("/api/matches/{match_id}/bet"),
        Some(&cookie),
        Some(json!({ "goals_home": 1.5, "goals_away": 0 })),
    )
    .await;
    assert!(status.is_client_error());

    let (status, _, _) = send(
        &app,
        "PUT",
        "/api/matches/9999/bet",
        Some(&cookie),
        Some(json!({ "goals_home": 1, "goals_away": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bet_rejected_after_kickoff() {
    let (state, app) = spawn_app().await;
    let match_id = seed_match(&state, Utc::now() - Duration::minutes(5)).await;
    let cookie = register(&app, "Alice", "alice@example.com").await;

    let (status, _, _) = send(
        &app,
        "PUT",
        &format!("/api/matches/{match_id}/bet"),
        Some(&cookie),
        Some(json!({ "goals_home": 1, "goals_away": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _, body) = send(
        &app,
        "GET",
        &format!("/api/matches/{match_id}"),
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["expired"], true);
    assert_eq!(body["data"]["bet"], Value::Null);
}

#[tokio::test]
async fn test_leaderboard_after_result() {
    let (state, app) = spawn_app().await;
    let match_id = seed_match(&state, Utc::now() + Duration::hours(1)).await;

    let alice = register(&app, "Alice", "alice@example.com").await;
    let bob = register(&app, "Bob", "bob@example.com").await;

    for (cookie, home, away) in [(&alice, 2, 1), (&bob, 3, 1)] {
        let (status, _, _) = send(
            &app,
            "PUT",
            &format!("/api/matches/{match_id}/bet"),
            Some(cookie),
            Some(json!({ "goals_home": home, "goals_away": away })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    state
        .shared
        .fixture_service
        .record_result(match_id, 2, 1)
        .await
        .unwrap();

    let (status, _, body) = send(&app, "GET", "/api/leaderboard", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);

    let standings = body["data"].as_array().unwrap();
    assert_eq!(standings.len(), 2);
    assert_eq!(standings[0]["name"], "Alice");
    assert_eq!(standings[0]["points"], 3);
    assert_eq!(standings[0]["exact"], 1);
    assert_eq!(standings[1]["name"], "Bob");
    assert_eq!(standings[1]["points"], 1);
    assert_eq!(standings[1]["rank"], 2);

    let (_, _, body) = send(&app, "GET", "/api/matches?filter=played", Some(&bob), None).await;
    let card = &body["data"][0];
    assert_eq!(card["tier"], "correct_outcome");
    assert_eq!(card["score_class"], "score-1");
    assert_eq!(card["points"], 1);
    assert_eq!(card["result"]["goals_home"], 2);

    let (status, _, _) = send(&app, "GET", "/api/matches?filter=soon", Some(&bob), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reference_data_listing() {
    let (state, app) = spawn_app().await;
    seed_match(&state, Utc::now() + Duration::days(1)).await;
    let cookie = register(&app, "Alice", "alice@example.com").await;

    let (status, _, body) = send(&app, "GET", "/api/teams", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|t| t["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Germany", "Scotland"]);

    let (status, _, body) = send(&app, "GET", "/api/match-types", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["code"], "GS");
}

#[tokio::test]
async fn test_security_headers_present() {
    let (_state, app) = spawn_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers["x-frame-options"], "DENY");
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert!(
        headers["content-security-policy"]
            .to_str()
            .unwrap()
            .contains("frame-ancestors 'none'")
    );
}
