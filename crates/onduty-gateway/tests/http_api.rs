#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use onduty_gateway::app_state::AppState;
use onduty_gateway::{config, router};

const WITH_TOKEN: &str = r#"
version: 1
admin:
  ids: ["100"]
  token: "s3cret"
"#;

fn app(yaml: &str) -> (AppState, Router) {
    let state = AppState::new(config::load_from_str(yaml).unwrap()).unwrap();
    let app = router::build_router(state.clone());
    (state, app)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn send_json(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, req).await;
    (status, serde_json::from_slice(&body).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn reset(token: Option<&str>) -> Request<Body> {
    let mut req = Request::post("/reset");
    if let Some(t) = token {
        req = req.header("X-Admin-Token", t);
    }
    req.body(Body::empty()).unwrap()
}

fn command(body: Value) -> Request<Body> {
    Request::post("/v1/commands")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn status_starts_at_zero() {
    let (_, app) = app(WITH_TOKEN);
    let (status, body) = send_json(&app, get("/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "online": 0 }));
}

#[tokio::test]
async fn commands_drive_the_public_count() {
    let (_, app) = app(WITH_TOKEN);

    for id in ["1", "2", "3"] {
        let (status, body) =
            send_json(&app, command(json!({ "user_id": id, "content": "/clockin" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ephemeral"], json!(false));
    }
    let (_, body) = send_json(
        &app,
        command(json!({ "user_id": "2", "display_name": "Bo", "content": "/clockout" })),
    )
    .await;
    assert_eq!(body["reply"], json!("👋 Bo clocked out. 2 drivers online."));

    let (_, body) = send_json(&app, get("/status")).await;
    assert_eq!(body, json!({ "online": 2 }));
}

#[tokio::test]
async fn reset_without_configured_token_is_not_configured() {
    let (state, app) = app("version: 1\n");
    state.registry().mark_active("1".into(), onduty_gateway::clock::now());

    for token in [None, Some("anything")] {
        let (status, body) = send_json(&app, reset(token)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], json!("NOT_CONFIGURED"));
    }
    assert_eq!(state.registry().count(), 1);
}

#[tokio::test]
async fn reset_with_wrong_or_missing_token_is_unauthorized() {
    let (state, app) = app(WITH_TOKEN);
    state.registry().mark_active("1".into(), onduty_gateway::clock::now());

    for token in [None, Some("wrong"), Some("S3CRET")] {
        let (status, body) = send_json(&app, reset(token)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], json!("UNAUTHORIZED"));
    }
    assert_eq!(state.registry().count(), 1);
    assert_eq!(
        state
            .metrics()
            .admin_rejections
            .get(&[("via", "http"), ("reason", "bad_token")]),
        3
    );
}

#[tokio::test]
async fn reset_with_exact_token_clears() {
    let (state, app) = app(WITH_TOKEN);
    for id in 0..5u64 {
        state.registry().mark_active(id.into(), onduty_gateway::clock::now());
    }

    let (status, body) = send_json(&app, reset(Some("s3cret"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true, "online": 0 }));

    let (_, body) = send_json(&app, get("/status")).await;
    assert_eq!(body, json!({ "online": 0 }));
}

#[tokio::test]
async fn bot_and_chatter_messages_get_no_reply() {
    let (state, app) = app(WITH_TOKEN);

    let (status, body) = send(
        &app,
        command(json!({ "user_id": "1", "content": "/clockin", "bot": true })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, _) = send(&app, command(json!({ "user_id": "1", "content": "good morning" }))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(state.registry().count(), 0);
}

#[tokio::test]
async fn guild_admin_flag_authorizes_chat_reset() {
    let (state, app) = app(WITH_TOKEN);
    state.registry().mark_active("1".into(), onduty_gateway::clock::now());

    let (_, body) = send_json(
        &app,
        command(json!({ "user_id": "7", "content": "/reset", "guild_admin": false })),
    )
    .await;
    assert_eq!(body["ephemeral"], json!(true));
    assert_eq!(state.registry().count(), 1);

    let (_, body) = send_json(
        &app,
        command(json!({ "user_id": "7", "content": "/reset", "guild_admin": true })),
    )
    .await;
    assert_eq!(body["reply"], json!("✅ Reset complete. 0 drivers online."));
    assert_eq!(state.registry().count(), 0);
}

#[tokio::test]
async fn malformed_command_body_is_bad_request() {
    let (_, app) = app(WITH_TOKEN);
    let req = Request::post("/v1/commands")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"user_id\": "))
        .unwrap();
    let (status, body) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("BAD_REQUEST"));

    let (status, _) = send_json(&app, command(json!({ "content": "/clockin" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn command_catalogue_is_listed() {
    let (_, app) = app(WITH_TOKEN);
    let (status, body) = send_json(&app, get("/v1/commands")).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["clockin", "clockout", "drivers", "ping", "reset"]);
    assert_eq!(body[4]["description"], json!("(Admin) Reset all counts"));
}

#[tokio::test]
async fn ops_endpoints_report_health_and_metrics() {
    let (state, app) = app(WITH_TOKEN);
    send(&app, command(json!({ "user_id": "1", "content": "/clockin" }))).await;

    let (status, body) = send(&app, get("/healthz")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");

    let (status, _) = send(&app, get("/readyz")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, get("/metrics")).await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("onduty_online 1"));
    assert!(text.contains("onduty_clock_ins_total{via=\"command\"} 1"));
    assert!(text.contains("onduty_commands_total{command=\"clockin\"} 1"));
    assert!(text.contains("onduty_draining 0"));

    state.set_draining();
    let (status, body) = send(&app, get("/readyz")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, b"draining");
}

#[tokio::test]
async fn status_is_pollable_cross_origin() {
    let (_, open) = app(WITH_TOKEN);
    let req = Request::get("/status")
        .header(header::ORIGIN, "https://example.org")
        .body(Body::empty())
        .unwrap();
    let resp = open.oneshot(req).await.unwrap();
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );

    let (_, locked) = app("version: 1\ngateway: { cors_allow_any: false }\n");
    let req = Request::get("/status")
        .header(header::ORIGIN, "https://example.org")
        .body(Body::empty())
        .unwrap();
    let resp = locked.oneshot(req).await.unwrap();
    assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
