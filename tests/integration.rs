//! Integration tests: health, register, subscribe, publish and CORS, driven through the router.
//!
//! The messaging backend is replaced by an in-memory recording publisher.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokengate::auth::{CredentialStore, TokenIssuer};
use tokengate::error::AppResult;
use tokengate::{create_app, AppError, AppState, AuthService, CorsConfig, Publisher};
use tower::util::ServiceExt;

const SECRET: &str = "test-jwt-secret";
const ORIGIN: &str = "http://localhost:5000";

#[derive(Default)]
struct RecordingPublisher {
    published: Mutex<Vec<(String, Vec<u8>)>>,
    fail_with: Option<String>,
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(&self, channel: &str, payload: &[u8]) -> AppResult<()> {
        if let Some(msg) = &self.fail_with {
            return Err(AppError::Publish(msg.clone()));
        }
        self.published
            .lock()
            .unwrap()
            .push((channel.to_string(), payload.to_vec()));
        Ok(())
    }
}

fn app_with(publisher: Arc<RecordingPublisher>) -> axum::Router {
    let auth = AuthService::new(
        Arc::new(CredentialStore::demo()),
        TokenIssuer::new(SECRET.to_string(), None),
    );
    create_app(
        AppState::new(auth, publisher),
        CorsConfig::new(ORIGIN).unwrap(),
    )
}

fn app() -> axum::Router {
    app_with(Arc::new(RecordingPublisher::default()))
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(res: Response) -> Value {
    let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn claims(token: &str) -> Value {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    validation.validate_exp = false;
    jsonwebtoken::decode::<Value>(token, &DecodingKey::from_secret(SECRET.as_bytes()), &validation)
        .unwrap()
        .claims
}

fn assert_cors(res: &Response) {
    let headers = res.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], ORIGIN);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_METHODS],
        "POST, GET, OPTIONS, PUT, DELETE"
    );
    assert!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
        .to_str()
        .unwrap()
        .contains("X-CSRF-Token"));
}

#[tokio::test]
async fn health_returns_ok() {
    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
    let res = app().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_cors(&res);
    assert_eq!(body_json(res).await, json!({ "ok": true }));
}

#[tokio::test]
async fn register_known_user_gets_their_id() {
    let app = app();
    for (email, id) in [("john.doe@mail.com", "1"), ("alice@mail.com", "2")] {
        let body = json!({ "email": email, "password": "12345678" }).to_string();
        let res = app.clone().oneshot(post_json("/register", &body)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()[header::CONTENT_TYPE], "application/json");
        assert_cors(&res);
        let json = body_json(res).await;
        let token = json["accessToken"].as_str().expect("accessToken");
        assert_eq!(claims(token), json!({ "sub": id }));
    }
}

#[tokio::test]
async fn register_unknown_user_gets_user_zero() {
    let body = json!({ "email": "john.doe@mail.com", "password": "nope" }).to_string();
    let res = app().oneshot(post_json("/register", &body)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    let token = json["accessToken"].as_str().unwrap();
    assert_eq!(claims(token)["sub"], "0");
}

#[tokio::test]
async fn subscribe_returns_one_token_per_channel_in_order() {
    let body = json!({ "client": "c1", "channels": ["a", "b"] }).to_string();
    let res = app().oneshot(post_json("/subscribe", &body)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    let channels = json["channels"].as_array().unwrap();
    assert_eq!(channels.len(), 2);
    for (entry, name) in channels.iter().zip(["a", "b"]) {
        assert_eq!(entry["channel"], name);
        let token = entry["token"].as_str().unwrap();
        assert_eq!(claims(token), json!({ "client": "c1", "channel": name }));
    }
}

#[tokio::test]
async fn subscribe_with_no_channels_returns_empty_list() {
    let body = json!({ "client": "c1", "channels": [] }).to_string();
    let res = app().oneshot(post_json("/subscribe", &body)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await, json!({ "channels": [] }));
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = app();
    for uri in ["/register", "/subscribe", "/publish"] {
        let res = app.clone().oneshot(post_json(uri, "{not json")).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{}", uri);
        assert_cors(&res);
        let json = body_json(res).await;
        assert!(json["error"].as_str().is_some(), "{} error message", uri);
    }
}

#[tokio::test]
async fn missing_fields_are_bad_request() {
    let app = app();
    let cases = [
        ("/register", json!({ "email": "john.doe@mail.com" })),
        ("/subscribe", json!({ "client": "c1" })),
        ("/publish", json!({ "channel": "news" })),
    ];
    for (uri, body) in cases {
        let res = app
            .clone()
            .oneshot(post_json(uri, &body.to_string()))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[tokio::test]
async fn publish_forwards_channel_and_payload() {
    let publisher = Arc::new(RecordingPublisher::default());
    let app = app_with(publisher.clone());
    let body = json!({
        "credential": { "email": "alice@mail.com", "password": "12345678" },
        "channel": "$chat:#1,2",
        "data": "{\"value\":\"hi\",\"isAlice\":true}"
    })
    .to_string();
    let res = app.oneshot(post_json("/publish", &body)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await, json!({ "ok": true }));

    let published = publisher.published.lock().unwrap();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].0, "$chat:#1,2");
    assert_eq!(published[0].1, br#"{"value":"hi","isAlice":true}"#.to_vec());
}

#[tokio::test]
async fn publish_backend_failure_is_bad_request() {
    let publisher = Arc::new(RecordingPublisher {
        fail_with: Some("connection refused".to_string()),
        ..Default::default()
    });
    let body = json!({ "channel": "news", "data": "{}" }).to_string();
    let res = app_with(publisher).oneshot(post_json("/publish", &body)).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json = body_json(res).await;
    assert!(json["error"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn options_returns_cors_headers_and_empty_body() {
    let app = app();
    for uri in ["/register", "/subscribe", "/publish"] {
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri(uri)
            .body(Body::from("{garbage"))
            .unwrap();
        let res = app.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "{}", uri);
        assert_cors(&res);
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }
}
