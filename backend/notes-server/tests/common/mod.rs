#![allow(dead_code)]

//! Test infrastructure for notes-server API tests

use notes_config::Config;
use notes_server::{AppState, build_router, build_state};

use std::path::Path;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
};
use chrono::Utc;
use http_body_util::BodyExt;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-bytes";
pub const BASE_PATH: &str = "/api";

pub const ISSUER: &str = "https://tenant.example.com/";
pub const AUDIENCE: &str = "https://notes.example.com";
pub const RSA_A_PEM: &str = include_str!("../fixtures/rsa_a.pem");
pub const KEY_A_N: &str = "0ZB-TNMxbEXWa4WAMjYv_bUIgwHXC8UCATuugjBTXiQt9nkihd5Cx7c4o7zESbKldp4gD9wbOZ1TtRBQFPklBcrrMwIGgLQZRanqD9my_kJveuJ7NGG98itECwMhdphK373V8_aJlfr87ZJE9HRr7y9ZvS1JNwFRNwi0RCrs31X-eO9hdtnOHy6FWmiP4PNImYl9Iu9kG3Je43bVWMQk7wC-ow34IwRoTRPBPilvcKemNPpS-rIfFyWM4X4ECsYlEhOLiYUpxRX_0v_obGJ12DYCQbGPytFslfEXSbrSdIG-mOVZk7Py35Jmne-aV9yaRJUdLiJoNX6cI7uBOpl8GQ";

/// In-memory SQLite pool with migrations applied
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .foreign_keys(true);

    // In-memory needs a single connection
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    notes_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// File-backed pool for tests that need real concurrent connections
pub async fn create_file_pool(dir: &Path) -> SqlitePool {
    let pool = notes_db::connect(&dir.join("notes.db"), 4)
        .await
        .expect("Failed to open file pool");

    notes_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Valid config with cheap password hashing
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.auth.token_secret = Some(TEST_SECRET.to_string());
    config.auth.password_iterations = 1;
    config.auth.password_memory_kib = 8;
    config
}

/// Config trusting `ISSUER`, with keys served by `server`
pub fn federated_config(server: &MockServer) -> Config {
    let mut config = test_config();
    let federated = &mut config.auth.federated;
    federated.enabled = true;
    federated.issuer = Some(ISSUER.to_string());
    federated.audience = Some(AUDIENCE.to_string());
    federated.jwks_uri = Some(format!("{}/.well-known/jwks.json", server.uri()));
    federated.key_fetch_timeout_secs = 2;
    config
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub json: Value,
}

impl TestApp {
    pub fn with_config(config: &Config, pool: SqlitePool) -> Self {
        let state = build_state(config, pool).expect("Failed to build state");
        let router = build_router(state.clone(), BASE_PATH, Duration::from_secs(10));
        Self { router, state }
    }

    /// Local tokens only, in-memory database
    pub async fn local() -> Self {
        Self::with_config(&test_config(), create_test_pool().await)
    }

    /// Dual-mode, in-memory database, key directory served by `server`
    pub async fn federated(server: &MockServer) -> Self {
        Self::with_config(&federated_config(server), create_test_pool().await)
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            json,
        }
    }

    /// Register a local user and return its access token
    pub async fn register(&self, name: &str, email: &str, password: &str) -> String {
        let response = self
            .send(
                Method::POST,
                "/api/users/register",
                None,
                Some(json!({ "name": name, "email": email, "password": password })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.json);

        response.json["user"]["accessToken"]
            .as_str()
            .expect("token in body")
            .to_string()
    }

    pub async fn create_note(&self, token: &str, title: &str, description: &str) -> String {
        let response = self
            .send(
                Method::POST,
                "/api/notes",
                Some(token),
                Some(json!({ "title": title, "description": description })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.json);

        response.json["note"]["_id"].as_str().unwrap().to_string()
    }
}

/// Serve the single fixture key under kid "key-a"
pub async fn serve_signing_keys(server: &MockServer) {
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "keys": [{
                "kty": "RSA",
                "use": "sig",
                "alg": "RS256",
                "kid": "key-a",
                "n": KEY_A_N,
                "e": "AQAB",
            }]
        })))
        .mount(server)
        .await;
}

/// Provider-signed token for `subject` / `email`, valid for an hour
pub fn federated_token(subject: &str, email: &str, name: Option<&str>) -> String {
    let now = Utc::now().timestamp();
    let mut claims = json!({
        "iss": ISSUER,
        "sub": subject,
        "aud": AUDIENCE,
        "email": email,
        "picture": "https://img.example.com/p.png",
        "iat": now,
        "exp": now + 3600,
    });
    if let Some(name) = name {
        claims["name"] = Value::from(name);
    }

    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some("key-a".to_string());

    encode(
        &header,
        &claims,
        &EncodingKey::from_rsa_pem(RSA_A_PEM.as_bytes()).unwrap(),
    )
    .unwrap()
}
