//! REST client for integration testing.
//!
//! Drives the real axum router in-process via `tower::ServiceExt::oneshot`
//! - no sockets, no HTTP overhead, but the full middleware stack runs.

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use server_core::domains::auth::JwtService;
use server_core::server::build_app;

pub const TEST_JWT_SECRET: &str = "test_secret_key";
pub const TEST_JWT_ISSUER: &str = "test_issuer";

/// REST client for executing requests against the app router in tests.
pub struct RestClient {
    app: Router,
    jwt: JwtService,
}

/// Result of a request: status, headers, and the parsed JSON body
/// (`Value::Null` when the body is empty or not JSON).
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
    pub raw: Vec<u8>,
}

impl ApiResponse {
    /// Gets a value at the given JSON path.
    ///
    /// # Example
    /// ```ignore
    /// let title = response.get("post.title");
    /// ```
    pub fn get(&self, path: &str) -> Value {
        let mut current = &self.body;
        for key in path.split('.') {
            current = &current[key];
        }
        current.clone()
    }

    /// The error message, for responses produced by the error taxonomy.
    pub fn error(&self) -> String {
        self.body["error"].as_str().unwrap_or_default().to_string()
    }

    /// The raw body as UTF-8 text (CSV export responses).
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.raw).to_string()
    }
}

impl RestClient {
    /// Creates a client backed by a freshly built router.
    pub fn new(pool: PgPool) -> Self {
        let app = build_app(
            pool,
            TEST_JWT_SECRET,
            TEST_JWT_ISSUER.to_string(),
            Vec::new(),
            None, // no media purge endpoint in tests
        );
        let jwt = JwtService::new(TEST_JWT_SECRET, TEST_JWT_ISSUER.to_string());
        Self { app, jwt }
    }

    /// Mint a bearer token the router will accept.
    pub fn token_for(&self, member_id: Uuid, is_admin: bool) -> String {
        self.jwt
            .create_token(member_id, is_admin)
            .expect("Failed to create test token")
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> ApiResponse {
        self.request(Method::GET, path, token, None).await
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: Value) -> ApiResponse {
        self.request(Method::POST, path, token, Some(body)).await
    }

    pub async fn put(&self, path: &str, token: Option<&str>, body: Option<Value>) -> ApiResponse {
        self.request(Method::PUT, path, token, body).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> ApiResponse {
        self.request(Method::DELETE, path, token, None).await
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> ApiResponse {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("Failed to build request"),
            None => builder
                .body(Body::empty())
                .expect("Failed to build request"),
        };

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let raw = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body")
            .to_vec();
        let body = serde_json::from_slice(&raw).unwrap_or(Value::Null);

        ApiResponse {
            status,
            headers,
            body,
            raw,
        }
    }
}
