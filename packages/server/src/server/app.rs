//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domains::auth::JwtService;
use crate::kernel::MediaPurger;
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{admin, cron, health, notifications, posts, users};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: Arc<JwtService>,
    pub media: Arc<MediaPurger>,
}

/// Build the Axum application router
pub fn build_app(
    pool: PgPool,
    jwt_secret: &str,
    jwt_issuer: String,
    allowed_origins: Vec<String>,
    media_purge_endpoint: Option<String>,
) -> Router {
    let jwt_service = Arc::new(JwtService::new(jwt_secret, jwt_issuer));
    let media = Arc::new(MediaPurger::new(media_purge_endpoint));

    let state = AppState {
        db_pool: pool,
        jwt_service: jwt_service.clone(),
        media,
    };

    let cors = cors_layer(&allowed_origins);

    Router::new()
        .route("/health", get(health::health_handler))
        // Posts
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/posts/:id",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/posts/:id/comments", post(posts::add_comment))
        .route("/posts/:id/like", put(posts::like_post))
        .route("/posts/:id/unlike", put(posts::unlike_post))
        .route("/posts/:id/report", post(posts::report_post))
        // Registrations
        .route(
            "/users/register-event/:event_id",
            post(users::register_for_event),
        )
        .route(
            "/users/my-events-registrations",
            get(users::my_events_registrations),
        )
        .route(
            "/users/my-events/registration-counts",
            get(users::registration_counts),
        )
        .route(
            "/users/export-registrations/:event_id",
            get(users::export_registrations),
        )
        // Moderation
        .route("/users/admin/pending-events", get(admin::pending_events))
        .route(
            "/users/admin/approve-event/:id",
            put(admin::approve_event),
        )
        .route(
            "/users/admin/reject-event/:id",
            delete(admin::reject_event),
        )
        // Notifications + maintenance
        .route("/notifications", get(notifications::list_notifications))
        .route("/cron/cleanup", get(cron::cleanup))
        // Auth runs before every handler; unauthenticated requests simply
        // carry no AuthUser extension.
        .layer(middleware::from_fn(move |request, next| {
            jwt_auth_middleware(jwt_service.clone(), request, next)
        }))
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// CORS policy: explicit origins when configured, permissive otherwise
/// (local development).
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];

    if allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(AllowOrigin::any())
            .allow_methods(methods)
            .allow_headers([AUTHORIZATION, CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(methods)
            .allow_headers([AUTHORIZATION, CONTENT_TYPE])
    }
}
