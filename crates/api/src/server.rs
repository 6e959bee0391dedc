//! Router assembly and server lifecycle.

use std::future::Future;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::Json;
use axum::routing::{delete, get, post};
use axum::Router;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers::{comments, snippets, users};
use crate::state::AppState;

/// Server settings resolved at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Origin allowed to send credentialed cross-site requests.
    pub frontend_origin: String,
}

/// Build the application router.
///
/// Static snippet routes are registered before the parameterized
/// `/{id}` routes so `/random` never matches as an id.
pub fn router(state: AppState, frontend_origin: &str) -> anyhow::Result<Router> {
    let origin: HeaderValue = frontend_origin
        .parse()
        .with_context(|| format!("invalid frontend origin '{frontend_origin}'"))?;

    // Cookies require allow_credentials, which forbids wildcard origins.
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    let user_routes = Router::new()
        .route("/signup", post(users::signup))
        .route("/signin", post(users::signin))
        .route("/signout", post(users::signout))
        .route("/delete", delete(users::delete_account))
        .route("/check-session", get(users::check_session))
        .route("/refresh", post(users::refresh));

    let snippet_routes = Router::new()
        .route("/", post(snippets::create))
        .route("/random", get(snippets::random_feed))
        .route("/me", get(snippets::my_snippets))
        .route("/tags", get(snippets::tag_feed))
        .route("/search", get(snippets::search))
        .route("/user/{userId}", get(snippets::user_snippets))
        .route(
            "/{id}",
            get(snippets::get_by_id)
                .put(snippets::update)
                .delete(snippets::remove),
        );

    let comment_routes = Router::new().route(
        "/{snippetId}",
        post(comments::post_comment).get(comments::list),
    );

    Ok(Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api/users", user_routes)
        .nest("/api/snippets", snippet_routes)
        .nest("/api/comment", comment_routes)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state))
}

/// Bind and serve until the shutdown future resolves.
pub async fn serve(
    config: ServerConfig,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let app = router(state, &config.frontend_origin)?;

    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;
    info!(port = config.port, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("server error")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Welcome to QuickSnip" }))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "reason": "NOT_FOUND",
            "message": "Route not found",
        })),
    )
}
