mod api;
mod db;
mod models;
mod schema;
mod session;
mod telemetry;
mod users;

use axum::extract::MatchedPath;
use axum::http::Request;
use axum::Router;
use nutrifit_core::{GenerationError, RecipePipeline};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::db::StorageError;
use crate::session::{SessionStore, DEFAULT_SESSION_IDLE_TTL};
use crate::users::UserRegistry;

const DEFAULT_DATABASE_URL: &str = "user_data.db";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Everything the handlers share.
pub struct AppContext {
    pub registry: UserRegistry,
    pub pipeline: RecipePipeline,
    pub sessions: SessionStore,
}

/// Application state shared across all handlers
pub type AppState = Arc<AppContext>;

#[derive(Error, Debug)]
enum StartupError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),

    #[error("Failed to render OpenAPI document: {0}")]
    OpenApi(#[from] serde_json::Error),
}

fn with_tracing(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|request: &Request<_>| {
                let matched_path = request
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str)
                    .unwrap_or(request.uri().path());

                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %matched_path,
                )
            })
            .on_request(|_request: &Request<_>, _span: &Span| {})
            .on_response(
                |response: &axum::http::Response<_>, latency: std::time::Duration, _span: &Span| {
                    let status = response.status().as_u16();
                    if status >= 500 {
                        tracing::error!(
                            status = %status,
                            latency_ms = %latency.as_millis(),
                            "request failed with server error"
                        );
                    } else {
                        tracing::info!(
                            status = %status,
                            latency_ms = %latency.as_millis(),
                            "request completed"
                        );
                    }
                },
            )
            .on_failure(
                |error: tower_http::classify::ServerErrorsFailureClass,
                 latency: std::time::Duration,
                 _span: &Span| {
                    tracing::error!(
                        error = %error,
                        latency_ms = %latency.as_millis(),
                        "request failed"
                    );
                },
            ),
    )
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

async fn run() -> Result<(), StartupError> {
    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    let bind_addr =
        env::var("NUTRIFIT_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let registry = UserRegistry::new(db::create_pool(&database_url)?);
    let total_users = registry.count()?;
    tracing::info!(database = %database_url, total_users, "User registry ready");

    let pipeline = RecipePipeline::from_env()?;

    let session_idle_ttl = env::var("NUTRIFIT_SESSION_IDLE_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_SESSION_IDLE_TTL);

    let state: AppState = Arc::new(AppContext {
        registry,
        pipeline,
        sessions: SessionStore::with_idle_ttl(session_idle_ttl),
    });

    let app = with_tracing(api::router().with_state(state));

    let listener = tokio::net::TcpListener::bind(bind_addr.as_str())
        .await
        .map_err(|source| StartupError::Bind {
            addr: bind_addr.clone(),
            source,
        })?;

    tracing::info!("Server listening on {}", bind_addr);
    tracing::info!("OpenAPI spec available at /api-docs/openapi.json");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        return match serde_json::to_string_pretty(&api::openapi()) {
            Ok(spec) => {
                println!("{}", spec);
                std::process::ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", StartupError::from(e));
                std::process::ExitCode::FAILURE
            }
        };
    }

    let _telemetry = telemetry::init_telemetry();

    match run().await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::ExitCode::FAILURE
        }
    }
}
