pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod rest;

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::{GoTrueVerifier, TokenVerifier};
use crate::config::AppConfig;
use crate::rest::RestClient;

/// Shared per-process state: the data-API client and the token verifier.
/// Both are cheap to clone; no mutable state lives here.
#[derive(Clone)]
pub struct AppState {
    pub rest: RestClient,
    pub verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        // One shared HTTP client with a bounded per-request timeout; an
        // upstream that never answers must not hold requests open forever.
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()?;

        Ok(Self {
            rest: RestClient::new(config, http.clone()),
            verifier: Arc::new(GoTrueVerifier::new(config, http)),
        })
    }

    pub fn with_verifier(mut self, verifier: Arc<dyn TokenVerifier>) -> Self {
        self.verifier = verifier;
        self
    }
}

pub fn app(state: AppState) -> Router {
    use axum::routing::{post, put};
    use handlers::{habits, profiles};

    // Protected routes: bearer auth happens before any handler runs
    let protected = Router::new()
        .route("/habits", post(habits::create).get(habits::list_mine))
        .route("/habits/:id", put(habits::update).delete(habits::delete))
        .route(
            "/profiles/me",
            get(profiles::get_mine).put(profiles::upsert_mine),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .route("/habits/public", get(habits::list_public))
        .merge(protected)
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "ok": true,
        "data": {
            "name": "Habit API (Rust)",
            "version": version,
            "description": "Thin REST proxy over a Supabase-style data API",
            "endpoints": {
                "habits": "/habits (protected - POST, GET), /habits/:id (protected - PUT, DELETE)",
                "public_habits": "/habits/public (public - GET)",
                "profiles": "/profiles/me (protected - GET, PUT)",
                "health": "/health (public)",
            }
        }
    }))
}

async fn health() -> axum::response::Json<Value> {
    axum::response::Json(json!({
        "ok": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now()
        }
    }))
}
