//! Housing Price API Server
//!
//! REST endpoint serving predictions from the persisted regression tree.

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use regression_tree::RegressionTree;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod routes;
mod settings;

pub use settings::Settings;

/// Application state shared across handlers
pub struct AppState {
    /// The loaded price model
    pub model: RegressionTree,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create application state around a loaded model.
    pub fn new(model: RegressionTree) -> Self {
        Self {
            model,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub model_features: usize,
}

/// Welcome response for the root route
#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: String,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/predict", post(routes::predict::predict))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Welcome handler
async fn home_handler() -> impl IntoResponse {
    Json(WelcomeResponse {
        message: "Housing price regression API is up".to_string(),
    })
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model_features: state.model.feature_names.len(),
    })
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Load the model and run the server until shutdown.
pub async fn run_server(settings: &Settings) -> anyhow::Result<()> {
    let model = RegressionTree::load(&settings.model_path)?;
    info!(
        model = %settings.model_path.display(),
        features = model.feature_names.len(),
        "model loaded"
    );

    let state = Arc::new(AppState::new(model));
    let app = create_router(state);

    info!("Starting API server on {}", settings.bind_addr);
    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
