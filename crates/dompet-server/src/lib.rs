//! Dompet Web Server
//!
//! Axum-based JSON API over the Dompet core library:
//! - `POST /classify` - category and type of a transaction description
//! - `POST /predict` - 30-day daily spending forecast
//! - `POST /recommend` - anomaly, budget and habit insights
//!
//! Both classifiers are loaded before the server starts and shared
//! read-only through [`AppState`]. Every request is independent.

use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{debug, error, info};

use dompet_core::{Config, InsightEngine, ModelStore, ServerSettings, SpendingForecaster};

mod handlers;

/// Shared application state
pub struct AppState {
    pub models: ModelStore,
    pub insights: InsightEngine,
    pub forecaster: SpendingForecaster,
}

impl AppState {
    pub fn new(models: ModelStore, config: &Config) -> Self {
        let insights = InsightEngine::new(config.insights.clone());
        debug!(
            analyzers = ?insights.analyzer_names(),
            horizon_days = config.forecast.horizon_days,
            "Application state ready"
        );
        Self {
            models,
            insights,
            forecaster: SpendingForecaster::new(config.forecast.horizon_days),
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState, settings: &ServerSettings) -> Router {
    let state = Arc::new(state);

    let cors = if settings.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = settings
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/classify", post(handlers::classify))
        .route("/predict", post(handlers::predict))
        .route("/recommend", post(handlers::recommend))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
}

/// Start the server
pub async fn serve(state: AppState, settings: &ServerSettings) -> anyhow::Result<()> {
    let app = create_router(state, settings);
    let addr = format!("{}:{}", settings.host, settings.port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
///
/// Client errors carry only a message. Server errors also carry the kind of
/// failure and echo the underlying message unchanged.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    kind: Option<&'static str>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            kind: None,
        }
    }

    pub fn internal(msg: impl Into<String>, kind: &'static str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
            kind: Some(kind),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match self.kind {
            Some(kind) => {
                error!(kind, error = %self.message, "Request failed");
                serde_json::json!({ "error": self.message, "type": kind })
            }
            None => serde_json::json!({ "error": self.message }),
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<dompet_core::Error> for AppError {
    fn from(err: dompet_core::Error) -> Self {
        Self::internal(err.to_string(), err.kind())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::internal(rejection.body_text(), "InvalidBody")
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::internal(err.to_string(), "TaskFailed")
    }
}
