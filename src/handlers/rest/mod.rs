//! REST API for the questionnaire dashboard.
//!
//! Endpoints:
//! - `GET /health`: liveness check
//! - `GET /api/v1/esg/metadata`: field catalog (public)
//! - `GET|POST /api/v1/esg/responses`: list or save the caller's responses
//! - `GET|DELETE /api/v1/esg/responses/{year}`: one financial year
//! - `GET /api/v1/esg/years`: years with a response
//! - `GET /api/v1/esg/summary`: dashboard summary
//!
//! Successful calls answer `{"message": ..., "data": ...}`; failures answer
//! `{"status": "error", "message": ...}`. Unknown paths and unsupported
//! methods both answer 404. Every response carries hardening headers, and
//! clients are rate limited per IP (429 when over the limit).

pub mod auth;
pub mod error;
pub mod rate_limit;


use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::header::{
    AUTHORIZATION, CONTENT_TYPE, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS, X_DNS_PREFETCH_CONTROL,
    X_FRAME_OPTIONS,
};
use axum::http::{HeaderName, HeaderValue, Method};
use axum::middleware;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::metrics::metadata::{catalog, MetricsMetadata};
use crate::model::EsgResponse;
use crate::services::{ResponseService, Summary};
use crate::validation::parse_year_param;

pub use auth::{AuthenticatedUser, IdentityResolver, StaticTokenResolver};
pub use error::ApiError;
pub use rate_limit::RateLimiter;

/// Shared state for axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: ResponseService,
    pub resolver: Arc<dyn IdentityResolver>,
}

impl AppState {
    pub fn new(service: ResponseService, resolver: Arc<dyn IdentityResolver>) -> Self {
        Self { service, resolver }
    }
}

/// Router construction failures.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("invalid CORS origin '{0}'")]
    InvalidCorsOrigin(String),
}

/// Start the REST server and run until `shutdown` resolves.
pub async fn serve<F>(
    state: AppState,
    config: &ServerConfig,
    shutdown: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(state, config)?;
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    let addr = listener.local_addr()?;
    info!(address = %addr, "ESG REST API listening");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await?;
    Ok(())
}

/// Build the axum router (separated for testing).
pub fn router(state: AppState, config: &ServerConfig) -> Result<Router, RouterError> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .map_err(|_| RouterError::InvalidCorsOrigin(config.cors_origin.clone()))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    let api: Router<AppState> = Router::new()
        .route("/metadata", get(metadata).fallback(not_found))
        .route(
            "/responses",
            get(list_responses).post(save_response).fallback(not_found),
        )
        .route(
            "/responses/{year}",
            get(get_response).delete(delete_response).fallback(not_found),
        )
        .route("/years", get(financial_years).fallback(not_found))
        .route("/summary", get(summary).fallback(not_found));

    let app: Router<AppState> = Router::new()
        .route("/health", get(health).fallback(not_found))
        .nest("/api/v1/esg", api)
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(cors);

    let app = match RateLimiter::from_config(&config.rate_limit) {
        Some(limiter) => app.layer(middleware::from_fn_with_state(
            Arc::new(limiter),
            rate_limit::enforce,
        )),
        None => app,
    };

    let app = security_headers()
        .into_iter()
        .fold(app, |app, (name, value)| {
            app.layer(SetResponseHeaderLayer::if_not_present(name, value))
        });

    Ok(app.layer(TraceLayer::new_for_http()).with_state(state))
}

/// Hardening headers added to every response.
fn security_headers() -> [(HeaderName, HeaderValue); 6] {
    [
        (X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
        (X_FRAME_OPTIONS, HeaderValue::from_static("SAMEORIGIN")),
        (REFERRER_POLICY, HeaderValue::from_static("no-referrer")),
        (X_DNS_PREFETCH_CONTROL, HeaderValue::from_static("off")),
        (
            HeaderName::from_static("cross-origin-opener-policy"),
            HeaderValue::from_static("same-origin"),
        ),
        (
            HeaderName::from_static("x-permitted-cross-domain-policies"),
            HeaderValue::from_static("none"),
        ),
    ]
}

// ============================================================================
// Envelope
// ============================================================================

#[derive(Debug, Serialize)]
struct Envelope<T> {
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

fn ok<T: Serialize>(message: &'static str, data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        message,
        data: Some(data),
    })
}

type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

// ============================================================================
// Handlers
// ============================================================================

async fn health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "ESG Questionnaire API is running",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}

async fn metadata() -> ApiResult<MetricsMetadata> {
    Ok(ok("ESG metrics metadata retrieved successfully", catalog()))
}

async fn save_response(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<EsgResponse> {
    let Json(body) = body.map_err(|rejection| ApiError::BadBody {
        status: rejection.status(),
        message: rejection.body_text(),
    })?;

    let saved = state
        .service
        .save(&user_id, &body)
        .await
        .map_err(|e| ApiError::from_service(e, "save ESG response"))?;

    Ok(ok("ESG response saved successfully", saved))
}

async fn list_responses(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> ApiResult<Vec<EsgResponse>> {
    let responses = state
        .service
        .list(&user_id)
        .await
        .map_err(|e| ApiError::from_service(e, "retrieve ESG responses"))?;

    Ok(ok("ESG responses retrieved successfully", responses))
}

async fn get_response(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(year): Path<String>,
) -> ApiResult<EsgResponse> {
    let year = parse_year_param(&year)?;

    let response = state
        .service
        .get(&user_id, year)
        .await
        .map_err(|e| ApiError::from_service(e, "retrieve ESG response"))?;

    Ok(ok("ESG response retrieved successfully", response))
}

async fn delete_response(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(year): Path<String>,
) -> ApiResult<()> {
    let year = parse_year_param(&year)?;

    state
        .service
        .delete(&user_id, year)
        .await
        .map_err(|e| ApiError::from_service(e, "delete ESG response"))?;

    Ok(Json(Envelope {
        message: "ESG response deleted successfully",
        data: None,
    }))
}

async fn financial_years(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> ApiResult<Vec<i32>> {
    let years = state
        .service
        .financial_years(&user_id)
        .await
        .map_err(|e| ApiError::from_service(e, "retrieve financial years"))?;

    Ok(ok("Financial years retrieved successfully", years))
}

async fn summary(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> ApiResult<Summary> {
    let summary = state
        .service
        .summary(&user_id)
        .await
        .map_err(|e| ApiError::from_service(e, "retrieve ESG summary"))?;

    Ok(ok("ESG summary retrieved successfully", summary))
}
