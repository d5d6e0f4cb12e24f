//! HTTP JSON API for sadapurne.
//!
//! Provides one route per verified producer lookup, plus service info and a
//! health check. Every response body is a single JSON object.

use std::net::SocketAddr;

use axum::Router;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use sadapurne_core::control::{
    Lookup,
    LookupError,
    LookupKind,
    LookupService,
    ProducerData,
    ValidationError,
};
use sadapurne_core::store::ProducerSource;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info};

const SERVICE_NAME: &str = "Sadapurne MCP Server API";

/// Configuration for the HTTP API server.
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    pub addr: SocketAddr,
    pub max_body_bytes: usize,
}

impl ApiServerConfig {
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            max_body_bytes: 64 * 1024,
        }
    }

    #[must_use]
    pub const fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self::new(SocketAddr::from(([0, 0, 0, 0], 8000)))
    }
}

/// HTTP API server wrapper.
pub struct ApiServer<S: ProducerSource> {
    config: ApiServerConfig,
    lookup: LookupService<S>,
}

impl<S: ProducerSource> ApiServer<S> {
    #[must_use]
    pub const fn new(lookup: LookupService<S>, config: ApiServerConfig) -> Self {
        Self { config, lookup }
    }

    /// Runs the HTTP server until shutdown.
    ///
    /// # Errors
    /// Returns any listener or server error.
    pub async fn serve(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = self.config.addr;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        let app = router(self.lookup, self.config.max_body_bytes);

        info!("sadapurne api listening on http://{addr}");
        axum::serve(listener, app).await?;
        Ok(())
    }
}

struct AppState<S: ProducerSource> {
    lookup: LookupService<S>,
}

impl<S: ProducerSource> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            lookup: self.lookup.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SuccessResponse {
    status: &'static str,
    data: ProducerData,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum ErrorBody {
    NotFound { message: String },
    Error { message: String },
    InvalidRequest { error: String },
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn invalid_request(err: &ValidationError) -> Self {
        let error = match err {
            ValidationError::Missing { field } => format!("Missing '{field}' in request body"),
            ValidationError::Invalid { field, reason } => {
                format!("Invalid '{field}' in request body: {reason}")
            }
        };
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody::InvalidRequest { error },
        }
    }

    /// Body could not be read, e.g. it exceeds the configured limit.
    fn unreadable_body(rejection: &BytesRejection) -> Self {
        Self {
            status: rejection.status(),
            body: ErrorBody::InvalidRequest {
                error: rejection.body_text(),
            },
        }
    }

    fn not_found(kind: LookupKind) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: ErrorBody::NotFound {
                message: kind.not_found_message().to_string(),
            },
        }
    }

    fn query(err: &LookupError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorBody::Error {
                message: format!("Error: {err}"),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Builds the API router around a lookup service.
pub fn router<S: ProducerSource>(lookup: LookupService<S>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/api/producer/aadhar", post(by_aadhar::<S>))
        .route("/api/producer/name", post(by_name::<S>))
        .route("/api/producers", get(all_producers::<S>))
        .route("/api/producer/fssai", post(by_fssai::<S>))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(AppState { lookup })
}

async fn home() -> Json<Value> {
    Json(json!({
        "message": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "get_verified_producer_by_aadhar": "POST /api/producer/aadhar",
            "get_verified_producer_by_name": "POST /api/producer/name",
            "get_all_verified_producers": "GET /api/producers",
            "get_producer_by_fssai": "POST /api/producer/fssai"
        }
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": "MCP Server API is running"
    }))
}

async fn by_aadhar<S: ProducerSource>(
    State(state): State<AppState<S>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let lookup = parse_body(LookupKind::ByAadhar, body)?;
    run_lookup(&state, &lookup).await
}

async fn by_name<S: ProducerSource>(
    State(state): State<AppState<S>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let lookup = parse_body(LookupKind::ByName, body)?;
    run_lookup(&state, &lookup).await
}

async fn all_producers<S: ProducerSource>(
    State(state): State<AppState<S>>,
) -> Result<Json<SuccessResponse>, ApiError> {
    run_lookup(&state, &Lookup::All).await
}

async fn by_fssai<S: ProducerSource>(
    State(state): State<AppState<S>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let lookup = parse_body(LookupKind::ByFssai, body)?;
    run_lookup(&state, &lookup).await
}

/// Anything other than a JSON object counts as a body without the field.
fn parse_body(kind: LookupKind, body: Result<Bytes, BytesRejection>) -> Result<Lookup, ApiError> {
    let body = body.map_err(|rejection| {
        debug!(?kind, error = %rejection, "rejecting unreadable request body");
        ApiError::unreadable_body(&rejection)
    })?;
    let arguments = match serde_json::from_slice::<Value>(&body) {
        Ok(Value::Object(arguments)) => Some(arguments),
        _ => None,
    };
    kind.parse_arguments(arguments.as_ref()).map_err(|err| {
        debug!(?kind, error = %err, "rejecting lookup request");
        ApiError::invalid_request(&err)
    })
}

async fn run_lookup<S: ProducerSource>(
    state: &AppState<S>,
    lookup: &Lookup,
) -> Result<Json<SuccessResponse>, ApiError> {
    let kind = lookup.kind();
    let outcome = state
        .lookup
        .run(lookup)
        .await
        .map_err(|err| ApiError::query(&err))?;
    outcome
        .into_data()
        .map(|data| {
            Json(SuccessResponse {
                status: "success",
                data,
            })
        })
        .ok_or_else(|| ApiError::not_found(kind))
}
