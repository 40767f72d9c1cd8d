//! HTTP endpoint: `POST /api/generate-pdf`.
//!
//! The request-handling layer around the library. It accepts a transcript
//! as JSON, runs [`crate::generate`] and answers with the rendered HTML
//! document, which the browser prints to PDF.
//!
//! | Request | Response |
//! |---------|----------|
//! | `OPTIONS` | 200, empty body (CORS preflight) |
//! | other non-`POST` method | 405 `{"error":"Method not allowed"}` |
//! | blank transcript | 400 `{"error":"No transcript provided"}` |
//! | LLM failure or timeout | 502 `{"error":"Generation failed","details":…}` |
//! | missing required sections | 502 `{"error":"Incomplete coaching guide",…}` |
//! | anything else | 500 `{"error":"Server error","details":…}` |
//! | success | 200 `{"html":…,"success":true}` |

use crate::config::GuideConfig;
use crate::error::GuideError;
use crate::generate::generate;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, instrument, warn};

/// Path of the generation endpoint.
pub const GENERATE_PATH: &str = "/api/generate-pdf";

/// State shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GuideConfig>,
}

impl AppState {
    pub fn new(config: GuideConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// Request body for [`GENERATE_PATH`].
#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub transcript: Option<String>,
}

/// Success body for [`GENERATE_PATH`].
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub html: String,
    pub success: bool,
}

/// Build the router with CORS applied.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            GENERATE_PATH,
            post(generate_handler)
                .options(preflight_handler)
                .fallback(method_not_allowed),
        )
        .route("/api/health", get(|| async { "OK" }))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the router on `addr` until the process is stopped.
#[instrument(skip(state))]
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = router(state);
    info!("Coaching guide endpoint listening on http://{}{}", addr, GENERATE_PATH);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await
}

/// Handler for `POST /api/generate-pdf`.
///
/// A body that is missing, empty, not JSON or has a `null` transcript counts
/// as no transcript and gets the same 400 as a blank one.
pub async fn generate_handler(
    State(state): State<AppState>,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> Response {
    let transcript = match body {
        Ok(Json(request)) => request.transcript.unwrap_or_default(),
        Err(rejection) => {
            debug!("Unreadable request body: {}", rejection.body_text());
            String::new()
        }
    };

    match generate(&transcript, &state.config).await {
        Ok(output) => {
            info!(
                "Served guide: {} bytes, {} tokens out, {}ms",
                output.html.len(),
                output.stats.output_tokens,
                output.stats.total_duration_ms
            );
            (
                StatusCode::OK,
                Json(GenerateResponse {
                    html: output.html,
                    success: true,
                }),
            )
                .into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// Handler for `OPTIONS /api/generate-pdf` without CORS request headers.
pub async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

/// Handler for every other method on the endpoint.
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
        .into_response()
}

/// Map a [`GuideError`] to a status code and JSON body.
pub fn error_response(err: &GuideError) -> Response {
    let (status, body) = match err {
        GuideError::EmptyTranscript => {
            warn!("Rejected request: no transcript");
            (StatusCode::BAD_REQUEST, json!({ "error": err.to_string() }))
        }
        GuideError::MissingSections { missing } => {
            warn!("Generated guide incomplete: {:?}", missing);
            (
                StatusCode::BAD_GATEWAY,
                json!({
                    "error": "Incomplete coaching guide",
                    "details": err.to_string(),
                    "missing": missing,
                }),
            )
        }
        e if e.is_upstream() => {
            error!("Generation failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                json!({ "error": "Generation failed", "details": e.to_string() }),
            )
        }
        e => {
            error!("Server error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Server error", "details": e.to_string() }),
            )
        }
    };
    (status, Json(body)).into_response()
}
