//! JSON HTTP server over the in-memory library.
//!
//! Exposes the Cognix pipeline as a REST API for UI clients: content intake,
//! search and filtering, relationship discovery, plan synthesis, and step
//! toggling. State lives in a shared [`Library`] and is gone when the
//! process exits — persistence is deliberately out of scope.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check (returns version) |
//! | `POST` | `/content/text` | Ingest pasted text as a note |
//! | `POST` | `/content/youtube` | Ingest a YouTube URL (optional transcript) |
//! | `GET`  | `/content` | List items; `?q=` search, `?category=` filter |
//! | `GET`  | `/content/{id}` | Fetch one item |
//! | `DELETE` | `/content/{id}` | Remove an item |
//! | `GET`  | `/relationships` | Pairwise similarity relationships |
//! | `POST` | `/plans` | Synthesize a plan from stored items + goals |
//! | `GET`  | `/plans` | List generated plans |
//! | `PUT`  | `/plans/{plan_id}/steps/{step_id}/toggle` | Toggle a step |
//! | `GET`  | `/suggestions` | Next-step suggestions; `?done=` markers |
//! | `GET`  | `/analytics` | Library analytics summary |
//! | `GET`  | `/export` | Full JSON snapshot |
//!
//! # Error Contract
//!
//! All error responses share one schema:
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "text must not be empty" } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted to support browser-based
//! clients.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::analytics;
use crate::classify;
use crate::config::Config;
use crate::export;
use crate::extract;
use crate::library::Library;
use crate::models::{ActionPlan, ActionStep, ContentItem, Relationship};
use crate::plan;

/// Starts the HTTP server with a fresh, empty library.
///
/// Binds to the address configured in `[server].bind` and runs until the
/// process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let library = Arc::new(Library::new());
    let app = router(library);

    println!("Cognix server listening on http://{}", config.server.bind);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the application router over a shared library.
///
/// Split out from [`run_server`] so callers (and tests) can serve a
/// pre-seeded library on a listener of their choosing.
pub fn router(library: Arc<Library>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/content/text", post(handle_ingest_text))
        .route("/content/youtube", post(handle_ingest_youtube))
        .route("/content", get(handle_list_content))
        .route("/content/{id}", get(handle_get_content))
        .route("/content/{id}", delete(handle_delete_content))
        .route("/relationships", get(handle_relationships))
        .route("/plans", post(handle_create_plan))
        .route("/plans", get(handle_list_plans))
        .route(
            "/plans/{plan_id}/steps/{step_id}/toggle",
            put(handle_toggle_step),
        )
        .route("/suggestions", get(handle_suggestions))
        .route("/analytics", get(handle_analytics))
        .route("/export", get(handle_export))
        .layer(cors)
        .with_state(library)
}

// ============ Error response ============

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

/// Inner error detail with a machine-readable code and human-readable message.
#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

/// Constructs a 400 Bad Request error.
fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

/// Constructs a 404 Not Found error.
fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ POST /content/text ============

#[derive(Deserialize)]
struct IngestTextRequest {
    title: Option<String>,
    text: String,
}

/// Ingest pasted text as a completed, classified note item.
async fn handle_ingest_text(
    State(library): State<Arc<Library>>,
    Json(req): Json<IngestTextRequest>,
) -> Result<Json<ContentItem>, AppError> {
    if req.text.trim().is_empty() {
        return Err(bad_request("text must not be empty"));
    }

    let mut item = extract::extract_note(&req.text, req.title.as_deref());
    classify::classify_item(&mut item);

    Ok(Json(library.add_item(item)))
}

// ============ POST /content/youtube ============

#[derive(Deserialize)]
struct IngestYoutubeRequest {
    url: String,
    transcript: Option<String>,
}

/// Ingest a YouTube URL. Without a caller-supplied transcript the item is
/// stored with `error` status; transcript fetching belongs to the external
/// extraction backend.
async fn handle_ingest_youtube(
    State(library): State<Arc<Library>>,
    Json(req): Json<IngestYoutubeRequest>,
) -> Result<Json<ContentItem>, AppError> {
    if req.url.trim().is_empty() {
        return Err(bad_request("url must not be empty"));
    }

    let mut item = extract::extract_youtube(&req.url, req.transcript.as_deref());
    classify::classify_item(&mut item);

    Ok(Json(library.add_item(item)))
}

// ============ GET /content ============

#[derive(Deserialize)]
struct ContentQuery {
    q: Option<String>,
    category: Option<String>,
}

async fn handle_list_content(
    State(library): State<Arc<Library>>,
    Query(query): Query<ContentQuery>,
) -> Json<Vec<ContentItem>> {
    let mut items = match query.q {
        Some(ref q) => library.search(q),
        None => library.items(),
    };

    if let Some(ref category) = query.category {
        if category != "all" {
            items.retain(|item| item.categories.iter().any(|c| c == category));
        }
    }

    Json(items)
}

// ============ GET /content/{id} ============

async fn handle_get_content(
    State(library): State<Arc<Library>>,
    Path(id): Path<String>,
) -> Result<Json<ContentItem>, AppError> {
    library
        .get_item(&id)
        .map(Json)
        .ok_or_else(|| not_found(format!("content item not found: {}", id)))
}

// ============ DELETE /content/{id} ============

#[derive(Serialize)]
struct DeleteResponse {
    deleted: bool,
    id: String,
}

/// Remove an item. Plans are untouched; they reference titles, not ids.
async fn handle_delete_content(
    State(library): State<Arc<Library>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    if !library.remove_item(&id) {
        return Err(not_found(format!("content item not found: {}", id)));
    }
    Ok(Json(DeleteResponse { deleted: true, id }))
}

// ============ GET /relationships ============

async fn handle_relationships(State(library): State<Arc<Library>>) -> Json<Vec<Relationship>> {
    Json(library.relationships())
}

// ============ POST /plans ============

#[derive(Deserialize)]
struct CreatePlanRequest {
    goals: Vec<String>,
}

/// Synthesize an action plan from all stored items and the supplied goals,
/// store it, and return it. Creating a plan never alters existing plans.
async fn handle_create_plan(
    State(library): State<Arc<Library>>,
    Json(req): Json<CreatePlanRequest>,
) -> Result<Json<ActionPlan>, AppError> {
    if req.goals.iter().any(|g| g.trim().is_empty()) {
        return Err(bad_request("goals must not contain empty entries"));
    }

    let generated = plan::synthesize(&library.items(), &req.goals, Utc::now());
    Ok(Json(library.add_plan(generated)))
}

// ============ GET /plans ============

async fn handle_list_plans(State(library): State<Arc<Library>>) -> Json<Vec<ActionPlan>> {
    Json(library.plans())
}

// ============ PUT /plans/{plan_id}/steps/{step_id}/toggle ============

async fn handle_toggle_step(
    State(library): State<Arc<Library>>,
    Path((plan_id, step_id)): Path<(String, String)>,
) -> Result<Json<ActionStep>, AppError> {
    library
        .toggle_step(&plan_id, &step_id)
        .map(Json)
        .ok_or_else(|| not_found(format!("no step {} in plan {}", step_id, plan_id)))
}

// ============ GET /suggestions ============

#[derive(Deserialize)]
struct SuggestionsQuery {
    /// Comma-separated completion markers.
    done: Option<String>,
}

#[derive(Serialize)]
struct SuggestionsResponse {
    suggestions: Vec<String>,
}

async fn handle_suggestions(
    State(library): State<Arc<Library>>,
    Query(query): Query<SuggestionsQuery>,
) -> Json<SuggestionsResponse> {
    let completed: Vec<String> = query
        .done
        .as_deref()
        .unwrap_or("")
        .split(',')
        .filter(|s| !s.is_empty())
        .map(|s| s.trim().to_string())
        .collect();

    Json(SuggestionsResponse {
        suggestions: plan::suggest_next_steps(&library.items(), &completed),
    })
}

// ============ GET /analytics ============

async fn handle_analytics(State(library): State<Arc<Library>>) -> Json<analytics::Analytics> {
    Json(analytics::compute(&library.items(), &library.plans()))
}

// ============ GET /export ============

async fn handle_export(State(library): State<Arc<Library>>) -> Json<export::ExportData> {
    Json(export::snapshot(
        library.items(),
        library.plans(),
        Utc::now(),
    ))
}
