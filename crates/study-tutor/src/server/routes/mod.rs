//! API routes for the tutor server

pub mod artifacts;
pub mod explain;
pub mod materials;
pub mod upload;

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::server::state::AppState;
use crate::types::SUPPORTED_EXTENSIONS;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Service info
        .route("/health", get(health))
        .route("/supported-formats", get(supported_formats))
        // Ingestion - with larger body limit for file uploads
        .route(
            "/upload",
            post(upload::upload_material).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Material management
        .route("/materials", get(materials::list_materials))
        .route("/materials/:id", get(materials::get_material))
        .route("/materials/:id", delete(materials::delete_material))
        // Generated artifacts
        .route("/notes", post(artifacts::generate_notes))
        .route("/quiz", post(artifacts::generate_quiz))
        // Explanation
        .route("/ask", post(explain::ask_question))
        .route("/explain-simpler", post(explain::explain_simpler))
        .route("/approaches", post(explain::multiple_approaches))
}

/// GET /api/health - Service health descriptor
async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "AI Study Buddy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api/supported-formats - Accepted upload formats and size cap
async fn supported_formats(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "formats": SUPPORTED_EXTENSIONS,
        "max_file_size_mb": state.config().extraction.max_file_size_mb,
    }))
}
