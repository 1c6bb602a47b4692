//! Material upload endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::path::Path;
use std::time::Instant;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::extraction::hash_content;
use crate::server::state::AppState;
use crate::types::{Material, UploadResponse};
use crate::validation::validate_file;

/// POST /api/upload - Upload and process one study material file
///
/// Expects multipart form data with a `file` field and an optional
/// `subject` text field. The file is persisted first, validated against
/// the saved copy, and removed again if validation or extraction fails.
pub async fn upload_material(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let start = Instant::now();

    let mut file_name: Option<String> = None;
    let mut data: Option<Vec<u8>> = None;
    let mut subject: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Internal(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == "subject" {
            let text = field
                .text()
                .await
                .map_err(|e| Error::Internal(format!("Failed to read subject field: {}", e)))?;
            let text = text.trim().to_string();
            if !text.is_empty() {
                subject = Some(text);
            }
            continue;
        }

        // Any field carrying a filename is treated as the upload
        if let Some(original) = field.file_name() {
            file_name = Some(original.to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| Error::Internal(format!("Failed to read file: {}", e)))?;
            data = Some(bytes.to_vec());
        } else {
            tracing::debug!("Ignoring unknown multipart field: {}", name);
        }
    }

    let file_name = file_name.ok_or_else(|| Error::validation("No file provided"))?;
    let data = data.ok_or_else(|| Error::validation("No file provided"))?;

    tracing::info!("Processing upload: {} ({} bytes)", file_name, data.len());

    let material_id = Uuid::new_v4();
    let extension = Path::new(&file_name)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default();

    // Persist first; validation runs against the saved copy
    let saved_path = state.files().save(&material_id, &extension, &data).await?;

    let check = match validate_file(&saved_path, state.config().max_file_size_bytes()) {
        Ok(check) => check,
        Err(e) => {
            discard_upload(&state, &material_id, &extension).await;
            return Err(e);
        }
    };

    // Extraction is blocking work (parsers, OCR subprocess)
    let extractor = std::sync::Arc::clone(state.extractor());
    let extract_path = saved_path.clone();
    let extracted = tokio::task::spawn_blocking(move || {
        extractor.extract_with_structure(&extract_path)
    })
    .await
    .map_err(|e| Error::Internal(format!("Task join error: {}", e)))?;

    let (raw, sections) = match extracted {
        Ok(parts) => parts,
        Err(e) => {
            discard_upload(&state, &material_id, &extension).await;
            return Err(e);
        }
    };

    let content_hash = hash_content(&raw.full_text);
    let sections = if sections.is_empty() { None } else { Some(sections) };
    let material = Material::new(
        material_id,
        file_name,
        subject,
        raw,
        sections,
        content_hash,
        check.size,
    );

    let response = UploadResponse::new(&material);
    state.materials().insert(material)?;

    tracing::info!(
        "Uploaded material {} in {:.1}s",
        material_id,
        start.elapsed().as_secs_f64()
    );

    Ok(Json(response))
}

/// Remove a saved upload after a failed validation or extraction
async fn discard_upload(state: &AppState, id: &Uuid, extension: &str) {
    if let Err(e) = state.files().remove(id, extension).await {
        tracing::warn!("Failed to remove rejected upload {}: {}", id, e);
    }
}
