//! Error types for the study-tutor pipeline

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::types::MaterialFormat;

/// Result type alias for tutor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Study-tutor errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File extension outside the supported set
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Extraction failure, tagged with the format whose extractor failed
    #[error("Extraction failed ({format}): {message}")]
    Extraction {
        format: MaterialFormat,
        message: String,
    },

    /// Unknown material id
    #[error("Material not found: {0}")]
    MaterialNotFound(String),

    /// Material id already present in the store
    #[error("Material id already exists: {0}")]
    DuplicateMaterial(String),

    /// Generator output was not parseable JSON; the raw text is preserved
    /// for diagnosis
    #[error("Malformed generator output: {message}")]
    MalformedOutput { message: String, raw: String },

    /// A generated question violated the contract; the whole set is rejected
    #[error("Question {index} violates the contract: {message}")]
    SchemaViolation { index: usize, message: String },

    /// Caller-supplied value rejected outright (empty question, oversized
    /// file). Out-of-set enum parameters are instead replaced with their
    /// defaults and never reach this variant.
    #[error("Validation error: {0}")]
    Validation(String),

    /// LLM backend error
    #[error("LLM error: {0}")]
    Llm(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an extraction error for a format
    pub fn extraction(format: MaterialFormat, message: impl Into<String>) -> Self {
        Self::Extraction {
            format,
            message: message.into(),
        }
    }

    /// Create an unsupported-format error naming the extension
    pub fn unsupported_format(ext: impl Into<String>) -> Self {
        Self::UnsupportedFormat(ext.into())
    }

    /// Create a not-found error
    pub fn not_found(id: impl ToString) -> Self {
        Self::MaterialNotFound(id.to_string())
    }

    /// Create a duplicate-id error
    pub fn duplicate(id: impl ToString) -> Self {
        Self::DuplicateMaterial(id.to_string())
    }

    /// Create a malformed-output error, keeping the raw generator text
    pub fn malformed_output(message: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::MalformedOutput {
            message: message.into(),
            raw: raw.into(),
        }
    }

    /// Create a schema violation for the question at `index`
    pub fn schema_violation(index: usize, message: impl Into<String>) -> Self {
        Self::SchemaViolation {
            index,
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an LLM error
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            Error::Config(msg) => (StatusCode::BAD_REQUEST, "config_error", msg.clone()),
            Error::UnsupportedFormat(ext) => (
                StatusCode::BAD_REQUEST,
                "unsupported_format",
                format!("Unsupported file format: {}", ext),
            ),
            Error::Extraction { format, message } => (
                StatusCode::BAD_REQUEST,
                "extraction_error",
                format!("Extraction failed ({}): {}", format, message),
            ),
            Error::MaterialNotFound(id) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("Material not found: {}", id),
            ),
            Error::DuplicateMaterial(id) => (
                StatusCode::CONFLICT,
                "duplicate_id",
                format!("Material id already exists: {}", id),
            ),
            Error::MalformedOutput { message, raw } => {
                // Raw generator text rides along so the client can inspect it
                let body = Json(json!({
                    "error": {
                        "type": "malformed_output",
                        "message": message,
                        "raw": raw,
                    }
                }));
                return (StatusCode::BAD_GATEWAY, body).into_response();
            }
            Error::SchemaViolation { index, message } => {
                let body = Json(json!({
                    "error": {
                        "type": "schema_violation",
                        "message": message,
                        "question_index": index,
                    }
                }));
                return (StatusCode::BAD_GATEWAY, body).into_response();
            }
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
            Error::Llm(msg) => (StatusCode::SERVICE_UNAVAILABLE, "llm_error", msg.clone()),
            Error::Io(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "io_error",
                err.to_string(),
            ),
            Error::Json(err) => (StatusCode::BAD_REQUEST, "json_error", err.to_string()),
            Error::Http(err) => (StatusCode::BAD_GATEWAY, "http_error", err.to_string()),
            Error::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
