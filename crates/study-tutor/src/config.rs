//! Configuration for the study tutor

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main tutor configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TutorConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upload storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Ollama/LLM configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Extraction configuration
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum request body size in bytes; sits above the per-file cap to
    /// leave room for the multipart envelope
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            enable_cors: true,
            max_upload_size: 20 * 1024 * 1024, // 20MB
        }
    }
}

/// Upload storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory where uploaded source files are kept, one file per
    /// material named {id}{extension}
    pub upload_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("study-tutor")
                .join("uploads"),
        }
    }
}

/// LLM (Ollama) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Ollama base URL
    pub base_url: String,
    /// Generation model name
    pub generate_model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion budget in tokens
    pub max_tokens: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of retries for failed requests
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            generate_model: "llama3.1:8b".to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            timeout_secs: 120, // generation on CPU is slow
            max_retries: 2,
        }
    }
}

/// Extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Maximum accepted source file size in megabytes
    pub max_file_size_mb: u64,
    /// Tesseract language pack used for OCR
    pub ocr_language: String,
    /// Watchdog timeout for PDF text extraction in seconds
    pub pdf_timeout_secs: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 10,
            ocr_language: "eng".to_string(),
            pdf_timeout_secs: 60,
        }
    }
}

impl TutorConfig {
    /// Load configuration: TOML file if given, defaults otherwise, then
    /// environment overrides and a validation pass.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => {
                let raw = std::fs::read_to_string(p)
                    .map_err(|e| Error::Config(format!("cannot read {}: {}", p.display(), e)))?;
                toml::from_str(&raw)
                    .map_err(|e| Error::Config(format!("invalid config {}: {}", p.display(), e)))?
            }
            None => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Environment overrides, using the variable names the service has
    /// honored across versions
    fn apply_env(&mut self) {
        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(_) => tracing::warn!("ignoring non-numeric PORT: {}", port),
            }
        }
        if let Ok(dir) = std::env::var("UPLOAD_FOLDER") {
            self.storage.upload_dir = PathBuf::from(dir);
        }
        if let Ok(mb) = std::env::var("MAX_FILE_SIZE") {
            match mb.parse() {
                Ok(v) => self.extraction.max_file_size_mb = v,
                Err(_) => tracing::warn!("ignoring non-numeric MAX_FILE_SIZE: {}", mb),
            }
        }
        if let Ok(url) = std::env::var("OLLAMA_BASE_URL") {
            self.llm.base_url = url;
        }
        if let Ok(model) = std::env::var("MODEL_NAME") {
            self.llm.generate_model = model;
        }
    }

    /// Reject configurations the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("server.port must be non-zero".to_string()));
        }
        if self.extraction.max_file_size_mb == 0 {
            return Err(Error::Config(
                "extraction.max_file_size_mb must be at least 1".to_string(),
            ));
        }
        if self.llm.base_url.is_empty() {
            return Err(Error::Config("llm.base_url must be set".to_string()));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(Error::Config(
                "llm.temperature must be between 0.0 and 2.0".to_string(),
            ));
        }
        Ok(())
    }

    /// Per-file upload cap in bytes
    pub fn max_file_size_bytes(&self) -> u64 {
        self.extraction.max_file_size_mb * 1024 * 1024
    }
}
