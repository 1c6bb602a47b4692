//! Application state for the tutor server

use std::sync::Arc;
use uuid::Uuid;

use crate::config::TutorConfig;
use crate::error::Result;
use crate::extraction::ExtractionRouter;
use crate::generation::{Explainer, NoteGenerator, QuizGenerator};
use crate::providers::{LlmProvider, OllamaClient};
use crate::storage::{ArtifactCache, FileStore, MaterialStore};
use crate::types::Material;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: TutorConfig,
    /// In-memory material store
    materials: MaterialStore,
    /// Generated-artifact cache with material-based invalidation
    artifacts: ArtifactCache,
    /// Uploaded source files on disk
    files: FileStore,
    /// Format-dispatching extractor
    extractor: Arc<ExtractionRouter>,
    /// LLM backend
    llm: Arc<dyn LlmProvider>,
    /// Note generation pipeline
    notes: NoteGenerator,
    /// Quiz generation pipeline
    quiz: QuizGenerator,
    /// Concept explanation pipeline
    explainer: Explainer,
}

impl AppState {
    /// Create new application state
    pub fn new(config: TutorConfig) -> Result<Self> {
        tracing::info!("Initializing tutor application state...");

        let files = FileStore::new(config.storage.upload_dir.clone())?;
        tracing::info!("Upload directory ready at {}", config.storage.upload_dir.display());

        let extractor = Arc::new(ExtractionRouter::new(&config.extraction));
        tracing::info!("Extraction router initialized");

        let llm: Arc<dyn LlmProvider> = Arc::new(OllamaClient::new(&config.llm));
        tracing::info!(
            "LLM provider initialized ({} via {})",
            config.llm.generate_model,
            config.llm.base_url
        );

        let notes = NoteGenerator::new(Arc::clone(&llm));
        let quiz = QuizGenerator::new(Arc::clone(&llm));
        let explainer = Explainer::new(Arc::clone(&llm));

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                materials: MaterialStore::new(),
                artifacts: ArtifactCache::new(),
                files,
                extractor,
                llm,
                notes,
                quiz,
                explainer,
            }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &TutorConfig {
        &self.inner.config
    }

    /// Get the material store
    pub fn materials(&self) -> &MaterialStore {
        &self.inner.materials
    }

    /// Get the artifact cache
    pub fn artifacts(&self) -> &ArtifactCache {
        &self.inner.artifacts
    }

    /// Get the file store
    pub fn files(&self) -> &FileStore {
        &self.inner.files
    }

    /// Get the extraction router
    pub fn extractor(&self) -> &Arc<ExtractionRouter> {
        &self.inner.extractor
    }

    /// Get the LLM provider
    pub fn llm_provider(&self) -> &Arc<dyn LlmProvider> {
        &self.inner.llm
    }

    /// Get the note generator
    pub fn note_generator(&self) -> &NoteGenerator {
        &self.inner.notes
    }

    /// Get the quiz generator
    pub fn quiz_generator(&self) -> &QuizGenerator {
        &self.inner.quiz
    }

    /// Get the explainer
    pub fn explainer(&self) -> &Explainer {
        &self.inner.explainer
    }

    /// Delete a material and every derived trace of it
    ///
    /// Removes the store entry, sweeps the uploaded file from disk, and
    /// invalidates cached artifacts generated from the material.
    pub async fn remove_material(&self, id: &Uuid) -> Result<Material> {
        let material = self.inner.materials.remove(id)?;

        let swept = self.inner.files.sweep(id).await;
        let invalidated = self.inner.artifacts.invalidate_material(id);

        tracing::info!(
            "Deleted material {} ({} file(s) removed, {} cached artifact(s) invalidated)",
            id,
            swept,
            invalidated
        );

        Ok(material)
    }
}
