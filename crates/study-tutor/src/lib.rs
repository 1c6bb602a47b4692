//! study-tutor: AI study assistant with material ingestion and artifact generation
//!
//! This crate ingests study materials in several document formats,
//! normalizes their structure, and generates study notes, explanations,
//! and validated practice quizzes through a local LLM backend.

pub mod config;
pub mod error;
pub mod extraction;
pub mod generation;
pub mod providers;
pub mod server;
pub mod storage;
pub mod types;
pub mod validation;

pub use config::TutorConfig;
pub use error::{Error, Result};
pub use types::{
    material::{Material, MaterialFormat, RawDocument, StructuredSection},
    quiz::GeneratedQuestion,
    response::{NotesResponse, QuizResponse, UploadResponse},
};
