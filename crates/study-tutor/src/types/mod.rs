//! Core types for the study tutor

pub mod material;
pub mod quiz;
pub mod request;
pub mod response;

pub use material::{
    DocumentUnit, Material, MaterialFormat, OcrToken, RawDocument, StructuredSection,
    SUPPORTED_EXTENSIONS,
};
pub use quiz::{Difficulty, GeneratedQuestion, QuestionType};
pub use request::{ApproachesRequest, AskRequest, NotesRequest, QuizRequest, SimplerRequest};
pub use response::{
    AnswerMetadata, AnswerResponse, ApproachesMetadata, ApproachesResponse, MaterialListItem,
    MaterialListResponse, MaterialSummary, NotesMetadata, NotesResponse, QuizMetadata,
    QuizResponse, SimplerMetadata, SimplerResponse, UploadResponse,
};
