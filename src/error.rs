use evidence_ai_common::{AnalysisError, ValidationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvidenceAiError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Image load error: {0}")]
    ImageLoad(String),

    #[error("Image save error: {0}")]
    ImageSave(String),

    #[error("Invalid selection: {0}")]
    Validation(#[from] ValidationError),

    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EvidenceAiError>;
