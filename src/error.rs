use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("{field} contains '{character}', which cannot be used in a file name: {value:?}")]
    InvalidFilename {
        field: &'static str,
        value: String,
        character: char,
    },

    #[error("Could not write report to {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF generation error: {0}")]
    PdfGeneration(String),

    #[error("Form error: {0}")]
    Form(#[from] cableway_common::Error),

    #[error("Input error: {0}")]
    Prompt(String),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    /// What the user can do about a failed generation
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ReportError::InvalidFilename { .. } => Some("Rename the station fields and try again."),
            ReportError::OutputWrite { .. } => {
                Some("Check free disk space and permissions, or pick a different output directory.")
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
