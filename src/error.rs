// src/error.rs

use serde_json::Error as SerdeError;
use std::io;
use thiserror::Error;

/// Custom error types for the application
#[derive(Error, Debug)]
pub enum AppError {
    /// The collaborator could not resolve the playlist URL at all
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// The URL resolved, but to a single item instead of a collection
    #[error("Not a playlist: {0}")]
    NotAPlaylist(String),

    /// Extraction or fetch of one playlist item failed
    #[error("Download operation failed: {0}")]
    DownloadOperation(String),

    /// Interrupted from the terminal
    #[error("Aborted by user")]
    UserAborted,

    /// Error for missing dependencies
    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    /// I/O related errors
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON parsing errors
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] SerdeError),
}

impl AppError {
    /// Sentence shown to the user when the run ends with this error.
    pub fn user_message(&self) -> String {
        match self {
            AppError::ResourceNotFound(_) => {
                "Resource not found (or not supported by yt-dlp).".to_string()
            }
            AppError::NotAPlaylist(_) => "Resource is not a playlist.".to_string(),
            AppError::DownloadOperation(_) => {
                "A problem occurred during content download.".to_string()
            }
            AppError::UserAborted => "Aborted by user.".to_string(),
            AppError::MissingDependency(name) => format!(
                "{} executable not found. Please ensure it's installed and in your PATH.",
                name
            ),
            other => other.to_string(),
        }
    }
}
