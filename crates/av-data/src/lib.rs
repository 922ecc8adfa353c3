//! Recording file handling for the exercise inspector

pub mod loader;
pub mod model;

use thiserror::Error;

// Re-exports
pub use loader::{load_recording, parse_recording, LoadSummary, LoadedRecording};
pub use model::{
    CellValue, ExerciseKind, ExerciseRecording, Metadata, Step, Submission, FORMAT_NAME,
    FORMAT_VERSION,
};

/// Errors that can occur while loading a recording
///
/// The `Io`, `WrongFormat` and `UnsupportedType` messages are surfaced
/// verbatim in the status area.
#[derive(Error, Debug)]
pub enum RecordingError {
    #[error("An error occurred reading the file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed recording file: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("This is not a JSAV Inspector version 1 file")]
    WrongFormat { application: String, version: i64 },

    #[error("Unknown exercise type: '{0}'")]
    UnsupportedType(String),

    #[error("join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}
