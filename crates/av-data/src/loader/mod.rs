//! Loading and validation of recording files
//!
//! Parsing fails fast: a file is either parsed and validated wholesale or
//! rejected with a specific reason, leaving any previously loaded state
//! untouched.

use crate::model::{ExerciseKind, ExerciseRecording};
use crate::RecordingError;
use std::fmt;
use std::path::Path;
use tracing::info;

/// A validated recording together with its resolved kind and summary
#[derive(Debug, Clone)]
pub struct LoadedRecording {
    pub recording: ExerciseRecording,
    pub kind: ExerciseKind,
    pub summary: LoadSummary,
}

/// Human-readable summary rendered into the status area after a load
#[derive(Debug, Clone)]
pub struct LoadSummary {
    pub course_code: String,
    pub course_name: String,
    pub year: i64,
    pub exercise_name: String,
    pub exercise_id: i64,
    pub submission_count: usize,
}

impl fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Course   : {} {}", self.course_code, self.course_name)?;
        writeln!(f, "Year     : {}", self.year)?;
        writeln!(f, "Exercise : {} (id: {})", self.exercise_name, self.exercise_id)
    }
}

/// Parse and validate recording file text
pub fn parse_recording(text: &str) -> Result<LoadedRecording, RecordingError> {
    let recording: ExerciseRecording = serde_json::from_str(text)?;
    let kind = recording.validate()?;

    let metadata = &recording.metadata;
    let summary = LoadSummary {
        course_code: metadata.course_code.clone(),
        course_name: metadata.course_name.clone(),
        year: metadata.year,
        exercise_name: metadata.longname.clone(),
        exercise_id: metadata.id,
        submission_count: recording.submissions.len(),
    };

    Ok(LoadedRecording {
        recording,
        kind,
        summary,
    })
}

/// Read and parse a recording file from disk
///
/// The read and parse run on a blocking task; this is the only suspension
/// point in the system.
pub async fn load_recording(path: impl AsRef<Path>) -> Result<LoadedRecording, RecordingError> {
    let path = path.as_ref().to_path_buf();
    let loaded = tokio::task::spawn_blocking(move || {
        let text = std::fs::read_to_string(&path)?;
        parse_recording(&text)
    })
    .await??;

    info!(
        kind = %loaded.kind,
        submissions = loaded.summary.submission_count,
        "recording loaded"
    );
    Ok(loaded)
}
