//! In-memory representation of a parsed exercise recording file

use crate::RecordingError;
use av_core::{SelectionSpec, SubmissionIndex, SubmissionSummary};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Application name every accepted file must declare
pub const FORMAT_NAME: &str = "JSAV Inspector";

/// File format version every accepted file must declare
pub const FORMAT_VERSION: i64 = 1;

/// Exercise kinds the inspector recognises
///
/// Only `BuildHeap` has an animation builder; the other two are accepted
/// as recognised but produce no visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    BuildHeap,
    Dijkstra,
    Quicksort,
}

impl ExerciseKind {
    /// All recognised kinds
    pub const ALL: [ExerciseKind; 3] =
        [ExerciseKind::BuildHeap, ExerciseKind::Dijkstra, ExerciseKind::Quicksort];

    /// The kind's name as it appears in `metadata.type`
    pub fn name(&self) -> &'static str {
        match self {
            ExerciseKind::BuildHeap => "buildheap",
            ExerciseKind::Dijkstra => "dijkstra",
            ExerciseKind::Quicksort => "quicksort",
        }
    }

    /// Look up a recognised kind by its `metadata.type` name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Whether an animation builder exists for this kind
    pub fn has_renderer(&self) -> bool {
        matches!(self, ExerciseKind::BuildHeap)
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Top-level document of a recording file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseRecording {
    pub application: String,
    pub version: i64,
    pub metadata: Metadata,
    pub submissions: Vec<Submission>,
}

impl ExerciseRecording {
    /// Validate the format invariants and resolve the exercise kind
    ///
    /// Fails fast: an application/version mismatch or an unrecognised
    /// exercise type rejects the recording wholesale.
    pub fn validate(&self) -> Result<ExerciseKind, RecordingError> {
        if self.application != FORMAT_NAME || self.version != FORMAT_VERSION {
            return Err(RecordingError::WrongFormat {
                application: self.application.clone(),
                version: self.version,
            });
        }
        ExerciseKind::from_name(&self.metadata.exercise_type)
            .ok_or_else(|| RecordingError::UnsupportedType(self.metadata.exercise_type.clone()))
    }

    /// Build the selection specification for the selection engine
    ///
    /// Runs once per loaded file, immediately after validation. The
    /// submission index this builds gives jump-by-id its O(1) lookup.
    pub fn selection_spec(&self) -> SelectionSpec {
        SelectionSpec {
            submission_count: self.submissions.len(),
            index: SubmissionIndex::from_ordered_ids(self.submissions.iter().map(|s| s.id)),
            summaries: self
                .submissions
                .iter()
                .map(|s| SubmissionSummary {
                    id: s.id,
                    points: s.points,
                    max_points: s.max_points,
                })
                .collect(),
        }
    }

    /// Submission at the given 0-based position
    pub fn submission(&self, position: usize) -> Option<&Submission> {
        self.submissions.get(position)
    }
}

/// Exercise metadata written by the submission downloader
///
/// The trailing optional fields appear in downloader output but are not
/// required; unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(rename = "type")]
    pub exercise_type: String,
    pub course_code: String,
    pub course_name: String,
    pub year: i64,
    pub longname: String,
    pub id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_instance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_points: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_submissions: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submissions_url: Option<String>,
}

/// One recorded attempt at the exercise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub points: f64,
    pub max_points: f64,
    pub recording: Vec<Step>,
}

impl Submission {
    /// The recorded steps in order
    pub fn steps(&self) -> &[Step] {
        &self.recording
    }

    /// Array size of the exercise, taken from the first step
    ///
    /// The size is fixed per submission; every step mirrors it.
    pub fn array_size(&self) -> usize {
        self.recording.first().map_or(0, Step::len)
    }

    /// Values of the first snapshot, the exercise's input array
    pub fn initial_values(&self) -> Vec<CellValue> {
        self.recording
            .first()
            .map(|step| step.values().cloned().collect())
            .unwrap_or_default()
    }
}

/// One snapshot of the array state during algorithm execution
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    #[serde(rename = "ind")]
    pub indexed_values: Vec<IndexedValue>,
}

impl Step {
    pub fn len(&self) -> usize {
        self.indexed_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexed_values.is_empty()
    }

    /// Value at the given array position
    pub fn value(&self, position: usize) -> Option<&CellValue> {
        self.indexed_values.get(position).map(|iv| &iv.value)
    }

    /// Values in array order
    pub fn values(&self) -> impl Iterator<Item = &CellValue> {
        self.indexed_values.iter().map(|iv| &iv.value)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.values().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}

/// One array cell as recorded on the wire
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexedValue {
    #[serde(rename = "v")]
    pub value: CellValue,
}

/// A recorded cell value
///
/// Heap exercises record integers; other exercise kinds may record
/// fractional or textual values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(v) => write!(f, "{v}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}
