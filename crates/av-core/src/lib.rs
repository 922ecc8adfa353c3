//! Core functionality for the exercise recording inspector
//!
//! This crate provides the selection engine, submission index, event bus
//! and input handling shared by the viewer components.

pub mod events;
pub mod input;
pub mod playback;
pub mod selection;

// Re-export commonly used types
pub use input::{dispatch_key, Key, KeyDispatch, ViewerAction};
pub use playback::PlaybackControl;
pub use selection::{
    SelectionContext, SelectionEngine, SelectionSpec, SelectionState, SelectionSubscriber,
    SubmissionIndex, SubmissionSummary,
};
