//! Animation construction for recorded exercises
//!
//! Converts a submission's recorded step sequence into the discrete
//! instruction stream an animation backend replays: a binary-tree layout
//! mirrored from the array, swap detection between consecutive snapshots,
//! and a two-phase highlight/exchange emission per detected swap.

pub mod buildheap;
pub mod driver;
pub mod layout;
pub mod script;
pub mod swap;

use thiserror::Error;

// Re-exports
pub use buildheap::{build_heap_animation, AnimationStats};
pub use driver::{AnimationDriver, ViewId};
pub use layout::{child_indices, parent_index, HeapLayout, LayoutNode};
pub use script::{AnimationInstruction, ScriptCursor, ScriptDriver};
pub use swap::{detect_swap, differing_indices, Swap};

/// Errors that can occur while building an animation
#[derive(Error, Debug)]
pub enum AnimationError {
    #[error("submission has no recorded steps")]
    EmptyRecording,
}
