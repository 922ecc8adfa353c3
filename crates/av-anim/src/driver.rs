//! Animation driver interface

use crate::layout::HeapLayout;
use av_data::CellValue;

/// Identifier of a view created by a driver
pub type ViewId = uuid::Uuid;

/// Interface to the animation backend
///
/// The backend owns rendering and user-driven stepping; the builder only
/// feeds it discrete state changes, issued synchronously in emission
/// order. Instructions between two step boundaries belong to the same
/// animation step.
pub trait AnimationDriver {
    /// Create an indexed-array view from the initial values
    fn create_array_view(&mut self, values: &[CellValue]) -> ViewId;

    /// Create a binary-tree view mirroring the given layout
    fn create_tree_view(&mut self, layout: &HeapLayout) -> ViewId;

    /// Attach the highlight marker to the given positions of a view
    fn add_highlight(&mut self, view: ViewId, positions: &[usize]);

    /// Remove the highlight marker from the given positions of a view
    fn remove_highlight(&mut self, view: ViewId, positions: &[usize]);

    /// Set the value shown at one position of a view
    fn set_value(&mut self, view: ViewId, position: usize, value: CellValue);

    /// Declare the current state as the first step of the visualization
    fn display_init(&mut self);

    /// Declare a discrete step boundary
    fn step(&mut self);

    /// Mark the recording complete, enabling rewind and replay
    fn recorded(&mut self);

    /// Set the playback speed
    fn set_speed(&mut self, speed: f64);
}
