//! Keyboard input mapping for the viewer surface

use serde::{Deserialize, Serialize};

/// Keys the viewer surface forwards to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

impl Key {
    /// Parse a key name as used by the command loop
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left" => Some(Key::Left),
            "right" => Some(Key::Right),
            "up" => Some(Key::Up),
            "down" => Some(Key::Down),
            "home" => Some(Key::Home),
            "end" => Some(Key::End),
            _ => None,
        }
    }
}

/// Action a key press translates into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewerAction {
    /// One animation step backward
    StepBackward,
    /// One animation step forward
    StepForward,
    /// Open the previous submission
    PreviousSubmission,
    /// Open the next submission
    NextSubmission,
    /// Rewind the animation to its first step
    JumpToStart,
    /// Fast-forward the animation to its last step
    JumpToEnd,
}

/// Result of dispatching a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDispatch {
    pub action: ViewerAction,
    /// Whether the surface must suppress its default handling (scrolling)
    pub prevent_default: bool,
}

/// Map a key press to its viewer action
pub fn dispatch_key(key: Key) -> KeyDispatch {
    match key {
        Key::Left => KeyDispatch {
            action: ViewerAction::StepBackward,
            prevent_default: false,
        },
        Key::Right => KeyDispatch {
            action: ViewerAction::StepForward,
            prevent_default: false,
        },
        Key::Up => KeyDispatch {
            action: ViewerAction::PreviousSubmission,
            prevent_default: true,
        },
        Key::Down => KeyDispatch {
            action: ViewerAction::NextSubmission,
            prevent_default: true,
        },
        Key::Home => KeyDispatch {
            action: ViewerAction::JumpToStart,
            prevent_default: false,
        },
        Key::End => KeyDispatch {
            action: ViewerAction::JumpToEnd,
            prevent_default: false,
        },
    }
}
