//! Playback control state for the animation driver

/// Playback control state
#[derive(Clone, Debug)]
pub struct PlaybackControl {
    pub playing: bool,
    pub speed: f64,
    pub looping: bool,
}

impl PlaybackControl {
    /// Maximum playback speed, for fast viewing of long recordings
    pub const MAX_SPEED: f64 = 100.0;

    /// Control preset used right after a recording finishes building
    pub fn fast_viewing() -> Self {
        Self {
            playing: false,
            speed: Self::MAX_SPEED,
            looping: false,
        }
    }
}

impl Default for PlaybackControl {
    fn default() -> Self {
        Self {
            playing: false,
            speed: 1.0,
            looping: false,
        }
    }
}
