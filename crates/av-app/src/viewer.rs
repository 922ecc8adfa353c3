//! Viewer wiring: session state, engine subscribers and status rendering

use av_anim::{build_heap_animation, AnimationDriver, ScriptCursor, ScriptDriver};
use av_core::events::{events as bus_events, EventBus};
use av_core::{
    dispatch_key, Key, KeyDispatch, PlaybackControl, SelectionContext, SelectionEngine,
    SelectionSubscriber, ViewerAction,
};
use av_data::LoadedRecording;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, warn};

type SessionSlot = Arc<RwLock<Option<Arc<LoadedRecording>>>>;
type ScriptSlot = Arc<RwLock<Option<ScriptCursor>>>;

/// The viewer shell
///
/// Owns the session state for the currently loaded recording. The session
/// slot is replaced wholesale on each successful load, so a load that
/// completes late can never leave derived state from an older file behind.
pub struct Viewer {
    engine: Arc<SelectionEngine>,
    event_bus: Arc<EventBus>,
    session: SessionSlot,
    script: ScriptSlot,
    playback: Arc<RwLock<PlaybackControl>>,
    /// Keeps the subscribers alive; the engine only holds weak references
    _subscribers: Vec<Arc<dyn SelectionSubscriber>>,
}

impl Viewer {
    pub fn new() -> Self {
        let engine = Arc::new(SelectionEngine::new());
        let event_bus = Arc::new(EventBus::new());
        let session: SessionSlot = Arc::new(RwLock::new(None));
        let script: ScriptSlot = Arc::new(RwLock::new(None));
        let playback = Arc::new(RwLock::new(PlaybackControl::fast_viewing()));

        let status: Arc<dyn SelectionSubscriber> = Arc::new(StatusRenderer);
        let builder: Arc<dyn SelectionSubscriber> = Arc::new(AnimationBuilder {
            session: session.clone(),
            script: script.clone(),
            playback: playback.clone(),
            event_bus: event_bus.clone(),
        });
        let bridge: Arc<dyn SelectionSubscriber> = Arc::new(BusBridge {
            event_bus: event_bus.clone(),
        });

        engine.add_subscriber(status.clone());
        engine.add_subscriber(builder.clone());
        engine.add_subscriber(bridge.clone());

        Self {
            engine,
            event_bus,
            session,
            script,
            playback,
            _subscribers: vec![status, builder, bridge],
        }
    }

    /// Install a freshly loaded recording and open its first submission
    pub fn install(&self, loaded: LoadedRecording) {
        let loaded = Arc::new(loaded);
        let spec = loaded.recording.selection_spec();

        // The session slot must hold the new recording before the engine
        // notifies subscribers of the first opened submission.
        *self.session.write() = Some(loaded.clone());
        *self.script.write() = None;
        self.engine.update_spec(spec);

        self.event_bus.publish(bus_events::RecordingLoaded {
            source_name: loaded.summary.exercise_name.clone(),
            exercise_type: loaded.kind.to_string(),
            submission_count: loaded.summary.submission_count,
        });
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }

    /// Set the playback speed used for subsequently built animations
    pub fn set_speed(&self, speed: f64) {
        self.playback.write().speed = speed;
    }

    /// Handle a key press from the viewer surface
    pub fn handle_key(&self, key: Key) -> KeyDispatch {
        let dispatch = dispatch_key(key);
        match dispatch.action {
            ViewerAction::PreviousSubmission => {
                let _ = self.engine.previous();
            }
            ViewerAction::NextSubmission => {
                let _ = self.engine.next();
            }
            ViewerAction::StepBackward => {
                if let Some(cursor) = self.script.write().as_mut() {
                    cursor.step_backward();
                }
            }
            ViewerAction::StepForward => {
                if let Some(cursor) = self.script.write().as_mut() {
                    cursor.step_forward();
                }
            }
            ViewerAction::JumpToStart => {
                if let Some(cursor) = self.script.write().as_mut() {
                    cursor.jump_to_start();
                }
            }
            ViewerAction::JumpToEnd => {
                if let Some(cursor) = self.script.write().as_mut() {
                    cursor.jump_to_end();
                }
            }
        }
        dispatch
    }

    /// Submission-number field changed; returns the value the field shows
    ///
    /// Rejected input leaves the selection unchanged and resets the field
    /// to the current 1-based number, with no message.
    pub fn submission_number_changed(&self, raw: &str) -> String {
        let _ = self.engine.jump_to_number(raw.trim());
        self.engine.selection().display_number().to_string()
    }

    /// Submission-id field changed; returns the value the field shows
    ///
    /// An unknown id leaves the selection unchanged and resets the field
    /// to the current submission's id.
    pub fn submission_id_changed(&self, raw: &str) -> String {
        if let Ok(id) = raw.trim().parse::<i64>() {
            let _ = self.engine.jump_to_id(id);
        }
        self.engine
            .context()
            .map(|context| context.summary.id.to_string())
            .unwrap_or_default()
    }

    /// Context of the open submission, if any
    pub fn context(&self) -> Option<SelectionContext> {
        self.engine.context()
    }

    /// Score line of the open submission
    pub fn status_line(&self) -> Option<String> {
        self.engine.context().map(|context| context.summary.score_line())
    }

    /// Current animation position and step count, if a script is built
    pub fn animation_position(&self) -> Option<(usize, usize)> {
        self.script
            .read()
            .as_ref()
            .map(|cursor| (cursor.position(), cursor.step_count()))
    }

    /// Array snapshots of the open submission, one line per step
    pub fn step_dump(&self) -> Vec<String> {
        let session = self.session.read();
        let Some(loaded) = session.as_ref() else {
            return Vec::new();
        };
        let Some(context) = self.engine.context() else {
            return Vec::new();
        };
        loaded
            .recording
            .submission(context.position)
            .map(|submission| submission.steps().iter().map(ToString::to_string).collect())
            .unwrap_or_default()
    }

    /// The built animation script as pretty-printed JSON
    pub fn script_json(&self) -> Option<String> {
        let script = self.script.read();
        let cursor = script.as_ref()?;
        serde_json::to_string_pretty(cursor.script()).ok()
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the per-submission status line
struct StatusRenderer;

impl SelectionSubscriber for StatusRenderer {
    fn on_submission_opened(&self, context: &SelectionContext) {
        println!(
            "Submission {}/{} (id: {})  {}",
            context.position + 1,
            context.submission_count,
            context.summary.id,
            context.summary.score_line()
        );
    }
}

/// Rebuilds the animation script when a submission is opened
struct AnimationBuilder {
    session: SessionSlot,
    script: ScriptSlot,
    playback: Arc<RwLock<PlaybackControl>>,
    event_bus: Arc<EventBus>,
}

impl SelectionSubscriber for AnimationBuilder {
    fn on_submission_opened(&self, context: &SelectionContext) {
        let session = self.session.read();
        let Some(loaded) = session.as_ref() else {
            return;
        };

        if !loaded.kind.has_renderer() {
            // Recognised exercise type without a visualization
            warn!(kind = %loaded.kind, "exercise type is recognised but has no visualization");
            *self.script.write() = None;
            return;
        }

        let Some(submission) = loaded.recording.submission(context.position) else {
            return;
        };

        // The layout and script are rebuilt from scratch on every switch
        let mut driver = ScriptDriver::new();
        match build_heap_animation(&mut driver, submission) {
            Ok(stats) => {
                driver.set_speed(self.playback.read().speed);
                *self.script.write() = Some(ScriptCursor::new(driver.into_script()));
                debug!(swaps = stats.swap_count, "animation script built");
                self.event_bus.publish(bus_events::AnimationBuilt {
                    submission_id: context.summary.id,
                    swap_count: stats.swap_count,
                });
            }
            Err(err) => {
                warn!(submission = context.summary.id, "no animation: {err}");
                *self.script.write() = None;
            }
        }
    }
}

/// Republishes engine notifications on the event bus
struct BusBridge {
    event_bus: Arc<EventBus>,
}

impl SelectionSubscriber for BusBridge {
    fn on_submission_opened(&self, context: &SelectionContext) {
        self.event_bus.publish(bus_events::SubmissionOpened {
            position: context.position,
            submission_id: context.summary.id,
            points: context.summary.points,
            max_points: context.summary.max_points,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use av_data::parse_recording;

    const BUILDHEAP_FILE: &str = r#"{
        "application": "JSAV Inspector",
        "version": 1,
        "metadata": {
            "type": "buildheap",
            "course_code": "CS-A1141",
            "course_name": "Data Structures and Algorithms",
            "year": 2016,
            "longname": "Build-heap exercise",
            "id": 1600
        },
        "submissions": [
            {
                "id": 1034,
                "points": 7,
                "max_points": 10,
                "recording": [
                    { "ind": [ { "v": 98 }, { "v": 16 }, { "v": 97 } ] },
                    { "ind": [ { "v": 97 }, { "v": 16 }, { "v": 98 } ] }
                ]
            },
            {
                "id": 17,
                "points": 10,
                "max_points": 10,
                "recording": [
                    { "ind": [ { "v": 1 }, { "v": 2 }, { "v": 3 } ] }
                ]
            }
        ]
    }"#;

    fn viewer_with_fixture() -> Viewer {
        let viewer = Viewer::new();
        viewer.install(parse_recording(BUILDHEAP_FILE).unwrap());
        viewer
    }

    #[test]
    fn test_install_opens_first_submission() {
        let viewer = viewer_with_fixture();
        assert_eq!(viewer.status_line().as_deref(), Some("score: 7/10 (70%)"));
        // One swap: initial display plus two phase boundaries
        assert_eq!(viewer.animation_position(), Some((0, 3)));
    }

    #[test]
    fn test_step_keys_move_the_cursor() {
        let viewer = viewer_with_fixture();

        let dispatch = viewer.handle_key(Key::Right);
        assert!(!dispatch.prevent_default);
        assert_eq!(viewer.animation_position(), Some((1, 3)));

        viewer.handle_key(Key::End);
        assert_eq!(viewer.animation_position(), Some((2, 3)));
        viewer.handle_key(Key::Home);
        assert_eq!(viewer.animation_position(), Some((0, 3)));
        viewer.handle_key(Key::Left);
        assert_eq!(viewer.animation_position(), Some((0, 3)));
    }

    #[test]
    fn test_submission_keys_navigate() {
        let viewer = viewer_with_fixture();

        let dispatch = viewer.handle_key(Key::Down);
        assert!(dispatch.prevent_default);
        assert_eq!(viewer.status_line().as_deref(), Some("score: 10/10 (100%)"));
        // The second submission records no swaps
        assert_eq!(viewer.animation_position(), Some((0, 1)));

        viewer.handle_key(Key::Up);
        assert_eq!(viewer.status_line().as_deref(), Some("score: 7/10 (70%)"));
    }

    #[test]
    fn test_number_field_resets_on_rejection() {
        let viewer = viewer_with_fixture();
        assert_eq!(viewer.submission_number_changed("2"), "2");
        for raw in ["0", "-1", "abc", "3"] {
            assert_eq!(viewer.submission_number_changed(raw), "2", "for input {raw:?}");
        }
    }

    #[test]
    fn test_id_field_resets_on_unknown_id() {
        let viewer = viewer_with_fixture();
        assert_eq!(viewer.submission_id_changed("17"), "17");
        assert_eq!(viewer.submission_id_changed("999"), "17");
        assert_eq!(viewer.submission_id_changed("not an id"), "17");
    }

    #[test]
    fn test_script_dump_contains_swap() {
        let viewer = viewer_with_fixture();
        let json = viewer.script_json().unwrap();
        assert!(json.contains("add_highlight"));
        assert!(json.contains("set_speed"));

        let steps = viewer.step_dump();
        assert_eq!(steps, vec!["[98 16 97]", "[97 16 98]"]);
    }

    #[test]
    fn test_recognised_kind_without_renderer_builds_no_script() {
        let text = BUILDHEAP_FILE.replace("buildheap", "quicksort");
        let viewer = Viewer::new();
        viewer.install(parse_recording(&text).unwrap());

        assert_eq!(viewer.status_line().as_deref(), Some("score: 7/10 (70%)"));
        assert_eq!(viewer.animation_position(), None);
    }

    #[test]
    fn test_empty_submissions() {
        let text = BUILDHEAP_FILE.replace(
            r#""submissions": ["#,
            r#""submissions_unused": [], "submissions": [ ] , "ignored": ["#,
        );
        let viewer = Viewer::new();
        viewer.install(parse_recording(&text).unwrap());

        assert_eq!(viewer.status_line(), None);
        assert_eq!(viewer.animation_position(), None);
        assert_eq!(viewer.submission_number_changed("1"), "1");
    }
}
