//! Selection engine implementation

use super::{SelectionContext, SelectionSpec, SelectionState, SelectionSubscriber, SubmissionIndex, SubmissionSummary};
use parking_lot::RwLock;
use std::sync::{Arc, Weak};
use tracing::debug;

/// Selection state stored internally
#[derive(Debug, Clone, Default)]
struct EngineState {
    selection: SelectionState,
    index: SubmissionIndex,
    summaries: Vec<SubmissionSummary>,
}

/// The submission selection engine
///
/// Owns the current submission position and validates every transition
/// requested by the UI surface. Each successful transition notifies the
/// registered subscribers with the opened submission's context.
pub struct SelectionEngine {
    state: Arc<RwLock<EngineState>>,
    subscribers: Arc<RwLock<Vec<Weak<dyn SelectionSubscriber>>>>,
}

impl SelectionEngine {
    /// Create a new engine with no recording loaded
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(EngineState::default())),
            subscribers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Install the selection specification of a freshly loaded recording
    ///
    /// Resets the position to the first submission and opens it.
    pub fn update_spec(&self, spec: SelectionSpec) {
        let mut state = self.state.write();
        state.selection = SelectionState {
            position: 0,
            submission_count: spec.submission_count,
        };
        state.index = spec.index;
        state.summaries = spec.summaries;
        debug!(submissions = state.selection.submission_count, "selection spec installed");
        drop(state);

        self.notify_subscribers();
    }

    /// Move to the previous submission
    pub fn previous(&self) -> Result<(), String> {
        let mut state = self.state.write();
        if !state.selection.can_go_previous() {
            return Err("already at first submission".to_string());
        }
        state.selection.position -= 1;
        drop(state);

        self.notify_subscribers();
        Ok(())
    }

    /// Move to the next submission
    pub fn next(&self) -> Result<(), String> {
        let mut state = self.state.write();
        if !state.selection.can_go_next() {
            return Err("already at last submission".to_string());
        }
        state.selection.position += 1;
        drop(state);

        self.notify_subscribers();
        Ok(())
    }

    /// Jump to a 1-based submission number given as raw field input
    ///
    /// Only a digits-only string within `1..=count` is accepted. On
    /// rejection the state is left unchanged and the caller resets the
    /// visible field; no message is shown.
    pub fn jump_to_number(&self, raw: &str) -> Result<(), String> {
        if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("not a submission number: {raw:?}"));
        }
        let number: usize = raw
            .parse()
            .map_err(|_| format!("not a submission number: {raw:?}"))?;

        let mut state = self.state.write();
        let count = state.selection.submission_count;
        if number == 0 || number > count {
            return Err(format!("submission number {number} out of range (max: {count})"));
        }
        state.selection.position = number - 1;
        drop(state);

        self.notify_subscribers();
        Ok(())
    }

    /// Jump to the submission with the given id
    ///
    /// An id absent from the index leaves the state unchanged; the caller
    /// resets the visible field to the current submission's id.
    pub fn jump_to_id(&self, id: i64) -> Result<(), String> {
        let mut state = self.state.write();
        let position = state
            .index
            .position_of(id)
            .ok_or_else(|| format!("no submission with id {id}"))?;
        state.selection.position = position;
        drop(state);

        self.notify_subscribers();
        Ok(())
    }

    /// Get the current selection state
    pub fn selection(&self) -> SelectionState {
        self.state.read().selection
    }

    /// Get the context of the currently open submission
    ///
    /// `None` while no recording is loaded or the recording has no
    /// submissions.
    pub fn context(&self) -> Option<SelectionContext> {
        let state = self.state.read();
        let summary = *state.summaries.get(state.selection.position)?;
        Some(SelectionContext {
            position: state.selection.position,
            submission_count: state.selection.submission_count,
            summary,
        })
    }

    /// Add a subscriber
    pub fn add_subscriber(&self, subscriber: Arc<dyn SelectionSubscriber>) {
        let mut subscribers = self.subscribers.write();
        subscribers.push(Arc::downgrade(&subscriber));
    }

    /// Notify all subscribers that a submission was opened
    fn notify_subscribers(&self) {
        let Some(context) = self.context() else {
            return;
        };
        let mut subscribers = self.subscribers.write();

        // Remove any dead weak references
        subscribers.retain(|weak| weak.strong_count() > 0);

        for weak in subscribers.iter() {
            if let Some(subscriber) = weak.upgrade() {
                subscriber.on_submission_opened(&context);
            }
        }
    }
}

impl Default for SelectionEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn spec(ids: &[i64]) -> SelectionSpec {
        SelectionSpec {
            submission_count: ids.len(),
            index: SubmissionIndex::from_ordered_ids(ids.iter().copied()),
            summaries: ids
                .iter()
                .map(|&id| SubmissionSummary {
                    id,
                    points: 5.0,
                    max_points: 10.0,
                })
                .collect(),
        }
    }

    fn engine(ids: &[i64]) -> SelectionEngine {
        let engine = SelectionEngine::new();
        engine.update_spec(spec(ids));
        engine
    }

    #[test]
    fn test_previous_next_bounds() {
        let engine = engine(&[10, 20, 30]);
        assert!(engine.previous().is_err());

        assert!(engine.next().is_ok());
        assert!(engine.next().is_ok());
        assert_eq!(engine.selection().position, 2);
        assert!(engine.next().is_err());

        assert!(engine.previous().is_ok());
        assert_eq!(engine.selection().position, 1);
    }

    #[test]
    fn test_jump_to_number_rejects_bad_input() {
        let engine = engine(&[10, 20, 30]);
        engine.jump_to_number("2").unwrap();

        for raw in ["0", "-1", "abc", "4", "", "2.5"] {
            assert!(engine.jump_to_number(raw).is_err(), "accepted {raw:?}");
            assert_eq!(engine.selection().position, 1, "state changed for {raw:?}");
        }
    }

    #[test]
    fn test_jump_to_number_is_one_based() {
        let engine = engine(&[10, 20, 30]);
        engine.jump_to_number("1").unwrap();
        assert_eq!(engine.selection().position, 0);
        engine.jump_to_number("3").unwrap();
        assert_eq!(engine.selection().position, 2);
    }

    #[test]
    fn test_jump_to_id() {
        let engine = engine(&[1034, 17, 922]);
        engine.jump_to_id(922).unwrap();
        assert_eq!(engine.selection().position, 2);

        // Unknown id leaves the state unchanged
        assert!(engine.jump_to_id(5).is_err());
        assert_eq!(engine.selection().position, 2);
        assert_eq!(engine.context().unwrap().summary.id, 922);
    }

    #[test]
    fn test_empty_recording() {
        let engine = engine(&[]);
        assert!(engine.context().is_none());
        assert!(engine.previous().is_err());
        assert!(engine.next().is_err());
        assert!(engine.jump_to_number("1").is_err());
    }

    #[test]
    fn test_subscriber_notified_on_open() {
        struct Recorder(Mutex<Vec<usize>>);

        impl SelectionSubscriber for Recorder {
            fn on_submission_opened(&self, context: &SelectionContext) {
                self.0.lock().push(context.position);
            }
        }

        let engine = SelectionEngine::new();
        let recorder = Arc::new(Recorder(Mutex::new(Vec::new())));
        engine.add_subscriber(recorder.clone());

        engine.update_spec(spec(&[10, 20]));
        engine.next().unwrap();
        let _ = engine.next(); // rejected, must not notify

        assert_eq!(*recorder.0.lock(), vec![0, 1]);
    }
}
