//! Selection subscriber trait

use super::SelectionContext;

/// Trait for components that need to respond to an opened submission
pub trait SelectionSubscriber: Send + Sync {
    /// Called after a submission has been opened
    fn on_submission_opened(&self, context: &SelectionContext);
}
