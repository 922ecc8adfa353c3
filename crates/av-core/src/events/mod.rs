use ahash::AHashMap;
use parking_lot::Mutex;
use std::sync::Arc;

/// System-wide event bus
pub struct EventBus {
    handlers: Arc<Mutex<AHashMap<std::any::TypeId, Vec<Box<dyn EventHandler>>>>>,
}

/// Event trait that all events must implement
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn std::any::Any;
}

/// Handler trait for event handlers
pub trait EventHandler: Send + Sync {
    fn handle(&mut self, event: &dyn Event);
}

/// Common system events
pub mod events {
    use super::Event;

    /// A recording file was loaded and validated
    #[derive(Debug, Clone)]
    pub struct RecordingLoaded {
        pub source_name: String,
        pub exercise_type: String,
        pub submission_count: usize,
    }

    /// A recording file was rejected
    #[derive(Debug, Clone)]
    pub struct RecordingRejected {
        pub source_name: String,
        pub reason: String,
    }

    /// A submission was opened by the selection controller
    #[derive(Debug, Clone)]
    pub struct SubmissionOpened {
        pub position: usize,
        pub submission_id: i64,
        pub points: f64,
        pub max_points: f64,
    }

    /// An animation script was built for the open submission
    #[derive(Debug, Clone)]
    pub struct AnimationBuilt {
        pub submission_id: i64,
        pub swap_count: usize,
    }

    // Implement Event trait for all event types
    macro_rules! impl_event {
        ($($t:ty),*) => {
            $(
                impl Event for $t {
                    fn as_any(&self) -> &dyn std::any::Any {
                        self
                    }
                }
            )*
        }
    }

    impl_event!(
        RecordingLoaded,
        RecordingRejected,
        SubmissionOpened,
        AnimationBuilt
    );
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(AHashMap::new())),
        }
    }

    /// Subscribe to events of a specific type
    pub fn subscribe<E: Event>(&self, handler: Box<dyn EventHandler>) {
        let type_id = std::any::TypeId::of::<E>();
        let mut handlers = self.handlers.lock();
        handlers.entry(type_id).or_insert_with(Vec::new).push(handler);
    }

    /// Publish an event
    pub fn publish<E: Event>(&self, event: E) {
        let type_id = std::any::TypeId::of::<E>();
        let mut handlers = self.handlers.lock();

        if let Some(event_handlers) = handlers.get_mut(&type_id) {
            for handler in event_handlers.iter_mut() {
                handler.handle(&event);
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper struct for creating event handlers from closures
pub struct ClosureEventHandler<F> {
    handler: F,
}

impl<F> EventHandler for ClosureEventHandler<F>
where
    F: FnMut(&dyn Event) + Send + Sync,
{
    fn handle(&mut self, event: &dyn Event) {
        (self.handler)(event);
    }
}

/// Create an event handler from a closure
pub fn handler_from_fn<F>(f: F) -> Box<dyn EventHandler>
where
    F: FnMut(&dyn Event) + Send + Sync + 'static,
{
    Box::new(ClosureEventHandler { handler: f })
}

#[cfg(test)]
mod tests {
    use super::events::SubmissionOpened;
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_publish_reaches_subscriber() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        bus.subscribe::<SubmissionOpened>(handler_from_fn(move |event| {
            if let Some(opened) = event.as_any().downcast_ref::<SubmissionOpened>() {
                sink.lock().push(opened.submission_id);
            }
        }));

        bus.publish(SubmissionOpened {
            position: 0,
            submission_id: 42,
            points: 7.0,
            max_points: 10.0,
        });

        assert_eq!(*seen.lock(), vec![42]);
    }
}
