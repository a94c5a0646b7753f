//! Observer dispatch.

use tracing::debug;

use crate::decode::RawEvent;
use crate::error::Result;
use crate::event::Event;
use crate::mask::EventMask;
use crate::registry::WatchRegistry;

/// What an observer asks the session to do after seeing an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Keep delivering events.
    Continue,
    /// End the session. Observers after the stopping one are not invoked
    /// for this event, and no later event is delivered.
    Stop,
}

/// An observer callback.
///
/// Runs synchronously on the listen thread, so it must not block: a stalled
/// observer stalls delivery of every later event.
pub type Observer = Box<dyn FnMut(&Event) -> DispatchOutcome>;

/// Invokes subscribed observers in registration order.
#[derive(Default)]
pub struct Dispatcher {
    observers: Vec<Observer>,
}

impl Dispatcher {
    /// Create a dispatcher with no observers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observer. Observers run in the order they were connected.
    pub fn connect<F>(&mut self, observer: F)
    where
        F: FnMut(&Event) -> DispatchOutcome + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Number of connected observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Resolve one raw record against the registry and deliver it.
    ///
    /// Queue-overflow records carry no usable descriptor and are delivered
    /// with an empty path so callers can notice that events were dropped.
    /// For everything else a registry miss surfaces as `UnknownWatch`; the
    /// caller decides whether the session continues.
    pub fn dispatch(&mut self, registry: &WatchRegistry, raw: RawEvent) -> Result<DispatchOutcome> {
        let event = if raw.mask.contains(EventMask::Q_OVERFLOW) {
            Event::unresolved(raw)
        } else {
            let watched = registry.resolve(raw.wd)?;
            Event::resolved(raw, watched)
        };

        for observer in &mut self.observers {
            if observer(&event) == DispatchOutcome::Stop {
                debug!("observer requested stop at {}", event.path.display());
                return Ok(DispatchOutcome::Stop);
            }
        }

        Ok(DispatchOutcome::Continue)
    }
}
