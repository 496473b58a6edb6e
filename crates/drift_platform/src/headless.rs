//! Headless event loop
//!
//! Replays a recorded sequence of platform events. Used to drive behaviors
//! without a window, e.g. from the command line or from tests.

use std::collections::VecDeque;

use crate::error::PlatformError;
use crate::event::{ControlFlow, Event, EventLoop, LifecycleEvent};

/// An event loop fed from a pre-recorded script
#[derive(Clone, Debug)]
pub struct HeadlessEventLoop<T = ()> {
    events: VecDeque<Event<T>>,
}

impl<T> Default for HeadlessEventLoop<T> {
    fn default() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }
}

impl HeadlessEventLoop {
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self::with_user_events(events)
    }
}

impl<T> HeadlessEventLoop<T> {
    /// Create a loop whose script also carries application events
    pub fn with_user_events(events: impl IntoIterator<Item = Event<T>>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Append an event to the end of the script
    pub fn push(&mut self, event: Event<T>) {
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<T> EventLoop for HeadlessEventLoop<T> {
    type UserEvent = T;

    /// Deliver every scripted event in order
    ///
    /// Frames scripted while suspended are not delivered, the same way a
    /// backgrounded window stops producing frames.
    fn run<F>(mut self, mut handler: F) -> Result<(), PlatformError>
    where
        F: FnMut(Event<T>) -> ControlFlow,
    {
        let mut suspended = false;
        let mut skipped_frames = 0usize;

        while let Some(event) = self.events.pop_front() {
            match &event {
                Event::Lifecycle(LifecycleEvent::Suspended) => suspended = true,
                Event::Lifecycle(LifecycleEvent::Resumed) => suspended = false,
                Event::Frame if suspended => {
                    skipped_frames += 1;
                    continue;
                }
                _ => {}
            }

            if handler(event) == ControlFlow::Exit {
                tracing::debug!(remaining = self.events.len(), "headless loop exited early");
                return Ok(());
            }
        }

        if skipped_frames > 0 {
            tracing::debug!(skipped_frames, "frames withheld while suspended");
        }
        Ok(())
    }
}
