//! Event loop and platform events

use crate::error::PlatformError;
use crate::input::InputEvent;

/// Event loop abstraction
///
/// Platform-specific event loops implement this trait to provide
/// a unified interface for driving Drift behaviors.
pub trait EventLoop {
    /// Application-defined events carried alongside platform events
    type UserEvent;

    /// Run the event loop
    ///
    /// This method blocks until the application exits. The handler
    /// function is called for each event, and should return a
    /// `ControlFlow` to indicate whether to continue or exit.
    fn run<F>(self, handler: F) -> Result<(), PlatformError>
    where
        F: FnMut(Event<Self::UserEvent>) -> ControlFlow;
}

/// Control flow after handling an event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlFlow {
    /// Continue running the event loop
    #[default]
    Continue,
    /// Exit the event loop
    Exit,
}

/// Platform events
#[derive(Clone, Debug)]
pub enum Event<T = ()> {
    /// Input event (mouse, touch, wheel)
    Input(InputEvent),
    /// Application lifecycle event
    Lifecycle(LifecycleEvent),
    /// Frame tick - time to render
    ///
    /// Sent once per displayed frame. No frames arrive while the
    /// application is suspended.
    Frame,
    /// Application-defined event, delivered in order with platform events
    User(T),
}

/// Application lifecycle events
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Application resumed (came to foreground)
    Resumed,
    /// Application suspended (went to background)
    Suspended,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_flow_default() {
        assert_eq!(ControlFlow::default(), ControlFlow::Continue);
    }
}
