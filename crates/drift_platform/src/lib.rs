//! Drift Platform Layer
//!
//! Platform-agnostic input and event-loop types, plus the document-level
//! listener registry pointer-tracking behaviors subscribe to.
//!
//! # Architecture
//!
//! - [`InputEvent`] - Raw mouse, touch and wheel input from the platform
//! - [`InputSource`] - Document-wide pointer move subscriptions
//! - [`InputHub`] - The concrete source a platform feeds events into
//! - [`ListenerSet`] - Registrations scoped to one owner, removed together
//! - [`EventLoop`] - Drives a handler with platform [`Event`]s
//!
//! # Example
//!
//! ```rust
//! use drift_platform::*;
//!
//! let script = vec![
//!     Event::Input(InputEvent::Mouse(MouseEvent::Moved { x: 10.0, y: 20.0 })),
//!     Event::Frame,
//! ];
//! let hub = InputHub::new();
//!
//! HeadlessEventLoop::new(script)
//!     .run(|event| {
//!         if let Event::Input(input) = &event {
//!             hub.dispatch(input);
//!         }
//!         ControlFlow::Continue
//!     })
//!     .unwrap();
//! ```

mod error;
mod event;
mod headless;
mod input;
mod source;

// Re-export all public types
pub use error::{PlatformError, Result};
pub use event::{ControlFlow, Event, EventLoop, LifecycleEvent};
pub use headless::HeadlessEventLoop;
pub use input::{InputEvent, MouseButton, MouseEvent, ScrollPhase, TouchEvent, TouchPoints};
pub use source::{InputHub, InputSource, ListenerId, ListenerSet, PointerKind, PointerListener};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{PlatformError, Result};
    pub use crate::event::{ControlFlow, Event, EventLoop, LifecycleEvent};
    pub use crate::headless::HeadlessEventLoop;
    pub use crate::input::{InputEvent, MouseButton, MouseEvent, TouchEvent};
    pub use crate::source::{InputHub, InputSource, ListenerSet, PointerKind};
}
