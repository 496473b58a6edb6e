//! Per-frame control loop
//!
//! A [`FrameLoop`] calls its step once per frame until the step breaks or
//! the loop is stopped. Each frame requests the next one only after the step
//! returns, so the loop never recurses and never has more than one frame
//! outstanding.
//!
//! ```rust
//! use std::ops::ControlFlow;
//! use std::rc::Rc;
//! use drift_animation::{FrameClock, FrameLoop};
//!
//! let clock = FrameClock::new();
//! let mut remaining = 3;
//! let frames = FrameLoop::start(Rc::new(clock.handle()), move |_| {
//!     remaining -= 1;
//!     if remaining == 0 {
//!         ControlFlow::Break(())
//!     } else {
//!         ControlFlow::Continue(())
//!     }
//! });
//!
//! let mut steps = 0;
//! while clock.tick() > 0 {
//!     steps += 1;
//! }
//! assert_eq!(steps, 3);
//! assert!(!frames.is_running());
//! ```

use std::cell::{Cell, RefCell};
use std::ops::ControlFlow;
use std::rc::Rc;

use crate::scheduler::{FrameHandle, FrameScheduler, FrameTime};

type StepFn = Box<dyn FnMut(FrameTime) -> ControlFlow<()>>;

struct LoopState {
    scheduler: Rc<dyn FrameScheduler>,
    /// The one outstanding frame, if any
    handle: Cell<Option<FrameHandle>>,
    running: Cell<bool>,
    step: RefCell<StepFn>,
}

impl LoopState {
    fn request_next(state: &Rc<LoopState>) {
        let weak = Rc::downgrade(state);
        let requested = state.scheduler.request_frame(Box::new(move |time| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            state.handle.set(None);
            if !state.running.get() {
                return;
            }

            let flow = {
                let mut step = state.step.borrow_mut();
                (*step)(time)
            };
            if flow.is_break() {
                state.running.set(false);
            }

            // The step may have stopped the loop; never reschedule past a stop
            if state.running.get() {
                LoopState::request_next(&state);
            }
        }));

        match requested {
            Some(handle) => state.handle.set(Some(handle)),
            None => {
                tracing::debug!("frame scheduler is gone, frame loop stopping");
                state.running.set(false);
            }
        }
    }
}

/// An explicit loop bound to a frame scheduler
///
/// Dropping the loop stops it.
pub struct FrameLoop {
    state: Rc<LoopState>,
}

impl FrameLoop {
    /// Start calling `step` once per frame, beginning with the next frame
    pub fn start<F>(scheduler: Rc<dyn FrameScheduler>, step: F) -> Self
    where
        F: FnMut(FrameTime) -> ControlFlow<()> + 'static,
    {
        let state = Rc::new(LoopState {
            scheduler,
            handle: Cell::new(None),
            running: Cell::new(true),
            step: RefCell::new(Box::new(step)),
        });
        LoopState::request_next(&state);
        Self { state }
    }

    /// Stop the loop and cancel its outstanding frame
    ///
    /// Safe to call from inside the step: the frame in flight finishes but
    /// does not schedule another.
    pub fn stop(&self) {
        self.state.running.set(false);
        if let Some(handle) = self.state.handle.take() {
            self.state.scheduler.cancel_frame(handle);
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.running.get()
    }

    /// The currently outstanding frame request
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.state.handle.get()
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
