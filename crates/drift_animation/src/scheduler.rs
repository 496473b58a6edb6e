//! Frame scheduler
//!
//! Hosts call [`FrameClock::tick`] once per rendered frame. Everything that
//! requested a frame before the tick started gets called back exactly once.
//! When the host stops rendering (minimized, backgrounded) it stops ticking,
//! and every frame-driven behavior pauses with it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a pending frame callback
    pub struct FrameHandle;
}

/// Timing information passed to frame callbacks
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTime {
    /// Sequence number of the frame, starting at 1
    pub frame: u64,
    /// Time since the previous frame (zero for the first)
    pub delta: Duration,
}

/// One-shot callback run on the next frame
pub type FrameCallback = Box<dyn FnOnce(FrameTime)>;

/// Requests callbacks on the next display frame
pub trait FrameScheduler {
    /// Run `callback` once on the next frame
    ///
    /// Returns `None` if the scheduler no longer exists; the callback is
    /// dropped without running.
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameHandle>;

    /// Cancel a pending callback. Returns false if it already ran or was
    /// never pending.
    fn cancel_frame(&self, handle: FrameHandle) -> bool;
}

/// Internal state of the frame clock
struct ClockInner {
    pending: SlotMap<FrameHandle, FrameCallback>,
    /// Request order, since slot keys are reused
    order: Vec<FrameHandle>,
    frame: u64,
    last_frame: Option<Instant>,
    target_fps: u32,
}

/// A single-threaded frame scheduler driven by the host's render loop
///
/// Shared via [`FrameClockHandle`], which holds a weak reference so
/// behaviors never keep the clock alive.
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use drift_animation::{FrameClock, FrameScheduler};
///
/// let clock = FrameClock::new();
/// let ran = Rc::new(Cell::new(false));
/// let flag = ran.clone();
/// clock.handle().request_frame(Box::new(move |_| flag.set(true)));
///
/// assert_eq!(clock.tick(), 1);
/// assert!(ran.get());
/// ```
pub struct FrameClock {
    inner: Rc<RefCell<ClockInner>>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ClockInner {
                pending: SlotMap::with_key(),
                order: Vec::new(),
                frame: 0,
                last_frame: None,
                target_fps: 60,
            })),
        }
    }

    /// Get a weak handle for requesting frames
    pub fn handle(&self) -> FrameClockHandle {
        FrameClockHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Set the frame rate the host intends to tick at
    pub fn set_target_fps(&self, fps: u32) {
        self.inner.borrow_mut().target_fps = fps.max(1);
    }

    /// Expected time between ticks at the target frame rate
    pub fn frame_interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.inner.borrow().target_fps))
    }

    /// Run one frame at the current time
    ///
    /// Returns the number of callbacks that ran.
    pub fn tick(&self) -> usize {
        self.tick_at(Instant::now())
    }

    /// Run one frame with an explicit timestamp
    ///
    /// Only callbacks pending when the tick starts run. Callbacks requested
    /// while the frame runs wait for the next tick. Callbacks canceled
    /// during the frame before their turn do not run.
    pub fn tick_at(&self, now: Instant) -> usize {
        let (batch, time) = {
            let mut inner = self.inner.borrow_mut();
            let delta = inner
                .last_frame
                .map(|last| now.saturating_duration_since(last))
                .unwrap_or_default();
            inner.last_frame = Some(now);
            inner.frame += 1;
            let time = FrameTime {
                frame: inner.frame,
                delta,
            };
            (std::mem::take(&mut inner.order), time)
        };

        let mut ran = 0;
        for handle in batch {
            // Borrow released before the callback runs so it can request or cancel frames
            let callback = self.inner.borrow_mut().pending.remove(handle);
            if let Some(callback) = callback {
                callback(time);
                ran += 1;
            }
        }

        tracing::trace!(frame = time.frame, ran, "frame ticked");
        ran
    }

    /// Number of callbacks waiting for the next frame
    pub fn pending_count(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Check if any callback is waiting for a frame
    pub fn has_pending(&self) -> bool {
        self.pending_count() > 0
    }

    /// Number of frames ticked so far
    pub fn frame_count(&self) -> u64 {
        self.inner.borrow().frame
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler for FrameClock {
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameHandle> {
        let mut inner = self.inner.borrow_mut();
        let handle = inner.pending.insert(callback);
        inner.order.push(handle);
        Some(handle)
    }

    fn cancel_frame(&self, handle: FrameHandle) -> bool {
        let mut inner = self.inner.borrow_mut();
        let removed = inner.pending.remove(handle).is_some();
        if removed {
            inner.order.retain(|pending| *pending != handle);
        }
        removed
    }
}

/// Weak handle to a [`FrameClock`]
#[derive(Clone)]
pub struct FrameClockHandle {
    inner: Weak<RefCell<ClockInner>>,
}

impl FrameClockHandle {
    /// Check if the clock is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl FrameScheduler for FrameClockHandle {
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameHandle> {
        let inner = self.inner.upgrade()?;
        FrameClock { inner }.request_frame(callback)
    }

    fn cancel_frame(&self, handle: FrameHandle) -> bool {
        self.inner
            .upgrade()
            .map(|inner| FrameClock { inner }.cancel_frame(handle))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter(clock: &FrameClock, hits: &Rc<Cell<u32>>) -> FrameHandle {
        let hits = hits.clone();
        clock
            .request_frame(Box::new(move |_| hits.set(hits.get() + 1)))
            .unwrap()
    }

    #[test]
    fn test_callbacks_run_once() {
        let clock = FrameClock::new();
        let hits = Rc::new(Cell::new(0));
        counter(&clock, &hits);

        assert_eq!(clock.tick(), 1);
        assert_eq!(clock.tick(), 0);
        assert_eq!(hits.get(), 1);
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn test_cancel_before_tick() {
        let clock = FrameClock::new();
        let hits = Rc::new(Cell::new(0));
        let handle = counter(&clock, &hits);

        assert!(clock.cancel_frame(handle));
        assert!(!clock.cancel_frame(handle));
        assert_eq!(clock.tick(), 0);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_requests_during_tick_wait_for_next_frame() {
        let clock = Rc::new(FrameClock::new());
        let frames = Rc::new(RefCell::new(Vec::new()));

        let handle = clock.handle();
        let seen = frames.clone();
        clock.request_frame(Box::new(move |time| {
            seen.borrow_mut().push(time.frame);
            let seen = seen.clone();
            handle.request_frame(Box::new(move |time| seen.borrow_mut().push(time.frame)));
        }));

        assert_eq!(clock.tick(), 1);
        assert!(clock.has_pending());
        assert_eq!(clock.tick(), 1);
        assert_eq!(*frames.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_cancel_during_tick_skips_later_callback() {
        let clock = FrameClock::new();
        let hits = Rc::new(Cell::new(0));

        let victim: Rc<Cell<Option<FrameHandle>>> = Rc::new(Cell::new(None));
        let handle = clock.handle();
        let target = victim.clone();
        clock.request_frame(Box::new(move |_| {
            if let Some(victim) = target.get() {
                assert!(handle.cancel_frame(victim));
            }
        }));
        victim.set(Some(counter(&clock, &hits)));

        assert_eq!(clock.tick(), 1);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_callbacks_run_in_request_order() {
        let clock = FrameClock::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for i in 0..3 {
            let order = order.clone();
            clock.request_frame(Box::new(move |_| order.borrow_mut().push(i)));
        }
        clock.tick();
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_frame_delta() {
        let clock = FrameClock::new();
        let deltas = Rc::new(RefCell::new(Vec::new()));
        let start = Instant::now();

        for _ in 0..2 {
            let deltas = deltas.clone();
            clock.request_frame(Box::new(move |time| deltas.borrow_mut().push(time.delta)));
        }
        clock.tick_at(start);

        let sink = deltas.clone();
        clock.request_frame(Box::new(move |time| sink.borrow_mut().push(time.delta)));
        clock.tick_at(start + Duration::from_millis(16));

        assert_eq!(
            *deltas.borrow(),
            vec![Duration::ZERO, Duration::ZERO, Duration::from_millis(16)]
        );
    }

    #[test]
    fn test_handle_weak_reference() {
        let clock = FrameClock::new();
        let handle = clock.handle();
        assert!(handle.is_alive());

        drop(clock);
        assert!(!handle.is_alive());
        assert!(handle.request_frame(Box::new(|_| {})).is_none());
    }

    #[test]
    fn test_frame_interval() {
        let clock = FrameClock::new();
        clock.set_target_fps(120);
        assert_eq!(clock.frame_interval(), Duration::from_micros(8333));
        clock.set_target_fps(0);
        assert_eq!(clock.frame_interval(), Duration::from_secs(1));
    }
}
