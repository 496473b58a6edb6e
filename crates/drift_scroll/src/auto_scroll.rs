//! Edge auto-scroll controller
//!
//! While enabled, [`AutoScroll`] tracks the pointer document-wide and, once
//! per display frame, scrolls the subject's scroll parent when the pointer
//! sits in one of its edge gutters.
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──enable──▶ Armed ──disable / drop──▶ Idle
//! ```
//!
//! - **Idle**: no listeners, no frame requested
//! - **Armed**: pointer and touch move listeners registered, one frame
//!   outstanding at all times
//!
//! Disarming cancels the outstanding frame, forgets the pointer and removes
//! the listeners. Nothing carries over into the next Armed period except
//! the resolved scroll target.
//!
//! # Stale bounds
//!
//! The container's bounding rectangle is captured once, when the subject is
//! resolved, and is not refreshed on resize or scroll. Gutters stay where
//! they were when the target was bound.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::ops::ControlFlow;
use std::rc::{Rc, Weak};

use drift_animation::{FrameHandle, FrameLoop, FrameScheduler, FrameTime};
use drift_core::{Point, Rect, ScrollContainer, ScrollResolver, Vec2};
use drift_platform::{InputSource, ListenerSet, PointerKind};

use crate::config::AutoScrollConfig;
use crate::gutter::{corrected_offset, Gutter};

/// Callback notified with the pointer position that triggered a scroll
pub type ScrollCallback = Rc<dyn Fn(f32, f32)>;

/// What a single frame of the loop did
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutcome {
    /// No scroll target or no pointer position yet
    Waiting,
    /// The pointer is outside every gutter
    Outside,
    /// The container was scrolled
    Scrolled {
        /// Pointer position that triggered the scroll
        pointer: Point,
        /// Unrounded, unclamped delta
        delta: Vec2,
        /// Offset written to the container
        offset: Point,
    },
}

/// The resolved scroll parent and its bounds at resolution time
struct Binding {
    container: Rc<dyn ScrollContainer>,
    bounds: Rect,
}

/// State shared between the controller, its listeners and its frame loop
struct Shared {
    binding: RefCell<Option<Binding>>,
    pointer: Cell<Option<Point>>,
    size: Cell<f32>,
    intensity: Cell<f32>,
    on_scroll: RefCell<Option<ScrollCallback>>,
    active: Cell<bool>,
    last_frame: Cell<Option<FrameOutcome>>,
}

impl Shared {
    fn run_frame(&self) -> FrameOutcome {
        let Some(pointer) = self.pointer.get() else {
            return FrameOutcome::Waiting;
        };
        let Some((container, bounds)) = self
            .binding
            .borrow()
            .as_ref()
            .map(|binding| (Rc::clone(&binding.container), binding.bounds))
        else {
            return FrameOutcome::Waiting;
        };

        let gutter = Gutter::new(bounds, self.size.get());
        if gutter.hit(pointer).is_empty() {
            return FrameOutcome::Outside;
        }
        let delta = gutter.velocity(pointer, self.intensity.get());

        if !self.active.get() {
            return FrameOutcome::Outside;
        }
        let offset = corrected_offset(container.scroll_offset(), delta, container.scroll_size());
        container.set_scroll_offset(offset);

        let callback = self.on_scroll.borrow().clone();
        if let Some(callback) = callback {
            callback(pointer.x, pointer.y);
        }

        FrameOutcome::Scrolled {
            pointer,
            delta,
            offset,
        }
    }
}

/// Registrations that exist only while armed
struct Armed {
    frames: FrameLoop,
    listeners: ListenerSet,
}

/// Scrolls a container while the pointer is in one of its edge gutters
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use drift_animation::FrameClock;
/// use drift_core::{Rect, Size};
/// use drift_layout::{ElementStyle, ElementTree};
/// use drift_platform::{InputEvent, InputHub, MouseEvent};
/// use drift_scroll::{AutoScroll, AutoScrollConfig};
///
/// let tree = ElementTree::new(Size::new(1280.0, 720.0));
/// let list = tree.add_element(
///     tree.root(),
///     ElementStyle::scroll(Rect::new(0.0, 0.0, 500.0, 300.0), Size::new(2000.0, 1200.0)),
/// );
/// let card = tree.add_element(list, ElementStyle::new(Rect::new(10.0, 10.0, 100.0, 40.0)));
///
/// let clock = FrameClock::new();
/// let hub = Rc::new(InputHub::new());
/// let mut auto_scroll = AutoScroll::new(tree.clone(), Rc::new(clock.handle()), hub.clone())
///     .with_config(AutoScrollConfig::enabled());
/// auto_scroll.set_reference(Some(card));
///
/// hub.dispatch(&InputEvent::Mouse(MouseEvent::Moved { x: 520.0, y: 150.0 }));
/// clock.tick();
///
/// assert_eq!(tree.scroll_offset(list).map(|p| p.x), Some(14.0));
/// ```
pub struct AutoScroll<R: ScrollResolver> {
    resolver: R,
    scheduler: Rc<dyn FrameScheduler>,
    input: Rc<dyn InputSource>,
    reference: Option<R::Element>,
    enabled: bool,
    shared: Rc<Shared>,
    armed: Option<Armed>,
}

impl<R: ScrollResolver> AutoScroll<R> {
    /// Create an idle controller with the default configuration
    pub fn new(resolver: R, scheduler: Rc<dyn FrameScheduler>, input: Rc<dyn InputSource>) -> Self {
        let defaults = AutoScrollConfig::default();
        Self {
            resolver,
            scheduler,
            input,
            reference: None,
            enabled: false,
            shared: Rc::new(Shared {
                binding: RefCell::new(None),
                pointer: Cell::new(None),
                size: Cell::new(defaults.size),
                intensity: Cell::new(defaults.intensity),
                on_scroll: RefCell::new(None),
                active: Cell::new(false),
                last_frame: Cell::new(None),
            }),
            armed: None,
        }
    }

    pub fn with_config(mut self, config: AutoScrollConfig) -> Self {
        self.set_config(config);
        self
    }

    /// Apply a full configuration, arming or disarming as needed
    pub fn set_config(&mut self, config: AutoScrollConfig) {
        self.set_size(config.size);
        self.set_intensity(config.intensity);
        self.set_enabled(config.enabled);
    }

    pub fn config(&self) -> AutoScrollConfig {
        AutoScrollConfig {
            enabled: self.enabled,
            size: self.shared.size.get(),
            intensity: self.shared.intensity.get(),
        }
    }

    /// Arm on `true`, disarm on `false`. Repeating the current state is a no-op.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled == self.enabled {
            return;
        }
        self.enabled = enabled;
        if enabled {
            self.arm();
        } else {
            self.disarm();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Gutter width; takes effect from the next frame
    pub fn set_size(&mut self, size: f32) {
        self.shared.size.set(size);
    }

    /// Speed scale factor; takes effect from the next frame
    pub fn set_intensity(&mut self, intensity: f32) {
        self.shared.intensity.set(intensity);
    }

    /// Be notified with the pointer position on every frame that scrolls
    pub fn on_scroll<F>(&mut self, callback: F)
    where
        F: Fn(f32, f32) + 'static,
    {
        *self.shared.on_scroll.borrow_mut() = Some(Rc::new(callback));
    }

    pub fn clear_on_scroll(&mut self) {
        self.shared.on_scroll.borrow_mut().take();
    }

    /// Point the controller at a subject element
    ///
    /// A new element re-resolves the scroll parent and captures its bounds.
    /// Passing the current element again does nothing. Passing `None` keeps
    /// the previously resolved target.
    pub fn set_reference(&mut self, reference: Option<R::Element>) {
        if reference == self.reference {
            return;
        }
        self.reference = reference;

        let Some(element) = self.reference.as_ref() else {
            return;
        };
        let container = self.resolver.resolve(element);
        let bounds = container.bounds();
        tracing::debug!(?bounds, "auto-scroll target bound");
        *self.shared.binding.borrow_mut() = Some(Binding { container, bounds });
    }

    pub fn reference(&self) -> Option<&R::Element> {
        self.reference.as_ref()
    }

    /// Bounds captured when the current target was resolved
    pub fn target_bounds(&self) -> Option<Rect> {
        self.shared
            .binding
            .borrow()
            .as_ref()
            .map(|binding| binding.bounds)
    }

    /// Whether listeners are registered and a frame loop is running
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Last pointer position seen while armed
    pub fn pointer(&self) -> Option<Point> {
        self.shared.pointer.get()
    }

    /// The frame request currently outstanding, if armed
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.armed
            .as_ref()
            .and_then(|armed| armed.frames.pending_frame())
    }

    /// What the most recent frame did
    pub fn last_frame(&self) -> Option<FrameOutcome> {
        self.shared.last_frame.get()
    }

    fn arm(&mut self) {
        if self.armed.is_some() {
            return;
        }
        self.shared.active.set(true);

        let mut listeners = ListenerSet::new(Rc::clone(&self.input));
        for kind in [PointerKind::PointerMove, PointerKind::TouchMove] {
            let shared = Rc::downgrade(&self.shared);
            listeners.listen(
                kind,
                Rc::new(move |position| {
                    if let Some(shared) = shared.upgrade() {
                        if shared.active.get() {
                            shared.pointer.set(Some(position));
                        }
                    }
                }),
            );
        }

        let frames = FrameLoop::start(Rc::clone(&self.scheduler), frame_step(&self.shared));

        self.armed = Some(Armed { frames, listeners });
        tracing::debug!("auto-scroll armed");
    }

    fn disarm(&mut self) {
        let Some(mut armed) = self.armed.take() else {
            return;
        };
        self.shared.active.set(false);
        armed.frames.stop();
        self.shared.pointer.set(None);
        armed.listeners.clear();
        tracing::debug!("auto-scroll disarmed");
    }
}

fn frame_step(shared: &Rc<Shared>) -> impl FnMut(FrameTime) -> ControlFlow<()> {
    let shared: Weak<Shared> = Rc::downgrade(shared);
    move |time| {
        let Some(shared) = shared.upgrade() else {
            return ControlFlow::Break(());
        };
        if !shared.active.get() {
            return ControlFlow::Break(());
        }

        let outcome = shared.run_frame();
        if let FrameOutcome::Scrolled { delta, offset, .. } = outcome {
            tracing::trace!(frame = time.frame, ?delta, ?offset, "auto-scrolled");
        }
        shared.last_frame.set(Some(outcome));
        ControlFlow::Continue(())
    }
}

impl<R: ScrollResolver> Drop for AutoScroll<R> {
    fn drop(&mut self) {
        self.disarm();
    }
}

impl<R: ScrollResolver> fmt::Debug for AutoScroll<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoScroll")
            .field("config", &self.config())
            .field("armed", &self.is_armed())
            .field("pointer", &self.pointer())
            .field("target_bounds", &self.target_bounds())
            .finish()
    }
}
