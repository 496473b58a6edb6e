//! Document-level pointer listeners
//!
//! Behaviors that track the pointer anywhere in the window (not just over
//! one element) register listeners with an [`InputSource`]. The platform
//! feeds raw [`InputEvent`]s into an [`InputHub`], which fans them out.
//!
//! ```text
//! Platform Input (mouse moved, touch moved)
//!     ↓
//! InputHub (touch tracking, listener registry)
//!     ↓
//! PointerListener(position)
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use drift_core::Point;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::input::{InputEvent, MouseEvent, TouchEvent, TouchPoints};

new_key_type! {
    /// Handle to a registered pointer listener
    pub struct ListenerId;
}

/// Which move notifications a listener receives
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Mouse/pen pointer moves
    PointerMove,
    /// Touch moves, reported as the primary touch position
    TouchMove,
}

/// Callback receiving a pointer position in window coordinates
pub type PointerListener = Rc<dyn Fn(Point)>;

/// A document-wide source of pointer move notifications
pub trait InputSource {
    /// Register a listener and return the id needed to remove it
    fn add_listener(&self, kind: PointerKind, listener: PointerListener) -> ListenerId;

    /// Remove a listener. Returns false if it was not registered.
    fn remove_listener(&self, id: ListenerId) -> bool;
}

struct HubInner {
    listeners: SlotMap<ListenerId, (PointerKind, PointerListener)>,
    touches: TouchPoints,
}

/// Fans platform input out to document-level listeners
///
/// # Example
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use drift_core::Point;
/// use drift_platform::{InputEvent, InputHub, InputSource, MouseEvent, PointerKind};
///
/// let hub = InputHub::new();
/// let last: Rc<Cell<Option<Point>>> = Rc::new(Cell::new(None));
/// let sink = last.clone();
/// hub.add_listener(PointerKind::PointerMove, Rc::new(move |p| sink.set(Some(p))));
///
/// hub.dispatch(&InputEvent::Mouse(MouseEvent::Moved { x: 4.0, y: 2.0 }));
/// assert_eq!(last.get().map(|p| p.x), Some(4.0));
/// ```
pub struct InputHub {
    inner: RefCell<HubInner>,
}

impl Default for InputHub {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHub {
    pub fn new() -> Self {
        Self {
            inner: RefCell::new(HubInner {
                listeners: SlotMap::with_key(),
                touches: TouchPoints::new(),
            }),
        }
    }

    /// Route a platform input event to the matching listeners
    ///
    /// Returns the number of listeners notified. Listeners are collected
    /// before any is called, so a listener may add or remove listeners.
    pub fn dispatch(&self, event: &InputEvent) -> usize {
        let (kind, position) = match event {
            InputEvent::Mouse(MouseEvent::Moved { x, y }) => {
                (PointerKind::PointerMove, Point::new(*x, *y))
            }
            InputEvent::Touch(touch) => {
                let primary = self.inner.borrow_mut().touches.apply(touch);
                match (touch, primary) {
                    (TouchEvent::Moved { .. }, Some(position)) => (PointerKind::TouchMove, position),
                    _ => return 0,
                }
            }
            _ => return 0,
        };

        let targets: SmallVec<[PointerListener; 4]> = self
            .inner
            .borrow()
            .listeners
            .values()
            .filter(|(listener_kind, _)| *listener_kind == kind)
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in &targets {
            listener(position);
        }
        targets.len()
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Number of touches currently on the surface
    pub fn active_touches(&self) -> usize {
        self.inner.borrow().touches.len()
    }
}

impl InputSource for InputHub {
    fn add_listener(&self, kind: PointerKind, listener: PointerListener) -> ListenerId {
        self.inner.borrow_mut().listeners.insert((kind, listener))
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        self.inner.borrow_mut().listeners.remove(id).is_some()
    }
}

/// Listeners registered together and removed together
///
/// Holds exactly the ids it registered, so teardown always unregisters the
/// same listener instances that were registered. Dropping the set removes
/// everything still in it.
pub struct ListenerSet {
    source: Rc<dyn InputSource>,
    ids: SmallVec<[ListenerId; 2]>,
}

impl ListenerSet {
    pub fn new(source: Rc<dyn InputSource>) -> Self {
        Self {
            source,
            ids: SmallVec::new(),
        }
    }

    /// Register a listener and keep its id
    pub fn listen(&mut self, kind: PointerKind, listener: PointerListener) -> ListenerId {
        let id = self.source.add_listener(kind, listener);
        self.ids.push(id);
        id
    }

    /// Remove every listener this set registered
    pub fn clear(&mut self) {
        for id in self.ids.drain(..) {
            if !self.source.remove_listener(id) {
                tracing::debug!(?id, "listener was already removed from its source");
            }
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn recorder() -> (Rc<Cell<Option<Point>>>, PointerListener) {
        let slot = Rc::new(Cell::new(None));
        let sink = slot.clone();
        (slot, Rc::new(move |p| sink.set(Some(p))))
    }

    #[test]
    fn test_mouse_moves_reach_pointer_listeners_only() {
        let hub = InputHub::new();
        let (pointer, pointer_listener) = recorder();
        let (touch, touch_listener) = recorder();
        hub.add_listener(PointerKind::PointerMove, pointer_listener);
        hub.add_listener(PointerKind::TouchMove, touch_listener);

        let notified = hub.dispatch(&InputEvent::Mouse(MouseEvent::Moved { x: 3.0, y: 4.0 }));
        assert_eq!(notified, 1);
        assert_eq!(pointer.get(), Some(Point::new(3.0, 4.0)));
        assert_eq!(touch.get(), None);
    }

    #[test]
    fn test_touch_moves_report_primary_touch() {
        let hub = InputHub::new();
        let (touch, listener) = recorder();
        hub.add_listener(PointerKind::TouchMove, listener);

        hub.dispatch(&InputEvent::Touch(TouchEvent::Started {
            id: 1,
            x: 10.0,
            y: 20.0,
        }));
        hub.dispatch(&InputEvent::Touch(TouchEvent::Started {
            id: 2,
            x: 50.0,
            y: 60.0,
        }));
        assert_eq!(touch.get(), None);

        hub.dispatch(&InputEvent::Touch(TouchEvent::Moved {
            id: 2,
            x: 55.0,
            y: 65.0,
        }));
        assert_eq!(touch.get(), Some(Point::new(10.0, 20.0)));
        assert_eq!(hub.active_touches(), 2);
    }

    #[test]
    fn test_other_events_are_ignored() {
        let hub = InputHub::new();
        let (pointer, listener) = recorder();
        hub.add_listener(PointerKind::PointerMove, listener);

        assert_eq!(hub.dispatch(&InputEvent::Mouse(MouseEvent::Entered)), 0);
        assert_eq!(
            hub.dispatch(&InputEvent::Scroll {
                delta_x: 0.0,
                delta_y: 10.0,
                phase: Default::default(),
            }),
            0
        );
        assert_eq!(pointer.get(), None);
    }

    #[test]
    fn test_listener_set_removes_what_it_registered() {
        let hub = Rc::new(InputHub::new());
        let (_, other) = recorder();
        hub.add_listener(PointerKind::PointerMove, other);

        let mut set = ListenerSet::new(hub.clone());
        let (_, a) = recorder();
        let (_, b) = recorder();
        set.listen(PointerKind::PointerMove, a);
        set.listen(PointerKind::TouchMove, b);
        assert_eq!(hub.listener_count(), 3);

        set.clear();
        assert!(set.is_empty());
        assert_eq!(hub.listener_count(), 1);
    }

    #[test]
    fn test_listener_set_drop_unregisters() {
        let hub = Rc::new(InputHub::new());
        {
            let mut set = ListenerSet::new(hub.clone());
            let (_, listener) = recorder();
            set.listen(PointerKind::PointerMove, listener);
            assert_eq!(hub.listener_count(), 1);
        }
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn test_listener_may_unregister_during_dispatch() {
        let hub = Rc::new(InputHub::new());
        let id_slot: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));

        let hub_ref = Rc::downgrade(&hub);
        let slot = id_slot.clone();
        let id = hub.add_listener(
            PointerKind::PointerMove,
            Rc::new(move |_| {
                if let (Some(hub), Some(id)) = (hub_ref.upgrade(), slot.get()) {
                    hub.remove_listener(id);
                }
            }),
        );
        id_slot.set(Some(id));

        hub.dispatch(&InputEvent::Mouse(MouseEvent::Moved { x: 0.0, y: 0.0 }));
        assert_eq!(hub.listener_count(), 0);
    }
}
