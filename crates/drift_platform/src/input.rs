//! Input event types for mouse and touch

use drift_core::Point;
use smallvec::SmallVec;

/// Scroll gesture phase (for trackpad/touchpad scrolling)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScrollPhase {
    /// Scroll gesture starting (finger touched trackpad)
    Started,
    /// Scroll is in progress
    #[default]
    Moved,
    /// Scroll gesture ended (finger lifted, momentum may continue)
    Ended,
}

/// Input events
#[derive(Clone, Debug)]
pub enum InputEvent {
    /// Mouse event
    Mouse(MouseEvent),
    /// Touch event (mobile/touchscreen)
    Touch(TouchEvent),
    /// Scroll/wheel event
    Scroll {
        /// Horizontal scroll delta
        delta_x: f32,
        /// Vertical scroll delta
        delta_y: f32,
        /// Scroll phase (for trackpad gestures)
        phase: ScrollPhase,
    },
}

// ============================================================================
// Mouse Events
// ============================================================================

/// Mouse events
#[derive(Clone, Debug)]
pub enum MouseEvent {
    /// Mouse moved to position
    Moved {
        /// X position in window coordinates
        x: f32,
        /// Y position in window coordinates
        y: f32,
    },
    /// Mouse button pressed
    ButtonPressed {
        /// Which button was pressed
        button: MouseButton,
        /// X position when pressed
        x: f32,
        /// Y position when pressed
        y: f32,
    },
    /// Mouse button released
    ButtonReleased {
        /// Which button was released
        button: MouseButton,
        /// X position when released
        x: f32,
        /// Y position when released
        y: f32,
    },
    /// Mouse entered the window
    Entered,
    /// Mouse left the window
    Left,
}

/// Mouse buttons
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button (scroll wheel click)
    Middle,
    /// Other button with index
    Other(u16),
}

// ============================================================================
// Touch Events
// ============================================================================

/// Touch events for touchscreens
#[derive(Clone, Debug)]
pub enum TouchEvent {
    /// A touch started
    Started {
        /// Unique identifier for this touch
        id: u64,
        /// X position in window coordinates
        x: f32,
        /// Y position in window coordinates
        y: f32,
    },
    /// A touch moved
    Moved {
        /// Unique identifier for this touch
        id: u64,
        /// X position in window coordinates
        x: f32,
        /// Y position in window coordinates
        y: f32,
    },
    /// A touch ended
    Ended {
        /// Unique identifier for this touch
        id: u64,
        /// X position when ended
        x: f32,
        /// Y position when ended
        y: f32,
    },
    /// A touch was cancelled (e.g., by system gesture)
    Cancelled {
        /// Unique identifier for this touch
        id: u64,
    },
}

impl TouchEvent {
    /// Get the touch ID
    pub fn id(&self) -> u64 {
        match self {
            TouchEvent::Started { id, .. } => *id,
            TouchEvent::Moved { id, .. } => *id,
            TouchEvent::Ended { id, .. } => *id,
            TouchEvent::Cancelled { id } => *id,
        }
    }

    /// Get the position (returns None for Cancelled)
    pub fn position(&self) -> Option<Point> {
        match self {
            TouchEvent::Started { x, y, .. } => Some(Point::new(*x, *y)),
            TouchEvent::Moved { x, y, .. } => Some(Point::new(*x, *y)),
            TouchEvent::Ended { x, y, .. } => Some(Point::new(*x, *y)),
            TouchEvent::Cancelled { .. } => None,
        }
    }
}

// ============================================================================
// Active Touch Tracking
// ============================================================================

/// The set of touches currently on the surface, in the order they started
///
/// The first entry is the primary touch. Move notifications report the
/// primary touch's position no matter which finger moved.
#[derive(Clone, Debug, Default)]
pub struct TouchPoints {
    active: SmallVec<[(u64, Point); 4]>,
}

impl TouchPoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a touch event and return the primary touch position afterwards
    pub fn apply(&mut self, event: &TouchEvent) -> Option<Point> {
        match *event {
            TouchEvent::Started { id, x, y } | TouchEvent::Moved { id, x, y } => {
                let position = Point::new(x, y);
                match self.active.iter_mut().find(|(touch, _)| *touch == id) {
                    Some(entry) => entry.1 = position,
                    // A move without a start still counts as an active touch
                    None => self.active.push((id, position)),
                }
            }
            TouchEvent::Ended { id, .. } | TouchEvent::Cancelled { id } => {
                self.active.retain(|(touch, _)| *touch != id);
            }
        }
        self.primary()
    }

    /// Position of the earliest-started touch still active
    pub fn primary(&self) -> Option<Point> {
        self.active.first().map(|(_, position)| *position)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}
