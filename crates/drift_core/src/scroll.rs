//! Scroll container seams
//!
//! A scroll loop never walks the element hierarchy itself. It asks a
//! [`ScrollResolver`] for the nearest scrollable ancestor of a subject and
//! then talks to the returned [`ScrollContainer`] only.

use std::rc::Rc;

use crate::geometry::{Point, Rect, Size};

/// An element whose content can be scrolled
///
/// Implementations are handles: every method takes `&self` and the
/// element's state lives behind the handle.
pub trait ScrollContainer {
    /// Bounding rectangle in the same coordinate space as pointer positions
    fn bounds(&self) -> Rect;

    /// Current horizontal/vertical scroll offsets
    fn scroll_offset(&self) -> Point;

    /// Total scrollable content size (scroll width / scroll height)
    fn scroll_size(&self) -> Size;

    /// Write new scroll offsets
    fn set_scroll_offset(&self, offset: Point);
}

/// Resolves a subject element to the container that scrolls it
pub trait ScrollResolver {
    /// Opaque handle to a rendered element
    type Element: Clone + PartialEq;

    /// Find the nearest scrollable ancestor of `element`
    ///
    /// Always returns a container. Implementations fall back to the
    /// top-level scroller when nothing nearer scrolls.
    fn resolve(&self, element: &Self::Element) -> Rc<dyn ScrollContainer>;
}
