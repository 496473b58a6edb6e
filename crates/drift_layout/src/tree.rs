//! Element tree management

use std::cell::RefCell;
use std::rc::Rc;

use drift_core::{Point, Rect, ScrollContainer, ScrollResolver, Size};
use slotmap::{new_key_type, Key, SlotMap};

use crate::element::ElementRef;

new_key_type! {
    pub struct ElementId;
}

impl ElementId {
    /// Convert to a raw u64 representation
    ///
    /// This is useful for storing element IDs in type-erased contexts.
    pub fn to_raw(self) -> u64 {
        self.data().as_ffi()
    }

    /// Create from a raw u64 representation
    ///
    /// The raw value must have been created by `to_raw()`. A value from
    /// another tree yields an id that simply does not resolve.
    pub fn from_raw(raw: u64) -> Self {
        Self::from(slotmap::KeyData::from_ffi(raw))
    }
}

/// Overflow behavior on one axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Overflow {
    /// Content is shown past the bounds
    #[default]
    Visible,
    /// Content is clipped and cannot be scrolled
    Hidden,
    /// Content is clipped and can be scrolled
    Scroll,
}

impl Overflow {
    pub fn allows_scroll(self) -> bool {
        matches!(self, Overflow::Scroll)
    }
}

/// Geometry and overflow of one element
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementStyle {
    /// Bounds in window coordinates
    pub bounds: Rect,
    pub overflow_x: Overflow,
    pub overflow_y: Overflow,
    /// Total content size; equals the bounds size when nothing overflows
    pub scroll_size: Size,
}

impl ElementStyle {
    /// A plain element whose content fits its bounds
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            overflow_x: Overflow::Visible,
            overflow_y: Overflow::Visible,
            scroll_size: bounds.size,
        }
    }

    /// A container scrolling on both axes
    pub fn scroll(bounds: Rect, scroll_size: Size) -> Self {
        Self {
            overflow_x: Overflow::Scroll,
            overflow_y: Overflow::Scroll,
            scroll_size,
            ..Self::new(bounds)
        }
    }

    /// A vertical list
    pub fn scroll_y(bounds: Rect, scroll_size: Size) -> Self {
        Self {
            overflow_x: Overflow::Hidden,
            overflow_y: Overflow::Scroll,
            scroll_size,
            ..Self::new(bounds)
        }
    }

    /// A horizontal strip
    pub fn scroll_x(bounds: Rect, scroll_size: Size) -> Self {
        Self {
            overflow_x: Overflow::Scroll,
            overflow_y: Overflow::Hidden,
            scroll_size,
            ..Self::new(bounds)
        }
    }

    /// Largest valid scroll offset per axis
    pub fn max_scroll(&self) -> Size {
        Size::new(
            (self.scroll_size.width - self.bounds.width()).max(0.0),
            (self.scroll_size.height - self.bounds.height()).max(0.0),
        )
    }

    /// Whether the element can actually scroll on at least one axis
    pub fn is_scrollable(&self) -> bool {
        let max = self.max_scroll();
        (self.overflow_x.allows_scroll() && max.width > 0.0)
            || (self.overflow_y.allows_scroll() && max.height > 0.0)
    }
}

pub(crate) struct ElementNode {
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) style: ElementStyle,
    pub(crate) scroll_offset: Point,
}

pub(crate) struct TreeInner {
    pub(crate) nodes: SlotMap<ElementId, ElementNode>,
    pub(crate) root: ElementId,
}

impl TreeInner {
    fn nearest_scrollable_ancestor(&self, id: ElementId) -> ElementId {
        let mut current = self.nodes.get(id).and_then(|node| node.parent);
        while let Some(candidate) = current {
            let Some(node) = self.nodes.get(candidate) else {
                break;
            };
            if node.style.is_scrollable() {
                return candidate;
            }
            current = node.parent;
        }
        self.root
    }

    fn remove_subtree(&mut self, id: ElementId) {
        if let Some(node) = self.nodes.remove(id) {
            for child in node.children {
                self.remove_subtree(child);
            }
        }
    }
}

/// A shared, cheaply cloned element tree
///
/// The root element stands for the document scroller: it always scrolls on
/// both axes and is what resolution falls back to.
#[derive(Clone)]
pub struct ElementTree {
    pub(crate) inner: Rc<RefCell<TreeInner>>,
}

impl ElementTree {
    /// Create a tree whose root covers a viewport of the given size
    pub fn new(viewport: Size) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(ElementNode {
            parent: None,
            children: Vec::new(),
            style: ElementStyle::scroll(viewport.to_rect(), viewport),
            scroll_offset: Point::ZERO,
        });
        Self {
            inner: Rc::new(RefCell::new(TreeInner { nodes, root })),
        }
    }

    pub fn root(&self) -> ElementId {
        self.inner.borrow().root
    }

    /// Add an element under `parent`
    ///
    /// A stale parent id attaches the element to the root.
    pub fn add_element(&self, parent: ElementId, style: ElementStyle) -> ElementId {
        let mut inner = self.inner.borrow_mut();
        let parent = if inner.nodes.contains_key(parent) {
            parent
        } else {
            tracing::debug!(?parent, "unknown parent, attaching to root");
            inner.root
        };
        let id = inner.nodes.insert(ElementNode {
            parent: Some(parent),
            children: Vec::new(),
            style,
            scroll_offset: Point::ZERO,
        });
        if let Some(node) = inner.nodes.get_mut(parent) {
            node.children.push(id);
        }
        id
    }

    /// Remove an element and everything under it. The root cannot be removed.
    pub fn remove_element(&self, id: ElementId) -> bool {
        let mut inner = self.inner.borrow_mut();
        if id == inner.root || !inner.nodes.contains_key(id) {
            return false;
        }
        let parent = inner.nodes.get(id).and_then(|node| node.parent);
        if let Some(parent) = parent.and_then(|p| inner.nodes.get_mut(p)) {
            parent.children.retain(|child| *child != id);
        }
        inner.remove_subtree(id);
        true
    }

    /// Check if an element exists in this tree
    pub fn contains(&self, id: ElementId) -> bool {
        self.inner.borrow().nodes.contains_key(id)
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.inner.borrow().nodes.get(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: ElementId) -> Vec<ElementId> {
        self.inner
            .borrow()
            .nodes
            .get(id)
            .map(|node| node.children.clone())
            .unwrap_or_default()
    }

    pub fn style(&self, id: ElementId) -> Option<ElementStyle> {
        self.inner.borrow().nodes.get(id).map(|node| node.style)
    }

    /// Move or resize an element
    pub fn set_bounds(&self, id: ElementId, bounds: Rect) {
        if let Some(node) = self.inner.borrow_mut().nodes.get_mut(id) {
            node.style.bounds = bounds;
        }
    }

    /// Change how much content an element holds, re-clamping its offset
    pub fn set_scroll_size(&self, id: ElementId, scroll_size: Size) {
        if let Some(node) = self.inner.borrow_mut().nodes.get_mut(id) {
            node.style.scroll_size = scroll_size;
            let max = node.style.max_scroll();
            node.scroll_offset = Point::new(
                node.scroll_offset.x.min(max.width),
                node.scroll_offset.y.min(max.height),
            );
        }
    }

    pub fn scroll_offset(&self, id: ElementId) -> Option<Point> {
        self.inner.borrow().nodes.get(id).map(|node| node.scroll_offset)
    }

    /// Get a scroll-container handle for an element
    pub fn element(&self, id: ElementId) -> Option<ElementRef> {
        self.contains(id).then(|| ElementRef::new(self.clone(), id))
    }

    /// Id of the nearest scrollable ancestor, or the root
    pub fn scroll_parent(&self, id: ElementId) -> ElementId {
        self.inner.borrow().nearest_scrollable_ancestor(id)
    }

    /// Get the number of elements in the tree
    pub fn len(&self) -> usize {
        self.inner.borrow().nodes.len()
    }

    /// A tree always holds at least its root
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl ScrollResolver for ElementTree {
    type Element = ElementId;

    fn resolve(&self, element: &ElementId) -> Rc<dyn ScrollContainer> {
        let target = self.scroll_parent(*element);
        tracing::debug!(?element, ?target, "resolved scroll parent");
        Rc::new(ElementRef::new(self.clone(), target))
    }
}
