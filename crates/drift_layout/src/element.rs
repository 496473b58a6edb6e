//! Element handles

use std::fmt;

use drift_core::{Point, Rect, ScrollContainer, Size};

use crate::tree::{ElementId, ElementTree};

/// A handle to one element of an [`ElementTree`]
///
/// Acts as a [`ScrollContainer`]. Writes are clamped to the element's real
/// scroll range, `[0, scroll size - visible size]`, the way a native
/// scroller clamps them. A handle to a removed element reads as empty and
/// ignores writes.
#[derive(Clone)]
pub struct ElementRef {
    tree: ElementTree,
    id: ElementId,
}

impl ElementRef {
    pub(crate) fn new(tree: ElementTree, id: ElementId) -> Self {
        Self { tree, id }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }
}

impl PartialEq for ElementRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && std::rc::Rc::ptr_eq(&self.tree.inner, &other.tree.inner)
    }
}

impl fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef").field("id", &self.id).finish()
    }
}

impl ScrollContainer for ElementRef {
    fn bounds(&self) -> Rect {
        self.tree
            .style(self.id)
            .map(|style| style.bounds)
            .unwrap_or_default()
    }

    fn scroll_offset(&self) -> Point {
        self.tree.scroll_offset(self.id).unwrap_or_default()
    }

    fn scroll_size(&self) -> Size {
        self.tree
            .style(self.id)
            .map(|style| style.scroll_size)
            .unwrap_or_default()
    }

    fn set_scroll_offset(&self, offset: Point) {
        let mut inner = self.tree.inner.borrow_mut();
        let Some(node) = inner.nodes.get_mut(self.id) else {
            return;
        };
        let max = node.style.max_scroll();
        node.scroll_offset = Point::new(
            offset.x.clamp(0.0, max.width),
            offset.y.clamp(0.0, max.height),
        );
    }
}
