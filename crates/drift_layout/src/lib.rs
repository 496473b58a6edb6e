//! Drift Layout
//!
//! A headless element tree: each element has window-space bounds, an
//! overflow style, a scroll size and a scroll offset. It answers the one
//! question scroll behaviors need to ask a layout, "which ancestor scrolls
//! this element?", and hands out [`ElementRef`] handles that behave like
//! scrollable elements.
//!
//! # Example
//!
//! ```rust
//! use drift_core::{Rect, ScrollContainer, ScrollResolver, Size};
//! use drift_layout::{ElementStyle, ElementTree};
//!
//! let tree = ElementTree::new(Size::new(800.0, 600.0));
//! let list = tree.add_element(
//!     tree.root(),
//!     ElementStyle::scroll_y(Rect::new(0.0, 0.0, 300.0, 400.0), Size::new(300.0, 2000.0)),
//! );
//! let card = tree.add_element(list, ElementStyle::new(Rect::new(0.0, 0.0, 300.0, 80.0)));
//!
//! let scroller = tree.resolve(&card);
//! assert_eq!(scroller.bounds(), Rect::new(0.0, 0.0, 300.0, 400.0));
//! ```

pub mod element;
pub mod tree;

pub use element::ElementRef;
pub use tree::{ElementId, ElementStyle, ElementTree, Overflow};
