//! Drift Core
//!
//! Foundational types shared by the Drift crates:
//!
//! - **Geometry**: points, sizes, rectangles and vectors in distance units
//! - **Scroll seams**: the [`ScrollContainer`] a scroll loop mutates and the
//!   [`ScrollResolver`] that finds it for a subject element
//!
//! # Example
//!
//! ```rust
//! use drift_core::{Point, Rect};
//!
//! let bounds = Rect::from_edges(0.0, 0.0, 500.0, 300.0);
//! assert!(bounds.contains(Point::new(250.0, 150.0)));
//! assert_eq!(bounds.right(), 500.0);
//! ```

pub mod geometry;
pub mod scroll;

pub use geometry::{Point, Rect, Size, Vec2};
pub use scroll::{ScrollContainer, ScrollResolver};
