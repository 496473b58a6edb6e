//! Drift Auto-Scroll
//!
//! Scrolls a container while a dragged pointer sits near one of its edges.
//!
//! # Features
//!
//! - **Edge Gutters**: a band of configurable width along each edge
//! - **Proportional Speed**: velocity grows linearly with gutter depth
//! - **Both Axes**: corners scroll horizontally and vertically at once
//! - **Pointer and Touch**: document-wide move tracking, primary touch wins
//! - **Frame Driven**: one correction per display frame, only while enabled
//!
//! # Example
//!
//! ```rust
//! use drift_core::{Point, Rect};
//! use drift_scroll::Gutter;
//!
//! let gutter = Gutter::new(Rect::from_edges(0.0, 0.0, 500.0, 300.0), 50.0);
//! let delta = gutter.velocity(Point::new(520.0, 150.0), 0.2);
//! assert!((delta.x - 14.0).abs() < 1e-4);
//! assert_eq!(delta.y, 0.0);
//! ```

pub mod auto_scroll;
pub mod config;
pub mod error;
pub mod gutter;

pub use auto_scroll::{AutoScroll, FrameOutcome, ScrollCallback};
pub use config::{AutoScrollConfig, DEFAULT_INTENSITY, DEFAULT_SIZE};
pub use error::{ConfigError, Result};
pub use gutter::{corrected_offset, Gutter, GutterHit};
