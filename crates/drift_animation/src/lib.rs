//! Drift Frame Scheduling
//!
//! Display-frame callbacks and the loops built on them.
//!
//! # Features
//!
//! - **FrameScheduler**: Platform-agnostic request/cancel seam, one callback per frame
//! - **FrameClock**: Single-threaded scheduler ticked by the host once per rendered frame
//! - **FrameLoop**: An explicit per-frame control loop with cancellation that
//!   cannot be resurrected by an in-flight frame

pub mod frame_loop;
pub mod scheduler;

pub use frame_loop::FrameLoop;
pub use scheduler::{
    FrameCallback, FrameClock, FrameClockHandle, FrameHandle, FrameScheduler, FrameTime,
};
