//! Camera module — low-level camera and marquee rectangle.
//!
//! Provides passive data containers for picking. The crate does NOT
//! store or manage cameras; they are owned and driven by the caller.

mod camera;

pub use camera::{Camera, Marquee};
