//! Boundary primitives — boxes, frustums and rays.
//!
//! Everything the spatial index and its queries classify against:
//! axis-aligned boundaries (float and 16-bit quantized), six-plane
//! frustums and picking rays.

mod aabb;
mod frustum;
mod ray;

pub use aabb::{AABB, AABB16, Boundary, IntersectTest};
pub use frustum::{
    Frustum,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
pub use ray::{Ray, SegmentApproach};
