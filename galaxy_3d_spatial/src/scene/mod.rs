//! Scene data model
//!
//! Provides the pickable scene: objects, the meshes that place shared
//! geometry in the world, and the quantized geometry itself.

mod geometry;
mod scene;

pub use geometry::{Geometry, GeometryBucket, GeometryId, PrimitiveType};
pub use scene::{Mesh, Scene, SceneObject, SceneObjectKey};
