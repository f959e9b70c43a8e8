//! Spatial index module
//!
//! Provides the loose k-d tree, the builders that populate it from
//! primitive buffers or scene objects, and the boundary, frustum and ray
//! queries that walk it.

mod tree;
mod items;
mod builders;
mod queries;

pub use tree::{KdItem, KdNode, KdTree3, NodeId, ROOT, DEFAULT_MAX_DEPTH};
pub use items::{Prim, SceneObjectPrim};
pub use builders::{
    PrimsKdTree3, SceneObjectsKdTree3, SceneObjectsPrimsKdTree3,
    build_prims_kdtree3, build_scene_object_prims_kdtree3, build_scene_objects_kdtree3,
};
pub use queries::{
    search_kdtree3_with_aabb, search_kdtree3_with_frustum,
    search_kdtree3_with_ray, search_kdtree3_with_ray_margin,
};
