/// Factories that build a KdTree3 from primitive buffers or scene objects.
///
/// Every builder computes a boundary over all of its inputs, roots a tree
/// at it and inserts one item per input. Building from zero items is an
/// error.

use crate::boundary::{AABB, Boundary};
use crate::compression::as_vertices;
use crate::error::{Error, Result};
use crate::scene::{PrimitiveType, Scene, SceneObject, SceneObjectKey};
use crate::{engine_bail, engine_debug, engine_err};
use super::items::{collect_prims, Prim, SceneObjectPrim};
use super::tree::KdTree3;

/// Tree of primitives in the coordinate space of their position buffer
pub type PrimsKdTree3<B = AABB> = KdTree3<Prim, B>;

/// Tree of whole scene objects, by their world boundary
pub type SceneObjectsKdTree3 = KdTree3<SceneObjectKey, AABB>;

/// Tree of world-space primitives annotated with their owning object
pub type SceneObjectsPrimsKdTree3 = KdTree3<SceneObjectPrim, AABB>;

const SOURCE: &str = "galaxy3d::KdTree3";

/// Build a primitive tree over a flat position buffer.
///
/// `positions` is `[x, y, z, ...]` in any space and precision the
/// boundary type supports (`f32` for [`AABB`], `u16` for `AABB16`).
/// `indices` selects vertices per primitive; without it, vertices are
/// used in order. Each item's boundary is the min/max of its vertices.
pub fn build_prims_kdtree3<B: Boundary>(
    primitive: PrimitiveType,
    positions: &[B::Scalar],
    indices: Option<&[u32]>,
    max_depth: usize,
) -> Result<PrimsKdTree3<B>> {
    let vertices = as_vertices(positions)?;
    let prims = collect_prims(primitive, vertices.len(), indices)?;
    if prims.is_empty() {
        engine_bail!(Error::EmptyInput, SOURCE,
            "No {:?} primitives to index ({} vertices)", primitive, vertices.len());
    }

    let items: Vec<(Prim, B)> = prims
        .into_iter()
        .map(|prim| {
            let aabb = B::from_points(prim.indices().iter().map(|&i| vertices[i as usize]));
            (prim, aabb)
        })
        .collect();

    let tree = build_tree(items, max_depth)?;
    engine_debug!(SOURCE, "Built {:?} prims tree: {} items, {} nodes",
        primitive, tree.num_items(), tree.num_nodes());
    Ok(tree)
}

/// Build a tree of world-space primitives drawn from scene objects.
///
/// Items carry the owning object, mesh and bucket. The root boundary is
/// the union of the objects' own boundaries.
pub fn build_scene_object_prims_kdtree3(
    scene: &Scene,
    objects: &[SceneObjectKey],
    max_depth: usize,
) -> Result<SceneObjectsPrimsKdTree3> {
    let mut root = AABB::collapsed();
    let mut items = Vec::new();

    for &key in objects {
        let object = lookup(scene, key)?;
        root.expand(object.aabb());

        for (mesh_index, mesh) in object.meshes().iter().enumerate() {
            let geometry = mesh.geometry();
            let local_to_world = mesh.local_to_world();

            for (bucket_index, bucket) in geometry.buckets().iter().enumerate() {
                let positions = geometry.world_positions(bucket, &local_to_world)?;
                let prims = collect_prims(geometry.primitive(), positions.len(), bucket.indices())?;

                items.extend(prims.into_iter().map(|prim| {
                    let aabb = AABB::from_points(
                        prim.indices().iter().map(|&i| positions[i as usize].to_array()),
                    );
                    let item = SceneObjectPrim { object: key, mesh_index, bucket_index, prim };
                    (item, aabb)
                }));
            }
        }
    }

    if items.is_empty() {
        engine_bail!(Error::EmptyInput, SOURCE,
            "No primitives to index in {} scene objects", objects.len());
    }

    let tree = build_tree_in(root, items, max_depth)?;
    engine_debug!(SOURCE, "Built scene object prims tree: {} objects, {} items, {} nodes",
        objects.len(), tree.num_items(), tree.num_nodes());
    Ok(tree)
}

/// Build a tree with one item per scene object, by world boundary.
pub fn build_scene_objects_kdtree3(
    scene: &Scene,
    objects: &[SceneObjectKey],
    max_depth: usize,
) -> Result<SceneObjectsKdTree3> {
    if objects.is_empty() {
        engine_bail!(Error::EmptyInput, SOURCE, "No scene objects to index");
    }

    let items = objects
        .iter()
        .map(|&key| Ok((key, *lookup(scene, key)?.aabb())))
        .collect::<Result<Vec<_>>>()?;

    let tree = build_tree(items, max_depth)?;
    engine_debug!(SOURCE, "Built scene objects tree: {} items, {} nodes",
        tree.num_items(), tree.num_nodes());
    Ok(tree)
}

fn lookup(scene: &Scene, key: SceneObjectKey) -> Result<&SceneObject> {
    scene.object(key).ok_or_else(|| engine_err!(Error::InvalidInput, SOURCE,
        "Scene object {:?} not found", key))
}

/// Root the tree at the union of the item boundaries.
fn build_tree<T, B: Boundary>(items: Vec<(T, B)>, max_depth: usize) -> Result<KdTree3<T, B>> {
    let mut root = B::collapsed();
    for (_, aabb) in &items {
        root.expand(aabb);
    }
    build_tree_in(root, items, max_depth)
}

fn build_tree_in<T, B: Boundary>(root: B, items: Vec<(T, B)>, max_depth: usize) -> Result<KdTree3<T, B>> {
    let mut tree = KdTree3::with_max_depth(root, max_depth);
    for (item, aabb) in items {
        tree.insert_item(item, aabb)?;
    }
    Ok(tree)
}

#[cfg(test)]
#[path = "builders_tests.rs"]
mod tests;
