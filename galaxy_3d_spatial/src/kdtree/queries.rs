/// Tree queries against a boundary, a frustum or a ray.
///
/// All three share one traversal with 3-way classification at each node:
/// - `Outside` → skip entire subtree
/// - `Inside` → collect all items from the subtree without further testing
/// - `Intersect` → collect the node's items, recurse into children
///
/// Results are item payloads in depth-first, left-before-right order.
/// Each item lives in exactly one node, so there are no duplicates.

use glam::Vec3;
use crate::boundary::{Boundary, Frustum, IntersectTest, Ray};
use super::tree::{KdTree3, NodeId, ROOT};

/// Items of every node whose boundary overlaps `aabb`.
pub fn search_kdtree3_with_aabb<'a, T, B: Boundary>(
    tree: &'a KdTree3<T, B>,
    aabb: &B,
) -> Vec<&'a T> {
    search(tree, |node_aabb| aabb.classify(node_aabb))
}

/// Items of every node whose boundary is not fully outside the frustum.
///
/// The frustum must be expressed in the tree's coordinate space.
pub fn search_kdtree3_with_frustum<'a, T, B: Boundary>(
    tree: &'a KdTree3<T, B>,
    frustum: &Frustum,
) -> Vec<&'a T> {
    search(tree, |node_aabb| frustum.classify_aabb(&node_aabb.to_aabb()))
}

/// Items of every node whose boundary is hit by the ray `origin + t * dir`, `t >= 0`.
///
/// `dir` need not be normalized.
pub fn search_kdtree3_with_ray<'a, T, B: Boundary>(
    tree: &'a KdTree3<T, B>,
    origin: Vec3,
    dir: Vec3,
) -> Vec<&'a T> {
    search_kdtree3_with_ray_margin(tree, origin, dir, 0.0)
}

/// Like [`search_kdtree3_with_ray`], with node boundaries inflated by `margin`.
///
/// Used to find points and lines within a pick radius of the ray.
pub fn search_kdtree3_with_ray_margin<'a, T, B: Boundary>(
    tree: &'a KdTree3<T, B>,
    origin: Vec3,
    dir: Vec3,
    margin: f32,
) -> Vec<&'a T> {
    let ray = Ray { origin, dir };
    search(tree, |node_aabb| {
        let aabb = node_aabb.to_aabb();
        if margin > 0.0 {
            ray.classify_aabb(&aabb.inflated(margin))
        } else {
            ray.classify_aabb(&aabb)
        }
    })
}

fn search<'a, T, B, F>(tree: &'a KdTree3<T, B>, mut classify: F) -> Vec<&'a T>
where
    B: Boundary,
    F: FnMut(&B) -> IntersectTest,
{
    let mut results = Vec::new();
    visit(tree, ROOT, IntersectTest::Intersect, &mut classify, &mut results);
    results
}

fn visit<'a, T, B, F>(
    tree: &'a KdTree3<T, B>,
    node_id: NodeId,
    inherited: IntersectTest,
    classify: &mut F,
    results: &mut Vec<&'a T>,
) where
    B: Boundary,
    F: FnMut(&B) -> IntersectTest,
{
    let Some(node) = tree.node(node_id) else {
        return;
    };

    let state = match inherited {
        IntersectTest::Outside => return,
        // Children are contained in their parent
        IntersectTest::Inside => IntersectTest::Inside,
        IntersectTest::Intersect => classify(node.aabb()),
    };
    if state == IntersectTest::Outside {
        return;
    }

    results.extend(node.items().iter().map(|kd_item| &kd_item.item));
    for child in node.children() {
        visit(tree, child, state, classify, results);
    }
}

#[cfg(test)]
#[path = "queries_tests.rs"]
mod tests;
