/// Tests for PickPrimsCache
///
/// These tests validate build-on-miss, Arc reuse on hit, LRU eviction and
/// bucket lookup errors.

use super::*;
use crate::scene::PrimitiveType;

// ============================================================================
// Helper Functions
// ============================================================================

fn create_triangles(id: u32, buckets: usize) -> Geometry {
    let bucket = || (
        vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::new(1.0, 1.0, 0.0)],
        Some(vec![0, 1, 2, 1, 3, 2]),
    );
    Geometry::from_positions(
        GeometryId(id),
        PrimitiveType::Triangles,
        (0..buckets).map(|_| bucket()).collect(),
    )
}

// ============================================================================
// PickPrims
// ============================================================================

#[test]
fn test_pick_prims_build() {
    let geometry = create_triangles(0, 1);
    let prims = PickPrims::build(&geometry, 0, 10).unwrap();

    assert_eq!(prims.positions.len(), 4);
    assert_eq!(prims.tree.num_items(), 2);

    let centroid = prims.centroid(&Prim::Triangle([0, 1, 2]));
    assert!((centroid - Vec3::new(1.0 / 3.0, 1.0 / 3.0, 0.0)).length() < 1e-3);
    assert_eq!(prims.vertices(&Prim::Point(3)).count(), 1);
}

#[test]
fn test_pick_prims_missing_bucket() {
    let geometry = create_triangles(0, 1);
    assert!(matches!(PickPrims::build(&geometry, 5, 10), Err(Error::InvalidInput(_))));
}

// ============================================================================
// Cache
// ============================================================================

#[test]
fn test_cache_reuses_same_arc() {
    let geometry = create_triangles(1, 2);
    let mut cache = PickPrimsCache::new(None, 10);

    let first = cache.get_or_build(&geometry, 0).unwrap();
    let second = cache.get_or_build(&geometry, 0).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.builds(), 1);
    assert_eq!(cache.len(), 1);

    let other_bucket = cache.get_or_build(&geometry, 1).unwrap();
    assert!(!Arc::ptr_eq(&first, &other_bucket));
    assert_eq!(cache.builds(), 2);
}

#[test]
fn test_cache_keys_by_geometry_id() {
    let a = create_triangles(1, 1);
    let b = create_triangles(2, 1);
    let mut cache = PickPrimsCache::new(None, 10);

    cache.get_or_build(&a, 0).unwrap();
    cache.get_or_build(&b, 0).unwrap();

    assert!(cache.contains(&PickPrimsKey { geometry: GeometryId(1), bucket_index: 0 }));
    assert!(cache.contains(&PickPrimsKey { geometry: GeometryId(2), bucket_index: 0 }));
    assert_eq!(cache.builds(), 2);
}

#[test]
fn test_cache_evicts_least_recently_used() {
    let a = create_triangles(1, 1);
    let b = create_triangles(2, 1);
    let c = create_triangles(3, 1);
    let mut cache = PickPrimsCache::new(Some(2), 10);

    cache.get_or_build(&a, 0).unwrap();
    cache.get_or_build(&b, 0).unwrap();
    // Touch a so b becomes the oldest
    cache.get_or_build(&a, 0).unwrap();
    cache.get_or_build(&c, 0).unwrap();

    assert_eq!(cache.len(), 2);
    assert!(cache.contains(&PickPrimsKey { geometry: GeometryId(1), bucket_index: 0 }));
    assert!(!cache.contains(&PickPrimsKey { geometry: GeometryId(2), bucket_index: 0 }));
    assert!(cache.contains(&PickPrimsKey { geometry: GeometryId(3), bucket_index: 0 }));

    // Rebuilding an evicted entry counts as a new build
    cache.get_or_build(&b, 0).unwrap();
    assert_eq!(cache.builds(), 4);
}

#[test]
fn test_cache_clear_keeps_outstanding_arcs() {
    let geometry = create_triangles(1, 1);
    let mut cache = PickPrimsCache::new(Some(0), 10);
    assert_eq!(cache.capacity(), Some(1));

    let prims = cache.get_or_build(&geometry, 0).unwrap();
    cache.clear();

    assert!(cache.is_empty());
    assert!(cache.get(&PickPrimsKey { geometry: GeometryId(1), bucket_index: 0 }).is_none());
    assert_eq!(prims.tree.num_items(), 2);
}

#[test]
fn test_cache_propagates_build_errors() {
    let empty = Geometry::from_positions(GeometryId(9), PrimitiveType::Lines, vec![(vec![], None)]);
    let mut cache = PickPrimsCache::new(None, 10);

    assert!(matches!(cache.get_or_build(&empty, 0), Err(Error::EmptyInput(_))));
    assert!(cache.is_empty());
    assert_eq!(cache.builds(), 0);
}
