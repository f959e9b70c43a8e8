use glam::{Mat4, Vec3};
use crate::boundary::AABB;
use super::*;

fn unit_box() -> AABB {
    AABB { min: Vec3::splat(-1.0), max: Vec3::splat(1.0) }
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_new_normalizes_direction() {
    let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0)).unwrap();
    assert_eq!(ray.dir, Vec3::new(0.0, 0.0, -1.0));
    assert_eq!(ray.at(2.0), Vec3::new(0.0, 0.0, -2.0));
}

#[test]
fn test_new_rejects_zero_or_nan_direction() {
    assert!(Ray::new(Vec3::ZERO, Vec3::ZERO).is_none());
    assert!(Ray::new(Vec3::ZERO, Vec3::new(f32::NAN, 0.0, 1.0)).is_none());
    assert!(Ray::new(Vec3::new(f32::INFINITY, 0.0, 0.0), Vec3::X).is_none());
}

// ============================================================================
// Slab test
// ============================================================================

#[test]
fn test_ray_hits_box_in_front() {
    let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0)).unwrap();
    let (t_near, t_far) = ray.intersect_aabb(&unit_box()).unwrap();
    assert!((t_near - 4.0).abs() < 1e-5);
    assert!((t_far - 6.0).abs() < 1e-5);
    assert_eq!(ray.classify_aabb(&unit_box()), IntersectTest::Intersect);
}

#[test]
fn test_ray_misses_box_to_the_side() {
    let ray = Ray::new(Vec3::new(3.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0)).unwrap();
    assert!(ray.intersect_aabb(&unit_box()).is_none());
    assert_eq!(ray.classify_aabb(&unit_box()), IntersectTest::Outside);
}

#[test]
fn test_ray_pointing_away_misses() {
    let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0)).unwrap();
    assert!(ray.intersect_aabb(&unit_box()).is_none());
}

#[test]
fn test_ray_starting_inside_box() {
    let ray = Ray::new(Vec3::ZERO, Vec3::X).unwrap();
    let (t_near, t_far) = ray.intersect_aabb(&unit_box()).unwrap();
    assert_eq!(t_near, 0.0);
    assert!((t_far - 1.0).abs() < 1e-5);
}

#[test]
fn test_ray_hits_flat_box() {
    // Degenerate (zero thickness) box, as produced by a single triangle in a plane
    let flat = AABB { min: Vec3::new(0.0, 0.0, 0.0), max: Vec3::new(1.0, 1.0, 0.0) };
    let ray = Ray::new(Vec3::new(0.25, 0.25, 5.0), Vec3::new(0.0, 0.0, -1.0)).unwrap();
    assert!(ray.intersect_aabb(&flat).is_some());
}

#[test]
fn test_diagonal_ray() {
    let ray = Ray::new(Vec3::splat(-5.0), Vec3::ONE).unwrap();
    assert!(ray.intersect_aabb(&unit_box()).is_some());

    let offset = Ray::new(Vec3::new(-5.0, -5.0, 5.0), Vec3::new(1.0, 1.0, 1.0)).unwrap();
    assert!(offset.intersect_aabb(&unit_box()).is_none());
}

// ============================================================================
// Triangle
// ============================================================================

#[test]
fn test_ray_hits_triangle() {
    let ray = Ray::new(Vec3::new(0.25, 0.25, 5.0), Vec3::new(0.0, 0.0, -1.0)).unwrap();
    let t = ray.intersect_triangle(Vec3::ZERO, Vec3::X, Vec3::Y).unwrap();
    assert!((t - 5.0).abs() < 1e-5);
    assert!((ray.at(t) - Vec3::new(0.25, 0.25, 0.0)).length() < 1e-5);
}

#[test]
fn test_ray_hits_back_face() {
    let ray = Ray::new(Vec3::new(0.25, 0.25, -5.0), Vec3::new(0.0, 0.0, 1.0)).unwrap();
    assert!(ray.intersect_triangle(Vec3::ZERO, Vec3::X, Vec3::Y).is_some());
}

#[test]
fn test_ray_misses_triangle() {
    let ray = Ray::new(Vec3::new(0.75, 0.75, 5.0), Vec3::new(0.0, 0.0, -1.0)).unwrap();
    assert!(ray.intersect_triangle(Vec3::ZERO, Vec3::X, Vec3::Y).is_none());
}

#[test]
fn test_triangle_behind_ray_is_missed() {
    let ray = Ray::new(Vec3::new(0.25, 0.25, 5.0), Vec3::new(0.0, 0.0, 1.0)).unwrap();
    assert!(ray.intersect_triangle(Vec3::ZERO, Vec3::X, Vec3::Y).is_none());
}

// ============================================================================
// Segment / point
// ============================================================================

#[test]
fn test_closest_to_crossing_segment() {
    // Segment along X at z = 0, ray straight down through (0.5, 0.1, *)
    let ray = Ray::new(Vec3::new(0.5, 0.1, 5.0), Vec3::new(0.0, 0.0, -1.0)).unwrap();
    let approach = ray.closest_to_segment(Vec3::ZERO, Vec3::X);

    assert!((approach.t - 5.0).abs() < 1e-5);
    assert!((approach.point - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-5);
    assert!((approach.distance - 0.1).abs() < 1e-5);
}

#[test]
fn test_closest_to_segment_clamps_to_endpoint() {
    let ray = Ray::new(Vec3::new(3.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0)).unwrap();
    let approach = ray.closest_to_segment(Vec3::ZERO, Vec3::X);

    assert!((approach.point - Vec3::X).length() < 1e-5);
    assert!((approach.distance - 2.0).abs() < 1e-5);
}

#[test]
fn test_closest_to_point() {
    let ray = Ray::new(Vec3::ZERO, Vec3::X).unwrap();
    let (t, distance) = ray.closest_to_point(Vec3::new(4.0, 0.5, 0.0));
    assert!((t - 4.0).abs() < 1e-5);
    assert!((distance - 0.5).abs() < 1e-5);

    let (t_behind, distance_behind) = ray.closest_to_point(Vec3::new(-2.0, 0.0, 0.0));
    assert_eq!(t_behind, 0.0);
    assert!((distance_behind - 2.0).abs() < 1e-5);
}

// ============================================================================
// Transform
// ============================================================================

#[test]
fn test_transformed_ray_keeps_parametrization() {
    let ray = Ray::new(Vec3::new(10.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0)).unwrap();
    let world_to_local = Mat4::from_translation(Vec3::new(-10.0, 0.0, 0.0));
    let local = ray.transformed(&world_to_local);

    assert_eq!(local.origin, Vec3::new(0.0, 0.0, 5.0));
    let (t_local, _) = local.intersect_aabb(&unit_box()).unwrap();
    let (t_world, _) = ray
        .intersect_aabb(&AABB { min: Vec3::new(9.0, -1.0, -1.0), max: Vec3::new(11.0, 1.0, 1.0) })
        .unwrap();
    assert!((t_local - t_world).abs() < 1e-5);
}
