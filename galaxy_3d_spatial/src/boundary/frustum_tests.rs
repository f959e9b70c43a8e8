use glam::{Mat4, Vec2, Vec3};
use crate::boundary::AABB;
use super::*;

fn perspective_frustum(fov: f32, far: f32) -> Frustum {
    let projection = Mat4::perspective_rh(fov, 1.0, 0.1, far);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
    Frustum::from_view_projection(&(projection * view))
}

/// Orthographic box x,y in [-5, 5], looking down -Z from the origin.
fn ortho_frustum() -> Frustum {
    let projection = Mat4::orthographic_rh(-5.0, 5.0, -5.0, 5.0, 0.1, 100.0);
    Frustum::from_view_projection(&projection)
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_frustum_planes_are_normalized() {
    for frustum in [
        Frustum::from_view_projection(&Mat4::IDENTITY),
        perspective_frustum(std::f32::consts::FRAC_PI_4, 100.0),
        ortho_frustum(),
    ] {
        for plane in frustum.planes() {
            let normal_len = plane.truncate().length();
            assert!((normal_len - 1.0).abs() < 1e-4, "plane normal should be unit length");
        }
    }
}

#[test]
fn test_test_vertices_follow_normal_signs() {
    let frustum = ortho_frustum();

    // Left plane normal points +X: positive vertex uses max.x
    assert_eq!(frustum.test_vertex(PLANE_LEFT) & 1, 1);
    // Right plane normal points -X: positive vertex uses min.x
    assert_eq!(frustum.test_vertex(PLANE_RIGHT) & 1, 0);
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn test_aabb_inside_frustum() {
    let frustum = perspective_frustum(std::f32::consts::FRAC_PI_2, 100.0);
    let aabb = AABB { min: Vec3::splat(-1.0), max: Vec3::splat(1.0) };

    assert!(frustum.intersects_aabb(&aabb));
    assert_eq!(frustum.classify_aabb(&aabb), IntersectTest::Inside);
}

#[test]
fn test_aabb_outside_frustum() {
    let frustum = perspective_frustum(std::f32::consts::FRAC_PI_4, 100.0);
    let aabb = AABB { min: Vec3::splat(100.0), max: Vec3::splat(101.0) };

    assert!(!frustum.intersects_aabb(&aabb));
    assert_eq!(frustum.classify_aabb(&aabb), IntersectTest::Outside);
}

#[test]
fn test_aabb_behind_camera() {
    let frustum = perspective_frustum(std::f32::consts::FRAC_PI_2, 100.0);
    let aabb = AABB { min: Vec3::new(-1.0, -1.0, 10.0), max: Vec3::new(1.0, 1.0, 12.0) };

    assert!(!frustum.intersects_aabb(&aabb));
}

#[test]
fn test_aabb_beyond_far_plane() {
    let frustum = perspective_frustum(std::f32::consts::FRAC_PI_2, 10.0);
    let aabb = AABB { min: Vec3::new(-1.0, -1.0, -20.0), max: Vec3::new(1.0, 1.0, -18.0) };

    assert!(!frustum.intersects_aabb(&aabb));
}

#[test]
fn test_aabb_straddling_boundary_is_intersect() {
    let frustum = ortho_frustum();
    let aabb = AABB { min: Vec3::new(4.0, 0.0, -10.0), max: Vec3::new(6.0, 1.0, -5.0) };

    assert_eq!(frustum.classify_aabb(&aabb), IntersectTest::Intersect);
}

#[test]
fn test_contains_point() {
    let frustum = ortho_frustum();
    assert!(frustum.contains_point(Vec3::new(0.0, 0.0, -10.0)));
    assert!(!frustum.contains_point(Vec3::new(6.0, 0.0, -10.0)));
    assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 10.0)));
}

// ============================================================================
// Marquee
// ============================================================================

#[test]
fn test_marquee_covering_canvas_matches_full_frustum() {
    let vp = Mat4::orthographic_rh(-5.0, 5.0, -5.0, 5.0, 0.1, 100.0);
    let canvas = Vec2::new(100.0, 100.0);
    let frustum = Frustum::from_marquee(&vp, canvas, Vec2::ZERO, canvas).unwrap();

    assert!(frustum.contains_point(Vec3::new(4.9, 4.9, -10.0)));
    assert!(frustum.contains_point(Vec3::new(-4.9, -4.9, -10.0)));
    assert!(!frustum.contains_point(Vec3::new(5.1, 0.0, -10.0)));
}

#[test]
fn test_marquee_top_left_quadrant() {
    let vp = Mat4::orthographic_rh(-5.0, 5.0, -5.0, 5.0, 0.1, 100.0);
    let canvas = Vec2::new(100.0, 100.0);

    // Canvas y points down: top-left quadrant of the canvas is x < 0, y > 0 in world
    let frustum = Frustum::from_marquee(&vp, canvas, Vec2::ZERO, Vec2::new(50.0, 50.0)).unwrap();

    assert!(frustum.contains_point(Vec3::new(-2.5, 2.5, -10.0)));
    assert!(!frustum.contains_point(Vec3::new(2.5, 2.5, -10.0)));
    assert!(!frustum.contains_point(Vec3::new(-2.5, -2.5, -10.0)));
}

#[test]
fn test_marquee_corners_in_any_order() {
    let vp = Mat4::orthographic_rh(-5.0, 5.0, -5.0, 5.0, 0.1, 100.0);
    let canvas = Vec2::new(100.0, 100.0);

    let frustum = Frustum::from_marquee(&vp, canvas, Vec2::new(50.0, 50.0), Vec2::ZERO).unwrap();
    assert!(frustum.contains_point(Vec3::new(-2.5, 2.5, -10.0)));
}

#[test]
fn test_degenerate_marquee_is_rejected() {
    let vp = Mat4::IDENTITY;
    let canvas = Vec2::new(100.0, 100.0);

    assert!(Frustum::from_marquee(&vp, canvas, Vec2::new(10.0, 10.0), Vec2::new(10.0, 40.0)).is_none());
    assert!(Frustum::from_marquee(&vp, Vec2::ZERO, Vec2::ZERO, Vec2::ONE).is_none());
}

// ============================================================================
// Transform
// ============================================================================

#[test]
fn test_transformed_frustum_matches_world_test() {
    let world = ortho_frustum();
    let local_to_world = Mat4::from_translation(Vec3::new(4.0, 0.0, 0.0));
    let local = world.transformed(&local_to_world);

    // Local (0,0,-10) maps to world (4,0,-10): inside
    assert!(local.contains_point(Vec3::new(0.0, 0.0, -10.0)));
    // Local (2,0,-10) maps to world (6,0,-10): outside
    assert!(!local.contains_point(Vec3::new(2.0, 0.0, -10.0)));
}

// ============================================================================
// Plane constants
// ============================================================================

#[test]
fn test_plane_constants() {
    assert_eq!(PLANE_LEFT, 0);
    assert_eq!(PLANE_RIGHT, 1);
    assert_eq!(PLANE_BOTTOM, 2);
    assert_eq!(PLANE_TOP, 3);
    assert_eq!(PLANE_NEAR, 4);
    assert_eq!(PLANE_FAR, 5);
}
