use glam::{Mat4, Vec2, Vec3};
use super::*;

fn create_test_camera() -> Camera {
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
    let proj = Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0);
    Camera::new(view, proj, Vec2::new(800.0, 800.0))
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_camera_new() {
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
    let proj = Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, 16.0 / 9.0, 0.1, 100.0);

    let camera = Camera::new(view, proj, Vec2::new(1920.0, 1080.0));

    assert_eq!(*camera.view_matrix(), view);
    assert_eq!(*camera.projection_matrix(), proj);
    assert_eq!(camera.canvas_size(), Vec2::new(1920.0, 1080.0));
    assert_eq!(camera.view_projection_matrix(), proj * view);
}

#[test]
fn test_setters() {
    let mut camera = create_test_camera();
    camera.set_view(Mat4::IDENTITY);
    camera.set_projection(Mat4::IDENTITY);
    camera.set_canvas_size(Vec2::new(10.0, 20.0));

    assert_eq!(*camera.view_matrix(), Mat4::IDENTITY);
    assert_eq!(camera.view_projection_matrix(), Mat4::IDENTITY);
    assert_eq!(camera.canvas_size(), Vec2::new(10.0, 20.0));
}

// ============================================================================
// canvas_ray
// ============================================================================

#[test]
fn test_canvas_center_ray_points_at_target() {
    let camera = create_test_camera();
    let ray = camera.canvas_ray(Vec2::new(400.0, 400.0)).unwrap();

    assert!((ray.dir - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4);
    assert!(ray.origin.x.abs() < 1e-4 && ray.origin.y.abs() < 1e-4);
    assert!(ray.origin.z < 5.0 && ray.origin.z > 4.8);
}

#[test]
fn test_canvas_corner_ray_diverges() {
    let camera = create_test_camera();
    let ray = camera.canvas_ray(Vec2::new(800.0, 0.0)).unwrap();

    // Top-right of the canvas: +X, +Y in world, still heading into -Z
    assert!(ray.dir.x > 0.0);
    assert!(ray.dir.y > 0.0);
    assert!(ray.dir.z < 0.0);
}

#[test]
fn test_canvas_ray_rejects_empty_canvas_or_singular_matrix() {
    let mut camera = create_test_camera();
    camera.set_canvas_size(Vec2::ZERO);
    assert!(camera.canvas_ray(Vec2::ZERO).is_none());

    let singular = Camera::new(Mat4::ZERO, Mat4::IDENTITY, Vec2::new(10.0, 10.0));
    assert!(singular.canvas_ray(Vec2::new(5.0, 5.0)).is_none());
}

// ============================================================================
// Marquee
// ============================================================================

#[test]
fn test_marquee_new_orders_corners() {
    let marquee = Marquee::new(Vec2::new(30.0, 5.0), Vec2::new(10.0, 25.0));
    assert_eq!(marquee.min, Vec2::new(10.0, 5.0));
    assert_eq!(marquee.max, Vec2::new(30.0, 25.0));
    assert_eq!(marquee.width(), 20.0);
    assert_eq!(marquee.height(), 20.0);
}

#[test]
fn test_marquee_frustum_selects_left_half() {
    let camera = create_test_camera();
    let marquee = Marquee::new(Vec2::ZERO, Vec2::new(400.0, 800.0));
    let frustum = camera.marquee_frustum(&marquee).unwrap();

    assert!(frustum.contains_point(Vec3::new(-1.0, 0.0, 0.0)));
    assert!(!frustum.contains_point(Vec3::new(1.0, 0.0, 0.0)));
}
