/// Camera — low-level passive data container used by picking.
///
/// The Camera computes nothing on its own. The caller (the viewer) is
/// responsible for setting the view matrix, projection matrix and canvas
/// size; the camera only derives pick rays and marquee frustums from them.

use glam::{Mat4, Vec2, Vec3};
use crate::boundary::{Frustum, Ray};

/// Determinant magnitude below which a view-projection is not invertible.
const SINGULAR_EPSILON: f32 = 1e-12;

/// Canvas-space selection rectangle, in pixels (origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marquee {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Marquee {
    /// Create from two opposite corners given in any order.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }

    /// Width in pixels
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height in pixels
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

/// Low-level camera. A passive data container.
///
/// Depth is expected in the [0, 1] clip range produced by glam's
/// `perspective_rh` / `orthographic_rh`.
#[derive(Debug, Clone)]
pub struct Camera {
    view_matrix: Mat4,
    projection_matrix: Mat4,
    canvas_size: Vec2,
}

impl Camera {
    /// Create a new camera with the given parameters.
    pub fn new(view: Mat4, projection: Mat4, canvas_size: Vec2) -> Self {
        Self {
            view_matrix: view,
            projection_matrix: projection,
            canvas_size,
        }
    }

    // ===== GETTERS =====

    /// View matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Projection matrix (perspective or orthographic).
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    /// Canvas size in pixels.
    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }

    /// Full view frustum.
    pub fn frustum(&self) -> Frustum {
        Frustum::from_view_projection(&self.view_projection_matrix())
    }

    // ===== PICKING HELPERS =====

    /// World-space ray through a canvas position.
    ///
    /// The ray starts on the near plane and points toward the far plane.
    /// Returns `None` for an empty canvas or a singular view-projection.
    pub fn canvas_ray(&self, canvas_pos: Vec2) -> Option<Ray> {
        if self.canvas_size.x <= 0.0 || self.canvas_size.y <= 0.0 {
            return None;
        }

        let vp = self.view_projection_matrix();
        if vp.determinant().abs() < SINGULAR_EPSILON {
            return None;
        }
        let inverse = vp.inverse();

        let ndc_x = 2.0 * canvas_pos.x / self.canvas_size.x - 1.0;
        let ndc_y = 1.0 - 2.0 * canvas_pos.y / self.canvas_size.y;

        let near = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));

        Ray::new(near, far - near)
    }

    /// Sub-frustum enclosing a marquee rectangle.
    pub fn marquee_frustum(&self, marquee: &Marquee) -> Option<Frustum> {
        Frustum::from_marquee(
            &self.view_projection_matrix(),
            self.canvas_size,
            marquee.min,
            marquee.max,
        )
    }

    // ===== SETTERS (store only) =====

    /// Set the view matrix.
    pub fn set_view(&mut self, matrix: Mat4) {
        self.view_matrix = matrix;
    }

    /// Set the projection matrix.
    pub fn set_projection(&mut self, matrix: Mat4) {
        self.projection_matrix = matrix;
    }

    /// Set the canvas size in pixels.
    pub fn set_canvas_size(&mut self, canvas_size: Vec2) {
        self.canvas_size = canvas_size;
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
