/// Frustum — six clipping planes for culling and marquee selection.
///
/// Each plane is represented as a Vec4 (A, B, C, D) where:
/// - (A, B, C) is the inward-pointing normal
/// - D is the signed distance
/// - A point P is inside the frustum if dot(plane, P_homogeneous) >= 0 for all planes
///
/// Alongside the planes, each frustum keeps a per-plane "test vertex"
/// selector: which corner of a box lies furthest along the plane normal.
/// It depends only on the normal's signs, so it is computed once when the
/// planes are set rather than on every box test.

use glam::{Mat4, Vec2, Vec3, Vec4};
use super::aabb::{AABB, IntersectTest};

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Six frustum planes plus their test vertex selectors.
///
/// Works with both perspective and orthographic projections, and with
/// any convex six-sided volume given directly as planes.
#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    /// Frustum planes: left, right, bottom, top, near, far
    planes: [Vec4; 6],
    /// Bit `i` set when plane normal component `i` is >= 0 (positive vertex uses max on that axis)
    test_vertices: [u8; 6],
}

impl Frustum {
    /// Build from six inward-facing planes. Each plane is normalized.
    pub fn from_planes(planes: [Vec4; 6]) -> Self {
        let mut planes = planes;
        for plane in &mut planes {
            let normal_len = plane.truncate().length();
            if normal_len > 0.0 {
                *plane /= normal_len;
            }
        }

        let test_vertices = planes.map(|plane| {
            (plane.x >= 0.0) as u8
                | (((plane.y >= 0.0) as u8) << 1)
                | (((plane.z >= 0.0) as u8) << 2)
        });

        Self { planes, test_vertices }
    }

    /// Extract frustum planes from a view-projection matrix.
    ///
    /// Uses the Gribb & Hartmann method with a [0, 1] clip depth range.
    /// Works for both perspective and orthographic projections.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let m = vp.to_cols_array_2d();

        // Gribb & Hartmann: extract planes from rows of the VP matrix
        Self::from_planes([
            // Left:   row3 + row0
            Vec4::new(m[0][3] + m[0][0], m[1][3] + m[1][0], m[2][3] + m[2][0], m[3][3] + m[3][0]),
            // Right:  row3 - row0
            Vec4::new(m[0][3] - m[0][0], m[1][3] - m[1][0], m[2][3] - m[2][0], m[3][3] - m[3][0]),
            // Bottom: row3 + row1
            Vec4::new(m[0][3] + m[0][1], m[1][3] + m[1][1], m[2][3] + m[2][1], m[3][3] + m[3][1]),
            // Top:    row3 - row1
            Vec4::new(m[0][3] - m[0][1], m[1][3] - m[1][1], m[2][3] - m[2][1], m[3][3] - m[3][1]),
            // Near:   row2 (depth range [0, 1], as produced by glam's *_rh projections)
            Vec4::new(m[0][2], m[1][2], m[2][2], m[3][2]),
            // Far:    row3 - row2
            Vec4::new(m[0][3] - m[0][2], m[1][3] - m[1][2], m[2][3] - m[2][2], m[3][3] - m[3][2]),
        ])
    }

    /// Sub-frustum covering a canvas-space rectangle.
    ///
    /// `canvas_size` is in pixels, `min`/`max` are opposite marquee corners
    /// in pixels with the origin at the top-left and y pointing down.
    /// The NDC sub-rectangle is stretched back to the full clip volume by a
    /// pick matrix, and the planes are extracted from `pick * vp`.
    ///
    /// Returns `None` for an empty canvas or a zero-area marquee.
    pub fn from_marquee(vp: &Mat4, canvas_size: Vec2, min: Vec2, max: Vec2) -> Option<Self> {
        if canvas_size.x <= 0.0 || canvas_size.y <= 0.0 {
            return None;
        }

        let lo = min.min(max);
        let hi = min.max(max);

        let x0 = 2.0 * lo.x / canvas_size.x - 1.0;
        let x1 = 2.0 * hi.x / canvas_size.x - 1.0;
        let y0 = 1.0 - 2.0 * hi.y / canvas_size.y;
        let y1 = 1.0 - 2.0 * lo.y / canvas_size.y;

        if x1 - x0 <= f32::EPSILON || y1 - y0 <= f32::EPSILON {
            return None;
        }

        let sx = 2.0 / (x1 - x0);
        let sy = 2.0 / (y1 - y0);
        let cx = (x0 + x1) * 0.5;
        let cy = (y0 + y1) * 0.5;

        let pick = Mat4::from_cols(
            Vec4::new(sx, 0.0, 0.0, 0.0),
            Vec4::new(0.0, sy, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(-sx * cx, -sy * cy, 0.0, 1.0),
        );

        Some(Self::from_view_projection(&(pick * *vp)))
    }

    /// Express this frustum in another coordinate space.
    ///
    /// `local_to_world` maps the target space into the frustum's current
    /// space; a point `p` is inside the result iff `local_to_world * p` is
    /// inside `self`.
    pub fn transformed(&self, local_to_world: &Mat4) -> Self {
        let transpose = local_to_world.transpose();
        Self::from_planes(self.planes.map(|plane| transpose * plane))
    }

    /// The six planes: left, right, bottom, top, near, far
    pub fn planes(&self) -> &[Vec4; 6] {
        &self.planes
    }

    /// Test vertex selector of one plane (bit per axis, set = max corner)
    pub fn test_vertex(&self, plane: usize) -> u8 {
        self.test_vertices[plane]
    }

    /// `true` if the point is on the inner side of all six planes.
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|plane| plane.truncate().dot(point) + plane.w >= 0.0)
    }

    /// Test if an AABB intersects this frustum.
    ///
    /// Returns `true` if the AABB is (potentially) inside or intersecting.
    /// May return false positives (conservative), never false negatives.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        self.classify_aabb(aabb) != IntersectTest::Outside
    }

    /// Classify an AABB against the frustum (3-way test).
    ///
    /// Tests both the positive vertex (p-vertex) and negative vertex (n-vertex)
    /// against each plane:
    /// - If the p-vertex is outside any plane → `Outside` (early out)
    /// - If the n-vertex is outside any plane → at least `Intersect`
    /// - If all n-vertices are inside all planes → `Inside`
    pub fn classify_aabb(&self, aabb: &AABB) -> IntersectTest {
        let mut all_inside = true;

        for (plane, &selector) in self.planes.iter().zip(&self.test_vertices) {
            let normal = plane.truncate();

            let p_vertex = Vec3::new(
                if selector & 1 != 0 { aabb.max.x } else { aabb.min.x },
                if selector & 2 != 0 { aabb.max.y } else { aabb.min.y },
                if selector & 4 != 0 { aabb.max.z } else { aabb.min.z },
            );

            if normal.dot(p_vertex) + plane.w < 0.0 {
                return IntersectTest::Outside;
            }

            let n_vertex = Vec3::new(
                if selector & 1 != 0 { aabb.min.x } else { aabb.max.x },
                if selector & 2 != 0 { aabb.min.y } else { aabb.max.y },
                if selector & 4 != 0 { aabb.min.z } else { aabb.max.z },
            );

            if normal.dot(n_vertex) + plane.w < 0.0 {
                all_inside = false;
            }
        }

        if all_inside { IntersectTest::Inside } else { IntersectTest::Intersect }
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
