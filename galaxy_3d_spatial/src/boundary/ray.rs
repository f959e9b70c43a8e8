/// Ray — half-line used for picking.
///
/// A ray starts at `origin` and extends along `dir` for `t >= 0`.
/// Rays built with [`Ray::new`] have a unit direction, so `t` is a
/// distance. Transformed rays keep an unnormalized direction; `t` stays
/// consistent between spaces because the affine map preserves the
/// parametrization.

use glam::{Mat4, Vec3};
use super::aabb::{AABB, IntersectTest};

/// Directions shorter than this are treated as parallel to a slab.
const PARALLEL_EPSILON: f32 = 1e-12;

/// Determinant threshold below which a triangle is considered edge-on.
const TRIANGLE_EPSILON: f32 = 1e-9;

/// A half-line `origin + t * dir`, `t >= 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point
    pub origin: Vec3,
    /// Direction (unit length when built with `new`)
    pub dir: Vec3,
}

/// Closest approach between a ray and a line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentApproach {
    /// Ray parameter of the closest point on the ray
    pub t: f32,
    /// Closest point on the segment
    pub point: Vec3,
    /// Distance between the two closest points
    pub distance: f32,
}

impl Ray {
    /// Create a ray with a normalized direction.
    ///
    /// Returns `None` when `dir` has zero length or any component is not finite.
    pub fn new(origin: Vec3, dir: Vec3) -> Option<Self> {
        if !origin.is_finite() || !dir.is_finite() {
            return None;
        }
        let dir = dir.try_normalize()?;
        Some(Self { origin, dir })
    }

    /// Point at parameter `t`
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }

    /// The same ray expressed in another space (direction not renormalized)
    pub fn transformed(&self, matrix: &Mat4) -> Ray {
        Ray {
            origin: matrix.transform_point3(self.origin),
            dir: matrix.transform_vector3(self.dir),
        }
    }

    /// Slab test against an AABB.
    ///
    /// Returns the entry and exit parameters `(t_near, t_far)` clamped to
    /// the ray (`t_near >= 0`), or `None` if the ray misses the box.
    pub fn intersect_aabb(&self, aabb: &AABB) -> Option<(f32, f32)> {
        let mut t_near = 0.0f32;
        let mut t_far = f32::INFINITY;

        for axis in 0..3 {
            let origin = self.origin[axis];
            let dir = self.dir[axis];
            let min = aabb.min[axis];
            let max = aabb.max[axis];

            if dir.abs() < PARALLEL_EPSILON {
                if origin < min || origin > max {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let mut t0 = (min - origin) * inv;
            let mut t1 = (max - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far {
                return None;
            }
        }

        Some((t_near, t_far))
    }

    /// Classify an AABB against the ray: `Outside` or `Intersect`.
    ///
    /// A ray has no volume, so nothing is ever `Inside`.
    pub fn classify_aabb(&self, aabb: &AABB) -> IntersectTest {
        match self.intersect_aabb(aabb) {
            Some(_) => IntersectTest::Intersect,
            None => IntersectTest::Outside,
        }
    }

    /// Möller–Trumbore ray/triangle intersection, both faces.
    ///
    /// Returns the ray parameter of the hit.
    pub fn intersect_triangle(&self, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
        let edge1 = b - a;
        let edge2 = c - a;
        let p = self.dir.cross(edge2);
        let det = edge1.dot(p);
        if det.abs() < TRIANGLE_EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = self.origin - a;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = self.dir.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(q) * inv_det;
        (t >= 0.0).then_some(t)
    }

    /// Closest approach between the ray and the segment `a..b`.
    pub fn closest_to_segment(&self, a: Vec3, b: Vec3) -> SegmentApproach {
        let seg = b - a;
        let w = self.origin - a;

        let dd = self.dir.dot(self.dir);
        let ss = seg.dot(seg);
        let ds = self.dir.dot(seg);
        let dw = self.dir.dot(w);
        let sw = seg.dot(w);

        let denom = dd * ss - ds * ds;

        // Segment parameter for the unconstrained lines, then clamp
        let mut s = if ss <= f32::EPSILON {
            0.0
        } else if denom.abs() <= f32::EPSILON * dd * ss {
            // Parallel: any segment point works, start from the one nearest the origin
            (sw / ss).clamp(0.0, 1.0)
        } else {
            ((dd * sw - ds * dw) / denom).clamp(0.0, 1.0)
        };

        let mut point = a + seg * s;
        let mut t = ((point - self.origin).dot(self.dir) / dd).max(0.0);

        // With t clamped at the origin, re-project the origin onto the segment
        if t == 0.0 && ss > f32::EPSILON {
            s = (sw / ss).clamp(0.0, 1.0);
            point = a + seg * s;
            t = ((point - self.origin).dot(self.dir) / dd).max(0.0);
        }

        SegmentApproach { t, point, distance: self.at(t).distance(point) }
    }

    /// Ray parameter and distance of the closest approach to a point.
    pub fn closest_to_point(&self, point: Vec3) -> (f32, f32) {
        let t = ((point - self.origin).dot(self.dir) / self.dir.dot(self.dir)).max(0.0);
        (t, self.at(t).distance(point))
    }
}

#[cfg(test)]
#[path = "ray_tests.rs"]
mod tests;
