/// Axis-aligned boundaries in floating-point and 16-bit quantized form.
///
/// Both flavors implement [`Boundary`], which is everything a `KdTree3`
/// needs from its node boundaries: collapse/expand, containment, overlap
/// classification and bisection along an axis.

use std::fmt::Debug;
use glam::{Mat4, Vec3};

// ===== INTERSECT TEST =====

/// Result of a 3-way classification of a node boundary against a query.
///
/// - `Outside` → skip the entire subtree
/// - `Inside` → collect the entire subtree without further testing
/// - `Intersect` → collect the node's items and test its children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntersectTest {
    /// Boundary is entirely outside the query shape
    Outside,
    /// Boundary partially overlaps the query shape
    Intersect,
    /// Boundary is entirely inside the query shape
    Inside,
}

// ===== BOUNDARY TRAIT =====

/// Operations a k-d tree needs from its node and item boundaries.
pub trait Boundary: Copy + Debug {
    /// Coordinate type of the corners (`f32`, `u16`)
    type Scalar: bytemuck::Pod + PartialOrd + Debug;

    /// An empty boundary with sentinel extremes, ready to be expanded.
    fn collapsed() -> Self;

    /// Grow to cover a point. Never shrinks.
    fn expand_point(&mut self, point: [Self::Scalar; 3]);

    /// Grow to cover another boundary. Never shrinks.
    fn expand(&mut self, other: &Self);

    /// `true` if `other` lies entirely within `self` (faces inclusive).
    fn contains(&self, other: &Self) -> bool;

    /// `true` if the two boundaries overlap or touch.
    fn intersects(&self, other: &Self) -> bool;

    /// Index (0 = x, 1 = y, 2 = z) of the axis with the greatest extent.
    ///
    /// Ties go to the lower axis.
    fn longest_axis(&self) -> usize;

    /// Bisect at the midpoint of `axis` into (lower half, upper half).
    fn split(&self, axis: usize) -> (Self, Self);

    /// `min <= max` on every axis and no NaN.
    fn is_valid(&self) -> bool;

    /// Widen into a floating-point boundary for frustum and ray tests.
    fn to_aabb(&self) -> AABB;

    /// Build the tightest boundary around a set of points.
    fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = [Self::Scalar; 3]>,
    {
        let mut boundary = Self::collapsed();
        for point in points {
            boundary.expand_point(point);
        }
        boundary
    }

    /// Classify `other` against `self` used as a query volume.
    fn classify(&self, other: &Self) -> IntersectTest {
        if !self.intersects(other) {
            IntersectTest::Outside
        } else if self.contains(other) {
            IntersectTest::Inside
        } else {
            IntersectTest::Intersect
        }
    }
}

// ===== AABB =====

/// Floating-point axis-aligned boundary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    /// Create from corners (no validation, see [`Boundary::is_valid`])
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create from `[xmin, ymin, zmin, xmax, ymax, zmax]`
    pub fn from_array(values: [f32; 6]) -> Self {
        Self {
            min: Vec3::new(values[0], values[1], values[2]),
            max: Vec3::new(values[3], values[4], values[5]),
        }
    }

    /// `[xmin, ymin, zmin, xmax, ymax, zmax]`
    pub fn to_array(&self) -> [f32; 6] {
        [self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z]
    }

    /// `true` while no point has been absorbed since `collapsed()`.
    pub fn is_collapsed(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Center point
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Extent along each axis
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Union of two boundaries
    pub fn union(&self, other: &AABB) -> AABB {
        AABB { min: self.min.min(other.min), max: self.max.max(other.max) }
    }

    /// Grow by `margin` on every side
    pub fn inflated(&self, margin: f32) -> AABB {
        AABB { min: self.min - Vec3::splat(margin), max: self.max + Vec3::splat(margin) }
    }

    /// `true` if the point lies within the boundary (faces inclusive)
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Transform this AABB by a matrix, returning a new AABB.
    ///
    /// Uses the Arvo method: projects each matrix axis onto the AABB extents
    /// for an exact (tight) result without transforming all 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        AABB { min: new_min, max: new_max }
    }
}

impl Boundary for AABB {
    type Scalar = f32;

    fn collapsed() -> Self {
        AABB { min: Vec3::splat(f32::MAX), max: Vec3::splat(-f32::MAX) }
    }

    fn expand_point(&mut self, point: [f32; 3]) {
        let point = Vec3::from_array(point);
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    fn expand(&mut self, other: &Self) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    fn contains(&self, other: &Self) -> bool {
        self.min.x <= other.min.x && self.max.x >= other.max.x
        && self.min.y <= other.min.y && self.max.y >= other.max.y
        && self.min.z <= other.min.z && self.max.z >= other.max.z
    }

    fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x
        && self.min.y <= other.max.y && self.max.y >= other.min.y
        && self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    fn longest_axis(&self) -> usize {
        longest_axis(self.size().to_array())
    }

    fn split(&self, axis: usize) -> (Self, Self) {
        let mid = (self.min[axis] + self.max[axis]) * 0.5;
        let mut lower = *self;
        let mut upper = *self;
        lower.max[axis] = mid;
        upper.min[axis] = mid;
        (lower, upper)
    }

    fn is_valid(&self) -> bool {
        !self.min.is_nan() && !self.max.is_nan() && self.min.cmple(self.max).all()
    }

    fn to_aabb(&self) -> AABB {
        *self
    }
}

// ===== AABB16 =====

/// Quantized axis-aligned boundary over 16-bit unsigned coordinates.
///
/// Used for trees built directly over compressed vertex positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AABB16 {
    /// Minimum corner (x, y, z)
    pub min: [u16; 3],
    /// Maximum corner (x, y, z)
    pub max: [u16; 3],
}

impl AABB16 {
    /// Create from corners (no validation)
    pub fn new(min: [u16; 3], max: [u16; 3]) -> Self {
        Self { min, max }
    }

    /// `true` while no point has been absorbed since `collapsed()`.
    pub fn is_collapsed(&self) -> bool {
        (0..3).any(|i| self.min[i] > self.max[i])
    }
}

impl Boundary for AABB16 {
    type Scalar = u16;

    fn collapsed() -> Self {
        AABB16 { min: [u16::MAX; 3], max: [0; 3] }
    }

    fn expand_point(&mut self, point: [u16; 3]) {
        for i in 0..3 {
            self.min[i] = self.min[i].min(point[i]);
            self.max[i] = self.max[i].max(point[i]);
        }
    }

    fn expand(&mut self, other: &Self) {
        for i in 0..3 {
            self.min[i] = self.min[i].min(other.min[i]);
            self.max[i] = self.max[i].max(other.max[i]);
        }
    }

    fn contains(&self, other: &Self) -> bool {
        (0..3).all(|i| self.min[i] <= other.min[i] && self.max[i] >= other.max[i])
    }

    fn intersects(&self, other: &Self) -> bool {
        (0..3).all(|i| self.min[i] <= other.max[i] && self.max[i] >= other.min[i])
    }

    fn longest_axis(&self) -> usize {
        longest_axis([0, 1, 2].map(|i| self.max[i] as f32 - self.min[i] as f32))
    }

    fn split(&self, axis: usize) -> (Self, Self) {
        // Widen before adding so the sum cannot overflow
        let mid = ((u32::from(self.min[axis]) + u32::from(self.max[axis])) / 2) as u16;
        let mut lower = *self;
        let mut upper = *self;
        lower.max[axis] = mid;
        upper.min[axis] = mid;
        (lower, upper)
    }

    fn is_valid(&self) -> bool {
        !self.is_collapsed()
    }

    fn to_aabb(&self) -> AABB {
        AABB {
            min: Vec3::new(self.min[0] as f32, self.min[1] as f32, self.min[2] as f32),
            max: Vec3::new(self.max[0] as f32, self.max[1] as f32, self.max[2] as f32),
        }
    }
}

/// Axis of greatest extent; strict `>` keeps the lower axis on ties.
fn longest_axis(size: [f32; 3]) -> usize {
    let mut axis = 0;
    if size[1] > size[axis] {
        axis = 1;
    }
    if size[2] > size[axis] {
        axis = 2;
    }
    axis
}

#[cfg(test)]
#[path = "aabb_tests.rs"]
mod tests;
