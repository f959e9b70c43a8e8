//! Geometry types consumed by picking.
//!
//! # Hierarchy
//!
//! - **Geometry**: primitive type, decompression matrix, and one or more buckets
//! - **GeometryBucket**: quantized positions plus an optional index buffer
//!
//! Buckets partition a large geometry so each one can use narrow indices.
//! They are also the unit at which primitive pick trees are cached.
//!
//! ```text
//! Geometry #7 (Triangles)
//! ├── positions_decompress_matrix
//! └── buckets
//!     ├── [0] positions_compressed, indices
//!     └── [1] positions_compressed, indices
//! ```

use glam::{Mat4, Vec3};
use crate::compression::{self, as_vertices};
use crate::error::Result;

// ============================================================================
// IDENTIFIERS
// ============================================================================

/// Identifier of a geometry, unique within the scene that shares it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryId(pub u32);

/// Kind of primitive a geometry is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// One vertex per primitive
    Points,
    /// Two vertices per primitive (line list)
    Lines,
    /// Three vertices per primitive (triangle list)
    Triangles,
}

impl PrimitiveType {
    /// Vertices per primitive
    pub fn vertex_count(self) -> usize {
        match self {
            PrimitiveType::Points => 1,
            PrimitiveType::Lines => 2,
            PrimitiveType::Triangles => 3,
        }
    }
}

// ============================================================================
// GEOMETRY BUCKET
// ============================================================================

/// A partition of a geometry's vertex and index data.
#[derive(Debug, Clone)]
pub struct GeometryBucket {
    /// Flat quantized positions `[x, y, z, ...]`
    positions_compressed: Vec<u16>,
    /// Flat primitive indices; `None` means vertices are used in order
    indices: Option<Vec<u32>>,
}

impl GeometryBucket {
    /// Create a bucket from quantized positions and optional indices
    pub fn new(positions_compressed: Vec<u16>, indices: Option<Vec<u32>>) -> Self {
        Self { positions_compressed, indices }
    }

    /// Flat quantized positions
    pub fn positions_compressed(&self) -> &[u16] {
        &self.positions_compressed
    }

    /// Flat index buffer, if indexed
    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions_compressed.len() / 3
    }

    /// `true` if the bucket cannot yield any primitive
    pub fn is_empty(&self) -> bool {
        self.vertex_count() == 0 || self.indices.as_ref().is_some_and(|i| i.is_empty())
    }
}

// ============================================================================
// GEOMETRY
// ============================================================================

/// Quantized, bucketed geometry shared by any number of meshes.
#[derive(Debug, Clone)]
pub struct Geometry {
    id: GeometryId,
    primitive: PrimitiveType,
    /// Maps quantized positions to local floating-point positions
    positions_decompress_matrix: Mat4,
    buckets: Vec<GeometryBucket>,
}

impl Geometry {
    /// Create a geometry from already quantized buckets
    pub fn new(
        id: GeometryId,
        primitive: PrimitiveType,
        positions_decompress_matrix: Mat4,
        buckets: Vec<GeometryBucket>,
    ) -> Self {
        Self { id, primitive, positions_decompress_matrix, buckets }
    }

    /// Quantize floating-point buckets over their common boundary.
    ///
    /// Each entry is `(positions, indices)` for one bucket.
    pub fn from_positions(
        id: GeometryId,
        primitive: PrimitiveType,
        buckets: Vec<(Vec<Vec3>, Option<Vec<u32>>)>,
    ) -> Self {
        let all_positions: Vec<Vec3> = buckets
            .iter()
            .flat_map(|(positions, _)| positions.iter().copied())
            .collect();
        let (quantized, matrix) = compression::quantize_positions(&all_positions);

        let mut offset = 0;
        let buckets = buckets
            .into_iter()
            .map(|(positions, indices)| {
                let end = offset + positions.len() * 3;
                let bucket = GeometryBucket::new(quantized[offset..end].to_vec(), indices);
                offset = end;
                bucket
            })
            .collect();

        Self::new(id, primitive, matrix, buckets)
    }

    /// Geometry identifier
    pub fn id(&self) -> GeometryId {
        self.id
    }

    /// Primitive type shared by all buckets
    pub fn primitive(&self) -> PrimitiveType {
        self.primitive
    }

    /// Quantized → local position matrix
    pub fn positions_decompress_matrix(&self) -> &Mat4 {
        &self.positions_decompress_matrix
    }

    /// All buckets
    pub fn buckets(&self) -> &[GeometryBucket] {
        &self.buckets
    }

    /// Bucket by index
    pub fn bucket(&self, index: usize) -> Option<&GeometryBucket> {
        self.buckets.get(index)
    }

    /// Number of buckets
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Decompressed local-space positions of one bucket
    pub fn local_positions(&self, bucket: &GeometryBucket) -> Result<Vec<Vec3>> {
        compression::decompress_positions(bucket.positions_compressed(), &self.positions_decompress_matrix)
    }

    /// Decompressed positions of one bucket, transformed by `local_to_world`
    pub fn world_positions(&self, bucket: &GeometryBucket, local_to_world: &Mat4) -> Result<Vec<Vec3>> {
        let matrix = *local_to_world * self.positions_decompress_matrix;
        Ok(as_vertices(bucket.positions_compressed())?
            .iter()
            .map(|&q| compression::decompress_position(q, &matrix))
            .collect())
    }
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
