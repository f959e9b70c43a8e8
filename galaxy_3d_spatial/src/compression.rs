//! Position quantization and decompression.
//!
//! Geometry stores vertex positions as 16-bit unsigned integers relative
//! to the geometry's boundary. A decompression matrix (scale then
//! translate) maps them back to floating-point local coordinates.

use glam::{Mat4, Vec3};
use crate::boundary::{AABB, Boundary};
use crate::error::{Error, Result};
use crate::engine_err;

/// Largest quantized coordinate
const QUANTIZED_MAX: f32 = u16::MAX as f32;

/// View a flat `[x, y, z, x, y, z, ...]` buffer as vertices.
///
/// Fails when the length is not a multiple of three.
pub fn as_vertices<S: bytemuck::Pod>(flat: &[S]) -> Result<&[[S; 3]]> {
    bytemuck::try_cast_slice(flat).map_err(|_| engine_err!(
        Error::InvalidGeometry,
        "galaxy3d::compression",
        "Position buffer length {} is not a multiple of 3",
        flat.len()
    ))
}

/// Decompress one quantized position.
pub fn decompress_position(quantized: [u16; 3], decompress_matrix: &Mat4) -> Vec3 {
    decompress_matrix.transform_point3(Vec3::new(
        quantized[0] as f32,
        quantized[1] as f32,
        quantized[2] as f32,
    ))
}

/// Decompress a flat quantized position buffer.
pub fn decompress_positions(quantized: &[u16], decompress_matrix: &Mat4) -> Result<Vec<Vec3>> {
    Ok(as_vertices(quantized)?
        .iter()
        .map(|&q| decompress_position(q, decompress_matrix))
        .collect())
}

/// Quantize positions to 16 bits over their own boundary.
///
/// Returns the flat quantized buffer and the matrix that decompresses it.
/// Axes with zero extent quantize to 0 and decompress to the boundary's
/// minimum on that axis.
pub fn quantize_positions(positions: &[Vec3]) -> (Vec<u16>, Mat4) {
    if positions.is_empty() {
        return (Vec::new(), Mat4::IDENTITY);
    }

    let aabb = AABB::from_points(positions.iter().map(|p| p.to_array()));
    let size = aabb.size();
    let scale = Vec3::select(size.cmpgt(Vec3::ZERO), size / QUANTIZED_MAX, Vec3::ONE);

    let mut quantized = Vec::with_capacity(positions.len() * 3);
    for position in positions {
        let q = ((*position - aabb.min) / scale).round().clamp(Vec3::ZERO, Vec3::splat(QUANTIZED_MAX));
        quantized.extend_from_slice(&[q.x as u16, q.y as u16, q.z as u16]);
    }

    let decompress_matrix = Mat4::from_translation(aabb.min) * Mat4::from_scale(scale);
    (quantized, decompress_matrix)
}

#[cfg(test)]
#[path = "compression_tests.rs"]
mod tests;
