/// Payloads stored in the specialized trees.

use crate::error::{Error, Result};
use crate::engine_bail;
use crate::scene::{PrimitiveType, SceneObjectKey};

/// A primitive as vertex indices into its position buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prim {
    Point(u32),
    Line([u32; 2]),
    Triangle([u32; 3]),
}

impl Prim {
    /// Vertex indices (1, 2 or 3 of them)
    pub fn indices(&self) -> &[u32] {
        match self {
            Prim::Point(index) => std::slice::from_ref(index),
            Prim::Line(indices) => indices,
            Prim::Triangle(indices) => indices,
        }
    }

    pub fn primitive_type(&self) -> PrimitiveType {
        match self {
            Prim::Point(_) => PrimitiveType::Points,
            Prim::Line(_) => PrimitiveType::Lines,
            Prim::Triangle(_) => PrimitiveType::Triangles,
        }
    }
}

/// A primitive annotated with where it comes from in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneObjectPrim {
    pub object: SceneObjectKey,
    /// Index into the object's meshes
    pub mesh_index: usize,
    /// Index into the mesh geometry's buckets
    pub bucket_index: usize,
    pub prim: Prim,
}

/// Split a vertex range into primitives.
///
/// Without `indices`, vertices are consumed in order. Fails if the index
/// buffer is not a whole number of primitives or references a vertex
/// past `vertex_count`. A trailing partial primitive of a non-indexed
/// buffer is ignored.
pub(crate) fn collect_prims(
    primitive: PrimitiveType,
    vertex_count: usize,
    indices: Option<&[u32]>,
) -> Result<Vec<Prim>> {
    let arity = primitive.vertex_count();

    let sequential: Vec<u32>;
    let indices: &[u32] = match indices {
        Some(indices) => {
            if indices.len() % arity != 0 {
                engine_bail!(Error::InvalidGeometry, "galaxy3d::KdTree3",
                    "Index buffer length {} is not a multiple of {} for {:?}",
                    indices.len(), arity, primitive);
            }
            if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                engine_bail!(Error::InvalidGeometry, "galaxy3d::KdTree3",
                    "Index {} out of range for {} vertices", bad, vertex_count);
            }
            indices
        }
        None => {
            sequential = (0..vertex_count as u32).collect();
            &sequential
        }
    };

    Ok(match primitive {
        PrimitiveType::Points => indices.iter().map(|&i| Prim::Point(i)).collect(),
        PrimitiveType::Lines => indices
            .chunks_exact(2)
            .map(|c| Prim::Line([c[0], c[1]]))
            .collect(),
        PrimitiveType::Triangles => indices
            .chunks_exact(3)
            .map(|c| Prim::Triangle([c[0], c[1], c[2]]))
            .collect(),
    })
}

#[cfg(test)]
#[path = "items_tests.rs"]
mod tests;
