/// Nested ray-pick results: object → mesh → bucket → primitive.
///
/// Only non-empty levels are kept: an object appears only if at least one
/// of its primitives was hit.

use glam::Vec3;
use crate::kdtree::Prim;
use crate::scene::SceneObjectKey;

/// An exact ray/primitive hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimHit {
    pub prim: Prim,
    /// Hit point (closest point on the primitive for points and lines)
    pub world_pos: Vec3,
    /// Distance from the ray origin along the ray
    pub distance: f32,
}

/// Hits within one geometry bucket, nearest first
#[derive(Debug, Clone, PartialEq)]
pub struct BucketHit {
    pub bucket_index: usize,
    pub prims: Vec<PrimHit>,
}

/// Hits within one mesh of an object
#[derive(Debug, Clone, PartialEq)]
pub struct MeshHit {
    pub mesh_index: usize,
    pub buckets: Vec<BucketHit>,
}

/// Hits within one scene object
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectHit {
    pub object: SceneObjectKey,
    pub meshes: Vec<MeshHit>,
}

/// A primitive hit flattened with its location in the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub object: SceneObjectKey,
    pub mesh_index: usize,
    pub bucket_index: usize,
    pub hit: PrimHit,
}

/// Result of [`Picker::ray_pick`](super::Picker::ray_pick).
#[derive(Debug, Clone, PartialEq)]
pub struct RayPickResult {
    /// World-space ray origin
    pub origin: Vec3,
    /// Normalized world-space ray direction
    pub dir: Vec3,
    /// Hit objects, in tree traversal order
    pub objects: Vec<ObjectHit>,
}

impl RayPickResult {
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Keys of every hit object
    pub fn object_keys(&self) -> Vec<SceneObjectKey> {
        self.objects.iter().map(|object| object.object).collect()
    }

    /// Every primitive hit, flattened
    pub fn hits(&self) -> impl Iterator<Item = PickHit> + '_ {
        self.objects.iter().flat_map(|object| {
            object.meshes.iter().flat_map(move |mesh| {
                mesh.buckets.iter().flat_map(move |bucket| {
                    bucket.prims.iter().map(move |hit| PickHit {
                        object: object.object,
                        mesh_index: mesh.mesh_index,
                        bucket_index: bucket.bucket_index,
                        hit: *hit,
                    })
                })
            })
        })
    }

    /// Nearest primitive hit along the ray
    pub fn closest(&self) -> Option<PickHit> {
        self.hits().min_by(|a, b| a.hit.distance.total_cmp(&b.hit.distance))
    }
}
