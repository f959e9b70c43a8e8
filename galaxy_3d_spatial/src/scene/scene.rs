/// Scene: a collection of pickable objects.
///
/// Uses a SlotMap for O(1) insert/remove with stable keys.
/// Each object owns meshes that place shared geometry in the world.

use std::sync::Arc;
use glam::{Mat4, Vec3};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use crate::boundary::{AABB, Boundary};
use crate::error::{Error, Result};
use crate::{engine_bail, engine_debug};
use super::geometry::Geometry;

new_key_type! {
    /// Stable key for a scene object
    pub struct SceneObjectKey;
}

// ============================================================================
// MESH
// ============================================================================

/// Places a shared geometry in the world.
///
/// The local → world transform is `translation(origin) * matrix`. The
/// origin offset lets large-coordinate scenes keep `matrix` small.
#[derive(Debug, Clone)]
pub struct Mesh {
    geometry: Arc<Geometry>,
    matrix: Mat4,
    origin: Vec3,
}

impl Mesh {
    /// Create a mesh with a zero origin offset
    pub fn new(geometry: Arc<Geometry>, matrix: Mat4) -> Self {
        Self { geometry, matrix, origin: Vec3::ZERO }
    }

    /// Builder-style origin offset
    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    pub fn geometry(&self) -> &Arc<Geometry> {
        &self.geometry
    }

    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Full local → world transform
    pub fn local_to_world(&self) -> Mat4 {
        Mat4::from_translation(self.origin) * self.matrix
    }

    /// World-space boundary of every bucket of the geometry
    pub fn world_aabb(&self) -> Result<AABB> {
        let local_to_world = self.local_to_world();
        let mut aabb = AABB::collapsed();
        for bucket in self.geometry.buckets() {
            for position in self.geometry.world_positions(bucket, &local_to_world)? {
                aabb.expand_point(position.to_array());
            }
        }
        Ok(aabb)
    }
}

// ============================================================================
// SCENE OBJECT
// ============================================================================

/// A pickable entity with a world-space boundary and one or more meshes.
#[derive(Debug, Clone)]
pub struct SceneObject {
    id: String,
    aabb: AABB,
    meshes: Vec<Mesh>,
}

impl SceneObject {
    /// Create an object, computing its boundary from its meshes.
    ///
    /// Fails if the meshes hold no vertices.
    pub fn new(id: impl Into<String>, meshes: Vec<Mesh>) -> Result<Self> {
        let id = id.into();
        let mut aabb = AABB::collapsed();
        for mesh in &meshes {
            aabb.expand(&mesh.world_aabb()?);
        }
        if aabb.is_collapsed() {
            engine_bail!(Error::InvalidGeometry, "galaxy3d::Scene",
                "Scene object '{}' has no vertices", id);
        }
        Ok(Self { id, aabb, meshes })
    }

    /// User identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// World-space boundary
    pub fn aabb(&self) -> &AABB {
        &self.aabb
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }
}

// ============================================================================
// SCENE
// ============================================================================

/// A pickable scene.
///
/// Objects are managed via stable keys (SceneObjectKey). Keys remain valid
/// even after other objects are removed. Object ids are unique.
#[derive(Debug, Default)]
pub struct Scene {
    objects: SlotMap<SceneObjectKey, SceneObject>,
    ids: FxHashMap<String, SceneObjectKey>,
}

impl Scene {
    /// Create a new empty scene
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
            ids: FxHashMap::default(),
        }
    }

    /// Create an object from meshes and insert it.
    pub fn create_object(&mut self, id: impl Into<String>, meshes: Vec<Mesh>) -> Result<SceneObjectKey> {
        let object = SceneObject::new(id, meshes)?;
        self.add_object(object)
    }

    /// Insert an existing object. Fails if its id is already used.
    pub fn add_object(&mut self, object: SceneObject) -> Result<SceneObjectKey> {
        if self.ids.contains_key(object.id()) {
            engine_bail!(Error::InvalidInput, "galaxy3d::Scene",
                "Scene object id '{}' already exists", object.id());
        }
        let id = object.id().to_string();
        let key = self.objects.insert(object);
        engine_debug!("galaxy3d::Scene", "Added scene object '{}'", id);
        self.ids.insert(id, key);
        Ok(key)
    }

    /// Remove an object. Returns it if the key was valid.
    pub fn remove_object(&mut self, key: SceneObjectKey) -> Option<SceneObject> {
        let object = self.objects.remove(key)?;
        self.ids.remove(object.id());
        Some(object)
    }

    pub fn object(&self, key: SceneObjectKey) -> Option<&SceneObject> {
        self.objects.get(key)
    }

    /// Look up an object key by its user identifier
    pub fn object_key(&self, id: &str) -> Option<SceneObjectKey> {
        self.ids.get(id).copied()
    }

    /// Iterate over all object keys.
    pub fn object_keys(&self) -> impl Iterator<Item = SceneObjectKey> + '_ {
        self.objects.keys()
    }

    /// Iterate over all `(key, object)` pairs.
    pub fn objects(&self) -> impl Iterator<Item = (SceneObjectKey, &SceneObject)> + '_ {
        self.objects.iter()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Union of every object's boundary (collapsed if the scene is empty)
    pub fn aabb(&self) -> AABB {
        let mut aabb = AABB::collapsed();
        for object in self.objects.values() {
            aabb.expand(object.aabb());
        }
        aabb
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
