/// Picker — resolves ray and marquee picks against a scene.
///
/// Two levels of trees are involved:
/// - a caller-owned tree of whole scene objects (world space), used to
///   find candidate objects
/// - one primitive tree per geometry bucket (local space), built on first
///   use and kept in the Picker's [`PickPrimsCache`]
///
/// Queries are moved into each mesh's local space instead of moving the
/// primitives into world space, so a geometry shared by many meshes is
/// decompressed and indexed once.
///
/// The cache is only mutated through `&mut self`. A Picker shared between
/// threads must be wrapped by the caller (e.g. `Mutex<Picker>`), which
/// serializes build-on-miss.

use std::sync::Arc;
use glam::{Mat3, Mat4, Vec2, Vec3};
use crate::boundary::{Frustum, IntersectTest, Ray};
use crate::camera::{Camera, Marquee};
use crate::error::{Error, Result};
use crate::kdtree::{
    build_scene_objects_kdtree3, search_kdtree3_with_frustum, search_kdtree3_with_ray_margin,
    Prim, SceneObjectsKdTree3, DEFAULT_MAX_DEPTH,
};
use crate::scene::{Geometry, PrimitiveType, Scene, SceneObject, SceneObjectKey};
use crate::{engine_bail, engine_debug, engine_err, engine_trace, engine_warn};
use super::pick_result::{BucketHit, MeshHit, ObjectHit, PrimHit, RayPickResult};
use super::prims_cache::{PickPrims, PickPrimsCache};

const SOURCE: &str = "galaxy3d::Picker";

/// Local → world transforms with a smaller determinant cannot be inverted
/// for ray picking.
const SINGULAR_EPSILON: f32 = 1e-12;

// ===== CONFIG =====

/// Picker configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PickerConfig {
    /// Max depth of the scene objects tree built by [`Picker::build_scene_objects_tree`]
    pub max_depth: usize,
    /// Max depth of the cached per-bucket primitive trees
    pub prims_max_depth: usize,
    /// Max cached primitive trees (`None` = unbounded)
    pub cache_capacity: Option<usize>,
    /// World-space distance within which a ray picks a point
    pub point_pick_radius: f32,
    /// World-space distance within which a ray picks a line
    pub line_pick_radius: f32,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            prims_max_depth: DEFAULT_MAX_DEPTH,
            cache_capacity: Some(1024),
            point_pick_radius: 0.05,
            line_pick_radius: 0.05,
        }
    }
}

// ===== PICKER =====

/// Stateful pick service owning the primitive tree cache.
pub struct Picker {
    config: PickerConfig,
    prims_cache: PickPrimsCache,
}

impl Default for Picker {
    fn default() -> Self {
        Self::new(PickerConfig::default())
    }
}

impl Picker {
    pub fn new(config: PickerConfig) -> Self {
        let prims_cache = PickPrimsCache::new(config.cache_capacity, config.prims_max_depth);
        Self { config, prims_cache }
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn prims_cache(&self) -> &PickPrimsCache {
        &self.prims_cache
    }

    /// Drop all cached primitive trees (e.g. after geometry changed)
    pub fn clear_cache(&mut self) {
        self.prims_cache.clear();
    }

    /// Build a scene objects tree over every object of the scene.
    pub fn build_scene_objects_tree(&self, scene: &Scene) -> Result<SceneObjectsKdTree3> {
        let keys: Vec<SceneObjectKey> = scene.object_keys().collect();
        build_scene_objects_kdtree3(scene, &keys, self.config.max_depth)
    }

    /// Cached primitive tree of one geometry bucket, built on first use.
    pub fn get_pick_prims(&mut self, geometry: &Geometry, bucket_index: usize) -> Result<Arc<PickPrims>> {
        self.prims_cache.get_or_build(geometry, bucket_index)
    }

    // ===== RAY PICK =====

    /// Pick primitives hit by the ray `origin + t * dir`, `t >= 0`.
    ///
    /// Triangles are hit exactly; points and lines are hit when the ray
    /// passes within their pick radius. Only primitives whose tree node is
    /// crossed by the ray are tested.
    pub fn ray_pick(
        &mut self,
        scene: &Scene,
        objects_tree: &SceneObjectsKdTree3,
        origin: Vec3,
        dir: Vec3,
    ) -> Result<RayPickResult> {
        let Some(ray) = Ray::new(origin, dir) else {
            engine_bail!(Error::InvalidInput, SOURCE,
                "Invalid pick ray: origin {}, dir {}", origin, dir);
        };

        let margin = self.config.point_pick_radius.max(self.config.line_pick_radius);
        let candidates = search_kdtree3_with_ray_margin(objects_tree, ray.origin, ray.dir, margin);

        let mut objects = Vec::new();
        for &key in candidates {
            let object = lookup(scene, key)?;
            let meshes = self.ray_pick_object(object, &ray)?;
            if !meshes.is_empty() {
                objects.push(ObjectHit { object: key, meshes });
            }
        }

        engine_trace!(SOURCE, "Ray pick from {}: {} objects hit", ray.origin, objects.len());
        Ok(RayPickResult { origin: ray.origin, dir: ray.dir, objects })
    }

    /// Ray pick through a canvas position of a camera.
    pub fn ray_pick_canvas(
        &mut self,
        scene: &Scene,
        objects_tree: &SceneObjectsKdTree3,
        camera: &Camera,
        canvas_pos: Vec2,
    ) -> Result<RayPickResult> {
        let Some(ray) = camera.canvas_ray(canvas_pos) else {
            engine_bail!(Error::InvalidInput, SOURCE,
                "No pick ray through canvas position {} (canvas size {})",
                canvas_pos, camera.canvas_size());
        };
        self.ray_pick(scene, objects_tree, ray.origin, ray.dir)
    }

    fn ray_pick_object(&mut self, object: &SceneObject, ray: &Ray) -> Result<Vec<MeshHit>> {
        let mut meshes = Vec::new();

        for (mesh_index, mesh) in object.meshes().iter().enumerate() {
            let geometry = mesh.geometry();
            let local_to_world = mesh.local_to_world();
            if local_to_world.determinant().abs() < SINGULAR_EPSILON {
                engine_warn!(SOURCE, "Skipping mesh {} of '{}': singular transform",
                    mesh_index, object.id());
                continue;
            }
            let world_to_local = local_to_world.inverse();
            let local_ray = ray.transformed(&world_to_local);

            let radius = match geometry.primitive() {
                PrimitiveType::Points => self.config.point_pick_radius,
                PrimitiveType::Lines => self.config.line_pick_radius,
                PrimitiveType::Triangles => 0.0,
            };
            let local_margin = radius * max_stretch(&world_to_local);

            let mut buckets = Vec::new();
            for (bucket_index, bucket) in geometry.buckets().iter().enumerate() {
                if bucket.is_empty() {
                    continue;
                }
                let pick_prims = self.get_pick_prims(geometry, bucket_index)?;

                let mut prims: Vec<PrimHit> = search_kdtree3_with_ray_margin(
                    &pick_prims.tree, local_ray.origin, local_ray.dir, local_margin,
                )
                .into_iter()
                .filter_map(|prim| exact_hit(ray, prim, &pick_prims, &local_to_world, radius))
                .collect();

                if !prims.is_empty() {
                    prims.sort_by(|a, b| a.distance.total_cmp(&b.distance));
                    buckets.push(BucketHit { bucket_index, prims });
                }
            }

            if !buckets.is_empty() {
                meshes.push(MeshHit { mesh_index, buckets });
            }
        }

        Ok(meshes)
    }

    // ===== MARQUEE PICK =====

    /// Pick objects inside a canvas-space marquee of a camera.
    ///
    /// A zero-area marquee selects nothing.
    pub fn marquee_pick(
        &mut self,
        scene: &Scene,
        objects_tree: &SceneObjectsKdTree3,
        camera: &Camera,
        marquee: &Marquee,
    ) -> Result<Vec<SceneObjectKey>> {
        let Some(frustum) = camera.marquee_frustum(marquee) else {
            engine_debug!(SOURCE, "Empty marquee {:?}, nothing selected", marquee);
            return Ok(Vec::new());
        };
        self.marquee_pick_frustum(scene, objects_tree, &frustum)
    }

    /// Pick objects inside a world-space frustum.
    ///
    /// Objects whose boundary is fully inside are selected directly. Others
    /// are selected when the centroid of any of their primitives is inside.
    pub fn marquee_pick_frustum(
        &mut self,
        scene: &Scene,
        objects_tree: &SceneObjectsKdTree3,
        frustum: &Frustum,
    ) -> Result<Vec<SceneObjectKey>> {
        let mut selected = Vec::new();

        for &key in search_kdtree3_with_frustum(objects_tree, frustum) {
            let object = lookup(scene, key)?;
            let included = match frustum.classify_aabb(object.aabb()) {
                IntersectTest::Outside => false,
                IntersectTest::Inside => true,
                IntersectTest::Intersect => self.any_centroid_inside(object, frustum)?,
            };
            if included {
                selected.push(key);
            }
        }

        engine_trace!(SOURCE, "Marquee pick: {} objects selected", selected.len());
        Ok(selected)
    }

    fn any_centroid_inside(&mut self, object: &SceneObject, frustum: &Frustum) -> Result<bool> {
        for mesh in object.meshes() {
            let geometry = mesh.geometry();
            let local_frustum = frustum.transformed(&mesh.local_to_world());

            for (bucket_index, bucket) in geometry.buckets().iter().enumerate() {
                if bucket.is_empty() {
                    continue;
                }
                let pick_prims = self.get_pick_prims(geometry, bucket_index)?;
                let inside = search_kdtree3_with_frustum(&pick_prims.tree, &local_frustum)
                    .into_iter()
                    .any(|prim| local_frustum.contains_point(pick_prims.centroid(prim)));
                if inside {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

fn lookup(scene: &Scene, key: SceneObjectKey) -> Result<&SceneObject> {
    scene.object(key).ok_or_else(|| engine_err!(Error::InvalidInput, SOURCE,
        "Scene object {:?} in the objects tree is not in the scene", key))
}

/// Upper bound on how much the matrix's linear part can lengthen a vector.
///
/// The Frobenius norm bounds the spectral norm, including for rotated
/// non-uniform scales where the longest axis underestimates it.
fn max_stretch(matrix: &Mat4) -> f32 {
    let linear = Mat3::from_mat4(*matrix);
    (linear.x_axis.length_squared() + linear.y_axis.length_squared() + linear.z_axis.length_squared()).sqrt()
}

/// Exact world-space test of a candidate primitive.
fn exact_hit(
    ray: &Ray,
    prim: &Prim,
    pick_prims: &PickPrims,
    local_to_world: &Mat4,
    radius: f32,
) -> Option<PrimHit> {
    let world = |i: u32| local_to_world.transform_point3(pick_prims.positions[i as usize]);

    match *prim {
        Prim::Triangle([a, b, c]) => {
            let t = ray.intersect_triangle(world(a), world(b), world(c))?;
            Some(PrimHit { prim: *prim, world_pos: ray.at(t), distance: t })
        }
        Prim::Line([a, b]) => {
            let approach = ray.closest_to_segment(world(a), world(b));
            (approach.distance <= radius).then_some(PrimHit {
                prim: *prim,
                world_pos: approach.point,
                distance: approach.t,
            })
        }
        Prim::Point(a) => {
            let point = world(a);
            let (t, distance) = ray.closest_to_point(point);
            (distance <= radius).then_some(PrimHit { prim: *prim, world_pos: point, distance: t })
        }
    }
}

#[cfg(test)]
#[path = "picker_tests.rs"]
mod tests;
