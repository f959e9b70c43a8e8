/// PickPrimsCache — lazily built primitive trees, one per geometry bucket.
///
/// Building a primitive tree requires decompressing the bucket's
/// positions, so both the tree and the decompressed positions are kept
/// and shared through an `Arc`. Entries are evicted least-recently-used
/// once the cache reaches its capacity.

use std::sync::Arc;
use glam::Vec3;
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::kdtree::{build_prims_kdtree3, Prim, PrimsKdTree3};
use crate::scene::{Geometry, GeometryId};
use crate::{engine_bail, engine_debug, engine_trace};

/// Identifies one bucket of one geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PickPrimsKey {
    pub geometry: GeometryId,
    pub bucket_index: usize,
}

/// Primitive tree of a bucket, in the geometry's local space.
#[derive(Debug)]
pub struct PickPrims {
    /// Tree over local-space primitives
    pub tree: PrimsKdTree3,
    /// Decompressed local-space positions the tree's prims index into
    pub positions: Vec<Vec3>,
}

impl PickPrims {
    /// Decompress a bucket and build its primitive tree.
    pub fn build(geometry: &Geometry, bucket_index: usize, max_depth: usize) -> Result<Self> {
        let Some(bucket) = geometry.bucket(bucket_index) else {
            engine_bail!(Error::InvalidInput, "galaxy3d::PickPrimsCache",
                "Geometry {:?} has no bucket {} ({} buckets)",
                geometry.id(), bucket_index, geometry.bucket_count());
        };

        let positions = geometry.local_positions(bucket)?;
        let tree = build_prims_kdtree3(
            geometry.primitive(),
            bytemuck::cast_slice::<Vec3, f32>(&positions),
            bucket.indices(),
            max_depth,
        )?;
        Ok(Self { tree, positions })
    }

    /// Local-space vertices of a primitive
    pub fn vertices<'a>(&'a self, prim: &'a Prim) -> impl Iterator<Item = Vec3> + 'a {
        prim.indices().iter().map(move |&i| self.positions[i as usize])
    }

    /// Local-space centroid of a primitive
    pub fn centroid(&self, prim: &Prim) -> Vec3 {
        let count = prim.indices().len() as f32;
        self.vertices(prim).sum::<Vec3>() / count
    }
}

struct CacheEntry {
    prims: Arc<PickPrims>,
    last_used: u64,
}

/// LRU cache of [`PickPrims`], keyed by [`PickPrimsKey`].
pub struct PickPrimsCache {
    entries: FxHashMap<PickPrimsKey, CacheEntry>,
    /// `None` = unbounded
    capacity: Option<usize>,
    /// Max depth of the primitive trees
    max_depth: usize,
    /// Monotonic use counter for LRU ordering
    tick: u64,
    /// Number of trees built so far
    builds: usize,
}

impl PickPrimsCache {
    /// Create an empty cache. A capacity of 0 is treated as 1.
    pub fn new(capacity: Option<usize>, max_depth: usize) -> Self {
        Self {
            entries: FxHashMap::default(),
            capacity: capacity.map(|c| c.max(1)),
            max_depth,
            tick: 0,
            builds: 0,
        }
    }

    /// Return the cached primitive tree of a bucket, building it on a miss.
    pub fn get_or_build(&mut self, geometry: &Geometry, bucket_index: usize) -> Result<Arc<PickPrims>> {
        let key = PickPrimsKey { geometry: geometry.id(), bucket_index };
        self.tick += 1;

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.last_used = self.tick;
            return Ok(entry.prims.clone());
        }

        let prims = Arc::new(PickPrims::build(geometry, bucket_index, self.max_depth)?);
        self.builds += 1;
        engine_debug!("galaxy3d::PickPrimsCache",
            "Built pick prims for {:?}: {} prims, {} nodes",
            key, prims.tree.num_items(), prims.tree.num_nodes());

        if self.capacity.is_some_and(|capacity| self.entries.len() >= capacity) {
            self.evict_lru();
        }
        self.entries.insert(key, CacheEntry { prims: prims.clone(), last_used: self.tick });
        Ok(prims)
    }

    fn evict_lru(&mut self) {
        let oldest = self.entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(key, _)| *key);
        if let Some(key) = oldest {
            self.entries.remove(&key);
            engine_trace!("galaxy3d::PickPrimsCache", "Evicted pick prims for {:?}", key);
        }
    }

    /// Cached entry, without building or touching LRU order
    pub fn get(&self, key: &PickPrimsKey) -> Option<Arc<PickPrims>> {
        self.entries.get(key).map(|entry| entry.prims.clone())
    }

    pub fn contains(&self, key: &PickPrimsKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Number of primitive trees built (cache misses) since creation
    pub fn builds(&self) -> usize {
        self.builds
    }

    /// Drop every entry. Outstanding `Arc`s stay valid.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[path = "prims_cache_tests.rs"]
mod tests;
