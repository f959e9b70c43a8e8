//! Picking module
//!
//! Provides the Picker service (ray and marquee picks), its primitive tree
//! cache, and the nested ray-pick result types.

mod picker;
mod pick_result;
mod prims_cache;

pub use picker::{Picker, PickerConfig};
pub use pick_result::{BucketHit, MeshHit, ObjectHit, PickHit, PrimHit, RayPickResult};
pub use prims_cache::{PickPrims, PickPrimsCache, PickPrimsKey};
