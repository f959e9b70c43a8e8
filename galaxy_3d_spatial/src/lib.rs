/*!
# Galaxy 3D Spatial

Spatial indexing and picking for Galaxy 3D scenes.

This crate indexes axis-aligned boundaries in a loose k-d tree, queries
the tree against boundaries, frustums and rays, and resolves ray and
marquee picks against a scene of quantized, bucketed geometry.

## Architecture

- **KdTree3**: Loose k-d tree over `AABB` or quantized `AABB16` boundaries
- **Builders**: Trees of primitives, of scene objects, or of scene object primitives
- **Queries**: Boundary, frustum and ray traversal with subtree pruning
- **Picker**: Ray and marquee picks with a per-bucket primitive tree cache
- **Scene**: Objects, meshes and geometry buckets consumed by the builders and the Picker
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod boundary;
pub mod camera;
pub mod compression;
pub mod scene;
pub mod kdtree;
pub mod pick;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton (logging front-end)
    pub use crate::engine::Engine;

    // Picking service
    pub use crate::pick::{Picker, PickerConfig};

    // Spatial index
    pub use crate::kdtree::KdTree3;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: engine_* macros are exported at the crate root for internal use
    }

    // Boundary sub-module
    pub mod boundary {
        pub use crate::boundary::*;
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Compression sub-module
    pub mod compression {
        pub use crate::compression::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }

    // Spatial index sub-module
    pub mod kdtree {
        pub use crate::kdtree::*;
    }

    // Picking sub-module
    pub mod pick {
        pub use crate::pick::*;
    }
}

// Re-export math library at crate root
pub use glam;
