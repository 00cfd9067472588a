//! Scene data structures: meshes, materials, textures, instances and the scene root.
//!
//! - `instance` holds per-object transforms and their GPU instance form
//! - `material` contains matcap textures and materials (CPU side)
//! - `mesh` contains vertex layouts and GPU mesh buffers
//! - `scene_graph` is the append-only scene root
//! - `texture` contains the GPU texture wrapper

pub mod instance;
pub mod material;
pub mod mesh;
pub mod scene_graph;
pub mod texture;
