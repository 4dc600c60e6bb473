//! Engine data structures: geometry, GPU models, textures, scene graph and instances.
//!
//! - `geometry` holds CPU-side triangle meshes and the primitive generators
//! - `model` contains vertex layouts plus the GPU mesh and material wrappers
//! - `texture` contains GPU texture wrapper and creation utilities
//! - `instance` holds per-instance transformation and attribute data
//! - `scene_graph` owns nodes and the shared geometry/material registries

pub mod geometry;
pub mod instance;
pub mod model;
pub mod scene_graph;
pub mod texture;
