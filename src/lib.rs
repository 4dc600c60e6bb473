//! matcap-text
//!
//! Extruded 3D text floating in a field of instanced toruses, spheres and
//! planes, all shaded with matcap textures. Runs natively and in the browser.
//! The window-independent scene state lives in [`demo::Demo`] and can be
//! driven without a GPU; [`flow::run`] wires it to a window and wgpu.
//!
//! High-level modules
//! - `animation`: eased tweens
//! - `camera`: camera, projection with dirty tracking, orbit controls and uniforms
//! - `config`: the scene's design constants
//! - `context`: GPU context that owns surface, device, pipelines and renderer
//! - `data_structures`: geometry, instances, GPU meshes/materials, textures and the scene graph
//! - `demo`: the scene state advanced once per frame
//! - `flow`: the winit event loop
//! - `gui`: egui integration
//! - `panel`: the debug panel bound to the text node
//! - `pipelines`: the matcap render pipelines
//! - `populate`: random placement of the primitives
//! - `render`: instanced batch rendering of the scene graph
//! - `render_loop`: clock, stop handle and per-frame primitive spin
//! - `resources`: asset IO and background loading
//! - `text`: typeface fonts and text extrusion
//! - `viewport`: resize, double-click and fullscreen handling

pub mod animation;
pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod demo;
pub mod flow;
pub mod gui;
pub mod panel;
pub mod pipelines;
pub mod populate;
pub mod render;
pub mod render_loop;
pub mod resources;
pub mod text;
pub mod viewport;

pub use config::SceneConfig;
pub use demo::Demo;
pub use flow::{run, run_with_stop};
pub use render_loop::StopHandle;
