//! Per-frame timing, the stop flag and the primitive spin.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use instant::Instant;

use crate::data_structures::scene_graph::SceneGraph;
use crate::populate::PrimitiveHandles;

/// Monotonic seconds since creation. Never reset.
#[derive(Clone, Copy, Debug)]
pub struct Clock {
    start: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared flag that ends the render loop on the next tick.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Sets the rotation of every spinning primitive from the elapsed time.
/// Spheres keep the rotation they were created with.
pub fn spin_primitives(
    scene: &mut SceneGraph,
    handles: &PrimitiveHandles,
    elapsed: f32,
    speed: [f32; 2],
) {
    for id in handles.spinning() {
        if let Some(node) = scene.node_mut(id) {
            node.transform.rotation.x = speed[0] * elapsed;
            node.transform.rotation.y = speed[1] * elapsed;
        }
    }
}
