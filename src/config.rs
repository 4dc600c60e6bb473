//! Design constants of the demo.
//!
//! Nothing here is read from disk or the environment: [`SceneConfig::default`]
//! is the scene. Tests build variations of it to shrink counts or pin the seed.

use cgmath::Vector3;

use crate::text::TextGeometryParams;

/// The three primitive shapes scattered around the text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Torus,
    Sphere,
    Plane,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 3] = [Self::Torus, Self::Sphere, Self::Plane];

    /// Whether the render loop spins instances of this kind.
    pub fn spins(self) -> bool {
        !matches!(self, Self::Sphere)
    }
}

/// Per-shape placement and shading.
#[derive(Clone, Debug)]
pub struct PrimitiveConfig {
    /// Positions are drawn from `-half_extent..=half_extent` per axis.
    pub half_extent: Vector3<f32>,
    /// Index into [`SceneConfig::matcaps`].
    pub matcap: usize,
}

#[derive(Clone, Debug)]
pub struct TorusDims {
    pub radius: f32,
    pub tube: f32,
    pub radial_segments: u32,
    pub tubular_segments: u32,
}

#[derive(Clone, Debug)]
pub struct SphereDims {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

#[derive(Clone, Debug)]
pub struct CameraConfig {
    pub fovy_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub damping_factor: f32,
}

#[derive(Clone, Debug)]
pub struct SceneConfig {
    /// Instances created per primitive kind.
    pub primitive_count: usize,
    pub torus: PrimitiveConfig,
    pub sphere: PrimitiveConfig,
    pub plane: PrimitiveConfig,
    pub torus_dims: TorusDims,
    pub sphere_dims: SphereDims,
    pub plane_size: f32,
    /// Angular speed (radians per second) around x and y for spinning primitives.
    pub spin_speed: [f32; 2],

    pub label: String,
    pub text: TextGeometryParams,
    pub text_scale: [f32; 3],
    pub text_matcap: usize,
    pub font_path: String,

    pub matcaps: Vec<String>,

    pub camera: CameraConfig,
    pub max_pixel_ratio: f64,
    pub spin_radians: f32,
    pub spin_seconds: f32,
    pub double_click_millis: u64,
    pub double_click_distance: f64,
    pub clear_colour: wgpu::Color,
    /// Fixes the populator's RNG; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl SceneConfig {
    pub fn primitive(&self, kind: PrimitiveKind) -> &PrimitiveConfig {
        match kind {
            PrimitiveKind::Torus => &self.torus,
            PrimitiveKind::Sphere => &self.sphere,
            PrimitiveKind::Plane => &self.plane,
        }
    }

    /// Matcap slots some material actually samples, in ascending order.
    pub fn used_matcaps(&self) -> Vec<usize> {
        let mut used: Vec<usize> = PrimitiveKind::ALL
            .iter()
            .map(|kind| self.primitive(*kind).matcap)
            .chain([self.text_matcap])
            .filter(|slot| *slot < self.matcaps.len())
            .collect();
        used.sort_unstable();
        used.dedup();
        used
    }

    /// Matcap slots no material references.
    pub fn unused_matcaps(&self) -> Vec<usize> {
        let used = self.used_matcaps();
        (0..self.matcaps.len())
            .filter(|slot| !used.contains(slot))
            .collect()
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            primitive_count: 80,
            torus: PrimitiveConfig {
                half_extent: Vector3::new(10.0, 10.0, 10.0),
                matcap: 2,
            },
            sphere: PrimitiveConfig {
                half_extent: Vector3::new(10.0, 10.0, 7.5),
                matcap: 6,
            },
            plane: PrimitiveConfig {
                half_extent: Vector3::new(10.0, 10.0, 7.5),
                matcap: 4,
            },
            torus_dims: TorusDims {
                radius: 0.3,
                tube: 0.2,
                radial_segments: 20,
                tubular_segments: 45,
            },
            sphere_dims: SphereDims {
                radius: 0.3,
                width_segments: 32,
                height_segments: 16,
            },
            plane_size: 1.0,
            spin_speed: [0.3, 0.2],

            label: "Matcap Text".to_string(),
            text: TextGeometryParams::default(),
            text_scale: [2.0, 2.0, 3.0],
            text_matcap: 7,
            font_path: "fonts/helvetiker_regular.typeface.json".to_string(),

            matcaps: (1..=8)
                .map(|i| format!("textures/matcaps/{i}.png"))
                .collect(),

            camera: CameraConfig {
                fovy_degrees: 75.0,
                near: 0.1,
                far: 100.0,
                position: [1.0, 1.0, 2.0],
                target: [0.0, 0.0, 0.0],
                damping_factor: 0.05,
            },
            max_pixel_ratio: 2.0,
            spin_radians: 15.0,
            spin_seconds: 2.0,
            double_click_millis: 300,
            double_click_distance: 4.0,
            clear_colour: wgpu::Color::BLACK,
            seed: None,
        }
    }
}
