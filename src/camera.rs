//! Camera, projection and orbit controls.
//!
//! The camera looks at a target point. [`OrbitControls`] move the camera on a
//! sphere around that target with inertia: input accumulates into a pending
//! delta and every [`OrbitControls::update`] applies a fraction of it and
//! decays the rest.

use std::f32::consts::PI;

use cgmath::{InnerSpace, Matrix4, Point3, Rad, Vector3, perspective};
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

use crate::config::CameraConfig;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

const MIN_POLAR: f32 = 0.000_001;

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
}

impl Camera {
    pub fn new<P: Into<Point3<f32>>, T: Into<Point3<f32>>>(position: P, target: T) -> Self {
        Self {
            position: position.into(),
            target: target.into(),
        }
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.target, Vector3::unit_y())
    }

    pub fn distance(&self) -> f32 {
        (self.position - self.target).magnitude()
    }
}

/// Perspective projection. Changing the aspect only marks the projection as
/// dirty; the matrix is rebuilt by [`Projection::update_matrix`].
#[derive(Clone, Debug)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
    dirty: bool,
    matrix: Matrix4<f32>,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        let aspect = if width > 0 && height > 0 {
            width as f32 / height as f32
        } else {
            1.0
        };
        let mut projection = Self {
            aspect,
            fovy: fovy.into(),
            znear,
            zfar,
            dirty: true,
            matrix: Matrix4::from_scale(1.0),
        };
        projection.update_matrix();
        projection
    }

    pub fn from_config(config: &CameraConfig, width: f32, height: f32) -> Self {
        let mut projection = Self::new(
            1,
            1,
            cgmath::Deg(config.fovy_degrees),
            config.near,
            config.far,
        );
        if width > 0.0 && height > 0.0 {
            projection.set_aspect(width / height);
        }
        projection
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.dirty = true;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn fovy(&self) -> Rad<f32> {
        self.fovy
    }

    pub fn needs_update(&self) -> bool {
        self.dirty
    }

    /// Rebuilds the matrix if the projection changed and returns it.
    pub fn update_matrix(&mut self) -> Matrix4<f32> {
        if self.dirty {
            self.matrix =
                OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
            self.dirty = false;
        }
        self.matrix
    }
}

/// Radius/polar/azimuth around the y axis, polar measured from +y.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Spherical {
    radius: f32,
    phi: f32,
    theta: f32,
}

impl Spherical {
    fn from_offset(offset: Vector3<f32>) -> Self {
        let radius = offset.magnitude();
        if radius == 0.0 {
            return Self {
                radius,
                phi: 0.0,
                theta: 0.0,
            };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vector3<f32> {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vector3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DragState {
    None,
    Rotate,
    Pan,
}

/// Orbit camera controls with damping.
///
/// Left drag rotates around the target, right drag pans, the wheel dollies.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Height of the viewport in the same unit as cursor positions.
    viewport_height: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    pan_offset: Vector3<f32>,
    drag: DragState,
    cursor: Option<(f64, f64)>,
}

impl OrbitControls {
    pub fn new(damping_factor: f32, viewport_height: f32) -> Self {
        Self {
            damping_factor,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            viewport_height: viewport_height.max(1.0),
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            pan_offset: Vector3::new(0.0, 0.0, 0.0),
            drag: DragState::None,
            cursor: None,
        }
    }

    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height.max(1.0);
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.delta_theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.delta_phi -= angle;
    }

    /// `factor < 1` moves the camera closer.
    pub fn dolly(&mut self, factor: f32) {
        self.scale *= factor;
    }

    /// Pans by a world-space offset applied to both camera and target.
    pub fn pan(&mut self, offset: Vector3<f32>) {
        self.pan_offset += offset;
    }

    /// Last cursor position seen, in physical pixels.
    pub fn cursor(&self) -> Option<PhysicalPosition<f64>> {
        self.cursor.map(|(x, y)| PhysicalPosition::new(x, y))
    }

    /// Whether any rotation, dolly or pan is still being damped out.
    pub fn is_moving(&self) -> bool {
        const EPS: f32 = 1e-6;
        self.delta_theta.abs() > EPS
            || self.delta_phi.abs() > EPS
            || (self.scale - 1.0).abs() > EPS
            || self.pan_offset.magnitude2() > EPS * EPS
    }

    pub fn handle_window_events(&mut self, event: &WindowEvent, camera: &Camera, fovy: Rad<f32>) {
        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                self.drag = match (state, button) {
                    (ElementState::Pressed, MouseButton::Left) => DragState::Rotate,
                    (ElementState::Pressed, MouseButton::Right) => DragState::Pan,
                    (ElementState::Released, _) => DragState::None,
                    _ => self.drag,
                };
            }
            WindowEvent::CursorMoved { position, .. } => {
                let current = (position.x, position.y);
                if let Some((x, y)) = self.cursor {
                    let dx = (current.0 - x) as f32;
                    let dy = (current.1 - y) as f32;
                    match self.drag {
                        DragState::Rotate => self.handle_rotate(dx, dy),
                        DragState::Pan => self.handle_pan(dx, dy, camera, fovy),
                        DragState::None => (),
                    }
                }
                self.cursor = Some(current);
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.drag = DragState::None;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
                let zoom_scale = 0.95_f32.powf(self.zoom_speed);
                if scroll > 0.0 {
                    self.dolly(zoom_scale);
                } else if scroll < 0.0 {
                    self.dolly(1.0 / zoom_scale);
                }
            }
            _ => (),
        }
    }

    fn handle_rotate(&mut self, dx: f32, dy: f32) {
        self.rotate_left(2.0 * PI * dx / self.viewport_height * self.rotate_speed);
        self.rotate_up(2.0 * PI * dy / self.viewport_height * self.rotate_speed);
    }

    fn handle_pan(&mut self, dx: f32, dy: f32, camera: &Camera, fovy: Rad<f32>) {
        let offset = camera.position - camera.target;
        let target_distance = offset.magnitude() * (fovy.0 / 2.0).tan();
        let forward = -offset.normalize();
        let right = forward.cross(Vector3::unit_y()).normalize();
        let up = right.cross(forward);
        let scale = 2.0 * target_distance / self.viewport_height * self.pan_speed;
        self.pan(-right * dx * scale + up * dy * scale);
    }

    /// Applies one damping step to the camera. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        if !self.is_moving() {
            self.scale = 1.0;
            return false;
        }
        let before = camera.clone();
        let mut spherical = Spherical::from_offset(camera.position - camera.target);

        spherical.theta += self.delta_theta * self.damping_factor;
        spherical.phi += self.delta_phi * self.damping_factor;
        spherical.phi = spherical.phi.clamp(MIN_POLAR, PI - MIN_POLAR);
        spherical.radius = (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        camera.target += self.pan_offset * self.damping_factor;
        camera.position = camera.target + spherical.to_offset();

        let decay = 1.0 - self.damping_factor;
        self.delta_theta *= decay;
        self.delta_phi *= decay;
        self.pan_offset *= decay;
        self.scale = 1.0;

        before != *camera
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view: Matrix4::identity().into(),
            proj: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &mut Projection) {
        self.view = camera.calc_matrix().into();
        self.proj = projection.update_matrix().into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// GPU side of the camera: uniform buffer and its bind group.
#[derive(Debug)]
pub struct CameraResources {
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl CameraResources {
    /// Starts with identity matrices; [`CameraResources::write`] fills them in.
    pub fn new(device: &wgpu::Device) -> Self {
        let uniform = CameraUniform::new();

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("camera_bind_group_layout"),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        Self {
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    pub fn write(&mut self, queue: &wgpu::Queue, camera: &Camera, projection: &mut Projection) {
        self.uniform.update_view_proj(camera, projection);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}
