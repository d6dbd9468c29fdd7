//! Camera, viewport and orbit controls.
//!
//! These types avoid platform APIs and are shared by the web and native
//! front ends, which feed them pointer deltas and resize notifications.

use crate::constants::{
    CAMERA_EYE, CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CONTROLS_DAMPING, CONTROLS_MAX_RADIUS,
    CONTROLS_MIN_RADIUS,
};
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::from(CAMERA_EYE),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Output surface size in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Apply a display-area change. Returns `false` for zero-sized areas, which
/// leave both the camera and the viewport untouched.
pub fn apply_resize(camera: &mut Camera, viewport: &mut Viewport, width: u32, height: u32) -> bool {
    if width == 0 || height == 0 {
        return false;
    }
    viewport.width = width;
    viewport.height = height;
    camera.aspect = width as f32 / height as f32;
    true
}

/// Damped orbit around a target point, driven by pointer drags and wheel.
///
/// Drag deltas accumulate into pending angular velocity; every [`update`]
/// applies `damping` of what is pending and keeps the rest for later frames,
/// so motion eases out after the pointer stops.
///
/// [`update`]: OrbitControls::update
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub damping: f32,
    radius: f32,
    theta: f32,
    phi: f32,
    pending_theta: f32,
    pending_phi: f32,
    pending_zoom: f32,
}

impl OrbitControls {
    pub fn new(camera: &Camera) -> Self {
        let offset = camera.eye - camera.target;
        let radius = offset.length().max(CONTROLS_MIN_RADIUS);
        Self {
            target: camera.target,
            damping: CONTROLS_DAMPING,
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_zoom: 1.0,
        }
    }

    /// Pointer drag by `(dx, dy)` pixels on a surface `height` pixels tall.
    pub fn rotate(&mut self, dx: f32, dy: f32, height: u32) {
        let h = height.max(1) as f32;
        self.pending_theta -= std::f32::consts::TAU * dx / h;
        self.pending_phi -= std::f32::consts::TAU * dy / h;
    }

    /// Wheel input; positive `delta` moves away from the target.
    pub fn zoom(&mut self, delta: f32) {
        let step = 0.95_f32.powf(delta.abs() * 0.01);
        if delta > 0.0 {
            self.pending_zoom /= step;
        } else if delta < 0.0 {
            self.pending_zoom *= step;
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Advance one frame and write the resulting eye position into `camera`.
    pub fn update(&mut self, camera: &mut Camera) {
        let k = self.damping.clamp(0.0, 1.0);
        self.theta += self.pending_theta * k;
        self.phi = (self.phi + self.pending_phi * k).clamp(1e-3, std::f32::consts::PI - 1e-3);
        self.pending_theta *= 1.0 - k;
        self.pending_phi *= 1.0 - k;

        self.radius = (self.radius * self.pending_zoom).clamp(CONTROLS_MIN_RADIUS, CONTROLS_MAX_RADIUS);
        self.pending_zoom = 1.0;

        let sin_phi = self.phi.sin();
        let offset = Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        );
        camera.target = self.target;
        camera.eye = self.target + offset;
    }
}
