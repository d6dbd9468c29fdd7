//! CPU-side packing of scene state into the shader's uniform layouts.
//!
//! Kept free of wgpu so the layout and draw ordering can be tested on the
//! host without a device.

use crate::constants::TONE_MAPPING_EXPOSURE;
use crate::scene::{Entity, LightKind, Scene, Shading};
use glam::Vec3;

pub const MAX_LIGHTS: usize = 8;

// Light kinds as encoded in `GpuLight::position.w`
pub const LIGHT_DIRECTIONAL: f32 = 1.0;
pub const LIGHT_POINT: f32 = 2.0;
pub const LIGHT_SPOT: f32 = 3.0;

// Shading modes as encoded in `ObjectUniforms::surface.w`
pub const SHADING_STANDARD: f32 = 0.0;
pub const SHADING_ADDITIVE: f32 = 1.0;
pub const SHADING_LINE: f32 = 2.0;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuLight {
    pub position: [f32; 4],  // xyz, w = kind
    pub color: [f32; 4],     // linear rgb * intensity, w = range (0 = infinite)
    pub direction: [f32; 4], // spot axis, w = cos(outer angle)
    pub extra: [f32; 4],     // x = cos(inner angle), y = decay
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    pub ambient: [f32; 4],
    pub info: [f32; 4], // x = light count, y = exposure
    pub lights: [GpuLight; MAX_LIGHTS],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub base_color: [f32; 4], // linear rgb, a = opacity
    pub emissive: [f32; 4],   // linear rgb * intensity
    pub surface: [f32; 4],    // roughness, metalness, normal scale x, shading
    pub uv: [f32; 4],         // xy = texture repeat, z = normal scale y
}

pub fn pack_frame(scene: &Scene) -> FrameUniforms {
    let cam = &scene.camera;
    let mut ambient = [0.0f32; 4];
    let mut lights = [GpuLight::default(); MAX_LIGHTS];
    let mut count = 0usize;

    for light in scene.lights() {
        let radiance = light.color.to_linear().map(|c| c * light.intensity);
        let packed = match light.kind {
            LightKind::Ambient => {
                for (a, r) in ambient.iter_mut().zip(radiance) {
                    *a += r;
                }
                continue;
            }
            LightKind::Directional { position } => {
                let dir = position.normalize_or_zero();
                GpuLight {
                    position: [dir.x, dir.y, dir.z, LIGHT_DIRECTIONAL],
                    color: [radiance[0], radiance[1], radiance[2], 0.0],
                    ..GpuLight::default()
                }
            }
            LightKind::Point { range, decay } => {
                let Some(p) = scene.light_position(light) else {
                    continue;
                };
                GpuLight {
                    position: [p.x, p.y, p.z, LIGHT_POINT],
                    color: [radiance[0], radiance[1], radiance[2], range],
                    extra: [0.0, decay, 0.0, 0.0],
                    ..GpuLight::default()
                }
            }
            LightKind::Spot {
                position,
                target,
                angle,
                penumbra,
            } => {
                let aim = scene
                    .entity(target)
                    .map(|e| e.pose.position)
                    .unwrap_or(Vec3::ZERO);
                let axis = (aim - position).normalize_or_zero();
                GpuLight {
                    position: [position.x, position.y, position.z, LIGHT_SPOT],
                    color: [radiance[0], radiance[1], radiance[2], 0.0],
                    direction: [axis.x, axis.y, axis.z, angle.cos()],
                    extra: [(angle * (1.0 - penumbra)).cos(), 2.0, 0.0, 0.0],
                }
            }
        };
        if count == MAX_LIGHTS {
            log::warn!("[render] more than {} lights; extra lights dropped", MAX_LIGHTS);
            break;
        }
        lights[count] = packed;
        count += 1;
    }

    FrameUniforms {
        view_proj: cam.view_proj().to_cols_array_2d(),
        camera_pos: [cam.eye.x, cam.eye.y, cam.eye.z, 1.0],
        ambient,
        info: [count as f32, TONE_MAPPING_EXPOSURE, 0.0, 0.0],
        lights,
    }
}

/// Uniforms for one entity; `None` if its material is missing.
pub fn pack_object(scene: &Scene, entity: &Entity) -> Option<ObjectUniforms> {
    let m = scene.material(entity.material)?;
    let model = entity.pose.matrix();
    let base = m.color.to_linear();
    let emissive = m.emissive.to_linear().map(|c| c * m.emissive_intensity);
    let shading = match m.shading {
        Shading::Standard => SHADING_STANDARD,
        Shading::Additive => SHADING_ADDITIVE,
        Shading::Line => SHADING_LINE,
    };
    Some(ObjectUniforms {
        model: model.to_cols_array_2d(),
        normal_matrix: model.inverse().transpose().to_cols_array_2d(),
        base_color: [base[0], base[1], base[2], m.opacity],
        emissive: [emissive[0], emissive[1], emissive[2], 0.0],
        surface: [m.roughness, m.metalness, m.normal_scale.x, shading],
        uv: [m.uv_repeat.x, m.uv_repeat.y, m.normal_scale.y, 0.0],
    })
}

/// Entity indices in draw order: opaque surfaces and lines first, then
/// additive surfaces (which do not write depth).
pub fn draw_order(scene: &Scene) -> Vec<usize> {
    let additive = |e: &Entity| {
        scene
            .material(e.material)
            .map(|m| m.shading == Shading::Additive)
            .unwrap_or(false)
    };
    let entities = scene.entities();
    let mut order: Vec<usize> = (0..entities.len()).filter(|&i| !additive(&entities[i])).collect();
    order.extend((0..entities.len()).filter(|&i| additive(&entities[i])));
    order
}
