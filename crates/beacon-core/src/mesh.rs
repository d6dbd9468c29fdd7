//! CPU-side geometry for the scene's primitives.
//!
//! Conventions: planes and disks lie in local XY facing +Z, cones and spheres
//! are centered on the origin with Y up. Callers orient them via the entity
//! pose.

use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: uv.to_array(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    Triangles,
    Lines,
}

#[derive(Clone, Debug)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub topology: Topology,
}

impl MeshData {
    fn triangles() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            topology: Topology::Triangles,
        }
    }

    /// Axis-aligned bounds `(min, max)` of all vertices.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut it = self.vertices.iter().map(|v| Vec3::from(v.position));
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    /// Append an axis-aligned box with flat per-face normals.
    pub fn push_cuboid(&mut self, min: Vec3, max: Vec3) {
        let faces: [(Vec3, [Vec3; 4]); 6] = [
            (Vec3::X, [
                Vec3::new(max.x, min.y, max.z),
                Vec3::new(max.x, min.y, min.z),
                Vec3::new(max.x, max.y, min.z),
                Vec3::new(max.x, max.y, max.z),
            ]),
            (Vec3::NEG_X, [
                Vec3::new(min.x, min.y, min.z),
                Vec3::new(min.x, min.y, max.z),
                Vec3::new(min.x, max.y, max.z),
                Vec3::new(min.x, max.y, min.z),
            ]),
            (Vec3::Y, [
                Vec3::new(min.x, max.y, max.z),
                Vec3::new(max.x, max.y, max.z),
                Vec3::new(max.x, max.y, min.z),
                Vec3::new(min.x, max.y, min.z),
            ]),
            (Vec3::NEG_Y, [
                Vec3::new(min.x, min.y, min.z),
                Vec3::new(max.x, min.y, min.z),
                Vec3::new(max.x, min.y, max.z),
                Vec3::new(min.x, min.y, max.z),
            ]),
            (Vec3::Z, [
                Vec3::new(min.x, min.y, max.z),
                Vec3::new(max.x, min.y, max.z),
                Vec3::new(max.x, max.y, max.z),
                Vec3::new(min.x, max.y, max.z),
            ]),
            (Vec3::NEG_Z, [
                Vec3::new(max.x, min.y, min.z),
                Vec3::new(min.x, min.y, min.z),
                Vec3::new(min.x, max.y, min.z),
                Vec3::new(max.x, max.y, min.z),
            ]),
        ];
        let uvs = [Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 0.0)];
        for (normal, corners) in faces {
            let base = self.vertices.len() as u32;
            for (corner, uv) in corners.iter().zip(uvs) {
                self.vertices.push(Vertex::new(*corner, normal, uv));
            }
            self.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
    }
}

pub fn plane(width: f32, height: f32) -> MeshData {
    let (hw, hh) = (width * 0.5, height * 0.5);
    let mut mesh = MeshData::triangles();
    for (x, y, u, v) in [(-hw, hh, 0.0, 1.0), (hw, hh, 1.0, 1.0), (-hw, -hh, 0.0, 0.0), (hw, -hh, 1.0, 0.0)] {
        mesh.vertices
            .push(Vertex::new(Vec3::new(x, y, 0.0), Vec3::Z, Vec2::new(u, v)));
    }
    mesh.indices.extend_from_slice(&[0, 2, 1, 2, 3, 1]);
    mesh
}

pub fn disk(radius: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let mut mesh = MeshData::triangles();
    mesh.vertices
        .push(Vertex::new(Vec3::ZERO, Vec3::Z, Vec2::splat(0.5)));
    for s in 0..=segments {
        let a = s as f32 / segments as f32 * TAU;
        let (sin, cos) = a.sin_cos();
        mesh.vertices.push(Vertex::new(
            Vec3::new(radius * cos, radius * sin, 0.0),
            Vec3::Z,
            Vec2::new((cos + 1.0) * 0.5, (sin + 1.0) * 0.5),
        ));
    }
    for s in 1..=segments {
        mesh.indices.extend_from_slice(&[s, s + 1, 0]);
    }
    mesh
}

/// Cone with its apex at `+height / 2` and a closed base at `-height / 2`.
pub fn cone(radius: f32, height: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let half = height * 0.5;
    let slope = radius / height.max(f32::EPSILON);
    let mut mesh = MeshData::triangles();

    // Side: a separate apex vertex per segment so normals stay smooth around.
    for s in 0..=segments {
        let u = s as f32 / segments as f32;
        let (sin, cos) = (u * TAU).sin_cos();
        let normal = Vec3::new(sin, slope, cos).normalize();
        mesh.vertices
            .push(Vertex::new(Vec3::new(0.0, half, 0.0), normal, Vec2::new(u, 1.0)));
        mesh.vertices.push(Vertex::new(
            Vec3::new(radius * sin, -half, radius * cos),
            normal,
            Vec2::new(u, 0.0),
        ));
    }
    for s in 0..segments {
        let apex = s * 2;
        let base = apex + 1;
        let next_base = base + 2;
        mesh.indices.extend_from_slice(&[apex, base, next_base]);
    }

    // Base cap
    let center = mesh.vertices.len() as u32;
    mesh.vertices.push(Vertex::new(
        Vec3::new(0.0, -half, 0.0),
        Vec3::NEG_Y,
        Vec2::splat(0.5),
    ));
    for s in 0..=segments {
        let (sin, cos) = (s as f32 / segments as f32 * TAU).sin_cos();
        mesh.vertices.push(Vertex::new(
            Vec3::new(radius * sin, -half, radius * cos),
            Vec3::NEG_Y,
            Vec2::new((sin + 1.0) * 0.5, (cos + 1.0) * 0.5),
        ));
    }
    for s in 0..segments {
        let a = center + 1 + s;
        mesh.indices.extend_from_slice(&[a + 1, a, center]);
    }
    mesh
}

pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let mut mesh = MeshData::triangles();
    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        for ix in 0..=ws {
            let u = ix as f32 / ws as f32;
            let normal = Vec3::new(
                -(u * TAU).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * TAU).sin() * (v * PI).sin(),
            );
            mesh.vertices
                .push(Vertex::new(normal * radius, normal, Vec2::new(u, 1.0 - v)));
        }
    }
    let row = ws + 1;
    for iy in 0..hs {
        for ix in 0..ws {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

/// Square line grid on the XZ plane, `divisions` cells per side.
pub fn grid(size: f32, divisions: u32) -> MeshData {
    let divisions = divisions.max(1);
    let half = size * 0.5;
    let step = size / divisions as f32;
    let mut mesh = MeshData {
        vertices: Vec::with_capacity(((divisions + 1) * 4) as usize),
        indices: Vec::new(),
        topology: Topology::Lines,
    };
    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        for (a, b) in [
            (Vec3::new(-half, 0.0, k), Vec3::new(half, 0.0, k)),
            (Vec3::new(k, 0.0, -half), Vec3::new(k, 0.0, half)),
        ] {
            let base = mesh.vertices.len() as u32;
            mesh.vertices.push(Vertex::new(a, Vec3::Y, Vec2::ZERO));
            mesh.vertices.push(Vertex::new(b, Vec3::Y, Vec2::ONE));
            mesh.indices.extend_from_slice(&[base, base + 1]);
        }
    }
    mesh
}
