//! Scene assembly and the handles the frame update mutates.

use crate::camera::{apply_resize, Camera, Viewport};
use crate::color::Rgb;
use crate::constants::*;
use crate::font::BlockFont;
use crate::mesh::{self, MeshData};
use crate::params::{ChangeSet, ParamKey, ParamStore};
use crate::texture::{ImageSlot, TextureImage};
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SceneVariant {
    /// One orbiting sphere, no text.
    #[default]
    Classic,
    /// Two orbiting spheres, pulsing marker with its own glow light, 3D text.
    Signage,
}

impl SceneVariant {
    pub fn name(self) -> &'static str {
        match self {
            SceneVariant::Classic => "classic",
            SceneVariant::Signage => "signage",
        }
    }

    pub fn has_secondary_orbiter(self) -> bool {
        matches!(self, SceneVariant::Signage)
    }

    pub fn has_signage(self) -> bool {
        matches!(self, SceneVariant::Signage)
    }

    pub fn marker_pulses(self) -> bool {
        matches!(self, SceneVariant::Signage)
    }

    pub fn primary_y_offset(self) -> f32 {
        match self {
            SceneVariant::Classic => 0.0,
            SceneVariant::Signage => SIGNAGE_PRIMARY_Y_OFFSET,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scene variant `{0}` (expected `classic` or `signage`)")]
pub struct UnknownVariant(pub String);

impl FromStr for SceneVariant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(SceneVariant::Classic),
            "signage" | "text" => Ok(SceneVariant::Signage),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

impl fmt::Display for SceneVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Startup configuration shared by both front ends.
#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub variant: SceneVariant,
    pub signage_text: String,
    /// Font location: URL on the web, file path natively.
    pub font_path: String,
    /// Directory holding the ground, sphere and backdrop images.
    pub texture_dir: String,
    pub width: u32,
    pub height: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            variant: SceneVariant::default(),
            signage_text: SIGNAGE_TEXT.to_string(),
            font_path: "assets/fonts/block5x7.txt".to_string(),
            texture_dir: "assets/textures".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Named scene objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityId {
    Ground,
    Grid,
    Marker,
    Indicator,
    PrimaryOrbiter,
    SecondaryOrbiter,
    Signage,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LightId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshId(pub usize);

/// Position, XYZ Euler rotation (radians) and per-axis scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Pose {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn rotated(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn matrix(&self) -> Mat4 {
        let q = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, q, self.position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shading {
    /// Lit metal/rough surface.
    Standard,
    /// Unlit, textured, blended additively without depth writes.
    Additive,
    /// Unlit lines.
    Line,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureKind {
    Indicator,
    /// A loaded image; white (or flat normals) until it arrives.
    Image(ImageSlot),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub shading: Shading,
    pub color: Rgb,
    pub emissive: Rgb,
    pub emissive_intensity: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub normal_scale: Vec2,
    pub opacity: f32,
    pub texture: Option<TextureKind>,
    pub normal_map: Option<TextureKind>,
    /// Texture coordinate scale; anything but (1, 1) samples with repeat.
    pub uv_repeat: Vec2,
}

impl Material {
    pub fn standard(color: Rgb, roughness: f32, metalness: f32) -> Self {
        Self {
            shading: Shading::Standard,
            color,
            emissive: Rgb::BLACK,
            emissive_intensity: 1.0,
            roughness,
            metalness,
            normal_scale: Vec2::ZERO,
            opacity: 1.0,
            texture: None,
            normal_map: None,
            uv_repeat: Vec2::ONE,
        }
    }

    fn unlit(shading: Shading, color: Rgb, opacity: f32) -> Self {
        Self {
            shading,
            opacity,
            ..Self::standard(color, 1.0, 0.0)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightKind {
    Ambient,
    /// Shines from `position` toward the origin.
    Directional { position: Vec3 },
    Spot {
        position: Vec3,
        target: EntityId,
        angle: f32,
        penumbra: f32,
    },
    /// Positioned at the entity it is attached to.
    Point { range: f32, decay: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Rgb,
    pub intensity: f32,
    pub attached_to: Option<EntityId>,
}

#[derive(Clone, Debug)]
pub struct Entity {
    pub id: EntityId,
    pub pose: Pose,
    pub mesh: MeshId,
    pub material: MaterialId,
}

/// Handles to the materials and lights that parameter bindings touch.
#[derive(Clone, Copy, Debug)]
pub struct SceneHandles {
    pub marker_material: MaterialId,
    pub sphere_material: MaterialId,
    pub indicator_material: MaterialId,
    pub secondary_material: Option<MaterialId>,
    pub signage_material: Option<MaterialId>,
    pub marker_light: Option<LightId>,
    pub sphere_light: LightId,
}

pub struct Scene {
    pub variant: SceneVariant,
    pub camera: Camera,
    pub viewport: Viewport,
    pub handles: SceneHandles,
    entities: Vec<Entity>,
    materials: Vec<Material>,
    lights: Vec<Light>,
    meshes: Vec<MeshData>,
    images: Vec<TextureImage>,
}

impl Scene {
    /// Build every object that exists at startup. Signage text is attached
    /// later by [`Scene::attach_signage`] once its font has loaded.
    pub fn assemble(config: &SceneConfig, params: &ParamStore) -> Self {
        let variant = config.variant;
        let viewport = Viewport::new(config.width.max(1), config.height.max(1));
        let location_color = params
            .color(ParamKey::LocationColor)
            .unwrap_or(Rgb::from_hex(0xff0000));
        let glow = params.number(ParamKey::EmissiveIntensity).unwrap_or(0.2);

        let mut scene = Self {
            variant,
            camera: Camera::new(viewport.aspect()),
            viewport,
            handles: SceneHandles {
                marker_material: MaterialId(0),
                sphere_material: MaterialId(0),
                indicator_material: MaterialId(0),
                secondary_material: None,
                signage_material: None,
                marker_light: None,
                sphere_light: LightId(0),
            },
            entities: Vec::new(),
            materials: Vec::new(),
            lights: Vec::new(),
            meshes: Vec::new(),
            images: Vec::new(),
        };

        let grid_mesh = scene.add_mesh(mesh::grid(GROUND_SIZE, GRID_DIVISIONS));
        let grid_mat = scene.add_material(Material::unlit(Shading::Line, Rgb::from_hex(GRID_COLOR), 1.0));
        scene.add_entity(EntityId::Grid, Pose::at(Vec3::new(0.0, GROUND_HEIGHT, 0.0)), grid_mesh, grid_mat);

        let ground_mesh = scene.add_mesh(mesh::plane(GROUND_SIZE, GROUND_SIZE));
        let ground_mat = scene.add_material(Material {
            texture: Some(TextureKind::Image(ImageSlot::Ground)),
            ..Material::standard(Rgb::from_hex(GROUND_FALLBACK_COLOR), 0.8, 0.2)
        });
        scene.add_entity(
            EntityId::Ground,
            Pose::at(Vec3::new(0.0, GROUND_HEIGHT, 0.0)).rotated(Vec3::new(FRAC_PI_2, 0.0, 0.0)),
            ground_mesh,
            ground_mat,
        );

        let marker_mesh = scene.add_mesh(mesh::cone(MARKER_RADIUS, MARKER_HEIGHT, MARKER_SEGMENTS));
        let marker_mat = scene.add_material(Material {
            emissive: location_color,
            emissive_intensity: glow,
            ..Material::standard(location_color, 0.4, 0.3)
        });
        scene.add_entity(
            EntityId::Marker,
            Pose::at(Vec3::new(0.0, MARKER_BASE_HEIGHT, 0.0)).rotated(Vec3::new(PI, 0.0, 0.0)),
            marker_mesh,
            marker_mat,
        );

        let indicator_mesh = scene.add_mesh(mesh::disk(INDICATOR_RADIUS, INDICATOR_SEGMENTS));
        let indicator_mat = scene.add_material(Material {
            texture: Some(TextureKind::Indicator),
            ..Material::unlit(Shading::Additive, Rgb::WHITE, 0.8)
        });
        scene.add_entity(
            EntityId::Indicator,
            Pose::at(Vec3::new(0.0, INDICATOR_HEIGHT, 0.0)).rotated(Vec3::new(-FRAC_PI_2, 0.0, 0.0)),
            indicator_mesh,
            indicator_mat,
        );

        let sphere_mesh = scene.add_mesh(mesh::sphere(SPHERE_RADIUS, SPHERE_SEGMENTS, SPHERE_SEGMENTS));
        let sphere_mat = scene.add_material(sphere_material(params));
        scene.add_entity(EntityId::PrimaryOrbiter, Pose::default(), sphere_mesh, sphere_mat);
        if variant.has_secondary_orbiter() {
            // Own copy: the sphere sliders drive the primary orbiter only.
            let secondary_mat = scene.add_material(sphere_material(params));
            scene.add_entity(EntityId::SecondaryOrbiter, Pose::default(), sphere_mesh, secondary_mat);
            scene.handles.secondary_material = Some(secondary_mat);
        }

        scene.add_light(LightKind::Ambient, Rgb::WHITE, 1.0, None);
        scene.add_light(LightKind::Directional { position: Vec3::new(5.0, 5.0, 5.0) }, Rgb::WHITE, 1.5, None);
        scene.add_light(LightKind::Directional { position: Vec3::new(-5.0, 3.0, -5.0) }, Rgb::WHITE, 1.0, None);
        scene.add_light(
            LightKind::Spot {
                position: Vec3::new(0.0, 5.0, 0.0),
                target: EntityId::Marker,
                angle: FRAC_PI_4,
                penumbra: 0.1,
            },
            Rgb::WHITE,
            1.0,
            None,
        );
        let point = LightKind::Point {
            range: SPHERE_LIGHT_RANGE,
            decay: SPHERE_LIGHT_DECAY,
        };
        let sphere_light = scene.add_light(point, Rgb::WHITE, 1.0, Some(EntityId::PrimaryOrbiter));
        scene.handles.sphere_light = sphere_light;
        if variant.marker_pulses() {
            let marker_light = scene.add_light(point, location_color, 1.0, Some(EntityId::Marker));
            scene.handles.marker_light = Some(marker_light);
        }

        scene.handles.marker_material = marker_mat;
        scene.handles.sphere_material = sphere_mat;
        scene.handles.indicator_material = indicator_mat;
        log::info!(
            "[scene] assembled variant={} entities={} lights={}",
            variant,
            scene.entities.len(),
            scene.lights.len()
        );
        scene
    }

    fn add_mesh(&mut self, data: MeshData) -> MeshId {
        self.meshes.push(data);
        MeshId(self.meshes.len() - 1)
    }

    fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    fn add_light(&mut self, kind: LightKind, color: Rgb, intensity: f32, attached_to: Option<EntityId>) -> LightId {
        self.lights.push(Light {
            kind,
            color,
            intensity,
            attached_to,
        });
        LightId(self.lights.len() - 1)
    }

    fn add_entity(&mut self, id: EntityId, pose: Pose, mesh: MeshId, material: MaterialId) {
        self.entities.push(Entity {
            id,
            pose,
            mesh,
            material,
        });
    }

    /// Register the signage text once its font is available. A second call
    /// is ignored.
    pub fn attach_signage(&mut self, font: &BlockFont, text: &str, params: &ParamStore) -> bool {
        if !self.variant.has_signage() || self.contains(EntityId::Signage) {
            return false;
        }
        let color = params
            .color(ParamKey::LocationColor)
            .unwrap_or(Rgb::from_hex(0xff0000));
        let glow = params.number(ParamKey::EmissiveIntensity).unwrap_or(0.2);
        let mesh = self.add_mesh(font.text_mesh(text, SIGNAGE_CELL, SIGNAGE_DEPTH));
        let material = self.add_material(Material {
            emissive: color,
            emissive_intensity: glow,
            ..Material::standard(color, 0.4, 0.3)
        });
        self.add_entity(
            EntityId::Signage,
            Pose::at(Vec3::new(0.0, SIGNAGE_HEIGHT, 0.0)),
            mesh,
            material,
        );
        self.handles.signage_material = Some(material);
        log::info!("[scene] signage attached text={:?}", text);
        true
    }

    /// Register a decoded image and let the materials that reference it
    /// drop their stand-in tint. One image per slot; later ones are ignored.
    pub fn attach_image(&mut self, image: TextureImage) -> bool {
        let slot = image.slot;
        if self.image(slot).is_some() {
            return false;
        }
        for m in &mut self.materials {
            if m.texture == Some(TextureKind::Image(slot)) {
                m.color = Rgb::WHITE;
            }
        }
        log::info!(
            "[scene] image attached slot={:?} size={}x{} mips={}",
            slot,
            image.width(),
            image.height(),
            image.mips.len()
        );
        self.images.push(image);
        true
    }

    /// Images in arrival order; append-only.
    pub fn images(&self) -> &[TextureImage] {
        &self.images
    }

    pub fn image(&self, slot: ImageSlot) -> Option<&TextureImage> {
        self.images.iter().find(|i| i.slot == slot)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entity(id).is_some()
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn meshes(&self) -> &[MeshData] {
        &self.meshes
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    pub fn material_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        self.materials.get_mut(id.0)
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn light(&self, id: LightId) -> Option<&Light> {
        self.lights.get(id.0)
    }

    /// World position of a positioned light; `None` for ambient/directional
    /// lights or when the entity it hangs off does not exist yet.
    pub fn light_position(&self, light: &Light) -> Option<Vec3> {
        match light.kind {
            LightKind::Ambient | LightKind::Directional { .. } => None,
            LightKind::Spot { position, .. } => Some(position),
            LightKind::Point { .. } => light
                .attached_to
                .and_then(|id| self.entity(id))
                .map(|e| e.pose.position),
        }
    }

    /// Single write path for the location color: marker base + emissive,
    /// attached glow light and signage all receive the same value.
    pub fn apply_location_color(&mut self, color: Rgb) {
        let targets = [Some(self.handles.marker_material), self.handles.signage_material];
        for id in targets.into_iter().flatten() {
            if let Some(m) = self.material_mut(id) {
                m.color = color;
                m.emissive = color;
            }
        }
        if let Some(light) = self.handles.marker_light.and_then(|id| self.lights.get_mut(id.0)) {
            light.color = color;
        }
    }

    /// Apply the side effects of changed parameters. Animation-only
    /// parameters are read directly by the frame update and need nothing here.
    pub fn apply_param_changes(&mut self, params: &ParamStore, changes: ChangeSet) {
        for key in changes.iter() {
            match key {
                ParamKey::LocationColor => {
                    if let Some(c) = params.color(key) {
                        self.apply_location_color(c);
                    }
                }
                ParamKey::EmissiveIntensity => {
                    if let Some(v) = params.number(key) {
                        let targets = [Some(self.handles.marker_material), self.handles.signage_material];
                        for id in targets.into_iter().flatten() {
                            if let Some(m) = self.material_mut(id) {
                                m.emissive_intensity = v;
                            }
                        }
                    }
                }
                ParamKey::SphereRoughness | ParamKey::SphereMetalness | ParamKey::NormalScale => {
                    let Some(v) = params.number(key) else { continue };
                    let Some(m) = self.material_mut(self.handles.sphere_material) else {
                        continue;
                    };
                    match key {
                        ParamKey::SphereRoughness => m.roughness = v,
                        ParamKey::SphereMetalness => m.metalness = v,
                        _ => m.normal_scale = Vec2::splat(v),
                    }
                }
                ParamKey::LocationRotationSpeed
                | ParamKey::SphereOrbitSpeed
                | ParamKey::SphereDistance
                | ParamKey::SecondOrbitSpeed
                | ParamKey::SecondDistance => {}
            }
        }
    }

    /// Viewport resize handler: aspect becomes `width / height` and the
    /// output size is recorded for the renderer. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        apply_resize(&mut self.camera, &mut self.viewport, width, height)
    }
}

fn sphere_material(params: &ParamStore) -> Material {
    let roughness = params.number(ParamKey::SphereRoughness).unwrap_or(0.2);
    let metalness = params.number(ParamKey::SphereMetalness).unwrap_or(0.8);
    let normal = params.number(ParamKey::NormalScale).unwrap_or(1.0);
    Material {
        normal_scale: Vec2::splat(normal),
        texture: Some(TextureKind::Image(ImageSlot::Sphere)),
        normal_map: Some(TextureKind::Image(ImageSlot::Sphere)),
        uv_repeat: Vec2::splat(SPHERE_UV_REPEAT),
        ..Material::standard(Rgb::from_hex(SPHERE_FALLBACK_COLOR), roughness, metalness)
    }
}
