use beacon_core::params::ParamStore;
use beacon_core::scene::{EntityId, Scene, SceneConfig, SceneVariant};
use beacon_core::uniforms::*;

fn scene(variant: SceneVariant) -> Scene {
    let config = SceneConfig {
        variant,
        ..SceneConfig::default()
    };
    Scene::assemble(&config, &ParamStore::new(variant))
}

#[test]
fn uniform_layouts_are_vec4_aligned() {
    assert_eq!(std::mem::size_of::<GpuLight>(), 64);
    assert_eq!(std::mem::size_of::<FrameUniforms>() % 16, 0);
    assert_eq!(std::mem::size_of::<ObjectUniforms>(), 4 * 16 * 2 + 16 * 4);
    assert!(std::mem::size_of::<ObjectUniforms>() <= 256);
}

#[test]
fn frame_packs_positioned_lights() {
    let classic = pack_frame(&scene(SceneVariant::Classic));
    // Two directional, one spot, one sphere point light; ambient is folded in.
    assert_eq!(classic.info[0], 4.0);
    assert!(classic.ambient[..3].iter().all(|a| (a - 1.0).abs() < 1e-5));
    assert_eq!(classic.lights[0].position[3], LIGHT_DIRECTIONAL);
    assert_eq!(classic.lights[2].position[3], LIGHT_SPOT);
    assert_eq!(classic.lights[3].position[3], LIGHT_POINT);
    assert_eq!(classic.camera_pos[..3], [0.0, 2.0, 5.0]);

    let signage = pack_frame(&scene(SceneVariant::Signage));
    assert_eq!(signage.info[0], 5.0);
}

#[test]
fn spot_light_aims_at_marker() {
    let frame = pack_frame(&scene(SceneVariant::Classic));
    let spot = frame.lights[2];
    // From (0, 5, 0) straight down to the marker at (0, 1, 0).
    assert!((spot.direction[1] + 1.0).abs() < 1e-5);
    assert!((spot.direction[3] - std::f32::consts::FRAC_PI_4.cos()).abs() < 1e-6);
    assert!(spot.extra[0] > spot.direction[3]);
}

#[test]
fn additive_entities_draw_last() {
    let scene = scene(SceneVariant::Signage);
    let order = draw_order(&scene);
    assert_eq!(order.len(), scene.entities().len());
    let last = &scene.entities()[*order.last().unwrap()];
    assert_eq!(last.id, EntityId::Indicator);
}

#[test]
fn object_packs_material_state() {
    let scene = scene(SceneVariant::Classic);
    let indicator = scene.entity(EntityId::Indicator).unwrap();
    let packed = pack_object(&scene, indicator).unwrap();
    assert_eq!(packed.surface[3], SHADING_ADDITIVE);
    assert!((packed.base_color[3] - 0.8).abs() < 1e-6);

    let grid = scene.entity(EntityId::Grid).unwrap();
    assert_eq!(pack_object(&scene, grid).unwrap().surface[3], SHADING_LINE);

    let sphere = scene.entity(EntityId::PrimaryOrbiter).unwrap();
    let packed = pack_object(&scene, sphere).unwrap();
    assert_eq!(packed.surface[3], SHADING_STANDARD);
    assert_eq!(packed.surface[..3], [0.2, 0.8, 1.0]);
}

#[test]
fn object_packs_texture_repeat() {
    let scene = scene(SceneVariant::Signage);
    for id in [EntityId::PrimaryOrbiter, EntityId::SecondaryOrbiter] {
        let sphere = scene.entity(id).unwrap();
        let packed = pack_object(&scene, sphere).unwrap();
        assert_eq!(packed.uv[..3], [2.0, 2.0, 1.0]);
    }
    let ground = scene.entity(EntityId::Ground).unwrap();
    assert_eq!(pack_object(&scene, ground).unwrap().uv[..2], [1.0, 1.0]);
}
