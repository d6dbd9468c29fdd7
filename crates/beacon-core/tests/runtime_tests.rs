// Frame driver behavior: late signage binding, parameter side effects, resize.

use beacon_core::color::Rgb;
use beacon_core::font::BlockFont;
use beacon_core::params::ParamKey;
use beacon_core::runtime::{FrameClock, SceneRuntime};
use beacon_core::scene::{EntityId, SceneConfig, SceneVariant};
use instant::Instant;
use std::time::Duration;

const BUNDLED: &str = include_str!("../../../assets/fonts/block5x7.txt");

fn runtime(variant: SceneVariant) -> SceneRuntime {
    SceneRuntime::new(SceneConfig {
        variant,
        ..SceneConfig::default()
    })
}

fn font() -> BlockFont {
    BlockFont::parse(BUNDLED).expect("bundled font parses")
}

#[test]
fn signage_appears_after_font_arrives() {
    let mut rt = runtime(SceneVariant::Signage);
    for i in 0..5 {
        rt.frame(i as f64 * 0.016);
        assert!(!rt.scene().contains(EntityId::Signage));
    }
    rt.font_sender().send(font()).unwrap();
    assert!(!rt.scene().contains(EntityId::Signage));
    rt.frame(0.1);
    let signage = rt.scene().entity(EntityId::Signage).expect("signage attached");
    assert!((signage.pose.position.y - 3.0).abs() < 1e-6);
    assert!(rt.scene().handles.signage_material.is_some());

    // A second delivery is ignored.
    let entities = rt.scene().entities().len();
    let _ = rt.font_sender().send(font());
    rt.frame(0.2);
    assert_eq!(rt.scene().entities().len(), entities);
}

#[test]
fn signage_text_holds_still_while_the_marker_pulses() {
    let mut rt = runtime(SceneVariant::Signage);
    rt.font_sender().send(font()).unwrap();
    rt.frame(0.0);
    let attached = rt.scene().entity(EntityId::Signage).unwrap().pose;
    let marker_start = rt.scene().entity(EntityId::Marker).unwrap().pose;
    for i in 1..120 {
        rt.frame(i as f64 / 60.0);
    }
    assert_eq!(rt.scene().entity(EntityId::Signage).unwrap().pose, attached);
    assert_ne!(rt.scene().entity(EntityId::Marker).unwrap().pose.scale, marker_start.scale);
}

#[test]
fn classic_never_attaches_signage() {
    let mut rt = runtime(SceneVariant::Classic);
    rt.font_sender().send(font()).unwrap();
    rt.frame(0.0);
    assert!(!rt.scene().contains(EntityId::Signage));
}

#[test]
fn location_color_syncs_marker_and_glow_light() {
    let mut rt = runtime(SceneVariant::Signage);
    rt.font_sender().send(font()).unwrap();
    rt.frame(0.0);

    let green = Rgb::from_hex(0x00ff00);
    rt.params_mut().set_color(ParamKey::LocationColor, green);
    rt.frame(0.016);

    let scene = rt.scene();
    let marker = scene.material(scene.handles.marker_material).unwrap();
    assert_eq!(marker.color, green);
    assert_eq!(marker.emissive, green);
    let light_id = scene.handles.marker_light.expect("signage variant has a glow light");
    assert_eq!(scene.light(light_id).unwrap().color, green);
    let signage = scene.material(scene.handles.signage_material.unwrap()).unwrap();
    assert_eq!(signage.color, green);
    assert_eq!(signage.emissive, green);
}

#[test]
fn classic_color_change_has_no_glow_light() {
    let mut rt = runtime(SceneVariant::Classic);
    let blue = Rgb::from_hex(0x0000ff);
    rt.params_mut().set_color(ParamKey::LocationColor, blue);
    rt.frame(0.0);
    let scene = rt.scene();
    assert!(scene.handles.marker_light.is_none());
    let marker = scene.material(scene.handles.marker_material).unwrap();
    assert_eq!((marker.color, marker.emissive), (blue, blue));
}

#[test]
fn signage_created_late_uses_current_color() {
    let mut rt = runtime(SceneVariant::Signage);
    let color = Rgb::from_hex(0x3366ff);
    rt.params_mut().set_color(ParamKey::LocationColor, color);
    rt.params_mut().set_number(ParamKey::EmissiveIntensity, 0.7);
    rt.frame(0.0);
    rt.font_sender().send(font()).unwrap();
    rt.frame(0.1);
    let scene = rt.scene();
    let signage = scene.material(scene.handles.signage_material.unwrap()).unwrap();
    assert_eq!(signage.color, color);
    assert_eq!(signage.emissive_intensity, 0.7);
}

#[test]
fn glow_intensity_updates_emissive() {
    let mut rt = runtime(SceneVariant::Classic);
    rt.params_mut().set_number(ParamKey::EmissiveIntensity, 0.9);
    rt.frame(0.0);
    let scene = rt.scene();
    assert_eq!(scene.material(scene.handles.marker_material).unwrap().emissive_intensity, 0.9);
}

#[test]
fn sphere_sliders_drive_primary_material_only() {
    let mut rt = runtime(SceneVariant::Signage);
    rt.params_mut().set_number(ParamKey::SphereRoughness, 0.6);
    rt.params_mut().set_number(ParamKey::SphereMetalness, 0.1);
    rt.params_mut().set_number(ParamKey::NormalScale, 1.5);
    rt.frame(0.0);
    let scene = rt.scene();
    let primary = scene.material(scene.handles.sphere_material).unwrap();
    assert_eq!((primary.roughness, primary.metalness), (0.6, 0.1));
    assert_eq!(primary.normal_scale, glam::Vec2::splat(1.5));
    let secondary = scene.material(scene.handles.secondary_material.unwrap()).unwrap();
    assert_eq!((secondary.roughness, secondary.metalness), (0.2, 0.8));
}

#[test]
fn resize_updates_aspect_and_viewport() {
    let mut rt = runtime(SceneVariant::Classic);
    assert!(rt.resize(1920, 1080));
    assert!((rt.scene().camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    assert_eq!((rt.scene().viewport.width, rt.scene().viewport.height), (1920, 1080));
    assert!(!rt.resize(0, 0));
    assert_eq!((rt.scene().viewport.width, rt.scene().viewport.height), (1920, 1080));
}

#[test]
fn frames_are_counted() {
    let mut rt = runtime(SceneVariant::Classic);
    for i in 0..7 {
        rt.frame(i as f64);
    }
    assert_eq!(rt.frames(), 7);
}

#[test]
fn clock_starts_at_first_sample() {
    let mut clock = FrameClock::default();
    let start = Instant::now();
    assert_eq!(clock.elapsed_at(start), 0.0);
    let later = start + Duration::from_millis(1500);
    assert!((clock.elapsed_at(later) - 1.5).abs() < 1e-4);
    // Never runs backwards past the origin.
    assert_eq!(clock.elapsed_at(start), 0.0);
}

#[test]
fn clock_keeps_frame_resolution_after_a_day() {
    let mut clock = FrameClock::default();
    let start = Instant::now();
    clock.elapsed_at(start);
    let day = start + Duration::from_secs(86_400);
    let a = clock.elapsed_at(day);
    let b = clock.elapsed_at(day + Duration::from_micros(16_667));
    assert!((b - a - 0.016_667).abs() < 1e-6, "frame delta {}", b - a);
}
