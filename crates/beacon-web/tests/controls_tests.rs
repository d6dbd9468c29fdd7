// Host-side tests for debug panel layout.
// The web crate is wasm-only, so the pure module is included directly.

#![allow(dead_code)]

mod controls {
    include!("../src/controls.rs");
}

use beacon_core::color::Rgb;
use beacon_core::params::{ParamKey, ParamStore};
use beacon_core::scene::SceneVariant;
use controls::*;

#[test]
fn classic_panel_has_three_folders() {
    let store = ParamStore::new(SceneVariant::Classic);
    let layout = panel_layout(&store);
    let titles: Vec<_> = layout.iter().map(|f| f.title).collect();
    assert_eq!(titles, ["Location Marker", "Animation", "Sphere Settings"]);
    let counts: Vec<_> = layout.iter().map(|f| f.controls.len()).collect();
    assert_eq!(counts, [2, 3, 3]);
}

#[test]
fn signage_panel_adds_second_orbit_controls() {
    let store = ParamStore::new(SceneVariant::Signage);
    let layout = panel_layout(&store);
    let names: Vec<_> = layout[1].controls.iter().map(|c| c.name).collect();
    assert_eq!(
        names,
        [
            "locationRotationSpeed",
            "sphereOrbitSpeed",
            "sphereDistance",
            "secondOrbitSpeed",
            "secondDistance"
        ]
    );
    let distance = &layout[1].controls[2];
    assert_eq!(distance.max.as_deref(), Some("8"));
}

#[test]
fn color_control_uses_hex_text() {
    let mut store = ParamStore::new(SceneVariant::Classic);
    let layout = panel_layout(&store);
    let color = &layout[0].controls[0];
    assert_eq!(color.input_type, "color");
    assert_eq!(color.value, "#ff0000");
    assert!(color.min.is_none() && color.step.is_none());

    store.set_color(ParamKey::LocationColor, Rgb::from_hex(0x00a0ff));
    let layout = panel_layout(&store);
    assert_eq!(layout[0].controls[0].value, "#00a0ff");
}

#[test]
fn range_control_reflects_current_value() {
    let mut store = ParamStore::new(SceneVariant::Classic);
    store.set_number(ParamKey::EmissiveIntensity, 0.5);
    let glow = &panel_layout(&store)[0].controls[1];
    assert_eq!(glow.input_type, "range");
    assert_eq!(glow.label, "Glow Intensity");
    assert_eq!(
        (glow.min.as_deref(), glow.max.as_deref(), glow.step.as_deref()),
        (Some("0"), Some("1"), Some("0.01"))
    );
    assert_eq!(glow.value, "0.5");
}
