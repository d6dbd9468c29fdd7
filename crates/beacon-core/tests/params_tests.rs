use beacon_core::color::Rgb;
use beacon_core::params::*;
use beacon_core::scene::SceneVariant;

#[test]
fn defaults_match_panel_table() {
    let store = ParamStore::new(SceneVariant::Signage);
    assert_eq!(store.color(ParamKey::LocationColor), Some(Rgb::from_hex(0xff0000)));
    let expected = [
        (ParamKey::EmissiveIntensity, 0.2),
        (ParamKey::LocationRotationSpeed, 1.0),
        (ParamKey::SphereOrbitSpeed, 0.05),
        (ParamKey::SphereDistance, 2.5),
        (ParamKey::SecondOrbitSpeed, 0.03),
        (ParamKey::SecondDistance, 4.0),
        (ParamKey::SphereRoughness, 0.2),
        (ParamKey::SphereMetalness, 0.8),
        (ParamKey::NormalScale, 1.0),
    ];
    for (key, value) in expected {
        assert_eq!(store.number(key), Some(value), "{}", key.name());
    }
}

#[test]
fn classic_omits_second_orbit_controls() {
    let store = ParamStore::new(SceneVariant::Classic);
    assert_eq!(store.specs().len(), 8);
    assert!(store.get(ParamKey::SecondOrbitSpeed).is_none());
    assert!(store.get(ParamKey::SecondDistance).is_none());
    assert_eq!(ParamStore::new(SceneVariant::Signage).specs().len(), 10);
}

#[test]
fn ui_ranges_depend_on_variant() {
    let range = |variant, key| match ParamStore::new(variant).spec(key).map(|s| s.kind) {
        Some(ParamKind::Number(r)) => r,
        other => panic!("expected a numeric spec, got {other:?}"),
    };
    let classic = range(SceneVariant::Classic, ParamKey::SphereOrbitSpeed);
    assert_eq!((classic.min, classic.max, classic.step), (0.01, 0.2, 0.01));
    let signage = range(SceneVariant::Signage, ParamKey::SphereOrbitSpeed);
    assert_eq!(signage.max, 0.1);
    assert_eq!(range(SceneVariant::Classic, ParamKey::SphereDistance).max, 5.0);
    assert_eq!(range(SceneVariant::Signage, ParamKey::SphereDistance).max, 8.0);
    assert_eq!(range(SceneVariant::Signage, ParamKey::LocationRotationSpeed).max, 5.0);
}

#[test]
fn panel_folders_group_controls() {
    let specs = param_specs(SceneVariant::Signage);
    let folder = |key| specs.iter().find(|s| s.key == key).map(|s| s.folder);
    assert_eq!(folder(ParamKey::LocationColor), Some(PanelFolder::LocationMarker));
    assert_eq!(folder(ParamKey::EmissiveIntensity), Some(PanelFolder::LocationMarker));
    assert_eq!(folder(ParamKey::SecondDistance), Some(PanelFolder::Animation));
    assert_eq!(folder(ParamKey::NormalScale), Some(PanelFolder::SphereSettings));
    assert_eq!(PanelFolder::SphereSettings.title(), "Sphere Settings");
}

#[test]
fn set_overwrites_without_clamping() {
    let mut store = ParamStore::new(SceneVariant::Classic);
    store.set_number(ParamKey::SphereDistance, 50.0);
    assert_eq!(store.number(ParamKey::SphereDistance), Some(50.0));
    store.set_number(ParamKey::SphereOrbitSpeed, -1.0);
    assert_eq!(store.number(ParamKey::SphereOrbitSpeed), Some(-1.0));
}

#[test]
fn names_round_trip_through_keys() {
    for key in ParamKey::ALL {
        assert_eq!(ParamKey::from_name(key.name()), Some(key));
    }
    assert_eq!(ParamKey::from_name("sphereSpeed"), None);
    let store = ParamStore::new(SceneVariant::Classic);
    assert_eq!(store.get_by_name("normalScale"), Some(ParamValue::Number(1.0)));
}

#[test]
fn set_from_text_parses_by_kind() {
    let mut store = ParamStore::new(SceneVariant::Classic);
    assert_eq!(store.set_from_text("locationColor", "#00ff00").unwrap(), ParamKey::LocationColor);
    assert_eq!(store.color(ParamKey::LocationColor), Some(Rgb::from_hex(0x00ff00)));
    store.set_from_text("sphereDistance", " 3.5 ").unwrap();
    assert_eq!(store.number(ParamKey::SphereDistance), Some(3.5));

    assert!(matches!(store.set_from_text("bogus", "1"), Err(ParamError::Unknown(_))));
    assert!(matches!(
        store.set_from_text("sphereDistance", "far"),
        Err(ParamError::Number { key: "sphereDistance", .. })
    ));
    assert!(matches!(store.set_from_text("locationColor", "#12"), Err(ParamError::Color(_))));
    // Failed writes leave the previous value.
    assert_eq!(store.number(ParamKey::SphereDistance), Some(3.5));
}

#[test]
fn set_from_text_rejects_non_finite_numbers() {
    let mut store = ParamStore::new(SceneVariant::Classic);
    for text in ["nan", "NaN", "inf", "-inf", "infinity", "1e40"] {
        assert!(
            matches!(
                store.set_from_text("sphereOrbitSpeed", text),
                Err(ParamError::Number { key: "sphereOrbitSpeed", .. })
            ),
            "accepted {text:?}"
        );
    }
    assert_eq!(store.number(ParamKey::SphereOrbitSpeed), Some(0.05));
    assert!(store.take_changes().is_empty());
}

#[test]
fn changes_are_drained_once() {
    let mut store = ParamStore::new(SceneVariant::Signage);
    assert!(store.take_changes().is_empty());
    store.set_number(ParamKey::SphereRoughness, 0.5);
    store.set_color(ParamKey::LocationColor, Rgb::WHITE);
    let changes = store.take_changes();
    assert!(changes.contains(ParamKey::SphereRoughness));
    assert!(changes.contains(ParamKey::LocationColor));
    assert!(!changes.contains(ParamKey::NormalScale));
    assert_eq!(
        changes.iter().collect::<Vec<_>>(),
        vec![ParamKey::LocationColor, ParamKey::SphereRoughness]
    );
    assert!(store.take_changes().is_empty());
}
