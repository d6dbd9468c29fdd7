//! Keyboard nudges for the scene parameters, the desktop stand-in for the
//! web debug panel.

use beacon_core::params::{ParamKind, ParamStore};
use beacon_core::{ParamKey, Rgb};

/// Colors cycled by the color key.
pub const PALETTE: [u32; 6] = [0xff0000, 0xff8800, 0xffee00, 0x00ff66, 0x00a0ff, 0xcc44ff];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Nudge(ParamKey, i32),
    NextColor,
}

/// Map a key label (winit logical key text or named key) to an action.
pub fn action_for(key: &str) -> Option<KeyAction> {
    use KeyAction::*;
    use ParamKey::*;
    Some(match key {
        "ArrowUp" => Nudge(SphereOrbitSpeed, 1),
        "ArrowDown" => Nudge(SphereOrbitSpeed, -1),
        "ArrowRight" => Nudge(SphereDistance, 1),
        "ArrowLeft" => Nudge(SphereDistance, -1),
        "]" => Nudge(EmissiveIntensity, 5),
        "[" => Nudge(EmissiveIntensity, -5),
        "." => Nudge(LocationRotationSpeed, 1),
        "," => Nudge(LocationRotationSpeed, -1),
        "w" => Nudge(SecondOrbitSpeed, 1),
        "s" => Nudge(SecondOrbitSpeed, -1),
        "d" => Nudge(SecondDistance, 1),
        "a" => Nudge(SecondDistance, -1),
        "r" => Nudge(SphereRoughness, 5),
        "R" => Nudge(SphereRoughness, -5),
        "m" => Nudge(SphereMetalness, 5),
        "M" => Nudge(SphereMetalness, -5),
        "n" => Nudge(NormalScale, 10),
        "N" => Nudge(NormalScale, -10),
        "c" | "C" => NextColor,
        _ => return None,
    })
}

/// Apply one action. Nudges move by whole slider steps and stay inside the
/// slider range. Returns false when the parameter does not exist for this
/// variant.
pub fn apply(params: &mut ParamStore, action: KeyAction) -> bool {
    match action {
        KeyAction::Nudge(key, steps) => {
            let Some(spec) = params.spec(key) else {
                return false;
            };
            let ParamKind::Number(range) = spec.kind else {
                return false;
            };
            let current = params.number(key).unwrap_or(range.min);
            let next = (current + range.step * steps as f32).clamp(range.min, range.max);
            params.set_number(key, next);
            log::info!("[keys] {} = {:.2}", key.name(), next);
            true
        }
        KeyAction::NextColor => {
            let current = params.color(ParamKey::LocationColor).map(Rgb::to_hex);
            let index = PALETTE
                .iter()
                .position(|&c| Some(c) == current)
                .map_or(0, |i| (i + 1) % PALETTE.len());
            params.set_color(ParamKey::LocationColor, Rgb::from_hex(PALETTE[index]));
            log::info!("[keys] locationColor = #{:06x}", PALETTE[index]);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_core::SceneVariant;

    #[test]
    fn nudges_stay_in_slider_range() {
        let mut params = ParamStore::new(SceneVariant::Classic);
        for _ in 0..100 {
            apply(&mut params, KeyAction::Nudge(ParamKey::SphereDistance, 1));
        }
        assert_eq!(params.number(ParamKey::SphereDistance), Some(5.0));
        for _ in 0..100 {
            apply(&mut params, KeyAction::Nudge(ParamKey::SphereDistance, -1));
        }
        assert_eq!(params.number(ParamKey::SphereDistance), Some(1.0));
    }

    #[test]
    fn second_orbit_keys_only_act_on_signage() {
        let action = action_for("d").unwrap();
        assert_eq!(action, KeyAction::Nudge(ParamKey::SecondDistance, 1));
        let mut classic = ParamStore::new(SceneVariant::Classic);
        assert!(!apply(&mut classic, action));
        let mut signage = ParamStore::new(SceneVariant::Signage);
        assert!(apply(&mut signage, action));
        assert!((signage.number(ParamKey::SecondDistance).unwrap() - 4.1).abs() < 1e-5);
        assert!(apply(&mut signage, action_for("s").unwrap()));
        assert!((signage.number(ParamKey::SecondOrbitSpeed).unwrap() - 0.02).abs() < 1e-6);
    }

    #[test]
    fn every_signage_parameter_has_a_key() {
        let labels = [
            "ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight", "[", "]", ",", ".", "w", "s",
            "d", "a", "r", "R", "m", "M", "n", "N", "c",
        ];
        let reachable: Vec<ParamKey> = labels
            .iter()
            .filter_map(|l| match action_for(l)? {
                KeyAction::Nudge(key, _) => Some(key),
                KeyAction::NextColor => Some(ParamKey::LocationColor),
            })
            .collect();
        for spec in ParamStore::new(SceneVariant::Signage).specs() {
            assert!(reachable.contains(&spec.key), "no key for {}", spec.key.name());
        }
    }

    #[test]
    fn shifted_letters_nudge_down() {
        let mut params = ParamStore::new(SceneVariant::Classic);
        apply(&mut params, action_for("N").unwrap());
        assert!((params.number(ParamKey::NormalScale).unwrap() - 0.9).abs() < 1e-5);
        apply(&mut params, action_for("R").unwrap());
        assert!((params.number(ParamKey::SphereRoughness).unwrap() - 0.15).abs() < 1e-5);
    }

    #[test]
    fn color_key_cycles_palette() {
        let mut params = ParamStore::new(SceneVariant::Classic);
        apply(&mut params, KeyAction::NextColor);
        assert_eq!(params.color(ParamKey::LocationColor), Some(Rgb::from_hex(PALETTE[1])));
        for _ in 0..PALETTE.len() - 1 {
            apply(&mut params, KeyAction::NextColor);
        }
        assert_eq!(params.color(ParamKey::LocationColor), Some(Rgb::from_hex(PALETTE[0])));
    }

    #[test]
    fn unmapped_keys_do_nothing() {
        assert_eq!(action_for("q"), None);
        assert_eq!(action_for("ArrowUp"), Some(KeyAction::Nudge(ParamKey::SphereOrbitSpeed, 1)));
    }
}
