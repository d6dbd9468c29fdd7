//! Named, externally editable scene controls.
//!
//! The store is a plain value map: writes overwrite without clamping and are
//! visible on the next read. UI ranges live on [`ParamSpec`] and are only
//! advisory. Every write also marks its key dirty so change-bound side
//! effects (glow sync, material sliders) can be applied once per frame.

use crate::color::{ColorParseError, Rgb};
use crate::scene::SceneVariant;
use fnv::FnvHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamKey {
    LocationColor,
    EmissiveIntensity,
    LocationRotationSpeed,
    SphereOrbitSpeed,
    SphereDistance,
    SecondOrbitSpeed,
    SecondDistance,
    SphereRoughness,
    SphereMetalness,
    NormalScale,
}

impl ParamKey {
    pub const ALL: [ParamKey; 10] = [
        ParamKey::LocationColor,
        ParamKey::EmissiveIntensity,
        ParamKey::LocationRotationSpeed,
        ParamKey::SphereOrbitSpeed,
        ParamKey::SphereDistance,
        ParamKey::SecondOrbitSpeed,
        ParamKey::SecondDistance,
        ParamKey::SphereRoughness,
        ParamKey::SphereMetalness,
        ParamKey::NormalScale,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ParamKey::LocationColor => "locationColor",
            ParamKey::EmissiveIntensity => "emissiveIntensity",
            ParamKey::LocationRotationSpeed => "locationRotationSpeed",
            ParamKey::SphereOrbitSpeed => "sphereOrbitSpeed",
            ParamKey::SphereDistance => "sphereDistance",
            ParamKey::SecondOrbitSpeed => "secondOrbitSpeed",
            ParamKey::SecondDistance => "secondDistance",
            ParamKey::SphereRoughness => "sphereRoughness",
            ParamKey::SphereMetalness => "sphereMetalness",
            ParamKey::NormalScale => "normalScale",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.name() == name)
    }

    #[inline]
    fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue {
    Number(f32),
    Color(Rgb),
}

impl ParamValue {
    pub fn as_number(self) -> Option<f32> {
        match self {
            ParamValue::Number(v) => Some(v),
            ParamValue::Color(_) => None,
        }
    }

    pub fn as_color(self) -> Option<Rgb> {
        match self {
            ParamValue::Color(c) => Some(c),
            ParamValue::Number(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamKind {
    Number(ParamRange),
    Color,
}

/// Debug panel grouping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelFolder {
    LocationMarker,
    Animation,
    SphereSettings,
}

impl PanelFolder {
    pub fn title(self) -> &'static str {
        match self {
            PanelFolder::LocationMarker => "Location Marker",
            PanelFolder::Animation => "Animation",
            PanelFolder::SphereSettings => "Sphere Settings",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamSpec {
    pub key: ParamKey,
    pub label: &'static str,
    pub folder: PanelFolder,
    pub kind: ParamKind,
    pub default: ParamValue,
}

#[derive(Debug, thiserror::Error)]
pub enum ParamError {
    #[error("unknown parameter `{0}`")]
    Unknown(String),
    #[error("invalid number `{text}` for `{key}`")]
    Number { key: &'static str, text: String },
    #[error(transparent)]
    Color(#[from] ColorParseError),
}

const fn number(
    key: ParamKey,
    label: &'static str,
    folder: PanelFolder,
    default: f32,
    min: f32,
    max: f32,
    step: f32,
) -> ParamSpec {
    ParamSpec {
        key,
        label,
        folder,
        kind: ParamKind::Number(ParamRange { min, max, step }),
        default: ParamValue::Number(default),
    }
}

/// Controls exposed for `variant`, in panel order.
pub fn param_specs(variant: SceneVariant) -> Vec<ParamSpec> {
    use PanelFolder::*;
    use ParamKey::*;

    let (orbit_max, distance_max) = match variant {
        SceneVariant::Classic => (0.2, 5.0),
        SceneVariant::Signage => (0.1, 8.0),
    };
    let mut specs = vec![
        ParamSpec {
            key: LocationColor,
            label: "Color",
            folder: LocationMarker,
            kind: ParamKind::Color,
            default: ParamValue::Color(Rgb::from_hex(0xff0000)),
        },
        number(EmissiveIntensity, "Glow Intensity", LocationMarker, 0.2, 0.0, 1.0, 0.01),
        number(LocationRotationSpeed, "Location Speed", Animation, 1.0, 0.0, 5.0, 0.1),
        number(SphereOrbitSpeed, "Orbit Speed", Animation, 0.05, 0.01, orbit_max, 0.01),
        number(SphereDistance, "Orbit Distance", Animation, 2.5, 1.0, distance_max, 0.1),
    ];
    if variant.has_secondary_orbiter() {
        specs.push(number(SecondOrbitSpeed, "Second Orbit Speed", Animation, 0.03, 0.01, 0.1, 0.01));
        specs.push(number(SecondDistance, "Second Orbit Distance", Animation, 4.0, 1.0, 8.0, 0.1));
    }
    specs.extend([
        number(SphereRoughness, "Roughness", SphereSettings, 0.2, 0.0, 1.0, 0.01),
        number(SphereMetalness, "Metalness", SphereSettings, 0.8, 0.0, 1.0, 0.01),
        number(NormalScale, "Normal Scale", SphereSettings, 1.0, 0.0, 2.0, 0.01),
    ]);
    specs
}

/// Keys written since the last [`ParamStore::take_changes`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet(u32);

impl ChangeSet {
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, key: ParamKey) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn iter(self) -> impl Iterator<Item = ParamKey> {
        ParamKey::ALL.into_iter().filter(move |k| self.contains(*k))
    }
}

#[derive(Clone, Debug)]
pub struct ParamStore {
    specs: Vec<ParamSpec>,
    values: FnvHashMap<ParamKey, ParamValue>,
    dirty: u32,
}

impl ParamStore {
    pub fn new(variant: SceneVariant) -> Self {
        let specs = param_specs(variant);
        let values = specs.iter().map(|s| (s.key, s.default)).collect();
        Self {
            specs,
            values,
            dirty: 0,
        }
    }

    pub fn specs(&self) -> &[ParamSpec] {
        &self.specs
    }

    pub fn spec(&self, key: ParamKey) -> Option<&ParamSpec> {
        self.specs.iter().find(|s| s.key == key)
    }

    pub fn get(&self, key: ParamKey) -> Option<ParamValue> {
        self.values.get(&key).copied()
    }

    pub fn get_by_name(&self, name: &str) -> Option<ParamValue> {
        ParamKey::from_name(name).and_then(|k| self.get(k))
    }

    pub fn number(&self, key: ParamKey) -> Option<f32> {
        self.get(key).and_then(ParamValue::as_number)
    }

    pub fn color(&self, key: ParamKey) -> Option<Rgb> {
        self.get(key).and_then(ParamValue::as_color)
    }

    /// Overwrite `key`. No range check is made.
    pub fn set(&mut self, key: ParamKey, value: ParamValue) {
        self.values.insert(key, value);
        self.dirty |= key.bit();
    }

    pub fn set_number(&mut self, key: ParamKey, value: f32) {
        self.set(key, ParamValue::Number(value));
    }

    pub fn set_color(&mut self, key: ParamKey, value: Rgb) {
        self.set(key, ParamValue::Color(value));
    }

    /// Parse UI text for `name` according to its declared kind and store it.
    pub fn set_from_text(&mut self, name: &str, text: &str) -> Result<ParamKey, ParamError> {
        let key = ParamKey::from_name(name).ok_or_else(|| ParamError::Unknown(name.to_string()))?;
        let is_color = matches!(self.spec(key).map(|s| s.kind), Some(ParamKind::Color));
        let value = if is_color {
            ParamValue::Color(Rgb::parse(text)?)
        } else {
            let v = text
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ParamError::Number {
                    key: key.name(),
                    text: text.to_string(),
                })?;
            ParamValue::Number(v)
        };
        self.set(key, value);
        Ok(key)
    }

    pub fn take_changes(&mut self) -> ChangeSet {
        ChangeSet(std::mem::take(&mut self.dirty))
    }
}
