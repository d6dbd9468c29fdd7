//! Per-frame animation update.
//!
//! The animated set is an explicit list of `(EntityId, AnimationRule)`
//! bindings evaluated in order by [`Animator::step`]. Orbit angles are
//! fixed-step accumulators advanced once per call (their real angular speed
//! follows the frame rate); everything else is a function of elapsed time.
//!
//! Angles and time are kept in `f64` and narrowed to `f32` only when written
//! into a pose, so motion stays smooth however long the scene runs.

use crate::constants::*;
use crate::params::{ParamKey, ParamStore};
use crate::scene::{EntityId, Scene, SceneVariant};
use smallvec::SmallVec;
use std::f64::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationRule {
    /// Circular orbit using `cos` for x and `sin` for z.
    PrimaryOrbit { y_offset: f32 },
    /// Circular orbit using `sin` for x and `cos` for z, counter-spinning.
    SecondaryOrbit,
    /// Spin at the rotation-speed parameter and bob around the base height.
    MarkerHover { pulse: bool },
    /// Counter-rotate and pulse opacity/scale in lockstep.
    IndicatorPulse,
}

/// Parameter values read once at the start of a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameParams {
    pub orbit_speed: f32,
    pub orbit_distance: f32,
    pub second_orbit_speed: f32,
    pub second_distance: f32,
    pub marker_rotation_speed: f32,
}

impl FrameParams {
    pub fn read(store: &ParamStore) -> Self {
        let n = |key, fallback| store.number(key).unwrap_or(fallback);
        Self {
            orbit_speed: n(ParamKey::SphereOrbitSpeed, 0.05),
            orbit_distance: n(ParamKey::SphereDistance, 2.5),
            second_orbit_speed: n(ParamKey::SecondOrbitSpeed, 0.03),
            second_distance: n(ParamKey::SecondDistance, 4.0),
            marker_rotation_speed: n(ParamKey::LocationRotationSpeed, 1.0),
        }
    }
}

/// Accumulated orbit angle in radians; unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrbitState {
    pub angle: f64,
}

#[derive(Clone, Copy, Debug)]
struct Binding {
    entity: EntityId,
    rule: AnimationRule,
}

#[derive(Clone, Debug)]
pub struct Animator {
    bindings: SmallVec<[Binding; 6]>,
    primary: OrbitState,
    secondary: OrbitState,
}

impl Animator {
    pub fn new() -> Self {
        Self {
            bindings: SmallVec::new(),
            primary: OrbitState::default(),
            secondary: OrbitState {
                angle: SECONDARY_INITIAL_ANGLE,
            },
        }
    }

    /// Bindings for every animated entity the variant defines, in update order.
    pub fn for_variant(variant: SceneVariant) -> Self {
        let mut animator = Self::new();
        animator.bind(
            EntityId::PrimaryOrbiter,
            AnimationRule::PrimaryOrbit {
                y_offset: variant.primary_y_offset(),
            },
        );
        if variant.has_secondary_orbiter() {
            animator.bind(EntityId::SecondaryOrbiter, AnimationRule::SecondaryOrbit);
        }
        animator.bind(
            EntityId::Marker,
            AnimationRule::MarkerHover {
                pulse: variant.marker_pulses(),
            },
        );
        animator.bind(EntityId::Indicator, AnimationRule::IndicatorPulse);
        animator
    }

    pub fn bind(&mut self, entity: EntityId, rule: AnimationRule) {
        self.bindings.push(Binding { entity, rule });
    }

    pub fn primary(&self) -> OrbitState {
        self.primary
    }

    pub fn secondary(&self) -> OrbitState {
        self.secondary
    }

    pub fn primary_mut(&mut self) -> &mut OrbitState {
        &mut self.primary
    }

    pub fn secondary_mut(&mut self) -> &mut OrbitState {
        &mut self.secondary
    }

    /// Advance one frame at elapsed time `t` seconds. Bindings whose entity
    /// does not exist yet are skipped for this frame.
    pub fn step(&mut self, scene: &mut Scene, params: &FrameParams, t: f64) {
        for i in 0..self.bindings.len() {
            let Binding { entity, rule } = self.bindings[i];
            if !scene.contains(entity) {
                continue;
            }
            match rule {
                AnimationRule::PrimaryOrbit { y_offset } => {
                    self.primary.angle += params.orbit_speed as f64;
                    let angle = self.primary.angle;
                    if let Some(e) = scene.entity_mut(entity) {
                        let (x, z) = primary_orbit_xz(angle, params.orbit_distance);
                        e.pose.position.x = x;
                        e.pose.position.z = z;
                        e.pose.position.y = primary_bob(t) + y_offset;
                        e.pose.rotation.y = spin(e.pose.rotation.y, PRIMARY_SPIN_Y_PER_FRAME);
                        e.pose.rotation.x = spin(e.pose.rotation.x, PRIMARY_SPIN_X_PER_FRAME);
                    }
                }
                AnimationRule::SecondaryOrbit => {
                    self.secondary.angle += params.second_orbit_speed as f64;
                    let angle = self.secondary.angle;
                    if let Some(e) = scene.entity_mut(entity) {
                        let (x, z) = secondary_orbit_xz(angle, params.second_distance);
                        e.pose.position.x = x;
                        e.pose.position.z = z;
                        e.pose.position.y = secondary_bob(t);
                        e.pose.rotation.y = spin(e.pose.rotation.y, -PRIMARY_SPIN_Y_PER_FRAME);
                        e.pose.rotation.x = spin(e.pose.rotation.x, -PRIMARY_SPIN_X_PER_FRAME);
                    }
                }
                AnimationRule::MarkerHover { pulse } => {
                    if let Some(e) = scene.entity_mut(entity) {
                        e.pose.rotation.y = turn(t * params.marker_rotation_speed as f64);
                        e.pose.position.y = marker_height(t);
                        if pulse {
                            let s = marker_pulse_scale(t);
                            e.pose.scale = glam::Vec3::splat(s);
                        }
                    }
                }
                AnimationRule::IndicatorPulse => {
                    let Some(e) = scene.entity_mut(entity) else {
                        continue;
                    };
                    // Disk is tilted flat, so local Z is the world vertical.
                    e.pose.rotation.z = -turn(t * INDICATOR_SPIN_SPEED as f64);
                    let s = indicator_scale(t);
                    e.pose.scale.x = s;
                    e.pose.scale.y = s;
                    let material = e.material;
                    if let Some(m) = scene.material_mut(material) {
                        m.opacity = indicator_opacity(t);
                    }
                }
            }
        }
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}

/// `angle` reduced into (-TAU, TAU), keeping its sign.
#[inline]
pub fn turn(angle: f64) -> f32 {
    (angle % TAU) as f32
}

/// Per-frame spin accumulator, kept within one turn.
#[inline]
fn spin(current: f32, step: f32) -> f32 {
    turn(current as f64 + step as f64)
}

#[inline]
pub fn primary_orbit_xz(angle: f64, distance: f32) -> (f32, f32) {
    (angle.cos() as f32 * distance, angle.sin() as f32 * distance)
}

#[inline]
pub fn secondary_orbit_xz(angle: f64, distance: f32) -> (f32, f32) {
    (angle.sin() as f32 * distance, angle.cos() as f32 * distance)
}

#[inline]
pub fn primary_bob(t: f64) -> f32 {
    t.sin() as f32 * PRIMARY_BOB_AMPLITUDE
}

#[inline]
fn wave(t: f64, freq: f32) -> f32 {
    (t * freq as f64).sin() as f32
}

#[inline]
pub fn secondary_bob(t: f64) -> f32 {
    (t * SECONDARY_BOB_FREQ as f64).cos() as f32 * SECONDARY_BOB_AMPLITUDE + SECONDARY_BOB_OFFSET
}

#[inline]
pub fn marker_height(t: f64) -> f32 {
    MARKER_BASE_HEIGHT + wave(t, MARKER_BOB_FREQ) * MARKER_BOB_AMPLITUDE
}

#[inline]
pub fn marker_pulse_scale(t: f64) -> f32 {
    1.0 + wave(t, MARKER_BOB_FREQ) * MARKER_PULSE_AMPLITUDE
}

#[inline]
pub fn indicator_opacity(t: f64) -> f32 {
    INDICATOR_BASE_OPACITY + wave(t, INDICATOR_PULSE_FREQ) * INDICATOR_OPACITY_AMPLITUDE
}

#[inline]
pub fn indicator_scale(t: f64) -> f32 {
    INDICATOR_BASE_SCALE + wave(t, INDICATOR_PULSE_FREQ) * INDICATOR_SCALE_AMPLITUDE
}
