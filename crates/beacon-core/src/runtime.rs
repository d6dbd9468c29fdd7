//! Frame driver state: scene, parameters, animator and clock together.
//!
//! Front ends call [`SceneRuntime::frame`] once per display refresh. Late
//! resources (the signage font, decoded images) arrive through channels and
//! are registered at the start of a frame, never during an update.

use crate::animation::{Animator, FrameParams};
use crate::font::BlockFont;
use crate::params::ParamStore;
use crate::scene::{Scene, SceneConfig};
use crate::texture::TextureImage;
use instant::Instant;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// Monotonic seconds since the first sample.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    start: Option<Instant>,
}

impl FrameClock {
    pub fn elapsed(&mut self) -> f64 {
        self.elapsed_at(Instant::now())
    }

    pub fn elapsed_at(&mut self, now: Instant) -> f64 {
        let start = *self.start.get_or_insert(now);
        if now > start {
            (now - start).as_secs_f64()
        } else {
            0.0
        }
    }
}

pub struct SceneRuntime {
    config: SceneConfig,
    params: ParamStore,
    scene: Scene,
    animator: Animator,
    clock: FrameClock,
    font_tx: Sender<BlockFont>,
    font_rx: Option<Receiver<BlockFont>>,
    image_tx: Sender<TextureImage>,
    image_rx: Receiver<TextureImage>,
    frames: u64,
}

impl SceneRuntime {
    pub fn new(config: SceneConfig) -> Self {
        let params = ParamStore::new(config.variant);
        let scene = Scene::assemble(&config, &params);
        let animator = Animator::for_variant(config.variant);
        let (font_tx, font_rx) = mpsc::channel();
        let (image_tx, image_rx) = mpsc::channel();
        Self {
            config,
            params,
            scene,
            animator,
            clock: FrameClock::default(),
            font_tx,
            font_rx: Some(font_rx),
            image_tx,
            image_rx,
            frames: 0,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn params(&self) -> &ParamStore {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut ParamStore {
        &mut self.params
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Sender for the asynchronously loaded signage font. Only the first
    /// font delivered is used.
    pub fn font_sender(&self) -> Sender<BlockFont> {
        self.font_tx.clone()
    }

    /// Sender for decoded images. Each slot takes the first image delivered.
    pub fn image_sender(&self) -> Sender<TextureImage> {
        self.image_tx.clone()
    }

    /// Register late resources that completed since the previous frame.
    pub fn poll_late_bindings(&mut self) {
        while let Ok(image) = self.image_rx.try_recv() {
            self.scene.attach_image(image);
        }
        let Some(rx) = &self.font_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(font) => {
                self.scene
                    .attach_signage(&font, &self.config.signage_text, &self.params);
                self.font_rx = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.font_rx = None;
            }
        }
    }

    /// One frame at the wall clock.
    pub fn tick(&mut self) -> f64 {
        let t = self.clock.elapsed();
        self.frame(t);
        t
    }

    /// One frame at elapsed time `t`: late bindings, parameter side effects,
    /// then the animation step.
    pub fn frame(&mut self, t: f64) {
        self.poll_late_bindings();
        let changes = self.params.take_changes();
        if !changes.is_empty() {
            self.scene.apply_param_changes(&self.params, changes);
        }
        let snapshot = FrameParams::read(&self.params);
        self.animator.step(&mut self.scene, &snapshot, t);
        self.frames += 1;
    }

    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        self.scene.resize(width, height)
    }
}
