mod cli;
mod keys;

use beacon_core::{BlockFont, GpuState, ImageSlot, OrbitControls, SceneRuntime, TextureImage};
use clap::Parser;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

/// Read and parse the signage font off the render thread.
fn spawn_font_loader(path: String, sender: Sender<BlockFont>) {
    let spawned = thread::Builder::new()
        .name("font-loader".into())
        .spawn(move || {
            let result = std::fs::read_to_string(&path)
                .map_err(anyhow::Error::from)
                .and_then(|source| Ok(BlockFont::parse(&source)?));
            match result {
                Ok(font) => {
                    log::info!("[font] loaded {} glyphs from {}", font.len(), path);
                    let _ = sender.send(font);
                }
                Err(e) => log::error!("[font] {}: {:?}", path, e),
            }
        });
    if let Err(e) = spawned {
        log::error!("[font] loader thread: {:?}", e);
    }
}

/// Read and decode the scene images off the render thread, one at a time.
/// A missing or unreadable file leaves its objects untextured.
fn spawn_image_loader(dir: String, sender: Sender<TextureImage>) {
    let spawned = thread::Builder::new()
        .name("image-loader".into())
        .spawn(move || {
            for slot in ImageSlot::ALL {
                let path = slot.path_in(&dir);
                let result = std::fs::read(&path)
                    .map_err(anyhow::Error::from)
                    .and_then(|bytes| Ok(TextureImage::decode(slot, &bytes)?));
                match result {
                    Ok(image) => {
                        log::info!("[texture] {:?} {}x{} from {}", slot, image.width(), image.height(), path);
                        if sender.send(image).is_err() {
                            return;
                        }
                    }
                    Err(e) => log::warn!("[texture] {}: {:?}", path, e),
                }
            }
        });
    if let Err(e) = spawned {
        log::error!("[texture] loader thread: {:?}", e);
    }
}

fn key_label(key: &Key) -> Option<&str> {
    match key {
        Key::Character(c) => Some(c.as_str()),
        Key::Named(NamedKey::ArrowUp) => Some("ArrowUp"),
        Key::Named(NamedKey::ArrowDown) => Some("ArrowDown"),
        Key::Named(NamedKey::ArrowLeft) => Some("ArrowLeft"),
        Key::Named(NamedKey::ArrowRight) => Some("ArrowRight"),
        _ => None,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = cli::CliArgs::parse();
    let config = args.scene_config();
    log::info!(
        "[scene] variant={} size={}x{}",
        config.variant,
        config.width,
        config.height
    );

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(format!("Location Beacon ({})", config.variant))
            .with_inner_size(PhysicalSize::new(config.width, config.height))
            .build(&event_loop)?,
    );
    let size = window.inner_size();

    let font_path = config.font_path.clone();
    let texture_dir = config.texture_dir.clone();
    let mut runtime = SceneRuntime::new(config);
    runtime.resize(size.width, size.height);
    let mut controls = OrbitControls::new(&runtime.scene().camera);
    let mut gpu = pollster::block_on(GpuState::new(window.clone(), size.width, size.height))?;

    spawn_font_loader(font_path, runtime.font_sender());
    spawn_image_loader(texture_dir, runtime.image_sender());

    let mut dragging = false;
    let mut last_cursor: Option<(f64, f64)> = None;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => {
                runtime.resize(size.width, size.height);
                gpu.resize_if_needed(size.width, size.height);
            }
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => dragging = state == ElementState::Pressed,
            WindowEvent::CursorMoved { position, .. } => {
                if let (true, Some((x, y))) = (dragging, last_cursor) {
                    let height = window.inner_size().height;
                    controls.rotate((position.x - x) as f32, (position.y - y) as f32, height);
                }
                last_cursor = Some((position.x, position.y));
            }
            WindowEvent::MouseWheel { delta, .. } => {
                // Positive winit deltas scroll up, which zooms in.
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * 100.0,
                    MouseScrollDelta::PixelDelta(p) => -p.y as f32,
                };
                controls.zoom(delta);
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                if let Some(action) = key_label(&event.logical_key).and_then(keys::action_for) {
                    keys::apply(runtime.params_mut(), action);
                }
            }
            _ => {}
        },
        Event::AboutToWait => {
            runtime.tick();
            controls.update(&mut runtime.scene_mut().camera);
            match gpu.render(runtime.scene()) {
                Ok(()) => window.request_redraw(),
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(e) => log::warn!("[render] {:?}", e),
            }
        }
        _ => {}
    })?;
    Ok(())
}
