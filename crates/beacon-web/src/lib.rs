#![cfg(target_arch = "wasm32")]
mod assets;
mod controls;
mod dom;
mod frame;
mod input;
mod panel;
mod query;

use beacon_core::{GpuState, ImageSlot, OrbitControls, SceneRuntime};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("beacon-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    dom::sync_canvas_backing_size(&canvas);
    dom::wire_canvas_resize(&window, &canvas);

    let search = dom::search_string(&window);
    let mut config = query::config_from_query(&search, canvas.width(), canvas.height());
    // The page lives in web/, one level below the shared assets.
    config.font_path = match query::query_value(&search, "font").filter(|u| !u.is_empty()) {
        Some(url) => query::decode_component(url),
        None => format!("../{}", config.font_path),
    };
    config.texture_dir = match query::query_value(&search, "textures").filter(|u| !u.is_empty()) {
        Some(dir) => query::decode_component(dir),
        None => format!("../{}", config.texture_dir),
    };
    log::info!(
        "[scene] variant={} size={}x{}",
        config.variant,
        config.width,
        config.height
    );

    let font_url = config.font_path.clone();
    let texture_dir = config.texture_dir.clone();
    let runtime = Rc::new(RefCell::new(SceneRuntime::new(config)));
    let controls = Rc::new(RefCell::new(OrbitControls::new(&runtime.borrow().scene().camera)));

    let gpu = GpuState::new(
        wgpu::SurfaceTarget::Canvas(canvas.clone()),
        canvas.width(),
        canvas.height(),
    )
    .await
    .map_err(|e| anyhow::anyhow!("WebGPU init error: {}", e))?;

    if let Err(e) = panel::build_panel(&document, runtime.clone()) {
        log::error!("[panel] build failed: {:?}", e);
    }
    input::wire_orbit_controls(&canvas, controls.clone());

    let sender = runtime.borrow().font_sender();
    spawn_local(assets::load_font(font_url, sender));
    for slot in ImageSlot::ALL {
        let sender = runtime.borrow().image_sender();
        spawn_local(assets::load_image(slot, slot.path_in(&texture_dir), sender));
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        runtime,
        controls,
        canvas,
        gpu,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
