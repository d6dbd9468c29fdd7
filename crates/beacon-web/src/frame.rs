use beacon_core::{GpuState, OrbitControls, SceneRuntime};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub runtime: Rc<RefCell<SceneRuntime>>,
    pub controls: Rc<RefCell<OrbitControls>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: GpuState<'a>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let w = self.canvas.width();
        let h = self.canvas.height();

        let mut runtime = self.runtime.borrow_mut();
        if runtime.resize(w, h) {
            log::debug!("[render] resize {}x{}", w, h);
        }
        self.gpu.resize_if_needed(w, h);

        runtime.tick();
        self.controls
            .borrow_mut()
            .update(&mut runtime.scene_mut().camera);

        match self.gpu.render(runtime.scene()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[render] surface lost; reconfiguring");
                self.gpu.reconfigure();
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
