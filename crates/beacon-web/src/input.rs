use beacon_core::OrbitControls;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Default, Clone, Copy)]
pub struct DragState {
    pub active: bool,
    pub pointer_id: i32,
    pub last: Vec2,
}

#[inline]
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let sx = (x_css / rect.width().max(1.0) as f32) * canvas.width() as f32;
    let sy = (y_css / rect.height().max(1.0) as f32) * canvas.height() as f32;
    Vec2::new(sx, sy)
}

fn listen<E: 'static + JsCast>(
    canvas: &web::HtmlCanvasElement,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    canvas
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .ok();
    closure.forget();
}

/// Drag to orbit, wheel to zoom.
pub fn wire_orbit_controls(canvas: &web::HtmlCanvasElement, controls: Rc<RefCell<OrbitControls>>) {
    let drag = Rc::new(RefCell::new(DragState::default()));

    {
        let drag = drag.clone();
        let canvas_c = canvas.clone();
        listen(canvas, "pointerdown", move |ev: web::PointerEvent| {
            let mut d = drag.borrow_mut();
            d.active = true;
            d.pointer_id = ev.pointer_id();
            d.last = pointer_canvas_px(&ev, &canvas_c);
            canvas_c.set_pointer_capture(ev.pointer_id()).ok();
            ev.prevent_default();
        });
    }
    {
        let drag = drag.clone();
        let controls = controls.clone();
        let canvas_c = canvas.clone();
        listen(canvas, "pointermove", move |ev: web::PointerEvent| {
            let mut d = drag.borrow_mut();
            if !d.active || d.pointer_id != ev.pointer_id() {
                return;
            }
            let p = pointer_canvas_px(&ev, &canvas_c);
            let delta = p - d.last;
            d.last = p;
            controls
                .borrow_mut()
                .rotate(delta.x, delta.y, canvas_c.height());
        });
    }
    for event in ["pointerup", "pointercancel"] {
        let drag = drag.clone();
        let canvas_c = canvas.clone();
        listen(canvas, event, move |ev: web::PointerEvent| {
            let mut d = drag.borrow_mut();
            if d.pointer_id == ev.pointer_id() {
                d.active = false;
                canvas_c.release_pointer_capture(ev.pointer_id()).ok();
            }
        });
    }
    {
        listen(canvas, "wheel", move |ev: web::WheelEvent| {
            controls.borrow_mut().zoom(ev.delta_y() as f32);
            ev.prevent_default();
        });
    }
}
