// Debug panel: one <details> folder per group, one input per parameter.
// Inputs write straight into the parameter store; side effects run on the
// next frame.

use crate::controls::{panel_layout, ControlDesc};
use beacon_core::SceneRuntime;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

fn element(document: &web::Document, tag: &str) -> anyhow::Result<web::Element> {
    document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

fn append(parent: &web::Node, child: &web::Node) -> anyhow::Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

fn build_control(
    document: &web::Document,
    desc: &ControlDesc,
    runtime: Rc<RefCell<SceneRuntime>>,
) -> anyhow::Result<web::Element> {
    let row = element(document, "label")?;
    row.set_class_name("panel-row");

    let caption = element(document, "span")?;
    caption.set_text_content(Some(desc.label));
    append(&row, &caption)?;

    let input: web::HtmlInputElement = element(document, "input")?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    input.set_type(desc.input_type);
    input.set_name(desc.name);
    if let Some(min) = &desc.min {
        input.set_min(min);
    }
    if let Some(max) = &desc.max {
        input.set_max(max);
    }
    if let Some(step) = &desc.step {
        input.set_step(step);
    }
    input.set_value(&desc.value);
    append(&row, &input)?;

    let readout = element(document, "output")?;
    readout.set_text_content(Some(&desc.value));
    append(&row, &readout)?;

    let name = desc.name;
    let input_c = input.clone();
    let closure = Closure::wrap(Box::new(move || {
        let text = input_c.value();
        match runtime.borrow_mut().params_mut().set_from_text(name, &text) {
            Ok(_) => readout.set_text_content(Some(&text)),
            Err(e) => log::warn!("[panel] {}", e),
        }
    }) as Box<dyn FnMut()>);
    input
        .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())
        .ok();
    closure.forget();

    Ok(row)
}

/// Populate `#panel` with the runtime's controls. A page without the
/// container simply runs without a panel.
pub fn build_panel(document: &web::Document, runtime: Rc<RefCell<SceneRuntime>>) -> anyhow::Result<()> {
    let Some(container) = document.get_element_by_id("panel") else {
        log::info!("[panel] no #panel container; skipping");
        return Ok(());
    };
    let layout = panel_layout(runtime.borrow().params());
    let mut count = 0;
    for folder in &layout {
        let details = element(document, "details")?;
        details.set_attribute("open", "").ok();
        let summary = element(document, "summary")?;
        summary.set_text_content(Some(folder.title));
        append(&details, &summary)?;
        for desc in &folder.controls {
            let row = build_control(document, desc, runtime.clone())?;
            append(&details, &row)?;
            count += 1;
        }
        append(&container, &details)?;
    }
    log::info!("[panel] {} folders, {} controls", layout.len(), count);
    Ok(())
}
