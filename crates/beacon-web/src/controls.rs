// Debug panel descriptors derived from parameter specs. No DOM access here,
// `panel.rs` turns these into elements.

use beacon_core::params::{PanelFolder, ParamKind, ParamSpec, ParamStore, ParamValue};

#[derive(Clone, Debug, PartialEq)]
pub struct ControlDesc {
    pub name: &'static str,
    pub label: &'static str,
    pub input_type: &'static str,
    pub min: Option<String>,
    pub max: Option<String>,
    pub step: Option<String>,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FolderDesc {
    pub title: &'static str,
    pub controls: Vec<ControlDesc>,
}

/// Text an `<input>` shows for `value`: `#rrggbb` for colors, the shortest
/// round-tripping decimal for numbers.
pub fn value_text(value: ParamValue) -> String {
    match value {
        ParamValue::Number(n) => format!("{}", n),
        ParamValue::Color(c) => format!("#{:06x}", c.to_hex()),
    }
}

pub fn control_for(spec: &ParamSpec, current: Option<ParamValue>) -> ControlDesc {
    let value = value_text(current.unwrap_or(spec.default));
    match spec.kind {
        ParamKind::Number(range) => ControlDesc {
            name: spec.key.name(),
            label: spec.label,
            input_type: "range",
            min: Some(format!("{}", range.min)),
            max: Some(format!("{}", range.max)),
            step: Some(format!("{}", range.step)),
            value,
        },
        ParamKind::Color => ControlDesc {
            name: spec.key.name(),
            label: spec.label,
            input_type: "color",
            min: None,
            max: None,
            step: None,
            value,
        },
    }
}

/// Folders in first-appearance order, each holding its controls in spec order.
pub fn panel_layout(params: &ParamStore) -> Vec<FolderDesc> {
    let mut folders: Vec<(PanelFolder, FolderDesc)> = Vec::new();
    for spec in params.specs() {
        let control = control_for(spec, params.get(spec.key));
        match folders.iter_mut().find(|(f, _)| *f == spec.folder) {
            Some((_, desc)) => desc.controls.push(control),
            None => folders.push((
                spec.folder,
                FolderDesc {
                    title: spec.folder.title(),
                    controls: vec![control],
                },
            )),
        }
    }
    folders.into_iter().map(|(_, desc)| desc).collect()
}
