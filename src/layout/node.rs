use crate::config::LayoutConfig;
use crate::geometry::BoundingBox;
use crate::model::{DefinitionStore, NodeDef, PortDirection, WorkflowNode};
use crate::theme::Theme;

use super::port::{layout_ports, node_element_id};
use super::text::{measure_label, text_width};
use super::{NodeLayout, PortLayout};

/// Display label: explicit node label, else definition name, else `node<index>`.
pub fn resolve_label(node: &WorkflowNode, def: Option<&NodeDef>, index: usize) -> String {
    if let Some(label) = &node.label {
        return label.clone();
    }
    match def {
        Some(def) => def.name.clone(),
        None => format!("node{index}"),
    }
}

/// Node width from its label width and widest port row.
pub fn node_width(label_width: f64, def: Option<&NodeDef>, config: &LayoutConfig) -> f64 {
    let Some(def) = def else {
        return config.default_node_width;
    };
    let gaps = def.max_port_count().saturating_sub(1) as f64;
    let ports_width = gaps * config.port_spacing + 2.0 * config.port_radius;
    label_width.max(ports_width) + 2.0 * config.node_padding
}

/// Node box padded vertically by the port overhang.
pub fn node_bounds(x: f64, y: f64, width: f64, height: f64, config: &LayoutConfig) -> BoundingBox {
    BoundingBox::centered(x, y, width, height).expand(0.0, config.port_radius)
}

pub(super) fn layout_node(
    node: &WorkflowNode,
    (x, y): (f64, f64),
    def: Option<&NodeDef>,
    index: usize,
    store: &DefinitionStore,
    theme: &Theme,
    config: &LayoutConfig,
) -> NodeLayout {
    if def.is_none() {
        tracing::debug!(
            index,
            element = %node.id,
            "definition not in store, drawing placeholder node"
        );
    }
    let label = measure_label(&resolve_label(node, def, index), theme.font_size, config);
    let width = node_width(label.width, def, config);
    let height = config.node_height(theme.font_size);
    let (inputs, outputs) = match def {
        Some(def) => (
            layout_ports(def, store, index, PortDirection::Input, height, config, false),
            layout_ports(def, store, index, PortDirection::Output, height, config, false),
        ),
        None => (Vec::new(), Vec::new()),
    };

    NodeLayout {
        id: node_element_id(index),
        index,
        x,
        y,
        width,
        height,
        label,
        resolved: def.is_some(),
        url: def.and_then(|def| def.url.clone()),
        inputs,
        outputs,
        bounds: node_bounds(x, y, width, height, config),
    }
}

/// Lays out a node definition on its own at the origin, with port captions.
pub(super) fn layout_node_preview(
    def: &NodeDef,
    store: &DefinitionStore,
    theme: &Theme,
    config: &LayoutConfig,
) -> NodeLayout {
    let label = measure_label(&def.name, theme.font_size, config);
    let width = node_width(label.width, Some(def), config);
    let height = config.node_height(theme.font_size);
    let inputs = layout_ports(def, store, 0, PortDirection::Input, height, config, true);
    let outputs = layout_ports(def, store, 0, PortDirection::Output, height, config, true);

    let caption_size = theme.font_size * config.caption_font_scale;
    let caption_room = config.caption_gap + 2.0 * caption_size * config.label_line_height;
    let mut bounds = node_bounds(0.0, 0.0, width, height, config).expand(0.0, caption_room);
    for port in inputs.iter().chain(outputs.iter()) {
        let half = caption_width(port, caption_size, config) / 2.0;
        bounds = bounds.union(&BoundingBox::new(
            port.x - half,
            bounds.ymin,
            port.x + half,
            bounds.ymax,
        ));
    }

    NodeLayout {
        id: node_element_id(0),
        index: 0,
        x: 0.0,
        y: 0.0,
        width,
        height,
        label,
        resolved: true,
        url: def.url.clone(),
        inputs,
        outputs,
        bounds,
    }
}

fn caption_width(port: &PortLayout, font_size: f64, config: &LayoutConfig) -> f64 {
    match &port.caption {
        Some(caption) => text_width(&caption.name, font_size, config)
            .max(text_width(&caption.interface, font_size, config)),
        None => 0.0,
    }
}
