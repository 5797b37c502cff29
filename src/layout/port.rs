use crate::config::LayoutConfig;
use crate::model::{DefinitionStore, NodeDef, PortDirection};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use super::{PortCaption, PortLayout};

static PORT_ID_STRIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s()]").unwrap());

/// Local x offset of port `index` among `total` ports of one direction.
///
/// Offsets are evenly spaced by `spacing` and symmetric around the node's
/// vertical centreline, so a lone port sits at 0.
pub fn port_offset(index: usize, total: usize, spacing: f64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    index as f64 * spacing - spacing * (total - 1) as f64 / 2.0
}

/// Local y of the edge ports of `direction` attach to.
pub fn port_edge(direction: PortDirection, node_height: f64) -> f64 {
    match direction {
        PortDirection::Input => -node_height / 2.0,
        PortDirection::Output => node_height / 2.0,
    }
}

/// Removes whitespace and parentheses so a port name can be part of an id.
pub fn sanitize_port_name(name: &str) -> String {
    PORT_ID_STRIP_RE.replace_all(name, "").into_owned()
}

pub fn node_element_id(index: usize) -> String {
    format!("wkf_node_{index}")
}

pub fn port_element_id(node_index: usize, direction: PortDirection, name: &str) -> String {
    format!(
        "wkf_node_{node_index}_{}_{}",
        direction.as_str(),
        sanitize_port_name(name)
    )
}

pub fn link_element_id(index: usize) -> String {
    format!("wkf_link_{index}")
}

pub(super) fn layout_ports(
    def: &NodeDef,
    store: &DefinitionStore,
    node_index: usize,
    direction: PortDirection,
    node_height: f64,
    config: &LayoutConfig,
    with_captions: bool,
) -> Vec<PortLayout> {
    let ports = def.ports(direction);
    let y = port_edge(direction, node_height);
    let mut seen = HashSet::new();

    ports
        .iter()
        .enumerate()
        .map(|(idx, port)| {
            let id = port_element_id(node_index, direction, &port.name);
            if !seen.insert(id.clone()) {
                tracing::warn!(
                    node = node_index,
                    port = %port.name,
                    element_id = %id,
                    "port names collide after sanitizing; element id is not unique"
                );
            }
            let interface = store.interface(&port.interface);
            let caption = with_captions.then(|| PortCaption {
                name: port.name.clone(),
                interface: interface
                    .map(|idef| idef.name.clone())
                    .unwrap_or_else(|| port.interface.clone()),
            });
            PortLayout {
                id,
                name: port.name.clone(),
                direction,
                x: port_offset(idx, ports.len(), config.port_spacing),
                y,
                url: interface.and_then(|idef| idef.url.clone()),
                caption,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_port_is_centred() {
        assert_eq!(port_offset(0, 1, 20.0), 0.0);
    }

    #[test]
    fn two_ports_straddle_centre() {
        let offsets: Vec<f64> = (0..2).map(|i| port_offset(i, 2, 20.0)).collect();
        assert_eq!(offsets, vec![-10.0, 10.0]);
    }

    #[test]
    fn offsets_are_symmetric_and_evenly_spaced() {
        for total in 1..8 {
            let offsets: Vec<f64> = (0..total).map(|i| port_offset(i, total, 15.0)).collect();
            for i in 0..total {
                assert!((offsets[i] + offsets[total - 1 - i]).abs() < 1e-9);
            }
            for pair in offsets.windows(2) {
                assert!((pair[1] - pair[0] - 15.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn inputs_attach_on_top_outputs_on_bottom() {
        assert_eq!(port_edge(PortDirection::Input, 40.0), -20.0);
        assert_eq!(port_edge(PortDirection::Output, 40.0), 20.0);
    }

    #[test]
    fn port_ids_strip_spaces_and_parentheses() {
        assert_eq!(
            port_element_id(3, PortDirection::Output, "value (x y)"),
            "wkf_node_3_output_valuexy"
        );
        assert_eq!(port_element_id(0, PortDirection::Input, "in1"), "wkf_node_0_input_in1");
    }
}
