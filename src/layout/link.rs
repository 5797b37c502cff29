use crate::model::{DefinitionStore, PortDirection, WorkflowDef, WorkflowLink, WorkflowNode};

use super::LinkLayout;
use super::port::{link_element_id, port_edge, port_offset};

/// World position a link attaches to on `node`, placed at `(x, y)`.
///
/// Starts at the node's position and moves onto the named port when both
/// the definition and the port can be found.
pub fn resolve_anchor(
    node: &WorkflowNode,
    (x, y): (f64, f64),
    store: &DefinitionStore,
    direction: PortDirection,
    port_name: &str,
    port_spacing: f64,
    node_height: f64,
) -> (f64, f64) {
    let Some(def) = store.node(&node.id) else {
        tracing::debug!(element = %node.id, "link anchored on unresolved node");
        return (x, y);
    };
    let Some(index) = def.port_index(direction, port_name) else {
        tracing::debug!(
            element = %node.id,
            port = port_name,
            direction = direction.as_str(),
            "port not declared by node definition, anchoring link on node"
        );
        return (x, y);
    };
    let total = def.ports(direction).len();
    (
        x + port_offset(index, total, port_spacing),
        y + port_edge(direction, node_height),
    )
}

/// Straight polyline for `link`.
///
/// `positions` are the checked node positions from
/// [`check_preconditions`](super::check_preconditions), which also guarantees
/// both link endpoints index existing nodes.
pub(super) fn layout_link(
    workflow: &WorkflowDef,
    store: &DefinitionStore,
    positions: &[(f64, f64)],
    link: &WorkflowLink,
    index: usize,
    port_spacing: f64,
    node_height: f64,
) -> LinkLayout {
    let source = resolve_anchor(
        &workflow.nodes[link.source],
        positions[link.source],
        store,
        PortDirection::Output,
        &link.source_port,
        port_spacing,
        node_height,
    );
    let target = resolve_anchor(
        &workflow.nodes[link.target],
        positions[link.target],
        store,
        PortDirection::Input,
        &link.target_port,
        port_spacing,
        node_height,
    );
    LinkLayout {
        id: link_element_id(index),
        source: link.source,
        target: link.target,
        points: vec![source, target],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::check_preconditions;
    use crate::model::{ElementDefinition, NodeDef, PortDef};

    fn port(name: &str) -> PortDef {
        PortDef {
            name: name.to_string(),
            interface: "any".to_string(),
            default: String::new(),
            description: String::new(),
        }
    }

    fn fixture() -> (WorkflowDef, Vec<(f64, f64)>, DefinitionStore) {
        let def = NodeDef {
            id: "add".to_string(),
            name: "add".to_string(),
            description: String::new(),
            owner: "unknown".to_string(),
            version: 0,
            function: "py:op#add".to_string(),
            url: None,
            inputs: vec![port("a"), port("b")],
            outputs: vec![port("out")],
        };
        let workflow = WorkflowDef {
            nodes: vec![
                WorkflowNode::at("add", 0.0, 0.0),
                WorkflowNode::at("add", 100.0, 50.0),
                WorkflowNode::at("unknown", 200.0, 100.0),
            ],
            ..Default::default()
        };
        let positions = check_preconditions(&workflow).unwrap();
        let store = vec![ElementDefinition::Node(def)].into();
        (workflow, positions, store)
    }

    #[test]
    fn endpoints_follow_port_offsets() {
        let (workflow, positions, store) = fixture();
        let link = WorkflowLink::new(0, "out", 1, "b");
        let layout = layout_link(&workflow, &store, &positions, &link, 7, 20.0, 40.0);
        assert_eq!(layout.id, "wkf_link_7");
        assert_eq!(layout.points, vec![(0.0, 20.0), (110.0, 30.0)]);
    }

    #[test]
    fn unknown_port_falls_back_to_node_position() {
        let (workflow, positions, store) = fixture();
        let link = WorkflowLink::new(0, "nope", 1, "dummy");
        let layout = layout_link(&workflow, &store, &positions, &link, 0, 20.0, 40.0);
        assert_eq!(layout.points, vec![(0.0, 0.0), (100.0, 50.0)]);
    }

    #[test]
    fn port_lookup_is_direction_specific() {
        let (workflow, positions, store) = fixture();
        // "a" is an input, so it cannot serve as a source.
        let link = WorkflowLink::new(0, "a", 1, "a");
        let layout = layout_link(&workflow, &store, &positions, &link, 0, 20.0, 40.0);
        assert_eq!(layout.points, vec![(0.0, 0.0), (90.0, 30.0)]);
    }

    #[test]
    fn unresolved_node_anchors_on_position() {
        let (workflow, positions, store) = fixture();
        let link = WorkflowLink::new(1, "out", 2, "in");
        let layout = layout_link(&workflow, &store, &positions, &link, 0, 20.0, 40.0);
        assert_eq!(layout.points, vec![(100.0, 70.0), (200.0, 100.0)]);
    }
}
