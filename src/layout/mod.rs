mod link;
mod node;
mod port;
mod text;
mod types;

pub use link::resolve_anchor;
pub use node::{node_bounds, node_width, resolve_label};
pub use port::{
    link_element_id, node_element_id, port_edge, port_element_id, port_offset, sanitize_port_name,
};
pub use text::baseline_shift;
pub use types::*;

use crate::config::Config;
use crate::error::{RenderError, Result};
use crate::geometry::{BoundingBox, fit_viewport};
use crate::model::{DefinitionStore, NodeDef, WorkflowDef};

/// Every node must carry both coordinates and every link must reference
/// existing nodes before anything is laid out.
///
/// Returns the position of every node, in workflow order.
pub fn check_preconditions(workflow: &WorkflowDef) -> Result<Vec<(f64, f64)>> {
    let mut positions = Vec::with_capacity(workflow.nodes.len());
    for (index, node) in workflow.nodes.iter().enumerate() {
        let missing = match (node.x, node.y) {
            (Some(x), Some(y)) => {
                positions.push((x, y));
                continue;
            }
            (None, Some(_)) => "x",
            (Some(_), None) => "y",
            (None, None) => "x and y",
        };
        return Err(RenderError::PositionRequired { index, missing });
    }
    let count = workflow.nodes.len();
    for (link_idx, link) in workflow.links.iter().enumerate() {
        for node in [link.source, link.target] {
            if node >= count {
                return Err(RenderError::LinkOutOfRange {
                    link: link_idx,
                    node,
                    count,
                });
            }
        }
    }
    Ok(positions)
}

pub fn compute_workflow_layout(
    workflow: &WorkflowDef,
    store: &DefinitionStore,
    config: &Config,
) -> Result<WorkflowLayout> {
    let positions = check_preconditions(workflow)?;
    let theme = &config.theme;
    let layout_cfg = &config.layout;
    let node_height = layout_cfg.node_height(theme.font_size);

    let links: Vec<LinkLayout> = workflow
        .links
        .iter()
        .enumerate()
        .map(|(idx, link)| {
            link::layout_link(
                workflow,
                store,
                &positions,
                link,
                idx,
                layout_cfg.port_spacing,
                node_height,
            )
        })
        .collect();

    let nodes: Vec<NodeLayout> = workflow
        .nodes
        .iter()
        .zip(&positions)
        .enumerate()
        .map(|(idx, (wnode, &position))| {
            let def = store.node(&wnode.id);
            node::layout_node(wnode, position, def, idx, store, theme, layout_cfg)
        })
        .collect();

    let bounds = BoundingBox::enclose(nodes.iter().map(|node| &node.bounds))
        .unwrap_or_else(|| BoundingBox::point(0.0, 0.0))
        .pad(layout_cfg.outer_padding);
    let viewport = fit_viewport(&bounds, config.render.width, config.render.height);
    tracing::debug!(
        workflow = %workflow.id,
        nodes = nodes.len(),
        links = links.len(),
        viewport = ?viewport.as_tuple(),
        "workflow laid out"
    );

    Ok(WorkflowLayout {
        nodes,
        links,
        bounds,
        viewport,
        width: config.render.width,
        height: config.render.height,
    })
}

/// Layout of a single node definition, used for documentation previews.
pub fn compute_node_layout(def: &NodeDef, store: &DefinitionStore, config: &Config) -> WorkflowLayout {
    let node = node::layout_node_preview(def, store, &config.theme, &config.layout);
    let bounds = node.bounds.pad(config.layout.outer_padding);
    let viewport = fit_viewport(&bounds, config.render.width, config.render.height);
    WorkflowLayout {
        nodes: vec![node],
        links: Vec::new(),
        bounds,
        viewport,
        width: config.render.width,
        height: config.render.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WorkflowNode;

    fn workflow(nodes: Vec<WorkflowNode>) -> WorkflowDef {
        WorkflowDef {
            id: "wkf".to_string(),
            nodes,
            ..Default::default()
        }
    }

    #[test]
    fn missing_coordinate_is_reported() {
        let mut node = WorkflowNode::new("n1");
        node.x = Some(0.0);
        let wkf = workflow(vec![WorkflowNode::at("n0", 0.0, 0.0), node]);
        match check_preconditions(&wkf) {
            Err(RenderError::PositionRequired { index, missing }) => {
                assert_eq!(index, 1);
                assert_eq!(missing, "y");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn checked_positions_cover_every_node() {
        let wkf = workflow(vec![
            WorkflowNode::at("n0", 1.0, 2.0),
            WorkflowNode::at("n1", -3.0, 4.5),
        ]);
        assert_eq!(check_preconditions(&wkf).unwrap(), vec![(1.0, 2.0), (-3.0, 4.5)]);
    }

    #[test]
    fn every_node_and_link_is_laid_out() {
        let mut wkf = workflow(vec![
            WorkflowNode::at("a", 0.0, 0.0),
            WorkflowNode::at("b", 0.0, 50.0),
            WorkflowNode::at("c", 80.0, 50.0),
        ]);
        wkf.links.push(crate::model::WorkflowLink::new(0, "out", 1, "in"));
        wkf.links.push(crate::model::WorkflowLink::new(0, "out", 2, "in"));
        let layout =
            compute_workflow_layout(&wkf, &DefinitionStore::new(), &Config::default()).unwrap();
        let ids: Vec<&str> = layout.nodes.iter().map(|node| node.id.as_str()).collect();
        assert_eq!(ids, ["wkf_node_0", "wkf_node_1", "wkf_node_2"]);
        assert_eq!(layout.links.len(), 2);
        assert_eq!(layout.links[1].points, vec![(0.0, 0.0), (80.0, 50.0)]);
    }

    #[test]
    fn dangling_link_is_rejected() {
        let mut wkf = workflow(vec![WorkflowNode::at("n0", 0.0, 0.0)]);
        wkf.links.push(crate::model::WorkflowLink::new(0, "out", 3, "in"));
        assert!(matches!(
            check_preconditions(&wkf),
            Err(RenderError::LinkOutOfRange { link: 0, node: 3, count: 1 })
        ));
    }

    #[test]
    fn bounds_grow_with_farther_nodes() {
        let config = Config::default();
        let store = DefinitionStore::new();
        let mut wkf = workflow(vec![WorkflowNode::at("a", 0.0, 0.0)]);
        let mut previous = compute_workflow_layout(&wkf, &store, &config).unwrap().bounds;
        for (x, y) in [(100.0, 0.0), (-50.0, 300.0), (10.0, 10.0), (-400.0, -400.0)] {
            wkf.nodes.push(WorkflowNode::at("a", x, y));
            let bounds = compute_workflow_layout(&wkf, &store, &config).unwrap().bounds;
            assert!(bounds.xmin <= previous.xmin && bounds.ymin <= previous.ymin);
            assert!(bounds.xmax >= previous.xmax && bounds.ymax >= previous.ymax);
            previous = bounds;
        }
    }

    #[test]
    fn single_placeholder_bounds() {
        let config = Config::default();
        let wkf = workflow(vec![WorkflowNode::at("a", 0.0, 0.0)]);
        let layout = compute_workflow_layout(&wkf, &DefinitionStore::new(), &config).unwrap();
        // 80 x 37 node, 5 port overhang, 20 outer padding
        assert_eq!(layout.bounds, BoundingBox::new(-60.0, -43.5, 60.0, 43.5));
        let (x, y, width, height) = layout.viewport.as_tuple();
        for (actual, expected) in [(x, -60.0), (y, -60.0), (width, 120.0), (height, 120.0)] {
            assert!((actual - expected).abs() < 1e-9, "{:?}", layout.viewport);
        }
    }

    #[test]
    fn empty_workflow_has_padded_origin_viewport() {
        let config = Config::default();
        let layout = compute_workflow_layout(&workflow(Vec::new()), &DefinitionStore::new(), &config)
            .unwrap();
        assert_eq!(layout.bounds, BoundingBox::new(-20.0, -20.0, 20.0, 20.0));
        assert!((layout.viewport.width - 40.0).abs() < 1e-9);
        assert!((layout.viewport.x + 20.0).abs() < 1e-9);
    }
}
