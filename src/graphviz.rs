use crate::layout::resolve_label;
use crate::model::{DefinitionStore, WorkflowDef};

/// Graphviz `digraph` of a workflow. Positions are optional here: nodes
/// carrying both coordinates are pinned with `pos="x,y!"`.
pub fn export_workflow_dot(workflow: &WorkflowDef, store: &DefinitionStore) -> String {
    let mut dot = String::from("digraph {\n");

    for (idx, node) in workflow.nodes.iter().enumerate() {
        let def = store.node(&node.id);
        let label = resolve_label(node, def, idx);
        dot.push_str(&format!("    node{idx} [label=\"{}\"", escape_dot(&label)));
        if let Some((x, y)) = node.position() {
            dot.push_str(&format!(", pos=\"{x:.6},{y:.6}!\""));
        }
        if let Some(url) = def.and_then(|def| def.url.as_deref()) {
            dot.push_str(&format!(", URL=\"{}\"", escape_dot(url)));
        }
        dot.push_str("]\n");
    }

    for link in &workflow.links {
        dot.push_str(&format!(
            "    node{} -> node{} [taillabel=\"{}\", headlabel=\"{}\"]\n",
            link.source,
            link.target,
            escape_dot(&link.source_port),
            escape_dot(&link.target_port)
        ));
    }

    dot.push_str("}\n");
    dot
}

fn escape_dot(input: &str) -> String {
    input.replace('\\', "\\\\").replace('"', "\\\"")
}
