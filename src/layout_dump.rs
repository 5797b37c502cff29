use crate::geometry::{BoundingBox, Viewport};
use crate::layout::WorkflowLayout;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: u32,
    pub height: u32,
    pub bounds: BoundingBox,
    pub viewport: Viewport,
    pub nodes: Vec<NodeDump>,
    pub links: Vec<LinkDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub label: String,
    pub resolved: bool,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub bounds: BoundingBox,
    pub ports: Vec<PortDump>,
}

#[derive(Debug, Serialize)]
pub struct PortDump {
    pub id: String,
    pub direction: String,
    /// World-space position of the port centre.
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Serialize)]
pub struct LinkDump {
    pub id: String,
    pub source: usize,
    pub target: usize,
    pub points: Vec<[f64; 2]>,
}

impl LayoutDump {
    pub fn from_layout(layout: &WorkflowLayout) -> Self {
        let nodes = layout
            .nodes
            .iter()
            .map(|node| NodeDump {
                id: node.id.clone(),
                label: node.label.text.clone(),
                resolved: node.resolved,
                x: node.x,
                y: node.y,
                width: node.width,
                height: node.height,
                bounds: node.bounds,
                ports: node
                    .ports()
                    .map(|port| PortDump {
                        id: port.id.clone(),
                        direction: port.direction.as_str().to_string(),
                        x: node.x + port.x,
                        y: node.y + port.y,
                    })
                    .collect(),
            })
            .collect();

        let links = layout
            .links
            .iter()
            .map(|link| LinkDump {
                id: link.id.clone(),
                source: link.source,
                target: link.target,
                points: link.points.iter().map(|(x, y)| [*x, *y]).collect(),
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            bounds: layout.bounds,
            viewport: layout.viewport,
            nodes,
            links,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &WorkflowLayout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
