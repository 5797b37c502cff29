use serde::Serialize;

use crate::geometry::{BoundingBox, Viewport};
use crate::model::PortDirection;

#[derive(Debug, Clone, Serialize)]
pub struct TextBlock {
    pub text: String,
    pub width: f64,
    pub height: f64,
    pub font_size: f64,
}

/// Port name and interface shown next to a port in node previews.
#[derive(Debug, Clone, Serialize)]
pub struct PortCaption {
    pub name: String,
    pub interface: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortLayout {
    pub id: String,
    pub name: String,
    pub direction: PortDirection,
    /// Position relative to the node centre.
    pub x: f64,
    pub y: f64,
    /// Documentation link of the port's interface, if it has one.
    pub url: Option<String>,
    pub caption: Option<PortCaption>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeLayout {
    pub id: String,
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: TextBlock,
    /// False when the node's definition is missing from the store.
    pub resolved: bool,
    pub url: Option<String>,
    pub inputs: Vec<PortLayout>,
    pub outputs: Vec<PortLayout>,
    pub bounds: BoundingBox,
}

impl NodeLayout {
    pub fn ports(&self) -> impl Iterator<Item = &PortLayout> {
        self.inputs.iter().chain(self.outputs.iter())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkLayout {
    pub id: String,
    pub source: usize,
    pub target: usize,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowLayout {
    pub nodes: Vec<NodeLayout>,
    pub links: Vec<LinkLayout>,
    /// Padded union of every node box.
    pub bounds: BoundingBox,
    pub viewport: Viewport,
    pub width: u32,
    pub height: u32,
}
