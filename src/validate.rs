use crate::model::{InterfaceDef, NodeDef, PortDef, WorkflowDef};
use crate::provenance::ProvExe;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Document families with a schema of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Workflow,
    Node,
    Data,
    ProvExe,
}

impl SchemaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaKind::Workflow => "workflow",
            SchemaKind::Node => "node",
            SchemaKind::Data => "data",
            SchemaKind::ProvExe => "prov_exe",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaKind {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "workflow" => Ok(SchemaKind::Workflow),
            "node" => Ok(SchemaKind::Node),
            "data" => Ok(SchemaKind::Data),
            "prov_exe" => Ok(SchemaKind::ProvExe),
            other => Err(ValidationError::UnknownSchema(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("unknown schema `{0}`")]
    UnknownSchema(String),

    #[error("document does not match the {kind} schema: {source}")]
    Shape {
        kind: SchemaKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("{direction} port `{name}` is declared more than once")]
    DuplicatePort { direction: &'static str, name: String },

    #[error("link {link} references node {node} but the workflow has {count} nodes")]
    LinkOutOfRange {
        link: usize,
        node: usize,
        count: usize,
    },
}

pub type Result<T> = std::result::Result<T, ValidationError>;

/// True when `document` satisfies the schema of `kind`.
pub fn validate(document: &serde_json::Value, kind: SchemaKind) -> bool {
    check(document, kind).is_ok()
}

/// Like [`validate`], reporting the first violation found.
pub fn check(document: &serde_json::Value, kind: SchemaKind) -> Result<()> {
    match kind {
        SchemaKind::Workflow => check_workflow(&parse(document, kind)?),
        SchemaKind::Node => check_node(&parse(document, kind)?),
        SchemaKind::Data => parse::<InterfaceDef>(document, kind).map(|_| ()),
        SchemaKind::ProvExe => parse::<ProvExe>(document, kind).map(|_| ()),
    }
}

pub fn check_workflow(workflow: &WorkflowDef) -> Result<()> {
    let count = workflow.nodes.len();
    for (link_idx, link) in workflow.links.iter().enumerate() {
        for node in [link.source, link.target] {
            if node >= count {
                return Err(ValidationError::LinkOutOfRange {
                    link: link_idx,
                    node,
                    count,
                });
            }
        }
    }
    Ok(())
}

pub fn check_node(def: &NodeDef) -> Result<()> {
    unique_names(&def.inputs, "input")?;
    unique_names(&def.outputs, "output")
}

fn unique_names(ports: &[PortDef], direction: &'static str) -> Result<()> {
    let mut seen = HashSet::new();
    for port in ports {
        if !seen.insert(port.name.as_str()) {
            return Err(ValidationError::DuplicatePort {
                direction,
                name: port.name.clone(),
            });
        }
    }
    Ok(())
}

fn parse<T: DeserializeOwned>(document: &serde_json::Value, kind: SchemaKind) -> Result<T> {
    T::deserialize(document).map_err(|source| ValidationError::Shape { kind, source })
}
