use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Data type descriptor referenced by ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterfaceDef {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(alias = "author")]
    pub owner: String,
    pub version: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub schema: serde_json::Value,
    #[serde(default)]
    pub ancestors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortDef {
    pub name: String,
    /// Id of the [`InterfaceDef`] describing the data carried by this port.
    pub interface: String,
    #[serde(default)]
    pub default: String,
    #[serde(default)]
    pub description: String,
}

/// Reusable workflow step with ordered, typed input and output ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeDef {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(alias = "author")]
    pub owner: String,
    pub version: u64,
    pub function: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub inputs: Vec<PortDef>,
    #[serde(default)]
    pub outputs: Vec<PortDef>,
}

impl NodeDef {
    pub fn ports(&self, direction: PortDirection) -> &[PortDef] {
        match direction {
            PortDirection::Input => &self.inputs,
            PortDirection::Output => &self.outputs,
        }
    }

    /// Index of the named port in the given direction's list.
    pub fn port_index(&self, direction: PortDirection, name: &str) -> Option<usize> {
        self.ports(direction).iter().position(|port| port.name == name)
    }

    pub fn max_port_count(&self) -> usize {
        self.inputs.len().max(self.outputs.len())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortDirection {
    Input,
    Output,
}

impl PortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            PortDirection::Input => "input",
            PortDirection::Output => "output",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementDefinition {
    Data(InterfaceDef),
    Node(NodeDef),
}

impl ElementDefinition {
    pub fn id(&self) -> &str {
        match self {
            ElementDefinition::Data(def) => &def.id,
            ElementDefinition::Node(def) => &def.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ElementDefinition::Data(def) => &def.name,
            ElementDefinition::Node(def) => &def.name,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            ElementDefinition::Data(def) => def.url.as_deref(),
            ElementDefinition::Node(def) => def.url.as_deref(),
        }
    }
}

/// Lookup table from element id to definition.
///
/// A miss is an expected outcome: workflows may reference elements that are
/// not loaded, and renderers fall back to placeholder geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<ElementDefinition>", into = "Vec<ElementDefinition>")]
pub struct DefinitionStore {
    elements: HashMap<String, ElementDefinition>,
}

impl DefinitionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a definition, replacing any previous entry with the same id.
    pub fn insert(&mut self, element: ElementDefinition) -> Option<ElementDefinition> {
        self.elements.insert(element.id().to_string(), element)
    }

    pub fn extend_from(&mut self, other: DefinitionStore) {
        self.elements.extend(other.elements);
    }

    pub fn get(&self, id: &str) -> Option<&ElementDefinition> {
        self.elements.get(id)
    }

    pub fn node(&self, id: &str) -> Option<&NodeDef> {
        match self.elements.get(id) {
            Some(ElementDefinition::Node(def)) => Some(def),
            _ => None,
        }
    }

    pub fn interface(&self, id: &str) -> Option<&InterfaceDef> {
        match self.elements.get(id) {
            Some(ElementDefinition::Data(def)) => Some(def),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl From<Vec<ElementDefinition>> for DefinitionStore {
    fn from(elements: Vec<ElementDefinition>) -> Self {
        elements.into_iter().collect()
    }
}

impl From<DefinitionStore> for Vec<ElementDefinition> {
    fn from(store: DefinitionStore) -> Self {
        let mut elements: Vec<ElementDefinition> = store.elements.into_values().collect();
        elements.sort_by(|a, b| a.id().cmp(b.id()));
        elements
    }
}

impl FromIterator<ElementDefinition> for DefinitionStore {
    fn from_iter<T: IntoIterator<Item = ElementDefinition>>(iter: T) -> Self {
        let mut store = DefinitionStore::new();
        for element in iter {
            store.insert(element);
        }
        store
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkflowNode {
    /// Id of the element definition this node instantiates.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lazy: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_color: Option<serde_json::Value>,
}

impl WorkflowNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn at(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn position(&self) -> Option<(f64, f64)> {
        Some((self.x?, self.y?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkflowLink {
    /// Index into the workflow's node sequence.
    pub source: usize,
    pub source_port: String,
    pub target: usize,
    pub target_port: String,
}

impl WorkflowLink {
    pub fn new(
        source: usize,
        source_port: impl Into<String>,
        target: usize,
        target_port: impl Into<String>,
    ) -> Self {
        Self {
            source,
            source_port: source_port.into(),
            target,
            target_port: target_port.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkflowDef {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(alias = "author")]
    pub owner: String,
    pub version: u64,
    #[serde(default)]
    pub nodes: Vec<WorkflowNode>,
    #[serde(default)]
    pub links: Vec<WorkflowLink>,
}
