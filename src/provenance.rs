//! Execution provenance: which data values flowed through which node
//! executions of a workflow run.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: serde_json::Value,
}

/// Value bound to a node port for the whole run, outside any execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Parameter {
    pub node: usize,
    pub port: String,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortBinding {
    pub port: String,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Execution {
    pub node: usize,
    pub time_init: f64,
    pub time_end: f64,
    #[serde(default)]
    pub inputs: Vec<PortBinding>,
    #[serde(default)]
    pub outputs: Vec<PortBinding>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProvExe {
    pub id: String,
    pub name: String,
    #[serde(alias = "author")]
    pub owner: String,
    pub version: u64,
    pub description: String,
    /// Id of the workflow that was run.
    pub workflow: String,
    pub time_init: f64,
    pub time_end: f64,
    #[serde(default)]
    pub data: Vec<DataRecord>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub executions: Vec<Execution>,
}

#[derive(Debug, thiserror::Error)]
pub enum ProvenanceError {
    #[error("node {0} was never executed")]
    NodeNotExecuted(usize),

    #[error("node {node} was executed {count} times")]
    MultipleExecutions { node: usize, count: usize },

    #[error("no data bound to port `{port}` of node {node}")]
    PortNotFound { node: usize, port: String },

    #[error("data `{0}` is not recorded")]
    DataNotFound(String),
}

pub type Result<T> = std::result::Result<T, ProvenanceError>;

impl ProvExe {
    pub fn data_value(&self, id: &str) -> Option<&serde_json::Value> {
        self.data.iter().find(|record| record.id == id).map(|record| &record.value)
    }

    /// The single execution of `node`.
    pub fn execution_of(&self, node: usize) -> Result<&Execution> {
        let mut runs = self.executions.iter().filter(|exe| exe.node == node);
        let Some(first) = runs.next() else {
            return Err(ProvenanceError::NodeNotExecuted(node));
        };
        let extra = runs.count();
        if extra > 0 {
            return Err(ProvenanceError::MultipleExecutions {
                node,
                count: extra + 1,
            });
        }
        Ok(first)
    }

    fn resolve<'a>(&'a self, data: &'a str) -> Result<(&'a str, &'a serde_json::Value)> {
        self.data_value(data)
            .map(|value| (data, value))
            .ok_or_else(|| ProvenanceError::DataNotFound(data.to_string()))
    }
}

/// Data id and value produced on output `port` of `node`.
pub fn data_produced_by<'a>(
    prov: &'a ProvExe,
    node: usize,
    port: &str,
) -> Result<(&'a str, &'a serde_json::Value)> {
    let execution = prov.execution_of(node)?;
    let binding = execution
        .outputs
        .iter()
        .find(|binding| binding.port == port)
        .ok_or_else(|| ProvenanceError::PortNotFound {
            node,
            port: port.to_string(),
        })?;
    prov.resolve(&binding.data)
}

/// Data id and value consumed on input `port` of `node`.
///
/// Falls back to the run's parameters when the execution does not bind the
/// port itself.
pub fn data_used_by<'a>(
    prov: &'a ProvExe,
    node: usize,
    port: &str,
) -> Result<(&'a str, &'a serde_json::Value)> {
    let execution = prov.execution_of(node)?;
    let data = execution
        .inputs
        .iter()
        .find(|binding| binding.port == port)
        .map(|binding| binding.data.as_str())
        .or_else(|| {
            prov.parameters
                .iter()
                .find(|param| param.node == node && param.port == port)
                .map(|param| param.data.as_str())
        })
        .ok_or_else(|| ProvenanceError::PortNotFound {
            node,
            port: port.to_string(),
        })?;
    prov.resolve(data)
}
