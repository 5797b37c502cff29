#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod graphviz;
pub mod layout;
pub mod layout_dump;
pub mod model;
pub mod provenance;
pub mod render;
pub mod theme;
pub mod validate;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig};
pub use error::RenderError;
pub use geometry::{BoundingBox, Viewport, fit_viewport};
pub use graphviz::export_workflow_dot;
pub use layout::{compute_node_layout, compute_workflow_layout};
pub use model::{
    DefinitionStore, ElementDefinition, InterfaceDef, NodeDef, PortDef, PortDirection,
    WorkflowDef, WorkflowLink, WorkflowNode,
};
pub use render::{
    export_node, export_node_with_config, export_workflow, export_workflow_with_config, render_svg,
};
pub use theme::Theme;
pub use validate::{SchemaKind, validate};
