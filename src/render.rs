use crate::config::{Config, LayoutConfig, RenderConfig};
use crate::error::Result;
use crate::geometry::Viewport;
use crate::layout::{
    LinkLayout, NodeLayout, PortLayout, WorkflowLayout, baseline_shift, compute_node_layout,
    compute_workflow_layout,
};
use crate::model::{DefinitionStore, NodeDef, PortDirection, WorkflowDef};
use crate::theme::{GradientStops, Theme};
use std::path::Path;

/// Gradient fill registered once in a document's `<defs>`.
#[derive(Debug, Clone)]
pub struct Gradient {
    pub id: &'static str,
    pub stops: GradientStops,
}

impl Gradient {
    fn fill(&self) -> String {
        format!("url(#{})", self.id)
    }

    fn svg(&self) -> String {
        format!(
            "<linearGradient id=\"{}\" x1=\"0.5\" y1=\"0\" x2=\"0.5\" y2=\"1\"><stop offset=\"0\" stop-color=\"{}\"/><stop offset=\"1\" stop-color=\"{}\"/></linearGradient>",
            self.id,
            escape_xml(&self.stops.top),
            escape_xml(&self.stops.bottom)
        )
    }
}

/// Shared fills of one document, handed explicitly to node and port drawing.
#[derive(Debug, Clone)]
pub struct DocumentResources {
    pub node_loaded: Gradient,
    pub node_unresolved: Gradient,
    pub input_port: Gradient,
    pub output_port: Gradient,
}

impl DocumentResources {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            node_loaded: Gradient {
                id: "bg_loaded",
                stops: theme.node_background.clone(),
            },
            node_unresolved: Gradient {
                id: "bg_failed",
                stops: theme.unresolved_background.clone(),
            },
            input_port: Gradient {
                id: "in_port",
                stops: theme.input_port.clone(),
            },
            output_port: Gradient {
                id: "out_port",
                stops: theme.output_port.clone(),
            },
        }
    }

    fn defs(&self) -> String {
        let mut defs = String::from("<defs>");
        for gradient in [
            &self.node_loaded,
            &self.node_unresolved,
            &self.input_port,
            &self.output_port,
        ] {
            defs.push_str(&gradient.svg());
        }
        defs.push_str("</defs>");
        defs
    }

    fn port_fill(&self, direction: PortDirection) -> String {
        match direction {
            PortDirection::Input => self.input_port.fill(),
            PortDirection::Output => self.output_port.fill(),
        }
    }
}

/// Renders a workflow to SVG, returning the document and its viewport.
pub fn export_workflow(
    workflow: &WorkflowDef,
    store: &DefinitionStore,
    size: Option<(u32, u32)>,
) -> Result<(String, Viewport)> {
    let mut config = Config::default();
    if let Some((width, height)) = size {
        config = config.with_size(width, height);
    }
    export_workflow_with_config(workflow, store, &config)
}

pub fn export_workflow_with_config(
    workflow: &WorkflowDef,
    store: &DefinitionStore,
    config: &Config,
) -> Result<(String, Viewport)> {
    let layout = compute_workflow_layout(workflow, store, config)?;
    let svg = render_svg(&layout, &config.theme, &config.layout);
    Ok((svg, layout.viewport))
}

/// Renders a single node definition with captioned ports, no links.
pub fn export_node(
    def: &NodeDef,
    store: &DefinitionStore,
    size: Option<(u32, u32)>,
) -> (String, Viewport) {
    let mut config = Config::default();
    if let Some((width, height)) = size {
        config = config.with_size(width, height);
    }
    export_node_with_config(def, store, &config)
}

pub fn export_node_with_config(
    def: &NodeDef,
    store: &DefinitionStore,
    config: &Config,
) -> (String, Viewport) {
    let layout = compute_node_layout(def, store, config);
    let svg = render_svg(&layout, &config.theme, &config.layout);
    (svg, layout.viewport)
}

pub fn render_svg(layout: &WorkflowLayout, theme: &Theme, config: &LayoutConfig) -> String {
    let resources = DocumentResources::from_theme(theme);
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" id=\"repr\" width=\"{}\" height=\"{}\" viewBox=\"{}\">",
        layout.width,
        layout.height,
        layout.viewport.view_box()
    ));
    svg.push_str(&resources.defs());

    // Links first so node bodies cover their endpoints.
    for link in &layout.links {
        svg.push_str(&link_svg(link, theme));
    }
    for node in &layout.nodes {
        svg.push_str(&node_svg(node, &resources, theme, config));
    }

    svg.push_str("</svg>");
    svg
}

fn link_svg(link: &LinkLayout, theme: &Theme) -> String {
    format!(
        "<polyline id=\"{}\" points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1\"/>",
        escape_xml(&link.id),
        points_attr(&link.points),
        escape_xml(&theme.link_color)
    )
}

fn node_svg(
    node: &NodeLayout,
    resources: &DocumentResources,
    theme: &Theme,
    config: &LayoutConfig,
) -> String {
    let mut body = String::new();
    let (fill, stroke) = if node.resolved {
        (resources.node_loaded.fill(), theme.node_stroke.as_str())
    } else {
        (resources.node_unresolved.fill(), theme.unresolved_stroke.as_str())
    };
    body.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"5\" ry=\"5\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1\"/>",
        -node.width / 2.0,
        -node.height / 2.0,
        node.width,
        node.height,
        fill,
        escape_xml(stroke)
    ));
    body.push_str(&text_svg(
        0.0,
        baseline_shift(node.label.font_size),
        &node.label.text,
        node.label.font_size,
        &theme.label_color,
        theme,
    ));

    let mut svg = String::new();
    let transform = format!("translate({:.2},{:.2})", node.x, node.y);
    match &node.url {
        Some(url) => {
            svg.push_str(&format!("<g transform=\"{transform}\">"));
            svg.push_str(&format!(
                "<a id=\"{}\" href=\"{}\" xlink:href=\"{}\" target=\"_top\">{}</a>",
                escape_xml(&node.id),
                escape_xml(url),
                escape_xml(url),
                body
            ));
        }
        None => {
            let class = if node.resolved { "node" } else { "node unresolved" };
            svg.push_str(&format!(
                "<g id=\"{}\" class=\"{class}\" transform=\"{transform}\">",
                escape_xml(&node.id)
            ));
            svg.push_str(&body);
        }
    }

    for port in node.ports() {
        svg.push_str(&port_svg(port, resources, theme, config));
    }
    svg.push_str("</g>");
    svg
}

fn port_svg(
    port: &PortLayout,
    resources: &DocumentResources,
    theme: &Theme,
    config: &LayoutConfig,
) -> String {
    let circle = |id: Option<&str>| {
        let id_attr = id
            .map(|id| format!(" id=\"{}\"", escape_xml(id)))
            .unwrap_or_default();
        format!(
            "<circle{id_attr} cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1\"><title>{}</title></circle>",
            port.x,
            port.y,
            config.port_radius,
            resources.port_fill(port.direction),
            escape_xml(&theme.port_stroke),
            escape_xml(&port.name)
        )
    };
    let mut svg = match &port.url {
        Some(url) => format!(
            "<a id=\"{}\" href=\"{}\" xlink:href=\"{}\" target=\"_top\">{}</a>",
            escape_xml(&port.id),
            escape_xml(url),
            escape_xml(url),
            circle(None)
        ),
        None => circle(Some(&port.id)),
    };

    if let Some(caption) = &port.caption {
        let size = theme.font_size * config.caption_font_scale;
        let line = size * config.label_line_height;
        let clear = config.port_radius + config.caption_gap;
        // Port name sits next to the port, interface name further out.
        let (name_y, interface_y) = match port.direction {
            PortDirection::Input => (port.y - clear, port.y - clear - line),
            PortDirection::Output => (port.y + clear + size, port.y + clear + size + line),
        };
        svg.push_str(&text_svg(port.x, name_y, &caption.name, size, &theme.caption_color, theme));
        svg.push_str(&text_svg(
            port.x,
            interface_y,
            &caption.interface,
            size,
            &theme.caption_color,
            theme,
        ));
    }
    svg
}

fn text_svg(x: f64, y: f64, text: &str, font_size: f64, fill: &str, theme: &Theme) -> String {
    format!(
        "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{:.2}\" fill=\"{}\">{}</text>",
        escape_xml(&theme.font_family),
        font_size,
        escape_xml(fill),
        escape_xml(text)
    )
}

fn points_attr(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{x:.2},{y:.2}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> anyhow::Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Verdana".to_string();
    opt.default_size = usvg::Size::from_wh(render_cfg.width as f32, render_cfg.height as f32)
        .unwrap_or(opt.default_size);

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig) -> anyhow::Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
