use crate::theme::{GradientStops, Theme};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub port_radius: f64,
    /// Distance between the centres of two neighbouring ports.
    pub port_spacing: f64,
    pub node_padding: f64,
    /// Width of nodes whose definition could not be resolved.
    pub default_node_width: f64,
    pub label_line_height: f64,
    /// Approximate glyph advance as a fraction of the font size.
    pub char_width_ratio: f64,
    pub outer_padding: f64,
    pub caption_font_scale: f64,
    pub caption_gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            port_radius: 5.0,
            port_spacing: 20.0,
            node_padding: 10.0,
            default_node_width: 80.0,
            label_line_height: 1.5,
            char_width_ratio: 0.6,
            outer_padding: 20.0,
            caption_font_scale: 0.6,
            caption_gap: 4.0,
        }
    }
}

impl LayoutConfig {
    pub fn node_height(&self, font_size: f64) -> f64 {
        font_size * self.label_line_height + 2.0 * self.port_radius
    }

    fn sanitize(&mut self) {
        self.port_radius = self.port_radius.max(0.5);
        self.port_spacing = self.port_spacing.max(1.0);
        self.node_padding = self.node_padding.max(0.0);
        self.default_node_width = self.default_node_width.max(1.0);
        self.label_line_height = self.label_line_height.max(0.5);
        self.char_width_ratio = self.char_width_ratio.max(0.1);
        self.outer_padding = self.outer_padding.max(1.0);
        self.caption_font_scale = self.caption_font_scale.max(0.1);
        self.caption_gap = self.caption_gap.max(0.0);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Config {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.render.width = width.max(1);
        self.render.height = height.max(1);
        self
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeFile {
    font_family: Option<String>,
    font_size: Option<f64>,
    label_color: Option<String>,
    caption_color: Option<String>,
    node_stroke: Option<String>,
    unresolved_stroke: Option<String>,
    port_stroke: Option<String>,
    link_color: Option<String>,
    node_background: Option<GradientStops>,
    unresolved_background: Option<GradientStops>,
    input_port: Option<GradientStops>,
    output_port: Option<GradientStops>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutFile {
    port_radius: Option<f64>,
    port_spacing: Option<f64>,
    node_padding: Option<f64>,
    default_node_width: Option<f64>,
    label_line_height: Option<f64>,
    char_width_ratio: Option<f64>,
    outer_padding: Option<f64>,
    caption_font_scale: Option<f64>,
    caption_gap: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RenderFile {
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeFile>,
    layout: Option<LayoutFile>,
    render: Option<RenderFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;
    apply_config_file(&mut config, parsed);
    Ok(config)
}

fn apply_config_file(config: &mut Config, parsed: ConfigFile) {
    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "modern" {
            config.theme = Theme::modern();
        } else if theme_name == "classic" || theme_name == "default" {
            config.theme = Theme::classic();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v.max(1.0);
        }
        if let Some(v) = vars.label_color {
            config.theme.label_color = v;
        }
        if let Some(v) = vars.caption_color {
            config.theme.caption_color = v;
        }
        if let Some(v) = vars.node_stroke {
            config.theme.node_stroke = v;
        }
        if let Some(v) = vars.unresolved_stroke {
            config.theme.unresolved_stroke = v;
        }
        if let Some(v) = vars.port_stroke {
            config.theme.port_stroke = v;
        }
        if let Some(v) = vars.link_color {
            config.theme.link_color = v;
        }
        if let Some(v) = vars.node_background {
            config.theme.node_background = v;
        }
        if let Some(v) = vars.unresolved_background {
            config.theme.unresolved_background = v;
        }
        if let Some(v) = vars.input_port {
            config.theme.input_port = v;
        }
        if let Some(v) = vars.output_port {
            config.theme.output_port = v;
        }
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.port_radius {
            config.layout.port_radius = v;
        }
        if let Some(v) = layout.port_spacing {
            config.layout.port_spacing = v;
        }
        if let Some(v) = layout.node_padding {
            config.layout.node_padding = v;
        }
        if let Some(v) = layout.default_node_width {
            config.layout.default_node_width = v;
        }
        if let Some(v) = layout.label_line_height {
            config.layout.label_line_height = v;
        }
        if let Some(v) = layout.char_width_ratio {
            config.layout.char_width_ratio = v;
        }
        if let Some(v) = layout.outer_padding {
            config.layout.outer_padding = v;
        }
        if let Some(v) = layout.caption_font_scale {
            config.layout.caption_font_scale = v;
        }
        if let Some(v) = layout.caption_gap {
            config.layout.caption_gap = v;
        }
    }
    config.layout.sanitize();

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v.max(1);
        }
        if let Some(v) = render.height {
            config.render.height = v.max(1);
        }
    }
}
