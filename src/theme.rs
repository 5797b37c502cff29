use serde::{Deserialize, Serialize};

/// Two-stop vertical gradient used for node backgrounds and port fills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradientStops {
    pub top: String,
    pub bottom: String,
}

impl GradientStops {
    fn new(top: &str, bottom: &str) -> Self {
        Self {
            top: top.to_string(),
            bottom: bottom.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f64,
    pub label_color: String,
    pub caption_color: String,
    pub node_stroke: String,
    pub unresolved_stroke: String,
    pub port_stroke: String,
    pub link_color: String,
    pub node_background: GradientStops,
    pub unresolved_background: GradientStops,
    pub input_port: GradientStops,
    pub output_port: GradientStops,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "verdana".to_string(),
            font_size: 18.0,
            label_color: "#000000".to_string(),
            caption_color: "#333333".to_string(),
            node_stroke: "#808080".to_string(),
            unresolved_stroke: "#ff8080".to_string(),
            port_stroke: "#000000".to_string(),
            link_color: "#000000".to_string(),
            node_background: GradientStops::new("#8c8cff", "#c8c8c8"),
            unresolved_background: GradientStops::new("#ff8cff", "#c8c8c8"),
            input_port: GradientStops::new("#3333ff", "#2222ff"),
            output_port: GradientStops::new("#ffff33", "#9a9a00"),
        }
    }

    /// Flat, lower contrast palette with a smaller label font.
    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 14.0,
            label_color: "#1C2430".to_string(),
            caption_color: "#55627A".to_string(),
            node_stroke: "#C7D2E5".to_string(),
            unresolved_stroke: "#E5A0A0".to_string(),
            port_stroke: "#7A8AA6".to_string(),
            link_color: "#7A8AA6".to_string(),
            node_background: GradientStops::new("#F8FAFF", "#EEF2F8"),
            unresolved_background: GradientStops::new("#FFF4F4", "#F8E8E8"),
            input_port: GradientStops::new("#8EA8FF", "#6F8EF5"),
            output_port: GradientStops::new("#FFE48A", "#E8C34F"),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
