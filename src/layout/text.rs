use crate::config::LayoutConfig;

use super::TextBlock;

/// Sizes a single-line label with a fixed per-character advance.
pub(super) fn measure_label(text: &str, font_size: f64, config: &LayoutConfig) -> TextBlock {
    TextBlock {
        text: text.to_string(),
        width: text_width(text, font_size, config),
        height: font_size * config.label_line_height,
        font_size,
    }
}

pub(super) fn text_width(text: &str, font_size: f64, config: &LayoutConfig) -> f64 {
    text.chars().count() as f64 * font_size * config.char_width_ratio
}

/// Baseline offset that visually centres a line of text on its anchor.
pub fn baseline_shift(font_size: f64) -> f64 {
    font_size * 0.3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_scales_with_char_count() {
        let config = LayoutConfig::default();
        assert_eq!(text_width("", 18.0, &config), 0.0);
        let one = text_width("a", 18.0, &config);
        assert!((one - 10.8).abs() < 1e-9);
        assert!((text_width("abcd", 18.0, &config) - 4.0 * one).abs() < 1e-9);
    }

    #[test]
    fn width_counts_chars_not_bytes() {
        let config = LayoutConfig::default();
        assert_eq!(
            text_width("été", 10.0, &config),
            text_width("abc", 10.0, &config)
        );
    }
}
