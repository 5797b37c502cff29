use serde::Serialize;

/// Axis-aligned box in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl BoundingBox {
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Degenerate box containing a single point.
    pub fn point(x: f64, y: f64) -> Self {
        Self::new(x, y, x, y)
    }

    /// Box of the given size centred on `(x, y)`.
    pub fn centered(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            x - width / 2.0,
            y - height / 2.0,
            x + width / 2.0,
            y + height / 2.0,
        )
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Componentwise min/max with `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            xmin: self.xmin.min(other.xmin),
            ymin: self.ymin.min(other.ymin),
            xmax: self.xmax.max(other.xmax),
            ymax: self.ymax.max(other.ymax),
        }
    }

    pub fn expand(&self, dx: f64, dy: f64) -> BoundingBox {
        BoundingBox {
            xmin: self.xmin - dx,
            ymin: self.ymin - dy,
            xmax: self.xmax + dx,
            ymax: self.ymax + dy,
        }
    }

    pub fn pad(&self, padding: f64) -> BoundingBox {
        self.expand(padding, padding)
    }

    /// Union of every box yielded, or `None` for an empty sequence.
    pub fn enclose<'a, I>(boxes: I) -> Option<BoundingBox>
    where
        I: IntoIterator<Item = &'a BoundingBox>,
    {
        boxes
            .into_iter()
            .fold(None, |acc: Option<BoundingBox>, bbox| match acc {
                Some(acc) => Some(acc.union(bbox)),
                None => Some(*bbox),
            })
    }
}

/// Region of world space mapped onto the output canvas (`viewBox`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.x, self.y, self.width, self.height)
    }

    pub fn view_box(&self) -> String {
        format!(
            "{:.2} {:.2} {:.2} {:.2}",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Fits `content` into a `width` x `height` canvas.
///
/// The viewport is `ratio * (width, height)` where `ratio` is the larger of
/// the content/canvas ratios of both axes, so it has exactly the canvas
/// aspect ratio and is tight on one axis. Slack is split evenly on both sides.
pub fn fit_viewport(content: &BoundingBox, width: u32, height: u32) -> Viewport {
    let width = width.max(1) as f64;
    let height = height.max(1) as f64;
    let extent_x = content.width().max(0.0);
    let extent_y = content.height().max(0.0);

    let mut ratio = (extent_x / width).max(extent_y / height);
    if ratio <= 0.0 {
        // Degenerate content: one world unit on the longer canvas side.
        ratio = 1.0 / width.max(height);
    }
    let view_w = ratio * width;
    let view_h = ratio * height;

    Viewport {
        x: content.xmin - (view_w - extent_x) / 2.0,
        y: content.ymin - (view_h - extent_y) / 2.0,
        width: view_w,
        height: view_h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_is_componentwise() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(-5.0, 2.0, 4.0, 20.0);
        assert_eq!(a.union(&b), BoundingBox::new(-5.0, 0.0, 10.0, 20.0));
    }

    #[test]
    fn enclose_empty_is_none() {
        assert_eq!(BoundingBox::enclose(&[]), None);
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_centred(view: &Viewport, content: &BoundingBox) {
        assert_close(view.x + view.width / 2.0, (content.xmin + content.xmax) / 2.0);
        assert_close(view.y + view.height / 2.0, (content.ymin + content.ymax) / 2.0);
    }

    #[test]
    fn fit_square_canvas_centres_narrow_axis() {
        let content = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
        let view = fit_viewport(&content, 600, 600);
        assert_close(view.width, 100.0);
        assert_close(view.height, 100.0);
        assert_close(view.x, 0.0);
        assert_close(view.y, -25.0);
    }

    #[test]
    fn fit_coprime_canvas_is_tight_and_centred() {
        let content = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
        let view = fit_viewport(&content, 601, 600);
        assert_close(view.width, 100.0);
        assert_close(view.height, 100.0 * 600.0 / 601.0);
        assert_close(view.x, 0.0);
        assert_centred(&view, &content);
    }

    #[test]
    fn fit_preserves_canvas_ratio() {
        let content = BoundingBox::new(-13.3, 7.1, 250.9, 31.7);
        for (w, h) in [(600, 600), (800, 600), (1200, 800), (333, 1000), (601, 600), (7, 997)] {
            let view = fit_viewport(&content, w, h);
            assert_close(view.width / view.height, w as f64 / h as f64);
            assert!(view.x <= content.xmin + 1e-9 && view.x + view.width >= content.xmax - 1e-9);
            assert!(view.y <= content.ymin + 1e-9 && view.y + view.height >= content.ymax - 1e-9);
            // Tight on at least one axis.
            let tight_x = (view.width - content.width()).abs() < 1e-9;
            let tight_y = (view.height - content.height()).abs() < 1e-9;
            assert!(tight_x || tight_y, "{w}x{h}: {view:?}");
            assert_centred(&view, &content);
        }
    }

    #[test]
    fn fit_degenerate_content_has_positive_size() {
        let view = fit_viewport(&BoundingBox::point(3.0, 4.0), 600, 600);
        assert!(view.width > 0.0 && view.height > 0.0);
        assert_centred(&view, &BoundingBox::point(3.0, 4.0));
    }

    #[test]
    fn fit_tall_content_centres_horizontally() {
        let content = BoundingBox::new(0.0, 0.0, 30.0, 300.0);
        let view = fit_viewport(&content, 800, 600);
        assert_eq!(view.width, 400.0);
        assert_eq!(view.height, 300.0);
        assert_eq!(view.y, 0.0);
        assert_eq!(view.x, -185.0);
    }

    #[test]
    fn view_box_formats_all_values_alike() {
        let view = Viewport {
            x: -1.0,
            y: 2.5,
            width: 100.0 / 3.0,
            height: 40.0,
        };
        assert_eq!(view.view_box(), "-1.00 2.50 33.33 40.00");
    }
}
