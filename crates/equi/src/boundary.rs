use {
    crate::*,
    base::{Vec2, log_debug},
    image::{Image, draw_line},
};

/// Appearance and seam handling of the boundary overlay.
#[derive(Clone, Debug)]
pub struct BoundaryStyle {
    seam_threshold: u32,
    thickness: u32,
    color: [u8; 3],
    flip_channels: bool,
}

impl Default for BoundaryStyle {
    fn default() -> Self {
        Self {
            seam_threshold: 100,
            thickness: 2,
            color: [0, 255, 0],
            flip_channels: false,
        }
    }
}

impl BoundaryStyle {
    /// Set the pixel distance at which a segment is taken to jump across the seam.
    ///
    /// A heuristic: the right value depends on the panorama resolution and on how
    /// densely the boundary is sampled.
    pub fn with_seam_threshold(mut self, seam_threshold: u32) -> Self {
        self.seam_threshold = seam_threshold;
        self
    }

    /// Set the line thickness in pixels.
    pub fn with_thickness(mut self, thickness: u32) -> Self {
        self.thickness = thickness;
        self
    }

    /// Set the line colour, in the channel order of the output.
    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }

    /// Emit the overlay with red and blue swapped (BGR output).
    pub fn with_flip_channels(mut self, flip_channels: bool) -> Self {
        self.flip_channels = flip_channels;
        self
    }

    pub fn seam_threshold(&self) -> u32 {
        self.seam_threshold
    }

    pub fn thickness(&self) -> u32 {
        self.thickness
    }

    pub fn color(&self) -> [u8; 3] {
        self.color
    }

    pub fn flip_channels(&self) -> bool {
        self.flip_channels
    }
}

/// Draws a [`BoundaryPolygon`] over its panorama, leaving out seam jumps.
#[derive(Clone, Debug, Default)]
pub struct BoundaryRenderer {
    style: BoundaryStyle,
}

impl BoundaryRenderer {
    pub fn new(style: BoundaryStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &BoundaryStyle {
        &self.style
    }

    /// True when `a` to `b` moves at least the seam threshold along either axis.
    pub fn crosses_seam(&self, a: BoundaryPoint, b: BoundaryPoint) -> bool {
        let limit = self.style.seam_threshold as i64;
        (a.row as i64 - b.row as i64).abs() >= limit || (a.col as i64 - b.col as i64).abs() >= limit
    }

    /// The cyclic pairs that will be drawn, in polygon order.
    pub fn segments(&self, polygon: &BoundaryPolygon) -> Vec<(BoundaryPoint, BoundaryPoint)> {
        polygon
            .cyclic_pairs()
            .filter(|&(a, b)| !self.crosses_seam(a, b))
            .collect()
    }

    /// Returns a copy of `base` with the polygon drawn on it.
    pub fn render(&self, base: &Image, polygon: &BoundaryPolygon) -> Image {
        let mut out = if self.style.flip_channels {
            base.flip_channels()
        } else {
            base.clone()
        };

        let segments = self.segments(polygon);
        for &(a, b) in &segments {
            draw_line(
                &mut out,
                Vec2::new(a.col, a.row),
                Vec2::new(b.col, b.row),
                self.style.color,
                self.style.thickness,
            );
        }

        log_debug!(
            "boundary: drew {} of {} segments ({} skipped at the seam)",
            segments.len(),
            polygon.len(),
            polygon.len() - segments.len()
        );
        out
    }
}
