//! Pixel masks sampled from rendered outlines.
//!
//! The reference pipeline rasterizes the map boundary twice: once with a
//! thin stroke for the strict display mask and once with a very wide
//! stroke for the dilated field mask, then reads the pixels back as
//! membership predicates. [`outline_masks`] reproduces that recipe for any
//! closed path.

use tiny_skia::{Color, FillRule, Paint, Path, Pixmap, Stroke, Transform};
use wind_common::{Bounds, FlowError, FlowResult, Mask};

/// A [`Mask`] backed by rasterized pixels: true wherever the rendered
/// coverage is nonzero. Out-of-bounds pixels are outside the mask.
#[derive(Debug, Clone)]
pub struct RasterMask {
    width: i32,
    height: i32,
    bits: Vec<bool>,
}

impl RasterMask {
    /// Sample a pixmap's alpha channel.
    pub fn from_pixmap(pixmap: &Pixmap) -> Self {
        let bits = pixmap
            .data()
            .chunks_exact(4)
            .map(|px| px[3] > 0)
            .collect();
        Self {
            width: pixmap.width() as i32,
            height: pixmap.height() as i32,
            bits,
        }
    }

    /// Number of pixels inside the mask.
    pub fn population(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}

impl Mask for RasterMask {
    fn contains(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        self.bits[(y * self.width + x) as usize]
    }
}

fn render_outline(path: &Path, bounds: Bounds, stroke_width: f32) -> FlowResult<Pixmap> {
    let mut pixmap = Pixmap::new(bounds.width, bounds.height)
        .ok_or_else(|| FlowError::SurfaceError("zero-sized mask canvas".to_string()))?;
    let mut paint = Paint::default();
    paint.set_color(Color::WHITE);
    paint.anti_alias = false;

    pixmap.fill_path(path, &paint, FillRule::Winding, Transform::identity(), None);
    let stroke = Stroke {
        width: stroke_width,
        ..Stroke::default()
    };
    pixmap.stroke_path(path, &paint, &stroke, Transform::identity(), None);
    Ok(pixmap)
}

/// Rasterize a closed boundary into the two masks the field build needs:
/// the strict display mask (thin stroke) and the dilated field mask (wide
/// stroke), both including the filled interior. The field mask is a
/// superset of the display mask whenever `field_stroke >= display_stroke`.
///
/// Reference stroke widths: 2 px for display, 30 px for the dilation.
pub fn outline_masks(
    boundary: &Path,
    bounds: Bounds,
    display_stroke: f32,
    field_stroke: f32,
) -> FlowResult<(RasterMask, RasterMask)> {
    let display = RasterMask::from_pixmap(&render_outline(boundary, bounds, display_stroke)?);
    let field = RasterMask::from_pixmap(&render_outline(boundary, bounds, field_stroke)?);
    Ok((display, field))
}
