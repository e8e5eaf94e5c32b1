//! Fading trail surface backed by a tiny-skia pixmap.

use std::path::Path;

use particles::{Segment, TrailSurface};
use tiny_skia::{Paint, PathBuilder, Pixmap, Stroke, Transform};
use tracing::trace;
use wind_common::{Bounds, FlowError, FlowResult};

use crate::TrailPalette;

/// Raster trail surface. Pixels are premultiplied RGBA over a transparent
/// background; the host composites the result over its base map.
pub struct PixmapSurface {
    pixmap: Pixmap,
    palette: TrailPalette,
    line_width: f32,
}

impl PixmapSurface {
    pub fn new(bounds: Bounds, palette: TrailPalette, line_width: f32) -> FlowResult<Self> {
        let pixmap = Pixmap::new(bounds.width, bounds.height)
            .ok_or_else(|| FlowError::SurfaceError("zero-sized surface".to_string()))?;
        Ok(Self {
            pixmap,
            palette,
            line_width,
        })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Encode the current frame as a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> FlowResult<()> {
        self.pixmap
            .save_png(path)
            .map_err(|e| FlowError::SurfaceError(format!("png encode failed: {e}")))
    }
}

impl TrailSurface for PixmapSurface {
    /// The keep-destination-where-existing-alpha composite: every channel
    /// of the premultiplied buffer is scaled by `retain`, so old segments
    /// decay toward transparent over successive frames.
    fn fade(&mut self, retain: f32) {
        let retain = retain.clamp(0.0, 1.0);
        for byte in self.pixmap.data_mut() {
            *byte = (*byte as f32 * retain) as u8;
        }
    }

    /// Stroke a whole style bucket as one path with one paint. Batching by
    /// style is what keeps per-frame draw-state changes proportional to the
    /// number of distinct speeds, not the number of particles.
    fn draw(&mut self, style: usize, segments: &[Segment]) {
        let mut pb = PathBuilder::new();
        for s in segments {
            pb.move_to(s.x0 as f32 + 0.5, s.y0 as f32 + 0.5);
            pb.line_to(s.x1 as f32 + 0.5, s.y1 as f32 + 0.5);
        }
        let Some(path) = pb.finish() else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color(self.palette.color(style));
        paint.anti_alias = true;
        let stroke = Stroke {
            width: self.line_width,
            ..Stroke::default()
        };
        trace!(style, segments = segments.len(), "stroking bucket");
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}
