//! Observation-to-field pipeline with the reference pacing.

use std::time::Duration;

use anyhow::{Context, Result};
use tiny_skia::{Path, PathBuilder, Rect};
use tracing::info;

use trail_renderer::outline_masks;
use wind_common::{Bounds, Observation};
use wind_field::{BuildProgress, Field, FieldBuilder};

use crate::projection::FitProjection;

/// Reference pacing for the cooperative field build.
pub const SLICE_BUDGET: Duration = Duration::from_millis(100);
pub const SLICE_PAUSE: Duration = Duration::from_millis(25);

/// Stroke widths the masks are rasterized with: thin for the strict
/// display outline, wide for the field dilation.
const DISPLAY_STROKE: f32 = 2.0;
const FIELD_STROKE: f32 = 30.0;

/// The demo's display region: an ellipse inscribed in the canvas, standing
/// in for the map boundary a real deployment renders.
pub fn canvas_boundary(bounds: Bounds) -> Result<Path> {
    let mut pb = PathBuilder::new();
    let (cx, cy) = (bounds.width as f32 / 2.0, bounds.height as f32 / 2.0);
    let (rx, ry) = (bounds.width as f32 * 0.42, bounds.height as f32 * 0.42);
    pb.push_oval(
        Rect::from_ltrb(cx - rx, cy - ry, cx + rx, cy + ry).context("degenerate canvas bounds")?,
    );
    pb.finish().context("empty boundary path")
}

/// Drive the resumable builder with the reference pacing: work for up to
/// [`SLICE_BUDGET`], yield to the runtime for [`SLICE_PAUSE`], resume. A
/// slice failure aborts the whole chain; it is never retried.
pub async fn build_field(observations: &[Observation], bounds: Bounds) -> Result<Field> {
    let projection = FitProjection::fit(observations, bounds);
    let boundary = canvas_boundary(bounds)?;
    let (display_mask, field_mask) = outline_masks(&boundary, bounds, DISPLAY_STROKE, FIELD_STROKE)?;

    let mut builder = FieldBuilder::from_observations(
        observations,
        &projection,
        bounds,
        &field_mask,
        &display_mask,
    )?;

    loop {
        match builder.run_slice(SLICE_BUDGET) {
            BuildProgress::InProgress {
                columns_done,
                columns_total,
            } => {
                info!(columns_done, columns_total, "field build yielding");
                tokio::time::sleep(SLICE_PAUSE).await;
            }
            BuildProgress::Complete(field) => return Ok(field),
        }
    }
}
