//! Per-frame draw batches and the surface they are delivered to.

/// One trail segment in pixel coordinates, already rounded for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

/// Drawable segments of one frame, grouped by style bucket. The buckets
/// are cleared and refilled every tick; their backing storage is reused so
/// steady-state frames allocate nothing.
#[derive(Debug)]
pub struct FrameBatches {
    buckets: Vec<Vec<Segment>>,
}

impl FrameBatches {
    pub fn new(style_count: usize) -> Self {
        assert!(style_count >= 1, "at least one style bucket is required");
        Self {
            buckets: vec![Vec::new(); style_count],
        }
    }

    pub fn style_count(&self) -> usize {
        self.buckets.len()
    }

    pub(crate) fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }

    pub(crate) fn push(&mut self, style: usize, segment: Segment) {
        self.buckets[style].push(segment);
    }

    /// Segments of one style bucket.
    pub fn bucket(&self, style: usize) -> &[Segment] {
        &self.buckets[style]
    }

    /// Iterate over the non-empty buckets with their style indices.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[Segment])> {
        self.buckets
            .iter()
            .enumerate()
            .filter(|(_, bucket)| !bucket.is_empty())
            .map(|(style, bucket)| (style, bucket.as_slice()))
    }

    /// Total segments across all buckets this frame.
    pub fn segment_count(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }
}

/// Drawing surface the animation renders into. Implemented externally (the
/// bundled implementation rasterizes with tiny-skia); the core only needs
/// an alpha-decay fade and batched stroked segments.
pub trait TrailSurface {
    /// Fade existing content toward transparent, keeping `retain` of each
    /// pixel's alpha. Produces the trailing-tail effect frame over frame.
    fn fade(&mut self, retain: f32);

    /// Stroke all segments of one style bucket.
    fn draw(&mut self, style: usize, segments: &[Segment]);
}

/// Deliver one frame: fade, then one draw call per non-empty bucket.
pub fn render_frame(surface: &mut dyn TrailSurface, batches: &FrameBatches, retain: f32) {
    surface.fade(retain);
    for (style, segments) in batches.iter() {
        surface.draw(style, segments);
    }
}
