//! Speed-to-color mapping for trail segments.

use tiny_skia::Color;

/// Fixed palette indexed by style bucket. The default is the reference
/// grayscale ramp: opaque grays from 70 (slowest) to 255 (fastest), so
/// fast air reads bright against the faded trails behind it.
#[derive(Debug, Clone)]
pub struct TrailPalette {
    colors: Vec<Color>,
}

impl TrailPalette {
    /// Linear gray ramp over `style_count` buckets.
    pub fn grayscale(style_count: usize) -> Self {
        assert!(style_count >= 1, "palette needs at least one style");
        let colors = (0..style_count)
            .map(|i| {
                let t = if style_count == 1 {
                    0.0
                } else {
                    i as f32 / (style_count - 1) as f32
                };
                let gray = (70.0 + t * (255.0 - 70.0)).round() as u8;
                Color::from_rgba8(gray, gray, gray, 255)
            })
            .collect();
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn color(&self, style: usize) -> Color {
        self.colors[style]
    }
}
