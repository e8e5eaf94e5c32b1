//! Raster implementation of the animation's drawing surface.
//!
//! The core emits per-frame segment batches and expects two operations
//! from its surface: an alpha-decay fade and batched stroked lines. This
//! crate provides both on a tiny-skia [`Pixmap`], plus the grayscale
//! speed palette and pixel masks sampled from rendered outlines.
//!
//! [`Pixmap`]: tiny_skia::Pixmap

pub mod mask;
pub mod palette;
pub mod surface;

pub use mask::{outline_masks, RasterMask};
pub use palette::TrailPalette;
pub use surface::PixmapSurface;
