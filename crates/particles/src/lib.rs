//! Particle advection over a completed wind field.
//!
//! A [`ParticleSystem`] owns a few thousand particles and advances all of
//! them once per tick, bucketing the drawable trail segments by a
//! speed-derived style index so the surface is touched once per style per
//! frame. The system starts only after the field build has completed; the
//! two never run concurrently against the same field.

pub mod schedule;
pub mod segment;
pub mod system;

pub use schedule::{CancelFlag, TickPacer};
pub use segment::{render_frame, FrameBatches, Segment, TrailSurface};
pub use system::{ParticleSettings, ParticleSystem};
