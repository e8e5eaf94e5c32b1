//! Dense vector field construction from sparse station observations.
//!
//! The pipeline: projected [`StationSample`]s go into a
//! [`spatial_index::StationIndex`], an [`Interpolator`] estimates the wind
//! at arbitrary pixels by inverse-distance weighting over the k nearest
//! stations, and a [`FieldBuilder`] sweeps the display bounds column by
//! column — yielding cooperatively between wall-clock slices — to produce
//! an immutable [`Field`].
//!
//! [`StationSample`]: wind_common::StationSample

pub mod builder;
pub mod field;
pub mod interpolate;

pub use builder::{BuildProgress, FieldBuilder, DEFAULT_NEIGHBORS};
pub use field::{Field, FieldVector};
pub use interpolate::Interpolator;
