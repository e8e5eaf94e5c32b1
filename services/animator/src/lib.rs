//! Library surface of the animator service: the projection fit and the
//! cooperative field-build pipeline, kept out of `main` so integration
//! tests can drive the same path the binary runs.

pub mod pipeline;
pub mod projection;
