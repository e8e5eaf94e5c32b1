//! Common types shared across the windtrail crates.

pub mod bounds;
pub mod error;
pub mod mask;
pub mod observation;
pub mod vec2;

pub use bounds::Bounds;
pub use error::{FlowError, FlowResult};
pub use mask::{Mask, Project};
pub use observation::{Observation, StationSample};
pub use vec2::Vec2;
