//! Spatial index over wind stations.
//!
//! A k-d tree (k = 2) built once per animation cycle and read-only
//! afterward, plus a reusable bounded max-heap that collects the k closest
//! stations during a query. One query runs per output pixel, so the hot
//! path works entirely in squared distances and allocates nothing.

pub mod heap;
pub mod tree;

pub use heap::{Neighbor, NeighborHeap};
pub use tree::StationIndex;
