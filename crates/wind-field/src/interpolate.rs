//! Inverse-distance-weighted wind estimation.

use spatial_index::{NeighborHeap, StationIndex};
use wind_common::Vec2;

/// IDW estimator over the k nearest stations.
///
/// The neighbor heap is owned scratch, reused across calls; one estimate
/// runs per output pixel, so the hot path performs no allocation. An
/// `Interpolator` must not be shared between concurrent queries — clone it
/// instead.
#[derive(Debug, Clone)]
pub struct Interpolator {
    heap: NeighborHeap,
}

impl Interpolator {
    pub fn new(neighbors: usize) -> Self {
        Self {
            heap: NeighborHeap::new(neighbors),
        }
    }

    pub fn neighbors(&self) -> usize {
        self.heap.k()
    }

    /// Estimate the wind vector at `point`.
    ///
    /// Weights are `1 / d²`. A station exactly at the query point short-
    /// circuits to that station's vector — the correct limiting value, and
    /// it keeps the division out of reach of a zero distance. An empty
    /// index yields `None`; NaN is never produced.
    pub fn estimate(&mut self, index: &StationIndex, point: Vec2) -> Option<Vec2> {
        if index.nearest(point, &mut self.heap) == 0 {
            return None;
        }

        let mut sum = Vec2::ZERO;
        let mut weight_total = 0.0;
        for neighbor in self.heap.found() {
            if neighbor.d2 == 0.0 {
                return Some(index.vector(neighbor.station));
            }
            let weight = 1.0 / neighbor.d2;
            sum += index.vector(neighbor.station).scaled(weight);
            weight_total += weight;
        }
        Some(sum.scaled(1.0 / weight_total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wind_common::StationSample;

    fn station(x: f64, y: f64, vx: f64, vy: f64) -> StationSample {
        StationSample::new(Vec2::new(x, y), Vec2::new(vx, vy))
    }

    #[test]
    fn test_empty_index_yields_none() {
        let index = StationIndex::build(&[]);
        let mut interp = Interpolator::new(5);
        assert!(interp.estimate(&index, Vec2::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn test_coincident_station_returned_exactly() {
        let index = StationIndex::build(&[
            station(0.0, 0.0, 1.0, -1.0),
            station(2.0, 3.0, 10.0, 20.0),
            station(-4.0, 1.0, -5.0, 0.5),
        ]);
        let mut interp = Interpolator::new(3);
        let v = interp.estimate(&index, Vec2::new(2.0, 3.0)).unwrap();
        // No blending at distance zero.
        assert_eq!(v, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_equidistant_pair_averages() {
        // Three collinear stations; the query sits midway between the two
        // outer ones, so equal weights apply and IDW reduces to a mean.
        let index = StationIndex::build(&[
            station(0.0, 0.0, 0.0, 4.0),
            station(10.0, 0.0, 2.0, 0.0),
            station(5.0, 100.0, 100.0, 100.0),
        ]);
        let mut interp = Interpolator::new(2);
        let v = interp.estimate(&index, Vec2::new(5.0, 0.0)).unwrap();
        assert!((v.x - 1.0).abs() < 1e-12);
        assert!((v.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_agreeing_stations_keep_magnitude() {
        // Two stations with the same vector (0, 2): blending agreeing
        // inputs must not shrink the magnitude.
        let index = StationIndex::build(&[
            station(0.0, 0.0, 0.0, 2.0),
            station(10.0, 0.0, 0.0, 2.0),
        ]);
        let mut interp = Interpolator::new(5);
        let v = interp.estimate(&index, Vec2::new(5.0, 0.0)).unwrap();
        assert!((v.x).abs() < 1e-12);
        assert!((v.y - 2.0).abs() < 1e-12);
        assert!((v.magnitude() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_closer_station_dominates() {
        let index = StationIndex::build(&[
            station(0.0, 0.0, 1.0, 0.0),
            station(100.0, 0.0, -1.0, 0.0),
        ]);
        let mut interp = Interpolator::new(2);
        let v = interp.estimate(&index, Vec2::new(1.0, 0.0)).unwrap();
        assert!(v.x > 0.9);
    }
}
