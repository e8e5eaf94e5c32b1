//! Time-sliced construction of the dense field.
//!
//! Interpolating every pixel costs `O(width * height * k)` nearest-neighbor
//! queries, far too much for one scheduler turn. The builder is therefore
//! an explicit resumable state machine: each [`run_slice`] call processes
//! whole columns until a wall-clock budget elapses, then yields. The caller
//! decides the pacing — a timer loop in production, a single unlimited
//! slice in tests — and the produced [`Field`] only exists once every
//! column in the bounds has been processed. Partial state is never visible.
//!
//! [`run_slice`]: FieldBuilder::run_slice

use std::time::{Duration, Instant};

use spatial_index::StationIndex;
use tracing::{debug, info};
use wind_common::{Bounds, FlowError, FlowResult, Mask, Observation, Project, StationSample};

use crate::field::{Field, FieldColumn};
use crate::{FieldVector, Interpolator};

/// Neighbor count used by the reference deployment.
pub const DEFAULT_NEIGHBORS: usize = 5;

/// Outcome of one build slice.
#[derive(Debug)]
pub enum BuildProgress {
    /// Budget elapsed before the bounds were covered; call `run_slice`
    /// again to resume.
    InProgress {
        columns_done: u32,
        columns_total: u32,
    },
    /// Every column processed; the completed field.
    Complete(Field),
}

/// Resumable column-by-column field build over fixed bounds.
pub struct FieldBuilder<'a> {
    index: StationIndex,
    interpolator: Interpolator,
    bounds: Bounds,
    field_mask: &'a dyn Mask,
    display_mask: &'a dyn Mask,
    columns: Vec<Option<FieldColumn>>,
    next_column: u32,
    done: bool,
    started: Instant,
}

impl<'a> FieldBuilder<'a> {
    /// Start a build over already-projected samples with the reference
    /// neighbor count.
    ///
    /// Fails with [`FlowError::NoData`] when `samples` is empty and
    /// [`FlowError::InsufficientData`] when fewer samples exist than the
    /// interpolation needs. In both cases no partial field is produced.
    pub fn new(
        samples: &[StationSample],
        bounds: Bounds,
        field_mask: &'a dyn Mask,
        display_mask: &'a dyn Mask,
    ) -> FlowResult<Self> {
        Self::with_neighbors(samples, bounds, field_mask, display_mask, DEFAULT_NEIGHBORS)
    }

    pub fn with_neighbors(
        samples: &[StationSample],
        bounds: Bounds,
        field_mask: &'a dyn Mask,
        display_mask: &'a dyn Mask,
        neighbors: usize,
    ) -> FlowResult<Self> {
        if samples.is_empty() {
            return Err(FlowError::NoData);
        }
        if samples.len() < neighbors {
            return Err(FlowError::InsufficientData {
                found: samples.len(),
                required: neighbors,
            });
        }
        info!(
            stations = samples.len(),
            width = bounds.width,
            height = bounds.height,
            neighbors,
            "starting field build"
        );
        Ok(Self {
            index: StationIndex::build(samples),
            interpolator: Interpolator::new(neighbors),
            bounds,
            field_mask,
            display_mask,
            columns: Vec::with_capacity(bounds.width as usize),
            next_column: 0,
            done: false,
            started: Instant::now(),
        })
    }

    /// Project observations and start a build. Records with a missing or
    /// zero wind direction or speed carry no usable vector and are dropped
    /// before the minimum-sample check.
    pub fn from_observations(
        observations: &[Observation],
        projection: &dyn Project,
        bounds: Bounds,
        field_mask: &'a dyn Mask,
        display_mask: &'a dyn Mask,
    ) -> FlowResult<Self> {
        let samples: Vec<StationSample> = observations
            .iter()
            .filter_map(|obs| {
                let vector = obs.usable_vector()?;
                let position = projection.project(obs.longitude(), obs.latitude());
                Some(StationSample::new(position, vector))
            })
            .collect();
        debug!(
            total = observations.len(),
            usable = samples.len(),
            "filtered observations"
        );
        Self::new(&samples, bounds, field_mask, display_mask)
    }

    /// Columns processed so far.
    pub fn columns_done(&self) -> u32 {
        self.next_column
    }

    /// Process columns until `budget` elapses or the bounds are covered.
    /// At least one column is processed per call, so any budget — including
    /// zero — makes progress. Must not be called again after `Complete`.
    pub fn run_slice(&mut self, budget: Duration) -> BuildProgress {
        assert!(!self.done, "field build already completed");
        let slice_start = Instant::now();
        while self.next_column < self.bounds.width {
            let column = self.build_column(self.next_column as i32);
            self.columns.push(column);
            self.next_column += 1;
            if slice_start.elapsed() >= budget {
                break;
            }
        }

        if self.next_column < self.bounds.width {
            debug!(
                columns_done = self.next_column,
                columns_total = self.bounds.width,
                "field build slice yielded"
            );
            return BuildProgress::InProgress {
                columns_done: self.next_column,
                columns_total: self.bounds.width,
            };
        }

        self.done = true;
        let field = Field::from_columns(self.bounds, std::mem::take(&mut self.columns));
        info!(
            defined_cells = field.defined_cells(),
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            "field build complete"
        );
        BuildProgress::Complete(field)
    }

    /// Drive the state machine to completion in a single call. Test and
    /// batch entry point; production drivers interleave `run_slice` with
    /// scheduler pauses instead.
    pub fn run_to_completion(mut self) -> Field {
        match self.run_slice(Duration::MAX) {
            BuildProgress::Complete(field) => field,
            BuildProgress::InProgress { .. } => {
                unreachable!("unlimited budget must finish the build")
            }
        }
    }

    /// Interpolate one column. `None` when the field mask admits no pixel
    /// of the column; otherwise cells spanning the mask's min..=max rows,
    /// with in-span mask gaps stored as `Absent`.
    fn build_column(&mut self, x: i32) -> Option<FieldColumn> {
        let height = self.bounds.height as i32;
        let mut min_y = None;
        let mut max_y = 0;
        for y in 0..height {
            if self.field_mask.contains(x, y) {
                min_y.get_or_insert(y);
                max_y = y;
            }
        }
        let offset = min_y?;

        let mut cells = Vec::with_capacity((max_y - offset + 1) as usize);
        for y in offset..=max_y {
            if !self.field_mask.contains(x, y) {
                cells.push(FieldVector::Absent);
                continue;
            }
            let point = wind_common::Vec2::new(x as f64, y as f64);
            let cell = match self.interpolator.estimate(&self.index, point) {
                Some(v) if self.display_mask.contains(x, y) => FieldVector::Visible {
                    v,
                    magnitude: v.magnitude(),
                },
                Some(v) => FieldVector::Hidden { v },
                // Unreachable with the minimum-sample check in place, but a
                // hole in the field beats a NaN in the arithmetic.
                None => FieldVector::Absent,
            };
            cells.push(cell);
        }
        Some(FieldColumn { offset, cells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wind_common::Vec2;

    fn stations() -> Vec<StationSample> {
        vec![
            StationSample::new(Vec2::new(2.0, 2.0), Vec2::new(0.0, 2.0)),
            StationSample::new(Vec2::new(12.0, 2.0), Vec2::new(0.0, 2.0)),
            StationSample::new(Vec2::new(2.0, 12.0), Vec2::new(1.0, 0.0)),
            StationSample::new(Vec2::new(12.0, 12.0), Vec2::new(1.0, 0.0)),
            StationSample::new(Vec2::new(7.0, 7.0), Vec2::new(0.5, 0.5)),
        ]
    }

    #[test]
    fn test_empty_samples_reject_with_no_data() {
        let mask = wind_common::mask::FullMask;
        let result = FieldBuilder::new(&[], Bounds::new(4, 4), &mask, &mask);
        assert!(matches!(result, Err(FlowError::NoData)));
    }

    #[test]
    fn test_too_few_samples_reject_with_insufficient_data() {
        let mask = wind_common::mask::FullMask;
        let samples = &stations()[..3];
        let result = FieldBuilder::new(samples, Bounds::new(4, 4), &mask, &mask);
        match result {
            Err(FlowError::InsufficientData { found, required }) => {
                assert_eq!(found, 3);
                assert_eq!(required, DEFAULT_NEIGHBORS);
            }
            other => panic!("expected InsufficientData, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_sliced_and_unsliced_builds_are_identical() {
        let field_mask = |x: i32, y: i32| (x + y) % 3 != 0;
        let display_mask = |x: i32, _y: i32| x < 10;
        let bounds = Bounds::new(16, 16);

        let all_at_once =
            FieldBuilder::new(&stations(), bounds, &field_mask, &display_mask)
                .unwrap()
                .run_to_completion();

        // One column per slice: a zero budget still processes exactly one
        // column before checking the clock.
        let mut builder =
            FieldBuilder::new(&stations(), bounds, &field_mask, &display_mask).unwrap();
        let mut slices = 0;
        let sliced = loop {
            match builder.run_slice(Duration::ZERO) {
                BuildProgress::InProgress { columns_done, .. } => {
                    slices += 1;
                    assert_eq!(columns_done, slices);
                }
                BuildProgress::Complete(field) => break field,
            }
        };
        assert_eq!(slices, bounds.width - 1);
        assert_eq!(all_at_once, sliced);
    }

    #[test]
    #[should_panic(expected = "already completed")]
    fn test_run_slice_panics_after_completion() {
        let mask = wind_common::mask::FullMask;
        let mut builder = FieldBuilder::new(&stations(), Bounds::new(2, 2), &mask, &mask).unwrap();
        assert!(matches!(
            builder.run_slice(Duration::MAX),
            BuildProgress::Complete(_)
        ));
        builder.run_slice(Duration::MAX);
    }

    #[test]
    #[should_panic(expected = "already completed")]
    fn test_zero_width_build_completes_exactly_once() {
        // Zero columns means the first slice is already Complete; the state
        // machine must still refuse a second call.
        let mask = wind_common::mask::FullMask;
        let mut builder = FieldBuilder::new(&stations(), Bounds::new(0, 4), &mask, &mask).unwrap();
        assert!(matches!(
            builder.run_slice(Duration::ZERO),
            BuildProgress::Complete(_)
        ));
        builder.run_slice(Duration::ZERO);
    }

    #[test]
    fn test_column_sentinels_follow_masks() {
        // Field mask admits rows 4..=9 except row 6; display mask admits
        // rows up to 7.
        let field_mask = |_x: i32, y: i32| (4..=9).contains(&y) && y != 6;
        let display_mask = |_x: i32, y: i32| y <= 7;
        let field = FieldBuilder::new(&stations(), Bounds::new(2, 16), &field_mask, &display_mask)
            .unwrap()
            .run_to_completion();

        assert!(field.at(0, 3).is_absent());
        assert!(field.at(0, 6).is_absent());
        assert!(field.at(0, 10).is_absent());
        assert!(field.at(0, 4).is_visible());
        assert!(field.at(0, 7).is_visible());
        assert!(matches!(field.at(0, 8), FieldVector::Hidden { .. }));
        assert!(matches!(field.at(0, 9), FieldVector::Hidden { .. }));
    }

    #[test]
    fn test_fully_masked_column_is_null() {
        let field_mask = |x: i32, _y: i32| x != 1;
        let mask = wind_common::mask::FullMask;
        let field = FieldBuilder::new(&stations(), Bounds::new(3, 4), &field_mask, &mask)
            .unwrap()
            .run_to_completion();
        for y in 0..4 {
            assert!(field.at(1, y).is_absent());
            assert!(!field.at(0, y).is_absent());
        }
    }

    #[test]
    fn test_visible_cell_magnitude_matches_vector() {
        let mask = wind_common::mask::FullMask;
        let field = FieldBuilder::new(&stations(), Bounds::new(16, 16), &mask, &mask)
            .unwrap()
            .run_to_completion();
        for (x, y) in [(0, 0), (7, 7), (15, 3)] {
            match field.at(x, y) {
                FieldVector::Visible { v, magnitude } => {
                    assert!((magnitude - v.magnitude()).abs() < 1e-12);
                }
                other => panic!("expected visible cell at ({x}, {y}), got {other:?}"),
            }
        }
    }
}
