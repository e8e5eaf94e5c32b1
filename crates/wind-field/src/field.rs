//! Immutable field query surface.

use rand::Rng;
use wind_common::{Bounds, Vec2};

/// The wind at one pixel.
///
/// `Absent` means the pixel lies outside the field mask entirely; `Hidden`
/// means the field is defined there but the pixel falls outside the strict
/// display outline, so a particle may travel through it without being
/// drawn. Only `Visible` cells carry a precomputed magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldVector {
    Absent,
    Hidden { v: Vec2 },
    Visible { v: Vec2, magnitude: f64 },
}

impl FieldVector {
    /// The motion vector, regardless of visibility. `None` only for
    /// `Absent`.
    pub fn vector(&self) -> Option<Vec2> {
        match self {
            FieldVector::Absent => None,
            FieldVector::Hidden { v } | FieldVector::Visible { v, .. } => Some(*v),
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, FieldVector::Visible { .. })
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FieldVector::Absent)
    }
}

/// One sparse column of the field: cells for `y` in
/// `[offset, offset + cells.len())`, anything outside is absent. Gaps in
/// the field mask inside the span are stored as `Absent` cells.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FieldColumn {
    pub(crate) offset: i32,
    pub(crate) cells: Vec<FieldVector>,
}

impl FieldColumn {
    fn population(&self) -> u64 {
        self.cells.iter().filter(|c| !c.is_absent()).count() as u64
    }
}

/// The completed per-pixel vector field. Read-only; safely shareable by
/// reference among any number of readers.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    bounds: Bounds,
    columns: Vec<Option<FieldColumn>>,
    /// `cumulative[x]` = defined cells in columns `0..=x`. Drives the
    /// population-weighted random point generator.
    cumulative: Vec<u64>,
    total: u64,
}

impl Field {
    pub(crate) fn from_columns(bounds: Bounds, columns: Vec<Option<FieldColumn>>) -> Self {
        debug_assert_eq!(columns.len(), bounds.width as usize);
        let mut cumulative = Vec::with_capacity(columns.len());
        let mut total = 0u64;
        for column in &columns {
            total += column.as_ref().map_or(0, FieldColumn::population);
            cumulative.push(total);
        }
        Self {
            bounds,
            columns,
            cumulative,
            total,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of pixels where the field is defined (visible or hidden).
    pub fn defined_cells(&self) -> u64 {
        self.total
    }

    /// The wind at pixel `(x, y)`.
    pub fn at(&self, x: i32, y: i32) -> FieldVector {
        if x < 0 || x as usize >= self.columns.len() {
            return FieldVector::Absent;
        }
        let Some(column) = &self.columns[x as usize] else {
            return FieldVector::Absent;
        };
        let i = y - column.offset;
        if i < 0 || i as usize >= column.cells.len() {
            return FieldVector::Absent;
        }
        column.cells[i as usize]
    }

    /// A uniformly random pixel among all defined cells, or `None` for an
    /// all-absent field.
    ///
    /// Uniformity over *cells*, not columns: an index is drawn from
    /// `[0, total)` and binary-searched in the column prefix sums, so a
    /// column is chosen in proportion to its population. Picking a column
    /// uniformly first would bias toward sparsely populated columns.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(i32, i32)> {
        if self.total == 0 {
            return None;
        }
        let target = rng.gen_range(0..self.total);
        let x = self.cumulative.partition_point(|&count| count <= target);
        let preceding = if x == 0 { 0 } else { self.cumulative[x - 1] };
        let mut remaining = target - preceding;

        let column = self.columns[x]
            .as_ref()
            .expect("populated prefix sum points at an empty column");
        for (i, cell) in column.cells.iter().enumerate() {
            if cell.is_absent() {
                continue;
            }
            if remaining == 0 {
                return Some((x as i32, column.offset + i as i32));
            }
            remaining -= 1;
        }
        unreachable!("column population disagrees with prefix sums")
    }
}
