//! Bounded max-heap of nearest-neighbor candidates.

/// One candidate slot: a station index into the tree arena and its squared
/// distance from the query point. Unfilled slots carry `d2 = +inf` and a
/// sentinel station id; they are never reported as found.
#[derive(Debug, Clone, Copy)]
pub struct Neighbor {
    pub station: u32,
    pub d2: f64,
}

const EMPTY: Neighbor = Neighbor {
    station: u32::MAX,
    d2: f64::INFINITY,
};

/// Fixed-capacity max-heap keyed on squared distance. Slot 0 always holds
/// the worst (farthest) candidate, so a new point either beats the root and
/// replaces it or is discarded in O(1).
///
/// The heap is scratch state: allocate once, call [`reset`](Self::reset)
/// per query. It must not be shared between concurrent queries.
#[derive(Debug, Clone)]
pub struct NeighborHeap {
    slots: Vec<Neighbor>,
}

impl NeighborHeap {
    /// Create a heap holding up to `k` candidates. `k` must be at least 1.
    pub fn new(k: usize) -> Self {
        assert!(k >= 1, "neighbor heap needs capacity of at least 1");
        Self {
            slots: vec![EMPTY; k],
        }
    }

    pub fn k(&self) -> usize {
        self.slots.len()
    }

    /// Clear all slots back to unfilled for the next query.
    pub fn reset(&mut self) {
        self.slots.fill(EMPTY);
    }

    /// Squared distance of the current worst candidate. `+inf` while any
    /// slot is still unfilled, which makes every real point an improvement.
    pub fn worst_d2(&self) -> f64 {
        self.slots[0].d2
    }

    /// Offer a candidate. It is kept only if it beats the current worst.
    pub fn offer(&mut self, station: u32, d2: f64) {
        if d2 >= self.slots[0].d2 {
            return;
        }
        self.slots[0] = Neighbor { station, d2 };
        self.sift_down();
    }

    /// Restore the max-heap property after replacing the root.
    fn sift_down(&mut self) {
        let len = self.slots.len();
        let mut i = 0;
        loop {
            let left = 2 * i + 1;
            let right = 2 * i + 2;
            let mut largest = i;
            if left < len && self.slots[left].d2 > self.slots[largest].d2 {
                largest = left;
            }
            if right < len && self.slots[right].d2 > self.slots[largest].d2 {
                largest = right;
            }
            if largest == i {
                return;
            }
            self.slots.swap(i, largest);
            i = largest;
        }
    }

    /// Number of filled slots: `min(k, points offered)` after a full query.
    pub fn found_count(&self) -> usize {
        self.slots.iter().filter(|s| s.d2.is_finite()).count()
    }

    /// Iterate over the filled slots. Order is unspecified beyond slot 0
    /// being the worst of the set.
    pub fn found(&self) -> impl Iterator<Item = Neighbor> + '_ {
        self.slots.iter().copied().filter(|s| s.d2.is_finite())
    }
}
