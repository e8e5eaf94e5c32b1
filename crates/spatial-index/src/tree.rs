//! Arena k-d tree over projected station positions.

use wind_common::{StationSample, Vec2};

use crate::NeighborHeap;

const AXES: usize = 2;

#[derive(Debug, Clone, Copy)]
struct Node {
    position: Vec2,
    vector: Vec2,
    left: Option<u32>,
    right: Option<u32>,
}

/// Immutable k-d tree. Nodes live in a flat arena addressed by `u32`
/// indices; the splitting axis is implied by depth (`depth % 2`), so a node
/// stores only its point, payload vector, and child slots.
///
/// Axis-tied duplicates are never split across subtrees: the build pivots
/// on the *first* element of any run of axis-equal points, so everything
/// strictly less goes left and ties land in the right subtree, which is
/// also the side a query descends first when the query coordinate equals
/// the split value.
#[derive(Debug, Clone)]
pub struct StationIndex {
    nodes: Vec<Node>,
    root: Option<u32>,
}

impl StationIndex {
    /// Build the tree from projected samples. The input order does not
    /// affect query results.
    pub fn build(samples: &[StationSample]) -> Self {
        let mut points = samples.to_vec();
        let mut nodes = Vec::with_capacity(points.len());
        let root = build_range(&mut points, 0, &mut nodes);
        Self { nodes, root }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Wind vector of the station in the given arena slot.
    pub fn vector(&self, station: u32) -> Vec2 {
        self.nodes[station as usize].vector
    }

    /// Projected position of the station in the given arena slot.
    pub fn position(&self, station: u32) -> Vec2 {
        self.nodes[station as usize].position
    }

    /// Find up to `heap.k()` nearest stations to `point`, depth-first into
    /// the half-space containing the query first, pruning the far side
    /// whenever the splitting plane is no closer than the current worst
    /// candidate. Returns the number of stations found:
    /// `min(k, total stations)`.
    pub fn nearest(&self, point: Vec2, heap: &mut NeighborHeap) -> usize {
        heap.reset();
        if let Some(root) = self.root {
            self.search(root, point, 0, heap);
        }
        heap.found_count()
    }

    fn search(&self, index: u32, point: Vec2, depth: usize, heap: &mut NeighborHeap) {
        let node = &self.nodes[index as usize];
        let axis = depth % AXES;
        let delta = point.axis(axis) - node.position.axis(axis);
        let (near, far) = if delta < 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        if let Some(child) = near {
            self.search(child, point, depth + 1, heap);
        }

        heap.offer(index, node.position.distance_squared(point));

        // The far half-space can only hold a closer point if the splitting
        // plane itself is closer than the current worst-of-k.
        if delta * delta < heap.worst_d2() {
            if let Some(child) = far {
                self.search(child, point, depth + 1, heap);
            }
        }
    }
}

/// Recursive arena build over a mutable slice of the remaining points.
fn build_range(points: &mut [StationSample], depth: usize, nodes: &mut Vec<Node>) -> Option<u32> {
    if points.is_empty() {
        return None;
    }
    let axis = depth % AXES;
    points.sort_by(|a, b| a.position.axis(axis).total_cmp(&b.position.axis(axis)));

    // Median candidate, then walk back to the first of any run of
    // axis-equal points so no tie straddles the pivot.
    let mut pivot = points.len() / 2;
    while pivot > 0 && points[pivot - 1].position.axis(axis) == points[pivot].position.axis(axis) {
        pivot -= 1;
    }

    let index = nodes.len() as u32;
    nodes.push(Node {
        position: points[pivot].position,
        vector: points[pivot].vector,
        left: None,
        right: None,
    });

    let (lower, rest) = points.split_at_mut(pivot);
    let upper = &mut rest[1..];
    let left = build_range(lower, depth + 1, nodes);
    let right = build_range(upper, depth + 1, nodes);
    let node = &mut nodes[index as usize];
    node.left = left;
    node.right = right;
    Some(index)
}
