//! k-nearest-neighbor graph over placed presences.
//!
//! Brute force: O(n²) distance evaluations with a partial selection per
//! point. Populations are capped at a few hundred, where this stays well
//! inside a frame budget without a spatial index.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::vec3::Vec3;

/// Undirected edge between two point indices, `a < b`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NeighborEdge {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
}

impl NeighborEdge {
    /// Orders the endpoints so `(i, j)` and `(j, i)` build the same edge.
    pub fn new(i: usize, j: usize, distance: f64) -> Self {
        Self {
            a: i.min(j),
            b: i.max(j),
            distance,
        }
    }

    pub fn key(&self) -> (usize, usize) {
        (self.a, self.b)
    }
}

/// Nearest first; equal distances fall back to the lower index.
fn by_distance(a: &(f64, usize), b: &(f64, usize)) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.cmp(&b.1))
}

/// For each point, the indices of its `min(k, n-1)` nearest other points,
/// nearest first.
pub fn k_nearest(points: &[Vec3], k: usize) -> Vec<Vec<usize>> {
    let n = points.len();
    let k = k.min(n.saturating_sub(1));
    if k == 0 {
        return vec![Vec::new(); n];
    }

    let mut candidates: Vec<(f64, usize)> = Vec::with_capacity(n - 1);
    points
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            candidates.clear();
            candidates.extend(
                points
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(j, &q)| (p.distance_squared(q), j)),
            );
            if k < candidates.len() {
                candidates.select_nth_unstable_by(k - 1, by_distance);
                candidates.truncate(k);
            }
            candidates.sort_unstable_by(by_distance);
            candidates.iter().map(|&(_, j)| j).collect::<Vec<usize>>()
        })
        .collect()
}

/// Deduplicated k-nearest edges, ordered by `(a, b)`.
pub fn edges(points: &[Vec3], k: usize) -> Vec<NeighborEdge> {
    edges_from_lists(points, &k_nearest(points, k), None)
}

/// Like [`edges`], dropping any edge longer than `max_length`.
pub fn edges_within(points: &[Vec3], k: usize, max_length: f64) -> Vec<NeighborEdge> {
    edges_from_lists(points, &k_nearest(points, k), Some(max_length))
}

pub(crate) fn edges_from_lists(
    points: &[Vec3],
    lists: &[Vec<usize>],
    max_length: Option<f64>,
) -> Vec<NeighborEdge> {
    let mut unique: BTreeMap<(usize, usize), NeighborEdge> = BTreeMap::new();
    for (i, neighbors) in lists.iter().enumerate() {
        for &j in neighbors {
            let edge = NeighborEdge::new(i, j, points[i].distance(points[j]));
            if max_length.is_some_and(|max| edge.distance > max) {
                continue;
            }
            unique.entry(edge.key()).or_insert(edge);
        }
    }
    unique.into_values().collect()
}
