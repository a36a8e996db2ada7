//! Fixed-size similarity neighbourhoods per item.
//!
//! For every row of the similarity matrix the item indices are stably sorted by
//! similarity ascending (equal similarities keep ascending index order) and the
//! last `k` are kept, so the most similar neighbour comes last.
//!
//! Self-similarity is maximal, so with `SelfNeighbour::Include` an item always
//! sits in its own neighbourhood and a user's own rating of an item takes part
//! in predicting it. `SelfNeighbour::Exclude` drops the item before the cut.

use log::{debug, info, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::arrays::{Array, Array2};
use smartcore::linalg::basic::matrix::DenseMatrix;

/// Whether an item may appear in its own neighbourhood.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SelfNeighbour {
    #[default]
    Include,
    Exclude,
}

/// Per-item neighbour lists derived from a similarity matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Neighbourhoods {
    k: usize,
    // ascending by similarity, most similar last
    ordered: Vec<Vec<usize>>,
    // same members, ascending by index, for merge intersection
    by_index: Vec<Vec<usize>>,
}

impl Neighbourhoods {
    /// Build the neighbourhoods of every item in `sim`.
    ///
    /// `k` is clamped to the number of candidates available per item.
    ///
    /// # Panics
    ///
    /// Panics if `sim` is not square.
    pub fn build(sim: &DenseMatrix<f64>, k: usize, self_neighbour: SelfNeighbour) -> Self {
        let (n, m) = sim.shape();
        assert_eq!(n, m, "similarity matrix must be square: ({}, {})", n, m);
        info!(
            "Selecting {} neighbours for {} items ({:?})",
            k, n, self_neighbour
        );

        let ordered: Vec<Vec<usize>> = (0..n)
            .into_par_iter()
            .map(|i| {
                let row: Vec<f64> = sim.get_row(i).iterator(0).copied().collect();
                let mut idx: Vec<usize> = match self_neighbour {
                    SelfNeighbour::Include => (0..n).collect(),
                    SelfNeighbour::Exclude => (0..n).filter(|&j| j != i).collect(),
                };
                // stable: ties keep ascending index order
                idx.sort_by(|&a, &b| {
                    row[a]
                        .partial_cmp(&row[b])
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
                let keep = k.min(idx.len());
                let top = idx.split_off(idx.len() - keep);
                trace!("Item {} neighbours: {:?}", i, top);
                top
            })
            .collect();

        let by_index: Vec<Vec<usize>> = ordered
            .par_iter()
            .map(|nbrs| {
                let mut sorted = nbrs.clone();
                sorted.sort_unstable();
                sorted
            })
            .collect();

        debug!(
            "Neighbourhoods built: {} items, {} neighbours each",
            ordered.len(),
            ordered.first().map(|v| v.len()).unwrap_or(0)
        );
        Self { k, ordered, by_index }
    }

    /// Neighbours of `item`, ascending by similarity (most similar last).
    #[inline]
    pub fn get(&self, item: usize) -> &[usize] {
        &self.ordered[item]
    }

    /// Neighbours of `item`, ascending by index.
    #[inline]
    pub fn sorted(&self, item: usize) -> &[usize] {
        &self.by_index[item]
    }

    /// Number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Requested neighbourhood size (before clamping).
    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vec<usize>> {
        self.ordered.iter()
    }
}

/// Intersection of two ascending, duplicate-free index lists.
pub fn intersect_sorted(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut ia, mut ib) = (0, 0);
    while ia < a.len() && ib < b.len() {
        match a[ia].cmp(&b[ib]) {
            std::cmp::Ordering::Less => ia += 1,
            std::cmp::Ordering::Greater => ib += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[ia]);
                ia += 1;
                ib += 1;
            }
        }
    }
    out
}
