//! Neighbourhood-weighted rating prediction.
//!
//! For user `u` and item `i`, with `relevant = neighbours(i) ∩ rated(u)`:
//!
//! `pred[i] = Σ_{j∈relevant} R[u,j]·S[i,j] / Σ_{j∈relevant} S[i,j]`
//!
//! An empty `relevant`, a zero weight sum or any non-finite result yields 0.
//! Users are independent, so `predict_all` fans out over users with rayon.

use log::{debug, trace};
use rayon::prelude::*;
use smartcore::linalg::basic::arrays::{Array, Array2};
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::neighbourhood::{intersect_sorted, Neighbourhoods};
use crate::ratings::RatingMatrix;

/// Predicted rating of `user` for every item.
///
/// # Panics
///
/// Panics if `user` is out of bounds or if `sim` and `neighbourhoods` do not
/// match the item count of `ratings`.
pub fn predict_user(
    ratings: &RatingMatrix,
    sim: &DenseMatrix<f64>,
    neighbourhoods: &Neighbourhoods,
    user: usize,
) -> Vec<f64> {
    let n_items = ratings.n_items();
    assert_eq!(
        sim.shape(),
        (n_items, n_items),
        "similarity matrix does not match rating matrix"
    );
    assert_eq!(
        neighbourhoods.len(),
        n_items,
        "neighbourhoods do not match rating matrix"
    );

    let rated = ratings.rated_items(user);
    if rated.is_empty() {
        trace!("User {} has no ratings, predicting zeros", user);
        return vec![0.0; n_items];
    }

    (0..n_items)
        .map(|item| {
            let relevant = intersect_sorted(neighbourhoods.sorted(item), &rated);
            weighted_average(ratings, sim, user, item, &relevant)
        })
        .collect()
}

/// Similarity-weighted average of the user's ratings over `relevant`.
fn weighted_average(
    ratings: &RatingMatrix,
    sim: &DenseMatrix<f64>,
    user: usize,
    item: usize,
    relevant: &[usize],
) -> f64 {
    if relevant.is_empty() {
        return 0.0;
    }
    let (num, den) = relevant.iter().fold((0.0f64, 0.0f64), |(num, den), &j| {
        let w = *sim.get((item, j));
        (num + ratings.rating(user, j) * w, den + w)
    });
    if den == 0.0 {
        return 0.0;
    }
    finite_or_zero(num / den)
}

/// Replace NaN and infinities with 0.
#[inline]
pub fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}

/// Predictions for every user stacked into an `n_users × n_items` matrix.
pub fn predict_all(
    ratings: &RatingMatrix,
    sim: &DenseMatrix<f64>,
    neighbourhoods: &Neighbourhoods,
) -> DenseMatrix<f64> {
    let (n_users, n_items) = ratings.shape();
    debug!("Predicting {} users × {} items", n_users, n_items);

    let rows: Vec<Vec<f64>> = (0..n_users)
        .into_par_iter()
        .map(|user| predict_user(ratings, sim, neighbourhoods, user))
        .collect();

    DenseMatrix::from_iterator(rows.into_iter().flatten(), n_users, n_items, 0)
}
