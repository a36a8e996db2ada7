//! Item-item cosine similarity over the columns of a rating matrix.
//!
//! - `S[i,j] = (col_i · col_j) / (‖col_i‖ · ‖col_j‖)`
//! - A zero-norm (cold) column has similarity 0 against every column, itself included
//! - `S[i,i] = 1` exactly for any column with at least one rating
//! - Rows are computed in parallel; each row accumulates the products of
//!   co-rating users in ascending user order, so `S[i,j]` and `S[j,i]` are
//!   produced by the same float operations and the matrix is exactly symmetric
//!
//! Complexity: O(Σ_u deg(u)²) for the co-rating products plus O(n_items²) to
//! fill the dense output.

use log::{debug, info, trace};
use rayon::prelude::*;
use smartcore::linalg::basic::arrays::{Array, Array2};
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::ratings::RatingMatrix;

/// Computes the Euclidean norm (L2) without allocating.
#[inline]
pub fn norm(a: &[f64]) -> f64 {
    a.iter().map(|&x| x * x).sum::<f64>().sqrt()
}

/// Cosine similarity of two sparse vectors given as ascending `(index, value)` pairs.
///
/// Returns 0.0 if either vector has zero norm.
///
/// ```
/// use itemknn::similarity::cosine_similarity;
///
/// let a = [(0, 1.0), (2, 1.0)];
/// let b = [(2, 3.0)];
/// let s = cosine_similarity(&a, &b);
/// assert!((s - 1.0 / 2f64.sqrt()).abs() < 1e-12);
/// assert_eq!(cosine_similarity(&a, &[]), 0.0);
/// ```
pub fn cosine_similarity(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let na = a.iter().map(|&(_, x)| x * x).sum::<f64>().sqrt();
    let nb = b.iter().map(|&(_, x)| x * x).sum::<f64>().sqrt();
    let denom = na * nb;
    if denom > 0.0 {
        (sparse_dot(a, b) / denom).clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Dot product of two ascending sparse vectors by merge.
fn sparse_dot(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let (mut ia, mut ib) = (0, 0);
    let mut dot = 0.0;
    while ia < a.len() && ib < b.len() {
        match a[ia].0.cmp(&b[ib].0) {
            std::cmp::Ordering::Less => ia += 1,
            std::cmp::Ordering::Greater => ib += 1,
            std::cmp::Ordering::Equal => {
                dot += a[ia].1 * b[ib].1;
                ia += 1;
                ib += 1;
            }
        }
    }
    dot
}

/// Item-item similarity engine.
pub struct ItemSimilarity;

impl ItemSimilarity {
    /// Build the dense `n_items × n_items` cosine similarity matrix.
    pub fn fit(ratings: &RatingMatrix) -> DenseMatrix<f64> {
        let n_items = ratings.n_items();
        info!(
            "Computing item-item cosine similarity for {} items over {} users",
            n_items,
            ratings.n_users()
        );

        let csr = ratings.csr();
        let csc = ratings.csc();

        let norms: Vec<f64> = csc
            .outer_iterator()
            .map(|col| norm(col.data()))
            .collect();
        let cold = norms.iter().filter(|&&n| n == 0.0).count();
        if cold > 0 {
            debug!("{} cold item columns get zero similarity", cold);
        }

        let rows: Vec<Vec<f64>> = (0..n_items)
            .into_par_iter()
            .map(|i| {
                let mut row = vec![0.0f64; n_items];
                if norms[i] == 0.0 {
                    return row;
                }

                // co-rating dot products against every other column
                let mut dots = vec![0.0f64; n_items];
                if let Some(col) = csc.outer_view(i) {
                    for (user, &r_ui) in col.iter() {
                        if let Some(user_row) = csr.outer_view(user) {
                            for (j, &r_uj) in user_row.iter() {
                                dots[j] += r_ui * r_uj;
                            }
                        }
                    }
                }

                for j in 0..n_items {
                    if j == i {
                        row[j] = 1.0;
                    } else if norms[j] > 0.0 {
                        row[j] = (dots[j] / (norms[i] * norms[j])).clamp(-1.0, 1.0);
                    }
                }
                trace!("Similarity row {} done", i);
                row
            })
            .collect();

        let sim = DenseMatrix::from_iterator(rows.into_iter().flatten(), n_items, n_items, 0);

        let (min, max) = sim
            .iterator(0)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        debug!(
            "Similarity matrix {:?}: min {:.6}, max {:.6}",
            sim.shape(),
            min,
            max
        );
        sim
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_dot_disjoint() {
        assert_eq!(sparse_dot(&[(0, 2.0)], &[(1, 3.0)]), 0.0);
    }

    #[test]
    fn test_cosine_parallel_vectors() {
        let a = [(1, 2.0), (3, 4.0)];
        let b = [(1, 1.0), (3, 2.0)];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-12);
    }
}
