//! Held-out evaluation: RMSE of predictions against true ratings.
//!
//! Predicted/true pairs are built by a joint lookup keyed on `(user, item)`,
//! walking the test set in key order, so the two sides can never drift apart.
//! Test keys outside the prediction matrix are rejected.

use std::collections::BTreeMap;

use log::{debug, info};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::errors::{RecommenderError, Result};
use crate::predictor::finite_or_zero;
use crate::ratings::RatingRecord;

/// Held-out `(user, item) → rating`, 0-indexed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TestSet {
    ratings: BTreeMap<(usize, usize), f64>,
}

impl TestSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a 0-indexed test rating.
    ///
    /// Repeating a pair with the same rating is a no-op; with a different
    /// rating it is a `DuplicatePair` error.
    pub fn insert(&mut self, user: usize, item: usize, rating: f64) -> Result<()> {
        match self.ratings.get(&(user, item)) {
            Some(&first) if first != rating => Err(RecommenderError::DuplicatePair {
                user,
                item,
                first,
                second: rating,
            }),
            Some(_) => Ok(()),
            None => {
                self.ratings.insert((user, item), rating);
                Ok(())
            }
        }
    }

    /// Build from 0-indexed `(user, item, rating)` triples.
    pub fn from_triplets(triplets: &[(usize, usize, f64)]) -> Result<Self> {
        let mut test = Self::new();
        for &(user, item, rating) in triplets {
            test.insert(user, item, rating)?;
        }
        Ok(test)
    }

    /// Build from external records, shifting 1-indexed ids.
    pub fn from_records(records: &[RatingRecord]) -> Result<Self> {
        let mut test = Self::new();
        for record in records {
            let (user, item) = record.zero_indexed()?;
            test.insert(user, item, record.rating)?;
        }
        Ok(test)
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// True rating for a pair, if held out.
    pub fn get(&self, user: usize, item: usize) -> Option<f64> {
        self.ratings.get(&(user, item)).copied()
    }

    /// `((user, item), rating)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        self.ratings.iter().map(|(&k, &v)| (k, v))
    }
}

/// Root-mean-squared error over `(predicted, true)` pairs.
///
/// ```
/// use itemknn::evaluation::rmse;
///
/// assert_eq!(rmse(&[(3.0, 3.0), (4.0, 4.0)]), 0.0);
/// assert!((rmse(&[(1.0, 3.0), (5.0, 3.0)]) - 2.0).abs() < 1e-12);
/// ```
pub fn rmse(pairs: &[(f64, f64)]) -> f64 {
    if pairs.is_empty() {
        return 0.0;
    }
    let mse = pairs
        .iter()
        .map(|&(pred, truth)| (truth - pred).powi(2))
        .sum::<f64>()
        / pairs.len() as f64;
    mse.sqrt()
}

/// Join each test rating with its prediction.
///
/// Non-finite predictions become 0.
pub fn matched_pairs(test: &TestSet, predictions: &DenseMatrix<f64>) -> Result<Vec<(f64, f64)>> {
    let (n_users, n_items) = predictions.shape();
    test.iter()
        .map(|((user, item), truth)| {
            if user >= n_users {
                return Err(RecommenderError::user_out_of_range(user, n_users));
            }
            if item >= n_items {
                return Err(RecommenderError::item_out_of_range(item, n_items));
            }
            let pred = finite_or_zero(*predictions.get((user, item)));
            Ok((pred, truth))
        })
        .collect()
}

/// RMSE of `predictions` (`n_users × n_items`) against `test`.
pub fn evaluate(test: &TestSet, predictions: &DenseMatrix<f64>) -> Result<f64> {
    if test.is_empty() {
        return Err(RecommenderError::EmptyTestSet);
    }
    let pairs = matched_pairs(test, predictions)?;
    debug!("Matched {} test ratings against predictions", pairs.len());
    let score = rmse(&pairs);
    info!("RMSE over {} held-out ratings: {:.6}", pairs.len(), score);
    Ok(score)
}
