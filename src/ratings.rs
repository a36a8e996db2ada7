//! RatingMatrix: owned sparse user × item rating store.
//!
//! Rows are users, columns are items, both 0-indexed. An absent entry means
//! "unrated", so a stored rating must be strictly positive: the rating scale
//! cannot contain 0 (e.g. ratings ∈ {1..5}).
//!
//! The matrix keeps two compressed layouts built from the same triplets:
//! - CSR (`sprs::CsMat`) for "rated items of user u" and O(log n) lookups
//! - CSC for item columns, used by the similarity engine
//!
//! # Examples
//!
//! ```
//! use itemknn::ratings::RatingMatrix;
//!
//! let r = RatingMatrix::from_triplets(2, 3, &[(0, 0, 5.0), (0, 2, 3.0), (1, 1, 4.0)]).unwrap();
//! assert_eq!(r.shape(), (2, 3));
//! assert_eq!(r.rated_items(0), vec![0, 2]);
//! assert_eq!(r.rating(1, 1), 4.0);
//! assert_eq!(r.rating(1, 0), 0.0);
//! ```

use std::collections::BTreeMap;

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use sprs::{CsMat, TriMat};

use crate::errors::{RecommenderError, Result};

/// One external rating record. `user` and `item` are 1-indexed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub user: usize,
    pub item: usize,
    pub rating: f64,
    pub timestamp: u64,
}

impl RatingRecord {
    pub fn new(user: usize, item: usize, rating: f64, timestamp: u64) -> Self {
        Self { user, item, rating, timestamp }
    }

    /// Shift the external 1-indexed ids to internal 0-indexed ones.
    pub fn zero_indexed(&self) -> Result<(usize, usize)> {
        if self.user == 0 {
            return Err(RecommenderError::InvalidId { what: "user", id: self.user });
        }
        if self.item == 0 {
            return Err(RecommenderError::InvalidId { what: "item", id: self.item });
        }
        Ok((self.user - 1, self.item - 1))
    }
}

#[derive(Clone, Debug)]
pub struct RatingMatrix {
    csr: CsMat<f64>,
    csc: CsMat<f64>,
}

impl RatingMatrix {
    /// Builds from 0-indexed `(user, item, rating)` triplets.
    ///
    /// A repeated `(user, item)` keeps the last rating seen.
    pub fn from_triplets(
        n_users: usize,
        n_items: usize,
        triplets: &[(usize, usize, f64)],
    ) -> Result<Self> {
        debug!(
            "Building rating matrix {}×{} from {} triplets",
            n_users,
            n_items,
            triplets.len()
        );

        // sprs sums duplicated triplets, so dedupe first (last write wins)
        let mut entries: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        for &(user, item, rating) in triplets {
            if user >= n_users {
                return Err(RecommenderError::user_out_of_range(user, n_users));
            }
            if item >= n_items {
                return Err(RecommenderError::item_out_of_range(item, n_items));
            }
            if !rating.is_finite() || rating <= 0.0 {
                return Err(RecommenderError::InvalidRating { user, item, rating });
            }
            if entries.insert((user, item), rating).is_some() {
                trace!("Overwriting duplicate rating for ({}, {})", user, item);
            }
        }

        let mut tri: TriMat<f64> = TriMat::new((n_users, n_items));
        for (&(user, item), &rating) in entries.iter() {
            tri.add_triplet(user, item, rating);
        }

        let csr: CsMat<f64> = tri.to_csr();
        let csc: CsMat<f64> = tri.to_csc();

        info!(
            "Rating matrix ready: {} users, {} items, {} ratings",
            n_users,
            n_items,
            csr.nnz()
        );
        Ok(Self { csr, csc })
    }

    /// Builds from external records, shifting ids by one.
    ///
    /// The shape is `(max user id, max item id)`.
    pub fn from_records(records: &[RatingRecord]) -> Result<Self> {
        let mut triplets = Vec::with_capacity(records.len());
        let (mut n_users, mut n_items) = (0usize, 0usize);
        for record in records {
            let (user, item) = record.zero_indexed()?;
            n_users = n_users.max(user + 1);
            n_items = n_items.max(item + 1);
            triplets.push((user, item, record.rating));
        }
        Self::from_triplets(n_users, n_items, &triplets)
    }

    /// Builds from dense rows, zeros meaning "unrated".
    pub fn from_dense(rows: &[Vec<f64>]) -> Result<Self> {
        let n_users = rows.len();
        let n_items = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut triplets = Vec::new();
        for (user, row) in rows.iter().enumerate() {
            if row.len() != n_items {
                return Err(RecommenderError::InvalidHyperparameter {
                    param: "rows",
                    value: format!("row {} has {} columns", user, row.len()),
                    constraint: "all rows must have the same length",
                });
            }
            triplets.extend(
                row.iter()
                    .enumerate()
                    .filter(|(_, r)| **r != 0.0)
                    .map(|(item, &r)| (user, item, r)),
            );
        }
        Self::from_triplets(n_users, n_items, &triplets)
    }

    #[inline]
    pub fn n_users(&self) -> usize {
        self.csr.rows()
    }

    #[inline]
    pub fn n_items(&self) -> usize {
        self.csr.cols()
    }

    /// Returns (n_users, n_items).
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_users(), self.n_items())
    }

    /// Number of stored ratings.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.csr.nnz()
    }

    /// Items rated by `user`, ascending and without duplicates.
    ///
    /// # Panics
    ///
    /// Panics if `user >= n_users`.
    pub fn rated_items(&self, user: usize) -> Vec<usize> {
        self.row_view(user).indices().to_vec()
    }

    /// `(item, rating)` pairs for `user`, ascending by item.
    ///
    /// # Panics
    ///
    /// Panics if `user >= n_users`.
    pub fn user_ratings(&self, user: usize) -> Vec<(usize, f64)> {
        self.row_view(user).iter().map(|(i, &r)| (i, r)).collect()
    }

    /// `(user, rating)` pairs for `item`, ascending by user.
    ///
    /// # Panics
    ///
    /// Panics if `item >= n_items`.
    pub fn item_column(&self, item: usize) -> Vec<(usize, f64)> {
        let col = self
            .csc
            .outer_view(item)
            .unwrap_or_else(|| panic!("item index {} out of bounds ({})", item, self.n_items()));
        col.iter().map(|(u, &r)| (u, r)).collect()
    }

    /// Rating of `user` for `item`, 0.0 when unrated.
    #[inline]
    pub fn rating(&self, user: usize, item: usize) -> f64 {
        self.csr.get(user, item).copied().unwrap_or(0.0)
    }

    /// Whether `user` rated anything.
    pub fn has_ratings(&self, user: usize) -> bool {
        self.row_view(user).nnz() > 0
    }

    pub(crate) fn csr(&self) -> &CsMat<f64> {
        &self.csr
    }

    pub(crate) fn csc(&self) -> &CsMat<f64> {
        &self.csc
    }

    fn row_view(&self, user: usize) -> sprs::CsVecView<'_, f64> {
        self.csr
            .outer_view(user)
            .unwrap_or_else(|| panic!("user index {} out of bounds ({})", user, self.n_users()))
    }
}
