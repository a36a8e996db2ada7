//! ItemItemRecommender: fit once, then predict, rank and evaluate.
//!
//! ```
//! use itemknn::ratings::RatingMatrix;
//! use itemknn::recommender::ItemItemRecommender;
//!
//! let ratings = RatingMatrix::from_dense(&[
//!     vec![5.0, 0.0, 3.0, 0.0],
//!     vec![4.0, 0.0, 0.0, 2.0],
//!     vec![0.0, 5.0, 4.0, 0.0],
//! ])
//! .unwrap();
//!
//! let mut rec = ItemItemRecommender::new(2);
//! rec.fit(ratings).unwrap();
//!
//! let preds = rec.predict_one(0).unwrap();
//! assert_eq!(preds.len(), 4);
//!
//! // unrated items only, best last
//! let top = rec.top_n(0, 2).unwrap();
//! assert_eq!(top, vec![1, 3]);
//! ```

use std::time::Instant;

use log::{debug, info, warn};
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::builder::RecommenderConfig;
use crate::errors::{RecommenderError, Result};
use crate::evaluation::{self, TestSet};
use crate::neighbourhood::Neighbourhoods;
use crate::predictor;
use crate::ratings::RatingMatrix;
use crate::similarity::ItemSimilarity;

/// State produced by `fit`; immutable until the next fit.
#[derive(Clone, Debug)]
struct FittedModel {
    ratings: RatingMatrix,
    similarity: DenseMatrix<f64>,
    neighbourhoods: Neighbourhoods,
}

#[derive(Clone, Debug)]
pub struct ItemItemRecommender {
    config: RecommenderConfig,
    model: Option<FittedModel>,
}

impl ItemItemRecommender {
    /// Unfitted recommender keeping `neighbourhood_size` neighbours per item.
    pub fn new(neighbourhood_size: usize) -> Self {
        Self::from_config(RecommenderConfig {
            neighbourhood_size,
            ..RecommenderConfig::default()
        })
    }

    pub fn from_config(config: RecommenderConfig) -> Self {
        Self { config, model: None }
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    /// Compute the similarity matrix and neighbourhoods for `ratings`.
    ///
    /// Replaces any previous fit. A neighbourhood size larger than the item
    /// count is clamped.
    pub fn fit(&mut self, ratings: RatingMatrix) -> Result<()> {
        self.config.validate()?;
        let (n_users, n_items) = ratings.shape();
        if n_users == 0 || n_items == 0 {
            return Err(RecommenderError::EmptyMatrix { n_users, n_items });
        }

        let mut k = self.config.neighbourhood_size;
        if k > n_items {
            warn!(
                "neighbourhood_size {} exceeds item count {}, clamping",
                k, n_items
            );
            k = n_items;
        }

        info!(
            "Fitting item-item recommender: {} users, {} items, k={}",
            n_users, n_items, k
        );
        let start = Instant::now();
        let similarity = ItemSimilarity::fit(&ratings);
        let neighbourhoods = Neighbourhoods::build(&similarity, k, self.config.self_neighbour);
        info!("Fit completed in {:.3?}", start.elapsed());

        self.model = Some(FittedModel {
            ratings,
            similarity,
            neighbourhoods,
        });
        Ok(())
    }

    fn model(&self, op: &'static str) -> Result<&FittedModel> {
        self.model.as_ref().ok_or(RecommenderError::NotFitted(op))
    }

    fn checked_user(&self, op: &'static str, user: usize) -> Result<&FittedModel> {
        let model = self.model(op)?;
        let n_users = model.ratings.n_users();
        if user >= n_users {
            return Err(RecommenderError::user_out_of_range(user, n_users));
        }
        Ok(model)
    }

    pub fn similarity(&self) -> Result<&DenseMatrix<f64>> {
        Ok(&self.model("similarity")?.similarity)
    }

    pub fn neighbourhoods(&self) -> Result<&Neighbourhoods> {
        Ok(&self.model("neighbourhoods")?.neighbourhoods)
    }

    pub fn ratings(&self) -> Result<&RatingMatrix> {
        Ok(&self.model("ratings")?.ratings)
    }

    pub fn n_users(&self) -> Result<usize> {
        Ok(self.model("n_users")?.ratings.n_users())
    }

    pub fn n_items(&self) -> Result<usize> {
        Ok(self.model("n_items")?.ratings.n_items())
    }

    /// Items already rated by `user`, ascending.
    pub fn rated_items(&self, user: usize) -> Result<Vec<usize>> {
        let model = self.checked_user("rated_items", user)?;
        Ok(model.ratings.rated_items(user))
    }

    /// Predicted rating of `user` for every item; 0 where no neighbour data exists.
    pub fn predict_one(&self, user: usize) -> Result<Vec<f64>> {
        let model = self.checked_user("predict_one", user)?;
        let start = Instant::now();
        let preds = predictor::predict_user(
            &model.ratings,
            &model.similarity,
            &model.neighbourhoods,
            user,
        );
        info!("Predicted user {} in {:.3?}", user, start.elapsed());
        Ok(preds)
    }

    /// Predictions for every user as an `n_users × n_items` matrix.
    pub fn predict_all(&self) -> Result<DenseMatrix<f64>> {
        let model = self.model("predict_all")?;
        let start = Instant::now();
        let preds = predictor::predict_all(&model.ratings, &model.similarity, &model.neighbourhoods);
        info!(
            "Predicted {} users in {:.3?}",
            model.ratings.n_users(),
            start.elapsed()
        );
        Ok(preds)
    }

    /// Up to `n` unrated items for `user`, ascending by predicted rating (best last).
    ///
    /// Items are stably sorted, so equal predictions keep ascending index
    /// order and the highest indices among ties are the ones returned. When
    /// fewer than `n` unrated items exist all of them are returned.
    pub fn top_n(&self, user: usize, n: usize) -> Result<Vec<usize>> {
        let preds = self.predict_one(user)?;
        let rated = self.rated_items(user)?;

        let mut order: Vec<usize> = (0..preds.len()).collect();
        order.sort_by(|&a, &b| {
            preds[a]
                .partial_cmp(&preds[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let mut unrated: Vec<usize> = order
            .into_iter()
            .filter(|item| rated.binary_search(item).is_err())
            .collect();

        let start = unrated.len().saturating_sub(n);
        let top = unrated.split_off(start);
        debug!("Top {} for user {}: {:?}", n, user, top);
        Ok(top)
    }

    /// `top_n` on external 1-indexed ids: takes a user id, returns item ids.
    pub fn top_n_ids(&self, user_id: usize, n: usize) -> Result<Vec<usize>> {
        if user_id == 0 {
            return Err(RecommenderError::InvalidId { what: "user", id: user_id });
        }
        Ok(self
            .top_n(user_id - 1, n)?
            .into_iter()
            .map(|item| item + 1)
            .collect())
    }

    /// RMSE of this model's predictions against held-out ratings.
    pub fn evaluate(&self, test: &TestSet) -> Result<f64> {
        self.model("evaluate")?;
        let preds = self.predict_all()?;
        evaluation::evaluate(test, &preds)
    }
}
