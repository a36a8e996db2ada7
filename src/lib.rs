//! # itemknn
//!
//! Item-item collaborative filtering over a sparse user × item rating matrix.
//!
//! Pipeline:
//! 1. `ratings`: owned sparse rating store (CSR + CSC), 0 means unrated
//! 2. `similarity`: dense item-item cosine similarity
//! 3. `neighbourhood`: the K most similar items per item
//! 4. `predictor`: similarity-weighted average over neighbours the user rated
//! 5. `recommender`: fitted model, predictions and top-N lists
//! 6. `evaluation`: RMSE against held-out ratings
//!
//! ```
//! use itemknn::builder::ItemItemBuilder;
//! use itemknn::evaluation::TestSet;
//! use itemknn::ratings::RatingMatrix;
//!
//! let ratings = RatingMatrix::from_dense(&[
//!     vec![5.0, 0.0, 3.0, 0.0],
//!     vec![4.0, 0.0, 0.0, 2.0],
//!     vec![0.0, 5.0, 4.0, 0.0],
//! ])
//! .unwrap();
//!
//! let rec = ItemItemBuilder::new()
//!     .with_neighbourhood_size(2)
//!     .fit(ratings)
//!     .unwrap();
//!
//! let test = TestSet::from_triplets(&[(0, 0, 5.0), (2, 2, 4.0)]).unwrap();
//! let score = rec.evaluate(&test).unwrap();
//! assert!(score >= 0.0);
//! ```

pub mod builder;
pub mod errors;
pub mod evaluation;
pub mod loader;
pub mod neighbourhood;
pub mod predictor;
pub mod ratings;
pub mod recommender;
pub mod similarity;

#[cfg(test)]
mod tests;
