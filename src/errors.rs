//! Error type shared by every stage of the pipeline.
//!
//! Undefined predictions (empty neighbour intersection, zero weight sum) and
//! degenerate item columns are not errors: they resolve to 0 locally.

use std::path::PathBuf;

/// Errors returned by the rating store, recommender and evaluator.
#[derive(Debug, thiserror::Error)]
pub enum RecommenderError {
    #[error("recommender has not been fitted: call `fit` before `{0}`")]
    NotFitted(&'static str),
    #[error("{what} id {id} is out of range (bound {bound})")]
    OutOfRange {
        what: &'static str,
        id: usize,
        bound: usize,
    },
    #[error("invalid hyperparameter {param} = {value}: {constraint}")]
    InvalidHyperparameter {
        param: &'static str,
        value: String,
        constraint: &'static str,
    },
    #[error("invalid external {what} id {id}: external ids start at 1")]
    InvalidId { what: &'static str, id: usize },
    #[error("invalid rating {rating} for (user {user}, item {item}): ratings must be finite and > 0")]
    InvalidRating { user: usize, item: usize, rating: f64 },
    #[error("conflicting test ratings for (user {user}, item {item}): {first} vs {second}")]
    DuplicatePair {
        user: usize,
        item: usize,
        first: f64,
        second: f64,
    },
    #[error("rating matrix is empty: shape ({n_users}, {n_items})")]
    EmptyMatrix { n_users: usize, n_items: usize },
    #[error("test set is empty")]
    EmptyTestSet,
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, RecommenderError>;

impl RecommenderError {
    pub(crate) fn user_out_of_range(id: usize, bound: usize) -> Self {
        RecommenderError::OutOfRange { what: "user", id, bound }
    }

    pub(crate) fn item_out_of_range(id: usize, bound: usize) -> Self {
        RecommenderError::OutOfRange { what: "item", id, bound }
    }
}
