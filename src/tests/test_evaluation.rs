use approx::assert_relative_eq;
use smartcore::linalg::basic::arrays::Array2;
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::errors::RecommenderError;
use crate::evaluation::{evaluate, matched_pairs, rmse, TestSet};
use crate::ratings::RatingRecord;

fn predictions() -> DenseMatrix<f64> {
    // 2 users × 3 items
    DenseMatrix::from_iterator(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0].into_iter(), 2, 3, 0)
}

#[test]
fn test_exact_predictions_give_zero() {
    let test = TestSet::from_triplets(&[(0, 1, 2.0), (1, 2, 6.0), (1, 0, 4.0)]).unwrap();
    assert_eq!(evaluate(&test, &predictions()).unwrap(), 0.0);
}

#[test]
fn test_known_rmse() {
    // errors 1 and 2 -> sqrt((1 + 4) / 2)
    let test = TestSet::from_triplets(&[(0, 0, 2.0), (1, 1, 7.0)]).unwrap();
    assert_relative_eq!(
        evaluate(&test, &predictions()).unwrap(),
        (2.5f64).sqrt(),
        epsilon = 1e-12
    );
}

#[test]
fn test_rmse_grows_with_error() {
    let mut last = -1.0;
    for truth in [1.0, 1.5, 2.5, 4.0, 8.0] {
        let test = TestSet::from_triplets(&[(0, 0, truth), (1, 1, 5.0)]).unwrap();
        let score = evaluate(&test, &predictions()).unwrap();
        assert!(score >= 0.0);
        assert!(score >= last, "{score} < {last}");
        last = score;
    }
}

#[test]
fn test_pairs_are_joined_by_key() {
    // insertion order differs from key order; each truth still meets its own prediction
    let test = TestSet::from_triplets(&[(1, 2, 6.0), (0, 0, 1.0), (1, 0, 4.0)]).unwrap();
    let pairs = matched_pairs(&test, &predictions()).unwrap();
    assert_eq!(pairs, vec![(1.0, 1.0), (4.0, 4.0), (6.0, 6.0)]);
}

#[test]
fn test_non_finite_prediction_counts_as_zero() {
    let preds = DenseMatrix::from_iterator(vec![f64::NAN, 2.0].into_iter(), 1, 2, 0);
    let test = TestSet::from_triplets(&[(0, 0, 3.0)]).unwrap();
    assert_relative_eq!(evaluate(&test, &preds).unwrap(), 3.0, epsilon = 1e-12);
}

#[test]
fn test_out_of_range_pairs_are_rejected() {
    let test = TestSet::from_triplets(&[(2, 0, 3.0)]).unwrap();
    assert!(matches!(
        evaluate(&test, &predictions()),
        Err(RecommenderError::OutOfRange { what: "user", id: 2, bound: 2 })
    ));
    let test = TestSet::from_triplets(&[(0, 3, 3.0)]).unwrap();
    assert!(matches!(
        evaluate(&test, &predictions()),
        Err(RecommenderError::OutOfRange { what: "item", id: 3, bound: 3 })
    ));
}

#[test]
fn test_duplicates_and_empty_sets() {
    let same = TestSet::from_triplets(&[(0, 0, 3.0), (0, 0, 3.0)]).unwrap();
    assert_eq!(same.len(), 1);

    assert!(matches!(
        TestSet::from_triplets(&[(0, 0, 3.0), (0, 0, 4.0)]),
        Err(RecommenderError::DuplicatePair { user: 0, item: 0, .. })
    ));

    assert!(matches!(
        evaluate(&TestSet::new(), &predictions()),
        Err(RecommenderError::EmptyTestSet)
    ));
    assert_eq!(rmse(&[]), 0.0);
}

#[test]
fn test_records_are_shifted() {
    let test = TestSet::from_records(&[
        RatingRecord::new(1, 1, 4.0, 0),
        RatingRecord::new(2, 3, 5.0, 0),
    ])
    .unwrap();
    assert_eq!(test.get(0, 0), Some(4.0));
    assert_eq!(test.get(1, 2), Some(5.0));

    assert!(matches!(
        TestSet::from_records(&[RatingRecord::new(0, 1, 4.0, 0)]),
        Err(RecommenderError::InvalidId { what: "user", .. })
    ));
}
