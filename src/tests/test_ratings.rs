use crate::errors::RecommenderError;
use crate::ratings::{RatingMatrix, RatingRecord};

use super::test_helpers::example_ratings;

#[test]
fn test_records_shift_ids() {
    let records = vec![
        RatingRecord::new(1, 1, 5.0, 881250949),
        RatingRecord::new(1, 3, 3.0, 881250950),
        RatingRecord::new(3, 2, 4.0, 881250951),
    ];
    let r = RatingMatrix::from_records(&records).unwrap();
    assert_eq!(r.shape(), (3, 3));
    assert_eq!(r.nnz(), 3);
    assert_eq!(r.rating(0, 0), 5.0);
    assert_eq!(r.rating(0, 2), 3.0);
    assert_eq!(r.rating(2, 1), 4.0);
    assert!(!r.has_ratings(1));
}

#[test]
fn test_zero_external_id_rejected() {
    let err = RatingMatrix::from_records(&[RatingRecord::new(1, 0, 5.0, 0)]).unwrap_err();
    assert!(matches!(err, RecommenderError::InvalidId { what: "item", id: 0 }));
}

#[test]
fn test_accessors() {
    let r = example_ratings();
    assert_eq!(r.rated_items(0), vec![0, 2]);
    assert_eq!(r.rated_items(1), vec![0, 3]);
    assert_eq!(r.user_ratings(2), vec![(1, 5.0), (2, 4.0)]);
    assert_eq!(r.item_column(0), vec![(0, 5.0), (1, 4.0)]);
    assert!(r.item_column(1).len() == 1);
    assert_eq!(r.rating(2, 3), 0.0);
}

#[test]
fn test_triplet_validation() {
    assert!(matches!(
        RatingMatrix::from_triplets(2, 2, &[(2, 0, 1.0)]),
        Err(RecommenderError::OutOfRange { what: "user", .. })
    ));
    assert!(matches!(
        RatingMatrix::from_triplets(2, 2, &[(0, 0, f64::NAN)]),
        Err(RecommenderError::InvalidRating { .. })
    ));
    assert!(matches!(
        RatingMatrix::from_triplets(2, 2, &[(0, 1, -1.0)]),
        Err(RecommenderError::InvalidRating { .. })
    ));
    assert!(RatingMatrix::from_dense(&[vec![1.0, 2.0], vec![3.0]]).is_err());
}
