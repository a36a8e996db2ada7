use smartcore::linalg::basic::arrays::Array;

use crate::neighbourhood::{Neighbourhoods, SelfNeighbour};
use crate::ratings::RatingMatrix;
use crate::similarity::ItemSimilarity;

use super::test_helpers::{example_ratings, random_ratings};

#[test]
fn test_example_neighbourhoods() {
    let sim = ItemSimilarity::fit(&example_ratings());
    let nb = Neighbourhoods::build(&sim, 2, SelfNeighbour::Include);

    assert_eq!(nb.len(), 4);
    assert_eq!(nb.get(0), &[3, 0]);
    // items 0 and 3 both have similarity 0 to item 1: ascending index order is kept
    assert_eq!(nb.get(1), &[2, 1]);
    assert_eq!(nb.get(2), &[1, 2]);
    assert_eq!(nb.get(3), &[0, 3]);
    assert_eq!(nb.sorted(0), &[0, 3]);
}

#[test]
fn test_neighbourhood_length_is_min_k_n() {
    let ratings = random_ratings(5, 20, 8, 0.3);
    let sim = ItemSimilarity::fit(&ratings);
    for k in 1..=10 {
        let nb = Neighbourhoods::build(&sim, k, SelfNeighbour::Include);
        assert_eq!(nb.k(), k);
        for (i, nbrs) in nb.iter().enumerate() {
            assert_eq!(nbrs.len(), k.min(8), "item {i} with k={k}");
        }
    }
}

#[test]
fn test_self_is_included_for_rated_items() {
    let ratings = random_ratings(9, 30, 15, 0.3);
    let sim = ItemSimilarity::fit(&ratings);
    let nb = Neighbourhoods::build(&sim, 3, SelfNeighbour::Include);
    for i in 0..ratings.n_items() {
        if !ratings.item_column(i).is_empty() {
            assert!(nb.get(i).contains(&i), "item {i} missing from own neighbourhood");
        }
    }
}

#[test]
fn test_exclude_self() {
    let sim = ItemSimilarity::fit(&example_ratings());
    let nb = Neighbourhoods::build(&sim, 2, SelfNeighbour::Exclude);
    assert_eq!(nb.get(0), &[2, 3]);
    for i in 0..4 {
        assert!(!nb.get(i).contains(&i));
        assert_eq!(nb.get(i).len(), 2);
    }

    let full = Neighbourhoods::build(&sim, 10, SelfNeighbour::Exclude);
    assert!(full.iter().all(|n| n.len() == 3));
}

#[test]
fn test_neighbourhood_ordered_by_similarity() {
    let ratings = random_ratings(21, 30, 12, 0.35);
    let sim = ItemSimilarity::fit(&ratings);
    let nb = Neighbourhoods::build(&sim, 5, SelfNeighbour::Include);
    for i in 0..12 {
        let scores: Vec<f64> = nb.get(i).iter().map(|&j| *sim.get((i, j))).collect();
        assert!(scores.windows(2).all(|w| w[0] <= w[1]), "item {i}: {scores:?}");
    }
}

#[test]
fn test_cold_item_ties_keep_highest_indices() {
    let ratings = RatingMatrix::from_triplets(2, 4, &[(0, 0, 3.0), (1, 1, 4.0)]).unwrap();
    let sim = ItemSimilarity::fit(&ratings);
    let nb = Neighbourhoods::build(&sim, 2, SelfNeighbour::Include);
    // row of a cold item is all zeros
    assert_eq!(nb.get(3), &[2, 3]);
    assert_eq!(nb.get(2), &[2, 3]);
}
