//! Fit an item-item recommender on a ratings file and print predictions and
//! recommendations.
//!
//! ```text
//! RUST_LOG=info cargo run --release --example recommend_movies -- data/ratings
//! ```
//!
//! The file holds one `user item rating timestamp` record per line (tab or
//! space separated, 1-indexed ids).
use itemknn::builder::ItemItemBuilder;
use itemknn::errors::Result;
use itemknn::loader::load_ratings;
use itemknn::ratings::RatingMatrix;

fn main() -> Result<()> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/ratings".to_string());

    let records = load_ratings(&path)?;
    let ratings = RatingMatrix::from_records(&records)?;

    let rec = ItemItemBuilder::new()
        .with_neighbourhood_size(75)
        .fit(ratings)?;

    // predicted ratings of internal user 1 on the first 100 items
    let preds = rec.predict_one(1)?;
    println!("{:?}", &preds[..preds.len().min(100)]);

    println!("{:?}", rec.top_n(2, 20)?);
    Ok(())
}
