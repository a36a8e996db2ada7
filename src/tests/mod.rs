
mod test_evaluation;
mod test_neighbourhood;
mod test_ratings;
