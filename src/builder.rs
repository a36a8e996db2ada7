use serde::{Deserialize, Serialize};

use crate::errors::{RecommenderError, Result};
use crate::neighbourhood::SelfNeighbour;
use crate::ratings::RatingMatrix;
use crate::recommender::ItemItemRecommender;

use log::{debug, info};

/// Neighbourhood size used when none is configured.
pub const DEFAULT_NEIGHBOURHOOD_SIZE: usize = 75;

/// Fit-time configuration of an item-item recommender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommenderConfig {
    /// Number of most-similar items kept per item (K >= 1).
    pub neighbourhood_size: usize,
    /// Whether an item may appear in its own neighbourhood.
    #[serde(default)]
    pub self_neighbour: SelfNeighbour,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            neighbourhood_size: DEFAULT_NEIGHBOURHOOD_SIZE,
            self_neighbour: SelfNeighbour::Include,
        }
    }
}

impl RecommenderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.neighbourhood_size == 0 {
            return Err(RecommenderError::InvalidHyperparameter {
                param: "neighbourhood_size",
                value: self.neighbourhood_size.to_string(),
                constraint: "must be >= 1",
            });
        }
        Ok(())
    }
}

pub struct ItemItemBuilder {
    config: RecommenderConfig,
}

impl Default for ItemItemBuilder {
    fn default() -> Self {
        debug!("Creating ItemItemBuilder with default parameters");
        Self {
            config: RecommenderConfig::default(),
        }
    }
}

impl ItemItemBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: RecommenderConfig) -> Self {
        Self { config }
    }

    /// Number of neighbours kept per item. Values above the item count are
    /// clamped at fit time.
    pub fn with_neighbourhood_size(mut self, k: usize) -> Self {
        info!("Setting neighbourhood size: {}", k);
        self.config.neighbourhood_size = k;
        self
    }

    /// Include (default) or exclude an item from its own neighbourhood.
    pub fn with_self_neighbour(mut self, policy: SelfNeighbour) -> Self {
        info!("Setting self neighbour policy: {:?}", policy);
        self.config.self_neighbour = policy;
        self
    }

    /// Validate the configuration and return an unfitted recommender.
    pub fn build(self) -> Result<ItemItemRecommender> {
        self.config.validate()?;
        Ok(ItemItemRecommender::from_config(self.config))
    }

    /// Build and fit in one step.
    pub fn fit(self, ratings: RatingMatrix) -> Result<ItemItemRecommender> {
        let mut rec = self.build()?;
        rec.fit(ratings)?;
        Ok(rec)
    }
}
