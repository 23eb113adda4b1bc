use chrono::{DateTime, Utc};

use crate::models::{Observation, Rating};

/// Append-only history of submitted ratings, oldest first.
///
/// There is no way to delete or correct an entry; a bad rating can only be
/// offset by later ones.
#[derive(Debug, Clone, Default)]
pub struct RatingLedger {
    observations: Vec<Observation>,
}

impl RatingLedger {
    /// Creates an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rating and returns the stored observation
    pub fn record(
        &mut self,
        person: impl Into<String>,
        recipe: impl Into<String>,
        rating: Rating,
        timestamp: DateTime<Utc>,
    ) -> &Observation {
        self.observations
            .push(Observation::new(person, recipe, rating, timestamp));
        &self.observations[self.observations.len() - 1]
    }

    /// Every observation in submission order
    pub fn all_observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}
