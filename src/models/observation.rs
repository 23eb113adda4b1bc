use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Star rating as submitted. Values outside 1..=5 are accepted as-is.
pub type Rating = i32;

/// One recorded (person, recipe, rating) event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    pub person: String,
    pub recipe: String,
    pub rating: Rating,
    pub timestamp: DateTime<Utc>,
}

impl Observation {
    pub fn new(
        person: impl Into<String>,
        recipe: impl Into<String>,
        rating: Rating,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            person: person.into(),
            recipe: recipe.into(),
            rating,
            timestamp,
        }
    }
}
