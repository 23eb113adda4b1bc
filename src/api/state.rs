use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    models::Pantry,
    services::{MealPlanner, RecipeSource, RecommendationSettings},
};

/// Shared application state
///
/// The planner sits behind one lock: a rating submission holds the write
/// lock across the ledger append and the model swap, so readers see either
/// the old model or the new one.
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<RwLock<MealPlanner>>,
    pub recipe_source: Arc<dyn RecipeSource>,
    pub settings: RecommendationSettings,
}

impl AppState {
    /// Creates state with an empty ledger, untrained model and the default
    /// pantry stock
    pub fn new(
        members: Vec<String>,
        recipe_source: Arc<dyn RecipeSource>,
        settings: RecommendationSettings,
    ) -> Self {
        Self::with_pantry(members, Pantry::with_defaults(), recipe_source, settings)
    }

    pub fn with_pantry(
        members: Vec<String>,
        pantry: Pantry,
        recipe_source: Arc<dyn RecipeSource>,
        settings: RecommendationSettings,
    ) -> Self {
        Self {
            inner: Arc::new(RwLock::new(MealPlanner::with_pantry(members, pantry))),
            recipe_source,
            settings,
        }
    }
}
