use std::collections::BTreeSet;

use chrono::Utc;
use rand::Rng;
use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    models::{Candidate, Observation, Pantry, RankingMode, Rating, RecipeQuery},
    services::{
        ledger::RatingLedger,
        predictor::Predictor,
        providers::RecipeSource,
        selector::{self, DEFAULT_LIMIT, DEFAULT_MAX_MISSING},
    },
};

/// Tuning for recommendation requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationSettings {
    pub max_results: u32,
    pub ranking: RankingMode,
    pub shortlist_limit: usize,
    pub max_missing_ingredients: usize,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            max_results: 100,
            ranking: RankingMode::MinimizeMissing,
            shortlist_limit: DEFAULT_LIMIT,
            max_missing_ingredients: DEFAULT_MAX_MISSING,
        }
    }
}

/// Result of submitting a rating
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RatingOutcome {
    pub observation: Observation,
    pub model_trained: bool,
    pub observations: usize,
}

/// Household session: rating history, the model learned from it, the
/// shared pantry and who lives there.
///
/// Owned by the caller and passed explicitly into every operation.
#[derive(Debug, Clone, Default)]
pub struct MealPlanner {
    members: Vec<String>,
    ledger: RatingLedger,
    predictor: Predictor,
    pantry: Pantry,
}

impl MealPlanner {
    /// Empty ledger, untrained predictor, default pantry stock
    pub fn new(members: Vec<String>) -> Self {
        Self::with_pantry(members, Pantry::with_defaults())
    }

    /// Empty ledger and untrained predictor around the given pantry
    pub fn with_pantry(members: Vec<String>, pantry: Pantry) -> Self {
        Self {
            members,
            pantry,
            ..Self::default()
        }
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn ledger(&self) -> &RatingLedger {
        &self.ledger
    }

    pub fn predictor(&self) -> &Predictor {
        &self.predictor
    }

    pub fn pantry(&self) -> &Pantry {
        &self.pantry
    }

    pub fn pantry_mut(&mut self) -> &mut Pantry {
        &mut self.pantry
    }

    /// Records a rating and refits the predictor on the whole ledger
    pub fn submit_rating(&mut self, person: &str, recipe: &str, rating: Rating) -> RatingOutcome {
        let observation = self
            .ledger
            .record(person, recipe, rating, Utc::now())
            .clone();

        tracing::info!(
            person = %person,
            recipe = %recipe,
            rating = rating,
            observations = self.ledger.len(),
            "Rating recorded"
        );

        match self.predictor.train(self.ledger.all_observations()) {
            Ok(()) => tracing::info!(
                observations = self.ledger.len(),
                "Rating model retrained"
            ),
            Err(AppError::InsufficientData { observations }) => tracing::debug!(
                observations = observations,
                "Not enough ratings to train yet"
            ),
            Err(e) => tracing::error!(error = %e, "Rating model retrain failed"),
        }

        RatingOutcome {
            observation,
            model_trained: self.predictor.is_trained(),
            observations: self.ledger.len(),
        }
    }

    /// Predicted rating for a person and recipe, if a model exists
    pub fn request_prediction(&self, person: &str, recipe: &str) -> Option<f64> {
        self.predictor.predict(person, recipe)
    }

    /// Builds the matcher query for a recommendation request.
    ///
    /// `None` selects every pantry ingredient. An empty ingredient set is
    /// rejected before anything is sent to the matcher.
    pub fn recommendation_query(
        &self,
        ingredients: Option<BTreeSet<String>>,
        settings: &RecommendationSettings,
    ) -> AppResult<RecipeQuery> {
        let ingredients: BTreeSet<String> = ingredients
            .unwrap_or_else(|| self.pantry.ingredient_names())
            .into_iter()
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .collect();

        if ingredients.is_empty() {
            return Err(AppError::EmptyIngredientSet);
        }

        Ok(RecipeQuery {
            ingredients,
            max_results: settings.max_results,
            ranking: settings.ranking,
        })
    }
}

/// Asks the matcher for recipes and narrows them to a shortlist
pub async fn request_recommendations<R: Rng + Send + ?Sized>(
    source: &dyn RecipeSource,
    query: &RecipeQuery,
    settings: &RecommendationSettings,
    rng: &mut R,
) -> AppResult<Vec<Candidate>> {
    let candidates = source.find_by_ingredients(query).await?;
    let shortlist = selector::select(
        &candidates,
        settings.shortlist_limit,
        settings.max_missing_ingredients,
        rng,
    );

    tracing::info!(
        provider = source.name(),
        candidates = candidates.len(),
        shortlisted = shortlist.len(),
        "Recommendations selected"
    );

    Ok(shortlist)
}
