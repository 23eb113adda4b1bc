use serde::{Deserialize, Serialize};

pub mod observation;
pub mod pantry;
pub mod recipe;

pub use observation::{Observation, Rating};
pub use pantry::{Pantry, PantryItem};
pub use recipe::{Candidate, RankingMode, RecipeQuery};

// ============================================================================
// Spoonacular API Types
// ============================================================================

/// One entry of the `findByIngredients` response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpoonacularRecipe {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub missed_ingredient_count: u32,
    #[serde(default)]
    pub missed_ingredients: Vec<SpoonacularIngredient>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpoonacularIngredient {
    pub name: String,
}

impl From<SpoonacularRecipe> for Candidate {
    fn from(recipe: SpoonacularRecipe) -> Self {
        Candidate::new(
            recipe.id,
            recipe.title,
            recipe
                .missed_ingredients
                .into_iter()
                .map(|ingredient| ingredient.name),
        )
        .with_reported_missing(recipe.missed_ingredient_count as usize)
    }
}

// ============================================================================
// HTTP Payloads
// ============================================================================

/// Shortlisted recipe returned to the household, with a prediction for the
/// requesting member when one is available
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendedRecipe {
    pub id: i64,
    pub title: String,
    pub missing_ingredients: Vec<String>,
    pub link: String,
    pub predicted_rating: Option<f64>,
}

impl RecommendedRecipe {
    pub fn new(candidate: &Candidate, predicted_rating: Option<f64>) -> Self {
        Self {
            id: candidate.id,
            title: candidate.title.clone(),
            missing_ingredients: candidate.missing_ingredients.iter().cloned().collect(),
            link: candidate.link(),
            predicted_rating,
        }
    }
}
