/// Recipe matcher abstraction
///
/// The household only needs one thing from the outside world: given a set of
/// ingredients, a list of recipes that could be cooked with them. Each
/// matcher backend implements that single lookup.
use crate::{
    error::AppResult,
    models::{Candidate, RecipeQuery},
};

pub mod spoonacular;

pub use spoonacular::SpoonacularSource;

/// Trait for recipe matchers
#[async_trait::async_trait]
pub trait RecipeSource: Send + Sync {
    /// Find recipes that can be made from the query's ingredients
    ///
    /// Any failure, including a non-success status, is reported as
    /// `AppError::RecipeSourceUnavailable`. Callers do not retry.
    async fn find_by_ingredients(&self, query: &RecipeQuery) -> AppResult<Vec<Candidate>>;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}
