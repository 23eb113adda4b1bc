pub mod encoder;
pub mod ledger;
pub mod planner;
pub mod predictor;
pub mod providers;
pub mod selector;

pub use planner::{request_recommendations, MealPlanner, RatingOutcome, RecommendationSettings};
pub use predictor::Predictor;
pub use providers::{RecipeSource, SpoonacularSource};
