use std::collections::BTreeSet;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{Observation, PantryItem, Rating, RecommendedRecipe},
    services::{request_recommendations, RatingOutcome},
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct PantryItemRequest {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    #[serde(default)]
    pub price: f64,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRatingRequest {
    pub person: String,
    pub recipe: String,
    pub rating: Rating,
}

#[derive(Debug, Deserialize)]
pub struct PredictionQuery {
    pub person: String,
    pub recipe: String,
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub person: String,
    pub recipe: String,
    pub predicted_rating: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    /// Ingredients to search with; omitted means the whole pantry
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
    /// Household member to predict ratings for
    #[serde(default)]
    pub person: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<RecommendedRecipe>,
    pub warning: Option<String>,
}

fn require(value: &str, message: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput(message.to_string()));
    }
    Ok(trimmed.to_string())
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Get household members
pub async fn get_household(State(state): State<AppState>) -> Json<Vec<String>> {
    let planner = state.inner.read().await;
    Json(planner.members().to_vec())
}

/// Get all pantry items
pub async fn get_pantry(State(state): State<AppState>) -> Json<Vec<PantryItem>> {
    let planner = state.inner.read().await;
    Json(planner.pantry().items())
}

/// Add or replace a pantry item
pub async fn upsert_pantry_item(
    State(state): State<AppState>,
    Json(request): Json<PantryItemRequest>,
) -> AppResult<(StatusCode, Json<PantryItem>)> {
    let item = PantryItem {
        name: require(&request.name, "Pantry item needs a name")?,
        quantity: request.quantity,
        unit: request.unit,
        price: request.price,
    };

    let mut planner = state.inner.write().await;
    planner.pantry_mut().upsert(item.clone());
    tracing::info!(item = %item.name, "Pantry item stored");

    Ok((StatusCode::CREATED, Json(item)))
}

/// Remove a pantry item
pub async fn delete_pantry_item(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<StatusCode> {
    let mut planner = state.inner.write().await;
    match planner.pantry_mut().remove(&name) {
        Some(_) => {
            tracing::info!(item = %name, "Pantry item removed");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(AppError::NotFound(format!("Pantry item '{}'", name))),
    }
}

/// Record a rating and retrain the model
pub async fn submit_rating(
    State(state): State<AppState>,
    Json(request): Json<SubmitRatingRequest>,
) -> AppResult<(StatusCode, Json<RatingOutcome>)> {
    let person = require(&request.person, "Please select a household member first")?;
    let recipe = require(&request.recipe, "Please select a recipe to rate")?;

    let mut planner = state.inner.write().await;
    let outcome = planner.submit_rating(&person, &recipe, request.rating);

    Ok((StatusCode::CREATED, Json(outcome)))
}

/// Cooking history in submission order
pub async fn get_ratings(State(state): State<AppState>) -> Json<Vec<Observation>> {
    let planner = state.inner.read().await;
    Json(planner.ledger().all_observations().to_vec())
}

/// Predicted rating for a person and recipe
pub async fn get_prediction(
    State(state): State<AppState>,
    Query(params): Query<PredictionQuery>,
) -> Json<PredictionResponse> {
    let planner = state.inner.read().await;
    let predicted_rating = planner.request_prediction(&params.person, &params.recipe);

    Json(PredictionResponse {
        person: params.person,
        recipe: params.recipe,
        predicted_rating,
    })
}

/// Shortlist recipes that can be cooked from the given (or all pantry)
/// ingredients
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let ingredients = request
        .ingredients
        .map(|list| list.into_iter().collect::<BTreeSet<String>>());

    tracing::info!(
        request_id = %request_id,
        automatic = ingredients.is_none(),
        "Processing recommendation request"
    );

    // The lock is not held while the matcher is called
    let query = {
        let planner = state.inner.read().await;
        planner.recommendation_query(ingredients, &state.settings)
    };

    let shortlist = match query {
        Ok(query) => {
            let mut rng = StdRng::from_entropy();
            request_recommendations(
                state.recipe_source.as_ref(),
                &query,
                &state.settings,
                &mut rng,
            )
            .await
        }
        Err(e) => Err(e),
    };

    match shortlist {
        Ok(candidates) => {
            let planner = state.inner.read().await;
            let recommendations = candidates
                .iter()
                .map(|candidate| {
                    let predicted = request
                        .person
                        .as_deref()
                        .and_then(|person| planner.request_prediction(person, &candidate.title));
                    RecommendedRecipe::new(candidate, predicted)
                })
                .collect();

            Ok(Json(RecommendationResponse {
                recommendations,
                warning: None,
            }))
        }
        Err(e) if e.is_user_warning() => {
            tracing::warn!(request_id = %request_id, error = %e, "Recommendations unavailable");
            Ok(Json(RecommendationResponse {
                recommendations: Vec::new(),
                warning: Some(e.to_string()),
            }))
        }
        Err(e) => Err(e),
    }
}
