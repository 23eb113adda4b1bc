/// Spoonacular recipe matcher
///
/// Uses the `findByIngredients` endpoint:
/// GET /recipes/findByIngredients?ingredients=a,b&number=N&ranking=R&apiKey=K
///
/// `ranking` 1 maximizes used ingredients, 2 minimizes missing ones.
use crate::{
    error::{AppError, AppResult},
    models::{Candidate, RecipeQuery, SpoonacularRecipe},
    services::providers::RecipeSource,
};
use reqwest::Client as HttpClient;

#[derive(Clone)]
pub struct SpoonacularSource {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl SpoonacularSource {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/recipes/findByIngredients",
            self.api_url.trim_end_matches('/')
        )
    }

    fn query_params(&self, query: &RecipeQuery) -> Vec<(&'static str, String)> {
        vec![
            ("ingredients", query.ingredient_list()),
            ("number", query.max_results.to_string()),
            ("ranking", query.ranking.to_string()),
            ("apiKey", self.api_key.clone()),
        ]
    }

    fn parse_response(body: &str) -> AppResult<Vec<Candidate>> {
        let recipes: Vec<SpoonacularRecipe> = serde_json::from_str(body).map_err(|e| {
            tracing::error!(error = %e, "Failed to deserialize Spoonacular response");
            AppError::RecipeSourceUnavailable(format!(
                "Failed to parse Spoonacular response: {}",
                e
            ))
        })?;

        Ok(recipes.into_iter().map(Candidate::from).collect())
    }
}

#[async_trait::async_trait]
impl RecipeSource for SpoonacularSource {
    async fn find_by_ingredients(&self, query: &RecipeQuery) -> AppResult<Vec<Candidate>> {
        let response = self
            .http_client
            .get(self.endpoint())
            .query(&self.query_params(query))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Spoonacular returned non-success status");
            return Err(AppError::RecipeSourceUnavailable(format!(
                "Spoonacular API returned status {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        tracing::debug!(response = %body, "Raw Spoonacular response");

        let candidates = Self::parse_response(&body)?;

        tracing::info!(
            ingredients = query.ingredients.len(),
            results = candidates.len(),
            provider = self.name(),
            "Recipe search completed"
        );

        Ok(candidates)
    }

    fn name(&self) -> &'static str {
        "spoonacular"
    }
}
