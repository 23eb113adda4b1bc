use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Not enough ratings to train a model: {observations} recorded, at least 2 required")]
    InsufficientData { observations: usize },

    #[error("Recipe source unavailable: {0}")]
    RecipeSourceUnavailable(String),

    #[error("No ingredients to search with. Add pantry items or choose ingredients.")]
    EmptyIngredientSet,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::RecipeSourceUnavailable(err.to_string())
    }
}

impl AppError {
    /// Errors that are shown to the user as a warning rather than a failure
    pub fn is_user_warning(&self) -> bool {
        matches!(
            self,
            AppError::RecipeSourceUnavailable(_) | AppError::EmptyIngredientSet
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InsufficientData { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::RecipeSourceUnavailable(_) => StatusCode::BAD_GATEWAY,
            AppError::EmptyIngredientSet | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
