use std::sync::Arc;

use mealmate_api::{
    api::{create_router, AppState},
    config::Config,
    models::Pantry,
    services::SpoonacularSource,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mealmate_api=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let recipe_source = Arc::new(SpoonacularSource::new(
        config.spoonacular_api_key.clone(),
        config.spoonacular_api_url.clone(),
    ));

    let pantry = if config.seed_pantry {
        Pantry::with_defaults()
    } else {
        Pantry::new()
    };

    let state = AppState::with_pantry(
        config.household_members.clone(),
        pantry,
        recipe_source,
        config.recommendation_settings(),
    );

    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
