use serde::Deserialize;

use crate::models::RankingMode;
use crate::services::RecommendationSettings;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Spoonacular API key
    pub spoonacular_api_key: String,

    /// Spoonacular API base URL
    #[serde(default = "default_spoonacular_api_url")]
    pub spoonacular_api_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// How many recipes to ask the matcher for per query
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    /// Matcher ranking preference (`maximize_used` or `minimize_missing`)
    #[serde(default)]
    pub ranking: RankingMode,

    /// Size of the shortlist returned to the household
    #[serde(default = "default_shortlist_limit")]
    pub shortlist_limit: usize,

    /// Candidates missing more ingredients than this are dropped
    #[serde(default = "default_max_missing_ingredients")]
    pub max_missing_ingredients: usize,

    /// Comma-separated list of household members
    #[serde(default = "default_household_members")]
    pub household_members: Vec<String>,

    /// Start with the default pantry stock instead of an empty pantry
    #[serde(default = "default_seed_pantry")]
    pub seed_pantry: bool,
}

fn default_spoonacular_api_url() -> String {
    "https://api.spoonacular.com".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_results() -> u32 {
    100
}

fn default_shortlist_limit() -> usize {
    3
}

fn default_max_missing_ingredients() -> usize {
    2
}

fn default_household_members() -> Vec<String> {
    vec![
        "Bilbo".to_string(),
        "Frodo".to_string(),
        "Gandalf der Weise".to_string(),
    ]
}

fn default_seed_pantry() -> bool {
    true
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn recommendation_settings(&self) -> RecommendationSettings {
        RecommendationSettings {
            max_results: self.max_results,
            ranking: self.ranking,
            shortlist_limit: self.shortlist_limit,
            max_missing_ingredients: self.max_missing_ingredients,
        }
    }
}
