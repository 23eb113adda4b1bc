use std::collections::BTreeSet;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

const RECIPE_PAGE_URL: &str = "https://spoonacular.com/recipes";

/// A recipe surfaced by the matcher for the current query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Candidate {
    pub id: i64,
    pub title: String,
    pub missing_ingredients: BTreeSet<String>,
    /// Ingredients still to buy as counted by the matcher. Can exceed the
    /// number of distinct names, since the matcher repeats names such as
    /// "salt" for different ingredients.
    pub missing_count: usize,
}

impl Candidate {
    pub fn new<I, S>(id: i64, title: impl Into<String>, missing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let missing: Vec<String> = missing.into_iter().map(Into::into).collect();
        Self {
            id,
            title: title.into(),
            missing_count: missing.len(),
            missing_ingredients: missing.into_iter().collect(),
        }
    }

    /// Overrides the missing count with the matcher's own figure, never
    /// going below the number of listed names
    pub fn with_reported_missing(mut self, reported: usize) -> Self {
        self.missing_count = self.missing_count.max(reported);
        self
    }

    /// Number of ingredients the household would still have to buy
    pub fn missing_count(&self) -> usize {
        self.missing_count
    }

    /// Public recipe page on spoonacular.com
    pub fn link(&self) -> String {
        format!(
            "{}/{}-{}",
            RECIPE_PAGE_URL,
            self.title.replace(' ', "-"),
            self.id
        )
    }
}

/// How the matcher should rank results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMode {
    /// Prefer recipes that use as many of the given ingredients as possible
    MaximizeUsed,
    /// Prefer recipes that need as few extra ingredients as possible
    #[default]
    MinimizeMissing,
}

impl RankingMode {
    /// Numeric value expected by the `ranking` query parameter
    pub fn as_param(&self) -> u8 {
        match self {
            RankingMode::MaximizeUsed => 1,
            RankingMode::MinimizeMissing => 2,
        }
    }
}

impl Display for RankingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_param())
    }
}

/// Request sent to the recipe matcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeQuery {
    pub ingredients: BTreeSet<String>,
    pub max_results: u32,
    pub ranking: RankingMode,
}

impl RecipeQuery {
    /// Ingredients joined the way the matcher expects them
    pub fn ingredient_list(&self) -> String {
        self.ingredients
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}
