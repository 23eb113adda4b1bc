//! One-hot encoding of (person, recipe) pairs over the observed vocabulary.

use std::collections::BTreeSet;

use crate::models::Observation;

/// Dense feature vector, one slot per schema column
pub type FeatureVector = Vec<f64>;

/// A single one-hot column
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Person(String),
    Recipe(String),
}

/// Ordered column layout: every person column (sorted), then every recipe
/// column (sorted).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// Derives the schema from the vocabulary of the given observations
    pub fn fit(observations: &[Observation]) -> Self {
        let persons: BTreeSet<&str> = observations.iter().map(|o| o.person.as_str()).collect();
        let recipes: BTreeSet<&str> = observations.iter().map(|o| o.recipe.as_str()).collect();
        Self::from_vocabulary(persons, recipes)
    }

    /// Live schema of a single prediction query
    pub fn for_pair(person: &str, recipe: &str) -> Self {
        Self::from_vocabulary([person], [recipe])
    }

    fn from_vocabulary<'a>(
        persons: impl IntoIterator<Item = &'a str>,
        recipes: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let persons: BTreeSet<&str> = persons.into_iter().collect();
        let recipes: BTreeSet<&str> = recipes.into_iter().collect();

        let columns = persons
            .into_iter()
            .map(|p| Column::Person(p.to_string()))
            .chain(recipes.into_iter().map(|r| Column::Recipe(r.to_string())))
            .collect();

        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn position(&self, column: &Column) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Re-indexes a vector encoded against `live` onto this schema.
    ///
    /// Columns this schema has but `live` lacks are zero-filled; columns of
    /// `live` unknown here are dropped.
    pub fn align(&self, live: &Schema, vector: &[f64]) -> FeatureVector {
        self.columns
            .iter()
            .map(|column| {
                live.position(column)
                    .and_then(|i| vector.get(i).copied())
                    .unwrap_or(0.0)
            })
            .collect()
    }
}

/// One-hot encodes a (person, recipe) pair against `schema`.
///
/// A person or recipe missing from the schema contributes only zeros.
pub fn encode(person: &str, recipe: &str, schema: &Schema) -> FeatureVector {
    schema
        .columns
        .iter()
        .map(|column| match column {
            Column::Person(p) if p == person => 1.0,
            Column::Recipe(r) if r == recipe => 1.0,
            _ => 0.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn observations(pairs: &[(&str, &str)]) -> Vec<Observation> {
        pairs
            .iter()
            .map(|(p, r)| Observation::new(*p, *r, 3, Utc::now()))
            .collect()
    }

    #[test]
    fn test_fit_orders_persons_then_recipes() {
        let obs = observations(&[
            ("Frodo", "Tomato Soup"),
            ("Bilbo", "Banana Bread"),
            ("Frodo", "Banana Bread"),
        ]);

        let schema = Schema::fit(&obs);
        assert_eq!(
            schema.columns(),
            &[
                Column::Person("Bilbo".to_string()),
                Column::Person("Frodo".to_string()),
                Column::Recipe("Banana Bread".to_string()),
                Column::Recipe("Tomato Soup".to_string()),
            ]
        );
    }

    #[test]
    fn test_fit_is_independent_of_insertion_order() {
        let forward = observations(&[("Bilbo", "Soup"), ("Frodo", "Stew")]);
        let backward = observations(&[("Frodo", "Stew"), ("Bilbo", "Soup")]);
        assert_eq!(Schema::fit(&forward), Schema::fit(&backward));
    }

    #[test]
    fn test_fit_empty() {
        assert!(Schema::fit(&[]).is_empty());
    }

    #[test]
    fn test_encode_one_hot() {
        let schema = Schema::fit(&observations(&[
            ("Bilbo", "Tomato Soup"),
            ("Frodo", "Banana Bread"),
        ]));

        assert_eq!(
            encode("Frodo", "Tomato Soup", &schema),
            vec![0.0, 1.0, 0.0, 1.0]
        );
    }

    #[test]
    fn test_encode_unknown_entities_zero_fill() {
        let schema = Schema::fit(&observations(&[("Bilbo", "Tomato Soup")]));

        assert_eq!(encode("Sam", "Tomato Soup", &schema), vec![0.0, 1.0]);
        assert_eq!(encode("Bilbo", "Coney", &schema), vec![1.0, 0.0]);
        assert_eq!(encode("Sam", "Coney", &schema), vec![0.0, 0.0]);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let schema = Schema::fit(&observations(&[
            ("Bilbo", "Tomato Soup"),
            ("Frodo", "Tomato Soup"),
            ("Gandalf der Weise", "Fireworks Cake"),
        ]));

        let first = encode("Gandalf der Weise", "Tomato Soup", &schema);
        let second = encode("Gandalf der Weise", "Tomato Soup", &schema);
        let first_bits: Vec<u64> = first.iter().map(|v| v.to_bits()).collect();
        let second_bits: Vec<u64> = second.iter().map(|v| v.to_bits()).collect();
        assert_eq!(first_bits, second_bits);
    }

    #[test]
    fn test_align_matches_direct_encoding() {
        let stored = Schema::fit(&observations(&[
            ("Bilbo", "Tomato Soup"),
            ("Frodo", "Banana Bread"),
        ]));
        let live = Schema::for_pair("Frodo", "Tomato Soup");
        let live_vector = encode("Frodo", "Tomato Soup", &live);

        assert_eq!(live_vector, vec![1.0, 1.0]);
        assert_eq!(
            stored.align(&live, &live_vector),
            encode("Frodo", "Tomato Soup", &stored)
        );
    }

    #[test]
    fn test_align_drops_unknown_and_zero_fills() {
        let stored = Schema::fit(&observations(&[("Bilbo", "Tomato Soup")]));
        let live = Schema::for_pair("Sam", "Tomato Soup");
        let live_vector = encode("Sam", "Tomato Soup", &live);

        // Person_Sam is dropped, Person_Bilbo is zero-filled
        assert_eq!(stored.align(&live, &live_vector), vec![0.0, 1.0]);
    }
}
