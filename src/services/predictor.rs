use nalgebra::{DMatrix, DVector};

use crate::{
    error::{AppError, AppResult},
    models::Observation,
};

use super::encoder::{encode, FeatureVector, Schema};

/// A linear fit needs at least this many ratings
pub const MIN_OBSERVATIONS: usize = 2;

/// Ordinary least squares fit from one-hot (person, recipe) features to a
/// rating, together with the schema it was trained on
#[derive(Debug, Clone)]
pub struct LinearModel {
    schema: Schema,
    coefficients: DVector<f64>,
    intercept: f64,
    observations: usize,
}

impl LinearModel {
    /// Fits a model over all given observations with a freshly derived schema.
    ///
    /// Columns and target are centered and the minimum-norm least squares
    /// solution is taken through an SVD pseudo-inverse, since one-hot designs
    /// are always rank-deficient once an intercept is fitted.
    pub fn fit(observations: &[Observation]) -> AppResult<Self> {
        if observations.len() < MIN_OBSERVATIONS {
            return Err(AppError::InsufficientData {
                observations: observations.len(),
            });
        }

        let schema = Schema::fit(observations);
        let rows: Vec<FeatureVector> = observations
            .iter()
            .map(|o| encode(&o.person, &o.recipe, &schema))
            .collect();
        let (n, d) = (rows.len(), schema.len());

        let x = DMatrix::from_fn(n, d, |i, j| rows[i][j]);
        let x_mean = x.row_mean();
        let y = DVector::from_iterator(n, observations.iter().map(|o| f64::from(o.rating)));
        let y_mean = y.mean();

        let centered_x = DMatrix::from_fn(n, d, |i, j| x[(i, j)] - x_mean[j]);
        let centered_y = y.add_scalar(-y_mean);

        let svd = centered_x.svd(true, true);
        let tolerance =
            (svd.singular_values.max() * n.max(d) as f64 * f64::EPSILON).max(f64::EPSILON);
        let coefficients = svd
            .solve(&centered_y, tolerance)
            .map_err(|e| AppError::Internal(format!("Least squares solve failed: {}", e)))?;

        let intercept = y_mean - (0..d).map(|j| x_mean[j] * coefficients[j]).sum::<f64>();

        Ok(Self {
            schema,
            coefficients,
            intercept,
            observations: n,
        })
    }

    /// Unrounded prediction for a (person, recipe) pair
    pub fn raw_prediction(&self, person: &str, recipe: &str) -> f64 {
        let live = Schema::for_pair(person, recipe);
        let live_vector = encode(person, recipe, &live);
        let features = self.schema.align(&live, &live_vector);

        self.intercept
            + features
                .iter()
                .zip(self.coefficients.iter())
                .map(|(x, beta)| x * beta)
                .sum::<f64>()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn observations(&self) -> usize {
        self.observations
    }
}

/// Rating predictor, retrained from scratch on every new rating
#[derive(Debug, Clone, Default)]
pub enum Predictor {
    #[default]
    Untrained,
    Trained(LinearModel),
}

impl Predictor {
    /// Refits from the full set of observations.
    ///
    /// On failure the current state is kept.
    pub fn train(&mut self, observations: &[Observation]) -> AppResult<()> {
        let model = LinearModel::fit(observations)?;
        *self = Predictor::Trained(model);
        Ok(())
    }

    /// Predicted rating rounded to one decimal, or `None` while untrained.
    /// Not clamped to the 1..=5 star range.
    pub fn predict(&self, person: &str, recipe: &str) -> Option<f64> {
        match self {
            Predictor::Untrained => None,
            Predictor::Trained(model) => Some(round_to_tenth(model.raw_prediction(person, recipe))),
        }
    }

    pub fn is_trained(&self) -> bool {
        matches!(self, Predictor::Trained(_))
    }

    pub fn intercept(&self) -> Option<f64> {
        self.model().map(LinearModel::intercept)
    }

    /// Number of observations the current model was fitted on
    pub fn observations_used(&self) -> usize {
        self.model().map(LinearModel::observations).unwrap_or(0)
    }

    pub fn model(&self) -> Option<&LinearModel> {
        match self {
            Predictor::Untrained => None,
            Predictor::Trained(model) => Some(model),
        }
    }
}

/// Ties go to the even digit, so 2.25 becomes 2.2
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn observations(ratings: &[(&str, &str, i32)]) -> Vec<Observation> {
        ratings
            .iter()
            .map(|(p, r, rating)| Observation::new(*p, *r, *rating, Utc::now()))
            .collect()
    }

    fn trained(ratings: &[(&str, &str, i32)]) -> Predictor {
        let mut predictor = Predictor::default();
        predictor.train(&observations(ratings)).unwrap();
        predictor
    }

    #[test]
    fn test_untrained_predicts_nothing() {
        let predictor = Predictor::default();
        assert!(!predictor.is_trained());
        assert_eq!(predictor.predict("Bilbo", "Tomato Soup"), None);
        assert_eq!(predictor.intercept(), None);
    }

    #[test]
    fn test_train_needs_two_observations() {
        let mut predictor = Predictor::default();

        let err = predictor.train(&[]).unwrap_err();
        assert!(matches!(err, AppError::InsufficientData { observations: 0 }));

        let err = predictor
            .train(&observations(&[("Bilbo", "Tomato Soup", 5)]))
            .unwrap_err();
        assert!(matches!(err, AppError::InsufficientData { observations: 1 }));
        assert_eq!(predictor.predict("Bilbo", "Tomato Soup"), None);
    }

    #[test]
    fn test_two_ratings_give_prediction() {
        let predictor = trained(&[("Bilbo", "Tomato Soup", 5), ("Frodo", "Tomato Soup", 2)]);

        let bilbo = predictor.predict("Bilbo", "Tomato Soup").unwrap();
        let frodo = predictor.predict("Frodo", "Tomato Soup").unwrap();
        assert_eq!(bilbo, 5.0);
        assert_eq!(frodo, 2.0);
        assert_eq!(round_to_tenth(bilbo), bilbo);
        assert_eq!(predictor.observations_used(), 2);
    }

    #[test]
    fn test_unknown_pair_predicts_intercept() {
        let predictor = trained(&[
            ("Bilbo", "Tomato Soup", 5),
            ("Frodo", "Tomato Soup", 2),
            ("Bilbo", "Banana Bread", 4),
        ]);

        let intercept = predictor.intercept().unwrap();
        assert_eq!(
            predictor.predict("Samwise", "Rabbit Stew"),
            Some(round_to_tenth(intercept))
        );
    }

    #[test]
    fn test_intercept_is_mean_for_symmetric_design() {
        let predictor = trained(&[("Bilbo", "Tomato Soup", 5), ("Frodo", "Tomato Soup", 2)]);
        assert!((predictor.intercept().unwrap() - 3.5).abs() < 1e-9);
        assert_eq!(predictor.predict("Gandalf der Weise", "Lembas"), Some(3.5));
    }

    #[test]
    fn test_identical_ratings_fit_constant() {
        let predictor = trained(&[("Bilbo", "Tomato Soup", 4), ("Bilbo", "Tomato Soup", 4)]);
        assert_eq!(predictor.predict("Bilbo", "Tomato Soup"), Some(4.0));
        assert_eq!(predictor.predict("Frodo", "Pie"), Some(4.0));
    }

    #[test]
    fn test_retrain_without_new_data_is_idempotent() {
        let ratings = observations(&[
            ("Bilbo", "Tomato Soup", 5),
            ("Frodo", "Tomato Soup", 2),
            ("Bilbo", "Banana Bread", 4),
            ("Gandalf der Weise", "Banana Bread", 3),
            ("Frodo", "Onion Tart", 1),
        ]);
        let mut predictor = Predictor::default();

        predictor.train(&ratings).unwrap();
        let first = predictor.clone();
        predictor.train(&ratings).unwrap();

        for person in ["Bilbo", "Frodo", "Gandalf der Weise", "Samwise"] {
            for recipe in ["Tomato Soup", "Banana Bread", "Onion Tart", "Rabbit Stew"] {
                assert_eq!(
                    first.predict(person, recipe),
                    predictor.predict(person, recipe),
                    "{} / {}",
                    person,
                    recipe
                );
            }
        }
    }

    #[test]
    fn test_retrain_replaces_schema() {
        let mut predictor = trained(&[("Bilbo", "Tomato Soup", 5), ("Frodo", "Tomato Soup", 2)]);
        let before = predictor.model().unwrap().schema().len();

        predictor
            .train(&observations(&[
                ("Bilbo", "Tomato Soup", 5),
                ("Frodo", "Tomato Soup", 2),
                ("Gandalf der Weise", "Fireworks Cake", 5),
            ]))
            .unwrap();

        assert_eq!(before, 3);
        assert_eq!(predictor.model().unwrap().schema().len(), 5);
        assert_eq!(predictor.observations_used(), 3);
    }

    #[test]
    fn test_failed_retrain_keeps_previous_model() {
        let mut predictor = trained(&[("Bilbo", "Tomato Soup", 5), ("Frodo", "Tomato Soup", 2)]);
        assert!(predictor.train(&[]).is_err());
        assert_eq!(predictor.predict("Bilbo", "Tomato Soup"), Some(5.0));
    }

    #[test]
    fn test_predictions_are_not_clamped() {
        // Additive fit extrapolates past the top of the scale for Bilbo's soup
        let predictor = trained(&[
            ("Bilbo", "Banana Bread", 5),
            ("Frodo", "Banana Bread", 1),
            ("Frodo", "Tomato Soup", 5),
        ]);

        let prediction = predictor.predict("Bilbo", "Tomato Soup").unwrap();
        assert!(prediction > 5.0, "got {}", prediction);
        assert_eq!(prediction, 9.0);
    }

    #[test]
    fn test_round_to_tenth() {
        assert_eq!(round_to_tenth(3.14159), 3.1);
        assert_eq!(round_to_tenth(-0.26), -0.3);
        assert_eq!(round_to_tenth(4.0), 4.0);
    }

    #[test]
    fn test_round_to_tenth_ties_to_even() {
        assert_eq!(round_to_tenth(2.25), 2.2);
        assert_eq!(round_to_tenth(2.75), 2.8);
        assert_eq!(round_to_tenth(-1.25), -1.2);
    }
}
