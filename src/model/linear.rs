//! Multinomial linear classifier: scores = W·x + b, class = arg-max (first index wins ties).
//! Loaded from exported `coef_` / `intercept_` arrays.

use super::Classifier;
use crate::error::{ArtifactError, ClassifierError};
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearClassifier {
    /// One row of weights per class code.
    coefficients: Vec<Vec<f32>>,
    intercepts: Vec<f32>,
}

impl LinearClassifier {
    pub fn new(coefficients: Vec<Vec<f32>>, intercepts: Vec<f32>) -> Result<Self, ArtifactError> {
        let model = Self {
            coefficients,
            intercepts,
        };
        model.check()?;
        Ok(model)
    }

    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let model: Self = crate::artifacts::read_json(path)?;
        model.check()?;
        tracing::info!(
            path = %path.display(),
            classes = model.coefficients.len(),
            input_dim = model.input_dim(),
            "linear classifier loaded"
        );
        Ok(model)
    }

    fn check(&self) -> Result<(), ArtifactError> {
        let width = self.input_dim();
        if self.coefficients.is_empty() || width == 0 {
            return Err(ArtifactError::Classifier("empty coefficient matrix".to_string()));
        }
        if self.intercepts.len() != self.coefficients.len() {
            return Err(ArtifactError::Classifier(format!(
                "{} coefficient rows but {} intercepts",
                self.coefficients.len(),
                self.intercepts.len()
            )));
        }
        if let Some(row) = self.coefficients.iter().position(|r| r.len() != width) {
            return Err(ArtifactError::Classifier(format!("coefficient row {} is ragged", row)));
        }
        let finite = self
            .coefficients
            .iter()
            .flatten()
            .chain(&self.intercepts)
            .all(|v| v.is_finite());
        if !finite {
            return Err(ArtifactError::Classifier("non-finite parameter".to_string()));
        }
        Ok(())
    }

    fn decide(&self, x: &[f32]) -> i64 {
        let mut best = 0;
        let mut best_score = f32::NEG_INFINITY;
        for (class, (w, b)) in self.coefficients.iter().zip(&self.intercepts).enumerate() {
            let score = w.iter().zip(x).map(|(w, x)| w * x).sum::<f32>() + b;
            if score > best_score {
                best = class;
                best_score = score;
            }
        }
        best as i64
    }
}

impl Classifier for LinearClassifier {
    fn name(&self) -> &str {
        "linear"
    }

    fn input_dim(&self) -> usize {
        self.coefficients.first().map_or(0, Vec::len)
    }

    fn n_classes(&self) -> Option<usize> {
        Some(self.coefficients.len())
    }

    fn predict(&self, batch: ArrayView2<'_, f32>) -> Result<Vec<i64>, ClassifierError> {
        if batch.ncols() != self.input_dim() {
            return Err(ClassifierError::InputWidth {
                expected: self.input_dim(),
                actual: batch.ncols(),
            });
        }
        Ok(batch
            .rows()
            .into_iter()
            .map(|row| self.decide(&row.to_vec()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn argmax_per_row() {
        let m = LinearClassifier::new(vec![vec![1.0, 0.0], vec![0.0, 1.0]], vec![0.0, 0.0]).unwrap();
        let batch = array![[2.0f32, 1.0], [0.5, 3.0]];
        assert_eq!(m.predict(batch.view()).unwrap(), vec![0, 1]);
        assert_eq!(m.n_classes(), Some(2));
    }

    #[test]
    fn ties_go_to_first_class() {
        let m = LinearClassifier::new(vec![vec![1.0], vec![1.0]], vec![0.0, 0.0]).unwrap();
        assert_eq!(m.predict(array![[4.0f32]].view()).unwrap(), vec![0]);
    }

    #[test]
    fn ragged_rows_rejected() {
        assert!(LinearClassifier::new(vec![vec![1.0, 2.0], vec![1.0]], vec![0.0, 0.0]).is_err());
    }

    #[test]
    fn wrong_width_rejected() {
        let m = LinearClassifier::new(vec![vec![1.0, 0.0]], vec![0.0]).unwrap();
        let err = m.predict(array![[1.0f32, 2.0, 3.0]].view()).unwrap_err();
        assert!(matches!(err, ClassifierError::InputWidth { expected: 2, actual: 3 }));
    }
}
