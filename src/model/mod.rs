//! Trained classifiers. The rest of the crate only sees [`Classifier`].

mod linear;
mod onnx;

pub use linear::LinearClassifier;
pub use onnx::{resolve_input_dim, OnnxClassifier, OnnxOptions};

use crate::error::ClassifierError;
use ndarray::ArrayView2;

/// A fitted, deterministic classifier: `[rows, input_dim]` features in, one class code per row out.
pub trait Classifier: Send + Sync {
    fn name(&self) -> &str;

    /// Feature width the model was trained on.
    fn input_dim(&self) -> usize;

    /// Number of classes the model can emit, when the model says so.
    fn n_classes(&self) -> Option<usize> {
        None
    }

    fn predict(&self, batch: ArrayView2<'_, f32>) -> Result<Vec<i64>, ClassifierError>;
}
