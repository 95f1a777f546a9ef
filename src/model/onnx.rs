//! ONNX Runtime classifier. Input: [rows, input_dim] f32, output: int64 class label per row
//! (the `label` output of scikit-learn models converted with skl2onnx).
//!
//! `ort` is built with `load-dynamic`: the runtime shared library is resolved at first use,
//! from the configured path, `ORT_DYLIB_PATH`, or the platform default name.

use super::Classifier;
use crate::error::{ArtifactError, ClassifierError};
use ndarray::ArrayView2;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static ORT_ENV: OnceLock<()> = OnceLock::new();

#[cfg(target_os = "windows")]
const DEFAULT_RUNTIME: &str = "onnxruntime.dll";
#[cfg(target_os = "macos")]
const DEFAULT_RUNTIME: &str = "libonnxruntime.dylib";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const DEFAULT_RUNTIME: &str = "libonnxruntime.so";

/// How to open a model. Every field is optional; `Default` reads the width from the model,
/// the labels from the first output and the runtime from the environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct OnnxOptions<'a> {
    /// Input width for models with a dynamic input shape.
    pub input_dim: Option<usize>,
    /// Output holding the class labels.
    pub output_name: Option<&'a str>,
    /// ONNX Runtime shared library.
    pub runtime: Option<&'a Path>,
}

/// Explicit runtime library: the configured one, else `ORT_DYLIB_PATH`.
fn explicit_runtime(configured: Option<&Path>) -> Option<PathBuf> {
    configured
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os("ORT_DYLIB_PATH").map(PathBuf::from))
}

fn panic_reason(payload: Box<dyn Any + Send>) -> String {
    payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "runtime library failed to load".to_string())
}

/// Commit the process-wide `ort` environment once. `ort` panics when the shared library
/// cannot be loaded; that panic is turned into [`ArtifactError::OnnxRuntime`].
fn init_env(runtime: Option<&Path>) -> Result<(), ArtifactError> {
    if ORT_ENV.get().is_some() {
        return Ok(());
    }
    let explicit = explicit_runtime(runtime);
    let shown = explicit.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_RUNTIME));
    if let Some(path) = &explicit {
        if !path.is_file() {
            return Err(ArtifactError::OnnxRuntime {
                path: path.clone(),
                reason: "no such file".to_string(),
            });
        }
    }

    let committed = catch_unwind(AssertUnwindSafe(|| {
        let builder = match &explicit {
            Some(path) => ort::init_from(path.to_string_lossy()),
            None => ort::init(),
        };
        builder.with_name("obesity-predictor").commit()
    }));
    match committed {
        Ok(Ok(_)) => {
            let _ = ORT_ENV.set(());
            tracing::info!(runtime = %shown.display(), "onnx runtime ready");
            Ok(())
        }
        Ok(Err(e)) => Err(ArtifactError::OnnxRuntime {
            path: shown,
            reason: e.to_string(),
        }),
        Err(payload) => Err(ArtifactError::OnnxRuntime {
            path: shown,
            reason: panic_reason(payload),
        }),
    }
}

/// Input width from the model's declared last input dimension (`None` when dynamic)
/// and the configured one. Both present and different is an error; neither is an error.
pub fn resolve_input_dim(declared: Option<usize>, configured: Option<usize>) -> Result<usize, ArtifactError> {
    match (declared, configured) {
        (Some(d), Some(c)) if d != c => Err(ArtifactError::Classifier(format!(
            "model declares {} inputs, config says {}",
            d, c
        ))),
        (Some(d), _) | (None, Some(d)) => Ok(d),
        (None, None) => Err(ArtifactError::Classifier(
            "input width is dynamic; set classifier.input_dim".to_string(),
        )),
    }
}

/// Static trailing dimension of a tensor value, if any.
fn static_width(value: &ort::ValueType) -> Option<usize> {
    match value {
        ort::ValueType::Tensor { dimensions, .. } => dimensions.last().copied().filter(|d| *d > 0).map(|d| d as usize),
        _ => None,
    }
}

pub struct OnnxClassifier {
    session: ort::Session,
    input_name: String,
    output_name: String,
    input_dim: usize,
    n_classes: Option<usize>,
}

impl OnnxClassifier {
    /// Load a model. See [`resolve_input_dim`] for how the input width is chosen.
    pub fn load(path: &Path, options: OnnxOptions<'_>) -> Result<Self, ArtifactError> {
        if !path.exists() {
            return Err(ArtifactError::Io {
                path: path.to_path_buf(),
                source: std::io::ErrorKind::NotFound.into(),
            });
        }
        init_env(options.runtime)?;
        let onnx = |source| ArtifactError::Onnx {
            path: path.to_path_buf(),
            source,
        };
        let session = ort::Session::builder()
            .map_err(onnx)?
            .commit_from_file(path)
            .map_err(onnx)?;

        let input = session
            .inputs
            .first()
            .ok_or_else(|| ArtifactError::Classifier("model declares no inputs".to_string()))?;
        let input_dim = resolve_input_dim(static_width(&input.input_type), options.input_dim)?;
        let input_name = input.name.clone();

        let output_name = match options.output_name {
            Some(name) => session
                .outputs
                .iter()
                .find(|o| o.name == name)
                .map(|o| o.name.clone())
                .ok_or_else(|| ArtifactError::Classifier(format!("model has no output {:?}", name)))?,
            None => session
                .outputs
                .first()
                .map(|o| o.name.clone())
                .ok_or_else(|| ArtifactError::Classifier("model declares no outputs".to_string()))?,
        };
        // skl2onnx emits a [rows, classes] probability tensor next to the labels.
        let n_classes = session
            .outputs
            .iter()
            .filter(|o| o.name != output_name)
            .find_map(|o| static_width(&o.output_type));

        tracing::info!(
            path = %path.display(),
            input = %input_name,
            output = %output_name,
            input_dim,
            classes = ?n_classes,
            "onnx classifier loaded"
        );
        Ok(Self {
            session,
            input_name,
            output_name,
            input_dim,
            n_classes,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn name(&self) -> &str {
        "onnx"
    }

    fn input_dim(&self) -> usize {
        self.input_dim
    }

    fn n_classes(&self) -> Option<usize> {
        self.n_classes
    }

    fn predict(&self, batch: ArrayView2<'_, f32>) -> Result<Vec<i64>, ClassifierError> {
        if batch.ncols() != self.input_dim {
            return Err(ClassifierError::InputWidth {
                expected: self.input_dim,
                actual: batch.ncols(),
            });
        }
        let input = ort::Tensor::from_array(batch.to_owned())?;
        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => input]?)?;
        let labels = outputs
            .get(self.output_name.as_str())
            .ok_or_else(|| ClassifierError::MissingOutput(self.output_name.clone()))?;
        let codes: Vec<i64> = labels.try_extract_tensor::<i64>()?.iter().copied().collect();
        if codes.len() != batch.nrows() {
            return Err(ClassifierError::RowCount {
                expected: batch.nrows(),
                actual: codes.len(),
            });
        }
        Ok(codes)
    }
}
