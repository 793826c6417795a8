use crate::Device;
use skel_base::TensorError;
use std::fmt;

#[derive(Debug)]
pub enum InferError {
    ShapeMismatch { expected: String, got: String },
    ModelLoad(String),
    BackendError(String),
    InvalidInput { name: String, expected_names: Vec<String> },
    UnsupportedDevice(Device),
    UnsupportedDtype(String),
    InvalidAlpha(f32),
    Capture(String),
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected}, got {got}")
            }
            InferError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            InferError::BackendError(msg) => write!(f, "backend error: {msg}"),
            InferError::InvalidInput { name, expected_names } => write!(
                f,
                "invalid input '{name}', expected one of: {}",
                expected_names.join(", ")
            ),
            InferError::UnsupportedDevice(device) => write!(f, "unsupported device: {device}"),
            InferError::UnsupportedDtype(msg) => write!(f, "unsupported dtype: {msg}"),
            InferError::InvalidAlpha(alpha) => {
                write!(f, "smoothing alpha must lie in (0, 1], got {alpha}")
            }
            InferError::Capture(msg) => write!(f, "capture error: {msg}"),
        }
    }
}

impl std::error::Error for InferError {}

impl From<TensorError> for InferError {
    fn from(err: TensorError) -> Self {
        InferError::ShapeMismatch {
            expected: "consistent tensor shape".to_string(),
            got: err.to_string(),
        }
    }
}
