use skel_infer::InferError;
use std::fmt;

#[derive(Debug)]
pub enum OverlayError {
    /// A frame handed to the renderer does not match the schema's joint count
    FrameLength { expected: usize, got: usize },
    Config(String),
    Infer(InferError),
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayError::FrameLength { expected, got } => {
                write!(f, "frame has {got} joints, schema expects {expected}")
            }
            OverlayError::Config(msg) => write!(f, "config error: {msg}"),
            OverlayError::Infer(err) => write!(f, "inference error: {err}"),
        }
    }
}

impl std::error::Error for OverlayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OverlayError::Infer(err) => Some(err),
            _ => None,
        }
    }
}

impl From<InferError> for OverlayError {
    fn from(err: InferError) -> Self {
        OverlayError::Infer(err)
    }
}
