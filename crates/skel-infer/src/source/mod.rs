mod movenet;
mod synthetic;

pub use movenet::{decode_output, MoveNetConfig, MoveNetSource};
pub use synthetic::{SyntheticConfig, SyntheticSource};

use crate::{InferError, RawKeypoints};
use skel_base::{Tensor, Vec2};
use std::fmt;
use std::time::Duration;

/// Which kind of detector feeds the pipeline, selected once per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    #[default]
    Synthetic,
    Model,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Synthetic => write!(f, "synthetic"),
            SourceKind::Model => write!(f, "model"),
        }
    }
}

/// Produces one set of raw keypoints per detection tick.
///
/// `produce_frame` never fails: a tick that cannot be served yields
/// `RawKeypoints::empty()`. It may block (model inference), so callers run it
/// off the render thread and never call it concurrently.
pub trait DetectionSource: Send {
    fn kind(&self) -> SourceKind;

    /// Size of the image that pixel-space keypoints refer to
    fn input_size(&self) -> Vec2<f32>;

    fn produce_frame(&mut self) -> RawKeypoints;

    /// Called with the session's tick interval before the first frame.
    /// Sources that simulate time step by it; others ignore it.
    fn set_tick_interval(&mut self, _interval: Duration) {}
}

impl<S: DetectionSource + ?Sized> DetectionSource for Box<S> {
    fn kind(&self) -> SourceKind {
        (**self).kind()
    }

    fn input_size(&self) -> Vec2<f32> {
        (**self).input_size()
    }

    fn produce_frame(&mut self) -> RawKeypoints {
        (**self).produce_frame()
    }

    fn set_tick_interval(&mut self, interval: Duration) {
        (**self).set_tick_interval(interval)
    }
}

/// Hands out the latest still image from the camera collaborator.
///
/// Returns an HWC `Tensor<u8>` with shape `[height, width, 3]`.
pub trait FrameGrabber: Send {
    fn grab(&mut self) -> Result<Tensor<u8>, InferError>;
}
