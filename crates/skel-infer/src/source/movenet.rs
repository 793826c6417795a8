use super::{DetectionSource, FrameGrabber, SourceKind};
use crate::pose::{preprocess, AxisOrder, CoordinateSpace, RawKeypoints, COCO_KEYPOINT_COUNT};
use crate::{Backend, InferError, ModelSource, Session};
use skel_base::{Tensor, Vec2};

/// Input and output conventions of a single-person MoveNet-style model
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct MoveNetConfig {
    input_size: usize,
    axis_order: AxisOrder,
    space: CoordinateSpace,
}

impl Default for MoveNetConfig {
    fn default() -> Self {
        Self {
            input_size: 192,
            axis_order: AxisOrder::YxConfidence,
            space: CoordinateSpace::Normalized,
        }
    }
}

impl MoveNetConfig {
    /// Set the square model input edge in pixels (192 for Lightning, 256 for Thunder).
    pub fn with_input_size(mut self, size: usize) -> Self {
        self.input_size = size;
        self
    }

    /// Set the order of the spatial values in each output triple.
    pub fn with_axis_order(mut self, order: AxisOrder) -> Self {
        self.axis_order = order;
        self
    }

    /// Set whether output coordinates are normalized or in input pixels.
    pub fn with_space(mut self, space: CoordinateSpace) -> Self {
        self.space = space;
        self
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn axis_order(&self) -> AxisOrder {
        self.axis_order
    }

    pub fn space(&self) -> CoordinateSpace {
        self.space
    }
}

/// Reshape a model output holding K triples into raw keypoints.
///
/// Any leading batch/instance dimensions are ignored as long as the total
/// element count is exactly `K * 3`.
pub fn decode_output(output: &Tensor<f32>, config: &MoveNetConfig) -> Result<RawKeypoints, InferError> {
    if output.len() != COCO_KEYPOINT_COUNT * 3 {
        return Err(InferError::ShapeMismatch {
            expected: format!("{} keypoint triples", COCO_KEYPOINT_COUNT),
            got: format!("{:?}", output.shape),
        });
    }
    Ok(RawKeypoints::from_flat(
        &output.data,
        config.axis_order,
        config.space,
    ))
}

/// Detection source backed by real model inference.
///
/// Each tick grabs a still image, resizes it to the model's square input,
/// runs one forward pass and decodes the keypoint triples.
pub struct MoveNetSource<G: FrameGrabber> {
    session: Box<dyn Session>,
    grabber: G,
    config: MoveNetConfig,
}

impl<G: FrameGrabber> MoveNetSource<G> {
    /// Load a model through `backend` and attach it to a frame grabber
    pub fn new(
        model: ModelSource,
        backend: &dyn Backend,
        grabber: G,
        config: MoveNetConfig,
    ) -> Result<Self, InferError> {
        let session = backend.load_model(model)?;
        log::info!("pose model loaded via {} backend", backend.name());
        Ok(Self::from_session(session, grabber, config))
    }

    pub fn from_session(session: Box<dyn Session>, grabber: G, config: MoveNetConfig) -> Self {
        Self {
            session,
            grabber,
            config,
        }
    }

    pub fn config(&self) -> &MoveNetConfig {
        &self.config
    }

    /// Preprocess, run and decode one image
    pub fn infer(&mut self, image: &Tensor<u8>) -> Result<RawKeypoints, InferError> {
        let input = preprocess(&image.to_f32(), self.config.input_size)?;

        let input_name = self
            .session
            .input_names()
            .first()
            .ok_or_else(|| InferError::BackendError("model has no inputs".to_string()))?
            .clone();

        let outputs = self.session.run(&[(input_name.as_str(), input)])?;

        // single-output model; fall back to the first map entry if names are absent
        let output = self
            .session
            .output_names()
            .first()
            .and_then(|name| outputs.get(name))
            .or_else(|| outputs.values().next())
            .ok_or_else(|| InferError::BackendError("model produced no outputs".to_string()))?;

        decode_output(output, &self.config)
    }

    fn try_produce(&mut self) -> Result<RawKeypoints, InferError> {
        let image = self.grabber.grab()?;
        self.infer(&image)
    }
}

impl<G: FrameGrabber> DetectionSource for MoveNetSource<G> {
    fn kind(&self) -> SourceKind {
        SourceKind::Model
    }

    fn input_size(&self) -> Vec2<f32> {
        let size = self.config.input_size as f32;
        Vec2::new(size, size)
    }

    fn produce_frame(&mut self) -> RawKeypoints {
        match self.try_produce() {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("pose inference failed, skipping tick: {e}");
                RawKeypoints::empty()
            }
        }
    }
}
