//! Pose landmark processing: keypoint schema, coordinate mapping, confidence
//! filtering, temporal smoothing and the per-tick detection sources.

pub mod backend;
pub mod backends;
pub mod device;
pub mod error;
pub mod modelsource;
pub mod pose;
pub mod session;
pub mod source;

pub use backend::Backend;
pub use device::Device;
pub use error::InferError;
pub use modelsource::ModelSource;
pub use session::Session;

pub use pose::{
    filter_by_confidence, is_confident, map_keypoints, pose_bounding_box, preprocess, smooth,
    AxisOrder, BodyRegion, Connection, CoordinateSpace, Frame, Joint, KeypointIndex,
    KeypointSchema, RawKeypoint, RawKeypoints, COCO_CONNECTIONS, COCO_KEYPOINT_COUNT,
    COCO_KEYPOINT_NAMES, COCO_SCHEMA, DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_SMOOTHING_ALPHA,
};
pub use source::{
    DetectionSource, FrameGrabber, MoveNetConfig, MoveNetSource, SourceKind, SyntheticConfig,
    SyntheticSource,
};
