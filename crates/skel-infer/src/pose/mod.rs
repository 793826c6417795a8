mod filter;
mod mapper;
mod preprocess;
mod schema;
mod smooth;
mod types;

pub use filter::{filter_by_confidence, is_confident, pose_bounding_box, DEFAULT_CONFIDENCE_THRESHOLD};
pub use mapper::map_keypoints;
pub use preprocess::preprocess;
pub use schema::{
    BodyRegion, Connection, KeypointIndex, KeypointSchema, COCO_CONNECTIONS, COCO_KEYPOINT_COUNT,
    COCO_KEYPOINT_NAMES, COCO_SCHEMA,
};
pub use smooth::{smooth, DEFAULT_SMOOTHING_ALPHA};
pub use types::{AxisOrder, CoordinateSpace, Frame, Joint, RawKeypoint, RawKeypoints};
