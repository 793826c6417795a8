use skel_base::Rect;

use super::types::{Frame, Joint};

/// Minimum confidence for a joint to be drawn, as a point or as a segment endpoint
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.5;

/// The single confidence predicate shared by point and segment rendering
pub fn is_confident(joint: &Joint, threshold: f32) -> bool {
    joint.confidence >= threshold
}

/// Keep joints with `confidence >= threshold`, in their original order.
///
/// The result is no longer index-aligned with the schema. Anything that walks
/// connections by joint index must test `is_confident` on the unfiltered frame.
pub fn filter_by_confidence(frame: &Frame, threshold: f32) -> Frame {
    frame
        .iter()
        .filter(|j| is_confident(j, threshold))
        .copied()
        .collect::<Vec<_>>()
        .into()
}

/// Axis-aligned box around joints whose confidence is strictly above `threshold`
pub fn pose_bounding_box(frame: &Frame, threshold: f32) -> Option<Rect<f32>> {
    Rect::enclosing(
        frame
            .iter()
            .filter(|j| j.confidence > threshold)
            .map(|j| j.position),
    )
}
