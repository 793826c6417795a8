use skel_base::Vec2;

use super::types::{CoordinateSpace, Frame, Joint, RawKeypoints};

/// Map raw detector keypoints onto a destination canvas.
///
/// Normalized input is scaled by the destination size directly; pixel input is
/// first divided by the source size. Confidence passes through untouched and
/// nothing is clamped or culled, so the output has one joint per input point.
///
/// Returns an empty frame for empty input, or for pixel input with a
/// non-positive source size.
pub fn map_keypoints(
    raw: &RawKeypoints,
    src_width: f32,
    src_height: f32,
    dst_width: f32,
    dst_height: f32,
) -> Frame {
    if raw.is_empty() {
        return Frame::empty();
    }

    let to_normalized = match raw.space {
        CoordinateSpace::Normalized => Vec2::new(1.0, 1.0),
        CoordinateSpace::Pixels => {
            if !(src_width > 0.0 && src_height > 0.0) {
                log::warn!(
                    "cannot map pixel keypoints from a {src_width}x{src_height} source"
                );
                return Frame::empty();
            }
            Vec2::new(1.0 / src_width, 1.0 / src_height)
        }
    };
    let scale = to_normalized * Vec2::new(dst_width, dst_height);

    raw.points
        .iter()
        .map(|p| Joint {
            position: Vec2::new(p.x, p.y) * scale,
            confidence: p.confidence,
        })
        .collect::<Vec<_>>()
        .into()
}
