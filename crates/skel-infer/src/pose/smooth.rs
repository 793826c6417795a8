use crate::InferError;

use super::types::{Frame, Joint};

/// Weight of the current frame in the moving average
pub const DEFAULT_SMOOTHING_ALPHA: f32 = 0.7;

/// Exponential moving average of joint positions across ticks.
///
/// `smoothed = alpha * current + (1 - alpha) * previous` per joint and axis.
/// Confidence is taken from `current` as-is so a drop shows up immediately.
///
/// Without a previous frame, or when its length differs from `current`, the
/// current frame is returned unchanged. `alpha` must lie in (0, 1]; anything
/// else, NaN included, is rejected with `InferError::InvalidAlpha`.
pub fn smooth(current: &Frame, previous: Option<&Frame>, alpha: f32) -> Result<Frame, InferError> {
    if !(alpha > 0.0 && alpha <= 1.0) {
        return Err(InferError::InvalidAlpha(alpha));
    }

    let previous = match previous {
        Some(prev) if prev.len() == current.len() => prev,
        Some(prev) => {
            log::debug!(
                "smoothing state has {} joints, frame has {}; passing frame through",
                prev.len(),
                current.len()
            );
            return Ok(current.clone());
        }
        None => return Ok(current.clone()),
    };

    Ok(current
        .iter()
        .zip(previous.iter())
        .map(|(cur, prev)| Joint {
            position: prev.position.lerp(cur.position, alpha),
            confidence: cur.confidence,
        })
        .collect::<Vec<_>>()
        .into())
}
