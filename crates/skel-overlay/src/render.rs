use crate::surface::{Marker, Rgb, Segment, Surface};
use crate::{OverlayConfig, OverlayError};
use skel_base::{Rect, Vec2};
use skel_infer::{is_confident, BodyRegion, Frame, KeypointSchema};

const WHITE: Rgb = [0xFF, 0xFF, 0xFF];

/// Overlay color for a body region
pub fn region_color(region: BodyRegion) -> Rgb {
    match region {
        BodyRegion::Face => [0xFF, 0x6B, 0x6B],
        BodyRegion::Torso => [0x4E, 0xCD, 0xC4],
        BodyRegion::LeftArm => [0x45, 0xB7, 0xD1],
        BodyRegion::RightArm => [0x96, 0xCE, 0xB4],
        BodyRegion::LeftLeg => [0xFF, 0xEA, 0xA7],
        BodyRegion::RightLeg => [0xDD, 0xA0, 0xDD],
    }
}

/// What one `render` call emitted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub markers: usize,
    pub segments: usize,
}

/// Draws joints and connections of one frame onto a surface.
///
/// Holds only styling, never state from a previous tick.
#[derive(Debug, Clone)]
pub struct SkeletonRenderer {
    schema: &'static KeypointSchema,
    joint_radius: f32,
    stroke_width: f32,
    opacity: f32,
    threshold: f32,
    show_skeleton: bool,
}

impl SkeletonRenderer {
    pub fn new(schema: &'static KeypointSchema, config: &OverlayConfig) -> Self {
        Self {
            schema,
            joint_radius: config.joint_radius(),
            stroke_width: config.stroke_width(),
            opacity: config.opacity(),
            threshold: config.confidence_threshold(),
            show_skeleton: config.show_skeleton(),
        }
    }

    pub fn schema(&self) -> &'static KeypointSchema {
        self.schema
    }

    /// Draw segments first, then joint markers on top.
    ///
    /// A marker is drawn for every confident joint inside the closed canvas
    /// `[0, w] x [0, h]`; joints outside are skipped rather than clamped. A
    /// segment is drawn when both endpoints are confident, even if one lies
    /// off canvas, and the surface clips it.
    ///
    /// An empty frame draws nothing. Any other frame must have exactly one
    /// joint per schema entry.
    pub fn render<S: Surface + ?Sized>(
        &self,
        frame: &Frame,
        surface: &mut S,
    ) -> Result<RenderSummary, OverlayError> {
        let mut summary = RenderSummary::default();
        if frame.is_empty() {
            return Ok(summary);
        }
        if frame.len() != self.schema.len() {
            return Err(OverlayError::FrameLength {
                expected: self.schema.len(),
                got: frame.len(),
            });
        }
        if !self.show_skeleton {
            return Ok(summary);
        }

        let size = surface.size();
        let canvas = Rect::new(Vec2::zero(), size);

        for connection in self.schema.connections() {
            let (Some(a), Some(b)) = (frame.get(connection.from), frame.get(connection.to)) else {
                log::debug!("connection {}-{} is outside the frame", connection.from, connection.to);
                continue;
            };
            if !(is_confident(a, self.threshold) && is_confident(b, self.threshold)) {
                continue;
            }
            if !(a.position.is_finite() && b.position.is_finite()) {
                continue;
            }
            surface.draw_segment(&Segment {
                connection: *connection,
                from: a.position,
                to: b.position,
                width: self.stroke_width,
                color: region_color(connection.region()),
                alpha: self.opacity,
            });
            summary.segments += 1;
        }

        for (index, joint) in frame.iter().enumerate() {
            if !is_confident(joint, self.threshold) {
                continue;
            }
            if !canvas.contains_point_inclusive(joint.position) {
                continue;
            }
            surface.draw_marker(&Marker {
                joint: index,
                center: joint.position,
                radius: self.joint_radius,
                color: region_color(self.schema.region(index)),
                alpha: self.opacity * joint.confidence.clamp(0.0, 1.0),
                outline: 1.0,
                outline_color: WHITE,
            });
            summary.markers += 1;
        }

        Ok(summary)
    }
}
