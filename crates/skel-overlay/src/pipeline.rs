use crate::render::{RenderSummary, SkeletonRenderer};
use crate::surface::DrawList;
use crate::{OverlayConfig, OverlayError};
use skel_base::{Rect, Vec2};
use skel_infer::{
    filter_by_confidence, map_keypoints, pose_bounding_box, smooth, Frame, KeypointSchema,
    RawKeypoints,
};

/// Everything one tick hands to the overlay sink
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutput {
    /// Smoothed, index-aligned joints in canvas pixels. Empty when the tick
    /// produced nothing to draw.
    pub frame: Frame,
    /// Confident joints only, in index order but no longer index-aligned
    pub confident: Frame,
    pub bounds: Option<Rect<f32>>,
    pub draw: DrawList,
    pub summary: RenderSummary,
}

impl TickOutput {
    /// A tick with nothing to draw on a `width` x `height` canvas
    pub fn empty(width: f32, height: f32) -> Self {
        Self {
            frame: Frame::empty(),
            confident: Frame::empty(),
            bounds: None,
            draw: DrawList::new(width, height),
            summary: RenderSummary::default(),
        }
    }
}

/// Map, smooth, filter and render one raw detection per call.
///
/// Owns the smoothing state; a fresh pipeline (or `reset`) starts cold.
#[derive(Debug, Clone)]
pub struct OverlayPipeline {
    canvas: Vec2<f32>,
    threshold: f32,
    alpha: f32,
    renderer: SkeletonRenderer,
    previous: Option<Frame>,
}

impl OverlayPipeline {
    pub fn new(schema: &'static KeypointSchema, config: &OverlayConfig) -> Result<Self, OverlayError> {
        config.validate()?;
        Ok(Self {
            canvas: config.canvas(),
            threshold: config.confidence_threshold(),
            alpha: config.smoothing_alpha(),
            renderer: SkeletonRenderer::new(schema, config),
            previous: None,
        })
    }

    pub fn canvas(&self) -> Vec2<f32> {
        self.canvas
    }

    pub fn previous(&self) -> Option<&Frame> {
        self.previous.as_ref()
    }

    /// Drop the smoothing state
    pub fn reset(&mut self) {
        self.previous = None;
    }

    /// Run one tick. `input_size` is the source's coordinate extent, used
    /// when the raw keypoints are in pixels.
    ///
    /// A frame the renderer rejects drops the smoothing state along with the
    /// error, so the tick after it starts cold.
    pub fn process(
        &mut self,
        raw: &RawKeypoints,
        input_size: Vec2<f32>,
    ) -> Result<TickOutput, OverlayError> {
        let mapped = map_keypoints(raw, input_size.x, input_size.y, self.canvas.x, self.canvas.y);
        let frame = smooth(&mapped, self.previous.as_ref(), self.alpha)?;

        let mut draw = DrawList::new(self.canvas.x, self.canvas.y);
        let summary = match self.renderer.render(&frame, &mut draw) {
            Ok(summary) => summary,
            Err(e) => {
                self.previous = None;
                return Err(e);
            }
        };

        // an empty tick clears the state so the next detection starts cold
        self.previous = if frame.is_empty() {
            None
        } else {
            Some(frame.clone())
        };

        Ok(TickOutput {
            confident: filter_by_confidence(&frame, self.threshold),
            bounds: pose_bounding_box(&frame, self.threshold),
            frame,
            draw,
            summary,
        })
    }
}
