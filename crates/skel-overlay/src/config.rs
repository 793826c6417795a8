use crate::OverlayError;
use skel_base::Vec2;
use skel_infer::{DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_SMOOTHING_ALPHA, SourceKind};
use std::path::Path;
use std::time::Duration;

/// Overlay and detection loop settings.
///
/// Every field has a default, so a JSON document only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    width: u32,
    height: u32,
    joint_radius: f32,
    stroke_width: f32,
    opacity: f32,
    confidence_threshold: f32,
    smoothing_alpha: f32,
    tick_interval_ms: u64,
    show_skeleton: bool,
    source: SourceKind,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            joint_radius: 8.0,
            stroke_width: 2.0,
            opacity: 0.8,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            smoothing_alpha: DEFAULT_SMOOTHING_ALPHA,
            tick_interval_ms: 33,
            show_skeleton: true,
            source: SourceKind::Synthetic,
        }
    }
}

impl OverlayConfig {
    /// Parse a JSON document; missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, OverlayError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| OverlayError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, OverlayError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| OverlayError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    /// Set the destination canvas size in pixels.
    pub fn with_canvas(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the joint marker radius in pixels.
    pub fn with_joint_radius(mut self, radius: f32) -> Self {
        self.joint_radius = radius;
        self
    }

    /// Set the segment stroke width in pixels.
    pub fn with_stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    pub fn with_smoothing_alpha(mut self, alpha: f32) -> Self {
        self.smoothing_alpha = alpha;
        self
    }

    /// Set the fixed detection tick, independent of the source in use.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn with_show_skeleton(mut self, show: bool) -> Self {
        self.show_skeleton = show;
        self
    }

    pub fn with_source(mut self, source: SourceKind) -> Self {
        self.source = source;
        self
    }

    /// Reject settings that indicate a wiring mistake rather than a runtime condition.
    pub fn validate(&self) -> Result<(), OverlayError> {
        if self.width == 0 || self.height == 0 {
            return Err(OverlayError::Config(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.smoothing_alpha > 0.0 && self.smoothing_alpha <= 1.0) {
            return Err(OverlayError::Config(format!(
                "smoothing_alpha must lie in (0, 1], got {}",
                self.smoothing_alpha
            )));
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(OverlayError::Config(format!(
                "confidence_threshold must lie in [0, 1], got {}",
                self.confidence_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(OverlayError::Config(format!(
                "opacity must lie in [0, 1], got {}",
                self.opacity
            )));
        }
        if !(self.joint_radius >= 0.0 && self.stroke_width >= 0.0) {
            return Err(OverlayError::Config(
                "joint_radius and stroke_width must be non-negative".to_string(),
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(OverlayError::Config("tick_interval_ms must be positive".to_string()));
        }
        Ok(())
    }

    // Getters
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn canvas(&self) -> Vec2<f32> {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn joint_radius(&self) -> f32 {
        self.joint_radius
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn confidence_threshold(&self) -> f32 {
        self.confidence_threshold
    }

    pub fn smoothing_alpha(&self) -> f32 {
        self.smoothing_alpha
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn show_skeleton(&self) -> bool {
        self.show_skeleton
    }

    pub fn source(&self) -> SourceKind {
        self.source
    }
}
