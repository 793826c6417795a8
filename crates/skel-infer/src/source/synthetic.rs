use super::{DetectionSource, SourceKind};
use crate::pose::{CoordinateSpace, RawKeypoint, RawKeypoints, COCO_KEYPOINT_COUNT};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use skel_base::Vec2;
use std::f32::consts::TAU;
use std::time::Duration;

/// Shape and timing of the synthetic skeleton
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct SyntheticConfig {
    center_x: f32,
    center_y: f32,
    base_radius: f32,
    radius_swing: f32,
    angular_speed: f32,
    confidence_floor: f32,
    confidence_span: f32,
    seed: Option<u64>,
    tick_interval_ms: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            center_x: 0.5,
            center_y: 0.5,
            base_radius: 0.2,
            radius_swing: 0.075,
            angular_speed: 1.0,
            confidence_floor: 0.8,
            confidence_span: 0.2,
            seed: None,
            tick_interval_ms: 33,
        }
    }
}

impl SyntheticConfig {
    /// Set the circle center in normalized coordinates.
    pub fn with_center(mut self, x: f32, y: f32) -> Self {
        self.center_x = x;
        self.center_y = y;
        self
    }

    /// Set the mean radius and how far it breathes in and out.
    pub fn with_radius(mut self, base: f32, swing: f32) -> Self {
        self.base_radius = base;
        self.radius_swing = swing;
        self
    }

    /// Set how fast the radius oscillates, in radians per second.
    pub fn with_angular_speed(mut self, speed: f32) -> Self {
        self.angular_speed = speed;
        self
    }

    /// Set the confidence range `[floor, floor + span)`.
    pub fn with_confidence(mut self, floor: f32, span: f32) -> Self {
        self.confidence_floor = floor;
        self.confidence_span = span;
        self
    }

    /// Fix the RNG seed for reproducible confidence jitter.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the simulated time step per produced frame. A detection session
    /// replaces it with its own tick interval.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn center(&self) -> Vec2<f32> {
        Vec2::new(self.center_x, self.center_y)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Animated stand-in for a pose model.
///
/// Joint `i` sits at angle `i / K * 2π` on a circle around the configured
/// center whose radius is `base + sin(speed * t + i) * swing`. Time advances
/// one tick interval per produced frame, not by wall clock, so the smoothing
/// alpha means the same thing here as with a live model.
pub struct SyntheticSource {
    config: SyntheticConfig,
    rng: StdRng,
    ticks: u64,
}

impl SyntheticSource {
    pub fn new(config: SyntheticConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            rng,
            ticks: 0,
        }
    }

    pub fn config(&self) -> &SyntheticConfig {
        &self.config
    }

    /// Simulated time, in seconds, of the next frame
    pub fn next_time(&self) -> f32 {
        self.ticks as f32 * self.config.tick_interval().as_secs_f32()
    }

    /// Noise-free joint positions at time `t`, normalized
    pub fn target_at(&self, t: f32) -> Vec<Vec2<f32>> {
        let c = &self.config;
        (0..COCO_KEYPOINT_COUNT)
            .map(|i| {
                let angle = i as f32 / COCO_KEYPOINT_COUNT as f32 * TAU;
                let radius = c.base_radius + (c.angular_speed * t + i as f32).sin() * c.radius_swing;
                Vec2::new(
                    c.center_x + angle.cos() * radius,
                    c.center_y + angle.sin() * radius,
                )
            })
            .collect()
    }

    /// Keypoints at time `t` with jittered confidence
    pub fn frame_at(&mut self, t: f32) -> RawKeypoints {
        let floor = self.config.confidence_floor;
        let span = self.config.confidence_span;
        let points = self
            .target_at(t)
            .into_iter()
            .map(|p| RawKeypoint {
                x: p.x,
                y: p.y,
                confidence: (floor + self.rng.r#gen::<f32>() * span).clamp(0.0, 1.0),
            })
            .collect();
        RawKeypoints::new(points, CoordinateSpace::Normalized)
    }
}

impl DetectionSource for SyntheticSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Synthetic
    }

    fn input_size(&self) -> Vec2<f32> {
        Vec2::new(1.0, 1.0)
    }

    fn set_tick_interval(&mut self, interval: Duration) {
        if interval != self.config.tick_interval() {
            log::debug!(
                "synthetic: stepping {:?} per frame instead of {:?}",
                interval,
                self.config.tick_interval()
            );
        }
        self.config.tick_interval_ms = interval.as_millis() as u64;
    }

    fn produce_frame(&mut self) -> RawKeypoints {
        let t = self.next_time();
        self.ticks += 1;
        self.frame_at(t)
    }
}
