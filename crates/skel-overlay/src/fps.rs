use std::time::{Duration, Instant};

/// Frames-per-second counter, republished once per elapsed second
#[derive(Debug, Clone, Default)]
pub struct FpsMeter {
    window_start: Option<Instant>,
    frames: u32,
    fps: f32,
}

impl FpsMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one frame at `now`. Returns the new figure when a second has
    /// passed since the window opened.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        let start = *self.window_start.get_or_insert(now);
        self.frames += 1;

        let elapsed = now.saturating_duration_since(start);
        if elapsed < Duration::from_secs(1) {
            return None;
        }

        self.fps = self.frames as f32 / elapsed.as_secs_f32();
        self.frames = 0;
        self.window_start = Some(now);
        Some(self.fps)
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
