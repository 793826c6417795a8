use skel_overlay::{OverlayError, OverlaySink, RgbSurface, TickOutput};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct Latest {
    seq: u64,
    output: Option<TickOutput>,
}

/// Hands the most recent tick from the detection loop to the window thread
#[derive(Clone, Debug, Default)]
pub struct SharedOverlay {
    latest: Arc<Mutex<Latest>>,
}

impl SharedOverlay {
    /// Sequence number of the newest tick (0 before the first) and its output
    pub fn latest(&self) -> (u64, Option<TickOutput>) {
        let latest = self.latest.lock().unwrap_or_else(|e| e.into_inner());
        (latest.seq, latest.output.clone())
    }
}

impl OverlaySink for SharedOverlay {
    fn present(&mut self, output: &TickOutput) {
        let mut latest = self.latest.lock().unwrap_or_else(|e| e.into_inner());
        latest.seq += 1;
        latest.output = Some(output.clone());
    }
}

/// Paint a tick's draw list over a copy of the background frame
pub fn compose(
    background: &[u8],
    width: usize,
    height: usize,
    output: Option<&TickOutput>,
) -> Result<RgbSurface, OverlayError> {
    let mut surface = RgbSurface::from_rgb(width, height, background.to_vec())?;
    if let Some(output) = output {
        output.draw.replay(&mut surface);
    }
    Ok(surface)
}
