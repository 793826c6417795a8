//! Skeleton overlay: rendering surfaces, the skeleton renderer, the per-tick
//! pipeline and the detection loop that drives it.

pub mod config;
pub mod error;
pub mod fps;
pub mod pipeline;
pub mod render;
pub mod session;
pub mod surface;

pub use config::OverlayConfig;
pub use error::OverlayError;
pub use fps::FpsMeter;
pub use pipeline::{OverlayPipeline, TickOutput};
pub use render::{region_color, RenderSummary, SkeletonRenderer};
pub use session::{DetectionSession, OverlaySink, SessionStats};
pub use surface::{DrawCommand, DrawList, Marker, Rgb, RgbSurface, Segment, Surface};
