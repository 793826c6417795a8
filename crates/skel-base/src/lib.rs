pub mod logging;
pub mod rect;
pub mod tensor;
pub mod vec2;

pub use logging::{init_file_logger, init_stdout_logger, FileLogger, StdoutLogger};
pub use rect::Rect;
pub use tensor::{Tensor, TensorError};
pub use vec2::Vec2;

// Re-export log crate so downstream crates can use skel_base::log::*
pub use log;
