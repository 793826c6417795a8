use std::path::PathBuf;

/// Where model weights come from
#[derive(Debug, Clone)]
pub enum ModelSource {
    File(PathBuf),
    Memory(Vec<u8>),
}
