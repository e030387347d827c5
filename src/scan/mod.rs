//! Model folder scanning
//!
//! This module handles:
//! - Finding model files directly inside a folder
//! - Matching each model with its preview image
//! - Reading trigger words from the `.txt` sidecar

pub mod folder;
pub mod sidecar;

pub use folder::scan_folder;

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("failed to read trigger file {}: {source}", .path.display())]
    ReadTrigger {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
