use std::path::{Path, PathBuf};

use super::data::ModelRecord;
use crate::scan::{self, ScanError};

/// Default preview shown for models without an image of their own
pub const DEFAULT_IMAGE: &str = "assets/default_preview.png";

/// The Library holds the models of the currently open folder.
///
/// Every load replaces the whole snapshot; records from a previous folder
/// (or a previous scan of the same folder) are never reused.
pub struct Library {
    folder: PathBuf,
    default_image: PathBuf,
    records: Vec<ModelRecord>,
    selected: Option<usize>,
}

impl Library {
    /// Create an empty library with no folder open
    pub fn new(default_image: impl Into<PathBuf>) -> Self {
        Library {
            folder: PathBuf::new(),
            default_image: default_image.into(),
            records: Vec::new(),
            selected: None,
        }
    }

    /// Open a folder: scan it and replace the current list.
    ///
    /// The folder becomes current even if the scan fails, so a later
    /// reload or the saved config still point at it. On failure the list
    /// is left empty.
    pub fn load_folder(&mut self, folder: impl Into<PathBuf>) -> Result<usize, ScanError> {
        self.folder = folder.into();
        self.selected = None;
        self.records.clear();

        self.records = scan::scan_folder(&self.folder, &self.default_image)?;
        Ok(self.records.len())
    }

    /// Scan the current folder again from scratch
    pub fn reload(&mut self) -> Result<usize, ScanError> {
        let folder = self.folder.clone();
        self.load_folder(folder)
    }

    /// Select a model by its position in the list.
    /// Out of range indices leave the selection alone.
    pub fn select(&mut self, index: usize) {
        if index < self.records.len() {
            self.selected = Some(index);
        }
    }

    /// The selected model, if any
    pub fn selected(&self) -> Option<&ModelRecord> {
        self.selected.and_then(|i| self.records.get(i))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Get the currently open folder (empty if none)
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn records(&self) -> &[ModelRecord] {
        &self.records
    }

    pub fn default_image(&self) -> &Path {
        &self.default_image
    }
}

// Implement Debug for better error messages
impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("folder", &self.folder)
            .field("records", &self.records.len())
            .field("selected", &self.selected)
            .finish()
    }
}
