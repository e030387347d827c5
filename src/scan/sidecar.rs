//! Sidecar lookup for a single model: preview image and trigger words

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Preview image extensions, in lookup priority order
pub const PREVIEW_EXTENSIONS: [&str; 3] = ["jpeg", "jpg", "png"];

/// Trigger word sidecar extension
pub const TRIGGER_EXTENSION: &str = "txt";

/// Contents of a `<name>.txt` trigger file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Triggers {
    /// Whole file, trimmed
    pub text: String,
    /// Non-blank lines in file order
    pub lines: Vec<String>,
}

/// Files of one folder keyed by stem and lowercase extension
///
/// Stems are kept as raw `OsString`s so names that are not valid UTF-8
/// still match their sidecars.
#[derive(Debug, Default)]
pub struct SidecarIndex {
    files: HashMap<(OsString, String), PathBuf>,
}

impl SidecarIndex {
    /// Index the given files. Paths without a stem or extension are skipped.
    pub fn build(files: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut index = SidecarIndex::default();
        for path in files {
            let (Some(stem), Some(ext)) = (path.file_stem(), path.extension()) else {
                continue;
            };
            let key = (stem.to_os_string(), ext.to_string_lossy().to_ascii_lowercase());
            index.files.entry(key).or_insert(path);
        }
        index
    }

    /// Find the sidecar of `model_path` with extension `ext`
    ///
    /// An exact-case `<stem>.<ext>` wins; otherwise any indexed file with
    /// the same stem and the extension in another case.
    pub fn find(&self, model_path: &Path, ext: &str) -> Option<PathBuf> {
        let exact = model_path.with_extension(ext);
        if exact.is_file() {
            return Some(exact);
        }

        let stem = model_path.file_stem()?;
        self.files
            .get(&(stem.to_os_string(), ext.to_ascii_lowercase()))
            .filter(|path| path.is_file())
            .cloned()
    }
}

/// Pick the preview image for the model at `model_path`
///
/// The first existing `<stem>.{jpeg,jpg,png}` wins, falling back to
/// `default_image` so the detail view always has something to show.
pub fn resolve_preview(model_path: &Path, index: &SidecarIndex, default_image: &Path) -> PathBuf {
    PREVIEW_EXTENSIONS
        .iter()
        .find_map(|ext| index.find(model_path, ext))
        .unwrap_or_else(|| default_image.to_path_buf())
}

/// Path of the trigger file that belongs to the model at `model_path`
///
/// Returns the exact-case `<stem>.txt` when no file matches, which
/// `read_triggers` then reports as absent.
pub fn trigger_path(model_path: &Path, index: &SidecarIndex) -> PathBuf {
    index
        .find(model_path, TRIGGER_EXTENSION)
        .unwrap_or_else(|| model_path.with_extension(TRIGGER_EXTENSION))
}

/// Read a trigger file
///
/// Returns `Ok(None)` when the file does not exist. Invalid UTF-8 is
/// replaced rather than rejected and a leading BOM is dropped.
pub fn read_triggers(path: &Path) -> io::Result<Option<Triggers>> {
    if !path.is_file() {
        return Ok(None);
    }

    let bytes = fs::read(path)?;
    let contents = String::from_utf8_lossy(&bytes);
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(&contents);

    Ok(Some(Triggers {
        text: contents.trim().to_string(),
        lines: split_trigger_lines(contents),
    }))
}

/// Split trigger text into lines, skipping whitespace-only ones
///
/// `\n`, `\r\n` and a lone `\r` all end a line.
pub fn split_trigger_lines(text: &str) -> Vec<String> {
    text.split(&['\r', '\n'][..])
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
