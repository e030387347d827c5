use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::sidecar::{read_triggers, resolve_preview, trigger_path, SidecarIndex, Triggers};
use super::ScanError;
use crate::state::data::ModelRecord;

/// Model file extension (compared case-insensitively)
pub const MODEL_EXTENSION: &str = "safetensors";

/// Scan a folder for model files and their sidecars
///
/// Only the folder itself is listed, subfolders are not entered. A folder
/// that does not exist yields an empty list. Records come back in whatever
/// order the filesystem lists them.
///
/// # Errors
/// Fails if a trigger file exists but cannot be read.
pub fn scan_folder(folder: &Path, default_image: &Path) -> Result<Vec<ModelRecord>, ScanError> {
    scan_folder_with(folder, default_image, read_triggers)
}

/// Scan with a custom trigger file reader
fn scan_folder_with<F>(
    folder: &Path,
    default_image: &Path,
    read: F,
) -> Result<Vec<ModelRecord>, ScanError>
where
    F: Fn(&Path) -> io::Result<Option<Triggers>>,
{
    let mut records = Vec::new();

    if !folder.is_dir() {
        tracing::debug!("Folder does not exist: {}", folder.display());
        return Ok(records);
    }

    tracing::info!("🔍 Scanning folder: {}", folder.display());

    let files: Vec<PathBuf> = WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file())
        .collect();

    let index = SidecarIndex::build(files.iter().cloned());

    for path in files.iter().filter(|path| is_model_file(path)) {
        // Sidecar paths come from the model path itself; the lossy
        // string is only for display
        let Some(name) = path.file_stem().map(|s| s.to_string_lossy().to_string()) else {
            continue;
        };

        let image_path = resolve_preview(path, &index, default_image);

        let trigger_file = trigger_path(path, &index);
        let triggers = read(&trigger_file)
            .map_err(|source| ScanError::ReadTrigger {
                path: trigger_file.clone(),
                source,
            })?
            .unwrap_or_default();

        records.push(ModelRecord {
            name,
            trigger_text: triggers.text,
            trigger_lines: triggers.lines,
            image_path,
        });
    }

    tracing::info!("✅ Found {} models in {}", records.len(), folder.display());

    Ok(records)
}

/// Check if this is a model file by extension
fn is_model_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(MODEL_EXTENSION))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn default_image() -> PathBuf {
        PathBuf::from("assets/default_preview.png")
    }

    fn scan_sorted(folder: &Path) -> Vec<ModelRecord> {
        let mut records = scan_folder(folder, &default_image()).unwrap();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        records
    }

    #[test]
    fn test_missing_folder_is_empty() {
        let temp = tempfile::tempdir().unwrap();
        let records = scan_folder(&temp.path().join("gone"), &default_image()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_empty_path_is_empty() {
        let records = scan_folder(Path::new(""), &default_image()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_no_models() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("a.txt"), "trigger").unwrap();
        fs::write(temp.path().join("a.png"), "").unwrap();
        fs::write(temp.path().join("a.ckpt"), "").unwrap();

        assert!(scan_sorted(temp.path()).is_empty());
    }

    #[test]
    fn test_model_without_sidecars() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("lonely.safetensors"), "").unwrap();

        let records = scan_sorted(temp.path());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "lonely");
        assert_eq!(records[0].trigger_text, "");
        assert!(records[0].trigger_lines.is_empty());
        assert_eq!(records[0].image_path, default_image());
    }

    #[test]
    fn test_jpg_beats_png() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("b.safetensors"), "").unwrap();
        fs::write(temp.path().join("b.png"), "").unwrap();
        fs::write(temp.path().join("b.jpg"), "").unwrap();

        let records = scan_sorted(temp.path());
        assert_eq!(records[0].image_path, temp.path().join("b.jpg"));
    }

    #[test]
    fn test_full_model() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("a.safetensors"), "").unwrap();
        fs::write(temp.path().join("a.txt"), "trigger1\n\ntrigger2").unwrap();
        fs::write(temp.path().join("a.png"), "").unwrap();

        let records = scan_sorted(temp.path());
        assert_eq!(
            records,
            vec![ModelRecord {
                name: "a".to_string(),
                trigger_text: "trigger1\n\ntrigger2".to_string(),
                trigger_lines: vec!["trigger1".to_string(), "trigger2".to_string()],
                image_path: temp.path().join("a.png"),
            }]
        );
        assert!(records[0].has_triggers());
    }

    #[test]
    fn test_several_models() {
        let temp = tempfile::tempdir().unwrap();
        for name in ["anime_style", "detail.v2", "Zebra"] {
            fs::write(temp.path().join(format!("{}.safetensors", name)), "").unwrap();
        }
        fs::write(temp.path().join("detail.v2.txt"), "  more detail  \n").unwrap();

        let records = scan_sorted(temp.path());
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Zebra", "anime_style", "detail.v2"]);
        assert_eq!(records[2].trigger_text, "more detail");
        assert_eq!(records[2].trigger_lines, vec!["  more detail  "]);
    }

    #[test]
    fn test_extension_case_insensitive() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("loud.SafeTensors"), "").unwrap();

        let records = scan_sorted(temp.path());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "loud");
    }

    #[test]
    fn test_does_not_recurse() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("deep.safetensors"), "").unwrap();
        fs::write(temp.path().join("top.safetensors"), "").unwrap();

        let records = scan_sorted(temp.path());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "top");
    }

    #[test]
    fn test_directory_named_like_model_is_skipped() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir(temp.path().join("folder.safetensors")).unwrap();

        assert!(scan_sorted(temp.path()).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_trigger_file_fails() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("c.safetensors"), "").unwrap();
        let trigger = temp.path().join("c.txt");
        fs::write(&trigger, "secret").unwrap();
        fs::set_permissions(&trigger, fs::Permissions::from_mode(0o000)).unwrap();

        // Root can read anything; nothing to assert in that case
        if fs::read(&trigger).is_ok() {
            return;
        }

        let err = scan_folder(temp.path(), &default_image()).unwrap_err();
        assert!(matches!(err, ScanError::ReadTrigger { .. }));
    }

    #[test]
    fn test_trigger_read_error_propagates() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("d.safetensors"), "").unwrap();
        fs::write(temp.path().join("d.txt"), "tag").unwrap();

        let err = scan_folder_with(temp.path(), &default_image(), |_| {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        })
        .unwrap_err();

        match err {
            ScanError::ReadTrigger { path, source } => {
                assert_eq!(path, temp.path().join("d.txt"));
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
            }
        }
    }

    // Exact-case lookups already succeed on case-insensitive filesystems
    #[cfg(target_os = "linux")]
    #[test]
    fn test_sidecars_in_other_case() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("e.safetensors"), "").unwrap();
        fs::write(temp.path().join("e.PNG"), "").unwrap();
        fs::write(temp.path().join("e.TXT"), "upper\r\nlower").unwrap();

        let records = scan_sorted(temp.path());
        assert_eq!(records[0].image_path, temp.path().join("e.PNG"));
        assert_eq!(records[0].trigger_lines, vec!["upper", "lower"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_name_keeps_sidecars() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = tempfile::tempdir().unwrap();
        let file = |ext: &str| {
            let mut name = b"caf\xE9.".to_vec();
            name.extend_from_slice(ext.as_bytes());
            temp.path().join(OsStr::from_bytes(&name))
        };

        // Some filesystems refuse non-UTF-8 names outright
        if fs::write(file("safetensors"), "").is_err() {
            return;
        }
        fs::write(file("png"), "").unwrap();
        fs::write(file("txt"), "tag").unwrap();

        let records = scan_sorted(temp.path());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "caf\u{FFFD}");
        assert_eq!(records[0].image_path, file("png"));
        assert_eq!(records[0].trigger_lines, vec!["tag"]);
    }
}
