use super::StorageError;
use super::file::load_slideshow_file;
use super::options::{StorageOptions, validate_id};
use chrono::{DateTime, FixedOffset};
use log::warn;
use std::fs;
use std::path::Path;

/// One stored slideshow, as shown by `glissemontre list`.
#[derive(Debug, Clone)]
pub struct SlideshowSummary {
    pub id: String,
    pub name: String,
    pub annotation_count: usize,
    pub last_modified: Option<DateTime<FixedOffset>>,
    pub compressed: bool,
    pub size_bytes: u64,
}

/// Result of deleting on-disk slideshow data.
#[derive(Debug, Clone, Copy)]
pub struct ClearOutcome {
    pub removed_file: bool,
    pub removed_backup: bool,
    pub removed_lock: bool,
}

/// Every readable slideshow in the storage directory, sorted by name.
///
/// A missing directory is an empty list. Unreadable files are skipped with
/// a warning so one corrupt slideshow does not hide the others.
pub fn list_slideshows(options: &StorageOptions) -> Result<Vec<SlideshowSummary>, StorageError> {
    let entries = match fs::read_dir(&options.base_dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(StorageError::io("read directory", &options.base_dir, err)),
    };

    let mut summaries = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| StorageError::io("read directory", &options.base_dir, err))?;
        let path = entry.path();
        let Some(id) = slideshow_stem(&path) else {
            continue;
        };
        match load_slideshow_file(&path, options) {
            Ok(loaded) => summaries.push(SlideshowSummary {
                id: id.to_string(),
                name: loaded.slideshow.name().to_string(),
                annotation_count: loaded.slideshow.len(),
                last_modified: loaded.last_modified,
                compressed: loaded.compressed,
                size_bytes: entry.metadata().map(|m| m.len()).unwrap_or(0),
            }),
            Err(err) => warn!("Skipping {}: {}", path.display(), err),
        }
    }

    summaries.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    });
    Ok(summaries)
}

/// Remove the slideshow file together with its backup and lock.
pub fn delete_slideshow(id: &str, options: &StorageOptions) -> Result<ClearOutcome, StorageError> {
    let removed_file = remove_file_if_exists(&options.slideshow_path(id)?)?;
    let removed_backup = remove_file_if_exists(&options.backup_path(id)?)?;
    let removed_lock = remove_file_if_exists(&options.lock_path(id)?)?;

    if !removed_file && !removed_backup {
        return Err(StorageError::NotFound(id.to_string()));
    }

    Ok(ClearOutcome {
        removed_file,
        removed_backup,
        removed_lock,
    })
}

/// `<id>` for files named `<id>.json` with a valid id.
fn slideshow_stem(path: &Path) -> Option<&str> {
    if !path.is_file() {
        return None;
    }
    let stem = path.file_name()?.to_str()?.strip_suffix(".json")?;
    validate_id(stem).ok()?;
    Some(stem)
}

fn remove_file_if_exists(path: &Path) -> Result<bool, StorageError> {
    if path.exists() {
        fs::remove_file(path).map_err(|err| StorageError::io("remove", path, err))?;
        Ok(true)
    } else {
        Ok(false)
    }
}
