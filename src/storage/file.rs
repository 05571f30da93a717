use super::StorageError;
use super::options::{CompressionMode, StorageOptions};
use crate::slideshow::Slideshow;
use chrono::{DateTime, FixedOffset, Utc};
use flate2::{Compression, bufread::GzDecoder, write::GzEncoder};
use fs2::FileExt;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Newest file format version this build reads and the one it writes.
pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct SlideshowFile {
    version: u32,
    last_modified: String,
    slideshow: Slideshow,
}

/// A slideshow read from disk together with file metadata.
#[derive(Debug, Clone)]
pub struct LoadedSlideshow {
    pub slideshow: Slideshow,
    pub compressed: bool,
    /// `None` when the stored timestamp is missing or malformed
    pub last_modified: Option<DateTime<FixedOffset>>,
}

/// Persist the slideshow under its id.
///
/// Oversized payloads are refused before anything on disk is touched.
pub fn save_slideshow(slideshow: &Slideshow, options: &StorageOptions) -> Result<(), StorageError> {
    let slideshow_path = options.slideshow_path(slideshow.id())?;
    let backup_path = options.backup_path(slideshow.id())?;
    let lock_path = options.lock_path(slideshow.id())?;

    fs::create_dir_all(&options.base_dir)
        .map_err(|err| StorageError::io("create storage directory", &options.base_dir, err))?;

    let lock_file = open_lock_file(&lock_path)?;
    lock_file
        .lock_exclusive()
        .map_err(|err| StorageError::io("lock", &lock_path, err))?;

    let result = save_inner(slideshow, &slideshow_path, &backup_path, options);

    lock_file.unlock().unwrap_or_else(|err| {
        warn!(
            "failed to unlock slideshow file {}: {}",
            lock_path.display(),
            err
        )
    });

    result
}

fn save_inner(
    slideshow: &Slideshow,
    slideshow_path: &Path,
    backup_path: &Path,
    options: &StorageOptions,
) -> Result<(), StorageError> {
    let payload = SlideshowFile {
        version: CURRENT_VERSION,
        last_modified: Utc::now().to_rfc3339(),
        slideshow: slideshow.clone(),
    };

    let mut bytes = serde_json::to_vec_pretty(&payload).map_err(|source| StorageError::Json {
        path: slideshow_path.to_path_buf(),
        source,
    })?;

    let should_compress = match options.compression {
        CompressionMode::Off => false,
        CompressionMode::On => true,
        CompressionMode::Auto => (bytes.len() as u64) >= options.auto_compress_threshold_bytes,
    };

    if should_compress {
        bytes = compress_bytes(&bytes)
            .map_err(|err| StorageError::io("compress", slideshow_path, err))?;
    }

    if bytes.len() as u64 > options.max_file_size_bytes {
        warn!(
            "Slideshow {} would be {} bytes which exceeds the configured limit of {} bytes; refusing to save",
            slideshow.id(),
            bytes.len(),
            options.max_file_size_bytes
        );
        return Err(StorageError::TooLarge {
            path: slideshow_path.to_path_buf(),
            size: bytes.len() as u64,
            limit: options.max_file_size_bytes,
        });
    }

    let tmp_path = temp_path(slideshow_path);
    {
        let mut tmp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
            .map_err(|err| StorageError::io("create temporary file", &tmp_path, err))?;
        tmp_file
            .write_all(&bytes)
            .and_then(|_| tmp_file.sync_all())
            .map_err(|err| StorageError::io("write", &tmp_path, err))?;
    }

    if slideshow_path.exists() {
        if options.backup_retention > 0 {
            if backup_path.exists() {
                fs::remove_file(backup_path).ok();
            }
            fs::rename(slideshow_path, backup_path)
                .map_err(|err| StorageError::io("rotate backup", backup_path, err))?;
        } else {
            fs::remove_file(slideshow_path).ok();
        }
    }

    fs::rename(&tmp_path, slideshow_path)
        .map_err(|err| StorageError::io("move temporary file into", slideshow_path, err))?;

    info!(
        "Slideshow saved to {} ({} annotations, {} bytes, compression={})",
        slideshow_path.display(),
        slideshow.len(),
        bytes.len(),
        should_compress
    );

    Ok(())
}

/// Load the slideshow stored under `id`.
pub fn load_slideshow(id: &str, options: &StorageOptions) -> Result<Slideshow, StorageError> {
    let path = options.slideshow_path(id)?;
    if !path.exists() {
        debug!("No slideshow file at {}", path.display());
        return Err(StorageError::NotFound(id.to_string()));
    }

    let lock_path = options.lock_path(id)?;
    let lock_file = open_lock_file(&lock_path)?;
    lock_file
        .lock_shared()
        .map_err(|err| StorageError::io("lock", &lock_path, err))?;

    let result = load_slideshow_file(&path, options);

    lock_file.unlock().unwrap_or_else(|err| {
        warn!(
            "failed to unlock slideshow file {}: {}",
            lock_path.display(),
            err
        )
    });

    let loaded = result?;
    if loaded.slideshow.id() != id {
        warn!(
            "Slideshow file {} carries id '{}' instead of '{}'",
            path.display(),
            loaded.slideshow.id(),
            id
        );
    }
    info!(
        "Loaded slideshow {} ({} annotations) from {}",
        id,
        loaded.slideshow.len(),
        path.display()
    );
    Ok(loaded.slideshow)
}

/// Read and decode a slideshow file without taking the lock.
pub fn load_slideshow_file(
    path: &Path,
    options: &StorageOptions,
) -> Result<LoadedSlideshow, StorageError> {
    let metadata = fs::metadata(path).map_err(|err| StorageError::io("stat", path, err))?;
    if metadata.len() > options.max_file_size_bytes {
        warn!(
            "Slideshow file {} is {} bytes which exceeds the configured limit ({} bytes); refusing to load",
            path.display(),
            metadata.len(),
            options.max_file_size_bytes
        );
        return Err(StorageError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit: options.max_file_size_bytes,
        });
    }

    let mut file_bytes = Vec::new();
    File::open(path)
        .and_then(|mut file| file.read_to_end(&mut file_bytes))
        .map_err(|err| StorageError::io("read", path, err))?;

    let compressed = is_gzip(&file_bytes);
    let decompressed = if compressed {
        let mut decoder = GzDecoder::new(&file_bytes[..]);
        let mut out = Vec::new();
        decoder
            .read_to_end(&mut out)
            .map_err(|err| StorageError::io("decompress", path, err))?;
        out
    } else {
        file_bytes
    };

    let file: SlideshowFile =
        serde_json::from_slice(&decompressed).map_err(|source| StorageError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    if file.version > CURRENT_VERSION {
        return Err(StorageError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: file.version,
            supported: CURRENT_VERSION,
        });
    }

    let last_modified = match DateTime::<FixedOffset>::parse_from_rfc3339(&file.last_modified) {
        Ok(timestamp) => Some(timestamp),
        Err(err) => {
            debug!(
                "Ignoring malformed timestamp '{}' in {}: {}",
                file.last_modified,
                path.display(),
                err
            );
            None
        }
    };

    Ok(LoadedSlideshow {
        slideshow: file.slideshow,
        compressed,
        last_modified,
    })
}

fn open_lock_file(lock_path: &Path) -> Result<File, StorageError> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path)
        .map_err(|err| StorageError::io("open lock file", lock_path, err))
}

fn compress_bytes(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

fn is_gzip(bytes: &[u8]) -> bool {
    bytes.len() > 2 && bytes[0] == 0x1f && bytes[1] == 0x8b
}

fn temp_path(target: &Path) -> PathBuf {
    let mut candidate = target.with_extension("json.tmp");
    let mut counter = 0u32;
    while candidate.exists() {
        counter += 1;
        candidate = target.with_extension(format!("json.tmp{}", counter));
    }
    candidate
}
