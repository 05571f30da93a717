use super::StorageError;
use crate::config::{CompressionSetting, StorageConfig};
use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};

pub const DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES: u64 = 100 * 1024; // 100 KiB

const MAX_ID_LEN: usize = 128;

/// Compression preference for slideshow files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    /// Always write plain JSON.
    Off,
    /// Always write gzip-compressed JSON.
    On,
    /// Write gzip when payload exceeds the configured threshold.
    Auto,
}

/// Runtime options derived from configuration for slideshow persistence.
#[derive(Debug, Clone)]
pub struct StorageOptions {
    pub base_dir: PathBuf,
    pub compression: CompressionMode,
    pub auto_compress_threshold_bytes: u64,
    pub max_file_size_bytes: u64,
    /// Any non-zero value keeps one `.json.bak` of the previous save
    pub backup_retention: usize,
}

impl StorageOptions {
    /// Options with default limits rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            compression: CompressionMode::Auto,
            auto_compress_threshold_bytes: DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES,
            max_file_size_bytes: 10 * 1024 * 1024,
            backup_retention: 1,
        }
    }

    pub fn slideshow_path(&self, id: &str) -> Result<PathBuf, StorageError> {
        validate_id(id)?;
        Ok(self.base_dir.join(format!("{id}.json")))
    }

    pub fn backup_path(&self, id: &str) -> Result<PathBuf, StorageError> {
        validate_id(id)?;
        Ok(self.base_dir.join(format!("{id}.json.bak")))
    }

    pub fn lock_path(&self, id: &str) -> Result<PathBuf, StorageError> {
        validate_id(id)?;
        Ok(self.base_dir.join(format!("{id}.lock")))
    }
}

/// Checks that `id` can be used as a file stem.
///
/// Only ASCII letters, digits, `-` and `_` are accepted, so an id can never
/// point outside the storage directory.
pub fn validate_id(id: &str) -> Result<(), StorageError> {
    let valid = !id.is_empty()
        && id.len() <= MAX_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidId(id.to_string()))
    }
}

/// Build runtime storage options from configuration values.
///
/// `override_dir` (from the command line) wins over `storage.directory`.
pub fn options_from_config(
    storage_cfg: &StorageConfig,
    override_dir: Option<&Path>,
) -> Result<StorageOptions> {
    let base_dir = match (override_dir, storage_cfg.directory.as_deref()) {
        (Some(dir), _) => dir.to_path_buf(),
        (None, Some(raw)) => {
            let expanded = expand_tilde(raw);
            if expanded.as_os_str().is_empty() {
                return Err(anyhow!("storage.directory resolved to an empty path"));
            }
            expanded
        }
        (None, None) => dirs::data_dir()
            .ok_or_else(|| anyhow!("could not determine the user data directory"))?
            .join("glissemontre"),
    };

    let mut options = StorageOptions::new(base_dir);
    options.max_file_size_bytes = storage_cfg
        .max_file_size_mb
        .saturating_mul(1024 * 1024)
        .max(1);
    options.auto_compress_threshold_bytes = storage_cfg
        .auto_compress_threshold_kb
        .saturating_mul(1024)
        .max(1);
    options.compression = match storage_cfg.compress {
        CompressionSetting::Auto => CompressionMode::Auto,
        CompressionSetting::On => CompressionMode::On,
        CompressionSetting::Off => CompressionMode::Off,
    };
    options.backup_retention = storage_cfg.backup_retention;

    Ok(options)
}

pub(crate) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
