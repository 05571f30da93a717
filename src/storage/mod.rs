//! Slideshow persistence.
//!
//! Each slideshow lives in `<storage_dir>/<id>.json` together with an
//! optional `<id>.json.bak` holding the previous version and an `<id>.lock`
//! file used for advisory locking. Files are written through a temporary
//! file and renamed into place, optionally gzip-compressed.

mod error;
mod file;
mod inventory;
mod options;

pub use error::StorageError;
pub use file::{CURRENT_VERSION, LoadedSlideshow, load_slideshow, load_slideshow_file, save_slideshow};
pub use inventory::{ClearOutcome, SlideshowSummary, delete_slideshow, list_slideshows};
pub use options::{
    CompressionMode, DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES, StorageOptions, options_from_config,
    validate_id,
};
