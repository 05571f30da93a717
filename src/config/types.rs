//! Configuration type definitions.

use super::enums::{ColorSpec, CompressionSetting, SelectionMode};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Editor behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EditorConfig {
    /// Whether clicks replace or toggle the selection
    #[serde(default)]
    pub selection_mode: SelectionMode,

    /// Radius given to newly drawn points, in image pixels (valid range: 1.0 - 500.0)
    #[serde(default = "default_point_radius")]
    pub default_point_radius: f64,

    /// Maximum number of annotations per slideshow (0 = unlimited)
    #[serde(default)]
    pub max_annotations: usize,

    /// Number of snapshots kept for undo (valid range: 0 - 1000, 0 disables undo)
    #[serde(default = "default_undo_depth")]
    pub undo_depth: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            selection_mode: SelectionMode::default(),
            default_point_radius: default_point_radius(),
            max_annotations: 0,
            undo_depth: default_undo_depth(),
        }
    }
}

/// Appearance of annotation shapes in previews.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StyleConfig {
    /// Outline colour of unselected shapes
    #[serde(default = "default_stroke_color")]
    pub stroke_color: ColorSpec,

    /// Outline colour of selected shapes and their handles
    #[serde(default = "default_selected_color")]
    pub selected_color: ColorSpec,

    /// Opacity of the shape fill (valid range: 0.0 - 1.0)
    #[serde(default = "default_fill_opacity")]
    pub fill_opacity: f64,

    /// Outline width in image pixels (valid range: 0.5 - 20.0)
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            stroke_color: default_stroke_color(),
            selected_color: default_selected_color(),
            fill_opacity: default_fill_opacity(),
            stroke_width: default_stroke_width(),
        }
    }
}

/// Where and how slideshows are written to disk.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StorageConfig {
    /// Directory holding slideshow files; defaults to `<data dir>/glissemontre`.
    /// A leading `~/` is expanded to the home directory.
    #[serde(default)]
    pub directory: Option<String>,

    /// Gzip compression of slideshow files
    #[serde(default)]
    pub compress: CompressionSetting,

    /// Payload size above which `compress = "auto"` gzips the file, in KiB
    #[serde(default = "default_auto_compress_threshold_kb")]
    pub auto_compress_threshold_kb: u64,

    /// Largest slideshow file accepted on save or load, in MiB
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,

    /// Keep the previous file as `<id>.json.bak` when saving (0 disables)
    #[serde(default = "default_backup_retention")]
    pub backup_retention: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: None,
            compress: CompressionSetting::default(),
            auto_compress_threshold_kb: default_auto_compress_threshold_kb(),
            max_file_size_mb: default_max_file_size_mb(),
            backup_retention: default_backup_retention(),
        }
    }
}

fn default_point_radius() -> f64 {
    10.0
}

fn default_undo_depth() -> usize {
    50
}

fn default_stroke_color() -> ColorSpec {
    ColorSpec::Name("blue".to_string())
}

fn default_selected_color() -> ColorSpec {
    ColorSpec::Name("orange".to_string())
}

fn default_fill_opacity() -> f64 {
    0.2
}

fn default_stroke_width() -> f64 {
    3.0
}

fn default_auto_compress_threshold_kb() -> u64 {
    100
}

fn default_max_file_size_mb() -> u64 {
    10
}

fn default_backup_retention() -> usize {
    1
}
