//! Configuration enum types.

use crate::style::{Color, RED, name_to_color};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How many annotations can be selected at once.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionMode {
    /// Clicking an annotation replaces the selection
    #[default]
    Single,
    /// Clicking toggles an annotation in or out of the selection
    Multi,
}

/// Compression preference for slideshow files.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum CompressionSetting {
    /// Compress once the payload exceeds `auto_compress_threshold_kb`
    #[default]
    Auto,
    /// Always gzip
    On,
    /// Always plain JSON
    Off,
}

/// A colour given either by name or as RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// stroke_color = "blue"
///
/// # Custom RGB color (0-255 per component)
/// selected_color = [255, 128, 0]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color: red, green, blue, yellow, orange, pink, white, black
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Resolves the value to a [`Color`]. Unknown names fall back to red.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => name_to_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using red", name);
                RED
            }),
            ColorSpec::Rgb([r, g, b]) => Color {
                r: *r as f64 / 255.0,
                g: *g as f64 / 255.0,
                b: *b as f64 / 255.0,
                a: 1.0,
            },
        }
    }
}
