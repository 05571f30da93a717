//! Colours and the resolved style used to draw annotations.

use crate::config::StyleConfig;

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use glissemontre::style::Color;
/// let red = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
/// let faded = red.with_alpha(0.25);
/// assert_eq!(faded.a, 0.25);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with a different alpha.
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }
}

pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);
pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);
pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0, 1.0);
pub const ORANGE: Color = Color::new(1.0, 0.5, 0.0, 1.0);
pub const PINK: Color = Color::new(1.0, 0.0, 1.0, 1.0);
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

/// Maps a colour name (case-insensitive) to a palette entry.
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        _ => None,
    }
}

/// Resolved drawing style for annotation shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    /// Outline of unselected shapes
    pub stroke: Color,
    /// Outline and handle colour of selected shapes
    pub selected: Color,
    /// Fill alpha applied to the outline colour
    pub fill_opacity: f64,
    /// Outline width in image pixels
    pub stroke_width: f64,
    /// Side of the square drawn for each edit handle
    pub handle_size: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::from_config(&StyleConfig::default())
    }
}

impl RenderStyle {
    pub fn from_config(config: &StyleConfig) -> Self {
        Self {
            stroke: config.stroke_color.to_color(),
            selected: config.selected_color.to_color(),
            fill_opacity: config.fill_opacity,
            stroke_width: config.stroke_width,
            handle_size: config.stroke_width * 3.0,
        }
    }

    /// Outline colour for a shape in the given selection state.
    pub fn outline(&self, selected: bool) -> Color {
        if selected { self.selected } else { self.stroke }
    }
}
