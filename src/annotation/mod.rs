//! Annotation records and the per-shape strategies used to draw and edit them.
//!
//! An [`Annotation`] is a GeoJSON-style feature: a tagged [`Geometry`] plus
//! [`Properties`] carrying a stable [`AnnotationId`], a semantic
//! [`AnnotationKind`] and free-form extra fields. [`strategy_for`] picks the
//! [`Strategy`] that knows how to bound, draw and drag a given record.

pub mod geometry;
pub mod properties;
pub mod record;
#[cfg(feature = "render")]
pub mod render;
pub mod strategy;

pub use geometry::{DEFAULT_POINT_RADIUS, Geometry, GeometryError, Position, Ring};
pub use properties::{AnnotationId, AnnotationKind, Properties};
pub use record::Annotation;
#[cfg(feature = "render")]
pub use render::{render_annotations, render_preview_png};
pub use strategy::{Handle, HandleId, Strategy, strategy_for};
