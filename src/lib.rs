//! Glissemontre: ordered slideshows of image annotations.
//!
//! The core is a pure collection store ([`slideshow`]) over immutable
//! snapshots of GeoJSON-style [`annotation`]s. The [`editor`] controllers
//! translate sidebar and map-layer intents into store commands, [`storage`]
//! persists slideshows on disk and [`export`] writes them as GeoJSON.

pub mod annotation;
pub mod config;
pub mod editor;
pub mod export;
pub mod slideshow;
pub mod storage;
pub mod style;
pub mod util;

pub use config::Config;
