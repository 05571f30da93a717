//! GeoJSON export of a slideshow.

use crate::annotation::Annotation;
use crate::slideshow::Slideshow;
use anyhow::{Context, Result};
use serde::Serialize;

/// A GeoJSON `FeatureCollection` borrowing the slideshow's annotations.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection<'a> {
    pub name: &'a str,
    pub features: &'a [Annotation],
}

impl<'a> FeatureCollection<'a> {
    pub fn from_slideshow(slideshow: &'a Slideshow) -> Self {
        Self {
            name: slideshow.name(),
            features: slideshow.annotations(),
        }
    }
}

/// Pretty-printed GeoJSON for the slideshow, features in slideshow order.
pub fn to_geojson_string(slideshow: &Slideshow) -> Result<String> {
    serde_json::to_string_pretty(&FeatureCollection::from_slideshow(slideshow))
        .with_context(|| format!("failed to serialise slideshow {}", slideshow.id()))
}
