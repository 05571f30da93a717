//! The annotation record: a geometry plus its properties.

use super::geometry::Geometry;
use super::properties::{AnnotationId, AnnotationKind, Properties};
use serde::{Deserialize, Serialize};

/// A single labelled geometric region.
///
/// Serialized as a GeoJSON `Feature`. The identifier lives in the properties
/// and cannot be changed once the record exists; edits produce new records
/// through the `with_*` builders, which always keep the identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Annotation {
    geometry: Geometry,
    properties: Properties,
}

impl Annotation {
    /// Creates a record with default properties (empty content).
    pub fn new(id: impl Into<AnnotationId>, geometry: Geometry, kind: AnnotationKind) -> Self {
        Self {
            geometry,
            properties: Properties::new(id.into(), kind),
        }
    }

    pub fn id(&self) -> &AnnotationId {
        self.properties.id()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn kind(&self) -> &AnnotationKind {
        &self.properties.kind
    }

    pub fn content(&self) -> &str {
        &self.properties.content
    }

    /// Copy of this record with different text content.
    pub fn with_content(&self, content: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.properties.content = content.into();
        next
    }

    /// Copy of this record with a different geometry.
    pub fn with_geometry(&self, geometry: Geometry) -> Self {
        Self {
            geometry,
            properties: self.properties.clone(),
        }
    }

    /// Copy of this record with one extra property set.
    pub fn with_property(&self, key: impl Into<String>, value: serde_json::Value) -> Self {
        let mut next = self.clone();
        next.properties.extra.insert(key.into(), value);
        next
    }

    /// Whether both records denote the same annotation, regardless of content.
    pub fn same_identity(&self, other: &Annotation) -> bool {
        self.id() == other.id()
    }

    /// Copy of `self` carrying another identifier.
    pub(crate) fn rebound_to(self, id: &AnnotationId) -> Self {
        Self {
            geometry: self.geometry,
            properties: self.properties.rebound_to(id.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serialises_as_geojson_feature() {
        let annotation = Annotation::new(
            "a1",
            Geometry::point([1.0, 2.0], 5.0),
            AnnotationKind::Point,
        )
        .with_content("look here");

        let value = serde_json::to_value(&annotation).unwrap();
        assert_eq!(value["type"], "Feature");
        assert_eq!(value["geometry"]["type"], "Point");
        assert_eq!(value["properties"]["id"], "a1");
        assert_eq!(value["properties"]["content"], "look here");

        let back: Annotation = serde_json::from_value(value).unwrap();
        assert_eq!(back, annotation);
    }

    #[test]
    fn builders_keep_identity() {
        let original = Annotation::new(
            "a1",
            Geometry::rectangle([0.0, 0.0], [2.0, 2.0]),
            AnnotationKind::Rectangle,
        );
        let moved = original
            .with_geometry(Geometry::rectangle([1.0, 1.0], [3.0, 3.0]))
            .with_property("zoom", json!(4));

        assert!(moved.same_identity(&original));
        assert_ne!(moved, original);
        assert_eq!(moved.properties().extra["zoom"], json!(4));
    }

    #[test]
    fn rebound_keeps_everything_but_the_id() {
        let a = Annotation::new("a", Geometry::point([0.0, 0.0], 3.0), AnnotationKind::Point)
            .with_content("text");
        let rebound = a.clone().rebound_to(&AnnotationId::from("b"));
        assert_eq!(rebound.id().as_str(), "b");
        assert_eq!(rebound.content(), "text");
        assert_eq!(rebound.geometry(), a.geometry());
        assert_eq!(rebound.kind(), a.kind());
    }
}
