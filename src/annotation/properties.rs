//! Annotation identifiers and the property bag attached to each record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of an annotation, unique within its slideshow.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationId(String);

impl AnnotationId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AnnotationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for AnnotationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Semantic type of an annotation, stored in its `type` property.
///
/// The semantic type is independent from the geometry tag: a rectangle is
/// stored as a polygon whose semantic type is [`AnnotationKind::Rectangle`].
/// Only the exact lowercase spellings are recognised; any other value,
/// including a differently cased one, is preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnnotationKind {
    Point,
    Polygon,
    Rectangle,
    Other(String),
}

impl AnnotationKind {
    pub fn as_str(&self) -> &str {
        match self {
            AnnotationKind::Point => "point",
            AnnotationKind::Polygon => "polygon",
            AnnotationKind::Rectangle => "rectangle",
            AnnotationKind::Other(other) => other,
        }
    }
}

impl From<String> for AnnotationKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "point" => AnnotationKind::Point,
            "polygon" => AnnotationKind::Polygon,
            "rectangle" => AnnotationKind::Rectangle,
            _ => AnnotationKind::Other(value),
        }
    }
}

impl From<&str> for AnnotationKind {
    fn from(value: &str) -> Self {
        AnnotationKind::from(value.to_string())
    }
}

impl From<AnnotationKind> for String {
    fn from(kind: AnnotationKind) -> Self {
        match kind {
            AnnotationKind::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Properties of an annotation.
///
/// `id` and `type` are always present; `content` defaults to an empty string.
/// Any other key is kept in `extra` so it survives a load/save cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    id: AnnotationId,
    /// Semantic type (`point`, `polygon`, `rectangle`, ...)
    #[serde(rename = "type")]
    pub kind: AnnotationKind,
    /// Free text shown in the sidebar and the player
    #[serde(default)]
    pub content: String,
    /// Keys this tool does not interpret
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Properties {
    pub fn new(id: AnnotationId, kind: AnnotationKind) -> Self {
        Self {
            id,
            kind,
            content: String::new(),
            extra: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &AnnotationId {
        &self.id
    }

    pub(crate) fn rebound_to(self, id: AnnotationId) -> Self {
        Self { id, ..self }
    }
}
