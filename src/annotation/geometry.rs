//! Tagged geometry carried by every annotation.

use crate::util::Bounds;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// `[x, y]` in image coordinates.
pub type Position = [f64; 2];

/// A polygon ring. Closed rings repeat their first vertex at the end.
pub type Ring = Vec<Position>;

/// Radius given to points whose serialized form does not carry one.
pub const DEFAULT_POINT_RADIUS: f64 = 10.0;

fn default_radius() -> f64 {
    DEFAULT_POINT_RADIUS
}

/// Geometry of an annotation, spelled the way GeoJSON spells it.
///
/// The `type` field selects the variant. Tags this build does not know about
/// deserialize to [`Geometry::Unknown`] instead of failing, so a slideshow
/// written by a newer tool still loads (those annotations simply do not render).
/// The raw object is kept and written back unchanged on save.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Circle marker centred on a position
    Point {
        coordinates: Position,
        /// Circle radius in image pixels
        radius: f64,
    },
    /// Outer ring followed by optional holes
    Polygon { coordinates: Vec<Ring> },
    /// Several polygons sharing one annotation
    MultiPolygon { coordinates: Vec<Vec<Ring>> },
    /// Any geometry not recognised by this build, as it was read
    Unknown(Value),
}

/// Wire form of the geometries this build understands.
#[derive(Deserialize)]
#[serde(tag = "type")]
enum Tagged {
    Point {
        coordinates: Position,
        #[serde(default = "default_radius")]
        radius: f64,
    },
    Polygon {
        coordinates: Vec<Ring>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Ring>>,
    },
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum TaggedRef<'a> {
    Point {
        coordinates: &'a Position,
        radius: f64,
    },
    Polygon {
        coordinates: &'a [Ring],
    },
    MultiPolygon {
        coordinates: &'a [Vec<Ring>],
    },
}

const KNOWN_TAGS: [&str; 3] = ["Point", "Polygon", "MultiPolygon"];

impl Serialize for Geometry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let tagged = match self {
            Geometry::Point {
                coordinates,
                radius,
            } => TaggedRef::Point {
                coordinates,
                radius: *radius,
            },
            Geometry::Polygon { coordinates } => TaggedRef::Polygon { coordinates },
            Geometry::MultiPolygon { coordinates } => TaggedRef::MultiPolygon { coordinates },
            Geometry::Unknown(raw) => return raw.serialize(serializer),
        };
        tagged.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Geometry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        let known = raw
            .get("type")
            .and_then(Value::as_str)
            .is_some_and(|tag| KNOWN_TAGS.contains(&tag));
        if !known {
            return Ok(Geometry::Unknown(raw));
        }

        let geometry = match Tagged::deserialize(raw).map_err(de::Error::custom)? {
            Tagged::Point {
                coordinates,
                radius,
            } => Geometry::Point {
                coordinates,
                radius,
            },
            Tagged::Polygon { coordinates } => Geometry::Polygon { coordinates },
            Tagged::MultiPolygon { coordinates } => Geometry::MultiPolygon { coordinates },
        };
        Ok(geometry)
    }
}

impl Geometry {
    /// Creates a point geometry.
    pub fn point(at: Position, radius: f64) -> Self {
        Geometry::Point {
            coordinates: at,
            radius,
        }
    }

    /// Creates a single-ring polygon, closing the ring if needed.
    pub fn polygon(vertices: Vec<Position>) -> Self {
        Geometry::Polygon {
            coordinates: vec![close_ring(vertices)],
        }
    }

    /// Creates the axis-aligned polygon spanned by two opposite corners.
    ///
    /// The ring always starts at the top-left corner and runs clockwise in
    /// screen coordinates: top-left, top-right, bottom-right, bottom-left.
    pub fn rectangle(a: Position, b: Position) -> Self {
        let (min_x, max_x) = (a[0].min(b[0]), a[0].max(b[0]));
        let (min_y, max_y) = (a[1].min(b[1]), a[1].max(b[1]));
        Geometry::Polygon {
            coordinates: vec![vec![
                [min_x, min_y],
                [max_x, min_y],
                [max_x, max_y],
                [min_x, max_y],
                [min_x, min_y],
            ]],
        }
    }

    /// GeoJSON tag of this geometry. Unrecognised geometries report their
    /// own tag, or `"Unknown"` when they carry none.
    pub fn type_name(&self) -> &str {
        match self {
            Geometry::Point { .. } => "Point",
            Geometry::Polygon { .. } => "Polygon",
            Geometry::MultiPolygon { .. } => "MultiPolygon",
            Geometry::Unknown(raw) => raw.get("type").and_then(Value::as_str).unwrap_or("Unknown"),
        }
    }

    /// All rings of the geometry, polygon by polygon. Points have none.
    pub fn rings(&self) -> Vec<&Ring> {
        match self {
            Geometry::Polygon { coordinates } => coordinates.iter().collect(),
            Geometry::MultiPolygon { coordinates } => coordinates.iter().flatten().collect(),
            Geometry::Point { .. } | Geometry::Unknown(_) => Vec::new(),
        }
    }

    /// Bounding box of every coordinate, without any stroke padding.
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Geometry::Point {
                coordinates,
                radius,
            } => Bounds::around(*coordinates, radius.abs()),
            _ => Bounds::from_positions(self.rings().into_iter().flatten().copied()),
        }
    }

    /// Checks that the geometry has enough coordinates to be drawn.
    pub fn validate(&self) -> Result<(), GeometryError> {
        match self {
            Geometry::Point {
                coordinates,
                radius,
            } => {
                if !coordinates.iter().all(|c| c.is_finite()) {
                    return Err(GeometryError::NonFinite);
                }
                if !radius.is_finite() || *radius <= 0.0 {
                    return Err(GeometryError::InvalidRadius(*radius));
                }
                Ok(())
            }
            Geometry::Polygon { .. } | Geometry::MultiPolygon { .. } => {
                let rings = self.rings();
                if rings.is_empty() {
                    return Err(GeometryError::Empty);
                }
                for ring in rings {
                    if ring.iter().flatten().any(|c| !c.is_finite()) {
                        return Err(GeometryError::NonFinite);
                    }
                    let distinct = open_len(ring);
                    if distinct < 3 {
                        return Err(GeometryError::TooFewVertices(distinct));
                    }
                }
                Ok(())
            }
            Geometry::Unknown(_) => Err(GeometryError::Unrecognised),
        }
    }
}

/// Reasons a geometry cannot be drawn.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("geometry has no rings")]
    Empty,
    #[error("a ring needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("radius must be a positive number, got {0}")]
    InvalidRadius(f64),
    #[error("coordinates must be finite numbers")]
    NonFinite,
    #[error("unrecognised geometry type")]
    Unrecognised,
}

/// Returns true when the ring repeats its first vertex at the end.
pub(crate) fn is_closed(ring: &[Position]) -> bool {
    ring.len() > 1 && ring.first() == ring.last()
}

/// Number of vertices excluding the closing duplicate.
pub(crate) fn open_len(ring: &[Position]) -> usize {
    if is_closed(ring) {
        ring.len() - 1
    } else {
        ring.len()
    }
}

fn close_ring(mut vertices: Vec<Position>) -> Ring {
    if let Some(first) = vertices.first().copied() {
        if !is_closed(&vertices) {
            vertices.push(first);
        }
    }
    vertices
}
