//! Shape dispatch: which rendering/editing strategy applies to an annotation.
//!
//! The geometry tag chooses the strategy, with one refinement: a polygon whose
//! semantic type is `rectangle` gets the rectangle strategy, which keeps the
//! shape axis-aligned while its corners are dragged.

use super::geometry::{Geometry, Position, is_closed, open_len};
use super::properties::AnnotationKind;
use super::record::Annotation;
use crate::util::{self, Bounds};

/// Rendering/editing behaviour bound to a geometry kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Circle around a point, with a draggable radius
    Circle,
    /// Free polygon, every vertex draggable
    Polygon,
    /// Axis-aligned box, corners draggable
    Rectangle,
}

/// Identifies one edit handle of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleId {
    /// Circle centre
    Center,
    /// Point on the circle's rim, east of the centre
    Radius,
    /// Vertex of a polygon ring (closing duplicate excluded)
    Vertex {
        polygon: usize,
        ring: usize,
        vertex: usize,
    },
    /// Rectangle corner, clockwise from top-left
    Corner(usize),
}

/// An edit handle and where it currently sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub id: HandleId,
    pub position: Position,
}

/// Picks the strategy for an annotation, or `None` when nothing should render.
pub fn strategy_for(annotation: &Annotation) -> Option<Strategy> {
    match annotation.geometry() {
        Geometry::Point { .. } => Some(Strategy::Circle),
        Geometry::Polygon { .. } | Geometry::MultiPolygon { .. } => {
            if *annotation.kind() == AnnotationKind::Rectangle {
                Some(Strategy::Rectangle)
            } else {
                Some(Strategy::Polygon)
            }
        }
        Geometry::Unknown(_) => None,
    }
}

impl Strategy {
    /// Bounding box of the shape as this strategy draws it.
    pub fn bounds(self, geometry: &Geometry) -> Option<Bounds> {
        match self {
            Strategy::Circle | Strategy::Polygon => geometry.bounds(),
            Strategy::Rectangle => rectangle_bounds(geometry),
        }
    }

    /// Edit handles offered for the geometry.
    pub fn handles(self, geometry: &Geometry) -> Vec<Handle> {
        match (self, geometry) {
            (
                Strategy::Circle,
                Geometry::Point {
                    coordinates,
                    radius,
                },
            ) => vec![
                Handle {
                    id: HandleId::Center,
                    position: *coordinates,
                },
                Handle {
                    id: HandleId::Radius,
                    position: [coordinates[0] + radius, coordinates[1]],
                },
            ],
            (Strategy::Rectangle, _) => rectangle_bounds(geometry)
                .map(|bounds| {
                    bounds
                        .corners()
                        .into_iter()
                        .enumerate()
                        .map(|(index, position)| Handle {
                            id: HandleId::Corner(index),
                            position,
                        })
                        .collect()
                })
                .unwrap_or_default(),
            (Strategy::Polygon, _) => polygons(geometry)
                .iter()
                .enumerate()
                .flat_map(|(polygon, rings)| {
                    rings.iter().enumerate().flat_map(move |(ring, vertices)| {
                        vertices[..open_len(vertices)]
                            .iter()
                            .enumerate()
                            .map(move |(vertex, position)| Handle {
                                id: HandleId::Vertex {
                                    polygon,
                                    ring,
                                    vertex,
                                },
                                position: *position,
                            })
                    })
                })
                .collect(),
            (Strategy::Circle, _) => Vec::new(),
        }
    }

    /// Geometry after dragging `handle` to `to`.
    ///
    /// Handles that do not belong to the geometry leave it unchanged.
    pub fn apply_drag(self, geometry: &Geometry, handle: HandleId, to: Position) -> Geometry {
        match (self, geometry, handle) {
            (Strategy::Circle, Geometry::Point { radius, .. }, HandleId::Center) => {
                Geometry::point(to, *radius)
            }
            (Strategy::Circle, Geometry::Point { coordinates, radius }, HandleId::Radius) => {
                let next = util::distance(*coordinates, to);
                if next > 0.0 {
                    Geometry::point(*coordinates, next)
                } else {
                    Geometry::point(*coordinates, *radius)
                }
            }
            (Strategy::Rectangle, _, HandleId::Corner(corner)) if corner < 4 => {
                match rectangle_bounds(geometry) {
                    Some(bounds) => {
                        resize_rectangle(geometry, bounds.corners()[(corner + 2) % 4], to)
                    }
                    None => geometry.clone(),
                }
            }
            (
                Strategy::Polygon,
                _,
                HandleId::Vertex {
                    polygon,
                    ring,
                    vertex,
                },
            ) => move_vertex(geometry, polygon, ring, vertex, to),
            _ => geometry.clone(),
        }
    }
}

/// Polygons of the geometry; a `Polygon` is a single-member list.
fn polygons(geometry: &Geometry) -> Vec<&Vec<Vec<Position>>> {
    match geometry {
        Geometry::Polygon { coordinates } => vec![coordinates],
        Geometry::MultiPolygon { coordinates } => coordinates.iter().collect(),
        Geometry::Point { .. } | Geometry::Unknown(_) => Vec::new(),
    }
}

/// Rectangles are defined by the outer ring of their first polygon.
fn rectangle_bounds(geometry: &Geometry) -> Option<Bounds> {
    let outer = polygons(geometry).into_iter().next()?.first()?;
    Bounds::from_positions(outer.iter().copied())
}

/// Rebuilds the rectangle from two corners. In a multipolygon only the
/// first member is replaced; the other members are kept as they are.
fn resize_rectangle(geometry: &Geometry, anchor: Position, to: Position) -> Geometry {
    let resized = Geometry::rectangle(anchor, to);
    match (geometry, resized) {
        (
            Geometry::MultiPolygon { coordinates },
            Geometry::Polygon {
                coordinates: first,
            },
        ) => {
            let mut members = coordinates.clone();
            if let Some(slot) = members.first_mut() {
                *slot = first;
            }
            Geometry::MultiPolygon {
                coordinates: members,
            }
        }
        (_, resized) => resized,
    }
}

fn move_vertex(
    geometry: &Geometry,
    polygon: usize,
    ring: usize,
    vertex: usize,
    to: Position,
) -> Geometry {
    let mut next = geometry.clone();
    let target = match &mut next {
        Geometry::Polygon { coordinates } if polygon == 0 => coordinates.get_mut(ring),
        Geometry::MultiPolygon { coordinates } => coordinates
            .get_mut(polygon)
            .and_then(|rings| rings.get_mut(ring)),
        _ => None,
    };
    let Some(vertices) = target else {
        return geometry.clone();
    };
    if vertex >= open_len(vertices) {
        return geometry.clone();
    }

    let closed = is_closed(vertices);
    vertices[vertex] = to;
    if closed && vertex == 0 {
        if let Some(last) = vertices.last_mut() {
            *last = to;
        }
    }
    next
}
