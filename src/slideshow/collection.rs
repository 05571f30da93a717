//! The slideshow: a named, ordered collection of annotations.

use crate::annotation::{Annotation, AnnotationId, AnnotationKind, Geometry};
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Ordered, named collection of annotations.
///
/// The annotation list is an immutable snapshot shared behind an [`Arc`].
/// Every operation returns a new `Slideshow`; operations that change nothing
/// hand back a value sharing the same snapshot (see [`Slideshow::ptr_eq`]),
/// so readers holding the old value never observe a partial update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slideshow {
    id: String,
    name: String,
    annotations: Arc<Vec<Annotation>>,
}

impl Slideshow {
    /// Creates an empty slideshow with a fresh identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), name)
    }

    /// Creates an empty slideshow with a known identifier.
    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            annotations: Arc::new(Vec::new()),
        }
    }

    /// Builds a slideshow from existing records, in order.
    pub fn from_annotations(
        id: impl Into<String>,
        name: impl Into<String>,
        annotations: Vec<Annotation>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            annotations: Arc::new(annotations),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Annotation> {
        self.annotations.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Annotation> {
        self.annotations.get(index)
    }

    pub fn find(&self, id: &AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id() == id)
    }

    pub fn position(&self, id: &AnnotationId) -> Option<usize> {
        self.annotations.iter().position(|a| a.id() == id)
    }

    pub fn contains(&self, id: &AnnotationId) -> bool {
        self.position(id).is_some()
    }

    /// True when both values share the same snapshot, name and id.
    pub fn ptr_eq(&self, other: &Slideshow) -> bool {
        Arc::ptr_eq(&self.annotations, &other.annotations)
            && self.id == other.id
            && self.name == other.name
    }

    /// Appends a new annotation with a fresh id and default properties.
    ///
    /// Returns the new slideshow and the created record.
    pub fn add_annotation(&self, geometry: Geometry, kind: AnnotationKind) -> (Slideshow, Annotation) {
        let mut id = AnnotationId::generate();
        while self.contains(&id) {
            id = AnnotationId::generate();
        }
        let annotation = Annotation::new(id, geometry, kind);
        let next = self.with_annotations(|list| list.push(annotation.clone()));
        debug!(
            "Added {} annotation {} to slideshow {}",
            annotation.kind(),
            annotation.id(),
            self.id
        );
        (next, annotation)
    }

    /// Replaces the record sharing `old`'s identity with `new`.
    ///
    /// Returns the slideshow unchanged when `old` is absent. The replacement
    /// keeps `old`'s identifier even if `new` carries another one.
    pub fn edit_annotation(&self, old: &Annotation, new: Annotation) -> Slideshow {
        let Some(index) = self.position(old.id()) else {
            debug!("Ignoring edit of missing annotation {}", old.id());
            return self.clone();
        };
        let replacement = if new.same_identity(old) {
            new
        } else {
            debug!(
                "Edit of {} tried to change its id to {}; keeping the original id",
                old.id(),
                new.id()
            );
            new.rebound_to(old.id())
        };
        if self.annotations[index] == replacement {
            return self.clone();
        }
        self.with_annotations(|list| list[index] = replacement)
    }

    /// Removes the record sharing `target`'s identity, if present.
    pub fn remove_annotation(&self, target: &Annotation) -> Slideshow {
        match self.position(target.id()) {
            Some(index) => self.with_annotations(|list| {
                list.remove(index);
            }),
            None => {
                debug!("Ignoring removal of missing annotation {}", target.id());
                self.clone()
            }
        }
    }

    /// Moves the element at `start` so it sits at `end` once it has been removed.
    ///
    /// `end` past the end of the shortened list means "last". A `start` with no
    /// element returns the slideshow unchanged.
    pub fn reorder(&self, start: usize, end: usize) -> Slideshow {
        if start >= self.annotations.len() {
            debug!(
                "Ignoring reorder from {} in a slideshow of {}",
                start,
                self.annotations.len()
            );
            return self.clone();
        }
        let end = end.min(self.annotations.len() - 1);
        if start == end {
            return self.clone();
        }
        self.with_annotations(|list| {
            let moved = list.remove(start);
            list.insert(end, moved);
        })
    }

    /// Copy with a new display name.
    pub fn rename(&self, name: impl Into<String>) -> Slideshow {
        let name = name.into();
        if name == self.name {
            return self.clone();
        }
        Slideshow {
            id: self.id.clone(),
            name,
            annotations: Arc::clone(&self.annotations),
        }
    }

    /// Copy under a fresh identifier and a new name, sharing the snapshot.
    ///
    /// Annotation ids are kept: they only need to be unique within one
    /// slideshow.
    pub fn duplicate(&self, name: impl Into<String>) -> Slideshow {
        let copy = Slideshow {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            annotations: Arc::clone(&self.annotations),
        };
        debug!("Duplicated slideshow {} as {}", self.id, copy.id);
        copy
    }

    fn with_annotations(&self, change: impl FnOnce(&mut Vec<Annotation>)) -> Slideshow {
        let mut list = self.annotations.as_ref().clone();
        change(&mut list);
        Slideshow {
            id: self.id.clone(),
            name: self.name.clone(),
            annotations: Arc::new(list),
        }
    }
}

impl<'a> IntoIterator for &'a Slideshow {
    type Item = &'a Annotation;
    type IntoIter = std::slice::Iter<'a, Annotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
