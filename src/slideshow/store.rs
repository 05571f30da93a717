//! Single-writer state container for the slideshow being edited.

use super::{Selection, Slideshow};
use crate::annotation::{Annotation, AnnotationId, AnnotationKind, Geometry};
use crate::config::EditorConfig;
use log::{debug, warn};
use std::collections::VecDeque;

/// A mutation request, as emitted by the sidebar and layer controllers.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Draw completed: append a new annotation
    AddAnnotation {
        geometry: Geometry,
        kind: AnnotationKind,
    },
    /// Replace the record sharing `old`'s identity
    EditAnnotation { old: Annotation, new: Annotation },
    /// Remove the record sharing this one's identity
    RemoveAnnotation(Annotation),
    /// Drag-and-drop move
    Reorder { start: usize, end: usize },
    /// New slideshow title
    Rename(String),
    SetSelection(Vec<AnnotationId>),
    ToggleSelection(AnnotationId),
    ClearSelection,
}

/// What applying a command did.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    /// Nothing changed (missing target, same value, refused add)
    Unchanged,
    /// The slideshow or the selection changed
    Changed,
    /// A new annotation was appended
    Created(Annotation),
}

impl ApplyOutcome {
    pub fn changed(&self) -> bool {
        !matches!(self, ApplyOutcome::Unchanged)
    }
}

/// Owns the current slideshow snapshot and the selection.
///
/// [`EditorStore::apply`] is the only way to mutate either. Readers take
/// [`EditorStore::snapshot`], a cheap clone that later commands never touch.
#[derive(Debug, Clone)]
pub struct EditorStore {
    current: Slideshow,
    selection: Selection,
    history: VecDeque<Slideshow>,
    undo_depth: usize,
    max_annotations: usize,
    default_point_radius: f64,
}

impl EditorStore {
    pub fn new(slideshow: Slideshow, config: &EditorConfig) -> Self {
        Self {
            current: slideshow,
            selection: Selection::new(config.selection_mode),
            history: VecDeque::new(),
            undo_depth: config.undo_depth,
            max_annotations: config.max_annotations,
            default_point_radius: config.default_point_radius,
        }
    }

    /// Current slideshow value.
    pub fn snapshot(&self) -> Slideshow {
        self.current.clone()
    }

    pub fn slideshow(&self) -> &Slideshow {
        &self.current
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Radius configured for newly drawn points.
    pub fn default_point_radius(&self) -> f64 {
        self.default_point_radius
    }

    /// Number of snapshots available to [`EditorStore::undo`].
    pub fn undo_len(&self) -> usize {
        self.history.len()
    }

    /// Applies a command and reports what happened.
    pub fn apply(&mut self, command: Command) -> ApplyOutcome {
        debug!("Applying {}", command_name(&command));
        let outcome = match command {
            Command::AddAnnotation { geometry, kind } => {
                if self.max_annotations > 0 && self.current.len() >= self.max_annotations {
                    warn!(
                        "Slideshow {} already holds {} annotations (limit {}); ignoring new shape",
                        self.current.id(),
                        self.current.len(),
                        self.max_annotations
                    );
                    ApplyOutcome::Unchanged
                } else {
                    let (next, created) = self.current.add_annotation(geometry, kind);
                    self.commit(next);
                    ApplyOutcome::Created(created)
                }
            }
            Command::EditAnnotation { old, new } => {
                let next = self.current.edit_annotation(&old, new);
                self.commit(next)
            }
            Command::RemoveAnnotation(target) => {
                let next = self.current.remove_annotation(&target);
                self.commit(next)
            }
            Command::Reorder { start, end } => {
                let next = self.current.reorder(start, end);
                self.commit(next)
            }
            Command::Rename(name) => {
                let next = self.current.rename(name);
                self.commit(next)
            }
            Command::SetSelection(ids) => {
                let next = self.selection.set(ids, &self.current);
                self.select(next)
            }
            Command::ToggleSelection(id) => {
                let next = self.selection.toggle(&id, &self.current);
                self.select(next)
            }
            Command::ClearSelection => {
                let next = self.selection.clear();
                self.select(next)
            }
        };
        self.selection = self.selection.retain_existing(&self.current);
        outcome
    }

    /// Restores the slideshow as it was before the last change.
    ///
    /// Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop_back() {
            Some(previous) => {
                self.current = previous;
                self.selection = self.selection.retain_existing(&self.current);
                true
            }
            None => false,
        }
    }

    fn commit(&mut self, next: Slideshow) -> ApplyOutcome {
        if next.ptr_eq(&self.current) {
            return ApplyOutcome::Unchanged;
        }
        if self.undo_depth > 0 {
            if self.history.len() == self.undo_depth {
                self.history.pop_front();
            }
            self.history
                .push_back(std::mem::replace(&mut self.current, next));
        } else {
            self.current = next;
        }
        ApplyOutcome::Changed
    }

    fn select(&mut self, next: Selection) -> ApplyOutcome {
        if next == self.selection {
            ApplyOutcome::Unchanged
        } else {
            self.selection = next;
            ApplyOutcome::Changed
        }
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::AddAnnotation { .. } => "add-annotation",
        Command::EditAnnotation { .. } => "edit-annotation",
        Command::RemoveAnnotation(_) => "remove-annotation",
        Command::Reorder { .. } => "reorder",
        Command::Rename(_) => "rename",
        Command::SetSelection(_) => "set-selection",
        Command::ToggleSelection(_) => "toggle-selection",
        Command::ClearSelection => "clear-selection",
    }
}
