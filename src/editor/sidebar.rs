//! Annotation list controller.
//!
//! Each list item moves through `Idle -> Selected -> Editing -> Idle`:
//! clicking selects, typing starts an edit buffer, and blur (or submit)
//! commits the buffer when it differs from the stored content. Removing an
//! item ends its lifecycle.

use super::events::{DropResult, EventOutcome};
use crate::annotation::{Annotation, AnnotationId};
use crate::slideshow::{Command, EditorStore};
use log::debug;

/// Display state of a single list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Idle,
    Selected,
    /// Content is being typed and not yet committed
    Editing,
}

/// One row of the annotation list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub index: usize,
    pub annotation: Annotation,
    pub state: ItemState,
    /// Uncommitted text while editing, otherwise the stored content
    pub text: String,
}

/// What the list shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ListProjection {
    /// Sidebar open: every annotation in order
    Full(Vec<ListItem>),
    /// Sidebar hidden: the first selected annotation, or `None` for the placeholder
    Minified(Option<ListItem>),
}

#[derive(Debug, Clone, PartialEq)]
struct EditBuffer {
    id: AnnotationId,
    text: String,
}

/// Bridges list interactions to [`EditorStore`] commands.
#[derive(Debug, Clone)]
pub struct SidebarController {
    editing: Option<EditBuffer>,
    visible: bool,
}

impl Default for SidebarController {
    fn default() -> Self {
        Self::new()
    }
}

impl SidebarController {
    pub fn new() -> Self {
        Self {
            editing: None,
            visible: true,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Opens or closes the sidebar, returning the new visibility.
    pub fn toggle_visibility(&mut self) -> bool {
        self.visible = !self.visible;
        debug!(
            "Sidebar {}",
            if self.visible { "opened" } else { "minified" }
        );
        self.visible
    }

    /// Id of the item currently being edited.
    pub fn editing_id(&self) -> Option<&AnnotationId> {
        self.editing.as_ref().map(|buffer| &buffer.id)
    }

    /// Click on a list item: toggles its selection and drops any edit in
    /// progress on another item.
    pub fn on_item_click(&mut self, store: &mut EditorStore, id: &AnnotationId) -> EventOutcome {
        let dropped_edit = self.discard_edit_unless(id);
        let outcome = store.apply(Command::ToggleSelection(id.clone()));
        if self.editing_id() == Some(id) && !store.selection().contains(id) {
            self.editing = None;
        }
        EventOutcome::stop(dropped_edit || outcome.changed())
    }

    /// Click on the empty part of the list: nothing stays selected.
    pub fn on_background_click(&mut self, store: &mut EditorStore) -> EventOutcome {
        let dropped_edit = self.editing.take().is_some();
        let outcome = store.apply(Command::ClearSelection);
        EventOutcome::proceed(dropped_edit || outcome.changed())
    }

    /// Typing into an item's content field.
    ///
    /// The text is buffered until blur; the item becomes selected if it was not.
    pub fn on_content_input(
        &mut self,
        store: &mut EditorStore,
        id: &AnnotationId,
        text: impl Into<String>,
    ) -> EventOutcome {
        if !store.slideshow().contains(id) {
            debug!("Ignoring input for missing annotation {}", id);
            return EventOutcome::stop(false);
        }
        self.discard_edit_unless(id);
        if !store.selection().contains(id) {
            store.apply(Command::ToggleSelection(id.clone()));
        }
        self.editing = Some(EditBuffer {
            id: id.clone(),
            text: text.into(),
        });
        EventOutcome::stop(true)
    }

    /// Content field lost focus: commits the buffer if it changed anything.
    ///
    /// Empty text is a valid value.
    pub fn on_content_blur(&mut self, store: &mut EditorStore, id: &AnnotationId) -> EventOutcome {
        let buffer = match self.editing.take() {
            Some(buffer) if &buffer.id == id => buffer,
            other => {
                self.editing = other;
                return EventOutcome::stop(false);
            }
        };
        let Some(old) = store.slideshow().find(id).cloned() else {
            debug!("Annotation {} vanished while being edited", id);
            return EventOutcome::stop(true);
        };
        if old.content() == buffer.text {
            return EventOutcome::stop(true);
        }
        let new = old.with_content(buffer.text);
        store.apply(Command::EditAnnotation { old, new });
        EventOutcome::stop(true)
    }

    /// Enter pressed in the content field; same as blur.
    pub fn on_content_submit(&mut self, store: &mut EditorStore, id: &AnnotationId) -> EventOutcome {
        self.on_content_blur(store, id)
    }

    /// Remove button: deletes the item without also selecting it.
    pub fn on_remove_click(&mut self, store: &mut EditorStore, id: &AnnotationId) -> EventOutcome {
        if self.editing_id() == Some(id) {
            self.editing = None;
        }
        let Some(target) = store.slideshow().find(id).cloned() else {
            debug!("Ignoring remove of missing annotation {}", id);
            return EventOutcome::stop(false);
        };
        let outcome = store.apply(Command::RemoveAnnotation(target));
        EventOutcome::stop(outcome.changed())
    }

    /// Drop at the end of a drag. Drops outside the list change nothing.
    pub fn on_drag_end(&mut self, store: &mut EditorStore, drop: DropResult) -> EventOutcome {
        let Some(destination) = drop.destination else {
            debug!("Drag from {} dropped outside the list", drop.source);
            return EventOutcome::proceed(false);
        };
        let outcome = store.apply(Command::Reorder {
            start: drop.source,
            end: destination,
        });
        EventOutcome::proceed(outcome.changed())
    }

    /// Slideshow title lost focus: renames unless blank or unchanged.
    pub fn on_title_blur(&mut self, store: &mut EditorStore, title: &str) -> EventOutcome {
        let title = title.trim();
        if title.is_empty() || title == store.slideshow().name() {
            return EventOutcome::proceed(false);
        }
        let outcome = store.apply(Command::Rename(title.to_string()));
        EventOutcome::proceed(outcome.changed())
    }

    pub fn item_state(&self, store: &EditorStore, id: &AnnotationId) -> ItemState {
        if self.editing_id() == Some(id) {
            ItemState::Editing
        } else if store.selection().contains(id) {
            ItemState::Selected
        } else {
            ItemState::Idle
        }
    }

    /// Rows to display for the current store state.
    pub fn items(&self, store: &EditorStore) -> ListProjection {
        if self.visible {
            ListProjection::Full(
                store
                    .slideshow()
                    .iter()
                    .enumerate()
                    .map(|(index, annotation)| self.list_item(store, index, annotation))
                    .collect(),
            )
        } else {
            let first = store.selection().first().and_then(|id| {
                let index = store.slideshow().position(id)?;
                let annotation = store.slideshow().get(index)?;
                Some(self.list_item(store, index, annotation))
            });
            ListProjection::Minified(first)
        }
    }

    fn list_item(&self, store: &EditorStore, index: usize, annotation: &Annotation) -> ListItem {
        let text = match &self.editing {
            Some(buffer) if &buffer.id == annotation.id() => buffer.text.clone(),
            _ => annotation.content().to_string(),
        };
        ListItem {
            index,
            annotation: annotation.clone(),
            state: self.item_state(store, annotation.id()),
            text,
        }
    }

    /// Drops the edit buffer if it belongs to another item. Returns whether one was dropped.
    fn discard_edit_unless(&mut self, id: &AnnotationId) -> bool {
        match &self.editing {
            Some(buffer) if &buffer.id != id => {
                debug!("Discarding uncommitted edit of {}", buffer.id);
                self.editing = None;
                true
            }
            _ => false,
        }
    }
}
