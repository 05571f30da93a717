//! Selected annotations.

use super::Slideshow;
use crate::annotation::AnnotationId;
use crate::config::SelectionMode;

/// Annotations currently highlighted in the editor.
///
/// Ids are kept in the order they were selected, so [`Selection::first`] is
/// the earliest one still selected. In [`SelectionMode::Single`] at most one
/// id is ever held. Every operation only keeps ids present in the slideshow
/// it is given.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    mode: SelectionMode,
    ids: Vec<AnnotationId>,
}

impl Selection {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            ids: Vec::new(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn ids(&self) -> &[AnnotationId] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn first(&self) -> Option<&AnnotationId> {
        self.ids.first()
    }

    pub fn contains(&self, id: &AnnotationId) -> bool {
        self.ids.contains(id)
    }

    /// Selection holding exactly the given ids that exist in `slideshow`.
    ///
    /// Duplicates are dropped. In single mode only the first present id is kept.
    pub fn set<I>(&self, ids: I, slideshow: &Slideshow) -> Selection
    where
        I: IntoIterator<Item = AnnotationId>,
    {
        let mut next = Vec::new();
        for id in ids {
            if slideshow.contains(&id) && !next.contains(&id) {
                next.push(id);
                if self.mode == SelectionMode::Single {
                    break;
                }
            }
        }
        Selection {
            mode: self.mode,
            ids: next,
        }
    }

    /// Flips `id` in or out of the selection; absent ids change nothing.
    ///
    /// In single mode selecting a new id replaces the previous one.
    pub fn toggle(&self, id: &AnnotationId, slideshow: &Slideshow) -> Selection {
        if !slideshow.contains(id) {
            return self.clone();
        }
        let ids = if self.contains(id) {
            self.ids.iter().filter(|x| *x != id).cloned().collect()
        } else {
            match self.mode {
                SelectionMode::Single => vec![id.clone()],
                SelectionMode::Multi => {
                    let mut ids = self.ids.clone();
                    ids.push(id.clone());
                    ids
                }
            }
        };
        Selection {
            mode: self.mode,
            ids,
        }
    }

    /// Empty selection with the same mode.
    pub fn clear(&self) -> Selection {
        Selection::new(self.mode)
    }

    /// Drops ids that no longer exist in `slideshow`.
    pub fn retain_existing(&self, slideshow: &Slideshow) -> Selection {
        Selection {
            mode: self.mode,
            ids: self
                .ids
                .iter()
                .filter(|id| slideshow.contains(id))
                .cloned()
                .collect(),
        }
    }
}
