//! Map layer controller: what to draw, and what clicks and drags on shapes do.

use super::events::EventOutcome;
use super::sidebar::SidebarController;
use crate::annotation::{
    Annotation, AnnotationId, AnnotationKind, Geometry, HandleId, Position, Strategy, strategy_for,
};
use crate::slideshow::{ApplyOutcome, Command, EditorStore, Selection, Slideshow};
use log::{debug, warn};

/// An annotation ready to be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderItem<'a> {
    pub annotation: &'a Annotation,
    pub strategy: Strategy,
    pub selected: bool,
}

/// Drawable annotations in slideshow order (first = bottom layer).
///
/// Annotations whose geometry has no strategy are left out.
pub fn render_items<'a>(slideshow: &'a Slideshow, selection: &Selection) -> Vec<RenderItem<'a>> {
    slideshow
        .iter()
        .filter_map(|annotation| {
            let Some(strategy) = strategy_for(annotation) else {
                debug!(
                    "Skipping annotation {} with unrecognised geometry",
                    annotation.id()
                );
                return None;
            };
            Some(RenderItem {
                annotation,
                strategy,
                selected: selection.contains(annotation.id()),
            })
        })
        .collect()
}

/// Click on a drawn shape: selects it like a list click and keeps the map
/// from seeing the click.
pub fn on_shape_click(
    sidebar: &mut SidebarController,
    store: &mut EditorStore,
    id: &AnnotationId,
) -> EventOutcome {
    let outcome = sidebar.on_item_click(store, id);
    EventOutcome::stop(outcome.needs_redraw)
}

/// Handle drag on a drawn shape: stores the reshaped geometry.
pub fn on_shape_edit(
    store: &mut EditorStore,
    id: &AnnotationId,
    handle: HandleId,
    to: Position,
) -> EventOutcome {
    let Some(old) = store.slideshow().find(id).cloned() else {
        debug!("Ignoring drag on missing annotation {}", id);
        return EventOutcome::stop(false);
    };
    let Some(strategy) = strategy_for(&old) else {
        return EventOutcome::stop(false);
    };
    let geometry = strategy.apply_drag(old.geometry(), handle, to);
    if &geometry == old.geometry() {
        return EventOutcome::stop(false);
    }
    let new = old.with_geometry(geometry);
    let outcome = store.apply(Command::EditAnnotation { old, new });
    EventOutcome::stop(outcome.changed())
}

/// A drawing tool finished a shape.
///
/// Geometry that cannot be drawn (too few vertices, bad radius) is refused.
pub fn on_draw_complete(
    store: &mut EditorStore,
    geometry: Geometry,
    kind: AnnotationKind,
) -> ApplyOutcome {
    if let Err(err) = geometry.validate() {
        warn!("Refusing new {} annotation: {}", kind, err);
        return ApplyOutcome::Unchanged;
    }
    store.apply(Command::AddAnnotation { geometry, kind })
}

/// Point tool click: adds a circle with the configured default radius.
pub fn on_point_placed(store: &mut EditorStore, at: Position) -> ApplyOutcome {
    let radius = store.default_point_radius();
    on_draw_complete(store, Geometry::point(at, radius), AnnotationKind::Point)
}
