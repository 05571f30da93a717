//! Controllers that turn UI intents into store commands.
//!
//! Neither controller owns the slideshow: both receive the [`EditorStore`]
//! by `&mut` reference and report back through an [`EventOutcome`] telling
//! the host whether the event should keep propagating and whether anything
//! needs to be redrawn.
//!
//! [`EditorStore`]: crate::slideshow::EditorStore

pub mod events;
pub mod layer;
pub mod sidebar;

pub use events::{DropResult, EventOutcome, Propagation};
pub use layer::{
    RenderItem, on_draw_complete, on_point_placed, on_shape_click, on_shape_edit, render_items,
};
pub use sidebar::{ItemState, ListItem, ListProjection, SidebarController};
