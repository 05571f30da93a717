//! Slideshow collection, selection, and the editor store.
//!
//! [`Slideshow`] values are immutable snapshots: adding, editing, removing and
//! reordering annotations return new values and never fail. Operations that
//! reference a missing annotation return the input unchanged. [`EditorStore`]
//! is the single writer that swaps the current snapshot as commands arrive.

mod collection;
mod selection;
mod store;

pub use collection::Slideshow;
pub use selection::Selection;
pub use store::{ApplyOutcome, Command, EditorStore};

#[cfg(test)]
mod tests;
