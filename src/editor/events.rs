//! Event results shared by the sidebar and layer controllers.

/// Whether an event should continue to the element underneath.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Let parents (list container, map) see the event too
    Continue,
    /// The event was consumed here
    Stop,
}

/// What handling an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventOutcome {
    pub propagation: Propagation,
    /// Selection, editing state or the slideshow changed
    pub needs_redraw: bool,
}

impl EventOutcome {
    /// Consumed event.
    pub fn stop(needs_redraw: bool) -> Self {
        Self {
            propagation: Propagation::Stop,
            needs_redraw,
        }
    }

    /// Event that parents may still handle.
    pub fn proceed(needs_redraw: bool) -> Self {
        Self {
            propagation: Propagation::Continue,
            needs_redraw,
        }
    }

    pub fn stops_propagation(&self) -> bool {
        self.propagation == Propagation::Stop
    }
}

/// Result of a drag-and-drop gesture in the annotation list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropResult {
    /// Index the dragged item started at
    pub source: usize,
    /// Index it was dropped at, `None` when dropped outside the list
    pub destination: Option<usize>,
}
