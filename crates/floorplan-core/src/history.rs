//! Bounded linear undo/redo over layout snapshots.

use crate::canvas::FloorCanvas;
use crate::elements::{Element, ElementId, ElementPatch};
use std::sync::Arc;

/// Default history depth.
pub const MAX_HISTORY: usize = 50;

/// Size given to added elements that arrive without one.
const FALLBACK_SIDE: f64 = 80.0;

/// Edits understood by the history reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutAction {
    /// Replace the layout and reset history to a single entry.
    SetLayout(FloorCanvas),
    /// Merge fields into one element.
    UpdateElement { id: ElementId, patch: ElementPatch },
    /// Append an element placed at `(x, y)`, stacked on top unless it
    /// already carries a `zIndex`.
    AddElement { element: Element, x: f64, y: f64 },
    RemoveElement { id: ElementId },
    Undo,
    Redo,
}

impl LayoutAction {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            LayoutAction::SetLayout(_) => "SET_LAYOUT",
            LayoutAction::UpdateElement { .. } => "UPDATE_ELEMENT",
            LayoutAction::AddElement { .. } => "ADD_ELEMENT",
            LayoutAction::RemoveElement { .. } => "REMOVE_ELEMENT",
            LayoutAction::Undo => "UNDO",
            LayoutAction::Redo => "REDO",
        }
    }
}

/// Current layout plus the snapshots reachable by undo/redo.
///
/// The current layout is always `history[index]`, so the two can never
/// disagree. Snapshots are shared, so cloning the state is cheap.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryState {
    history: Vec<Arc<FloorCanvas>>,
    index: usize,
    capacity: usize,
}

impl HistoryState {
    /// Seed a one-entry history with the default depth.
    pub fn new(layout: FloorCanvas) -> Self {
        Self::with_capacity(layout, MAX_HISTORY)
    }

    /// Seed a one-entry history keeping at most `capacity` snapshots
    /// (at least one).
    pub fn with_capacity(layout: FloorCanvas, capacity: usize) -> Self {
        Self {
            history: vec![Arc::new(layout)],
            index: 0,
            capacity: capacity.max(1),
        }
    }

    /// The current layout.
    pub fn layout(&self) -> &FloorCanvas {
        &self.history[self.index]
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Always false; a history holds at least the current layout.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Position of the current layout in the history.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.history.len()
    }

    /// Snapshots from oldest to newest.
    pub fn snapshots(&self) -> impl Iterator<Item = &FloorCanvas> {
        self.history.iter().map(Arc::as_ref)
    }

    /// Apply an action in place.
    pub fn apply(&mut self, action: LayoutAction) {
        match action {
            LayoutAction::SetLayout(layout) => {
                self.history = vec![Arc::new(layout)];
                self.index = 0;
            }
            LayoutAction::UpdateElement { id, patch } => {
                let mut next = self.layout().clone();
                next.elements = next
                    .elements
                    .iter()
                    .map(|el| if el.id == id { el.patched(&patch) } else { el.clone() })
                    .collect();
                self.push(next);
            }
            LayoutAction::AddElement { mut element, x, y } => {
                element.bounds.x = x;
                element.bounds.y = y;
                if is_unset(element.bounds.w) {
                    element.bounds.w = FALLBACK_SIDE;
                }
                if is_unset(element.bounds.h) {
                    element.bounds.h = FALLBACK_SIDE;
                }
                let mut next = self.layout().clone();
                if element.z_index.is_none() {
                    element.z_index = Some(next.max_z_index() + 1);
                }
                next.elements.push(element);
                self.push(next);
            }
            LayoutAction::RemoveElement { id } => {
                let mut next = self.layout().clone();
                next.elements.retain(|el| el.id != id);
                self.push(next);
            }
            LayoutAction::Undo => {
                if self.can_undo() {
                    self.index -= 1;
                }
            }
            LayoutAction::Redo => {
                if self.can_redo() {
                    self.index += 1;
                }
            }
        }
    }

    /// Drop the redo branch, append, then trim the oldest entries.
    fn push(&mut self, layout: FloorCanvas) {
        self.history.truncate(self.index + 1);
        self.history.push(Arc::new(layout));
        if self.history.len() > self.capacity {
            let excess = self.history.len() - self.capacity;
            self.history = self.history.split_off(excess);
        }
        self.index = self.history.len() - 1;
    }
}

fn is_unset(side: f64) -> bool {
    side == 0.0 || side.is_nan()
}

/// Pure transition: the next state for `action`, leaving `state` untouched.
pub fn reduce(state: &HistoryState, action: LayoutAction) -> HistoryState {
    let mut next = state.clone();
    next.apply(action);
    next
}
