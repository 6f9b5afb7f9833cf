//! Editing scripts: the host input events a replay feeds to the editor.

use floorplan_core::{ElementId, ElementRequest, FloorCanvas, GestureMode};
use serde::{Deserialize, Serialize};

/// An element addressed by id, or by its position in the current layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementRef {
    Index(usize),
    Id(String),
}

impl ElementRef {
    /// Resolve against the current layout. Unknown indices resolve to `None`;
    /// ids pass through untouched.
    pub fn resolve(&self, layout: &FloorCanvas) -> Option<ElementId> {
        match self {
            ElementRef::Index(index) => layout.elements.get(*index).map(|el| el.id.clone()),
            ElementRef::Id(id) => Some(ElementId::from(id.as_str())),
        }
    }
}

/// One scripted input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Step {
    /// Press on an element body (`move`) or handle (`resize-*`).
    PointerDown {
        target: ElementRef,
        mode: GestureMode,
        x: f64,
        y: f64,
        /// Ctrl/Meta held.
        #[serde(default)]
        multi: bool,
    },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    PointerLeave,
    BackgroundClick,
    Add { element: ElementRequest },
    /// Add a zone with the next default name and color.
    AddZone,
    RemoveSelected,
    BringToFront,
    SendToBack,
    BringForward,
    SendBackward,
    Copy,
    Paste,
    Undo,
    Redo,
    Save,
}

/// Parse a script: a JSON array of steps.
pub fn parse_script(json: &str) -> Result<Vec<Step>, serde_json::Error> {
    serde_json::from_str(json)
}
