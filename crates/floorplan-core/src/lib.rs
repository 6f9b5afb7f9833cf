//! Floorplan Core Library
//!
//! Geometry, element model, snapping, the drag/resize interaction engine and
//! the undo/redo history behind the venue floor-layout editor.

pub mod canvas;
pub mod config;
pub mod editor;
pub mod elements;
pub mod error;
pub mod geometry;
pub mod history;
pub mod interaction;
pub mod snap;
pub mod storage;

pub use canvas::{FloorCanvas, LayoutPayload, create_initial_layout, placement_slot};
pub use config::{ConfigError, EditorConfig};
pub use editor::FloorEditor;
pub use elements::{Element, ElementId, ElementKind, ElementPatch, ElementRequest, clone_element, make_element};
pub use error::{Error, Result};
pub use geometry::Bounds;
pub use history::{HistoryState, LayoutAction, MAX_HISTORY, reduce};
pub use interaction::{
    BoundsUpdate, Gesture, GestureMode, InteractionConfig, InteractionEngine, ResizeHandle, apply_gesture,
    handle_position, hit_test_handle,
};
pub use snap::{GRID_SIZE, GridSnap, NoSnap, SnapMode, SnapStrategy, snap_to_grid};
pub use storage::{BoxFuture, FileStorage, LayoutStorage, MemoryStorage, StorageError, StorageResult};
