//! Pointer-driven move/resize gestures.
//!
//! A gesture is pointer-down, any number of pointer-moves, then pointer-up.
//! Every update is computed from the bounds captured at pointer-down, never
//! from the previously emitted bounds.

use crate::elements::ElementId;
use crate::geometry::Bounds;
use crate::snap::{NoSnap, SnapStrategy};
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Handle size in canvas units.
pub const HANDLE_SIZE: f64 = 10.0;
/// Handle hit tolerance in canvas units.
pub const HANDLE_HIT_TOLERANCE: f64 = 8.0;

/// One of the eight resize handles (corners and edge midpoints).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl ResizeHandle {
    /// All handles, corners first so they win hit-tests over edges.
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::NW,
        ResizeHandle::NE,
        ResizeHandle::SE,
        ResizeHandle::SW,
        ResizeHandle::N,
        ResizeHandle::E,
        ResizeHandle::S,
        ResizeHandle::W,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResizeHandle::N => "n",
            ResizeHandle::S => "s",
            ResizeHandle::E => "e",
            ResizeHandle::W => "w",
            ResizeHandle::NE => "ne",
            ResizeHandle::NW => "nw",
            ResizeHandle::SE => "se",
            ResizeHandle::SW => "sw",
        }
    }

    fn from_direction(s: &str) -> Option<Self> {
        Some(match s {
            "n" => ResizeHandle::N,
            "s" => ResizeHandle::S,
            "e" => ResizeHandle::E,
            "w" => ResizeHandle::W,
            "ne" => ResizeHandle::NE,
            "nw" => ResizeHandle::NW,
            "se" => ResizeHandle::SE,
            "sw" => ResizeHandle::SW,
            _ => return None,
        })
    }

    /// Drags the left edge.
    pub fn moves_left(self) -> bool {
        matches!(self, ResizeHandle::W | ResizeHandle::NW | ResizeHandle::SW)
    }

    /// Drags the right edge.
    pub fn moves_right(self) -> bool {
        matches!(self, ResizeHandle::E | ResizeHandle::NE | ResizeHandle::SE)
    }

    /// Drags the top edge.
    pub fn moves_top(self) -> bool {
        matches!(self, ResizeHandle::N | ResizeHandle::NE | ResizeHandle::NW)
    }

    /// Drags the bottom edge.
    pub fn moves_bottom(self) -> bool {
        matches!(self, ResizeHandle::S | ResizeHandle::SE | ResizeHandle::SW)
    }
}

/// What a gesture does to its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GestureMode {
    /// Free movement; size unchanged.
    Move,
    /// Resize from one handle.
    Resize(ResizeHandle),
}

impl GestureMode {
    pub fn is_move(self) -> bool {
        self == GestureMode::Move
    }
}

impl fmt::Display for GestureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureMode::Move => f.write_str("move"),
            GestureMode::Resize(handle) => write!(f, "resize-{}", handle.as_str()),
        }
    }
}

/// Error parsing a gesture mode name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown gesture mode: {0:?}")]
pub struct ParseGestureModeError(String);

impl FromStr for GestureMode {
    type Err = ParseGestureModeError;

    /// Accepts `move`, `resize-<dir>` and bare `<dir>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "move" {
            return Ok(GestureMode::Move);
        }
        let direction = s.strip_prefix("resize-").unwrap_or(s);
        ResizeHandle::from_direction(direction)
            .map(GestureMode::Resize)
            .ok_or_else(|| ParseGestureModeError(s.to_string()))
    }
}

impl TryFrom<String> for GestureMode {
    type Error = ParseGestureModeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GestureMode> for String {
    fn from(mode: GestureMode) -> Self {
        mode.to_string()
    }
}

/// Anchor point of a resize handle.
pub fn handle_position(bounds: &Bounds, handle: ResizeHandle) -> Point {
    let rect = bounds.as_rect();
    let center = rect.center();
    let x = if handle.moves_left() {
        rect.x0
    } else if handle.moves_right() {
        rect.x1
    } else {
        center.x
    };
    let y = if handle.moves_top() {
        rect.y0
    } else if handle.moves_bottom() {
        rect.y1
    } else {
        center.y
    };
    Point::new(x, y)
}

/// Find which handle (if any) is under `point`.
pub fn hit_test_handle(bounds: &Bounds, point: Point, tolerance: f64) -> Option<ResizeHandle> {
    ResizeHandle::ALL
        .into_iter()
        .find(|&handle| handle_position(bounds, handle).distance(point) <= tolerance)
}

/// Minimum-size floor applied while resizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionConfig {
    pub min_width: f64,
    pub min_height: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            min_width: 40.0,
            min_height: 40.0,
        }
    }
}

/// State captured at pointer-down.
#[derive(Debug, Clone, PartialEq)]
pub struct Gesture {
    pub element_id: ElementId,
    pub mode: GestureMode,
    pub start_pointer: Point,
    pub start_bounds: Bounds,
}

impl Gesture {
    /// Pointer displacement since pointer-down.
    pub fn delta(&self, pointer: Point) -> Vec2 {
        pointer - self.start_pointer
    }
}

/// Bounds emitted for one element by a pointer move.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundsUpdate {
    pub id: ElementId,
    pub bounds: Bounds,
}

/// Compute new bounds for `mode` after the pointer moved by `delta`.
///
/// Resizes clamp the size to the configured floor but offset the dragged
/// left/top edge by the raw delta, so past the floor that edge detaches from
/// the opposite one. Size snapping runs after the clamp.
pub fn apply_gesture(
    start: &Bounds,
    mode: GestureMode,
    delta: Vec2,
    config: &InteractionConfig,
    snap: &dyn SnapStrategy,
) -> Bounds {
    let handle = match mode {
        GestureMode::Move => {
            let origin = snap.snap_point(start.origin() + delta);
            return Bounds {
                x: origin.x,
                y: origin.y,
                ..*start
            };
        }
        GestureMode::Resize(handle) => handle,
    };

    let mut x = start.x;
    let mut y = start.y;
    let mut w = start.w;
    let mut h = start.h;

    if handle.moves_right() {
        w = config.min_width.max(start.w + delta.x);
    } else if handle.moves_left() {
        w = config.min_width.max(start.w - delta.x);
        x = start.x + delta.x;
    }

    if handle.moves_bottom() {
        h = config.min_height.max(start.h + delta.y);
    } else if handle.moves_top() {
        h = config.min_height.max(start.h - delta.y);
        y = start.y + delta.y;
    }

    let size = snap.snap_size(Size::new(w, h));
    Bounds {
        x,
        y,
        w: size.width,
        h: size.height,
        rotation: start.rotation,
    }
}

/// Per-gesture state machine.
///
/// Holds at most one active gesture; a new pointer-down replaces it.
pub struct InteractionEngine {
    config: InteractionConfig,
    snap: Box<dyn SnapStrategy>,
    active: Option<Gesture>,
    selected: Option<ElementId>,
    is_dragging: bool,
    is_resizing: bool,
}

impl fmt::Debug for InteractionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionEngine")
            .field("config", &self.config)
            .field("active", &self.active)
            .field("selected", &self.selected)
            .field("is_dragging", &self.is_dragging)
            .field("is_resizing", &self.is_resizing)
            .finish_non_exhaustive()
    }
}

impl Default for InteractionEngine {
    fn default() -> Self {
        Self::new(InteractionConfig::default())
    }
}

impl InteractionEngine {
    /// Create an engine with no snapping.
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            snap: Box::new(NoSnap),
            active: None,
            selected: None,
            is_dragging: false,
            is_resizing: false,
        }
    }

    /// Use a different snap strategy.
    pub fn with_snap(mut self, snap: impl SnapStrategy + 'static) -> Self {
        self.snap = Box::new(snap);
        self
    }

    pub fn set_snap(&mut self, snap: Box<dyn SnapStrategy>) {
        self.snap = snap;
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Record a gesture start. Selects the element as a side effect.
    pub fn begin_gesture(&mut self, element_id: ElementId, mode: GestureMode, pointer: Point, bounds: Bounds) {
        log::trace!("begin {mode} on {element_id} at ({}, {})", pointer.x, pointer.y);
        self.selected = Some(element_id.clone());
        self.is_dragging = mode.is_move();
        self.is_resizing = !self.is_dragging;
        self.active = Some(Gesture {
            element_id,
            mode,
            start_pointer: pointer,
            start_bounds: bounds,
        });
    }

    /// Bounds for the active gesture at `pointer`, or `None` when idle.
    pub fn update_gesture(&self, pointer: Point) -> Option<BoundsUpdate> {
        let gesture = self.active.as_ref()?;
        let bounds = apply_gesture(
            &gesture.start_bounds,
            gesture.mode,
            gesture.delta(pointer),
            &self.config,
            self.snap.as_ref(),
        );
        Some(BoundsUpdate {
            id: gesture.element_id.clone(),
            bounds,
        })
    }

    /// Finish the active gesture, if any.
    pub fn end_gesture(&mut self) {
        if let Some(gesture) = self.active.take() {
            log::trace!("end {} on {}", gesture.mode, gesture.element_id);
        }
        self.is_dragging = false;
        self.is_resizing = false;
    }

    pub fn set_selected(&mut self, id: Option<ElementId>) {
        self.selected = id;
    }

    pub fn selected(&self) -> Option<&ElementId> {
        self.selected.as_ref()
    }

    pub fn active_gesture(&self) -> Option<&Gesture> {
        self.active.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn is_resizing(&self) -> bool {
        self.is_resizing
    }
}
