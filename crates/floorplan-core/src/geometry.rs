//! Axis-aligned bounds shared by every floor element.

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Position and size of an element in canvas units.
///
/// `rotation` (degrees) is stored and carried through edits but never
/// participates in move/resize math.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
    /// Rotation in degrees around the top-left corner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl Bounds {
    /// Create unrotated bounds.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            w,
            h,
            rotation: None,
        }
    }

    /// Set the rotation.
    pub fn with_rotation(mut self, rotation: Option<f64>) -> Self {
        self.rotation = rotation;
        self
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    /// The bounds as a kurbo rectangle (ignores rotation).
    pub fn as_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.w, self.y + self.h)
    }

    pub fn center(&self) -> Point {
        self.as_rect().center()
    }

    /// Check if a point lies inside the bounds.
    pub fn contains(&self, point: Point) -> bool {
        self.as_rect().contains(point)
    }

    /// Same size, shifted by `delta`.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
            ..*self
        }
    }

    /// Fit the bounds inside a canvas of the given size.
    ///
    /// Each side is first clamped to `[min_side, canvas side]`, then the
    /// origin is pushed inside so the whole rectangle is visible.
    pub fn clamp_to(&self, canvas: Size, min_side: f64) -> Self {
        let w = self.w.max(min_side).min(canvas.width);
        let h = self.h.max(min_side).min(canvas.height);
        let max_x = (canvas.width - w).max(0.0);
        let max_y = (canvas.height - h).max(0.0);

        Self {
            x: self.x.max(0.0).min(max_x),
            y: self.y.max(0.0).min(max_y),
            w,
            h,
            rotation: self.rotation,
        }
    }
}

impl From<Rect> for Bounds {
    fn from(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }
}
