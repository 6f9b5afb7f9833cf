//! Floor canvas (one venue layout) and its save payload.

use crate::elements::{Element, ElementId};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

fn default_version() -> u32 {
    1
}

/// The full set of elements plus canvas dimensions for one venue floor.
///
/// Element order is kept stable across property edits; additions append
/// and removals filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorCanvas {
    /// Canvas identifier.
    pub id: String,
    /// Venue this layout belongs to.
    pub venue_id: String,
    /// Display name.
    pub name: String,
    /// Canvas width in canvas units.
    pub width: f64,
    /// Canvas height in canvas units.
    pub height: f64,
    /// Placed elements.
    #[serde(default)]
    pub elements: Vec<Element>,
    /// Storage version, passed through untouched.
    #[serde(default = "default_version")]
    pub version: u32,
}

/// What the external save collaborator receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPayload {
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub elements: Vec<Element>,
}

/// Create an empty first-version layout for a venue.
pub fn create_initial_layout(venue_id: &str, name: &str, width: f64, height: f64) -> FloorCanvas {
    FloorCanvas {
        id: format!("canvas-{venue_id}-1"),
        venue_id: venue_id.to_string(),
        name: name.to_string(),
        width,
        height,
        elements: Vec::new(),
        version: 1,
    }
}

/// Where the `index`-th added element is dropped: rows of five, 100 apart.
pub fn placement_slot(index: usize) -> Point {
    Point::new(
        80.0 + (index % 5) as f64 * 100.0,
        80.0 + (index / 5) as f64 * 100.0,
    )
}

impl FloorCanvas {
    /// Canvas dimensions.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Get an element by ID.
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| &el.id == id)
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.element(id).is_some()
    }

    /// Check if the canvas has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Grow the canvas to at least the given size.
    pub fn ensure_minimum_size(mut self, min_width: f64, min_height: f64) -> Self {
        self.width = self.width.max(min_width);
        self.height = self.height.max(min_height);
        self
    }

    /// The part of the layout handed to the save collaborator.
    pub fn payload(&self) -> LayoutPayload {
        LayoutPayload {
            name: self.name.clone(),
            width: self.width,
            height: self.height,
            elements: self.elements.clone(),
        }
    }

    /// One past the highest single-table number (1 on an empty floor).
    pub fn next_table_number(&self) -> u32 {
        self.elements
            .iter()
            .filter_map(Element::table_number)
            .max()
            .unwrap_or(0)
            .saturating_add(1)
    }

    /// Highest stacking value on the floor; unset counts as 0, and an empty
    /// floor gives 0.
    pub fn max_z_index(&self) -> i64 {
        self.elements.iter().map(Element::stacking).fold(0, i64::max)
    }

    /// Lowest stacking value on the floor, never above 0.
    pub fn min_z_index(&self) -> i64 {
        self.elements.iter().map(Element::stacking).fold(0, i64::min)
    }

    /// Bounding box of all elements.
    pub fn bounds(&self) -> Option<Rect> {
        self.elements
            .iter()
            .map(|el| el.bounds.as_rect())
            .reduce(|acc, rect| acc.union(rect))
    }

    /// Elements under a point, front to back.
    ///
    /// Higher `zIndex` is in front; on ties the later element wins.
    pub fn elements_at_point(&self, point: Point) -> Vec<ElementId> {
        let mut hits: Vec<(i64, usize, &Element)> = self
            .elements
            .iter()
            .enumerate()
            .filter(|(_, el)| el.bounds.contains(point))
            .map(|(order, el)| (el.stacking(), order, el))
            .collect();
        hits.sort_by(|a, b| (b.0, b.1).cmp(&(a.0, a.1)));
        hits.into_iter().map(|(_, _, el)| el.id.clone()).collect()
    }

    /// Serialize the canvas to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a canvas from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
