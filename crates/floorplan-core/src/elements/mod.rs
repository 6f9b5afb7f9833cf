//! Floor element definitions.

mod factory;
mod numbering;

pub use factory::{ElementRequest, clone_element, make_element};

use crate::geometry::Bounds;
use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque, never-reused element identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(format!("el-{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Variant-specific data of a floor element.
///
/// Serialized with a `type` discriminant next to the shared fields. Unknown
/// discriminants load as [`ElementKind::Wall`] so every loaded element stays
/// renderable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ElementKind {
    /// A single numbered table.
    Table {
        #[serde(deserialize_with = "numbering::deserialize_number")]
        table_number: u32,
        seats: u32,
        /// Link to the back-office table record.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        table_id: Option<String>,
    },
    /// Several tables pushed together and seated as one.
    TableGroup {
        #[serde(deserialize_with = "numbering::deserialize_numbers")]
        table_numbers: Vec<u32>,
        seats: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        table_ids: Option<Vec<String>>,
    },
    Bar {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    /// A named area (terrace, smoking section, ...).
    Zone {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
    Entrance {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    /// Plain wall segment; also what unknown types load as.
    #[serde(other)]
    Wall,
}

impl ElementKind {
    /// Size given to a freshly created element of this kind.
    pub fn default_size(&self) -> Size {
        match self {
            ElementKind::Table { .. } | ElementKind::TableGroup { .. } => Size::new(80.0, 80.0),
            ElementKind::Bar { .. } => Size::new(120.0, 60.0),
            ElementKind::Zone { .. } => Size::new(200.0, 120.0),
            ElementKind::Wall => Size::new(60.0, 20.0),
            ElementKind::Entrance { .. } => Size::new(80.0, 40.0),
        }
    }

    /// The serialized discriminant.
    pub fn type_name(&self) -> &'static str {
        match self {
            ElementKind::Table { .. } => "table",
            ElementKind::TableGroup { .. } => "tableGroup",
            ElementKind::Bar { .. } => "bar",
            ElementKind::Zone { .. } => "zone",
            ElementKind::Wall => "wall",
            ElementKind::Entrance { .. } => "entrance",
        }
    }
}

/// One object placed on the floor canvas.
///
/// Elements are values: every edit produces a new `Element`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    #[serde(flatten)]
    pub bounds: Bounds,
    /// Zone this element belongs to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
    /// Stacking order; higher draws on top.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    /// Create an element with a fresh identifier.
    pub fn new(kind: ElementKind, bounds: Bounds) -> Self {
        Self {
            id: ElementId::generate(),
            bounds,
            zone_id: None,
            z_index: None,
            kind,
        }
    }

    /// Same element with different bounds.
    pub fn with_bounds(&self, bounds: Bounds) -> Self {
        Self {
            bounds,
            ..self.clone()
        }
    }

    /// Table number, for single tables.
    pub fn table_number(&self) -> Option<u32> {
        match self.kind {
            ElementKind::Table { table_number, .. } => Some(table_number),
            _ => None,
        }
    }

    /// Stacking value, with unset treated as 0.
    pub fn stacking(&self) -> i64 {
        self.z_index.unwrap_or(0)
    }

    pub fn is_table(&self) -> bool {
        matches!(self.kind, ElementKind::Table { .. })
    }

    /// Merge a patch into a copy of this element.
    ///
    /// Bounds are replaced wholesale. Variant fields only apply to the
    /// variants that carry them; the rest are ignored.
    pub fn patched(&self, patch: &ElementPatch) -> Self {
        let mut next = self.clone();

        if let Some(bounds) = patch.bounds {
            next.bounds = bounds;
        }
        if let Some(zone_id) = &patch.zone_id {
            next.zone_id = Some(zone_id.clone());
        }
        if let Some(z_index) = patch.z_index {
            next.z_index = Some(z_index);
        }

        match &mut next.kind {
            ElementKind::Table {
                table_number, seats, ..
            } => {
                if let Some(number) = patch.table_number {
                    *table_number = number;
                }
                if let Some(count) = patch.seats {
                    *seats = count;
                }
            }
            ElementKind::TableGroup {
                table_numbers,
                seats,
                ..
            } => {
                if let Some(numbers) = &patch.table_numbers {
                    *table_numbers = numbers.clone();
                }
                if let Some(count) = patch.seats {
                    *seats = count;
                }
            }
            ElementKind::Bar { label } | ElementKind::Entrance { label } => {
                if let Some(text) = &patch.label {
                    *label = Some(text.clone());
                }
            }
            ElementKind::Zone { name, color } => {
                if let Some(text) = &patch.name {
                    *name = text.clone();
                }
                if let Some(value) = &patch.color {
                    *color = Some(value.clone());
                }
            }
            ElementKind::Wall => {}
        }

        next
    }
}

/// Partial update for a single element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementPatch {
    pub bounds: Option<Bounds>,
    pub color: Option<String>,
    pub name: Option<String>,
    pub table_number: Option<u32>,
    pub table_numbers: Option<Vec<u32>>,
    pub seats: Option<u32>,
    pub label: Option<String>,
    pub zone_id: Option<String>,
    pub z_index: Option<i64>,
}

impl ElementPatch {
    /// A patch that only moves/resizes.
    pub fn bounds(bounds: Bounds) -> Self {
        Self {
            bounds: Some(bounds),
            ..Self::default()
        }
    }

    /// A patch that only restacks.
    pub fn z_index(z_index: i64) -> Self {
        Self {
            z_index: Some(z_index),
            ..Self::default()
        }
    }
}
