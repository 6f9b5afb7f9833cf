//! Construction of new elements from "add" requests.

use super::{Element, ElementId, ElementKind};
use crate::geometry::Bounds;
use serde::{Deserialize, Serialize};

/// What the shell asks for when the operator adds something to the floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ElementRequest {
    Table {
        #[serde(default)]
        table_number: Option<u32>,
        seats: u32,
    },
    TableGroup {
        table_numbers: Vec<u32>,
        seats: u32,
    },
    Bar {
        #[serde(default)]
        label: Option<String>,
    },
    Zone {
        name: String,
        #[serde(default)]
        color: Option<String>,
    },
    Wall,
    Entrance {
        #[serde(default)]
        label: Option<String>,
    },
    /// Anything this build does not know how to place.
    #[serde(other)]
    Other,
}

/// Build an element for `request` at the origin with its default size.
///
/// Unknown requests become a plain wall segment.
pub fn make_element(request: &ElementRequest) -> Element {
    let kind = match request {
        ElementRequest::Table {
            table_number,
            seats,
        } => ElementKind::Table {
            table_number: table_number.unwrap_or(0),
            seats: *seats,
            table_id: None,
        },
        ElementRequest::TableGroup {
            table_numbers,
            seats,
        } => ElementKind::TableGroup {
            table_numbers: table_numbers.clone(),
            seats: *seats,
            table_ids: None,
        },
        ElementRequest::Bar { label } => ElementKind::Bar {
            label: Some(label.clone().unwrap_or_else(|| "Bar".to_string())),
        },
        ElementRequest::Zone { name, color } => ElementKind::Zone {
            name: name.clone(),
            color: color.clone(),
        },
        ElementRequest::Entrance { label } => ElementKind::Entrance {
            label: Some(label.clone().unwrap_or_else(|| "Entrance".to_string())),
        },
        ElementRequest::Wall | ElementRequest::Other => ElementKind::Wall,
    };

    let size = kind.default_size();
    Element::new(kind, Bounds::new(0.0, 0.0, size.width, size.height))
}

/// Copy an element under a new identifier.
pub fn clone_element(element: &Element) -> Element {
    Element {
        id: ElementId::generate(),
        ..element.clone()
    }
}
