//! In-memory storage implementation.

use super::{BoxFuture, LayoutStorage, StorageError, StorageResult};
use crate::canvas::FloorCanvas;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

/// Canvases of one venue, by canvas id.
type VenueCanvases = BTreeMap<String, FloorCanvas>;

/// In-memory storage for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStorage {
    venues: RwLock<HashMap<String, VenueCanvases>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {e}"))
}

impl LayoutStorage for MemoryStorage {
    fn save(&self, layout: &FloorCanvas) -> BoxFuture<'_, StorageResult<()>> {
        let layout = layout.clone();
        Box::pin(async move {
            let mut venues = self.venues.write().map_err(lock_error)?;
            log::debug!(
                "memory: save {}/{} v{} ({} elements)",
                layout.venue_id,
                layout.id,
                layout.version,
                layout.len()
            );
            venues
                .entry(layout.venue_id.clone())
                .or_default()
                .insert(layout.id.clone(), layout);
            Ok(())
        })
    }

    fn load_canvas(&self, venue_id: &str, canvas_id: &str) -> BoxFuture<'_, StorageResult<FloorCanvas>> {
        let venue_id = venue_id.to_string();
        let canvas_id = canvas_id.to_string();
        Box::pin(async move {
            let venues = self.venues.read().map_err(lock_error)?;
            venues
                .get(&venue_id)
                .and_then(|canvases| canvases.get(&canvas_id))
                .cloned()
                .ok_or_else(|| StorageError::NotFound(format!("{venue_id}/{canvas_id}")))
        })
    }

    fn canvases(&self, venue_id: &str) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        let venue_id = venue_id.to_string();
        Box::pin(async move {
            let venues = self.venues.read().map_err(lock_error)?;
            Ok(venues
                .get(&venue_id)
                .map(|canvases| canvases.keys().cloned().collect())
                .unwrap_or_default())
        })
    }

    fn delete(&self, venue_id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let venue_id = venue_id.to_string();
        Box::pin(async move {
            let mut venues = self.venues.write().map_err(lock_error)?;
            venues.remove(&venue_id);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let venues = self.venues.read().map_err(lock_error)?;
            let mut ids: Vec<String> = venues
                .iter()
                .filter(|(_, canvases)| !canvases.is_empty())
                .map(|(id, _)| id.clone())
                .collect();
            ids.sort();
            Ok(ids)
        })
    }
}
