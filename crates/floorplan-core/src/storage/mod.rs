//! Layout persistence: the external load/save collaborator.
//!
//! A venue can hold several canvases (layout versions), each stored under
//! its canvas id. The shell loads a venue's active layout, hands it to the
//! editor, and later passes the current canvas back.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::canvas::FloorCanvas;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Layout not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Backend holding the canvases of each venue.
pub trait LayoutStorage: Send + Sync {
    /// Store a canvas under its venue and canvas id, replacing an earlier
    /// save of the same canvas.
    fn save(&self, layout: &FloorCanvas) -> BoxFuture<'_, StorageResult<()>>;

    /// Load one stored canvas.
    fn load_canvas(&self, venue_id: &str, canvas_id: &str) -> BoxFuture<'_, StorageResult<FloorCanvas>>;

    /// Canvas ids stored for a venue, sorted. Unknown venues have none.
    fn canvases(&self, venue_id: &str) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Delete every canvas of a venue. Deleting a missing venue is not an error.
    fn delete(&self, venue_id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List venue IDs with at least one stored canvas.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Load the venue's active layout: the canvas with the highest version,
    /// the lowest canvas id on ties.
    fn load(&self, venue_id: &str) -> BoxFuture<'_, StorageResult<FloorCanvas>> {
        let venue_id = venue_id.to_string();
        Box::pin(async move {
            let mut active: Option<FloorCanvas> = None;
            for canvas_id in self.canvases(&venue_id).await? {
                let canvas = self.load_canvas(&venue_id, &canvas_id).await?;
                if active.as_ref().is_none_or(|best| canvas.version > best.version) {
                    active = Some(canvas);
                }
            }
            active.ok_or(StorageError::NotFound(venue_id))
        })
    }

    /// Check if a venue has any stored canvas.
    fn exists(&self, venue_id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let venue_id = venue_id.to_string();
        Box::pin(async move { Ok(!self.canvases(&venue_id).await?.is_empty()) })
    }
}
