//! File-based storage: a directory per venue, a JSON file per canvas.

use super::{BoxFuture, LayoutStorage, StorageError, StorageResult};
use crate::canvas::FloorCanvas;
use std::fs;
use std::path::{Path, PathBuf};

/// Stores canvases as `<venue>/<canvas>.json` under a base directory.
///
/// Characters unsafe in file names become `_`, so [`LayoutStorage::list`]
/// and [`LayoutStorage::canvases`] report the sanitized names.
pub struct FileStorage {
    base_path: PathBuf,
}

fn file_name(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

fn io_error(action: &str, path: &Path, e: std::io::Error) -> StorageError {
    StorageError::Io(format!("Failed to {action} {}: {e}", path.display()))
}

impl FileStorage {
    /// Create a file storage rooted at `base_path`, creating the directory
    /// if needed.
    pub fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| io_error("create", &base_path, e))?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the default location.
    ///
    /// On Linux: `~/.local/share/floorplan/layouts/`
    /// On Windows: `%LOCALAPPDATA%\floorplan\layouts\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;

        Self::new(base.join("floorplan").join("layouts"))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn venue_dir(&self, venue_id: &str) -> PathBuf {
        self.base_path.join(file_name(venue_id))
    }

    fn canvas_path(&self, venue_id: &str, canvas_id: &str) -> PathBuf {
        self.venue_dir(venue_id).join(format!("{}.json", file_name(canvas_id)))
    }
}

impl LayoutStorage for FileStorage {
    fn save(&self, layout: &FloorCanvas) -> BoxFuture<'_, StorageResult<()>> {
        let dir = self.venue_dir(&layout.venue_id);
        let path = self.canvas_path(&layout.venue_id, &layout.id);
        let json = layout.to_json();

        Box::pin(async move {
            let json = json.map_err(|e| StorageError::Serialization(e.to_string()))?;
            fs::create_dir_all(&dir).map_err(|e| io_error("create", &dir, e))?;
            log::debug!("file: write {}", path.display());
            fs::write(&path, json).map_err(|e| io_error("write", &path, e))
        })
    }

    fn load_canvas(&self, venue_id: &str, canvas_id: &str) -> BoxFuture<'_, StorageResult<FloorCanvas>> {
        let path = self.canvas_path(venue_id, canvas_id);
        let key = format!("{venue_id}/{canvas_id}");

        Box::pin(async move {
            if !path.exists() {
                return Err(StorageError::NotFound(key));
            }
            log::debug!("file: read {}", path.display());

            let json = fs::read_to_string(&path).map_err(|e| io_error("read", &path, e))?;
            FloorCanvas::from_json(&json).map_err(|e| {
                StorageError::Serialization(format!("Failed to parse {}: {e}", path.display()))
            })
        })
    }

    fn canvases(&self, venue_id: &str) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        let dir = self.venue_dir(venue_id);

        Box::pin(async move {
            if !dir.is_dir() {
                return Ok(vec![]);
            }
            let entries = fs::read_dir(&dir).map_err(|e| io_error("read", &dir, e))?;

            let mut ids = Vec::new();
            for entry in entries {
                let path = match entry {
                    Ok(entry) => entry.path(),
                    Err(e) => {
                        log::warn!("file: skipping unreadable entry in {}: {e}", dir.display());
                        continue;
                    }
                };
                if path.extension().is_some_and(|ext| ext == "json") {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        ids.push(stem.to_string());
                    }
                }
            }
            ids.sort();
            Ok(ids)
        })
    }

    fn delete(&self, venue_id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let dir = self.venue_dir(venue_id);

        Box::pin(async move {
            if dir.is_dir() {
                log::debug!("file: delete {}", dir.display());
                fs::remove_dir_all(&dir).map_err(|e| io_error("delete", &dir, e))?;
            }
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            if !self.base_path.is_dir() {
                return Ok(vec![]);
            }
            let entries = fs::read_dir(&self.base_path).map_err(|e| io_error("read", &self.base_path, e))?;

            let mut venues = Vec::new();
            for entry in entries {
                let path = match entry {
                    Ok(entry) => entry.path(),
                    Err(e) => {
                        log::warn!("file: skipping unreadable entry in {}: {e}", self.base_path.display());
                        continue;
                    }
                };
                let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
                    continue;
                };
                if path.is_dir() && !self.canvases(name).await?.is_empty() {
                    venues.push(name.to_string());
                }
            }
            venues.sort();
            Ok(venues)
        })
    }
}
