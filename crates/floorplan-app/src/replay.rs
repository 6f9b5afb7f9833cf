//! Drives a [`FloorEditor`] through a script.

use crate::script::Step;
use floorplan_core::{ConfigError, FloorEditor, LayoutStorage, StorageError};
use kurbo::Point;
use std::fmt;
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Usage: {0}")]
    Usage(String),
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Editor(#[from] floorplan_core::Error),
}

impl From<ConfigError> for ReplayError {
    fn from(e: ConfigError) -> Self {
        Self::Editor(e.into())
    }
}

impl From<StorageError> for ReplayError {
    fn from(e: StorageError) -> Self {
        Self::Editor(e.into())
    }
}

/// Layout size and history position at one point of a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub elements: usize,
    pub history_len: usize,
    pub history_index: usize,
    pub selected: usize,
}

impl Summary {
    pub fn of(editor: &FloorEditor) -> Self {
        Self {
            elements: editor.layout().len(),
            history_len: editor.history().len(),
            history_index: editor.history().index(),
            selected: editor.selection().len(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} elements, history {}/{}, {} selected",
            self.elements,
            self.history_index + 1,
            self.history_len,
            self.selected
        )
    }
}

/// A replay session. Saves go to `storage` when one is attached.
pub struct Replay<'a> {
    editor: FloorEditor,
    storage: Option<&'a dyn LayoutStorage>,
    saves: Vec<Summary>,
}

impl<'a> Replay<'a> {
    pub fn new(editor: FloorEditor) -> Self {
        Self {
            editor,
            storage: None,
            saves: Vec::new(),
        }
    }

    pub fn with_storage(mut self, storage: &'a dyn LayoutStorage) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn editor(&self) -> &FloorEditor {
        &self.editor
    }

    /// Summaries recorded at each `save` step.
    pub fn saves(&self) -> &[Summary] {
        &self.saves
    }

    /// Run every step in order, stopping at the first failed save.
    pub fn run(&mut self, steps: &[Step]) -> Result<Summary, ReplayError> {
        for step in steps {
            self.step(step)?;
        }
        Ok(Summary::of(&self.editor))
    }

    pub fn step(&mut self, step: &Step) -> Result<(), ReplayError> {
        log::debug!("step {step:?}");
        match step {
            Step::PointerDown {
                target,
                mode,
                x,
                y,
                multi,
            } => {
                let Some(id) = target.resolve(self.editor.layout()) else {
                    log::warn!("no element at {target:?}");
                    return Ok(());
                };
                self.editor.set_multi_select_modifier(*multi);
                self.editor.pointer_down(&id, *mode, Point::new(*x, *y));
                self.editor.set_multi_select_modifier(false);
            }
            Step::PointerMove { x, y } => {
                self.editor.pointer_move(Point::new(*x, *y));
            }
            Step::PointerUp => self.editor.pointer_up(),
            Step::PointerLeave => self.editor.pointer_leave(),
            Step::BackgroundClick => self.editor.background_pointer_down(),
            Step::Add { element } => {
                self.editor.add_element(element);
            }
            Step::AddZone => {
                self.editor.add_zone();
            }
            Step::RemoveSelected => {
                self.editor.remove_selected();
            }
            Step::BringToFront => self.restack("bringToFront", FloorEditor::bring_to_front),
            Step::SendToBack => self.restack("sendToBack", FloorEditor::send_to_back),
            Step::BringForward => self.restack("bringForward", FloorEditor::bring_forward),
            Step::SendBackward => self.restack("sendBackward", FloorEditor::send_backward),
            Step::Copy => {
                self.editor.copy_selection();
            }
            Step::Paste => {
                self.editor.paste();
            }
            Step::Undo => self.editor.undo(),
            Step::Redo => self.editor.redo(),
            Step::Save => self.save()?,
        }
        Ok(())
    }

    fn restack(&mut self, name: &str, command: fn(&mut FloorEditor) -> bool) {
        if !command(&mut self.editor) {
            log::warn!("{name} needs exactly one selected element");
        }
    }

    fn save(&mut self) -> Result<(), ReplayError> {
        if let Some(storage) = self.storage {
            pollster::block_on(self.editor.save_to(storage))?;
        } else {
            self.editor.save_with(|payload| {
                log::info!("save (no storage): {} with {} elements", payload.name, payload.elements.len());
            });
        }
        self.saves.push(Summary::of(&self.editor));
        Ok(())
    }
}
