//! Editing session glue.
//!
//! [`FloorEditor`] routes pointer events to the interaction engine, turns the
//! bounds it emits into history actions, and owns selection and the
//! clipboard. The shell drives it and renders from [`FloorEditor::layout`].

use crate::canvas::{FloorCanvas, LayoutPayload, placement_slot};
use crate::config::EditorConfig;
use crate::elements::{Element, ElementId, ElementKind, ElementPatch, ElementRequest, clone_element, make_element};
use crate::error::Error;
use crate::geometry::Bounds;
use crate::history::{HistoryState, LayoutAction};
use crate::interaction::{GestureMode, InteractionEngine};
use crate::storage::{BoxFuture, LayoutStorage};
use kurbo::{Point, Vec2};

/// One editing session over one venue layout.
#[derive(Debug)]
pub struct FloorEditor {
    config: EditorConfig,
    state: HistoryState,
    engine: InteractionEngine,
    /// Multi-selection, in selection order.
    selection: Vec<ElementId>,
    clipboard: Vec<Element>,
    multi_select_held: bool,
    /// Zones added this session; picks the next default name and color.
    zones_added: usize,
}

impl FloorEditor {
    /// Start a session on `layout`.
    pub fn new(layout: FloorCanvas, config: EditorConfig) -> Self {
        let layout = layout.ensure_minimum_size(config.min_canvas_width, config.min_canvas_height);
        log::info!("editing {} ({} elements)", layout.venue_id, layout.len());
        let mut engine = InteractionEngine::new(config.interaction());
        engine.set_snap(config.snap_strategy());
        Self {
            state: HistoryState::with_capacity(layout, config.max_history),
            engine,
            selection: Vec::new(),
            clipboard: Vec::new(),
            multi_select_held: false,
            zones_added: 0,
            config,
        }
    }

    /// Start a session on the venue's active stored layout.
    ///
    /// The config is validated first; nothing is loaded if it is invalid.
    pub async fn open<S>(storage: &S, venue_id: &str, config: EditorConfig) -> crate::Result<Self>
    where
        S: LayoutStorage + ?Sized,
    {
        config.validate()?;
        let layout = storage.load(venue_id).await?;
        Ok(Self::new(layout, config))
    }

    /// Replace the layout (venue switch). History restarts from it.
    pub fn load_layout(&mut self, layout: FloorCanvas) {
        let layout = layout.ensure_minimum_size(self.config.min_canvas_width, self.config.min_canvas_height);
        log::info!("loading {} ({} elements)", layout.venue_id, layout.len());
        self.engine.end_gesture();
        self.dispatch(LayoutAction::SetLayout(layout));
        self.clear_selection();
    }

    pub fn layout(&self) -> &FloorCanvas {
        self.state.layout()
    }

    pub fn history(&self) -> &HistoryState {
        &self.state
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn engine(&self) -> &InteractionEngine {
        &self.engine
    }

    pub fn selection(&self) -> &[ElementId] {
        &self.selection
    }

    /// The element the property panel shows.
    pub fn primary_selection(&self) -> Option<&ElementId> {
        self.engine.selected()
    }

    /// Selected elements in layout order.
    pub fn selected_elements(&self) -> impl Iterator<Item = &Element> {
        self.layout()
            .elements
            .iter()
            .filter(|el| self.selection.contains(&el.id))
    }

    pub fn clipboard(&self) -> &[Element] {
        &self.clipboard
    }

    /// Track the multi-select modifier (Ctrl/Meta) key state.
    pub fn set_multi_select_modifier(&mut self, held: bool) {
        self.multi_select_held = held;
    }

    /// Pointer pressed on an element or one of its handles.
    ///
    /// With the multi-select modifier held, a move press toggles the element
    /// in the selection and resize presses are ignored.
    pub fn pointer_down(&mut self, id: &ElementId, mode: GestureMode, point: Point) {
        let Some(bounds) = self.layout().element(id).map(|el| el.bounds) else {
            log::debug!("pointer down on unknown element {id}");
            return;
        };

        if self.multi_select_held {
            if mode.is_move() {
                self.toggle_selection(id);
            }
            return;
        }

        if !self.selection.contains(id) {
            self.selection = vec![id.clone()];
        }
        self.engine.begin_gesture(id.clone(), mode, point, bounds);
    }

    /// Pointer moved anywhere. Returns true if the layout changed.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        let Some(gesture) = self.engine.active_gesture() else {
            return false;
        };
        let is_move = gesture.mode.is_move();
        let Some(update) = self.engine.update_gesture(point) else {
            return false;
        };
        let Some(current) = self.layout().element(&update.id).map(|el| el.bounds) else {
            return false;
        };
        let bounds = self.fit(update.bounds);

        let multi_move = is_move && self.selection.len() > 1 && self.selection.contains(&update.id);
        if !multi_move {
            self.dispatch(LayoutAction::UpdateElement {
                id: update.id,
                patch: ElementPatch::bounds(bounds),
            });
            return true;
        }

        let delta = bounds.origin() - current.origin();
        if delta == Vec2::ZERO {
            return false;
        }
        for id in self.selection.clone() {
            let Some(start) = self.layout().element(&id).map(|el| el.bounds) else {
                continue;
            };
            let next = self.fit(start.translated(delta));
            self.dispatch(LayoutAction::UpdateElement {
                id,
                patch: ElementPatch::bounds(next),
            });
        }
        true
    }

    pub fn pointer_up(&mut self) {
        self.engine.end_gesture();
    }

    /// Pointer left the window; ends the gesture like a release.
    pub fn pointer_leave(&mut self) {
        self.engine.end_gesture();
    }

    /// Click on empty canvas.
    pub fn background_pointer_down(&mut self) {
        self.clear_selection();
    }

    pub fn select(&mut self, id: &ElementId) {
        if self.layout().contains(id) {
            self.selection = vec![id.clone()];
            self.engine.set_selected(Some(id.clone()));
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.engine.set_selected(None);
    }

    fn toggle_selection(&mut self, id: &ElementId) {
        if let Some(pos) = self.selection.iter().position(|s| s == id) {
            self.selection.remove(pos);
        } else {
            self.selection.push(id.clone());
        }
        self.engine.set_selected(self.selection.first().cloned());
    }

    /// Add an element at the next free placement slot.
    pub fn add_element(&mut self, request: &ElementRequest) -> ElementId {
        let element = make_element(request);
        let id = element.id.clone();
        let slot = placement_slot(self.layout().len());
        self.dispatch(LayoutAction::AddElement {
            element,
            x: slot.x,
            y: slot.y,
        });
        id
    }

    /// Add a table numbered after the highest existing one.
    pub fn add_table(&mut self, seats: u32) -> ElementId {
        let table_number = self.layout().next_table_number();
        self.add_element(&ElementRequest::Table {
            table_number: Some(table_number),
            seats,
        })
    }

    /// Add a zone named "Zone N", colored from the configured palette in turn.
    pub fn add_zone(&mut self) -> ElementId {
        let palette = &self.config.zone_colors;
        let color = (!palette.is_empty()).then(|| palette[self.zones_added % palette.len()].clone());
        self.zones_added += 1;
        let name = format!("Zone {}", self.zones_added);
        self.add_element(&ElementRequest::Zone { name, color })
    }

    /// Edit element properties (property panel).
    pub fn update_element(&mut self, id: &ElementId, patch: ElementPatch) {
        self.dispatch(LayoutAction::UpdateElement { id: id.clone(), patch });
    }

    /// Remove every selected element. Returns how many removals were issued.
    pub fn remove_selected(&mut self) -> usize {
        let ids = std::mem::take(&mut self.selection);
        for id in &ids {
            self.dispatch(LayoutAction::RemoveElement { id: id.clone() });
        }
        self.engine.set_selected(None);
        ids.len()
    }

    /// Copy the selection to the clipboard. An empty selection keeps the
    /// previous clipboard.
    pub fn copy_selection(&mut self) -> usize {
        if self.selection.is_empty() {
            return 0;
        }
        self.clipboard = self.selected_elements().cloned().collect();
        self.clipboard.len()
    }

    /// Paste clipboard copies half a width to the right and select them.
    pub fn paste(&mut self) -> Vec<ElementId> {
        if self.clipboard.is_empty() {
            return Vec::new();
        }

        let canvas = self.layout().size();
        let mut table_number = self.layout().next_table_number();
        let pasted: Vec<Element> = self
            .clipboard
            .iter()
            .map(|original| {
                let mut copy = clone_element(original);
                if let ElementKind::Table {
                    table_number: number, ..
                } = &mut copy.kind
                {
                    *number = table_number;
                    table_number = table_number.saturating_add(1);
                }
                let shifted = Bounds {
                    x: original.bounds.x + round_half_up(original.bounds.w / 2.0),
                    ..original.bounds
                };
                copy.bounds = shifted.clamp_to(canvas, self.config.grid_size);
                copy
            })
            .collect();

        let ids: Vec<ElementId> = pasted.iter().map(|el| el.id.clone()).collect();
        for element in pasted {
            let Bounds { x, y, .. } = element.bounds;
            self.dispatch(LayoutAction::AddElement { element, x, y });
        }
        self.selection = ids.clone();
        self.engine.set_selected(ids.first().cloned());
        ids
    }

    /// Stack the selected element above everything else.
    ///
    /// The layer commands act only when exactly one element is selected and
    /// return whether they dispatched.
    pub fn bring_to_front(&mut self) -> bool {
        let top = self.layout().max_z_index() + 1;
        self.restack(|_| top)
    }

    /// Stack the selected element below everything else.
    pub fn send_to_back(&mut self) -> bool {
        let bottom = self.layout().min_z_index() - 1;
        self.restack(|_| bottom)
    }

    /// Raise the selected element one level.
    pub fn bring_forward(&mut self) -> bool {
        self.restack(|z| z + 1)
    }

    /// Lower the selected element one level.
    pub fn send_backward(&mut self) -> bool {
        self.restack(|z| z - 1)
    }

    fn restack(&mut self, z_index: impl FnOnce(i64) -> i64) -> bool {
        let [id] = self.selection.as_slice() else {
            return false;
        };
        let Some(current) = self.layout().element(id).map(Element::stacking) else {
            return false;
        };
        let id = id.clone();
        self.dispatch(LayoutAction::UpdateElement {
            id,
            patch: ElementPatch::z_index(z_index(current)),
        });
        true
    }

    pub fn undo(&mut self) {
        self.dispatch(LayoutAction::Undo);
    }

    pub fn redo(&mut self) {
        self.dispatch(LayoutAction::Redo);
    }

    pub fn can_undo(&self) -> bool {
        self.state.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.state.can_redo()
    }

    /// Hand the current layout to an external save function.
    ///
    /// Whatever the callback returns is passed back untouched; the session
    /// state is the same whether it succeeded or not.
    pub fn save_with<F, R>(&self, save: F) -> R
    where
        F: FnOnce(LayoutPayload) -> R,
    {
        log::info!("saving {} ({} elements)", self.layout().venue_id, self.layout().len());
        save(self.layout().payload())
    }

    /// Store the current layout under its venue and canvas id.
    pub fn save_to<'a, S>(&self, storage: &'a S) -> BoxFuture<'a, crate::Result<()>>
    where
        S: LayoutStorage + ?Sized,
    {
        let layout = self.layout();
        log::info!("saving {}/{} ({} elements) to storage", layout.venue_id, layout.id, layout.len());
        let save = storage.save(layout);
        Box::pin(async move { save.await.map_err(Error::from) })
    }

    fn dispatch(&mut self, action: LayoutAction) {
        log::debug!("dispatch {}", action.name());
        self.state.apply(action);
        self.prune_selection();
    }

    /// Drop selected ids that are no longer on the floor.
    fn prune_selection(&mut self) {
        let layout = self.state.layout();
        self.selection.retain(|id| layout.contains(id));
        if self.engine.selected().is_some_and(|id| !layout.contains(id)) {
            self.engine.set_selected(None);
        }
    }

    /// Apply the optional canvas clamp to gesture output.
    fn fit(&self, bounds: Bounds) -> Bounds {
        if self.config.clamp_to_canvas {
            bounds.clamp_to(self.layout().size(), self.config.grid_size)
        } else {
            bounds
        }
    }
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::create_initial_layout;
    use crate::interaction::ResizeHandle;
    use crate::snap::SnapMode;
    use crate::storage::{MemoryStorage, StorageError};
    use pollster::block_on;

    fn no_snap() -> EditorConfig {
        EditorConfig {
            snap_mode: SnapMode::None,
            ..EditorConfig::default()
        }
    }

    fn editor() -> FloorEditor {
        FloorEditor::new(create_initial_layout("venue-1", "Main", 600.0, 400.0), no_snap())
    }

    fn bounds_of(editor: &FloorEditor, id: &ElementId) -> Bounds {
        editor.layout().element(id).unwrap().bounds
    }

    #[test]
    fn test_new_enlarges_small_canvas() {
        let editor = editor();
        assert!((editor.layout().width - 1000.0).abs() < f64::EPSILON);
        assert!((editor.layout().height - 800.0).abs() < f64::EPSILON);
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn test_add_uses_placement_slots() {
        let mut editor = editor();
        let ids: Vec<_> = (0..6).map(|_| editor.add_element(&ElementRequest::Wall)).collect();
        assert_eq!(bounds_of(&editor, &ids[0]).origin(), Point::new(80.0, 80.0));
        assert_eq!(bounds_of(&editor, &ids[4]).origin(), Point::new(480.0, 80.0));
        assert_eq!(bounds_of(&editor, &ids[5]).origin(), Point::new(80.0, 180.0));
    }

    #[test]
    fn test_add_table_numbers() {
        let mut editor = editor();
        let first = editor.add_table(4);
        let second = editor.add_table(2);
        assert_eq!(editor.layout().element(&first).unwrap().table_number(), Some(1));
        assert_eq!(editor.layout().element(&second).unwrap().table_number(), Some(2));
    }

    #[test]
    fn test_drag_dispatches_updates() {
        let mut editor = editor();
        let id = editor.add_table(4);

        editor.pointer_down(&id, GestureMode::Move, Point::new(100.0, 100.0));
        assert_eq!(editor.selection(), &[id.clone()]);
        assert_eq!(editor.primary_selection(), Some(&id));
        assert!(editor.engine().is_dragging());

        assert!(editor.pointer_move(Point::new(130.0, 110.0)));
        assert!(editor.pointer_move(Point::new(150.0, 120.0)));
        editor.pointer_up();

        assert_eq!(bounds_of(&editor, &id), Bounds::new(130.0, 100.0, 80.0, 80.0));
        assert!(!editor.engine().is_dragging());
        // Nothing moves after release.
        assert!(!editor.pointer_move(Point::new(500.0, 500.0)));

        editor.undo();
        assert_eq!(bounds_of(&editor, &id), Bounds::new(110.0, 90.0, 80.0, 80.0));
    }

    #[test]
    fn test_drag_with_grid_snap() {
        let mut editor = FloorEditor::new(create_initial_layout("v", "Main", 1000.0, 800.0), EditorConfig::default());
        let id = editor.add_table(4);
        editor.pointer_down(&id, GestureMode::Move, Point::ZERO);
        editor.pointer_move(Point::new(13.0, 29.0));
        assert_eq!(bounds_of(&editor, &id).origin(), Point::new(100.0, 100.0));
    }

    #[test]
    fn test_pointer_leave_ends_gesture() {
        let mut editor = editor();
        let id = editor.add_table(4);
        editor.pointer_down(&id, GestureMode::Resize(ResizeHandle::E), Point::ZERO);
        assert!(editor.engine().is_resizing());
        editor.pointer_leave();
        assert!(editor.engine().active_gesture().is_none());
    }

    #[test]
    fn test_unknown_element_is_ignored() {
        let mut editor = editor();
        editor.pointer_down(&"ghost".into(), GestureMode::Move, Point::ZERO);
        assert!(editor.engine().active_gesture().is_none());
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn test_modifier_toggles_selection() {
        let mut editor = editor();
        let a = editor.add_table(4);
        let b = editor.add_table(4);

        editor.set_multi_select_modifier(true);
        editor.pointer_down(&a, GestureMode::Move, Point::ZERO);
        editor.pointer_down(&b, GestureMode::Move, Point::ZERO);
        assert_eq!(editor.selection(), &[a.clone(), b.clone()]);
        assert!(editor.engine().active_gesture().is_none());

        // Resize presses are ignored while the modifier is held.
        editor.pointer_down(&a, GestureMode::Resize(ResizeHandle::SE), Point::ZERO);
        assert_eq!(editor.selection().len(), 2);

        editor.pointer_down(&a, GestureMode::Move, Point::ZERO);
        assert_eq!(editor.selection(), &[b.clone()]);
        assert_eq!(editor.primary_selection(), Some(&b));
    }

    #[test]
    fn test_multi_move_applies_same_delta() {
        let mut editor = editor();
        let a = editor.add_table(4);
        let b = editor.add_table(4);
        let c = editor.add_table(4);

        editor.set_multi_select_modifier(true);
        editor.pointer_down(&a, GestureMode::Move, Point::ZERO);
        editor.pointer_down(&b, GestureMode::Move, Point::ZERO);
        editor.set_multi_select_modifier(false);

        editor.pointer_down(&a, GestureMode::Move, Point::new(100.0, 100.0));
        assert_eq!(editor.selection().len(), 2);
        assert!(editor.pointer_move(Point::new(110.0, 120.0)));

        assert_eq!(bounds_of(&editor, &a).origin(), Point::new(90.0, 100.0));
        assert_eq!(bounds_of(&editor, &b).origin(), Point::new(190.0, 100.0));
        assert_eq!(bounds_of(&editor, &c).origin(), Point::new(280.0, 80.0));

        // Same pointer position again: zero delta, nothing dispatched.
        let depth = editor.history().len();
        assert!(!editor.pointer_move(Point::new(110.0, 120.0)));
        assert_eq!(editor.history().len(), depth);
    }

    #[test]
    fn test_clamp_to_canvas_opt_in() {
        let config = EditorConfig {
            clamp_to_canvas: true,
            ..no_snap()
        };
        let mut editor = FloorEditor::new(create_initial_layout("v", "Main", 1000.0, 800.0), config);
        let id = editor.add_table(4);
        editor.pointer_down(&id, GestureMode::Move, Point::ZERO);
        editor.pointer_move(Point::new(-500.0, 5000.0));
        assert_eq!(bounds_of(&editor, &id), Bounds::new(0.0, 720.0, 80.0, 80.0));

        // Without the clamp elements may leave the canvas.
        let mut editor = editor_with_table();
        let id = editor.layout().elements[0].id.clone();
        editor.pointer_down(&id, GestureMode::Move, Point::ZERO);
        editor.pointer_move(Point::new(-500.0, 5000.0));
        assert_eq!(bounds_of(&editor, &id).origin(), Point::new(-420.0, 5080.0));
    }

    fn editor_with_table() -> FloorEditor {
        let mut editor = editor();
        editor.add_table(4);
        editor
    }

    #[test]
    fn test_remove_selected() {
        let mut editor = editor();
        let a = editor.add_table(4);
        let b = editor.add_table(4);
        editor.select(&a);
        assert_eq!(editor.remove_selected(), 1);
        assert!(!editor.layout().contains(&a));
        assert!(editor.layout().contains(&b));
        assert!(editor.selection().is_empty());
        assert!(editor.primary_selection().is_none());
        assert_eq!(editor.remove_selected(), 0);
    }

    #[test]
    fn test_undo_prunes_selection() {
        let mut editor = editor();
        let id = editor.add_table(4);
        editor.select(&id);
        editor.undo();
        assert!(editor.selection().is_empty());
        assert!(editor.primary_selection().is_none());
        editor.redo();
        assert!(editor.layout().contains(&id));
    }

    #[test]
    fn test_copy_paste() {
        let mut editor = editor();
        let table = editor.add_table(4);
        let wall = editor.add_element(&ElementRequest::Wall);

        editor.set_multi_select_modifier(true);
        editor.pointer_down(&table, GestureMode::Move, Point::ZERO);
        editor.pointer_down(&wall, GestureMode::Move, Point::ZERO);
        editor.set_multi_select_modifier(false);
        assert_eq!(editor.copy_selection(), 2);

        let pasted = editor.paste();
        assert_eq!(pasted.len(), 2);
        assert_eq!(editor.layout().len(), 4);
        assert_eq!(editor.selection(), pasted.as_slice());
        assert_eq!(editor.primary_selection(), Some(&pasted[0]));

        let table_copy = editor.layout().element(&pasted[0]).unwrap();
        assert_eq!(table_copy.table_number(), Some(2));
        assert_eq!(table_copy.bounds, Bounds::new(120.0, 80.0, 80.0, 80.0));

        let wall_copy = editor.layout().element(&pasted[1]).unwrap();
        assert_eq!(wall_copy.kind, ElementKind::Wall);
        assert_eq!(wall_copy.bounds, Bounds::new(210.0, 80.0, 60.0, 20.0));

        // Pasting again keeps numbering tables upward.
        let again = editor.paste();
        assert_eq!(editor.layout().element(&again[0]).unwrap().table_number(), Some(3));
    }

    #[test]
    fn test_paste_clamps_into_canvas() {
        let mut editor = editor();
        let id = editor.add_table(4);
        editor.update_element(&id, ElementPatch::bounds(Bounds::new(950.0, 100.0, 80.0, 80.0)));
        editor.select(&id);
        editor.copy_selection();
        let pasted = editor.paste();
        assert_eq!(bounds_of(&editor, &pasted[0]).origin(), Point::new(920.0, 100.0));
    }

    #[test]
    fn test_copy_with_empty_selection_keeps_clipboard() {
        let mut editor = editor();
        let id = editor.add_table(4);
        editor.select(&id);
        editor.copy_selection();
        editor.background_pointer_down();
        assert_eq!(editor.copy_selection(), 0);
        assert_eq!(editor.clipboard().len(), 1);
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn test_load_layout_resets_session() {
        let mut editor = editor();
        let id = editor.add_table(4);
        editor.select(&id);

        editor.load_layout(create_initial_layout("venue-2", "Patio", 200.0, 200.0));
        assert_eq!(editor.layout().venue_id, "venue-2");
        assert!((editor.layout().width - 1000.0).abs() < f64::EPSILON);
        assert!(editor.selection().is_empty());
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_save_with_passes_payload() {
        let mut editor = editor();
        editor.add_table(4);
        let before = editor.history().clone();

        let result: Result<usize, String> = editor.save_with(|payload| {
            assert_eq!(payload.name, "Main");
            Err(format!("rejected {} elements", payload.elements.len()))
        });
        assert_eq!(result, Err("rejected 1 elements".to_string()));
        assert_eq!(editor.history(), &before);
    }

    #[test]
    fn test_save_to_storage() {
        let mut editor = editor();
        editor.add_table(4);
        let storage = MemoryStorage::new();

        block_on(editor.save_to(&storage)).unwrap();
        let stored = block_on(storage.load("venue-1")).unwrap();
        assert_eq!(&stored, editor.layout());
        assert!(matches!(block_on(storage.load("venue-2")), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_open_loads_active_layout() {
        let storage = MemoryStorage::new();
        let mut stored = create_initial_layout("venue-1", "Main", 1200.0, 900.0);
        stored.elements.push(make_element(&ElementRequest::Wall));
        block_on(storage.save(&stored)).unwrap();

        let editor = block_on(FloorEditor::open(&storage, "venue-1", no_snap())).unwrap();
        assert_eq!(editor.layout(), &stored);
        assert_eq!(editor.history().len(), 1);

        let missing = block_on(FloorEditor::open(&storage, "venue-9", no_snap()));
        assert!(matches!(missing, Err(Error::Storage(StorageError::NotFound(_)))));

        let bad = EditorConfig {
            grid_size: 0.0,
            ..EditorConfig::default()
        };
        assert!(matches!(block_on(FloorEditor::open(&storage, "venue-1", bad)), Err(Error::Config(_))));
    }

    #[test]
    fn test_added_elements_stack_upward() {
        let mut editor = editor();
        let first = editor.add_element(&ElementRequest::Wall);
        let second = editor.add_element(&ElementRequest::Wall);
        assert_eq!(editor.layout().element(&first).unwrap().z_index, Some(1));
        assert_eq!(editor.layout().element(&second).unwrap().z_index, Some(2));
    }

    #[test]
    fn test_layer_commands() {
        let mut editor = editor();
        let a = editor.add_element(&ElementRequest::Wall);
        let b = editor.add_element(&ElementRequest::Wall);
        let c = editor.add_element(&ElementRequest::Wall);
        let z = |editor: &FloorEditor, id: &ElementId| editor.layout().element(id).unwrap().z_index;

        editor.select(&a);
        assert!(editor.bring_to_front());
        assert_eq!(z(&editor, &a), Some(4));

        editor.select(&c);
        assert!(editor.send_to_back());
        assert_eq!(z(&editor, &c), Some(-1));

        editor.select(&b);
        assert!(editor.bring_forward());
        assert_eq!(z(&editor, &b), Some(3));
        assert!(editor.send_backward());
        assert!(editor.send_backward());
        assert_eq!(z(&editor, &b), Some(1));

        // Each command is one undoable step.
        editor.undo();
        assert_eq!(z(&editor, &b), Some(2));
        assert_eq!(z(&editor, &a), Some(4));
        assert_eq!(z(&editor, &c), Some(-1));
    }

    #[test]
    fn test_layer_commands_need_single_selection() {
        let mut editor = editor();
        let a = editor.add_element(&ElementRequest::Wall);
        let b = editor.add_element(&ElementRequest::Wall);
        let depth = editor.history().len();

        assert!(!editor.bring_to_front());

        editor.select(&a);
        editor.set_multi_select_modifier(true);
        editor.pointer_down(&b, GestureMode::Move, Point::new(0.0, 0.0));
        editor.set_multi_select_modifier(false);
        assert_eq!(editor.selection().len(), 2);
        assert!(!editor.send_to_back());
        assert_eq!(editor.history().len(), depth);
    }

    #[test]
    fn test_add_zone_names_and_colors() {
        let config = EditorConfig {
            zone_colors: vec!["#aaa".to_string(), "#bbb".to_string()],
            ..no_snap()
        };
        let mut editor = FloorEditor::new(create_initial_layout("v", "Main", 1000.0, 800.0), config);
        let zones: Vec<_> = (0..3).map(|_| editor.add_zone()).collect();

        let kinds: Vec<_> = zones
            .iter()
            .map(|id| editor.layout().element(id).unwrap().kind.clone())
            .collect();
        assert_eq!(
            kinds,
            vec![
                ElementKind::Zone { name: "Zone 1".to_string(), color: Some("#aaa".to_string()) },
                ElementKind::Zone { name: "Zone 2".to_string(), color: Some("#bbb".to_string()) },
                ElementKind::Zone { name: "Zone 3".to_string(), color: Some("#aaa".to_string()) },
            ]
        );
        assert!((editor.layout().element(&zones[0]).unwrap().bounds.w - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_add_zone_without_palette() {
        let config = EditorConfig {
            zone_colors: Vec::new(),
            ..no_snap()
        };
        let mut editor = FloorEditor::new(create_initial_layout("v", "Main", 1000.0, 800.0), config);
        let id = editor.add_zone();
        assert_eq!(
            editor.layout().element(&id).unwrap().kind,
            ElementKind::Zone { name: "Zone 1".to_string(), color: None }
        );
    }
}
