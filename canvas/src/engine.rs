//! Engine: turns raw pointer, wheel, and resize events into state changes.
//!
//! `EngineCore` owns every piece of canvas state. Handlers mutate that state
//! synchronously and return a list of [`Action`]s describing what the host
//! should do next (capture the pointer, persist a move, repaint, ...).

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::mem;

use uuid::Uuid;

use crate::camera::{Camera, Point, Viewport, clamp_menu_position};
use crate::config::CanvasConfig;
use crate::consts::{CONTEXT_MENU_HEIGHT, CONTEXT_MENU_WIDTH};
use crate::doc::{LoadError, ObjectId, ObjectKind, ObjectStore, WorldObject};
use crate::hit::{self, HitPart};
use crate::input::{Button, InputState, UiState, WheelDelta};
use crate::render::{self, CardView};

const CURSOR_DEFAULT: &str = "default";
const CURSOR_GRABBING: &str = "grabbing";
const CURSOR_RESIZE: &str = "ew-resize";

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ObjectCreated(WorldObject),
    ObjectMoved { id: ObjectId, position: Point },
    ObjectDeleted { id: ObjectId },
    StoreLoaded { count: usize },
    CameraChanged(Camera),
    /// Route all further pointer events to this surface until released.
    CapturePointer,
    /// Undo a previous [`Action::CapturePointer`].
    ReleasePointer,
    OpenContextMenu { screen: Point, world: Point },
    CloseContextMenu,
    HoverChanged(Vec<ObjectId>),
    SetCursor(String),
    BlockMoved { id: String, x: i32, y: i32 },
    BlockResized { id: String, x: i32, w: i32 },
    BlocksResolved { flagged: Vec<String> },
    RenderNeeded,
}

impl Action {
    pub(crate) fn cursor(style: &str) -> Self {
        Self::SetCursor(style.to_owned())
    }

    pub(crate) fn default_cursor() -> Self {
        Self::cursor(CURSOR_DEFAULT)
    }

    pub(crate) fn grabbing_cursor() -> Self {
        Self::cursor(CURSOR_GRABBING)
    }

    pub(crate) fn resize_cursor() -> Self {
        Self::cursor(CURSOR_RESIZE)
    }
}

/// All canvas state plus the input handlers that drive it.
#[derive(Debug, Clone)]
pub struct EngineCore {
    pub store: ObjectStore,
    pub viewport: Viewport,
    pub ui: UiState,
    pub input: InputState,
    menu_size: (f64, f64),
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            store: ObjectStore::new(),
            viewport: Viewport::new(config),
            ui: UiState::default(),
            input: InputState::default(),
            menu_size: (CONTEXT_MENU_WIDTH, CONTEXT_MENU_HEIGHT),
        }
    }

    // --- Data inputs ---

    /// Replace the store from a persisted blob.
    ///
    /// A held object drag is dropped, since the object it refers to may no
    /// longer exist. A rejected blob leaves everything untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the blob fails validation.
    pub fn load(&mut self, blob: &str) -> Result<Vec<Action>, LoadError> {
        let count = self.store.load(blob)?;
        let mut actions = Vec::new();
        if matches!(self.input, InputState::DraggingObject { .. }) {
            tracing::debug!("store replaced during drag; dropping gesture");
            self.input = InputState::Idle;
            actions.push(Action::ReleasePointer);
            actions.push(Action::default_cursor());
        }
        self.ui.hovered.clear();
        actions.push(Action::StoreLoaded { count });
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    /// Serialize the store for persistence.
    #[must_use]
    pub fn save(&self) -> String {
        self.store.serialize()
    }

    /// Create an object of `kind` at the world point under `screen_pt`.
    pub fn create_object(&mut self, kind: ObjectKind, screen_pt: Point) -> Vec<Action> {
        let position = self.viewport.screen_to_world(screen_pt);
        let obj = WorldObject::new(Uuid::new_v4().to_string(), kind, position);
        tracing::debug!(id = %obj.id, kind = kind.tag(), x = position.x, y = position.y, "object created");
        self.store.add(obj.clone());

        let mut actions = self.close_context_menu();
        actions.push(Action::ObjectCreated(obj));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Delete an object. Dragging it ends the drag.
    pub fn delete_object(&mut self, id: &str) -> Vec<Action> {
        if self.store.remove_by_id(id).is_none() {
            return Vec::new();
        }
        let mut actions = Vec::new();
        if matches!(&self.input, InputState::DraggingObject { id: dragged, .. } if dragged == id) {
            self.input = InputState::Idle;
            actions.push(Action::ReleasePointer);
            actions.push(Action::default_cursor());
        }
        self.ui.hovered.retain(|h| h != id);
        actions.push(Action::ObjectDeleted { id: id.to_owned() });
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Record the measured size of the host's context menu.
    pub fn set_menu_size(&mut self, width: f64, height: f64) {
        self.menu_size = (width.max(0.0), height.max(0.0));
    }

    /// Close the context menu if it is open.
    pub fn close_context_menu(&mut self) -> Vec<Action> {
        match self.ui.context_menu.take() {
            Some(_) => vec![Action::CloseContextMenu],
            None => Vec::new(),
        }
    }

    // --- Viewport ---

    /// Update the container size, keeping the centered world point in place.
    pub fn on_resize(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.viewport.resize(width, height);
        if !self.viewport.is_mounted() {
            return Vec::new();
        }
        vec![Action::CameraChanged(self.viewport.camera()), Action::RenderNeeded]
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if !self.viewport.is_mounted() || self.input.is_active() {
            return Vec::new();
        }

        match button {
            Button::Secondary => self.open_context_menu(screen_pt),
            Button::Middle => Vec::new(),
            Button::Primary => {
                let mut actions = self.close_context_menu();
                actions.extend(self.begin_primary(screen_pt));
                actions
            }
        }
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        if !self.viewport.is_mounted() {
            return Vec::new();
        }

        match &self.input {
            InputState::Idle => self.update_hover(screen_pt),
            InputState::Panning { start_screen, start_offset } => {
                let offset = self.pan_offset(*start_screen, *start_offset, screen_pt);
                self.viewport.set_offset(offset);
                vec![Action::CameraChanged(self.viewport.camera()), Action::RenderNeeded]
            }
            InputState::DraggingObject { id, grab_offset } => {
                let id = id.clone();
                let grab_offset = *grab_offset;
                match self.drag_to(&id, grab_offset, screen_pt) {
                    Some(position) => vec![Action::ObjectMoved { id, position }, Action::RenderNeeded],
                    None => {
                        self.input = InputState::Idle;
                        vec![Action::ReleasePointer, Action::default_cursor()]
                    }
                }
            }
        }
    }

    /// End the active gesture. The gesture is always released, even when the
    /// final update is rejected.
    pub fn on_pointer_up(&mut self, screen_pt: Point) -> Vec<Action> {
        let state = mem::take(&mut self.input);
        if !state.is_active() {
            return Vec::new();
        }

        let mut actions = vec![Action::ReleasePointer, Action::default_cursor()];
        if !self.viewport.is_mounted() {
            return actions;
        }

        match state {
            InputState::Idle => {}
            InputState::Panning { start_screen, start_offset } => {
                let offset = self.pan_offset(start_screen, start_offset, screen_pt);
                self.finish_pan(offset, start_offset);
                actions.push(Action::CameraChanged(self.viewport.camera()));
            }
            InputState::DraggingObject { id, grab_offset } => {
                if let Some(position) = self.drag_to(&id, grab_offset, screen_pt) {
                    actions.push(Action::ObjectMoved { id, position });
                }
            }
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Pointer capture was lost. Behaves like pointer-up at the last known
    /// position.
    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        let state = mem::take(&mut self.input);
        if !state.is_active() {
            return Vec::new();
        }

        let mut actions = vec![Action::ReleasePointer, Action::default_cursor()];
        if let InputState::Panning { start_offset, .. } = state {
            let offset = self.viewport.camera().offset;
            self.finish_pan(offset, start_offset);
            actions.push(Action::CameraChanged(self.viewport.camera()));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Zoom one step around the pointer. Ignored while a gesture is held.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta) -> Vec<Action> {
        if !self.viewport.is_mounted() || self.input.is_active() {
            return Vec::new();
        }
        self.viewport.zoom_at(screen_pt, delta.dy);
        vec![Action::CameraChanged(self.viewport.camera()), Action::RenderNeeded]
    }

    // --- Queries ---

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.viewport.camera()
    }

    /// Look up an object by ID.
    #[must_use]
    pub fn object(&self, id: &str) -> Option<&WorldObject> {
        self.store.get(id)
    }

    /// Positioned cards for the current frame.
    #[must_use]
    pub fn scene(&self) -> Vec<CardView> {
        render::scene(&self.store, &self.viewport, &self.ui)
    }

    // --- Internals ---

    fn open_context_menu(&mut self, screen_pt: Point) -> Vec<Action> {
        let container = (self.viewport.width(), self.viewport.height());
        let screen = clamp_menu_position(screen_pt, self.menu_size, container);
        let world = self.viewport.screen_to_world(screen_pt);
        self.ui.context_menu = Some(screen);
        vec![Action::OpenContextMenu { screen, world }, Action::RenderNeeded]
    }

    fn begin_primary(&mut self, screen_pt: Point) -> Vec<Action> {
        let world = self.viewport.screen_to_world(screen_pt);
        match hit::hit_test(world, &self.store) {
            Some(hit) if hit.part == HitPart::Grip => {
                let Some(obj) = self.store.get(&hit.object_id) else {
                    return Vec::new();
                };
                let grab_offset = Point::new(obj.position.x - world.x, obj.position.y - world.y);
                self.input = InputState::DraggingObject { id: hit.object_id, grab_offset };
                vec![Action::CapturePointer, Action::grabbing_cursor()]
            }
            // The card body belongs to the host's form controls.
            Some(_) => Vec::new(),
            None => {
                self.input =
                    InputState::Panning { start_screen: screen_pt, start_offset: self.viewport.camera().offset };
                vec![Action::CapturePointer, Action::grabbing_cursor()]
            }
        }
    }

    fn pan_offset(&self, start_screen: Point, start_offset: Point, screen_pt: Point) -> Point {
        let raw = Point::new(
            start_offset.x + screen_pt.x - start_screen.x,
            start_offset.y + screen_pt.y - start_screen.y,
        );
        self.viewport.clamp_drag_handle(raw)
    }

    fn finish_pan(&mut self, offset: Point, start_offset: Point) {
        if !self.viewport.pan_to(offset) {
            self.viewport.set_offset(start_offset);
        }
    }

    /// Move the dragged object under the pointer. `None` if it no longer exists.
    fn drag_to(&mut self, id: &str, grab_offset: Point, screen_pt: Point) -> Option<Point> {
        let world = self.viewport.screen_to_world(screen_pt);
        let position = Point::new(world.x + grab_offset.x, world.y + grab_offset.y);
        if !self.store.update_position(id, position) {
            tracing::debug!(%id, "dragged object vanished");
            return None;
        }
        Some(position)
    }

    fn update_hover(&mut self, screen_pt: Point) -> Vec<Action> {
        let world = self.viewport.screen_to_world(screen_pt);
        self.ui.cursor_world = Some(world);
        let hovered = hit::hovered(world, &self.store);
        if hovered == self.ui.hovered {
            return Vec::new();
        }
        self.ui.hovered.clone_from(&hovered);
        vec![Action::HoverChanged(hovered), Action::RenderNeeded]
    }
}
