//! Grid editor: pointer gestures over a [`GridLayout`].
//!
//! Pointer coordinates are relative to the grid container's top-left corner.
//! A gesture records the layout generation it started under; if the block set
//! is replaced mid-gesture the gesture is dropped on the next event.

#[cfg(test)]
#[path = "grid_editor_test.rs"]
mod grid_editor_test;

use std::mem;

use crate::camera::Point;
use crate::config::CanvasConfig;
use crate::engine::Action;
use crate::grid::{Displacement, GridBlock, GridLayout};
use crate::hit::{self, GridHandle};
use crate::input::{Button, GridGesture};

#[derive(Debug, Clone)]
pub struct GridEditor<C> {
    layout: GridLayout<C>,
    gesture: GridGesture,
}

impl<C> Default for GridEditor<C> {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl<C> GridEditor<C> {
    #[must_use]
    pub fn new(config: CanvasConfig) -> Self {
        Self { layout: GridLayout::new(config), gesture: GridGesture::Idle }
    }

    #[must_use]
    pub fn layout(&self) -> &GridLayout<C> {
        &self.layout
    }

    /// Direct access to the layout. Replacing the block set through this
    /// handle still invalidates a held gesture via the generation counter.
    pub fn layout_mut(&mut self) -> &mut GridLayout<C> {
        &mut self.layout
    }

    #[must_use]
    pub fn gesture(&self) -> &GridGesture {
        &self.gesture
    }

    /// Replace and re-resolve the block set. A held gesture is released.
    pub fn replace_all(&mut self, blocks: Vec<GridBlock<C>>) -> Vec<Action> {
        self.layout.replace_all(blocks);
        let mut actions = self.release();
        actions.push(self.resolved_action());
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Resolve and append a single block.
    pub fn insert(&mut self, block: GridBlock<C>) -> (Displacement, Vec<Action>) {
        let displacement = self.layout.insert(block);
        (displacement, vec![self.resolved_action(), Action::RenderNeeded])
    }

    pub fn set_zoom(&mut self, zoom: f64) -> Vec<Action> {
        self.layout.set_zoom(zoom);
        vec![Action::RenderNeeded]
    }

    pub fn on_resize(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.layout.set_container_size(width, height);
        vec![Action::RenderNeeded]
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, pointer: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary || self.gesture.is_active() {
            return Vec::new();
        }
        let Some(hit) = hit::grid_hit_test(pointer, &self.layout) else {
            return Vec::new();
        };

        let generation = self.layout.generation();
        let cursor = match hit.handle {
            GridHandle::Move => {
                self.gesture = GridGesture::Moving { id: hit.block_id, generation };
                Action::grabbing_cursor()
            }
            GridHandle::Resize(edge) => {
                self.gesture = GridGesture::Resizing { id: hit.block_id, edge, last_x: pointer.x, generation };
                Action::resize_cursor()
            }
        };
        vec![Action::CapturePointer, cursor]
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn on_pointer_move(&mut self, pointer: Point) -> Vec<Action> {
        if self.is_stale() {
            tracing::debug!("grid gesture outlived its block set; dropping");
            return self.release();
        }

        let cell = self.layout.cell_at(pointer);
        let cell_size = self.layout.effective_cell_size();
        let layout = &mut self.layout;

        match &mut self.gesture {
            GridGesture::Idle => Vec::new(),
            GridGesture::Moving { id, .. } => {
                let before = layout.get(id).map(|b| (b.x, b.y));
                if !layout.drag_block(id, cell) {
                    return Vec::new();
                }
                match layout.get(id) {
                    Some(b) if Some((b.x, b.y)) != before => {
                        vec![Action::BlockMoved { id: id.clone(), x: b.x, y: b.y }, Action::RenderNeeded]
                    }
                    _ => Vec::new(),
                }
            }
            GridGesture::Resizing { id, edge, last_x, .. } => {
                if cell_size <= 0.0 {
                    return Vec::new();
                }
                let delta = ((pointer.x - *last_x) / cell_size).round() as i32;
                if delta == 0 {
                    return Vec::new();
                }
                let before = layout.get(id).map(|b| (b.x, b.w));
                if !layout.resize_block(id, *edge, delta) {
                    return Vec::new();
                }
                // Advance by whole cells so the sub-cell remainder carries over.
                *last_x += f64::from(delta) * cell_size;
                match layout.get(id) {
                    Some(b) if Some((b.x, b.w)) != before => {
                        vec![Action::BlockResized { id: id.clone(), x: b.x, w: b.w }, Action::RenderNeeded]
                    }
                    _ => Vec::new(),
                }
            }
        }
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.release()
    }

    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        self.release()
    }

    // --- Internals ---

    fn is_stale(&self) -> bool {
        self.gesture.generation().is_some_and(|g| g != self.layout.generation())
    }

    fn release(&mut self) -> Vec<Action> {
        match mem::take(&mut self.gesture) {
            GridGesture::Idle => Vec::new(),
            _ => vec![Action::ReleasePointer, Action::default_cursor()],
        }
    }

    fn resolved_action(&self) -> Action {
        Action::BlocksResolved { flagged: self.layout.flagged().into_iter().map(str::to_owned).collect() }
    }
}
