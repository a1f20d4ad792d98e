//! Scene layout: what each object looks like and where it lands on screen.
//!
//! This module does not draw. It turns read-only views of the store, the
//! viewport, and the grid into positioned rectangles plus a declarative
//! description of each card's content, which the host renders with whatever
//! toolkit it uses.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::camera::{Point, Rect, Viewport};
use crate::consts::{CARD_HEIGHT, CARD_WIDTH};
use crate::doc::{ObjectId, ObjectKind, ObjectStore};
use crate::grid::{GridLayout, ResizeEdge};
use crate::hit;
use crate::input::UiState;

/// HTTP methods offered by the request card.
pub const HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS", "HEAD"];

/// One input on a card's form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Single-line text input.
    Text { label: &'static str, placeholder: &'static str },
    /// Fixed choice; the first option is the initial value.
    Select { label: &'static str, options: &'static [&'static str] },
}

/// What a card shows: a title, its form fields, and a submit label.
///
/// Only request cards carry a form. The other kinds are placeholders that
/// render a title and submit button with no fields until their forms exist.
pub trait CardContent {
    fn title(&self) -> &'static str;
    fn fields(&self) -> &'static [Field];
    fn submit_label(&self) -> &'static str;
}

impl CardContent for ObjectKind {
    fn title(&self) -> &'static str {
        match self {
            Self::Request => "New Endpoint",
            Self::Schema => "New Schema",
            Self::Collection => "New Collection",
            Self::Type => "New Type",
            Self::Response => "New Response",
            Self::Middleware => "New Middleware",
        }
    }

    fn fields(&self) -> &'static [Field] {
        match self {
            Self::Request => &[
                Field::Select { label: "Method", options: HTTP_METHODS },
                Field::Text { label: "Path", placeholder: "/api/users" },
            ],
            Self::Schema | Self::Collection | Self::Type | Self::Response | Self::Middleware => &[],
        }
    }

    fn submit_label(&self) -> &'static str {
        match self {
            Self::Request => "Save Endpoint",
            Self::Schema => "Save Schema",
            Self::Collection => "Save Collection",
            Self::Type => "Save Type",
            Self::Response => "Save Response",
            Self::Middleware => "Save Middleware",
        }
    }
}

/// A card positioned for the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: ObjectId,
    pub kind: ObjectKind,
    /// Screen rectangle at the current zoom.
    pub rect: Rect,
    /// Grip handle in screen space.
    pub grip: Rect,
    /// Camera scale, for hosts that lay out the card at 1:1 and transform it.
    pub scale: f64,
    pub hovered: bool,
    /// Whether any part of the card falls inside the container.
    pub visible: bool,
}

/// Lay out every object in stacking order (bottom first).
#[must_use]
pub fn scene(store: &ObjectStore, viewport: &Viewport, ui: &UiState) -> Vec<CardView> {
    let scale = viewport.camera().scale;
    let container = Rect::new(0.0, 0.0, viewport.width(), viewport.height());

    store
        .list()
        .iter()
        .map(|obj| {
            let card = hit::card_rect(obj);
            let rect = to_screen(viewport, card);
            CardView {
                id: obj.id.clone(),
                kind: obj.kind,
                rect,
                grip: to_screen(viewport, hit::grip_rect(card)),
                scale,
                hovered: ui.hovered.contains(&obj.id),
                visible: rect.intersects(&container),
            }
        })
        .collect()
}

/// Screen size of a card at `scale`.
#[must_use]
pub fn card_screen_size(scale: f64) -> (f64, f64) {
    (CARD_WIDTH * scale, CARD_HEIGHT * scale)
}

fn to_screen(viewport: &Viewport, world: Rect) -> Rect {
    let top_left = viewport.world_to_screen(Point::new(world.x, world.y));
    let scale = viewport.camera().scale;
    Rect::new(top_left.x, top_left.y, world.width * scale, world.height * scale)
}

// =============================================================
// Grid
// =============================================================

/// A grid block positioned inside the grid container.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockView {
    pub id: String,
    pub rect: Rect,
    pub move_handle: Rect,
    pub resize_left: Rect,
    pub resize_right: Rect,
    /// Resolution gave up on this block; it may overlap another.
    pub flagged: bool,
}

/// Lay out every grid block in insertion order.
#[must_use]
pub fn grid_scene<C>(layout: &GridLayout<C>) -> Vec<BlockView> {
    layout
        .blocks()
        .iter()
        .map(|block| {
            let rect = layout.screen_rect(block);
            BlockView {
                id: block.id.clone(),
                rect,
                move_handle: hit::move_handle_rect(rect),
                resize_left: hit::resize_handle_rect(rect, ResizeEdge::Left),
                resize_right: hit::resize_handle_rect(rect, ResizeEdge::Right),
                flagged: layout.is_flagged(&block.id),
            }
        })
        .collect()
}

/// Pixel size the grid container needs to show every block.
#[must_use]
pub fn grid_content_size<C>(layout: &GridLayout<C>) -> (f64, f64) {
    let (w, h) = layout.content_extent();
    let cell = layout.effective_cell_size();
    (f64::from(w) * cell, f64::from(h) * cell)
}
