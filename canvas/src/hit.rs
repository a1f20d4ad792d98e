//! Hit-testing: which card, grip, or grid handle is under a point.
//!
//! Cards are tested in world space, grid handles in the grid container's
//! screen space (pixels relative to its top-left corner).

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Point, Rect};
use crate::consts::{
    CARD_HEIGHT, CARD_WIDTH, GRIP_MARGIN, GRIP_SIZE, HOVER_BOX, MOVE_HANDLE_INSET_PX, MOVE_HANDLE_SIZE_PX,
    RESIZE_HANDLE_HEIGHT_PX, RESIZE_HANDLE_WIDTH_PX,
};
use crate::doc::{ObjectId, ObjectStore, WorldObject};
use crate::grid::{GridLayout, ResizeEdge};

/// Which part of a card was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    /// The card's form area; pointer input there belongs to the host.
    Body,
    /// The drag grip in the card's top-right corner.
    Grip,
}

/// Result of a card hit test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub object_id: ObjectId,
    pub part: HitPart,
}

/// World-space rectangle of a card, centered on its position.
#[must_use]
pub fn card_rect(obj: &WorldObject) -> Rect {
    Rect::centered(obj.position, CARD_WIDTH, CARD_HEIGHT)
}

/// World-space rectangle of a card's grip handle.
#[must_use]
pub fn grip_rect(card: Rect) -> Rect {
    Rect::new(card.x + card.width - GRIP_MARGIN - GRIP_SIZE, card.y + GRIP_MARGIN, GRIP_SIZE, GRIP_SIZE)
}

/// Topmost card under `world_pt`, checking later (upper) cards first.
#[must_use]
pub fn hit_test(world_pt: Point, store: &ObjectStore) -> Option<Hit> {
    store.list().iter().rev().find_map(|obj| {
        let card = card_rect(obj);
        if !card.contains(world_pt) {
            return None;
        }
        let part = if grip_rect(card).contains(world_pt) { HitPart::Grip } else { HitPart::Body };
        Some(Hit { object_id: obj.id.clone(), part })
    })
}

/// Ids of every object whose hover box contains `world_pt`, in list order.
#[must_use]
pub fn hovered(world_pt: Point, store: &ObjectStore) -> Vec<ObjectId> {
    store
        .list()
        .iter()
        .filter(|obj| Rect::centered(obj.position, HOVER_BOX, HOVER_BOX).contains(world_pt))
        .map(|obj| obj.id.clone())
        .collect()
}

// =============================================================
// Grid handles
// =============================================================

/// Which handle of a grid block was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridHandle {
    Move,
    Resize(ResizeEdge),
}

/// Result of a grid handle hit test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridHit {
    pub block_id: String,
    pub handle: GridHandle,
}

/// Screen rectangle of the move handle inside a block's screen rect.
#[must_use]
pub fn move_handle_rect(block: Rect) -> Rect {
    Rect::new(
        block.x + MOVE_HANDLE_INSET_PX,
        block.y + MOVE_HANDLE_INSET_PX,
        MOVE_HANDLE_SIZE_PX,
        MOVE_HANDLE_SIZE_PX,
    )
}

/// Screen rectangle of a resize strip, centered vertically on the given edge.
#[must_use]
pub fn resize_handle_rect(block: Rect, edge: ResizeEdge) -> Rect {
    let y = block.y + (block.height - RESIZE_HANDLE_HEIGHT_PX) * 0.5;
    let x = match edge {
        ResizeEdge::Left => block.x,
        ResizeEdge::Right => block.x + block.width - RESIZE_HANDLE_WIDTH_PX,
    };
    Rect::new(x, y, RESIZE_HANDLE_WIDTH_PX, RESIZE_HANDLE_HEIGHT_PX)
}

/// Handle under `pointer`, checking later blocks first and resize strips
/// before the move handle.
#[must_use]
pub fn grid_hit_test<C>(pointer: Point, layout: &GridLayout<C>) -> Option<GridHit> {
    layout.blocks().iter().rev().find_map(|block| {
        let rect = layout.screen_rect(block);
        let handle = [ResizeEdge::Left, ResizeEdge::Right]
            .into_iter()
            .find(|&edge| resize_handle_rect(rect, edge).contains(pointer))
            .map(GridHandle::Resize)
            .or_else(|| move_handle_rect(rect).contains(pointer).then_some(GridHandle::Move))?;
        Some(GridHit { block_id: block.id.clone(), handle })
    })
}
