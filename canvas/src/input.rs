//! Input model: mouse buttons, wheel deltas, and the gesture state machines.
//!
//! `InputState` is the active canvas gesture tracked between pointer-down and
//! pointer-up; `GridGesture` is its counterpart for the grid editor. Both carry
//! the context needed to compute incremental updates and to undo or drop the
//! gesture on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::ObjectId;
use crate::grid::ResizeEdge;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code. Back/forward buttons map to `None`.
    #[must_use]
    pub fn from_dom(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, Default)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// World position under the pointer at the last move, if known.
    pub cursor_world: Option<Point>,
    /// Objects whose hover box contains the pointer.
    pub hovered: Vec<ObjectId>,
    /// Open context menu: screen position of its top-left corner.
    pub context_menu: Option<Point>,
}

/// Canvas gesture state.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is panning the canvas by dragging empty space.
    Panning {
        /// Screen position of the pointer-down.
        start_screen: Point,
        /// Camera offset at pointer-down; restored if the pan ends out of bounds.
        start_offset: Point,
    },
    /// The user is moving a card by its grip.
    DraggingObject {
        /// Id of the object being dragged.
        id: ObjectId,
        /// Object position minus pointer world position at pointer-down.
        grab_offset: Point,
    },
}

impl InputState {
    /// Whether a gesture currently holds the pointer.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Grid editor gesture state.
///
/// `generation` records [`crate::grid::GridLayout::generation`] at
/// pointer-down; a gesture whose generation no longer matches is stale.
#[derive(Debug, Clone, Default)]
pub enum GridGesture {
    #[default]
    Idle,
    /// Dragging a block by its move handle.
    Moving { id: String, generation: u64 },
    /// Dragging one of a block's resize strips.
    Resizing {
        id: String,
        edge: ResizeEdge,
        /// Pointer x at the last emitted resize step.
        last_x: f64,
        generation: u64,
    },
}

impl GridGesture {
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Generation the gesture was captured at, if any.
    #[must_use]
    pub fn generation(&self) -> Option<u64> {
        match self {
            Self::Idle => None,
            Self::Moving { generation, .. } | Self::Resizing { generation, .. } => Some(*generation),
        }
    }
}
