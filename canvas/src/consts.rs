//! Shared numeric constants for the canvas crate.
//!
//! These are the defaults behind [`crate::config::CanvasConfig`]; hosts that
//! need different limits override the config rather than these values.

// ── Camera ──────────────────────────────────────────────────────

/// Multiplicative zoom step applied per wheel notch.
pub const ZOOM_STEP: f64 = 1.05;

/// Smallest camera scale reachable by wheel zoom.
pub const MIN_SCALE: f64 = 0.05;

/// Largest camera scale reachable by wheel zoom.
pub const MAX_SCALE: f64 = 20.0;

/// Screen-space radius around the viewport center that a pan handle may reach.
pub const DRAG_RADIUS: f64 = 2000.0;

/// World-space radius around the origin that the visible area must stay within.
pub const WORLD_RADIUS: f64 = 5000.0;

// ── Cards ───────────────────────────────────────────────────────

/// Card height in world units at scale 1.
pub const CARD_HEIGHT: f64 = 300.0;

/// Card width in world units at scale 1 (4:3 aspect).
pub const CARD_WIDTH: f64 = CARD_HEIGHT * 4.0 / 3.0;

/// Side of the square hover box centered on each object, in world units.
pub const HOVER_BOX: f64 = 500.0;

/// Side of the grip handle in the card's top-right corner, in world units.
pub const GRIP_SIZE: f64 = 16.0;

/// Inset of the grip handle from the card's top and right edges.
pub const GRIP_MARGIN: f64 = 16.0;

// ── Grid ────────────────────────────────────────────────────────

/// Base grid cell size in pixels before zoom.
pub const CELL_SIZE: f64 = 20.0;

/// Narrowest block width in cells reachable by resizing.
pub const MIN_BLOCK_WIDTH: i32 = 25;

/// Widest block width in cells reachable by resizing.
pub const MAX_BLOCK_WIDTH: i32 = 40;

/// Maximum number of one-row displacements tried when resolving a placement.
pub const MAX_RESOLVE_STEPS: u32 = 100;

/// Largest cell coordinate or span a layout accepts. Keeps `x + w` and
/// `y + h` plus any displacement well inside `i32`.
pub const MAX_GRID_CELL: i32 = 1 << 20;

/// Lower bound of the grid zoom factor.
pub const MIN_GRID_ZOOM: f64 = -1.0;

/// Upper bound of the grid zoom factor.
pub const MAX_GRID_ZOOM: f64 = 1.0;

/// Move handle: inset from the block's top-left corner, in pixels.
pub const MOVE_HANDLE_INSET_PX: f64 = 8.0;

/// Move handle: side of the square handle, in pixels.
pub const MOVE_HANDLE_SIZE_PX: f64 = 12.0;

/// Resize handles: width of the edge strip, in pixels.
pub const RESIZE_HANDLE_WIDTH_PX: f64 = 8.0;

/// Resize handles: height of the edge strip centered at mid-height, in pixels.
pub const RESIZE_HANDLE_HEIGHT_PX: f64 = 40.0;

// ── Context menu ────────────────────────────────────────────────

/// Default context menu width in pixels, until the host reports the measured size.
pub const CONTEXT_MENU_WIDTH: f64 = 224.0;

/// Default context menu height in pixels, until the host reports the measured size.
pub const CONTEXT_MENU_HEIGHT: f64 = 216.0;
