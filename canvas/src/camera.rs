//! Camera and viewport: the screen/world transform plus the spatial limits
//! that bound panning.
//!
//! [`Camera`] is the raw `scale` + `offset` pair. [`Viewport`] wraps a camera
//! together with the container size and the configured limits, and is the
//! only place that mutates camera state in response to input.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::config::CanvasConfig;

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned rectangle given by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle of the given size centered on `center`.
    #[must_use]
    pub fn centered(center: Point, width: f64, height: f64) -> Self {
        Self { x: center.x - width * 0.5, y: center.y - height * 0.5, width, height }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// Whether the two rectangles share any area. Touching edges do not count.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

/// Camera state for pan/zoom on the unbounded world plane.
///
/// `offset` is the screen position of the world origin, in CSS pixels.
/// `scale` is a multiplicative zoom factor (1.0 = no zoom) and must stay
/// positive so the transform remains invertible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub scale: f64,
    pub offset: Point,
}

impl Default for Camera {
    fn default() -> Self {
        Self { scale: 1.0, offset: Point::default() }
    }
}

impl Camera {
    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.offset.x) / self.scale,
            y: (screen.y - self.offset.y) / self.scale,
        }
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.scale + self.offset.x,
            y: world.y * self.scale + self.offset.y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }
}

/// A camera bound to a container of known size and a set of spatial limits.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    camera: Camera,
    width: f64,
    height: f64,
    config: CanvasConfig,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl Viewport {
    /// An unmounted (0×0) viewport with the identity camera.
    #[must_use]
    pub fn new(config: CanvasConfig) -> Self {
        Self { camera: Camera::default(), width: 0.0, height: 0.0, config }
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// `false` until the container has reported a non-empty size.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Geometric center of the container in screen space.
    #[must_use]
    pub fn center_screen(&self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }

    /// World coordinate currently shown at the container center.
    #[must_use]
    pub fn center_world(&self) -> Point {
        self.camera.screen_to_world(self.center_screen())
    }

    /// World-space rectangle covered by the container.
    #[must_use]
    pub fn visible_world_rect(&self) -> Rect {
        let origin = self.camera.screen_to_world(Point::default());
        Rect::new(
            origin.x,
            origin.y,
            self.camera.screen_dist_to_world(self.width),
            self.camera.screen_dist_to_world(self.height),
        )
    }

    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        self.camera.world_to_screen(world)
    }

    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        self.camera.screen_to_world(screen)
    }

    /// Move the camera without any limit check. Used for live pan feedback;
    /// the end of a pan gesture goes through [`Viewport::pan_to`].
    pub fn set_offset(&mut self, offset: Point) {
        self.camera.offset = offset;
    }

    /// Zoom one step around `pointer` so the world point under it stays put.
    ///
    /// Positive `delta_y` (wheel down) zooms out; anything else zooms in.
    /// Returns the new scale.
    pub fn zoom_at(&mut self, pointer: Point, delta_y: f64) -> f64 {
        let anchor = self.camera.screen_to_world(pointer);
        let old = self.camera.scale;
        let proposed = if delta_y > 0.0 { old / self.config.zoom_step } else { old * self.config.zoom_step };
        let scale = proposed.max(self.config.min_scale).min(self.config.max_scale);

        self.camera.scale = scale;
        self.camera.offset = Point::new(pointer.x - anchor.x * scale, pointer.y - anchor.y * scale);
        tracing::trace!(old, scale, "zoom");
        scale
    }

    /// Whether the visible area under `offset` stays inside the world radius.
    ///
    /// The visible area is approximated by a disk around the viewport's world
    /// center with radius `max(width, height) / 2`, in world units.
    #[must_use]
    pub fn offset_within_world(&self, offset: Point) -> bool {
        let scale = self.camera.scale;
        let half_extent = self.width.max(self.height) * 0.5 / scale;
        let center = Point::new((self.width * 0.5 - offset.x) / scale, (self.height * 0.5 - offset.y) / scale);
        center.distance_to(Point::default()) + half_extent <= self.config.world_radius
    }

    /// Accept `proposed` as the new offset unless it violates the world radius.
    ///
    /// On rejection the current offset is left untouched.
    pub fn pan_to(&mut self, proposed: Point) -> bool {
        if !self.offset_within_world(proposed) {
            tracing::debug!(x = proposed.x, y = proposed.y, "pan rejected: outside world radius");
            return false;
        }
        self.camera.offset = proposed;
        true
    }

    /// Project a pan handle position onto the drag-radius disk around the
    /// container center. Points already inside pass through unchanged.
    #[must_use]
    pub fn clamp_drag_handle(&self, raw: Point) -> Point {
        let center = self.center_screen();
        let dx = raw.x - center.x;
        let dy = raw.y - center.y;
        let radius = self.config.drag_radius;

        if dx.hypot(dy) <= radius {
            return raw;
        }

        let angle = dy.atan2(dx);
        Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
    }

    /// Update the container size, keeping the world point at the old center
    /// under the new center.
    pub fn resize(&mut self, width: f64, height: f64) {
        let anchor = self.center_world();
        self.width = width.max(0.0);
        self.height = height.max(0.0);

        let center = self.center_screen();
        let scale = self.camera.scale;
        self.camera.offset = Point::new(center.x - anchor.x * scale, center.y - anchor.y * scale);
        tracing::debug!(width = self.width, height = self.height, "viewport resized");
    }
}

/// Clamp a popup of `size` opened at `raw` so it stays inside a container
/// of `container` size. The top-left corner never goes negative.
#[must_use]
pub fn clamp_menu_position(raw: Point, size: (f64, f64), container: (f64, f64)) -> Point {
    let max_x = (container.0 - size.0).max(0.0);
    let max_y = (container.1 - size.1).max(0.0);
    Point::new(raw.x.clamp(0.0, max_x), raw.y.clamp(0.0, max_y))
}
