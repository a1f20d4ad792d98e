//! Host-overridable limits for the viewport and grid engines.
//!
//! [`CanvasConfig::default`] reproduces the playground's built-in behavior.
//! Hosts that load overrides (environment, files) should call
//! [`CanvasConfig::validate`] before handing the config to an engine.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts;

/// Error returned by [`CanvasConfig::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The zoom step must be strictly greater than one.
    #[error("zoom_step must be > 1.0, got {0}")]
    ZoomStep(f64),
    /// `min_scale` must be positive and not above `max_scale`.
    #[error("invalid scale range [{min}, {max}]")]
    ScaleRange { min: f64, max: f64 },
    /// A radius must be finite and positive.
    #[error("{name} must be a positive finite radius, got {value}")]
    Radius { name: &'static str, value: f64 },
    /// The grid cell size must be finite and positive.
    #[error("cell_size must be > 0, got {0}")]
    CellSize(f64),
    /// Block widths must satisfy `1 <= min <= max`.
    #[error("invalid block width range [{min}, {max}]")]
    WidthRange { min: i32, max: i32 },
    /// At least one displacement step is needed to resolve overlap.
    #[error("max_resolve_steps must be at least 1")]
    ResolveSteps,
    /// The grid zoom range must lie within `[-1, 1]` with `min <= max`.
    #[error("invalid grid zoom range [{min}, {max}]")]
    ZoomRange { min: f64, max: f64 },
}

/// Fixed constants the host may override.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Multiplicative camera zoom step per wheel event.
    pub zoom_step: f64,
    /// Smallest reachable camera scale.
    pub min_scale: f64,
    /// Largest reachable camera scale.
    pub max_scale: f64,
    /// Soft limit: pan handle radius around the viewport center (screen px).
    pub drag_radius: f64,
    /// Hard limit: world-extent radius around the origin (world units).
    pub world_radius: f64,
    /// Base grid cell size in pixels.
    pub cell_size: f64,
    /// Minimum block width in cells.
    pub min_block_width: i32,
    /// Maximum block width in cells.
    pub max_block_width: i32,
    /// Iteration cap for overlap resolution.
    pub max_resolve_steps: u32,
    /// Lower bound for the grid zoom factor.
    pub min_zoom: f64,
    /// Upper bound for the grid zoom factor.
    pub max_zoom: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            zoom_step: consts::ZOOM_STEP,
            min_scale: consts::MIN_SCALE,
            max_scale: consts::MAX_SCALE,
            drag_radius: consts::DRAG_RADIUS,
            world_radius: consts::WORLD_RADIUS,
            cell_size: consts::CELL_SIZE,
            min_block_width: consts::MIN_BLOCK_WIDTH,
            max_block_width: consts::MAX_BLOCK_WIDTH,
            max_resolve_steps: consts::MAX_RESOLVE_STEPS,
            min_zoom: consts::MIN_GRID_ZOOM,
            max_zoom: consts::MAX_GRID_ZOOM,
        }
    }
}

impl CanvasConfig {
    /// Check that every limit is usable by the engines.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found, checked in field order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.zoom_step.is_finite() && self.zoom_step > 1.0) {
            return Err(ConfigError::ZoomStep(self.zoom_step));
        }
        if !(self.min_scale > 0.0 && self.min_scale <= self.max_scale && self.max_scale.is_finite()) {
            return Err(ConfigError::ScaleRange { min: self.min_scale, max: self.max_scale });
        }
        check_radius("drag_radius", self.drag_radius)?;
        check_radius("world_radius", self.world_radius)?;
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(ConfigError::CellSize(self.cell_size));
        }
        if self.min_block_width < 1 || self.min_block_width > self.max_block_width {
            return Err(ConfigError::WidthRange { min: self.min_block_width, max: self.max_block_width });
        }
        if self.max_resolve_steps == 0 {
            return Err(ConfigError::ResolveSteps);
        }
        if !(self.min_zoom >= consts::MIN_GRID_ZOOM && self.max_zoom <= consts::MAX_GRID_ZOOM && self.min_zoom <= self.max_zoom) {
            return Err(ConfigError::ZoomRange { min: self.min_zoom, max: self.max_zoom });
        }
        Ok(())
    }
}

fn check_radius(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Radius { name, value })
    }
}
