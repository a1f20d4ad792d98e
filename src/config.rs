//! Canvas configuration overrides read from `SPLINE_*` environment variables.
//!
//! Every field of [`CanvasConfig`] can be overridden:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `SPLINE_ZOOM_STEP` | `zoom_step` |
//! | `SPLINE_MIN_SCALE` / `SPLINE_MAX_SCALE` | `min_scale` / `max_scale` |
//! | `SPLINE_DRAG_RADIUS` | `drag_radius` |
//! | `SPLINE_WORLD_RADIUS` | `world_radius` |
//! | `SPLINE_CELL_SIZE` | `cell_size` |
//! | `SPLINE_MIN_BLOCK_WIDTH` / `SPLINE_MAX_BLOCK_WIDTH` | block width range |
//! | `SPLINE_MAX_RESOLVE_STEPS` | `max_resolve_steps` |
//! | `SPLINE_MIN_ZOOM` / `SPLINE_MAX_ZOOM` | grid zoom range |
//!
//! Unparsable values fall back to the default with a warning; the merged
//! config is then validated as a whole.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use canvas::config::{CanvasConfig, ConfigError};

/// Build the canvas config from the process environment.
///
/// # Errors
///
/// Returns [`ConfigError`] if the merged values fail validation.
pub fn from_env() -> Result<CanvasConfig, ConfigError> {
    from_lookup(|key| std::env::var(key).ok())
}

/// Build the canvas config from an arbitrary key lookup.
///
/// # Errors
///
/// Returns [`ConfigError`] if the merged values fail validation.
pub fn from_lookup<F>(lookup: F) -> Result<CanvasConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let d = CanvasConfig::default();
    let config = CanvasConfig {
        zoom_step: env_parse(&lookup, "SPLINE_ZOOM_STEP", d.zoom_step),
        min_scale: env_parse(&lookup, "SPLINE_MIN_SCALE", d.min_scale),
        max_scale: env_parse(&lookup, "SPLINE_MAX_SCALE", d.max_scale),
        drag_radius: env_parse(&lookup, "SPLINE_DRAG_RADIUS", d.drag_radius),
        world_radius: env_parse(&lookup, "SPLINE_WORLD_RADIUS", d.world_radius),
        cell_size: env_parse(&lookup, "SPLINE_CELL_SIZE", d.cell_size),
        min_block_width: env_parse(&lookup, "SPLINE_MIN_BLOCK_WIDTH", d.min_block_width),
        max_block_width: env_parse(&lookup, "SPLINE_MAX_BLOCK_WIDTH", d.max_block_width),
        max_resolve_steps: env_parse(&lookup, "SPLINE_MAX_RESOLVE_STEPS", d.max_resolve_steps),
        min_zoom: env_parse(&lookup, "SPLINE_MIN_ZOOM", d.min_zoom),
        max_zoom: env_parse(&lookup, "SPLINE_MAX_ZOOM", d.max_zoom),
    };
    config.validate()?;
    Ok(config)
}

fn env_parse<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparsable override");
            default
        }
    }
}
