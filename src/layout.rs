//! Grid layout files: resolve a JSON array of blocks and report placements.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use canvas::config::CanvasConfig;
use canvas::grid::{GridBlock, GridLayout};
use serde::Serialize;
use serde_json::Value;

use crate::CliError;

/// Resolved grid, ready to print.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutReport {
    pub blocks: Vec<GridBlock<Value>>,
    /// Ids whose placement hit the step cap.
    pub flagged: Vec<String>,
    /// `(columns, rows)` covered by the blocks.
    pub extent: (i32, i32),
    /// Pixel size of the grid container at the requested zoom.
    pub size_px: (f64, f64),
}

/// Resolve every block in `blob` in array order.
///
/// Positions outside the grid are clamped by the layout; spans must cover at
/// least one cell.
///
/// # Errors
///
/// Returns [`CliError::Json`] if the blob is not an array of blocks, or
/// [`CliError::EmptyBlock`] for the first block with `w < 1` or `h < 1`.
pub fn resolve_file(config: CanvasConfig, blob: &str, zoom: f64) -> Result<LayoutReport, CliError> {
    let blocks: Vec<GridBlock<Value>> = serde_json::from_str(blob)?;
    if let Some(b) = blocks.iter().find(|b| b.is_degenerate()) {
        return Err(CliError::EmptyBlock { id: b.id.clone(), w: b.w, h: b.h });
    }
    let mut layout = GridLayout::new(config);
    layout.set_zoom(zoom);
    layout.replace_all(blocks);

    let flagged: Vec<String> = layout.flagged().into_iter().map(str::to_owned).collect();
    if !flagged.is_empty() {
        tracing::warn!(count = flagged.len(), "some blocks could not be placed without overlap");
    }

    Ok(LayoutReport {
        blocks: layout.blocks().to_vec(),
        flagged,
        extent: layout.content_extent(),
        size_px: canvas::render::grid_content_size(&layout),
    })
}
