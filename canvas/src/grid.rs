//! Grid layout: integer-cell blocks, overlap resolution, drag and resize.
//!
//! Blocks live on a grid whose on-screen cell size is
//! `cell_size * (1 + zoom)`. Inserting blocks runs overlap resolution: a block
//! that overlaps any block placed before it is pushed down one row at a time
//! until it is clear or the step cap is reached. Resolution is
//! order-dependent, so a changed block set is always re-resolved from the
//! start with [`resolve_all`].
//!
//! Dragging and resizing deliberately do **not** re-run resolution; a drag may
//! leave blocks overlapping. [`GridLayout::overlapping_pairs`] reports such
//! overlaps for hosts that want to surface them.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::camera::{Point, Rect};
use crate::config::CanvasConfig;
use crate::consts::MAX_GRID_CELL;

/// A grid-aligned block. `content` is carried along untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridBlock<C> {
    pub id: String,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub content: C,
}

impl<C> GridBlock<C> {
    #[must_use]
    pub fn new(id: impl Into<String>, x: i32, y: i32, w: i32, h: i32, content: C) -> Self {
        Self { id: id.into(), x, y, w, h, content }
    }

    /// Whether the cell rectangles of `self` and `other` intersect.
    ///
    /// Edges that merely touch do not overlap. Computed in `i64`, so any pair
    /// of `i32` blocks compares correctly.
    #[must_use]
    pub fn overlaps<D>(&self, other: &GridBlock<D>) -> bool {
        let (ax, ay, aw, ah) = (i64::from(self.x), i64::from(self.y), i64::from(self.w), i64::from(self.h));
        let (bx, by, bw, bh) = (i64::from(other.x), i64::from(other.y), i64::from(other.w), i64::from(other.h));
        ax < bx + bw && ax + aw > bx && ay < by + bh && ay + ah > by
    }

    /// A block with no area: `w < 1` or `h < 1`.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.w < 1 || self.h < 1
    }

    /// Clamp position into `[0, MAX_GRID_CELL]` and spans into
    /// `[1, MAX_GRID_CELL]`.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        let before = (self.x, self.y, self.w, self.h);
        self.x = self.x.clamp(0, MAX_GRID_CELL);
        self.y = self.y.clamp(0, MAX_GRID_CELL);
        self.w = self.w.clamp(1, MAX_GRID_CELL);
        self.h = self.h.clamp(1, MAX_GRID_CELL);
        if before != (self.x, self.y, self.w, self.h) {
            tracing::debug!(id = %self.id, x = self.x, y = self.y, w = self.w, h = self.h, "block clamped into grid bounds");
        }
        self
    }
}

/// Which horizontal edge a resize gesture grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeEdge {
    Left,
    Right,
}

/// How far resolution had to push a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Displacement {
    /// Rows the block was moved down.
    pub steps: u32,
    /// The step cap was hit while the block still overlapped.
    pub exhausted: bool,
}

/// A resolved block together with its displacement report.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement<C> {
    pub block: GridBlock<C>,
    pub displacement: Displacement,
}

/// Push `block` down until it overlaps none of `placed`, at most `max_steps` rows.
///
/// The result is only guaranteed overlap-free against `placed` itself, and
/// only when `displacement.exhausted` is false.
#[must_use]
pub fn resolve<C, D>(block: GridBlock<C>, placed: &[GridBlock<D>], max_steps: u32) -> Placement<C> {
    let mut candidate = block;
    let mut displacement = Displacement::default();

    while placed.iter().any(|b| candidate.overlaps(b)) {
        if displacement.steps >= max_steps {
            displacement.exhausted = true;
            tracing::warn!(id = %candidate.id, y = candidate.y, steps = displacement.steps, "placement exhausted");
            break;
        }
        candidate.y = candidate.y.saturating_add(1);
        displacement.steps += 1;
    }

    Placement { block: candidate, displacement }
}

/// Resolve an ordered block list, each block against those resolved before it.
#[must_use]
pub fn resolve_all<C>(blocks: Vec<GridBlock<C>>, max_steps: u32) -> Vec<Placement<C>> {
    let mut placed: Vec<GridBlock<C>> = Vec::with_capacity(blocks.len());
    let mut reports = Vec::with_capacity(blocks.len());

    for block in blocks {
        let Placement { block, displacement } = resolve(block, &placed, max_steps);
        placed.push(block);
        reports.push(displacement);
    }

    placed
        .into_iter()
        .zip(reports)
        .map(|(block, displacement)| Placement { block, displacement })
        .collect()
}

/// Owned block set plus the zoom and container size it is laid out in.
#[derive(Debug, Clone)]
pub struct GridLayout<C> {
    blocks: Vec<GridBlock<C>>,
    flagged: HashSet<String>,
    config: CanvasConfig,
    zoom: f64,
    container: (f64, f64),
    generation: u64,
}

impl<C> Default for GridLayout<C> {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl<C> GridLayout<C> {
    #[must_use]
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            blocks: Vec::new(),
            flagged: HashSet::new(),
            config,
            zoom: 0.0,
            container: (0.0, 0.0),
            generation: 0,
        }
    }

    /// Resolved blocks in insertion order.
    #[must_use]
    pub fn blocks(&self) -> &[GridBlock<C>] {
        &self.blocks
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&GridBlock<C>> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Counter bumped whenever the block set is replaced wholesale.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Ids of blocks whose last resolution hit the step cap.
    #[must_use]
    pub fn flagged(&self) -> Vec<&str> {
        self.blocks.iter().filter(|b| self.flagged.contains(&b.id)).map(|b| b.id.as_str()).collect()
    }

    #[must_use]
    pub fn is_flagged(&self, id: &str) -> bool {
        self.flagged.contains(id)
    }

    /// Replace the block set and resolve it from scratch.
    ///
    /// Blocks are [normalized](GridBlock::normalized) first.
    pub fn replace_all(&mut self, blocks: Vec<GridBlock<C>>) {
        let blocks = blocks.into_iter().map(GridBlock::normalized).collect();
        let placements = resolve_all(blocks, self.config.max_resolve_steps);
        self.flagged.clear();
        self.blocks = placements
            .into_iter()
            .map(|p| {
                if p.displacement.exhausted {
                    self.flagged.insert(p.block.id.clone());
                }
                p.block
            })
            .collect();
        self.generation += 1;
        tracing::debug!(count = self.blocks.len(), flagged = self.flagged.len(), "grid resolved");
    }

    /// Resolve `block` against the current set and append it.
    ///
    /// A block with an id already present replaces the old one, which is
    /// removed before resolution. The block is normalized first.
    pub fn insert(&mut self, block: GridBlock<C>) -> Displacement {
        let block = block.normalized();
        self.remove(&block.id);
        let Placement { block, displacement } = resolve(block, &self.blocks, self.config.max_resolve_steps);
        if displacement.exhausted {
            self.flagged.insert(block.id.clone());
        }
        self.blocks.push(block);
        displacement
    }

    /// Remove a block by id, returning it if it was present.
    pub fn remove(&mut self, id: &str) -> Option<GridBlock<C>> {
        let index = self.blocks.iter().position(|b| b.id == id)?;
        self.flagged.remove(id);
        Some(self.blocks.remove(index))
    }

    /// Current zoom factor in `[min_zoom, max_zoom]`.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Set the zoom factor, clamped into the configured range.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.max(self.config.min_zoom).min(self.config.max_zoom);
    }

    /// Pixel size of one cell at the current zoom.
    #[must_use]
    pub fn effective_cell_size(&self) -> f64 {
        self.config.cell_size * (1.0 + self.zoom)
    }

    /// Record the grid container's pixel size.
    pub fn set_container_size(&mut self, width: f64, height: f64) {
        self.container = (width.max(0.0), height.max(0.0));
    }

    /// Number of whole cells the container spans horizontally and vertically.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn span(&self) -> (i32, i32) {
        let cell = self.effective_cell_size();
        if cell <= 0.0 {
            return (0, 0);
        }
        ((self.container.0 / cell).floor() as i32, (self.container.1 / cell).floor() as i32)
    }

    /// Grid cell under a pointer position relative to the container's top-left.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn cell_at(&self, pointer: Point) -> (i32, i32) {
        let cell = self.effective_cell_size();
        if cell <= 0.0 {
            return (0, 0);
        }
        ((pointer.x / cell).floor() as i32, (pointer.y / cell).floor() as i32)
    }

    /// Move a block to `cell`, clamped so it stays inside the container.
    ///
    /// No overlap resolution runs. Returns false when the block is unknown or
    /// the container has no size yet.
    pub fn drag_block(&mut self, id: &str, cell: (i32, i32)) -> bool {
        let (cols, rows) = self.span();
        if cols <= 0 || rows <= 0 {
            return false;
        }
        let Some(block) = self.blocks.iter_mut().find(|b| b.id == id) else {
            return false;
        };
        block.x = cell.0.min(cols.saturating_sub(block.w)).max(0);
        block.y = cell.1.min(rows.saturating_sub(block.h)).max(0);
        self.flagged.remove(id);
        true
    }

    /// Resize a block from one horizontal edge by `delta` cells.
    ///
    /// `Left` moves `x` (never below 0) and keeps the right edge fixed unless
    /// the width clamp forces a correction. `Right` changes only `w`. Width is
    /// always clamped to `[min_block_width, max_block_width]`.
    pub fn resize_block(&mut self, id: &str, edge: ResizeEdge, delta: i32) -> bool {
        let (min_w, max_w) = (self.config.min_block_width, self.config.max_block_width);
        let Some(block) = self.blocks.iter_mut().find(|b| b.id == id) else {
            return false;
        };

        match edge {
            ResizeEdge::Left => {
                let right = block.x.saturating_add(block.w);
                let mut x = block.x.saturating_add(delta).max(0);
                let mut w = right.saturating_sub(x);
                let clamped = w.max(min_w).min(max_w);
                if clamped != w {
                    x = right.saturating_sub(clamped).max(0);
                    w = clamped;
                }
                block.x = x;
                block.w = w;
            }
            ResizeEdge::Right => {
                block.w = block.w.saturating_add(delta).max(min_w).min(max_w);
            }
        }
        true
    }

    /// Screen rectangle of a block relative to the container's top-left.
    #[must_use]
    pub fn screen_rect<D>(&self, block: &GridBlock<D>) -> Rect {
        let cell = self.effective_cell_size();
        Rect::new(
            f64::from(block.x) * cell,
            f64::from(block.y) * cell,
            f64::from(block.w) * cell,
            f64::from(block.h) * cell,
        )
    }

    /// Bottom-right extent of all blocks in cells: `(max x + w, max y + h)`.
    #[must_use]
    pub fn content_extent(&self) -> (i32, i32) {
        self.blocks.iter().fold((0, 0), |(w, h), b| (w.max(b.x.saturating_add(b.w)), h.max(b.y.saturating_add(b.h))))
    }

    /// Pairs of block ids whose rectangles currently overlap.
    #[must_use]
    pub fn overlapping_pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs = Vec::new();
        for (i, a) in self.blocks.iter().enumerate() {
            for b in &self.blocks[i + 1..] {
                if a.overlaps(b) {
                    pairs.push((a.id.as_str(), b.id.as_str()));
                }
            }
        }
        pairs
    }
}
