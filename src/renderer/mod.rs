//! Renderer — the deterministic rasterizer.
//!
//! Takes `ResolvedScene`s (in-memory, from the engine) and produces a
//! `PlayablePresentation` (serializable, for the player).
//!
//! The renderer knows nothing about rotation or polygons. Given the same
//! scenes and options it always produces the same output.

use crate::types::{
    Cell, CellChange, Colour, Frame, PlayablePresentation, ResolvedScene, TerminalContract,
};

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub background: Option<Colour>,
    /// When false, each frame paints over the previous one instead of a
    /// freshly cleared grid.
    pub redraw_background: bool,
    pub frame_rate: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            background: None,
            redraw_background: true,
            frame_rate: 30,
        }
    }
}

pub struct Renderer;

impl Renderer {
    /// Render a sequence of resolved scenes into a playable presentation.
    ///
    /// The first frame is always a full frame. Subsequent frames are diffs
    /// against the previous frame.
    pub fn render(
        scenes: &[ResolvedScene],
        contract: TerminalContract,
        options: &RenderOptions,
    ) -> PlayablePresentation {
        let mut frames = Vec::with_capacity(scenes.len());
        let mut prev_grid: Option<Vec<Vec<Cell>>> = None;

        for scene in scenes {
            let grid = Self::next_grid(prev_grid.as_deref(), scene, &contract, options);
            let frame = match &prev_grid {
                None => Frame::Full {
                    cells: grid.clone(),
                },
                Some(prev) => Frame::Diff {
                    changes: Self::diff(prev, &grid),
                },
            };
            frames.push(frame);
            prev_grid = Some(grid);
        }

        PlayablePresentation {
            contract,
            frame_rate: options.frame_rate,
            frames,
        }
    }

    /// Grid for the next frame: a blank canvas, or the previous grid when
    /// the background is not redrawn.
    pub fn next_grid(
        prev: Option<&[Vec<Cell>]>,
        scene: &ResolvedScene,
        contract: &TerminalContract,
        options: &RenderOptions,
    ) -> Vec<Vec<Cell>> {
        let mut grid = match prev {
            Some(prev) if !options.redraw_background => prev.to_vec(),
            _ => Self::blank(contract, options.background.as_ref()),
        };
        Self::rasterize(scene, &mut grid, options.background.as_ref());
        grid
    }

    pub fn blank(contract: &TerminalContract, background: Option<&Colour>) -> Vec<Vec<Cell>> {
        let w = contract.width as usize;
        let h = contract.height as usize;
        vec![vec![Cell::blank(background); w]; h]
    }

    /// Rasterize a resolved scene onto a cell grid.
    ///
    /// Draw operations are sorted by z-order so that higher z values
    /// paint over lower ones; equal z values keep their emission order.
    fn rasterize(scene: &ResolvedScene, grid: &mut [Vec<Cell>], background: Option<&Colour>) {
        let h = grid.len();
        let w = grid.first().map_or(0, Vec::len);

        let mut ops: Vec<_> = scene.ops.iter().collect();
        ops.sort_by_key(|op| op.z_order);

        for op in ops {
            let x = op.x as usize;
            let y = op.y as usize;
            if x < w && y < h {
                let mut style = op.style.clone();
                if style.bg.is_none() {
                    style.bg = background.cloned();
                }
                grid[y][x] = Cell { ch: op.ch, style };
            }
        }
    }

    /// Compute a cell-level diff between two grids.
    pub fn diff(prev: &[Vec<Cell>], next: &[Vec<Cell>]) -> Vec<CellChange> {
        let mut changes = Vec::new();
        for (y, (prev_row, next_row)) in prev.iter().zip(next.iter()).enumerate() {
            for (x, (prev_cell, next_cell)) in prev_row.iter().zip(next_row.iter()).enumerate() {
                if prev_cell != next_cell {
                    changes.push(CellChange {
                        x: x as u16,
                        y: y as u16,
                        cell: next_cell.clone(),
                    });
                }
            }
        }
        changes
    }
}
