//! Replay of a compiled `PlayablePresentation`.
//!
//! Frames are applied in order; after the last frame playback loops back to
//! the first, which is always a full frame.

use anyhow::{Result, bail};

use crate::types::{Cell, Frame, PlayablePresentation, TerminalContract};

use super::{Playback, Update};

pub struct CompiledPlayback {
    presentation: PlayablePresentation,
    current_frame: usize,
    grid: Vec<Vec<Cell>>,
}

impl CompiledPlayback {
    pub fn new(presentation: PlayablePresentation) -> Result<Self> {
        if presentation.frames.is_empty() {
            bail!("Presentation has no frames");
        }
        let w = presentation.contract.width as usize;
        let h = presentation.contract.height as usize;
        let mut playback = Self {
            presentation,
            current_frame: 0,
            grid: vec![vec![Cell::default(); w]; h],
        };
        playback.apply_frame(0);
        Ok(playback)
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    fn apply_frame(&mut self, index: usize) {
        match &self.presentation.frames[index] {
            Frame::Full { cells } => {
                self.grid = cells.clone();
            }
            Frame::Diff { changes } => {
                for change in changes {
                    let x = change.x as usize;
                    let y = change.y as usize;
                    if y < self.grid.len() && x < self.grid[y].len() {
                        self.grid[y][x] = change.cell.clone();
                    }
                }
            }
        }
    }
}

impl Playback for CompiledPlayback {
    fn contract(&self) -> &TerminalContract {
        &self.presentation.contract
    }

    fn frame_rate(&self) -> u32 {
        self.presentation.frame_rate
    }

    fn grid(&self) -> &[Vec<Cell>] {
        &self.grid
    }

    fn step(&mut self) -> Result<Update> {
        let last = self.presentation.frames.len() - 1;
        if self.current_frame >= last {
            self.restart()?;
            return Ok(Update::Full);
        }
        self.current_frame += 1;
        self.apply_frame(self.current_frame);
        Ok(match &self.presentation.frames[self.current_frame] {
            Frame::Diff { changes } => Update::Changes(changes.clone()),
            Frame::Full { .. } => Update::Full,
        })
    }

    fn restart(&mut self) -> Result<()> {
        self.current_frame = 0;
        self.apply_frame(0);
        Ok(())
    }

    fn position(&self) -> String {
        format!(
            "Frame {}/{}",
            self.current_frame + 1,
            self.presentation.frames.len()
        )
    }
}
