//! Live preview: a sketch drawn tick by tick from the player's frame clock.
//!
//! Every `step` draws the sketch exactly once. While paused no steps happen,
//! so the animation freezes instead of skipping ahead.

use anyhow::Result;

use crate::engine::sketch::Sketch;
use crate::engine::source::SceneSource;
use crate::renderer::{RenderOptions, Renderer};
use crate::types::{Cell, TerminalContract};

use super::{Playback, Update};

pub struct LivePlayback {
    source: SceneSource,
    sketch: Sketch,
    contract: TerminalContract,
    options: RenderOptions,
    grid: Vec<Vec<Cell>>,
    ticks: u64,
}

impl LivePlayback {
    pub fn new(source: SceneSource) -> Result<Self> {
        let sketch = Sketch::for_scene(&source)?;
        let contract = sketch.setup();
        let options = RenderOptions {
            background: source.background.clone(),
            redraw_background: source.redraw_background,
            frame_rate: source.frame_rate,
        };
        let mut playback = Self {
            grid: Renderer::blank(&contract, options.background.as_ref()),
            source,
            sketch,
            contract,
            options,
            ticks: 0,
        };
        playback.draw();
        Ok(playback)
    }

    fn draw(&mut self) -> Vec<Vec<Cell>> {
        let scene = self.sketch.draw();
        self.ticks += 1;
        let next = Renderer::next_grid(Some(self.grid.as_slice()), &scene, &self.contract, &self.options);
        std::mem::replace(&mut self.grid, next)
    }
}

impl Playback for LivePlayback {
    fn contract(&self) -> &TerminalContract {
        &self.contract
    }

    fn frame_rate(&self) -> u32 {
        self.options.frame_rate
    }

    fn grid(&self) -> &[Vec<Cell>] {
        &self.grid
    }

    fn step(&mut self) -> Result<Update> {
        let prev = self.draw();
        Ok(Update::Changes(Renderer::diff(&prev, &self.grid)))
    }

    /// Start a fresh session from the scene's starting rotations.
    fn restart(&mut self) -> Result<()> {
        self.sketch = Sketch::for_scene(&self.source)?;
        self.grid = Renderer::blank(&self.contract, self.options.background.as_ref());
        self.ticks = 0;
        self.draw();
        Ok(())
    }

    fn position(&self) -> String {
        format!("Tick {}", self.ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(redraw_background: bool) -> SceneSource {
        serde_json::from_value(serde_json::json!({
            "width": 40,
            "height": 20,
            "redraw_background": redraw_background,
            "groups": [
                { "rings": [ { "side_count": 4, "radius": 6,
                               "rotation": { "speed": 15 } } ] }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_step_reports_changed_cells() -> Result<()> {
        let mut live = LivePlayback::new(source(true))?;
        assert_eq!(live.position(), "Tick 1");
        let Update::Changes(changes) = live.step()? else {
            panic!("live steps always diff");
        };
        assert!(!changes.is_empty());
        assert_eq!(live.position(), "Tick 2");
        live.restart()?;
        assert_eq!(live.position(), "Tick 1");
        Ok(())
    }

    #[test]
    fn test_trails_only_add_cells() -> Result<()> {
        let mut live = LivePlayback::new(source(false))?;
        let painted = |grid: &[Vec<Cell>]| grid.iter().flatten().filter(|c| c.ch != ' ').count();
        let before = painted(live.grid());
        live.step()?;
        live.step()?;
        assert!(painted(live.grid()) >= before);
        Ok(())
    }
}
