//! Sketch — one render session over a set of polygon groups.
//!
//! A sketch is set up once and then drawn once per tick. Each `draw` queries
//! the scene exactly once, so every ring advances by exactly one tick per
//! rendered frame. Sketches own their animation state; two sketches built
//! from the same configuration animate independently.

use crate::types::{CanvasSize, ResolvedScene, TerminalContract};

use super::error::ConfigurationError;
use super::group::SceneAnimationState;
use super::resolve::{Resolve, Surface};
use super::source::{PolygonGroup, PolygonRing, SceneSource};

#[derive(Debug)]
pub struct Sketch {
    scene: SceneAnimationState,
    surface: Surface,
    contract: TerminalContract,
}

impl Sketch {
    /// Sketch of a full scene, using the scene's own surface settings.
    pub fn for_scene(source: &SceneSource) -> Result<Self, ConfigurationError> {
        source.validate()?;
        let surface = Surface {
            canvas: source.canvas(),
            scale: source.scale,
            cell_aspect: source.cell_aspect,
        };
        Self::build(&source.groups, surface)
    }

    /// Sketch of a single group, e.g. a thumbnail preview.
    pub fn for_group(group: &PolygonGroup, surface: Surface) -> Result<Self, ConfigurationError> {
        Self::build(std::slice::from_ref(group), surface)
    }

    /// Sketch of a single ring centred on its own canvas.
    pub fn for_ring(ring: &PolygonRing, surface: Surface) -> Result<Self, ConfigurationError> {
        let group = PolygonGroup {
            rings: vec![ring.clone()],
            ..Default::default()
        };
        Self::build(std::slice::from_ref(&group), surface)
    }

    fn build(groups: &[PolygonGroup], surface: Surface) -> Result<Self, ConfigurationError> {
        let CanvasSize { width, height } = surface.canvas;
        if !(width >= 1.0 && height >= 1.0 && surface.scale > 0.0 && surface.cell_aspect > 0.0)
            || width > u16::MAX as f64
            || height > u16::MAX as f64
        {
            return Err(ConfigurationError::InvalidSurface);
        }
        Ok(Sketch {
            scene: SceneAnimationState::new(groups)?,
            surface,
            contract: TerminalContract {
                width: width as u16,
                height: height as u16,
            },
        })
    }

    /// Surface size the front-end must provide. Call once before drawing.
    pub fn setup(&self) -> TerminalContract {
        self.contract.clone()
    }

    pub fn scene(&self) -> &SceneAnimationState {
        &self.scene
    }

    /// Resolve the current tick and advance every ring by one tick.
    pub fn draw(&mut self) -> ResolvedScene {
        let frame = self.scene.frame_and_step();
        let mut ops = Vec::new();
        frame.resolve(&self.surface, 0, &mut ops);
        ResolvedScene {
            width: self.contract.width,
            height: self.contract.height,
            ops,
        }
    }

    /// Draw `count` consecutive ticks as fast as possible.
    pub fn record(&mut self, count: usize) -> Vec<ResolvedScene> {
        (0..count).map(|_| self.draw()).collect()
    }
}
