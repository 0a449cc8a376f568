//! Engine — the polygon animation calculator.
//!
//! Turns a `SceneSource` (intent) into per-ring animation state and, tick
//! by tick, into `FrameSnapshot`s and concrete draw instructions.
//!
//! The engine understands rotation, geometry, and layering. It never deals
//! with terminals, ANSI codes, or wall-clock time.

pub mod error;
pub mod geometry;
pub mod group;
pub mod palette;
pub mod resolve;
pub mod ring;
pub mod sketch;
pub mod source;

use crate::types::ResolvedScene;
use error::ConfigurationError;
use group::{GroupAnimationState, SceneAnimationState};
use ring::RingAnimationState;
use sketch::Sketch;
use source::{PolygonGroup, PolygonRing, SceneSource};

pub struct Engine;

impl Engine {
    /// Sample `frame_count` consecutive ticks of a scene, one resolved scene
    /// per tick.
    pub fn compile(source: &SceneSource) -> Result<Vec<ResolvedScene>, ConfigurationError> {
        let mut sketch = Sketch::for_scene(source)?;
        Ok(sketch.record(source.frame_count))
    }
}

pub fn construct_ring_state(ring: &PolygonRing) -> Result<RingAnimationState, ConfigurationError> {
    RingAnimationState::new(ring)
}

pub fn construct_group_state(group: &PolygonGroup) -> Result<GroupAnimationState, ConfigurationError> {
    GroupAnimationState::new(group)
}

pub fn construct_scene_state(groups: &[PolygonGroup]) -> Result<SceneAnimationState, ConfigurationError> {
    SceneAnimationState::new(groups)
}
