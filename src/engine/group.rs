//! Group and scene composition.
//!
//! A group steps its rings in lock-step, in configuration order. A scene
//! does the same one level up. One query advances every contained ring by
//! exactly one tick.

use crate::types::{GroupFrame, Point};

use super::error::ConfigurationError;
use super::ring::RingAnimationState;
use super::source::{PolygonGroup, Position};

#[derive(Debug)]
pub struct GroupAnimationState {
    position: Position,
    rings: Vec<RingAnimationState>,
}

impl GroupAnimationState {
    pub fn new(group: &PolygonGroup) -> Result<Self, ConfigurationError> {
        group.validate()?;
        let rings = group
            .rings
            .iter()
            .map(RingAnimationState::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(GroupAnimationState {
            position: group.position,
            rings,
        })
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn rings(&self) -> &[RingAnimationState] {
        &self.rings
    }

    pub fn peek(&self) -> GroupFrame {
        GroupFrame {
            position: self.origin(),
            rings: self.rings.iter().map(RingAnimationState::peek).collect(),
        }
    }

    pub fn advance(&mut self) {
        self.rings.iter_mut().for_each(RingAnimationState::advance);
    }

    pub fn frame_and_step(&mut self) -> GroupFrame {
        GroupFrame {
            position: self.origin(),
            rings: self
                .rings
                .iter_mut()
                .map(RingAnimationState::frame_and_step)
                .collect(),
        }
    }

    fn origin(&self) -> Point {
        Point::new(self.position.x, self.position.y)
    }
}

#[derive(Debug)]
pub struct SceneAnimationState {
    groups: Vec<GroupAnimationState>,
}

impl SceneAnimationState {
    pub fn new(groups: &[PolygonGroup]) -> Result<Self, ConfigurationError> {
        let groups = groups
            .iter()
            .enumerate()
            .map(|(index, group)| {
                GroupAnimationState::new(group).map_err(|e| ConfigurationError::InvalidGroup {
                    index,
                    source: Box::new(e),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "scene state built: {} groups, {} rings",
            groups.len(),
            groups.iter().map(|g| g.rings.len()).sum::<usize>()
        );
        Ok(SceneAnimationState { groups })
    }

    pub fn groups(&self) -> &[GroupAnimationState] {
        &self.groups
    }

    pub fn peek(&self) -> Vec<GroupFrame> {
        self.groups.iter().map(GroupAnimationState::peek).collect()
    }

    pub fn advance(&mut self) {
        self.groups.iter_mut().for_each(GroupAnimationState::advance);
    }

    pub fn frame_and_step(&mut self) -> Vec<GroupFrame> {
        self.groups
            .iter_mut()
            .map(GroupAnimationState::frame_and_step)
            .collect()
    }
}
