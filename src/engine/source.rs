//! Source scene types — the human-authored declarative format.
//!
//! These types describe *what rings exist* and *how they turn*, not how
//! they are drawn. They are read-only inputs: the engine copies what it needs
//! into per-session animation state and never mutates them.

use serde::{Deserialize, Serialize};

use crate::types::{CanvasSize, Colour, NamedColour};

use super::error::ConfigurationError;

fn default_true() -> bool {
    true
}

fn default_width() -> f64 {
    1.0
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

fn default_frame_count() -> usize {
    180
}

fn default_frame_rate() -> u32 {
    30
}

fn default_scale() -> f64 {
    1.0
}

fn default_cell_aspect() -> f64 {
    2.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSource {
    pub width: u16,
    pub height: u16,
    /// Number of ticks sampled by `compile`.
    #[serde(default = "default_frame_count")]
    pub frame_count: usize,
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    /// Multiplier applied to every ring's local geometry.
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Horizontal stretch compensating for tall terminal cells.
    #[serde(default = "default_cell_aspect")]
    pub cell_aspect: f64,
    /// When false, frames paint over the previous frame and leave trails.
    #[serde(default = "default_true")]
    pub redraw_background: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Colour>,
    pub groups: Vec<PolygonGroup>,
}

impl SceneSource {
    pub fn canvas(&self) -> CanvasSize {
        CanvasSize {
            width: self.width as f64,
            height: self.height as f64,
        }
    }

    pub fn ring_count(&self) -> usize {
        self.groups.iter().map(|g| g.rings.len()).sum()
    }

    /// Check every group and ring without building animation state.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.width == 0 || self.height == 0 || !positive(self.scale) || !positive(self.cell_aspect) {
            return Err(ConfigurationError::InvalidSurface);
        }
        for (index, group) in self.groups.iter().enumerate() {
            group.validate().map_err(|e| ConfigurationError::InvalidGroup {
                index,
                source: Box::new(e),
            })?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Groups and rings
// ---------------------------------------------------------------------------

/// Normalized position: -100..100 on both axes, 0 is the centre, +y is up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    fn validate(&self) -> Result<(), ConfigurationError> {
        let in_range = |v: f64| (-100.0..=100.0).contains(&v);
        if in_range(self.x) && in_range(self.y) {
            Ok(())
        } else {
            Err(ConfigurationError::PositionOutOfRange {
                x: self.x,
                y: self.y,
            })
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolygonGroup {
    #[serde(default)]
    pub position: Position,
    /// Draw order: later rings paint over earlier ones.
    #[serde(default)]
    pub rings: Vec<PolygonRing>,
}

impl PolygonGroup {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.position.validate()?;
        for (index, ring) in self.rings.iter().enumerate() {
            ring.validate().map_err(|e| ConfigurationError::InvalidRing {
                index,
                source: Box::new(e),
            })?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// Sign applied to the configured speed on each tick.
    pub fn sign(self) -> f64 {
        match self {
            Direction::Clockwise => 1.0,
            Direction::CounterClockwise => -1.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    #[serde(default)]
    pub starting_rotation: f64,
    /// Degrees per tick.
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sides {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub stroke_colours: Vec<Colour>,
    #[serde(default = "default_width")]
    pub stroke_width: f64,
}

impl Default for Sides {
    fn default() -> Self {
        Sides {
            enabled: true,
            stroke_colours: vec![Colour::Named(NamedColour::White)],
            stroke_width: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dots {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub count: u32,
    #[serde(default = "default_width")]
    pub size: f64,
    #[serde(default)]
    pub fill_colours: Vec<Colour>,
    #[serde(default)]
    pub stroke_colours: Vec<Colour>,
    #[serde(default = "default_width")]
    pub stroke_width: f64,
}

impl Default for Dots {
    fn default() -> Self {
        Dots {
            enabled: false,
            count: 0,
            size: 1.0,
            fill_colours: Vec::new(),
            stroke_colours: Vec::new(),
            stroke_width: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonRing {
    pub side_count: u32,
    pub radius: f64,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub rotation: Rotation,
    #[serde(default)]
    pub sides: Sides,
    #[serde(default)]
    pub dots: Dots,
}

impl PolygonRing {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.side_count < 3 {
            return Err(ConfigurationError::TooFewSides(self.side_count));
        }
        if !positive(self.radius) {
            return Err(ConfigurationError::InvalidRadius(self.radius));
        }
        if !self.rotation.speed.is_finite() {
            return Err(ConfigurationError::InvalidSpeed(self.rotation.speed));
        }
        if !self.rotation.starting_rotation.is_finite() {
            return Err(ConfigurationError::InvalidStartingRotation(
                self.rotation.starting_rotation,
            ));
        }
        self.position.validate()?;

        if self.sides.enabled {
            non_empty("sides", "stroke", &self.sides.stroke_colours)?;
            positive_size("sides", "stroke width", self.sides.stroke_width)?;
        }
        if self.dots.enabled {
            non_empty("dots", "fill", &self.dots.fill_colours)?;
            non_empty("dots", "stroke", &self.dots.stroke_colours)?;
            positive_size("dots", "size", self.dots.size)?;
            positive_size("dots", "stroke width", self.dots.stroke_width)?;
        }
        Ok(())
    }
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn positive_size(feature: &'static str, property: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if positive(value) {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidSize {
            feature,
            property,
            value,
        })
    }
}

fn non_empty(feature: &'static str, palette: &'static str, colours: &[Colour]) -> Result<(), ConfigurationError> {
    if colours.is_empty() {
        Err(ConfigurationError::EmptyPalette { feature, palette })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> PolygonRing {
        PolygonRing {
            side_count: 4,
            radius: 50.0,
            position: Position::default(),
            rotation: Rotation::default(),
            sides: Sides::default(),
            dots: Dots::default(),
        }
    }

    #[test]
    fn test_valid_ring_passes() {
        assert_eq!(square().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_two_sides() {
        let ring = PolygonRing {
            side_count: 2,
            ..square()
        };
        assert_eq!(ring.validate(), Err(ConfigurationError::TooFewSides(2)));
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        for radius in [0.0, -3.0, f64::NAN] {
            let ring = PolygonRing { radius, ..square() };
            assert!(matches!(ring.validate(), Err(ConfigurationError::InvalidRadius(_))));
        }
    }

    #[test]
    fn test_rotation_errors_name_the_bad_field() {
        let mut ring = square();
        ring.rotation.speed = 2.0;
        ring.rotation.starting_rotation = f64::NAN;
        let err = ring.validate().unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidStartingRotation(v) if v.is_nan()));
        assert_eq!(err.to_string(), "starting rotation must be finite, got NaN");

        ring.rotation.starting_rotation = 0.0;
        ring.rotation.speed = f64::INFINITY;
        assert_eq!(
            ring.validate(),
            Err(ConfigurationError::InvalidSpeed(f64::INFINITY))
        );
    }

    #[test]
    fn test_empty_palette_only_matters_when_enabled() {
        let mut ring = square();
        ring.sides.stroke_colours.clear();
        assert!(matches!(
            ring.validate(),
            Err(ConfigurationError::EmptyPalette { feature: "sides", .. })
        ));
        ring.sides.enabled = false;
        assert_eq!(ring.validate(), Ok(()));
    }

    #[test]
    fn test_enabled_dots_need_fill_colours() {
        let mut ring = square();
        ring.dots = Dots {
            enabled: true,
            count: 4,
            stroke_colours: vec![Colour::Named(NamedColour::Red)],
            ..Dots::default()
        };
        assert_eq!(
            ring.validate(),
            Err(ConfigurationError::EmptyPalette {
                feature: "dots",
                palette: "fill"
            })
        );
    }

    #[test]
    fn test_position_range() {
        let mut ring = square();
        ring.position = Position { x: 100.0, y: -100.0 };
        assert_eq!(ring.validate(), Ok(()));
        ring.position.x = 100.5;
        assert!(matches!(
            ring.validate(),
            Err(ConfigurationError::PositionOutOfRange { .. })
        ));
    }

    #[test]
    fn test_group_reports_ring_index() {
        let group = PolygonGroup {
            position: Position::default(),
            rings: vec![square(), PolygonRing { side_count: 1, ..square() }],
        };
        let err = group.validate().unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::InvalidRing {
                index: 1,
                source: Box::new(ConfigurationError::TooFewSides(1)),
            }
        );
        assert_eq!(err.to_string(), "ring 1: a ring needs at least 3 sides, got 1");
    }

    #[test]
    fn test_scene_defaults_from_json() {
        let json = r#"{
            "width": 80,
            "height": 40,
            "groups": [
                { "rings": [ { "side_count": 3, "radius": 10,
                               "sides": { "stroke_colours": ["red", {"r": 1, "g": 2, "b": 3}] } } ] }
            ]
        }"#;
        let scene: SceneSource = serde_json::from_str(json).unwrap();
        assert_eq!(scene.frame_count, 180);
        assert_eq!(scene.frame_rate, 30);
        assert!(scene.redraw_background);
        assert_eq!(scene.ring_count(), 1);
        let ring = &scene.groups[0].rings[0];
        assert!(ring.sides.enabled);
        assert_eq!(ring.sides.stroke_colours.len(), 2);
        assert_eq!(ring.rotation.direction, Direction::Clockwise);
        assert!(!ring.dots.enabled);
        assert_eq!(scene.validate(), Ok(()));
    }
}
