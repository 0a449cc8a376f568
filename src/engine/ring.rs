//! Per-ring animation state.
//!
//! A `RingAnimationState` owns one ring's current rotation and tick count.
//! It has a single "animating" state; every tick adds the signed speed to
//! the rotation. Snapshots are computed from the angle that is current at
//! query time, so `frame_and_step` reads first and steps second.

use crate::types::{DotsSnapshot, FrameSnapshot, Point, SidesSnapshot};

use super::error::ConfigurationError;
use super::geometry::{dot_positions, edge_segments, regular_polygon_vertices};
use super::source::PolygonRing;

#[derive(Debug)]
pub struct RingAnimationState {
    ring: PolygonRing,
    current_rotation: f64,
    ticks: u64,
}

impl RingAnimationState {
    /// Validate `ring` and start animating it from its starting rotation,
    /// wrapped into `[0, 360)`.
    pub fn new(ring: &PolygonRing) -> Result<Self, ConfigurationError> {
        ring.validate()?;
        Ok(RingAnimationState {
            ring: ring.clone(),
            current_rotation: ring.rotation.starting_rotation.rem_euclid(360.0),
            ticks: 0,
        })
    }

    pub fn ring(&self) -> &PolygonRing {
        &self.ring
    }

    pub fn current_rotation(&self) -> f64 {
        self.current_rotation
    }

    /// Number of ticks advanced since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Snapshot at the current rotation, without advancing.
    pub fn peek(&self) -> FrameSnapshot {
        let ring = &self.ring;
        let rotation = self.current_rotation;
        let vertices = regular_polygon_vertices(ring.side_count, ring.radius, rotation);

        FrameSnapshot {
            current_rotation: rotation,
            position: Point::new(ring.position.x, ring.position.y),
            sides: SidesSnapshot {
                enabled: ring.sides.enabled,
                positions: edge_segments(&vertices),
                stroke_colours: ring.sides.stroke_colours.clone(),
                stroke_width: ring.sides.stroke_width,
            },
            dots: DotsSnapshot {
                enabled: ring.dots.enabled,
                position: dot_positions(&vertices, ring.dots.count, ring.radius, rotation),
                fill_colours: ring.dots.fill_colours.clone(),
                stroke_colours: ring.dots.stroke_colours.clone(),
                stroke_width: ring.dots.stroke_width,
                size: ring.dots.size,
            },
        }
    }

    /// Advance by one tick. The angle is kept in `[0, 360)`.
    pub fn advance(&mut self) {
        let rotation = &self.ring.rotation;
        self.current_rotation =
            (self.current_rotation + rotation.direction.sign() * rotation.speed).rem_euclid(360.0);
        self.ticks += 1;
    }

    /// Snapshot at the current rotation, then advance one tick.
    ///
    /// Call exactly once per animation tick; extra calls fast-forward.
    pub fn frame_and_step(&mut self) -> FrameSnapshot {
        let snapshot = self.peek();
        self.advance();
        log::trace!(
            "ring {}-gon tick {} at {:.3}°",
            self.ring.side_count,
            self.ticks,
            snapshot.current_rotation
        );
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::palette::cycle;
    use crate::engine::source::{Direction, Dots, Position, Rotation, Sides};
    use crate::types::{Colour, NamedColour};

    fn ring(speed: f64, direction: Direction) -> PolygonRing {
        PolygonRing {
            side_count: 4,
            radius: 50.0,
            position: Position { x: 10.0, y: -20.0 },
            rotation: Rotation {
                starting_rotation: 0.0,
                speed,
                direction,
            },
            sides: Sides::default(),
            dots: Dots::default(),
        }
    }

    #[test]
    fn test_read_then_step_sequence() {
        let mut state = RingAnimationState::new(&ring(2.0, Direction::Clockwise)).unwrap();
        let seen: Vec<f64> = (0..5).map(|_| state.frame_and_step().current_rotation).collect();
        assert_eq!(seen, vec![0.0, 2.0, 4.0, 6.0, 8.0]);
        assert_eq!(state.current_rotation(), 10.0);
        assert_eq!(state.ticks(), 5);
    }

    #[test]
    fn test_clockwise_increases_by_speed_modulo_360() {
        let mut r = ring(7.5, Direction::Clockwise);
        r.rotation.starting_rotation = 300.0;
        let mut state = RingAnimationState::new(&r).unwrap();
        let mut prev = state.frame_and_step().current_rotation;
        for _ in 0..200 {
            let next = state.frame_and_step().current_rotation;
            let delta = (next - prev).rem_euclid(360.0);
            assert!((delta - 7.5).abs() < 1e-9);
            assert!((0.0..360.0).contains(&next));
            prev = next;
        }
    }

    #[test]
    fn test_starting_rotation_is_wrapped() {
        let mut r = ring(5.0, Direction::Clockwise);
        r.rotation.starting_rotation = 400.0;
        let mut state = RingAnimationState::new(&r).unwrap();
        assert_eq!(state.current_rotation(), 40.0);
        assert_eq!(state.frame_and_step().current_rotation, 40.0);

        r.rotation.starting_rotation = -30.0;
        let state = RingAnimationState::new(&r).unwrap();
        assert_eq!(state.peek().current_rotation, 330.0);
    }

    #[test]
    fn test_counter_clockwise_decreases() {
        let mut state = RingAnimationState::new(&ring(5.0, Direction::CounterClockwise)).unwrap();
        assert_eq!(state.frame_and_step().current_rotation, 0.0);
        assert_eq!(state.frame_and_step().current_rotation, 355.0);
        assert_eq!(state.frame_and_step().current_rotation, 350.0);
    }

    #[test]
    fn test_zero_speed_is_static() {
        let mut state = RingAnimationState::new(&ring(0.0, Direction::Clockwise)).unwrap();
        let first = state.frame_and_step();
        for _ in 0..20 {
            assert_eq!(state.frame_and_step(), first);
        }
    }

    #[test]
    fn test_peek_does_not_advance() {
        let mut state = RingAnimationState::new(&ring(3.0, Direction::Clockwise)).unwrap();
        assert_eq!(state.peek(), state.peek());
        state.advance();
        assert_eq!(state.peek().current_rotation, 3.0);
        assert_eq!(state.ticks(), 1);
    }

    #[test]
    fn test_snapshot_geometry_and_position() {
        let mut state = RingAnimationState::new(&ring(90.0, Direction::Clockwise)).unwrap();
        let snap = state.frame_and_step();
        assert_eq!(snap.position, Point::new(10.0, -20.0));
        assert_eq!(snap.sides.positions.len(), 4);
        assert!((snap.sides.positions[0].start.x - 50.0).abs() < 1e-9);

        let snap = state.frame_and_step();
        assert_eq!(snap.position, Point::new(10.0, -20.0));
        assert!(snap.sides.positions[0].start.x.abs() < 1e-9);
        assert!((snap.sides.positions[0].start.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_side_colours_cycle_through_palette() {
        let palette = vec![
            Colour::Named(NamedColour::Red),
            Colour::Named(NamedColour::Green),
            Colour::Named(NamedColour::Blue),
        ];
        let mut r = ring(1.0, Direction::Clockwise);
        r.side_count = 8;
        r.sides.stroke_colours = palette.clone();
        let snap = RingAnimationState::new(&r).unwrap().peek();
        for i in 0..snap.sides.positions.len() {
            assert_eq!(cycle(&snap.sides.stroke_colours, i), Some(&palette[i % 3]));
        }
    }

    #[test]
    fn test_dots_follow_vertices() {
        let mut r = ring(0.0, Direction::Clockwise);
        r.dots = Dots {
            enabled: true,
            count: 4,
            size: 3.0,
            fill_colours: vec![Colour::Named(NamedColour::Yellow)],
            stroke_colours: vec![Colour::Named(NamedColour::Black)],
            stroke_width: 1.0,
        };
        let snap = RingAnimationState::new(&r).unwrap().peek();
        assert!(snap.dots.enabled);
        assert_eq!(snap.dots.position.len(), 4);
        for (dot, edge) in snap.dots.position.iter().zip(&snap.sides.positions) {
            assert_eq!(*dot, edge.start);
        }
    }

    #[test]
    fn test_invalid_ring_builds_no_state() {
        let mut r = ring(1.0, Direction::Clockwise);
        r.side_count = 2;
        assert_eq!(
            RingAnimationState::new(&r).unwrap_err(),
            ConfigurationError::TooFewSides(2)
        );

        let mut r = ring(1.0, Direction::Clockwise);
        r.dots.enabled = true;
        r.dots.count = 4;
        r.dots.stroke_colours = vec![Colour::Named(NamedColour::Red)];
        assert!(matches!(
            RingAnimationState::new(&r),
            Err(ConfigurationError::EmptyPalette { feature: "dots", palette: "fill" })
        ));
    }
}
