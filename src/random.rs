//! Randomized scenes.
//!
//! Produces valid `PolygonGroup`s with nested rings, varied side counts,
//! speeds, directions and palettes. Seeded generation is reproducible.

use fastrand::Rng;

use crate::engine::source::{
    Direction, Dots, PolygonGroup, PolygonRing, Position, Rotation, SceneSource, Sides,
};
use crate::types::{Colour, NamedColour};

const SCENE_WIDTH: u16 = 80;
const SCENE_HEIGHT: u16 = 40;

/// Colours that show up on a default dark terminal.
fn visible_colours() -> Vec<Colour> {
    NamedColour::ALL
        .into_iter()
        .filter(|c| *c != NamedColour::Black)
        .map(Colour::Named)
        .collect()
}

fn palette(rng: &mut Rng, max_len: usize) -> Vec<Colour> {
    let mut colours = visible_colours();
    rng.shuffle(&mut colours);
    colours.truncate(rng.usize(1..=max_len));
    colours
}

fn range_f64(rng: &mut Rng, min: f64, max: f64) -> f64 {
    min + rng.f64() * (max - min)
}

pub fn random_ring(rng: &mut Rng, radius: f64) -> PolygonRing {
    let side_count = rng.u32(3..=9);
    let dots_enabled = rng.bool();
    PolygonRing {
        side_count,
        radius,
        position: Position::default(),
        rotation: Rotation {
            starting_rotation: range_f64(rng, 0.0, 360.0).floor(),
            speed: (range_f64(rng, 0.5, 4.0) * 2.0).round() / 2.0,
            direction: if rng.bool() {
                Direction::Clockwise
            } else {
                Direction::CounterClockwise
            },
        },
        sides: Sides {
            enabled: true,
            stroke_colours: palette(rng, 3),
            stroke_width: 1.0,
        },
        dots: Dots {
            enabled: dots_enabled,
            count: side_count,
            size: 1.0,
            fill_colours: palette(rng, 2),
            stroke_colours: palette(rng, 2),
            stroke_width: 1.0,
        },
    }
}

/// A group of `ring_count` nested rings with growing radii.
pub fn random_group(rng: &mut Rng, ring_count: usize, position: Position) -> PolygonGroup {
    let mut radius = range_f64(rng, 2.0, 4.0).round();
    let rings = (0..ring_count)
        .map(|_| {
            let ring = random_ring(rng, radius);
            radius += range_f64(rng, 2.0, 4.0).round();
            ring
        })
        .collect();
    PolygonGroup { position, rings }
}

/// A small scene: one or two groups placed across the canvas.
pub fn random_scene(seed: u64) -> SceneSource {
    let mut rng = Rng::with_seed(seed);
    let group_count = rng.usize(1..=2);
    let groups = (0..group_count)
        .map(|i| {
            let x = if group_count == 1 { 0.0 } else { -50.0 + 100.0 * i as f64 };
            let ring_count = rng.usize(1..=4);
            random_group(&mut rng, ring_count, Position { x, y: 0.0 })
        })
        .collect();

    SceneSource {
        width: SCENE_WIDTH,
        height: SCENE_HEIGHT,
        frame_count: 180,
        frame_rate: 30,
        scale: 1.0,
        cell_aspect: 2.0,
        redraw_background: true,
        background: None,
        groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_scenes_are_valid() {
        for seed in 0..50 {
            let scene = random_scene(seed);
            assert_eq!(scene.validate(), Ok(()), "seed {seed}");
            assert!((1..=2).contains(&scene.groups.len()));
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        let a = serde_json::to_string(&random_scene(7)).unwrap();
        let b = serde_json::to_string(&random_scene(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_group_radii_grow() {
        let mut rng = Rng::with_seed(3);
        let group = random_group(&mut rng, 4, Position::default());
        for pair in group.rings.windows(2) {
            assert!(pair[1].radius > pair[0].radius);
        }
    }
}
