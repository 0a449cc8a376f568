//! Geometry primitives for regular polygons.
//!
//! All functions are pure. Angles are in degrees. Points are in the ring's
//! local frame with +y pointing down the surface, so increasing angles wind
//! clockwise on screen.

use crate::types::{CanvasSize, Point, Segment};

use super::source::Position;

/// Vertices of a regular `side_count`-gon.
///
/// Vertex 0 sits at `rotation_degrees`; vertex `i` at
/// `rotation_degrees + i * 360 / side_count`.
pub fn regular_polygon_vertices(side_count: u32, radius: f64, rotation_degrees: f64) -> Vec<Point> {
    let step = 360.0 / side_count as f64;
    (0..side_count)
        .map(|i| point_on_circle(radius, rotation_degrees + step * i as f64))
        .collect()
}

/// Closed loop of edges: edge `i` joins vertex `i` to vertex `(i + 1) mod n`.
pub fn edge_segments(vertices: &[Point]) -> Vec<Segment> {
    let n = vertices.len();
    (0..n)
        .map(|i| Segment {
            start: vertices[i],
            end: vertices[(i + 1) % n],
        })
        .collect()
}

/// Decoration points for a ring.
///
/// With one dot per vertex the dots sit on the vertices. Any other count is
/// spread evenly over the circumscribed circle, first dot at `rotation_degrees`.
pub fn dot_positions(vertices: &[Point], count: u32, radius: f64, rotation_degrees: f64) -> Vec<Point> {
    if count as usize == vertices.len() {
        return vertices.to_vec();
    }
    if count == 0 {
        return Vec::new();
    }
    let step = 360.0 / count as f64;
    (0..count)
        .map(|i| point_on_circle(radius, rotation_degrees + step * i as f64))
        .collect()
}

/// Map a normalized position (-100..100, +y up) to a pixel offset from the
/// canvas centre (+y down). No clamping.
pub fn normalized_to_pixel(position: Position, canvas: CanvasSize) -> Point {
    Point {
        x: canvas.width * position.x / 200.0,
        y: -(canvas.height * position.y / 200.0),
    }
}

fn point_on_circle(radius: f64, degrees: f64) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Point {
        x: radius * cos,
        y: radius * sin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    #[test]
    fn test_vertex_count_matches_sides() {
        for n in 3..=12 {
            assert_eq!(regular_polygon_vertices(n, 10.0, 17.0).len(), n as usize);
        }
    }

    #[test]
    fn test_square_vertices_wind_clockwise_on_screen() {
        let v = regular_polygon_vertices(4, 50.0, 0.0);
        assert!(close(v[0], Point::new(50.0, 0.0)));
        // +y is down, so the second vertex is below the centre.
        assert!(close(v[1], Point::new(0.0, 50.0)));
        assert!(close(v[2], Point::new(-50.0, 0.0)));
        assert!(close(v[3], Point::new(0.0, -50.0)));
    }

    #[test]
    fn test_vertices_lie_on_circle() {
        for p in regular_polygon_vertices(7, 33.0, 41.0) {
            assert!((p.x.hypot(p.y) - 33.0).abs() < EPS);
        }
    }

    #[test]
    fn test_edges_close_the_loop() {
        for n in 3..=9 {
            let v = regular_polygon_vertices(n, 5.0, 0.0);
            let e = edge_segments(&v);
            assert_eq!(e.len(), n as usize);
            for i in 0..e.len() {
                assert_eq!(e[i].start, v[i]);
                assert_eq!(e[i].end, e[(i + 1) % e.len()].start);
            }
            assert_eq!(e[e.len() - 1].end, v[0]);
        }
    }

    #[test]
    fn test_dots_on_vertices_when_counts_match() {
        let v = regular_polygon_vertices(5, 20.0, 12.0);
        assert_eq!(dot_positions(&v, 5, 20.0, 12.0), v);
    }

    #[test]
    fn test_dots_spread_evenly_otherwise() {
        let v = regular_polygon_vertices(3, 10.0, 0.0);
        let d = dot_positions(&v, 4, 10.0, 0.0);
        assert_eq!(d.len(), 4);
        assert!(close(d[0], Point::new(10.0, 0.0)));
        assert!(close(d[2], Point::new(-10.0, 0.0)));
        assert!(dot_positions(&v, 0, 10.0, 0.0).is_empty());
    }

    #[test]
    fn test_normalized_to_pixel() {
        let canvas = CanvasSize {
            width: 200.0,
            height: 200.0,
        };
        assert_eq!(
            normalized_to_pixel(Position { x: 0.0, y: 0.0 }, canvas),
            Point::new(0.0, 0.0)
        );
        assert_eq!(
            normalized_to_pixel(Position { x: 100.0, y: 100.0 }, canvas),
            Point::new(100.0, -100.0)
        );
        assert_eq!(
            normalized_to_pixel(Position { x: -50.0, y: -100.0 }, CanvasSize { width: 80.0, height: 40.0 }),
            Point::new(-20.0, 20.0)
        );
    }
}
