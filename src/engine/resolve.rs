//! Resolve frame snapshots into concrete `DrawOp`s on a cell surface.
//!
//! The surface origin is the canvas centre. Group and ring positions are
//! normalized offsets; ring-local geometry is scaled by the sketch scale and
//! stretched horizontally by the cell aspect ratio.

use crate::types::{CanvasSize, Colour, DrawOp, FrameSnapshot, GroupFrame, Point, Segment, Style};

use super::geometry::normalized_to_pixel;
use super::palette::cycle;
use super::source::Position;

/// Stroke widths above this are drawn as solid blocks.
const THICK_STROKE: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub canvas: CanvasSize,
    pub scale: f64,
    pub cell_aspect: f64,
}

impl Surface {
    fn to_cell(&self, origin: Point, local: Point) -> Point {
        Point {
            x: self.canvas.width / 2.0 + origin.x + local.x * self.scale * self.cell_aspect,
            y: self.canvas.height / 2.0 + origin.y + local.y * self.scale,
        }
    }

    fn offset(&self, normalized: Point) -> Point {
        normalized_to_pixel(
            Position {
                x: normalized.x,
                y: normalized.y,
            },
            self.canvas,
        )
    }
}

/// Resolve a value into `DrawOp`s, stacking from `z_order` upwards.
///
/// Returns the next free z level so later layers paint on top.
pub trait Resolve {
    fn resolve(&self, surface: &Surface, z_order: i32, ops: &mut Vec<DrawOp>) -> i32;
}

impl Resolve for [GroupFrame] {
    fn resolve(&self, surface: &Surface, mut z_order: i32, ops: &mut Vec<DrawOp>) -> i32 {
        for group in self {
            z_order = group.resolve(surface, z_order, ops);
        }
        z_order
    }
}

impl Resolve for GroupFrame {
    fn resolve(&self, surface: &Surface, mut z_order: i32, ops: &mut Vec<DrawOp>) -> i32 {
        let group_offset = surface.offset(self.position);
        for ring in &self.rings {
            z_order = resolve_ring(ring, group_offset, surface, z_order, ops);
        }
        z_order
    }
}

impl Resolve for FrameSnapshot {
    fn resolve(&self, surface: &Surface, z_order: i32, ops: &mut Vec<DrawOp>) -> i32 {
        resolve_ring(self, Point::default(), surface, z_order, ops)
    }
}

fn resolve_ring(
    ring: &FrameSnapshot,
    group_offset: Point,
    surface: &Surface,
    z_order: i32,
    ops: &mut Vec<DrawOp>,
) -> i32 {
    let ring_offset = surface.offset(ring.position);
    let origin = Point::new(group_offset.x + ring_offset.x, group_offset.y + ring_offset.y);

    if ring.sides.enabled {
        for (i, segment) in ring.sides.positions.iter().enumerate() {
            let Some(colour) = cycle(&ring.sides.stroke_colours, i) else {
                break;
            };
            let start = surface.to_cell(origin, segment.start);
            let end = surface.to_cell(origin, segment.end);
            let ch = stroke_char(Segment { start, end }, ring.sides.stroke_width * surface.scale);
            let Some((start, end)) = clip_segment(start, end, surface.canvas) else {
                continue;
            };
            draw_line(ops, start, end, ch, colour, z_order);
        }
    }

    if ring.dots.enabled {
        let dots = &ring.dots;
        for (i, dot) in dots.position.iter().enumerate() {
            let (Some(fill), Some(stroke)) = (cycle(&dots.fill_colours, i), cycle(&dots.stroke_colours, i))
            else {
                break;
            };
            let disc = Disc {
                centre: surface.to_cell(origin, *dot),
                radius: dots.size * surface.scale / 2.0,
                rim: (dots.stroke_width * surface.scale).max(1.0),
            };
            draw_dot(ops, surface, disc, fill, stroke, z_order + 1);
        }
    }

    z_order + 2
}

/// Glyph for a stroke: solid for thick strokes, slope-matched ASCII otherwise.
fn stroke_char(segment: Segment, width: f64) -> char {
    if width > THICK_STROKE {
        return '█';
    }
    let dx = segment.end.x - segment.start.x;
    // Cells are taller than wide; compare in visual units.
    let dy = (segment.end.y - segment.start.y) * 2.0;
    if dy.abs() < dx.abs() * 0.4 {
        '-'
    } else if dx.abs() < dy.abs() * 0.4 {
        '|'
    } else if dx * dy > 0.0 {
        '\\'
    } else {
        '/'
    }
}

fn emit(ops: &mut Vec<DrawOp>, p: Point, ch: char, style: Style, z_order: i32) {
    let x = p.x.floor();
    let y = p.y.floor();
    if x >= 0.0 && y >= 0.0 && x <= u16::MAX as f64 && y <= u16::MAX as f64 {
        ops.push(DrawOp {
            x: x as u16,
            y: y as u16,
            ch,
            style,
            z_order,
        });
    }
}

/// Clip a segment to the canvas rectangle `[0, width] x [0, height]`
/// (Liang-Barsky).
///
/// Returns `None` when no part of the segment lies on the canvas.
fn clip_segment(start: Point, end: Point, canvas: CanvasSize) -> Option<(Point, Point)> {
    let finite = |p: Point| p.x.is_finite() && p.y.is_finite();
    if !finite(start) || !finite(end) {
        return None;
    }

    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let mut t_in: f64 = 0.0;
    let mut t_out: f64 = 1.0;
    for (p, q) in [
        (-dx, start.x),
        (dx, canvas.width - start.x),
        (-dy, start.y),
        (dy, canvas.height - start.y),
    ] {
        if p == 0.0 {
            // Parallel to this edge: either fully inside it or fully outside.
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t_out {
                return None;
            }
            t_in = t_in.max(t);
        } else {
            if t < t_in {
                return None;
            }
            t_out = t_out.min(t);
        }
    }

    Some((
        Point::new(start.x + dx * t_in, start.y + dy * t_in),
        Point::new(start.x + dx * t_out, start.y + dy * t_out),
    ))
}

/// DDA line between two cell-space points, inclusive of both ends.
///
/// Callers clip first; the step count grows with the segment length.
fn draw_line(ops: &mut Vec<DrawOp>, start: Point, end: Point, ch: char, colour: &Colour, z_order: i32) {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let steps = dx.abs().max(dy.abs()).ceil() as usize;
    let style = Style {
        fg: Some(colour.clone()),
        ..Default::default()
    };
    for i in 0..=steps {
        let t = if steps == 0 { 0.0 } else { i as f64 / steps as f64 };
        let p = Point::new(start.x + dx * t, start.y + dy * t);
        emit(ops, p, ch, style.clone(), z_order);
    }
}

/// A dot in cell space. `radius` is in rows; `rim` is the outline thickness.
struct Disc {
    centre: Point,
    radius: f64,
    rim: f64,
}

fn draw_dot(ops: &mut Vec<DrawOp>, surface: &Surface, disc: Disc, fill: &Colour, stroke: &Colour, z_order: i32) {
    let Disc { centre, radius, rim } = disc;
    if !(centre.x.is_finite() && centre.y.is_finite()) {
        return;
    }
    let fill_style = Style {
        fg: Some(fill.clone()),
        bold: true,
        ..Default::default()
    };
    if radius < 1.0 {
        emit(ops, centre, '●', fill_style, z_order);
        return;
    }

    let stroke_style = Style {
        fg: Some(stroke.clone()),
        ..Default::default()
    };
    let cell_aspect = surface.cell_aspect;
    let reach_x = (radius * cell_aspect).ceil();
    let reach_y = radius.ceil();
    let base_x = centre.x.floor();
    let base_y = centre.y.floor();

    // Only visit offsets that land on the canvas.
    let i_lo = (-reach_x).max(-base_x);
    let i_hi = reach_x.min(surface.canvas.width - 1.0 - base_x);
    let j_lo = (-reach_y).max(-base_y);
    let j_hi = reach_y.min(surface.canvas.height - 1.0 - base_y);
    if i_lo > i_hi || j_lo > j_hi {
        return;
    }

    for j in (j_lo as i64)..=(j_hi as i64) {
        for i in (i_lo as i64)..=(i_hi as i64) {
            let vx = i as f64 / cell_aspect;
            let vy = j as f64;
            let d = vx.hypot(vy);
            if d > radius {
                continue;
            }
            let style = if d > radius - rim {
                stroke_style.clone()
            } else {
                fill_style.clone()
            };
            let p = Point::new(centre.x + i as f64, centre.y + j as f64);
            emit(ops, p, '█', style, z_order);
        }
    }
}
