//! Shared boundary types for the polygon ring animator.
//!
//! Three data contracts live here:
//! - Engine → caller (in-memory): `FrameSnapshot`, one per ring per tick
//! - Engine → Renderer (in-memory): `ResolvedScene` containing `DrawOp`s
//! - Renderer → Player (file): `PlayablePresentation` containing `Frame`s

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Colours and styles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Colour {
    Named(NamedColour),
    Rgb { r: u8, g: u8, b: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColour {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl NamedColour {
    pub const ALL: [NamedColour; 8] = [
        NamedColour::Black,
        NamedColour::Red,
        NamedColour::Green,
        NamedColour::Yellow,
        NamedColour::Blue,
        NamedColour::Magenta,
        NamedColour::Cyan,
        NamedColour::White,
    ];
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg: Option<Colour>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<Colour>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
}

impl Style {
    pub fn is_default(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && !self.bold
    }
}

// ---------------------------------------------------------------------------
// Geometry values
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// One polygon edge, from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

/// Size of the drawing surface in pixels (terminal cells here).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

// ---------------------------------------------------------------------------
// Engine → caller boundary
// ---------------------------------------------------------------------------

/// Immutable result of one query against a ring.
///
/// Geometry is expressed in the ring's local frame: origin at the ring
/// centre, +y pointing down the surface. `position` is the untouched
/// normalized ring offset from the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub current_rotation: f64,
    pub position: Point,
    pub sides: SidesSnapshot,
    pub dots: DotsSnapshot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SidesSnapshot {
    pub enabled: bool,
    /// One segment per edge, in winding order.
    pub positions: Vec<Segment>,
    pub stroke_colours: Vec<Colour>,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DotsSnapshot {
    pub enabled: bool,
    pub position: Vec<Point>,
    pub fill_colours: Vec<Colour>,
    pub stroke_colours: Vec<Colour>,
    pub stroke_width: f64,
    pub size: f64,
}

/// Snapshots of every ring in a group, in draw order, with the group offset.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupFrame {
    pub position: Point,
    pub rings: Vec<FrameSnapshot>,
}

// ---------------------------------------------------------------------------
// Engine → Renderer boundary (in-memory only, never serialized)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct DrawOp {
    pub x: u16,
    pub y: u16,
    pub ch: char,
    pub style: Style,
    pub z_order: i32,
}

#[derive(Debug, Clone)]
pub struct ResolvedScene {
    pub width: u16,
    pub height: u16,
    pub ops: Vec<DrawOp>,
}

// ---------------------------------------------------------------------------
// Renderer → Player boundary (serialized to the playable file)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalContract {
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub ch: char,
    #[serde(default, skip_serializing_if = "Style::is_default")]
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            ch: ' ',
            style: Style::default(),
        }
    }
}

impl Cell {
    /// An empty cell painted with the given background colour.
    pub fn blank(background: Option<&Colour>) -> Self {
        Cell {
            ch: ' ',
            style: Style {
                bg: background.cloned(),
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange {
    pub x: u16,
    pub y: u16,
    pub cell: Cell,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Frame {
    Full { cells: Vec<Vec<Cell>> },
    Diff { changes: Vec<CellChange> },
}

fn default_frame_rate() -> u32 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayablePresentation {
    pub contract: TerminalContract,
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    pub frames: Vec<Frame>,
}
