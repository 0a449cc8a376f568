//! Player — the terminal front-end.
//!
//! Drives a `Playback` to the terminal on a frame clock. Playbacks either
//! replay a compiled presentation or draw a live sketch tick by tick; the
//! player only owns timing, input and terminal output.

pub mod compiled;
pub mod config;
pub mod live;

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use crossterm::{cursor, event, execute, queue, style, terminal};

use crate::types::{Cell, CellChange, Colour, NamedColour, Style, TerminalContract};

use config::{PlayerConfig, matches_binding};

pub use compiled::CompiledPlayback;
pub use live::LivePlayback;

/// Rows reserved above the canvas for the menu bar.
const CANVAS_OFFSET: u16 = 1;

/// What changed on the grid after a step.
pub enum Update {
    /// Repaint the whole grid.
    Full,
    Changes(Vec<CellChange>),
}

/// A source of frames the player can step through.
pub trait Playback {
    fn contract(&self) -> &TerminalContract;
    fn frame_rate(&self) -> u32;
    fn grid(&self) -> &[Vec<Cell>];
    /// Move to the next tick.
    fn step(&mut self) -> Result<Update>;
    /// Start over from the first tick.
    fn restart(&mut self) -> Result<()>;
    /// Short position description for the status bar.
    fn position(&self) -> String;
}

pub struct Player<'a> {
    playback: &'a mut dyn Playback,
    config: PlayerConfig,
    paused: bool,
    fullscreen: bool,
}

impl<'a> Player<'a> {
    pub fn new(playback: &'a mut dyn Playback, config: PlayerConfig) -> Self {
        Self {
            playback,
            config,
            paused: false,
            fullscreen: false,
        }
    }

    /// Play in the terminal.
    ///
    /// Sets up the terminal, enters the event loop, and restores the terminal
    /// on exit (even on error).
    pub fn play(&mut self) -> Result<()> {
        let (term_w, term_h) = terminal::size()?;
        let need_w = self.playback.contract().width;
        let need_h = self.playback.contract().height;
        // +2: one row for menu bar, one row for status bar
        if term_w < need_w || term_h < need_h + 2 {
            bail!(
                "Terminal too small: need {}x{}, have {}x{}",
                need_w,
                need_h + 2,
                term_w,
                term_h,
            );
        }

        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;

        let result = self.run_loop(&mut stdout);

        // Always restore terminal state.
        let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();

        result
    }

    // -----------------------------------------------------------------------
    // Event loop
    // -----------------------------------------------------------------------

    fn run_loop(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        let interval = Duration::from_secs_f64(1.0 / self.playback.frame_rate().max(1) as f64);
        log::debug!("player running at {} fps", self.playback.frame_rate());

        self.render_menubar(stdout)?;
        self.render_full(stdout)?;
        self.render_status(stdout)?;
        let mut last_tick = Instant::now();

        loop {
            let timeout = if self.paused {
                Duration::from_millis(250)
            } else {
                interval.saturating_sub(last_tick.elapsed())
            };

            if event::poll(timeout)? {
                match event::read()? {
                    event::Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                        let bindings = &self.config.key_bindings;
                        if matches_binding(&bindings.quit, &key)
                            || matches_binding(&bindings.quit_alt, &key)
                        {
                            break;
                        } else if matches_binding(&bindings.pause, &key) {
                            self.paused = !self.paused;
                            self.render_status(stdout)?;
                        } else if matches_binding(&bindings.step, &key) {
                            if self.paused {
                                self.tick(stdout)?;
                            }
                        } else if matches_binding(&bindings.restart, &key) {
                            self.playback.restart()?;
                            self.render_full(stdout)?;
                            self.render_status(stdout)?;
                        } else if matches_binding(&bindings.fullscreen, &key) {
                            self.fullscreen = !self.fullscreen;
                            if self.fullscreen {
                                stdout.write_all(b"\x1b[10;1t")?;
                            } else {
                                stdout.write_all(b"\x1b[10;0t")?;
                            }
                            stdout.flush()?;
                        }
                    }
                    event::Event::Resize(_, _) => {
                        execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
                        self.render_menubar(stdout)?;
                        self.render_full(stdout)?;
                        self.render_status(stdout)?;
                    }
                    _ => {}
                }
            } else if !self.paused {
                self.tick(stdout)?;
                last_tick = Instant::now();
            }
        }

        Ok(())
    }

    fn tick(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        match self.playback.step()? {
            Update::Full => self.render_full(stdout)?,
            Update::Changes(changes) => render_changes(stdout, &changes)?,
        }
        self.render_status(stdout)
    }

    // -----------------------------------------------------------------------
    // Terminal output
    // -----------------------------------------------------------------------

    fn render_menubar(&self, stdout: &mut io::Stdout) -> Result<()> {
        let b = &self.config.key_bindings;
        let items = [
            format!("[{}] pause", b.pause),
            format!("[{}] step", b.step),
            format!("[{}] restart", b.restart),
            format!("[{}][{}] quit", b.quit, b.quit_alt),
            format!("[{}] full", b.fullscreen),
        ];

        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::Print(" "),
        )?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                queue!(stdout, style::Print("  "))?;
            }
            print_menu_item(stdout, item)?;
        }
        stdout.flush()?;
        Ok(())
    }

    fn render_full(&self, stdout: &mut io::Stdout) -> Result<()> {
        for (y, row) in self.playback.grid().iter().enumerate() {
            queue!(stdout, cursor::MoveTo(0, y as u16 + CANVAS_OFFSET))?;
            for cell in row {
                let cs = to_content_style(&cell.style);
                queue!(
                    stdout,
                    style::PrintStyledContent(style::StyledContent::new(cs, cell.ch))
                )?;
            }
        }
        stdout.flush()?;
        Ok(())
    }

    fn render_status(&self, stdout: &mut io::Stdout) -> Result<()> {
        let status_y = self.playback.contract().height + CANVAS_OFFSET;
        let (_, term_h) = terminal::size()?;
        if status_y >= term_h {
            return Ok(()); // No room for status bar.
        }

        let state = if self.paused { "paused" } else { "playing" };
        let status = format!(
            " {} | {} | {} fps ",
            self.playback.position(),
            state,
            self.playback.frame_rate(),
        );

        let mut cs = style::ContentStyle::default();
        cs.attributes.set(style::Attribute::Dim);

        queue!(
            stdout,
            cursor::MoveTo(0, status_y),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::PrintStyledContent(style::StyledContent::new(cs, status)),
        )?;
        stdout.flush()?;
        Ok(())
    }
}

/// Print a menu item, bolding `[...]` key labels and dimming the rest.
fn print_menu_item(stdout: &mut io::Stdout, item: &str) -> Result<()> {
    let mut run = String::new();
    let mut in_key = false;
    for ch in item.chars() {
        match ch {
            '[' if !in_key => {
                print_run(stdout, &mut run, style::Attribute::Dim)?;
                in_key = true;
                run.push(ch);
            }
            ']' if in_key => {
                run.push(ch);
                print_run(stdout, &mut run, style::Attribute::Bold)?;
                in_key = false;
            }
            _ => run.push(ch),
        }
    }
    print_run(stdout, &mut run, style::Attribute::Dim)
}

fn print_run(stdout: &mut io::Stdout, run: &mut String, attribute: style::Attribute) -> Result<()> {
    if !run.is_empty() {
        queue!(
            stdout,
            style::SetAttribute(attribute),
            style::Print(run.as_str()),
            style::SetAttribute(style::Attribute::Reset),
        )?;
        run.clear();
    }
    Ok(())
}

fn render_changes(stdout: &mut io::Stdout, changes: &[CellChange]) -> Result<()> {
    for change in changes {
        let cs = to_content_style(&change.cell.style);
        queue!(
            stdout,
            cursor::MoveTo(change.x, change.y + CANVAS_OFFSET),
            style::PrintStyledContent(style::StyledContent::new(cs, change.cell.ch)),
        )?;
    }
    stdout.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Style conversion
// ---------------------------------------------------------------------------

pub fn to_content_style(s: &Style) -> style::ContentStyle {
    let mut cs = style::ContentStyle::default();
    if let Some(fg) = &s.fg {
        cs.foreground_color = Some(to_ct_color(fg));
    }
    if let Some(bg) = &s.bg {
        cs.background_color = Some(to_ct_color(bg));
    }
    if s.bold {
        cs.attributes.set(style::Attribute::Bold);
    }
    cs
}

pub fn to_ct_color(c: &Colour) -> style::Color {
    match c {
        Colour::Named(n) => match n {
            NamedColour::Black => style::Color::Black,
            NamedColour::Red => style::Color::Red,
            NamedColour::Green => style::Color::Green,
            NamedColour::Yellow => style::Color::Yellow,
            NamedColour::Blue => style::Color::Blue,
            NamedColour::Magenta => style::Color::Magenta,
            NamedColour::Cyan => style::Color::Cyan,
            NamedColour::White => style::Color::White,
        },
        Colour::Rgb { r, g, b } => style::Color::Rgb {
            r: *r,
            g: *g,
            b: *b,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_conversion() {
        let s = Style {
            fg: Some(Colour::Rgb { r: 1, g: 2, b: 3 }),
            bg: Some(Colour::Named(NamedColour::Blue)),
            bold: true,
        };
        let cs = to_content_style(&s);
        assert_eq!(cs.foreground_color, Some(style::Color::Rgb { r: 1, g: 2, b: 3 }));
        assert_eq!(cs.background_color, Some(style::Color::Blue));
        assert!(cs.attributes.has(style::Attribute::Bold));
    }
}
