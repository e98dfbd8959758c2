//! Terminal output through crossterm
//!
//! Every frame is rasterized into a `TextCanvas` and then written row by row
//! with cursor moves and color changes only where the tint changes.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{self, Print, ResetColor, SetForegroundColor};

use super::canvas::TextCanvas;
use super::{FrameView, Renderer};
use crate::settings::Viewport;
use crate::sim::Color;

/// Terminal color for a palette entry
pub fn term_color(color: Color) -> style::Color {
    match color {
        Color::Red => style::Color::Red,
        Color::Green => style::Color::Green,
        Color::Blue => style::Color::Blue,
        Color::Yellow => style::Color::Yellow,
        Color::Cyan => style::Color::Cyan,
        Color::Magenta => style::Color::Magenta,
    }
}

/// Draws frames to a crossterm-capable writer (normally stdout)
pub struct TerminalRenderer<W: Write> {
    out: W,
    canvas: TextCanvas,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, viewport: Viewport) -> Self {
        Self {
            out,
            canvas: TextCanvas::new(viewport),
        }
    }

    pub fn canvas(&self) -> &TextCanvas {
        &self.canvas
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn flush_canvas(&mut self) -> io::Result<()> {
        let mut run = String::new();
        for row in 0..self.canvas.rows() {
            queue!(self.out, MoveTo(0, row as u16), ResetColor)?;
            let mut current = None;
            for col in 0..self.canvas.cols() {
                let tint = self.canvas.tint(row, col);
                if tint != current {
                    if !run.is_empty() {
                        queue!(self.out, Print(&run))?;
                        run.clear();
                    }
                    match tint {
                        Some(color) => queue!(self.out, SetForegroundColor(term_color(color)))?,
                        None => queue!(self.out, ResetColor)?,
                    }
                    current = tint;
                }
                run.push(self.canvas.glyph(row, col).unwrap_or(' '));
            }
            if !run.is_empty() {
                queue!(self.out, Print(&run))?;
                run.clear();
            }
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, frame: &FrameView<'_>) {
        self.canvas.render(frame);
        if let Err(e) = self.flush_canvas() {
            log::warn!("Failed to write frame: {e}");
        }
    }
}
