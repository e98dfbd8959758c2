//! Character-cell rasterizer
//!
//! `TextCanvas` turns draw commands into a rows x cols buffer of glyphs,
//! each with the palette color it was drawn in.

use std::fmt;

use super::shapes::{DrawCmd, circle_cells};
use super::{FrameView, Renderer, compose};
use crate::settings::Viewport;
use crate::sim::Color;

const BACKGROUND: char = '.';
const VOID: char = ' ';

/// Glyph buffer the size of the viewport
#[derive(Debug, Clone)]
pub struct TextCanvas {
    rows: i32,
    cols: i32,
    cells: Vec<char>,
    tints: Vec<Option<Color>>,
}

impl TextCanvas {
    pub fn new(viewport: Viewport) -> Self {
        let rows = viewport.rows.max(0);
        let cols = viewport.cols.max(0);
        Self {
            rows,
            cols,
            cells: vec![VOID; (rows * cols) as usize],
            tints: vec![None; (rows * cols) as usize],
        }
    }

    /// Glyph at a viewport cell; `None` outside the canvas
    pub fn glyph(&self, row: i32, col: i32) -> Option<char> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Color of the circle covering a cell, `None` for plain cells
    pub fn tint(&self, row: i32, col: i32) -> Option<Color> {
        self.index(row, col).and_then(|i| self.tints[i])
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Canvas rows top to bottom
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.cells
            .chunks(self.cols.max(1) as usize)
            .map(|line| line.iter().collect())
    }

    /// Rasterize one command; anything off the canvas is clipped
    pub fn draw(&mut self, cmd: &DrawCmd) {
        match cmd {
            DrawCmd::Background { row, col } => self.put(*row, *col, BACKGROUND, None),
            DrawCmd::Void { row, col } => self.put(*row, *col, VOID, None),
            DrawCmd::Circle {
                row,
                col,
                radius,
                color,
            } => {
                // Entities in upper case so they stand out from blobs
                let glyph = if *radius > 0.0 {
                    color.glyph().to_ascii_uppercase()
                } else {
                    color.glyph()
                };
                for (r, c) in circle_cells(*row, *col, *radius) {
                    self.put(r, c, glyph, Some(*color));
                }
            }
            DrawCmd::Text { row, col, text } => {
                for (offset, ch) in text.chars().enumerate() {
                    self.put(*row, col + offset as i32, ch, None);
                }
            }
        }
    }

    fn put(&mut self, row: i32, col: i32, glyph: char, tint: Option<Color>) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = glyph;
            self.tints[i] = tint;
        }
    }

    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row >= self.rows || col >= self.cols {
            return None;
        }
        Some((row * self.cols + col) as usize)
    }
}

impl Renderer for TextCanvas {
    fn render(&mut self, frame: &FrameView<'_>) {
        if frame.viewport.rows != self.rows || frame.viewport.cols != self.cols {
            *self = TextCanvas::new(frame.viewport);
        }
        self.cells.fill(VOID);
        self.tints.fill(None);
        for cmd in compose(frame) {
            self.draw(&cmd);
        }
    }
}

impl fmt::Display for TextCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
