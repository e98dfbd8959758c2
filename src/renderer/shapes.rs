//! Logical draw primitives for one frame

use crate::inside_circle;
use crate::sim::Color;

/// One draw instruction in viewport coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Empty world cell
    Background { row: i32, col: i32 },
    /// Viewport cell beyond the world edge
    Void { row: i32, col: i32 },
    /// Filled circle (radius 0 is a single cell)
    Circle {
        row: i32,
        col: i32,
        radius: f32,
        color: Color,
    },
    /// Plain text label
    Text { row: i32, col: i32, text: String },
}

/// Cells covered by a filled circle
pub fn circle_cells(row: i32, col: i32, radius: f32) -> impl Iterator<Item = (i32, i32)> {
    let reach = radius as i32;
    (row - reach..=row + reach).flat_map(move |r| {
        (col - reach..=col + reach)
            .filter(move |&c| inside_circle(r, c, row, col, radius))
            .map(move |c| (r, c))
    })
}

/// Label centered horizontally on `col`
pub fn centered_text(row: i32, col: i32, text: &str) -> DrawCmd {
    DrawCmd::Text {
        row,
        col: col - text.chars().count() as i32 / 2,
        text: text.to_string(),
    }
}
