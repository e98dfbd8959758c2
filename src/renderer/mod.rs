//! Rendering seam
//!
//! The simulation never draws. Once per tick the game loop hands a
//! `FrameView` to a `Renderer`; `compose` turns that view into logical draw
//! primitives: background first, then entities, then labels and the HUD.

pub mod canvas;
pub mod shapes;
pub mod terminal;

pub use canvas::TextCanvas;
pub use shapes::{DrawCmd, centered_text, circle_cells};
pub use terminal::TerminalRenderer;

use crate::consts::BLOB_RADIUS;
use crate::settings::Viewport;
use crate::sim::{Cell, EntityRegistry, GameState, WorldGrid};

/// Everything a renderer may read for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub grid: &'a WorldGrid,
    pub entities: &'a EntityRegistry,
    /// World cell shown at the viewport's upper-left corner
    pub origin: (i32, i32),
    pub viewport: Viewport,
    pub alive_bots: usize,
}

impl<'a> FrameView<'a> {
    /// View centered on the player
    pub fn of(state: &'a GameState) -> Self {
        Self {
            grid: &state.grid,
            entities: &state.entities,
            origin: state.viewport_origin(),
            viewport: state.viewport,
            alive_bots: state.alive_bots(),
        }
    }
}

/// Frame consumer owned by the game loop
pub trait Renderer {
    fn render(&mut self, frame: &FrameView<'_>);
}

/// Turn a frame into draw commands in paint order
pub fn compose(frame: &FrameView<'_>) -> Vec<DrawCmd> {
    let (origin_row, origin_col) = frame.origin;
    let Viewport { rows, cols } = frame.viewport;
    let mut cmds = Vec::with_capacity((rows * cols) as usize);

    // Background and blobs
    for row in 0..rows {
        for col in 0..cols {
            match frame.grid.get(origin_row + row, origin_col + col) {
                None => cmds.push(DrawCmd::Void { row, col }),
                Some(Cell::Blob { color }) => cmds.push(DrawCmd::Circle {
                    row,
                    col,
                    radius: BLOB_RADIUS as f32,
                    color,
                }),
                Some(_) => cmds.push(DrawCmd::Background { row, col }),
            }
        }
    }

    // Entities overlap the background, so they go after it
    let mut labels = Vec::new();
    for entity in frame.entities.iter().filter(|e| e.is_alive()) {
        let radius = entity.radius();
        let reach = radius as i32;
        let row = entity.row - origin_row;
        let col = entity.col - origin_col;
        if row + reach < 0 || col + reach < 0 || row - reach >= rows || col - reach >= cols {
            continue;
        }
        cmds.push(DrawCmd::Circle {
            row,
            col,
            radius,
            color: entity.color,
        });
        if !entity.name.is_empty() {
            labels.push(centered_text(row - reach - 2, col, &entity.name));
        }
    }
    cmds.extend(labels);

    cmds.push(DrawCmd::Text {
        row: rows - 2,
        col: 0,
        text: format!("ENEMIES LEFT: {}", frame.alive_bots),
    });
    cmds.push(DrawCmd::Text {
        row: rows - 1,
        col: 0,
        text: format!("YOUR SIZE: {}", frame.entities.player().size()),
    });
    cmds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{Color, Entity};

    fn state(entities: Vec<Entity>) -> GameState {
        let mut settings = Settings::default();
        settings.viewport = Viewport { rows: 20, cols: 40 };
        GameState::with_entities(100, &settings, 0, entities)
    }

    #[test]
    fn test_void_near_edge() {
        let state = state(vec![Entity::new(3, 3, 20, Color::Red)]);
        let cmds = compose(&FrameView::of(&state));
        // Origin is (3 - 10, 3 - 20): rows 0..7 and cols 0..17 are beyond the world
        assert!(cmds.contains(&DrawCmd::Void { row: 0, col: 0 }));
        assert!(cmds.contains(&DrawCmd::Void { row: 6, col: 30 }));
        assert!(cmds.contains(&DrawCmd::Background { row: 7, col: 17 }));
    }

    #[test]
    fn test_entities_after_background() {
        let mut bot = Entity::new(52, 55, 30, Color::Blue);
        bot.name = "bot".to_string();
        let mut state = state(vec![Entity::new(50, 50, 20, Color::Red), bot]);
        state.grid.set(48, 50, Cell::Blob { color: Color::Green });
        let cmds = compose(&FrameView::of(&state));

        let last_cell = cmds
            .iter()
            .rposition(|c| matches!(c, DrawCmd::Background { .. } | DrawCmd::Void { .. }))
            .unwrap();
        let first_entity = cmds
            .iter()
            .position(|c| matches!(c, DrawCmd::Circle { radius, .. } if *radius > 0.0))
            .unwrap();
        assert!(first_entity > last_cell);

        // Blob drawn in place of the background
        assert!(cmds.contains(&DrawCmd::Circle {
            row: 8,
            col: 20,
            radius: 0.0,
            color: Color::Green
        }));
        // Bot label above its circle
        assert!(cmds.contains(&DrawCmd::Text {
            row: 12 - 3 - 2,
            col: 25 - 1,
            text: "bot".to_string()
        }));
    }

    #[test]
    fn test_hud_labels() {
        let state = state(vec![
            Entity::new(50, 50, 20, Color::Red),
            Entity::new(80, 80, 20, Color::Blue),
        ]);
        let cmds = compose(&FrameView::of(&state));
        assert!(cmds.contains(&DrawCmd::Text {
            row: 18,
            col: 0,
            text: "ENEMIES LEFT: 1".to_string()
        }));
        assert!(cmds.contains(&DrawCmd::Text {
            row: 19,
            col: 0,
            text: "YOUR SIZE: 20".to_string()
        }));
        // The far bot is off screen
        assert_eq!(
            cmds.iter()
                .filter(|c| matches!(c, DrawCmd::Circle { radius, .. } if *radius > 0.0))
                .count(),
            1
        );
    }
}
