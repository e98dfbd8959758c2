//! Movement and world boundaries

use super::grid::{Cell, WorldGrid};
use super::state::EntityRegistry;

/// Keep a circle of integer radius `radius` inside `[0, size)` along one axis.
///
/// The position slides to the last legal cell; the vector is left alone.
/// A circle wider than the world still keeps its center inside it.
#[inline]
pub fn clamp_axis(pos: i32, radius: i32, size: i32) -> i32 {
    let legal = if pos - radius < 0 {
        radius
    } else if pos + radius >= size {
        (size - 1) - radius
    } else {
        pos
    };
    legal.clamp(0, size - 1)
}

/// Move every living entity by its vector and keep the grid in sync.
///
/// A mover whose target cell holds another entity's center stays put this
/// tick. A mover landing on a blob absorbs it. Returns the number of blobs
/// absorbed this way.
pub fn update_positions(entities: &mut EntityRegistry, grid: &mut WorldGrid) -> usize {
    let size = grid.size() as i32;
    let mut absorbed = 0;

    for index in 0..entities.len() {
        let entity = &entities[index];
        if !entity.is_alive() {
            continue;
        }
        let radius = entity.radius() as i32;
        let new_row = clamp_axis(entity.row + entity.row_vector, radius, size);
        let new_col = clamp_axis(entity.col + entity.col_vector, radius, size);
        absorbed += relocate(entities, grid, index, new_row, new_col).unwrap_or(0);
    }
    absorbed
}

/// Pull entities that outgrew their spot back inside the world.
///
/// Growth during collision evaluation can widen a circle sitting against an
/// edge past that edge; this re-clamps with the current radius. Same
/// blocking and blob rules as `update_positions`. Returns blobs absorbed.
pub fn settle_edges(entities: &mut EntityRegistry, grid: &mut WorldGrid) -> usize {
    let size = grid.size() as i32;
    let mut absorbed = 0;

    for index in 0..entities.len() {
        // Absorbing a blob on the way in can grow the radius again
        loop {
            let entity = &entities[index];
            if !entity.is_alive() {
                break;
            }
            let radius = entity.radius() as i32;
            let row = clamp_axis(entity.row, radius, size);
            let col = clamp_axis(entity.col, radius, size);
            if (row, col) == (entity.row, entity.col) {
                break;
            }
            match relocate(entities, grid, index, row, col) {
                Some(gained) => absorbed += gained,
                None => break,
            }
        }
    }
    absorbed
}

/// Move one entity to `(row, col)`.
///
/// `None` when another entity's center blocks the target, otherwise the
/// number of blobs absorbed (0 or 1).
fn relocate(
    entities: &mut EntityRegistry,
    grid: &mut WorldGrid,
    index: usize,
    row: i32,
    col: i32,
) -> Option<usize> {
    let entity = &mut entities[index];
    if (row, col) == (entity.row, entity.col) {
        return Some(0);
    }

    let absorbed = match grid.cell(row, col) {
        Cell::Entity { .. } => return None,
        Cell::Blob { .. } => {
            entity.grow(1);
            1
        }
        Cell::Empty => 0,
    };

    grid.clear(entity.row, entity.col);
    grid.set(row, col, Cell::Entity { index });
    entity.row = row;
    entity.col = col;
    Some(absorbed)
}
