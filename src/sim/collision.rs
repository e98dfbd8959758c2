//! Collision evaluation
//!
//! Each living entity scans the band of cells along its circumference. The
//! band is as thick as one tick of the fastest movement, so nothing can hop
//! over an edge between two evaluations. Blobs in the band are eaten; an
//! entity center in the band is eaten when the scanner's radius is strictly
//! bigger. Scanners run in registry order, so within one pass an earlier
//! entity can eat a later one before the later one gets to scan.

use super::grid::{Cell, WorldGrid};
use super::state::EntityRegistry;
use crate::consts::*;
use crate::distance;

/// Extra band thickness: the fastest axis speed beyond the base step of 1
pub const SCAN_SLACK: i32 = if HORIZONTAL_MODIFIER > VERTICAL_MODIFIER {
    HORIZONTAL_MODIFIER - 1
} else {
    VERTICAL_MODIFIER - 1
};

/// Result of one evaluation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvalOutcome {
    /// Blobs eaten during the pass
    pub blobs_eaten: usize,
    /// Living entities (player included) after the pass
    pub alive: usize,
    /// Registry indices eliminated during the pass, in order
    pub eliminated: Vec<usize>,
}

/// Size gained from eating an entity of `victim_size` (truncating)
#[inline]
pub fn growth_from(victim_size: u32) -> u32 {
    (victim_size as f32 * GROW_MODIFIER) as u32
}

/// Circumference band `[inner, outer]` for a radius; never below zero
#[inline]
pub fn band(radius: f32) -> (f32, f32) {
    ((radius - SCAN_SLACK as f32 - 1.0).max(0.0), radius)
}

/// Apply consumption and elimination for every living entity
pub fn eval_positions(entities: &mut EntityRegistry, grid: &mut WorldGrid) -> EvalOutcome {
    let mut outcome = EvalOutcome::default();

    for k in 0..entities.len() {
        if !entities[k].is_alive() {
            continue;
        }

        let (row, col) = (entities[k].row, entities[k].col);
        let reach = entities[k].radius() as i32 + SCAN_SLACK;
        let (inner, _) = band(entities[k].radius());

        for r in row - reach..=row + reach {
            for c in col - reach..=col + reach {
                let Some(cell) = grid.get(r, c) else {
                    continue;
                };
                let d = distance(row - r, col - c);
                // The scanner may grow mid-scan; compare against its current radius
                if d < inner || d > entities[k].radius() {
                    continue;
                }

                match cell {
                    Cell::Empty => {}
                    Cell::Blob { .. } => {
                        entities[k].grow(1);
                        outcome.blobs_eaten += 1;
                        grid.clear(r, c);
                    }
                    Cell::Entity { index } if index == k => {}
                    Cell::Entity { index } => {
                        let victim_size = entities[index].size();
                        if entities[k].radius() > entities[index].radius() {
                            entities[index].eliminate();
                            entities[k].grow(growth_from(victim_size));
                            grid.clear(r, c);
                            outcome.eliminated.push(index);
                            log::debug!("Entity {k} ate entity {index} (size {victim_size})");
                        }
                    }
                }
            }
        }
    }

    outcome.alive = entities.alive_count();
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::Color;
    use crate::sim::state::Entity;

    fn world(entities: Vec<Entity>) -> (EntityRegistry, WorldGrid) {
        let mut grid = WorldGrid::new(100);
        for (index, e) in entities.iter().enumerate() {
            if e.is_alive() {
                grid.set(e.row, e.col, Cell::Entity { index });
            }
        }
        (EntityRegistry::new(entities), grid)
    }

    #[test]
    fn test_band_clamped_at_zero() {
        assert_eq!(band(0.5), (0.0, 0.5));
        assert_eq!(band(5.5), (3.5, 5.5));
    }

    #[test]
    fn test_growth_truncates() {
        assert_eq!(growth_from(5), 2);
        assert_eq!(growth_from(20), 10);
        assert_eq!(growth_from(1), 0);
    }

    #[test]
    fn test_eats_blob_in_band() {
        // Size 30 -> radius 3.5, band [1.5, 3.5]
        let (mut entities, mut grid) = world(vec![Entity::new(50, 50, 30, Color::Red)]);
        grid.set(50, 53, Cell::Blob { color: Color::Green });
        grid.set(50, 55, Cell::Blob { color: Color::Green });

        let outcome = eval_positions(&mut entities, &mut grid);
        assert_eq!(outcome.blobs_eaten, 1);
        assert_eq!(outcome.alive, 1);
        assert_eq!(entities[0].size(), 31);
        assert_eq!(grid.cell(50, 53), Cell::Empty);
        assert_eq!(grid.cell(50, 55), Cell::Blob { color: Color::Green });
    }

    #[test]
    fn test_blob_deep_inside_is_not_band() {
        let (mut entities, mut grid) = world(vec![Entity::new(50, 50, 60, Color::Red)]);
        // Radius 6.5, band [4.5, 6.5]
        grid.set(51, 51, Cell::Blob { color: Color::Green });
        let outcome = eval_positions(&mut entities, &mut grid);
        assert_eq!(outcome.blobs_eaten, 0);
    }

    #[test]
    fn test_bigger_eats_smaller() {
        let (mut entities, mut grid) = world(vec![
            Entity::new(50, 50, 50, Color::Red),
            Entity::new(50, 54, 5, Color::Blue),
        ]);

        let outcome = eval_positions(&mut entities, &mut grid);
        assert!(!entities[1].is_alive());
        assert_eq!(entities[0].size(), 52);
        assert_eq!(outcome.alive, 1);
        assert_eq!(outcome.eliminated, vec![1]);
        assert_eq!(grid.cell(50, 54), Cell::Empty);
        assert_eq!(grid.entity_cell_count(), 1);
    }

    #[test]
    fn test_later_bigger_eats_earlier() {
        let (mut entities, mut grid) = world(vec![
            Entity::new(50, 54, 5, Color::Blue),
            Entity::new(50, 50, 50, Color::Red),
        ]);

        let outcome = eval_positions(&mut entities, &mut grid);
        assert!(!entities[0].is_alive());
        assert_eq!(entities[1].size(), 52);
        assert_eq!(outcome.alive, 1);
    }

    #[test]
    fn test_equal_radii_no_effect() {
        // Sizes 50 and 55 share radius 5.5
        let (mut entities, mut grid) = world(vec![
            Entity::new(50, 50, 50, Color::Red),
            Entity::new(50, 55, 55, Color::Blue),
        ]);

        let outcome = eval_positions(&mut entities, &mut grid);
        assert!(entities[0].is_alive() && entities[1].is_alive());
        assert_eq!((entities[0].size(), entities[1].size()), (50, 55));
        assert_eq!(outcome.alive, 2);
        assert!(outcome.eliminated.is_empty());
    }

    #[test]
    fn test_out_of_band_entity_survives() {
        let (mut entities, mut grid) = world(vec![
            Entity::new(50, 50, 50, Color::Red),
            Entity::new(50, 60, 5, Color::Blue),
        ]);
        eval_positions(&mut entities, &mut grid);
        assert!(entities[1].is_alive());
    }

    #[test]
    fn test_scan_at_world_edge() {
        let (mut entities, mut grid) = world(vec![Entity::new(2, 2, 20, Color::Red)]);
        grid.set(0, 2, Cell::Blob { color: Color::Yellow });
        let outcome = eval_positions(&mut entities, &mut grid);
        assert_eq!(outcome.blobs_eaten, 1);
    }
}
