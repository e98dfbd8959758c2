//! Entity and blob placement
//!
//! Placement uses a bounding-box test rather than a true circle test: a
//! candidate is accepted only when its center and every other cell of the
//! `(2r + 1)²` box around it are empty. The grid only holds entity centers,
//! so entity placement also keeps the candidate's box clear of the boxes of
//! entities placed before it.

use rand::Rng;

use super::grid::{Cell, Color, WorldGrid};
use super::state::Entity;
use crate::consts::*;

/// A successful entity placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: i32,
    pub col: i32,
    pub radius: i32,
}

/// True when the box of `radius` around `(row, col)` is free.
///
/// Cells outside the world count as occupied.
pub fn check_collision(grid: &WorldGrid, row: i32, col: i32, radius: i32) -> bool {
    if grid.get(row, col) != Some(Cell::Empty) {
        return false;
    }
    for r in row - radius..=row + radius {
        for c in col - radius..=col + radius {
            if r == row && c == col {
                continue;
            }
            match grid.get(r, c) {
                Some(Cell::Empty) => {}
                _ => return false,
            }
        }
    }
    true
}

/// True when the box of `radius` around `(row, col)` does not overlap the
/// box of any living entity in `placed`
pub fn clear_of_entities(placed: &[Entity], row: i32, col: i32, radius: i32) -> bool {
    placed.iter().filter(|e| e.is_alive()).all(|e| {
        let reach = radius + e.radius() as i32;
        (e.row - row).abs() > reach || (e.col - col).abs() > reach
    })
}

/// Pick a random starting radius and try to place it.
///
/// Returns `None` when the radius cannot fit the world or every trial
/// collided (the world is probably full).
pub fn spawn_entity<R: Rng + ?Sized>(
    grid: &WorldGrid,
    placed: &[Entity],
    rng: &mut R,
) -> Option<Placement> {
    let size = grid.size() as i32;
    let radius = rng.random_range(MIN_BASE_RADIUS..=MAX_BASE_RADIUS);
    // Keep one free cell between the circle and the edge
    let low = radius + 1;
    let high = (size - 1) - radius - 1;
    if low > high {
        return None;
    }

    for _ in 0..TRIES {
        let row = rng.random_range(low..=high);
        let col = rng.random_range(low..=high);
        if check_collision(grid, row, col, radius)
            && clear_of_entities(placed, row, col, radius)
        {
            return Some(Placement { row, col, radius });
        }
    }
    None
}

/// Try to drop one blob on a random free cell.
///
/// Does nothing once `blobs` reached `max_blobs`; a collided trial simply
/// skips this call. Returns whether a blob was placed.
pub fn spawn_blob<R: Rng + ?Sized>(
    grid: &mut WorldGrid,
    blobs: &mut usize,
    max_blobs: usize,
    rng: &mut R,
) -> bool {
    if *blobs >= max_blobs {
        return false;
    }
    let size = grid.size() as i32;
    let row = rng.random_range(1..=size - 2);
    let col = rng.random_range(1..=size - 2);

    // Radius + 1 keeps blobs from touching each other
    if check_collision(grid, row, col, BLOB_RADIUS + 1) {
        grid.set(
            row,
            col,
            Cell::Blob {
                color: Color::random(rng),
            },
        );
        *blobs += 1;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_check_collision_empty_world() {
        let grid = WorldGrid::new(20);
        assert!(check_collision(&grid, 10, 10, 3));
    }

    #[test]
    fn test_check_collision_occupied_center() {
        let mut grid = WorldGrid::new(20);
        grid.set(10, 10, Cell::Entity { index: 0 });
        assert!(!check_collision(&grid, 10, 10, 0));
    }

    #[test]
    fn test_check_collision_box_corner_and_axis() {
        let mut grid = WorldGrid::new(20);
        grid.set(13, 13, Cell::Blob { color: Color::Red });
        assert!(!check_collision(&grid, 10, 10, 3));
        assert!(check_collision(&grid, 10, 10, 2));

        // Cells sharing the candidate's row are checked as well
        let mut grid = WorldGrid::new(20);
        grid.set(10, 12, Cell::Blob { color: Color::Red });
        assert!(!check_collision(&grid, 10, 10, 2));
    }

    #[test]
    fn test_check_collision_outside_world() {
        let grid = WorldGrid::new(20);
        assert!(!check_collision(&grid, 1, 1, 2));
    }

    #[test]
    fn test_spawn_entity_keeps_margin() {
        let grid = WorldGrid::new(100);
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..200 {
            let spot = spawn_entity(&grid, &[], &mut rng).expect("empty world has room");
            assert!((MIN_BASE_RADIUS..=MAX_BASE_RADIUS).contains(&spot.radius));
            assert!(spot.row - spot.radius >= 1);
            assert!(spot.col - spot.radius >= 1);
            assert!(spot.row + spot.radius <= 98);
            assert!(spot.col + spot.radius <= 98);
        }
    }

    #[test]
    fn test_spawn_entity_full_world() {
        let mut grid = WorldGrid::new(100);
        for r in 0..100 {
            for c in 0..100 {
                grid.set(r, c, Cell::Blob { color: Color::Blue });
            }
        }
        let mut rng = Pcg32::seed_from_u64(5);
        assert_eq!(spawn_entity(&grid, &[], &mut rng), None);
    }

    #[test]
    fn test_spawn_entity_world_too_small() {
        let grid = WorldGrid::new(8);
        let mut rng = Pcg32::seed_from_u64(11);
        // Radius 2 still fits an 8-cell world, larger ones never do
        for _ in 0..50 {
            if let Some(spot) = spawn_entity(&grid, &[], &mut rng) {
                assert_eq!(spot.radius, 2);
            }
        }
    }

    #[test]
    fn test_clear_of_entities_uses_both_radii() {
        // Radius 3.5 entity: its box spans cols 17..=23
        let placed = [Entity::new(20, 20, 30, Color::Red)];
        assert!(!clear_of_entities(&placed, 20, 25, 2));
        assert!(!clear_of_entities(&placed, 26, 26, 3));
        assert!(clear_of_entities(&placed, 20, 26, 2));
        assert!(clear_of_entities(&placed, 27, 10, 3));

        let mut gone = Entity::new(20, 20, 30, Color::Red);
        gone.eliminate();
        assert!(clear_of_entities(&[gone], 20, 21, 2));
    }

    #[test]
    fn test_spawned_boxes_never_overlap() {
        let grid = WorldGrid::new(100);
        let mut rng = Pcg32::seed_from_u64(24);
        let mut placed: Vec<Entity> = Vec::new();
        for _ in 0..400 {
            if let Some(spot) = spawn_entity(&grid, &placed, &mut rng) {
                for e in &placed {
                    let reach = spot.radius + e.radius() as i32;
                    assert!((e.row - spot.row).abs() > reach || (e.col - spot.col).abs() > reach);
                }
                placed.push(Entity::new(
                    spot.row,
                    spot.col,
                    spot.radius as u32 * SIZE_MODIFIER,
                    Color::Blue,
                ));
            }
        }
        assert!(placed.len() > 1);
    }

    #[test]
    fn test_spawn_blob_respects_cap() {
        let mut grid = WorldGrid::new(100);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut blobs = 3;
        assert!(!spawn_blob(&mut grid, &mut blobs, 3, &mut rng));
        assert_eq!(blobs, 3);
        assert_eq!(grid.blob_count(), 0);
    }

    #[test]
    fn test_spawn_blob_places_one() {
        let mut grid = WorldGrid::new(100);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut blobs = 0;
        assert!(spawn_blob(&mut grid, &mut blobs, 10, &mut rng));
        assert_eq!(blobs, 1);
        assert_eq!(grid.blob_count(), 1);
        let (row, col, _) = grid.occupied().next().unwrap();
        assert!((1..=98).contains(&row) && (1..=98).contains(&col));
    }
}
