//! World grid
//!
//! A square matrix of cells backed by one contiguous buffer indexed by
//! `row * size + col`. Every alive entity owns exactly one cell (its center);
//! blobs occupy single cells.

use rand::Rng;

/// Entity and blob color palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Magenta,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::Cyan,
        Color::Magenta,
    ];

    /// Uniformly random palette color
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Single-character glyph used by text renderers
    pub fn glyph(&self) -> char {
        match self {
            Color::Red => 'r',
            Color::Green => 'g',
            Color::Blue => 'b',
            Color::Yellow => 'y',
            Color::Cyan => 'c',
            Color::Magenta => 'm',
        }
    }
}

/// Content of one world cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Blob { color: Color },
    /// Center of the entity at this registry index
    Entity { index: usize },
}

impl Cell {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Square S x S world
#[derive(Debug, Clone)]
pub struct WorldGrid {
    size: usize,
    cells: Vec<Cell>,
}

impl WorldGrid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Side length in cells
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    /// Raw buffer index; callers must have checked bounds
    #[inline]
    fn index(&self, row: i32, col: i32) -> usize {
        row as usize * self.size + col as usize
    }

    /// Cell at `(row, col)`, or `None` outside the world
    #[inline]
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.in_bounds(row, col)
            .then(|| self.cells[self.index(row, col)])
    }

    /// Cell at an in-bounds position.
    ///
    /// Panics when `(row, col)` is outside the world.
    #[inline]
    pub fn cell(&self, row: i32, col: i32) -> Cell {
        debug_assert!(self.in_bounds(row, col), "({row}, {col}) outside world");
        self.cells[self.index(row, col)]
    }

    /// Overwrite an in-bounds cell
    #[inline]
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) {
        debug_assert!(self.in_bounds(row, col), "({row}, {col}) outside world");
        let idx = self.index(row, col);
        self.cells[idx] = cell;
    }

    #[inline]
    pub fn clear(&mut self, row: i32, col: i32) {
        self.set(row, col, Cell::Empty);
    }

    /// Iterate `(row, col, cell)` over every non-empty cell
    pub fn occupied(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_empty())
            .map(|(i, c)| ((i / self.size) as i32, (i % self.size) as i32, *c))
    }

    pub fn blob_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c, Cell::Blob { .. }))
            .count()
    }

    pub fn entity_cell_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c, Cell::Entity { .. }))
            .count()
    }
}
