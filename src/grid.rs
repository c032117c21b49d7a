// src/grid.rs

//! Maps grid positions to integer values and classifies each cell.
//!
//! A cell's value is `row * columns + col + base_offset`, so the sequence
//! runs row-major starting at `base_offset` (2 by default, the first prime).
//! Classification of a cell is a pure function of its value (the twin/sexy
//! predicates probe neighboring *values*, not neighboring cells), so cells
//! may be evaluated in any order.

use crate::classify::{PrimeClassifier, TagSet};
use log::debug;

/// One grid position together with its classified value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    /// The integer mapped to this position.
    pub value: u64,
    /// `None` for composites; for primes, the (non-empty) tag set.
    pub tags: Option<TagSet>,
}

impl Cell {
    /// True if this cell's value is prime.
    pub fn is_prime(&self) -> bool {
        self.tags.is_some()
    }
}

/// A classified rows × columns grid in row-major order.
///
/// Invariant: `cells.len() == rows * columns`, and cell values are unique
/// and strictly increasing in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub rows: u32,
    pub columns: u32,
    pub base_offset: u64,
    cells: Vec<Cell>,
}

impl Grid {
    /// The cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cell at (row, col). Panics if out of range, like slice indexing.
    pub fn cell(&self, row: u32, col: u32) -> &Cell {
        assert!(row < self.rows && col < self.columns);
        &self.cells[(row as usize) * (self.columns as usize) + col as usize]
    }
}

/// Builds classified grids from a shared classifier.
#[derive(Debug, Default)]
pub struct GridBuilder {
    classifier: PrimeClassifier,
}

impl GridBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produces the classified grid for the given dimensions.
    ///
    /// Dimension validation belongs to the config/CLI layer; by the time
    /// `build` runs, `rows` and `columns` are known positive.
    pub fn build(&self, rows: u32, columns: u32, base_offset: u64) -> Grid {
        let mut cells = Vec::with_capacity(rows as usize * columns as usize);
        for row in 0..rows {
            for col in 0..columns {
                let value =
                    (row as u64) * (columns as u64) + (col as u64) + base_offset;
                let tags = if self.classifier.is_prime(value) {
                    Some(self.classifier.classify(value))
                } else {
                    None
                };
                cells.push(Cell {
                    row,
                    col,
                    value,
                    tags,
                });
            }
        }
        let primes = cells.iter().filter(|c| c.is_prime()).count();
        debug!(
            "built {}x{} grid (offset {}): {} primes / {} cells",
            columns,
            rows,
            base_offset,
            primes,
            cells.len()
        );
        Grid {
            rows,
            columns,
            base_offset,
            cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn cell_count_matches_dimensions() {
        let grid = GridBuilder::new().build(4, 7, 2);
        assert_eq!(grid.cells().len(), 28);
    }

    #[test]
    fn values_start_at_base_offset_and_increase_row_major() {
        let grid = GridBuilder::new().build(3, 5, 2);
        assert_eq!(grid.cell(0, 0).value, 2);
        assert_eq!(grid.cell(0, 4).value, 6);
        assert_eq!(grid.cell(1, 0).value, 7);
        for pair in grid.cells().windows(2) {
            assert_eq!(pair[1].value, pair[0].value + 1);
        }
    }

    #[test]
    fn ten_by_ten_grid_has_26_primes() {
        // Values cover [2, 101]; there are 25 primes up to 100, plus 101.
        let grid = GridBuilder::new().build(10, 10, 2);
        let primes = grid.cells().iter().filter(|c| c.is_prime()).count();
        assert_eq!(primes, 26);
        let first = grid.cell(0, 0);
        assert_eq!(first.value, 2);
        assert!(first
            .tags
            .expect("2 is prime")
            .contains(TagSet::REGULAR));
    }

    #[test]
    fn composite_cells_carry_no_tags() {
        let grid = GridBuilder::new().build(1, 10, 2);
        // Value 4 sits at column 2.
        assert_eq!(grid.cell(0, 2).value, 4);
        assert!(grid.cell(0, 2).tags.is_none());
    }

    #[test]
    fn prime_tag_sets_are_never_empty() {
        let grid = GridBuilder::new().build(5, 5, 2);
        for cell in grid.cells() {
            if let Some(tags) = cell.tags {
                assert!(!tags.is_empty(), "prime {} with empty tags", cell.value);
            }
        }
    }
}
