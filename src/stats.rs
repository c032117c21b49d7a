// src/stats.rs

//! Summary statistics over a classified grid.
//!
//! Consumed by the CLI after rendering: total primes, prime density, image
//! dimensions, and a frequency count per *rendered* tag. Each prime cell is
//! counted once, under the tag its dot actually shows, so the distribution
//! sums to the number of prime cells.

use crate::classify::Tag;
use crate::grid::Grid;
use std::fmt;

/// Statistics for one visualization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub image_width: u32,
    pub image_height: u32,
    pub columns: u32,
    pub rows: u32,
    pub total_cells: usize,
    pub total_primes: usize,
    /// (tag, count) pairs with non-zero counts, sorted descending by count.
    pub tag_counts: Vec<(Tag, usize)>,
}

impl Summary {
    /// Tallies a grid rendered at the given dot size and spacing.
    pub fn from_grid(grid: &Grid, dot_size: u32, spacing: u32) -> Summary {
        let pitch = dot_size + spacing;
        let mut counts = [0usize; Tag::ALL.len()];
        let mut total_primes = 0usize;

        for cell in grid.cells() {
            let Some(tags) = cell.tags else { continue };
            total_primes += 1;
            if let Some(tag) = tags.dominant() {
                let slot = Tag::PRIORITY
                    .iter()
                    .position(|t| *t == tag)
                    .expect("dominant tag is in the priority list");
                counts[slot] += 1;
            }
        }

        let mut tag_counts: Vec<(Tag, usize)> = Tag::PRIORITY
            .iter()
            .copied()
            .zip(counts)
            .filter(|(_, count)| *count > 0)
            .collect();
        tag_counts.sort_by(|a, b| b.1.cmp(&a.1));

        Summary {
            image_width: grid.columns * pitch,
            image_height: grid.rows * pitch,
            columns: grid.columns,
            rows: grid.rows,
            total_cells: grid.cells().len(),
            total_primes,
            tag_counts,
        }
    }

    /// Prime cells as a percentage of all cells.
    pub fn density(&self) -> f64 {
        if self.total_cells == 0 {
            return 0.0;
        }
        self.total_primes as f64 / self.total_cells as f64 * 100.0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Image dimensions: {}x{} pixels",
            self.image_width, self.image_height
        )?;
        writeln!(f, "Grid size: {}x{}", self.columns, self.rows)?;
        writeln!(f, "Total primes: {}", self.total_primes)?;
        writeln!(f, "Prime density: {:.2}%", self.density())?;
        writeln!(f)?;
        writeln!(f, "Prime distribution:")?;
        for (tag, count) in &self.tag_counts {
            writeln!(f, "  {}: {}", tag, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridBuilder;
    use test_log::test;

    #[test]
    fn counts_sum_to_total_primes() {
        let grid = GridBuilder::new().build(10, 10, 2);
        let summary = Summary::from_grid(&grid, 8, 2);
        let sum: usize = summary.tag_counts.iter().map(|(_, n)| n).sum();
        assert_eq!(sum, summary.total_primes);
        assert_eq!(summary.total_primes, 26);
        assert_eq!(summary.total_cells, 100);
    }

    #[test]
    fn dimensions_match_the_renderer() {
        let grid = GridBuilder::new().build(3, 4, 2);
        let summary = Summary::from_grid(&grid, 8, 2);
        assert_eq!(summary.image_width, 40);
        assert_eq!(summary.image_height, 30);
    }

    #[test]
    fn density_is_a_percentage() {
        let grid = GridBuilder::new().build(10, 10, 2);
        let summary = Summary::from_grid(&grid, 8, 2);
        assert!((summary.density() - 26.0).abs() < 1e-9);
    }

    #[test]
    fn counts_are_sorted_descending() {
        let grid = GridBuilder::new().build(10, 10, 2);
        let summary = Summary::from_grid(&grid, 8, 2);
        for pair in summary.tag_counts.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
    }
}
