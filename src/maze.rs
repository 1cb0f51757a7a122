use std::collections::HashSet;

use rand::Rng;

use crate::grid::{Cell, Grid};

/// Distance in cells between neighbouring lanes.
const LANE_SPACING: i32 = 4;
/// Index of the first lane; lanes 0 and 1 would hug the top/left edge.
const FIRST_LANE: i32 = 2;

/// Places obstacle cells along vertical and horizontal lanes.
///
/// Level `n` gets `n + 1` vertical lanes and `n` horizontal lanes. Every
/// candidate cell on a lane (excluding the outermost row/column) is kept
/// independently with probability `density`.
#[derive(Debug, Clone)]
pub struct MazeGenerator {
    grid: Grid,
    density: f64,
}

impl MazeGenerator {
    pub fn new(grid: Grid, density: f64) -> Self {
        Self {
            grid,
            density: density.clamp(0.0, 1.0),
        }
    }

    /// Builds a fresh obstacle set for `level`. Nothing from earlier levels
    /// is reused.
    pub fn generate<R: Rng + ?Sized>(&self, level: u32, rng: &mut R) -> HashSet<Cell> {
        let mut obstacles = HashSet::new();
        let level = level as i32;

        for column in lanes(level + 1).take_while(|&x| x < self.grid.columns()) {
            for y in 1..self.grid.rows() - 1 {
                if rng.gen_bool(self.density) {
                    obstacles.insert(Cell::new(column, y));
                }
            }
        }

        for row in lanes(level).take_while(|&y| y < self.grid.rows()) {
            for x in 1..self.grid.columns() - 1 {
                if rng.gen_bool(self.density) {
                    obstacles.insert(Cell::new(x, row));
                }
            }
        }

        obstacles
    }
}

fn lanes(count: i32) -> impl Iterator<Item = i32> {
    (0..count.max(0)).map(|i| (i + FIRST_LANE) * LANE_SPACING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::BoundaryPolicy;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generator(density: f64) -> MazeGenerator {
        MazeGenerator::new(Grid::new(39, 29, 20, BoundaryPolicy::WrapAround), density)
    }

    #[test]
    fn test_full_density_fills_lanes() {
        let mut rng = StdRng::seed_from_u64(1);
        let obstacles = generator(1.0).generate(1, &mut rng);
        // Level 1: columns 8 and 12, row 8.
        assert!(obstacles.contains(&Cell::new(8, 1)));
        assert!(obstacles.contains(&Cell::new(12, 27)));
        assert!(obstacles.contains(&Cell::new(1, 8)));
        assert!(obstacles.contains(&Cell::new(37, 8)));
        assert!(!obstacles.contains(&Cell::new(8, 0)));
        assert!(!obstacles.contains(&Cell::new(8, 28)));
        assert!(!obstacles.contains(&Cell::new(16, 1)));
        // 2 columns * 27 + 1 row * 37, minus the 2 crossings.
        assert_eq!(obstacles.len(), 2 * 27 + 37 - 2);
    }

    #[test]
    fn test_zero_density_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generator(0.0).generate(4, &mut rng).is_empty());
    }

    #[test]
    fn test_each_call_rolls_a_fresh_set() {
        let mut rng = StdRng::seed_from_u64(7);
        let maze = generator(0.25);
        let first = maze.generate(1, &mut rng);
        let second = maze.generate(1, &mut rng);
        assert!(!first.is_empty());
        assert!(!second.is_superset(&first));
    }

    #[test]
    fn test_more_lanes_at_higher_levels() {
        let mut rng = StdRng::seed_from_u64(1);
        let low = generator(1.0).generate(1, &mut rng);
        let high = generator(1.0).generate(3, &mut rng);
        assert!(high.len() > low.len());
        assert!(high.contains(&Cell::new(20, 5)));
        assert!(high.contains(&Cell::new(5, 16)));
    }

    #[test]
    fn test_lanes_outside_grid_are_skipped() {
        let mut rng = StdRng::seed_from_u64(3);
        let g = Grid::new(39, 29, 20, BoundaryPolicy::Bounded);
        let obstacles = MazeGenerator::new(g, 1.0).generate(20, &mut rng);
        assert!(obstacles.iter().all(|cell| g.contains(*cell)));
    }

    #[test]
    fn test_partial_density_stays_on_lanes() {
        let mut rng = StdRng::seed_from_u64(11);
        let obstacles = generator(0.25).generate(2, &mut rng);
        assert!(!obstacles.is_empty());
        for cell in &obstacles {
            let on_column = cell.x % LANE_SPACING == 0 && cell.x >= 8 && cell.x <= 16;
            let on_row = cell.y % LANE_SPACING == 0 && cell.y >= 8 && cell.y <= 12;
            assert!(on_column || on_row, "{cell:?} is off-lane");
        }
    }
}
