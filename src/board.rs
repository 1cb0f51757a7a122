use std::collections::{HashMap, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::grid::{Cell, Grid};

/// Random samples tried before falling back to the free-cell index.
const FOOD_ATTEMPTS: usize = 64;

/// Cells not covered by the snake or an obstacle.
///
/// Kept as a dense vector plus a position map so membership, insertion,
/// removal and uniform sampling are all O(1).
#[derive(Debug, Clone, Default)]
pub struct FreeCells {
    cells: Vec<Cell>,
    index: HashMap<Cell, usize>,
}

impl FreeCells {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.index.contains_key(&cell)
    }

    pub fn insert(&mut self, cell: Cell) {
        if self.index.contains_key(&cell) {
            return;
        }
        self.index.insert(cell, self.cells.len());
        self.cells.push(cell);
    }

    pub fn remove(&mut self, cell: Cell) {
        let Some(slot) = self.index.remove(&cell) else {
            return;
        };
        self.cells.swap_remove(slot);
        if let Some(&moved) = self.cells.get(slot) {
            self.index.insert(moved, slot);
        }
    }

    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Cell> {
        self.cells.choose(rng).copied()
    }

    fn clear(&mut self) {
        self.cells.clear();
        self.index.clear();
    }
}

/// Everything on the grid that is not the snake: obstacles, the food
/// cell and the free-cell index.
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    obstacles: HashSet<Cell>,
    food: Option<Cell>,
    free: FreeCells,
}

impl Board {
    /// An obstacle-free board; `occupied` are the snake's cells.
    pub fn new(grid: Grid, occupied: impl IntoIterator<Item = Cell>) -> Self {
        let mut board = Self {
            grid,
            obstacles: HashSet::new(),
            food: None,
            free: FreeCells::default(),
        };
        board.rebuild(occupied);
        board
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn obstacles(&self) -> &HashSet<Cell> {
        &self.obstacles
    }

    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.obstacles.contains(&cell)
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn free_cells(&self) -> &FreeCells {
        &self.free
    }

    /// Swaps in a new obstacle set and re-derives the free cells.
    pub fn set_obstacles(
        &mut self,
        obstacles: HashSet<Cell>,
        occupied: impl IntoIterator<Item = Cell>,
    ) {
        self.obstacles = obstacles;
        self.rebuild(occupied);
    }

    /// The snake entered `cell`.
    pub fn occupy(&mut self, cell: Cell) {
        self.free.remove(cell);
    }

    /// The snake left `cell`.
    pub fn release(&mut self, cell: Cell) {
        if self.grid.contains(cell) && !self.is_obstacle(cell) {
            self.free.insert(cell);
        }
    }

    /// Puts the food on `cell` if it is free.
    pub fn put_food(&mut self, cell: Cell) -> bool {
        if !self.free.contains(cell) {
            return false;
        }
        self.food = Some(cell);
        true
    }

    /// Moves the food to a random free cell. Samples the grid a bounded
    /// number of times, then picks straight from the free-cell index.
    /// Leaves the board without food if no cell is free.
    pub fn place_food<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Cell> {
        let sampled = (0..FOOD_ATTEMPTS)
            .map(|_| self.grid.random_cell(rng))
            .find(|&cell| self.free.contains(cell));
        self.food = match sampled {
            Some(cell) => Some(cell),
            None => {
                debug!(free = self.free.len(), "food sampling exhausted, using free-cell index");
                self.free.choose(rng)
            }
        };
        if self.food.is_none() {
            warn!("no free cell left for food");
        }
        self.food
    }

    fn rebuild(&mut self, occupied: impl IntoIterator<Item = Cell>) {
        self.free.clear();
        for cell in self.grid.cells() {
            if !self.obstacles.contains(&cell) {
                self.free.insert(cell);
            }
        }
        for cell in occupied {
            self.free.remove(cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::BoundaryPolicy;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid(columns: i32, rows: i32) -> Grid {
        Grid::new(columns, rows, 20, BoundaryPolicy::WrapAround)
    }

    #[test]
    fn test_free_cells_swap_remove_keeps_index() {
        let mut free = FreeCells::default();
        for x in 0..5 {
            free.insert(Cell::new(x, 0));
        }
        free.remove(Cell::new(1, 0));
        free.remove(Cell::new(4, 0));
        assert_eq!(free.len(), 3);
        assert!(!free.contains(Cell::new(1, 0)));
        for x in [0, 2, 3] {
            assert!(free.contains(Cell::new(x, 0)));
        }
        free.remove(Cell::new(3, 0));
        free.insert(Cell::new(1, 0));
        assert_eq!(free.len(), 3);
        assert!(free.contains(Cell::new(1, 0)));
    }

    #[test]
    fn test_new_board_excludes_snake() {
        let board = Board::new(grid(4, 4), [Cell::new(1, 1), Cell::new(2, 1)]);
        assert_eq!(board.free_cells().len(), 14);
        assert!(!board.free_cells().contains(Cell::new(1, 1)));
    }

    #[test]
    fn test_release_skips_obstacles() {
        let mut board = Board::new(grid(4, 4), [Cell::new(0, 0)]);
        board.set_obstacles(HashSet::from([Cell::new(0, 0), Cell::new(3, 3)]), [Cell::new(0, 0)]);
        board.release(Cell::new(0, 0));
        assert!(!board.free_cells().contains(Cell::new(0, 0)));
        assert_eq!(board.free_cells().len(), 14);
    }

    #[test]
    fn test_food_avoids_snake_and_obstacles() {
        let mut rng = StdRng::seed_from_u64(5);
        let g = grid(6, 6);
        let snake: Vec<Cell> = (0..6).map(|x| Cell::new(x, 0)).collect();
        let obstacles: HashSet<Cell> = (0..6).map(|x| Cell::new(x, 1)).collect();
        let mut board = Board::new(g, snake.clone());
        board.set_obstacles(obstacles.clone(), snake.clone());
        for _ in 0..200 {
            let food = board.place_food(&mut rng).unwrap();
            assert!(!snake.contains(&food));
            assert!(!obstacles.contains(&food));
        }
    }

    #[test]
    fn test_single_free_cell_found_by_fallback() {
        let mut rng = StdRng::seed_from_u64(9);
        let g = grid(30, 30);
        let last = Cell::new(17, 23);
        let occupied: Vec<Cell> = g.cells().filter(|&c| c != last).collect();
        let mut board = Board::new(g, occupied);
        assert_eq!(board.place_food(&mut rng), Some(last));
    }

    #[test]
    fn test_full_board_has_no_food() {
        let mut rng = StdRng::seed_from_u64(9);
        let g = grid(3, 3);
        let mut board = Board::new(g, g.cells().collect::<Vec<_>>());
        assert_eq!(board.place_food(&mut rng), None);
        assert_eq!(board.food(), None);
    }

    #[test]
    fn test_put_food_requires_free_cell() {
        let mut board = Board::new(grid(4, 4), [Cell::new(2, 2)]);
        assert!(!board.put_food(Cell::new(2, 2)));
        assert!(board.put_food(Cell::new(3, 2)));
        assert_eq!(board.food(), Some(Cell::new(3, 2)));
    }
}
