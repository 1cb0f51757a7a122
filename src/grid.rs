use rand::Rng;
use serde::{Deserialize, Serialize};

/// A grid coordinate in cell units. `(0, 0)` is the top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Cell::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// What happens when the head leaves the playable area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryPolicy {
    /// Crossing an edge is fatal.
    Bounded,
    /// Crossing an edge re-enters at the opposite edge on the same row/column.
    WrapAround,
}

/// The playable area: `columns` x `rows` cells of `cell_size` pixels each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    columns: i32,
    rows: i32,
    cell_size: i32,
    policy: BoundaryPolicy,
}

impl Grid {
    pub fn new(columns: i32, rows: i32, cell_size: i32, policy: BoundaryPolicy) -> Self {
        Self {
            columns,
            rows,
            cell_size,
            policy,
        }
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    pub fn cell_count(&self) -> usize {
        (self.columns.max(0) as usize) * (self.rows.max(0) as usize)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.columns).contains(&cell.x) && (0..self.rows).contains(&cell.y)
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.columns / 2, self.rows / 2)
    }

    /// Uniformly random cell inside the grid.
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        Cell::new(rng.gen_range(0..self.columns), rng.gen_range(0..self.rows))
    }

    /// Moves `cell` one step in `direction` under the boundary policy.
    /// Returns `None` when a bounded grid's edge is crossed.
    pub fn advance(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        let next = cell.offset(direction);
        if self.contains(next) {
            return Some(next);
        }
        match self.policy {
            BoundaryPolicy::Bounded => None,
            BoundaryPolicy::WrapAround => Some(Cell::new(
                next.x.rem_euclid(self.columns),
                next.y.rem_euclid(self.rows),
            )),
        }
    }

    /// Row-major iteration over every cell.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.columns).map(move |x| Cell::new(x, y)))
    }

    /// Top-left pixel of `cell`, relative to the grid origin.
    pub fn to_pixels(&self, cell: Cell) -> (f32, f32) {
        (
            (cell.x * self.cell_size) as f32,
            (cell.y * self.cell_size) as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid(policy: BoundaryPolicy) -> Grid {
        Grid::new(10, 8, 20, policy)
    }

    #[test]
    fn test_contains_edges() {
        let g = grid(BoundaryPolicy::Bounded);
        assert!(g.contains(Cell::new(0, 0)));
        assert!(g.contains(Cell::new(9, 7)));
        assert!(!g.contains(Cell::new(10, 7)));
        assert!(!g.contains(Cell::new(-1, 0)));
        assert!(!g.contains(Cell::new(0, 8)));
    }

    #[test]
    fn test_wrap_right_edge_same_row() {
        let g = grid(BoundaryPolicy::WrapAround);
        assert_eq!(g.advance(Cell::new(9, 3), Direction::Right), Some(Cell::new(0, 3)));
        assert_eq!(g.advance(Cell::new(0, 3), Direction::Left), Some(Cell::new(9, 3)));
        assert_eq!(g.advance(Cell::new(4, 0), Direction::Up), Some(Cell::new(4, 7)));
        assert_eq!(g.advance(Cell::new(4, 7), Direction::Down), Some(Cell::new(4, 0)));
    }

    #[test]
    fn test_bounded_edge_is_fatal() {
        let g = grid(BoundaryPolicy::Bounded);
        assert_eq!(g.advance(Cell::new(9, 3), Direction::Right), None);
        assert_eq!(g.advance(Cell::new(0, 0), Direction::Up), None);
        assert_eq!(g.advance(Cell::new(5, 5), Direction::Up), Some(Cell::new(5, 4)));
    }

    #[test]
    fn test_random_cell_stays_inside() {
        let g = grid(BoundaryPolicy::Bounded);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            assert!(g.contains(g.random_cell(&mut rng)));
        }
    }

    #[test]
    fn test_cells_covers_grid_once() {
        let g = grid(BoundaryPolicy::Bounded);
        let cells: Vec<Cell> = g.cells().collect();
        assert_eq!(cells.len(), g.cell_count());
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[cells.len() - 1], Cell::new(9, 7));
    }

    #[test]
    fn test_opposite_directions() {
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_eq!(dir.opposite().opposite(), dir);
            let (dx, dy) = dir.delta();
            let (ox, oy) = dir.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }
}
