use std::collections::VecDeque;

use crate::grid::{Cell, Direction, Grid};

/// Result of a single [`Snake::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// No heading yet, nothing moved.
    Idle,
    /// The head left a bounded grid. The body is unchanged.
    OutOfBounds,
    /// The head moved onto one of the snake's own segments.
    Bitten { head: Cell },
    /// The head moved to `head`; `vacated` is the released tail cell,
    /// `None` when the snake grew this step.
    Moved { head: Cell, vacated: Option<Cell> },
}

/// The player's snake. The head is the front of `body`.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Option<Direction>,
    next_direction: Option<Direction>,
    grow_pending: bool,
}

impl Snake {
    /// A one-segment snake with no heading.
    pub fn new(head: Cell) -> Self {
        Self {
            body: VecDeque::from([head]),
            direction: None,
            next_direction: None,
            grow_pending: false,
        }
    }

    pub fn head(&self) -> Cell {
        // body is never empty: construction seeds one cell and step pushes before popping
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Direction used by the last step.
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Direction the next step will take.
    pub fn heading(&self) -> Option<Direction> {
        self.next_direction.or(self.direction)
    }

    pub fn is_growing(&self) -> bool {
        self.grow_pending
    }

    /// Buffers `requested` for the next step. A reversal of the last
    /// stepped direction is refused while the snake is longer than one
    /// segment. Returns whether the request was accepted.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if self.len() > 1 && self.direction == Some(requested.opposite()) {
            return false;
        }
        self.next_direction = Some(requested);
        true
    }

    /// Keep the tail on the next step.
    pub fn grow(&mut self) {
        self.grow_pending = true;
    }

    /// Where the head would go on the next step, without moving.
    pub fn peek(&self, grid: &Grid) -> Option<Cell> {
        grid.advance(self.head(), self.heading()?)
    }

    pub fn step(&mut self, grid: &Grid) -> Step {
        let Some(direction) = self.heading() else {
            return Step::Idle;
        };
        self.direction = Some(direction);
        self.next_direction = None;

        let Some(head) = grid.advance(self.head(), direction) else {
            return Step::OutOfBounds;
        };

        self.body.push_front(head);
        let vacated = if self.grow_pending {
            self.grow_pending = false;
            None
        } else {
            self.body.pop_back()
        };

        // The tail is already gone, so moving into the cell it just left is safe.
        if self.body.iter().skip(1).any(|&segment| segment == head) {
            return Step::Bitten { head };
        }
        Step::Moved { head, vacated }
    }
}
