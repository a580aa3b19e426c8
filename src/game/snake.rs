use super::direction::Direction;
use super::point::Point;
use std::collections::VecDeque;

/// A snake on a `D`-dimensional board
///
/// The head is kept apart from the rest of the body so that a snake always
/// has at least one cell.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake<const D: usize> {
    /// The position of the snake's head
    pub(super) head: Point<D>,

    /// The positions of the remaining cells, nearest the head first
    pub(super) body: VecDeque<Point<D>>,

    /// The direction in which the snake is currently moving
    pub(super) direction: Direction,

    /// How many more ticks the tail should stay put
    pub(super) grow_count: usize,
}

impl<const D: usize> Snake<D> {
    /// Create a one-cell snake at `head` facing in `direction` that will
    /// grow by `grow_count` cells over its first ticks
    pub(super) fn new(head: Point<D>, direction: Direction, grow_count: usize) -> Snake<D> {
        Snake {
            head,
            body: VecDeque::new(),
            direction,
            grow_count,
        }
    }

    pub(crate) fn head(&self) -> Point<D> {
        self.head
    }

    /// Return the cells behind the head, nearest first
    pub(crate) fn body(&self) -> &VecDeque<Point<D>> {
        &self.body
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of cells including the head
    pub(crate) fn len(&self) -> usize {
        self.body.len() + 1
    }

    pub(crate) fn occupies(&self, pos: Point<D>) -> bool {
        self.head == pos || self.body.contains(&pos)
    }

    /// Change direction unless `direction` would reverse the snake onto
    /// itself or leave the board's dimensions.  Returns whether the turn was
    /// taken.
    pub(super) fn turn(&mut self, direction: Direction) -> bool {
        if direction.axis() >= D || direction == self.direction.reverse() {
            return false;
        }
        self.direction = direction;
        true
    }

    /// The cell the head will move into on the next tick
    pub(super) fn next_head(&self) -> Point<D> {
        self.head.step(self.direction)
    }

    /// Move the head to `pos`, leaving the old head as the first body cell
    pub(super) fn push_head(&mut self, pos: Point<D>) {
        self.body.push_front(self.head);
        self.head = pos;
    }

    pub(super) fn grow(&mut self) {
        self.grow_count += 1;
    }

    /// Finish a move: consume one unit of pending growth, or drop the tail
    /// if there is none
    pub(super) fn settle(&mut self) {
        if self.grow_count > 0 {
            self.grow_count -= 1;
        } else {
            let _ = self.body.pop_back();
        }
    }
}
