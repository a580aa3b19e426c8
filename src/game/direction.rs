#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Direction {
    Left,
    Right,
    /// Towards row 0
    Up,
    Down,
    /// Deeper along the z axis; only exists on 3D boards
    Forward,
    Backward,
}

impl Direction {
    #[cfg(test)]
    pub(crate) const ALL: [Direction; 6] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
        Direction::Forward,
        Direction::Backward,
    ];

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// Index of the coordinate that moving in this direction changes
    pub(crate) fn axis(self) -> usize {
        match self {
            Direction::Left | Direction::Right => 0,
            Direction::Up | Direction::Down => 1,
            Direction::Forward | Direction::Backward => 2,
        }
    }

    /// The amount by which moving in this direction changes the coordinate on
    /// [`axis()`][Direction::axis]
    pub(crate) fn sign(self) -> i32 {
        match self {
            Direction::Right | Direction::Down | Direction::Forward => 1,
            Direction::Left | Direction::Up | Direction::Backward => -1,
        }
    }
}
