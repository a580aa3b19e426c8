use super::direction::Direction;
use std::fmt;

/// A cell on a `D`-dimensional board.  Coordinates outside the board are
/// representable so that a move off the edge can be detected.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Point<const D: usize>([i32; D]);

impl<const D: usize> Point<D> {
    pub(crate) const fn new(coords: [i32; D]) -> Self {
        Point(coords)
    }

    /// Return the point with every coordinate equal to `value`
    pub(crate) const fn splat(value: i32) -> Self {
        Point([value; D])
    }

    pub(crate) fn coords(self) -> [i32; D] {
        self.0
    }

    /// Return the neighboring point one step in `direction`.  Directions
    /// along an axis the board doesn't have leave the point unchanged.
    pub(crate) fn step(self, direction: Direction) -> Self {
        let mut coords = self.0;
        if let Some(c) = coords.get_mut(direction.axis()) {
            *c = c.saturating_add(direction.sign());
        }
        Point(coords)
    }

    /// Test whether every coordinate lies in `0..size`
    pub(crate) fn within(self, size: i32) -> bool {
        self.0.iter().all(|c| (0..size).contains(c))
    }
}

impl<const D: usize> fmt::Display for Point<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}
