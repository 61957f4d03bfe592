use super::direction::Direction;
use ratatui::layout::{Position, Positions, Rect, Size};

/// The dimensions of the playing field.  Valid positions are those in
/// `[0, width) × [0, height)`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Bounds {
    pub(crate) width: u16,
    pub(crate) height: u16,
}

impl Bounds {
    pub(crate) fn new(width: u16, height: u16) -> Bounds {
        Bounds { width, height }
    }

    pub(crate) fn size(self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    pub(crate) fn center(self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    /// Total number of cells in the grid
    pub(crate) fn area(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Return the cell one step from `pos` towards `direction`.  Stepping
    /// off an edge returns `None` when `walls` is true and otherwise comes
    /// back in on the opposite edge.
    pub(crate) fn step(self, pos: Position, direction: Direction, walls: bool) -> Option<Position> {
        let (dx, dy) = direction.offset();
        Some(Position::new(
            step_axis(pos.x, dx, self.width, walls)?,
            step_axis(pos.y, dy, self.height, walls)?,
        ))
    }

    /// Iterate over every position in the grid, row by row
    pub(crate) fn positions(self) -> Positions {
        Rect::from((Position::ORIGIN, self.size())).positions()
    }
}

fn step_axis(coord: u16, delta: i8, len: u16, walls: bool) -> Option<u16> {
    let len = i32::from(len);
    let moved = i32::from(coord) + i32::from(delta);
    if (0..len).contains(&moved) {
        u16::try_from(moved).ok()
    } else if walls || len == 0 {
        None
    } else {
        u16::try_from(moved.rem_euclid(len)).ok()
    }
}
