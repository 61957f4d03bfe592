use super::direction::Direction;
use super::grid::Bounds;
use crate::consts;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// The snake: where it is, where it's going, and how fast.
///
/// All positions are relative to the top-left corner of the grid.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Snake {
    /// The position of the snake's head
    pub(super) head: Position,

    /// The positions of all of the cells in the snake's body, with the tail
    /// at the front and the cell just behind the head at the end.
    pub(super) body: VecDeque<Position>,

    /// The number of cells (head included) that the snake should occupy.
    /// This is one more than the current length while growth is pending.
    pub(super) size: usize,

    /// The direction in which the snake is currently facing
    pub(super) direction: Direction,

    /// The direction in which the snake last moved
    pub(super) last_moved: Direction,

    /// Speed in cells per frame
    pub(super) speed: f64,

    pub(super) alive: bool,
}

impl Snake {
    /// Create a new snake with its head at `head`, facing in `direction`, with
    /// its body stretched out behind it up to a total length of
    /// [`INITIAL_SNAKE_LENGTH`][consts::INITIAL_SNAKE_LENGTH] (or less, if
    /// the grid edge gets in the way).
    pub(crate) fn new(head: Position, direction: Direction, bounds: Bounds) -> Snake {
        let behind = direction.reverse();
        let mut body = std::iter::successors(Some(head), |&p| bounds.step(p, behind, true))
            .skip(1)
            .take(consts::INITIAL_SNAKE_LENGTH - 1)
            .collect::<VecDeque<_>>();
        // Collected neck-first; the tail goes at the front.
        body.make_contiguous().reverse();
        Snake {
            head,
            size: body.len() + 1,
            body,
            direction,
            last_moved: direction,
            speed: consts::INITIAL_SPEED,
            alive: true,
        }
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Position {
        self.head
    }

    /// Return the positions of the cells in the snake's body, tail first
    pub(crate) fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    /// Return the number of cells currently occupied by the snake
    pub(crate) fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// Return the snake's target length, which includes any growth that
    /// will take effect on the next move
    pub(crate) fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn speed(&self) -> f64 {
        self.speed
    }

    pub(crate) fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    pub(crate) fn alive(&self) -> bool {
        self.alive
    }

    /// Return the glyph to use for drawing the snake's head
    pub(crate) fn head_symbol(&self) -> char {
        match self.direction {
            Direction::North => consts::SNAKE_HEAD_NORTH_SYMBOL,
            Direction::South => consts::SNAKE_HEAD_SOUTH_SYMBOL,
            Direction::East => consts::SNAKE_HEAD_EAST_SYMBOL,
            Direction::West => consts::SNAKE_HEAD_WEST_SYMBOL,
        }
    }

    /// Test whether any part of the snake is at `pos`
    pub(crate) fn occupies(&self, pos: Position) -> bool {
        self.head == pos || self.body.contains(&pos)
    }

    /// Change the snake's direction to `direction`.  Turning back onto the
    /// snake's own neck is ignored.
    pub(crate) fn turn(&mut self, direction: Direction) {
        if self.body.is_empty() || direction != self.last_moved.reverse() {
            self.direction = direction;
        }
    }

    /// Move the snake forwards one cell in the current direction within
    /// `bounds`.  If `walls` is true, running off the edge of the grid kills
    /// the snake; otherwise, the snake wraps around to the opposite edge.
    /// Running into the snake's own body also kills it.
    ///
    /// Returns whether the snake is still alive.
    pub(crate) fn advance(&mut self, bounds: Bounds, walls: bool) -> bool {
        if !self.alive {
            return false;
        }
        let Some(pos) = bounds.step(self.head, self.direction, walls) else {
            self.alive = false;
            return false;
        };
        self.body.push_back(self.head);
        self.head = pos;
        self.last_moved = self.direction;
        while self.body.len() >= self.size {
            let _ = self.body.pop_front();
        }
        if self.body.contains(&self.head) {
            self.alive = false;
        }
        self.alive
    }

    /// Lengthen the snake by one cell.  The new cell appears at the tail on
    /// the next move.
    pub(crate) fn grow(&mut self) {
        self.size += 1;
    }

    /// Shorten the snake by one cell, immediately dropping the end of its
    /// tail.  The snake never gets shorter than
    /// [`MIN_SNAKE_LENGTH`][consts::MIN_SNAKE_LENGTH].
    pub(crate) fn shrink(&mut self) {
        self.size = self
            .size
            .saturating_sub(1)
            .max(consts::MIN_SNAKE_LENGTH);
        while self.body.len() >= self.size {
            let _ = self.body.pop_front();
        }
    }
}
