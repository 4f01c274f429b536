use super::board::Bounds;
use super::direction::Direction;
use crate::consts;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// The snake: its segments and the direction it is heading
///
/// All positions are relative to the top-left corner of the grid.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The positions of all of the snake's segments, head first
    pub(super) segments: VecDeque<Position>,

    /// The direction in which the snake is currently facing
    pub(super) direction: Direction,
}

impl Snake {
    /// Create a new snake from its segments (head first) facing in
    /// `direction`.
    ///
    /// # Panics
    ///
    /// Panics if `segments` is empty.
    pub(super) fn new<I: IntoIterator<Item = Position>>(segments: I, direction: Direction) -> Snake {
        let segments = VecDeque::from_iter(segments);
        assert!(!segments.is_empty(), "a snake needs at least one segment");
        Snake {
            segments,
            direction,
        }
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Position {
        self.segments[0]
    }

    /// Return the positions of all segments, head first
    pub(crate) fn segments(&self) -> &VecDeque<Position> {
        &self.segments
    }

    pub(crate) fn len(&self) -> usize {
        self.segments.len()
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

    /// Change the snake's direction to `direction` unless that would reverse
    /// it onto itself.  Returns whether the direction was accepted.
    pub(super) fn turn(&mut self, direction: Direction) -> bool {
        if direction == self.direction.reverse() {
            false
        } else {
            self.direction = direction;
            true
        }
    }

    /// Return the cell the head will move into next, or `None` if that would
    /// leave `bounds`
    pub(super) fn next_head(&self, bounds: Bounds) -> Option<Position> {
        self.direction.advance(self.head(), bounds)
    }

    /// Would moving the head to `pos` run into the body?  The tail cell only
    /// counts when `growing`, since otherwise it is vacated by the same move.
    pub(super) fn bites(&self, pos: Position, growing: bool) -> bool {
        let keep = if growing {
            self.segments.len()
        } else {
            self.segments.len() - 1
        };
        self.segments.iter().take(keep).any(|&p| p == pos)
    }

    /// Move the head to `pos`.  The tail stays put if `grow` is true.
    pub(super) fn advance(&mut self, pos: Position, grow: bool) {
        self.segments.push_front(pos);
        if !grow {
            let _ = self.segments.pop_back();
        }
    }
}
