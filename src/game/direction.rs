use super::board::Bounds;
use ratatui::layout::Position;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Return the position one cell away from `pos` in this direction, or
    /// `None` if that would leave `bounds`.
    pub(crate) fn advance(self, pos: Position, bounds: Bounds) -> Option<Position> {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::North => y = y.checked_sub(1)?,
            Direction::East => x = x.checked_add(1).filter(|&x2| x2 < bounds.width)?,
            Direction::South => y = y.checked_add(1).filter(|&y2| y2 < bounds.height)?,
            Direction::West => x = x.checked_sub(1)?,
        }
        Some(Position { x, y })
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}
