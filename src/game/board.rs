use super::direction::Direction;
use super::snake::Snake;
use crate::consts;
use ratatui::layout::{Position, Positions, Rect, Size};
use thiserror::Error;

/// The dimensions of the grid the snake lives on
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Bounds {
    pub(crate) width: u16,
    pub(crate) height: u16,
}

impl Bounds {
    pub(crate) fn size(self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// Iterate over every cell of the grid, row by row
    pub(crate) fn positions(self) -> Positions {
        Rect::from((Position::ORIGIN, self.size())).positions()
    }

    pub(crate) fn contains(self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub(crate) fn area(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    pub(crate) fn center(self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }
}

impl From<Size> for Bounds {
    fn from(size: Size) -> Bounds {
        Bounds {
            width: size.width,
            height: size.height,
        }
    }
}

/// The fixed parameters of a game: where the snake starts, how long it is,
/// and how much food is worth.  Restarting a game reuses its rules.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Rules {
    bounds: Bounds,
    start: Position,
    direction: Direction,
    initial_length: usize,
    food_reward: u32,
}

impl Rules {
    /// Validate & construct a set of rules.  The snake's initial body is laid
    /// out behind `start` (opposite to `direction`) and must fit on the grid,
    /// with at least one cell left over for food.
    pub(crate) fn new(
        bounds: Bounds,
        start: Position,
        direction: Direction,
        initial_length: usize,
        food_reward: u32,
    ) -> Result<Rules, RulesError> {
        if bounds.width < 2 || bounds.height < 1 {
            return Err(RulesError::GridTooSmall(bounds.size()));
        }
        if initial_length == 0 {
            return Err(RulesError::ZeroLength);
        }
        if !bounds.contains(start) {
            return Err(RulesError::StartOutside(start));
        }
        if initial_length >= bounds.area() {
            return Err(RulesError::NoRoomForFood);
        }
        let rules = Rules {
            bounds,
            start,
            direction,
            initial_length,
            food_reward,
        };
        if rules.initial_body().count() < initial_length {
            return Err(RulesError::BodyDoesNotFit(initial_length));
        }
        Ok(rules)
    }

    pub(crate) fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub(crate) fn initial_length(&self) -> usize {
        self.initial_length
    }

    pub(crate) fn food_reward(&self) -> u32 {
        self.food_reward
    }

    /// Construct the snake a game starts with
    pub(super) fn new_snake(&self) -> Snake {
        Snake::new(self.initial_body(), self.direction)
    }

    fn initial_body(&self) -> impl Iterator<Item = Position> {
        let behind = self.direction.reverse();
        let bounds = self.bounds;
        std::iter::successors(Some(self.start), move |&p| behind.advance(p, bounds))
            .take(self.initial_length)
    }
}

impl Default for Rules {
    fn default() -> Rules {
        let bounds = Bounds {
            width: consts::DEFAULT_GRID_WIDTH,
            height: consts::DEFAULT_GRID_HEIGHT,
        };
        Rules {
            bounds,
            start: bounds.center(),
            direction: Direction::East,
            initial_length: consts::INITIAL_SNAKE_LENGTH,
            food_reward: consts::FOOD_REWARD,
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum RulesError {
    #[error("grid size {0} is too small; it must be at least 2x1")]
    GridTooSmall(Size),
    #[error("initial snake length must be at least 1")]
    ZeroLength,
    #[error("start position {0} is outside the grid")]
    StartOutside(Position),
    #[error("initial snake of length {0} does not fit behind the start position")]
    BodyDoesNotFit(usize),
    #[error("grid has no room for food next to the initial snake")]
    NoRoomForFood,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn bounds(width: u16, height: u16) -> Bounds {
        Bounds { width, height }
    }

    #[test]
    fn default_rules_are_valid() {
        let dflt = Rules::default();
        let rules = Rules::new(
            dflt.bounds,
            dflt.start,
            dflt.direction,
            dflt.initial_length,
            dflt.food_reward,
        );
        assert_eq!(rules, Ok(dflt));
    }

    #[test]
    fn initial_snake_trails_behind_start() {
        let rules = Rules::new(
            bounds(20, 20),
            Position::new(10, 10),
            Direction::East,
            3,
            10,
        )
        .unwrap();
        let snake = rules.new_snake();
        assert_eq!(
            snake.segments().iter().copied().collect::<Vec<_>>(),
            [
                Position::new(10, 10),
                Position::new(9, 10),
                Position::new(8, 10)
            ]
        );
        assert_eq!(snake.direction, Direction::East);
    }

    #[rstest]
    #[case(bounds(1, 5), Position::new(0, 0), 1, RulesError::GridTooSmall(Size::new(1, 5)))]
    #[case(bounds(4, 0), Position::new(0, 0), 1, RulesError::GridTooSmall(Size::new(4, 0)))]
    #[case(bounds(10, 10), Position::new(5, 5), 0, RulesError::ZeroLength)]
    #[case(bounds(10, 10), Position::new(10, 5), 1, RulesError::StartOutside(Position::new(10, 5)))]
    #[case(bounds(3, 1), Position::new(2, 0), 3, RulesError::NoRoomForFood)]
    #[case(bounds(10, 10), Position::new(2, 5), 4, RulesError::BodyDoesNotFit(4))]
    fn invalid_rules(
        #[case] b: Bounds,
        #[case] start: Position,
        #[case] len: usize,
        #[case] err: RulesError,
    ) {
        assert_eq!(Rules::new(b, start, Direction::East, len, 10), Err(err));
    }

    #[rstest]
    #[case(bounds(20, 20))]
    #[case(bounds(79, 5))]
    #[case(bounds(200, 100))]
    fn grids_larger_than_the_display_are_valid(#[case] b: Bounds) {
        let rules = Rules::new(b, Position::new(10, 2), Direction::East, 3, 10).unwrap();
        assert_eq!(rules.bounds(), b);
    }

    #[test]
    fn positions_cover_grid() {
        let b = bounds(3, 2);
        assert_eq!(b.positions().count(), b.area());
        assert!(b.positions().all(|p| b.contains(p)));
    }
}
