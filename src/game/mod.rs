mod board;
mod direction;
mod pace;
mod paused;
mod scene;
mod snake;
pub(crate) use self::board::{Bounds, Rules, RulesError};
pub(crate) use self::direction::Direction;
pub(crate) use self::pace::{Pace, PaceError};
pub(crate) use self::scene::Scene;
use self::snake::Snake;
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::Position;
use std::collections::HashSet;

/// The state of a single game of snake: the snake, the food, the score, and
/// where the game is in its lifecycle.
///
/// Nothing in here performs I/O or waits; the caller decides when to
/// [`tick`][Game::tick] and what to do with the returned [`TickEvent`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    rules: Rules,
    snake: Snake,
    food: Option<Position>,
    score: u32,
    high_score: u32,
    /// Whether the most recent game over set a new high score
    record: bool,
    state: GameState,
}

impl<R: Rng> Game<R> {
    pub(crate) fn new(rules: Rules, high_score: u32, rng: R) -> Game<R> {
        let mut game = Game {
            rng,
            rules,
            snake: rules.new_snake(),
            food: None,
            score: 0,
            high_score,
            record: false,
            state: GameState::Running,
        };
        game.place_food();
        game
    }

    /// Advance the game by one step, steering towards `request` first if
    /// given.  Does nothing unless the game is running.
    pub(crate) fn tick(&mut self, request: Option<Direction>) -> TickEvent {
        if !self.running() {
            return TickEvent::Idle;
        }
        if let Some(d) = request {
            let _ = self.snake.turn(d);
        }
        let Some(next) = self.snake.next_head(self.rules.bounds()) else {
            return self.game_over(Cause::Wall);
        };
        let eating = Some(next) == self.food;
        if self.snake.bites(next, eating) {
            return self.game_over(Cause::SelfCollision);
        }
        self.snake.advance(next, eating);
        if eating {
            self.score = self.score.saturating_add(self.rules.food_reward());
            if self.place_food() {
                TickEvent::Ate
            } else {
                self.game_over(Cause::BoardFull)
            }
        } else {
            TickEvent::Moved
        }
    }

    /// Apply a pause, resume, or restart request.  Returns `true` if the
    /// request changed the game's state.
    pub(crate) fn control(&mut self, control: Control) -> bool {
        match (control, self.state) {
            (Control::Pause, GameState::Running) => self.state = GameState::Paused,
            (Control::Resume, GameState::Paused) => self.state = GameState::Running,
            (Control::Restart, GameState::GameOver(_)) => self.restart(),
            _ => return false,
        }
        true
    }

    fn restart(&mut self) {
        self.high_score = self.high_score.max(self.score);
        self.snake = self.rules.new_snake();
        self.score = 0;
        self.record = false;
        self.state = GameState::Running;
        self.food = None;
        let _ = self.place_food();
    }

    /// Move the food to a random unoccupied cell.  Returns `false` if every
    /// cell is occupied by the snake, in which case there is no food.
    fn place_food(&mut self) -> bool {
        let occupied = self
            .snake
            .segments()
            .iter()
            .copied()
            .collect::<HashSet<_>>();
        self.food = self
            .rules
            .bounds()
            .positions()
            .filter(|p| !occupied.contains(p))
            .choose(&mut self.rng);
        log::debug!("Placed food at {:?}", self.food);
        self.food.is_some()
    }
}

impl<R> Game<R> {
    fn game_over(&mut self, cause: Cause) -> TickEvent {
        self.state = GameState::GameOver(cause);
        self.record = self.score > self.high_score;
        self.high_score = self.high_score.max(self.score);
        TickEvent::GameOver {
            cause,
            score: self.score,
            record: self.record.then_some(self.high_score),
        }
    }

    pub(crate) fn state(&self) -> GameState {
        self.state
    }

    pub(crate) fn running(&self) -> bool {
        self.state == GameState::Running
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn high_score(&self) -> u32 {
        self.high_score
    }

    pub(crate) fn rules(&self) -> &Rules {
        &self.rules
    }

    pub(crate) fn snake_len(&self) -> usize {
        self.snake.len()
    }

    /// Return a snapshot of everything needed to draw the game
    pub(crate) fn scene(&self) -> Scene<'_> {
        Scene {
            segments: self.snake.segments(),
            head_symbol: self.snake.head_symbol(),
            food: self.food,
            score: self.score,
            high_score: self.high_score,
            record: self.record,
            state: self.state,
            bounds: self.rules.bounds(),
            hint: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameState {
    Running,
    Paused,
    GameOver(Cause),
}

/// Why a game ended
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Cause {
    /// The snake tried to move off the grid
    Wall,
    /// The snake ran into its own body
    SelfCollision,
    /// The snake has filled the grid and there is nowhere left to put food
    BoardFull,
}

impl Cause {
    pub(crate) fn describe(self) -> &'static str {
        match self {
            Cause::Wall => "wall collision",
            Cause::SelfCollision => "self collision",
            Cause::BoardFull => "board full",
        }
    }
}

/// Requests that move a game between states
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Control {
    Pause,
    Resume,
    Restart,
}

/// What happened during a call to [`Game::tick()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TickEvent {
    /// The game is not running, so nothing happened
    Idle,
    /// The snake moved without eating
    Moved,
    /// The snake ate the food and grew
    Ate,
    /// The game just ended.  `record` is the new high score if `score` beat
    /// the previous one.
    GameOver {
        cause: Cause,
        score: u32,
        record: Option<u32>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::collections::VecDeque;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn rules(width: u16, height: u16, start: Position, direction: Direction, len: usize) -> Rules {
        Rules::new(Bounds { width, height }, start, direction, len, 10).unwrap()
    }

    fn new_game(rules: Rules) -> Game<ChaCha12Rng> {
        Game::new(rules, 0, ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    fn scenario_game() -> Game<ChaCha12Rng> {
        let mut game = new_game(rules(20, 20, Position::new(10, 10), Direction::East, 3));
        game.food = Some(Position::new(15, 10));
        game
    }

    #[test]
    fn eat_food_after_five_ticks() {
        let mut game = scenario_game();
        for i in 11..15 {
            assert_eq!(game.tick(None), TickEvent::Moved);
            assert_eq!(game.snake.head(), Position::new(i, 10));
            assert_eq!(game.snake_len(), 3);
            assert_eq!(game.score(), 0);
        }
        assert_eq!(game.tick(None), TickEvent::Ate);
        assert_eq!(game.snake.head(), Position::new(15, 10));
        assert_eq!(game.score(), 10);
        assert_eq!(game.snake_len(), 4);
        let food = game.food.unwrap();
        assert!(![
            Position::new(11, 10),
            Position::new(12, 10),
            Position::new(13, 10),
            Position::new(14, 10),
            Position::new(15, 10)
        ]
        .contains(&food));
        assert!(!game.snake.segments().contains(&food));
        assert!(game.rules.bounds().contains(food));
    }

    #[test]
    fn wall_collision_at_origin() {
        let mut game = new_game(rules(20, 20, Position::new(0, 0), Direction::West, 1));
        game.food = Some(Position::new(5, 5));
        assert_eq!(
            game.tick(None),
            TickEvent::GameOver {
                cause: Cause::Wall,
                score: 0,
                record: None
            }
        );
        assert_eq!(game.state(), GameState::GameOver(Cause::Wall));
        assert_eq!(game.snake.segments(), &VecDeque::from([Position::new(0, 0)]));
    }

    #[test]
    fn reverse_request_is_ignored() {
        let mut game = scenario_game();
        assert_eq!(game.tick(Some(Direction::West)), TickEvent::Moved);
        assert_eq!(game.snake.direction, Direction::East);
        assert_eq!(game.snake.head(), Position::new(11, 10));
    }

    #[test]
    fn turn_moves_head_one_cell() {
        let mut game = scenario_game();
        assert_eq!(game.tick(Some(Direction::North)), TickEvent::Moved);
        assert_eq!(game.snake.head(), Position::new(10, 9));
        assert_eq!(game.tick(Some(Direction::West)), TickEvent::Moved);
        assert_eq!(game.snake.head(), Position::new(9, 9));
        assert_eq!(game.tick(None), TickEvent::Moved);
        assert_eq!(game.snake.head(), Position::new(8, 9));
    }

    #[test]
    fn length_only_grows_on_food() {
        let mut game = new_game(rules(8, 8, Position::new(4, 4), Direction::East, 2));
        let steering = [
            Direction::North,
            Direction::West,
            Direction::South,
            Direction::East,
        ];
        for i in 0..64 {
            if !game.running() {
                break;
            }
            let before = game.snake_len();
            let head = game.snake.head();
            let food = game.food;
            let dir = steering[(i / 3) % steering.len()];
            match game.tick(Some(dir)) {
                TickEvent::Moved => {
                    assert_eq!(game.snake_len(), before);
                    assert_ne!(Some(game.snake.head()), food);
                }
                TickEvent::Ate => {
                    assert_eq!(game.snake_len(), before + 1);
                    assert_eq!(Some(game.snake.head()), food);
                }
                TickEvent::GameOver { .. } => {
                    assert_eq!(game.snake.head(), head);
                    assert_eq!(game.snake_len(), before);
                }
                TickEvent::Idle => panic!("running game should not idle"),
            }
            if let Some(f) = game.food {
                assert!(!game.snake.segments().contains(&f));
            }
        }
    }

    #[test]
    fn self_collision() {
        let mut game = new_game(rules(10, 10, Position::new(5, 5), Direction::East, 1));
        game.snake.segments = VecDeque::from([
            Position::new(5, 5),
            Position::new(5, 6),
            Position::new(6, 6),
            Position::new(6, 5),
            Position::new(6, 4),
        ]);
        game.snake.direction = Direction::North;
        game.food = Some(Position::new(0, 0));
        assert_eq!(
            game.tick(Some(Direction::East)),
            TickEvent::GameOver {
                cause: Cause::SelfCollision,
                score: 0,
                record: None
            }
        );
        assert_eq!(game.snake.head(), Position::new(5, 5));
    }

    #[test]
    fn chasing_own_tail_is_safe() {
        let mut game = new_game(rules(10, 10, Position::new(5, 5), Direction::East, 1));
        game.snake.segments = VecDeque::from([
            Position::new(5, 5),
            Position::new(5, 6),
            Position::new(6, 6),
            Position::new(6, 5),
        ]);
        game.snake.direction = Direction::North;
        game.food = Some(Position::new(0, 0));
        assert_eq!(game.tick(Some(Direction::East)), TickEvent::Moved);
        assert_eq!(game.snake.head(), Position::new(6, 5));
        assert_eq!(game.snake_len(), 4);
    }

    #[test]
    fn eating_into_tail_is_fatal() {
        let mut game = new_game(rules(10, 10, Position::new(5, 5), Direction::East, 1));
        game.snake.segments = VecDeque::from([
            Position::new(5, 5),
            Position::new(5, 6),
            Position::new(6, 6),
            Position::new(6, 5),
        ]);
        game.snake.direction = Direction::North;
        game.food = Some(Position::new(6, 5));
        assert!(matches!(
            game.tick(Some(Direction::East)),
            TickEvent::GameOver {
                cause: Cause::SelfCollision,
                ..
            }
        ));
    }

    #[test]
    fn board_full() {
        let mut game = new_game(rules(2, 1, Position::new(0, 0), Direction::East, 1));
        assert_eq!(game.food, Some(Position::new(1, 0)));
        game.score = 30;
        assert_eq!(
            game.tick(None),
            TickEvent::GameOver {
                cause: Cause::BoardFull,
                score: 40,
                record: Some(40)
            }
        );
        assert_eq!(game.food, None);
        assert_eq!(game.snake_len(), 2);
        assert_eq!(game.high_score(), 40);
    }

    #[test]
    fn pause_and_resume() {
        let mut game = scenario_game();
        assert!(!game.control(Control::Resume));
        assert!(!game.control(Control::Restart));
        assert!(game.control(Control::Pause));
        assert_eq!(game.state(), GameState::Paused);
        assert!(!game.control(Control::Pause));
        assert!(!game.control(Control::Restart));
        let before = game.clone();
        assert_eq!(game.tick(Some(Direction::North)), TickEvent::Idle);
        assert_eq!(game, before);
        assert!(game.control(Control::Resume));
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.tick(None), TickEvent::Moved);
    }

    #[test]
    fn game_over_ignores_everything_but_restart() {
        let mut game = new_game(rules(20, 20, Position::new(0, 0), Direction::West, 1));
        let _ = game.tick(None);
        let before = game.clone();
        assert!(!game.control(Control::Pause));
        assert!(!game.control(Control::Resume));
        assert_eq!(game.tick(Some(Direction::East)), TickEvent::Idle);
        assert_eq!(game, before);
        assert!(game.control(Control::Restart));
        assert_eq!(game.state(), GameState::Running);
    }

    #[test]
    fn high_score_is_max_of_scores() {
        let mut game = Game::new(
            rules(20, 20, Position::new(10, 10), Direction::East, 3),
            25,
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        );
        game.food = Some(Position::new(11, 10));
        assert_eq!(game.tick(None), TickEvent::Ate);
        game.snake.direction = Direction::North;
        game.snake.segments = VecDeque::from([Position::new(3, 0)]);
        assert_eq!(
            game.tick(None),
            TickEvent::GameOver {
                cause: Cause::Wall,
                score: 10,
                record: None
            }
        );
        assert_eq!(game.high_score(), 25);
        assert!(!game.scene().record);

        assert!(game.control(Control::Restart));
        game.score = 30;
        game.snake.direction = Direction::North;
        game.snake.segments = VecDeque::from([Position::new(3, 0)]);
        assert_eq!(
            game.tick(None),
            TickEvent::GameOver {
                cause: Cause::Wall,
                score: 30,
                record: Some(30)
            }
        );
        assert_eq!(game.high_score(), 30);
        assert!(game.scene().record);
    }

    #[test]
    fn restart_reinitializes() {
        let mut game = scenario_game();
        for _ in 0..5 {
            let _ = game.tick(None);
        }
        game.snake.direction = Direction::North;
        game.snake.segments = VecDeque::from([Position::new(15, 0), Position::new(15, 1)]);
        assert!(matches!(game.tick(None), TickEvent::GameOver { .. }));
        assert!(game.control(Control::Restart));
        assert_eq!(game.score(), 0);
        assert_eq!(game.high_score(), 10);
        assert_eq!(game.snake, game.rules.new_snake());
        let food = game.food.unwrap();
        assert!(!game.snake.segments().contains(&food));
    }

    #[test]
    fn food_never_starts_on_snake() {
        for seed in 0..50 {
            let game = Game::new(
                rules(4, 1, Position::new(2, 0), Direction::East, 3),
                0,
                ChaCha12Rng::seed_from_u64(seed),
            );
            assert_eq!(game.food, Some(Position::new(3, 0)));
        }
    }
}
