//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Largest grid width that still fits inside [`DISPLAY_SIZE`] along with the
/// grid's border
pub(crate) const MAX_GRID_WIDTH: u16 = DISPLAY_SIZE.width - 2;

/// Largest grid height that still fits inside [`DISPLAY_SIZE`] along with the
/// score bar, the grid's border, and the two message lines
pub(crate) const MAX_GRID_HEIGHT: u16 = DISPLAY_SIZE.height - 5;

/// Default grid width
pub(crate) const DEFAULT_GRID_WIDTH: u16 = 30;

/// Default grid height
pub(crate) const DEFAULT_GRID_HEIGHT: u16 = 15;

/// Number of segments in a freshly-started snake
pub(crate) const INITIAL_SNAKE_LENGTH: usize = 3;

/// Points awarded for each piece of food eaten
pub(crate) const FOOD_REWARD: u32 = 10;

/// Time between movements of a freshly-started snake
pub(crate) const BASE_TICK_PERIOD: Duration = Duration::from_millis(100);

/// How much the time between movements shrinks per segment gained
pub(crate) const TICK_PERIOD_STEP: Duration = Duration::from_millis(2);

/// The time between movements never drops below this
pub(crate) const MIN_TICK_PERIOD: Duration = Duration::from_millis(50);

/// How long to wait for input at a time while the game is paused or over
pub(crate) const IDLE_WAIT: Duration = Duration::from_millis(500);

/// Minimum pointer travel (in cells) before a pointer sample steers the snake
pub(crate) const DEFAULT_DEAD_ZONE: u16 = 1;

/// How long the pointer capture thread waits after a failed terminal read
/// before trying again
pub(crate) const CAPTURE_RETRY_DELAY: Duration = Duration::from_millis(20);

/// The pointer capture thread gives up after this many failed terminal reads
/// in a row
pub(crate) const MAX_CAPTURE_FAILURES: u32 = 5;

/// Glyph for the snake's head when it is moving north/up
pub(crate) const SNAKE_HEAD_NORTH_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving south/down
pub(crate) const SNAKE_HEAD_SOUTH_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving east/right
pub(crate) const SNAKE_HEAD_EAST_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving west/left
pub(crate) const SNAKE_HEAD_WEST_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph for the snake's head when it's collided with a wall or itself
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the "new high score" notice
pub(crate) const RECORD_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
