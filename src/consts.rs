//! Assorted constants & hard-coded configuration
use ratatui::style::{Color, Modifier, Style};
use std::time::Duration;

/// Length of the snake (head included) at the start of a game
pub(crate) const INITIAL_SNAKE_LENGTH: usize = 3;

/// The snake never shrinks below this many cells
pub(crate) const MIN_SNAKE_LENGTH: usize = 1;

/// Speed of a new snake, in cells per frame
pub(crate) const INITIAL_SPEED: f64 = 0.1;

/// Amount by which the speed changes when the snake eats something
pub(crate) const SPEED_STEP: f64 = 0.02;

/// Slowest possible speed, in cells per frame
pub(crate) const MIN_SPEED: f64 = 0.02;

/// Fastest possible speed: one cell per frame
pub(crate) const MAX_SPEED: f64 = 1.0;

/// How long a hazardous food stays hazardous before turning safe
pub(crate) const HAZARD_DELAY: Duration = Duration::from_secs(3);

/// A hazard roll in `1..=HAZARD_ROLL_SIDES` at or below
/// [`HAZARD_THRESHOLD`] makes the food hazardous.
pub(crate) const HAZARD_ROLL_SIDES: u8 = 10;

/// See [`HAZARD_ROLL_SIDES`]
pub(crate) const HAZARD_THRESHOLD: u8 = 5;

/// Number of random cells to try when placing food before falling back to
/// scanning the whole grid for free cells
pub(crate) const PLACEMENT_ATTEMPTS: usize = 64;

/// Interval at which the frame count is reported to the window title
pub(crate) const TITLE_INTERVAL: Duration = Duration::from_secs(1);

/// Smallest permitted grid width or height
pub(crate) const MIN_GRID_SIZE: u16 = 5;

/// Largest permitted grid width or height
pub(crate) const MAX_GRID_SIZE: u16 = 200;

/// Highest permitted frame rate
pub(crate) const MAX_FPS: u32 = 240;

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

/// Glyph for safe food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph for hazardous food
pub(crate) const HAZARD_SYMBOL: char = '◆';

/// Glyph for the snake's head when it's collided with a wall or itself
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for safe food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for hazardous food
pub(crate) const HAZARD_STYLE: Style = Style::new()
    .fg(Color::LightMagenta)
    .add_modifier(Modifier::BOLD);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the status bar at the top of the game screen
pub(crate) const STATUS_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
