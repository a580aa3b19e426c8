//! Assorted constants & hard-coded configuration
use ratatui::style::{Color, Modifier, Style};

/// Points awarded for each food eaten
pub(crate) const FOOD_REWARD: u32 = 10;

/// Number of high scores kept in storage
pub(crate) const MAX_HIGH_SCORES: usize = 10;

/// Default music volume for a fresh storage file
pub(crate) const DEFAULT_MUSIC_VOLUME: f64 = 0.7;

/// Default sound effects volume for a fresh storage file
pub(crate) const DEFAULT_SFX_VOLUME: f64 = 0.8;

/// Default difficulty label for a fresh storage file
pub(crate) const DEFAULT_DIFFICULTY: &str = "medium";

/// Glyph for the snake's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: char = '>';

/// Glyph for the snake's head when it is moving forwards (away from the
/// viewer)
pub(crate) const SNAKE_HEAD_FORWARD_SYMBOL: char = '⊗';

/// Glyph for the snake's head when it is moving backwards (towards the
/// viewer)
pub(crate) const SNAKE_HEAD_BACKWARD_SYMBOL: char = '⊙';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph for the snake's head when it's collided with a wall or itself
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key names shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for status messages about failures
pub(crate) const NOTICE_STYLE: Style = Style::new().fg(Color::LightRed);
