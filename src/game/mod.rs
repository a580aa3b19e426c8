mod direction;
mod point;
mod snake;
pub(crate) use self::direction::Direction;
pub(crate) use self::point::Point;
pub(crate) use self::snake::Snake;
use crate::config::GameConfig;
use crate::consts;
use rand::Rng;
use std::time::{Duration, Instant};

/// A game of snake on a `D`-dimensional cubic board
#[derive(Clone, Debug)]
pub(crate) struct Game<const D: usize, R = rand::rngs::ThreadRng> {
    rng: R,
    tuning: GameConfig,
    snake: Snake<D>,
    food: Point<D>,
    score: u32,
    /// Ticks per second
    speed: f64,
    state: GameState,
    last_tick: Instant,
    events: Vec<GameEvent>,
}

impl<const D: usize> Game<D, rand::rngs::ThreadRng> {
    pub(crate) fn new(tuning: GameConfig) -> Self {
        Game::new_with_rng(tuning, rand::rng())
    }
}

impl<const D: usize, R: Rng> Game<D, R> {
    pub(crate) fn new_with_rng(tuning: GameConfig, rng: R) -> Game<D, R> {
        let now = Instant::now();
        let mut game = Game {
            rng,
            snake: Snake::new(Point::splat(0), Direction::Right, 0),
            food: Point::splat(0),
            score: 0,
            speed: tuning.initial_speed,
            state: GameState::Playing,
            last_tick: now,
            events: Vec::new(),
            tuning,
        };
        game.reset_at(now);
        game
    }

    /// Start a new game in place
    pub(crate) fn reset(&mut self) {
        self.reset_at(Instant::now());
    }

    fn reset_at(&mut self, now: Instant) {
        let center = Point::splat(i32::from(self.tuning.grid_size / 2));
        let growth = usize::from(self.tuning.initial_length.saturating_sub(1));
        self.snake = Snake::new(center, Direction::Right, growth);
        self.score = 0;
        self.speed = self.tuning.initial_speed;
        self.state = GameState::Playing;
        self.last_tick = now;
        self.events.push(GameEvent::ScoreChanged(0));
        tracing::debug!(head = %center, dimensions = D, "Starting new game");
        if !self.place_food() {
            self.end();
        }
    }

    /// Advance the game by one tick if it is running and at least one tick
    /// interval has passed since the last tick.  Returns whether a tick was
    /// applied.
    pub(crate) fn update(&mut self, now: Instant) -> bool {
        if self.state != GameState::Playing
            || now.saturating_duration_since(self.last_tick) < self.tick_interval()
        {
            return false;
        }
        self.last_tick = now;
        self.tick();
        true
    }

    fn tick(&mut self) {
        let new_head = self.snake.next_head();
        if !new_head.within(self.grid_size()) || self.snake.occupies(new_head) {
            self.end();
            return;
        }
        self.snake.push_head(new_head);
        if new_head == self.food {
            self.score = self.score.saturating_add(consts::FOOD_REWARD);
            self.snake.grow();
            self.speed = (self.speed + self.tuning.speed_increment).min(self.tuning.max_speed);
            self.events.push(GameEvent::ScoreChanged(self.score));
            if !self.place_food() {
                // The snake fills the whole board.
                self.end();
                return;
            }
        }
        self.snake.settle();
    }

    /// Move the food to a random cell not occupied by the snake.  Returns
    /// `false` if there is no such cell.
    fn place_food(&mut self) -> bool {
        if self.cell_count().is_some_and(|n| self.snake.len() >= n) {
            return false;
        }
        let size = self.grid_size();
        loop {
            let candidate = Point::new(std::array::from_fn(|_| self.rng.random_range(0..size)));
            if !self.snake.occupies(candidate) {
                self.food = candidate;
                return true;
            }
        }
    }
}

impl<const D: usize, R> Game<D, R> {
    /// Turn the snake unless the turn would reverse it or leave the board's
    /// dimensions.  Returns whether the direction changed.
    pub(crate) fn change_direction(&mut self, direction: Direction) -> bool {
        self.snake.turn(direction)
    }

    /// Pause a running game or resume a paused one.  Does nothing once the
    /// game is over.
    pub(crate) fn toggle_pause(&mut self) {
        self.toggle_pause_at(Instant::now());
    }

    fn toggle_pause_at(&mut self, now: Instant) {
        match self.state {
            GameState::Playing => self.state = GameState::Paused,
            GameState::Paused => {
                self.state = GameState::Playing;
                self.last_tick = now;
            }
            GameState::GameOver => (),
        }
    }

    /// Remove & return the events that have occurred since the last call
    pub(crate) fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn snake(&self) -> &Snake<D> {
        &self.snake
    }

    pub(crate) fn food(&self) -> Point<D> {
        self.food
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn speed(&self) -> f64 {
        self.speed
    }

    pub(crate) fn state(&self) -> GameState {
        self.state
    }

    pub(crate) fn grid_size(&self) -> i32 {
        i32::from(self.tuning.grid_size)
    }

    /// Time that must pass between ticks at the current speed
    pub(crate) fn tick_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.speed.recip()).unwrap_or(Duration::MAX)
    }

    /// Total number of cells on the board, or `None` on overflow
    fn cell_count(&self) -> Option<usize> {
        let side = usize::from(self.tuning.grid_size);
        (0..D).try_fold(1usize, |acc, _| acc.checked_mul(side))
    }

    fn end(&mut self) {
        self.state = GameState::GameOver;
        self.events.push(GameEvent::GameOver { score: self.score });
        tracing::info!(score = self.score, head = %self.snake.head(), "Game over");
    }

    #[cfg(test)]
    pub(crate) fn put_food(&mut self, pos: Point<D>) {
        self.food = pos;
    }

    #[cfg(test)]
    pub(crate) fn put_snake(&mut self, head: Point<D>, body: &[Point<D>], direction: Direction) {
        self.snake.head = head;
        self.snake.body = body.iter().copied().collect();
        self.snake.direction = direction;
        self.snake.grow_count = 0;
    }

    /// The earliest time at which `update()` will tick
    #[cfg(test)]
    pub(crate) fn tick_due(&self) -> Instant {
        self.last_tick + self.tick_interval()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameState {
    Playing,
    Paused,
    /// The snake hit a wall or itself (or filled the board).  Only a reset
    /// leaves this state.
    GameOver,
}

/// Notable changes in a game, to be collected by the front-end with
/// [`Game::take_events()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameEvent {
    ScoreChanged(u32),
    GameOver { score: u32 },
}
