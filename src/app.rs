use crate::config::Config;
use crate::controls::Command;
use crate::frontend::{Frontend, Screen};
use crate::game::{Game, GameEvent, GameState};
use crate::storage::Storage;
use crate::util::ErrorChain;
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{backend::Backend, Frame, Terminal};
use std::io;
use std::time::{Duration, Instant};

/// Everything a running program needs: the game, how to draw it, the
/// configuration, and where scores go
#[derive(Debug)]
pub(crate) struct App<F, const D: usize, R = rand::rngs::ThreadRng> {
    frontend: F,
    game: Game<D, R>,
    config: Config,
    storage: Storage,
    notice: Option<String>,
    quitting: bool,
}

impl<F: Frontend<D>, const D: usize> App<F, D> {
    pub(crate) fn new(frontend: F, config: Config, storage: Storage) -> Self {
        let game = Game::new(config.game.clone());
        App::with_game(frontend, game, config, storage)
    }
}

impl<F: Frontend<D>, const D: usize, R: Rng> App<F, D, R> {
    #[cfg(test)]
    fn new_with_rng(frontend: F, config: Config, storage: Storage, rng: R) -> Self {
        let game = Game::new_with_rng(config.game.clone(), rng);
        App::with_game(frontend, game, config, storage)
    }

    fn with_game(frontend: F, game: Game<D, R>, config: Config, storage: Storage) -> Self {
        let mut app = App {
            frontend,
            game,
            config,
            storage,
            notice: None,
            quitting: false,
        };
        app.process_events();
        app
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        let frame_period = Duration::from_secs(1) / u32::from(self.config.display.frame_rate.max(1));
        while !self.quitting {
            terminal.draw(|frame| self.draw(frame))?;
            if poll(frame_period)? {
                self.handle_event(read()?);
            }
            self.game.update(Instant::now());
            self.process_events();
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if event == Event::FocusLost {
            if self.game.state() == GameState::Playing {
                self.game.toggle_pause();
            }
            return;
        }
        let Some(ev) = event.as_key_press_event() else {
            return;
        };
        match self.config.controls.command_for(ev) {
            Some(Command::Quit) => self.quitting = true,
            Some(Command::Pause) => self.game.toggle_pause(),
            Some(Command::Reset) if self.game.state() == GameState::GameOver => {
                self.notice = None;
                self.game.reset();
            }
            Some(Command::Turn(direction)) if self.game.state() == GameState::Playing => {
                self.game.change_direction(direction);
            }
            _ => (),
        }
    }
}

impl<F: Frontend<D>, const D: usize, R> App<F, D, R> {
    fn draw(&self, frame: &mut Frame<'_>) {
        let screen = Screen {
            frontend: &self.frontend,
            game: &self.game,
            config: &self.config,
            high_scores: self.storage.high_scores(),
            notice: self.notice.as_deref(),
        };
        frame.render_widget(screen, frame.area());
    }

    fn process_events(&mut self) {
        for event in self.game.take_events() {
            match event {
                GameEvent::ScoreChanged(score) => tracing::trace!(score, "Score changed"),
                GameEvent::GameOver { score } => self.record_score(score),
            }
        }
    }

    fn record_score(&mut self, score: u32) {
        if score == 0 {
            return;
        }
        let player = &self.config.player.name;
        let previous_best = self.storage.best_score();
        self.storage.add_high_score(player, score);
        tracing::info!(player = %player, score, "Recorded high score");
        if previous_best.is_none_or(|best| score > best) {
            tracing::info!(score, "New best score");
        }
        if let Err(e) = self.storage.save() {
            tracing::error!(
                path = %self.storage.path().display(),
                error = %ErrorChain(&e),
                "Failed to save high score"
            );
            self.notice = Some(format!("Could not save high score: {}", ErrorChain(&e)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::frontend::Flat;
    use crate::game::{Direction, Point};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::path::Path;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn new_app(storage_path: &Path) -> App<Flat, 2, ChaCha12Rng> {
        let config = Config {
            game: GameConfig {
                grid_size: 4,
                initial_length: 1,
                ..GameConfig::default()
            },
            ..Config::default()
        };
        let storage = Storage::open(storage_path.to_owned()).unwrap();
        App::new_with_rng(Flat, config, storage, ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    fn press(app: &mut App<Flat, 2, ChaCha12Rng>, code: KeyCode) {
        app.handle_event(Event::Key(KeyEvent::from(code)));
    }

    fn step(app: &mut App<Flat, 2, ChaCha12Rng>) {
        let when = app.game.tick_due();
        assert!(app.game.update(when));
        app.process_events();
    }

    /// Put the snake one cell from the right wall with food in front of it,
    /// then let it eat and crash
    fn score_and_crash(app: &mut App<Flat, 2, ChaCha12Rng>) {
        app.game.put_snake(Point::new([2, 1]), &[], Direction::Right);
        app.game.put_food(Point::new([3, 1]));
        step(app);
        assert_eq!(app.game.score(), 10);
        step(app);
        assert_eq!(app.game.state(), GameState::GameOver);
    }

    #[test]
    fn quit_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = new_app(&dir.path().join("storage.json"));
        assert!(!app.quitting);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.quitting);
    }

    #[test]
    fn ctrl_c_quits() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = new_app(&dir.path().join("storage.json"));
        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.quitting);
    }

    #[test]
    fn pause_and_resume() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = new_app(&dir.path().join("storage.json"));
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.game.state(), GameState::Paused);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.game.snake().direction(), Direction::Right);
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.game.state(), GameState::Playing);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.game.snake().direction(), Direction::Up);
    }

    #[test]
    fn reversal_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = new_app(&dir.path().join("storage.json"));
        press(&mut app, KeyCode::Left);
        assert_eq!(app.game.snake().direction(), Direction::Right);
    }

    #[test]
    fn depth_keys_ignored_in_2d() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = new_app(&dir.path().join("storage.json"));
        press(&mut app, KeyCode::Char('w'));
        assert_eq!(app.game.snake().direction(), Direction::Right);
    }

    #[test]
    fn focus_lost_pauses() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = new_app(&dir.path().join("storage.json"));
        app.handle_event(Event::FocusLost);
        assert_eq!(app.game.state(), GameState::Paused);
        app.handle_event(Event::FocusLost);
        assert_eq!(app.game.state(), GameState::Paused);
        app.handle_event(Event::FocusGained);
        assert_eq!(app.game.state(), GameState::Paused);
    }

    #[test]
    fn reset_only_after_game_over() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = new_app(&dir.path().join("storage.json"));
        app.game.put_snake(Point::new([1, 1]), &[], Direction::Down);
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.game.snake().head(), Point::new([1, 1]));
        score_and_crash(&mut app);
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.game.state(), GameState::Playing);
        assert_eq!(app.game.score(), 0);
        assert_eq!(app.game.snake().head(), Point::new([2, 2]));
    }

    #[test]
    fn game_over_records_score() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let mut app = new_app(&path);
        score_and_crash(&mut app);
        assert_eq!(app.storage.best_score(), Some(10));
        assert_eq!(app.notice, None);
        let reread = Storage::open(path).unwrap();
        assert_eq!(reread.high_scores().len(), 1);
        assert_eq!(reread.high_scores()[0].player, "Player");
        assert_eq!(reread.high_scores()[0].score, 10);
    }

    #[test]
    fn zero_score_not_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = new_app(&dir.path().join("storage.json"));
        app.game.put_snake(Point::new([3, 1]), &[], Direction::Right);
        app.game.put_food(Point::new([0, 3]));
        step(&mut app);
        assert_eq!(app.game.state(), GameState::GameOver);
        assert!(app.storage.high_scores().is_empty());
    }

    #[test]
    fn save_failure_shows_notice() {
        let dir = tempfile::tempdir().unwrap();
        let subdir = dir.path().join("data");
        let mut app = new_app(&subdir.join("storage.json"));
        fs_err::remove_dir_all(&subdir).unwrap();
        fs_err::write(&subdir, "not a directory").unwrap();
        score_and_crash(&mut app);
        assert_eq!(app.storage.best_score(), Some(10));
        let notice = app.notice.clone().unwrap();
        assert!(notice.starts_with("Could not save high score: "));
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.notice, None);
    }
}
