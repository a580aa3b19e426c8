mod flat;
mod sliced;
pub(crate) use self::flat::Flat;
pub(crate) use self::sliced::Sliced;
use crate::config::Config;
use crate::consts;
use crate::game::{Direction, Game, GameState, Point};
use crate::palette::Palette;
use crate::storage::HighScore;
use crate::util::{center_rect, get_display_area};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Clear, Widget},
};

/// A way of drawing a `D`-dimensional board in the terminal
pub(crate) trait Frontend<const D: usize> {
    /// Return the size of the rectangle needed to draw a board with
    /// `grid_size` cells per side, borders included
    fn board_size(&self, grid_size: u16) -> Size;

    /// Draw the board & everything on it into `area`, which will be at most
    /// `board_size()` in size
    fn render_board<R>(&self, game: &Game<D, R>, palette: &Palette, area: Rect, buf: &mut Buffer);

    /// Extra information to show in the status line while playing
    fn hint<R>(&self, _game: &Game<D, R>) -> Option<String> {
        None
    }
}

/// Number of rows the screen uses besides the board: the score bar, the
/// state line, and the key hints
pub(crate) const CHROME_ROWS: u16 = 3;

/// The whole game screen: score bar, board, status lines, and (once the game
/// is over) the high score table
#[derive(Debug)]
pub(crate) struct Screen<'a, F, const D: usize, R> {
    pub(crate) frontend: &'a F,
    pub(crate) game: &'a Game<D, R>,
    pub(crate) config: &'a Config,
    pub(crate) high_scores: &'a [HighScore],
    /// A message about a failure to show in place of the state line
    pub(crate) notice: Option<&'a str>,
}

impl<F: Frontend<D>, const D: usize, R> Widget for Screen<'_, F, D, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area, &self.config.display);
        let palette = &self.config.colors;
        buf.set_style(display, palette.background_style());
        let [score_area, board_area, state_area, keys_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(display);

        let score = self.game.score();
        let best = self
            .high_scores
            .first()
            .map_or(score, |hs| hs.score.max(score));
        Line::from(format!(
            " Score: {score}  Speed: {:.1}/s  Best: {best}",
            self.game.speed()
        ))
        .style(consts::SCORE_BAR_STYLE)
        .render(score_area, buf);

        let board = center_rect(
            board_area,
            self.frontend.board_size(self.config.game.grid_size),
        );
        self.frontend.render_board(self.game, palette, board, buf);

        let controls = &self.config.controls;
        let (state_line, keys_line) = match self.game.state() {
            GameState::Playing => (
                match self.frontend.hint(self.game) {
                    Some(hint) => format!(" Playing | {hint}"),
                    None => String::from(" Playing"),
                },
                key_hints([("Pause", controls.pause), ("Quit", controls.quit)]),
            ),
            GameState::Paused => (
                String::from(" PAUSED"),
                key_hints([("Resume", controls.pause), ("Quit", controls.quit)]),
            ),
            GameState::GameOver => (
                String::from(" GAME OVER"),
                key_hints([("Restart", controls.reset), ("Quit", controls.quit)]),
            ),
        };
        let state_line = match self.notice {
            Some(notice) => Line::styled(format!(" {notice}"), consts::NOTICE_STYLE),
            None => Line::from(state_line),
        };
        state_line.render(state_area, buf);
        keys_line.render(keys_area, buf);

        if self.game.state() == GameState::GameOver {
            HighScoreTable(self.high_scores).render(board_area, buf);
        }
    }
}

/// Build a line of the form " Pause (p)  Quit (q)"
fn key_hints<K: std::fmt::Display, const N: usize>(hints: [(&str, K); N]) -> Line<'static> {
    let mut spans = Vec::with_capacity(N * 3);
    for (label, key) in hints {
        spans.push(Span::raw(format!(" {label} (")));
        spans.push(Span::styled(key.to_string(), consts::KEY_STYLE));
        spans.push(Span::raw(") "));
    }
    Line::from(spans)
}

/// Pop-up listing the stored high scores, drawn centered in the area it's
/// rendered to
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct HighScoreTable<'a>(&'a [HighScore]);

impl HighScoreTable<'_> {
    const WIDTH: u16 = 28;
    const NAME_WIDTH: usize = 12;
}

impl Widget for HighScoreTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = if self.0.is_empty() {
            vec![Line::from("No scores yet").centered()]
        } else {
            self.0
                .iter()
                .zip(1..)
                .map(|(hs, rank)| {
                    Line::from(format!(
                        "{rank:>2}. {:<width$.width$} {:>6}",
                        hs.player,
                        hs.score,
                        width = Self::NAME_WIDTH
                    ))
                })
                .collect()
        };
        let height = u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2);
        let popup = center_rect(area, Size::new(Self::WIDTH, height));
        Clear.render(popup, buf);
        let block = Block::bordered().title(Line::from(" HIGH SCORES ").centered());
        let inner = block.inner(popup).inner(Margin::new(1, 0));
        block.render(popup, buf);
        for (line, y) in lines.into_iter().zip(inner.top()..inner.bottom()) {
            line.render(Rect { y, height: 1, ..inner }, buf);
        }
    }
}

/// Glyph for the snake's head when travelling in `direction`
fn head_symbol(direction: Direction) -> char {
    match direction {
        Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
        Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
        Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
        Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
        Direction::Forward => consts::SNAKE_HEAD_FORWARD_SYMBOL,
        Direction::Backward => consts::SNAKE_HEAD_BACKWARD_SYMBOL,
    }
}

/// Draw the snake & food onto `canvas`.  `project` maps a board position to
/// canvas coordinates, or to `None` if the position is not visible.
fn draw_pieces<const D: usize, R, P>(
    canvas: &mut Canvas<'_>,
    game: &Game<D, R>,
    palette: &Palette,
    project: P,
) where
    P: Fn(Point<D>) -> Option<(i32, i32)>,
{
    let snake = game.snake();
    for &p in snake.body() {
        if let Some((x, y)) = project(p) {
            canvas.draw_cell(x, y, consts::SNAKE_BODY_SYMBOL, palette.body_style());
        }
    }
    if let Some((x, y)) = project(game.food()) {
        canvas.draw_cell(x, y, consts::FOOD_SYMBOL, palette.food_style());
    }
    if let Some((x, y)) = project(snake.head()) {
        if game.state() == GameState::GameOver {
            canvas.draw_cell(x, y, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
        } else {
            canvas.draw_cell(x, y, head_symbol(snake.direction()), palette.head_style());
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, x: i32, y: i32, symbol: char, style: Style) {
        let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
            return;
        };
        if x >= self.area.width || y >= self.area.height {
            return;
        }
        let pos = (self.area.x.saturating_add(x), self.area.y.saturating_add(y));
        if let Some(cell) = self.buf.cell_mut(pos) {
            cell.set_char(symbol);
            cell.set_style(style);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use ratatui::buffer::{Buffer, Cell};

    /// The text of each row of `buf`, styles discarded
    pub(crate) fn rows(buf: &Buffer) -> Vec<String> {
        buf.content
            .chunks(usize::from(buf.area.width).max(1))
            .map(|row| row.iter().map(Cell::symbol).collect())
            .collect()
    }
}
