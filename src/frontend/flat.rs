use super::{draw_pieces, Canvas, Frontend};
use crate::game::Game;
use crate::palette::Palette;
use ratatui::{
    buffer::Buffer,
    layout::{Rect, Size},
    widgets::{Block, Widget},
};

/// Front-end for 2D games: the board is drawn as a single bordered plane
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Flat;

impl Frontend<2> for Flat {
    fn board_size(&self, grid_size: u16) -> Size {
        let side = grid_size.saturating_add(2);
        Size::new(side, side)
    }

    fn render_board<R>(&self, game: &Game<2, R>, palette: &Palette, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .border_style(palette.grid_style())
            .style(palette.background_style());
        let inner = block.inner(area);
        block.render(area, buf);
        let mut canvas = Canvas { area: inner, buf };
        draw_pieces(&mut canvas, game, palette, |p| {
            let [x, y] = p.coords();
            Some((x, y))
        });
    }
}
