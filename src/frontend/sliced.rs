use super::{draw_pieces, Canvas, Frontend};
use crate::game::Game;
use crate::palette::Palette;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect, Size},
    text::Line,
    widgets::{Block, Widget},
};

/// Front-end for 3D games: the cube is drawn as the three z-slices around the
/// snake's head, side by side, with the head's own slice in the middle
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Sliced;

/// Columns between adjacent slices
const GUTTER: u16 = 1;

impl Frontend<3> for Sliced {
    fn board_size(&self, grid_size: u16) -> Size {
        let side = grid_size.saturating_add(2);
        let width = side.saturating_mul(3).saturating_add(GUTTER * 2);
        Size::new(width, side)
    }

    fn render_board<R>(&self, game: &Game<3, R>, palette: &Palette, area: Rect, buf: &mut Buffer) {
        let side = u16::try_from(game.grid_size())
            .unwrap_or(u16::MAX)
            .saturating_add(2);
        let slices: [Rect; 3] = Layout::horizontal([side; 3])
            .flex(Flex::Center)
            .spacing(GUTTER)
            .areas(area);
        let [_, _, head_z] = game.snake().head().coords();
        for (slice_area, z) in slices.into_iter().zip(head_z - 1..) {
            if !(0..game.grid_size()).contains(&z) {
                continue;
            }
            let border_style = if z == head_z {
                palette.head_style()
            } else {
                palette.grid_style()
            };
            let block = Block::bordered()
                .title(Line::from(format!("z={z}")))
                .border_style(border_style)
                .style(palette.background_style());
            let inner = block.inner(slice_area);
            block.render(slice_area, buf);
            let mut canvas = Canvas {
                area: inner,
                buf: &mut *buf,
            };
            draw_pieces(&mut canvas, game, palette, |p| {
                let [x, y, pz] = p.coords();
                (pz == z).then_some((x, y))
            });
        }
    }

    /// Say which layer the food is on, since it may be outside the visible
    /// slices
    fn hint<R>(&self, game: &Game<3, R>) -> Option<String> {
        let [_, _, food_z] = game.food().coords();
        let [_, _, head_z] = game.snake().head().coords();
        Some(format!("Food: layer {food_z} ({:+})", food_z - head_z))
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::rows;
    use super::*;
    use crate::config::GameConfig;
    use crate::game::{Direction, Point};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn new_game() -> Game<3, ChaCha12Rng> {
        let tuning = GameConfig {
            grid_size: 4,
            initial_length: 1,
            ..GameConfig::default()
        };
        Game::new_with_rng(tuning, ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    fn render(game: &Game<3, ChaCha12Rng>) -> Vec<String> {
        let area = Rect::new(0, 0, 20, 6);
        let mut buf = Buffer::empty(area);
        Sliced.render_board(game, &Palette::default(), area, &mut buf);
        rows(&buf)
    }

    #[test]
    fn board_size() {
        assert_eq!(Sliced.board_size(4), Size::new(20, 6));
    }

    #[test]
    fn draw_middle_slices() {
        let mut game = new_game();
        game.put_snake(
            Point::new([2, 1, 2]),
            &[Point::new([1, 1, 2]), Point::new([1, 1, 1])],
            Direction::Right,
        );
        game.put_food(Point::new([0, 0, 3]));
        assert_eq!(
            render(&game),
            [
                "┌z=1─┐ ┌z=2─┐ ┌z=3─┐",
                "│    │ │    │ │●   │",
                "│ ⚬  │ │ ⚬< │ │    │",
                "│    │ │    │ │    │",
                "│    │ │    │ │    │",
                "└────┘ └────┘ └────┘",
            ]
        );
    }

    #[test]
    fn slices_beyond_the_board_are_blank() {
        let mut game = new_game();
        game.put_snake(Point::new([3, 3, 0]), &[], Direction::Forward);
        game.put_food(Point::new([0, 0, 0]));
        assert_eq!(
            render(&game),
            [
                "       ┌z=0─┐ ┌z=1─┐",
                "       │●   │ │    │",
                "       │    │ │    │",
                "       │    │ │    │",
                "       │   ⊗│ │    │",
                "       └────┘ └────┘",
            ]
        );
    }

    #[rstest]
    #[case(Point::new([0, 0, 3]), "Food: layer 3 (+1)")]
    #[case(Point::new([0, 0, 2]), "Food: layer 2 (+0)")]
    #[case(Point::new([3, 3, 0]), "Food: layer 0 (-2)")]
    fn food_layer_hint(#[case] food: Point<3>, #[case] hint: &str) {
        let mut game = new_game();
        game.put_snake(Point::new([2, 2, 2]), &[], Direction::Right);
        game.put_food(food);
        assert_eq!(Sliced.hint(&game).as_deref(), Some(hint));
    }
}
