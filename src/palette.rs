use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;
use thiserror::Error;

/// An RGB color with each channel in `0.0..=1.0`, written in configuration
/// files as a three-element array
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(try_from = "[f32; 3]")]
pub(crate) struct Rgb {
    red: f32,
    green: f32,
    blue: f32,
}

impl Rgb {
    pub(crate) const fn new(red: f32, green: f32, blue: f32) -> Rgb {
        Rgb { red, green, blue }
    }
}

impl TryFrom<[f32; 3]> for Rgb {
    type Error = ChannelError;

    fn try_from(channels: [f32; 3]) -> Result<Rgb, ChannelError> {
        match channels.into_iter().find(|c| !(0.0..=1.0).contains(c)) {
            Some(value) => Err(ChannelError(value)),
            None => {
                let [red, green, blue] = channels;
                Ok(Rgb { red, green, blue })
            }
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Color {
        Color::Rgb(channel(rgb.red), channel(rgb.green), channel(rgb.blue))
    }
}

// Channels are validated to lie in 0.0..=1.0 on construction.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel(value: f32) -> u8 {
    (value * 255.0).round() as u8
}

#[derive(Clone, Copy, Debug, Error, PartialEq)]
#[error("color channel {0} is outside of the range 0.0 to 1.0")]
pub(crate) struct ChannelError(f32);

/// Colors used for drawing the board
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct Palette {
    pub(crate) snake_head: Rgb,
    pub(crate) snake_body: Rgb,
    pub(crate) food: Rgb,
    pub(crate) grid: Rgb,
    pub(crate) background: Rgb,
}

impl Palette {
    pub(crate) fn background_style(&self) -> Style {
        Style::new().bg(self.background.into())
    }

    pub(crate) fn head_style(&self) -> Style {
        self.background_style()
            .fg(self.snake_head.into())
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn body_style(&self) -> Style {
        self.background_style().fg(self.snake_body.into())
    }

    pub(crate) fn food_style(&self) -> Style {
        self.background_style().fg(self.food.into())
    }

    /// Style for board borders
    pub(crate) fn grid_style(&self) -> Style {
        self.background_style().fg(self.grid.into())
    }
}

impl Default for Palette {
    fn default() -> Palette {
        Palette {
            snake_head: Rgb::new(0.2, 1.0, 0.2),
            snake_body: Rgb::new(0.0, 0.7, 0.0),
            food: Rgb::new(1.0, 0.3, 0.3),
            grid: Rgb::new(0.4, 0.4, 0.4),
            background: Rgb::new(0.0, 0.0, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case([0.0, 0.0, 0.0], Color::Rgb(0, 0, 0))]
    #[case([1.0, 1.0, 1.0], Color::Rgb(255, 255, 255))]
    #[case([1.0, 0.5, 0.2], Color::Rgb(255, 128, 51))]
    fn test_to_color(#[case] channels: [f32; 3], #[case] color: Color) {
        let rgb = Rgb::try_from(channels).unwrap();
        assert_eq!(Color::from(rgb), color);
    }

    #[rstest]
    #[case([1.5, 0.0, 0.0])]
    #[case([0.0, -0.1, 0.0])]
    #[case([0.0, 0.0, f32::NAN])]
    fn test_out_of_range(#[case] channels: [f32; 3]) {
        assert!(Rgb::try_from(channels).is_err());
    }

    #[test]
    fn head_style_uses_background() {
        let palette = Palette::default();
        let style = palette.head_style();
        assert_eq!(style.fg, Some(Color::Rgb(51, 255, 51)));
        assert_eq!(style.bg, Some(Color::Rgb(0, 0, 0)));
    }
}
