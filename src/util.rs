use crate::config::DisplayConfig;
use ratatui::layout::{Flex, Layout, Rect, Size};
use std::fmt;

/// Return the area of `buffer_area` in which to draw everything: the whole
/// buffer in fullscreen mode, otherwise a rectangle of the configured size
/// in its center
pub(crate) fn get_display_area(buffer_area: Rect, display: &DisplayConfig) -> Rect {
    if display.fullscreen {
        buffer_area
    } else {
        center_rect(
            buffer_area,
            Size {
                width: display.width,
                height: display.height,
            },
        )
    }
}

/// Return a rectangle of the given size centered in `area`, shrunk to fit if
/// necessary
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [area] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(area);
    area
}

/// Display an error followed by its chain of sources, separated by colons
#[derive(Clone, Copy, Debug)]
pub(crate) struct ErrorChain<'a>(pub(crate) &'a dyn std::error::Error);

impl fmt::Display for ErrorChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;
        let mut source = self.0.source();
        while let Some(src) = source {
            write!(f, ": {src}")?;
            source = src.source();
        }
        Ok(())
    }
}
