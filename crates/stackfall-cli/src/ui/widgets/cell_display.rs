use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};
use stackfall_engine::Cell;

use crate::ui::widgets::style;

/// One board cell, two terminal columns wide.
#[derive(Debug, PartialEq, Eq)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn width() -> u16 {
        2
    }

    pub fn height() -> u16 {
        1
    }

    pub fn from_cell(cell: Cell) -> Self {
        if cell.is_empty() {
            Self::new(style::EMPTY_DOT, ".")
        } else {
            Self::new(style::filled(cell.palette_index()), "")
        }
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Use a Paragraph to fill the whole area, not just the cells with the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::widgets::color;

    #[test]
    fn test_cell_colour_follows_palette() {
        for value in 1..=7 {
            let display = CellDisplay::from_cell(Cell::new(value));
            assert_eq!(display.style.bg, Some(color::PALETTE[usize::from(value)]));
            assert_eq!(display.symbol, "");
        }
    }

    #[test]
    fn test_empty_cell_shows_dot() {
        let display = CellDisplay::from_cell(Cell::EMPTY);
        assert_eq!(display.symbol, ".");
        assert_eq!(display.style.bg, Some(color::PALETTE[0]));
    }
}
