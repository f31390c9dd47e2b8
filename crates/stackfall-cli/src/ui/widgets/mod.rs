use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    board_display::*, cell_display::*, dialog_display::*, key_binding_display::*,
    score_display::*,
};

mod board_display;
mod cell_display;
mod dialog_display;
mod key_binding_display;
mod score_display;

pub mod color {
    use ratatui::style::Color;
    use stackfall_engine::PALETTE_LEN;

    /// Cell colours indexed by cell value; index 0 is the empty cell.
    pub const PALETTE: [Color; PALETTE_LEN] = [
        Color::Rgb(0x24, 0x24, 0x24),
        Color::Rgb(0xff, 0xc6, 0xff), // I
        Color::Rgb(0xbd, 0xb2, 0xff), // J
        Color::Rgb(0xa0, 0xc4, 0xff), // L
        Color::Rgb(0x9b, 0xf6, 0xff), // O
        Color::Rgb(0xca, 0xff, 0xbf), // S
        Color::Rgb(0xff, 0xd6, 0xa5), // T
        Color::Rgb(0xff, 0xad, 0xad), // Z
    ];

    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use ratatui::style::{Color, Style};

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::GRAY, color::PALETTE[0]);
    pub const DIALOG: Style = fg_bg(color::BLACK, color::YELLOW);
    pub const GAME_OVER: Style = fg_bg(color::WHITE, color::RED);

    /// Style of an occupied cell with the given palette index.
    pub const fn filled(index: usize) -> Style {
        bg_only(color::PALETTE[index])
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}

#[cfg(test)]
mod tests {
    use ratatui::widgets::Padding;

    use super::*;

    #[test]
    fn test_block_margins() {
        assert_eq!(block_horizontal_margin(None), 0);
        let block = BlockWidget::bordered().padding(Padding::horizontal(1));
        assert_eq!(block_horizontal_margin(Some(&block)), 4);
        assert_eq!(block_vertical_margin(Some(&block)), 2);
    }

    #[test]
    fn test_palette_distinguishes_every_kind() {
        for (i, a) in color::PALETTE.iter().enumerate() {
            for b in &color::PALETTE[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
