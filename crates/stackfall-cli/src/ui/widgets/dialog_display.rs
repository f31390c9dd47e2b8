use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block as BlockWidget, Clear, Padding, Widget},
};

/// A bordered popup drawn over whatever is below it.
#[derive(Debug)]
pub struct DialogDisplay<'a> {
    title: &'a str,
    body: Vec<Line<'a>>,
    style: Style,
}

impl<'a> DialogDisplay<'a> {
    pub fn new(title: &'a str, style: Style) -> Self {
        Self {
            title,
            body: vec![],
            style,
        }
    }

    pub fn line(mut self, line: impl Into<Line<'a>>) -> Self {
        self.body.push(line.into());
        self
    }

    fn frame(&self) -> BlockWidget<'a> {
        BlockWidget::bordered()
            .title(Line::from(self.title).centered())
            .padding(Padding::horizontal(1))
            .style(self.style)
    }

    pub fn width(&self) -> u16 {
        let content = self
            .body
            .iter()
            .map(Line::width)
            .chain([self.title.chars().count()])
            .max()
            .unwrap_or(0);
        u16::try_from(content).unwrap_or(u16::MAX)
            + super::block_horizontal_margin(Some(&self.frame()))
    }

    pub fn height(&self) -> u16 {
        u16::try_from(self.body.len()).unwrap_or(u16::MAX)
            + super::block_vertical_margin(Some(&self.frame()))
    }
}

impl Widget for DialogDisplay<'_> {
    /// Renders centred in `area`.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.centered(
            Constraint::Length(self.width()),
            Constraint::Length(self.height()),
        );
        let block = self.frame();
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);
        Text::from(self.body).style(self.style).centered().render(inner, buf);
    }
}
