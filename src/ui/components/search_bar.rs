use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::components::input_line;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

pub struct SearchBar<'a> {
    input: &'a LineInput,
    focused: bool,
    count_text: String,
    theme: &'a Theme,
}

impl<'a> SearchBar<'a> {
    pub fn new(input: &'a LineInput, focused: bool, count_text: String, theme: &'a Theme) -> Self {
        Self {
            input,
            focused,
            count_text,
            theme,
        }
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let border = if self.focused {
            colors.border_focused()
        } else {
            colors.border()
        };

        let block = Block::bordered()
            .title(" Search ")
            .title_bottom(Span::styled(
                format!(" {} ", self.count_text),
                Style::default().fg(colors.text_pending()),
            ))
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.input.value().is_empty() && !self.focused {
            Span::styled("press / to search", Style::default().fg(colors.text_pending())).into()
        } else {
            input_line(
                self.input,
                Style::default().fg(colors.fg()),
                Style::default()
                    .fg(colors.text_cursor_fg())
                    .bg(colors.text_cursor_bg()),
                self.focused,
            )
        };
        Paragraph::new(line).render(inner, buf);
    }
}
