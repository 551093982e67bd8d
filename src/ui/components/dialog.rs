use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};

use crate::ui::components::input_line;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

/// Yes/no prompt drawn over the main screen.
pub struct ConfirmDialog<'a> {
    message: String,
    theme: &'a Theme,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(message: String, theme: &'a Theme) -> Self {
        Self { message, theme }
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        Clear.render(area, buf);

        let block = Block::bordered()
            .title(" Confirm ")
            .border_style(Style::default().fg(colors.warning()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![
            Line::from(Span::styled(self.message, Style::default().fg(colors.fg()))),
            Line::from(""),
            Line::from(Span::styled(
                "[y] Yes  [n] No",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorField {
    Word,
    Sentence,
}

impl EditorField {
    pub fn toggle(self) -> Self {
        match self {
            EditorField::Word => EditorField::Sentence,
            EditorField::Sentence => EditorField::Word,
        }
    }
}

/// Two-field form for adding or editing a word.
pub struct EditorDialog<'a> {
    title: &'a str,
    word: &'a LineInput,
    sentence: &'a LineInput,
    active: EditorField,
    error: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> EditorDialog<'a> {
    pub fn new(
        title: &'a str,
        word: &'a LineInput,
        sentence: &'a LineInput,
        active: EditorField,
        theme: &'a Theme,
    ) -> Self {
        Self {
            title,
            word,
            sentence,
            active,
            error: None,
            theme,
        }
    }

    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }
}

impl Widget for EditorDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        Clear.render(area, buf);

        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let text = Style::default().fg(colors.fg());
        let cursor = Style::default()
            .fg(colors.text_cursor_fg())
            .bg(colors.text_cursor_bg());

        for (field, input, label, row) in [
            (EditorField::Word, self.word, " Word ", rows[0]),
            (EditorField::Sentence, self.sentence, " Sentence ", rows[1]),
        ] {
            let focused = field == self.active;
            let border = if focused {
                colors.border_focused()
            } else {
                colors.border()
            };
            let field_block = Block::bordered()
                .title(label)
                .border_style(Style::default().fg(border));
            let field_inner = field_block.inner(row);
            field_block.render(row, buf);
            Paragraph::new(input_line(input, text, cursor, focused)).render(field_inner, buf);
        }

        if let Some(error) = self.error {
            Paragraph::new(Span::styled(error, Style::default().fg(colors.error())))
                .render(rows[2], buf);
        }

        Paragraph::new(Span::styled(
            "[Tab] Switch field  [Enter] Save  [Esc] Cancel",
            Style::default().fg(colors.text_pending()),
        ))
        .render(rows[3], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_field_toggle() {
        assert_eq!(EditorField::Word.toggle(), EditorField::Sentence);
        assert_eq!(EditorField::Sentence.toggle(), EditorField::Word);
    }

    #[test]
    fn test_confirm_dialog_renders_message() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 50, 7);
        let mut buf = Buffer::empty(area);
        ConfirmDialog::new("Remove \"cat\"?".to_string(), &theme).render(area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Remove \"cat\"?"));
        assert!(text.contains("[y] Yes"));
    }
}
