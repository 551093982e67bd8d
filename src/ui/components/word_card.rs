use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::trainer::snapshot::{TrainerSnapshot, WordDisplay};
use crate::ui::theme::Theme;

pub struct WordCard<'a> {
    snapshot: &'a TrainerSnapshot,
    theme: &'a Theme,
}

impl<'a> WordCard<'a> {
    pub fn new(snapshot: &'a TrainerSnapshot, theme: &'a Theme) -> Self {
        Self { snapshot, theme }
    }

    fn title(&self) -> String {
        match &self.snapshot.display {
            WordDisplay::Word { position, .. } => {
                format!(" Word {}/{} ", position, self.snapshot.filtered)
            }
            _ => " Word ".to_string(),
        }
    }
}

impl Widget for WordCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(self.title())
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let (word, sentence, word_style) = match &self.snapshot.display {
            WordDisplay::Word { word, .. } => (
                word.word.as_str(),
                word.sentence.as_str(),
                Style::default().fg(colors.word()).add_modifier(Modifier::BOLD),
            ),
            other => {
                let (w, s) = other.placeholder().unwrap_or(("", ""));
                let style = if matches!(other, WordDisplay::LoadFailed) {
                    Style::default().fg(colors.error())
                } else {
                    Style::default().fg(colors.text_pending())
                };
                (w, s, style)
            }
        };

        // Vertically center the word + blank + sentence block
        let top_pad = inner.height.saturating_sub(3) / 2;
        let mut lines: Vec<Line> = (0..top_pad).map(|_| Line::from("")).collect();
        lines.push(Line::from(Span::styled(word, word_style)));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            sentence,
            Style::default()
                .fg(colors.sentence())
                .add_modifier(Modifier::ITALIC),
        )));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
