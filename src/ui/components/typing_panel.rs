use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::trainer::snapshot::TrainerSnapshot;
use crate::trainer::typing::TypingFeedback;
use crate::ui::components::input_line;
use crate::ui::layout::LayoutTier;
use crate::ui::line_input::LineInput;
use crate::ui::theme::{Theme, ThemeColors};

pub struct TypingPanel<'a> {
    input: &'a LineInput,
    snapshot: &'a TrainerSnapshot,
    tier: LayoutTier,
    theme: &'a Theme,
}

impl<'a> TypingPanel<'a> {
    pub fn new(
        input: &'a LineInput,
        snapshot: &'a TrainerSnapshot,
        tier: LayoutTier,
        theme: &'a Theme,
    ) -> Self {
        Self {
            input,
            snapshot,
            tier,
            theme,
        }
    }
}

fn feedback_style(feedback: Option<TypingFeedback>, colors: &ThemeColors) -> Style {
    match feedback {
        Some(f) if f.is_correct() => Style::default().fg(colors.text_correct()),
        Some(_) => Style::default()
            .fg(colors.text_incorrect())
            .add_modifier(Modifier::BOLD),
        None => Style::default().fg(colors.fg()),
    }
}

impl Widget for TypingPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Typing Practice ")
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let direction = match self.tier {
            LayoutTier::Wide => Direction::Horizontal,
            LayoutTier::Narrow => Direction::Vertical,
        };
        let constraints = match self.tier {
            LayoutTier::Wide => [Constraint::Percentage(70), Constraint::Percentage(30)],
            LayoutTier::Narrow => [Constraint::Length(3), Constraint::Min(0)],
        };
        let parts = Layout::default()
            .direction(direction)
            .constraints(constraints)
            .split(inner);

        let style = feedback_style(self.snapshot.feedback, colors);
        let cursor = Style::default()
            .fg(colors.text_cursor_fg())
            .bg(colors.text_cursor_bg());
        let input_lines = vec![
            input_line(self.input, style, cursor, true),
            Line::from(""),
            Line::from(Span::styled(self.snapshot.feedback_text(), style)),
        ];
        Paragraph::new(input_lines).render(parts[0], buf);

        let stat_style = Style::default().fg(colors.accent());
        let stats = vec![
            Line::from(Span::styled(self.snapshot.streak_text(), stat_style)),
            Line::from(Span::styled(self.snapshot.accuracy_text(), stat_style)),
        ];
        Paragraph::new(stats).render(parts[1], buf);
    }
}
