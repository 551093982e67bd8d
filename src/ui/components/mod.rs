pub mod dialog;
pub mod search_bar;
pub mod typing_panel;
pub mod word_card;

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::ui::line_input::LineInput;

/// Render a line input as spans, drawing the cursor cell when focused.
pub fn input_line<'a>(input: &'a LineInput, text: Style, cursor: Style, focused: bool) -> Line<'a> {
    let (before, at, after) = input.render_parts();
    let mut spans = vec![Span::styled(before, text)];
    match (focused, at) {
        (true, Some(ch)) => {
            spans.push(Span::styled(ch.to_string(), cursor));
            spans.push(Span::styled(after, text));
        }
        (true, None) => spans.push(Span::styled(" ", cursor)),
        (false, Some(ch)) => {
            spans.push(Span::styled(ch.to_string(), text));
            spans.push(Span::styled(after, text));
        }
        (false, None) => {}
    }
    Line::from(spans)
}
