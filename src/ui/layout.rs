use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Wide,   // ≥80 cols: typing stats beside the input
    Narrow, // <80 cols: typing stats stacked under the input
}

impl LayoutTier {
    pub fn from_area(area: Rect) -> Self {
        if area.width >= 80 {
            LayoutTier::Wide
        } else {
            LayoutTier::Narrow
        }
    }

    pub fn typing_height(&self) -> u16 {
        match self {
            LayoutTier::Wide => 5,
            LayoutTier::Narrow => 7,
        }
    }
}

pub struct AppLayout {
    pub header: Rect,
    pub search: Rect,
    pub card: Rect,
    pub typing: Option<Rect>,
    pub message: Rect,
    pub footer: Rect,
    pub tier: LayoutTier,
}

impl AppLayout {
    pub fn new(area: Rect, typing_mode: bool, footer_lines: u16) -> Self {
        let tier = LayoutTier::from_area(area);

        let mut constraints = vec![
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(6),
        ];
        if typing_mode {
            constraints.push(Constraint::Length(tier.typing_height()));
        }
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Length(footer_lines.max(1)));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let (typing, rest) = if typing_mode {
            (Some(rows[3]), 4)
        } else {
            (None, 3)
        };

        Self {
            header: rows[0],
            search: rows[1],
            card: rows[2],
            typing,
            message: rows[rest],
            footer: rows[rest + 1],
            tier,
        }
    }
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = "  ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints {
        if hint.is_empty() {
            continue;
        }
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width {
            current = candidate;
            has_hint = true;
        } else {
            if has_hint {
                out.push(current);
            }
            current = format!("{prefix}{hint}");
            has_hint = true;
        }
    }

    if has_hint {
        out.push(current);
    }
    out
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 40;
    const MIN_POPUP_HEIGHT: u16 = 7;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_without_typing() {
        let layout = AppLayout::new(Rect::new(0, 0, 100, 30), false, 1);
        assert!(layout.typing.is_none());
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.footer.y + layout.footer.height, 30);
        assert_eq!(layout.tier, LayoutTier::Wide);
    }

    #[test]
    fn test_layout_with_typing_narrow() {
        let layout = AppLayout::new(Rect::new(0, 0, 60, 30), true, 2);
        let typing = layout.typing.unwrap();
        assert_eq!(typing.height, 7);
        assert_eq!(layout.footer.height, 2);
        assert!(layout.message.y > typing.y);
    }

    #[test]
    fn test_pack_hint_lines_wraps() {
        let lines = pack_hint_lines(&["[n] Next", "[p] Previous", "[q] Quit"], 24);
        assert_eq!(lines, vec!["  [n] Next  [p] Previous", "  [q] Quit"]);
    }

    #[test]
    fn test_pack_hint_lines_zero_width() {
        assert!(pack_hint_lines(&["[q] Quit"], 0).is_empty());
    }

    #[test]
    fn test_centered_rect_stays_inside() {
        let area = Rect::new(0, 0, 30, 5);
        let rect = centered_rect(50, 50, area);
        assert!(rect.width <= area.width && rect.height <= area.height);
    }
}
