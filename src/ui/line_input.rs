use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    /// Key consumed, text unchanged (cursor movement, ignored keys).
    Continue,
    /// Text was edited.
    Changed,
    Submit,
    Cancel,
}

/// Single-line text field used for the search box, the typing-practice
/// input and the add/edit dialog.
#[derive(Clone, Debug, Default)]
pub struct LineInput {
    text: String,
    /// Cursor position as a char index (0 = before first char).
    cursor: usize,
}

impl LineInput {
    pub fn new(text: &str) -> Self {
        let cursor = text.chars().count();
        Self {
            text: text.to_string(),
            cursor,
        }
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Returns (before_cursor, cursor_char, after_cursor) for styled rendering.
    /// When cursor is at end of text, cursor_char is None.
    pub fn render_parts(&self) -> (&str, Option<char>, &str) {
        let byte_offset = self.char_to_byte(self.cursor);
        match self.text[byte_offset..].chars().next() {
            None => (&self.text, None, ""),
            Some(ch) => {
                let next_byte = byte_offset + ch.len_utf8();
                (&self.text[..byte_offset], Some(ch), &self.text[next_byte..])
            }
        }
    }

    pub fn handle(&mut self, key: KeyEvent) -> InputResult {
        match key.code {
            KeyCode::Esc => return InputResult::Cancel,
            KeyCode::Enter => return InputResult::Submit,

            KeyCode::Left => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
            }
            KeyCode::Right => {
                let len = self.text.chars().count();
                if self.cursor < len {
                    self.cursor += 1;
                }
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.text.chars().count(),
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return InputResult::Continue;
                }
                let byte_offset = self.char_to_byte(self.cursor - 1);
                self.remove_char_at(byte_offset);
                self.cursor -= 1;
                return InputResult::Changed;
            }
            KeyCode::Delete => {
                if self.cursor >= self.text.chars().count() {
                    return InputResult::Continue;
                }
                let byte_offset = self.char_to_byte(self.cursor);
                self.remove_char_at(byte_offset);
                return InputResult::Changed;
            }
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.cursor = 0;
            }
            KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.cursor = self.text.chars().count();
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if self.text.is_empty() {
                    return InputResult::Continue;
                }
                self.clear();
                return InputResult::Changed;
            }
            KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return if self.delete_word_back() {
                    InputResult::Changed
                } else {
                    InputResult::Continue
                };
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let byte_offset = self.char_to_byte(self.cursor);
                self.text.insert(byte_offset, ch);
                self.cursor += 1;
                return InputResult::Changed;
            }
            _ => {}
        }
        InputResult::Continue
    }

    /// Convert char index to byte offset.
    fn char_to_byte(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }

    fn remove_char_at(&mut self, byte_offset: usize) {
        if let Some(ch) = self.text[byte_offset..].chars().next() {
            self.text
                .replace_range(byte_offset..byte_offset + ch.len_utf8(), "");
        }
    }

    /// Delete word before cursor (unix-word-rubout: skip whitespace, then non-whitespace).
    fn delete_word_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = self.cursor;

        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !chars[pos - 1].is_whitespace() {
            pos -= 1;
        }

        let start_byte = self.char_to_byte(pos);
        let end_byte = self.char_to_byte(self.cursor);
        self.text.replace_range(start_byte..end_byte, "");
        self.cursor = pos;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    #[test]
    fn insert_reports_changed() {
        let mut input = LineInput::default();
        assert_eq!(input.handle(key(KeyCode::Char('h'))), InputResult::Changed);
        assert_eq!(input.handle(key(KeyCode::Char('é'))), InputResult::Changed);
        assert_eq!(input.value(), "hé");
    }

    #[test]
    fn insert_at_start_middle_end() {
        let mut input = LineInput::new("ac");
        input.handle(key(KeyCode::Char('d')));
        assert_eq!(input.value(), "acd");

        input.handle(key(KeyCode::Home));
        input.handle(key(KeyCode::Char('z')));
        assert_eq!(input.value(), "zacd");
        assert_eq!(input.cursor, 1);

        input.handle(key(KeyCode::Right));
        input.handle(key(KeyCode::Char('b')));
        assert_eq!(input.value(), "zabcd");
        assert_eq!(input.cursor, 3);
    }

    #[test]
    fn backspace_at_boundaries() {
        let mut input = LineInput::new("ab");
        assert_eq!(input.handle(key(KeyCode::Backspace)), InputResult::Changed);
        assert_eq!(input.value(), "a");
        input.handle(key(KeyCode::Backspace));
        assert_eq!(input.value(), "");
        // Backspace on empty -> no panic, no change
        assert_eq!(input.handle(key(KeyCode::Backspace)), InputResult::Continue);
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn backspace_multibyte() {
        let mut input = LineInput::new("niño");
        input.handle(key(KeyCode::Left));
        input.handle(key(KeyCode::Backspace));
        assert_eq!(input.value(), "nio");
    }

    #[test]
    fn delete_at_boundaries() {
        let mut input = LineInput::new("ab");
        input.handle(key(KeyCode::Home));
        assert_eq!(input.handle(key(KeyCode::Delete)), InputResult::Changed);
        assert_eq!(input.value(), "b");
        assert_eq!(input.cursor, 0);

        input.handle(key(KeyCode::End));
        assert_eq!(input.handle(key(KeyCode::Delete)), InputResult::Continue);
        assert_eq!(input.value(), "b");
    }

    #[test]
    fn ctrl_w_word_delete() {
        let mut input = LineInput::new("foo bar  ");
        input.handle(ctrl('w'));
        assert_eq!(input.value(), "foo ");

        let mut empty = LineInput::new("");
        assert_eq!(empty.handle(ctrl('w')), InputResult::Continue);
    }

    #[test]
    fn cursor_moves_do_not_change() {
        let mut input = LineInput::new("hello");
        assert_eq!(input.handle(key(KeyCode::Home)), InputResult::Continue);
        assert_eq!(input.cursor, 0);
        input.handle(key(KeyCode::Left));
        assert_eq!(input.cursor, 0);
        input.handle(ctrl('e'));
        assert_eq!(input.cursor, 5);
        input.handle(key(KeyCode::Right));
        assert_eq!(input.cursor, 5);
    }

    #[test]
    fn ctrl_u_clears() {
        let mut input = LineInput::new("hello world");
        assert_eq!(input.handle(ctrl('u')), InputResult::Changed);
        assert_eq!(input.value(), "");
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn enter_and_esc() {
        let mut input = LineInput::new("x");
        assert_eq!(input.handle(key(KeyCode::Enter)), InputResult::Submit);
        assert_eq!(input.handle(key(KeyCode::Esc)), InputResult::Cancel);
        assert_eq!(input.value(), "x");
    }

    #[test]
    fn render_parts_splits_at_cursor() {
        let mut input = LineInput::new("abc");
        assert_eq!(input.render_parts(), ("abc", None, ""));
        input.handle(key(KeyCode::Left));
        assert_eq!(input.render_parts(), ("ab", Some('c'), ""));
    }
}
