//! Single-line text buffer for the search box.

/// Editable text with a byte cursor that always sits on a char boundary.
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    text: String,
    cursor: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Remove the char before the cursor. Returns false at the start of the line.
    pub fn backspace(&mut self) -> bool {
        match self.prev_boundary() {
            Some(prev) => {
                self.text.replace_range(prev..self.cursor, "");
                self.cursor = prev;
                true
            }
            None => false,
        }
    }

    /// Remove the word before the cursor, along with any spaces trailing it.
    pub fn delete_word(&mut self) -> bool {
        let head = &self.text[..self.cursor];
        let trimmed = head.trim_end();
        let start = trimmed
            .rfind(char::is_whitespace)
            .map(|i| i + trimmed[i..].chars().next().map_or(1, char::len_utf8))
            .unwrap_or(0);
        if start == self.cursor {
            return false;
        }
        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
        true
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.text[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Cursor position in chars, for placing the terminal caret.
    pub fn cursor_column(&self) -> usize {
        self.text[..self.cursor].chars().count()
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace() {
        let mut input = InputBuffer::new();
        for c in "142".chars() {
            input.insert(c);
        }
        assert_eq!(input.as_str(), "142");
        assert!(input.backspace());
        assert_eq!(input.as_str(), "14");
        assert_eq!(input.cursor_column(), 2);
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut input = InputBuffer::new();
        assert!(!input.backspace());
        input.set("ab");
        input.move_home();
        assert!(!input.backspace());
        assert_eq!(input.as_str(), "ab");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = InputBuffer::new();
        input.set("héllo");
        input.move_left();
        input.move_left();
        input.move_left();
        assert_eq!(input.cursor_column(), 2);
        input.backspace();
        assert_eq!(input.as_str(), "hllo");
        input.insert('é');
        assert_eq!(input.as_str(), "héllo");
    }

    #[test]
    fn test_delete_word() {
        let mut input = InputBuffer::new();
        input.set("improve data quality  ");
        assert!(input.delete_word());
        assert_eq!(input.as_str(), "improve data ");
        assert!(input.delete_word());
        assert_eq!(input.as_str(), "improve ");
        assert!(input.delete_word());
        assert_eq!(input.as_str(), "");
        assert!(!input.delete_word());
    }

    #[test]
    fn test_insert_mid_line() {
        let mut input = InputBuffer::new();
        input.set("12");
        input.move_left();
        input.insert('4');
        assert_eq!(input.as_str(), "142");
        input.move_end();
        assert_eq!(input.cursor_column(), 3);
    }
}
