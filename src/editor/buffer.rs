use ropey::Rope;

/// Cursor position in the editor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Byte offset within the line.
    pub col: usize,
    /// Column to return to when moving vertically through shorter lines.
    goal_col: usize,
}

impl Cursor {
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            goal_col: col,
        }
    }

    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.goal_col = col;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::at(0, 0)
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The editor pane's input buffer.
///
/// Lines are separated by `\n` only, matching the highlighter; a `\r` is
/// ordinary line content. Columns are byte offsets and always sit on a char
/// boundary.
pub struct EditorBuffer {
    rope: Rope,
    cursor: Cursor,
}

impl EditorBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::default(),
        }
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Replace the whole content, keeping the cursor as close as possible to
    /// where it was.
    pub fn replace_text(&mut self, text: &str) {
        let Cursor { line, col, .. } = self.cursor;
        self.rope = Rope::from_str(text);
        self.move_to(line, col);
    }

    /// Number of lines; an empty buffer has one.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Content of a line without its `\n`.
    pub fn line(&self, idx: usize) -> Option<String> {
        if idx >= self.line_count() {
            return None;
        }
        let mut text = self.rope.line(idx).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        Some(text)
    }

    pub fn line_len(&self, idx: usize) -> usize {
        self.line(idx).map_or(0, |l| l.len())
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' {
            self.split_line();
            return;
        }
        let at = self.cursor_char_idx();
        self.rope.insert_char(at, ch);
        self.cursor.set_col(self.cursor.col + ch.len_utf8());
    }

    /// Insert text at the cursor and leave the cursor after it.
    pub fn insert_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let at = self.cursor_char_idx();
        self.rope.insert(at, text);
        match text.rsplit_once('\n') {
            Some((head, tail)) => {
                self.cursor.line += head.matches('\n').count() + 1;
                self.cursor.set_col(tail.len());
            }
            None => self.cursor.set_col(self.cursor.col + text.len()),
        }
    }

    pub fn split_line(&mut self) {
        let at = self.cursor_char_idx();
        self.rope.insert_char(at, '\n');
        self.cursor.line += 1;
        self.cursor.set_col(0);
    }

    /// Backspace. Returns `false` at the start of the buffer.
    pub fn delete_back(&mut self) -> bool {
        let at = self.cursor_char_idx();
        if at == 0 {
            return false;
        }
        if self.cursor.col == 0 {
            let prev_len = self.line_len(self.cursor.line - 1);
            self.rope.remove(at - 1..at);
            self.cursor.line -= 1;
            self.cursor.set_col(prev_len);
        } else {
            let width = self.rope.char(at - 1).len_utf8();
            self.rope.remove(at - 1..at);
            self.cursor.set_col(self.cursor.col - width);
        }
        true
    }

    /// Delete. Returns `false` at the end of the buffer.
    pub fn delete_forward(&mut self) -> bool {
        let at = self.cursor_char_idx();
        if at >= self.rope.len_chars() {
            return false;
        }
        self.rope.remove(at..=at);
        true
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up if self.cursor.line > 0 => self.move_vertical(self.cursor.line - 1),
            Direction::Down if self.cursor.line + 1 < self.line_count() => {
                self.move_vertical(self.cursor.line + 1);
            }
            Direction::Up | Direction::Down => {}
        }
    }

    pub const fn move_home(&mut self) {
        self.cursor.set_col(0);
    }

    pub fn move_end(&mut self) {
        self.cursor.set_col(self.line_len(self.cursor.line));
    }

    /// Move to the start of the previous word, wrapping to the previous line.
    pub fn move_word_left(&mut self) {
        if self.cursor.col == 0 {
            if self.cursor.line > 0 {
                self.cursor.line -= 1;
                self.move_end();
            }
            return;
        }
        let line = self.line(self.cursor.line).unwrap_or_default();
        let before = &line[..self.cursor.col];
        let word_end = before.trim_end_matches(|c: char| !is_word_char(c)).len();
        let word_start = before[..word_end]
            .char_indices()
            .rev()
            .take_while(|(_, c)| is_word_char(*c))
            .last()
            .map_or(word_end, |(i, _)| i);
        self.cursor.set_col(word_start);
    }

    /// Move past the current word and the gap after it, wrapping to the next
    /// line.
    pub fn move_word_right(&mut self) {
        let line = self.line(self.cursor.line).unwrap_or_default();
        if self.cursor.col >= line.len() {
            if self.cursor.line + 1 < self.line_count() {
                self.cursor.line += 1;
                self.cursor.set_col(0);
            }
            return;
        }
        let after = &line[self.cursor.col..];
        let rest = after.trim_start_matches(is_word_char);
        let rest = rest.trim_start_matches(|c: char| !is_word_char(c));
        self.cursor.set_col(line.len() - rest.len());
    }

    /// Move to `(line, col)`, clamped to the buffer and to a char boundary.
    pub fn move_to(&mut self, line: usize, col: usize) {
        self.cursor.line = line.min(self.line_count().saturating_sub(1));
        let text = self.line(self.cursor.line).unwrap_or_default();
        self.cursor.set_col(floor_char_boundary(&text, col));
    }

    pub const fn move_to_start(&mut self) {
        self.cursor.line = 0;
        self.cursor.set_col(0);
    }

    pub fn move_to_end(&mut self) {
        self.cursor.line = self.line_count().saturating_sub(1);
        self.move_end();
    }

    fn cursor_char_idx(&self) -> usize {
        let byte = self.rope.line_to_byte(self.cursor.line) + self.cursor.col;
        self.rope.byte_to_char(byte.min(self.rope.len_bytes()))
    }

    fn move_left(&mut self) {
        if self.cursor.col == 0 {
            if self.cursor.line > 0 {
                self.cursor.line -= 1;
                self.move_end();
            }
            return;
        }
        let line = self.line(self.cursor.line).unwrap_or_default();
        let width = line[..self.cursor.col]
            .chars()
            .next_back()
            .map_or(1, char::len_utf8);
        self.cursor.set_col(self.cursor.col - width);
    }

    fn move_right(&mut self) {
        let line = self.line(self.cursor.line).unwrap_or_default();
        if let Some(ch) = line[self.cursor.col..].chars().next() {
            self.cursor.set_col(self.cursor.col + ch.len_utf8());
        } else if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        }
    }

    fn move_vertical(&mut self, target: usize) {
        let goal = self.cursor.goal_col;
        self.cursor.line = target;
        let text = self.line(target).unwrap_or_default();
        self.cursor.col = floor_char_boundary(&text, goal);
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field("lines", &self.rope.len_lines())
            .field("cursor", &self.cursor)
            .finish()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn floor_char_boundary(text: &str, col: usize) -> usize {
    let mut col = col.min(text.len());
    while !text.is_char_boundary(col) {
        col -= 1;
    }
    col
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = EditorBuffer::from_text("");
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line(0), Some(String::new()));
    }

    #[test]
    fn test_trailing_newline_gives_empty_last_line() {
        let buf = EditorBuffer::from_text("hello\n");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line(1), Some(String::new()));
    }

    #[test]
    fn test_carriage_return_is_line_content() {
        let buf = EditorBuffer::from_text("a\r\nb\rc");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line(0), Some("a\r".to_string()));
        assert_eq!(buf.line(1), Some("b\rc".to_string()));
    }

    #[test]
    fn test_text_roundtrip() {
        let content = "# one\n\n**two**\n";
        assert_eq!(EditorBuffer::from_text(content).text(), content);
    }

    #[test]
    fn test_insert_char_advances_cursor() {
        let mut buf = EditorBuffer::from_text("ello");
        buf.insert_char('h');
        assert_eq!(buf.text(), "hello");
        assert_eq!(buf.cursor(), Cursor::at(0, 1));
    }

    #[test]
    fn test_insert_multibyte_char() {
        let mut buf = EditorBuffer::from_text("caf");
        buf.move_end();
        buf.insert_char('é');
        assert_eq!(buf.text(), "café");
        assert_eq!(buf.cursor().col, 5);
    }

    #[test]
    fn test_insert_str_multiline_moves_to_end_of_paste() {
        let mut buf = EditorBuffer::from_text("ab");
        buf.move_to(0, 1);
        buf.insert_str("x\ny\nzz");
        assert_eq!(buf.text(), "ax\ny\nzzb");
        assert_eq!(buf.cursor(), Cursor::at(2, 2));
    }

    #[test]
    fn test_split_and_rejoin() {
        let mut buf = EditorBuffer::from_text("helloworld");
        buf.move_to(0, 5);
        buf.split_line();
        assert_eq!(buf.line(0), Some("hello".to_string()));
        assert_eq!(buf.line(1), Some("world".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(1, 0));

        assert!(buf.delete_back());
        assert_eq!(buf.text(), "helloworld");
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_delete_back_at_start_is_noop() {
        let mut buf = EditorBuffer::from_text("x");
        assert!(!buf.delete_back());
        assert_eq!(buf.text(), "x");
    }

    #[test]
    fn test_delete_back_multibyte() {
        let mut buf = EditorBuffer::from_text("café");
        buf.move_end();
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "caf");
        assert_eq!(buf.cursor().col, 3);
    }

    #[test]
    fn test_delete_forward_joins_lines() {
        let mut buf = EditorBuffer::from_text("a\nb");
        buf.move_end();
        assert!(buf.delete_forward());
        assert_eq!(buf.text(), "ab");
        buf.move_to_end();
        assert!(!buf.delete_forward());
    }

    #[test]
    fn test_vertical_motion_remembers_column() {
        let mut buf = EditorBuffer::from_text("long line\nab\nanother line");
        buf.move_to(0, 7);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 2);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 7);
    }

    #[test]
    fn test_vertical_motion_lands_on_char_boundary() {
        let mut buf = EditorBuffer::from_text("abc\néé");
        buf.move_to(0, 3);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 2);
    }

    #[test]
    fn test_left_right_wrap_lines() {
        let mut buf = EditorBuffer::from_text("ab\ncd");
        buf.move_to(1, 0);
        buf.move_cursor(Direction::Left);
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
        buf.move_cursor(Direction::Right);
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_word_motion() {
        let mut buf = EditorBuffer::from_text("hello **big** world");
        buf.move_word_right();
        assert_eq!(buf.cursor().col, 8);
        buf.move_word_right();
        assert_eq!(buf.cursor().col, 14);
        buf.move_word_left();
        assert_eq!(buf.cursor().col, 8);
        buf.move_word_left();
        assert_eq!(buf.cursor().col, 0);
    }

    #[test]
    fn test_replace_text_clamps_cursor() {
        let mut buf = EditorBuffer::from_text("first line\nsecond line");
        buf.move_to(1, 8);
        buf.replace_text("short");
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
        assert_eq!(buf.text(), "short");
    }

    #[test]
    fn test_move_to_start_and_end() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_to_end();
        assert_eq!(buf.cursor(), Cursor::at(1, 5));
        buf.move_to_start();
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
    }
}
