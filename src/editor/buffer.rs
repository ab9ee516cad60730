use ropey::Rope;

/// Cursor position in the body buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column (char offset within the line).
    pub col: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl Cursor {
    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.col_memory = col;
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

/// The body text buffer, backed by a rope.
///
/// Columns are char offsets, not bytes, so multi-byte input moves the
/// cursor one glyph at a time.
#[derive(Debug, Clone)]
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

    pub fn empty() -> Self {
        Self::from_text("")
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Content of a line without its trailing newline.
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let mut s = self.rope.line(line_idx).to_string();
        while s.ends_with('\n') || s.ends_with('\r') {
            s.pop();
        }
        Some(s)
    }

    /// Length of a line in chars, excluding the trailing newline.
    pub fn line_len(&self, line_idx: usize) -> usize {
        if line_idx >= self.rope.len_lines() {
            return 0;
        }
        let line = self.rope.line(line_idx);
        let mut len = line.len_chars();
        while len > 0 {
            let last = line.char(len - 1);
            if last == '\n' || last == '\r' {
                len -= 1;
            } else {
                break;
            }
        }
        len
    }

    /// Full buffer content.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Whitespace-separated word count. Counts over the flattened text
    /// so words spanning rope chunk boundaries are not double counted.
    pub fn word_count(&self) -> usize {
        self.text().split_whitespace().count()
    }

    /// Char index of the cursor in the rope.
    fn char_index(&self) -> usize {
        self.rope.line_to_char(self.cursor.line) + self.cursor.col
    }

    pub fn insert_char(&mut self, c: char) {
        self.rope.insert_char(self.char_index(), c);
        self.cursor.set_col(self.cursor.col + 1);
    }

    pub fn insert_newline(&mut self) {
        self.rope.insert_char(self.char_index(), '\n');
        self.cursor.line += 1;
        self.cursor.set_col(0);
    }

    /// Delete the char before the cursor; at column zero, join with the
    /// previous line.
    pub fn backspace(&mut self) {
        if self.cursor.col > 0 {
            let idx = self.char_index();
            self.rope.remove(idx - 1..idx);
            self.cursor.set_col(self.cursor.col - 1);
        } else if self.cursor.line > 0 {
            let new_col = self.line_len(self.cursor.line - 1);
            let idx = self.char_index();
            self.rope.remove(idx - 1..idx);
            self.cursor.line -= 1;
            self.cursor.set_col(new_col);
        }
    }

    /// Delete the char at the cursor; at end of line, join with the next
    /// line.
    pub fn delete_forward(&mut self) {
        let idx = self.char_index();
        if self.cursor.col < self.line_len(self.cursor.line) {
            self.rope.remove(idx..idx + 1);
        } else if self.cursor.line + 1 < self.rope.len_lines() {
            self.rope.remove(idx..idx + 1);
        }
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Up => {
                if self.cursor.line > 0 {
                    self.cursor.line -= 1;
                    self.cursor.col = self.cursor.col_memory.min(self.line_len(self.cursor.line));
                }
            }
            Direction::Down => {
                if self.cursor.line + 1 < self.rope.len_lines() {
                    self.cursor.line += 1;
                    self.cursor.col = self.cursor.col_memory.min(self.line_len(self.cursor.line));
                }
            }
            Direction::Left => {
                if self.cursor.col > 0 {
                    self.cursor.set_col(self.cursor.col - 1);
                } else if self.cursor.line > 0 {
                    self.cursor.line -= 1;
                    self.cursor.set_col(self.line_len(self.cursor.line));
                }
            }
            Direction::Right => {
                if self.cursor.col < self.line_len(self.cursor.line) {
                    self.cursor.set_col(self.cursor.col + 1);
                } else if self.cursor.line + 1 < self.rope.len_lines() {
                    self.cursor.line += 1;
                    self.cursor.set_col(0);
                }
            }
        }
    }

    pub fn move_home(&mut self) {
        self.cursor.set_col(0);
    }

    pub fn move_end(&mut self) {
        self.cursor.set_col(self.line_len(self.cursor.line));
    }

    /// Move to an absolute position, clamped to the buffer.
    pub fn move_to(&mut self, line: usize, col: usize) {
        self.cursor.line = line.min(self.rope.len_lines().saturating_sub(1));
        self.cursor.set_col(col.min(self.line_len(self.cursor.line)));
    }

    /// Jump to the last line of the buffer.
    pub fn move_to_end(&mut self) {
        self.cursor.line = self.rope.len_lines().saturating_sub(1);
        self.cursor.set_col(self.line_len(self.cursor.line));
    }
}
