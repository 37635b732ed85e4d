//! Prompt text buffer
//!
//! Rope-backed text storage with a flat caret, undo/redo and file
//! load/save. The caret is tracked as a character index; the completion
//! core works on byte offsets, so the buffer converts at the seam.

use super::Movement;
use anyhow::{Context, Result};
use ropey::Rope;
use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;

/// Edit operation for undo/redo
#[derive(Debug, Clone)]
struct Edit {
    /// Character index where the edit occurred
    position: usize,
    /// Text that was inserted (empty if deletion)
    inserted: String,
    /// Text that was deleted (empty if insertion)
    deleted: String,
}

/// Text buffer with undo/redo support
pub struct TextBuffer {
    /// Text content (rope for efficient editing)
    content: Rope,

    /// Caret as a character index, `0..=len_chars`
    caret: usize,

    /// File path (if loaded from disk)
    pub path: Option<PathBuf>,

    /// Whether the buffer has unsaved changes
    pub dirty: bool,

    undo_stack: VecDeque<Edit>,
    redo_stack: VecDeque<Edit>,
}

impl TextBuffer {
    /// Create a new empty buffer
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            content: Rope::new(),
            caret: 0,
            path,
            dirty: false,
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
        }
    }

    /// Get text content as a string
    pub fn text(&self) -> String {
        self.content.to_string()
    }

    /// Caret as a character index
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Caret as a byte offset into `text()`
    pub fn caret_byte(&self) -> usize {
        self.content.char_to_byte(self.caret)
    }

    /// Line index of the caret
    pub fn caret_line(&self) -> usize {
        self.content.char_to_line(self.caret)
    }

    /// Column of the caret within its line, in characters
    pub fn caret_column(&self) -> usize {
        self.caret - self.content.line_to_char(self.caret_line())
    }

    /// Number of lines
    pub fn line_count(&self) -> usize {
        self.content.len_lines()
    }

    /// Line by index, without trailing newline
    pub fn line(&self, idx: usize) -> Option<String> {
        if idx >= self.content.len_lines() {
            return None;
        }
        let line = self.content.line(idx).to_string();
        Some(line.trim_end_matches(['\n', '\r']).to_string())
    }

    /// Insert text at the caret
    pub fn insert(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.undo_stack.push_back(Edit {
            position: self.caret,
            inserted: text.to_string(),
            deleted: String::new(),
        });
        self.redo_stack.clear();

        self.content.insert(self.caret, text);
        self.caret += text.chars().count();
        self.dirty = true;
    }

    /// Delete the character before the caret
    pub fn backspace(&mut self) {
        if self.caret == 0 {
            return;
        }
        let ch = self.content.char(self.caret - 1);
        self.undo_stack.push_back(Edit {
            position: self.caret - 1,
            inserted: String::new(),
            deleted: ch.to_string(),
        });
        self.redo_stack.clear();

        self.content.remove(self.caret - 1..self.caret);
        self.caret -= 1;
        self.dirty = true;
    }

    /// Delete the character at the caret
    pub fn delete(&mut self) {
        if self.caret >= self.content.len_chars() {
            return;
        }
        let ch = self.content.char(self.caret);
        self.undo_stack.push_back(Edit {
            position: self.caret,
            inserted: String::new(),
            deleted: ch.to_string(),
        });
        self.redo_stack.clear();

        self.content.remove(self.caret..self.caret + 1);
        self.dirty = true;
    }

    /// Replace the entire content, placing the caret at `caret_byte`.
    ///
    /// Used when a committed completion is spliced in. Recorded as a single
    /// undoable edit.
    pub fn replace(&mut self, text: String, caret_byte: usize) {
        let old = self.text();
        self.undo_stack.push_back(Edit {
            position: 0,
            inserted: text.clone(),
            deleted: old,
        });
        self.redo_stack.clear();

        self.content = Rope::from_str(&text);
        self.caret = self.content.byte_to_char(caret_byte.min(text.len()));
        self.dirty = true;
    }

    /// Undo the last edit
    pub fn undo(&mut self) -> bool {
        let Some(edit) = self.undo_stack.pop_back() else {
            return false;
        };

        if !edit.inserted.is_empty() {
            let len = edit.inserted.chars().count();
            self.content.remove(edit.position..edit.position + len);
            self.caret = edit.position;
        }
        if !edit.deleted.is_empty() {
            self.content.insert(edit.position, &edit.deleted);
            self.caret = edit.position + edit.deleted.chars().count();
        }

        self.redo_stack.push_back(edit);
        self.dirty = true;
        true
    }

    /// Redo the last undone edit
    pub fn redo(&mut self) -> bool {
        let Some(edit) = self.redo_stack.pop_back() else {
            return false;
        };

        if !edit.deleted.is_empty() {
            let len = edit.deleted.chars().count();
            self.content.remove(edit.position..edit.position + len);
            self.caret = edit.position;
        }
        if !edit.inserted.is_empty() {
            self.content.insert(edit.position, &edit.inserted);
            self.caret = edit.position + edit.inserted.chars().count();
        }

        self.undo_stack.push_back(edit);
        self.dirty = true;
        true
    }

    /// Move the caret
    pub fn move_caret(&mut self, movement: Movement) {
        match movement {
            Movement::Left => {
                self.caret = self.caret.saturating_sub(1);
            }
            Movement::Right => {
                self.caret = (self.caret + 1).min(self.content.len_chars());
            }
            Movement::Up => {
                let line = self.caret_line();
                if line > 0 {
                    let column = self.caret_column();
                    self.caret = self.content.line_to_char(line - 1)
                        + column.min(self.line_len(line - 1));
                }
            }
            Movement::Down => {
                let line = self.caret_line();
                if line + 1 < self.content.len_lines() {
                    let column = self.caret_column();
                    self.caret = self.content.line_to_char(line + 1)
                        + column.min(self.line_len(line + 1));
                }
            }
            Movement::LineStart => {
                self.caret = self.content.line_to_char(self.caret_line());
            }
            Movement::LineEnd => {
                let line = self.caret_line();
                self.caret = self.content.line_to_char(line) + self.line_len(line);
            }
        }
    }

    /// Line length in characters, excluding the trailing newline
    fn line_len(&self, idx: usize) -> usize {
        let line = self.content.line(idx);
        let mut len = line.len_chars();
        let text = line.to_string();
        len -= text.chars().rev().take_while(|c| *c == '\n' || *c == '\r').count();
        len
    }

    /// Load file from disk, resetting caret and history
    pub fn load_file(&mut self, path: PathBuf) -> Result<()> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        self.content = Rope::from_str(&content);
        self.path = Some(path);
        self.caret = 0;
        self.dirty = false;
        self.undo_stack.clear();
        self.redo_stack.clear();
        Ok(())
    }

    /// Save buffer to disk
    pub fn save_file(&mut self) -> Result<()> {
        let path = self.path.as_ref().ok_or(crate::error::StudioError::NoFilePath)?;

        fs::write(path, self.text())
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        self.dirty = false;
        Ok(())
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_insert_and_caret() {
        let mut buffer = TextBuffer::default();
        buffer.insert("hello");
        assert_eq!(buffer.text(), "hello");
        assert_eq!(buffer.caret(), 5);
        assert!(buffer.dirty);
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut buffer = TextBuffer::default();
        buffer.insert("abc");
        buffer.backspace();
        assert_eq!(buffer.text(), "ab");

        buffer.move_caret(Movement::LineStart);
        buffer.delete();
        assert_eq!(buffer.text(), "b");

        // No-ops at the edges
        buffer.move_caret(Movement::LineEnd);
        buffer.delete();
        buffer.move_caret(Movement::LineStart);
        buffer.backspace();
        assert_eq!(buffer.text(), "b");
    }

    #[test]
    fn test_vertical_movement_clamps_column() {
        let mut buffer = TextBuffer::default();
        buffer.insert("long line here\nab\nanother long one");

        buffer.move_caret(Movement::Up); // to "ab", clamped to len 2
        assert_eq!(buffer.caret_line(), 1);
        assert!(buffer.caret_column() <= 2);

        buffer.move_caret(Movement::Down);
        assert_eq!(buffer.caret_line(), 2);
    }

    #[test]
    fn test_caret_byte_multibyte() {
        let mut buffer = TextBuffer::default();
        buffer.insert("héllo");
        assert_eq!(buffer.caret(), 5);
        // 'é' is two bytes
        assert_eq!(buffer.caret_byte(), 6);
    }

    #[test]
    fn test_replace_positions_caret() {
        let mut buffer = TextBuffer::default();
        buffer.insert("a cat, __col");
        buffer.replace("a cat, __colors__".to_string(), 17);
        assert_eq!(buffer.text(), "a cat, __colors__");
        assert_eq!(buffer.caret(), 17);
    }

    #[test]
    fn test_undo_redo_roundtrip() {
        let mut buffer = TextBuffer::default();
        buffer.insert("hello");
        buffer.insert(" world");
        assert_eq!(buffer.text(), "hello world");

        assert!(buffer.undo());
        assert_eq!(buffer.text(), "hello");

        assert!(buffer.redo());
        assert_eq!(buffer.text(), "hello world");

        // Replace is a single undoable step
        buffer.replace("swapped".to_string(), 7);
        assert!(buffer.undo());
        assert_eq!(buffer.text(), "hello world");
    }

    #[test]
    fn test_file_load_save() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("prompt.txt");
        fs::write(&path, "a __colors__ dress").unwrap();

        let mut buffer = TextBuffer::default();
        buffer.load_file(path.clone()).unwrap();
        assert_eq!(buffer.text(), "a __colors__ dress");
        assert!(!buffer.dirty);

        buffer.move_caret(Movement::LineEnd);
        buffer.insert(".");
        buffer.save_file().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a __colors__ dress.");
    }
}
