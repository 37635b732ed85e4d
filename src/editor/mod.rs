//! Prompt editor
//!
//! Owns the text buffer and the suggestion list and wires the completion
//! control flow: keystroke → trigger detection → ranking → show/hide;
//! commit → splice → change notification. Navigation keys never re-run
//! detection, so the list stays steady while the user moves through it.

mod buffer;
mod widget;

pub use buffer::TextBuffer;
pub use widget::{popup_area, EditorState, EditorWidget, PopupState, PopupWidget};

use crate::catalog::CandidateCatalog;
use crate::popup::{Completion, SuggestionList};
use crate::rank::rank;
use crate::trigger::detect;

/// Caret movement commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// Move left one character
    Left,
    /// Move right one character
    Right,
    /// Move up one line
    Up,
    /// Move down one line
    Down,
    /// Move to start of line
    LineStart,
    /// Move to end of line
    LineEnd,
}

/// Editor for a prompt text buffer with inline autocompletion
pub struct PromptEditor {
    buffer: TextBuffer,
    suggestions: SuggestionList,
    catalog: CandidateCatalog,
    on_change: Option<Box<dyn FnMut(&str)>>,
}

impl PromptEditor {
    /// Create an editor over a candidate catalog
    pub fn new(catalog: CandidateCatalog) -> Self {
        Self {
            buffer: TextBuffer::default(),
            suggestions: SuggestionList::new(),
            catalog,
            on_change: None,
        }
    }

    /// Register the host change-notification hook, invoked with the full
    /// buffer content after every committed completion
    pub fn set_on_change(&mut self, callback: impl FnMut(&str) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// The underlying text buffer
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Mutable access to the underlying text buffer.
    ///
    /// Direct buffer edits bypass suggestion tracking; callers that mutate
    /// text through this handle should follow up with a typing operation or
    /// `cancel()`.
    pub fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }

    /// The suggestion list state
    pub fn suggestions(&self) -> &SuggestionList {
        &self.suggestions
    }

    /// Type one character
    pub fn type_char(&mut self, c: char) {
        self.buffer.insert(&c.to_string());
        self.refresh_suggestions();
    }

    /// Insert a line break (only reachable when no suggestion is pending)
    pub fn newline(&mut self) {
        self.buffer.insert("\n");
        self.refresh_suggestions();
    }

    /// Delete the character before the caret
    pub fn backspace(&mut self) {
        self.buffer.backspace();
        self.refresh_suggestions();
    }

    /// Delete the character at the caret
    pub fn delete_forward(&mut self) {
        self.buffer.delete();
        self.refresh_suggestions();
    }

    /// Handle a navigation key.
    ///
    /// While the list is open, Up/Down move the selection instead of the
    /// caret. Navigation never re-runs trigger detection.
    pub fn arrow(&mut self, movement: Movement) {
        if self.suggestions.is_visible() {
            match movement {
                Movement::Up => {
                    self.suggestions.navigate(-1);
                    return;
                }
                Movement::Down => {
                    self.suggestions.navigate(1);
                    return;
                }
                _ => {}
            }
        }
        self.buffer.move_caret(movement);
    }

    /// Accept the selected suggestion (Enter/Tab).
    ///
    /// Returns false when no suggestion was pending, leaving the keystroke
    /// to its ordinary meaning.
    pub fn confirm(&mut self) -> bool {
        match self.suggestions.commit() {
            Some(completion) => {
                self.apply_completion(completion);
                true
            }
            None => false,
        }
    }

    /// Dismiss the suggestion list (Escape)
    pub fn cancel(&mut self) {
        self.suggestions.hide();
    }

    /// Pointer press outside both the list and the text area collapses the
    /// list (focus-loss analog)
    pub fn pointer_outside(&mut self) {
        self.suggestions.hide();
    }

    /// Pointer hover over a rendered entry moves the selection
    pub fn hover(&mut self, index: usize) {
        self.suggestions.hover(index);
    }

    /// Pointer press on a rendered entry selects and commits it
    pub fn click(&mut self, index: usize) -> bool {
        if !self.suggestions.is_visible() {
            return false;
        }
        self.suggestions.hover(index);
        self.confirm()
    }

    /// Re-run detection and ranking against the current buffer and caret
    fn refresh_suggestions(&mut self) {
        let text = self.buffer.text();
        match detect(&text, self.buffer.caret_byte()) {
            Some(context) => {
                let snapshot = self.catalog.snapshot();
                let ranked = rank(&context.query, snapshot.candidates(context.kind));
                self.suggestions.show(context, ranked);
            }
            None => self.suggestions.hide(),
        }
    }

    fn apply_completion(&mut self, completion: Completion) {
        let text = self.buffer.text();
        let (new_text, caret) = completion.apply(&text);
        self.buffer.replace(new_text, caret);
        if let Some(callback) = self.on_change.as_mut() {
            callback(&self.buffer.text());
        }
    }
}
