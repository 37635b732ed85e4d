//! Suggestion list state machine
//!
//! Owns the selection cursor over a ranked candidate list and produces the
//! splice data on commit. Rendering is a separate concern (see
//! `editor::widget`); this state is pure and every operation is total —
//! "nothing to commit" degrades to a no-op, never a panic.

use crate::trigger::CompletionContext;

/// Maximum number of candidates rendered and navigable, regardless of how
/// many matched. The true match count is reported separately.
pub const SUGGESTION_CAP: usize = 50;

/// Splice data returned from a committed selection.
///
/// The caller applies it to the host buffer; the suffix is taken from the
/// caret captured at trigger time, not at commit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Fully-formed replacement text (opener-specific)
    pub replacement: String,
    /// Byte offset the replacement is spliced from
    pub start: usize,
    /// Trigger-time caret byte offset (end of the spliced-out region)
    pub caret: usize,
}

impl Completion {
    /// Splice the completion into `buffer`.
    ///
    /// Returns the new buffer content and the new caret byte offset, placed
    /// directly after the replacement. Stale offsets are clamped to the
    /// nearest valid boundary rather than panicking.
    pub fn apply(&self, buffer: &str) -> (String, usize) {
        let start = floor_char_boundary(buffer, self.start);
        let caret = floor_char_boundary(buffer, self.caret).max(start);
        let prefix = &buffer[..start];
        let suffix = &buffer[caret..];

        let new_caret = start + self.replacement.len();
        (format!("{prefix}{}{suffix}", self.replacement), new_caret)
    }
}

/// Largest valid char boundary at or below `index`
fn floor_char_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Keyboard- and mouse-navigable suggestion list
///
/// Invariants: `selected < min(len, SUGGESTION_CAP)` whenever the list is
/// visible and non-empty; the list is hidden whenever it is empty.
#[derive(Default)]
pub struct SuggestionList {
    items: Vec<String>,
    selected: usize,
    visible: bool,
    context: Option<CompletionContext>,
}

impl SuggestionList {
    /// Create a new, hidden suggestion list
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the list for a detected context with an already-ranked result.
    ///
    /// An empty result hides the list instead — there is no visible state
    /// with nothing to show. Selection resets to the top entry.
    pub fn show(&mut self, context: CompletionContext, ranked: Vec<String>) {
        if ranked.is_empty() {
            self.hide();
            return;
        }
        self.items = ranked;
        self.selected = 0;
        self.visible = true;
        self.context = Some(context);
    }

    /// Hide the list and clear its items
    pub fn hide(&mut self) {
        self.items.clear();
        self.selected = 0;
        self.visible = false;
        self.context = None;
    }

    /// Whether the list is currently shown
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// True match count, before display capping
    pub fn total(&self) -> usize {
        self.items.len()
    }

    /// Number of navigable entries (capped)
    pub fn visible_count(&self) -> usize {
        self.items.len().min(SUGGESTION_CAP)
    }

    /// Whether more candidates matched than are shown
    pub fn is_truncated(&self) -> bool {
        self.items.len() > SUGGESTION_CAP
    }

    /// Entries available for rendering (capped)
    pub fn visible_items(&self) -> &[String] {
        &self.items[..self.visible_count()]
    }

    /// Index of the selected entry
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The selected entry, if any
    pub fn selected_item(&self) -> Option<&str> {
        if !self.visible {
            return None;
        }
        self.items.get(self.selected).map(String::as_str)
    }

    /// The context the list was shown for, if visible
    pub fn context(&self) -> Option<&CompletionContext> {
        self.context.as_ref()
    }

    /// Move the selection cursor, wrapping circularly within the capped
    /// window. No-op while hidden.
    pub fn navigate(&mut self, direction: isize) {
        let count = self.visible_count();
        if !self.visible || count == 0 {
            return;
        }
        let count = count as isize;
        self.selected = (self.selected as isize + direction).rem_euclid(count) as usize;
    }

    /// Set the selection from a pointer hover, without committing.
    /// Out-of-range indices are ignored.
    pub fn hover(&mut self, index: usize) {
        if self.visible && index < self.visible_count() {
            self.selected = index;
        }
    }

    /// Commit the selected entry.
    ///
    /// Returns the splice data and hides the list. Returns `None` (and stays
    /// put) when hidden or empty.
    pub fn commit(&mut self) -> Option<Completion> {
        if !self.visible {
            return None;
        }
        let completion = {
            let context = self.context.as_ref()?;
            let selected = self.items.get(self.selected)?;
            Completion {
                replacement: context.replacement(selected),
                start: context.start,
                caret: context.caret,
            }
        };
        self.hide();
        Some(completion)
    }
}
