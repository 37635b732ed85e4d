//! Ratatui widgets for the prompt editor and suggestion popup

use super::TextBuffer;
use crate::popup::SuggestionList;
use ratatui::{
    buffer::Buffer as RatatuiBuffer,
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget, Widget},
};

/// Editor widget state
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    /// Vertical scroll offset (line number)
    pub scroll_offset: usize,
}

/// Editor widget rendering a prompt buffer with its caret
pub struct EditorWidget<'a> {
    buffer: &'a TextBuffer,
    block: Option<Block<'a>>,
    focused: bool,
}

impl<'a> EditorWidget<'a> {
    /// Create a new editor widget
    pub fn new(buffer: &'a TextBuffer) -> Self {
        Self {
            buffer,
            block: None,
            focused: false,
        }
    }

    /// Set block styling
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Set focus state (renders the caret cell when focused)
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl StatefulWidget for EditorWidget<'_> {
    type State = EditorState;

    fn render(self, area: Rect, buf: &mut RatatuiBuffer, state: &mut Self::State) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        // Keep the caret line in view
        let viewport = inner.height as usize;
        let caret_line = self.buffer.caret_line();
        if caret_line >= state.scroll_offset + viewport {
            state.scroll_offset = caret_line - viewport + 1;
        }
        if caret_line < state.scroll_offset {
            state.scroll_offset = caret_line;
        }

        for row in 0..viewport {
            let line_idx = state.scroll_offset + row;
            let Some(line) = self.buffer.line(line_idx) else {
                break;
            };
            buf.set_stringn(
                inner.x,
                inner.y + row as u16,
                &line,
                inner.width as usize,
                Style::default(),
            );
        }

        if self.focused {
            if let Some((x, y)) = caret_screen_position(self.buffer, inner, state.scroll_offset) {
                buf.set_style(
                    Rect::new(x, y, 1, 1),
                    Style::default().add_modifier(Modifier::REVERSED),
                );
            }
        }
    }
}

/// Screen cell of the caret inside `inner`, if visible
pub(crate) fn caret_screen_position(
    buffer: &TextBuffer,
    inner: Rect,
    scroll_offset: usize,
) -> Option<(u16, u16)> {
    let line = buffer.caret_line();
    if line < scroll_offset {
        return None;
    }
    let row = line - scroll_offset;
    if row >= inner.height as usize {
        return None;
    }
    let column = buffer.caret_column().min(inner.width.saturating_sub(1) as usize);
    Some((inner.x + column as u16, inner.y + row as u16))
}

/// Suggestion popup widget state
#[derive(Default)]
pub struct PopupState {
    list_state: ListState,
}

impl PopupState {
    /// Mirror the suggestion list's selection into the render state
    pub fn sync(&mut self, suggestions: &SuggestionList) {
        if suggestions.is_visible() && suggestions.visible_count() > 0 {
            self.list_state.select(Some(suggestions.selected_index()));
        } else {
            self.list_state.select(None);
            *self.list_state.offset_mut() = 0;
        }
    }

    /// Map a screen cell to a suggestion entry index, if the cell lands on
    /// one. Accounts for borders and list scrolling.
    pub fn hit(
        &self,
        area: Rect,
        x: u16,
        y: u16,
        suggestions: &SuggestionList,
    ) -> Option<usize> {
        let inner = area.inner(Margin::new(1, 1));
        if x < inner.x || x >= inner.x + inner.width || y < inner.y || y >= inner.y + inner.height
        {
            return None;
        }
        let index = self.list_state.offset() + (y - inner.y) as usize;
        (index < suggestions.visible_count()).then_some(index)
    }
}

/// Suggestion popup overlay
pub struct PopupWidget<'a> {
    suggestions: &'a SuggestionList,
}

impl<'a> PopupWidget<'a> {
    /// Create a popup widget over the suggestion list
    pub fn new(suggestions: &'a SuggestionList) -> Self {
        Self { suggestions }
    }

    fn header(&self) -> String {
        if self.suggestions.is_truncated() {
            format!(
                "Showing {} of {} matches...",
                self.suggestions.visible_count(),
                self.suggestions.total()
            )
        } else {
            format!("Suggestions ({})", self.suggestions.total())
        }
    }
}

impl StatefulWidget for PopupWidget<'_> {
    type State = PopupState;

    fn render(self, area: Rect, buf: &mut RatatuiBuffer, state: &mut Self::State) {
        if !self.suggestions.is_visible() {
            return;
        }

        let items: Vec<ListItem> = self
            .suggestions
            .visible_items()
            .iter()
            .map(|item| {
                ListItem::new(Line::from(Span::styled(
                    item.clone(),
                    Style::default().fg(Color::White),
                )))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(self.header())
                    .style(Style::default().bg(Color::Rgb(30, 30, 30))),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::Rgb(45, 79, 108))
                    .add_modifier(Modifier::BOLD),
            );

        StatefulWidget::render(list, area, buf, &mut state.list_state);
    }
}

/// Popup placement below the caret, clamped to the terminal bounds
pub fn popup_area(
    suggestions: &SuggestionList,
    terminal_area: Rect,
    anchor_x: u16,
    anchor_y: u16,
    max_height: u16,
    width: u16,
) -> Rect {
    let rows = (suggestions.visible_count() as u16).min(max_height);
    let height = (rows + 2).min(terminal_area.height); // +2 for borders
    let width = width.min(terminal_area.width);

    let x = anchor_x.min(terminal_area.width.saturating_sub(width));
    let y = (anchor_y + 1).min(terminal_area.height.saturating_sub(height));

    Rect {
        x,
        y,
        width,
        height,
    }
}
