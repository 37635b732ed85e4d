//! Main studio application
//!
//! Standalone TUI that edits a prompt file with live wildcard, tag and LoRA
//! autocompletion.

use crate::{
    catalog::CandidateCatalog,
    config::StudioConfig,
    editor::{popup_area, EditorState, EditorWidget, Movement, PopupState, PopupWidget, PromptEditor},
    events::{EventLoop, StudioEvent},
    provider::CandidateProvider,
    terminal::TerminalManager,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};
use std::path::PathBuf;

/// Application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppState {
    Running,
    Quitting,
}

/// Main studio application
pub struct StudioApp {
    config: StudioConfig,
    editor: PromptEditor,
    editor_state: EditorState,
    popup_state: PopupState,
    provider: CandidateProvider,
    catalog: CandidateCatalog,
    state: AppState,
    status: String,
    /// Screen areas from the last render, for mouse hit-testing
    editor_rect: Rect,
    popup_rect: Option<Rect>,
}

impl StudioApp {
    /// Create a new studio application
    pub fn new(config: StudioConfig, provider: CandidateProvider) -> Self {
        let catalog = CandidateCatalog::new(provider.build());
        let editor = PromptEditor::new(catalog.clone());

        Self {
            config,
            editor,
            editor_state: EditorState::default(),
            popup_state: PopupState::default(),
            provider,
            catalog,
            state: AppState::Running,
            status: "Ctrl+Q: quit | Ctrl+S: save | Ctrl+R: refresh candidates | Esc: dismiss"
                .to_string(),
            editor_rect: Rect::default(),
            popup_rect: None,
        }
    }

    /// Load a prompt file into the editor
    pub fn load_file(&mut self, path: PathBuf) -> Result<()> {
        self.editor.buffer_mut().load_file(path.clone())?;
        self.status = format!("Loaded: {}", path.display());
        Ok(())
    }

    /// Point the editor at a file that doesn't exist yet; created on save
    pub fn set_new_file(&mut self, path: PathBuf) {
        self.editor.buffer_mut().path = Some(path);
    }

    /// Save the current buffer
    pub fn save_file(&mut self) -> Result<()> {
        self.editor.buffer_mut().save_file()?;
        let name = self
            .editor
            .buffer()
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "untitled".to_string());
        self.status = format!("Saved: {name}");
        Ok(())
    }

    /// Run the application
    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = TerminalManager::new()?;
        let event_loop = EventLoop::default();

        loop {
            self.render(&mut terminal)?;

            match event_loop.poll_event()? {
                StudioEvent::Key(key) => self.handle_key(key),
                StudioEvent::Mouse(mouse) => self.handle_mouse(mouse),
                StudioEvent::Resize(_, _) | StudioEvent::Tick => {}
            }

            if self.state == AppState::Quitting {
                break;
            }

            tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
        }

        Ok(())
    }

    fn handle_key(&mut self, key: crossterm::event::KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match (key.code, ctrl) {
            (KeyCode::Char('q'), true) | (KeyCode::Char('c'), true) => {
                self.state = AppState::Quitting;
            }
            (KeyCode::Char('s'), true) => {
                if let Err(e) = self.save_file() {
                    self.status = format!("Error saving: {e}");
                }
            }
            (KeyCode::Char('r'), true) => {
                self.provider.refresh(&self.catalog);
                let data = self.catalog.snapshot();
                self.status = format!(
                    "Refreshed candidates: {} files, {} tags, {} loras",
                    data.files.len(),
                    data.tags.len(),
                    data.loras.len()
                );
            }
            (KeyCode::Char('z'), true) => {
                self.editor.buffer_mut().undo();
                self.editor.cancel();
                self.status = "Undo".to_string();
            }
            (KeyCode::Char('y'), true) => {
                self.editor.buffer_mut().redo();
                self.editor.cancel();
                self.status = "Redo".to_string();
            }

            (KeyCode::Esc, _) => self.editor.cancel(),
            (KeyCode::Enter, _) => {
                if !self.editor.confirm() {
                    self.editor.newline();
                }
            }
            (KeyCode::Tab, _) => {
                self.editor.confirm();
            }

            (KeyCode::Backspace, _) => self.editor.backspace(),
            (KeyCode::Delete, _) => self.editor.delete_forward(),

            (KeyCode::Left, _) => self.editor.arrow(Movement::Left),
            (KeyCode::Right, _) => self.editor.arrow(Movement::Right),
            (KeyCode::Up, _) => self.editor.arrow(Movement::Up),
            (KeyCode::Down, _) => self.editor.arrow(Movement::Down),
            (KeyCode::Home, _) => self.editor.arrow(Movement::LineStart),
            (KeyCode::End, _) => self.editor.arrow(Movement::LineEnd),

            (KeyCode::Char(c), false) => self.editor.type_char(c),

            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (x, y) = (mouse.column, mouse.row);

        match mouse.kind {
            // Press, not release: commits must pre-empt focus loss
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = self.popup_hit(x, y) {
                    self.editor.click(index);
                } else if !self.editor_rect.contains((x, y).into()) {
                    self.editor.pointer_outside();
                }
            }
            MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(index) = self.popup_hit(x, y) {
                    self.editor.hover(index);
                }
            }
            _ => {}
        }
    }

    fn popup_hit(&self, x: u16, y: u16) -> Option<usize> {
        let area = self.popup_rect?;
        self.popup_state.hit(area, x, y, self.editor.suggestions())
    }

    fn render(&mut self, terminal: &mut TerminalManager) -> Result<()> {
        let buffer = self.editor.buffer();
        let suggestions = self.editor.suggestions();
        let editor_state = &mut self.editor_state;
        let popup_state = &mut self.popup_state;
        let status = &self.status;
        let config = &self.config;
        let catalog = self.catalog.snapshot();

        let mut editor_rect = self.editor_rect;
        let mut popup_rect = None;

        terminal.terminal_mut().draw(|frame| {
            let size = frame.area();

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1), // Status at top
                    Constraint::Min(3),    // Editor
                    Constraint::Length(1), // Info bar at bottom
                ])
                .split(size);

            let status_widget = Paragraph::new(format!(" {status}"))
                .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            frame.render_widget(status_widget, chunks[0]);

            let dirty_mark = if buffer.dirty { "*" } else { "" };
            let title = match &buffer.path {
                Some(path) => format!(" {}{dirty_mark} ", path.display()),
                None => format!(" [untitled]{dirty_mark} "),
            };
            let editor_block = Block::default().borders(Borders::NONE).title(title);

            editor_rect = chunks[1];
            let editor_widget = EditorWidget::new(buffer).block(editor_block).focused(true);
            frame.render_stateful_widget(editor_widget, chunks[1], editor_state);

            // Suggestion popup, anchored below the caret
            if suggestions.is_visible() {
                let anchor_x = chunks[1].x
                    + buffer.caret_column().min(chunks[1].width.saturating_sub(1) as usize) as u16;
                let line = buffer.caret_line();
                let anchor_y = if line >= editor_state.scroll_offset {
                    chunks[1].y + (line - editor_state.scroll_offset) as u16
                } else {
                    chunks[1].y
                };

                let area = popup_area(
                    suggestions,
                    size,
                    anchor_x,
                    anchor_y,
                    config.popup_height,
                    config.popup_width,
                );
                popup_state.sync(suggestions);
                frame.render_stateful_widget(PopupWidget::new(suggestions), area, popup_state);
                popup_rect = Some(area);
            }

            let match_info = if suggestions.is_visible() {
                format!(" | {} matches", suggestions.total())
            } else {
                String::new()
            };
            let info_text = format!(
                "Ln {}, Col {} | {} files · {} tags · {} loras{match_info}",
                buffer.caret_line() + 1,
                buffer.caret_column() + 1,
                catalog.files.len(),
                catalog.tags.len(),
                catalog.loras.len(),
            );
            let info_widget = Paragraph::new(info_text).style(Style::default().fg(Color::DarkGray));
            frame.render_widget(info_widget, chunks[2]);
        })?;

        self.editor_rect = editor_rect;
        self.popup_rect = popup_rect;
        Ok(())
    }
}
