//! Event handling for the studio TUI

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};
use std::time::Duration;

/// TUI events
#[derive(Debug, Clone)]
pub enum StudioEvent {
    /// Key press event
    Key(KeyEvent),

    /// Mouse event
    Mouse(MouseEvent),

    /// Window resize event
    Resize(u16, u16),

    /// Tick event (no input this poll)
    Tick,
}

/// Event loop polling crossterm
pub struct EventLoop {
    /// Poll timeout in milliseconds
    tick_rate: u64,
}

impl EventLoop {
    /// Create a new event loop
    pub fn new(tick_rate: u64) -> Self {
        Self { tick_rate }
    }

    /// Poll for the next event
    pub fn poll_event(&self) -> Result<StudioEvent> {
        if event::poll(Duration::from_millis(self.tick_rate))? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    return Ok(StudioEvent::Key(key));
                }
                Event::Mouse(mouse) => return Ok(StudioEvent::Mouse(mouse)),
                Event::Resize(w, h) => return Ok(StudioEvent::Resize(w, h)),
                _ => {}
            }
        }
        Ok(StudioEvent::Tick)
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new(100)
    }
}
