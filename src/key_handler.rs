use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, PartialEq)]
pub enum KeyAction {
    Quit,
    Back,
    Help,
    NextView,
    NavigateUp,
    NavigateDown,
    PreviousPage,
    NextPage,
    FirstPage,
    LastPage,
    GrowPageSize,
    ShrinkPageSize,
    Search,
    Refresh,
    InputChar(char),
    Backspace,
    /// No input arrived before the poll timeout.
    Tick,
    None,
}

#[derive(Debug, Default)]
pub struct KeyHandler {
    /// While typing a search, printable keys are text, not commands.
    pub search_mode: bool,
}

impl KeyHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits up to `timeout` for an event.
    ///
    /// Returns [`KeyAction::Tick`] when nothing arrived so the caller can
    /// drain background work and redraw.
    pub fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<KeyAction> {
        if !event::poll(timeout)? {
            return Ok(KeyAction::Tick);
        }
        match event::read()? {
            // it's important to check KeyEventKind::Press to avoid handling key release events
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(self.on_key_event(key)),
            Event::Mouse(_) => Ok(KeyAction::None),
            Event::Resize(_, _) => Ok(KeyAction::None),
            _ => Ok(KeyAction::None),
        }
    }

    pub fn on_key_event(&mut self, key: KeyEvent) -> KeyAction {
        if let (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) =
            (key.modifiers, key.code)
        {
            return KeyAction::Quit;
        }

        if self.search_mode {
            return match key.code {
                KeyCode::Esc => KeyAction::Back,
                KeyCode::Enter => KeyAction::Back,
                KeyCode::Backspace => KeyAction::Backspace,
                KeyCode::Up => KeyAction::NavigateUp,
                KeyCode::Down => KeyAction::NavigateDown,
                KeyCode::Left => KeyAction::PreviousPage,
                KeyCode::Right => KeyAction::NextPage,
                KeyCode::Char(c) => KeyAction::InputChar(c),
                _ => KeyAction::None,
            };
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Esc) => KeyAction::Back,
            (_, KeyCode::Char('q')) => KeyAction::Quit,
            (_, KeyCode::Char('?')) => KeyAction::Help,
            (_, KeyCode::Char('/')) => KeyAction::Search,
            (KeyModifiers::CONTROL, KeyCode::Char('f') | KeyCode::Char('F')) => KeyAction::Search,
            (KeyModifiers::NONE, KeyCode::Tab) => KeyAction::NextView,
            (KeyModifiers::NONE, KeyCode::Up | KeyCode::Char('k')) => KeyAction::NavigateUp,
            (KeyModifiers::NONE, KeyCode::Down | KeyCode::Char('j')) => KeyAction::NavigateDown,
            (KeyModifiers::NONE, KeyCode::Left | KeyCode::Char('h') | KeyCode::PageUp) => {
                KeyAction::PreviousPage
            }
            (KeyModifiers::NONE, KeyCode::Right | KeyCode::Char('l') | KeyCode::PageDown) => {
                KeyAction::NextPage
            }
            (_, KeyCode::Home | KeyCode::Char('g')) => KeyAction::FirstPage,
            (_, KeyCode::End | KeyCode::Char('G')) => KeyAction::LastPage,
            (_, KeyCode::Char('+') | KeyCode::Char('=')) => KeyAction::GrowPageSize,
            (_, KeyCode::Char('-')) => KeyAction::ShrinkPageSize,
            (_, KeyCode::Char('r')) => KeyAction::Refresh,
            _ => KeyAction::None,
        }
    }
}
