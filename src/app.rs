use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;

use crate::github::ProfileSource;
use crate::search::{Outcome, SearchState};
use crate::theme::{Theme, ThemeMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Search,
    Theme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
}

/// What the event loop should do after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    pub focus: Focus,
    pub popup: Popup,
    pub theme_mode: ThemeMode,
    pub search: SearchState,
}

impl App {
    pub fn new(source: Arc<dyn ProfileSource>, theme_mode: ThemeMode) -> Self {
        Self {
            focus: Focus::Input,
            popup: Popup::None,
            theme_mode,
            search: SearchState::new(source),
        }
    }

    /// Palette for the current mode, passed to the renderer each frame
    pub fn theme(&self) -> Theme {
        Theme::for_mode(self.theme_mode)
    }

    pub fn toggle_theme(&mut self) {
        self.theme_mode = self.theme_mode.toggled();
        tracing::debug!("Theme switched to {:?}", self.theme_mode);
    }

    pub fn set_username(&mut self, text: impl Into<String>) {
        self.search.set_username(text);
    }

    pub fn search(&mut self) {
        self.search.search();
    }

    pub fn outcome(&self) -> &Outcome {
        self.search.outcome()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        // Handle popups first
        if self.popup == Popup::Help {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Enter) {
                self.popup = Popup::None;
            }
            return Flow::Continue;
        }

        match key.code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::F(1) => self.popup = Popup::Help,
            KeyCode::Char('t') if ctrl => self.toggle_theme(),
            KeyCode::Char('u') if ctrl => self.set_username(""),

            // Focus ring: Input → Search → Theme
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Input => Focus::Search,
                    Focus::Search => Focus::Theme,
                    Focus::Theme => Focus::Input,
                };
            }
            KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Input => Focus::Theme,
                    Focus::Search => Focus::Input,
                    Focus::Theme => Focus::Search,
                };
            }

            KeyCode::Enter => match self.focus {
                Focus::Theme => self.toggle_theme(),
                _ => self.search(),
            },

            KeyCode::Backspace if self.focus == Focus::Input => {
                let mut text = self.search.username().to_string();
                text.pop();
                self.set_username(text);
            }

            KeyCode::Char(c) if !ctrl => match self.focus {
                Focus::Input => {
                    let text = format!("{}{}", self.search.username(), c);
                    self.set_username(text);
                }
                Focus::Search if c == ' ' => self.search(),
                Focus::Theme if c == ' ' => self.toggle_theme(),
                _ => {}
            },

            _ => {}
        }

        Flow::Continue
    }

    /// Pick up finished lookups
    pub fn tick(&mut self) {
        self.search.poll();
    }

    /// Text for the inline error line
    pub fn error_line(&self) -> Option<&str> {
        self.outcome().error()
    }
}
