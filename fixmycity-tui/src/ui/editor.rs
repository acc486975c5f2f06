//! Text editors backed by tui-textarea
//!
//! The report description and the comment box are stateful widgets that
//! live outside `AppState`. Keys without a binding are fed to whichever
//! editor is focused, and the resulting text comes back as an action so the
//! reducer stays the source of truth.

use crossterm::event::KeyEvent;
use ratatui::{
    style::{Color, Style},
    widgets::{Block, Borders},
};
use tui_textarea::TextArea;

use crate::app::{Action, AppState, Screen};

const DESCRIPTION_PLACEHOLDER: &str = "Describe the issue... (Ctrl+S to submit, Esc to cancel)";
const COMMENT_PLACEHOLDER: &str = "Write a comment... (Enter to post, Esc to cancel)";

pub struct Editors<'a> {
    pub description: TextArea<'a>,
    pub comment: TextArea<'a>,
}

impl Default for Editors<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Editors<'a> {
    pub fn new() -> Self {
        Self {
            description: new_editor(DESCRIPTION_PLACEHOLDER),
            comment: new_editor(COMMENT_PLACEHOLDER),
        }
    }

    /// Feed an unbound key to the focused editor
    ///
    /// Returns the change action when the text was modified, `None` when no
    /// editor is focused or the key only moved the cursor.
    pub fn input(&mut self, state: &AppState, key: KeyEvent) -> Option<Action> {
        if state.alert.is_some() || state.help_visible {
            return None;
        }

        match state.current_screen() {
            Screen::CreateReport => self
                .description
                .input(key)
                .then(|| Action::DescriptionChanged(self.description.lines().join("\n"))),
            Screen::Detail { .. } if state.detail.commenting => self
                .comment
                .input(key)
                .then(|| Action::CommentChanged(self.comment.lines().join("\n"))),
            _ => None,
        }
    }

    /// Clear editors whose backing text the reducer has reset
    pub fn sync(&mut self, state: &AppState) {
        if state.create.draft.description.is_empty() && !self.description.is_empty() {
            self.description = new_editor(DESCRIPTION_PLACEHOLDER);
        }
        if state.detail.comment.is_empty() && !self.comment.is_empty() {
            self.comment = new_editor(COMMENT_PLACEHOLDER);
        }
    }

    /// Restyle the editors for the current state before drawing
    pub fn style(&mut self, state: &AppState) {
        let description_color = if state.create.valid {
            Color::Green
        } else {
            Color::Red
        };
        self.description.set_block(
            Block::default()
                .title(" Description ")
                .borders(Borders::ALL)
                .border_style(border_style(state, description_color)),
        );

        let comment_color = if state.detail.commenting {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        self.comment.set_block(
            Block::default()
                .title(" Add comment ")
                .borders(Borders::ALL)
                .border_style(border_style(state, comment_color)),
        );
    }
}

fn new_editor<'a>(placeholder: &str) -> TextArea<'a> {
    let mut textarea = TextArea::default();
    textarea.set_placeholder_text(placeholder);
    textarea
}

fn border_style(state: &AppState, color: Color) -> Style {
    if state.config.colors_enabled {
        Style::default().fg(color)
    } else {
        Style::default()
    }
}
