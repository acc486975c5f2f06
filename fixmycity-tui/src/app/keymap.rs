//! Keybindings
//!
//! Maps a key press to the action it means on the current screen. Returns
//! `None` for keys with no binding; on text-entry screens those go to the
//! focused editor instead.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::actions::{Action, Screen};
use super::state::{AppState, LoginField};

pub fn key_to_action(state: &AppState, key: KeyEvent) -> Option<Action> {
    // Overlays swallow everything except their own dismiss keys
    if state.alert.is_some() {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(Action::DismissAlert),
            _ => None,
        };
    }
    if state.help_visible {
        return match key.code {
            KeyCode::Esc | KeyCode::F(1) => Some(Action::HideHelp),
            _ => None,
        };
    }

    // Global keybindings (work everywhere)
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return Some(Action::Quit),
        (KeyCode::Char('q'), KeyModifiers::NONE) if !state.is_text_entry() => {
            return Some(Action::Quit);
        }
        (KeyCode::F(1), _) => return Some(Action::ShowHelp),
        _ => {}
    }

    // Screen-specific keybindings
    match state.current_screen() {
        Screen::ReportList => list_key(state, key),
        Screen::CreateReport => create_key(state, key),
        Screen::Detail { report_id, .. } => detail_key(state, key, report_id),
        Screen::AdminLogin => login_key(state, key),
        Screen::AdminDashboard => dashboard_key(state, key),
    }
}

fn back(state: &AppState) -> Option<Action> {
    (state.navigation.len() > 1).then_some(Action::GoBack)
}

fn list_key(state: &AppState, key: KeyEvent) -> Option<Action> {
    let selected = state.selected_report().map(|r| r.id);

    match key.code {
        KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectNext),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectPrevious),
        KeyCode::Enter => selected.map(|report_id| {
            Action::NavigateTo(Screen::Detail {
                report_id,
                is_admin: false,
            })
        }),
        KeyCode::Char('n') | KeyCode::Char('r') => Some(Action::NavigateTo(Screen::CreateReport)),
        KeyCode::Char('a') => Some(Action::NavigateTo(if state.admin.is_some() {
            Screen::AdminDashboard
        } else {
            Screen::AdminLogin
        })),
        KeyCode::Char('u') | KeyCode::Char('+') => selected.map(Action::UpvoteRequested),
        KeyCode::Char('d') | KeyCode::Char('-') => selected.map(Action::DownvoteRequested),
        _ => None,
    }
}

fn create_key(state: &AppState, key: KeyEvent) -> Option<Action> {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => back(state),
        (KeyCode::Tab, _) => Some(Action::IssueTypeNext),
        (KeyCode::BackTab, _) => Some(Action::IssueTypePrevious),
        (KeyCode::Char('p'), KeyModifiers::CONTROL) if !state.create.capturing_photo => {
            Some(Action::PhotoRequested)
        }
        (KeyCode::Char('l'), KeyModifiers::CONTROL) if !state.create.capturing_location => {
            Some(Action::LocationRequested)
        }
        // The report would be stored without the pending attachment
        (KeyCode::Char('s'), KeyModifiers::CONTROL) if state.create.is_capturing() => {
            Some(Action::SetStatus("Waiting for capture to finish".to_string()))
        }
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => Some(Action::SubmitRequested),
        _ => None,
    }
}

fn detail_key(state: &AppState, key: KeyEvent, report_id: libfixmycity::ReportId) -> Option<Action> {
    if state.detail.commenting {
        return match key.code {
            KeyCode::Esc => Some(Action::CommentCancelled),
            KeyCode::Enter => Some(Action::CommentSubmitRequested(report_id)),
            _ => None,
        };
    }

    let index = state.detail.selected_comment;
    let has_comments = state
        .report(report_id)
        .is_some_and(|r| !r.comments.is_empty());

    match key.code {
        KeyCode::Esc => back(state),
        KeyCode::Char('u') | KeyCode::Char('+') => Some(Action::UpvoteRequested(report_id)),
        KeyCode::Char('d') | KeyCode::Char('-') => Some(Action::DownvoteRequested(report_id)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectNext),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectPrevious),
        KeyCode::Char('c') => Some(Action::CommentStarted),
        KeyCode::Char('y') if has_comments => {
            Some(Action::CommentUpvoteRequested { report_id, index })
        }
        KeyCode::Char('x') if has_comments => {
            Some(Action::CommentDownvoteRequested { report_id, index })
        }
        KeyCode::Char('s') if state.can_advance_detail() => {
            Some(Action::AdvanceStatusRequested(report_id))
        }
        _ => None,
    }
}

fn login_key(state: &AppState, key: KeyEvent) -> Option<Action> {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => back(state),
        (KeyCode::Tab, _) | (KeyCode::BackTab, _) | (KeyCode::Up, _) | (KeyCode::Down, _) => {
            Some(Action::LoginToggleField)
        }
        (KeyCode::Enter, _) => Some(match state.login.focus {
            LoginField::Username => Action::LoginToggleField,
            LoginField::Password => Action::LoginRequested,
        }),
        (KeyCode::Backspace, _) => Some(Action::LoginBackspace),
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => Some(Action::LoginToggleReveal),
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Some(Action::LoginInput(c))
        }
        _ => None,
    }
}

fn dashboard_key(state: &AppState, key: KeyEvent) -> Option<Action> {
    let selected = state.selected_dashboard_report();

    match key.code {
        KeyCode::Esc => back(state),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectNext),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectPrevious),
        KeyCode::Enter => selected.map(|r| {
            Action::NavigateTo(Screen::Detail {
                report_id: r.id,
                is_admin: true,
            })
        }),
        KeyCode::Char('f') => selected.map(|r| Action::FocusRequested(r.id)),
        KeyCode::Char('s') => selected
            .filter(|r| r.status.can_advance())
            .map(|r| Action::AdvanceStatusRequested(r.id)),
        KeyCode::Char('o') => Some(Action::LogoutRequested),
        _ => None,
    }
}
