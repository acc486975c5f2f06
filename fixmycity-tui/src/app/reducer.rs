//! Pure reducer function for state transitions
//!
//! Following functional programming principles, the reducer is a pure function:
//! `(State, Action) -> State`
//!
//! The reducer has NO side effects - it only computes new state values.
//! All store access and device I/O happens in `effects`.

use libfixmycity::error::FixMyCityError;
use libfixmycity::service::dashboard;
use libfixmycity::service::draft::location_captured_message;

use super::actions::{Action, Alert, Capture, Screen};
use super::keymap::key_to_action;
use super::state::{AppState, CreateState, DashboardState, DetailState, LoginField, LoginState};

/// Pure reducer function
///
/// Takes current state and an action, returns new state.
///
/// # Purity Guarantees
///
/// - No store reads or writes
/// - No device access
/// - No mutations (returns new state)
/// - Deterministic (same inputs -> same output)
pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        // === UI Events ===
        Action::Key(key) => match key_to_action(&state, key) {
            Some(action) => reduce(state, action),
            None => state,
        },
        Action::Tick => state,
        Action::Resize(_, _) => state, // Terminal auto-handles resize

        // === Navigation ===
        Action::NavigateTo(screen) => {
            let mut navigation = state.navigation.clone();
            navigation.push(screen);
            enter_screen(AppState { navigation, ..state }, screen)
        }

        Action::Replace(screen) => {
            let mut navigation = state.navigation.clone();
            if navigation.len() > 1 {
                navigation.pop();
            }
            navigation.push(screen);
            enter_screen(AppState { navigation, ..state }, screen)
        }

        Action::GoBack => {
            let mut navigation = state.navigation.clone();
            let left = if navigation.len() > 1 {
                navigation.pop()
            } else {
                None
            };
            // Leaving the form throws the draft away
            let create = match left {
                Some(Screen::CreateReport) => state.create.discarded(),
                _ => state.create.clone(),
            };
            AppState {
                navigation,
                create,
                ..state
            }
        }

        Action::Quit => AppState {
            should_quit: true,
            ..state
        },

        Action::ShowHelp => AppState {
            help_visible: true,
            ..state
        },

        Action::HideHelp => AppState {
            help_visible: false,
            ..state
        },

        // === Shared ===
        Action::ReportsLoaded(reports) => {
            let last = reports.len().saturating_sub(1);
            let comment_count = match state.current_screen() {
                Screen::Detail { report_id, .. } => reports
                    .iter()
                    .find(|r| r.id == report_id)
                    .map_or(0, |r| r.comments.len()),
                _ => 0,
            };
            AppState {
                list_selected: state.list_selected.min(last),
                dashboard: DashboardState {
                    selected: state.dashboard.selected.min(last),
                    ..state.dashboard
                },
                detail: DetailState {
                    selected_comment: state
                        .detail
                        .selected_comment
                        .min(comment_count.saturating_sub(1)),
                    ..state.detail
                },
                reports,
                ..state
            }
        }

        Action::SelectNext => move_selection(state, 1),
        Action::SelectPrevious => move_selection(state, -1),

        Action::UpvoteRequested(_) | Action::DownvoteRequested(_) => state,

        // === Create Report ===
        Action::IssueTypeNext => {
            let mut create = state.create.clone();
            create.draft.issue_type = create.draft.issue_type.next();
            AppState { create, ..state }
        }

        Action::IssueTypePrevious => {
            let mut create = state.create.clone();
            create.draft.issue_type = create.draft.issue_type.previous();
            AppState { create, ..state }
        }

        Action::DescriptionChanged(description) => {
            let mut create = state.create.clone();
            // Validation will be triggered separately
            create.draft.description = description;
            AppState { create, ..state }
        }

        Action::DescriptionValidated {
            valid,
            errors,
            char_count,
        } => AppState {
            create: CreateState {
                valid,
                errors,
                char_count,
                ..state.create
            },
            ..state
        },

        Action::PhotoRequested => AppState {
            create: CreateState {
                capturing_photo: true,
                ..state.create
            },
            ..state
        },

        Action::PhotoCaptured { generation, .. }
        | Action::LocationCaptured { generation, .. }
        | Action::CaptureFailed { generation, .. }
            if generation != state.create.generation =>
        {
            state
        }

        Action::PhotoCaptured { image, .. } => {
            let mut create = state.create.clone();
            create.capturing_photo = false;
            let status = match image {
                Some(image) => {
                    create.draft.image = Some(image);
                    Some("Photo attached".to_string())
                }
                // Cancelled: leave the field as it was, say nothing
                None => state.status.clone(),
            };
            AppState {
                create,
                status,
                ..state
            }
        }

        Action::LocationRequested => AppState {
            create: CreateState {
                capturing_location: true,
                ..state.create
            },
            ..state
        },

        Action::LocationCaptured { location, .. } => {
            let mut create = state.create.clone();
            create.capturing_location = false;
            create.draft.location = Some(location);
            AppState {
                create,
                alert: Some(Alert::info(
                    "Location captured",
                    location_captured_message(&location),
                )),
                ..state
            }
        }

        Action::CaptureFailed {
            capture,
            title,
            message,
            ..
        } => {
            let mut create = state.create.clone();
            match capture {
                Capture::Photo => create.capturing_photo = false,
                Capture::Location => create.capturing_location = false,
            }
            AppState {
                create,
                alert: Some(Alert::error(title, message)),
                ..state
            }
        }

        Action::SubmitRequested => state,

        Action::ReportSubmitted(_) => {
            let mut navigation = state.navigation.clone();
            navigation.truncate(1);
            AppState {
                navigation,
                create: state.create.discarded(),
                list_selected: 0,
                status: Some("Report submitted".to_string()),
                ..state
            }
        }

        // === Report Detail ===
        Action::CommentStarted => AppState {
            detail: DetailState {
                commenting: true,
                ..state.detail
            },
            ..state
        },

        Action::CommentCancelled | Action::CommentAdded => AppState {
            detail: DetailState {
                commenting: false,
                comment: String::new(),
                ..state.detail
            },
            ..state
        },

        Action::CommentChanged(comment) => AppState {
            detail: DetailState {
                comment,
                ..state.detail
            },
            ..state
        },

        Action::CommentSubmitRequested(_)
        | Action::CommentUpvoteRequested { .. }
        | Action::CommentDownvoteRequested { .. }
        | Action::AdvanceStatusRequested(_) => state,

        // === Admin Login ===
        Action::LoginInput(c) => {
            let mut login = state.login.clone();
            match login.focus {
                LoginField::Username => login.username.push(c),
                LoginField::Password => login.password.push(c),
            }
            AppState { login, ..state }
        }

        Action::LoginBackspace => {
            let mut login = state.login.clone();
            match login.focus {
                LoginField::Username => login.username.pop(),
                LoginField::Password => login.password.pop(),
            };
            AppState { login, ..state }
        }

        Action::LoginToggleField => AppState {
            login: LoginState {
                focus: match state.login.focus {
                    LoginField::Username => LoginField::Password,
                    LoginField::Password => LoginField::Username,
                },
                ..state.login
            },
            ..state
        },

        Action::LoginToggleReveal => AppState {
            login: LoginState {
                reveal_password: !state.login.reveal_password,
                ..state.login
            },
            ..state
        },

        Action::LoginRequested => state,

        Action::LoginSucceeded(session) => {
            let state = AppState {
                admin: Some(session),
                ..state
            };
            reduce(state, Action::Replace(Screen::AdminDashboard))
        }

        Action::LogoutRequested => state,

        Action::LoggedOut => {
            let mut navigation = state.navigation.clone();
            navigation.truncate(1);
            AppState {
                navigation,
                admin: None,
                status: Some("Logged out".to_string()),
                ..state
            }
        }

        // === Admin Dashboard ===
        Action::FocusRequested(report_id) => {
            let focused = state
                .report(report_id)
                .ok_or(FixMyCityError::NotFound(report_id))
                .and_then(dashboard::focus_on);
            match focused {
                Ok(region) => AppState {
                    dashboard: DashboardState {
                        focused: Some(region),
                        ..state.dashboard
                    },
                    ..state
                },
                Err(e) => AppState {
                    alert: Some(Alert::from(&e)),
                    ..state
                },
            }
        }

        // === Alerts ===
        Action::ShowAlert(alert) => AppState {
            alert: Some(alert),
            ..state
        },

        Action::DismissAlert => AppState {
            alert: None,
            ..state
        },

        // === Status Bar ===
        Action::SetStatus(message) => AppState {
            status: Some(message),
            ..state
        },
    }
}

/// Reset per-screen state when a screen is (re)entered
fn enter_screen(state: AppState, screen: Screen) -> AppState {
    match screen {
        Screen::ReportList => state,
        Screen::CreateReport => AppState {
            create: state.create.discarded(),
            ..state
        },
        Screen::Detail { .. } => AppState {
            detail: DetailState::default(),
            ..state
        },
        Screen::AdminLogin => AppState {
            login: LoginState::default(),
            ..state
        },
        Screen::AdminDashboard => AppState {
            dashboard: DashboardState {
                focused: None,
                ..state.dashboard
            },
            ..state
        },
    }
}

fn step(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    current.saturating_add_signed(delta).min(len - 1)
}

fn move_selection(state: AppState, delta: isize) -> AppState {
    let len = state.reports.len();
    match state.current_screen() {
        Screen::ReportList => AppState {
            list_selected: step(state.list_selected, delta, len),
            ..state
        },
        Screen::AdminDashboard => AppState {
            dashboard: DashboardState {
                selected: step(state.dashboard.selected, delta, len),
                ..state.dashboard
            },
            ..state
        },
        Screen::Detail { report_id, .. } => {
            let comments = state.report(report_id).map_or(0, |r| r.comments.len());
            AppState {
                detail: DetailState {
                    selected_comment: step(state.detail.selected_comment, delta, comments),
                    ..state.detail
                },
                ..state
            }
        }
        Screen::CreateReport | Screen::AdminLogin => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::actions::AlertKind;
    use chrono::Utc;
    use libfixmycity::{IssueType, Location, Report, ReportId};

    fn report(id: u64, location: Option<Location>) -> Report {
        Report::new(
            ReportId::new(id),
            IssueType::Pothole,
            format!("report {}", id),
            location,
            None,
            Utc::now(),
        )
    }

    #[test]
    fn test_reducer_is_pure() {
        let state = AppState::new();
        let state_clone = state.clone();

        let action = Action::SetStatus("Test".to_string());
        let new_state = reduce(state_clone.clone(), action);

        // Original state unchanged
        assert!(state_clone.status.is_none());

        // New state has the change
        assert_eq!(new_state.status, Some("Test".to_string()));
    }

    #[test]
    fn test_quit_action() {
        let state = AppState::new();
        assert!(!state.should_quit);

        let new_state = reduce(state, Action::Quit);
        assert!(new_state.should_quit);
    }

    #[test]
    fn test_navigation_stack() {
        let mut state = AppState::new();

        state = reduce(state, Action::NavigateTo(Screen::AdminLogin));
        assert_eq!(state.current_screen(), Screen::AdminLogin);

        state = reduce(state, Action::Replace(Screen::AdminDashboard));
        assert_eq!(state.navigation, vec![Screen::ReportList, Screen::AdminDashboard]);

        state = reduce(state, Action::GoBack);
        assert_eq!(state.current_screen(), Screen::ReportList);

        // The root cannot be popped
        state = reduce(state, Action::GoBack);
        assert_eq!(state.navigation, vec![Screen::ReportList]);
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut state = AppState::new();
        state = reduce(state, Action::ReportsLoaded(vec![report(2, None), report(1, None)]));

        state = reduce(state, Action::SelectNext);
        state = reduce(state, Action::SelectNext);
        assert_eq!(state.list_selected, 1);

        state = reduce(state, Action::SelectPrevious);
        state = reduce(state, Action::SelectPrevious);
        assert_eq!(state.list_selected, 0);
    }

    #[test]
    fn test_reports_loaded_clamps_selection() {
        let mut state = AppState::new();
        state.list_selected = 5;

        state = reduce(state, Action::ReportsLoaded(vec![report(1, None)]));
        assert_eq!(state.list_selected, 0);
    }

    #[test]
    fn test_capture_flow() {
        let mut state = reduce(AppState::new(), Action::NavigateTo(Screen::CreateReport));
        let generation = state.create.generation;

        state = reduce(state, Action::PhotoRequested);
        assert!(state.create.capturing_photo);

        // Cancelled capture leaves the field unset
        state = reduce(
            state,
            Action::PhotoCaptured {
                generation,
                image: None,
            },
        );
        assert!(!state.create.capturing_photo);
        assert!(state.create.draft.image.is_none());
        assert!(state.alert.is_none());

        state = reduce(state, Action::LocationRequested);
        state = reduce(
            state,
            Action::CaptureFailed {
                generation,
                capture: Capture::Location,
                title: "Permission denied".to_string(),
                message: "Location permission is required to tag the report.".to_string(),
            },
        );
        assert!(!state.create.capturing_location);
        assert!(state.create.draft.location.is_none());
        assert_eq!(state.alert.as_ref().map(|a| a.kind), Some(AlertKind::Error));
    }

    #[test]
    fn test_location_captured_confirms() {
        let location = Location::new(28.6139, 77.209).unwrap();

        let state = reduce(
            AppState::new(),
            Action::LocationCaptured {
                generation: 0,
                location,
            },
        );

        assert_eq!(state.create.draft.location, Some(location));
        let alert = state.alert.unwrap();
        assert_eq!(alert.kind, AlertKind::Info);
        assert_eq!(alert.title, "Location captured");
        assert_eq!(alert.message, "Lat: 28.6139, Lng: 77.2090");
    }

    #[test]
    fn test_report_submitted_returns_home() {
        let mut state = reduce(AppState::new(), Action::NavigateTo(Screen::CreateReport));
        state = reduce(state, Action::DescriptionChanged("big hole".to_string()));

        state = reduce(state, Action::ReportSubmitted(ReportId::new(1)));

        assert_eq!(state.current_screen(), Screen::ReportList);
        assert!(state.create.draft.description.is_empty());
        assert_eq!(state.status, Some("Report submitted".to_string()));
    }

    #[test]
    fn test_capture_for_discarded_draft_is_dropped() {
        let state = reduce(AppState::new(), Action::NavigateTo(Screen::CreateReport));
        let stale = state.create.generation;
        let state = reduce(state, Action::LocationRequested);

        let state = reduce(state, Action::GoBack);
        assert_eq!(state.create.generation, stale + 1);

        let state = reduce(
            state,
            Action::LocationCaptured {
                generation: stale,
                location: Location::new(1.0, 2.0).unwrap(),
            },
        );
        assert!(state.alert.is_none());
        assert!(state.create.draft.location.is_none());

        let state = reduce(state, Action::NavigateTo(Screen::CreateReport));
        let state = reduce(
            state,
            Action::PhotoCaptured {
                generation: stale,
                image: Some(libfixmycity::ImageRef::new("file:///old.jpg")),
            },
        );
        assert!(state.create.draft.image.is_none());
        assert!(state.status.is_none());
    }

    #[test]
    fn test_issue_type_cycles() {
        let mut state = AppState::new();
        assert_eq!(state.create.draft.issue_type, IssueType::Pothole);

        state = reduce(state, Action::IssueTypeNext);
        assert_eq!(state.create.draft.issue_type, IssueType::Streetlight);

        state = reduce(state, Action::IssueTypePrevious);
        state = reduce(state, Action::IssueTypePrevious);
        assert_eq!(state.create.draft.issue_type, IssueType::Other);
    }

    #[test]
    fn test_login_form_editing() {
        let mut state = reduce(AppState::new(), Action::NavigateTo(Screen::AdminLogin));

        for c in "admin".chars() {
            state = reduce(state, Action::LoginInput(c));
        }
        state = reduce(state, Action::LoginBackspace);
        state = reduce(state, Action::LoginToggleField);
        state = reduce(state, Action::LoginInput('x'));

        assert_eq!(state.login.username, "admi");
        assert_eq!(state.login.password, "x");
        assert_eq!(state.login.focus, LoginField::Password);
    }

    #[test]
    fn test_focus_without_location_alerts() {
        let mut state = AppState::new();
        state = reduce(state, Action::ReportsLoaded(vec![report(1, None)]));

        state = reduce(state, Action::FocusRequested(ReportId::new(1)));

        let alert = state.alert.unwrap();
        assert_eq!(alert.title, "No location");
        assert!(state.dashboard.focused.is_none());
    }

    #[test]
    fn test_focus_zooms_in() {
        let location = Location::new(19.07, 72.87).unwrap();
        let mut state = AppState::new();
        state = reduce(state, Action::ReportsLoaded(vec![report(1, Some(location))]));

        state = reduce(state, Action::FocusRequested(ReportId::new(1)));

        let region = state.dashboard.focused.unwrap();
        assert_eq!(region.center, location);
        assert_eq!(region.latitude_delta, dashboard::FOCUS_DELTA);
    }
}
