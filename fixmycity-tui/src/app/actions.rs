//! Actions for the reducer pattern
//!
//! All state transitions are triggered by actions. This module defines
//! all possible actions that can modify application state.
//!
//! Actions ending in `Requested` describe something the user asked for that
//! needs a service call; the reducer only records that work is pending and
//! [`crate::app::effects::perform`] carries it out, answering with a
//! completion action.

use crossterm::event::KeyEvent;
use libfixmycity::error::FixMyCityError;
use libfixmycity::service::admin::AdminSession;
use libfixmycity::{ImageRef, Location, Report, ReportId};

/// Actions that trigger state transitions
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // === UI Events ===
    /// Keyboard input event
    Key(KeyEvent),

    /// Periodic tick
    Tick,

    /// Terminal resize event
    Resize(u16, u16),

    // === Navigation ===
    /// Push a screen onto the navigation stack
    NavigateTo(Screen),

    /// Swap the current screen for another
    Replace(Screen),

    /// Pop the current screen
    GoBack,

    /// Quit the application
    Quit,

    ShowHelp,
    HideHelp,

    // === Shared ===
    /// Fresh snapshot of the report store
    ReportsLoaded(Vec<Report>),

    /// Move the selection on the current screen
    SelectNext,
    SelectPrevious,

    UpvoteRequested(ReportId),
    DownvoteRequested(ReportId),

    // === Create Report ===
    IssueTypeNext,
    IssueTypePrevious,

    /// Description text changed in the editor
    DescriptionChanged(String),

    /// Live validation finished
    DescriptionValidated {
        valid: bool,
        errors: Vec<String>,
        char_count: usize,
    },

    PhotoRequested,

    /// `image` is `None` when the user cancelled
    ///
    /// Every capture outcome carries the generation of the draft that
    /// started it and is dropped if that draft has since been discarded.
    PhotoCaptured {
        generation: u64,
        image: Option<ImageRef>,
    },

    LocationRequested,
    LocationCaptured {
        generation: u64,
        location: Location,
    },

    /// A capture was refused or the device failed
    CaptureFailed {
        generation: u64,
        capture: Capture,
        title: String,
        message: String,
    },

    SubmitRequested,
    ReportSubmitted(ReportId),

    // === Report Detail ===
    CommentStarted,
    CommentCancelled,
    CommentChanged(String),
    CommentSubmitRequested(ReportId),
    CommentAdded,
    CommentUpvoteRequested { report_id: ReportId, index: usize },
    CommentDownvoteRequested { report_id: ReportId, index: usize },

    /// Admin-only status advance, from the detail view or the dashboard
    AdvanceStatusRequested(ReportId),

    // === Admin Login ===
    LoginInput(char),
    LoginBackspace,
    LoginToggleField,
    /// Show or mask the password
    LoginToggleReveal,
    LoginRequested,
    LoginSucceeded(AdminSession),
    LogoutRequested,
    LoggedOut,

    // === Admin Dashboard ===
    /// Zoom the map onto one report
    FocusRequested(ReportId),

    // === Alerts ===
    /// Show a modal alert
    ShowAlert(Alert),

    /// Dismiss the alert
    DismissAlert,

    // === Status Bar ===
    SetStatus(String),
}

/// Screen/View identifier
///
/// Screens that need context carry it as parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Community report list (root)
    ReportList,

    /// Report creation form
    CreateReport,

    /// One report with its comments
    Detail { report_id: ReportId, is_admin: bool },

    AdminLogin,

    /// Map overlays and triage list
    AdminDashboard,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::ReportList => "Community Reports",
            Screen::CreateReport => "Report Issue",
            Screen::Detail { .. } => "Report Detail",
            Screen::AdminLogin => "Admin Login",
            Screen::AdminDashboard => "Admin Dashboard",
        }
    }
}

/// Which device capture an outcome belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    Photo,
    Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Error,
}

/// Modal message with a heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

impl From<&FixMyCityError> for Alert {
    fn from(error: &FixMyCityError) -> Self {
        let message = match error {
            // Show the bare reason, not the wrapper prefix
            FixMyCityError::Capability(inner) => inner.to_string(),
            FixMyCityError::Auth(inner) => inner.to_string(),
            FixMyCityError::Validation(reason) => reason.clone(),
            other => other.to_string(),
        };
        Alert::error(error.title(), message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libfixmycity::error::{AuthError, CapabilityError};

    #[test]
    fn test_alert_from_auth_error() {
        let alert = Alert::from(&FixMyCityError::from(AuthError::InvalidCredentials));

        assert_eq!(alert.kind, AlertKind::Error);
        assert_eq!(alert.title, "Login failed");
        assert_eq!(alert.message, "Incorrect credentials");
    }

    #[test]
    fn test_alert_from_permission_denied() {
        let error = FixMyCityError::from(CapabilityError::PermissionDenied(
            "Location permission is required to tag the report.".to_string(),
        ));
        let alert = Alert::from(&error);

        assert_eq!(alert.title, "Permission denied");
        assert_eq!(alert.message, "Location permission is required to tag the report.");
    }

    #[test]
    fn test_alert_from_no_location() {
        let alert = Alert::from(&FixMyCityError::NoLocation);

        assert_eq!(alert.title, "No location");
        assert_eq!(alert.message, "This report has no location data.");
    }
}
