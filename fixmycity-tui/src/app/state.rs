//! Application state
//!
//! Immutable state structure following functional programming principles.
//! All state transitions happen through the reducer (see `reducer.rs`).

use libfixmycity::config::{DEFAULT_LATITUDE, DEFAULT_LONGITUDE};
use libfixmycity::service::admin::AdminSession;
use libfixmycity::service::dashboard::Region;
use libfixmycity::service::draft::ReportDraft;
use libfixmycity::{Location, Report, ReportId};

use super::actions::{Alert, Screen};

/// Root application state
///
/// This is the single source of truth for the entire application.
/// State transitions are pure functions that return new state values.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Should the application quit?
    pub should_quit: bool,

    /// Navigation stack; the last entry is the visible screen and the first
    /// is always the report list
    pub navigation: Vec<Screen>,

    /// Help overlay visible?
    pub help_visible: bool,

    /// Latest store snapshot, most recent first
    pub reports: Vec<Report>,

    /// Report list selection
    pub list_selected: usize,

    pub create: CreateState,
    pub detail: DetailState,
    pub login: LoginState,
    pub dashboard: DashboardState,

    /// Present while an admin is logged in
    pub admin: Option<AdminSession>,

    /// Map center when the newest report has no location
    pub default_center: Location,

    /// Status bar message
    pub status: Option<String>,

    /// Modal alert
    pub alert: Option<Alert>,

    /// UI configuration
    pub config: UiConfig,
}

/// Report creation form
#[derive(Debug, Clone)]
pub struct CreateState {
    pub draft: ReportDraft,

    /// Would submit pass validation?
    pub valid: bool,

    /// Validation errors
    pub errors: Vec<String>,

    /// Character count of the trimmed description
    pub char_count: usize,

    /// Photo capture in flight?
    pub capturing_photo: bool,

    /// Location capture in flight?
    pub capturing_location: bool,

    /// Bumped each time a draft is discarded; capture outcomes for an
    /// older generation are ignored
    pub generation: u64,
}

/// Report detail view
#[derive(Debug, Clone, Default)]
pub struct DetailState {
    /// Selected comment index
    pub selected_comment: usize,

    /// Is the comment editor focused?
    pub commenting: bool,

    /// Comment being typed
    pub comment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

/// Admin login form
#[derive(Debug, Clone, Default)]
pub struct LoginState {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    /// Show the password in clear?
    pub reveal_password: bool,
}

/// Admin dashboard
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub selected: usize,

    /// Region the map was zoomed onto, if any
    pub focused: Option<Region>,
}

/// UI configuration
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Use colors?
    pub colors_enabled: bool,

    /// Use unicode symbols (false = ASCII fallback)
    pub unicode_enabled: bool,

    /// Tick rate in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            should_quit: false,
            navigation: vec![Screen::ReportList],
            help_visible: false,
            reports: Vec::new(),
            list_selected: 0,
            create: CreateState::default(),
            detail: DetailState::default(),
            login: LoginState::default(),
            dashboard: DashboardState::default(),
            admin: None,
            default_center: Location {
                latitude: DEFAULT_LATITUDE,
                longitude: DEFAULT_LONGITUDE,
            },
            status: None,
            alert: None,
            config: UiConfig::default(),
        }
    }
}

impl Default for CreateState {
    fn default() -> Self {
        Self {
            draft: ReportDraft::new(),
            valid: false, // Empty description is invalid
            errors: vec!["Description cannot be empty".to_string()],
            char_count: 0,
            capturing_photo: false,
            capturing_location: false,
            generation: 0,
        }
    }
}

impl CreateState {
    /// A blank form for the next draft
    pub fn discarded(&self) -> Self {
        Self {
            generation: self.generation.wrapping_add(1),
            ..Self::default()
        }
    }

    /// Is a photo or location capture still in flight?
    pub fn is_capturing(&self) -> bool {
        self.capturing_photo || self.capturing_location
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        // Detect environment for sensible defaults
        let colors_enabled = std::env::var("NO_COLOR").is_err()
            && std::env::var("FIXMYCITY_TUI_NO_COLOR").is_err();

        let unicode_enabled = colors_enabled; // Same heuristic for now

        let tick_rate_ms = std::env::var("FIXMYCITY_TUI_TICK_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(100);

        Self {
            colors_enabled,
            unicode_enabled,
            tick_rate_ms,
        }
    }
}

impl AppState {
    /// Create new application state with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a specific map fallback center
    pub fn with_default_center(default_center: Location) -> Self {
        Self {
            default_center,
            ..Self::default()
        }
    }

    /// The visible screen
    pub fn current_screen(&self) -> Screen {
        self.navigation.last().copied().unwrap_or(Screen::ReportList)
    }

    pub fn report(&self, id: ReportId) -> Option<&Report> {
        self.reports.iter().find(|r| r.id == id)
    }

    /// Report under the list cursor
    pub fn selected_report(&self) -> Option<&Report> {
        self.reports.get(self.list_selected)
    }

    /// Report under the dashboard cursor
    pub fn selected_dashboard_report(&self) -> Option<&Report> {
        self.reports.get(self.dashboard.selected)
    }

    /// Report shown by the detail view, if that is the visible screen
    pub fn detail_report(&self) -> Option<&Report> {
        match self.current_screen() {
            Screen::Detail { report_id, .. } => self.report(report_id),
            _ => None,
        }
    }

    /// Is keyboard input going into a text field?
    ///
    /// Single-letter shortcuts are disabled while typing.
    pub fn is_text_entry(&self) -> bool {
        match self.current_screen() {
            Screen::CreateReport | Screen::AdminLogin => true,
            Screen::Detail { .. } => self.detail.commenting,
            Screen::ReportList | Screen::AdminDashboard => false,
        }
    }

    /// Whether the status-advance control is offered on the detail view
    pub fn can_advance_detail(&self) -> bool {
        match self.current_screen() {
            Screen::Detail {
                report_id,
                is_admin: true,
            } => self.admin.is_some() && self.report(report_id).is_some_and(|r| r.status.can_advance()),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_starts_on_list() {
        let state = AppState::new();

        assert_eq!(state.current_screen(), Screen::ReportList);
        assert_eq!(state.navigation.len(), 1);
        assert!(state.admin.is_none());
        assert!(!state.create.valid);
        assert_eq!(state.default_center.latitude, DEFAULT_LATITUDE);
    }

    #[test]
    fn test_text_entry_screens() {
        let mut state = AppState::new();
        assert!(!state.is_text_entry());

        state.navigation.push(Screen::CreateReport);
        assert!(state.is_text_entry());

        state.navigation.pop();
        state.navigation.push(Screen::Detail {
            report_id: ReportId::new(1),
            is_admin: false,
        });
        assert!(!state.is_text_entry());
        state.detail.commenting = true;
        assert!(state.is_text_entry());
    }

    #[test]
    fn test_discarded_draft_moves_to_next_generation() {
        let mut create = CreateState::default();
        create.draft.description = "Pothole".to_string();
        create.capturing_location = true;

        let next = create.discarded();

        assert_eq!(next.generation, create.generation + 1);
        assert!(next.draft.description.is_empty());
        assert!(!next.is_capturing());
    }
}
