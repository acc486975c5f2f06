//! Service layer for FixMyCity
//!
//! A testable API over the report store that every front end consumes
//! instead of touching the store directly.
//!
//! # Architecture
//!
//! `FixMyCityService` is the facade and entry point. It owns the shared
//! [`ReportStore`] and [`EventBus`] and hands out specialized sub-services:
//!
//! - `ReportService`: browsing, voting, comments, status triage
//! - `DraftService`: the report creation flow and device capture
//! - `AdminService`: admin login and logout
//! - `DashboardService`: map overlays for the admin dashboard
//! - `ValidationService`: live text validation
//! - `EventBus`: change notifications
//!
//! # Example
//!
//! ```no_run
//! use libfixmycity::service::FixMyCityService;
//! use libfixmycity::service::draft::ReportDraft;
//!
//! # fn example() -> libfixmycity::Result<()> {
//! let service = FixMyCityService::new()?;
//!
//! let mut draft = ReportDraft::new();
//! draft.description = "Streetlight out near the bus stop".to_string();
//! let report = service.draft().submit(&draft)?;
//!
//! service.reports().upvote(report.id)?;
//! # Ok(())
//! # }
//! ```

pub mod admin;
pub mod dashboard;
pub mod draft;
pub mod events;
pub mod reports;
pub mod validation;

use std::sync::Arc;

use self::admin::{AdminService, StaticCredentials};
use self::dashboard::DashboardService;
use self::draft::DraftService;
use self::events::{EventBus, EventReceiver};
use self::reports::ReportService;
use self::validation::ValidationService;
use crate::capabilities::local::{DirectoryCamera, FixedLocator};
use crate::capabilities::{Camera, Locator};
use crate::store::ReportStore;
use crate::{Config, Result};

/// Buffered events per subscriber
const EVENT_CAPACITY: usize = 100;

/// Main service facade that coordinates all sub-services
///
/// All sub-services share one [`ReportStore`] handle, so a change made
/// through any of them is visible to the others immediately.
pub struct FixMyCityService {
    store: ReportStore,
    reports: ReportService,
    draft: DraftService,
    admin: AdminService,
    dashboard: DashboardService,
    validation: ValidationService,
    event_bus: EventBus,
}

impl FixMyCityService {
    /// Create a service from the default configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or parsed.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Ok(Self::from_config(config))
    }

    /// Create a service with the local capability adapters from `config`
    pub fn from_config(config: Config) -> Self {
        let camera = Arc::new(DirectoryCamera::from_config(&config.capabilities));
        let locator = Arc::new(FixedLocator::from_config(&config.capabilities));
        Self::with_capabilities(config, camera, locator)
    }

    /// Create a service with caller-supplied device adapters
    pub fn with_capabilities(
        config: Config,
        camera: Arc<dyn Camera>,
        locator: Arc<dyn Locator>,
    ) -> Self {
        let event_bus = EventBus::new(EVENT_CAPACITY);
        let store = ReportStore::new(event_bus.clone());

        let authenticator = Arc::new(StaticCredentials::from_config(&config.admin));

        tracing::debug!(
            camera = camera.name(),
            locator = locator.name(),
            "Service initialized"
        );

        Self {
            reports: ReportService::new(store.clone()),
            draft: DraftService::new(store.clone(), camera, locator),
            admin: AdminService::new(authenticator, event_bus.clone()),
            dashboard: DashboardService::new(store.clone(), config.map.default_center()),
            validation: ValidationService::new(),
            store,
            event_bus,
        }
    }

    /// Shared store handle
    pub fn store(&self) -> &ReportStore {
        &self.store
    }

    pub fn reports(&self) -> &ReportService {
        &self.reports
    }

    pub fn draft(&self) -> &DraftService {
        &self.draft
    }

    pub fn admin(&self) -> &AdminService {
        &self.admin
    }

    pub fn dashboard(&self) -> &DashboardService {
        &self.dashboard
    }

    pub fn validation(&self) -> &ValidationService {
        &self.validation
    }

    /// Subscribe to change notifications
    pub fn subscribe(&self) -> EventReceiver {
        self.event_bus.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::mock::{MockCamera, MockLocator};
    use crate::service::draft::ReportDraft;
    use crate::service::events::Event;

    fn service() -> FixMyCityService {
        FixMyCityService::with_capabilities(
            Config::default(),
            Arc::new(MockCamera::cancelled()),
            Arc::new(MockLocator::denied()),
        )
    }

    #[test]
    fn test_sub_services_share_store() {
        let service = service();
        let mut draft = ReportDraft::new();
        draft.description = "overflowing bin".to_string();

        let report = service.draft().submit(&draft).unwrap();
        service.reports().upvote(report.id).unwrap();

        assert_eq!(service.store().len(), 1);
        assert_eq!(service.reports().get(report.id).unwrap().upvotes, 1);
        assert_eq!(service.dashboard().view().reports.len(), 1);
    }

    #[test]
    fn test_from_config_uses_configured_credentials() {
        let mut config = Config::default();
        config.admin.username = "inspector".to_string();
        config.admin.password = "pa55".to_string();

        let service = FixMyCityService::from_config(config);

        assert!(service.admin().login("superuser", "bigfella").is_err());
        assert!(service.admin().login("inspector", "pa55").is_ok());
    }

    #[tokio::test]
    async fn test_subscribe_sees_store_changes() {
        let service = service();
        let mut receiver = service.subscribe();
        let mut draft = ReportDraft::new();
        draft.description = "dark street".to_string();

        let report = service.draft().submit(&draft).unwrap();

        assert_eq!(
            receiver.recv().await.unwrap(),
            Event::ReportCreated {
                report_id: report.id
            }
        );
    }
}
