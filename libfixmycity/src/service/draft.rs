//! Report creation flow
//!
//! A [`ReportDraft`] holds the form fields while the user composes a report.
//! Photo and location capture are independent, optional side effects: each
//! either fills its field or leaves it as it was. Submitting validates the
//! description and turns the draft into a stored [`Report`].

use std::sync::Arc;

use chrono::Utc;

use crate::capabilities::{Camera, Locator};
use crate::engine::require_text;
use crate::store::ReportStore;
use crate::types::{ImageRef, IssueType, Location, Report};
use crate::Result;

/// Unsaved report form state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportDraft {
    pub issue_type: IssueType,
    pub description: String,
    pub image: Option<ImageRef>,
    pub location: Option<Location>,
}

impl ReportDraft {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Confirmation shown after a successful location capture
pub fn location_captured_message(location: &Location) -> String {
    format!(
        "Lat: {:.4}, Lng: {:.4}",
        location.latitude, location.longitude
    )
}

/// Drives the capture side effects and submission of drafts
#[derive(Clone)]
pub struct DraftService {
    store: ReportStore,
    camera: Arc<dyn Camera>,
    locator: Arc<dyn Locator>,
}

impl DraftService {
    pub fn new(store: ReportStore, camera: Arc<dyn Camera>, locator: Arc<dyn Locator>) -> Self {
        Self {
            store,
            camera,
            locator,
        }
    }

    /// Ask for camera and location access up front
    ///
    /// The answers are only logged; each capture asks again.
    pub async fn request_permissions(&self) {
        if let Err(e) = self.camera.request_permission().await {
            tracing::warn!(camera = self.camera.name(), error = %e, "Camera permission not granted");
        }
        if let Err(e) = self.locator.request_permission().await {
            tracing::warn!(locator = self.locator.name(), error = %e, "Location permission not granted");
        }
    }

    /// Take a photo
    ///
    /// Returns `Ok(None)` if the user cancelled.
    ///
    /// # Errors
    ///
    /// Returns a capability error if permission is refused or the camera
    /// fails. No retry is attempted.
    pub async fn capture_photo(&self) -> Result<Option<ImageRef>> {
        match self.camera.capture().await {
            Ok(image) => {
                tracing::debug!(camera = self.camera.name(), captured = image.is_some(), "Photo capture finished");
                Ok(image)
            }
            Err(e) => {
                tracing::warn!(camera = self.camera.name(), error = %e, "Photo capture failed");
                Err(e)
            }
        }
    }

    /// Read the current position, checking permission first
    ///
    /// # Errors
    ///
    /// Returns a capability error if permission is refused or the position
    /// cannot be read. No retry is attempted.
    pub async fn capture_location(&self) -> Result<Location> {
        let result = async {
            self.locator.request_permission().await?;
            self.locator.current_position().await
        }
        .await;

        if let Err(ref e) = result {
            tracing::warn!(locator = self.locator.name(), error = %e, "Location capture failed");
        }
        result
    }

    /// Capture a photo into `draft`
    ///
    /// Returns whether a photo was attached. On cancel or error the draft's
    /// image is left as it was.
    pub async fn attach_photo(&self, draft: &mut ReportDraft) -> Result<bool> {
        match self.capture_photo().await? {
            Some(image) => {
                draft.image = Some(image);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Capture the current position into `draft`
    ///
    /// On error the draft's location is left as it was.
    pub async fn attach_location(&self, draft: &mut ReportDraft) -> Result<Location> {
        let location = self.capture_location().await?;
        draft.location = Some(location);
        Ok(location)
    }

    /// Turn a draft into a stored report
    ///
    /// The new report is Submitted with no votes or comments and goes to the
    /// front of the store. The caller discards the draft on success.
    ///
    /// # Errors
    ///
    /// Returns `FixMyCityError::Validation` if the description is empty after
    /// trimming; nothing is stored.
    pub fn submit(&self, draft: &ReportDraft) -> Result<Report> {
        let description = require_text(&draft.description, "Description")?;

        let report = Report::new(
            self.store.next_id(),
            draft.issue_type,
            description,
            draft.location,
            draft.image.clone(),
            Utc::now(),
        );
        self.store.create(report.clone())?;

        tracing::info!(
            report_id = %report.id,
            issue_type = %report.issue_type,
            has_photo = report.image.is_some(),
            has_location = report.location.is_some(),
            "Report submitted"
        );
        Ok(report)
    }
}
