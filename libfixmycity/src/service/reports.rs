//! Report browsing, voting and triage
//!
//! Applies the engine's transforms to stored reports by id. A missing id is
//! a silent no-op in the store; here it becomes `FixMyCityError::NotFound`
//! so the user hears about it.

use crate::engine;
use crate::error::{FixMyCityError, Result};
use crate::service::admin::AdminSession;
use crate::store::ReportStore;
use crate::types::{Report, ReportId, Status};

#[derive(Clone)]
pub struct ReportService {
    store: ReportStore,
}

impl ReportService {
    pub fn new(store: ReportStore) -> Self {
        Self { store }
    }

    /// All reports, most recent first
    pub fn list(&self) -> Vec<Report> {
        self.store.list()
    }

    pub fn get(&self, id: ReportId) -> Result<Report> {
        self.store.get(id).ok_or(FixMyCityError::NotFound(id))
    }

    pub fn upvote(&self, id: ReportId) -> Result<i64> {
        let upvotes = self
            .store
            .update_by_id(id, engine::upvote)
            .ok_or(FixMyCityError::NotFound(id))?;
        tracing::debug!(report_id = %id, upvotes, "Report upvoted");
        Ok(upvotes)
    }

    pub fn downvote(&self, id: ReportId) -> Result<i64> {
        let upvotes = self
            .store
            .update_by_id(id, engine::downvote)
            .ok_or(FixMyCityError::NotFound(id))?;
        tracing::debug!(report_id = %id, upvotes, "Report downvoted");
        Ok(upvotes)
    }

    /// Append a comment, returning its index
    pub fn add_comment(&self, id: ReportId, text: &str) -> Result<usize> {
        let index = self
            .store
            .try_update_by_id(id, |report| engine::add_comment(report, text))?
            .ok_or(FixMyCityError::NotFound(id))?;
        tracing::debug!(report_id = %id, index, "Comment added");
        Ok(index)
    }

    pub fn upvote_comment(&self, id: ReportId, index: usize) -> Result<u64> {
        let upvotes = self
            .store
            .try_update_by_id(id, |report| engine::upvote_comment(report, index))?
            .ok_or(FixMyCityError::NotFound(id))?;
        tracing::debug!(report_id = %id, index, upvotes, "Comment upvoted");
        Ok(upvotes)
    }

    pub fn downvote_comment(&self, id: ReportId, index: usize) -> Result<u64> {
        let downvotes = self
            .store
            .try_update_by_id(id, |report| engine::downvote_comment(report, index))?
            .ok_or(FixMyCityError::NotFound(id))?;
        tracing::debug!(report_id = %id, index, downvotes, "Comment downvoted");
        Ok(downvotes)
    }

    /// Move a report one step along Submitted -> In Progress -> Resolved
    ///
    /// Requires an admin session. Both the detail view and the dashboard
    /// advance through here.
    ///
    /// # Errors
    ///
    /// Returns `FixMyCityError::Validation` for a Resolved report and
    /// `FixMyCityError::NotFound` for an unknown id.
    pub fn advance_status(&self, id: ReportId, session: &AdminSession) -> Result<Status> {
        let status = self
            .store
            .try_update_by_id(id, |report| {
                if !report.status.can_advance() {
                    return Err(FixMyCityError::Validation(format!(
                        "{} reports cannot be advanced",
                        report.status
                    )));
                }
                Ok(engine::advance_status(report))
            })?
            .ok_or(FixMyCityError::NotFound(id))?;

        tracing::info!(
            report_id = %id,
            status = %status,
            admin = %session.username(),
            "Report status advanced"
        );
        Ok(status)
    }
}
