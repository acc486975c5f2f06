//! In-memory report store
//!
//! The single owner of all report state. `ReportStore` is a cheap handle
//! (`Arc` inside); clone it into every service and screen that needs it.
//! Nothing is persisted: dropping the last handle drops every report.
//!
//! Mutations are serialized behind one lock, so each update is applied in
//! full before the next read sees it. Every successful mutation emits an
//! event on the shared [`EventBus`].

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use crate::error::{FixMyCityError, Result};
use crate::service::events::{Event, EventBus};
use crate::types::{Report, ReportId};

#[derive(Clone)]
pub struct ReportStore {
    inner: Arc<RwLock<StoreInner>>,
    events: EventBus,
}

#[derive(Default)]
struct StoreInner {
    /// Most recent first
    reports: Vec<Report>,
    /// Highest id handed out or inserted so far
    last_id: u64,
}

impl ReportStore {
    pub fn new(events: EventBus) -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner::default())),
            events,
        }
    }

    /// Issue a fresh time-based id
    ///
    /// Uses the current time in milliseconds, bumped past the last issued id
    /// when two reports are created within the same millisecond.
    pub fn next_id(&self) -> ReportId {
        let now_ms = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.next_id_at(now_ms)
    }

    pub(crate) fn next_id_at(&self, now_ms: u64) -> ReportId {
        let mut inner = self.write();
        let id = now_ms.max(inner.last_id + 1);
        inner.last_id = id;
        ReportId::new(id)
    }

    /// Prepend a fully-formed report
    ///
    /// # Errors
    ///
    /// Returns `FixMyCityError::DuplicateId` if a report with the same id is
    /// already stored; the store is left unchanged.
    pub fn create(&self, report: Report) -> Result<ReportId> {
        let id = report.id;
        {
            let mut inner = self.write();
            if inner.reports.iter().any(|r| r.id == id) {
                tracing::warn!(report_id = %id, "Rejected report with duplicate id");
                return Err(FixMyCityError::DuplicateId(id));
            }
            inner.last_id = inner.last_id.max(id.as_u64());
            inner.reports.insert(0, report);
        }
        tracing::debug!(report_id = %id, "Report stored");
        self.events.emit(Event::ReportCreated { report_id: id });
        Ok(id)
    }

    /// Snapshot of all reports, most recent first
    pub fn list(&self) -> Vec<Report> {
        self.read().reports.clone()
    }

    pub fn get(&self, id: ReportId) -> Option<Report> {
        self.read().reports.iter().find(|r| r.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().reports.is_empty()
    }

    /// Apply `transform` to the report with `id`, leaving the others alone
    ///
    /// Returns `None` (and changes nothing) when no report has that id.
    pub fn update_by_id<R>(&self, id: ReportId, transform: impl FnOnce(&mut Report) -> R) -> Option<R> {
        self.try_update_by_id(id, |report| Ok(transform(report)))
            .ok()
            .flatten()
    }

    /// Like [`ReportStore::update_by_id`] for transforms that can fail
    ///
    /// No event is emitted when the transform returns an error; transforms
    /// are expected to leave the report untouched in that case.
    pub fn try_update_by_id<T>(
        &self,
        id: ReportId,
        transform: impl FnOnce(&mut Report) -> Result<T>,
    ) -> Result<Option<T>> {
        let outcome = {
            let mut inner = self.write();
            match inner.reports.iter_mut().find(|r| r.id == id) {
                Some(report) => Some(transform(report)?),
                None => None,
            }
        };

        if outcome.is_some() {
            self.events.emit(Event::ReportUpdated { report_id: id });
        }
        Ok(outcome)
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
