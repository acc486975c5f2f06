//! Service layer adapter for TUI
//!
//! This module provides an adapter between the FixMyCityService and the
//! synchronous TUI event loop.
//!
//! # Architecture
//!
//! - `ServiceHandle`: Wraps FixMyCityService and owns a tokio runtime
//! - Store operations: Synchronous pass-through (in-memory, never blocks)
//! - Device capture: Spawns an async task that answers with an [`Action`]
//!   on the completion channel
//! - Events: Bridges tokio broadcast channel to crossbeam for sync event loop
//!
//! # Example
//!
//! ```no_run
//! use fixmycity_tui::services::ServiceHandle;
//! use libfixmycity::Config;
//!
//! # fn example() -> fixmycity_tui::error::Result<()> {
//! let services = ServiceHandle::new(Config::default())?;
//!
//! // Start a capture; the outcome arrives later as an action
//! services.capture_location(0);
//!
//! // In the event loop
//! for action in services.completions().try_iter() {
//!     // Feed action to the reducer
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use libfixmycity::service::events::Event;
use libfixmycity::service::validation::{TextField, ValidationRequest, ValidationResponse};
use libfixmycity::service::FixMyCityService;
use libfixmycity::{Config, FixMyCityError, Report};
use tokio::sync::broadcast::error::RecvError;

use crate::app::{Action, Capture};
use crate::error::Result;

/// Service handle for TUI operations
///
/// Wraps FixMyCityService and provides sync/async bridges for the TUI event loop.
/// Uses a tokio runtime to run device captures without blocking the UI.
pub struct ServiceHandle {
    service: Arc<FixMyCityService>,
    runtime: tokio::runtime::Runtime,
    completion_tx: Sender<Action>,
    completion_rx: Receiver<Action>,
}

impl ServiceHandle {
    /// Create a service handle with the local capability adapters
    ///
    /// # Errors
    ///
    /// Returns an error if the tokio runtime cannot be created.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_service(FixMyCityService::from_config(config))
    }

    /// Wrap an existing service (tests inject mock capabilities this way)
    ///
    /// # Errors
    ///
    /// Returns an error if the tokio runtime cannot be created.
    pub fn with_service(service: FixMyCityService) -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (completion_tx, completion_rx) = unbounded();

        Ok(Self {
            service: Arc::new(service),
            runtime,
            completion_tx,
            completion_rx,
        })
    }

    pub fn service(&self) -> &FixMyCityService {
        &self.service
    }

    /// Current store snapshot, most recent first
    pub fn reports(&self) -> Vec<Report> {
        self.service.reports().list()
    }

    /// Subscribe to service events
    ///
    /// Bridges the tokio broadcast channel to a crossbeam channel so the
    /// sync event loop can poll it with `try_recv`.
    pub fn subscribe(&self) -> Receiver<Event> {
        let (tx, rx) = unbounded();

        let mut event_rx = self.service.subscribe();
        self.runtime.spawn(async move {
            loop {
                match event_rx.recv().await {
                    Ok(event) => {
                        if tx.send(event).is_err() {
                            // Receiver dropped, stop forwarding
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("Event receiver lagged, skipped {} events", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        rx
    }

    /// Outcomes of device captures, as actions for the reducer
    pub fn completions(&self) -> &Receiver<Action> {
        &self.completion_rx
    }

    /// Validate a free-text field
    ///
    /// Synchronous; validation is pure computation.
    pub fn validate(&self, field: TextField, content: &str) -> ValidationResponse {
        self.service.validation().validate(ValidationRequest {
            field,
            content: content.to_string(),
        })
    }

    /// Ask for camera and location access in the background
    pub fn request_permissions(&self) {
        let service = Arc::clone(&self.service);
        self.runtime.spawn(async move {
            service.draft().request_permissions().await;
        });
    }

    /// Start a photo capture for the draft of the given generation
    ///
    /// Answers with `PhotoCaptured` or `CaptureFailed` on the completion
    /// channel.
    pub fn capture_photo(&self, generation: u64) {
        let service = Arc::clone(&self.service);
        let tx = self.completion_tx.clone();
        self.runtime.spawn(async move {
            let action = match service.draft().capture_photo().await {
                Ok(image) => Action::PhotoCaptured { generation, image },
                Err(e) => capture_failed(generation, Capture::Photo, &e),
            };
            let _ = tx.send(action);
        });
    }

    /// Start a location capture for the draft of the given generation
    ///
    /// Answers with `LocationCaptured` or `CaptureFailed` on the completion
    /// channel.
    pub fn capture_location(&self, generation: u64) {
        let service = Arc::clone(&self.service);
        let tx = self.completion_tx.clone();
        self.runtime.spawn(async move {
            let action = match service.draft().capture_location().await {
                Ok(location) => Action::LocationCaptured {
                    generation,
                    location,
                },
                Err(e) => capture_failed(generation, Capture::Location, &e),
            };
            let _ = tx.send(action);
        });
    }
}

fn capture_failed(generation: u64, capture: Capture, error: &FixMyCityError) -> Action {
    let alert = crate::app::Alert::from(error);
    Action::CaptureFailed {
        generation,
        capture,
        title: alert.title,
        message: alert.message,
    }
}

/// Helper to map a ValidationResponse onto the reducer's action
pub fn validation_action(response: ValidationResponse) -> Action {
    Action::DescriptionValidated {
        valid: response.valid,
        errors: response.errors,
        char_count: response.char_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libfixmycity::error::CapabilityError;

    #[test]
    fn test_validation_action() {
        let response = ValidationResponse {
            valid: false,
            errors: vec!["Description cannot be empty".to_string()],
            char_count: 0,
        };

        match validation_action(response) {
            Action::DescriptionValidated {
                valid,
                errors,
                char_count,
            } => {
                assert!(!valid);
                assert_eq!(errors.len(), 1);
                assert_eq!(char_count, 0);
            }
            other => panic!("Expected DescriptionValidated, got {:?}", other),
        }
    }

    #[test]
    fn test_capture_failed_uses_error_title() {
        let error = FixMyCityError::from(CapabilityError::Camera("lens cracked".to_string()));

        match capture_failed(3, Capture::Photo, &error) {
            Action::CaptureFailed {
                generation,
                capture,
                title,
                message,
            } => {
                assert_eq!(generation, 3);
                assert_eq!(capture, Capture::Photo);
                assert_eq!(title, "Camera error");
                assert_eq!(message, "lens cracked");
            }
            other => panic!("Expected CaptureFailed, got {:?}", other),
        }
    }
}
