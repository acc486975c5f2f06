//! Mock capability adapters for testing
//!
//! Configurable stand-ins for the camera and locator that can simulate a
//! granted or refused permission, a cancelled capture, device failures and
//! slow devices, and that count how often they were called.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use crate::capabilities::{Camera, Locator};
use crate::error::{CapabilityError, Result};
use crate::types::{ImageRef, Location};

/// What a mock device does when asked for data
#[derive(Debug, Clone)]
pub enum MockOutcome<T> {
    /// Permission granted and data returned
    Succeeds(T),
    /// Permission granted but the user backed out
    Cancelled,
    /// Permission refused
    Denied,
    /// Permission granted but the device errored
    Fails(String),
}

/// Mock camera
#[derive(Debug, Clone)]
pub struct MockCamera {
    outcome: MockOutcome<ImageRef>,
    delay: Duration,
    capture_calls: Arc<AtomicUsize>,
}

impl MockCamera {
    pub fn new(outcome: MockOutcome<ImageRef>) -> Self {
        Self {
            outcome,
            delay: Duration::ZERO,
            capture_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A camera that always returns `uri`
    pub fn with_photo(uri: &str) -> Self {
        Self::new(MockOutcome::Succeeds(ImageRef::new(uri)))
    }

    pub fn cancelled() -> Self {
        Self::new(MockOutcome::Cancelled)
    }

    pub fn denied() -> Self {
        Self::new(MockOutcome::Denied)
    }

    pub fn failing(error: &str) -> Self {
        Self::new(MockOutcome::Fails(error.to_string()))
    }

    /// Delay each capture; permission requests answer immediately
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of times capture was called
    pub fn capture_call_count(&self) -> usize {
        self.capture_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Camera for MockCamera {
    async fn request_permission(&self) -> Result<()> {
        match self.outcome {
            MockOutcome::Denied => Err(CapabilityError::PermissionDenied(
                "Camera permission is required to take a photo.".to_string(),
            )
            .into()),
            _ => Ok(()),
        }
    }

    async fn capture(&self) -> Result<Option<ImageRef>> {
        self.capture_calls.fetch_add(1, Ordering::SeqCst);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match &self.outcome {
            MockOutcome::Succeeds(image) => Ok(Some(image.clone())),
            MockOutcome::Cancelled => Ok(None),
            MockOutcome::Denied => {
                self.request_permission().await?;
                Ok(None)
            }
            MockOutcome::Fails(message) => Err(CapabilityError::Camera(message.clone()).into()),
        }
    }

    fn name(&self) -> &str {
        "mock-camera"
    }
}

/// Mock locator
#[derive(Debug, Clone)]
pub struct MockLocator {
    outcome: MockOutcome<Location>,
    delay: Duration,
    permission_calls: Arc<AtomicUsize>,
    position_calls: Arc<AtomicUsize>,
}

impl MockLocator {
    pub fn new(outcome: MockOutcome<Location>) -> Self {
        Self {
            outcome,
            delay: Duration::ZERO,
            permission_calls: Arc::new(AtomicUsize::new(0)),
            position_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A locator that always reports `latitude`/`longitude`
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self::new(MockOutcome::Succeeds(Location {
            latitude,
            longitude,
        }))
    }

    pub fn denied() -> Self {
        Self::new(MockOutcome::Denied)
    }

    pub fn failing(error: &str) -> Self {
        Self::new(MockOutcome::Fails(error.to_string()))
    }

    /// Delay each position fix; permission requests answer immediately
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of times permission was requested
    pub fn permission_call_count(&self) -> usize {
        self.permission_calls.load(Ordering::SeqCst)
    }

    /// Number of times the position was read
    pub fn position_call_count(&self) -> usize {
        self.position_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Locator for MockLocator {
    async fn request_permission(&self) -> Result<()> {
        self.permission_calls.fetch_add(1, Ordering::SeqCst);

        match self.outcome {
            MockOutcome::Denied => Err(CapabilityError::PermissionDenied(
                "Location permission is required to tag the report.".to_string(),
            )
            .into()),
            _ => Ok(()),
        }
    }

    async fn current_position(&self) -> Result<Location> {
        self.position_calls.fetch_add(1, Ordering::SeqCst);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match &self.outcome {
            MockOutcome::Succeeds(location) => Ok(*location),
            MockOutcome::Cancelled => Err(CapabilityError::Location(
                "Location request was cancelled".to_string(),
            )
            .into()),
            MockOutcome::Denied => Err(CapabilityError::PermissionDenied(
                "Location permission is required to tag the report.".to_string(),
            )
            .into()),
            MockOutcome::Fails(message) => Err(CapabilityError::Location(message.clone()).into()),
        }
    }

    fn name(&self) -> &str {
        "mock-locator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FixMyCityError;

    #[tokio::test]
    async fn test_mock_camera_success() {
        let camera = MockCamera::with_photo("file:///tmp/a.jpg");

        camera.request_permission().await.unwrap();
        let image = camera.capture().await.unwrap();

        assert_eq!(image, Some(ImageRef::new("file:///tmp/a.jpg")));
        assert_eq!(camera.capture_call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_camera_cancelled() {
        let camera = MockCamera::cancelled();
        assert_eq!(camera.capture().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_mock_camera_denied() {
        let camera = MockCamera::denied();

        let result = camera.capture().await;
        assert!(matches!(
            result,
            Err(FixMyCityError::Capability(CapabilityError::PermissionDenied(_)))
        ));
    }

    #[tokio::test]
    async fn test_mock_camera_failure_message() {
        let camera = MockCamera::failing("Camera not available on simulator");

        let err = camera.capture().await.unwrap_err();
        assert!(err.to_string().contains("Camera not available"));
    }

    #[tokio::test]
    async fn test_mock_locator_counts_calls() {
        let locator = MockLocator::at(12.97, 77.59);

        locator.request_permission().await.unwrap();
        let location = locator.current_position().await.unwrap();

        assert_eq!(location.latitude, 12.97);
        assert_eq!(locator.permission_call_count(), 1);
        assert_eq!(locator.position_call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_locator_denied() {
        let locator = MockLocator::denied();

        let result = locator.request_permission().await;
        assert!(matches!(
            result,
            Err(FixMyCityError::Capability(CapabilityError::PermissionDenied(_)))
        ));
    }

    #[tokio::test]
    async fn test_mock_with_delay() {
        let locator = MockLocator::at(0.0, 0.0).delayed(Duration::from_millis(50));

        let start = std::time::Instant::now();
        locator.current_position().await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_delay_skips_permission_request() {
        let camera = MockCamera::with_photo("file:///slow.jpg").delayed(Duration::from_secs(10));
        let locator = MockLocator::at(0.0, 0.0).delayed(Duration::from_secs(10));

        let granted = tokio::time::timeout(Duration::from_secs(1), async {
            camera.request_permission().await?;
            locator.request_permission().await
        })
        .await;

        assert!(matches!(granted, Ok(Ok(()))));
    }
}
