//! Device capability abstractions
//!
//! The report creation flow reaches the outside world through two
//! capabilities: a camera that yields a photo reference and a locator that
//! yields the device position. Both are async and may be declined by the
//! user or fail on the device; either way the draft field they feed simply
//! stays unset.
//!
//! # Examples
//!
//! ```no_run
//! use libfixmycity::capabilities::{Locator, local::FixedLocator};
//! use libfixmycity::types::Location;
//!
//! # async fn example() -> libfixmycity::Result<()> {
//! let locator = FixedLocator::new(Location::new(51.5072, -0.1276));
//!
//! locator.request_permission().await?;
//! let position = locator.current_position().await?;
//! println!("Lat: {:.4}, Lng: {:.4}", position.latitude, position.longitude);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ImageRef, Location};

pub mod local;

// Mock adapters are available for all builds (not just tests) to support integration tests
pub mod mock;

/// Photo capture
#[async_trait]
pub trait Camera: Send + Sync {
    /// Ask the user for camera access
    ///
    /// # Errors
    ///
    /// Returns `CapabilityError::PermissionDenied` if access is refused.
    async fn request_permission(&self) -> Result<()>;

    /// Take a photo
    ///
    /// Returns `Ok(None)` when the user cancels the capture.
    ///
    /// # Errors
    ///
    /// Returns `CapabilityError::PermissionDenied` if access is refused and
    /// `CapabilityError::Camera` if the device fails.
    async fn capture(&self) -> Result<Option<ImageRef>>;

    /// Adapter name, for logs
    fn name(&self) -> &str;
}

/// Foreground geolocation
///
/// Callers check permission with [`Locator::request_permission`] before
/// every read.
#[async_trait]
pub trait Locator: Send + Sync {
    /// Ask the user for foreground location access
    ///
    /// # Errors
    ///
    /// Returns `CapabilityError::PermissionDenied` if access is refused.
    async fn request_permission(&self) -> Result<()>;

    /// Read the current position
    ///
    /// # Errors
    ///
    /// Returns `CapabilityError::Location` if the position cannot be read.
    async fn current_position(&self) -> Result<Location>;

    /// Adapter name, for logs
    fn name(&self) -> &str;
}
