//! Local capability adapters
//!
//! Stand-ins for real device services on machines without a camera or GPS:
//! the camera picks the newest photo from a directory, the locator reports a
//! configured coordinate.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use async_trait::async_trait;

use crate::capabilities::{Camera, Locator};
use crate::config::CapabilitiesConfig;
use crate::error::{CapabilityError, Result};
use crate::types::{ImageMimeType, ImageRef, Location};

/// Camera backed by a photos directory
///
/// Each capture returns the most recently modified image file in the
/// directory. An unconfigured directory counts as refused permission.
#[derive(Debug, Clone)]
pub struct DirectoryCamera {
    dir: Option<PathBuf>,
}

impl DirectoryCamera {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    pub fn from_config(config: &CapabilitiesConfig) -> Self {
        Self::new(config.photos_dir())
    }

    fn dir(&self) -> Result<&Path> {
        self.dir.as_deref().ok_or_else(|| {
            CapabilityError::PermissionDenied(
                "Camera access is not configured (set capabilities.photos_dir).".to_string(),
            )
            .into()
        })
    }
}

#[async_trait]
impl Camera for DirectoryCamera {
    async fn request_permission(&self) -> Result<()> {
        let dir = self.dir()?;
        match tokio::fs::metadata(dir).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            _ => Err(CapabilityError::PermissionDenied(format!(
                "Photos directory {} is not accessible.",
                dir.display()
            ))
            .into()),
        }
    }

    async fn capture(&self) -> Result<Option<ImageRef>> {
        self.request_permission().await?;
        let dir = self.dir()?;

        let mut entries = tokio::fs::read_dir(dir)
            .await
            .map_err(|e| CapabilityError::Camera(format!("Failed to read {}: {}", dir.display(), e)))?;

        let mut newest: Option<(SystemTime, PathBuf, ImageMimeType)> = None;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| CapabilityError::Camera(e.to_string()))?
        {
            let path = entry.path();
            let Some(mime) = ImageMimeType::from_path(&path) else {
                continue;
            };
            let Ok(meta) = entry.metadata().await else {
                continue;
            };
            if !meta.is_file() {
                continue;
            }
            let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            if newest.as_ref().map_or(true, |(t, _, _)| modified > *t) {
                newest = Some((modified, path, mime));
            }
        }

        match newest {
            Some((_, path, mime)) => {
                tracing::debug!(path = %path.display(), mime = %mime, "Captured photo from directory");
                Ok(Some(ImageRef::from_path(&path)))
            }
            None => Err(CapabilityError::Camera(format!(
                "No photos found in {}",
                dir.display()
            ))
            .into()),
        }
    }

    fn name(&self) -> &str {
        "directory-camera"
    }
}

/// Locator that always reports one configured coordinate
///
/// Without a coordinate, permission is refused.
#[derive(Debug, Clone)]
pub struct FixedLocator {
    location: Option<Location>,
}

impl FixedLocator {
    pub fn new(location: Option<Location>) -> Self {
        Self { location }
    }

    pub fn from_config(config: &CapabilitiesConfig) -> Self {
        Self::new(config.fixed_location())
    }
}

#[async_trait]
impl Locator for FixedLocator {
    async fn request_permission(&self) -> Result<()> {
        match self.location {
            Some(_) => Ok(()),
            None => Err(CapabilityError::PermissionDenied(
                "Location permission is required to tag the report.".to_string(),
            )
            .into()),
        }
    }

    async fn current_position(&self) -> Result<Location> {
        self.location.ok_or_else(|| {
            CapabilityError::Location("No location configured".to_string()).into()
        })
    }

    fn name(&self) -> &str {
        "fixed-locator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FixMyCityError;
    use std::time::Duration;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_directory_camera_unconfigured_is_denied() {
        let camera = DirectoryCamera::new(None);

        let result = camera.capture().await;
        assert!(matches!(
            result,
            Err(FixMyCityError::Capability(CapabilityError::PermissionDenied(_)))
        ));
    }

    #[tokio::test]
    async fn test_directory_camera_missing_dir_is_denied() {
        let dir = TempDir::new().unwrap();
        let camera = DirectoryCamera::new(Some(dir.path().join("nope")));

        assert!(camera.request_permission().await.is_err());
    }

    #[tokio::test]
    async fn test_directory_camera_empty_dir_is_device_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a photo").unwrap();
        let camera = DirectoryCamera::new(Some(dir.path().to_path_buf()));

        let result = camera.capture().await;
        assert!(matches!(
            result,
            Err(FixMyCityError::Capability(CapabilityError::Camera(_)))
        ));
    }

    #[tokio::test]
    async fn test_directory_camera_picks_newest_image() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("older.jpg"), b"jpeg").unwrap();
        std::thread::sleep(Duration::from_millis(20));
        std::fs::write(dir.path().join("newer.png"), b"png").unwrap();
        std::fs::write(dir.path().join("readme.md"), b"text").unwrap();

        let camera = DirectoryCamera::new(Some(dir.path().to_path_buf()));
        let image = camera.capture().await.unwrap().unwrap();

        assert!(image.uri().starts_with("file://"));
        assert!(image.uri().ends_with("newer.png"));
    }

    #[tokio::test]
    async fn test_fixed_locator() {
        let locator = FixedLocator::new(Location::new(40.7128, -74.006));

        locator.request_permission().await.unwrap();
        let location = locator.current_position().await.unwrap();
        assert_eq!(location.longitude, -74.006);
    }

    #[tokio::test]
    async fn test_fixed_locator_without_location_is_denied() {
        let locator = FixedLocator::new(None);

        let err = locator.request_permission().await.unwrap_err();
        assert_eq!(err.title(), "Permission denied");
    }
}
