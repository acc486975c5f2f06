//! End-to-end workflow tests
//!
//! These tests verify complete workflows including:
//! - Creating a report with a photo and a location from local adapters
//! - Capture failures leaving the draft untouched
//! - Triage from the admin dashboard
//! - Configuration loading feeding the services

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use libfixmycity::capabilities::local::{DirectoryCamera, FixedLocator};
use libfixmycity::capabilities::mock::{MockCamera, MockLocator};
use libfixmycity::config::Config;
use libfixmycity::service::dashboard::OverlayColor;
use libfixmycity::service::draft::{location_captured_message, ReportDraft};
use libfixmycity::service::FixMyCityService;
use libfixmycity::types::{IssueType, Status};
use tempfile::TempDir;

#[tokio::test]
async fn test_report_with_local_adapters() -> Result<()> {
    let photos = TempDir::new()?;
    std::fs::write(photos.path().join("IMG_0001.jpg"), b"jpeg")?;

    let config_dir = TempDir::new()?;
    let config_path = config_dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
[capabilities]
photos_dir = "{}"
latitude = 19.076
longitude = 72.8777
"#,
            photos.path().display()
        ),
    )?;

    let config = Config::load_from_path(&config_path)?;
    let service = FixMyCityService::with_capabilities(
        config.clone(),
        Arc::new(DirectoryCamera::from_config(&config.capabilities)),
        Arc::new(FixedLocator::from_config(&config.capabilities)),
    );

    let mut draft = ReportDraft::new();
    draft.issue_type = IssueType::Garbage;
    draft.description = "Garbage not collected for a week".to_string();

    assert!(service.draft().attach_photo(&mut draft).await?);
    let location = service.draft().attach_location(&mut draft).await?;
    assert_eq!(location_captured_message(&location), "Lat: 19.0760, Lng: 72.8777");

    let report = service.draft().submit(&draft)?;
    let image = report.image.clone().expect("photo attached");
    assert!(image.uri().ends_with("IMG_0001.jpg"));
    assert_eq!(report.location, Some(location));

    let view = service.dashboard().view();
    assert_eq!(view.region.center, location);
    assert_eq!(view.markers.len(), 1);
    assert_eq!(view.heat_circles[0].color, OverlayColor::Red);

    Ok(())
}

#[tokio::test]
async fn test_unconfigured_adapters_leave_draft_unset() -> Result<()> {
    let service = FixMyCityService::from_config(Config::default());

    let mut draft = ReportDraft::new();
    draft.description = "Broken footpath".to_string();

    let photo = service.draft().attach_photo(&mut draft).await;
    assert_eq!(photo.unwrap_err().title(), "Permission denied");

    let location = service.draft().attach_location(&mut draft).await;
    assert_eq!(
        location.unwrap_err().to_string(),
        "Capability error: Location permission is required to tag the report."
    );

    let report = service.draft().submit(&draft)?;
    assert!(report.image.is_none());
    assert!(report.location.is_none());

    Ok(())
}

#[tokio::test]
async fn test_slow_devices_still_complete() -> Result<()> {
    let service = FixMyCityService::with_capabilities(
        Config::default(),
        Arc::new(MockCamera::with_photo("file:///dcim/1.jpg").delayed(Duration::from_millis(20))),
        Arc::new(MockLocator::at(12.9716, 77.5946).delayed(Duration::from_millis(20))),
    );

    let mut draft = ReportDraft::new();
    let (photo, location) = tokio::join!(
        service.draft().capture_photo(),
        service.draft().capture_location()
    );
    draft.image = photo?;
    draft.location = Some(location?);
    draft.description = "Streetlight flickering".to_string();

    let report = service.draft().submit(&draft)?;
    assert!(report.image.is_some());
    assert!(report.location.is_some());

    Ok(())
}

#[tokio::test]
async fn test_dashboard_triage_workflow() -> Result<()> {
    let service = FixMyCityService::with_capabilities(
        Config::default(),
        Arc::new(MockCamera::cancelled()),
        Arc::new(MockLocator::at(28.6139, 77.209)),
    );

    let mut draft = ReportDraft::new();
    draft.description = "Crater on ring road".to_string();
    service.draft().attach_location(&mut draft).await?;
    let id = service.draft().submit(&draft)?.id;

    for _ in 0..3 {
        service.reports().upvote(id)?;
    }

    let session = service.admin().login("superuser", "bigfella")?;
    service.reports().advance_status(id, &session)?;

    let circle = service.dashboard().view().heat_circles[0].clone();
    assert_eq!(circle.radius, 650.0);
    assert!((circle.opacity - 0.45).abs() < 1e-9);
    assert_eq!(circle.color, OverlayColor::Amber);
    assert!(circle.rgba().starts_with("rgba(255,165,0,"));

    service.reports().advance_status(id, &session)?;
    let view = service.dashboard().view();
    assert!(view.heat_circles.is_empty());
    assert_eq!(view.markers[0].status, Status::Resolved);

    let region = service.dashboard().focus(id)?;
    assert_eq!(region.latitude_delta, 0.01);

    Ok(())
}
