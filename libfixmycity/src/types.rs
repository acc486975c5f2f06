//! Core types for FixMyCity

use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Time-based report identifier (milliseconds since the Unix epoch)
///
/// Uniqueness is enforced by [`crate::store::ReportStore::next_id`], not by
/// the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(u64);

impl ReportId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReportId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IssueType {
    #[default]
    Pothole,
    Streetlight,
    Garbage,
    Other,
}

impl IssueType {
    /// All issue types in the order they are offered to the user
    pub const ALL: [IssueType; 4] = [
        IssueType::Pothole,
        IssueType::Streetlight,
        IssueType::Garbage,
        IssueType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pothole => "Pothole",
            Self::Streetlight => "Streetlight",
            Self::Garbage => "Garbage",
            Self::Other => "Other",
        }
    }

    /// Next type in [`IssueType::ALL`], wrapping around
    pub fn next(self) -> Self {
        let pos = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    /// Previous type in [`IssueType::ALL`], wrapping around
    pub fn previous(self) -> Self {
        let pos = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(pos + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IssueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pothole" => Ok(Self::Pothole),
            "streetlight" => Ok(Self::Streetlight),
            "garbage" => Ok(Self::Garbage),
            "other" => Ok(Self::Other),
            _ => Err(format!(
                "Invalid issue type: '{}'. Valid options: pothole, streetlight, garbage, other",
                s
            )),
        }
    }
}

/// Lifecycle stage of a report
///
/// Cycles Submitted -> In Progress -> Resolved -> Submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Submitted,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "Submitted",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
        }
    }

    /// The status that follows this one in the cycle
    pub fn next(self) -> Self {
        match self {
            Self::Submitted => Self::InProgress,
            Self::InProgress => Self::Resolved,
            Self::Resolved => Self::Submitted,
        }
    }

    /// Whether the status-advance control is offered for this status
    ///
    /// Every screen and service that advances status goes through this
    /// check. Resolved reports stay resolved.
    pub fn can_advance(self) -> bool {
        self != Self::Resolved
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Create a location, rejecting non-finite or out-of-range coordinates
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return None;
        }
        Some(Self {
            latitude,
            longitude,
        })
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Reference to a captured photo (a URI, never the image bytes)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Build a `file://` reference for a local path
    pub fn from_path(path: &Path) -> Self {
        Self(format!("file://{}", path.display()))
    }

    pub fn uri(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Supported image types for captured photos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMimeType {
    Jpeg,
    Png,
    Gif,
    WebP,
    Heic,
}

impl ImageMimeType {
    /// Detect MIME type from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::WebP),
            "heic" | "heif" => Some(Self::Heic),
            _ => None,
        }
    }

    /// Detect MIME type from a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::WebP => "image/webp",
            Self::Heic => "image/heic",
        }
    }
}

impl std::fmt::Display for ImageMimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    pub upvotes: u64,
    pub downvotes: u64,
}

impl Comment {
    pub fn new(text: String) -> Self {
        Self {
            text,
            upvotes: 0,
            downvotes: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub description: String,
    pub issue_type: IssueType,
    pub location: Option<Location>,
    pub image: Option<ImageRef>,
    pub status: Status,
    pub upvotes: i64,
    pub comments: Vec<Comment>,
    pub timestamp: DateTime<Utc>,
}

impl Report {
    /// A freshly submitted report: no votes, no comments
    pub fn new(
        id: ReportId,
        issue_type: IssueType,
        description: String,
        location: Option<Location>,
        image: Option<ImageRef>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            description,
            issue_type,
            location,
            image,
            status: Status::Submitted,
            upvotes: 0,
            comments: Vec::new(),
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_cycle() {
        assert_eq!(Status::Submitted.next(), Status::InProgress);
        assert_eq!(Status::InProgress.next(), Status::Resolved);
        assert_eq!(Status::Resolved.next(), Status::Submitted);
    }

    #[test]
    fn test_status_can_advance() {
        assert!(Status::Submitted.can_advance());
        assert!(Status::InProgress.can_advance());
        assert!(!Status::Resolved.can_advance());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(Status::InProgress.to_string(), "In Progress");
        assert_eq!(Status::default(), Status::Submitted);
    }

    #[test]
    fn test_status_serializes_with_display_names() {
        let json = serde_json::to_string(&Status::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
    }

    #[test]
    fn test_issue_type_default_is_pothole() {
        assert_eq!(IssueType::default(), IssueType::Pothole);
    }

    #[test]
    fn test_issue_type_cycling_wraps() {
        assert_eq!(IssueType::Other.next(), IssueType::Pothole);
        assert_eq!(IssueType::Pothole.previous(), IssueType::Other);
        assert_eq!(IssueType::Streetlight.next(), IssueType::Garbage);
    }

    #[test]
    fn test_issue_type_from_str() {
        assert_eq!("Garbage".parse::<IssueType>().unwrap(), IssueType::Garbage);
        assert_eq!("STREETLIGHT".parse::<IssueType>().unwrap(), IssueType::Streetlight);
        assert!("graffiti".parse::<IssueType>().is_err());
    }

    #[test]
    fn test_location_rejects_out_of_range() {
        assert!(Location::new(28.6139, 77.209).is_some());
        assert!(Location::new(91.0, 0.0).is_none());
        assert!(Location::new(0.0, -181.0).is_none());
        assert!(Location::new(f64::NAN, 0.0).is_none());
    }

    #[test]
    fn test_location_display_uses_four_decimals() {
        let location = Location::new(28.613_912, 77.209_01).unwrap();
        assert_eq!(location.to_string(), "28.6139, 77.2090");
    }

    #[test]
    fn test_image_ref_from_path() {
        let image = ImageRef::from_path(Path::new("/tmp/photos/pothole.jpg"));
        assert_eq!(image.uri(), "file:///tmp/photos/pothole.jpg");
    }

    #[test]
    fn test_image_mime_from_path() {
        assert_eq!(
            ImageMimeType::from_path(Path::new("a/b/IMG_001.JPG")),
            Some(ImageMimeType::Jpeg)
        );
        assert_eq!(ImageMimeType::from_path(Path::new("notes.txt")), None);
        assert_eq!(ImageMimeType::from_path(Path::new("no_extension")), None);
        assert_eq!(ImageMimeType::Heic.to_string(), "image/heic");
    }

    #[test]
    fn test_report_id_parse_and_display() {
        let id: ReportId = "1700000000000".parse().unwrap();
        assert_eq!(id.as_u64(), 1_700_000_000_000);
        assert_eq!(id.to_string(), "1700000000000");
    }

    #[test]
    fn test_new_report_defaults() {
        let report = Report::new(
            ReportId::new(1),
            IssueType::Pothole,
            "big hole".to_string(),
            None,
            None,
            Utc::now(),
        );
        assert_eq!(report.status, Status::Submitted);
        assert_eq!(report.upvotes, 0);
        assert!(report.comments.is_empty());
    }
}
