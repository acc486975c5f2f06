//! FixMyCity - crowd-sourced civic issue reporting
//!
//! This library holds the client's state and rules: the report store, the
//! voting and status engine, the report creation flow, admin access and the
//! dashboard overlays. Device access (camera, location) sits behind
//! capability traits so front ends and tests can plug in their own.
//!
//! Everything lives in memory; nothing survives a restart.

pub mod capabilities;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod service;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{FixMyCityError, Result};
pub use service::FixMyCityService;
pub use store::ReportStore;
pub use types::{Comment, ImageRef, IssueType, Location, Report, ReportId, Status};
