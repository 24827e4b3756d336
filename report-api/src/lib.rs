//! # Report API
//!
//! Typed client for the pollution report backend.
//!
//! This crate provides:
//! - Wire models for reports, statistics and backend replies
//! - A `ReportBackend` trait describing the four endpoints the app uses
//! - `ReportApiClient`, the reqwest implementation of that trait
//!
//! ## Separation of Concerns
//!
//! This crate only speaks HTTP. It does **not**:
//! - Validate form input (handled by the application)
//! - Render markers or dialogs (handled by the application)
//! - Decide ownership of reports (the backend session does)
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use report_api::{Endpoints, ReportApiClient, ReportBackend};
//!
//! let client = ReportApiClient::new("http://127.0.0.1:5000".to_string(), Endpoints::default())?;
//! let reports = client.fetch_reports().await?;
//! ```

pub mod models;
pub mod service;

pub use models::{
    parse_timestamp, ApiMessage, NewReport, PollutionType, Report, ReportImage, Severity,
    Statistics, UploadImage,
};
pub use service::{ApiError, ApiResult, Endpoints, ReportApiClient, ReportBackend};
