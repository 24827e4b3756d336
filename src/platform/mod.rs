//! Dioxus bindings of the manager traits

pub mod dialogs;
pub mod geolocation;
pub mod leaflet;

pub use dialogs::DioxusUi;
pub use geolocation::BrowserGeolocation;
pub use leaflet::{LeafletMap, LEAFLET_CSS, LEAFLET_JS};

use crate::app::PollutionReporterApp;
use report_api::ReportApiClient;

/// The application as it runs in the web view
pub type WebApp = PollutionReporterApp<ReportApiClient, LeafletMap, DioxusUi, BrowserGeolocation>;
