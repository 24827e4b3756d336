mod alert_dialog;
mod filter_bar;
mod header;
mod loading_indicator;
mod map_view;
mod report_form;
mod statistics_dialog;

pub use alert_dialog::AlertDialog;
pub use filter_bar::FilterBar;
pub use header::Header;
pub use loading_indicator::LoadingIndicator;
pub use map_view::MapView;
pub use report_form::ReportForm;
pub use statistics_dialog::StatisticsDialog;
