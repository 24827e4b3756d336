pub mod coordinates;
pub mod filter;
pub mod report_draft;

pub use coordinates::Coordinates;
pub use filter::ReportFilter;
pub use report_draft::ReportDraft;
pub use report_api::{PollutionType, Report, Severity};
