pub mod form_manager;
pub mod geolocation_manager;
pub mod image_manager;
pub mod map_manager;
pub mod report_manager;
pub mod statistics_manager;

pub use form_manager::{FormManager, SubmitOutcome};
pub use geolocation_manager::{GeolocationError, GeolocationManager, PositionOptions, PositionSource};
pub use image_manager::{ImageManager, ImageSelection};
pub use map_manager::{MapEvent, MapManager, MapOptions, MapSurface, MarkerId, MarkerPin};
pub use report_manager::{DeleteOutcome, ReportManager};
pub use statistics_manager::StatisticsManager;
