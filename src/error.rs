use crate::services::geolocation_manager::GeolocationError;
use crate::ui::Text;
use image_staging::ImageError;
use report_api::ApiError;
use std::fmt;

/// Central error types for the Pollution Reporter app
#[derive(Debug)]
pub enum AppError {
    /// Backend call failed (network, status or body)
    Api(ApiError),
    /// Staged image rejected or unreadable
    Image(ImageError),
    /// Device position could not be determined
    Geolocation(GeolocationError),
    /// Configuration file could not be parsed
    Config(String),
    /// General error
    #[allow(dead_code)]
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Api(e) => write!(f, "API error: {}", e),
            AppError::Image(e) => write!(f, "Image error: {}", e),
            AppError::Geolocation(e) => write!(f, "Geolocation error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        AppError::Api(e)
    }
}

impl From<ImageError> for AppError {
    fn from(e: ImageError) -> Self {
        AppError::Image(e)
    }
}

impl From<GeolocationError> for AppError {
    fn from(e: GeolocationError) -> Self {
        AppError::Geolocation(e)
    }
}

/// Localizable message for the alert dialog
impl AppError {
    pub fn user_message(&self) -> Text {
        match self {
            AppError::Api(ApiError::Forbidden(_)) => Text::Key("delete-not-owner"),
            AppError::Api(_) => Text::Key("error"),
            AppError::Image(ImageError::UnsupportedType(_)) => Text::Key("unsupported-type"),
            AppError::Image(ImageError::TooLarge { .. }) => Text::Key("file-too-large"),
            AppError::Image(e) => Text::Raw(e.to_string()),
            AppError::Geolocation(e) => e.message(),
            AppError::Config(msg) => Text::Raw(msg.clone()),
            AppError::Other(msg) => Text::Raw(msg.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_errors_map_to_keys() {
        let unsupported: AppError = ImageError::UnsupportedType("text/plain".into()).into();
        assert_eq!(unsupported.user_message(), Text::Key("unsupported-type"));

        let large: AppError = ImageError::TooLarge { size: 10, limit: 5 }.into();
        assert_eq!(large.user_message(), Text::Key("file-too-large"));
    }

    #[test]
    fn test_forbidden_maps_to_owner_message() {
        let e: AppError = ApiError::Forbidden("nope".into()).into();
        assert_eq!(e.user_message(), Text::Key("delete-not-owner"));
        assert!(e.to_string().contains("nope"));
    }
}
