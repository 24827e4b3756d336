use crate::config::GEOLOCATION_TIMEOUT_MS;
use crate::error::AppError;
use crate::models::Coordinates;
use crate::services::map_manager::{MapManager, MapSurface};
use crate::ui::{Text, Ui};
use crate::utils::Utils;
use serde::Serialize;
use std::fmt;
use std::rc::Rc;

/// Why the device position could not be read
#[derive(Debug, Clone, PartialEq)]
pub enum GeolocationError {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    /// No geolocation API on this platform
    Unsupported,
    Other(String),
}

impl GeolocationError {
    /// Maps a `GeolocationPositionError` code
    pub fn from_code(code: u16, message: String) -> Self {
        match code {
            1 => GeolocationError::PermissionDenied,
            2 => GeolocationError::PositionUnavailable,
            3 => GeolocationError::Timeout,
            _ => GeolocationError::Other(message),
        }
    }

    pub fn message(&self) -> Text {
        match self {
            GeolocationError::PermissionDenied => Text::Key("geo-permission-denied"),
            GeolocationError::PositionUnavailable => Text::Key("geo-position-unavailable"),
            GeolocationError::Timeout => Text::Key("geo-timeout"),
            GeolocationError::Unsupported => Text::Key("geolocation-not-supported"),
            GeolocationError::Other(message) => Text::KeyDetail("geo-error-prefix", message.clone()),
        }
    }
}

impl fmt::Display for GeolocationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GeolocationError::PermissionDenied => write!(f, "permission denied"),
            GeolocationError::PositionUnavailable => write!(f, "position unavailable"),
            GeolocationError::Timeout => write!(f, "timed out"),
            GeolocationError::Unsupported => write!(f, "not supported"),
            GeolocationError::Other(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for GeolocationError {}

/// Options passed to `getCurrentPosition`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    pub timeout: u32,
    pub maximum_age: u32,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: GEOLOCATION_TIMEOUT_MS,
            maximum_age: 0,
        }
    }
}

/// One-shot device position lookup
#[allow(async_fn_in_trait)]
pub trait PositionSource {
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Coordinates, GeolocationError>;
}

pub struct GeolocationManager<G: PositionSource, M: MapSurface, U: Ui> {
    source: Rc<G>,
    map: MapManager<M, U>,
    utils: Utils<U>,
    options: PositionOptions,
}

impl<G: PositionSource, M: MapSurface, U: Ui> Clone for GeolocationManager<G, M, U> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            map: self.map.clone(),
            utils: self.utils.clone(),
            options: self.options,
        }
    }
}

impl<G: PositionSource, M: MapSurface, U: Ui> GeolocationManager<G, M, U> {
    pub fn new(source: Rc<G>, map: MapManager<M, U>, utils: Utils<U>) -> Self {
        Self {
            source,
            map,
            utils,
            options: PositionOptions::default(),
        }
    }

    /// Moves the map and the user marker to the device position
    pub async fn get_location(&self) -> Result<Coordinates, AppError> {
        match self.source.current_position(&self.options).await {
            Ok(position) => {
                log::info!(
                    "Device position {:.6}, {:.6}",
                    position.latitude,
                    position.longitude
                );
                self.map
                    .update_marker_position(position, &Text::Key("my-location"));
                Ok(position)
            }
            Err(e) => {
                log::warn!("Geolocation failed: {}", e);
                self.utils.show_error(e.message());
                Err(e.into())
            }
        }
    }
}
