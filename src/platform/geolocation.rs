use crate::models::Coordinates;
use crate::services::geolocation_manager::{GeolocationError, PositionOptions, PositionSource};
use dioxus::prelude::*;
use serde::Deserialize;

const GEOLOCATION_JS: &str = r#"
const options = await dioxus.recv();
if (!navigator.geolocation) {
    dioxus.send({ status: 'unsupported' });
} else {
    navigator.geolocation.getCurrentPosition(
        p => dioxus.send({ status: 'ok', latitude: p.coords.latitude, longitude: p.coords.longitude }),
        e => dioxus.send({ status: 'error', code: e.code, message: e.message || '' }),
        options,
    );
}
"#;

/// Reply of the page script
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum GeoReply {
    Ok { latitude: f64, longitude: f64 },
    Error { code: u16, message: String },
    Unsupported,
}

impl GeoReply {
    fn into_result(self) -> Result<Coordinates, GeolocationError> {
        match self {
            GeoReply::Ok {
                latitude,
                longitude,
            } => Ok(Coordinates::new(latitude, longitude)),
            GeoReply::Error { code, message } => Err(GeolocationError::from_code(code, message)),
            GeoReply::Unsupported => Err(GeolocationError::Unsupported),
        }
    }
}

/// `navigator.geolocation` of the hosting web view
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserGeolocation;

impl PositionSource for BrowserGeolocation {
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Coordinates, GeolocationError> {
        let mut eval = document::eval(GEOLOCATION_JS);
        eval.send(options)
            .map_err(|e| GeolocationError::Other(format!("{:?}", e)))?;
        eval.recv::<GeoReply>()
            .await
            .map_err(|e| GeolocationError::Other(format!("{:?}", e)))?
            .into_result()
    }
}
