use crate::error::AppError;
use crate::i18n::Language;
use crate::models::Coordinates;
use image_staging::ImageRules;
use serde::{Deserialize, Serialize};

pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";
pub const MAX_ZOOM: u8 = 18;
pub const MIN_ZOOM: u8 = 3;
pub const MAP_CONTAINER_ID: &str = "map";

pub const MAX_IMAGE_SIZE: u64 = 5 * 1024 * 1024;
pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/gif"];
pub const PREVIEW_EDGE: u32 = 256;
/// Where the backend serves uploaded report images from
pub const UPLOADS_PATH: &str = "static/uploads";

pub const GEOLOCATION_TIMEOUT_MS: u32 = 10_000;

pub const CONFIG_FILE: &str = "pollution-reporter.toml";
pub const API_URL_ENV: &str = "POLLUTION_REPORTER_API";
pub const LANGUAGE_ENV: &str = "POLLUTION_REPORTER_LANG";

/// Initial map center and zoom
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub lat: f64,
    pub lng: f64,
    pub zoom: u8,
}

impl MapView {
    pub fn center(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

pub const DEFAULT_VIEW: MapView = MapView {
    lat: 36.75,
    lng: 3.06,
    zoom: 6,
};

/// Runtime settings, read from `pollution-reporter.toml` when present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub language: Language,
    pub default_view: MapView,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:5000".to_string(),
            language: Language::Arabic,
            default_view: DEFAULT_VIEW,
        }
    }
}

/// Backend URL in the browser: a build-time override, else the page origin.
/// `None` for opaque origins (`null`, e.g. pages opened from `file://`).
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub fn browser_api_url(build_time: Option<&str>, page_origin: Option<&str>) -> Option<String> {
    if let Some(url) = build_time.map(str::trim).filter(|u| !u.is_empty()) {
        return Some(url.to_string());
    }
    page_origin
        .map(str::trim)
        .filter(|o| !o.is_empty() && *o != "null")
        .map(|o| o.trim_end_matches('/').to_string())
}

#[cfg(target_arch = "wasm32")]
fn page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, AppError> {
        toml::from_str(content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Loads the config file and environment overrides; falls back to defaults
    pub fn load() -> Self {
        let mut config = match std::fs::read_to_string(CONFIG_FILE) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(config) => {
                    log::info!("Loaded configuration from {}", CONFIG_FILE);
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", CONFIG_FILE, e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        };

        #[cfg(target_arch = "wasm32")]
        {
            let origin = page_origin();
            let build_time = option_env!("POLLUTION_REPORTER_API");
            if let Some(url) = browser_api_url(build_time, origin.as_deref()) {
                config.api_base_url = url;
            }
            if let Some(tag) = option_env!("POLLUTION_REPORTER_LANG") {
                config.language = Language::from_tag(tag);
            }
        }

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_base_url = url;
            }
        }
        if let Ok(tag) = std::env::var(LANGUAGE_ENV) {
            config.language = Language::from_tag(&tag);
        }

        config
    }

    /// Absolute prefix of uploaded report images
    pub fn uploads_url(&self) -> String {
        format!("{}/{}", self.api_base_url.trim_end_matches('/'), UPLOADS_PATH)
    }

    pub fn image_rules(&self) -> ImageRules {
        ImageRules {
            allowed_types: ALLOWED_IMAGE_TYPES.iter().map(|t| t.to_string()).collect(),
            max_size: MAX_IMAGE_SIZE,
            preview_edge: PREVIEW_EDGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            api_base_url = "https://reports.example.org"
            language = "en"
            "#,
        )
        .unwrap();

        assert_eq!(config.api_base_url, "https://reports.example.org");
        assert_eq!(config.language, Language::English);
        assert_eq!(config.default_view, DEFAULT_VIEW);
    }

    #[test]
    fn test_custom_default_view() {
        let config = AppConfig::from_toml_str(
            r#"
            [default_view]
            lat = 35.7
            lng = -0.63
            zoom = 11
            "#,
        )
        .unwrap();
        assert_eq!(config.default_view.zoom, 11);
        assert_eq!(config.language, Language::Arabic);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            AppConfig::from_toml_str("language = 3"),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_browser_api_url() {
        let origin = Some("https://reports.example.org");
        assert_eq!(
            browser_api_url(None, origin).as_deref(),
            Some("https://reports.example.org")
        );
        assert_eq!(
            browser_api_url(Some("https://api.example.org"), origin).as_deref(),
            Some("https://api.example.org")
        );
        assert_eq!(
            browser_api_url(Some("  "), Some("http://localhost:8080/")).as_deref(),
            Some("http://localhost:8080")
        );
        assert_eq!(browser_api_url(None, Some("null")), None);
        assert_eq!(browser_api_url(None, None), None);
    }

    #[test]
    fn test_uploads_url() {
        let config = AppConfig {
            api_base_url: "https://reports.example.org/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.uploads_url(), "https://reports.example.org/static/uploads");
    }

    #[test]
    fn test_image_rules() {
        let rules = AppConfig::default().image_rules();
        assert_eq!(rules.max_size, 5 * 1024 * 1024);
        assert!(rules.allowed_types.contains(&"image/gif".to_string()));
    }
}
