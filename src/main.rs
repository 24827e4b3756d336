use dioxus::prelude::*;
use dioxus_i18n::prelude::*;
use std::rc::Rc;

mod app;
mod components;
mod config;
mod error;
mod i18n;
mod models;
mod platform;
mod services;
mod state;
#[cfg(test)]
mod testing;
mod ui;
mod utils;

use app::PollutionReporterApp;
use components::{
    AlertDialog, FilterBar, Header, LoadingIndicator, MapView, ReportForm, StatisticsDialog,
};
use config::AppConfig;
use image_staging::FullscreenImage;
use platform::{BrowserGeolocation, DioxusUi, LeafletMap, WebApp, LEAFLET_CSS, LEAFLET_JS};
use report_api::{Endpoints, ReportApiClient};

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    init_logging();
    dioxus::launch(App);
}

fn init_logging() {
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Info)
            .with_tag("pollution-reporter"),
    );

    // No clock for timestamps on wasm32-unknown-unknown
    #[cfg(not(any(target_os = "android", target_arch = "wasm32")))]
    {
        let _ = env_logger::builder()
            .filter_level(log::LevelFilter::Info)
            .parse_default_env()
            .format_timestamp_millis()
            .try_init();
    }
}

fn build_app(config: &AppConfig, ui: DioxusUi) -> Result<WebApp, error::AppError> {
    let backend = ReportApiClient::new(config.api_base_url.clone(), Endpoints::default())?;
    log::info!("Using report backend at {}", config.api_base_url);
    Ok(PollutionReporterApp::new(
        config,
        backend,
        LeafletMap::new(),
        Rc::new(ui),
        BrowserGeolocation,
    ))
}

#[component]
fn App() -> Element {
    let config = use_hook(AppConfig::load);
    let language = config.language;
    let i18n = use_init_i18n(move || i18n::init_i18n(language));
    let ui = use_context_provider(|| DioxusUi::new(i18n, language));

    let ready = use_hook(|| match build_app(&config, ui) {
        Ok(app) => {
            provide_context(Rc::new(app));
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to start: {}", e);
            Err(e.to_string())
        }
    });

    rsx! {
        document::Link { rel: "stylesheet", href: LEAFLET_CSS }
        document::Script { src: LEAFLET_JS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        match ready {
            Ok(()) => rsx! { Shell {} },
            Err(message) => rsx! {
                div { class: "fatal-error", "{message}" }
            },
        }
    }
}

/// Page layout; starts the map and forwards its events to the managers
#[component]
fn Shell() -> Element {
    let app = use_context::<Rc<WebApp>>();
    let ui = use_context::<DioxusUi>();

    {
        let app = app.clone();
        use_future(move || {
            let app = app.clone();
            async move {
                app.start().await;
                while let Some(event) = app.map.surface().next_event().await {
                    let app = app.clone();
                    spawn(async move { app.handle_map_event(event).await });
                }
            }
        });
    }

    let language = ui.language();

    rsx! {
        div {
            class: "app",
            dir: language.dir(),
            lang: "{language.id()}",
            Header {}
            main {
                class: "layout",
                MapView {}
                aside {
                    class: "sidebar",
                    ReportForm {}
                    FilterBar {}
                }
            }
            LoadingIndicator {}
            StatisticsDialog {}
            if let Some(src) = ui.image() {
                FullscreenImage {
                    src,
                    on_close: move |_| app.images.close_popup(),
                }
            }
            AlertDialog {}
        }
    }
}
