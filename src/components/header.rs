use crate::i18n::Language;
use crate::platform::{DioxusUi, WebApp};
use dioxus::prelude::*;
use dioxus_i18n::t;
use std::rc::Rc;

/// Title bar with the map and statistics actions
#[component]
pub fn Header() -> Element {
    let app = use_context::<Rc<WebApp>>();
    let ui = use_context::<DioxusUi>();
    let mut locating = use_signal(|| false);

    let locate = {
        let app = app.clone();
        move |_| {
            if locating() {
                return;
            }
            let app = app.clone();
            locating.set(true);
            spawn(async move {
                app.locate().await;
                locating.set(false);
            });
        }
    };

    let reset = {
        let app = app.clone();
        move |_| app.map.reset_map_view()
    };

    let statistics = {
        let app = app.clone();
        move |_| {
            let app = app.clone();
            spawn(async move { app.show_statistics().await });
        }
    };

    let switch_language = {
        let app = app.clone();
        move |language: Language| {
            ui.set_language(language);
            app.language_changed();
        }
    };

    let (other_language, language_label) = match ui.language() {
        Language::Arabic => (Language::English, "English"),
        Language::English => (Language::Arabic, "العربية"),
    };

    rsx! {
        header {
            class: "app-header",
            h1 { style: "margin: 0; font-size: 22px;", {t!("app-title")} }
            div {
                class: "header-actions",
                button {
                    class: "btn",
                    "data-action": "get-location",
                    disabled: locating(),
                    onclick: locate,
                    if locating() {
                        {t!("getting-location")}
                    } else {
                        {t!("get-location")}
                    }
                }
                button { class: "btn btn-secondary", onclick: reset, {t!("reset-view")} }
                button { class: "btn btn-secondary", onclick: statistics, "📊 " {t!("statistics")} }
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| switch_language(other_language),
                    "{language_label}"
                }
            }
        }
    }
}
