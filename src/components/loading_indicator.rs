use crate::platform::DioxusUi;
use dioxus::prelude::*;
use dioxus_i18n::t;

#[component]
pub fn LoadingIndicator() -> Element {
    let ui = use_context::<DioxusUi>();

    rsx! {
        if ui.loading() {
            div {
                id: "loading",
                class: "loading-overlay",
                div { class: "spinner" }
                span { {t!("loading")} }
            }
        }
    }
}
