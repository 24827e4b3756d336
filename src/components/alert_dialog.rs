use crate::platform::DioxusUi;
use crate::ui::{AlertIcon, Ui};
use dioxus::prelude::*;
use dioxus_i18n::t;

/// Modal for the front of the dialog queue
#[component]
pub fn AlertDialog() -> Element {
    let ui = use_context::<DioxusUi>();
    let Some(alert) = ui.current_dialog() else {
        return rsx! {};
    };

    let title = alert.title.resolve(|k| ui.translate(k));
    let text = alert.text.resolve(|k| ui.translate(k));
    let dismissable = !alert.require_manual;
    let accent = match alert.icon {
        AlertIcon::Success => "#2e7d32",
        AlertIcon::Warning => "#e65100",
        AlertIcon::Error => "#c62828",
    };

    rsx! {
        div {
            class: "dialog-backdrop",
            tabindex: "0",
            // Focused so Escape reaches the handler below
            onmounted: move |e: MountedEvent| async move {
                let _ = e.set_focus(true).await;
            },
            onclick: move |_| {
                if dismissable {
                    ui.close_dialog(false);
                }
            },
            onkeydown: move |e| {
                if dismissable && e.key() == Key::Escape {
                    ui.close_dialog(false);
                }
            },
            div {
                class: "dialog",
                onclick: move |e| e.stop_propagation(),
                div { style: "font-size: 40px; text-align: center;", "{alert.icon.symbol()}" }
                h2 { style: "color: {accent}; text-align: center; margin: 8px 0;", "{title}" }
                p { style: "text-align: center; color: #333;", "{text}" }
                div {
                    style: "display: flex; gap: 8px; justify-content: center; margin-top: 16px;",
                    if alert.cancelable {
                        button {
                            class: "btn btn-secondary",
                            onclick: move |_| ui.close_dialog(false),
                            {t!("cancel")}
                        }
                    }
                    button {
                        class: "btn",
                        style: "background: {accent};",
                        onclick: move |_| ui.close_dialog(true),
                        {t!("ok")}
                    }
                }
            }
        }
    }
}
