//! Dioxus UI components for staged images
//!
//! The grid only renders what it is given; selection state lives in the
//! application.

use crate::models::PreviewItem;
use dioxus::prelude::*;

/// Grid of preview thumbnails, each with a remove button
#[component]
pub fn PreviewGrid(
    items: Vec<PreviewItem>,
    on_open: EventHandler<String>,
    on_remove: EventHandler<usize>,
    #[props(default = "×".to_string())] remove_label: String,
) -> Element {
    if items.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            id: "preview-container",
            style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(96px, 1fr)); gap: 8px; margin-top: 8px;",
            for item in items {
                div {
                    key: "{item.index}-{item.name}",
                    class: "preview-item",
                    style: "position: relative; width: 96px; height: 96px; border-radius: 8px; overflow: hidden; background: #f0f0f0;",
                    img {
                        class: "preview-image",
                        src: "{item.data_url}",
                        alt: "{item.name}",
                        style: "width: 100%; height: 100%; object-fit: cover; cursor: pointer;",
                        onclick: {
                            let url = item.data_url.clone();
                            move |_| on_open.call(url.clone())
                        },
                    }
                    button {
                        class: "remove-image",
                        r#type: "button",
                        style: "position: absolute; top: 4px; right: 4px; width: 24px; height: 24px; border-radius: 50%; border: none; background: rgba(0, 0, 0, 0.6); color: white; cursor: pointer;",
                        onclick: move |_| on_remove.call(item.index),
                        "{remove_label}"
                    }
                }
            }
        }
    }
}

/// Full-size image overlay; clicking the backdrop closes it
#[component]
pub fn FullscreenImage(src: String, on_close: EventHandler<()>) -> Element {
    rsx! {
        div {
            id: "popupOverlay",
            style: "position: fixed; top: 0; left: 0; right: 0; bottom: 0; background: rgba(0, 0, 0, 0.9); z-index: 2000; display: flex; align-items: center; justify-content: center; padding: 20px;",
            onclick: move |_| on_close.call(()),
            img {
                id: "popupImage",
                src: "{src}",
                style: "max-width: 100%; max-height: 100%; object-fit: contain; border-radius: 8px;",
                onclick: move |e| e.stop_propagation(),
            }
            button {
                style: "position: absolute; top: 16px; right: 16px; width: 40px; height: 40px; background: rgba(255, 255, 255, 0.2); color: white; border-radius: 50%; font-size: 24px; cursor: pointer; border: none;",
                onclick: move |_| on_close.call(()),
                "×"
            }
        }
    }
}
