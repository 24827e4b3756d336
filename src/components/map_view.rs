use crate::config::MAP_CONTAINER_ID;
use dioxus::prelude::*;

/// Container the Leaflet bridge attaches to
#[component]
pub fn MapView() -> Element {
    rsx! {
        div { id: MAP_CONTAINER_ID, class: "map" }
    }
}
