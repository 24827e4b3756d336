//! Leaflet binding driven through a single long-lived `eval` channel.
//!
//! Commands go to the page as tagged JSON; clicks on the map and on popup
//! buttons come back as [`MapEvent`]s.

use crate::models::Coordinates;
use crate::services::map_manager::{MapEvent, MapOptions, MapSurface, MarkerId, MarkerPin};
use dioxus::document::Eval;
use dioxus::prelude::*;
use serde::Serialize;
use std::cell::Cell;

pub const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
pub const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";

const BRIDGE_JS: &str = r#"
while (typeof L === 'undefined') {
    await new Promise(r => setTimeout(r, 50));
}
let map = null;
const markers = new Map();

function onContainerClick(e) {
    const del = e.target.closest('[data-delete-report]');
    if (del) {
        e.preventDefault();
        e.stopPropagation();
        dioxus.send({
            kind: 'delete_report',
            id: Number(del.dataset.deleteReport),
            can_delete: del.dataset.canDelete === 'true',
        });
        return;
    }
    const img = e.target.closest('[data-open-image]');
    if (img) {
        e.stopPropagation();
        dioxus.send({ kind: 'open_image', src: img.dataset.openImage });
    }
}

while (true) {
    const cmd = await dioxus.recv();
    switch (cmd.op) {
        case 'init': {
            const o = cmd.options;
            if (map) break;
            while (!document.getElementById(o.container_id)) {
                await new Promise(r => setTimeout(r, 50));
            }
            map = L.map(o.container_id, { minZoom: o.min_zoom, maxZoom: o.max_zoom })
                .setView([o.center.latitude, o.center.longitude], o.zoom);
            L.tileLayer(o.tile_url, { attribution: o.attribution }).addTo(map);
            map.on('click', e => dioxus.send({ kind: 'map_click', lat: e.latlng.lat, lng: e.latlng.lng }));
            // Capture phase: Leaflet popups swallow bubbling clicks
            map.getContainer().addEventListener('click', onContainerClick, true);
            break;
        }
        case 'add_marker': {
            const p = cmd.pin;
            const m = L.circleMarker([p.latitude, p.longitude], {
                radius: 9, fillColor: p.color, color: '#fff', weight: 2, fillOpacity: 0.9,
                bubblingMouseEvents: false,
            }).bindPopup(p.popup_html).addTo(map);
            markers.set(cmd.id, m);
            break;
        }
        case 'user_marker': {
            const m = L.marker([cmd.lat, cmd.lng]).addTo(map).bindPopup(cmd.popup).openPopup();
            markers.set(cmd.id, m);
            break;
        }
        case 'remove_marker': {
            const m = markers.get(cmd.id);
            if (m) { map.removeLayer(m); markers.delete(cmd.id); }
            break;
        }
        case 'set_view':
            if (map) map.setView([cmd.lat, cmd.lng], cmd.zoom ?? map.getZoom());
            break;
    }
}
"#;

#[derive(Debug, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum MapCommand<'a> {
    Init {
        options: &'a MapOptions,
    },
    AddMarker {
        id: u64,
        pin: &'a MarkerPin,
    },
    UserMarker {
        id: u64,
        lat: f64,
        lng: f64,
        popup: &'a str,
    },
    RemoveMarker {
        id: u64,
    },
    SetView {
        lat: f64,
        lng: f64,
        zoom: Option<u8>,
    },
}

/// Map widget living in the page; must be created inside the Dioxus runtime
pub struct LeafletMap {
    bridge: Eval,
    next_id: Cell<u64>,
}

impl LeafletMap {
    pub fn new() -> Self {
        Self {
            bridge: document::eval(BRIDGE_JS),
            next_id: Cell::new(0),
        }
    }

    fn send(&self, command: MapCommand) {
        if let Err(e) = self.bridge.send(&command) {
            log::error!("Map command {:?} failed: {:?}", command, e);
        }
    }

    fn allocate(&self) -> MarkerId {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        MarkerId(id)
    }

    /// Waits for the next click coming from the page; `None` once the bridge is gone
    pub async fn next_event(&self) -> Option<MapEvent> {
        let mut bridge = self.bridge;
        match bridge.recv::<MapEvent>().await {
            Ok(event) => Some(event),
            Err(e) => {
                log::warn!("Map event channel closed: {:?}", e);
                None
            }
        }
    }
}

impl MapSurface for LeafletMap {
    fn init(&self, options: &MapOptions) {
        self.send(MapCommand::Init { options });
    }

    fn add_marker(&self, pin: &MarkerPin) -> MarkerId {
        let id = self.allocate();
        self.send(MapCommand::AddMarker { id: id.0, pin });
        id
    }

    fn add_user_marker(&self, at: Coordinates, popup: &str) -> MarkerId {
        let id = self.allocate();
        self.send(MapCommand::UserMarker {
            id: id.0,
            lat: at.latitude,
            lng: at.longitude,
            popup,
        });
        id
    }

    fn remove_marker(&self, marker: MarkerId) {
        self.send(MapCommand::RemoveMarker { id: marker.0 });
    }

    fn set_view(&self, center: Coordinates, zoom: Option<u8>) {
        self.send(MapCommand::SetView {
            lat: center.latitude,
            lng: center.longitude,
            zoom,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_VIEW;
    use serde_json::json;

    #[test]
    fn test_command_wire_format() {
        let pin = MarkerPin {
            latitude: 36.0,
            longitude: 3.0,
            color: "purple",
            popup_html: "<p>x</p>".to_string(),
        };
        assert_eq!(
            serde_json::to_value(MapCommand::AddMarker { id: 4, pin: &pin }).unwrap(),
            json!({"op": "add_marker", "id": 4, "pin": {
                "latitude": 36.0, "longitude": 3.0, "color": "purple", "popup_html": "<p>x</p>"
            }})
        );
        assert_eq!(
            serde_json::to_value(MapCommand::SetView { lat: 1.0, lng: 2.0, zoom: None }).unwrap(),
            json!({"op": "set_view", "lat": 1.0, "lng": 2.0, "zoom": null})
        );
    }

    #[test]
    fn test_init_carries_options() {
        let options = MapOptions::from_view(DEFAULT_VIEW);
        let value = serde_json::to_value(MapCommand::Init { options: &options }).unwrap();
        assert_eq!(value["options"]["container_id"], "map");
        assert_eq!(value["options"]["center"]["latitude"], 36.75);
        assert_eq!(value["options"]["max_zoom"], 18);
    }
}
