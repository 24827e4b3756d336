use crate::config::{MapView, MAP_CONTAINER_ID, MAX_ZOOM, MIN_ZOOM, TILE_ATTRIBUTION, TILE_URL};
use crate::models::Coordinates;
use crate::ui::{Text, Ui};
use crate::utils::Utils;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// Handle of a marker placed on the map widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerId(pub u64);

/// A report pin to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerPin {
    pub latitude: f64,
    pub longitude: f64,
    pub color: &'static str,
    pub popup_html: String,
}

/// Settings the map widget is created with
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapOptions {
    pub container_id: &'static str,
    pub center: Coordinates,
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub tile_url: &'static str,
    pub attribution: &'static str,
}

impl MapOptions {
    pub fn from_view(view: MapView) -> Self {
        Self {
            container_id: MAP_CONTAINER_ID,
            center: view.center(),
            zoom: view.zoom,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            tile_url: TILE_URL,
            attribution: TILE_ATTRIBUTION,
        }
    }
}

/// The map widget as seen by the managers
pub trait MapSurface {
    fn init(&self, options: &MapOptions);
    fn add_marker(&self, pin: &MarkerPin) -> MarkerId;
    /// Default-styled marker with its popup opened
    fn add_user_marker(&self, at: Coordinates, popup: &str) -> MarkerId;
    fn remove_marker(&self, marker: MarkerId);
    /// Recenters the map; `None` keeps the current zoom
    fn set_view(&self, center: Coordinates, zoom: Option<u8>);
}

/// Interaction coming back from the map widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapEvent {
    MapClick { lat: f64, lng: f64 },
    DeleteReport { id: i64, can_delete: bool },
    OpenImage { src: String },
}

pub struct MapManager<M: MapSurface, U: Ui> {
    map: Rc<M>,
    utils: Utils<U>,
    view: MapView,
    /// Popup text of the user marker
    user_label: Rc<RefCell<Text>>,
}

impl<M: MapSurface, U: Ui> Clone for MapManager<M, U> {
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
            utils: self.utils.clone(),
            view: self.view,
            user_label: self.user_label.clone(),
        }
    }
}

impl<M: MapSurface, U: Ui> MapManager<M, U> {
    pub fn new(map: Rc<M>, utils: Utils<U>, view: MapView) -> Self {
        Self {
            map,
            utils,
            view,
            user_label: Rc::new(RefCell::new(Text::Key("selected-location"))),
        }
    }

    pub fn surface(&self) -> &M {
        &self.map
    }

    /// Creates the map once; later calls are no-ops and return `false`
    pub fn initialize_map(&self) -> bool {
        if self.utils.state().borrow().is_map_ready() {
            return false;
        }
        self.map.init(&MapOptions::from_view(self.view));
        self.utils.state().borrow_mut().set_map_ready();
        log::info!(
            "Map initialized at {:.4}, {:.4} zoom {}",
            self.view.lat,
            self.view.lng,
            self.view.zoom
        );
        true
    }

    pub fn handle_map_click(&self, at: Coordinates) {
        log::debug!("Map clicked at {:.6}, {:.6}", at.latitude, at.longitude);
        self.update_marker_position(at, &Text::Key("selected-location"));
    }

    /// Writes the location to the form and moves the user marker there
    pub fn update_marker_position(&self, at: Coordinates, label: &Text) {
        self.utils.state().borrow_mut().set_selected_location(Some(at));
        *self.user_label.borrow_mut() = label.clone();
        self.place_user_marker(at);
        self.map.set_view(at, None);
        self.utils.ui().state_changed();
    }

    /// Redraws the user marker so its popup uses the active language
    pub fn refresh_user_marker(&self) {
        let selected = self.utils.state().borrow().selected_location();
        if let Some(at) = selected {
            self.place_user_marker(at);
        }
    }

    fn place_user_marker(&self, at: Coordinates) {
        let previous = self.utils.state().borrow().user_marker();
        if let Some(previous) = previous {
            self.map.remove_marker(previous);
        }
        let popup = self.utils.resolve(&self.user_label.borrow());
        let marker = self.map.add_user_marker(at, &popup);
        self.utils.state().borrow_mut().set_user_marker(Some(marker));
    }

    pub fn reset_map_view(&self) {
        if self.utils.state().borrow().is_map_ready() {
            self.map.set_view(self.view.center(), Some(self.view.zoom));
        }
    }

    /// Drops the user marker and the selected location
    pub fn clear_selection(&self) {
        let previous = {
            let mut state = self.utils.state().borrow_mut();
            state.set_selected_location(None);
            state.set_user_marker(None)
        };
        if let Some(marker) = previous {
            self.map.remove_marker(marker);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_VIEW;
    use crate::state::StateManager;
    use crate::testing::{FakeMap, FakeUi, MapCall};
    use image_staging::ImageRules;

    fn manager() -> (MapManager<FakeMap, FakeUi>, Rc<FakeMap>, Rc<FakeUi>) {
        let map = Rc::new(FakeMap::default());
        let ui = Rc::new(FakeUi::default());
        let utils = Utils::new(StateManager::shared(), ui.clone(), ImageRules::default());
        (MapManager::new(map.clone(), utils, DEFAULT_VIEW), map, ui)
    }

    #[test]
    fn test_initialize_map_once() {
        let (manager, map, _) = manager();
        assert!(manager.initialize_map());
        assert!(!manager.initialize_map());

        let inits: Vec<_> = map
            .calls()
            .into_iter()
            .filter(|c| matches!(c, MapCall::Init(_)))
            .collect();
        assert_eq!(inits.len(), 1);
        if let MapCall::Init(options) = &inits[0] {
            assert_eq!(options.zoom, 6);
            assert_eq!((options.min_zoom, options.max_zoom), (3, 18));
            assert_eq!(options.center, Coordinates::new(36.75, 3.06));
        }
    }

    #[test]
    fn test_click_replaces_user_marker() {
        let (manager, map, ui) = manager();
        manager.initialize_map();

        manager.handle_map_click(Coordinates::new(36.1, 3.1));
        manager.handle_map_click(Coordinates::new(36.2, 3.2));

        let state = manager.utils.state().borrow();
        assert_eq!(state.selected_location(), Some(Coordinates::new(36.2, 3.2)));
        let current = state.user_marker().unwrap();
        assert_eq!(map.live_markers(), vec![current]);
        assert_eq!(
            map.calls().last(),
            Some(&MapCall::SetView(Coordinates::new(36.2, 3.2), None))
        );
        assert_eq!(map.user_popup(current).as_deref(), Some("selected-location"));
        assert!(ui.state_changes() >= 2);
    }

    #[test]
    fn test_reset_view_uses_default_zoom() {
        let (manager, map, _) = manager();
        // Nothing to reset before the map exists
        manager.reset_map_view();
        assert!(map.calls().is_empty());

        manager.initialize_map();
        manager.reset_map_view();
        assert_eq!(
            map.calls().last(),
            Some(&MapCall::SetView(DEFAULT_VIEW.center(), Some(6)))
        );
    }

    #[test]
    fn test_clear_selection() {
        let (manager, map, _) = manager();
        manager.initialize_map();
        manager.handle_map_click(Coordinates::new(1.0, 2.0));
        manager.clear_selection();

        assert!(map.live_markers().is_empty());
        let state = manager.utils.state().borrow();
        assert_eq!(state.selected_location(), None);
        assert_eq!(state.user_marker(), None);
    }

    #[test]
    fn test_refresh_user_marker_relabels_in_place() {
        let (manager, map, ui) = manager();
        manager.initialize_map();
        // Nothing selected yet
        manager.refresh_user_marker();
        assert!(map.live_markers().is_empty());

        manager.update_marker_position(Coordinates::new(1.0, 2.0), &Text::Key("my-location"));
        let views = map.calls().len();

        ui.switch_locale("ar");
        manager.refresh_user_marker();

        let marker = manager.utils.state().borrow().user_marker().unwrap();
        assert_eq!(map.live_markers(), vec![marker]);
        assert_eq!(map.user_popup(marker).as_deref(), Some("ar:my-location"));
        assert!(!map.calls()[views..]
            .iter()
            .any(|c| matches!(c, MapCall::SetView(..))));
    }

    #[test]
    fn test_map_event_wire_format() {
        let click: MapEvent = serde_json::from_str(r#"{"kind":"map_click","lat":1.5,"lng":2.5}"#).unwrap();
        assert_eq!(click, MapEvent::MapClick { lat: 1.5, lng: 2.5 });

        let delete: MapEvent =
            serde_json::from_str(r#"{"kind":"delete_report","id":4,"can_delete":false}"#).unwrap();
        assert_eq!(delete, MapEvent::DeleteReport { id: 4, can_delete: false });
    }
}
