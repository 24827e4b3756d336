use crate::models::Coordinates;
use crate::services::map_manager::MarkerId;
use image_staging::SelectedFile;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// State shared by all managers on the UI thread
pub type Shared<T> = Rc<RefCell<T>>;

/// Mutable UI state of the application
#[derive(Debug, Default)]
pub struct StateManager {
    map_ready: bool,
    user_marker: Option<MarkerId>,
    selected_location: Option<Coordinates>,
    selected_files: Vec<SelectedFile>,
    markers: HashMap<i64, MarkerId>,
    is_loading: bool,
}

impl StateManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Shared<Self> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn set_loading(&mut self, is_loading: bool) -> bool {
        self.is_loading = is_loading;
        self.is_loading
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Maps `report_id` to `marker`, returning the handle it replaced
    pub fn add_marker(&mut self, report_id: i64, marker: MarkerId) -> Option<MarkerId> {
        self.markers.insert(report_id, marker)
    }

    /// Empties the mapping and hands back the markers so they can be removed from the map
    pub fn clear_markers(&mut self) -> Vec<MarkerId> {
        self.markers.drain().map(|(_, m)| m).collect()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn marker_report_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.markers.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Replaces the user marker, returning the previous one
    pub fn set_user_marker(&mut self, marker: Option<MarkerId>) -> Option<MarkerId> {
        std::mem::replace(&mut self.user_marker, marker)
    }

    pub fn user_marker(&self) -> Option<MarkerId> {
        self.user_marker
    }

    pub fn set_map_ready(&mut self) {
        self.map_ready = true;
    }

    pub fn is_map_ready(&self) -> bool {
        self.map_ready
    }

    pub fn set_selected_location(&mut self, location: Option<Coordinates>) {
        self.selected_location = location;
    }

    pub fn selected_location(&self) -> Option<Coordinates> {
        self.selected_location
    }

    pub fn update_selected_files(&mut self, files: Vec<SelectedFile>) {
        self.selected_files = files;
    }

    pub fn remove_file_at_index(&mut self, index: usize) -> Option<SelectedFile> {
        (index < self.selected_files.len()).then(|| self.selected_files.remove(index))
    }

    pub fn selected_files(&self) -> &[SelectedFile] {
        &self.selected_files
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> SelectedFile {
        SelectedFile::new(name.to_string(), None, vec![0; 4])
    }

    #[test]
    fn test_marker_mapping() {
        let mut state = StateManager::new();
        assert_eq!(state.add_marker(3, MarkerId(10)), None);
        assert_eq!(state.add_marker(1, MarkerId(11)), None);
        // Same report id replaces the handle
        assert_eq!(state.add_marker(3, MarkerId(12)), Some(MarkerId(10)));

        assert_eq!(state.marker_count(), 2);
        assert_eq!(state.marker_report_ids(), vec![1, 3]);

        let mut removed = state.clear_markers();
        removed.sort_by_key(|m| m.0);
        assert_eq!(removed, vec![MarkerId(11), MarkerId(12)]);
        assert_eq!(state.marker_count(), 0);
    }

    #[test]
    fn test_remove_file_at_index() {
        let mut state = StateManager::new();
        state.update_selected_files(vec![file("a.png"), file("b.png"), file("c.png")]);

        assert_eq!(state.remove_file_at_index(1).map(|f| f.name), Some("b.png".to_string()));
        assert_eq!(state.remove_file_at_index(5), None);
        let names: Vec<&str> = state.selected_files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.png", "c.png"]);
    }

    #[test]
    fn test_user_marker_replace() {
        let mut state = StateManager::new();
        assert_eq!(state.set_user_marker(Some(MarkerId(1))), None);
        assert_eq!(state.set_user_marker(Some(MarkerId(2))), Some(MarkerId(1)));
        assert_eq!(state.user_marker(), Some(MarkerId(2)));
    }
}
