use crate::config::AppConfig;
use crate::models::{Coordinates, ReportDraft, ReportFilter};
use crate::services::{
    FormManager, GeolocationManager, ImageManager, MapEvent, MapManager,
    MapSurface, PositionSource, ReportManager, StatisticsManager, SubmitOutcome,
};
use crate::state::{Shared, StateManager};
use crate::ui::Ui;
use crate::utils::Utils;
use image_staging::SelectedFile;
use report_api::ReportBackend;
use std::rc::Rc;

/// Wires the managers together over one backend, map, UI and position source
pub struct PollutionReporterApp<B, M, U, G>
where
    B: ReportBackend,
    M: MapSurface,
    U: Ui,
    G: PositionSource,
{
    pub state: Shared<StateManager>,
    pub map: MapManager<M, U>,
    pub reports: ReportManager<B, M, U>,
    pub images: ImageManager<U>,
    pub form: FormManager<B, M, U>,
    pub geolocation: GeolocationManager<G, M, U>,
    pub statistics: StatisticsManager<B, U>,
}

impl<B, M, U, G> Clone for PollutionReporterApp<B, M, U, G>
where
    B: ReportBackend,
    M: MapSurface,
    U: Ui,
    G: PositionSource,
{
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            map: self.map.clone(),
            reports: self.reports.clone(),
            images: self.images.clone(),
            form: self.form.clone(),
            geolocation: self.geolocation.clone(),
            statistics: self.statistics.clone(),
        }
    }
}

impl<B, M, U, G> PollutionReporterApp<B, M, U, G>
where
    B: ReportBackend,
    M: MapSurface,
    U: Ui,
    G: PositionSource,
{
    pub fn new(config: &AppConfig, backend: B, map: M, ui: Rc<U>, position: G) -> Self {
        let state = StateManager::shared();
        let backend = Rc::new(backend);
        let utils = Utils::new(state.clone(), ui, config.image_rules());

        let map = MapManager::new(Rc::new(map), utils.clone(), config.default_view);
        let reports = ReportManager::new(
            backend.clone(),
            map.clone(),
            utils.clone(),
            config.uploads_url(),
        );
        let form = FormManager::new(backend.clone(), reports.clone(), map.clone(), utils.clone());
        let geolocation = GeolocationManager::new(Rc::new(position), map.clone(), utils.clone());

        Self {
            state,
            images: ImageManager::new(utils.clone()),
            statistics: StatisticsManager::new(backend, utils),
            map,
            reports,
            form,
            geolocation,
        }
    }

    /// Creates the map and shows the current reports
    pub async fn start(&self) {
        log::info!("Starting pollution reporter");
        self.map.initialize_map();
        if let Err(e) = self.reports.load_reports().await {
            log::warn!("Initial report load failed: {}", e);
        }
    }

    /// Dispatches an interaction coming from the map widget
    pub async fn handle_map_event(&self, event: MapEvent) {
        match event {
            MapEvent::MapClick { lat, lng } => {
                self.map.handle_map_click(Coordinates::new(lat, lng));
            }
            MapEvent::DeleteReport { id, can_delete } => {
                let outcome = self.reports.delete_report(id, can_delete).await;
                log::debug!("Delete of report {} finished: {:?}", id, outcome);
            }
            MapEvent::OpenImage { src } => self.images.open_popup(src),
        }
    }

    pub async fn submit(&self, draft: &ReportDraft) -> SubmitOutcome {
        self.form.handle_submit(draft).await
    }

    pub async fn filter(&self, filter: &ReportFilter) {
        if let Err(e) = self.reports.apply_filters(filter).await {
            log::warn!("Filtering failed: {}", e);
        }
    }

    pub fn select_images(&self, files: Vec<SelectedFile>) -> crate::services::ImageSelection {
        self.images.handle_image_select(files)
    }

    pub async fn locate(&self) {
        if let Err(e) = self.geolocation.get_location().await {
            log::debug!("Location lookup ended with {}", e);
        }
    }

    /// Redraws map popups after the UI language changed
    pub fn language_changed(&self) {
        let shown = self.reports.refresh_popups();
        self.map.refresh_user_marker();
        log::debug!("Relabelled {} report markers", shown);
    }

    pub async fn show_statistics(&self) {
        // Failure is reported through a dialog
        let _ = self.statistics.show_statistics().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PollutionType;
    use crate::services::GeolocationError;
    use crate::testing::{report, FakeBackend, FakeMap, FakePosition, FakeUi, MapCall};
    use crate::ui::Text;

    type TestApp = PollutionReporterApp<FakeBackend, FakeMap, FakeUi, FakePosition>;

    fn app(
        reports: Vec<crate::models::Report>,
        position: Result<Coordinates, GeolocationError>,
    ) -> (TestApp, Rc<FakeUi>) {
        let ui = Rc::new(FakeUi::default());
        let app = PollutionReporterApp::new(
            &AppConfig::default(),
            FakeBackend::with_reports(reports),
            FakeMap::default(),
            ui.clone(),
            FakePosition::new(position),
        );
        (app, ui)
    }

    fn marker_count(app: &TestApp) -> usize {
        app.state.borrow().marker_count()
    }

    #[tokio::test]
    async fn test_start_initializes_and_loads() {
        let (app, _) = app(
            vec![report(1, Some(PollutionType::Oil)), report(2, None)],
            Err(GeolocationError::Unsupported),
        );
        app.start().await;
        app.start().await;

        assert!(app.state.borrow().is_map_ready());
        assert_eq!(marker_count(&app), 2);
        let inits = app
            .map
            .surface()
            .calls()
            .into_iter()
            .filter(|c| matches!(c, MapCall::Init(_)))
            .count();
        assert_eq!(inits, 1);
    }

    #[tokio::test]
    async fn test_click_then_submit_flow() {
        let (app, _) = app(vec![report(1, None)], Err(GeolocationError::Unsupported));
        app.start().await;

        app.handle_map_event(MapEvent::MapClick { lat: 36.5, lng: 2.9 })
            .await;
        assert_eq!(
            app.state.borrow().selected_location(),
            Some(Coordinates::new(36.5, 2.9))
        );

        let outcome = app
            .submit(&ReportDraft::from_form("Plastic bottles", "plastic", "low"))
            .await;
        assert_eq!(outcome, SubmitOutcome::Submitted);
        assert_eq!(app.state.borrow().selected_location(), None);
    }

    #[tokio::test]
    async fn test_delete_event_respects_ownership() {
        let (app, ui) = app(vec![report(1, None)], Err(GeolocationError::Unsupported));
        app.start().await;

        app.handle_map_event(MapEvent::DeleteReport {
            id: 1,
            can_delete: false,
        })
        .await;
        assert_eq!(marker_count(&app), 1);
        assert!(ui.asked().is_empty());

        app.handle_map_event(MapEvent::DeleteReport {
            id: 1,
            can_delete: true,
        })
        .await;
        assert_eq!(marker_count(&app), 0);
        assert_eq!(ui.asked().len(), 2);
    }

    #[tokio::test]
    async fn test_locate_moves_user_marker() {
        let here = Coordinates::new(36.8, 3.0);
        let (app, _) = app(vec![], Ok(here));
        app.start().await;
        app.locate().await;

        assert_eq!(app.state.borrow().selected_location(), Some(here));
        assert_eq!(app.map.surface().calls().last(), Some(&MapCall::SetView(here, None)));
    }

    #[tokio::test]
    async fn test_open_image_event() {
        let (app, ui) = app(vec![], Err(GeolocationError::Unsupported));
        app.handle_map_event(MapEvent::OpenImage {
            src: "http://127.0.0.1:5000/static/uploads/a.jpg".into(),
        })
        .await;
        assert_eq!(
            ui.image().as_deref(),
            Some("http://127.0.0.1:5000/static/uploads/a.jpg")
        );
    }

    #[tokio::test]
    async fn test_unsupported_geolocation_dialog() {
        let (app, ui) = app(vec![], Err(GeolocationError::Unsupported));
        app.filter(&ReportFilter::default()).await;
        assert!(ui.alerts().is_empty());
        assert_eq!(marker_count(&app), 0);

        app.locate().await;
        assert_eq!(
            ui.alerts().last().map(|a| a.text.clone()),
            Some(Text::Key("geolocation-not-supported"))
        );
    }

    #[tokio::test]
    async fn test_language_change_relabels_map() {
        let (app, ui) = app(vec![report(1, None)], Err(GeolocationError::Unsupported));
        app.start().await;
        app.handle_map_event(MapEvent::MapClick { lat: 36.5, lng: 2.9 })
            .await;

        ui.switch_locale("en");
        app.language_changed();

        let map = app.map.surface();
        assert!(map.pins().last().unwrap().popup_html.contains("en:report-desc"));
        let marker = app.state.borrow().user_marker().unwrap();
        assert_eq!(map.user_popup(marker).as_deref(), Some("en:selected-location"));
        assert_eq!(map.live_markers().len(), 2);
    }
}
