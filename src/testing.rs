//! In-memory stand-ins for the backend, the map widget, the dialogs and the
//! position source

use crate::models::{Coordinates, PollutionType, Report};
use crate::services::geolocation_manager::{GeolocationError, PositionOptions, PositionSource};
use crate::services::map_manager::{MapOptions, MapSurface, MarkerId, MarkerPin};
use crate::ui::{Alert, Ui};
use report_api::{ApiError, ApiMessage, ApiResult, NewReport, ReportBackend, Statistics};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

pub fn report(id: i64, pollution_type: Option<PollutionType>) -> Report {
    Report {
        id,
        description: format!("report {}", id),
        latitude: Some(36.0 + id as f64 * 0.01),
        longitude: Some(3.0),
        pollution_type,
        severity: None,
        created_at: None,
        images: Vec::new(),
        image: None,
        can_delete: false,
    }
}

#[derive(Default)]
pub struct FakeBackend {
    reports: RefCell<Vec<Report>>,
    statistics: RefCell<Statistics>,
    failure: RefCell<Option<ApiError>>,
    deleted: RefCell<Vec<i64>>,
    submitted: RefCell<Vec<NewReport>>,
}

impl FakeBackend {
    pub fn with_reports(reports: Vec<Report>) -> Self {
        let backend = Self::default();
        backend.set_reports(reports);
        backend
    }

    pub fn set_reports(&self, reports: Vec<Report>) {
        *self.reports.borrow_mut() = reports;
    }

    pub fn set_statistics(&self, statistics: Statistics) {
        *self.statistics.borrow_mut() = statistics;
    }

    /// The next backend call fails with `error`
    pub fn fail_next(&self, error: ApiError) {
        *self.failure.borrow_mut() = Some(error);
    }

    pub fn deleted(&self) -> Vec<i64> {
        self.deleted.borrow().clone()
    }

    pub fn submitted(&self) -> Vec<NewReport> {
        self.submitted.borrow().clone()
    }

    fn check(&self) -> ApiResult<()> {
        match self.failure.borrow_mut().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl ReportBackend for FakeBackend {
    async fn fetch_reports(&self) -> ApiResult<Vec<Report>> {
        self.check()?;
        Ok(self.reports.borrow().clone())
    }

    async fn add_report(&self, report: NewReport) -> ApiResult<ApiMessage> {
        self.check()?;
        self.submitted.borrow_mut().push(report);
        Ok(ApiMessage {
            message: Some("Report added successfully".to_string()),
            error: None,
        })
    }

    async fn delete_report(&self, report_id: i64) -> ApiResult<ApiMessage> {
        self.check()?;
        self.deleted.borrow_mut().push(report_id);
        self.reports.borrow_mut().retain(|r| r.id != report_id);
        Ok(ApiMessage::default())
    }

    async fn fetch_statistics(&self) -> ApiResult<Statistics> {
        self.check()?;
        Ok(self.statistics.borrow().clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapCall {
    Init(MapOptions),
    AddMarker(MarkerId),
    AddUserMarker(MarkerId),
    RemoveMarker(MarkerId),
    SetView(Coordinates, Option<u8>),
}

#[derive(Default)]
pub struct FakeMap {
    next_id: Cell<u64>,
    calls: RefCell<Vec<MapCall>>,
    live: RefCell<Vec<MarkerId>>,
    pins: RefCell<Vec<MarkerPin>>,
    user_popups: RefCell<HashMap<MarkerId, String>>,
}

impl FakeMap {
    pub fn calls(&self) -> Vec<MapCall> {
        self.calls.borrow().clone()
    }

    /// Markers currently on the map, in insertion order
    pub fn live_markers(&self) -> Vec<MarkerId> {
        self.live.borrow().clone()
    }

    /// Every report pin ever added
    pub fn pins(&self) -> Vec<MarkerPin> {
        self.pins.borrow().clone()
    }

    pub fn user_popup(&self, marker: MarkerId) -> Option<String> {
        self.user_popups.borrow().get(&marker).cloned()
    }

    fn allocate(&self) -> MarkerId {
        let id = MarkerId(self.next_id.get() + 1);
        self.next_id.set(id.0);
        self.live.borrow_mut().push(id);
        id
    }
}

impl MapSurface for FakeMap {
    fn init(&self, options: &MapOptions) {
        self.calls.borrow_mut().push(MapCall::Init(options.clone()));
    }

    fn add_marker(&self, pin: &MarkerPin) -> MarkerId {
        let id = self.allocate();
        self.pins.borrow_mut().push(pin.clone());
        self.calls.borrow_mut().push(MapCall::AddMarker(id));
        id
    }

    fn add_user_marker(&self, _at: Coordinates, popup: &str) -> MarkerId {
        let id = self.allocate();
        self.user_popups.borrow_mut().insert(id, popup.to_string());
        self.calls.borrow_mut().push(MapCall::AddUserMarker(id));
        id
    }

    fn remove_marker(&self, marker: MarkerId) {
        self.live.borrow_mut().retain(|m| *m != marker);
        self.calls.borrow_mut().push(MapCall::RemoveMarker(marker));
    }

    fn set_view(&self, center: Coordinates, zoom: Option<u8>) {
        self.calls.borrow_mut().push(MapCall::SetView(center, zoom));
    }
}

/// Records dialogs; translations come back as their keys
pub struct FakeUi {
    loading: Cell<Option<bool>>,
    alerts: RefCell<Vec<Alert>>,
    asked: RefCell<Vec<Alert>>,
    answer: Cell<bool>,
    statistics: RefCell<Option<Statistics>>,
    image: RefCell<Option<String>>,
    state_changes: Cell<usize>,
    locale: RefCell<String>,
}

impl Default for FakeUi {
    fn default() -> Self {
        Self {
            loading: Cell::new(None),
            alerts: RefCell::new(Vec::new()),
            asked: RefCell::new(Vec::new()),
            answer: Cell::new(true),
            statistics: RefCell::new(None),
            image: RefCell::new(None),
            state_changes: Cell::new(0),
            locale: RefCell::new(String::new()),
        }
    }
}

impl FakeUi {
    /// Reply given to every following confirmation
    pub fn answer(&self, confirm: bool) {
        self.answer.set(confirm);
    }

    pub fn loading_visible(&self) -> Option<bool> {
        self.loading.get()
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.borrow().clone()
    }

    pub fn asked(&self) -> Vec<Alert> {
        self.asked.borrow().clone()
    }

    pub fn statistics(&self) -> Option<Statistics> {
        self.statistics.borrow().clone()
    }

    pub fn image(&self) -> Option<String> {
        self.image.borrow().clone()
    }

    pub fn state_changes(&self) -> usize {
        self.state_changes.get()
    }

    /// Following translations come back as `<locale>:<key>`
    pub fn switch_locale(&self, locale: &str) {
        *self.locale.borrow_mut() = locale.to_string();
    }
}

impl Ui for FakeUi {
    fn translate(&self, key: &str) -> String {
        let locale = self.locale.borrow();
        if locale.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", locale, key)
        }
    }

    fn set_loading_visible(&self, visible: bool) {
        self.loading.set(Some(visible));
    }

    fn show_alert(&self, alert: Alert) {
        self.alerts.borrow_mut().push(alert);
    }

    async fn ask(&self, alert: Alert) -> bool {
        self.asked.borrow_mut().push(alert);
        self.answer.get()
    }

    fn show_statistics(&self, statistics: Statistics) {
        *self.statistics.borrow_mut() = Some(statistics);
    }

    fn show_image(&self, src: Option<String>) {
        *self.image.borrow_mut() = src;
    }

    fn state_changed(&self) {
        self.state_changes.set(self.state_changes.get() + 1);
    }
}

pub struct FakePosition {
    reply: Result<Coordinates, GeolocationError>,
    requests: RefCell<Vec<PositionOptions>>,
}

impl FakePosition {
    pub fn new(reply: Result<Coordinates, GeolocationError>) -> Self {
        Self {
            reply,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<PositionOptions> {
        self.requests.borrow().clone()
    }
}

impl PositionSource for FakePosition {
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Coordinates, GeolocationError> {
        self.requests.borrow_mut().push(*options);
        self.reply.clone()
    }
}
