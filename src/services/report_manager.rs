use crate::error::AppError;
use crate::models::{PollutionType, Report, ReportFilter};
use crate::services::map_manager::{MapManager, MapSurface, MarkerPin};
use crate::ui::{Alert, Text, Ui};
use crate::utils::{escape_html, Utils};
use report_api::ReportBackend;
use std::cell::RefCell;
use std::rc::Rc;

/// Result of a delete request from a marker popup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The report is not ours; the backend was not contacted
    Refused,
    Cancelled,
    Deleted,
    Failed,
}

/// Fetches reports and keeps the map markers in sync with them
pub struct ReportManager<B: ReportBackend, M: MapSurface, U: Ui> {
    backend: Rc<B>,
    map: MapManager<M, U>,
    utils: Utils<U>,
    uploads_url: String,
    /// Reports behind the current markers
    shown: Rc<RefCell<Vec<Report>>>,
}

impl<B: ReportBackend, M: MapSurface, U: Ui> Clone for ReportManager<B, M, U> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            map: self.map.clone(),
            utils: self.utils.clone(),
            uploads_url: self.uploads_url.clone(),
            shown: self.shown.clone(),
        }
    }
}

impl<B: ReportBackend, M: MapSurface, U: Ui> ReportManager<B, M, U> {
    /// `uploads_url` is the absolute prefix uploaded images are served under
    pub fn new(backend: Rc<B>, map: MapManager<M, U>, utils: Utils<U>, uploads_url: String) -> Self {
        Self {
            backend,
            map,
            utils,
            uploads_url: uploads_url.trim_end_matches('/').to_string(),
            shown: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Fetches all reports and redraws their markers; returns the marker count
    pub async fn load_reports(&self) -> Result<usize, AppError> {
        self.fetch_and_render(None, "loading-reports-failed").await
    }

    /// Re-fetches everything and keeps only the reports matching `filter`
    pub async fn apply_filters(&self, filter: &ReportFilter) -> Result<usize, AppError> {
        self.fetch_and_render(Some(filter), "filter-fail").await
    }

    async fn fetch_and_render(
        &self,
        filter: Option<&ReportFilter>,
        failure_key: &'static str,
    ) -> Result<usize, AppError> {
        self.utils.show_loading();
        let result = self.backend.fetch_reports().await;
        self.utils.hide_loading();

        match result {
            Ok(reports) => {
                let reports = match filter {
                    Some(filter) if !filter.is_empty() => {
                        let total = reports.len();
                        let kept = filter.apply(reports, chrono::Utc::now());
                        log::info!("Filter kept {} of {} reports", kept.len(), total);
                        kept
                    }
                    _ => reports,
                };
                Ok(self.render_reports(&reports))
            }
            Err(e) => {
                log::error!("Error loading reports: {}", e);
                self.utils.show_error(Text::Key(failure_key));
                Err(e.into())
            }
        }
    }

    /// Replaces every report marker with one per report that has coordinates
    pub fn render_reports(&self, reports: &[Report]) -> usize {
        let stale = self.utils.state().borrow_mut().clear_markers();
        for marker in stale {
            self.map.surface().remove_marker(marker);
        }

        for report in reports {
            let Some((latitude, longitude)) = report.coordinates() else {
                log::warn!("Report {} has no valid coordinates, skipping", report.id);
                continue;
            };
            let pin = MarkerPin {
                latitude,
                longitude,
                color: report
                    .pollution_type
                    .unwrap_or(PollutionType::Other)
                    .marker_color(),
                popup_html: self.create_report_popup(report),
            };
            let marker = self.map.surface().add_marker(&pin);
            let replaced = self.utils.state().borrow_mut().add_marker(report.id, marker);
            if let Some(old) = replaced {
                log::warn!("Report {} listed twice, keeping the last pin", report.id);
                self.map.surface().remove_marker(old);
            }
        }

        *self.shown.borrow_mut() = reports.to_vec();
        let state = self.utils.state().borrow();
        log::debug!("Markers shown for reports {:?}", state.marker_report_ids());
        state.marker_count()
    }

    /// Redraws the current markers so their popups use the active language
    pub fn refresh_popups(&self) -> usize {
        let reports = self.shown.borrow().clone();
        self.render_reports(&reports)
    }

    pub fn translate_pollution_type(&self, pollution_type: Option<PollutionType>) -> String {
        match pollution_type {
            Some(t) => self.utils.t(t.as_str()),
            None => self.utils.t("not-specified"),
        }
    }

    pub fn image_url(&self, path: &str) -> String {
        format!("{}/{}", self.uploads_url, urlencoding::encode(path))
    }

    /// Popup markup; every backend string is escaped
    pub fn create_report_popup(&self, report: &Report) -> String {
        let mut html = String::from("<div class=\"report-popup\">");
        html.push_str(&format!(
            "<p><strong>{}</strong> {}</p>",
            escape_html(&self.utils.t("report-desc")),
            escape_html(&report.description)
        ));
        html.push_str(&format!(
            "<p><strong>{}</strong> {}</p>",
            escape_html(&self.utils.t("report-type")),
            escape_html(&self.translate_pollution_type(report.pollution_type))
        ));

        let paths = report.image_paths();
        if !paths.is_empty() {
            html.push_str("<div class=\"report-images\">");
            for path in paths {
                let url = escape_html(&self.image_url(path));
                html.push_str(&format!(
                    "<img src=\"{url}\" class=\"popup-thumb\" data-open-image=\"{url}\" alt=\"\">"
                ));
            }
            html.push_str("</div>");
        }

        if report.can_delete {
            html.push_str(&format!(
                "<button class=\"delete-btn\" data-delete-report=\"{}\" data-can-delete=\"true\">{}</button>",
                report.id,
                escape_html(&self.utils.t("delete-btn"))
            ));
        }

        html.push_str("</div>");
        html
    }

    pub async fn delete_report(&self, report_id: i64, can_delete: bool) -> DeleteOutcome {
        if !can_delete {
            log::warn!("Refusing to delete report {} without ownership", report_id);
            self.utils.show_error(Text::Key("delete-not-owner"));
            return DeleteOutcome::Refused;
        }

        let confirmed = self
            .utils
            .ask(Alert::confirm("delete-confirm-title", "delete-confirm-text"))
            .await;
        if !confirmed {
            return DeleteOutcome::Cancelled;
        }

        self.utils.show_loading();
        let result = self.backend.delete_report(report_id).await;
        self.utils.hide_loading();

        match result {
            Ok(_) => {
                log::info!("Report {} deleted", report_id);
                self.utils
                    .ask(Alert::success("deleted", "delete-success"))
                    .await;
                // Reload errors are reported by the reload itself
                let _ = self.reload().await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                log::error!("Error deleting report {}: {}", report_id, e);
                self.utils.show_error(Text::Key("delete-fail"));
                DeleteOutcome::Failed
            }
        }
    }

    /// Starts over: no selection, no staged files, fresh reports
    pub async fn reload(&self) -> Result<usize, AppError> {
        self.map.clear_selection();
        self.utils.state().borrow_mut().update_selected_files(Vec::new());
        self.utils.ui().state_changed();
        self.load_reports().await
    }
}
