use crate::models::ReportDraft;
use crate::services::map_manager::{MapManager, MapSurface};
use crate::services::report_manager::ReportManager;
use crate::ui::{Alert, Text, Ui};
use crate::utils::Utils;
use report_api::{NewReport, ReportBackend, UploadImage};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation stopped the submit before any request
    Blocked(Text),
    Submitted,
    Failed,
}

pub struct FormManager<B: ReportBackend, M: MapSurface, U: Ui> {
    backend: Rc<B>,
    reports: ReportManager<B, M, U>,
    map: MapManager<M, U>,
    utils: Utils<U>,
}

impl<B: ReportBackend, M: MapSurface, U: Ui> Clone for FormManager<B, M, U> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            reports: self.reports.clone(),
            map: self.map.clone(),
            utils: self.utils.clone(),
        }
    }
}

impl<B: ReportBackend, M: MapSurface, U: Ui> FormManager<B, M, U> {
    pub fn new(
        backend: Rc<B>,
        reports: ReportManager<B, M, U>,
        map: MapManager<M, U>,
        utils: Utils<U>,
    ) -> Self {
        Self {
            backend,
            reports,
            map,
            utils,
        }
    }

    fn block(&self, key: &'static str) -> SubmitOutcome {
        self.utils.show_error(Text::Key(key));
        SubmitOutcome::Blocked(Text::Key(key))
    }

    pub async fn handle_submit(&self, draft: &ReportDraft) -> SubmitOutcome {
        let description = draft.trimmed_description();
        if description.is_empty() {
            return self.block("description-required");
        }

        let (location, images) = {
            let state = self.utils.state().borrow();
            let images: Vec<UploadImage> = state
                .selected_files()
                .iter()
                .map(|f| UploadImage {
                    file_name: f.name.clone(),
                    mime_type: f.mime_type.clone(),
                    bytes: f.bytes.clone(),
                })
                .collect();
            (state.selected_location(), images)
        };
        let Some(location) = location else {
            return self.block("location-required");
        };

        let report = NewReport {
            description: description.to_string(),
            latitude: location.latitude,
            longitude: location.longitude,
            pollution_type: draft.pollution_type,
            severity: draft.severity,
            images,
        };

        self.utils.show_loading();
        let result = self.backend.add_report(report).await;
        self.utils.hide_loading();

        match result {
            Ok(reply) => {
                log::info!(
                    "Report submitted: {}",
                    reply.text().unwrap_or("no message")
                );
                self.utils
                    .show_alert(Alert::success("submit-success-title", "submit-success"));
                // Load failures already raise their own dialog
                let _ = self.reports.load_reports().await;
                self.reset_form();
                SubmitOutcome::Submitted
            }
            Err(e) => {
                log::error!("Error submitting report: {}", e);
                self.utils.show_error(Text::Key("submit-fail"));
                SubmitOutcome::Failed
            }
        }
    }

    /// Clears location, user marker and staged files
    pub fn reset_form(&self) {
        self.map.clear_selection();
        self.utils.state().borrow_mut().update_selected_files(Vec::new());
        self.utils.ui().state_changed();
    }
}
