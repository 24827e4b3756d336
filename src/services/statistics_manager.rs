use crate::error::AppError;
use crate::ui::{Text, Ui};
use crate::utils::Utils;
use report_api::{ReportBackend, Statistics};
use std::rc::Rc;

pub struct StatisticsManager<B: ReportBackend, U: Ui> {
    backend: Rc<B>,
    utils: Utils<U>,
}

impl<B: ReportBackend, U: Ui> Clone for StatisticsManager<B, U> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            utils: self.utils.clone(),
        }
    }
}

impl<B: ReportBackend, U: Ui> StatisticsManager<B, U> {
    pub fn new(backend: Rc<B>, utils: Utils<U>) -> Self {
        Self { backend, utils }
    }

    /// Fetches the aggregate counts and opens the statistics dialog
    pub async fn show_statistics(&self) -> Result<Statistics, AppError> {
        self.utils.show_loading();
        let result = self.backend.fetch_statistics().await;
        self.utils.hide_loading();

        match result {
            Ok(statistics) => {
                log::debug!("Statistics: {} reports", statistics.total_reports);
                self.utils.ui().show_statistics(statistics.clone());
                Ok(statistics)
            }
            Err(e) => {
                log::error!("Error loading statistics: {}", e);
                self.utils.show_error(Text::Key("stats-fail"));
                Err(e.into())
            }
        }
    }
}

/// Localized `(label, count)` rows of a distribution, largest first
pub fn distribution_rows(
    counts: &std::collections::BTreeMap<String, u64>,
    translate: impl Fn(&str) -> String,
) -> Vec<(String, u64)> {
    let mut rows: Vec<(String, u64)> = counts
        .iter()
        .map(|(key, count)| (translate(key), *count))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    rows
}
