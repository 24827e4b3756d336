use crate::models::{PollutionType, Report, Severity};
use chrono::{DateTime, Duration, Utc};

/// Client-side predicates applied to the full report list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFilter {
    pub pollution_type: Option<PollutionType>,
    pub severity: Option<Severity>,
    /// Only reports created within this many days
    pub within_days: Option<u32>,
}

impl ReportFilter {
    /// Builds a filter from the select values; empty or unparsable values disable a predicate
    pub fn from_form(pollution_type: &str, severity: &str, days: &str) -> Self {
        Self {
            pollution_type: Some(pollution_type)
                .filter(|s| !s.trim().is_empty())
                .map(PollutionType::parse),
            severity: Severity::parse(severity),
            within_days: days.trim().parse::<u32>().ok(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pollution_type.is_none() && self.severity.is_none() && self.within_days.is_none()
    }

    pub fn matches(&self, report: &Report, now: DateTime<Utc>) -> bool {
        if let Some(wanted) = self.pollution_type {
            if report.pollution_type != Some(wanted) {
                return false;
            }
        }
        if let Some(wanted) = self.severity {
            if report.severity != Some(wanted) {
                return false;
            }
        }
        if let Some(days) = self.within_days {
            // Undated reports cannot be placed in a time window
            let Some(created) = report.created_at else {
                return false;
            };
            if now - created > Duration::days(days as i64) {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, reports: Vec<Report>, now: DateTime<Utc>) -> Vec<Report> {
        reports.into_iter().filter(|r| self.matches(r, now)).collect()
    }
}
