use crate::models::{PollutionType, Severity};

/// Values typed into the report form. The location lives in the state
/// manager because the map, not the form, writes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportDraft {
    pub description: String,
    pub pollution_type: Option<PollutionType>,
    pub severity: Option<Severity>,
}

impl ReportDraft {
    /// Builds a draft from raw form values; empty selects mean "not given"
    pub fn from_form(description: &str, pollution_type: &str, severity: &str) -> Self {
        Self {
            description: description.to_string(),
            pollution_type: Some(pollution_type)
                .filter(|s| !s.trim().is_empty())
                .map(PollutionType::parse),
            severity: Severity::parse(severity),
        }
    }

    pub fn trimmed_description(&self) -> &str {
        self.description.trim()
    }
}
