use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Category of pollution attached to a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollutionType {
    Plastic,
    Oil,
    Chemical,
    Other,
}

impl PollutionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PollutionType::Plastic => "plastic",
            PollutionType::Oil => "oil",
            PollutionType::Chemical => "chemical",
            PollutionType::Other => "other",
        }
    }

    /// Parses the wire value; unknown categories are not an error, they are `Other`
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "plastic" => PollutionType::Plastic,
            "oil" => PollutionType::Oil,
            "chemical" => PollutionType::Chemical,
            _ => PollutionType::Other,
        }
    }

    /// Colour of the map pin for this category
    pub fn marker_color(&self) -> &'static str {
        match self {
            PollutionType::Plastic => "red",
            PollutionType::Oil => "black",
            PollutionType::Chemical => "purple",
            PollutionType::Other => "gray",
        }
    }

    pub fn all() -> &'static [PollutionType] {
        static ALL: [PollutionType; 4] = [
            PollutionType::Plastic,
            PollutionType::Oil,
            PollutionType::Chemical,
            PollutionType::Other,
        ];
        &ALL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            _ => None,
        }
    }

    pub fn all() -> &'static [Severity] {
        static ALL: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];
        &ALL
    }
}

/// Image attached to a report, relative to the backend's upload folder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportImage {
    pub image_path: String,
}

/// A pollution report as served by `GET /get_reports`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_pollution_type")]
    pub pollution_type: Option<PollutionType>,
    #[serde(default, deserialize_with = "lenient_severity")]
    pub severity: Option<Severity>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub images: Vec<ReportImage>,
    /// Single image file name sent by older backends
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub can_delete: bool,
}

impl Report {
    /// Both coordinates, if present and finite
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Some((lat, lng)),
            _ => None,
        }
    }

    /// All image paths of the report, the legacy `image` field last
    pub fn image_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.images.iter().map(|i| i.image_path.as_str()).collect();
        if let Some(legacy) = self.image.as_deref().filter(|s| !s.is_empty()) {
            if !paths.contains(&legacy) {
                paths.push(legacy);
            }
        }
        paths
    }
}

/// Aggregate counts served by `GET /statistics`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(default)]
    pub total_reports: u64,
    #[serde(default)]
    pub pollution_types: BTreeMap<String, u64>,
    #[serde(default)]
    pub severity_distribution: BTreeMap<String, u64>,
}

/// Reply body of the mutating endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiMessage {
    /// The error text if present, else the message
    pub fn text(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

/// A file staged for upload with a new report
#[derive(Debug, Clone, PartialEq)]
pub struct UploadImage {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Payload of `POST /add_report`
#[derive(Debug, Clone, PartialEq)]
pub struct NewReport {
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub pollution_type: Option<PollutionType>,
    pub severity: Option<Severity>,
    pub images: Vec<UploadImage>,
}

impl NewReport {
    /// Text fields of the multipart body, coordinates fixed to six decimals
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("description", self.description.clone()),
            ("latitude", format!("{:.6}", self.latitude)),
            ("longitude", format!("{:.6}", self.longitude)),
        ];
        if let Some(t) = self.pollution_type {
            fields.push(("pollution_type", t.as_str().to_string()));
        }
        if let Some(s) = self.severity {
            fields.push(("severity", s.as_str().to_string()));
        }
        fields
    }
}

fn lenient_pollution_type<'de, D>(deserializer: D) -> Result<Option<PollutionType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .filter(|s| !s.trim().is_empty())
        .map(|s| PollutionType::parse(&s)))
}

fn lenient_severity<'de, D>(deserializer: D) -> Result<Option<Severity>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| Severity::parse(&s)))
}

/// Accepts RFC 3339 as well as the naive ISO timestamps Python emits (taken as UTC)
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}
