//! Row types of the capital-projects datasets.
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, VizError};

/// One budget/schedule change reported for a project.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChangeRecord {
    #[serde(rename = "PID")]
    pub pid: i64,
    #[serde(rename = "Project_Name", default)]
    pub project_name: Option<String>,
    #[serde(rename = "Category", default)]
    pub category: Option<String>,
    #[serde(rename = "Borough", default)]
    pub borough: Option<String>,
    #[serde(rename = "Date_Reported_As_Of", deserialize_with = "deserialize_report_date")]
    pub date_reported_as_of: NaiveDateTime,
    #[serde(rename = "Change_Year")]
    pub change_year: i32,
    #[serde(rename = "Budget_Forecast")]
    pub budget_forecast: f64,
    #[serde(rename = "Latest_Budget_Changes")]
    pub latest_budget_changes: f64,
    #[serde(rename = "Latest_Schedule_Changes")]
    pub latest_schedule_changes: f64,
}

/// Starting budget and schedule of a project, as kept in the
/// prediction-interval dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(rename = "PID")]
    pub pid: i64,
    #[serde(rename = "Project_Name")]
    pub project_name: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Borough")]
    pub borough: String,
    #[serde(rename = "Budget_Start")]
    pub budget_start: f64,
    #[serde(rename = "Duration_Start")]
    pub duration_start: f64,
}

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a report date given as `YYYY-MM-DD` or with a time of day.
pub fn parse_report_date(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| VizError::InvalidArgument(format!("Unparseable report date: {}", s)))
}

fn deserialize_report_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_report_date(&raw).map_err(serde::de::Error::custom)
}
