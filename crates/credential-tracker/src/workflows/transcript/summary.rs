use crate::workflows::credentials::dates::parse_date_value;
use crate::workflows::credentials::resolver::is_present;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

const UNTITLED_MODULE: &str = "Untitled module";

/// Learning totals reported at the top of a transcript.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TranscriptSummary {
    pub modules_completed: u64,
    pub learning_paths_completed: u64,
    pub training_minutes: u64,
    pub study_hours: f64,
}

impl TranscriptSummary {
    pub fn from_document(document: &Value) -> Self {
        let training_minutes = count_field(document, "totalTrainingMinutes");
        Self {
            modules_completed: count_field(document, "totalModulesCompleted"),
            learning_paths_completed: count_field(document, "totalLearningPathsCompleted"),
            training_minutes,
            study_hours: (training_minutes as f64 / 60.0 * 10.0).round() / 10.0,
        }
    }
}

/// Accepts integers, floats, and numeric strings; anything else counts as zero.
fn count_field(document: &Value, key: &str) -> u64 {
    match document.get(key) {
        Some(Value::Number(number)) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|v| *v >= 0.0).map(|v| v as u64))
            .unwrap_or(0),
        Some(Value::String(raw)) => raw.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentTraining {
    pub title: String,
    pub completed_on: Option<NaiveDate>,
}

/// The first `limit` entries of `modulesCompleted`, in transcript order.
pub fn recent_training(document: &Value, limit: usize) -> Vec<RecentTraining> {
    document
        .get("modulesCompleted")
        .and_then(Value::as_array)
        .map(|modules| {
            modules
                .iter()
                .take(limit)
                .map(|module| RecentTraining {
                    title: module
                        .get("title")
                        .filter(|value| is_present(value))
                        .and_then(Value::as_str)
                        .map(|title| title.trim().to_string())
                        .unwrap_or_else(|| UNTITLED_MODULE.to_string()),
                    completed_on: module
                        .get("completedOn")
                        .and_then(|value| parse_date_value(value).ok()),
                })
                .collect()
        })
        .unwrap_or_default()
}
