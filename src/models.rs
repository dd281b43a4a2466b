use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepQuality {
    Poor,
    Fair,
    Good,
}

/// One calendar night's entry. The store keeps at most one per `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepRecord {
    pub id: Uuid,
    pub date: NaiveDate,
    pub bed_time: String,
    pub wake_time: String,
    pub quality: SleepQuality,
    pub hours_slept: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub age: u8,
    pub goal: String,
}

/// Suggestions offered by the profile form; `goal` itself stays free text.
pub const SLEEP_GOALS: [&str; 5] = [
    "Fall asleep faster",
    "Stop waking up during the night",
    "Sleep more hours",
    "Improve sleep quality",
    "Build a bedtime routine",
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecordRequest {
    pub bed_time: String,
    pub wake_time: String,
    pub quality: SleepQuality,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayResponse {
    pub date: NaiveDate,
    pub record: Option<SleepRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityOverview {
    pub average_hours: f64,
    pub good_nights_pct: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub streak_days: u32,
    pub weekly_average_hours: f64,
    pub average_hours: f64,
    pub good_nights_pct: u32,
    pub total_records: usize,
}
