use crate::errors::AppError;
use crate::models::{
    NewRecordRequest, SleepRecord, StatsResponse, TodayResponse, UserProfile, SLEEP_GOALS,
};
use crate::state::AppState;
use crate::stats;
use crate::ui::render_index;
use axum::{extract::State, response::Html, Json};
use chrono::{Local, NaiveTime};
use uuid::Uuid;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let records = state.store.records().await;
    let profile = state.store.profile().await;
    let stats = stats::build_stats(&records);
    Html(render_index(profile.as_ref(), &stats))
}

pub async fn list_records(State(state): State<AppState>) -> Json<Vec<SleepRecord>> {
    let mut records = state.store.records().await;
    records.sort_by(|a, b| b.date.cmp(&a.date));
    Json(records)
}

pub async fn create_record(
    State(state): State<AppState>,
    Json(payload): Json<NewRecordRequest>,
) -> Result<Json<SleepRecord>, AppError> {
    if !is_clock_time(&payload.bed_time) {
        return Err(AppError::bad_request("bedTime must be HH:mm"));
    }
    if !is_clock_time(&payload.wake_time) {
        return Err(AppError::bad_request("wakeTime must be HH:mm"));
    }

    let record = SleepRecord {
        id: Uuid::new_v4(),
        date: Local::now().date_naive(),
        hours_slept: stats::hours_slept(&payload.bed_time, &payload.wake_time),
        bed_time: payload.bed_time,
        wake_time: payload.wake_time,
        quality: payload.quality,
    };

    state.store.save_record(record.clone()).await?;
    Ok(Json(record))
}

pub async fn get_today(State(state): State<AppState>) -> Json<TodayResponse> {
    let record = state.store.today_record().await;
    Json(TodayResponse {
        date: Local::now().date_naive(),
        record,
    })
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let records = state.store.records().await;
    Json(stats::build_stats(&records))
}

pub async fn get_profile(State(state): State<AppState>) -> Json<Option<UserProfile>> {
    Json(state.store.profile().await)
}

pub async fn save_profile(
    State(state): State<AppState>,
    Json(payload): Json<UserProfile>,
) -> Result<Json<UserProfile>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::bad_request("name must not be empty"));
    }
    if payload.age == 0 || payload.age > 120 {
        return Err(AppError::bad_request("age must be between 1 and 120"));
    }

    let profile = UserProfile {
        name: payload.name.trim().to_string(),
        age: payload.age,
        goal: payload.goal,
    };
    state.store.save_profile(&profile).await?;
    Ok(Json(profile))
}

pub async fn list_goals() -> Json<Vec<&'static str>> {
    Json(SLEEP_GOALS.to_vec())
}

fn is_clock_time(value: &str) -> bool {
    NaiveTime::parse_from_str(value, "%H:%M").is_ok()
}
