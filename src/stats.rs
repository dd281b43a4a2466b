use crate::models::{QualityOverview, SleepQuality, SleepRecord, StatsResponse};
use chrono::{Duration, Local, NaiveDate, NaiveTime, Timelike};
use tracing::warn;

/// Hours between bed time and wake time, one decimal place. A wake time
/// earlier than the bed time is read as the following day. Equal times
/// yield 0, not 24. Malformed input degrades to 0 and is logged.
pub fn hours_slept(bed_time: &str, wake_time: &str) -> f64 {
    let (Some(bed), Some(wake)) = (minutes_of_day(bed_time), minutes_of_day(wake_time)) else {
        warn!("invalid time input: bed={bed_time:?} wake={wake_time:?}");
        return 0.0;
    };

    let wake = if wake < bed { wake + 24 * 60 } else { wake };
    round1((wake - bed) as f64 / 60.0)
}

pub fn current_streak(records: &[SleepRecord]) -> u32 {
    streak_at(Local::now().date_naive(), records)
}

/// Consecutive recorded calendar days ending at `today`. Walking the
/// records newest first, each record must sit exactly `streak` days back;
/// the first gap stops the count.
pub fn streak_at(today: NaiveDate, records: &[SleepRecord]) -> u32 {
    let mut sorted: Vec<&SleepRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let mut streak: u32 = 0;
    for record in sorted {
        if (today - record.date).num_days() == i64::from(streak) {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

pub fn weekly_average(records: &[SleepRecord]) -> f64 {
    weekly_average_at(Local::now().date_naive(), records)
}

/// Mean hours slept over the trailing 7 calendar days, boundary inclusive.
pub fn weekly_average_at(today: NaiveDate, records: &[SleepRecord]) -> f64 {
    let cutoff = today - Duration::days(7);
    let recent: Vec<&SleepRecord> = records.iter().filter(|r| r.date >= cutoff).collect();
    if recent.is_empty() {
        return 0.0;
    }

    let total: f64 = recent.iter().map(|r| r.hours_slept).sum();
    round1(total / recent.len() as f64)
}

/// Mean hours across all records plus the share of nights rated good,
/// rounded to the nearest percent.
pub fn quality_overview(records: &[SleepRecord]) -> QualityOverview {
    if records.is_empty() {
        return QualityOverview {
            average_hours: 0.0,
            good_nights_pct: 0,
        };
    }

    let total: f64 = records.iter().map(|r| r.hours_slept).sum();
    let good = records
        .iter()
        .filter(|r| r.quality == SleepQuality::Good)
        .count();

    QualityOverview {
        average_hours: round1(total / records.len() as f64),
        good_nights_pct: ((good as f64 / records.len() as f64) * 100.0).round() as u32,
    }
}

pub fn build_stats(records: &[SleepRecord]) -> StatsResponse {
    build_stats_at(Local::now().date_naive(), records)
}

pub fn build_stats_at(today: NaiveDate, records: &[SleepRecord]) -> StatsResponse {
    let overview = quality_overview(records);
    StatsResponse {
        streak_days: streak_at(today, records),
        weekly_average_hours: weekly_average_at(today, records),
        average_hours: overview.average_hours,
        good_nights_pct: overview.good_nights_pct,
        total_records: records.len(),
    }
}

fn minutes_of_day(value: &str) -> Option<i64> {
    let time = NaiveTime::parse_from_str(value, "%H:%M").ok()?;
    Some(i64::from(time.hour()) * 60 + i64::from(time.minute()))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
