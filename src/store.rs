use crate::models::{SleepRecord, UserProfile};
use crate::storage::{Storage, StorageError};
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::error;

pub const RECORDS_KEY: &str = "sleeptracker_records";
pub const PROFILE_KEY: &str = "sleeptracker_profile";

/// The record store: sole owner of the persisted entities. Reads fail
/// open (unavailable or corrupt data is logged and read as empty); writes
/// return an explicit result so callers can reconcile their state.
#[derive(Clone)]
pub struct SleepStore {
    backend: Arc<dyn Storage>,
}

impl SleepStore {
    pub fn new(backend: Arc<dyn Storage>) -> Self {
        Self { backend }
    }

    /// All stored records, unordered as stored. Callers sort.
    pub async fn records(&self) -> Vec<SleepRecord> {
        let text = match self.backend.get(RECORDS_KEY).await {
            Ok(Some(text)) => text,
            Ok(None) => return Vec::new(),
            Err(err) => {
                error!("failed to read sleep records: {err}");
                return Vec::new();
            }
        };

        match serde_json::from_str(&text) {
            Ok(records) => records,
            Err(err) => {
                error!("failed to parse sleep records: {err}");
                Vec::new()
            }
        }
    }

    /// Upsert by `date`: a record for an existing date replaces the stored
    /// one in place, otherwise the record is appended. The full list is
    /// persisted.
    pub async fn save_record(&self, record: SleepRecord) -> Result<(), StorageError> {
        let mut records = self.records().await;
        match records.iter_mut().find(|existing| existing.date == record.date) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }

        let payload = serde_json::to_string_pretty(&records)?;
        self.backend.set(RECORDS_KEY, &payload).await
    }

    pub async fn today_record(&self) -> Option<SleepRecord> {
        self.record_for(Local::now().date_naive()).await
    }

    pub async fn record_for(&self, date: NaiveDate) -> Option<SleepRecord> {
        self.records()
            .await
            .into_iter()
            .find(|record| record.date == date)
    }

    pub async fn profile(&self) -> Option<UserProfile> {
        let text = match self.backend.get(PROFILE_KEY).await {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(err) => {
                error!("failed to read profile: {err}");
                return None;
            }
        };

        match serde_json::from_str(&text) {
            Ok(profile) => Some(profile),
            Err(err) => {
                error!("failed to parse profile: {err}");
                None
            }
        }
    }

    /// Wholesale overwrite of the singleton profile.
    pub async fn save_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        let payload = serde_json::to_string_pretty(profile)?;
        self.backend.set(PROFILE_KEY, &payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SleepQuality;
    use crate::storage::MemoryStorage;
    use uuid::Uuid;

    fn record(date: &str, bed: &str, wake: &str, quality: SleepQuality, hours: f64) -> SleepRecord {
        SleepRecord {
            id: Uuid::new_v4(),
            date: date.parse().unwrap(),
            bed_time: bed.to_string(),
            wake_time: wake.to_string(),
            quality,
            hours_slept: hours,
        }
    }

    fn store() -> SleepStore {
        SleepStore::new(MemoryStorage::shared())
    }

    #[tokio::test]
    async fn fresh_storage_has_no_records_and_no_profile() {
        let store = store();
        assert!(store.records().await.is_empty());
        assert!(store.profile().await.is_none());
    }

    #[tokio::test]
    async fn saved_record_round_trips() {
        let store = store();
        let entry = record("2026-08-04", "23:00", "07:00", SleepQuality::Good, 8.0);
        store.save_record(entry.clone()).await.unwrap();

        let records = store.records().await;
        assert_eq!(records, vec![entry]);
    }

    #[tokio::test]
    async fn saving_same_date_twice_keeps_one_record_with_latest_values() {
        let store = store();
        store
            .save_record(record("2026-08-04", "22:00", "06:00", SleepQuality::Fair, 8.0))
            .await
            .unwrap();
        store
            .save_record(record("2026-08-04", "23:30", "07:00", SleepQuality::Good, 7.5))
            .await
            .unwrap();

        let records = store.records().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].bed_time, "23:30");
        assert_eq!(records[0].quality, SleepQuality::Good);
        assert_eq!(records[0].hours_slept, 7.5);
    }

    #[tokio::test]
    async fn upsert_replaces_in_place_and_keeps_order() {
        let store = store();
        store
            .save_record(record("2026-08-01", "23:00", "07:00", SleepQuality::Poor, 8.0))
            .await
            .unwrap();
        store
            .save_record(record("2026-08-02", "23:00", "07:00", SleepQuality::Fair, 8.0))
            .await
            .unwrap();
        store
            .save_record(record("2026-08-01", "22:00", "05:00", SleepQuality::Good, 7.0))
            .await
            .unwrap();

        let records = store.records().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date.to_string(), "2026-08-01");
        assert_eq!(records[0].quality, SleepQuality::Good);
        assert_eq!(records[1].date.to_string(), "2026-08-02");
    }

    #[tokio::test]
    async fn record_for_finds_matching_date_only() {
        let store = store();
        store
            .save_record(record("2026-08-03", "23:00", "07:00", SleepQuality::Good, 8.0))
            .await
            .unwrap();

        assert!(store.record_for("2026-08-03".parse().unwrap()).await.is_some());
        assert!(store.record_for("2026-08-04".parse().unwrap()).await.is_none());
    }

    #[tokio::test]
    async fn corrupt_records_payload_reads_as_empty() {
        let backend = MemoryStorage::shared();
        backend.set(RECORDS_KEY, "not json at all").await.unwrap();

        let store = SleepStore::new(backend);
        assert!(store.records().await.is_empty());
    }

    #[tokio::test]
    async fn corrupt_profile_reads_as_absent() {
        let backend = MemoryStorage::shared();
        backend.set(PROFILE_KEY, "{\"name\":").await.unwrap();

        let store = SleepStore::new(backend);
        assert!(store.profile().await.is_none());
    }

    #[tokio::test]
    async fn profile_round_trips_and_overwrites() {
        let store = store();
        let first = UserProfile {
            name: "Ana".to_string(),
            age: 29,
            goal: "Sleep more hours".to_string(),
        };
        store.save_profile(&first).await.unwrap();
        assert_eq!(store.profile().await, Some(first));

        let second = UserProfile {
            name: "Ana".to_string(),
            age: 30,
            goal: "Build a bedtime routine".to_string(),
        };
        store.save_profile(&second).await.unwrap();
        assert_eq!(store.profile().await, Some(second));
    }
}
