//! crates/health_assistant_core/src/history.rs
//!
//! Per-user lists kept in the key-value store as JSON arrays: medication schedules
//! and symptom-assessment history.

use crate::domain::{AssessmentRecord, MedicationSchedule};
use crate::ports::{KeyValueStore, PortResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

pub fn schedules_key(user_id: Uuid) -> String {
    format!("medication_schedules:{}", user_id)
}

pub fn history_key(user_id: Uuid) -> String {
    format!("symptom_history:{}", user_id)
}

async fn load_list<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> PortResult<Vec<T>> {
    match store.load(key).await? {
        Some(value) => Ok(serde_json::from_value(value)?),
        None => Ok(Vec::new()),
    }
}

async fn append<T: Serialize>(store: &dyn KeyValueStore, key: &str, item: T) -> PortResult<()> {
    store.append(key, serde_json::to_value(&item)?).await
}

pub async fn save_schedule(store: &dyn KeyValueStore, schedule: MedicationSchedule) -> PortResult<()> {
    let key = schedules_key(schedule.user_id);
    append(store, &key, schedule).await
}

pub async fn load_schedules(store: &dyn KeyValueStore, user_id: Uuid) -> PortResult<Vec<MedicationSchedule>> {
    load_list(store, &schedules_key(user_id)).await
}

pub async fn save_assessment(store: &dyn KeyValueStore, record: AssessmentRecord) -> PortResult<()> {
    let key = history_key(record.user_id);
    append(store, &key, record).await
}

pub async fn load_history(store: &dyn KeyValueStore, user_id: Uuid) -> PortResult<Vec<AssessmentRecord>> {
    load_list(store, &history_key(user_id)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FrequencyCode, MedicationInfo};
    use crate::ports::PortError;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::time::Duration;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        values: Mutex<HashMap<String, serde_json::Value>>,
    }

    #[async_trait]
    impl KeyValueStore for MemoryStore {
        async fn save(&self, key: &str, value: serde_json::Value) -> PortResult<()> {
            self.values.lock().await.insert(key.to_string(), value);
            Ok(())
        }

        async fn load(&self, key: &str) -> PortResult<Option<serde_json::Value>> {
            Ok(self.values.lock().await.get(key).cloned())
        }

        async fn append(&self, key: &str, item: serde_json::Value) -> PortResult<()> {
            let mut values = self.values.lock().await;
            match values.entry(key.to_string()).or_insert_with(|| serde_json::json!([])) {
                serde_json::Value::Array(items) => {
                    items.push(item);
                    Ok(())
                }
                _ => Err(PortError::Unexpected(format!("'{}' does not hold a list", key))),
            }
        }
    }

    /// Reads are slow; appends are serialized by the store, the way a row lock would.
    #[derive(Default)]
    struct SlowStore {
        inner: MemoryStore,
        writes: Mutex<()>,
    }

    #[async_trait]
    impl KeyValueStore for SlowStore {
        async fn save(&self, key: &str, value: serde_json::Value) -> PortResult<()> {
            self.inner.save(key, value).await
        }

        async fn load(&self, key: &str) -> PortResult<Option<serde_json::Value>> {
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.inner.load(key).await
        }

        async fn append(&self, key: &str, item: serde_json::Value) -> PortResult<()> {
            let _guard = self.writes.lock().await;
            let mut items = match self.load(key).await? {
                Some(serde_json::Value::Array(items)) => items,
                _ => Vec::new(),
            };
            items.push(item);
            self.save(key, serde_json::Value::Array(items)).await
        }
    }

    fn napa(user_id: Uuid) -> MedicationSchedule {
        schedule_for(user_id, "Napa")
    }

    fn schedule_for(user_id: Uuid, name: &str) -> MedicationSchedule {
        MedicationSchedule::build(
            user_id,
            MedicationInfo {
                name: name.into(),
                strength: Some("500mg".into()),
                frequency_code: FrequencyCode::BD,
                dose_times_per_day: 2,
                duration_days: 3,
                instructions: None,
                start_time: Utc::now(),
            },
        )
    }

    #[tokio::test]
    async fn schedules_append_per_user() {
        let store = MemoryStore::default();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        save_schedule(&store, napa(alice)).await.unwrap();
        save_schedule(&store, napa(alice)).await.unwrap();
        save_schedule(&store, napa(bob)).await.unwrap();

        assert_eq!(load_schedules(&store, alice).await.unwrap().len(), 2);
        assert_eq!(load_schedules(&store, bob).await.unwrap().len(), 1);
        assert!(load_history(&store, alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn concurrent_saves_for_one_user_are_all_kept() {
        let store = SlowStore::default();
        let user = Uuid::new_v4();

        let (first, second) = tokio::join!(
            save_schedule(&store, schedule_for(user, "Napa")),
            save_schedule(&store, schedule_for(user, "Seclo")),
        );
        first.unwrap();
        second.unwrap();

        let mut names: Vec<String> = load_schedules(&store, user)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.medication.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["Napa", "Seclo"]);
    }

    #[tokio::test]
    async fn corrupt_value_is_a_serialization_error() {
        let store = MemoryStore::default();
        let user = Uuid::new_v4();
        store
            .save(&schedules_key(user), serde_json::json!({"not": "a list"}))
            .await
            .unwrap();

        let err = load_schedules(&store, user).await.unwrap_err();
        assert!(matches!(err, PortError::Serialization(_)));
    }

    #[test]
    fn keys_are_namespaced() {
        let id = Uuid::nil();
        assert_eq!(schedules_key(id), "medication_schedules:00000000-0000-0000-0000-000000000000");
        assert_eq!(history_key(id), "symptom_history:00000000-0000-0000-0000-000000000000");
    }
}
