//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, the concrete implementation of the
//! `KeyValueStore` and `DoctorDirectory` ports from the `core` crate. It handles all
//! interactions with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use health_assistant_core::domain::Doctor;
use health_assistant_core::ports::{DoctorDirectory, KeyValueStore, PortError, PortResult};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the persistence and directory ports.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct KvRecord {
    value: String,
}

#[derive(FromRow)]
struct DoctorRecord {
    id: Uuid,
    name: String,
    specialty: String,
    experience_years: i32,
    rating: f32,
    fee: i32,
    availability: String,
    hospital: String,
}
impl DoctorRecord {
    fn to_domain(self) -> Doctor {
        Doctor {
            id: self.id,
            name: self.name,
            specialty: self.specialty,
            experience_years: self.experience_years.max(0) as u32,
            rating: self.rating,
            fee: self.fee.max(0) as u32,
            availability: self.availability,
            hospital: self.hospital,
        }
    }
}

//=========================================================================================
// `KeyValueStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl KeyValueStore for DbAdapter {
    /// Upserts the JSON value as text under `key`.
    async fn save(&self, key: &str, value: serde_json::Value) -> PortResult<()> {
        let text = serde_json::to_string(&value)?;
        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_at) VALUES ($1, $2, NOW()) \
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()",
        )
        .bind(key)
        .bind(text)
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }

    async fn load(&self, key: &str) -> PortResult<Option<serde_json::Value>> {
        let record = sqlx::query_as::<_, KvRecord>("SELECT value FROM kv_store WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        match record {
            Some(r) => Ok(Some(serde_json::from_str(&r.value)?)),
            None => Ok(None),
        }
    }

    /// Concatenates onto the stored array in one upsert; the row lock taken by
    /// `ON CONFLICT DO UPDATE` keeps concurrent appends from overwriting each other.
    async fn append(&self, key: &str, item: serde_json::Value) -> PortResult<()> {
        let text = serde_json::to_string(&serde_json::Value::Array(vec![item]))?;
        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_at) VALUES ($1, $2, NOW()) \
             ON CONFLICT (key) DO UPDATE \
             SET value = (kv_store.value::jsonb || EXCLUDED.value::jsonb)::text, updated_at = NOW()",
        )
        .bind(key)
        .bind(text)
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }
}

//=========================================================================================
// `DoctorDirectory` Trait Implementation
//=========================================================================================

#[async_trait]
impl DoctorDirectory for DbAdapter {
    async fn lookup_doctors(&self, specialty: &str) -> PortResult<Vec<Doctor>> {
        let records = sqlx::query_as::<_, DoctorRecord>(
            "SELECT id, name, specialty, experience_years, rating, fee, availability, hospital \
             FROM doctors WHERE specialty = $1 ORDER BY rating DESC, experience_years DESC",
        )
        .bind(specialty)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let doctors = records.into_iter().map(|r| r.to_domain()).collect();
        Ok(doctors)
    }
}
