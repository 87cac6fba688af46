//! crates/health_assistant_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific AI vendors, databases or directories.

use crate::domain::{Doctor, Locale, ProviderId};
use async_trait::async_trait;
use std::time::Duration;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for persistence and directory operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Stored value could not be (de)serialized: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

/// Failures of a single AI backend call. These never leave the aggregator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("credential rejected: {0}")]
    Auth(String),
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("network failure: {0}")]
    Network(String),
    #[error("provider is not configured")]
    Unavailable,
    #[error("no reply within {0:?}")]
    Timeout(Duration),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// A uniform wrapper around one AI text-generation backend.
///
/// Adapters start unready and become ready once `configure` receives a non-blank
/// credential. `generate` on an unready adapter fails with `ProviderError::Unavailable`.
#[async_trait]
pub trait TextProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Arms (or disarms, with `None` / a blank string) the adapter.
    fn configure(&self, credential: Option<&str>);

    fn is_ready(&self) -> bool;

    /// Sends one prompt to the backend and returns its plain-text reply.
    async fn generate(&self, prompt: &str, locale: Locale) -> ProviderResult<String>;
}

/// Read-only doctor lookup owned by the directory collaborator.
#[async_trait]
pub trait DoctorDirectory: Send + Sync {
    async fn lookup_doctors(&self, specialty: &str) -> PortResult<Vec<Doctor>>;
}

/// Opaque key-value persistence for schedules and symptom history.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn save(&self, key: &str, value: serde_json::Value) -> PortResult<()>;
    async fn load(&self, key: &str) -> PortResult<Option<serde_json::Value>>;

    /// Appends `item` to the JSON array under `key`, creating the array when absent.
    /// Must be atomic: concurrent appends to one key all survive.
    async fn append(&self, key: &str, item: serde_json::Value) -> PortResult<()>;
}
