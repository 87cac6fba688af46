//! crates/health_assistant_core/src/registry.rs
//!
//! Holds the provider adapters for the process. The set of adapters is fixed at
//! startup; which of them are ready changes only through `reconfigure`.

use crate::domain::{ProviderId, ProviderStatus};
use crate::ports::TextProvider;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Credentials for a configuration pass. A missing or blank entry disarms that provider.
#[derive(Clone, Default)]
pub struct ProviderCredentials {
    keys: HashMap<ProviderId, String>,
}

impl ProviderCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: ProviderId, credential: Option<String>) -> Self {
        if let Some(key) = credential {
            self.keys.insert(id, key);
        }
        self
    }

    pub fn get(&self, id: ProviderId) -> Option<&str> {
        self.keys.get(&id).map(String::as_str)
    }
}

impl std::fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<_> = self.keys.keys().collect();
        ids.sort();
        f.debug_struct("ProviderCredentials").field("present", &ids).finish()
    }
}

#[derive(Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn TextProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an adapter. Registration order is the aggregator's tie-break order.
    pub fn register(&mut self, provider: Arc<dyn TextProvider>) {
        self.providers.push(provider);
    }

    /// Re-arms every registered adapter from a fresh set of credentials.
    pub fn reconfigure(&self, credentials: &ProviderCredentials) {
        for provider in &self.providers {
            provider.configure(credentials.get(provider.id()));
        }
        info!(
            ready = self.providers.iter().filter(|p| p.is_ready()).count(),
            registered = self.providers.len(),
            "Provider registry reconfigured"
        );
    }

    /// Ready adapters, in registration order.
    pub fn available(&self) -> Vec<Arc<dyn TextProvider>> {
        self.providers.iter().filter(|p| p.is_ready()).cloned().collect()
    }

    pub fn has_available(&self) -> bool {
        self.providers.iter().any(|p| p.is_ready())
    }

    pub fn statuses(&self) -> Vec<ProviderStatus> {
        self.providers
            .iter()
            .map(|p| ProviderStatus {
                id: p.id(),
                name: p.id().display_name(),
                ready: p.is_ready(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Locale;
    use crate::ports::{ProviderError, ProviderResult};
    use async_trait::async_trait;
    use std::sync::RwLock;

    struct KeyedProvider {
        id: ProviderId,
        key: RwLock<Option<String>>,
    }

    impl KeyedProvider {
        fn new(id: ProviderId) -> Arc<Self> {
            Arc::new(Self { id, key: RwLock::new(None) })
        }
    }

    #[async_trait]
    impl TextProvider for KeyedProvider {
        fn id(&self) -> ProviderId {
            self.id
        }

        fn configure(&self, credential: Option<&str>) {
            *self.key.write().unwrap() = credential
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string);
        }

        fn is_ready(&self) -> bool {
            self.key.read().unwrap().is_some()
        }

        async fn generate(&self, _prompt: &str, _locale: Locale) -> ProviderResult<String> {
            Err(ProviderError::Unavailable)
        }
    }

    #[test]
    fn only_providers_with_credentials_are_available() {
        let mut registry = ProviderRegistry::new();
        registry.register(KeyedProvider::new(ProviderId::OpenAi));
        registry.register(KeyedProvider::new(ProviderId::Gemini));
        registry.register(KeyedProvider::new(ProviderId::DeepSeek));
        assert!(!registry.has_available());

        let credentials = ProviderCredentials::new()
            .with(ProviderId::OpenAi, Some("sk-test".into()))
            .with(ProviderId::Gemini, Some("   ".into()))
            .with(ProviderId::DeepSeek, Some("ds-key".into()));
        registry.reconfigure(&credentials);

        let ids: Vec<_> = registry.available().iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![ProviderId::OpenAi, ProviderId::DeepSeek]);
    }

    #[test]
    fn reconfigure_can_disarm() {
        let mut registry = ProviderRegistry::new();
        registry.register(KeyedProvider::new(ProviderId::OpenAi));
        registry.reconfigure(&ProviderCredentials::new().with(ProviderId::OpenAi, Some("k".into())));
        assert!(registry.has_available());

        registry.reconfigure(&ProviderCredentials::new());
        assert!(!registry.has_available());
        assert!(!registry.statuses()[0].ready);
    }

    #[test]
    fn debug_output_hides_keys() {
        let credentials = ProviderCredentials::new().with(ProviderId::OpenAi, Some("sk-secret".into()));
        assert!(!format!("{:?}", credentials).contains("sk-secret"));
    }
}
