//! services/api/src/adapters/provider_llm.rs
//!
//! Chat-completion adapters for the three AI vendors. All of them expose an
//! OpenAI-compatible endpoint, so one adapter type serves every vendor with a
//! different `api_base` and model. It implements the `TextProvider` port from the
//! `core` crate.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use health_assistant_core::{
    messages,
    ports::{ProviderError, ProviderResult, TextProvider},
    Locale, ProviderId,
};
use std::sync::RwLock;
use tracing::{info, warn};

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEEPSEEK_API_BASE: &str = "https://api.deepseek.com/v1";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `TextProvider` against one OpenAI-compatible vendor.
///
/// The client is only present while a credential is configured; `configure` swaps it
/// in place so the registry can re-arm adapters without rebuilding them.
pub struct ChatProviderAdapter {
    id: ProviderId,
    api_base: String,
    model: String,
    client: RwLock<Option<Client<OpenAIConfig>>>,
}

impl ChatProviderAdapter {
    pub fn new(id: ProviderId, api_base: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            id,
            api_base: api_base.into(),
            model: model.into(),
            client: RwLock::new(None),
        }
    }

    pub fn openai(model: impl Into<String>) -> Self {
        Self::new(ProviderId::OpenAi, OPENAI_API_BASE, model)
    }

    pub fn gemini(model: impl Into<String>) -> Self {
        Self::new(ProviderId::Gemini, GEMINI_API_BASE, model)
    }

    pub fn deepseek(model: impl Into<String>) -> Self {
        Self::new(ProviderId::DeepSeek, DEEPSEEK_API_BASE, model)
    }

    fn current_client(&self) -> Option<Client<OpenAIConfig>> {
        self.client
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

//=========================================================================================
// Error Mapping
//=========================================================================================

/// Sorts a vendor API error into the provider failure taxonomy by its code and type.
pub fn classify_api_error(code: Option<&str>, kind: Option<&str>, message: &str) -> ProviderError {
    let matches = |needles: &[&str]| {
        [code, kind]
            .into_iter()
            .flatten()
            .any(|field| needles.iter().any(|n| field.eq_ignore_ascii_case(n)))
    };

    if matches(&["invalid_api_key", "authentication_error", "permission_denied", "unauthenticated"]) {
        ProviderError::Auth(message.to_string())
    } else if matches(&["rate_limit_exceeded", "insufficient_quota", "resource_exhausted", "tokens", "requests"]) {
        ProviderError::RateLimited(message.to_string())
    } else {
        ProviderError::Network(message.to_string())
    }
}

pub fn map_openai_error(error: OpenAIError) -> ProviderError {
    match error {
        OpenAIError::ApiError(api) => classify_api_error(api.code.as_deref(), api.r#type.as_deref(), &api.message),
        other => ProviderError::Network(other.to_string()),
    }
}

//=========================================================================================
// `TextProvider` Trait Implementation
//=========================================================================================

#[async_trait]
impl TextProvider for ChatProviderAdapter {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn configure(&self, credential: Option<&str>) {
        let client = credential.map(str::trim).filter(|key| !key.is_empty()).map(|key| {
            Client::with_config(
                OpenAIConfig::new()
                    .with_api_key(key)
                    .with_api_base(self.api_base.as_str()),
            )
        });
        let ready = client.is_some();
        *self.client.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = client;
        info!(provider = %self.id, ready, model = %self.model, "Provider adapter configured");
    }

    fn is_ready(&self) -> bool {
        self.client
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }

    /// Sends the locale's system prompt plus the user prompt and returns the first choice.
    async fn generate(&self, prompt: &str, locale: Locale) -> ProviderResult<String> {
        let client = self.current_client().ok_or(ProviderError::Unavailable)?;

        let build_failed = |e: OpenAIError| {
            warn!(provider = %self.id, error = %e, "Could not build chat request");
            ProviderError::Unavailable
        };

        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(messages::text("provider.system_prompt", locale))
                .build()
                .map_err(build_failed)?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(build_failed)?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .n(1)
            .build()
            .map_err(build_failed)?;

        let response = client.chat().create(request).await.map_err(map_openai_error)?;

        // An empty choice list or a choice without content counts as an empty reply.
        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_and_rate_limit_codes_are_recognized() {
        assert_eq!(
            classify_api_error(Some("invalid_api_key"), Some("invalid_request_error"), "bad key"),
            ProviderError::Auth("bad key".into())
        );
        assert_eq!(
            classify_api_error(None, Some("authentication_error"), "nope"),
            ProviderError::Auth("nope".into())
        );
        assert_eq!(
            classify_api_error(Some("rate_limit_exceeded"), Some("requests"), "slow down"),
            ProviderError::RateLimited("slow down".into())
        );
        assert_eq!(
            classify_api_error(Some("RESOURCE_EXHAUSTED"), None, "quota"),
            ProviderError::RateLimited("quota".into())
        );
    }

    #[test]
    fn unknown_api_errors_are_network_failures() {
        assert_eq!(
            classify_api_error(Some("server_error"), None, "overloaded"),
            ProviderError::Network("overloaded".into())
        );
        assert!(matches!(
            map_openai_error(OpenAIError::InvalidArgument("bad".into())),
            ProviderError::Network(_)
        ));
    }

    #[test]
    fn configure_arms_and_disarms() {
        let adapter = ChatProviderAdapter::deepseek("deepseek-chat");
        assert!(!adapter.is_ready());

        adapter.configure(Some("ds-key"));
        assert!(adapter.is_ready());

        adapter.configure(Some("   "));
        assert!(!adapter.is_ready());
    }

    #[tokio::test]
    async fn unconfigured_adapter_is_unavailable() {
        let adapter = ChatProviderAdapter::gemini("gemini-2.0-flash");
        assert_eq!(adapter.generate("hello", Locale::En).await, Err(ProviderError::Unavailable));
    }
}
