//! crates/health_assistant_core/src/aggregator.rs
//!
//! Fans one chat prompt out to every ready provider and reconciles the replies into
//! a single answer.
//!
//! Every call is independent: a failure, timeout or empty reply from one provider is
//! logged and dropped, never propagated. Zero successes still produce a localized
//! fallback text.

use crate::domain::{AggregatedAnswer, Locale, ProviderResponse};
use crate::messages;
use crate::ports::{ProviderError, TextProvider};
use crate::registry::ProviderRegistry;
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(20);

/// Keyword overlap above which replies are treated as agreeing.
pub const CONSENSUS_THRESHOLD: f64 = 0.5;

/// Text length at which the length component of confidence saturates.
const LENGTH_SATURATION_CHARS: f64 = 600.0;
const LENGTH_WEIGHT: f64 = 0.5;
const KEYWORD_BONUS: f64 = 0.08;

/// Bilingual domain lexicon used for confidence and consensus.
const DOMAIN_KEYWORDS: &[&str] = &[
    "doctor", "symptom", "treatment", "medicine", "diagnosis", "pain", "fever", "blood", "test", "infection",
    "hospital", "rest", "ডাক্তার", "লক্ষণ", "চিকিৎসা", "ওষুধ", "রোগ", "ব্যথা", "জ্বর", "রক্ত", "পরীক্ষা",
    "সংক্রমণ", "হাসপাতাল", "বিশ্রাম",
];

//=========================================================================================
// Scoring
//=========================================================================================

/// Lexicon keywords present in `text` (case-insensitive substring match).
pub fn keyword_set(text: &str) -> HashSet<&'static str> {
    let lowered = text.to_lowercase();
    DOMAIN_KEYWORDS
        .iter()
        .copied()
        .filter(|k| lowered.contains(k))
        .collect()
}

/// `|a ∩ b| / max(|a|, |b|)`; two empty sets have zero overlap.
pub fn keyword_overlap(a: &HashSet<&'static str>, b: &HashSet<&'static str>) -> f64 {
    let larger = a.len().max(b.len());
    if larger == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / larger as f64
}

/// Heuristic reply score in `[0, 1]`: capped length term plus a per-keyword bonus.
pub fn confidence_score(text: &str) -> f64 {
    let length = (text.chars().count() as f64 / LENGTH_SATURATION_CHARS).min(1.0);
    let bonus = keyword_set(text).len() as f64 * KEYWORD_BONUS;
    (length * LENGTH_WEIGHT + bonus).min(1.0)
}

//=========================================================================================
// Reconciliation
//=========================================================================================

/// Turns the settled replies (in registration order) into the final answer.
pub fn reconcile(mut responses: Vec<ProviderResponse>, locale: Locale) -> AggregatedAnswer {
    // Stable: equal confidences keep registration order.
    responses.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    match responses.as_slice() {
        [] => AggregatedAnswer {
            text: messages::text("chat.fallback", locale).to_string(),
            consensus: false,
        },
        [only] => AggregatedAnswer {
            text: format!("{}\n\n{}", messages::text("chat.advisory_label", locale), only.text),
            consensus: false,
        },
        [best, ..] => {
            if replies_agree(&responses) {
                AggregatedAnswer {
                    text: format!("{}\n\n{}", messages::text("chat.consensus_label", locale), best.text),
                    consensus: true,
                }
            } else {
                AggregatedAnswer {
                    text: format_disagreement(&responses, locale),
                    consensus: false,
                }
            }
        }
    }
}

/// Every pair of replies must overlap above the threshold.
fn replies_agree(responses: &[ProviderResponse]) -> bool {
    let sets: Vec<_> = responses.iter().map(|r| keyword_set(&r.text)).collect();
    sets.iter().enumerate().all(|(i, a)| {
        sets[i + 1..]
            .iter()
            .all(|b| keyword_overlap(a, b) > CONSENSUS_THRESHOLD)
    })
}

fn format_disagreement(responses: &[ProviderResponse], locale: Locale) -> String {
    let mut sections: Vec<String> = responses
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let label = messages::text("chat.opinion_label", locale)
                .replace("{rank}", &(i + 1).to_string())
                .replace("{confidence}", &format!("{:.0}", r.confidence * 100.0));
            format!("{}\n{}", label, r.text)
        })
        .collect();
    sections.push(messages::text("chat.consult_professional", locale).to_string());
    sections.join("\n\n")
}

//=========================================================================================
// The Aggregator
//=========================================================================================

pub struct ResponseAggregator {
    registry: Arc<ProviderRegistry>,
    timeout: Duration,
}

impl ResponseAggregator {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self {
            registry,
            timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn registry(&self) -> &Arc<ProviderRegistry> {
        &self.registry
    }

    /// Queries every ready provider concurrently and waits for all of them to settle.
    ///
    /// Returns `None` only when `cancel` fires first; the in-flight calls are dropped
    /// and their results discarded.
    pub async fn aggregate(&self, prompt: &str, locale: Locale, cancel: &CancellationToken) -> Option<AggregatedAnswer> {
        let providers = self.registry.available();
        if providers.is_empty() {
            info!("No provider is ready; returning the fallback answer.");
            return Some(reconcile(Vec::new(), locale));
        }

        let started = Instant::now();
        let calls = providers
            .iter()
            .map(|provider| self.call_provider(provider.as_ref(), prompt, locale));

        let settled = tokio::select! {
            _ = cancel.cancelled() => {
                info!("Aggregation cancelled; discarding in-flight replies.");
                return None;
            }
            settled = join_all(calls) => settled,
        };

        let responses: Vec<ProviderResponse> = settled.into_iter().flatten().collect();
        info!(
            asked = providers.len(),
            answered = responses.len(),
            elapsed = ?started.elapsed(),
            "Aggregation settled"
        );
        Some(reconcile(responses, locale))
    }

    async fn call_provider(&self, provider: &dyn TextProvider, prompt: &str, locale: Locale) -> Option<ProviderResponse> {
        let id = provider.id();
        let started = Instant::now();

        let outcome = match tokio::time::timeout(self.timeout, provider.generate(prompt, locale)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(self.timeout)),
        };

        match outcome {
            Ok(text) if !text.trim().is_empty() => {
                let confidence = confidence_score(&text);
                debug!(provider = %id, confidence, elapsed = ?started.elapsed(), "Provider replied");
                Some(ProviderResponse {
                    provider_id: id,
                    text: text.trim().to_string(),
                    confidence,
                })
            }
            Ok(_) => {
                warn!(provider = %id, "Provider returned an empty reply");
                None
            }
            Err(e) => {
                warn!(provider = %id, error = %e, elapsed = ?started.elapsed(), "Provider call failed");
                None
            }
        }
    }
}
