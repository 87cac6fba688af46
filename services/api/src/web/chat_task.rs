//! services/api/src/web/chat_task.rs
//!
//! This module contains the asynchronous "worker" function responsible for
//! handling a single chat message, shared by the REST and WebSocket surfaces.

use crate::web::state::AppState;
use chrono::Utc;
use health_assistant_core::{history, parse_medication_intent, AggregatedAnswer, Locale, MedicationSchedule};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use uuid::Uuid;

/// Represents the outcome of the `chat_process` task.
#[derive(Debug)]
pub enum ChatOutcome {
    Answered {
        answer: AggregatedAnswer,
        /// Present when the message asked for a reminder and it was saved.
        schedule: Option<MedicationSchedule>,
    },
    /// The token fired before the providers settled. A reminder saved before that
    /// point is still reported.
    Cancelled { schedule: Option<MedicationSchedule> },
}

/// Runs the medication parser, saves any schedule, then asks the providers.
pub async fn chat_process(
    app_state: &AppState,
    user_id: Uuid,
    message: &str,
    locale: Locale,
    cancel: &CancellationToken,
) -> ChatOutcome {
    let start_time = Instant::now();

    let schedule = match parse_medication_intent(message, locale, Utc::now()) {
        Some(info) => {
            info!(%user_id, medication = %info.name, frequency = ?info.frequency_code, "Medication reminder recognized");
            let schedule = MedicationSchedule::build(user_id, info);
            match history::save_schedule(app_state.store.as_ref(), schedule.clone()).await {
                Ok(()) => Some(schedule),
                Err(e) => {
                    error!(%user_id, "Failed to save medication schedule: {:?}", e);
                    None
                }
            }
        }
        None => None,
    };

    let Some(answer) = app_state.aggregator.aggregate(message, locale, cancel).await else {
        info!(%user_id, "Chat request cancelled after {:?}", start_time.elapsed());
        return ChatOutcome::Cancelled { schedule };
    };

    info!(%user_id, consensus = answer.consensus, "⏱️ Chat answered in {:?}", start_time.elapsed());
    ChatOutcome::Answered { answer, schedule }
}
