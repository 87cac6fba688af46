//! services/api/src/web/ws_handler.rs
//!
//! This is the main entry point and control loop for a WebSocket chat connection.
//! Each `ask` runs in its own task; a newer `ask`, a `cancel` or a disconnect cancels
//! the one in flight so its late result is never delivered.

use crate::web::{
    chat_task::{chat_process, ChatOutcome},
    protocol::{ClientMessage, ServerMessage},
    state::{AppState, ChatSession},
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
    Extension,
};
use futures::{
    stream::{SplitSink, StreamExt},
    Sink, SinkExt,
};
use health_assistant_core::Locale;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use uuid::Uuid;

type WsSender = Arc<Mutex<SplitSink<WebSocket, Message>>>;

/// The handler for upgrading HTTP requests to WebSocket connections.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, app_state, user_id))
}

async fn handle_socket(socket: WebSocket, app_state: Arc<AppState>, user_id: Uuid) {
    info!("New WebSocket connection established for user: {}", user_id);

    let (sender, mut receiver) = socket.split();
    let ws_sender: WsSender = Arc::new(Mutex::new(sender));
    let mut session = ChatSession::new(user_id);

    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(ClientMessage::Ask { message, locale }) => {
                    let token = session.begin_request();
                    let locale = app_state.locale_or_default(locale);
                    tokio::spawn(answer_task(
                        app_state.clone(),
                        ws_sender.clone(),
                        session.user_id,
                        message,
                        locale,
                        token,
                    ));
                }
                Ok(ClientMessage::Cancel) => {
                    if !session.cancel_in_flight() {
                        info!("Cancel received with nothing in flight.");
                    }
                }
                Err(e) => {
                    warn!("Failed to deserialize client message: {}", e);
                    send(&ws_sender, &ServerMessage::Error {
                        message: "Unrecognized message.".to_string(),
                    })
                    .await;
                }
            },
            Ok(Message::Close(_)) => {
                info!("Client sent close message.");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                warn!("WebSocket receive error: {}", e);
                break;
            }
        }
    }

    // --- Cleanup ---
    session.cancel_in_flight();
    info!("WebSocket connection closed for user: {}", user_id);
}

/// Runs one chat request and reports its outcome. A saved reminder is always
/// reported; the answer is dropped when the request was superseded meanwhile.
async fn answer_task<S>(
    app_state: Arc<AppState>,
    ws_sender: Arc<Mutex<S>>,
    user_id: Uuid,
    message: String,
    locale: Locale,
    token: CancellationToken,
) where
    S: Sink<Message> + Unpin,
{
    let outcome = chat_process(&app_state, user_id, &message, locale, &token).await;
    let schedule = match &outcome {
        ChatOutcome::Answered { schedule, .. } | ChatOutcome::Cancelled { schedule } => schedule.clone(),
    };
    if let Some(schedule) = schedule {
        send(&ws_sender, &ServerMessage::ReminderScheduled { schedule }).await;
    }

    match outcome {
        ChatOutcome::Answered { .. } if token.is_cancelled() => {
            info!("Discarding answer for a cancelled request.");
        }
        ChatOutcome::Answered { answer, .. } => {
            send(&ws_sender, &ServerMessage::Answer {
                text: answer.text,
                consensus: answer.consensus,
            })
            .await;
        }
        ChatOutcome::Cancelled { .. } => {
            send(&ws_sender, &ServerMessage::Cancelled).await;
        }
    }
}

async fn send<S>(ws_sender: &Arc<Mutex<S>>, message: &ServerMessage) -> bool
where
    S: Sink<Message> + Unpin,
{
    let json = match serde_json::to_string(message) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize server message: {}", e);
            return false;
        }
    };
    if ws_sender.lock().await.send(Message::Text(json.into())).await.is_err() {
        warn!("Failed to send message; client likely disconnected.");
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::chat_task::tests::{offline_state, stalled_state};
    use futures::channel::mpsc;

    /// Drives one `answer_task` to completion and returns the `type` of every frame sent.
    async fn frames(state: AppState, message: &str, token: CancellationToken) -> Vec<String> {
        let (tx, rx) = mpsc::unbounded::<Message>();
        answer_task(
            Arc::new(state),
            Arc::new(Mutex::new(tx)),
            Uuid::new_v4(),
            message.to_string(),
            Locale::En,
            token,
        )
        .await;

        rx.filter_map(|frame| async move {
            match frame {
                Message::Text(text) => serde_json::from_str::<serde_json::Value>(text.as_str())
                    .ok()
                    .and_then(|v| v["type"].as_str().map(str::to_string)),
                _ => None,
            }
        })
        .collect()
        .await
    }

    #[tokio::test]
    async fn live_request_gets_reminder_then_answer() {
        let sent = frames(offline_state(), "remind me to take Napa 500mg", CancellationToken::new()).await;
        assert_eq!(sent, vec!["reminder_scheduled", "answer"]);
    }

    #[tokio::test]
    async fn late_answer_for_a_cancelled_request_is_dropped() {
        let token = CancellationToken::new();
        token.cancel();
        let sent = frames(offline_state(), "What helps with a cold?", token).await;
        assert!(sent.is_empty());
    }

    #[tokio::test]
    async fn superseded_request_still_reports_its_reminder() {
        let token = CancellationToken::new();
        token.cancel();
        let sent = frames(offline_state(), "remind me to take Napa 500mg", token).await;
        assert_eq!(sent, vec!["reminder_scheduled"]);
    }

    #[tokio::test]
    async fn cancelled_aggregation_reports_cancelled() {
        let token = CancellationToken::new();
        token.cancel();
        let sent = frames(stalled_state(), "remind me to take Napa 500mg", token).await;
        assert_eq!(sent, vec!["reminder_scheduled", "cancelled"]);
    }
}
