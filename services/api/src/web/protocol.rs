//! services/api/src/web/protocol.rs
//!
//! Defines the WebSocket message protocol between the browser client and the API server
//! for the chat assistant.

use health_assistant_core::{Locale, MedicationSchedule};
use serde::{Deserialize, Serialize};

//=========================================================================================
// Messages Sent FROM the Client (Browser) TO the Server
//=========================================================================================

/// Represents the structured text messages a client can send to the server.
#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// A chat message. Any answer still being prepared for an earlier `Ask` is abandoned.
    Ask {
        message: String,
        #[serde(default)]
        locale: Option<Locale>,
    },

    /// Abandons the answer in flight, if any.
    Cancel,
}

//=========================================================================================
// Messages Sent FROM the Server TO the Client (Browser)
//=========================================================================================

/// Represents the structured text messages the server can send to the client.
#[derive(Serialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// The reconciled answer to the latest `Ask`.
    Answer { text: String, consensus: bool },

    /// A medication reminder was recognized in the message and saved.
    ReminderScheduled { schedule: MedicationSchedule },

    /// The in-flight request was abandoned; no answer will follow for it.
    Cancelled,

    /// Reports an error to the client, which should display an error message.
    Error { message: String },
}
