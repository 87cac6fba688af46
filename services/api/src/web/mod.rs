pub mod chat_task;
pub mod middleware;
pub mod protocol;
pub mod rest;
pub mod state;
pub mod ws_handler;

// Re-export the handlers the binary wires into the router.
pub use middleware::require_user;
pub use rest::{
    assessment_history_handler, assessment_questions_handler, chat_handler, create_assessment_handler,
    list_providers_handler, list_schedules_handler, list_symptoms_handler,
};
pub use ws_handler::ws_handler;
