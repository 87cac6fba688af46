//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::chat_task::{chat_process, ChatOutcome};
use crate::web::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use health_assistant_core::catalog::CATALOG_VERSION;
use health_assistant_core::domain::{
    AssessmentRecord, BodyPart, DetailedQuestion, MedicationSchedule, QuestionResponse, Severity, SymptomCategory,
};
use health_assistant_core::{
    assess_with_doctors, generate_questions, history, Locale, QuestionnaireResponses, SymptomCatalog,
    SymptomDuration, SymptomSelection,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::error;
use utoipa::{IntoParams, OpenApi, ToSchema};
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        list_symptoms_handler,
        assessment_questions_handler,
        create_assessment_handler,
        assessment_history_handler,
        chat_handler,
        list_schedules_handler,
        list_providers_handler,
    ),
    components(
        schemas(
            SymptomCatalogResponse, BodyPartGroup, SymptomEntry, QuestionsRequest, QuestionsResponse,
            SymptomInput, AssessmentRequest, ChatRequest, ChatResponse, ProviderStatusEntry
        )
    ),
    tags(
        (name = "Health Assistant API", description = "Symptom assessment, AI chat and medication reminders.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LocaleQuery {
    /// `bn` or `en`; defaults to the server's configured locale.
    #[param(value_type = Option<String>)]
    pub locale: Option<Locale>,
}

#[derive(Serialize, ToSchema)]
pub struct SymptomEntry {
    id: &'static str,
    name: &'static str,
    #[schema(value_type = String)]
    category: SymptomCategory,
    #[schema(value_type = String)]
    severity: Severity,
}

#[derive(Serialize, ToSchema)]
pub struct BodyPartGroup {
    #[schema(value_type = String)]
    body_part: BodyPart,
    symptoms: Vec<SymptomEntry>,
}

/// The symptom catalog grouped by body part.
#[derive(Serialize, ToSchema)]
pub struct SymptomCatalogResponse {
    version: u32,
    groups: Vec<BodyPartGroup>,
}

#[derive(Deserialize, ToSchema)]
pub struct QuestionsRequest {
    symptom_ids: Vec<String>,
    #[schema(value_type = Option<String>)]
    #[serde(default)]
    locale: Option<Locale>,
}

#[derive(Serialize, ToSchema)]
pub struct QuestionsResponse {
    #[schema(value_type = Vec<Object>)]
    questions: Vec<DetailedQuestion>,
}

#[derive(Deserialize, ToSchema)]
pub struct SymptomInput {
    id: String,
    #[schema(value_type = String, example = "one_to_three_days")]
    duration: SymptomDuration,
    /// 1 to 10.
    intensity: u8,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct AssessmentRequest {
    symptoms: Vec<SymptomInput>,
    #[schema(value_type = Vec<Object>)]
    #[serde(default)]
    responses: Vec<QuestionResponse>,
    #[schema(value_type = Option<String>)]
    #[serde(default)]
    locale: Option<Locale>,
}

#[derive(Deserialize, ToSchema)]
pub struct ChatRequest {
    message: String,
    #[schema(value_type = Option<String>)]
    #[serde(default)]
    locale: Option<Locale>,
}

#[derive(Serialize, ToSchema)]
pub struct ChatResponse {
    answer: String,
    consensus: bool,
    #[schema(value_type = Option<Object>)]
    schedule: Option<MedicationSchedule>,
}

#[derive(Serialize, ToSchema)]
pub struct ProviderStatusEntry {
    id: String,
    name: &'static str,
    ready: bool,
}

type HandlerError = (StatusCode, String);

fn internal(context: &str, e: impl std::fmt::Debug) -> HandlerError {
    error!("{}: {:?}", context, e);
    (StatusCode::INTERNAL_SERVER_ERROR, context.to_string())
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// List the symptom catalog grouped by body part.
#[utoipa::path(
    get,
    path = "/symptoms",
    params(LocaleQuery),
    responses((status = 200, description = "The localized symptom catalog", body = SymptomCatalogResponse))
)]
pub async fn list_symptoms_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<LocaleQuery>,
) -> Json<SymptomCatalogResponse> {
    let locale = app_state.locale_or_default(query.locale);
    let groups = BodyPart::ALL
        .into_iter()
        .map(|body_part| BodyPartGroup {
            body_part,
            symptoms: SymptomCatalog::by_body_part(body_part)
                .map(|s| SymptomEntry {
                    id: s.id,
                    name: s.display_name(locale),
                    category: s.category,
                    severity: s.severity,
                })
                .collect(),
        })
        .collect();

    Json(SymptomCatalogResponse {
        version: CATALOG_VERSION,
        groups,
    })
}

/// Generate the follow-up questionnaire for a set of selected symptoms.
#[utoipa::path(
    post,
    path = "/assessment/questions",
    request_body = QuestionsRequest,
    responses(
        (status = 200, description = "Ordered follow-up questions", body = QuestionsResponse),
        (status = 400, description = "Unknown symptom id")
    )
)]
pub async fn assessment_questions_handler(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<QuestionsRequest>,
) -> Result<Json<QuestionsResponse>, HandlerError> {
    if let Some(unknown) = req.symptom_ids.iter().find(|id| SymptomCatalog::get(id).is_none()) {
        return Err((StatusCode::BAD_REQUEST, format!("Unknown symptom id '{}'", unknown)));
    }
    let locale = app_state.locale_or_default(req.locale);
    let questions = generate_questions(req.symptom_ids.iter().map(String::as_str), locale);
    Ok(Json(QuestionsResponse { questions }))
}

/// Run the assessment for the finalized symptoms and answers, and save it to history.
#[utoipa::path(
    post,
    path = "/assessment",
    request_body = AssessmentRequest,
    responses(
        (status = 201, description = "Assessment report with doctors", body = serde_json::Value),
        (status = 400, description = "Invalid symptom, intensity or missing required answers"),
        (status = 500, description = "Internal server error")
    ),
    params(("x-user-id" = Uuid, Header, description = "The unique ID of the user."))
)]
pub async fn create_assessment_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Json(req): Json<AssessmentRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let locale = app_state.locale_or_default(req.locale);

    let mut selection = SymptomSelection::new();
    for input in req.symptoms {
        selection
            .select(&input.id, input.duration, input.intensity, input.notes, locale)
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    }
    if selection.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "At least one symptom is required".to_string()));
    }

    let responses: QuestionnaireResponses = req.responses.into_iter().collect();
    let questions = generate_questions(selection.ids(), locale);
    let missing: Vec<&str> = responses.missing_required(&questions).iter().map(|q| q.id).collect();
    if !missing.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Missing answers for required questions: {}", missing.join(", ")),
        ));
    }

    let record: AssessmentRecord = assess_with_doctors(
        user_id,
        selection.into_symptoms(),
        &responses,
        locale,
        app_state.directory.as_ref(),
    )
    .await;

    history::save_assessment(app_state.store.as_ref(), record.clone())
        .await
        .map_err(|e| internal("Failed to save assessment", e))?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// List the user's saved assessments, oldest first.
#[utoipa::path(
    get,
    path = "/assessment/history",
    responses(
        (status = 200, description = "Symptom history", body = Vec<serde_json::Value>),
        (status = 500, description = "Internal server error")
    ),
    params(("x-user-id" = Uuid, Header, description = "The unique ID of the user."))
)]
pub async fn assessment_history_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
) -> Result<Json<Vec<AssessmentRecord>>, HandlerError> {
    history::load_history(app_state.store.as_ref(), user_id)
        .await
        .map(Json)
        .map_err(|e| internal("Failed to load symptom history", e))
}

/// Ask the AI providers a question. Reminder requests are parsed and saved first.
#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatRequest,
    responses((status = 200, description = "The reconciled answer", body = ChatResponse)),
    params(("x-user-id" = Uuid, Header, description = "The unique ID of the user."))
)]
pub async fn chat_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, HandlerError> {
    let locale = app_state.locale_or_default(req.locale);
    // Dropping the request future (client gone) drops the provider calls with it.
    let cancel = CancellationToken::new();

    match chat_process(&app_state, user_id, &req.message, locale, &cancel).await {
        ChatOutcome::Answered { answer, schedule } => Ok(Json(ChatResponse {
            answer: answer.text,
            consensus: answer.consensus,
            schedule,
        })),
        ChatOutcome::Cancelled { .. } => Err((StatusCode::SERVICE_UNAVAILABLE, "Request cancelled".to_string())),
    }
}

/// List the user's saved medication schedules.
#[utoipa::path(
    get,
    path = "/medications/schedules",
    responses(
        (status = 200, description = "Medication schedules", body = Vec<serde_json::Value>),
        (status = 500, description = "Internal server error")
    ),
    params(("x-user-id" = Uuid, Header, description = "The unique ID of the user."))
)]
pub async fn list_schedules_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
) -> Result<Json<Vec<MedicationSchedule>>, HandlerError> {
    history::load_schedules(app_state.store.as_ref(), user_id)
        .await
        .map(Json)
        .map_err(|e| internal("Failed to load medication schedules", e))
}

/// Report which AI providers are currently configured.
#[utoipa::path(
    get,
    path = "/providers",
    responses((status = 200, description = "Provider readiness", body = Vec<ProviderStatusEntry>))
)]
pub async fn list_providers_handler(State(app_state): State<Arc<AppState>>) -> Json<Vec<ProviderStatusEntry>> {
    let statuses = app_state
        .aggregator
        .registry()
        .statuses()
        .into_iter()
        .map(|s| ProviderStatusEntry {
            id: serde_json::to_value(s.id)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_else(|| s.id.to_string()),
            name: s.name,
            ready: s.ready,
        })
        .collect();
    Json(statuses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::chat_task::tests::offline_state;
    use health_assistant_core::domain::Answer;

    fn input(id: &str, intensity: u8) -> SymptomInput {
        SymptomInput {
            id: id.to_string(),
            duration: SymptomDuration::OneToThreeDays,
            intensity,
            notes: None,
        }
    }

    fn required_answers() -> Vec<QuestionResponse> {
        [
            ("onset", Answer::Text("Gradually".into())),
            ("pattern", Answer::Text("Constant".into())),
            ("allergies", Answer::Bool(false)),
            ("smoking", Answer::Text("Never".into())),
            ("stress_level", Answer::Number(4.0)),
        ]
        .into_iter()
        .map(|(id, answer)| QuestionResponse { question_id: id.to_string(), answer })
        .collect()
    }

    #[tokio::test]
    async fn catalog_is_grouped_by_body_part() {
        let Json(catalog) = list_symptoms_handler(
            State(Arc::new(offline_state())),
            Query(LocaleQuery { locale: Some(Locale::Bn) }),
        )
        .await;
        assert_eq!(catalog.groups.len(), 4);
        assert_eq!(catalog.groups.iter().map(|g| g.symptoms.len()).sum::<usize>(), 13);
    }

    #[tokio::test]
    async fn unknown_symptom_is_a_bad_request() {
        let result = assessment_questions_handler(
            State(Arc::new(offline_state())),
            Json(QuestionsRequest { symptom_ids: vec!["sneezing".into()], locale: None }),
        )
        .await;
        assert_eq!(result.err().map(|(status, _)| status), Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn missing_required_answers_block_the_assessment() {
        let result = create_assessment_handler(
            State(Arc::new(offline_state())),
            Extension(Uuid::new_v4()),
            Json(AssessmentRequest { symptoms: vec![input("fever", 5)], responses: Vec::new(), locale: None }),
        )
        .await;
        assert_eq!(result.err().map(|(status, _)| status), Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn completed_assessment_is_saved_to_history() {
        let state = Arc::new(offline_state());
        let user = Uuid::new_v4();

        let response = create_assessment_handler(
            State(state.clone()),
            Extension(user),
            Json(AssessmentRequest {
                symptoms: vec![input("headache", 8), input("dizziness", 6)],
                responses: required_answers()
                    .into_iter()
                    .chain([
                        QuestionResponse { question_id: "headache_location".into(), answer: Answer::Text("Forehead".into()) },
                        QuestionResponse { question_id: "headache_light".into(), answer: Answer::Bool(true) },
                    ])
                    .collect(),
                locale: Some(Locale::En),
            }),
        )
        .await
        .map(IntoResponse::into_response);
        assert_eq!(response.map(|r| r.status()).ok(), Some(StatusCode::CREATED));

        let Json(history) = assessment_history_handler(State(state), Extension(user)).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].symptoms.len(), 2);
    }
}
