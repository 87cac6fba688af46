//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{ChatProviderAdapter, DbAdapter},
    config::Config,
    error::ApiError,
    web::{
        assessment_history_handler, assessment_questions_handler, chat_handler, create_assessment_handler,
        list_providers_handler, list_schedules_handler, list_symptoms_handler, require_user, rest::ApiDoc,
        state::AppState, ws_handler,
    },
};
use axum::http::{header::CONTENT_TYPE, HeaderName, HeaderValue, Method};
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use health_assistant_core::{validate_tables, ProviderRegistry, ResponseAggregator};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    if let Err(problems) = validate_tables() {
        for problem in &problems {
            error!("{}", problem);
        }
        return Err(ApiError::Internal(format!("{} rule table problem(s)", problems.len())));
    }

    // --- 2. Connect to Database & Run Migrations ---
    info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    let db_adapter = Arc::new(DbAdapter::new(db_pool.clone()));
    info!("Running database migrations...");
    db_adapter.run_migrations().await?;
    info!("Database migrations complete.");

    // --- 3. Initialize Provider Adapters ---
    let mut registry = ProviderRegistry::new();
    registry.register(Arc::new(ChatProviderAdapter::openai(config.openai.model.clone())));
    registry.register(Arc::new(ChatProviderAdapter::gemini(config.gemini.model.clone())));
    registry.register(Arc::new(ChatProviderAdapter::deepseek(config.deepseek.model.clone())));
    registry.reconfigure(&config.credentials());
    if !registry.has_available() {
        warn!("No AI provider key is configured; chat will answer with the fallback text.");
    }
    let registry = Arc::new(registry);
    spawn_reconfigure_on_sighup(registry.clone());

    let aggregator = Arc::new(ResponseAggregator::new(registry).with_timeout(config.provider_timeout));

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        store: db_adapter.clone(),
        directory: db_adapter,
        aggregator,
        config: config.clone(),
    });

    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .map_err(|e| ApiError::Internal(format!("Invalid CORS_ORIGIN '{}': {}", config.cors_origin, e)))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static("x-user-id")]);

    // --- 5. Create the Web Router ---
    // Public routes (no user id required)
    let public_routes = Router::new()
        .route("/symptoms", get(list_symptoms_handler))
        .route("/assessment/questions", post(assessment_questions_handler))
        .route("/providers", get(list_providers_handler));

    // Per-user routes
    let user_routes = Router::new()
        .route("/assessment", post(create_assessment_handler))
        .route("/assessment/history", get(assessment_history_handler))
        .route("/chat", post(chat_handler))
        .route("/medications/schedules", get(list_schedules_handler))
        .route("/ws", get(ws_handler))
        .layer(axum_middleware::from_fn(require_user));

    let api_router = Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", config.bind_address);
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Re-reads the environment on SIGHUP and re-arms the provider adapters.
#[cfg(unix)]
fn spawn_reconfigure_on_sighup(registry: Arc<ProviderRegistry>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut hangups = match signal(SignalKind::hangup()) {
            Ok(stream) => stream,
            Err(e) => {
                error!("Could not listen for SIGHUP: {}", e);
                return;
            }
        };
        while hangups.recv().await.is_some() {
            info!("SIGHUP received; reloading provider credentials.");
            dotenvy::dotenv_override().ok();
            match Config::from_env() {
                Ok(fresh) => registry.reconfigure(&fresh.credentials()),
                Err(e) => error!("Keeping current providers; configuration reload failed: {}", e),
            }
        }
    });
}

#[cfg(not(unix))]
fn spawn_reconfigure_on_sighup(_registry: Arc<ProviderRegistry>) {}
