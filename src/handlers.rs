use crate::config::{AiMode, Config};
use crate::errors::{AppError, ResultExt};
use crate::models::*;
use crate::pipeline::ScoringPipeline;
use crate::store::ScoringStore;
use crate::upload;
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared application state injected into handlers.
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Scoring pipeline, built once from configuration.
    pub pipeline: ScoringPipeline,
    /// Current offer, leads and results.
    pub store: RwLock<ScoringStore>,
}

impl AppState {
    pub fn new(config: Config, pipeline: ScoringPipeline) -> Self {
        Self {
            config,
            pipeline,
            store: RwLock::new(ScoringStore::new()),
        }
    }
}

/// Application routes without the network-facing middleware added in `main`.
pub fn router(state: Arc<AppState>) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/offer", post(create_offer))
        .route(
            "/leads/upload",
            post(upload_leads).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/score", post(run_scoring))
        .route("/results", get(get_results))
        .with_state(state)
}

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to the Lead Scoring API".to_string(),
    })
}

/// Health check endpoint.
///
/// Reports whether AI scoring is active so operators can spot a missing key.
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "lead-scoring-api",
            "version": env!("CARGO_PKG_VERSION"),
            "ai_enabled": state.pipeline.ai_mode() == AiMode::Enabled,
        })),
    )
}

/// POST /offer
///
/// Stores the offer used by subsequent scoring runs, replacing any previous one.
pub async fn create_offer(
    State(state): State<Arc<AppState>>,
    Json(offer): Json<Offer>,
) -> (StatusCode, Json<OfferResponse>) {
    tracing::info!("POST /offer - '{}'", offer.name);

    state.store.write().await.set_offer(offer.clone());

    (
        StatusCode::CREATED,
        Json(OfferResponse {
            message: "Offer created successfully".to_string(),
            offer,
        }),
    )
}

/// POST /leads/upload
///
/// Accepts a multipart form whose `file` part is a CSV of leads. A successful
/// upload replaces the current batch and clears earlier results.
pub async fn upload_leads(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        if !upload::is_csv_content_type(field.content_type()) {
            return Err(AppError::BadRequest(
                "Invalid file type. Please upload a CSV.".to_string(),
            ));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;
        file = Some(bytes);
    }

    let bytes = file.ok_or_else(|| {
        AppError::BadRequest("Missing 'file' field with CSV content.".to_string())
    })?;
    let text = std::str::from_utf8(&bytes)
        .map_err(|_| AppError::BadRequest("CSV file must be UTF-8 encoded.".to_string()))?;

    let leads = upload::parse_leads(text.as_bytes()).context("processing lead upload")?;
    let count = leads.len();
    state.store.write().await.replace_leads(leads);

    tracing::info!("✓ {} leads uploaded", count);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!("{} leads uploaded successfully.", count),
        }),
    ))
}

/// POST /score
///
/// Runs the scoring pipeline over the uploaded leads and stores the results.
pub async fn run_scoring(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ScoringRunSummary>, AppError> {
    let (offer, leads) = {
        let store = state.store.read().await;
        (store.offer().cloned(), store.leads().to_vec())
    };

    let scores = state.pipeline.run(&leads, offer.as_ref()).await?;
    let intents = IntentCounts::tally(&scores);
    let count = scores.len();

    state.store.write().await.replace_scores(scores);

    Ok(Json(ScoringRunSummary {
        message: format!("Scoring complete for {} leads.", count),
        scored_at: chrono::Utc::now(),
        intents,
    }))
}

/// GET /results
///
/// Returns the results of the latest scoring run.
pub async fn get_results(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LeadScore>>, AppError> {
    let store = state.store.read().await;
    if store.scores().is_empty() {
        return Err(AppError::NotFound(
            "No scoring results found. Please run scoring via POST to /score.".to_string(),
        ));
    }

    Ok(Json(store.scores().to_vec()))
}
