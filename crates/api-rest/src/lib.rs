//! # API REST
//!
//! HTTP API for PTB.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - API key / clinician authentication for `/dashboard` and `/api` routes
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS)
//!
//! Uses `api-shared` for request/response types and `ptb-core` for all behaviour.

#![warn(rust_2018_idioms)]

mod error;

pub use error::ApiError;

use api_shared::auth::{self, API_KEY_HEADER, CLINICIAN_HEADER};
use api_shared::dto::{
    ErrorRes, ExternalPredictReq, ExternalPredictRes, HealthRes, LandingRes, PatientRes,
    PredictReq, PredictRes, PredictionRes, RecentPredictionsRes,
};
use api_shared::HealthService;
use axum::{
    extract::{Path, Query, Request, State},
    middleware::{self, Next},
    response::{Json, Response},
    routing::{get, post},
    Extension, Router,
};
use ptb_core::constants::{
    CLASSIFIER_FAILED_MESSAGE, FETCH_FAILED_MESSAGE, LOOKUP_FAILED_MESSAGE, MAX_RECENT_LIMIT,
};
use ptb_core::{
    CallerIdentity, ClassificationWorkflow, ClinicianInputs, ExternalClassifier, FeatureVector,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::{IntoParams, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    workflow: Arc<ClassificationWorkflow>,
    classifier: Arc<ExternalClassifier>,
    api_key: Arc<str>,
}

impl AppState {
    pub fn new(
        workflow: ClassificationWorkflow,
        classifier: ExternalClassifier,
        api_key: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            workflow: Arc::new(workflow),
            classifier: Arc::new(classifier),
            api_key: api_key.into(),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        landing,
        health,
        lookup_patient,
        predict,
        recent_predictions,
        external_predict,
    ),
    components(schemas(
        HealthRes,
        LandingRes,
        ErrorRes,
        PatientRes,
        PredictReq,
        PredictRes,
        PredictionRes,
        RecentPredictionsRes,
        ExternalPredictReq,
        ExternalPredictRes,
    ))
)]
pub struct ApiDoc;

/// Builds the full router.
///
/// `/` and `/health` are public. Everything under `/dashboard` and `/api` passes through
/// [`require_clinician`] first.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/dashboard/patients/:id", get(lookup_patient))
        .route(
            "/dashboard/predictions",
            get(recent_predictions).post(predict),
        )
        .route("/api/predict", post(external_predict))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_clinician,
        ));

    Router::new()
        .route("/", get(landing))
        .route("/health", get(health))
        .merge(protected)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Rejects requests without a valid API key and clinician header, otherwise stores the
/// [`CallerIdentity`] as a request extension.
async fn require_clinician(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let headers = req.headers();
    let caller = auth::authenticate(
        &state.api_key,
        headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()),
        headers.get(CLINICIAN_HEADER).and_then(|v| v.to_str().ok()),
    )
    .inspect_err(|e| tracing::warn!(path = %req.uri().path(), "rejected request: {}", e))?;

    req.extensions_mut().insert(caller);
    Ok(next.run(req).await)
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Public landing payload", body = LandingRes)
    )
)]
#[axum::debug_handler]
async fn landing() -> Json<LandingRes> {
    Json(LandingRes {
        name: "PTB".into(),
        summary: "Term and preterm gestation classification for clinicians".into(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
#[axum::debug_handler]
async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/dashboard/patients/{id}",
    params(("id" = String, Path, description = "Integer patient ID")),
    responses(
        (status = 200, description = "Patient and blank input form", body = PatientRes),
        (status = 400, description = "Patient ID is not an integer", body = ErrorRes),
        (status = 401, description = "Missing or invalid credentials", body = ErrorRes),
        (status = 404, description = "No such patient", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Look up a patient and return the blank form for re-entering clinical values.
#[axum::debug_handler]
async fn lookup_patient(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(id): Path<String>,
) -> Result<Json<PatientRes>, ApiError> {
    tracing::debug!(clinician = caller.clinician(), "patient search");

    let patient = state
        .workflow
        .lookup_patient(&id)
        .await
        .map_err(|e| ApiError::from_core(e, LOOKUP_FAILED_MESSAGE))?;
    let inputs = ClassificationWorkflow::prepare_input_fields(&patient);

    Ok(Json(PatientRes::new(&patient, &inputs)))
}

#[utoipa::path(
    post,
    path = "/dashboard/predictions",
    request_body = PredictReq,
    responses(
        (status = 200, description = "Classification result and refreshed history", body = PredictRes),
        (status = 400, description = "Invalid patient ID or gestation", body = ErrorRes),
        (status = 401, description = "Missing or invalid credentials", body = ErrorRes),
        (status = 404, description = "No such patient", body = ErrorRes)
    )
)]
/// Classify with the gestation threshold rule and append the outcome to the history.
///
/// A failed history write still returns the label, with `saved: false` and a warning.
#[axum::debug_handler]
async fn predict(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Json(req): Json<PredictReq>,
) -> Result<Json<PredictRes>, ApiError> {
    let mut inputs = ClinicianInputs::default();
    for (field, value) in req.inputs {
        inputs
            .set(&field, value)
            .map_err(|e| ApiError::from_core(e, LOOKUP_FAILED_MESSAGE))?;
    }

    let outcome = state
        .workflow
        .predict(&caller, &req.patient_id, &inputs)
        .await
        .map_err(|e| ApiError::from_core(e, LOOKUP_FAILED_MESSAGE))?;

    Ok(Json(PredictRes::from(&outcome)))
}

#[derive(Debug, Deserialize, IntoParams)]
struct RecentQuery {
    /// Number of records to return (default from configuration, at most 100).
    limit: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/dashboard/predictions",
    params(RecentQuery),
    responses(
        (status = 200, description = "Most recent predictions, newest first", body = RecentPredictionsRes),
        (status = 401, description = "Missing or invalid credentials", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn recent_predictions(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<RecentPredictionsRes>, ApiError> {
    let limit = query
        .limit
        .unwrap_or_else(|| state.workflow.recent_limit())
        .min(MAX_RECENT_LIMIT);

    let records = state
        .workflow
        .fetch_recent_predictions(limit)
        .await
        .map_err(|e| ApiError::from_core(e, FETCH_FAILED_MESSAGE))?;

    Ok(Json(RecentPredictionsRes {
        predictions: records.iter().map(PredictionRes::from).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/predict",
    request_body = ExternalPredictReq,
    responses(
        (status = 200, description = "Label produced by the external classifier", body = ExternalPredictRes),
        (status = 401, description = "Missing or invalid credentials", body = ErrorRes),
        (status = 500, description = "Classifier failed", body = ErrorRes),
        (status = 504, description = "Classifier timed out", body = ErrorRes)
    )
)]
/// Run the external classifier on the fifteen model features. Nothing is recorded.
#[axum::debug_handler]
async fn external_predict(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Json(req): Json<ExternalPredictReq>,
) -> Result<Json<ExternalPredictRes>, ApiError> {
    tracing::debug!(clinician = caller.clinician(), "external classification");

    let prediction = state
        .classifier
        .classify(&FeatureVector::from(req))
        .await
        .map_err(|e| ApiError::from_core(e, CLASSIFIER_FAILED_MESSAGE))?;

    Ok(Json(ExternalPredictRes { prediction }))
}
