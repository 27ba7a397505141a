use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use super::domain::{QuestionnaireSubmission, SignalKind};
use super::explanation::TextGenerator;
use super::service::{RecommendationError, RecommendationService};
use super::tables::ScoringTables;

/// Body returned by `POST /recommend`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationResponse {
    pub recommendation: String,
}

/// Router builder exposing the recommendation endpoints.
pub fn recommendation_router<G>(service: Arc<RecommendationService<G>>) -> Router
where
    G: TextGenerator + 'static,
{
    Router::new()
        .route("/recommend", post(recommend_handler::<G>))
        .route(
            "/api/v1/recommendations/score",
            post(score_handler::<G>),
        )
        .route(
            "/api/v1/questionnaire/vocabulary",
            get(vocabulary_handler),
        )
        .with_state(service)
}

pub(crate) async fn recommend_handler<G>(
    State(service): State<Arc<RecommendationService<G>>>,
    payload: Result<Json<QuestionnaireSubmission>, JsonRejection>,
) -> Response
where
    G: TextGenerator + 'static,
{
    let Json(submission) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_payload(rejection),
    };

    match service.recommend(&submission).await {
        Ok(result) => (
            StatusCode::OK,
            Json(RecommendationResponse {
                recommendation: result.explanation,
            }),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn score_handler<G>(
    State(service): State<Arc<RecommendationService<G>>>,
    payload: Result<Json<QuestionnaireSubmission>, JsonRejection>,
) -> Response
where
    G: TextGenerator + 'static,
{
    let Json(submission) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_payload(rejection),
    };

    match service.assess(&submission) {
        Ok(assessment) => (StatusCode::OK, Json(assessment)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn vocabulary_handler() -> Json<serde_json::Value> {
    let mut vocabulary = serde_json::Map::new();
    for kind in SignalKind::ALL {
        vocabulary.insert(
            kind.field().to_string(),
            json!(ScoringTables::vocabulary(kind)),
        );
    }
    Json(serde_json::Value::Object(vocabulary))
}

fn malformed_payload(rejection: JsonRejection) -> Response {
    let payload = json!({
        "error": rejection.body_text(),
        "kind": "malformed_payload",
    });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

fn error_response(error: RecommendationError) -> Response {
    let status = match &error {
        RecommendationError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RecommendationError::Generation(_) => {
            warn!(error = %error, "recommendation failed at text generation");
            StatusCode::BAD_GATEWAY
        }
    };

    let payload = json!({
        "error": error.to_string(),
        "kind": error.kind(),
    });
    (status, Json(payload)).into_response()
}
