use major_advisor::config::AppConfig;
use major_advisor::error::AppError;
use major_advisor::workflows::recommendation::{
    LlamaCppGenerator, QuestionnaireSubmission, RecommendationService,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type LlamaRecommendationService = RecommendationService<LlamaCppGenerator>;

/// Recommendation service backed by the configured llama.cpp model.
pub(crate) fn llama_service(config: &AppConfig) -> Result<LlamaRecommendationService, AppError> {
    let generator = Arc::new(LlamaCppGenerator::new(config.generation.clone()));
    let service =
        RecommendationService::new(generator, &config.questionnaire, &config.generation)?;
    Ok(service)
}

/// Read a questionnaire submission from a JSON file.
pub(crate) fn load_submission(path: &Path) -> Result<QuestionnaireSubmission, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let submission = serde_json::from_str(&raw)?;
    Ok(submission)
}
