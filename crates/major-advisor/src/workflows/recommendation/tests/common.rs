use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::recommendation::domain::{
    Dimension, DimensionScores, QuestionnaireResponse, QuestionnaireSubmission,
};
use crate::workflows::recommendation::explanation::{
    worked_example_submission, ExplanationRequester, GenerationError, GenerationRequest,
    PromptBuilder, RequestPolicy, TextGenerator,
};
use crate::workflows::recommendation::validation::QuestionnaireValidator;
use crate::workflows::recommendation::{recommendation_router, RecommendationService};

pub(super) fn worked_example() -> QuestionnaireSubmission {
    worked_example_submission()
}

pub(super) fn investigative_submission() -> QuestionnaireSubmission {
    QuestionnaireSubmission {
        interest_fields: vec![
            "Engineering and technology".to_string(),
            "Agriculture and sciences".to_string(),
        ],
        qualities: vec![
            "Problem solver".to_string(),
            "Logical thinker".to_string(),
            "Observer".to_string(),
            "Practical".to_string(),
        ],
        free_time_activities: vec!["Computing".to_string(), "Experimentation".to_string()],
        intrinsic_motivation: 4,
        identified_regulation: 3,
        introjected_regulation: 1,
        integrated_regulation: 2,
        amotivation: 2,
        external_regulation: 1,
    }
}

pub(super) fn validate(submission: &QuestionnaireSubmission) -> QuestionnaireResponse {
    QuestionnaireValidator::default()
        .validate(submission)
        .expect("submission validates")
}

pub(super) fn scores_from(entries: &[(Dimension, u32)]) -> DimensionScores {
    let mut scores = DimensionScores::default();
    for (dimension, points) in entries {
        scores.add(*dimension, *points);
    }
    scores
}

pub(super) fn test_policy() -> RequestPolicy {
    RequestPolicy {
        timeout: Duration::from_secs(5),
        max_attempts: 2,
        max_concurrent: 1,
        max_tokens: 256,
        retry_delay: Duration::ZERO,
    }
}

pub(super) fn requester<G>(generator: Arc<G>, policy: RequestPolicy) -> ExplanationRequester<G>
where
    G: TextGenerator + 'static,
{
    ExplanationRequester::new(
        generator,
        PromptBuilder::new().expect("prompt builder"),
        policy,
    )
}

pub(super) fn service<G>(generator: Arc<G>) -> RecommendationService<G>
where
    G: TextGenerator + 'static,
{
    RecommendationService::with_parts(
        QuestionnaireValidator::default(),
        requester(generator, test_policy()),
    )
}

pub(super) fn router_with<G>(generator: Arc<G>) -> axum::Router
where
    G: TextGenerator + 'static,
{
    recommendation_router(Arc::new(service(generator)))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Answers with the headline the prompt asks for, followed by a short paragraph.
#[derive(Default)]
pub(super) struct HeadlineGenerator {
    pub(super) requests: Mutex<Vec<GenerationRequest>>,
}

impl HeadlineGenerator {
    pub(super) fn calls(&self) -> usize {
        self.requests.lock().expect("requests mutex poisoned").len()
    }
}

#[async_trait]
impl TextGenerator for HeadlineGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        self.requests
            .lock()
            .expect("requests mutex poisoned")
            .push(request.clone());
        let headline = request
            .prompt
            .lines()
            .filter(|line| line.starts_with("Top 5 majors: "))
            .last()
            .unwrap_or_default()
            .to_string();
        Ok(format!(
            "\n  {headline} You light up when you create and connect with people.  \n"
        ))
    }
}

/// Replays queued outcomes in order; errors once the queue is empty.
#[derive(Default)]
pub(super) struct ScriptedGenerator {
    outcomes: Mutex<VecDeque<Result<String, GenerationError>>>,
    pub(super) calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub(super) fn new(outcomes: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcomes
            .lock()
            .expect("outcomes mutex poisoned")
            .pop_front()
            .unwrap_or(Err(GenerationError::EmptyOutput))
    }
}

pub(super) fn exit_failure() -> GenerationError {
    GenerationError::Exit {
        status: "exit status: 1".to_string(),
        stderr: "failed to load model".to_string(),
    }
}

/// Sleeps before answering and records the peak number of overlapping calls.
pub(super) struct SlowGenerator {
    delay: Duration,
    active: AtomicUsize,
    pub(super) peak: AtomicUsize,
}

impl SlowGenerator {
    pub(super) fn new(delay: Duration) -> Self {
        Self {
            delay,
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl TextGenerator for SlowGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, GenerationError> {
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(active, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok("Top 5 majors: slow but steady.".to_string())
    }
}
