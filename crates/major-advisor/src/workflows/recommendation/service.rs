use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::aggregator::{aggregate, ScoreBreakdown};
use super::domain::{
    MajorSelection, QuestionnaireResponse, QuestionnaireSubmission, RecommendationResult,
    ScoreContribution,
};
use super::explanation::{
    ExplanationRequester, GenerationError, PromptBuilder, RequestPolicy, TextGenerator,
};
use super::selector::select;
use super::validation::{QuestionnaireValidator, QuestionnaireViolation};
use crate::config::{GenerationConfig, QuestionnaireConfig};

/// Deterministic scoring outcome for one questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assessment {
    #[serde(flatten)]
    pub selection: MajorSelection,
    pub contributions: Vec<ScoreContribution>,
}

impl Assessment {
    fn new(breakdown: ScoreBreakdown, selection: MajorSelection) -> Self {
        Self {
            selection,
            contributions: breakdown.contributions,
        }
    }
}

/// Service composing validation, scoring, selection, and the explanation request.
pub struct RecommendationService<G> {
    validator: QuestionnaireValidator,
    requester: ExplanationRequester<G>,
}

impl<G> RecommendationService<G>
where
    G: TextGenerator + 'static,
{
    pub fn new(
        generator: Arc<G>,
        questionnaire: &QuestionnaireConfig,
        generation: &GenerationConfig,
    ) -> Result<Self, RecommendationError> {
        let prompts = PromptBuilder::new()?;
        let requester =
            ExplanationRequester::new(generator, prompts, RequestPolicy::from(generation));
        Ok(Self::with_parts(
            QuestionnaireValidator::from_config(questionnaire),
            requester,
        ))
    }

    pub fn with_parts(
        validator: QuestionnaireValidator,
        requester: ExplanationRequester<G>,
    ) -> Self {
        Self {
            validator,
            requester,
        }
    }

    /// Validate and score without contacting the generator.
    pub fn assess(
        &self,
        submission: &QuestionnaireSubmission,
    ) -> Result<Assessment, RecommendationError> {
        let (_, assessment) = self.evaluate(submission)?;
        Ok(assessment)
    }

    fn evaluate(
        &self,
        submission: &QuestionnaireSubmission,
    ) -> Result<(QuestionnaireResponse, Assessment), RecommendationError> {
        let response = self.validator.validate(submission)?;
        let breakdown = aggregate(&response);
        let selection = select(&breakdown.scores);

        debug!(
            scores = %selection.scores.ranked_summary(&selection.ranking),
            "questionnaire scored"
        );

        Ok((response, Assessment::new(breakdown, selection)))
    }

    /// Full recommendation: scores, selected majors, and the generated explanation.
    pub async fn recommend(
        &self,
        submission: &QuestionnaireSubmission,
    ) -> Result<RecommendationResult, RecommendationError> {
        let (response, assessment) = self.evaluate(submission)?;
        let selection = assessment.selection;

        info!(
            primary = %selection.primary,
            secondary = %selection.secondary,
            "requesting explanation"
        );

        let explanation = self.requester.explain(&response, &selection).await?;
        Ok(RecommendationResult::new(selection, explanation))
    }
}

/// Error raised by the recommendation service.
#[derive(Debug, thiserror::Error)]
pub enum RecommendationError {
    #[error(transparent)]
    Validation(#[from] QuestionnaireViolation),
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl RecommendationError {
    /// Stable machine-readable error category.
    pub fn kind(&self) -> &'static str {
        match self {
            RecommendationError::Validation(_) => "invalid_questionnaire",
            RecommendationError::Generation(_) => "text_generation_unavailable",
        }
    }
}
